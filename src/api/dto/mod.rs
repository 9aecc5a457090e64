//! Data Transfer Objects for REST request/response serialization.
//!
//! Entity bodies serialize straight from the domain and service types;
//! only the envelopes that exist purely at the HTTP surface live here.

pub mod common_dto;

pub use common_dto::*;
