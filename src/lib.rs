//! # atlas-backoffice
//!
//! Back-office REST service for a travel agency: tours with nested
//! packages, schedules, and galleries; the country/state/city geography
//! they hang off; and customer inquiries.
//!
//! The heart of the service is the Tour field normalizer
//! ([`domain::normalize`]): admin clients submit nested collections as
//! JSON documents, JSON text, or flat bracket-indexed form keys (often
//! mixed in one multipart request), and all of them fold into one
//! canonical stored shape.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP)
//!     │
//!     ├── REST Handlers (api/)
//!     │
//!     ├── TourService / GeoService / InquiryService (service/)
//!     ├── Field Normalizer (domain/normalize)
//!     │
//!     ├── CloudinaryHost (assets/)
//!     │
//!     └── PostgreSQL Persistence (persistence/)
//! ```

pub mod api;
pub mod app_state;
pub mod assets;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod service;
