//! Core domain types: the Tour aggregate, geography reference data,
//! inquiries, and the multi-encoding field normalizer.

pub mod geography;
pub mod inquiry;
pub mod normalize;
pub mod tour;

pub use geography::{City, Country, State};
pub use inquiry::{Inquiry, InquiryDraft, InquiryPatch};
pub use tour::{Tour, TourDraft, TourPatch, resolve_discounted_price};
