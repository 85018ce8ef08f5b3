//! Core types and traits for the writing coach API.
//!
//! DTOs serialize to the JSON shapes served under `/api/v1/`.

mod dto;
mod traits;

pub use dto::*;
pub use traits::*;
