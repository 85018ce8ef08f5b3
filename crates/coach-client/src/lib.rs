//! Client side of the writing coach: HTTP client and form/result state.

pub mod client;
pub mod session;

pub use client::{ClientError, CoachClient};
pub use session::CoachSession;
