//! Foundation types shared across the domain layer.
//!
//! Value objects, identifiers, and error types used by every interview
//! module. Nothing in here depends on infrastructure.

mod errors;
mod ids;
mod quality;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::SessionId;
pub use quality::Quality;
pub use timestamp::Timestamp;
