//! HTTP adapters - REST API implementations.
//!
//! Each module has its own router, handlers, and DTOs.

pub mod admin;
pub mod interview;
pub mod middleware;

// Re-export key types for convenience
pub use admin::{admin_router, AdminAppState};
pub use interview::{interview_router, InterviewAppState};
