//! Interview HTTP adapter.

mod dto;
mod handlers;
mod routes;

pub use dto::ErrorResponse;
pub use handlers::InterviewAppState;
pub use routes::{interview_router, interview_routes};
