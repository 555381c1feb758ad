//! Admin HTTP adapter.

mod dto;
mod handlers;
mod routes;

pub use handlers::AdminAppState;
pub use routes::{admin_router, admin_routes};
