//! PostgreSQL adapters - port implementations over sqlx.

mod intake_store;

pub use intake_store::PostgresIntakeStore;
