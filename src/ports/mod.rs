//! Ports - interfaces between the domain/application layers and the
//! outside world. Adapters implement these traits.

mod intake_store;
mod oracle;

pub use intake_store::{IntakeRecord, IntakeStore};
pub use oracle::{Oracle, OracleError, OracleMessage, OracleRequest, OracleReply, OracleRole};
