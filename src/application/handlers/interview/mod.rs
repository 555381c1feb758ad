//! Interview command handlers.

mod finalize_session;
mod process_turn;

pub use finalize_session::{
    FinalizeSessionCommand, FinalizeSessionError, FinalizeSessionHandler, FinalizedSession,
};
pub use process_turn::ProcessTurnHandler;
