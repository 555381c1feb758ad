//! Admin query handlers.

mod list_intakes;

pub use list_intakes::ListIntakesHandler;
