//! ListIntakes query handler.

use std::sync::Arc;

use crate::domain::foundation::DomainError;
use crate::ports::{IntakeRecord, IntakeStore};

/// Returns all persisted intakes for admin review.
pub struct ListIntakesHandler {
    store: Arc<dyn IntakeStore>,
}

impl ListIntakesHandler {
    /// Creates a new handler.
    pub fn new(store: Arc<dyn IntakeStore>) -> Self {
        Self { store }
    }

    /// Lists intakes, most recently completed first.
    pub async fn handle(&self) -> Result<Vec<IntakeRecord>, DomainError> {
        self.store.list().await
    }
}
