//! In-memory Unit of Work
//!
//! All-or-nothing commit against the in-memory store, with an injectable
//! failpoint so tests can simulate a mid-commit failure and assert that
//! nothing was applied.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::audit::AuditLog;
use crate::usecase::{DomainError, EntityChange, UnitOfWork};

use super::store::InMemoryStore;

pub struct InMemoryUnitOfWork {
    store: Arc<InMemoryStore>,
    audit_entries: Mutex<Vec<AuditLog>>,
    fail_at_change: Mutex<Option<usize>>,
}

impl InMemoryUnitOfWork {
    pub fn new(store: Arc<InMemoryStore>) -> Self {
        Self {
            store,
            audit_entries: Mutex::new(Vec::new()),
            fail_at_change: Mutex::new(None),
        }
    }

    /// Make the next commits fail while staging the change at `index`.
    pub fn fail_at_change(&self, index: usize) {
        *self.fail_at_change.lock().unwrap() = Some(index);
    }

    /// Clear the failpoint.
    pub fn clear_failpoint(&self) {
        *self.fail_at_change.lock().unwrap() = None;
    }

    /// Audit entries committed so far.
    pub fn audit_entries(&self) -> Vec<AuditLog> {
        self.audit_entries.lock().unwrap().clone()
    }
}

#[async_trait]
impl UnitOfWork for InMemoryUnitOfWork {
    async fn commit(
        &self,
        changes: Vec<EntityChange>,
        audit: Option<AuditLog>,
    ) -> Result<(), DomainError> {
        let fail_at = *self.fail_at_change.lock().unwrap();

        // Stage everything first; a failpoint hit means nothing was applied.
        let mut staged = Vec::with_capacity(changes.len());
        for (index, change) in changes.into_iter().enumerate() {
            if fail_at == Some(index) {
                return Err(DomainError::infrastructure("Simulated commit failure"));
            }
            staged.push(change);
        }

        for change in staged {
            self.store.apply(change);
        }
        if let Some(audit) = audit {
            self.audit_entries.lock().unwrap().push(audit);
        }
        Ok(())
    }
}
