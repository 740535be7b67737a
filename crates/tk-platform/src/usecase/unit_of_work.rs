//! Unit of Work
//!
//! Transactional boundary for entity writes. Every mutating use case funnels
//! its writes through `UnitOfWork::commit` so that entity changes and the
//! audit record land atomically: either every change is applied or none is.
//!
//! Persistence backends implement this port; the platform ships only the
//! in-memory implementation used by tests (see [`crate::testing`]).

use async_trait::async_trait;

use crate::audit::AuditLog;
use crate::membership::OrganizationMembership;
use crate::organization::Organization;
use crate::user::User;

use super::error::DomainError;

/// A single staged entity write.
///
/// Soft deletes are upserts carrying the tombstone timestamp; the unit of
/// work never hard-deletes rows.
#[derive(Debug, Clone)]
pub enum EntityChange {
    UpsertUser(User),
    UpsertOrganization(Organization),
    UpsertMembership(OrganizationMembership),
}

impl EntityChange {
    /// Entity type label, as recorded in audit entries.
    pub fn entity_type(&self) -> &'static str {
        match self {
            Self::UpsertUser(_) => "User",
            Self::UpsertOrganization(_) => "Organization",
            Self::UpsertMembership(_) => "OrganizationMembership",
        }
    }

    /// Identifier of the affected entity.
    pub fn entity_id(&self) -> String {
        match self {
            Self::UpsertUser(user) => user.id.to_string(),
            Self::UpsertOrganization(organization) => organization.id.to_string(),
            Self::UpsertMembership(membership) => membership.id.to_string(),
        }
    }
}

/// Atomic commit of one logical unit of work.
///
/// Implementations must guarantee all-or-nothing semantics across the whole
/// change set: a failure while applying any change leaves every entity (and
/// the audit sink) untouched. Concurrent commits touching the same entity
/// must be serialized by the backend, not by callers.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    /// Apply all changes and the optional audit record atomically.
    async fn commit(
        &self,
        changes: Vec<EntityChange>,
        audit: Option<AuditLog>,
    ) -> Result<(), DomainError>;
}
