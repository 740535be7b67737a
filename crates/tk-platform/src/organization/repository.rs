//! Organization Repository Port

use async_trait::async_trait;
use uuid::Uuid;

use super::entity::Organization;
use crate::usecase::DomainError;

/// Read-side access to organizations. Finders exclude soft-deleted rows.
#[async_trait]
pub trait OrganizationRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Organization>, DomainError>;

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Organization>, DomainError>;

    /// One page of organizations ordered by creation time, plus the total count.
    async fn find_page(
        &self,
        offset: u64,
        limit: u32,
    ) -> Result<(Vec<Organization>, u64), DomainError>;
}
