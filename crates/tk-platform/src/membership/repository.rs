//! Organization Membership Repository Port

use async_trait::async_trait;
use uuid::Uuid;

use super::entity::OrganizationMembership;
use crate::usecase::DomainError;

/// Read-side access to memberships.
///
/// "Current" means not in a terminal state (Invited or Active); terminal
/// rows are history and only reachable by id.
#[async_trait]
pub trait OrganizationMembershipRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<OrganizationMembership>, DomainError>;

    /// The actor's active membership in an organization, if any.
    async fn find_active_by_user(
        &self,
        organization_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<OrganizationMembership>, DomainError>;

    /// The current (non-terminal) membership for a username in an organization.
    async fn find_current_by_username(
        &self,
        organization_id: Uuid,
        username: &str,
    ) -> Result<Option<OrganizationMembership>, DomainError>;

    /// The active Owner membership of an organization.
    async fn find_owner(
        &self,
        organization_id: Uuid,
    ) -> Result<Option<OrganizationMembership>, DomainError>;

    /// One page of an organization's current memberships, plus the total count.
    async fn find_page_by_organization(
        &self,
        organization_id: Uuid,
        offset: u64,
        limit: u32,
    ) -> Result<(Vec<OrganizationMembership>, u64), DomainError>;
}
