//! Organization-scoped authorization checks
//!
//! Role resolution used by the `authorize` stage of membership-sensitive use
//! cases. Denials surface as `Unauthorized` without leaking whether the
//! organization or the actor exist.

use uuid::Uuid;

use crate::membership::{MembershipRole, OrganizationMembership, OrganizationMembershipRepository};
use crate::usecase::{Adapters, DomainError, OperationContext};
use crate::user::{User, UserRepository};

/// Resolve the acting user from the operation context.
///
/// An unknown actor is an authorization failure, not a lookup failure.
pub async fn actor_user(
    adapters: &Adapters,
    ctx: &OperationContext,
    action: &str,
) -> Result<User, DomainError> {
    match adapters
        .persistence
        .users
        .find_by_external_id(&ctx.actor_external_id)
        .await?
    {
        Some(user) => Ok(user),
        None => Err(DomainError::unauthorized(action)),
    }
}

/// Require the actor to hold one of the given roles in the organization.
///
/// Returns the actor and their active membership on success.
pub async fn require_member_role(
    adapters: &Adapters,
    ctx: &OperationContext,
    organization_id: Uuid,
    roles: &[MembershipRole],
    action: &str,
) -> Result<(User, OrganizationMembership), DomainError> {
    let user = actor_user(adapters, ctx, action).await?;

    match adapters
        .persistence
        .memberships
        .find_active_by_user(organization_id, user.id)
        .await?
    {
        Some(membership) if roles.contains(&membership.role) => Ok((user, membership)),
        _ => Err(DomainError::unauthorized_on(action, "Organization")),
    }
}

/// Roles allowed to manage members.
pub const MEMBER_MANAGER_ROLES: &[MembershipRole] =
    &[MembershipRole::Owner, MembershipRole::Admin];
