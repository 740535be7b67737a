//! Update Member Role Use Case
//!
//! Role changes stay below ownership: promoting to Owner or demoting the
//! sole Owner both go through the ownership-transfer use case instead.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::audit::AuditLog;
use crate::membership::entity::{MembershipRole, OrganizationMembership};
use crate::membership::repository::OrganizationMembershipRepository;
use crate::shared::authorization::{require_member_role, MEMBER_MANAGER_ROLES};
use crate::usecase::{Adapters, DomainError, EntityChange, OperationContext, UnitOfWork, UseCase};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMemberRoleInput {
    pub membership_id: Uuid,
    pub role: MembershipRole,
}

pub struct UpdateMemberRole;

#[async_trait]
impl UseCase for UpdateMemberRole {
    type Input = UpdateMemberRoleInput;
    type Output = OrganizationMembership;

    fn name(&self) -> &'static str {
        "UpdateMemberRole"
    }

    async fn authorize(
        &self,
        input: &Self::Input,
        ctx: &OperationContext,
        adapters: &Adapters,
    ) -> Result<(), DomainError> {
        let membership = adapters
            .persistence
            .memberships
            .find_by_id(input.membership_id)
            .await?
            .ok_or_else(|| {
                DomainError::not_found("OrganizationMembership", input.membership_id.to_string())
            })?;

        require_member_role(
            adapters,
            ctx,
            membership.organization_id,
            MEMBER_MANAGER_ROLES,
            "update member role",
        )
        .await?;
        Ok(())
    }

    async fn execute(
        &self,
        input: &Self::Input,
        ctx: &OperationContext,
        adapters: &Adapters,
    ) -> Result<Self::Output, DomainError> {
        let mut membership = adapters
            .persistence
            .memberships
            .find_by_id(input.membership_id)
            .await?
            .ok_or_else(|| {
                DomainError::not_found("OrganizationMembership", input.membership_id.to_string())
            })?;

        if input.role == MembershipRole::Owner {
            return Err(DomainError::business_rule(
                "Ownership is granted through ownership transfer, not a role update",
            ));
        }
        if membership.role == MembershipRole::Owner {
            return Err(DomainError::business_rule(
                "The owner cannot be demoted without a prior ownership transfer",
            ));
        }

        let now = adapters.system.now();
        membership.change_role(input.role, now)?;

        let audit = AuditLog::from_command(
            "OrganizationMembership",
            Some(membership.id.to_string()),
            input,
            ctx,
            adapters.system.new_id(),
            now,
        );

        adapters
            .persistence
            .uow
            .commit(
                vec![EntityChange::UpsertMembership(membership.clone())],
                Some(audit),
            )
            .await?;

        Ok(membership)
    }
}
