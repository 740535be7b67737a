//! Remove Organization Member Use Case
//!
//! Administrative removal. Removing an already-removed membership is a
//! success no-op so that retried removals don't surface spurious failures.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::audit::AuditLog;
use crate::membership::entity::{MembershipRole, MembershipStatus, OrganizationMembership};
use crate::membership::repository::OrganizationMembershipRepository;
use crate::shared::authorization::{require_member_role, MEMBER_MANAGER_ROLES};
use crate::usecase::{Adapters, DomainError, EntityChange, OperationContext, UnitOfWork, UseCase};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveOrganizationMemberInput {
    pub membership_id: Uuid,
}

pub struct RemoveOrganizationMember;

#[async_trait]
impl UseCase for RemoveOrganizationMember {
    type Input = RemoveOrganizationMemberInput;
    type Output = OrganizationMembership;

    fn name(&self) -> &'static str {
        "RemoveOrganizationMember"
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
            "remove organization member",
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

        // Idempotent: a repeated removal succeeds without touching anything.
        if membership.status == MembershipStatus::Removed {
            return Ok(membership);
        }

        if membership.role == MembershipRole::Owner && membership.is_active() {
            return Err(DomainError::business_rule(
                "The owner cannot be removed; transfer ownership first",
            ));
        }

        let now = adapters.system.now();
        membership.remove(now)?;

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
