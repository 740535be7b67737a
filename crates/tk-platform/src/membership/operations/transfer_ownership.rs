//! Transfer Ownership Use Case
//!
//! Atomic two-membership update plus the organization's owner reference:
//! the old owner is demoted to member, the new owner promoted, and
//! `owner_user_id` repointed, all inside one unit-of-work commit. A failure
//! mid-commit leaves all three unchanged.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::audit::AuditLog;
use crate::membership::entity::MembershipRole;
use crate::membership::repository::OrganizationMembershipRepository;
use crate::organization::entity::Organization;
use crate::organization::repository::OrganizationRepository;
use crate::shared::authorization::require_member_role;
use crate::usecase::{Adapters, DomainError, EntityChange, OperationContext, UnitOfWork, UseCase};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferOwnershipInput {
    pub organization_id: Uuid,
    pub new_owner_user_id: Uuid,
}

pub struct TransferOwnership;

#[async_trait]
impl UseCase for TransferOwnership {
    type Input = TransferOwnershipInput;
    type Output = Organization;

    fn name(&self) -> &'static str {
        "TransferOwnership"
    }

    async fn authorize(
        &self,
        input: &Self::Input,
        ctx: &OperationContext,
        adapters: &Adapters,
    ) -> Result<(), DomainError> {
        require_member_role(
            adapters,
            ctx,
            input.organization_id,
            &[MembershipRole::Owner],
            "transfer ownership",
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
        let memberships = &adapters.persistence.memberships;

        let mut organization = adapters
            .persistence
            .organizations
            .find_by_id(input.organization_id)
            .await?
            .ok_or_else(|| {
                DomainError::not_found("Organization", input.organization_id.to_string())
            })?;

        let mut old_owner = memberships
            .find_owner(organization.id)
            .await?
            .ok_or_else(|| DomainError::not_found("OrganizationMembership", "owner"))?;

        if old_owner.user_id == Some(input.new_owner_user_id) {
            return Err(DomainError::business_rule(
                "The designated user already owns the organization",
            ));
        }

        let mut new_owner = memberships
            .find_active_by_user(organization.id, input.new_owner_user_id)
            .await?
            .ok_or_else(|| {
                DomainError::business_rule(
                    "The new owner must be an active member of the organization",
                )
            })?;

        let now = adapters.system.now();
        old_owner.change_role(MembershipRole::Member, now)?;
        new_owner.change_role(MembershipRole::Owner, now)?;
        organization.set_owner(input.new_owner_user_id, now);

        let audit = AuditLog::from_command(
            "Organization",
            Some(organization.id.to_string()),
            input,
            ctx,
            adapters.system.new_id(),
            now,
        );

        adapters
            .persistence
            .uow
            .commit(
                vec![
                    EntityChange::UpsertMembership(old_owner),
                    EntityChange::UpsertMembership(new_owner),
                    EntityChange::UpsertOrganization(organization.clone()),
                ],
                Some(audit),
            )
            .await?;

        Ok(organization)
    }
}
