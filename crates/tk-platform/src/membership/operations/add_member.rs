//! Add Organization Member Use Case
//!
//! Registered targets join immediately; unregistered targets get a pending
//! invitation bound to their username.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::audit::AuditLog;
use crate::membership::entity::{MembershipRole, OrganizationMembership};
use crate::membership::repository::OrganizationMembershipRepository;
use crate::organization::repository::OrganizationRepository;
use crate::shared::authorization::{require_member_role, MEMBER_MANAGER_ROLES};
use crate::usecase::{Adapters, DomainError, EntityChange, OperationContext, UnitOfWork, UseCase};
use crate::user::operations::create::validate_username;
use crate::user::repository::UserRepository;

/// Command for adding a member to an organization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddOrganizationMemberInput {
    pub organization_id: Uuid,
    pub username: String,
    pub role: MembershipRole,
}

pub struct AddOrganizationMember;

#[async_trait]
impl UseCase for AddOrganizationMember {
    type Input = AddOrganizationMemberInput;
    type Output = OrganizationMembership;

    fn name(&self) -> &'static str {
        "AddOrganizationMember"
    }

    async fn validate(
        &self,
        input: &Self::Input,
        _adapters: &Adapters,
    ) -> Result<Self::Input, DomainError> {
        Ok(AddOrganizationMemberInput {
            organization_id: input.organization_id,
            username: validate_username(&input.username)?,
            role: input.role,
        })
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
            MEMBER_MANAGER_ROLES,
            "add organization member",
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
        if input.role == MembershipRole::Owner {
            return Err(DomainError::business_rule(
                "The owner role is assigned through ownership transfer, not membership creation",
            ));
        }

        let organization = adapters
            .persistence
            .organizations
            .find_by_id(input.organization_id)
            .await?
            .ok_or_else(|| {
                DomainError::not_found("Organization", input.organization_id.to_string())
            })?;

        if adapters
            .persistence
            .memberships
            .find_current_by_username(organization.id, &input.username)
            .await?
            .is_some()
        {
            return Err(DomainError::conflict(
                "OrganizationMembership",
                &input.username,
            ));
        }

        let now = adapters.system.now();
        let membership = match adapters
            .persistence
            .users
            .find_by_username(&input.username)
            .await?
        {
            Some(user) => OrganizationMembership::join(
                adapters.system.new_id(),
                user.id,
                &input.username,
                organization.id,
                input.role,
                now,
            ),
            None => OrganizationMembership::invite(
                adapters.system.new_id(),
                &input.username,
                organization.id,
                input.role,
                now,
            ),
        };

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
