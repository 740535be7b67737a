//! Leave Organization Use Case
//!
//! Voluntary exit by the acting user. The owner cannot leave without
//! transferring ownership first.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::audit::AuditLog;
use crate::membership::entity::{MembershipRole, OrganizationMembership};
use crate::membership::repository::OrganizationMembershipRepository;
use crate::shared::authorization::actor_user;
use crate::usecase::{Adapters, DomainError, EntityChange, OperationContext, UnitOfWork, UseCase};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveOrganizationInput {
    pub organization_id: Uuid,
}

pub struct LeaveOrganization;

#[async_trait]
impl UseCase for LeaveOrganization {
    type Input = LeaveOrganizationInput;
    type Output = OrganizationMembership;

    fn name(&self) -> &'static str {
        "LeaveOrganization"
    }

    async fn authorize(
        &self,
        _input: &Self::Input,
        ctx: &OperationContext,
        adapters: &Adapters,
    ) -> Result<(), DomainError> {
        actor_user(adapters, ctx, "leave organization").await?;
        Ok(())
    }

    async fn execute(
        &self,
        input: &Self::Input,
        ctx: &OperationContext,
        adapters: &Adapters,
    ) -> Result<Self::Output, DomainError> {
        let user = actor_user(adapters, ctx, "leave organization").await?;

        let mut membership = adapters
            .persistence
            .memberships
            .find_active_by_user(input.organization_id, user.id)
            .await?
            .ok_or_else(|| DomainError::not_found("OrganizationMembership", &user.username))?;

        if membership.role == MembershipRole::Owner {
            return Err(DomainError::business_rule(
                "The owner must transfer ownership before leaving the organization",
            ));
        }

        let now = adapters.system.now();
        membership.leave(now)?;

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
