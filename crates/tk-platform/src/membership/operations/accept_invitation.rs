//! Accept Invitation Use Case
//!
//! The acting user accepts their own pending invitation, binding the
//! membership to their user id.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::audit::AuditLog;
use crate::membership::entity::OrganizationMembership;
use crate::membership::repository::OrganizationMembershipRepository;
use crate::shared::authorization::actor_user;
use crate::usecase::{Adapters, DomainError, EntityChange, OperationContext, UnitOfWork, UseCase};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcceptInvitationInput {
    pub organization_id: Uuid,
}

pub struct AcceptInvitation;

#[async_trait]
impl UseCase for AcceptInvitation {
    type Input = AcceptInvitationInput;
    type Output = OrganizationMembership;

    fn name(&self) -> &'static str {
        "AcceptInvitation"
    }

    async fn authorize(
        &self,
        _input: &Self::Input,
        ctx: &OperationContext,
        adapters: &Adapters,
    ) -> Result<(), DomainError> {
        actor_user(adapters, ctx, "accept invitation").await?;
        Ok(())
    }

    async fn execute(
        &self,
        input: &Self::Input,
        ctx: &OperationContext,
        adapters: &Adapters,
    ) -> Result<Self::Output, DomainError> {
        let user = actor_user(adapters, ctx, "accept invitation").await?;

        let mut membership = match adapters
            .persistence
            .memberships
            .find_current_by_username(input.organization_id, &user.username)
            .await?
        {
            Some(membership) if membership.is_pending() => membership,
            Some(_) => {
                return Err(DomainError::conflict(
                    "OrganizationMembership",
                    &user.username,
                ));
            }
            None => {
                return Err(DomainError::not_found("Invitation", &user.username));
            }
        };

        let now = adapters.system.now();
        membership.accept(user.id, now)?;

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
