//! Delete Organization Use Case

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::audit::AuditLog;
use crate::membership::entity::MembershipRole;
use crate::organization::entity::Organization;
use crate::organization::repository::OrganizationRepository;
use crate::shared::authorization::require_member_role;
use crate::usecase::{Adapters, DomainError, EntityChange, OperationContext, UnitOfWork, UseCase};

/// Command for soft-deleting an organization. Owner only. Memberships are
/// retained for audit; finders stop returning the organization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteOrganizationInput {
    pub organization_id: Uuid,
}

pub struct DeleteOrganization;

#[async_trait]
impl UseCase for DeleteOrganization {
    type Input = DeleteOrganizationInput;
    type Output = Organization;

    fn name(&self) -> &'static str {
        "DeleteOrganization"
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
            "delete organization",
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
        let mut organization = adapters
            .persistence
            .organizations
            .find_by_id(input.organization_id)
            .await?
            .ok_or_else(|| {
                DomainError::not_found("Organization", input.organization_id.to_string())
            })?;

        let now = adapters.system.now();
        organization.soft_delete(now);

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
                vec![EntityChange::UpsertOrganization(organization.clone())],
                Some(audit),
            )
            .await?;

        Ok(organization)
    }
}
