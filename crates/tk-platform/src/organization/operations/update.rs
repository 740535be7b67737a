//! Update Organization Use Case

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::audit::AuditLog;
use crate::organization::entity::Organization;
use crate::organization::repository::OrganizationRepository;
use crate::shared::authorization::{require_member_role, MEMBER_MANAGER_ROLES};
use crate::usecase::{Adapters, DomainError, EntityChange, OperationContext, UnitOfWork, UseCase};

use super::create::validate_name;

/// Command for renaming an organization. Admin or owner only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrganizationInput {
    pub organization_id: Uuid,
    pub name: String,
}

pub struct UpdateOrganization;

#[async_trait]
impl UseCase for UpdateOrganization {
    type Input = UpdateOrganizationInput;
    type Output = Organization;

    fn name(&self) -> &'static str {
        "UpdateOrganization"
    }

    async fn validate(
        &self,
        input: &Self::Input,
        _adapters: &Adapters,
    ) -> Result<Self::Input, DomainError> {
        Ok(UpdateOrganizationInput {
            organization_id: input.organization_id,
            name: validate_name(&input.name)?,
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
            "update organization",
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
        organization.rename(&input.name, now);

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
