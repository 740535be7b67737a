//! Get Organization Use Case

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::organization::entity::Organization;
use crate::organization::repository::OrganizationRepository;
use crate::usecase::{Adapters, DomainError, OperationContext, UseCase};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetOrganizationInput {
    pub organization_id: Uuid,
}

pub struct GetOrganization;

#[async_trait]
impl UseCase for GetOrganization {
    type Input = GetOrganizationInput;
    type Output = Organization;

    fn name(&self) -> &'static str {
        "GetOrganization"
    }

    async fn execute(
        &self,
        input: &Self::Input,
        _ctx: &OperationContext,
        adapters: &Adapters,
    ) -> Result<Self::Output, DomainError> {
        adapters
            .persistence
            .organizations
            .find_by_id(input.organization_id)
            .await?
            .ok_or_else(|| {
                DomainError::not_found("Organization", input.organization_id.to_string())
            })
    }
}
