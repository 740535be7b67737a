//! List Organization Members Use Case

use async_trait::async_trait;
use serde::Deserialize;
use uuid::Uuid;

use crate::membership::entity::OrganizationMembership;
use crate::membership::repository::OrganizationMembershipRepository;
use crate::shared::api_common::{PaginatedResponse, PaginationParams};
use crate::usecase::{Adapters, DomainError, OperationContext, UseCase};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListOrganizationMembersInput {
    pub organization_id: Uuid,
    #[serde(default)]
    pub page: PaginationParams,
}

pub struct ListOrganizationMembers;

#[async_trait]
impl UseCase for ListOrganizationMembers {
    type Input = ListOrganizationMembersInput;
    type Output = PaginatedResponse<OrganizationMembership>;

    fn name(&self) -> &'static str {
        "ListOrganizationMembers"
    }

    async fn execute(
        &self,
        input: &Self::Input,
        _ctx: &OperationContext,
        adapters: &Adapters,
    ) -> Result<Self::Output, DomainError> {
        let (data, total) = adapters
            .persistence
            .memberships
            .find_page_by_organization(
                input.organization_id,
                input.page.offset(),
                input.page.limit(),
            )
            .await?;

        Ok(PaginatedResponse::new(
            data,
            input.page.page(),
            input.page.size(),
            total,
        ))
    }
}
