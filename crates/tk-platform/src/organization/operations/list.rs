//! List Organizations Use Case

use async_trait::async_trait;
use serde::Deserialize;

use crate::organization::entity::Organization;
use crate::organization::repository::OrganizationRepository;
use crate::shared::api_common::{PaginatedResponse, PaginationParams};
use crate::usecase::{Adapters, DomainError, OperationContext, UseCase};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListOrganizationsInput {
    #[serde(default)]
    pub page: PaginationParams,
}

pub struct ListOrganizations;

#[async_trait]
impl UseCase for ListOrganizations {
    type Input = ListOrganizationsInput;
    type Output = PaginatedResponse<Organization>;

    fn name(&self) -> &'static str {
        "ListOrganizations"
    }

    async fn execute(
        &self,
        input: &Self::Input,
        _ctx: &OperationContext,
        adapters: &Adapters,
    ) -> Result<Self::Output, DomainError> {
        let (data, total) = adapters
            .persistence
            .organizations
            .find_page(input.page.offset(), input.page.limit())
            .await?;

        Ok(PaginatedResponse::new(
            data,
            input.page.page(),
            input.page.size(),
            total,
        ))
    }
}
