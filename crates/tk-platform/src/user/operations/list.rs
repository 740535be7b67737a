//! List Users Use Case

use async_trait::async_trait;
use serde::Deserialize;

use crate::shared::api_common::{PaginatedResponse, PaginationParams};
use crate::usecase::{Adapters, DomainError, OperationContext, UseCase};
use crate::user::entity::User;
use crate::user::repository::UserRepository;

/// Query for listing users.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListUsersInput {
    #[serde(default)]
    pub page: PaginationParams,
}

pub struct ListUsers;

#[async_trait]
impl UseCase for ListUsers {
    type Input = ListUsersInput;
    type Output = PaginatedResponse<User>;

    fn name(&self) -> &'static str {
        "ListUsers"
    }

    async fn execute(
        &self,
        input: &Self::Input,
        _ctx: &OperationContext,
        adapters: &Adapters,
    ) -> Result<Self::Output, DomainError> {
        let (data, total) = adapters
            .persistence
            .users
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
