//! Get User Use Case

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::usecase::{Adapters, DomainError, OperationContext, UseCase};
use crate::user::entity::User;
use crate::user::repository::UserRepository;

/// Query for fetching a user by their external principal id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetUserInput {
    pub principal_external_id: String,
}

pub struct GetUser;

#[async_trait]
impl UseCase for GetUser {
    type Input = GetUserInput;
    type Output = User;

    fn name(&self) -> &'static str {
        "GetUser"
    }

    async fn validate(
        &self,
        input: &Self::Input,
        _adapters: &Adapters,
    ) -> Result<Self::Input, DomainError> {
        let principal_external_id = input.principal_external_id.trim().to_string();
        if principal_external_id.is_empty() {
            return Err(DomainError::validation_for_field(
                "Principal external id is required",
                "principalExternalId",
            ));
        }
        Ok(GetUserInput {
            principal_external_id,
        })
    }

    async fn execute(
        &self,
        input: &Self::Input,
        _ctx: &OperationContext,
        adapters: &Adapters,
    ) -> Result<Self::Output, DomainError> {
        adapters
            .persistence
            .users
            .find_by_external_id(&input.principal_external_id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", &input.principal_external_id))
    }
}
