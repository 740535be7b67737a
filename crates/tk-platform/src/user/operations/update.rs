//! Update User Use Case

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::audit::AuditLog;
use crate::usecase::{Adapters, DomainError, EntityChange, OperationContext, UnitOfWork, UseCase};
use crate::user::entity::User;
use crate::user::repository::UserRepository;

use super::create::validate_username;

/// Command for updating a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserInput {
    pub user_id: Uuid,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// `Some(None)` clears the display name; absent leaves it unchanged
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<Option<String>>,
}

pub struct UpdateUser;

#[async_trait]
impl UseCase for UpdateUser {
    type Input = UpdateUserInput;
    type Output = User;

    fn name(&self) -> &'static str {
        "UpdateUser"
    }

    async fn validate(
        &self,
        input: &Self::Input,
        _adapters: &Adapters,
    ) -> Result<Self::Input, DomainError> {
        if input.username.is_none() && input.display_name.is_none() {
            return Err(DomainError::validation("No fields to update"));
        }

        let username = match &input.username {
            Some(username) => Some(validate_username(username)?),
            None => None,
        };

        if let Some(Some(name)) = &input.display_name {
            if name.len() > 100 {
                return Err(DomainError::validation_for_field(
                    "Display name must be at most 100 characters",
                    "displayName",
                ));
            }
        }

        Ok(UpdateUserInput {
            user_id: input.user_id,
            username,
            display_name: input.display_name.clone(),
        })
    }

    async fn execute(
        &self,
        input: &Self::Input,
        ctx: &OperationContext,
        adapters: &Adapters,
    ) -> Result<Self::Output, DomainError> {
        let users = &adapters.persistence.users;

        let mut user = users
            .find_by_id(input.user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", input.user_id.to_string()))?;

        let now = adapters.system.now();

        if let Some(username) = &input.username {
            if username != &user.username {
                if users.find_by_username(username).await?.is_some() {
                    return Err(DomainError::conflict("User", username));
                }
                user.rename(username, now);
            }
        }
        if let Some(display_name) = &input.display_name {
            user.set_display_name(display_name.clone(), now);
        }

        let audit = AuditLog::from_command(
            "User",
            Some(user.id.to_string()),
            input,
            ctx,
            adapters.system.new_id(),
            now,
        );

        adapters
            .persistence
            .uow
            .commit(vec![EntityChange::UpsertUser(user.clone())], Some(audit))
            .await?;

        Ok(user)
    }
}
