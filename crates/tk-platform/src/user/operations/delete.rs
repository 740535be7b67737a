//! Delete User Use Case

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::audit::AuditLog;
use crate::usecase::{Adapters, DomainError, EntityChange, OperationContext, UnitOfWork, UseCase};
use crate::user::entity::User;
use crate::user::repository::UserRepository;

/// Command for deleting a user (soft delete).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteUserInput {
    pub user_id: Uuid,
}

pub struct DeleteUser;

#[async_trait]
impl UseCase for DeleteUser {
    type Input = DeleteUserInput;
    type Output = User;

    fn name(&self) -> &'static str {
        "DeleteUser"
    }

    async fn execute(
        &self,
        input: &Self::Input,
        ctx: &OperationContext,
        adapters: &Adapters,
    ) -> Result<Self::Output, DomainError> {
        let mut user = adapters
            .persistence
            .users
            .find_by_id(input.user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", input.user_id.to_string()))?;

        if user.external_id == ctx.actor_external_id {
            return Err(DomainError::business_rule(
                "Cannot delete your own account",
            ));
        }

        let now = adapters.system.now();
        user.soft_delete(now);

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
