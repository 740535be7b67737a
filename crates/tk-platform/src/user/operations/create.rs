//! Create User Use Case

use std::sync::OnceLock;

use async_trait::async_trait;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::audit::AuditLog;
use crate::usecase::{Adapters, DomainError, EntityChange, OperationContext, UnitOfWork, UseCase};
use crate::user::entity::User;
use crate::user::repository::UserRepository;

/// Username format: lowercase alphanumeric with underscores and hyphens, 3-32 chars
fn username_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[a-z0-9][a-z0-9_-]{2,31}$").unwrap())
}

pub(crate) fn validate_username(username: &str) -> Result<String, DomainError> {
    let username = username.trim().to_string();
    if username.is_empty() {
        return Err(DomainError::validation_for_field(
            "Username is required",
            "username",
        ));
    }
    if !username_pattern().is_match(&username) {
        return Err(DomainError::validation_for_field(
            "Username must be 3-32 lowercase alphanumeric characters, underscores, or hyphens",
            "username",
        ));
    }
    Ok(username)
}

/// Command for creating a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserInput {
    pub username: String,

    /// External identity-provider id; defaults to the username
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

pub struct CreateUser;

#[async_trait]
impl UseCase for CreateUser {
    type Input = CreateUserInput;
    type Output = User;

    fn name(&self) -> &'static str {
        "CreateUser"
    }

    async fn validate(
        &self,
        input: &Self::Input,
        _adapters: &Adapters,
    ) -> Result<Self::Input, DomainError> {
        let username = validate_username(&input.username)?;

        let external_id = match &input.external_id {
            Some(id) if id.trim().is_empty() => {
                return Err(DomainError::validation_for_field(
                    "External id must not be blank",
                    "externalId",
                ));
            }
            Some(id) => Some(id.trim().to_string()),
            None => None,
        };

        if let Some(name) = &input.display_name {
            if name.len() > 100 {
                return Err(DomainError::validation_for_field(
                    "Display name must be at most 100 characters",
                    "displayName",
                ));
            }
        }

        Ok(CreateUserInput {
            username,
            external_id,
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

        if users.find_by_username(&input.username).await?.is_some() {
            return Err(DomainError::conflict("User", &input.username));
        }
        if let Some(external_id) = &input.external_id {
            if users.find_by_external_id(external_id).await?.is_some() {
                return Err(DomainError::conflict("User", external_id));
            }
        }

        let now = adapters.system.now();
        let mut user = User::new(
            adapters.system.new_id(),
            &input.username,
            input.external_id.clone(),
            now,
        );
        if let Some(display_name) = &input.display_name {
            user.display_name = Some(display_name.clone());
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_pattern() {
        assert!(username_pattern().is_match("alice"));
        assert!(username_pattern().is_match("bob_42"));
        assert!(username_pattern().is_match("my-handle"));
        assert!(!username_pattern().is_match("UPPERCASE"));
        assert!(!username_pattern().is_match("ab")); // too short
        assert!(!username_pattern().is_match("-leading-dash"));
    }

    #[test]
    fn test_command_serialization() {
        let cmd = CreateUserInput {
            username: "alice".to_string(),
            external_id: None,
            display_name: Some("Alice".to_string()),
        };

        let json = serde_json::to_string(&cmd).unwrap();
        assert!(json.contains("alice"));
        assert!(json.contains("displayName"));
        assert!(!json.contains("externalId"));
    }
}
