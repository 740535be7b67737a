//! Create Organization Use Case
//!
//! The acting user becomes the owner: the organization row and the active
//! Owner membership are committed in a single unit of work.

use std::sync::OnceLock;

use async_trait::async_trait;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::audit::AuditLog;
use crate::membership::entity::{MembershipRole, OrganizationMembership};
use crate::organization::entity::Organization;
use crate::organization::repository::OrganizationRepository;
use crate::shared::authorization::actor_user;
use crate::usecase::{Adapters, DomainError, EntityChange, OperationContext, UnitOfWork, UseCase};

/// Slug format: lowercase alphanumeric with hyphens, 2-50 chars
fn slug_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[a-z][a-z0-9-]*[a-z0-9]$").unwrap())
}

pub(crate) fn validate_name(name: &str) -> Result<String, DomainError> {
    let name = name.trim().to_string();
    if name.is_empty() {
        return Err(DomainError::validation_for_field(
            "Organization name is required",
            "name",
        ));
    }
    if name.len() > 100 {
        return Err(DomainError::validation_for_field(
            "Organization name must be at most 100 characters",
            "name",
        ));
    }
    Ok(name)
}

/// Command for creating a new organization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrganizationInput {
    pub name: String,
    pub slug: String,
}

pub struct CreateOrganization;

#[async_trait]
impl UseCase for CreateOrganization {
    type Input = CreateOrganizationInput;
    type Output = Organization;

    fn name(&self) -> &'static str {
        "CreateOrganization"
    }

    async fn validate(
        &self,
        input: &Self::Input,
        _adapters: &Adapters,
    ) -> Result<Self::Input, DomainError> {
        let name = validate_name(&input.name)?;

        let slug = input.slug.trim().to_lowercase();
        if slug.is_empty() {
            return Err(DomainError::validation_for_field(
                "Organization slug is required",
                "slug",
            ));
        }
        if slug.len() < 2 || slug.len() > 50 {
            return Err(DomainError::validation_for_field(
                "Organization slug must be between 2 and 50 characters",
                "slug",
            ));
        }
        if !slug_pattern().is_match(&slug) {
            return Err(DomainError::validation_for_field(
                "Organization slug must be lowercase alphanumeric with hyphens, starting with a letter",
                "slug",
            ));
        }

        Ok(CreateOrganizationInput { name, slug })
    }

    async fn authorize(
        &self,
        _input: &Self::Input,
        ctx: &OperationContext,
        adapters: &Adapters,
    ) -> Result<(), DomainError> {
        actor_user(adapters, ctx, "create organization").await?;
        Ok(())
    }

    async fn execute(
        &self,
        input: &Self::Input,
        ctx: &OperationContext,
        adapters: &Adapters,
    ) -> Result<Self::Output, DomainError> {
        if adapters
            .persistence
            .organizations
            .find_by_slug(&input.slug)
            .await?
            .is_some()
        {
            return Err(DomainError::conflict("Organization", &input.slug));
        }

        let owner = actor_user(adapters, ctx, "create organization").await?;
        let now = adapters.system.now();

        let organization = Organization::new(
            adapters.system.new_id(),
            &input.name,
            &input.slug,
            owner.id,
            now,
        );

        let owner_membership = OrganizationMembership::join(
            adapters.system.new_id(),
            owner.id,
            &owner.username,
            organization.id,
            MembershipRole::Owner,
            now,
        );

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
                vec![
                    EntityChange::UpsertOrganization(organization.clone()),
                    EntityChange::UpsertMembership(owner_membership),
                ],
                Some(audit),
            )
            .await?;

        Ok(organization)
    }
}
