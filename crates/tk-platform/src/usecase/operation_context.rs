//! Operation Context
//!
//! Per-invocation audit/identity envelope. Built once by the caller for each
//! inbound operation, threaded unchanged through the pipeline, and never
//! persisted — it lives exactly as long as one pipeline run and feeds the
//! audit sink.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tk_common::new_request_id;

/// Context for a single business operation.
///
/// Carries the request id, the acting principal, and optional tenant and
/// audit hints. Construct it once at the boundary and pass it by value into
/// `UseCasePipeline::execute`; the pipeline treats it as read-only.
#[derive(Debug, Clone)]
pub struct OperationContext {
    /// Correlates the invocation across logs, audit entries, and error bodies
    pub request_id: String,

    /// External identifier of the acting principal
    pub actor_external_id: String,

    /// Tenant the operation is scoped to, when known at the boundary
    pub organization_id: Option<String>,

    /// Override for the audit operation name (defaults to the command name)
    pub audit_action: Option<String>,

    /// Transport-level metadata for the audit trail
    pub metadata: OperationMetadata,
}

/// Transport metadata captured at the boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationMetadata {
    /// Where the operation came from (e.g. "api", "cli", "job")
    pub source: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_info: Option<String>,

    /// Anything else the boundary wants recorded
    #[serde(default)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl Default for OperationMetadata {
    fn default() -> Self {
        Self {
            source: "api".to_string(),
            ip_address: None,
            user_agent: None,
            device_info: None,
            extra: HashMap::new(),
        }
    }
}

impl OperationContext {
    /// Create a context for a fresh operation, generating a new request id.
    pub fn create(actor_external_id: impl Into<String>) -> Self {
        Self {
            request_id: new_request_id(),
            actor_external_id: actor_external_id.into(),
            organization_id: None,
            audit_action: None,
            metadata: OperationMetadata::default(),
        }
    }

    /// Create a context with a request id received from an upstream system.
    pub fn with_request_id(
        request_id: impl Into<String>,
        actor_external_id: impl Into<String>,
    ) -> Self {
        Self {
            request_id: request_id.into(),
            actor_external_id: actor_external_id.into(),
            organization_id: None,
            audit_action: None,
            metadata: OperationMetadata::default(),
        }
    }

    /// Scope the context to an organization.
    pub fn for_organization(mut self, organization_id: impl Into<String>) -> Self {
        self.organization_id = Some(organization_id.into());
        self
    }

    /// Override the audit operation name.
    pub fn with_audit_action(mut self, action: impl Into<String>) -> Self {
        self.audit_action = Some(action.into());
        self
    }

    /// Attach transport metadata.
    pub fn with_metadata(mut self, metadata: OperationMetadata) -> Self {
        self.metadata = metadata;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_context() {
        let ctx = OperationContext::create("user-123");

        assert!(ctx.request_id.starts_with("req-"));
        assert_eq!(ctx.actor_external_id, "user-123");
        assert!(ctx.organization_id.is_none());
        assert!(ctx.audit_action.is_none());
        assert_eq!(ctx.metadata.source, "api");
    }

    #[test]
    fn test_with_request_id() {
        let ctx = OperationContext::with_request_id("req-upstream", "user-123");
        assert_eq!(ctx.request_id, "req-upstream");
    }

    #[test]
    fn test_for_organization() {
        let ctx = OperationContext::create("user-123").for_organization("org-9");
        assert_eq!(ctx.organization_id.as_deref(), Some("org-9"));
    }

    #[test]
    fn test_with_audit_action() {
        let ctx = OperationContext::create("user-123").with_audit_action("user.invite");
        assert_eq!(ctx.audit_action.as_deref(), Some("user.invite"));
    }
}
