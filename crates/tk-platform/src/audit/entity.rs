//! Audit Log Entity
//!
//! Records every mutating operation for compliance and debugging. Audit
//! entries are written through the unit of work, atomically with the entity
//! changes they describe.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::usecase::OperationContext;

/// Audit log entry for one mutating operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLog {
    pub id: Uuid,

    /// Entity type affected (e.g. "User", "Organization")
    pub entity_type: String,

    /// Entity ID affected
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<String>,

    /// Operation name - the audit action from the context when set,
    /// otherwise the command type's simple name
    pub operation: String,

    /// Full command payload as JSON string
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation_json: Option<String>,

    /// External id of the principal who performed the action
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor_external_id: Option<String>,

    /// Request id the operation was invoked with
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,

    pub performed_at: DateTime<Utc>,
}

impl AuditLog {
    /// Build an audit entry from a command and the operation context.
    pub fn from_command<C: Serialize>(
        entity_type: impl Into<String>,
        entity_id: Option<String>,
        command: &C,
        ctx: &OperationContext,
        id: Uuid,
        performed_at: DateTime<Utc>,
    ) -> Self {
        let command_name = std::any::type_name::<C>()
            .rsplit("::")
            .next()
            .unwrap_or("Unknown")
            .to_string();

        let operation = ctx.audit_action.clone().unwrap_or(command_name);
        let operation_json = serde_json::to_string(command).ok();

        Self {
            id,
            entity_type: entity_type.into(),
            entity_id,
            operation,
            operation_json,
            actor_external_id: Some(ctx.actor_external_id.clone()),
            request_id: Some(ctx.request_id.clone()),
            performed_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct RenameWidgetCommand {
        widget_id: String,
        name: String,
    }

    #[test]
    fn test_operation_defaults_to_command_name() {
        let ctx = OperationContext::create("actor-1");
        let cmd = RenameWidgetCommand {
            widget_id: "w1".to_string(),
            name: "new".to_string(),
        };

        let entry = AuditLog::from_command(
            "Widget",
            Some("w1".to_string()),
            &cmd,
            &ctx,
            Uuid::new_v4(),
            Utc::now(),
        );

        assert_eq!(entry.operation, "RenameWidgetCommand");
        assert!(entry.operation_json.as_deref().unwrap().contains("widgetId"));
        assert_eq!(entry.actor_external_id.as_deref(), Some("actor-1"));
        assert_eq!(entry.request_id.as_deref(), Some(ctx.request_id.as_str()));
    }

    #[test]
    fn test_audit_action_overrides_command_name() {
        let ctx = OperationContext::create("actor-1").with_audit_action("widget.rename");
        let cmd = RenameWidgetCommand {
            widget_id: "w1".to_string(),
            name: "new".to_string(),
        };

        let entry =
            AuditLog::from_command("Widget", None, &cmd, &ctx, Uuid::new_v4(), Utc::now());
        assert_eq!(entry.operation, "widget.rename");
    }
}
