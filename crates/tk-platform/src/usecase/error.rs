//! Domain Errors
//!
//! The closed taxonomy of expected failures. Every kind carries a
//! machine-stable code that the error mapper switches on; display messages
//! are for humans and never drive behavior.
//!
//! # Creating Errors with Details
//!
//! Use the `details!` macro for convenient error creation:
//!
//! ```ignore
//! use tk_platform::usecase::DomainError;
//! use tk_platform::details;
//!
//! // Simple error
//! DomainError::validation("Username is required");
//!
//! // Error with details
//! DomainError::business_rule_with_details(
//!     "Username already taken",
//!     details! { "username" => username },
//! );
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Macro for creating error detail maps.
///
/// # Example
///
/// ```ignore
/// let details = details! {
///     "username" => "alice",
///     "organizationId" => organization_id
/// };
/// ```
#[macro_export]
macro_rules! details {
    () => {
        std::collections::HashMap::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut map = std::collections::HashMap::new();
        $(
            map.insert($key.to_string(), serde_json::json!($value));
        )+
        map
    }};
}

/// Categorized domain errors.
///
/// Expected business failures are returned as `UseCaseResult::fail(...)`
/// carrying one of these kinds; they are never used as panics. The `code()`
/// of each kind is stable and is the only key downstream mapping switches on.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DomainError {
    /// The requested entity does not exist (or is soft-deleted).
    #[error("{resource} with identifier '{identifier}' not found")]
    NotFound { resource: String, identifier: String },

    /// Input failed schema or format validation.
    #[error("{message}")]
    Validation {
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        field: Option<String>,
        #[serde(default)]
        details: HashMap<String, serde_json::Value>,
    },

    /// A uniqueness or state conflict with an existing entity.
    #[error("{resource} with identifier '{identifier}' already exists")]
    Conflict { resource: String, identifier: String },

    /// The actor is not allowed to perform the action.
    #[error("Not authorized to {action}")]
    Unauthorized {
        action: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        resource: Option<String>,
    },

    /// A domain rule was violated (entity in wrong state, invariant broken).
    #[error("{message}")]
    BusinessRule {
        message: String,
        #[serde(default)]
        details: HashMap<String, serde_json::Value>,
    },

    /// An adapter or environment failure outside the domain's control.
    #[error("{message}")]
    Infrastructure {
        message: String,
        #[serde(default)]
        details: HashMap<String, serde_json::Value>,
    },

    /// The pipeline run was cooperatively aborted by a hook.
    #[error("Operation aborted: {reason}")]
    Aborted { reason: String },
}

impl DomainError {
    /// Create a not found error.
    pub fn not_found(resource: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
            identifier: identifier.into(),
        }
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            field: None,
            details: HashMap::new(),
        }
    }

    /// Create a validation error attributed to a single field.
    pub fn validation_for_field(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            field: Some(field.into()),
            details: HashMap::new(),
        }
    }

    /// Create a validation error with details.
    pub fn validation_with_details(
        message: impl Into<String>,
        details: HashMap<String, serde_json::Value>,
    ) -> Self {
        Self::Validation {
            message: message.into(),
            field: None,
            details,
        }
    }

    /// Create a conflict error.
    pub fn conflict(resource: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self::Conflict {
            resource: resource.into(),
            identifier: identifier.into(),
        }
    }

    /// Create an unauthorized error for an action.
    pub fn unauthorized(action: impl Into<String>) -> Self {
        Self::Unauthorized {
            action: action.into(),
            resource: None,
        }
    }

    /// Create an unauthorized error scoped to a resource.
    pub fn unauthorized_on(action: impl Into<String>, resource: impl Into<String>) -> Self {
        Self::Unauthorized {
            action: action.into(),
            resource: Some(resource.into()),
        }
    }

    /// Create a business rule violation.
    pub fn business_rule(message: impl Into<String>) -> Self {
        Self::BusinessRule {
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// Create a business rule violation with details.
    pub fn business_rule_with_details(
        message: impl Into<String>,
        details: HashMap<String, serde_json::Value>,
    ) -> Self {
        Self::BusinessRule {
            message: message.into(),
            details,
        }
    }

    /// Create an infrastructure error.
    pub fn infrastructure(message: impl Into<String>) -> Self {
        Self::Infrastructure {
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// Create an infrastructure error with details.
    pub fn infrastructure_with_details(
        message: impl Into<String>,
        details: HashMap<String, serde_json::Value>,
    ) -> Self {
        Self::Infrastructure {
            message: message.into(),
            details,
        }
    }

    /// Create an aborted error.
    pub fn aborted(reason: impl Into<String>) -> Self {
        Self::Aborted {
            reason: reason.into(),
        }
    }

    /// Get the machine-stable error code for this kind.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::Conflict { .. } => "CONFLICT",
            Self::Unauthorized { .. } => "UNAUTHORIZED",
            Self::BusinessRule { .. } => "BUSINESS_RULE_VIOLATION",
            Self::Infrastructure { .. } => "INFRASTRUCTURE_ERROR",
            Self::Aborted { .. } => "ABORTED",
        }
    }

    /// Get the human-readable message.
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Build the details bag for this error.
    ///
    /// Structured fields (resource, identifier, field, reason) are folded
    /// into the map alongside any caller-supplied details.
    pub fn details(&self) -> HashMap<String, serde_json::Value> {
        match self {
            Self::NotFound { resource, identifier } => crate::details! {
                "resource" => resource,
                "identifier" => identifier,
            },
            Self::Validation { field, details, .. } => {
                let mut map = details.clone();
                if let Some(field) = field {
                    map.insert("field".to_string(), serde_json::json!(field));
                }
                map
            }
            Self::Conflict { resource, identifier } => crate::details! {
                "resource" => resource,
                "identifier" => identifier,
            },
            Self::Unauthorized { action, resource } => {
                let mut map = crate::details! { "action" => action };
                if let Some(resource) = resource {
                    map.insert("resource".to_string(), serde_json::json!(resource));
                }
                map
            }
            Self::BusinessRule { details, .. } => details.clone(),
            Self::Infrastructure { details, .. } => details.clone(),
            Self::Aborted { reason } => crate::details! { "reason" => reason },
        }
    }
}
