//! TenantKit common utilities
//!
//! Cross-cutting helpers shared by every TenantKit crate:
//! - structured logging bootstrap (`logging`)
//! - request identifier generation (`request_id`)

pub mod logging;
pub mod request_id;

pub use request_id::new_request_id;
