//! Request identifier generation
//!
//! Every inbound operation is tagged with a request id so failures can be
//! correlated back to one invocation across log lines, audit entries, and
//! error bodies.

use uuid::Uuid;

/// Prefix applied to generated request ids.
pub const REQUEST_ID_PREFIX: &str = "req";

/// Generate a new request id of the form `req-<uuid>`.
///
/// Callers that receive a request id from an upstream system (e.g. an
/// `X-Request-Id` header) should prefer that value over generating one.
pub fn new_request_id() -> String {
    format!("{}-{}", REQUEST_ID_PREFIX, Uuid::new_v4())
}
