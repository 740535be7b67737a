//! Use Case Hooks
//!
//! Extension points around the pipeline stages. A hook registration is a
//! per-use-case implementation of [`UseCaseHooks`]; every method defaults to
//! a no-op, so implementors override only the points they need. The generic
//! parameters bind the hooks to one use case's input/output types at compile
//! time, so a mismatched registration is a type error at composition, never
//! a runtime surprise.

use async_trait::async_trait;
use serde::Serialize;

use super::error::DomainError;
use super::hook_context::HookContext;
use super::result::UseCaseResult;

/// The fixed points of the pipeline, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum HookStage {
    OnStart,
    ValidateInput,
    AfterValidation,
    Authorize,
    BeforeExecution,
    ExecuteBusinessLogic,
    AfterExecution,
    OnError,
    OnAbort,
    OnFinally,
}

impl HookStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OnStart => "onStart",
            Self::ValidateInput => "validateInput",
            Self::AfterValidation => "afterValidation",
            Self::Authorize => "authorize",
            Self::BeforeExecution => "beforeExecution",
            Self::ExecuteBusinessLogic => "executeBusinessLogic",
            Self::AfterExecution => "afterExecution",
            Self::OnError => "onError",
            Self::OnAbort => "onAbort",
            Self::OnFinally => "onFinally",
        }
    }
}

impl std::fmt::Display for HookStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-use-case hook registration.
///
/// Contract summary:
/// - `on_start`, `after_validation`, `before_execution`, `after_execution`
///   run at their stage; an `Err` routes the run to the error path, a call
///   to `ctx.abort(reason)` routes it to the abort path.
/// - `after_execution` failures are fatal unless the hook handles them
///   internally; hooks doing best-effort side effects (notifications, cache
///   warm-ups) should swallow their own errors.
/// - `on_error` receives the triggering error; returning `Err` replaces the
///   original error in the final result.
/// - `on_abort` and `on_finally` failures are logged and swallowed; they can
///   never change the outcome.
#[async_trait]
pub trait UseCaseHooks<I, O>: Send + Sync
where
    I: Send + Sync,
    O: Send + Sync,
{
    async fn on_start(&self, _ctx: &mut HookContext<I, O>) -> Result<(), DomainError> {
        Ok(())
    }

    async fn after_validation(&self, _ctx: &mut HookContext<I, O>) -> Result<(), DomainError> {
        Ok(())
    }

    async fn before_execution(&self, _ctx: &mut HookContext<I, O>) -> Result<(), DomainError> {
        Ok(())
    }

    async fn after_execution(&self, _ctx: &mut HookContext<I, O>) -> Result<(), DomainError> {
        Ok(())
    }

    async fn on_error(
        &self,
        _ctx: &mut HookContext<I, O>,
        _error: &DomainError,
    ) -> Result<(), DomainError> {
        Ok(())
    }

    async fn on_abort(
        &self,
        _ctx: &mut HookContext<I, O>,
        _reason: &str,
    ) -> Result<(), DomainError> {
        Ok(())
    }

    async fn on_finally(
        &self,
        _ctx: &mut HookContext<I, O>,
        _result: &UseCaseResult<O>,
    ) -> Result<(), DomainError> {
        Ok(())
    }
}

/// The empty hook registration.
pub struct NoHooks;

#[async_trait]
impl<I, O> UseCaseHooks<I, O> for NoHooks
where
    I: Send + Sync,
    O: Send + Sync,
{
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_names() {
        assert_eq!(HookStage::OnStart.as_str(), "onStart");
        assert_eq!(HookStage::ExecuteBusinessLogic.as_str(), "executeBusinessLogic");
        assert_eq!(HookStage::OnFinally.to_string(), "onFinally");
    }
}
