//! Use Case Pipeline
//!
//! The lifecycle engine that runs every business operation through a fixed
//! stage sequence:
//!
//! `onStart -> validateInput -> afterValidation -> authorize ->
//! beforeExecution -> executeBusinessLogic -> afterExecution ->
//! (onError | onAbort) -> onFinally`
//!
//! Short-circuit rules:
//! - a failing stage routes directly to the error path; later stages never run
//! - a hook calling `ctx.abort(reason)` routes to the abort path; the runner
//!   checks the abort sentinel after every hook rather than unwinding
//! - exactly one of `on_error` / `on_abort` fires for a run that does not
//!   fully succeed, never both
//! - `on_finally` always runs exactly once, with the finished result visible
//!
//! `execute` always returns a [`UseCaseResult`]; expected failures travel as
//! the failure variant, never as panics. Concurrent runs are independent:
//! the pipeline owns no mutable state, and each run gets its own
//! [`HookContext`].

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use super::adapters::{Adapters, HookExecution, HookObserver, HookOutcome};
use super::error::DomainError;
use super::hook_context::HookContext;
use super::hooks::{HookStage, NoHooks, UseCaseHooks};
use super::operation_context::OperationContext;
use super::result::UseCaseResult;

/// One discrete business operation.
///
/// `validate` parses the raw input into its validated form (stage 2),
/// `authorize` decides whether the actor may proceed (stage 4), and
/// `execute` performs the actual domain mutation (stage 6) — the only stage
/// permitted to write through the adapters. Expected failures are returned
/// as `Err(DomainError)`, never panicked.
#[async_trait]
pub trait UseCase: Send + Sync + 'static {
    type Input: Clone + Send + Sync + 'static;
    type Output: Clone + Send + Sync + 'static;

    fn name(&self) -> &'static str;

    /// Parse and validate the raw input. Defaults to passing it through.
    async fn validate(
        &self,
        input: &Self::Input,
        _adapters: &Adapters,
    ) -> Result<Self::Input, DomainError> {
        Ok(input.clone())
    }

    /// Decide whether the actor may perform this operation. Defaults to allow.
    async fn authorize(
        &self,
        _input: &Self::Input,
        _ctx: &OperationContext,
        _adapters: &Adapters,
    ) -> Result<(), DomainError> {
        Ok(())
    }

    /// Perform the business logic.
    async fn execute(
        &self,
        input: &Self::Input,
        ctx: &OperationContext,
        adapters: &Adapters,
    ) -> Result<Self::Output, DomainError>;
}

/// How a run left the staged sequence.
enum Outcome<O> {
    Completed(O),
    Errored(DomainError),
    Aborted(String),
}

/// Executes one use case with an optional hook registration.
///
/// Build one pipeline per use case at composition time; `execute` may then
/// be called concurrently from any number of tasks.
pub struct UseCasePipeline<U: UseCase> {
    use_case: Arc<U>,
    hooks: Arc<dyn UseCaseHooks<U::Input, U::Output>>,
    adapters: Arc<Adapters>,
}

impl<U: UseCase> UseCasePipeline<U> {
    pub fn new(use_case: Arc<U>, adapters: Arc<Adapters>) -> Self {
        Self {
            use_case,
            hooks: Arc::new(NoHooks),
            adapters,
        }
    }

    /// Register hooks for this use case.
    pub fn with_hooks(mut self, hooks: Arc<dyn UseCaseHooks<U::Input, U::Output>>) -> Self {
        self.hooks = hooks;
        self
    }

    /// Run the use case to completion.
    ///
    /// Always resolves with a result; the error path and the abort path both
    /// still reach `on_finally`.
    pub async fn execute(
        &self,
        input: U::Input,
        context: OperationContext,
    ) -> UseCaseResult<U::Output> {
        let execution_id = format!("exec-{}", self.adapters.system.new_id());
        let mut ctx = HookContext::new(
            execution_id,
            self.use_case.name(),
            input,
            Arc::clone(&self.adapters),
            context,
        );

        let outcome = self.run(&mut ctx).await;

        let result = match outcome {
            Outcome::Completed(output) => UseCaseResult::ok(output),
            Outcome::Errored(original) => {
                let error = match self.hooks.on_error(&mut ctx, &original).await {
                    Ok(()) => {
                        self.observe(&ctx, HookStage::OnError, HookOutcome::Ok);
                        original
                    }
                    // An error raised inside on_error replaces the original.
                    Err(replacement) => {
                        self.observe(&ctx, HookStage::OnError, HookOutcome::Error);
                        replacement
                    }
                };
                UseCaseResult::fail(error)
            }
            Outcome::Aborted(reason) => {
                match self.hooks.on_abort(&mut ctx, &reason).await {
                    Ok(()) => self.observe(&ctx, HookStage::OnAbort, HookOutcome::Ok),
                    // on_abort failures must not change the aborted outcome.
                    Err(error) => {
                        warn!(
                            use_case = ctx.use_case_name(),
                            execution_id = ctx.execution_id(),
                            %error,
                            "on_abort hook failed"
                        );
                        self.observe(&ctx, HookStage::OnAbort, HookOutcome::Error);
                    }
                }
                UseCaseResult::fail(DomainError::aborted(reason))
            }
        };

        match self.hooks.on_finally(&mut ctx, &result).await {
            Ok(()) => self.observe(&ctx, HookStage::OnFinally, HookOutcome::Ok),
            // on_finally failures must not change the finished result.
            Err(error) => {
                warn!(
                    use_case = ctx.use_case_name(),
                    execution_id = ctx.execution_id(),
                    %error,
                    "on_finally hook failed"
                );
                self.observe(&ctx, HookStage::OnFinally, HookOutcome::Error);
            }
        }

        result
    }

    /// Stages 1-7. Returns at the first failure or abort.
    async fn run(&self, ctx: &mut HookContext<U::Input, U::Output>) -> Outcome<U::Output> {
        // Stage 1: on_start
        if let Err(error) = self.hooks.on_start(ctx).await {
            self.observe(ctx, HookStage::OnStart, HookOutcome::Error);
            return Outcome::Errored(error);
        }
        if let Some(reason) = ctx.abort_reason() {
            let reason = reason.to_string();
            self.observe(ctx, HookStage::OnStart, HookOutcome::Aborted);
            return Outcome::Aborted(reason);
        }
        self.observe(ctx, HookStage::OnStart, HookOutcome::Ok);

        // Stage 2: validate_input. Failure skips after_validation entirely.
        let validated = match self.use_case.validate(ctx.input(), ctx.adapters()).await {
            Ok(validated) => validated,
            Err(error) => {
                self.observe(ctx, HookStage::ValidateInput, HookOutcome::Error);
                return Outcome::Errored(error);
            }
        };
        ctx.record_validated_input(validated.clone());
        self.observe(ctx, HookStage::ValidateInput, HookOutcome::Ok);

        // Stage 3: after_validation
        if let Err(error) = self.hooks.after_validation(ctx).await {
            self.observe(ctx, HookStage::AfterValidation, HookOutcome::Error);
            return Outcome::Errored(error);
        }
        if let Some(reason) = ctx.abort_reason() {
            let reason = reason.to_string();
            self.observe(ctx, HookStage::AfterValidation, HookOutcome::Aborted);
            return Outcome::Aborted(reason);
        }
        self.observe(ctx, HookStage::AfterValidation, HookOutcome::Ok);

        // Stage 4: authorize
        if let Err(error) = self
            .use_case
            .authorize(&validated, ctx.context(), ctx.adapters())
            .await
        {
            self.observe(ctx, HookStage::Authorize, HookOutcome::Error);
            return Outcome::Errored(error);
        }
        ctx.record_authorized();
        self.observe(ctx, HookStage::Authorize, HookOutcome::Ok);

        // Stage 5: before_execution
        if let Err(error) = self.hooks.before_execution(ctx).await {
            self.observe(ctx, HookStage::BeforeExecution, HookOutcome::Error);
            return Outcome::Errored(error);
        }
        if let Some(reason) = ctx.abort_reason() {
            let reason = reason.to_string();
            self.observe(ctx, HookStage::BeforeExecution, HookOutcome::Aborted);
            return Outcome::Aborted(reason);
        }
        self.observe(ctx, HookStage::BeforeExecution, HookOutcome::Ok);

        // Stage 6: execute_business_logic
        let output = match self
            .use_case
            .execute(&validated, ctx.context(), ctx.adapters())
            .await
        {
            Ok(output) => output,
            Err(error) => {
                self.observe(ctx, HookStage::ExecuteBusinessLogic, HookOutcome::Error);
                return Outcome::Errored(error);
            }
        };
        ctx.record_output(output.clone());
        self.observe(ctx, HookStage::ExecuteBusinessLogic, HookOutcome::Ok);

        // Stage 7: after_execution. Failures here are fatal unless the hook
        // handles them internally.
        if let Err(error) = self.hooks.after_execution(ctx).await {
            self.observe(ctx, HookStage::AfterExecution, HookOutcome::Error);
            return Outcome::Errored(error);
        }
        if let Some(reason) = ctx.abort_reason() {
            let reason = reason.to_string();
            self.observe(ctx, HookStage::AfterExecution, HookOutcome::Aborted);
            return Outcome::Aborted(reason);
        }
        self.observe(ctx, HookStage::AfterExecution, HookOutcome::Ok);

        Outcome::Completed(output)
    }

    fn observe(
        &self,
        ctx: &HookContext<U::Input, U::Output>,
        stage: HookStage,
        outcome: HookOutcome,
    ) {
        if let Some(observer) = &self.adapters.observability {
            observer.log_hook_execution(HookExecution {
                execution_id: ctx.execution_id().to_string(),
                use_case: ctx.use_case_name().to_string(),
                stage,
                outcome,
            });
        }
    }
}
