//! Hook Context
//!
//! The envelope passed to every hook: the immutable original input, the
//! append-only step results, a mutable shared scratch map, read access to
//! the infrastructure adapters, the operation context, and the cooperative
//! `abort(reason)` capability.
//!
//! The shared scratch map is the only hook-to-hook communication channel and
//! is exclusive to a single invocation; its lifetime ends with `on_finally`.

use std::collections::HashMap;
use std::sync::Arc;

use super::adapters::Adapters;
use super::operation_context::OperationContext;

/// Results produced by the pipeline stages so far.
///
/// Fields only ever transition from absent to present and are never mutated
/// once set.
#[derive(Debug)]
pub struct StepResults<I, O> {
    validated_input: Option<I>,
    authorized: Option<bool>,
    output: Option<O>,
}

impl<I, O> StepResults<I, O> {
    fn new() -> Self {
        Self {
            validated_input: None,
            authorized: None,
            output: None,
        }
    }

    /// The validated input, present from `after_validation` onwards.
    pub fn validated_input(&self) -> Option<&I> {
        self.validated_input.as_ref()
    }

    /// Whether authorization succeeded, present from `before_execution` onwards.
    pub fn authorized(&self) -> Option<bool> {
        self.authorized
    }

    /// The business logic output, present from `after_execution` onwards.
    pub fn output(&self) -> Option<&O> {
        self.output.as_ref()
    }

    fn set_validated_input(&mut self, input: I) {
        debug_assert!(self.validated_input.is_none(), "validated_input already set");
        self.validated_input = Some(input);
    }

    fn set_authorized(&mut self) {
        debug_assert!(self.authorized.is_none(), "authorized already set");
        self.authorized = Some(true);
    }

    fn set_output(&mut self, output: O) {
        debug_assert!(self.output.is_none(), "output already set");
        self.output = Some(output);
    }
}

/// Per-invocation envelope handed to every hook.
pub struct HookContext<I, O> {
    execution_id: String,
    use_case_name: &'static str,
    input: I,
    step_results: StepResults<I, O>,
    shared: HashMap<String, serde_json::Value>,
    adapters: Arc<Adapters>,
    context: OperationContext,
    abort_reason: Option<String>,
}

impl<I, O> HookContext<I, O> {
    pub(crate) fn new(
        execution_id: String,
        use_case_name: &'static str,
        input: I,
        adapters: Arc<Adapters>,
        context: OperationContext,
    ) -> Self {
        Self {
            execution_id,
            use_case_name,
            input,
            step_results: StepResults::new(),
            shared: HashMap::new(),
            adapters,
            context,
            abort_reason: None,
        }
    }

    /// Fresh identifier for this pipeline run.
    pub fn execution_id(&self) -> &str {
        &self.execution_id
    }

    /// Name of the use case being executed.
    pub fn use_case_name(&self) -> &'static str {
        self.use_case_name
    }

    /// The original, unvalidated input.
    pub fn input(&self) -> &I {
        &self.input
    }

    /// Step results accumulated so far.
    pub fn step_results(&self) -> &StepResults<I, O> {
        &self.step_results
    }

    /// The shared scratch map.
    pub fn shared(&self) -> &HashMap<String, serde_json::Value> {
        &self.shared
    }

    /// Mutable access to the shared scratch map.
    pub fn shared_mut(&mut self) -> &mut HashMap<String, serde_json::Value> {
        &mut self.shared
    }

    /// Insert a value into the shared scratch map.
    pub fn put_shared(&mut self, key: impl Into<String>, value: serde_json::Value) {
        self.shared.insert(key.into(), value);
    }

    /// Read a value from the shared scratch map.
    pub fn shared_value(&self, key: &str) -> Option<&serde_json::Value> {
        self.shared.get(key)
    }

    /// The infrastructure adapters.
    pub fn adapters(&self) -> &Adapters {
        &self.adapters
    }

    /// The operation context this run was invoked with.
    pub fn context(&self) -> &OperationContext {
        &self.context
    }

    /// Cooperatively abort the pipeline run.
    ///
    /// Abort is a sentinel, not an unwind: the hook must return normally
    /// after calling this, and the pipeline stops before the next stage.
    /// The first abort wins; later calls are ignored.
    pub fn abort(&mut self, reason: impl Into<String>) {
        if self.abort_reason.is_none() {
            self.abort_reason = Some(reason.into());
        }
    }

    /// Whether an abort has been requested.
    pub fn is_aborted(&self) -> bool {
        self.abort_reason.is_some()
    }

    /// The abort reason, if any.
    pub fn abort_reason(&self) -> Option<&str> {
        self.abort_reason.as_deref()
    }

    pub(crate) fn record_validated_input(&mut self, input: I) {
        self.step_results.set_validated_input(input);
    }

    pub(crate) fn record_authorized(&mut self) {
        self.step_results.set_authorized();
    }

    pub(crate) fn record_output(&mut self, output: O) {
        self.step_results.set_output(output);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TestBackend;

    fn context() -> HookContext<String, String> {
        let backend = TestBackend::new();
        HookContext::new(
            "exec-1".to_string(),
            "TestCase",
            "raw".to_string(),
            backend.adapters,
            OperationContext::create("actor-1"),
        )
    }

    #[test]
    fn test_step_results_progression() {
        let mut ctx = context();
        assert!(ctx.step_results().validated_input().is_none());
        assert!(ctx.step_results().authorized().is_none());
        assert!(ctx.step_results().output().is_none());

        ctx.record_validated_input("clean".to_string());
        ctx.record_authorized();
        ctx.record_output("done".to_string());

        assert_eq!(ctx.step_results().validated_input(), Some(&"clean".to_string()));
        assert_eq!(ctx.step_results().authorized(), Some(true));
        assert_eq!(ctx.step_results().output(), Some(&"done".to_string()));
    }

    #[test]
    fn test_shared_scratch_round_trip() {
        let mut ctx = context();
        ctx.put_shared("note", serde_json::json!({"k": 1}));
        assert_eq!(ctx.shared_value("note"), Some(&serde_json::json!({"k": 1})));
        assert!(ctx.shared_value("absent").is_none());
    }

    #[test]
    fn test_first_abort_wins() {
        let mut ctx = context();
        assert!(!ctx.is_aborted());
        ctx.abort("first");
        ctx.abort("second");
        assert_eq!(ctx.abort_reason(), Some("first"));
    }
}
