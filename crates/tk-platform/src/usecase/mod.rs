//! Use Case Infrastructure
//!
//! Provides the foundational patterns for implementing use cases:
//! - `UseCaseResult<T>` - two-variant outcome type for use case execution
//! - `DomainError` - categorized error taxonomy for consistent handling
//! - `OperationContext` - per-invocation audit/identity envelope
//! - `HookContext` / `UseCaseHooks` - extension points around the stages
//! - `UseCasePipeline` - the lifecycle engine running every operation
//! - `ErrorMapper` - pure domain-error-to-HTTP translation
//! - `Adapters` / `UnitOfWork` - infrastructure ports

pub mod adapters;
pub mod error;
pub mod error_mapper;
pub mod hook_context;
pub mod hooks;
pub mod operation_context;
pub mod pipeline;
pub mod result;
pub mod unit_of_work;

pub use adapters::{
    Adapters, Clock, HookExecution, HookObserver, HookOutcome, IdGenerator, PersistenceAdapters,
    SystemAdapters, SystemClock, TracingHookObserver, UuidIdGenerator,
};
pub use error::DomainError;
pub use error_mapper::{ErrorBody, ErrorDetail, ErrorMapper, HttpError};
pub use hook_context::{HookContext, StepResults};
pub use hooks::{HookStage, NoHooks, UseCaseHooks};
pub use operation_context::{OperationContext, OperationMetadata};
pub use pipeline::{UseCase, UseCasePipeline};
pub use result::UseCaseResult;
pub use unit_of_work::{EntityChange, UnitOfWork};
