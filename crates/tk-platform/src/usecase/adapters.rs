//! Infrastructure Adapters
//!
//! The bundle of ports a pipeline run reads from: persistence (repositories
//! and the unit of work), system services (clock, id generation), and an
//! optional observability sink. Adapters are shared across all concurrent
//! invocations and must be safe for concurrent use; per-invocation state
//! lives in the `HookContext`, never here.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::membership::OrganizationMembershipRepository;
use crate::organization::OrganizationRepository;
use crate::user::UserRepository;

use super::hooks::HookStage;
use super::unit_of_work::UnitOfWork;

/// Everything a use case may touch during one pipeline run.
#[derive(Clone)]
pub struct Adapters {
    pub persistence: PersistenceAdapters,
    pub system: SystemAdapters,
    pub observability: Option<Arc<dyn HookObserver>>,
}

/// Persistence ports. Repositories are read-side; writes go through `uow`.
#[derive(Clone)]
pub struct PersistenceAdapters {
    pub uow: Arc<dyn UnitOfWork>,
    pub users: Arc<dyn UserRepository>,
    pub organizations: Arc<dyn OrganizationRepository>,
    pub memberships: Arc<dyn OrganizationMembershipRepository>,
}

/// System service ports.
#[derive(Clone)]
pub struct SystemAdapters {
    pub clock: Arc<dyn Clock>,
    pub ids: Arc<dyn IdGenerator>,
}

impl SystemAdapters {
    /// Current instant from the clock port.
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Fresh identifier from the id port.
    pub fn new_id(&self) -> Uuid {
        self.ids.generate()
    }
}

/// Wall-clock port so entity timestamps stay deterministic under test.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// System clock backed by `Utc::now()`.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Identifier generation port.
pub trait IdGenerator: Send + Sync {
    fn generate(&self) -> Uuid;
}

/// Random v4 UUIDs.
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn generate(&self) -> Uuid {
        Uuid::new_v4()
    }
}

/// One observed hook/stage invocation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HookExecution {
    pub execution_id: String,
    pub use_case: String,
    pub stage: HookStage,
    pub outcome: HookOutcome,
}

/// How a hook/stage invocation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HookOutcome {
    Ok,
    Error,
    Aborted,
}

/// Fire-and-forget observability sink for hook executions.
///
/// Implementations must never block the pipeline or surface failures into
/// the pipeline result; anything that can fail is the implementor's problem
/// to swallow.
pub trait HookObserver: Send + Sync {
    fn log_hook_execution(&self, execution: HookExecution);
}

/// Default observer that logs hook executions at debug level.
pub struct TracingHookObserver;

impl HookObserver for TracingHookObserver {
    fn log_hook_execution(&self, execution: HookExecution) {
        tracing::debug!(
            execution_id = %execution.execution_id,
            use_case = %execution.use_case,
            stage = %execution.stage,
            outcome = ?execution.outcome,
            "hook executed"
        );
    }
}

impl Adapters {
    /// Assemble an adapter bundle with system defaults and no observer.
    pub fn new(persistence: PersistenceAdapters) -> Self {
        Self {
            persistence,
            system: SystemAdapters {
                clock: Arc::new(SystemClock),
                ids: Arc::new(UuidIdGenerator),
            },
            observability: None,
        }
    }

    /// Replace the system adapters.
    pub fn with_system(mut self, system: SystemAdapters) -> Self {
        self.system = system;
        self
    }

    /// Attach an observability sink.
    pub fn with_observer(mut self, observer: Arc<dyn HookObserver>) -> Self {
        self.observability = Some(observer);
        self
    }
}
