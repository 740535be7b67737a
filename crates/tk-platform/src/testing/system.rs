//! Deterministic system adapters for tests

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use chrono::{DateTime, Duration, TimeZone, Utc};
use uuid::Uuid;

use crate::usecase::{Clock, HookExecution, HookObserver, HookOutcome, HookStage, IdGenerator};

/// Clock pinned to a settable instant.
pub struct FixedClock {
    now: Mutex<DateTime<Utc>>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    /// The pinned instant. Shadowed by the `Clock` impl so callers don't
    /// need the trait in scope.
    pub fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.lock().unwrap() = now;
    }

    pub fn advance(&self, duration: Duration) {
        let mut now = self.now.lock().unwrap();
        *now = *now + duration;
    }
}

impl Default for FixedClock {
    fn default() -> Self {
        Self::new(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        FixedClock::now(self)
    }
}

/// Ids counting up from 1, rendered as UUIDs.
pub struct SequentialIdGenerator {
    counter: AtomicU64,
}

impl SequentialIdGenerator {
    pub fn new() -> Self {
        Self {
            counter: AtomicU64::new(1),
        }
    }
}

impl Default for SequentialIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn generate(&self) -> Uuid {
        let n = self.counter.fetch_add(1, Ordering::SeqCst);
        Uuid::from_u128(n as u128)
    }
}

/// Observer that records every hook execution for assertions.
#[derive(Default)]
pub struct RecordingObserver {
    executions: Mutex<Vec<HookExecution>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn executions(&self) -> Vec<HookExecution> {
        self.executions.lock().unwrap().clone()
    }

    /// The observed (stage, outcome) sequence.
    pub fn stages(&self) -> Vec<(HookStage, HookOutcome)> {
        self.executions
            .lock()
            .unwrap()
            .iter()
            .map(|execution| (execution.stage, execution.outcome))
            .collect()
    }
}

impl HookObserver for RecordingObserver {
    fn log_hook_execution(&self, execution: HookExecution) {
        self.executions.lock().unwrap().push(execution);
    }
}
