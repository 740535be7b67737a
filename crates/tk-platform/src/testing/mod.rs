//! Test support
//!
//! In-memory implementations of every port plus deterministic system
//! adapters. These back the crate's own test suites and are exported so
//! downstream crates can test against the platform without a real store.

pub mod backend;
pub mod repositories;
pub mod store;
pub mod system;
pub mod unit_of_work;

pub use backend::TestBackend;
pub use repositories::{
    InMemoryOrganizationMembershipRepository, InMemoryOrganizationRepository,
    InMemoryUserRepository,
};
pub use store::InMemoryStore;
pub use system::{FixedClock, RecordingObserver, SequentialIdGenerator};
pub use unit_of_work::InMemoryUnitOfWork;
