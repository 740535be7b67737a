//! User Repository Port
//!
//! Read-side access to users. All finders exclude soft-deleted rows; writes
//! go through the unit of work.

use async_trait::async_trait;
use uuid::Uuid;

use super::entity::User;
use crate::usecase::DomainError;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    async fn find_by_external_id(&self, external_id: &str) -> Result<Option<User>, DomainError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError>;

    /// One page of users ordered by creation time, plus the total count.
    async fn find_page(&self, offset: u64, limit: u32) -> Result<(Vec<User>, u64), DomainError>;
}
