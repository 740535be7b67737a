//! In-memory repository implementations
//!
//! Read-side fakes over [`InMemoryStore`]. Listing is ordered by creation
//! time (id as tiebreaker) so pagination is deterministic.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::membership::{
    MembershipStatus, OrganizationMembership, OrganizationMembershipRepository,
};
use crate::organization::{Organization, OrganizationRepository};
use crate::usecase::DomainError;
use crate::user::{User, UserRepository};

use super::store::InMemoryStore;

fn page<T>(mut items: Vec<T>, offset: u64, limit: u32) -> (Vec<T>, u64)
where
    T: Ord,
{
    items.sort();
    let total = items.len() as u64;
    let data = items
        .into_iter()
        .skip(offset as usize)
        .take(limit as usize)
        .collect();
    (data, total)
}

pub struct InMemoryUserRepository {
    store: Arc<InMemoryStore>,
}

impl InMemoryUserRepository {
    pub fn new(store: Arc<InMemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        Ok(self.store.user(id).filter(|user| !user.is_deleted()))
    }

    async fn find_by_external_id(&self, external_id: &str) -> Result<Option<User>, DomainError> {
        Ok(self
            .store
            .users_snapshot()
            .into_iter()
            .find(|user| user.external_id == external_id && !user.is_deleted()))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        Ok(self
            .store
            .users_snapshot()
            .into_iter()
            .find(|user| user.username == username && !user.is_deleted()))
    }

    async fn find_page(&self, offset: u64, limit: u32) -> Result<(Vec<User>, u64), DomainError> {
        let keyed: Vec<_> = self
            .store
            .users_snapshot()
            .into_iter()
            .filter(|user| !user.is_deleted())
            .map(|user| Keyed((user.created_at, user.id), user))
            .collect();
        let (data, total) = page(keyed, offset, limit);
        Ok((data.into_iter().map(|Keyed(_, user)| user).collect(), total))
    }
}

/// Orders by key only; the payload is carried along.
struct Keyed<K, V>(K, V);

impl<K: PartialEq, V> PartialEq for Keyed<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}
impl<K: Eq, V> Eq for Keyed<K, V> {}
impl<K: Ord, V> PartialOrd for Keyed<K, V> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
impl<K: Ord, V> Ord for Keyed<K, V> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.cmp(&other.0)
    }
}

pub struct InMemoryOrganizationRepository {
    store: Arc<InMemoryStore>,
}

impl InMemoryOrganizationRepository {
    pub fn new(store: Arc<InMemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl OrganizationRepository for InMemoryOrganizationRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Organization>, DomainError> {
        Ok(self.store.organization(id).filter(|org| !org.is_deleted()))
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Organization>, DomainError> {
        Ok(self
            .store
            .organizations_snapshot()
            .into_iter()
            .find(|org| org.slug == slug && !org.is_deleted()))
    }

    async fn find_page(
        &self,
        offset: u64,
        limit: u32,
    ) -> Result<(Vec<Organization>, u64), DomainError> {
        let keyed: Vec<_> = self
            .store
            .organizations_snapshot()
            .into_iter()
            .filter(|org| !org.is_deleted())
            .map(|org| Keyed((org.created_at, org.id), org))
            .collect();
        let (data, total) = page(keyed, offset, limit);
        Ok((data.into_iter().map(|Keyed(_, org)| org).collect(), total))
    }
}

pub struct InMemoryOrganizationMembershipRepository {
    store: Arc<InMemoryStore>,
}

impl InMemoryOrganizationMembershipRepository {
    pub fn new(store: Arc<InMemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl OrganizationMembershipRepository for InMemoryOrganizationMembershipRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<OrganizationMembership>, DomainError> {
        Ok(self.store.membership(id))
    }

    async fn find_active_by_user(
        &self,
        organization_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<OrganizationMembership>, DomainError> {
        Ok(self
            .store
            .memberships_snapshot()
            .into_iter()
            .find(|membership| {
                membership.organization_id == organization_id
                    && membership.user_id == Some(user_id)
                    && membership.is_active()
            }))
    }

    async fn find_current_by_username(
        &self,
        organization_id: Uuid,
        username: &str,
    ) -> Result<Option<OrganizationMembership>, DomainError> {
        Ok(self
            .store
            .memberships_snapshot()
            .into_iter()
            .find(|membership| {
                membership.organization_id == organization_id
                    && membership.username == username
                    && !membership.status.is_terminal()
            }))
    }

    async fn find_owner(
        &self,
        organization_id: Uuid,
    ) -> Result<Option<OrganizationMembership>, DomainError> {
        Ok(self
            .store
            .memberships_snapshot()
            .into_iter()
            .find(|membership| {
                membership.organization_id == organization_id
                    && membership.role == crate::membership::MembershipRole::Owner
                    && membership.is_active()
            }))
    }

    async fn find_page_by_organization(
        &self,
        organization_id: Uuid,
        offset: u64,
        limit: u32,
    ) -> Result<(Vec<OrganizationMembership>, u64), DomainError> {
        let keyed: Vec<_> = self
            .store
            .memberships_snapshot()
            .into_iter()
            .filter(|membership| {
                membership.organization_id == organization_id
                    && membership.status != MembershipStatus::Removed
                    && membership.status != MembershipStatus::Left
            })
            .map(|membership| Keyed((membership.created_at, membership.id), membership))
            .collect();
        let (data, total) = page(keyed, offset, limit);
        Ok((
            data.into_iter().map(|Keyed(_, membership)| membership).collect(),
            total,
        ))
    }
}
