//! Assembled in-memory backend for tests

use std::sync::Arc;

use uuid::Uuid;

use crate::membership::{MembershipRole, OrganizationMembership};
use crate::organization::Organization;
use crate::usecase::{
    Adapters, HookObserver, IdGenerator, PersistenceAdapters, SystemAdapters,
};
use crate::user::User;

use super::repositories::{
    InMemoryOrganizationMembershipRepository, InMemoryOrganizationRepository,
    InMemoryUserRepository,
};
use super::store::InMemoryStore;
use super::system::{FixedClock, SequentialIdGenerator};
use super::unit_of_work::InMemoryUnitOfWork;

/// Everything a test needs: the store for assertions, the unit of work for
/// failpoints, deterministic system adapters, and the assembled `Adapters`
/// bundle to hand to pipelines.
pub struct TestBackend {
    pub store: Arc<InMemoryStore>,
    pub uow: Arc<InMemoryUnitOfWork>,
    pub clock: Arc<FixedClock>,
    pub ids: Arc<SequentialIdGenerator>,
    pub adapters: Arc<Adapters>,
}

impl TestBackend {
    pub fn new() -> Self {
        Self::with_observer(None)
    }

    pub fn with_observer(observer: Option<Arc<dyn HookObserver>>) -> Self {
        let store = Arc::new(InMemoryStore::new());
        let uow = Arc::new(InMemoryUnitOfWork::new(Arc::clone(&store)));
        let clock = Arc::new(FixedClock::default());
        let ids = Arc::new(SequentialIdGenerator::new());

        let adapters = Arc::new(Adapters {
            persistence: PersistenceAdapters {
                uow: Arc::clone(&uow) as Arc<dyn crate::usecase::UnitOfWork>,
                users: Arc::new(InMemoryUserRepository::new(Arc::clone(&store))),
                organizations: Arc::new(InMemoryOrganizationRepository::new(Arc::clone(&store))),
                memberships: Arc::new(InMemoryOrganizationMembershipRepository::new(Arc::clone(
                    &store,
                ))),
            },
            system: SystemAdapters {
                clock: Arc::clone(&clock) as Arc<dyn crate::usecase::Clock>,
                ids: Arc::clone(&ids) as Arc<dyn IdGenerator>,
            },
            observability: observer,
        });

        Self {
            store,
            uow,
            clock,
            ids,
            adapters,
        }
    }

    /// Seed a registered user. The external id defaults to the username.
    pub fn seed_user(&self, username: &str) -> User {
        self.seed_user_with_external_id(username, username)
    }

    pub fn seed_user_with_external_id(&self, username: &str, external_id: &str) -> User {
        let user = User::new(
            self.ids.generate(),
            username,
            Some(external_id.to_string()),
            self.clock.now(),
        );
        self.store.insert_user(user.clone());
        user
    }

    /// Seed an organization owned by `owner`, including the active Owner
    /// membership.
    pub fn seed_organization(
        &self,
        name: &str,
        slug: &str,
        owner: &User,
    ) -> (Organization, OrganizationMembership) {
        let now = self.clock.now();
        let organization = Organization::new(self.ids.generate(), name, slug, owner.id, now);
        let membership = OrganizationMembership::join(
            self.ids.generate(),
            owner.id,
            &owner.username,
            organization.id,
            MembershipRole::Owner,
            now,
        );
        self.store.insert_organization(organization.clone());
        self.store.insert_membership(membership.clone());
        (organization, membership)
    }

    /// Seed an active membership for a registered user.
    pub fn seed_member(
        &self,
        organization_id: Uuid,
        user: &User,
        role: MembershipRole,
    ) -> OrganizationMembership {
        let membership = OrganizationMembership::join(
            self.ids.generate(),
            user.id,
            &user.username,
            organization_id,
            role,
            self.clock.now(),
        );
        self.store.insert_membership(membership.clone());
        membership
    }

    /// Seed a pending invitation for a username.
    pub fn seed_invitation(
        &self,
        organization_id: Uuid,
        username: &str,
        role: MembershipRole,
    ) -> OrganizationMembership {
        let membership = OrganizationMembership::invite(
            self.ids.generate(),
            username,
            organization_id,
            role,
            self.clock.now(),
        );
        self.store.insert_membership(membership.clone());
        membership
    }
}

impl Default for TestBackend {
    fn default() -> Self {
        Self::new()
    }
}
