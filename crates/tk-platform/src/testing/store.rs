//! In-memory entity store
//!
//! Shared state behind the in-memory repositories and unit of work. Maps are
//! guarded by `std::sync::RwLock`; locks are never held across an await.

use std::collections::HashMap;
use std::sync::RwLock;

use uuid::Uuid;

use crate::membership::OrganizationMembership;
use crate::organization::Organization;
use crate::usecase::EntityChange;
use crate::user::User;

#[derive(Default)]
pub struct InMemoryStore {
    users: RwLock<HashMap<Uuid, User>>,
    organizations: RwLock<HashMap<Uuid, Organization>>,
    memberships: RwLock<HashMap<Uuid, OrganizationMembership>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn apply(&self, change: EntityChange) {
        match change {
            EntityChange::UpsertUser(user) => {
                self.users.write().unwrap().insert(user.id, user);
            }
            EntityChange::UpsertOrganization(organization) => {
                self.organizations
                    .write()
                    .unwrap()
                    .insert(organization.id, organization);
            }
            EntityChange::UpsertMembership(membership) => {
                self.memberships
                    .write()
                    .unwrap()
                    .insert(membership.id, membership);
            }
        }
    }

    // Seeding helpers for tests.

    pub fn insert_user(&self, user: User) {
        self.users.write().unwrap().insert(user.id, user);
    }

    pub fn insert_organization(&self, organization: Organization) {
        self.organizations
            .write()
            .unwrap()
            .insert(organization.id, organization);
    }

    pub fn insert_membership(&self, membership: OrganizationMembership) {
        self.memberships
            .write()
            .unwrap()
            .insert(membership.id, membership);
    }

    // Snapshot accessors for assertions.

    pub fn user(&self, id: Uuid) -> Option<User> {
        self.users.read().unwrap().get(&id).cloned()
    }

    pub fn organization(&self, id: Uuid) -> Option<Organization> {
        self.organizations.read().unwrap().get(&id).cloned()
    }

    pub fn membership(&self, id: Uuid) -> Option<OrganizationMembership> {
        self.memberships.read().unwrap().get(&id).cloned()
    }

    pub fn user_count(&self) -> usize {
        self.users.read().unwrap().len()
    }

    pub fn organization_count(&self) -> usize {
        self.organizations.read().unwrap().len()
    }

    pub fn membership_count(&self) -> usize {
        self.memberships.read().unwrap().len()
    }

    pub(crate) fn users_snapshot(&self) -> Vec<User> {
        self.users.read().unwrap().values().cloned().collect()
    }

    pub(crate) fn organizations_snapshot(&self) -> Vec<Organization> {
        self.organizations.read().unwrap().values().cloned().collect()
    }

    pub(crate) fn memberships_snapshot(&self) -> Vec<OrganizationMembership> {
        self.memberships.read().unwrap().values().cloned().collect()
    }
}
