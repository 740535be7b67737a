//! Organization Entity
//!
//! A tenant. Each organization has exactly one owning user at a time; the
//! owner reference changes only through the ownership-transfer use case.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub id: Uuid,

    /// Human-readable name
    pub name: String,

    /// Unique identifier/slug (URL-safe)
    pub slug: String,

    /// The sole owning user
    pub owner_user_id: Uuid,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Organization {
    pub fn new(
        id: Uuid,
        name: impl Into<String>,
        slug: impl Into<String>,
        owner_user_id: Uuid,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            slug: slug.into(),
            owner_user_id,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    pub fn rename(&mut self, name: impl Into<String>, now: DateTime<Utc>) {
        self.name = name.into();
        self.updated_at = now;
    }

    pub fn set_owner(&mut self, owner_user_id: Uuid, now: DateTime<Utc>) {
        self.owner_user_id = owner_user_id;
        self.updated_at = now;
    }

    pub fn soft_delete(&mut self, now: DateTime<Utc>) {
        self.deleted_at = Some(now);
        self.updated_at = now;
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_organization() {
        let now = Utc::now();
        let owner = Uuid::new_v4();
        let org = Organization::new(Uuid::new_v4(), "Acme", "acme", owner, now);
        assert_eq!(org.owner_user_id, owner);
        assert_eq!(org.created_at, org.updated_at);
        assert!(!org.is_deleted());
    }

    #[test]
    fn test_set_owner_touches_updated_at() {
        let now = Utc::now();
        let mut org = Organization::new(Uuid::new_v4(), "Acme", "acme", Uuid::new_v4(), now);
        let later = now + chrono::Duration::seconds(1);
        let new_owner = Uuid::new_v4();
        org.set_owner(new_owner, later);
        assert_eq!(org.owner_user_id, new_owner);
        assert_eq!(org.updated_at, later);
    }
}
