//! User Entity
//!
//! A registered principal. Users are soft-deleted: a tombstone timestamp is
//! set and the row is retained for audit.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,

    /// Correlation key for the external identity provider. Defaults to the
    /// username when the provider supplies none.
    pub external_id: String,

    pub username: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn new(
        id: Uuid,
        username: impl Into<String>,
        external_id: Option<String>,
        now: DateTime<Utc>,
    ) -> Self {
        let username = username.into();
        let external_id = external_id.unwrap_or_else(|| username.clone());
        Self {
            id,
            external_id,
            username,
            display_name: None,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    pub fn rename(&mut self, username: impl Into<String>, now: DateTime<Utc>) {
        self.username = username.into();
        self.updated_at = now;
    }

    pub fn set_display_name(&mut self, display_name: Option<String>, now: DateTime<Utc>) {
        self.display_name = display_name;
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
    fn test_new_user_timestamps_match() {
        let now = Utc::now();
        let user = User::new(Uuid::new_v4(), "alice", None, now);
        assert_eq!(user.created_at, user.updated_at);
        assert!(user.deleted_at.is_none());
        assert_eq!(user.external_id, "alice");
    }

    #[test]
    fn test_external_id_kept_when_provided() {
        let user = User::new(Uuid::new_v4(), "alice", Some("idp-77".to_string()), Utc::now());
        assert_eq!(user.external_id, "idp-77");
    }

    #[test]
    fn test_soft_delete() {
        let now = Utc::now();
        let mut user = User::new(Uuid::new_v4(), "alice", None, now);
        let later = now + chrono::Duration::seconds(5);
        user.soft_delete(later);
        assert!(user.is_deleted());
        assert_eq!(user.deleted_at, Some(later));
        assert_eq!(user.updated_at, later);
    }
}
