//! Organization Membership Entity
//!
//! The membership lifecycle: invited -> joined -> left/removed. Internally
//! the state is an explicit enum; the timestamps are retained as audit and
//! display fields only, so "never set" and "explicitly cleared" can't be
//! confused in lifecycle logic.
//!
//! A terminal membership (Left or Removed) is never reactivated; rejoining
//! an organization creates a new membership row.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::usecase::DomainError;

/// Role held within an organization.
///
/// Exactly one `Owner` membership may be active per organization at any
/// time; ownership moves only through the transfer use case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MembershipRole {
    Owner,
    Admin,
    Member,
}

impl MembershipRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Admin => "admin",
            Self::Member => "member",
        }
    }

    /// Whether this role may manage other members.
    pub fn can_manage_members(&self) -> bool {
        matches!(self, Self::Owner | Self::Admin)
    }
}

impl std::fmt::Display for MembershipRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle state of a membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MembershipStatus {
    /// Invited but not yet accepted (user may not be registered yet)
    Invited,
    /// Joined and in good standing
    Active,
    /// Left voluntarily (terminal)
    Left,
    /// Removed administratively (terminal)
    Removed,
}

impl MembershipStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Left | Self::Removed)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationMembership {
    pub id: Uuid,

    /// Absent while the invited user has not registered/accepted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Uuid>,

    pub username: String,

    pub organization_id: Uuid,

    pub role: MembershipRole,

    pub status: MembershipStatus,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub invited_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub joined_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl OrganizationMembership {
    /// Create a pending membership for a not-yet-registered user.
    pub fn invite(
        id: Uuid,
        username: impl Into<String>,
        organization_id: Uuid,
        role: MembershipRole,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id: None,
            username: username.into(),
            organization_id,
            role,
            status: MembershipStatus::Invited,
            invited_at: Some(now),
            joined_at: None,
            left_at: None,
            deleted_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Create an active membership for a registered user.
    pub fn join(
        id: Uuid,
        user_id: Uuid,
        username: impl Into<String>,
        organization_id: Uuid,
        role: MembershipRole,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id: Some(user_id),
            username: username.into(),
            organization_id,
            role,
            status: MembershipStatus::Active,
            invited_at: None,
            joined_at: Some(now),
            left_at: None,
            deleted_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == MembershipStatus::Invited
    }

    pub fn is_active(&self) -> bool {
        self.status == MembershipStatus::Active
    }

    /// Accept a pending invitation, binding it to the registered user.
    pub fn accept(&mut self, user_id: Uuid, now: DateTime<Utc>) -> Result<(), DomainError> {
        if self.status != MembershipStatus::Invited {
            return Err(DomainError::business_rule(format!(
                "Cannot accept an invitation for a membership in state {:?}",
                self.status
            )));
        }
        self.user_id = Some(user_id);
        self.status = MembershipStatus::Active;
        self.joined_at = Some(now);
        self.updated_at = now;
        Ok(())
    }

    /// Change the member's role. Requires an active membership.
    pub fn change_role(
        &mut self,
        role: MembershipRole,
        now: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        if self.status != MembershipStatus::Active {
            return Err(DomainError::business_rule(format!(
                "Cannot change the role of a membership in state {:?}",
                self.status
            )));
        }
        self.role = role;
        self.updated_at = now;
        Ok(())
    }

    /// Leave voluntarily. Requires an active membership; terminal.
    pub fn leave(&mut self, now: DateTime<Utc>) -> Result<(), DomainError> {
        if self.status != MembershipStatus::Active {
            return Err(DomainError::business_rule(format!(
                "Cannot leave from a membership in state {:?}",
                self.status
            )));
        }
        self.status = MembershipStatus::Left;
        self.left_at = Some(now);
        self.updated_at = now;
        Ok(())
    }

    /// Administrative removal. Allowed from Invited or Active; terminal.
    pub fn remove(&mut self, now: DateTime<Utc>) -> Result<(), DomainError> {
        if self.status.is_terminal() {
            return Err(DomainError::business_rule(format!(
                "Cannot remove a membership in state {:?}",
                self.status
            )));
        }
        self.status = MembershipStatus::Removed;
        self.deleted_at = Some(now);
        self.updated_at = now;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invited() -> OrganizationMembership {
        OrganizationMembership::invite(
            Uuid::new_v4(),
            "carol",
            Uuid::new_v4(),
            MembershipRole::Member,
            Utc::now(),
        )
    }

    fn active() -> OrganizationMembership {
        OrganizationMembership::join(
            Uuid::new_v4(),
            Uuid::new_v4(),
            "carol",
            Uuid::new_v4(),
            MembershipRole::Member,
            Utc::now(),
        )
    }

    #[test]
    fn test_invite_is_pending() {
        let membership = invited();
        assert!(membership.is_pending());
        assert!(membership.user_id.is_none());
        assert!(membership.invited_at.is_some());
        assert!(membership.joined_at.is_none());
    }

    #[test]
    fn test_accept_binds_user_and_activates() {
        let mut membership = invited();
        let user_id = Uuid::new_v4();
        let now = Utc::now();

        membership.accept(user_id, now).unwrap();

        assert!(membership.is_active());
        assert_eq!(membership.user_id, Some(user_id));
        assert_eq!(membership.joined_at, Some(now));
    }

    #[test]
    fn test_accept_rejected_when_not_invited() {
        let mut membership = active();
        let err = membership.accept(Uuid::new_v4(), Utc::now()).unwrap_err();
        assert_eq!(err.code(), "BUSINESS_RULE_VIOLATION");
    }

    #[test]
    fn test_leave_requires_active() {
        let mut membership = invited();
        assert!(membership.leave(Utc::now()).is_err());

        let mut membership = active();
        membership.leave(Utc::now()).unwrap();
        assert_eq!(membership.status, MembershipStatus::Left);
        assert!(membership.left_at.is_some());
    }

    #[test]
    fn test_terminal_states_never_reactivate() {
        let now = Utc::now();

        let mut left = active();
        left.leave(now).unwrap();
        assert!(left.accept(Uuid::new_v4(), now).is_err());
        assert!(left.change_role(MembershipRole::Admin, now).is_err());
        assert!(left.remove(now).is_err());

        let mut removed = active();
        removed.remove(now).unwrap();
        assert!(removed.accept(Uuid::new_v4(), now).is_err());
        assert!(removed.change_role(MembershipRole::Admin, now).is_err());
        assert!(removed.leave(now).is_err());
    }

    #[test]
    fn test_remove_allowed_from_invited() {
        let mut membership = invited();
        membership.remove(Utc::now()).unwrap();
        assert_eq!(membership.status, MembershipStatus::Removed);
        assert!(membership.deleted_at.is_some());
    }

    #[test]
    fn test_change_role() {
        let mut membership = active();
        membership.change_role(MembershipRole::Admin, Utc::now()).unwrap();
        assert_eq!(membership.role, MembershipRole::Admin);
    }

    #[test]
    fn test_role_serializes_lowercase() {
        let json = serde_json::to_string(&MembershipRole::Owner).unwrap();
        assert_eq!(json, "\"owner\"");
    }
}
