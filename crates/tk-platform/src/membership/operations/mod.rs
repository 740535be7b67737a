//! Organization Membership use cases

pub mod accept_invitation;
pub mod add_member;
pub mod leave;
pub mod list;
pub mod remove_member;
pub mod transfer_ownership;
pub mod update_role;

pub use accept_invitation::{AcceptInvitation, AcceptInvitationInput};
pub use add_member::{AddOrganizationMember, AddOrganizationMemberInput};
pub use leave::{LeaveOrganization, LeaveOrganizationInput};
pub use list::{ListOrganizationMembers, ListOrganizationMembersInput};
pub use remove_member::{RemoveOrganizationMember, RemoveOrganizationMemberInput};
pub use transfer_ownership::{TransferOwnership, TransferOwnershipInput};
pub use update_role::{UpdateMemberRole, UpdateMemberRoleInput};
