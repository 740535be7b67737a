//! TenantKit Platform
//!
//! Multi-tenant backend toolkit built around a use-case execution pipeline:
//! - Use case lifecycle engine with hooks, cooperative abort, and a typed
//!   two-variant result
//! - Closed domain error taxonomy with a pure HTTP error mapper
//! - User, Organization, and Organization Membership vertical slices behind
//!   repository ports
//! - Unit-of-work port for atomic multi-entity writes with audit records
//!
//! ## Module Organization (Aggregate-based)
//!
//! Each aggregate contains:
//! - `entity` - Domain entities
//! - `repository` - Data access port
//! - `operations` - Use case operations

// Core aggregates
pub mod membership;
pub mod organization;
pub mod user;

// Cross-cutting concerns
pub mod audit;
pub mod usecase;

// Shared infrastructure
pub mod shared;

// Test support (in-memory ports)
pub mod testing;

// Re-export use case infrastructure
pub use usecase::{
    Adapters, DomainError, EntityChange, ErrorMapper, HookContext, HttpError, NoHooks,
    OperationContext, PersistenceAdapters, SystemAdapters, UnitOfWork, UseCase, UseCaseHooks,
    UseCasePipeline, UseCaseResult,
};
// Note: the details! macro is automatically exported at crate root via #[macro_export]

// Re-export main entity types for convenience
pub use membership::{MembershipRole, MembershipStatus, OrganizationMembership};
pub use organization::Organization;
pub use user::User;
pub use audit::AuditLog;

// Re-export repository ports
pub use membership::OrganizationMembershipRepository;
pub use organization::OrganizationRepository;
pub use user::UserRepository;

// Re-export shared API types
pub use shared::api_common::{
    CreatedResponse, PaginatedResponse, PaginationParams, SuccessResponse,
};

/// Use case re-exports, grouped per aggregate.
pub mod operations {
    pub use crate::user::operations::{
        CreateUser, CreateUserInput, DeleteUser, DeleteUserInput, GetUser, GetUserInput,
        ListUsers, ListUsersInput, UpdateUser, UpdateUserInput,
    };
    pub use crate::organization::operations::{
        CreateOrganization, CreateOrganizationInput, DeleteOrganization,
        DeleteOrganizationInput, GetOrganization, GetOrganizationInput, ListOrganizations,
        ListOrganizationsInput, UpdateOrganization, UpdateOrganizationInput,
    };
    pub use crate::membership::operations::{
        AcceptInvitation, AcceptInvitationInput, AddOrganizationMember,
        AddOrganizationMemberInput, LeaveOrganization, LeaveOrganizationInput,
        ListOrganizationMembers, ListOrganizationMembersInput, RemoveOrganizationMember,
        RemoveOrganizationMemberInput, TransferOwnership, TransferOwnershipInput,
        UpdateMemberRole, UpdateMemberRoleInput,
    };

    pub mod user {
        pub use crate::user::operations::*;
    }
    pub mod organization {
        pub use crate::organization::operations::*;
    }
    pub mod membership {
        pub use crate::membership::operations::*;
    }
}
