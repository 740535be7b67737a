//! Membership lifecycle and ownership-transfer tests

use std::sync::Arc;

use tk_platform::operations::{
    AcceptInvitation, AcceptInvitationInput, AddOrganizationMember, AddOrganizationMemberInput,
    LeaveOrganization, LeaveOrganizationInput, ListOrganizationMembers,
    ListOrganizationMembersInput, RemoveOrganizationMember, RemoveOrganizationMemberInput,
    TransferOwnership, TransferOwnershipInput, UpdateMemberRole, UpdateMemberRoleInput,
};
use tk_platform::testing::TestBackend;
use tk_platform::usecase::{OperationContext, UseCase, UseCasePipeline};
use tk_platform::{MembershipRole, MembershipStatus, PaginationParams};

fn pipeline<U: UseCase>(use_case: U, backend: &TestBackend) -> UseCasePipeline<U> {
    UseCasePipeline::new(Arc::new(use_case), Arc::clone(&backend.adapters))
}

mod add_member {
    use super::*;

    #[tokio::test]
    async fn registered_target_joins_immediately() {
        let backend = TestBackend::new();
        let owner = backend.seed_user("owner");
        let (org, _) = backend.seed_organization("Acme", "acme", &owner);
        let target = backend.seed_user("carol");

        let result = pipeline(AddOrganizationMember, &backend)
            .execute(
                AddOrganizationMemberInput {
                    organization_id: org.id,
                    username: "carol".to_string(),
                    role: MembershipRole::Member,
                },
                OperationContext::create("owner"),
            )
            .await;

        let membership = result.unwrap();
        assert_eq!(membership.status, MembershipStatus::Active);
        assert_eq!(membership.user_id, Some(target.id));
        assert!(membership.joined_at.is_some());
        assert!(membership.invited_at.is_none());
    }

    #[tokio::test]
    async fn unregistered_target_gets_invitation() {
        let backend = TestBackend::new();
        let owner = backend.seed_user("owner");
        let (org, _) = backend.seed_organization("Acme", "acme", &owner);

        let result = pipeline(AddOrganizationMember, &backend)
            .execute(
                AddOrganizationMemberInput {
                    organization_id: org.id,
                    username: "newcomer".to_string(),
                    role: MembershipRole::Member,
                },
                OperationContext::create("owner"),
            )
            .await;

        let membership = result.unwrap();
        assert_eq!(membership.status, MembershipStatus::Invited);
        assert!(membership.user_id.is_none());
        assert!(membership.invited_at.is_some());
        assert!(membership.joined_at.is_none());
    }

    #[tokio::test]
    async fn plain_member_is_not_authorized() {
        let backend = TestBackend::new();
        let owner = backend.seed_user("owner");
        let (org, _) = backend.seed_organization("Acme", "acme", &owner);
        let member = backend.seed_user("mallory");
        backend.seed_member(org.id, &member, MembershipRole::Member);

        let before = backend.store.membership_count();
        let result = pipeline(AddOrganizationMember, &backend)
            .execute(
                AddOrganizationMemberInput {
                    organization_id: org.id,
                    username: "carol".to_string(),
                    role: MembershipRole::Member,
                },
                OperationContext::create("mallory"),
            )
            .await;

        assert_eq!(result.unwrap_err().code(), "UNAUTHORIZED");
        // The business logic never ran.
        assert_eq!(backend.store.membership_count(), before);
    }

    #[tokio::test]
    async fn duplicate_membership_conflicts() {
        let backend = TestBackend::new();
        let owner = backend.seed_user("owner");
        let (org, _) = backend.seed_organization("Acme", "acme", &owner);
        let carol = backend.seed_user("carol");
        backend.seed_member(org.id, &carol, MembershipRole::Member);

        let result = pipeline(AddOrganizationMember, &backend)
            .execute(
                AddOrganizationMemberInput {
                    organization_id: org.id,
                    username: "carol".to_string(),
                    role: MembershipRole::Member,
                },
                OperationContext::create("owner"),
            )
            .await;

        assert_eq!(result.unwrap_err().code(), "CONFLICT");
    }

    #[tokio::test]
    async fn owner_role_cannot_be_assigned_directly() {
        let backend = TestBackend::new();
        let owner = backend.seed_user("owner");
        let (org, _) = backend.seed_organization("Acme", "acme", &owner);

        let result = pipeline(AddOrganizationMember, &backend)
            .execute(
                AddOrganizationMemberInput {
                    organization_id: org.id,
                    username: "carol".to_string(),
                    role: MembershipRole::Owner,
                },
                OperationContext::create("owner"),
            )
            .await;

        assert_eq!(result.unwrap_err().code(), "BUSINESS_RULE_VIOLATION");
    }
}

mod accept_invitation {
    use super::*;

    #[tokio::test]
    async fn pending_invitation_is_accepted() {
        let backend = TestBackend::new();
        let owner = backend.seed_user("owner");
        let (org, _) = backend.seed_organization("Acme", "acme", &owner);
        backend.seed_invitation(org.id, "carol", MembershipRole::Member);
        let carol = backend.seed_user("carol");

        let result = pipeline(AcceptInvitation, &backend)
            .execute(
                AcceptInvitationInput {
                    organization_id: org.id,
                },
                OperationContext::create("carol"),
            )
            .await;

        let membership = result.unwrap();
        assert_eq!(membership.status, MembershipStatus::Active);
        assert_eq!(membership.user_id, Some(carol.id));
        assert!(membership.joined_at.is_some());
    }

    #[tokio::test]
    async fn missing_invitation_is_not_found() {
        let backend = TestBackend::new();
        let owner = backend.seed_user("owner");
        let (org, _) = backend.seed_organization("Acme", "acme", &owner);
        backend.seed_user("carol");

        let result = pipeline(AcceptInvitation, &backend)
            .execute(
                AcceptInvitationInput {
                    organization_id: org.id,
                },
                OperationContext::create("carol"),
            )
            .await;

        assert_eq!(result.unwrap_err().code(), "NOT_FOUND");
    }

    #[tokio::test]
    async fn already_active_membership_conflicts() {
        let backend = TestBackend::new();
        let owner = backend.seed_user("owner");
        let (org, _) = backend.seed_organization("Acme", "acme", &owner);
        let carol = backend.seed_user("carol");
        backend.seed_member(org.id, &carol, MembershipRole::Member);

        let result = pipeline(AcceptInvitation, &backend)
            .execute(
                AcceptInvitationInput {
                    organization_id: org.id,
                },
                OperationContext::create("carol"),
            )
            .await;

        assert_eq!(result.unwrap_err().code(), "CONFLICT");
    }
}

mod update_role {
    use super::*;

    #[tokio::test]
    async fn member_is_promoted_to_admin() {
        let backend = TestBackend::new();
        let owner = backend.seed_user("owner");
        let (org, _) = backend.seed_organization("Acme", "acme", &owner);
        let carol = backend.seed_user("carol");
        let membership = backend.seed_member(org.id, &carol, MembershipRole::Member);

        let result = pipeline(UpdateMemberRole, &backend)
            .execute(
                UpdateMemberRoleInput {
                    membership_id: membership.id,
                    role: MembershipRole::Admin,
                },
                OperationContext::create("owner"),
            )
            .await;

        assert_eq!(result.unwrap().role, MembershipRole::Admin);
        assert_eq!(
            backend.store.membership(membership.id).unwrap().role,
            MembershipRole::Admin
        );
    }

    #[tokio::test]
    async fn owner_cannot_be_demoted() {
        let backend = TestBackend::new();
        let owner = backend.seed_user("owner");
        let (org, owner_membership) = backend.seed_organization("Acme", "acme", &owner);
        let admin = backend.seed_user("admin");
        backend.seed_member(org.id, &admin, MembershipRole::Admin);

        let result = pipeline(UpdateMemberRole, &backend)
            .execute(
                UpdateMemberRoleInput {
                    membership_id: owner_membership.id,
                    role: MembershipRole::Member,
                },
                OperationContext::create("admin"),
            )
            .await;

        assert_eq!(result.unwrap_err().code(), "BUSINESS_RULE_VIOLATION");
    }

    #[tokio::test]
    async fn promotion_to_owner_is_rejected() {
        let backend = TestBackend::new();
        let owner = backend.seed_user("owner");
        let (org, _) = backend.seed_organization("Acme", "acme", &owner);
        let carol = backend.seed_user("carol");
        let membership = backend.seed_member(org.id, &carol, MembershipRole::Member);

        let result = pipeline(UpdateMemberRole, &backend)
            .execute(
                UpdateMemberRoleInput {
                    membership_id: membership.id,
                    role: MembershipRole::Owner,
                },
                OperationContext::create("owner"),
            )
            .await;

        assert_eq!(result.unwrap_err().code(), "BUSINESS_RULE_VIOLATION");
    }
}

mod leave {
    use super::*;

    #[tokio::test]
    async fn member_leaves_voluntarily() {
        let backend = TestBackend::new();
        let owner = backend.seed_user("owner");
        let (org, _) = backend.seed_organization("Acme", "acme", &owner);
        let carol = backend.seed_user("carol");
        let membership = backend.seed_member(org.id, &carol, MembershipRole::Member);

        let result = pipeline(LeaveOrganization, &backend)
            .execute(
                LeaveOrganizationInput {
                    organization_id: org.id,
                },
                OperationContext::create("carol"),
            )
            .await;

        let left = result.unwrap();
        assert_eq!(left.status, MembershipStatus::Left);
        assert!(left.left_at.is_some());
        assert_eq!(
            backend.store.membership(membership.id).unwrap().status,
            MembershipStatus::Left
        );
    }

    #[tokio::test]
    async fn owner_cannot_leave_without_transfer() {
        let backend = TestBackend::new();
        let owner = backend.seed_user("owner");
        let (org, _) = backend.seed_organization("Acme", "acme", &owner);

        let result = pipeline(LeaveOrganization, &backend)
            .execute(
                LeaveOrganizationInput {
                    organization_id: org.id,
                },
                OperationContext::create("owner"),
            )
            .await;

        assert_eq!(result.unwrap_err().code(), "BUSINESS_RULE_VIOLATION");
    }
}

mod remove_member {
    use super::*;

    #[tokio::test]
    async fn admin_removes_member() {
        let backend = TestBackend::new();
        let owner = backend.seed_user("owner");
        let (org, _) = backend.seed_organization("Acme", "acme", &owner);
        let admin = backend.seed_user("admin");
        backend.seed_member(org.id, &admin, MembershipRole::Admin);
        let carol = backend.seed_user("carol");
        let membership = backend.seed_member(org.id, &carol, MembershipRole::Member);

        let result = pipeline(RemoveOrganizationMember, &backend)
            .execute(
                RemoveOrganizationMemberInput {
                    membership_id: membership.id,
                },
                OperationContext::create("admin"),
            )
            .await;

        let removed = result.unwrap();
        assert_eq!(removed.status, MembershipStatus::Removed);
        assert!(removed.deleted_at.is_some());
    }

    #[tokio::test]
    async fn repeated_removal_is_a_success_noop() {
        let backend = TestBackend::new();
        let owner = backend.seed_user("owner");
        let (org, _) = backend.seed_organization("Acme", "acme", &owner);
        let carol = backend.seed_user("carol");
        let membership = backend.seed_member(org.id, &carol, MembershipRole::Member);

        let remover = pipeline(RemoveOrganizationMember, &backend);
        let input = RemoveOrganizationMemberInput {
            membership_id: membership.id,
        };

        let first = remover
            .execute(input.clone(), OperationContext::create("owner"))
            .await;
        let first_deleted_at = first.unwrap().deleted_at;

        let second = remover
            .execute(input, OperationContext::create("owner"))
            .await;
        let second_removed = second.unwrap();

        assert_eq!(second_removed.status, MembershipStatus::Removed);
        assert_eq!(second_removed.deleted_at, first_deleted_at);
    }

    #[tokio::test]
    async fn active_owner_cannot_be_removed() {
        let backend = TestBackend::new();
        let owner = backend.seed_user("owner");
        let (org, owner_membership) = backend.seed_organization("Acme", "acme", &owner);
        let admin = backend.seed_user("admin");
        backend.seed_member(org.id, &admin, MembershipRole::Admin);

        let result = pipeline(RemoveOrganizationMember, &backend)
            .execute(
                RemoveOrganizationMemberInput {
                    membership_id: owner_membership.id,
                },
                OperationContext::create("admin"),
            )
            .await;

        assert_eq!(result.unwrap_err().code(), "BUSINESS_RULE_VIOLATION");
    }
}

mod transfer_ownership {
    use super::*;

    #[tokio::test]
    async fn ownership_moves_atomically() {
        let backend = TestBackend::new();
        let owner = backend.seed_user("owner");
        let (org, owner_membership) = backend.seed_organization("Acme", "acme", &owner);
        let carol = backend.seed_user("carol");
        let carol_membership = backend.seed_member(org.id, &carol, MembershipRole::Member);

        let result = pipeline(TransferOwnership, &backend)
            .execute(
                TransferOwnershipInput {
                    organization_id: org.id,
                    new_owner_user_id: carol.id,
                },
                OperationContext::create("owner"),
            )
            .await;

        let updated = result.unwrap();
        assert_eq!(updated.owner_user_id, carol.id);
        assert_eq!(
            backend.store.membership(owner_membership.id).unwrap().role,
            MembershipRole::Member
        );
        assert_eq!(
            backend.store.membership(carol_membership.id).unwrap().role,
            MembershipRole::Owner
        );
        assert_eq!(
            backend.store.organization(org.id).unwrap().owner_user_id,
            carol.id
        );
    }

    #[tokio::test]
    async fn mid_commit_failure_leaves_all_three_unchanged() {
        let backend = TestBackend::new();
        let owner = backend.seed_user("owner");
        let (org, owner_membership) = backend.seed_organization("Acme", "acme", &owner);
        let carol = backend.seed_user("carol");
        let carol_membership = backend.seed_member(org.id, &carol, MembershipRole::Member);

        // Fail while the second of the three staged changes is processed.
        backend.uow.fail_at_change(1);

        let result = pipeline(TransferOwnership, &backend)
            .execute(
                TransferOwnershipInput {
                    organization_id: org.id,
                    new_owner_user_id: carol.id,
                },
                OperationContext::create("owner"),
            )
            .await;

        assert_eq!(result.unwrap_err().code(), "INFRASTRUCTURE_ERROR");
        assert_eq!(
            backend.store.membership(owner_membership.id).unwrap().role,
            MembershipRole::Owner
        );
        assert_eq!(
            backend.store.membership(carol_membership.id).unwrap().role,
            MembershipRole::Member
        );
        assert_eq!(
            backend.store.organization(org.id).unwrap().owner_user_id,
            owner.id
        );
    }

    #[tokio::test]
    async fn only_the_owner_may_transfer() {
        let backend = TestBackend::new();
        let owner = backend.seed_user("owner");
        let (org, _) = backend.seed_organization("Acme", "acme", &owner);
        let admin = backend.seed_user("admin");
        backend.seed_member(org.id, &admin, MembershipRole::Admin);
        let carol = backend.seed_user("carol");
        backend.seed_member(org.id, &carol, MembershipRole::Member);

        let result = pipeline(TransferOwnership, &backend)
            .execute(
                TransferOwnershipInput {
                    organization_id: org.id,
                    new_owner_user_id: carol.id,
                },
                OperationContext::create("admin"),
            )
            .await;

        assert_eq!(result.unwrap_err().code(), "UNAUTHORIZED");
    }

    #[tokio::test]
    async fn new_owner_must_be_an_active_member() {
        let backend = TestBackend::new();
        let owner = backend.seed_user("owner");
        let (org, _) = backend.seed_organization("Acme", "acme", &owner);
        let outsider = backend.seed_user("outsider");

        let result = pipeline(TransferOwnership, &backend)
            .execute(
                TransferOwnershipInput {
                    organization_id: org.id,
                    new_owner_user_id: outsider.id,
                },
                OperationContext::create("owner"),
            )
            .await;

        assert_eq!(result.unwrap_err().code(), "BUSINESS_RULE_VIOLATION");
    }
}

mod list_members {
    use super::*;

    #[tokio::test]
    async fn terminal_memberships_are_excluded() {
        let backend = TestBackend::new();
        let owner = backend.seed_user("owner");
        let (org, _) = backend.seed_organization("Acme", "acme", &owner);
        let carol = backend.seed_user("carol");
        backend.seed_member(org.id, &carol, MembershipRole::Member);
        backend.seed_invitation(org.id, "pending", MembershipRole::Member);

        let mut left = backend.seed_member(org.id, &backend.seed_user("gone"), MembershipRole::Member);
        left.leave(backend.clock.now()).unwrap();
        backend.store.insert_membership(left);

        let result = pipeline(ListOrganizationMembers, &backend)
            .execute(
                ListOrganizationMembersInput {
                    organization_id: org.id,
                    page: PaginationParams::default(),
                },
                OperationContext::create("owner"),
            )
            .await;

        let page = result.unwrap();
        // owner + carol + pending invitation; the departed member is history
        assert_eq!(page.total, 3);
        assert_eq!(page.data.len(), 3);
    }
}
