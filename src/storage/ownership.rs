// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Ownership enforcement for mutating storage operations.
//!
//! Reads are public; every mutation of an owned record must pass through
//! [`OwnershipEnforcer::verify_ownership`] first.

use crate::auth::AuthenticatedUser;

use super::{StoreError, StoreResult, UserId};

/// Trait for resources that have an owner.
pub trait OwnedResource {
    /// The owning user's id.
    fn owner_id(&self) -> UserId;

    /// Short human-readable name used in permission errors, e.g. `post 7`.
    fn resource_label(&self) -> String;
}

/// Trait for enforcing ownership on storage operations.
pub trait OwnershipEnforcer {
    /// Verify that the user owns this resource.
    ///
    /// # Errors
    /// Returns `StoreError::PermissionDenied` if the user doesn't own the resource.
    fn verify_ownership(&self, user: &AuthenticatedUser) -> StoreResult<()>;
}

impl<T: OwnedResource> OwnershipEnforcer for T {
    fn verify_ownership(&self, user: &AuthenticatedUser) -> StoreResult<()> {
        if self.owner_id() == user.id {
            Ok(())
        } else {
            Err(StoreError::PermissionDenied {
                user_id: user.id,
                resource: self.resource_label(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    struct TestResource {
        owner: UserId,
    }

    impl OwnedResource for TestResource {
        fn owner_id(&self) -> UserId {
            self.owner
        }

        fn resource_label(&self) -> String {
            "test resource".to_string()
        }
    }

    fn make_user(id: UserId) -> AuthenticatedUser {
        AuthenticatedUser {
            id,
            email: format!("user{id}@example.com"),
            nickname: format!("user{id}"),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn ownership_verification_passes_for_owner() {
        let resource = TestResource { owner: 1 };
        assert!(resource.verify_ownership(&make_user(1)).is_ok());
    }

    #[test]
    fn ownership_verification_fails_for_non_owner() {
        let resource = TestResource { owner: 1 };

        let result = resource.verify_ownership(&make_user(2));
        match result {
            Err(StoreError::PermissionDenied { user_id, resource }) => {
                assert_eq!(user_id, 2);
                assert_eq!(resource, "test resource");
            }
            other => panic!("expected PermissionDenied, got {other:?}"),
        }
    }
}
