//! Access policy for user-owned resources.
//!
//! Every single-resource read, update, delete and cancel goes through
//! [`can_access`]. Handlers call [`require_access`], which turns a denial
//! into a `Forbidden` domain error.

use super::{AuthenticatedUser, DomainError, ErrorCode, UserId};

/// Trait for aggregates that have a single owner.
pub trait OwnedByUser {
    /// Returns the ID of the user who owns this resource.
    fn owner_id(&self) -> &UserId;

    /// Checks if the given user is the owner.
    fn is_owner(&self, user_id: &UserId) -> bool {
        self.owner_id() == user_id
    }
}

/// Decides whether `requester` may read or mutate `resource`.
///
/// Grants access when the requester owns the resource or is an admin.
/// A missing resource or missing requester is a denial, never an error.
pub fn can_access<R: OwnedByUser>(
    resource: Option<&R>,
    requester: Option<&AuthenticatedUser>,
) -> bool {
    match (resource, requester) {
        (Some(resource), Some(requester)) => {
            requester.is_admin || resource.is_owner(&requester.id)
        }
        _ => false,
    }
}

/// Runs [`can_access`] and converts a denial into a `Forbidden` error.
pub fn require_access<R: OwnedByUser>(
    resource: &R,
    requester: &AuthenticatedUser,
) -> Result<(), DomainError> {
    if can_access(Some(resource), Some(requester)) {
        return Ok(());
    }

    Err(
        DomainError::new(ErrorCode::Forbidden, "You are not allowed to access this resource")
            .with_detail("requested_by", requester.id.to_string()),
    )
}
