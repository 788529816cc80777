//! UpdateUserHandler - Self-service name and password changes.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, DomainError, ErrorCode, UserId};
use crate::domain::user::{PasswordChange, UserName};
use crate::ports::{PasswordHasher, UserRepository};

use super::get_user::user_not_found;

/// Raw update input. Password fields must come as a complete triple.
#[derive(Debug, Clone)]
pub struct UpdateUserCommand {
    pub user_id: UserId,
    pub requester: AuthenticatedUser,
    pub name: Option<String>,
    pub old_password: Option<String>,
    pub new_password: Option<String>,
    pub new_password_confirm: Option<String>,
}

pub struct UpdateUserHandler {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
}

impl UpdateUserHandler {
    pub fn new(users: Arc<dyn UserRepository>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { users, hasher }
    }

    /// # Errors
    ///
    /// - `Forbidden` if the requester is not the target user
    /// - `MissingPasswordFields` / `PasswordMismatch` for inconsistent input
    /// - `IncorrectPassword` if the old password does not verify
    pub async fn handle(&self, cmd: UpdateUserCommand) -> Result<(), DomainError> {
        if !cmd.requester.is_user(&cmd.user_id) {
            tracing::warn!(
                requester_id = %cmd.requester.id,
                target_user_id = %cmd.user_id,
                "account update denied"
            );
            return Err(DomainError::new(
                ErrorCode::Forbidden,
                "You can only update your own account",
            ));
        }

        // Validate everything before touching storage
        let name = cmd.name.as_deref().map(UserName::parse).transpose()?;
        let change =
            PasswordChange::from_parts(cmd.old_password, cmd.new_password, cmd.new_password_confirm)?;

        let mut user = self
            .users
            .find_by_id(&cmd.user_id)
            .await?
            .ok_or_else(|| user_not_found(&cmd.user_id))?;

        if let Some(change) = change {
            if !self
                .hasher
                .verify(&change.old_password, user.password_hash())
                .await?
            {
                return Err(DomainError::new(
                    ErrorCode::IncorrectPassword,
                    "Old password is incorrect",
                ));
            }
            let hash = self.hasher.hash(&change.new_password).await?;
            user.replace_password_hash(hash);
        }
        if let Some(name) = name {
            user.rename(name);
        }

        self.users.update(&user).await?;
        tracing::info!(user_id = %user.id(), "account updated");
        Ok(())
    }
}
