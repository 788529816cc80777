//! SignInHandler - Command handler for password sign-in.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::user::Email;
use crate::ports::{PasswordHasher, TokenIssuer, UserRepository};

use super::AuthSession;

const INVALID_CREDENTIALS: &str = "Invalid email or password";

#[derive(Debug, Clone)]
pub struct SignInCommand {
    pub email: String,
    pub password: String,
}

pub struct SignInHandler {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenIssuer>,
}

impl SignInHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenIssuer>,
    ) -> Self {
        Self {
            users,
            hasher,
            tokens,
        }
    }

    /// # Errors
    ///
    /// - `UserNotFound` for an unknown email
    /// - `InvalidCredentials` for a wrong password
    ///
    /// Both carry the same message so the wire text does not reveal which.
    pub async fn handle(&self, cmd: SignInCommand) -> Result<AuthSession, DomainError> {
        let email = Email::parse(&cmd.email)
            .map_err(|_| DomainError::new(ErrorCode::UserNotFound, INVALID_CREDENTIALS))?;

        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or_else(|| DomainError::new(ErrorCode::UserNotFound, INVALID_CREDENTIALS))?;

        if !self.hasher.verify(&cmd.password, user.password_hash()).await? {
            tracing::warn!(user_id = %user.id(), "sign-in with wrong password");
            return Err(DomainError::new(
                ErrorCode::InvalidCredentials,
                INVALID_CREDENTIALS,
            ));
        }

        let token = self.tokens.issue(user.id())?;
        tracing::info!(user_id = %user.id(), "user signed in");
        Ok(AuthSession { user, token })
    }
}
