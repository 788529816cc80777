//! CreateAdminHandler - Registers an admin when the shared key matches.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use subtle::ConstantTimeEq;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::user::User;
use crate::ports::{PasswordHasher, TokenIssuer, UnitOfWork, UserRepository};

use super::sign_up::{register, SignUpCommand};

#[derive(Debug, Clone)]
pub struct CreateAdminCommand {
    pub name: String,
    pub email: String,
    pub password: String,
    pub secret_key: String,
}

pub struct CreateAdminHandler {
    users: Arc<dyn UserRepository>,
    uow: Arc<dyn UnitOfWork>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenIssuer>,
    admin_key: SecretString,
}

impl CreateAdminHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        uow: Arc<dyn UnitOfWork>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenIssuer>,
        admin_key: SecretString,
    ) -> Self {
        Self {
            users,
            uow,
            hasher,
            tokens,
            admin_key,
        }
    }

    /// # Errors
    ///
    /// - `InvalidAdminKey` before any lookup when the key does not match
    /// - otherwise the same errors as sign-up
    pub async fn handle(&self, cmd: CreateAdminCommand) -> Result<User, DomainError> {
        let matches: bool = cmd
            .secret_key
            .as_bytes()
            .ct_eq(self.admin_key.expose_secret().as_bytes())
            .into();
        if !matches {
            tracing::warn!("admin creation with invalid key");
            return Err(DomainError::new(
                ErrorCode::InvalidAdminKey,
                "Invalid admin creation key",
            ));
        }

        let session = register(
            self.users.as_ref(),
            self.uow.as_ref(),
            self.hasher.as_ref(),
            self.tokens.as_ref(),
            SignUpCommand {
                name: cmd.name,
                email: cmd.email,
                password: cmd.password,
            },
            true,
        )
        .await?;

        tracing::info!(user_id = %session.user.id(), "admin created");
        Ok(session.user)
    }
}
