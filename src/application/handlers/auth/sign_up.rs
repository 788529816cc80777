//! SignUpHandler - Command handler for self-service registration.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::user::{validate_password, Email, User, UserName};
use crate::ports::{IssuedToken, PasswordHasher, TokenIssuer, UnitOfWork, UserRepository};

/// Raw registration input; validated by the handler.
#[derive(Debug, Clone)]
pub struct SignUpCommand {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// A freshly registered or signed-in user together with their token.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub user: User,
    pub token: IssuedToken,
}

pub struct SignUpHandler {
    users: Arc<dyn UserRepository>,
    uow: Arc<dyn UnitOfWork>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenIssuer>,
}

impl SignUpHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        uow: Arc<dyn UnitOfWork>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenIssuer>,
    ) -> Self {
        Self {
            users,
            uow,
            hasher,
            tokens,
        }
    }

    /// Registers a regular user and issues their first token.
    ///
    /// The insert commits only after the token was minted.
    ///
    /// # Errors
    ///
    /// - Validation errors for name, email or password
    /// - `EmailTaken` if the email is already registered
    pub async fn handle(&self, cmd: SignUpCommand) -> Result<AuthSession, DomainError> {
        let session = register(
            self.users.as_ref(),
            self.uow.as_ref(),
            self.hasher.as_ref(),
            self.tokens.as_ref(),
            cmd,
            false,
        )
        .await?;

        tracing::info!(user_id = %session.user.id(), "user signed up");
        Ok(session)
    }
}

/// Shared registration flow for sign-up and admin creation.
pub(super) async fn register(
    users: &dyn UserRepository,
    uow: &dyn UnitOfWork,
    hasher: &dyn PasswordHasher,
    tokens: &dyn TokenIssuer,
    cmd: SignUpCommand,
    is_admin: bool,
) -> Result<AuthSession, DomainError> {
    // 1. Validate input
    let name = UserName::parse(&cmd.name)?;
    let email = Email::parse(&cmd.email)?;
    validate_password("password", &cmd.password)?;

    // 2. Fast uniqueness check; the insert re-checks under the constraint
    if users.find_by_email(&email).await?.is_some() {
        return Err(email_taken());
    }

    // 3. Hash
    let password_hash = hasher.hash(&cmd.password).await?;
    let user = if is_admin {
        User::register_admin(name, email, password_hash)
    } else {
        User::register(name, email, password_hash)
    };

    // 4. Insert and mint inside one unit of work
    let mut tx = uow.begin().await?;
    tx.insert_user(&user).await?;
    let token = tokens.issue(user.id())?;
    tx.commit().await?;

    Ok(AuthSession { user, token })
}

fn email_taken() -> DomainError {
    DomainError::new(ErrorCode::EmailTaken, "User already exists")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{FailurePoint, InMemoryStore};
    use crate::application::handlers::test_support::{FakeTokenIssuer, PlainHasher};
    use crate::domain::foundation::ErrorKind;

    fn handler(store: &InMemoryStore, fail_token: bool) -> SignUpHandler {
        let tokens = if fail_token {
            FakeTokenIssuer::failing()
        } else {
            FakeTokenIssuer::default()
        };
        with_tokens(store, Arc::new(tokens))
    }

    fn with_tokens(store: &InMemoryStore, tokens: Arc<FakeTokenIssuer>) -> SignUpHandler {
        SignUpHandler::new(
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            Arc::new(PlainHasher),
            tokens,
        )
    }

    fn command(email: &str) -> SignUpCommand {
        SignUpCommand {
            name: "  Alice  ".to_string(),
            email: email.to_string(),
            password: "secret1".to_string(),
        }
    }

    #[tokio::test]
    async fn registers_user_and_issues_token() {
        let store = InMemoryStore::new();
        let session = handler(&store, false)
            .handle(command("Alice@Example.com"))
            .await
            .unwrap();

        assert_eq!(session.user.name().as_str(), "Alice");
        assert_eq!(session.user.email().as_str(), "alice@example.com");
        assert!(!session.user.is_admin());
        assert_eq!(session.user.password_hash(), "plain:secret1");
        assert_eq!(session.token.token, format!("token-{}", session.user.id()));
        assert_eq!(store.user_count().await, 1);
    }

    #[tokio::test]
    async fn duplicate_email_conflicts() {
        let store = InMemoryStore::new();
        let h = handler(&store, false);
        h.handle(command("alice@example.com")).await.unwrap();

        let err = h.handle(command("ALICE@example.com")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::EmailTaken);
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(store.user_count().await, 1);
    }

    #[tokio::test]
    async fn token_failure_rolls_back_the_insert() {
        let store = InMemoryStore::new();
        let err = handler(&store, true)
            .handle(command("alice@example.com"))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Internal);
        assert_eq!(store.user_count().await, 0);
    }

    #[tokio::test]
    async fn insert_failure_creates_no_user_and_no_token() {
        let store = InMemoryStore::new();
        let tokens = Arc::new(FakeTokenIssuer::default());
        let failing = store.clone().with_failure(FailurePoint::InsertUser);

        let err = with_tokens(&failing, tokens.clone())
            .handle(command("alice@example.com"))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Internal);
        assert_eq!(store.user_count().await, 0);
        assert_eq!(tokens.issued(), 0);
    }

    #[tokio::test]
    async fn concurrent_sign_ups_with_one_email_create_one_user() {
        let store = InMemoryStore::new();
        let h = handler(&store, false);

        let (first, second) = tokio::join!(
            h.handle(command("alice@example.com")),
            h.handle(command("alice@example.com"))
        );

        assert!(first.is_ok() != second.is_ok());
        let err = first.err().or(second.err()).unwrap();
        assert_eq!(err.code, ErrorCode::EmailTaken);
        assert_eq!(store.user_count().await, 1);
    }

    #[tokio::test]
    async fn short_password_is_rejected() {
        let store = InMemoryStore::new();
        let mut cmd = command("alice@example.com");
        cmd.password = "123".to_string();

        let err = handler(&store, false).handle(cmd).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.details.get("field"), Some(&"password".to_string()));
    }

    #[tokio::test]
    async fn malformed_email_is_rejected() {
        let store = InMemoryStore::new();
        let err = handler(&store, false)
            .handle(command("not-an-email"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }
}
