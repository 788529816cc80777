//! PostgreSQL implementation of UserRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId};
use crate::domain::user::{Email, User, UserName};
use crate::ports::UserRepository;

/// Database row representation for users.
#[derive(Debug, sqlx::FromRow)]
pub(super) struct UserRow {
    id: Uuid,
    name: String,
    email: String,
    password_hash: String,
    is_admin: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = DomainError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User::reconstitute(
            UserId::from_uuid(row.id),
            UserName::parse(&row.name).map_err(|e| corrupt("name", e))?,
            Email::parse(&row.email).map_err(|e| corrupt("email", e))?,
            row.password_hash,
            row.is_admin,
            Timestamp::from_datetime(row.created_at),
            Timestamp::from_datetime(row.updated_at),
        ))
    }
}

pub(super) fn corrupt(column: &str, e: impl std::fmt::Display) -> DomainError {
    DomainError::database(format!("Invalid {} in database: {}", column, e))
}

const SELECT_USER: &str = r#"
    SELECT id, name, email, password_hash, is_admin, created_at, updated_at
    FROM users
"#;

/// Inserts a user row. Shared by the unit of work.
pub(super) async fn insert_user<'e, E: PgExecutor<'e>>(
    executor: E,
    user: &User,
) -> Result<(), DomainError> {
    sqlx::query(
        r#"
        INSERT INTO users (id, name, email, password_hash, is_admin, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        "#,
    )
    .bind(user.id().as_uuid())
    .bind(user.name().as_str())
    .bind(user.email().as_str())
    .bind(user.password_hash())
    .bind(user.is_admin())
    .bind(user.created_at().as_datetime())
    .bind(user.updated_at().as_datetime())
    .execute(executor)
    .await
    .map_err(|e| {
        if let sqlx::Error::Database(db_err) = &e {
            if db_err.constraint() == Some("users_email_key") {
                return DomainError::new(ErrorCode::EmailTaken, "User already exists");
            }
        }
        DomainError::database(format!("Failed to insert user: {}", e))
    })?;

    Ok(())
}

/// PostgreSQL implementation of UserRepository.
#[derive(Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let row: Option<UserRow> = sqlx::query_as(&format!("{} WHERE id = $1", SELECT_USER))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to fetch user: {}", e)))?;

        row.map(User::try_from).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, DomainError> {
        let row: Option<UserRow> = sqlx::query_as(&format!("{} WHERE email = $1", SELECT_USER))
            .bind(email.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to fetch user by email: {}", e)))?;

        row.map(User::try_from).transpose()
    }

    async fn list(&self) -> Result<Vec<User>, DomainError> {
        let rows: Vec<UserRow> =
            sqlx::query_as(&format!("{} ORDER BY created_at ASC, id ASC", SELECT_USER))
                .fetch_all(&self.pool)
                .await
                .map_err(|e| DomainError::database(format!("Failed to list users: {}", e)))?;

        rows.into_iter().map(User::try_from).collect()
    }

    async fn update(&self, user: &User) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE users SET
                name = $2,
                password_hash = $3,
                updated_at = $4
            WHERE id = $1
            "#,
        )
        .bind(user.id().as_uuid())
        .bind(user.name().as_str())
        .bind(user.password_hash())
        .bind(user.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to update user: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::UserNotFound,
                format!("User not found: {}", user.id()),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> UserRow {
        UserRow {
            id: Uuid::new_v4(),
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            password_hash: "$argon2id$v=19$...".to_string(),
            is_admin: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn row_converts_to_user() {
        let r = row();
        let id = r.id;
        let user = User::try_from(r).unwrap();
        assert_eq!(user.id().as_uuid(), &id);
        assert_eq!(user.email().as_str(), "alice@example.com");
        assert!(user.is_admin());
    }

    #[test]
    fn corrupt_email_is_database_error() {
        let mut r = row();
        r.email = "garbage".to_string();
        let err = User::try_from(r).unwrap_err();
        assert_eq!(err.code, ErrorCode::DatabaseError);
    }
}
