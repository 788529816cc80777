//! User account aggregate.

use super::values::{Email, UserName};
use crate::domain::foundation::{Timestamp, UserId};

/// A registered account.
///
/// # Invariants
///
/// - `email` is unique across accounts (enforced by persistence)
/// - `password_hash` is a PHC string and never leaves the service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    name: UserName,
    email: Email,
    password_hash: String,
    is_admin: bool,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl User {
    /// Creates a regular account from validated parts.
    pub fn register(name: UserName, email: Email, password_hash: String) -> Self {
        Self::create(name, email, password_hash, false)
    }

    /// Creates an admin account from validated parts.
    pub fn register_admin(name: UserName, email: Email, password_hash: String) -> Self {
        Self::create(name, email, password_hash, true)
    }

    fn create(name: UserName, email: Email, password_hash: String, is_admin: bool) -> Self {
        let now = Timestamp::now();
        Self {
            id: UserId::new(),
            name,
            email,
            password_hash,
            is_admin,
            created_at: now,
            updated_at: now,
        }
    }

    /// Reconstitute a user from persistence (no validation).
    pub fn reconstitute(
        id: UserId,
        name: UserName,
        email: Email,
        password_hash: String,
        is_admin: bool,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            name,
            email,
            password_hash,
            is_admin,
            created_at,
            updated_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn name(&self) -> &UserName {
        &self.name
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn is_admin(&self) -> bool {
        self.is_admin
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    pub fn rename(&mut self, name: UserName) {
        self.name = name;
        self.updated_at = Timestamp::now();
    }

    /// Replaces the stored hash. Callers verify the old password first.
    pub fn replace_password_hash(&mut self, password_hash: String) {
        self.password_hash = password_hash;
        self.updated_at = Timestamp::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> User {
        User::register(
            UserName::parse("Alice").unwrap(),
            Email::parse("alice@example.com").unwrap(),
            "$argon2id$hash".to_string(),
        )
    }

    #[test]
    fn register_creates_non_admin() {
        let user = alice();
        assert!(!user.is_admin());
        assert_eq!(user.created_at(), user.updated_at());
    }

    #[test]
    fn register_admin_sets_flag() {
        let user = User::register_admin(
            UserName::parse("Root").unwrap(),
            Email::parse("root@example.com").unwrap(),
            "hash".to_string(),
        );
        assert!(user.is_admin());
    }

    #[test]
    fn rename_replaces_name_and_keeps_identity() {
        let mut user = alice();
        let id = *user.id();
        user.rename(UserName::parse("Alicia").unwrap());

        assert_eq!(user.name().as_str(), "Alicia");
        assert_eq!(user.id(), &id);
    }

    #[test]
    fn replace_password_hash_swaps_hash() {
        let mut user = alice();
        user.replace_password_hash("new-hash".to_string());
        assert_eq!(user.password_hash(), "new-hash");
    }
}
