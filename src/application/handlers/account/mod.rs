//! Account handlers - reading, updating and deleting users.

mod delete_account;
mod get_user;
mod list_users;
mod update_user;

pub use delete_account::{DeleteAccountCommand, DeleteAccountHandler};
pub use get_user::{GetUserHandler, GetUserQuery};
pub use list_users::{ListUsersHandler, ListUsersQuery};
pub use update_user::{UpdateUserCommand, UpdateUserHandler};
