//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers write through repositories or a unit of work; query
//! handlers only read.

pub mod handlers;

pub use handlers::account::{
    DeleteAccountCommand, DeleteAccountHandler, GetUserHandler, GetUserQuery, ListUsersHandler,
    ListUsersQuery, UpdateUserCommand, UpdateUserHandler,
};
pub use handlers::auth::{
    AuthSession, CreateAdminCommand, CreateAdminHandler, SignInCommand, SignInHandler,
    SignUpCommand, SignUpHandler,
};
pub use handlers::subscription::{
    CancelSubscriptionCommand, CancelSubscriptionHandler, CreateSubscriptionCommand,
    CreateSubscriptionHandler, CreateSubscriptionResult, DeleteSubscriptionCommand,
    DeleteSubscriptionHandler, GetSubscriptionHandler, GetSubscriptionQuery,
    ListAllSubscriptionsHandler, ListAllSubscriptionsQuery, ListUserSubscriptionsHandler,
    ListUserSubscriptionsQuery, UpcomingRenewalsHandler, UpcomingRenewalsQuery,
    UpdateSubscriptionCommand, UpdateSubscriptionHandler,
};
