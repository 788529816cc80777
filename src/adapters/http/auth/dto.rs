//! Request and response bodies for the auth endpoints.

use serde::{Deserialize, Serialize};

use crate::adapters::http::user::dto::UserResponse;
use crate::application::{CreateAdminCommand, SignInCommand, SignUpCommand};
use crate::domain::user::User;

#[derive(Debug, Clone, Deserialize)]
pub struct SignUpRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl From<SignUpRequest> for SignUpCommand {
    fn from(req: SignUpRequest) -> Self {
        Self {
            name: req.name,
            email: req.email,
            password: req.password,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

impl From<SignInRequest> for SignInCommand {
    fn from(req: SignInRequest) -> Self {
        Self {
            email: req.email,
            password: req.password,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAdminRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub secret_key: String,
}

impl From<CreateAdminRequest> for CreateAdminCommand {
    fn from(req: CreateAdminRequest) -> Self {
        Self {
            name: req.name,
            email: req.email,
            password: req.password,
            secret_key: req.secret_key,
        }
    }
}

/// Token plus the account it belongs to.
#[derive(Debug, Clone, Serialize)]
pub struct SessionResponse {
    pub token: String,
    pub user: UserResponse,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub is_admin: bool,
}

impl From<&User> for AdminResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().to_string(),
            name: user.name().to_string(),
            email: user.email().to_string(),
            is_admin: user.is_admin(),
        }
    }
}
