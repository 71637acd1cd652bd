use serde::{Deserialize, Serialize};

/// Login input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Domain user (business view, never carries the hash)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    pub id: i32,
    pub full_name: String,
    pub email: String,
    pub is_admin: bool,
    pub employee_id: Option<i32>,
}

/// User row together with its password hash, as read from the store.
#[derive(Debug, Clone)]
pub struct StoredUser {
    pub user: AuthUser,
    pub password_hash: String,
}

/// Login result (session)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    pub user: AuthUser,
    pub token: String,
}

/// JWT claims issued at login.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// user email
    pub sub: String,
    pub uid: i32,
    pub admin: bool,
    pub exp: usize,
}
