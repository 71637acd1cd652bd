use async_trait::async_trait;

use super::domain::{AuthUser, StoredUser};
use super::errors::AuthError;

/// Repository abstraction for user persistence.
#[async_trait]
pub trait AuthRepository: Send + Sync {
    /// Lookup is case-insensitive on the email.
    async fn find_user_by_email(&self, email: &str) -> Result<Option<StoredUser>, AuthError>;
    async fn create_user(&self, full_name: &str, email: &str, password_hash: String, is_admin: bool) -> Result<AuthUser, AuthError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockAuthRepository {
        users: Mutex<HashMap<String, StoredUser>>, // key: lowercased email
    }

    #[async_trait]
    impl AuthRepository for MockAuthRepository {
        async fn find_user_by_email(&self, email: &str) -> Result<Option<StoredUser>, AuthError> {
            let users = self.users.lock().unwrap();
            Ok(users.get(&email.to_ascii_lowercase()).cloned())
        }

        async fn create_user(&self, full_name: &str, email: &str, password_hash: String, is_admin: bool) -> Result<AuthUser, AuthError> {
            let mut users = self.users.lock().unwrap();
            let key = email.to_ascii_lowercase();
            if users.contains_key(&key) {
                return Err(AuthError::Conflict);
            }
            let user = AuthUser {
                id: users.len() as i32 + 1,
                full_name: full_name.to_string(),
                email: key.clone(),
                is_admin,
                employee_id: None,
            };
            users.insert(key, StoredUser { user: user.clone(), password_hash });
            Ok(user)
        }
    }
}
