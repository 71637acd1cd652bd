use sea_orm::DatabaseConnection;

use crate::auth::domain::{AuthUser, StoredUser};
use crate::auth::errors::AuthError;
use crate::auth::repository::AuthRepository;

pub struct SeaOrmAuthRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmAuthRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

fn to_auth_user(u: &models::user::Model) -> AuthUser {
    AuthUser {
        id: u.id,
        full_name: u.full_name.clone(),
        email: u.email.clone(),
        is_admin: u.is_admin,
        employee_id: u.employee_id,
    }
}

#[async_trait::async_trait]
impl AuthRepository for SeaOrmAuthRepository {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<StoredUser>, AuthError> {
        let res = models::user::find_by_email(&self.db, email).await?;
        Ok(res.map(|u| StoredUser { user: to_auth_user(&u), password_hash: u.password_hash }))
    }

    async fn create_user(&self, full_name: &str, email: &str, password_hash: String, is_admin: bool) -> Result<AuthUser, AuthError> {
        let created = models::user::create(&self.db, full_name, email, password_hash, is_admin).await?;
        Ok(to_auth_user(&created))
    }
}
