use std::sync::Arc;

use argon2::{Argon2, password_hash::{PasswordHasher, PasswordVerifier, SaltString}, PasswordHash};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header as JwtHeader, Validation};
use rand::rngs::OsRng;
use tracing::{debug, info, instrument, warn};

use super::domain::{AuthSession, AuthUser, Claims, LoginInput};
use super::errors::AuthError;
use super::repository::AuthRepository;

/// Auth service configuration
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
}

/// Auth business service independent of web framework
#[derive(Clone)]
pub struct AuthService {
    repo: Arc<dyn AuthRepository>,
    cfg: AuthConfig,
}

/// Hash a password with argon2 and a random salt.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Ok(Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AuthError::HashError(e.to_string()))?
        .to_string())
}

impl AuthService {
    pub fn new(repo: Arc<dyn AuthRepository>, cfg: AuthConfig) -> Self { Self { repo, cfg } }

    /// Make sure an administrator with this email exists, creating it when absent.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{service::{AuthService, AuthConfig}, repository::mock::MockAuthRepository};
    /// use std::sync::Arc;
    /// let svc = AuthService::new(Arc::new(MockAuthRepository::default()), AuthConfig { jwt_secret: "secret".into(), token_ttl_hours: 12 });
    /// let admin = tokio_test::block_on(svc.ensure_admin("admin@shop.com", "Administrator", "Passw0rd!")).unwrap();
    /// assert!(admin.is_admin);
    /// ```
    #[instrument(skip(self, password))]
    pub async fn ensure_admin(&self, email: &str, full_name: &str, password: &str) -> Result<AuthUser, AuthError> {
        if let Some(existing) = self.repo.find_user_by_email(email).await? {
            if !existing.user.is_admin {
                warn!(user_id = existing.user.id, "bootstrap email belongs to a non-admin user");
            }
            debug!(user_id = existing.user.id, "bootstrap admin already present");
            return Ok(existing.user);
        }
        if password.len() < 8 {
            return Err(AuthError::Validation("password too short (>=8)".into()));
        }
        let hash = hash_password(password)?;
        let user = self.repo.create_user(full_name, email, hash, true).await?;
        info!(user_id = user.id, email = %user.email, "admin_bootstrapped");
        Ok(user)
    }

    /// Authenticate a user and issue a token.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{service::{AuthService, AuthConfig}, repository::mock::MockAuthRepository};
    /// use service::auth::domain::LoginInput;
    /// use std::sync::Arc;
    /// let svc = AuthService::new(Arc::new(MockAuthRepository::default()), AuthConfig { jwt_secret: "secret".into(), token_ttl_hours: 12 });
    /// tokio_test::block_on(svc.ensure_admin("u@e.com", "Owner", "Passw0rd")).unwrap();
    /// let session = tokio_test::block_on(svc.login(LoginInput { email: "U@e.com".into(), password: "Passw0rd".into() })).unwrap();
    /// assert_eq!(session.user.email, "u@e.com");
    /// assert!(svc.verify(&session.token).unwrap().admin);
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn login(&self, input: LoginInput) -> Result<AuthSession, AuthError> {
        if input.email.trim().is_empty() || input.password.is_empty() {
            return Err(AuthError::Validation("email and password are required".into()));
        }
        let stored = self.repo
            .find_user_by_email(input.email.trim())
            .await?
            .ok_or(AuthError::Unauthorized)?;

        let parsed = PasswordHash::new(&stored.password_hash).map_err(|e| AuthError::HashError(e.to_string()))?;
        if Argon2::default().verify_password(input.password.as_bytes(), &parsed).is_err() {
            debug!(user_id = stored.user.id, "password mismatch");
            return Err(AuthError::Unauthorized);
        }

        let exp = (chrono::Utc::now() + chrono::Duration::hours(self.cfg.token_ttl_hours)).timestamp() as usize;
        let claims = Claims { sub: stored.user.email.clone(), uid: stored.user.id, admin: stored.user.is_admin, exp };
        let token = encode(&JwtHeader::default(), &claims, &EncodingKey::from_secret(self.cfg.jwt_secret.as_bytes()))
            .map_err(|e| AuthError::TokenError(e.to_string()))?;
        info!(user_id = stored.user.id, "user_logged_in");
        Ok(AuthSession { user: stored.user, token })
    }

    /// Check signature and expiry; any failure is `Unauthorized`.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, &DecodingKey::from_secret(self.cfg.jwt_secret.as_bytes()), &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| {
                debug!(error = %e, "token rejected");
                AuthError::Unauthorized
            })
    }

    /// Verify the token and require the admin flag.
    pub fn authorize_admin(&self, token: &str) -> Result<Claims, AuthError> {
        let claims = self.verify(token)?;
        if !claims.admin {
            return Err(AuthError::Forbidden);
        }
        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::repository::mock::MockAuthRepository;

    fn svc() -> (Arc<MockAuthRepository>, AuthService) {
        let repo = Arc::new(MockAuthRepository::default());
        let svc = AuthService::new(repo.clone(), AuthConfig { jwt_secret: "test-secret".into(), token_ttl_hours: 1 });
        (repo, svc)
    }

    #[tokio::test]
    async fn ensure_admin_is_idempotent() {
        let (_repo, svc) = svc();
        let a = svc.ensure_admin("admin@shop.com", "Administrator", "Passw0rd!").await.unwrap();
        let b = svc.ensure_admin("ADMIN@shop.com", "Administrator", "ignored").await.unwrap();
        assert_eq!(a.id, b.id);
    }

    #[tokio::test]
    async fn ensure_admin_rejects_short_password() {
        let (_repo, svc) = svc();
        assert!(matches!(svc.ensure_admin("admin@shop.com", "Administrator", "short").await, Err(AuthError::Validation(_))));
    }

    #[tokio::test]
    async fn login_with_wrong_password_is_unauthorized() {
        let (_repo, svc) = svc();
        svc.ensure_admin("admin@shop.com", "Administrator", "Passw0rd!").await.unwrap();
        let err = svc.login(LoginInput { email: "admin@shop.com".into(), password: "nope-nope".into() }).await.unwrap_err();
        assert!(matches!(err, AuthError::Unauthorized));
        let err = svc.login(LoginInput { email: "ghost@shop.com".into(), password: "Passw0rd!".into() }).await.unwrap_err();
        assert_eq!(err.code(), 1004);
    }

    #[tokio::test]
    async fn non_admin_token_is_forbidden() {
        let (repo, svc) = svc();
        let hash = hash_password("Employee1").unwrap();
        repo.create_user("Clerk", "clerk@shop.com", hash, false).await.unwrap();
        let session = svc.login(LoginInput { email: "clerk@shop.com".into(), password: "Employee1".into() }).await.unwrap();
        assert!(!svc.verify(&session.token).unwrap().admin);
        assert!(matches!(svc.authorize_admin(&session.token), Err(AuthError::Forbidden)));
    }

    #[tokio::test]
    async fn token_signed_with_other_secret_is_rejected() {
        let (repo, svc) = svc();
        let other = AuthService::new(repo, AuthConfig { jwt_secret: "other".into(), token_ttl_hours: 1 });
        other.ensure_admin("admin@shop.com", "Administrator", "Passw0rd!").await.unwrap();
        let session = other.login(LoginInput { email: "admin@shop.com".into(), password: "Passw0rd!".into() }).await.unwrap();
        assert!(matches!(svc.verify(&session.token), Err(AuthError::Unauthorized)));
        assert!(matches!(svc.verify("garbage"), Err(AuthError::Unauthorized)));
    }
}
