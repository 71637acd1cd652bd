use std::sync::Arc;

use sea_orm::DatabaseConnection;
use service::auth::{repo::seaorm::SeaOrmAuthRepository, service::AuthConfig, AuthService};
use service::orders::{repo::seaorm::SeaOrmOrderRepository, ServiceOrderManager};

/// Shared handler state; cheap to clone.
#[derive(Clone)]
pub struct ServerState {
    pub orders: Arc<ServiceOrderManager>,
    pub auth: Arc<AuthService>,
}

impl ServerState {
    pub fn new(orders: ServiceOrderManager, auth: AuthService) -> Self {
        Self { orders: Arc::new(orders), auth: Arc::new(auth) }
    }

    /// Wire the SeaORM adapters over one connection pool.
    pub fn from_db(db: DatabaseConnection, cfg: &configs::AuthConfig) -> Self {
        let orders = ServiceOrderManager::from_store(Arc::new(SeaOrmOrderRepository::new(db.clone())));
        let auth = AuthService::new(
            Arc::new(SeaOrmAuthRepository::new(db)),
            AuthConfig { jwt_secret: cfg.jwt_secret.clone(), token_ttl_hours: cfg.token_ttl_hours },
        );
        Self::new(orders, auth)
    }
}
