//! Application state for shared services

use std::sync::Arc;

use crate::infrastructure::auth::JwtService;
use crate::infrastructure::offer::OfferService;
use crate::infrastructure::storage::Stores;
use crate::infrastructure::user::{PasswordHasher, UserService};

/// Application state shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService>,
    pub offer_service: Arc<OfferService>,
    pub jwt_service: Arc<JwtService>,
    /// Key required by account administration routes; `None` disables them
    pub admin_key: Option<Arc<str>>,
}

impl AppState {
    /// Wire the services on top of one set of stores
    pub fn new(
        stores: Stores,
        hasher: Arc<dyn PasswordHasher>,
        jwt_service: Arc<JwtService>,
    ) -> Self {
        Self {
            user_service: Arc::new(UserService::new(stores.users, hasher)),
            offer_service: Arc::new(OfferService::new(stores.transactions, stores.offers)),
            jwt_service,
            admin_key: None,
        }
    }

    pub fn with_admin_key(mut self, admin_key: Option<String>) -> Self {
        self.admin_key = admin_key.map(Arc::from);
        self
    }
}
