//! In-memory store implementation
//!
//! Useful for testing and development. Data is lost when the process
//! terminates.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{OwnedRwLockWriteGuard, RwLock};
use tracing::debug;

use crate::domain::{
    DomainError, Offer, OfferId, OfferRepository, Page, PagingDto, TransactionManager,
    UnitOfWork, User, UserFilter, UserId, UserRepository,
};

/// Rows keyed by ID, remembering insertion order
#[derive(Debug)]
struct Table<K, V> {
    rows: HashMap<K, V>,
    order: Vec<K>,
}

impl<K, V> Default for Table<K, V> {
    fn default() -> Self {
        Self {
            rows: HashMap::new(),
            order: Vec::new(),
        }
    }
}

impl<K: Copy + Eq + Hash, V: Clone> Table<K, V> {
    fn get(&self, key: &K) -> Option<&V> {
        self.rows.get(key)
    }

    fn contains(&self, key: &K) -> bool {
        self.rows.contains_key(key)
    }

    fn upsert(&mut self, key: K, value: V) {
        if self.rows.insert(key, value).is_none() {
            self.order.push(key);
        }
    }

    fn ordered(&self) -> impl Iterator<Item = &V> {
        self.order.iter().filter_map(|key| self.rows.get(key))
    }
}

#[derive(Debug, Default)]
struct Tables {
    users: Table<UserId, User>,
    offers: Table<OfferId, Offer>,
}

/// Thread-safe in-memory store for users and offers
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    /// Creates a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with users
    pub fn with_users(users: Vec<User>) -> Self {
        let mut tables = Tables::default();

        for user in users {
            tables.users.upsert(*user.id(), user);
        }

        Self {
            tables: Arc::new(RwLock::new(tables)),
        }
    }

    /// Number of stored offers
    pub async fn offer_count(&self) -> usize {
        self.tables.read().await.offers.rows.len()
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_one(&self, filter: &UserFilter) -> Result<Option<User>, DomainError> {
        let tables = self.tables.read().await;
        Ok(find_user(&tables, filter))
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let mut tables = self.tables.write().await;

        if tables.users.contains(user.id()) {
            return Err(DomainError::conflict(format!(
                "User with ID '{}' already exists",
                user.id()
            )));
        }

        if tables.users.ordered().any(|u| u.username() == user.username()) {
            return Err(DomainError::conflict(format!(
                "Username '{}' already exists",
                user.username()
            )));
        }

        tables.users.upsert(*user.id(), user.clone());
        Ok(user)
    }

    async fn update(&self, user: &User) -> Result<User, DomainError> {
        let mut tables = self.tables.write().await;

        if !tables.users.contains(user.id()) {
            return Err(DomainError::user_not_found(*user.id()));
        }

        let username_taken = tables
            .users
            .ordered()
            .any(|u| u.username() == user.username() && u.id() != user.id());

        if username_taken {
            return Err(DomainError::conflict(format!(
                "Username '{}' already exists",
                user.username()
            )));
        }

        tables.users.upsert(*user.id(), user.clone());
        Ok(user.clone())
    }

    async fn list(&self, paging: &PagingDto) -> Result<Page<User>, DomainError> {
        let tables = self.tables.read().await;
        let total = tables.users.rows.len() as u64;
        let items = paging.window().apply(tables.users.ordered().cloned());

        Ok(Page::new(items, paging, total))
    }
}

#[async_trait]
impl OfferRepository for InMemoryStore {
    async fn save(&self, offer: Offer) -> Result<Offer, DomainError> {
        let mut tables = self.tables.write().await;
        tables.offers.upsert(*offer.id(), offer.clone());
        Ok(offer)
    }

    async fn get(&self, id: &OfferId) -> Result<Option<Offer>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables.offers.get(id).cloned())
    }

    async fn list(&self, paging: &PagingDto) -> Result<Page<Offer>, DomainError> {
        let tables = self.tables.read().await;
        let total = tables.offers.rows.len() as u64;
        let items = paging.window().apply(tables.offers.ordered().cloned());

        Ok(Page::new(items, paging, total))
    }

    async fn list_by_publisher(
        &self,
        publisher: &UserId,
        paging: &PagingDto,
    ) -> Result<Page<Offer>, DomainError> {
        let tables = self.tables.read().await;
        let published = || {
            tables
                .offers
                .ordered()
                .filter(move |offer| offer.publisher() == publisher)
        };

        let total = published().count() as u64;
        let items = paging.window().apply(published().cloned());

        Ok(Page::new(items, paging, total))
    }
}

#[async_trait]
impl TransactionManager for InMemoryStore {
    async fn begin(&self) -> Result<Box<dyn UnitOfWork>, DomainError> {
        let guard = self.tables.clone().write_owned().await;
        debug!("In-memory transaction started");

        Ok(Box::new(InMemoryUnitOfWork {
            tables: guard,
            staged_offers: Vec::new(),
        }))
    }
}

/// Holds the store's write lock for its whole lifetime; staged writes are
/// applied on commit and discarded on drop.
struct InMemoryUnitOfWork {
    tables: OwnedRwLockWriteGuard<Tables>,
    staged_offers: Vec<Offer>,
}

#[async_trait]
impl UnitOfWork for InMemoryUnitOfWork {
    async fn find_user(&mut self, filter: &UserFilter) -> Result<Option<User>, DomainError> {
        Ok(find_user(&self.tables, filter))
    }

    async fn save_offer(&mut self, offer: Offer) -> Result<Offer, DomainError> {
        self.staged_offers.push(offer.clone());
        Ok(offer)
    }

    async fn commit(self: Box<Self>) -> Result<(), DomainError> {
        let Self {
            mut tables,
            staged_offers,
        } = *self;

        let count = staged_offers.len();

        for offer in staged_offers {
            tables.offers.upsert(*offer.id(), offer);
        }

        debug!(offers = count, "In-memory transaction committed");
        Ok(())
    }
}

fn find_user(tables: &Tables, filter: &UserFilter) -> Option<User> {
    match filter {
        UserFilter::IdEquals(id) => tables.users.get(id).cloned(),
        UserFilter::UsernameEquals(_) => tables.users.ordered().find(|u| filter.matches(u)).cloned(),
    }
}
