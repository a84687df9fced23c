//! In-memory `UserRepository` implementation.
//!
//! Used when no database URL is configured and by tests that exercise the
//! full HTTP stack. It enforces the same contract as the Diesel adapter:
//! identifiers increase monotonically and are never reused, emails are
//! unique, and listing is newest first.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};

use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::{User, UserDraft, UserId};

#[derive(Debug, Default)]
struct Store {
    last_id: i32,
    users: Vec<User>,
}

impl Store {
    fn email_taken(&self, draft: &UserDraft, except: Option<UserId>) -> bool {
        self.users
            .iter()
            .any(|user| user.email() == &draft.email && Some(user.id()) != except)
    }
}

/// Mutex-guarded user table living for the lifetime of the process.
pub struct InMemoryUserRepository {
    store: Mutex<Store>,
    clock: Arc<dyn Clock>,
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new(Arc::new(DefaultClock))
    }
}

impl InMemoryUserRepository {
    /// Create an empty repository stamping records with `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            store: Mutex::new(Store::default()),
            clock,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Store>, UserRepositoryError> {
        self.store
            .lock()
            .map_err(|_| UserRepositoryError::connection("in-memory store poisoned"))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn list_newest_first(&self) -> Result<Vec<User>, UserRepositoryError> {
        let store = self.lock()?;
        let mut users = store.users.clone();
        users.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then_with(|| b.id().cmp(&a.id()))
        });
        Ok(users)
    }

    async fn create(&self, draft: &UserDraft) -> Result<User, UserRepositoryError> {
        let mut store = self.lock()?;
        if store.email_taken(draft, None) {
            return Err(UserRepositoryError::conflict(draft.email.as_ref()));
        }
        let id = store
            .last_id
            .checked_add(1)
            .ok_or_else(|| UserRepositoryError::query("user id sequence exhausted"))?;
        let now = self.clock.utc();
        let user = User::new(UserId::new(id), draft.clone(), now, now);
        store.last_id = id;
        store.users.push(user.clone());
        Ok(user)
    }

    async fn update(&self, id: UserId, draft: &UserDraft) -> Result<User, UserRepositoryError> {
        let mut store = self.lock()?;
        if !store.users.iter().any(|user| user.id() == id) {
            return Err(UserRepositoryError::not_found(id));
        }
        if store.email_taken(draft, Some(id)) {
            return Err(UserRepositoryError::conflict(draft.email.as_ref()));
        }
        let now = self.clock.utc();
        let slot = store
            .users
            .iter_mut()
            .find(|user| user.id() == id)
            .ok_or_else(|| UserRepositoryError::not_found(id))?;
        *slot = slot.with_changes(draft.clone(), now);
        Ok(slot.clone())
    }

    async fn delete(&self, id: UserId) -> Result<(), UserRepositoryError> {
        let mut store = self.lock()?;
        let before = store.users.len();
        store.users.retain(|user| user.id() != id);
        if store.users.len() == before {
            return Err(UserRepositoryError::not_found(id));
        }
        Ok(())
    }
}
