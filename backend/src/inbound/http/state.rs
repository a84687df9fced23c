//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::UsersService;
use crate::domain::ports::{UserRepository, UsersCommand, UsersQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub users_query: Arc<dyn UsersQuery>,
    pub users_command: Arc<dyn UsersCommand>,
}

impl HttpState {
    /// Construct state from explicit port implementations.
    pub fn new(users_query: Arc<dyn UsersQuery>, users_command: Arc<dyn UsersCommand>) -> Self {
        Self {
            users_query,
            users_command,
        }
    }

    /// Wire both ports to a [`UsersService`] over `repository`.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use user_directory::inbound::http::state::HttpState;
    /// use user_directory::outbound::memory::InMemoryUserRepository;
    ///
    /// let state = HttpState::from_repository(Arc::new(InMemoryUserRepository::default()));
    /// let _query = state.users_query.clone();
    /// ```
    pub fn from_repository<R>(repository: Arc<R>) -> Self
    where
        R: UserRepository + 'static,
    {
        let service = Arc::new(UsersService::new(repository));
        Self::new(service.clone(), service)
    }
}
