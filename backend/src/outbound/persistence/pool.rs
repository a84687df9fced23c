//! bb8 pool of `diesel-async` PostgreSQL connections.

use std::time::Duration;

use diesel_async::AsyncPgConnection;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::pooled_connection::bb8::{Pool, PooledConnection};

use crate::domain::ports::define_port_error;

define_port_error! {
    /// Pool construction and checkout failures.
    pub enum PoolError {
        /// No connection became available in time.
        Checkout { message: String } => "failed to get connection from pool: {message}",
        /// The manager rejected the configuration.
        Build { message: String } => "failed to build connection pool: {message}",
    }
}

/// Connections are opened lazily; a checkout waits this long at most.
const CHECKOUT_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_MAX_SIZE: u32 = 10;

/// Where to connect and how many connections to hold.
///
/// # Example
///
/// ```ignore
/// let config = PoolConfig::new("postgres://directory@localhost/users").with_max_size(4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolConfig {
    database_url: String,
    max_size: u32,
}

impl PoolConfig {
    /// Configuration holding at most ten connections.
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_size: DEFAULT_MAX_SIZE,
        }
    }

    pub fn with_max_size(mut self, max_size: u32) -> Self {
        self.max_size = max_size;
        self
    }
}

/// Shared handle to the pool. Clones point at the same connections.
#[derive(Clone)]
pub struct DbPool {
    inner: Pool<AsyncPgConnection>,
}

impl DbPool {
    /// Build the pool. No connection is opened until the first checkout.
    ///
    /// # Errors
    ///
    /// [`PoolError::Build`] when the manager rejects the configuration.
    pub async fn new(config: PoolConfig) -> Result<Self, PoolError> {
        let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(config.database_url);
        Pool::builder()
            .max_size(config.max_size)
            .connection_timeout(CHECKOUT_TIMEOUT)
            .build(manager)
            .await
            .map(|inner| Self { inner })
            .map_err(|err| PoolError::build(err.to_string()))
    }

    /// Check out a connection, waiting up to the checkout timeout.
    pub async fn get(&self) -> Result<PooledConnection<'_, AsyncPgConnection>, PoolError> {
        self.inner
            .get()
            .await
            .map_err(|err| PoolError::checkout(err.to_string()))
    }
}
