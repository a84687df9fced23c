//! PostgreSQL persistence adapter using Diesel ORM.
//!
//! Provides the durable implementation of the domain's `UserRepository`
//! port on top of `diesel-async` with `bb8` connection pooling.
//!
//! # Architecture
//!
//! - **Thin adapter**: the repository only translates between Diesel rows
//!   and domain types. Validation and error wording live in the domain.
//! - **Internal models**: row structs (`models.rs`) and the table definition
//!   (`schema.rs`) never leave this module.
//! - **Strongly typed errors**: driver failures are classified into
//!   `UserRepositoryError` variants.
//!
//! # Example
//!
//! ```ignore
//! use user_directory::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/users")).await?;
//! let repo = DieselUserRepository::new(pool);
//! ```

mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
