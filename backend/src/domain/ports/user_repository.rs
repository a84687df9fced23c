//! Port abstraction for user persistence adapters and their errors.
//!
//! Adapters classify storage failures into [`UserRepositoryError`] so callers
//! never inspect driver-specific error codes.

use async_trait::async_trait;

use crate::domain::{User, UserDraft, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserRepositoryError {
        /// Another live user already owns the email address.
        Conflict { email: String } => "email {email} is already in use",
        /// No user exists with the requested identifier.
        NotFound { id: UserId } => "user {id} not found",
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
    }
}

/// Single-table user storage.
///
/// Every method maps to exactly one storage round trip.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Return every user ordered by creation time, newest first.
    async fn list_newest_first(&self) -> Result<Vec<User>, UserRepositoryError>;

    /// Insert a user, assigning its identifier and timestamps.
    async fn create(&self, draft: &UserDraft) -> Result<User, UserRepositoryError>;

    /// Replace name and email of an existing user and refresh `updated_at`.
    async fn update(&self, id: UserId, draft: &UserDraft) -> Result<User, UserRepositoryError>;

    /// Hard-delete a user.
    async fn delete(&self, id: UserId) -> Result<(), UserRepositoryError>;
}
