//! User directory domain service.
//!
//! Implements the [`UsersQuery`] and [`UsersCommand`] driving ports on top of
//! a [`UserRepository`]. Each operation performs exactly one repository call
//! and translates repository failures into client-safe domain errors. Storage
//! detail is logged here and never copied into the returned [`Error`].

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info, warn};

use crate::domain::ports::{UserRepository, UserRepositoryError, UsersCommand, UsersQuery};
use crate::domain::{Error, TraceId, User, UserDraft, UserId};

const EMAIL_EXISTS_MESSAGE: &str = "Email already exists";
const USER_NOT_FOUND_MESSAGE: &str = "User not found";

/// Operation being performed, used for log context and fallback messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation {
    List,
    Create,
    Update,
    Delete,
}

impl Operation {
    fn as_str(self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }

    fn failure_message(self) -> &'static str {
        match self {
            Self::List => "Failed to fetch users",
            Self::Create => "Failed to create user",
            Self::Update => "Failed to update user",
            Self::Delete => "Failed to delete user",
        }
    }
}

/// Users service implementing the directory driving ports.
#[derive(Clone)]
pub struct UsersService<R> {
    repository: Arc<R>,
}

impl<R> UsersService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

fn map_repository_error(operation: Operation, err: UserRepositoryError) -> Error {
    let trace_id = TraceId::current().map(|id| id.to_string());
    match (operation, &err) {
        (Operation::Create | Operation::Update, UserRepositoryError::Conflict { email }) => {
            warn!(
                operation = operation.as_str(),
                %email,
                trace_id = ?trace_id,
                "rejected duplicate email"
            );
            Error::conflict(EMAIL_EXISTS_MESSAGE)
        }
        (Operation::Update | Operation::Delete, UserRepositoryError::NotFound { id }) => {
            warn!(
                operation = operation.as_str(),
                %id,
                trace_id = ?trace_id,
                "user not found"
            );
            Error::not_found(USER_NOT_FOUND_MESSAGE)
        }
        _ => {
            error!(
                operation = operation.as_str(),
                error = %err,
                trace_id = ?trace_id,
                "user repository failure"
            );
            Error::internal(operation.failure_message())
        }
    }
}

#[async_trait]
impl<R> UsersQuery for UsersService<R>
where
    R: UserRepository,
{
    async fn list_users(&self) -> Result<Vec<User>, Error> {
        self.repository
            .list_newest_first()
            .await
            .map_err(|err| map_repository_error(Operation::List, err))
    }
}

#[async_trait]
impl<R> UsersCommand for UsersService<R>
where
    R: UserRepository,
{
    async fn create_user(&self, draft: UserDraft) -> Result<User, Error> {
        let user = self
            .repository
            .create(&draft)
            .await
            .map_err(|err| map_repository_error(Operation::Create, err))?;
        info!(id = %user.id(), "user created");
        Ok(user)
    }

    async fn update_user(&self, id: UserId, draft: UserDraft) -> Result<User, Error> {
        let user = self
            .repository
            .update(id, &draft)
            .await
            .map_err(|err| map_repository_error(Operation::Update, err))?;
        info!(%id, "user updated");
        Ok(user)
    }

    async fn delete_user(&self, id: UserId) -> Result<(), Error> {
        self.repository
            .delete(id)
            .await
            .map_err(|err| map_repository_error(Operation::Delete, err))?;
        info!(%id, "user deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "users_service_tests.rs"]
mod tests;
