//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.
//!
//! Email uniqueness is enforced by the `users_email_key` index, so duplicate
//! writes surface as unique violations rather than a pre-flight lookup.

use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use mockable::{Clock, DefaultClock};
use tracing::{debug, warn};

use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::{User, UserDraft, UserId};

use super::models::{NewUserRow, UserRow, UserUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
    clock: Arc<dyn Clock>,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self::with_clock(pool, Arc::new(DefaultClock))
    }

    /// Create a repository stamping timestamps from `clock`.
    pub fn with_clock(pool: DbPool, clock: Arc<dyn Clock>) -> Self {
        Self { pool, clock }
    }
}

fn map_pool_error(error: PoolError) -> UserRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            UserRepositoryError::connection(message)
        }
    }
}

/// Map Diesel errors to repository errors.
///
/// `email` names the address being written so unique violations can be
/// reported as conflicts; reads pass `None`.
fn map_diesel_error(error: diesel::result::Error, email: Option<&str>) -> UserRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match (error, email) {
        (DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _), Some(email)) => {
            UserRepositoryError::conflict(email)
        }
        (DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _), _) => {
            UserRepositoryError::connection("database connection error")
        }
        (DieselError::QueryBuilderError(_), _) => UserRepositoryError::query("database query error"),
        (DieselError::NotFound, _) => UserRepositoryError::query("record not found"),
        _ => UserRepositoryError::query("database error"),
    }
}

fn row_to_user(row: UserRow) -> Result<User, UserRepositoryError> {
    User::try_from_parts(row.id, &row.name, &row.email, row.created_at, row.updated_at).map_err(
        |err| {
            warn!(id = row.id, error = %err, "stored user row failed validation");
            UserRepositoryError::query(format!("invalid user row {}: {err}", row.id))
        },
    )
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn list_newest_first(&self) -> Result<Vec<User>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<UserRow> = users::table
            .order((users::created_at.desc(), users::id.desc()))
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, None))?;

        rows.into_iter().map(row_to_user).collect()
    }

    async fn create(&self, draft: &UserDraft) -> Result<User, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let now = self.clock.utc();
        let email = draft.email.as_ref();

        let row = diesel::insert_into(users::table)
            .values(NewUserRow {
                name: draft.name.as_ref(),
                email,
                created_at: now,
                updated_at: now,
            })
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, Some(email)))?;

        row_to_user(row)
    }

    async fn update(&self, id: UserId, draft: &UserDraft) -> Result<User, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let email = draft.email.as_ref();

        let row = diesel::update(users::table.find(id.get()))
            .set(UserUpdate {
                name: draft.name.as_ref(),
                email,
                updated_at: self.clock.utc(),
            })
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, Some(email)))?;

        match row {
            Some(row) => row_to_user(row),
            None => Err(UserRepositoryError::not_found(id)),
        }
    }

    async fn delete(&self, id: UserId) -> Result<(), UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(users::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, None))?;

        if deleted == 0 {
            return Err(UserRepositoryError::not_found(id));
        }
        Ok(())
    }
}
