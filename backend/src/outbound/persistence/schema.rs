//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` when migrations change.

diesel::table! {
    /// Directory users.
    ///
    /// `email` carries a unique index; violations surface as
    /// `DatabaseErrorKind::UniqueViolation`.
    users (id) {
        /// Primary key assigned by the `users_id_seq` sequence.
        id -> Int4,
        name -> Varchar,
        email -> Varchar,
        created_at -> Timestamptz,
        /// Refreshed by the repository on every update.
        updated_at -> Timestamptz,
    }
}
