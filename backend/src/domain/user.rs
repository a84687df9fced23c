//! User data model.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Validation errors returned by the user constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyName,
    EmptyEmail,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "name must not be empty"),
            Self::EmptyEmail => write!(f, "email must not be empty"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Raised when a path segment is not a 32-bit integer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidUserId {
    value: String,
}

impl InvalidUserId {
    /// The rejected input, untrimmed.
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for InvalidUserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "user id must be an integer, got `{}`", self.value)
    }
}

impl std::error::Error for InvalidUserId {}

/// Storage-assigned user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i32);

impl UserId {
    /// Wrap a raw identifier produced by storage.
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// Parse an identifier from a path segment.
    ///
    /// # Examples
    /// ```
    /// use user_directory::domain::UserId;
    ///
    /// assert_eq!(UserId::parse("42").map(UserId::get), Ok(42));
    /// assert!(UserId::parse("abc").is_err());
    /// ```
    pub fn parse(raw: &str) -> Result<Self, InvalidUserId> {
        raw.trim()
            .parse::<i32>()
            .map(Self)
            .map_err(|_| InvalidUserId {
                value: raw.to_owned(),
            })
    }

    /// Raw integer value.
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Person name shown in the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserName(String);

impl UserName {
    /// Validate and construct a [`UserName`], trimming surrounding whitespace.
    pub fn new(name: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = name.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyName);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<UserName> for String {
    fn from(value: UserName) -> Self {
        value.0
    }
}

impl TryFrom<String> for UserName {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Email address; unique across all live users.
///
/// Only emptiness is checked. Format validation is left to the browser's
/// `type=email` input, and uniqueness to storage.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and construct an [`EmailAddress`], trimming surrounding whitespace.
    pub fn new(email: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = email.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Validated input for creating or updating a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDraft {
    pub name: UserName,
    pub email: EmailAddress,
}

impl UserDraft {
    /// Build a draft from already validated components.
    pub fn new(name: UserName, email: EmailAddress) -> Self {
        Self { name, email }
    }

    /// Fallible constructor from optional raw request fields.
    ///
    /// The name is checked first so a request missing both fields reports
    /// the name.
    ///
    /// # Examples
    /// ```
    /// use user_directory::domain::{UserDraft, UserValidationError};
    ///
    /// let draft = UserDraft::try_from_parts(Some("Ann"), Some("ann@x.com")).unwrap();
    /// assert_eq!(draft.name.as_ref(), "Ann");
    /// assert_eq!(
    ///     UserDraft::try_from_parts(Some("Ann"), None),
    ///     Err(UserValidationError::EmptyEmail)
    /// );
    /// ```
    pub fn try_from_parts(
        name: Option<&str>,
        email: Option<&str>,
    ) -> Result<Self, UserValidationError> {
        let name = UserName::new(name.unwrap_or_default())?;
        let email = EmailAddress::new(email.unwrap_or_default())?;
        Ok(Self::new(name, email))
    }
}

/// Directory user record.
///
/// ## Invariants
/// - `id` is assigned by storage and never changes.
/// - `name` and `email` are non-empty once trimmed.
/// - `updated_at` is never earlier than `created_at` for records produced by
///   the repositories in this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    id: UserId,
    name: UserName,
    email: EmailAddress,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl User {
    /// Assemble a user from persisted components.
    pub fn new(
        id: UserId,
        draft: UserDraft,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        let UserDraft { name, email } = draft;
        Self {
            id,
            name,
            email,
            created_at,
            updated_at,
        }
    }

    /// Fallible constructor from raw column values.
    pub fn try_from_parts(
        id: i32,
        name: &str,
        email: &str,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Result<Self, UserValidationError> {
        let draft = UserDraft::try_from_parts(Some(name), Some(email))?;
        Ok(Self::new(UserId::new(id), draft, created_at, updated_at))
    }

    /// Stable identifier.
    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn name(&self) -> &UserName {
        &self.name
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Return a copy with the draft's name and email applied and the update
    /// timestamp refreshed.
    pub fn with_changes(&self, draft: UserDraft, updated_at: DateTime<Utc>) -> Self {
        Self::new(self.id, draft, self.created_at, updated_at)
    }
}
