//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every helper returns an `invalid_request` domain error carrying a
//! `{field, code}` details object so clients can highlight the culprit.

use actix_web::{HttpRequest, error::JsonPayloadError, web};
use serde_json::json;
use tracing::warn;

use crate::domain::{Error, UserDraft, UserId, UserValidationError};

const REQUIRED_FIELDS_MESSAGE: &str = "Name and email are required";
const INVALID_ID_MESSAGE: &str = "User id must be an integer";
const INVALID_JSON_MESSAGE: &str = "Request body must be valid JSON";

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidId,
    InvalidJson,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidId => "invalid_id",
            ErrorCode::InvalidJson => "invalid_json",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

pub(crate) const NAME: FieldName = FieldName::new("name");
pub(crate) const EMAIL: FieldName = FieldName::new("email");
pub(crate) const ID: FieldName = FieldName::new("id");

/// Builder for validation errors with field context.
struct ValidationError {
    field: String,
    message: &'static str,
}

impl ValidationError {
    fn new(field: FieldName, message: &'static str) -> Self {
        Self {
            field: field.as_str().to_owned(),
            message,
        }
    }

    fn with_code(self, code: ErrorCode) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "code": code.as_str(),
        }))
    }

    fn with_value(self, code: ErrorCode, value: impl Into<String>) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "value": value.into(),
            "code": code.as_str(),
        }))
    }
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    ValidationError::new(field, REQUIRED_FIELDS_MESSAGE).with_code(ErrorCode::MissingField)
}

pub(crate) fn invalid_id_error(value: &str) -> Error {
    ValidationError::new(ID, INVALID_ID_MESSAGE).with_value(ErrorCode::InvalidId, value)
}

/// Parse a path segment into a [`UserId`].
pub(crate) fn parse_user_id(raw: &str) -> Result<UserId, Error> {
    UserId::parse(raw).map_err(|err| invalid_id_error(err.value()))
}

/// Build a draft from optional request fields, reporting the first gap.
pub(crate) fn parse_draft(name: Option<&str>, email: Option<&str>) -> Result<UserDraft, Error> {
    UserDraft::try_from_parts(name, email).map_err(|err| match err {
        UserValidationError::EmptyName => missing_field_error(NAME),
        UserValidationError::EmptyEmail => missing_field_error(EMAIL),
    })
}

/// JSON extractor configuration turning body errors into domain errors.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(json_error_handler)
}

fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    warn!(error = %err, path = %req.path(), "rejected request body");
    Error::invalid_request(INVALID_JSON_MESSAGE)
        .with_details(json!({ "code": ErrorCode::InvalidJson.as_str() }))
        .into()
}
