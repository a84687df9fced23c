//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. This
//! module provides the schema definitions required for OpenAPI documentation
//! using utoipa's external schema registration.
//!
//! The schema wrappers mirror the serialised shape of their corresponding
//! domain types but live in the inbound adapter layer where framework
//! concerns belong.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
///
/// Stable machine-readable error codes returned in API error responses.
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// The email address is already taken. Served as HTTP 400.
    #[schema(rename = "conflict")]
    Conflict,
    /// The requested user does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Human-readable message shown to end users.
    #[schema(example = "Email already exists")]
    error: String,
    /// Stable machine-readable error code.
    #[schema(example = "conflict")]
    code: ErrorCodeSchema,
    /// Correlation identifier matching the `trace-id` response header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary error details for clients.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::User`].
#[derive(ToSchema)]
#[schema(as = crate::domain::User, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UserSchema {
    /// Auto-incremented identifier.
    #[schema(example = 1)]
    id: i32,
    #[schema(example = "Ada Lovelace")]
    name: String,
    /// Unique across all users.
    #[schema(example = "ada@example.com")]
    email: String,
    #[schema(value_type = String, format = DateTime)]
    created_at: String,
    #[schema(value_type = String, format = DateTime)]
    updated_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::PartialSchema;

    fn schema_to_json<T: PartialSchema>() -> String {
        serde_json::to_string(&T::schema()).expect("schema serialises to JSON")
    }

    #[rstest]
    fn error_code_schema_lists_every_code() {
        let schema_json = schema_to_json::<ErrorCodeSchema>();
        assert_eq!(ErrorCodeSchema::name(), "crate.domain.ErrorCode");
        for code in ["invalid_request", "conflict", "not_found", "internal_error"] {
            assert!(schema_json.contains(code), "missing {code}");
        }
    }

    #[rstest]
    fn error_schema_uses_wire_field_names() {
        let schema_json = schema_to_json::<ErrorSchema>();
        assert_eq!(ErrorSchema::name(), "crate.domain.Error");
        assert!(schema_json.contains("\"error\""));
        assert!(schema_json.contains("traceId"));
        assert!(!schema_json.contains("trace_id"));
    }

    #[rstest]
    fn user_schema_uses_camel_case_timestamps() {
        let schema_json = schema_to_json::<UserSchema>();
        assert_eq!(UserSchema::name(), "crate.domain.User");
        assert!(schema_json.contains("createdAt"));
        assert!(schema_json.contains("updatedAt"));
        assert!(schema_json.contains("date-time"));
    }
}
