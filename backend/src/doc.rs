//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every users endpoint and the health probes, plus the
//! schema wrappers ([`ErrorSchema`], [`ErrorCodeSchema`], [`UserSchema`])
//! that describe domain types without coupling them to utoipa.
//!
//! The generated document backs Swagger UI (debug builds) and is printed by
//! the `openapi-dump` binary.

use utoipa::OpenApi;

use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema, UserSchema};
use crate::inbound::http::users::{DeleteUserResponse, UserRequest};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "User directory API",
        description = "Create, list, update, and delete directory users."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        UserSchema,
        ErrorSchema,
        ErrorCodeSchema,
        UserRequest,
        DeleteUserResponse
    )),
    tags(
        (name = "users", description = "Directory user management"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
