//! Users API handlers.
//!
//! ```text
//! GET    /api/users
//! POST   /api/users        {"name":"Ann","email":"ann@x.com"}
//! PUT    /api/users/{id}   {"name":"Anne","email":"ann@x.com"}
//! DELETE /api/users/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::User;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, UserSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{parse_draft, parse_user_id};

const USER_DELETED_MESSAGE: &str = "User deleted successfully";

/// Request body for create and update.
///
/// Both fields are optional at the wire level so a missing field yields the
/// same `invalid_request` error as a blank one.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct UserRequest {
    #[schema(example = "Ann")]
    #[serde(default)]
    pub name: Option<String>,
    #[schema(example = "ann@x.com")]
    #[serde(default)]
    pub email: Option<String>,
}

/// Acknowledgement returned by `DELETE /api/users/{id}`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct DeleteUserResponse {
    #[schema(example = "User deleted successfully")]
    pub message: String,
}

/// List every user, newest first.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use user_directory::inbound::http::users::list_users;
///
/// let app = App::new().service(list_users);
/// ```
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "Users ordered by createdAt descending", body = [UserSchema]),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<User>>> {
    let users = state.users_query.list_users().await?;
    Ok(web::Json(users))
}

/// Create a user.
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = UserRequest,
    responses(
        (status = 201, description = "Created user", body = UserSchema),
        (status = 400, description = "Missing field, malformed body, or duplicate email", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<UserRequest>,
) -> ApiResult<HttpResponse> {
    let request = payload.into_inner();
    let draft = parse_draft(request.name.as_deref(), request.email.as_deref())?;
    let user = state.users_command.create_user(draft).await?;
    Ok(HttpResponse::Created().json(user))
}

/// Replace a user's name and email.
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    request_body = UserRequest,
    params(
        ("id" = i32, Path, description = "User identifier")
    ),
    responses(
        (status = 200, description = "Updated user", body = UserSchema),
        (status = 400, description = "Invalid id, missing field, or duplicate email", body = ErrorSchema),
        (status = 404, description = "User not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/users/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UserRequest>,
) -> ApiResult<web::Json<User>> {
    let id = parse_user_id(&path.into_inner())?;
    let request = payload.into_inner();
    let draft = parse_draft(request.name.as_deref(), request.email.as_deref())?;
    let user = state.users_command.update_user(id, draft).await?;
    Ok(web::Json(user))
}

/// Permanently remove a user.
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(
        ("id" = i32, Path, description = "User identifier")
    ),
    responses(
        (status = 200, description = "User deleted", body = DeleteUserResponse),
        (status = 400, description = "Invalid id", body = ErrorSchema),
        (status = 404, description = "User not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<DeleteUserResponse>> {
    let id = parse_user_id(&path.into_inner())?;
    state.users_command.delete_user(id).await?;
    Ok(web::Json(DeleteUserResponse {
        message: USER_DELETED_MESSAGE.to_owned(),
    }))
}

#[cfg(test)]
mod tests;
