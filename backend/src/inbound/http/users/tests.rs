//! Tests for users API handlers.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use rstest::rstest;
use serde_json::{Value, json};

use super::*;
use crate::Trace;
use crate::domain::ports::{MockUserRepository, UserRepositoryError};
use crate::domain::{TRACE_ID_HEADER, UserId};
use crate::inbound::http::configure;
use crate::inbound::http::health::HealthState;
use crate::outbound::memory::InMemoryUserRepository;

fn test_app(
    state: HttpState,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .app_data(web::Data::new(HealthState::new()))
        .wrap(Trace)
        .configure(configure)
}

fn memory_state() -> HttpState {
    HttpState::from_repository(Arc::new(InMemoryUserRepository::default()))
}

fn mock_state(repo: MockUserRepository) -> HttpState {
    HttpState::from_repository(Arc::new(repo))
}

async fn send<S>(app: &S, request: actix_test::TestRequest) -> (StatusCode, Value)
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let response = actix_test::call_service(app, request.to_request()).await;
    let status = response.status();
    let bytes = actix_test::read_body(response).await;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("JSON body")
    };
    (status, body)
}

fn post_user(body: Value) -> actix_test::TestRequest {
    actix_test::TestRequest::post()
        .uri("/api/users")
        .set_json(body)
}

#[actix_web::test]
async fn create_list_update_delete_scenario() {
    let app = actix_test::init_service(test_app(memory_state())).await;

    let (status, ann) = send(&app, post_user(json!({"name": "Ann", "email": "ann@x.com"}))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(ann["name"], "Ann");
    assert!(ann["id"].is_i64());
    assert_eq!(ann["createdAt"], ann["updatedAt"]);

    let (status, dup) = send(&app, post_user(json!({"name": "Bo", "email": "ann@x.com"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(dup["error"], "Email already exists");
    assert_eq!(dup["code"], "conflict");

    let (status, list) = send(&app, actix_test::TestRequest::get().uri("/api/users")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list, json!([ann.clone()]));

    let id = ann["id"].as_i64().expect("numeric id");
    let (status, anne) = send(
        &app,
        actix_test::TestRequest::put()
            .uri(&format!("/api/users/{id}"))
            .set_json(json!({"name": "Anne", "email": "ann@x.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(anne["name"], "Anne");
    assert_eq!(anne["createdAt"], ann["createdAt"]);

    let (status, deleted) = send(
        &app,
        actix_test::TestRequest::delete().uri(&format!("/api/users/{id}")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted, json!({"message": "User deleted successfully"}));

    let (_, list) = send(&app, actix_test::TestRequest::get().uri("/api/users")).await;
    assert_eq!(list, json!([]));
}

#[rstest]
#[case(json!({"email": "a@x.com"}), "name")]
#[case(json!({"name": "", "email": "a@x.com"}), "name")]
#[case(json!({"name": "Ann"}), "email")]
#[case(json!({"name": "Ann", "email": "   "}), "email")]
#[actix_web::test]
async fn create_rejects_missing_fields_without_storage(#[case] body: Value, #[case] field: &str) {
    let mut repo = MockUserRepository::new();
    repo.expect_create().never();
    let app = actix_test::init_service(test_app(mock_state(repo))).await;

    let (status, error) = send(&app, post_user(body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["error"], "Name and email are required");
    assert_eq!(error["code"], "invalid_request");
    assert_eq!(error["details"]["field"], field);
}

#[rstest]
#[actix_web::test]
async fn malformed_json_is_invalid_request_with_trace_id() {
    let app = actix_test::init_service(test_app(memory_state())).await;
    let request = actix_test::TestRequest::post()
        .uri("/api/users")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"name\": ");

    let response = actix_test::call_service(&app, request.to_request()).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["error"], "Request body must be valid JSON");
    assert_eq!(body["traceId"].as_str(), header.as_deref());
}

#[rstest]
#[case("abc")]
#[case("1.5")]
#[actix_web::test]
async fn non_integer_ids_are_rejected(#[case] raw: &str) {
    let mut repo = MockUserRepository::new();
    repo.expect_update().never();
    repo.expect_delete().never();
    let app = actix_test::init_service(test_app(mock_state(repo))).await;

    let (put_status, put_body) = send(
        &app,
        actix_test::TestRequest::put()
            .uri(&format!("/api/users/{raw}"))
            .set_json(json!({"name": "Ann", "email": "ann@x.com"})),
    )
    .await;
    let (delete_status, delete_body) = send(
        &app,
        actix_test::TestRequest::delete().uri(&format!("/api/users/{raw}")),
    )
    .await;

    assert_eq!(put_status, StatusCode::BAD_REQUEST);
    assert_eq!(delete_status, StatusCode::BAD_REQUEST);
    assert_eq!(put_body["error"], "User id must be an integer");
    assert_eq!(delete_body["error"], "User id must be an integer");
}

#[rstest]
#[actix_web::test]
async fn update_and_delete_of_missing_user_return_not_found() {
    let app = actix_test::init_service(test_app(memory_state())).await;

    let (put_status, put_body) = send(
        &app,
        actix_test::TestRequest::put()
            .uri("/api/users/99")
            .set_json(json!({"name": "Ghost", "email": "ghost@x.com"})),
    )
    .await;
    let (delete_status, delete_body) = send(
        &app,
        actix_test::TestRequest::delete().uri("/api/users/99"),
    )
    .await;

    assert_eq!(put_status, StatusCode::NOT_FOUND);
    assert_eq!(put_body["error"], "User not found");
    assert_eq!(delete_status, StatusCode::NOT_FOUND);
    assert_eq!(delete_body["code"], "not_found");
}

#[rstest]
#[actix_web::test]
async fn update_to_taken_email_is_conflict() {
    let app = actix_test::init_service(test_app(memory_state())).await;
    send(&app, post_user(json!({"name": "Ann", "email": "ann@x.com"}))).await;
    let (_, bo) = send(&app, post_user(json!({"name": "Bo", "email": "bo@x.com"}))).await;

    let (status, body) = send(
        &app,
        actix_test::TestRequest::put()
            .uri(&format!("/api/users/{}", bo["id"]))
            .set_json(json!({"name": "Bo", "email": "ann@x.com"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Email already exists");
}

#[rstest]
#[actix_web::test]
async fn list_storage_failure_is_generic_500() {
    let mut repo = MockUserRepository::new();
    repo.expect_list_newest_first()
        .times(1)
        .return_once(|| Err(UserRepositoryError::connection("password authentication failed")));
    let app = actix_test::init_service(test_app(mock_state(repo))).await;

    let (status, body) = send(&app, actix_test::TestRequest::get().uri("/api/users")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to fetch users");
    assert_eq!(body["code"], "internal_error");
    assert!(!body.to_string().contains("password"));
}

#[rstest]
#[case::create(
    actix_test::TestRequest::post().uri("/api/users"),
    "Failed to create user"
)]
#[case::update(
    actix_test::TestRequest::put().uri("/api/users/1"),
    "Failed to update user"
)]
#[case::delete(
    actix_test::TestRequest::delete().uri("/api/users/1"),
    "Failed to delete user"
)]
#[actix_web::test]
async fn mutation_storage_failures_are_generic_500(
    #[case] request: actix_test::TestRequest,
    #[case] message: &str,
) {
    let mut repo = MockUserRepository::new();
    repo.expect_create()
        .returning(|_| Err(UserRepositoryError::query("syntax error")));
    repo.expect_update()
        .returning(|_, _| Err(UserRepositoryError::query("syntax error")));
    repo.expect_delete()
        .returning(|_| Err(UserRepositoryError::query("syntax error")));
    let app = actix_test::init_service(test_app(mock_state(repo))).await;

    let (status, body) = send(
        &app,
        request.set_json(json!({"name": "Ann", "email": "ann@x.com"})),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], message);
    assert!(body.get("details").is_none());
}

#[rstest]
#[actix_web::test]
async fn update_passes_parsed_id_and_trimmed_draft() {
    let mut repo = MockUserRepository::new();
    repo.expect_update()
        .withf(|id, draft| {
            *id == UserId::new(7)
                && draft.name.as_ref() == "Anne"
                && draft.email.as_ref() == "anne@x.com"
        })
        .times(1)
        .returning(|_, _| Err(UserRepositoryError::not_found(UserId::new(7))));
    let app = actix_test::init_service(test_app(mock_state(repo))).await;

    let (status, _) = send(
        &app,
        actix_test::TestRequest::put()
            .uri("/api/users/7")
            .set_json(json!({"name": " Anne ", "email": "anne@x.com "})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
