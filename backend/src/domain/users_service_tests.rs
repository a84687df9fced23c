//! Tests for the users service error mapping and single-call contract.

use std::sync::Arc;

use super::*;
use crate::domain::ErrorCode;
use crate::domain::ports::MockUserRepository;
use chrono::{TimeZone, Utc};
use rstest::{fixture, rstest};

fn make_service(repo: MockUserRepository) -> UsersService<MockUserRepository> {
    UsersService::new(Arc::new(repo))
}

#[fixture]
fn draft() -> UserDraft {
    UserDraft::try_from_parts(Some("Ann"), Some("ann@x.com")).expect("valid draft")
}

fn stored(id: i32, draft: &UserDraft) -> User {
    let at = Utc
        .with_ymd_and_hms(2025, 1, 2, 3, 4, 5)
        .single()
        .expect("valid timestamp");
    User::new(UserId::new(id), draft.clone(), at, at)
}

#[rstest]
#[tokio::test]
async fn list_returns_repository_order(draft: UserDraft) {
    let first = stored(2, &draft);
    let second = stored(1, &draft);
    let expected = vec![first.clone(), second.clone()];
    let mut repo = MockUserRepository::new();
    repo.expect_list_newest_first()
        .times(1)
        .return_once(move || Ok(vec![first, second]));

    let users = make_service(repo).list_users().await.expect("list succeeds");
    assert_eq!(users, expected);
}

#[rstest]
#[case(UserRepositoryError::connection("refused"))]
#[case(UserRepositoryError::query("syntax error at or near"))]
#[tokio::test]
async fn list_failures_become_generic_internal_errors(#[case] failure: UserRepositoryError) {
    let mut repo = MockUserRepository::new();
    repo.expect_list_newest_first()
        .times(1)
        .return_once(move || Err(failure));

    let err = make_service(repo).list_users().await.expect_err("list fails");
    assert_eq!(err.code(), ErrorCode::InternalError);
    assert_eq!(err.message(), "Failed to fetch users");
}

#[rstest]
#[tokio::test]
async fn create_passes_draft_through_once(draft: UserDraft) {
    let created = stored(1, &draft);
    let expected = created.clone();
    let expected_draft = draft.clone();
    let mut repo = MockUserRepository::new();
    repo.expect_create()
        .withf(move |d| *d == expected_draft)
        .times(1)
        .return_once(move |_| Ok(created));

    let user = make_service(repo).create_user(draft).await.expect("create succeeds");
    assert_eq!(user, expected);
}

#[rstest]
#[tokio::test]
async fn create_maps_conflict_to_email_exists(draft: UserDraft) {
    let mut repo = MockUserRepository::new();
    repo.expect_create()
        .times(1)
        .return_once(|_| Err(UserRepositoryError::conflict("ann@x.com")));

    let err = make_service(repo).create_user(draft).await.expect_err("conflict");
    assert_eq!(err.code(), ErrorCode::Conflict);
    assert_eq!(err.message(), "Email already exists");
}

#[rstest]
#[tokio::test]
async fn create_hides_query_detail(draft: UserDraft) {
    let mut repo = MockUserRepository::new();
    repo.expect_create()
        .times(1)
        .return_once(|_| Err(UserRepositoryError::query("relation \"users\" does not exist")));

    let err = make_service(repo).create_user(draft).await.expect_err("failure");
    assert_eq!(err.code(), ErrorCode::InternalError);
    assert_eq!(err.message(), "Failed to create user");
    assert!(err.details().is_none());
}

#[rstest]
#[case(UserRepositoryError::not_found(UserId::new(9)), ErrorCode::NotFound, "User not found")]
#[case(UserRepositoryError::conflict("ann@x.com"), ErrorCode::Conflict, "Email already exists")]
#[case(UserRepositoryError::connection("reset"), ErrorCode::InternalError, "Failed to update user")]
#[tokio::test]
async fn update_maps_repository_failures(
    draft: UserDraft,
    #[case] failure: UserRepositoryError,
    #[case] expected_code: ErrorCode,
    #[case] expected_message: &str,
) {
    let mut repo = MockUserRepository::new();
    repo.expect_update()
        .times(1)
        .return_once(move |_, _| Err(failure));

    let err = make_service(repo)
        .update_user(UserId::new(9), draft)
        .await
        .expect_err("update fails");
    assert_eq!(err.code(), expected_code);
    assert_eq!(err.message(), expected_message);
}

#[rstest]
#[tokio::test]
async fn update_targets_requested_id(draft: UserDraft) {
    let updated = stored(4, &draft);
    let expected = updated.clone();
    let mut repo = MockUserRepository::new();
    repo.expect_update()
        .withf(|id, _| *id == UserId::new(4))
        .times(1)
        .return_once(move |_, _| Ok(updated));

    let user = make_service(repo)
        .update_user(UserId::new(4), draft)
        .await
        .expect("update succeeds");
    assert_eq!(user, expected);
}

#[rstest]
#[case(UserRepositoryError::not_found(UserId::new(3)), ErrorCode::NotFound, "User not found")]
#[case(UserRepositoryError::query("deadlock"), ErrorCode::InternalError, "Failed to delete user")]
#[tokio::test]
async fn delete_maps_repository_failures(
    #[case] failure: UserRepositoryError,
    #[case] expected_code: ErrorCode,
    #[case] expected_message: &str,
) {
    let mut repo = MockUserRepository::new();
    repo.expect_delete().times(1).return_once(move |_| Err(failure));

    let err = make_service(repo)
        .delete_user(UserId::new(3))
        .await
        .expect_err("delete fails");
    assert_eq!(err.code(), expected_code);
    assert_eq!(err.message(), expected_message);
}

#[rstest]
#[tokio::test]
async fn delete_succeeds_when_repository_succeeds() {
    let mut repo = MockUserRepository::new();
    repo.expect_delete()
        .withf(|id| *id == UserId::new(3))
        .times(1)
        .return_once(|_| Ok(()));

    make_service(repo)
        .delete_user(UserId::new(3))
        .await
        .expect("delete succeeds");
}
