//! End-to-end behaviour of the stateless authentication core over the
//! in-memory backend: token issuance, replay, expiry and rejection.

mod support;

use std::time::Duration;

use actix_web::http::StatusCode;
use actix_web::test::TestRequest;
use blog_backend::domain::{ErrorCode, TRACE_ID_HEADER};
use blog_backend::inbound::http::users::ACCESS_TOKEN_HEADER;
use blog_backend::test_support::InMemoryHarness;
use chrono::{TimeDelta, Utc};
use rstest::{fixture, rstest};

use support::{assert_failure, bearer, login, send, signed_in, signup};

#[fixture]
fn harness() -> InMemoryHarness {
    InMemoryHarness::default()
}

#[rstest]
#[actix_web::test]
async fn login_issues_a_token_that_can_delete_the_account(harness: InMemoryHarness) {
    signup(&harness, "ada@example.com", "ada", "pw").await;

    let reply = login(&harness, "ada@example.com", "pw").await;
    assert_eq!(reply.status, StatusCode::OK);
    assert!(reply.body.is_empty());
    let token = reply.header(ACCESS_TOKEN_HEADER).expect("access token header");

    let unlinked = send(
        &harness,
        TestRequest::delete()
            .uri("/users/unlink")
            .insert_header(bearer(&token)),
    )
    .await;
    assert_eq!(unlinked.status, StatusCode::OK);
    assert_eq!(harness.users.count().await, 0);
}

#[rstest]
#[actix_web::test]
async fn missing_header_is_rejected_by_the_gate(harness: InMemoryHarness) {
    let reply = send(&harness, TestRequest::delete().uri("/users/unlink")).await;
    assert_failure(
        &reply,
        StatusCode::UNAUTHORIZED,
        ErrorCode::TokenUnauthorized.message(),
        "/users/unlink",
    );
}

#[rstest]
#[case("Basic dXNlcjpwYXNz")]
#[case("bearer lowercase-scheme")]
#[case("Token abc")]
#[actix_web::test]
async fn other_authorization_schemes_are_treated_as_anonymous(
    harness: InMemoryHarness,
    #[case] header: &str,
) {
    let reply = send(
        &harness,
        TestRequest::post()
            .uri("/articles")
            .insert_header(("Authorization", header))
            .set_json(serde_json::json!({"title": "t", "content": "c"})),
    )
    .await;
    assert_failure(
        &reply,
        StatusCode::UNAUTHORIZED,
        ErrorCode::TokenUnauthorized.message(),
        "/articles",
    );
}

#[rstest]
#[actix_web::test]
async fn expired_token_replay_is_token_expired(harness: InMemoryHarness) {
    signup(&harness, "ada@example.com", "ada", "pw").await;
    // Issue the token two hours in the past so it expired long ago.
    harness.clock.set(Utc::now() - TimeDelta::hours(2));
    let token = login(&harness, "ada@example.com", "pw")
        .await
        .header(ACCESS_TOKEN_HEADER)
        .expect("access token header");

    let reply = send(
        &harness,
        TestRequest::delete()
            .uri("/users/unlink")
            .insert_header(bearer(&token)),
    )
    .await;
    assert_failure(
        &reply,
        StatusCode::UNAUTHORIZED,
        ErrorCode::TokenExpired.message(),
        "/users/unlink",
    );
    assert_eq!(harness.users.count().await, 1);
}

#[rstest]
#[actix_web::test]
async fn short_lived_token_expires_after_its_lifetime() {
    let harness = InMemoryHarness::with_ttl(Duration::from_secs(60));
    signup(&harness, "ada@example.com", "ada", "pw").await;
    harness.clock.set(Utc::now() - TimeDelta::seconds(62));
    let token = login(&harness, "ada@example.com", "pw")
        .await
        .header(ACCESS_TOKEN_HEADER)
        .expect("access token header");

    let reply = send(
        &harness,
        TestRequest::post()
            .uri("/articles")
            .insert_header(bearer(&token))
            .set_json(serde_json::json!({"title": "t", "content": "c"})),
    )
    .await;
    assert_eq!(reply.error().message, ErrorCode::TokenExpired.message());
}

#[rstest]
#[case(0)]
#[case(1)]
#[actix_web::test]
async fn tampered_signature_is_token_invalid(harness: InMemoryHarness, #[case] from_end: usize) {
    let token = signed_in(&harness, "ada@example.com", "ada").await;
    let mut bytes = token.into_bytes();
    let index = bytes.len() - 1 - from_end;
    bytes[index] = if bytes[index] == b'A' { b'B' } else { b'A' };
    let tampered = String::from_utf8(bytes).expect("ascii token");

    let reply = send(
        &harness,
        TestRequest::delete()
            .uri("/users/unlink")
            .insert_header(bearer(&tampered)),
    )
    .await;
    assert_failure(
        &reply,
        StatusCode::UNAUTHORIZED,
        ErrorCode::TokenInvalid.message(),
        "/users/unlink",
    );
    assert_eq!(harness.users.count().await, 1);
}

#[rstest]
#[actix_web::test]
async fn foreign_signature_is_token_invalid(harness: InMemoryHarness) {
    let token = signed_in(&harness, "ada@example.com", "ada").await;
    let (unsigned, _) = token.rsplit_once('.').expect("three segments");
    let forged = format!("{unsigned}.c2lnbmF0dXJlLWZyb20tZWxzZXdoZXJl");

    let reply = send(
        &harness,
        TestRequest::delete()
            .uri("/users/unlink")
            .insert_header(bearer(&forged)),
    )
    .await;
    assert_eq!(reply.status, StatusCode::UNAUTHORIZED);
    assert_eq!(reply.error().message, ErrorCode::TokenInvalid.message());
}

#[rstest]
#[actix_web::test]
async fn valid_token_for_a_deleted_user_reaches_the_handler(harness: InMemoryHarness) {
    let token = signed_in(&harness, "ada@example.com", "ada").await;
    let first = send(
        &harness,
        TestRequest::delete()
            .uri("/users/unlink")
            .insert_header(bearer(&token)),
    )
    .await;
    assert_eq!(first.status, StatusCode::OK);

    // The token still verifies; the handler reports the missing user.
    let second = send(
        &harness,
        TestRequest::delete()
            .uri("/users/unlink")
            .insert_header(bearer(&token)),
    )
    .await;
    assert_failure(
        &second,
        StatusCode::NOT_FOUND,
        ErrorCode::UserNotFound.message(),
        "/users/unlink",
    );
}

#[rstest]
#[actix_web::test]
async fn rejections_echo_the_trace_identifier(harness: InMemoryHarness) {
    let trace = "9f0b8c3e-5d7a-4f61-9d2b-3c4e5f6a7b8c";
    let reply = send(
        &harness,
        TestRequest::delete()
            .uri("/users/unlink")
            .insert_header(bearer("not.a.token"))
            .insert_header((TRACE_ID_HEADER, trace)),
    )
    .await;
    assert_eq!(reply.status, StatusCode::UNAUTHORIZED);
    assert_eq!(reply.header(TRACE_ID_HEADER).as_deref(), Some(trace));
}
