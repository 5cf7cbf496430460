//! Shared helpers for the in-process HTTP integration suites.

use actix_web::http::StatusCode;
use actix_web::http::header::{AUTHORIZATION, HeaderMap, HeaderName};
use actix_web::test::{self as actix_test, TestRequest};
use actix_web::web::Bytes;
use blog_backend::inbound::http::users::ACCESS_TOKEN_HEADER;
use blog_backend::inbound::http::{ErrorResponse, build_app};
use blog_backend::test_support::InMemoryHarness;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};

/// Password used by [`signed_in`].
pub const PASSWORD: &str = "correct horse";

/// Captured response.
#[derive(Debug)]
pub struct Reply {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl Reply {
    pub fn json<T: DeserializeOwned>(&self) -> T {
        serde_json::from_slice(&self.body).expect("json body")
    }

    pub fn error(&self) -> ErrorResponse {
        self.json()
    }

    pub fn header(&self, name: &str) -> Option<String> {
        self.headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned)
    }
}

/// Send `request` through a freshly built app over the harness stores.
pub async fn send(harness: &InMemoryHarness, request: TestRequest) -> Reply {
    let app = actix_test::init_service(build_app(harness.dependencies())).await;
    let res = actix_test::call_service(&app, request.to_request()).await;
    let status = res.status();
    let headers = res.headers().clone();
    let body = actix_test::read_body(res).await;
    Reply {
        status,
        headers,
        body,
    }
}

/// `Authorization` header presenting `token`.
pub fn bearer(token: &str) -> (HeaderName, String) {
    (AUTHORIZATION, format!("Bearer {token}"))
}

pub async fn signup(
    harness: &InMemoryHarness,
    email: &str,
    username: &str,
    password: &str,
) -> Reply {
    send(
        harness,
        TestRequest::post().uri("/users/signup").set_json(json!({
            "email": email,
            "password": password,
            "username": username,
        })),
    )
    .await
}

pub async fn login(harness: &InMemoryHarness, email: &str, password: &str) -> Reply {
    send(
        harness,
        TestRequest::post()
            .uri("/users/login")
            .set_json(json!({"email": email, "password": password})),
    )
    .await
}

/// Sign up and log in, returning the access token.
pub async fn signed_in(harness: &InMemoryHarness, email: &str, username: &str) -> String {
    let created = signup(harness, email, username, PASSWORD).await;
    assert_eq!(created.status, StatusCode::OK, "signup {email}");
    let reply = login(harness, email, PASSWORD).await;
    assert_eq!(reply.status, StatusCode::OK, "login {email}");
    reply.header(ACCESS_TOKEN_HEADER).expect("access token header")
}

/// Publish an article and return its identifier.
pub async fn post_article(harness: &InMemoryHarness, token: &str, title: &str) -> String {
    let reply = send(
        harness,
        TestRequest::post()
            .uri("/articles")
            .insert_header(bearer(token))
            .set_json(json!({"title": title, "content": "Body text"})),
    )
    .await;
    assert_eq!(reply.status, StatusCode::OK, "post article {title}");
    let body: Value = reply.json();
    body["articleId"].as_str().expect("articleId").to_owned()
}

/// Comment on `article_id` and return the comment identifier.
pub async fn post_comment(harness: &InMemoryHarness, token: &str, article_id: &str) -> String {
    let reply = send(
        harness,
        TestRequest::post()
            .uri("/comments")
            .insert_header(bearer(token))
            .set_json(json!({"articleId": article_id, "content": "Nice post"})),
    )
    .await;
    assert_eq!(reply.status, StatusCode::OK, "post comment");
    let body: Value = reply.json();
    body["commentId"].as_str().expect("commentId").to_owned()
}

/// Assert status, message and path of the uniform failure body, and that it
/// carries exactly the four wire fields.
pub fn assert_failure(reply: &Reply, status: StatusCode, message: &str, request_uri: &str) {
    assert_eq!(reply.status, status);
    let body = reply.error();
    assert_eq!(body.message, message);
    assert_eq!(body.request_uri, request_uri);
    let mut keys: Vec<String> = reply.json::<Map<String, Value>>().keys().cloned().collect();
    keys.sort_unstable();
    assert_eq!(keys, ["message", "requestURI", "status", "time"]);
}
