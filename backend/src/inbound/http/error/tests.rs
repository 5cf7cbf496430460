//! Tests for HTTP error mapping and the shared failure body.

use super::*;
use actix_web::body::to_bytes;
use chrono::TimeZone;
use rstest::{fixture, rstest};
use rstest_bdd_macros::{given, then, when};
use serde_json::Value;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5)
        .single()
        .expect("valid timestamp")
}

#[rstest]
#[case(ErrorCode::InternalServerError, 500)]
#[case(ErrorCode::MethodNotAllowed, 405)]
#[case(ErrorCode::InvalidTypeValue, 400)]
#[case(ErrorCode::InvalidInputValue, 400)]
#[case(ErrorCode::NotFound, 404)]
#[case(ErrorCode::MissingRequestParameter, 400)]
#[case(ErrorCode::UserNotFound, 404)]
#[case(ErrorCode::EmailAlreadyExists, 409)]
#[case(ErrorCode::InvalidPassword, 409)]
#[case(ErrorCode::TokenUnauthorized, 401)]
#[case(ErrorCode::AccessDenied, 401)]
#[case(ErrorCode::TokenInvalid, 401)]
#[case(ErrorCode::TokenExpired, 401)]
#[case(ErrorCode::ArticleNotFound, 404)]
#[case(ErrorCode::NoPermissionForArticle, 403)]
#[case(ErrorCode::CommentNotFound, 404)]
#[case(ErrorCode::NoPermissionForComment, 403)]
fn status_matches_taxonomy(#[case] code: ErrorCode, #[case] expected: u16) {
    assert_eq!(status_for(code).as_u16(), expected);
}

#[rstest]
#[case(StatusCode::UNAUTHORIZED, "UNAUTHORIZED")]
#[case(StatusCode::NOT_FOUND, "NOT_FOUND")]
#[case(StatusCode::METHOD_NOT_ALLOWED, "METHOD_NOT_ALLOWED")]
#[case(StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_SERVER_ERROR")]
fn status_name_is_upper_snake_case(#[case] status: StatusCode, #[case] expected: &str) {
    assert_eq!(status_name(status), expected);
}

#[rstest]
fn body_serialises_fields_in_contract_order(fixed_time: DateTime<Utc>) {
    let body = ErrorResponse::of(ErrorCode::TokenExpired, "/articles", fixed_time);
    let json = serde_json::to_string(&body).expect("serialise body");
    assert_eq!(
        json,
        format!(
            "{{\"time\":\"2026-01-02T03:04:05.000Z\",\"status\":\"UNAUTHORIZED\",\"message\":\"{}\",\"requestURI\":\"/articles\"}}",
            ErrorCode::TokenExpired.message()
        )
    );
}

async fn body_of(response: HttpResponse) -> Value {
    let bytes = to_bytes(response.into_body()).await.expect("read body");
    serde_json::from_slice(&bytes).expect("json body")
}

#[rstest]
#[actix_web::test]
async fn every_code_renders_the_same_shape() {
    for code in ErrorCode::ALL {
        let response = respond(&Error::new(code), "/somewhere");
        assert_eq!(response.status(), status_for(code));
        let body = body_of(response).await;
        let object = body.as_object().expect("object body");
        let keys: Vec<_> = object.keys().map(String::as_str).collect();
        assert_eq!(keys.len(), 4, "{code}: {keys:?}");
        for key in ["time", "status", "message", "requestURI"] {
            assert!(object.contains_key(key), "{code} is missing {key}");
        }
        assert_eq!(body["message"], code.message());
        assert_eq!(body["requestURI"], "/somewhere");
        assert_eq!(body["status"], status_name(status_for(code)));
    }
}

#[rstest]
#[actix_web::test]
async fn internal_detail_is_not_written_to_the_wire() {
    let response = respond(&Error::internal("db password is hunter2"), "/x");
    let bytes = to_bytes(response.into_body()).await.expect("read body");
    let text = std::str::from_utf8(&bytes).expect("utf8");
    assert!(!text.contains("hunter2"));
}

#[rstest]
#[actix_web::test]
async fn response_error_fallback_uses_same_shape() {
    let err = Error::new(ErrorCode::ArticleNotFound);
    let response = ResponseError::error_response(&err);
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_of(response).await;
    assert_eq!(body["status"], "NOT_FOUND");
    assert_eq!(body["requestURI"], "");
}

#[given("an error carrying a trace identifier")]
fn traced_error() -> Error {
    Error::new(ErrorCode::TokenInvalid).with_trace_id(TRACE_ID)
}

#[when("the failure responder renders it")]
fn rendered_trace_header(error: Error) -> Option<String> {
    respond(&error, "/comments")
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
}

#[then("the response echoes the trace identifier header")]
fn assert_trace_header(header: Option<String>) {
    assert_eq!(header.as_deref(), Some(TRACE_ID));
}

#[rstest]
#[actix_web::test]
async fn responder_attaches_trace_identifier() {
    let error = traced_error();
    let header = rendered_trace_header(error);
    assert_trace_header(header);
}

#[rstest]
#[actix_web::test]
async fn responder_omits_trace_header_out_of_scope() {
    let response = respond(&Error::new(ErrorCode::NotFound), "/nowhere");
    assert!(response.headers().get(TRACE_ID_HEADER).is_none());
}
