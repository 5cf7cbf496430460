//! Test helpers for the HTTP adapter.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::http::header::{AUTHORIZATION, HeaderMap, HeaderName};
use actix_web::test as actix_test;
use actix_web::web::Bytes;
use serde::de::DeserializeOwned;

use super::app::{AppDependencies, build_app};
use super::error::ErrorResponse;
use super::state::HttpState;
use crate::domain::ports::{
    MockAccountCommand, MockArticleCommand, MockCommentCommand, MockTokenCodec, TokenCodec,
    TokenVerificationError,
};
use crate::domain::{ResolvedIdentity, UserId};

/// Token accepted by [`codec_for`].
pub const VALID_TOKEN: &str = "valid-token";

/// `Authorization` header presenting [`VALID_TOKEN`].
pub fn bearer() -> (HeaderName, String) {
    (AUTHORIZATION, format!("Bearer {VALID_TOKEN}"))
}

/// Codec resolving [`VALID_TOKEN`] to `user` and rejecting anything else.
pub fn codec_for(user: UserId) -> Arc<dyn TokenCodec> {
    let mut codec = MockTokenCodec::new();
    codec.expect_verify().returning(move |token| {
        if token == VALID_TOKEN {
            Ok(ResolvedIdentity::user(user))
        } else {
            Err(TokenVerificationError::invalid("unknown test token"))
        }
    });
    Arc::new(codec)
}

/// Command mocks to configure before building [`HttpState`].
#[derive(Default)]
pub struct Commands {
    pub accounts: MockAccountCommand,
    pub articles: MockArticleCommand,
    pub comments: MockCommentCommand,
}

impl Commands {
    pub fn into_state(self) -> HttpState {
        HttpState::new(
            Arc::new(self.accounts),
            Arc::new(self.articles),
            Arc::new(self.comments),
        )
    }
}

/// Captured response of a request sent through the full application.
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
}

/// Send `request` through the wired application with `user` signed in via
/// [`VALID_TOKEN`].
pub async fn send(state: HttpState, user: UserId, request: actix_test::TestRequest) -> Reply {
    let deps = AppDependencies::new(state, codec_for(user));
    let app = actix_test::init_service(build_app(deps)).await;
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
