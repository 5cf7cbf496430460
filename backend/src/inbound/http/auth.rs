//! Bearer-token authentication middleware and the caller-identity extractor.
//!
//! For every request the middleware looks at `Authorization`. A missing header
//! or one that does not start with `Bearer ` leaves the request anonymous and
//! lets the authorization gate decide. A presented token is verified once;
//! success installs a [`ResolvedIdentity`] in the request extensions and any
//! failure short-circuits with `TOKEN_EXPIRED` or `TOKEN_INVALID` before a
//! handler runs.

use std::sync::Arc;
use std::task::{Context, Poll};

use actix_web::body::{EitherBody, MessageBody};
use actix_web::dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{AUTHORIZATION, HeaderMap};
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use futures_util::future::{LocalBoxFuture, Ready, ready};

use super::error::respond;
use crate::domain::ports::TokenCodec;
use crate::domain::{Error, ErrorCode, ResolvedIdentity, UserId};

const BEARER_PREFIX: &str = "Bearer ";

/// Extract the raw token from `Authorization: Bearer <token>`.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix(BEARER_PREFIX)
}

/// Authentication middleware backed by a [`TokenCodec`].
#[derive(Clone)]
pub struct BearerAuthentication {
    codec: Arc<dyn TokenCodec>,
}

impl BearerAuthentication {
    pub fn new(codec: Arc<dyn TokenCodec>) -> Self {
        Self { codec }
    }
}

impl<S, B> Transform<S, ServiceRequest> for BearerAuthentication
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = BearerAuthenticationMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(BearerAuthenticationMiddleware {
            service,
            codec: Arc::clone(&self.codec),
        }))
    }
}

/// Service wrapper produced by [`BearerAuthentication`].
pub struct BearerAuthenticationMiddleware<S> {
    service: S,
    codec: Arc<dyn TokenCodec>,
}

impl<S, B> Service<ServiceRequest> for BearerAuthenticationMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let verdict = bearer_token(req.headers()).map(|token| self.codec.verify(token));
        match verdict {
            Some(Err(rejection)) => {
                let error = Error::new(rejection.code()).with_detail(rejection.to_string());
                let response = respond(&error, req.path());
                Box::pin(async move { Ok(req.into_response(response).map_into_right_body()) })
            }
            Some(Ok(identity)) => {
                req.extensions_mut().insert(identity);
                let fut = self.service.call(req);
                Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
            }
            None => {
                let fut = self.service.call(req);
                Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
            }
        }
    }
}

/// Identity of the authenticated caller, taken from the request extensions.
///
/// Handlers on authenticated routes take this as an argument. Extraction fails
/// with `TOKEN_UNAUTHORIZED` when no identity was installed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser(ResolvedIdentity);

impl AuthenticatedUser {
    pub fn user_id(&self) -> UserId {
        self.0.user_id()
    }

    pub fn identity(&self) -> &ResolvedIdentity {
        &self.0
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let identity = req.extensions().get::<ResolvedIdentity>().cloned();
        ready(identity.map(Self).ok_or_else(|| {
            Error::new(ErrorCode::TokenUnauthorized).with_detail("no resolved identity on request")
        }))
    }
}
