//! Middleware routing every failure through [`respond`].
//!
//! Handlers return `Result<_, Error>` and extractors fail with framework
//! errors; both surface here either as a response carrying an attached error
//! or as an `Err` from the inner service. An `Err` is re-raised with the
//! rendered body attached, so either way the client receives the
//! uniform [`ErrorResponse`](super::error::ErrorResponse) body with the
//! request path filled in, and the failure is logged exactly once.

use std::task::{Context, Poll};

use actix_web::body::{EitherBody, MessageBody};
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::error::InternalError;
use actix_web::http::StatusCode;
use futures_util::future::{LocalBoxFuture, Ready, ready};

use super::error::respond;
use crate::domain::{Error, ErrorCode};

/// Map any framework error onto the taxonomy.
///
/// Domain errors pass through untouched; other errors are classified by the
/// status the framework would have used.
pub fn classify(error: &actix_web::Error) -> Error {
    if let Some(domain) = error.as_error::<Error>() {
        return domain.clone();
    }
    let code = match error.as_response_error().status_code() {
        StatusCode::NOT_FOUND => ErrorCode::NotFound,
        StatusCode::METHOD_NOT_ALLOWED => ErrorCode::MethodNotAllowed,
        StatusCode::BAD_REQUEST
        | StatusCode::PAYLOAD_TOO_LARGE
        | StatusCode::UNSUPPORTED_MEDIA_TYPE => ErrorCode::InvalidInputValue,
        _ => ErrorCode::InternalServerError,
    };
    Error::new(code).with_detail(error.to_string())
}

/// Failure responder middleware.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use blog_backend::inbound::http::responder::FailureResponder;
///
/// let _app = App::new().wrap(FailureResponder);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct FailureResponder;

impl<S, B> Transform<S, ServiceRequest> for FailureResponder
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = FailureResponderMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(FailureResponderMiddleware { service }))
    }
}

/// Service wrapper produced by [`FailureResponder`].
pub struct FailureResponderMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for FailureResponderMiddleware<S>
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
        // The request itself must not be retained here: the router needs sole
        // ownership of it to fill in path parameters.
        let path = req.path().to_owned();
        let fut = self.service.call(req);
        Box::pin(async move {
            match fut.await {
                Ok(res) => match res.response().error().map(classify) {
                    Some(error) => {
                        let rendered = respond(&error, &path);
                        Ok(res.into_response(rendered).map_into_right_body())
                    }
                    None => Ok(res.map_into_left_body()),
                },
                Err(err) => {
                    let error = classify(&err);
                    let rendered = respond(&error, &path);
                    Err(InternalError::from_response(error, rendered).into())
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::error::ErrorResponse;
    use actix_web::{App, HttpResponse, error, test as actix_test, web};
    use rstest::rstest;

    async fn call(
        handler_path: &str,
        uri: &str,
        handler: fn() -> Result<HttpResponse, actix_web::Error>,
    ) -> (StatusCode, ErrorResponse) {
        let app = actix_test::init_service(
            App::new()
                .wrap(FailureResponder)
                .route(handler_path, web::get().to(move || async move { handler() })),
        )
        .await;
        let req = actix_test::TestRequest::get().uri(uri).to_request();
        let res = actix_test::call_service(&app, req).await;
        let status = res.status();
        let body: ErrorResponse = actix_test::read_body_json(res).await;
        (status, body)
    }

    #[rstest]
    #[actix_web::test]
    async fn domain_errors_gain_the_request_path() {
        let (status, body) = call("/articles/{id}", "/articles/7", || {
            Err(Error::new(ErrorCode::NoPermissionForArticle).into())
        })
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body.status, "FORBIDDEN");
        assert_eq!(body.request_uri, "/articles/7");
        assert_eq!(body.message, ErrorCode::NoPermissionForArticle.message());
    }

    #[rstest]
    #[actix_web::test]
    async fn foreign_errors_are_classified() {
        let (status, body) = call("/boom", "/boom", || {
            Err(error::ErrorInternalServerError("secret detail"))
        })
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.status, "INTERNAL_SERVER_ERROR");
        assert_eq!(body.message, ErrorCode::InternalServerError.message());
    }

    #[rstest]
    #[actix_web::test]
    async fn errors_raised_by_inner_middleware_keep_the_path() {
        let app = actix_test::init_service(
            App::new()
                .wrap_fn(|_req, _srv| async {
                    Err::<ServiceResponse, _>(error::ErrorPayloadTooLarge("too big"))
                })
                .wrap(FailureResponder)
                .route("/articles", web::post().to(|| async { HttpResponse::Ok().finish() })),
        )
        .await;
        let req = actix_test::TestRequest::post().uri("/articles").to_request();
        let Err(err) = actix_test::try_call_service(&app, req).await else {
            panic!("inner error should propagate");
        };
        let res = err.error_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let bytes = actix_web::body::to_bytes(res.into_body())
            .await
            .expect("read body");
        let body: ErrorResponse = serde_json::from_slice(&bytes).expect("error body");
        assert_eq!(body.status, "BAD_REQUEST");
        assert_eq!(body.message, ErrorCode::InvalidInputValue.message());
        assert_eq!(body.request_uri, "/articles");
    }

    #[rstest]
    #[case(error::ErrorNotFound("x"), ErrorCode::NotFound)]
    #[case(error::ErrorMethodNotAllowed("x"), ErrorCode::MethodNotAllowed)]
    #[case(error::ErrorBadRequest("x"), ErrorCode::InvalidInputValue)]
    #[case(error::ErrorServiceUnavailable("x"), ErrorCode::InternalServerError)]
    fn classifies_by_framework_status(#[case] err: actix_web::Error, #[case] expected: ErrorCode) {
        assert_eq!(classify(&err).code(), expected);
    }

    #[rstest]
    #[actix_web::test]
    async fn successful_responses_pass_through() {
        let app = actix_test::init_service(
            App::new()
                .wrap(FailureResponder)
                .route("/", web::get().to(|| async { HttpResponse::Ok().body("fine") })),
        )
        .await;
        let req = actix_test::TestRequest::get().uri("/").to_request();
        let res = actix_test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(actix_test::read_body(res).await, "fine");
    }
}
