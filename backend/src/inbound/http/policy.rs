//! Authorization gate: an ordered allow/deny list evaluated per request.
//!
//! Rules pair an optional HTTP method with a path pattern and a [`Policy`].
//! The first matching rule wins; requests that match nothing fall back to
//! [`Policy::Authenticated`]. The gate runs after bearer authentication, so
//! it only has to check whether an identity was installed.

use std::sync::Arc;
use std::task::{Context, Poll};

use actix_web::body::{EitherBody, MessageBody};
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::Method;
use actix_web::HttpMessage;
use futures_util::future::{LocalBoxFuture, Ready, ready};

use super::error::respond;
use crate::domain::{Error, ErrorCode, ResolvedIdentity};

/// What the gate does with a matching request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    /// Let the request through, identity or not.
    Permit,
    /// Require a resolved identity; otherwise `TOKEN_UNAUTHORIZED`.
    Authenticated,
    /// Refuse outright with `ACCESS_DENIED`.
    Deny,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    /// `{name}` or `*`: exactly one segment.
    Single,
    /// `**`: zero or more trailing segments.
    Rest,
}

/// Path pattern with `{param}`, `*` and trailing `**` wildcards.
///
/// # Examples
/// ```
/// use blog_backend::inbound::http::policy::PathPattern;
///
/// let pattern = PathPattern::parse("/articles/{id}");
/// assert!(pattern.matches("/articles/42"));
/// assert!(!pattern.matches("/articles/42/comments"));
/// assert!(PathPattern::parse("/**").matches("/anything/at/all"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern(Vec<Segment>);

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|segment| !segment.is_empty())
}

impl PathPattern {
    pub fn parse(pattern: &str) -> Self {
        Self(
            segments(pattern)
                .map(|segment| match segment {
                    "**" => Segment::Rest,
                    "*" => Segment::Single,
                    s if s.starts_with('{') && s.ends_with('}') => Segment::Single,
                    s => Segment::Literal(s.to_owned()),
                })
                .collect(),
        )
    }

    pub fn matches(&self, path: &str) -> bool {
        let mut parts = segments(path);
        for segment in &self.0 {
            match segment {
                Segment::Rest => return true,
                Segment::Single => {
                    if parts.next().is_none() {
                        return false;
                    }
                }
                Segment::Literal(expected) => {
                    if parts.next() != Some(expected.as_str()) {
                        return false;
                    }
                }
            }
        }
        parts.next().is_none()
    }
}

#[derive(Debug, Clone)]
struct Rule {
    method: Option<Method>,
    pattern: PathPattern,
    policy: Policy,
}

/// Ordered rule list evaluated first-match.
#[derive(Debug, Clone)]
pub struct AccessPolicy {
    rules: Vec<Rule>,
}

impl AccessPolicy {
    /// Start an empty rule list.
    pub fn builder() -> AccessPolicyBuilder {
        AccessPolicyBuilder { rules: Vec::new() }
    }

    /// Rules for the blog API: signup and login are open, everything else
    /// needs a token.
    pub fn blog() -> Self {
        Self::builder()
            .rule(Some(Method::POST), "/users/signup", Policy::Permit)
            .rule(Some(Method::POST), "/users/login", Policy::Permit)
            .rule(None, "/**", Policy::Authenticated)
            .build()
    }

    /// Policy for `method` on `path`.
    pub fn decide(&self, method: &Method, path: &str) -> Policy {
        self.rules
            .iter()
            .find(|rule| {
                rule.method.as_ref().is_none_or(|expected| expected == method)
                    && rule.pattern.matches(path)
            })
            .map_or(Policy::Authenticated, |rule| rule.policy)
    }
}

/// Builder for [`AccessPolicy`].
#[derive(Debug)]
pub struct AccessPolicyBuilder {
    rules: Vec<Rule>,
}

impl AccessPolicyBuilder {
    /// Append a rule; `None` matches any method.
    #[must_use]
    pub fn rule(mut self, method: Option<Method>, pattern: &str, policy: Policy) -> Self {
        self.rules.push(Rule {
            method,
            pattern: PathPattern::parse(pattern),
            policy,
        });
        self
    }

    pub fn build(self) -> AccessPolicy {
        AccessPolicy { rules: self.rules }
    }
}

/// Authorization gate middleware.
#[derive(Clone)]
pub struct Authorize {
    policy: Arc<AccessPolicy>,
}

impl Authorize {
    pub fn new(policy: AccessPolicy) -> Self {
        Self {
            policy: Arc::new(policy),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for Authorize
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = AuthorizeMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthorizeMiddleware {
            service,
            policy: Arc::clone(&self.policy),
        }))
    }
}

/// Service wrapper produced by [`Authorize`].
pub struct AuthorizeMiddleware<S> {
    service: S,
    policy: Arc<AccessPolicy>,
}

impl<S, B> Service<ServiceRequest> for AuthorizeMiddleware<S>
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
        let refusal = match self.policy.decide(req.method(), req.path()) {
            Policy::Permit => None,
            Policy::Authenticated if req.extensions().contains::<ResolvedIdentity>() => None,
            Policy::Authenticated => Some(ErrorCode::TokenUnauthorized),
            Policy::Deny => Some(ErrorCode::AccessDenied),
        };
        match refusal {
            Some(code) => {
                let detail = format!("{} {} refused by access policy", req.method(), req.path());
                let error = Error::new(code).with_detail(detail);
                let response = respond(&error, req.path());
                Box::pin(async move { Ok(req.into_response(response).map_into_right_body()) })
            }
            None => {
                let fut = self.service.call(req);
                Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserId;
    use crate::inbound::http::error::ErrorResponse;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test as actix_test, web};
    use rstest::rstest;

    #[rstest]
    #[case("/users/signup", "/users/signup", true)]
    #[case("/users/signup", "/users/signup/", true)]
    #[case("/users/signup", "/users/login", false)]
    #[case("/articles/{id}", "/articles/abc", true)]
    #[case("/articles/{id}", "/articles", false)]
    #[case("/comments/*", "/comments/1", true)]
    #[case("/**", "/", true)]
    #[case("/users/**", "/users/a/b", true)]
    #[case("/users/**", "/articles", false)]
    fn pattern_matching(#[case] pattern: &str, #[case] path: &str, #[case] expected: bool) {
        assert_eq!(PathPattern::parse(pattern).matches(path), expected);
    }

    #[rstest]
    #[case(Method::POST, "/users/signup", Policy::Permit)]
    #[case(Method::POST, "/users/login", Policy::Permit)]
    #[case(Method::GET, "/users/login", Policy::Authenticated)]
    #[case(Method::DELETE, "/users/unlink", Policy::Authenticated)]
    #[case(Method::POST, "/articles", Policy::Authenticated)]
    #[case(Method::GET, "/no/such/route", Policy::Authenticated)]
    fn blog_policy_decisions(#[case] method: Method, #[case] path: &str, #[case] expected: Policy) {
        assert_eq!(AccessPolicy::blog().decide(&method, path), expected);
    }

    #[rstest]
    fn first_matching_rule_wins() {
        let policy = AccessPolicy::builder()
            .rule(None, "/admin/**", Policy::Deny)
            .rule(None, "/**", Policy::Permit)
            .build();
        assert_eq!(policy.decide(&Method::GET, "/admin/users"), Policy::Deny);
        assert_eq!(policy.decide(&Method::GET, "/public"), Policy::Permit);
    }

    #[rstest]
    fn unmatched_requests_require_authentication() {
        let policy = AccessPolicy::builder().build();
        assert_eq!(policy.decide(&Method::GET, "/x"), Policy::Authenticated);
    }

    async fn gate(
        policy: AccessPolicy,
        path: &str,
        identity: bool,
    ) -> (StatusCode, Option<ErrorResponse>) {
        let app = actix_test::init_service(
            App::new()
                .wrap(Authorize::new(policy))
                .default_service(web::to(|| async { HttpResponse::Ok().finish() })),
        )
        .await;
        let req = actix_test::TestRequest::get().uri(path).to_request();
        if identity {
            req.extensions_mut()
                .insert(ResolvedIdentity::user(UserId::random()));
        }
        let res = actix_test::call_service(&app, req).await;
        let status = res.status();
        if status.is_success() {
            (status, None)
        } else {
            (status, Some(actix_test::read_body_json(res).await))
        }
    }

    #[rstest]
    #[actix_web::test]
    async fn missing_identity_is_token_unauthorized() {
        let (status, body) = gate(AccessPolicy::blog(), "/articles", false).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        let body = body.expect("error body");
        assert_eq!(body.message, ErrorCode::TokenUnauthorized.message());
        assert_eq!(body.request_uri, "/articles");
    }

    #[rstest]
    #[actix_web::test]
    async fn installed_identity_passes_the_gate() {
        let (status, body) = gate(AccessPolicy::blog(), "/articles", true).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.is_none());
    }

    #[rstest]
    #[actix_web::test]
    async fn deny_rule_is_access_denied_even_with_identity() {
        let policy = AccessPolicy::builder()
            .rule(None, "/**", Policy::Deny)
            .build();
        let (status, body) = gate(policy, "/articles", true).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(
            body.expect("error body").message,
            ErrorCode::AccessDenied.message()
        );
    }
}
