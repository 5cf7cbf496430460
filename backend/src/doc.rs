//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every handler under `/users`, `/articles` and
//! `/comments`, the request and response bodies, the uniform
//! [`ErrorResponse`](crate::inbound::http::ErrorResponse) and the bearer
//! token security scheme. The document is exported by
//! `cargo run --bin openapi-dump`.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::ErrorCode;
use crate::inbound::http::articles::{ArticleRequest, ArticleResponse};
use crate::inbound::http::comments::{CommentEditRequest, CommentPostRequest, CommentResponse};
use crate::inbound::http::error::ErrorResponse;
use crate::inbound::http::users::{LoginRequest, SignupRequest, SignupResponse};

/// Name of the bearer security scheme in the document.
pub const BEARER_SCHEME: &str = "BearerToken";

/// Enrich the generated document with the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            BEARER_SCHEME,
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("Token from the `access_token` login response header."))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Blog backend API",
        description = "Accounts, articles and comments behind bearer-token authentication."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerToken" = [])),
    paths(
        crate::inbound::http::users::signup,
        crate::inbound::http::users::login,
        crate::inbound::http::users::unlink,
        crate::inbound::http::articles::post_article,
        crate::inbound::http::articles::edit_article,
        crate::inbound::http::articles::delete_article,
        crate::inbound::http::comments::post_comment,
        crate::inbound::http::comments::edit_comment,
        crate::inbound::http::comments::delete_comment,
    ),
    components(schemas(
        ErrorResponse,
        ErrorCode,
        SignupRequest,
        SignupResponse,
        LoginRequest,
        ArticleRequest,
        ArticleResponse,
        CommentPostRequest,
        CommentEditRequest,
        CommentResponse,
    )),
    tags(
        (name = "users", description = "Signup, login and account deletion"),
        (name = "articles", description = "Articles owned by the caller"),
        (name = "comments", description = "Comments owned by the caller")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    fn error_response_schema_has_the_wire_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let schema = schemas.get("ErrorResponse").expect("ErrorResponse schema");
        for field in ["time", "status", "message", "requestURI"] {
            assert_object_schema_has_field(schema, field);
        }
    }

    #[rstest]
    #[case("/users/signup")]
    #[case("/users/login")]
    #[case("/users/unlink")]
    #[case("/articles")]
    #[case("/articles/{id}")]
    #[case("/comments")]
    #[case("/comments/{id}")]
    fn every_route_is_documented(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing path {path}");
    }

    #[rstest]
    fn bearer_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key(BEARER_SCHEME));
    }
}
