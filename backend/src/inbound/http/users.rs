//! Account handlers.
//!
//! ```text
//! POST   /users/signup {"email":"ada@example.com","password":"pw","username":"ada"}
//! POST   /users/login  {"email":"ada@example.com","password":"pw"}
//! DELETE /users/unlink
//! ```

use actix_web::{HttpResponse, delete, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::auth::AuthenticatedUser;
use super::error::{ApiResult, ErrorResponse};
use super::state::HttpState;
use super::validation::invalid_input;
use crate::domain::{LoginCredentials, SignupDetails, User};

/// Response header carrying the issued access token.
pub const ACCESS_TOKEN_HEADER: &str = "access_token";

/// Signup request body.
#[derive(Deserialize, Serialize, ToSchema)]
pub struct SignupRequest {
    #[schema(example = "ada@example.com")]
    pub email: String,
    pub password: String,
    #[schema(example = "ada")]
    pub username: String,
}

/// Public view of a newly created account.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct SignupResponse {
    pub email: String,
    pub username: String,
}

impl From<User> for SignupResponse {
    fn from(user: User) -> Self {
        Self {
            email: user.email().to_string(),
            username: user.username().to_string(),
        }
    }
}

/// Login request body.
#[derive(Deserialize, Serialize, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "ada@example.com")]
    pub email: String,
    pub password: String,
}

/// Create an account.
#[utoipa::path(
    post,
    path = "/users/signup",
    request_body = SignupRequest,
    responses(
        (status = 200, description = "Account created", body = SignupResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tags = ["users"],
    operation_id = "signup",
    security([])
)]
#[post("/users/signup")]
pub async fn signup(
    state: web::Data<HttpState>,
    payload: web::Json<SignupRequest>,
) -> ApiResult<web::Json<SignupResponse>> {
    let request = payload.into_inner();
    let details =
        SignupDetails::try_from_parts(&request.email, &request.username, &request.password)
            .map_err(invalid_input)?;
    let user = state.accounts.signup(&details).await?;
    Ok(web::Json(SignupResponse::from(user)))
}

/// Exchange credentials for an access token.
///
/// The token is returned in the `access_token` response header; the body is
/// empty.
#[utoipa::path(
    post,
    path = "/users/login",
    request_body = LoginRequest,
    responses(
        (
            status = 200,
            description = "Login success",
            headers(("access_token" = String, description = "Bearer token"))
        ),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Unknown email", body = ErrorResponse),
        (status = 409, description = "Wrong password", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/users/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let request = payload.into_inner();
    let credentials =
        LoginCredentials::try_from_parts(&request.email, &request.password).map_err(invalid_input)?;
    let token = state.accounts.login(&credentials).await?;
    Ok(HttpResponse::Ok()
        .insert_header((ACCESS_TOKEN_HEADER, token.as_str()))
        .finish())
}

/// Delete the caller's account with everything it owns.
#[utoipa::path(
    delete,
    path = "/users/unlink",
    responses(
        (status = 200, description = "Account deleted"),
        (status = 401, description = "Missing or rejected token", body = ErrorResponse),
        (status = 404, description = "Account no longer exists", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tags = ["users"],
    operation_id = "unlink"
)]
#[delete("/users/unlink")]
pub async fn unlink(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
) -> ApiResult<HttpResponse> {
    state.accounts.unlink(user.user_id()).await?;
    Ok(HttpResponse::Ok().finish())
}

#[cfg(test)]
#[path = "users_tests.rs"]
mod tests;
