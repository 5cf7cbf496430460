//! Article handlers.
//!
//! ```text
//! POST   /articles      {"title":"Hello","content":"First post"}
//! PATCH  /articles/{id} {"title":"Hello","content":"Edited"}
//! DELETE /articles/{id}
//! ```

use actix_web::{HttpResponse, delete, patch, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::auth::AuthenticatedUser;
use super::error::{ApiResult, ErrorResponse};
use super::state::HttpState;
use super::validation::invalid_input;
use crate::domain::ports::PublishedArticle;
use crate::domain::{ArticleDraft, ArticleId, ContentValidationError};

/// Title and content of an article.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ArticleRequest {
    #[schema(example = "Hello")]
    pub title: String,
    #[schema(example = "First post")]
    pub content: String,
}

impl TryFrom<ArticleRequest> for ArticleDraft {
    type Error = ContentValidationError;

    fn try_from(value: ArticleRequest) -> Result<Self, Self::Error> {
        Self::try_new(value.title, value.content)
    }
}

/// Article as returned to clients.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ArticleResponse {
    pub article_id: ArticleId,
    /// Email of the author.
    pub email: String,
    pub title: String,
    pub content: String,
}

impl From<PublishedArticle> for ArticleResponse {
    fn from(published: PublishedArticle) -> Self {
        let PublishedArticle {
            article,
            author_email,
        } = published;
        Self {
            article_id: article.id(),
            email: author_email.to_string(),
            title: article.title().to_owned(),
            content: article.content().to_owned(),
        }
    }
}

/// Publish an article as the caller.
#[utoipa::path(
    post,
    path = "/articles",
    request_body = ArticleRequest,
    responses(
        (status = 200, description = "Article created", body = ArticleResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Missing or rejected token", body = ErrorResponse),
        (status = 404, description = "Author no longer exists", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tags = ["articles"],
    operation_id = "postArticle"
)]
#[post("/articles")]
pub async fn post_article(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    payload: web::Json<ArticleRequest>,
) -> ApiResult<web::Json<ArticleResponse>> {
    let draft = ArticleDraft::try_from(payload.into_inner()).map_err(invalid_input)?;
    let published = state.articles.post(user.user_id(), draft).await?;
    Ok(web::Json(published.into()))
}

/// Replace the title and content of an article the caller owns.
#[utoipa::path(
    patch,
    path = "/articles/{id}",
    params(("id" = String, Path, description = "Article identifier")),
    request_body = ArticleRequest,
    responses(
        (status = 200, description = "Article updated", body = ArticleResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Missing or rejected token", body = ErrorResponse),
        (status = 403, description = "Caller does not own the article", body = ErrorResponse),
        (status = 404, description = "Article not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tags = ["articles"],
    operation_id = "editArticle"
)]
#[patch("/articles/{id}")]
pub async fn edit_article(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<ArticleId>,
    payload: web::Json<ArticleRequest>,
) -> ApiResult<web::Json<ArticleResponse>> {
    let draft = ArticleDraft::try_from(payload.into_inner()).map_err(invalid_input)?;
    let published = state
        .articles
        .edit(user.user_id(), path.into_inner(), draft)
        .await?;
    Ok(web::Json(published.into()))
}

/// Delete an article the caller owns, with its comments.
#[utoipa::path(
    delete,
    path = "/articles/{id}",
    params(("id" = String, Path, description = "Article identifier")),
    responses(
        (status = 200, description = "Article deleted"),
        (status = 400, description = "Malformed identifier", body = ErrorResponse),
        (status = 401, description = "Missing or rejected token", body = ErrorResponse),
        (status = 403, description = "Caller does not own the article", body = ErrorResponse),
        (status = 404, description = "Article not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tags = ["articles"],
    operation_id = "deleteArticle"
)]
#[delete("/articles/{id}")]
pub async fn delete_article(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<ArticleId>,
) -> ApiResult<HttpResponse> {
    state
        .articles
        .delete(user.user_id(), path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().finish())
}

#[cfg(test)]
#[path = "articles_tests.rs"]
mod tests;
