//! Comment handlers.
//!
//! ```text
//! POST   /comments      {"articleId":"<uuid>","content":"Nice post"}
//! PATCH  /comments/{id} {"content":"Edited"}
//! DELETE /comments/{id}
//! ```

use actix_web::{HttpResponse, delete, patch, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::auth::AuthenticatedUser;
use super::error::{ApiResult, ErrorResponse};
use super::state::HttpState;
use super::validation::invalid_input;
use crate::domain::ports::PublishedComment;
use crate::domain::{ArticleId, CommentBody, CommentId};

/// Body for posting a comment.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentPostRequest {
    pub article_id: ArticleId,
    #[schema(example = "Nice post")]
    pub content: String,
}

/// Body for editing a comment.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentEditRequest {
    pub content: String,
}

/// Comment as returned to clients.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub comment_id: CommentId,
    /// Email of the author.
    pub email: String,
    pub content: String,
}

impl From<PublishedComment> for CommentResponse {
    fn from(published: PublishedComment) -> Self {
        Self {
            comment_id: published.comment.id(),
            email: published.author_email.to_string(),
            content: published.comment.content().to_owned(),
        }
    }
}

/// Comment on an existing article as the caller.
#[utoipa::path(
    post,
    path = "/comments",
    request_body = CommentPostRequest,
    responses(
        (status = 200, description = "Comment created", body = CommentResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Missing or rejected token", body = ErrorResponse),
        (status = 404, description = "Article or author not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tags = ["comments"],
    operation_id = "postComment"
)]
#[post("/comments")]
pub async fn post_comment(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    payload: web::Json<CommentPostRequest>,
) -> ApiResult<web::Json<CommentResponse>> {
    let CommentPostRequest {
        article_id,
        content,
    } = payload.into_inner();
    let body = CommentBody::try_new(content).map_err(invalid_input)?;
    let published = state
        .comments
        .post(user.user_id(), article_id, body)
        .await?;
    Ok(web::Json(published.into()))
}

/// Replace the content of a comment the caller owns.
#[utoipa::path(
    patch,
    path = "/comments/{id}",
    params(("id" = String, Path, description = "Comment identifier")),
    request_body = CommentEditRequest,
    responses(
        (status = 200, description = "Comment updated", body = CommentResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Missing or rejected token", body = ErrorResponse),
        (status = 403, description = "Caller does not own the comment", body = ErrorResponse),
        (status = 404, description = "Comment not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tags = ["comments"],
    operation_id = "editComment"
)]
#[patch("/comments/{id}")]
pub async fn edit_comment(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<CommentId>,
    payload: web::Json<CommentEditRequest>,
) -> ApiResult<web::Json<CommentResponse>> {
    let body = CommentBody::try_new(payload.into_inner().content).map_err(invalid_input)?;
    let published = state
        .comments
        .edit(user.user_id(), path.into_inner(), body)
        .await?;
    Ok(web::Json(published.into()))
}

/// Delete a comment the caller owns.
#[utoipa::path(
    delete,
    path = "/comments/{id}",
    params(("id" = String, Path, description = "Comment identifier")),
    responses(
        (status = 200, description = "Comment deleted"),
        (status = 400, description = "Malformed identifier", body = ErrorResponse),
        (status = 401, description = "Missing or rejected token", body = ErrorResponse),
        (status = 403, description = "Caller does not own the comment", body = ErrorResponse),
        (status = 404, description = "Comment not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tags = ["comments"],
    operation_id = "deleteComment"
)]
#[delete("/comments/{id}")]
pub async fn delete_comment(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<CommentId>,
) -> ApiResult<HttpResponse> {
    state
        .comments
        .delete(user.user_id(), path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().finish())
}

#[cfg(test)]
#[path = "comments_tests.rs"]
mod tests;
