//! Helpers shared by the account, article and comment services.

use crate::domain::ports::{
    ArticlePersistenceError, CommentPersistenceError, UserPersistenceError, UserRepository,
};
use crate::domain::{Error, ErrorCode, User, UserId};

pub(crate) fn map_user_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::internal(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::EmailTaken { email } => {
            Error::new(ErrorCode::EmailAlreadyExists).with_detail(format!("email {email}"))
        }
    }
}

pub(crate) fn map_article_error(error: ArticlePersistenceError) -> Error {
    match error {
        ArticlePersistenceError::Connection { message } => {
            Error::internal(format!("article repository unavailable: {message}"))
        }
        ArticlePersistenceError::Query { message } => {
            Error::internal(format!("article repository error: {message}"))
        }
    }
}

pub(crate) fn map_comment_error(error: CommentPersistenceError) -> Error {
    match error {
        CommentPersistenceError::Connection { message } => {
            Error::internal(format!("comment repository unavailable: {message}"))
        }
        CommentPersistenceError::Query { message } => {
            Error::internal(format!("comment repository error: {message}"))
        }
    }
}

/// Load the acting user, reporting `USER_NOT_FOUND` when the token subject no
/// longer has an account.
pub(crate) async fn require_user<U>(users: &U, id: UserId) -> Result<User, Error>
where
    U: UserRepository + ?Sized,
{
    users
        .find_by_id(&id)
        .await
        .map_err(map_user_error)?
        .ok_or_else(|| Error::new(ErrorCode::UserNotFound).with_detail(format!("user {id}")))
}
