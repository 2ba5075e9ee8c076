use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::fmt;

use crate::domain::{
    AvatarError, BlobStoreError, InvalidUserId, RemoteProfileError, UserError, UserRecordError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    AvatarSourceUnavailable,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<ErrorCode>,
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
    code: Option<ErrorCode>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            code: None,
        }
    }

    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }

    pub fn bad_gateway(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_GATEWAY, message)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.status, self.message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.message,
            code: self.code,
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<InvalidUserId> for ApiError {
    fn from(err: InvalidUserId) -> Self {
        Self::bad_request(err.to_string())
    }
}

impl From<RemoteProfileError> for ApiError {
    fn from(err: RemoteProfileError) -> Self {
        match err {
            RemoteProfileError::NotFound(_) => Self::not_found(err.to_string()),
            RemoteProfileError::Unavailable(ref reason) => {
                tracing::warn!("Remote profile provider unavailable: {}", reason);
                Self::bad_gateway("remote profile provider unavailable")
            }
        }
    }
}

impl From<UserRecordError> for ApiError {
    fn from(err: UserRecordError) -> Self {
        match err {
            UserRecordError::NotFound(_) => Self::not_found(err.to_string()),
            UserRecordError::Conflict(_) => Self::conflict(err.to_string()),
            UserRecordError::Storage(ref message) => {
                tracing::error!("User record storage error: {}", message);
                Self::internal("user record storage failed")
            }
        }
    }
}

impl From<BlobStoreError> for ApiError {
    fn from(err: BlobStoreError) -> Self {
        tracing::error!("Avatar file store error: {}", err);
        Self::internal("avatar storage failed")
    }
}

impl From<AvatarError> for ApiError {
    fn from(err: AvatarError) -> Self {
        match err {
            AvatarError::AvatarNotFound(_) => Self::not_found(err.to_string()),
            AvatarError::InconsistentState(ref user_id) => {
                tracing::error!(user_id = %user_id, "Avatar cache inconsistent: {}", err);
                Self::internal(err.to_string())
            }
            AvatarError::TaskFailed(ref reason) => {
                tracing::error!("Avatar task failed: {}", reason);
                Self::internal("avatar operation failed")
            }
            AvatarError::Remote(RemoteProfileError::NotFound(ref id)) => {
                Self::not_found(format!("avatar source unavailable for user {id}"))
                    .with_code(ErrorCode::AvatarSourceUnavailable)
            }
            AvatarError::Remote(e) => e.into(),
            AvatarError::Blob(e) => e.into(),
            AvatarError::Record(e) => e.into(),
        }
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::Remote(e) => e.into(),
            UserError::Record(e) => e.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::domain::models::UserId;

    fn user_id() -> UserId {
        UserId::parse("7").unwrap()
    }

    async fn body_json(err: ApiError) -> serde_json::Value {
        let response = err.into_response();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn avatar_errors_map_to_statuses() {
        let cases = [
            (AvatarError::AvatarNotFound(user_id()), StatusCode::NOT_FOUND),
            (
                AvatarError::InconsistentState(user_id()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                RemoteProfileError::Unavailable("timeout".into()).into(),
                StatusCode::BAD_GATEWAY,
            ),
            (
                AvatarError::TaskFailed("task panicked".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                BlobStoreError::NotFound(PathBuf::from("x.jpg")).into(),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                UserRecordError::Conflict(user_id()).into(),
                StatusCode::CONFLICT,
            ),
            (
                UserRecordError::storage("pool closed").into(),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(ApiError::from(err).status(), expected);
        }
    }

    #[tokio::test]
    async fn remote_not_found_on_avatar_route_carries_code() {
        let err: ApiError = AvatarError::from(RemoteProfileError::NotFound("7".into())).into();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);

        let body = body_json(err).await;
        assert_eq!(body["code"], "AVATAR_SOURCE_UNAVAILABLE");
    }

    #[tokio::test]
    async fn remote_not_found_on_profile_lookup_is_plain_404() {
        let err: ApiError = UserError::from(RemoteProfileError::NotFound("7".into())).into();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);

        let body = body_json(err).await;
        assert!(body.get("code").is_none());
        assert_eq!(body["error"], "remote profile not found: 7");
    }

    #[test]
    fn invalid_user_id_is_bad_request() {
        assert_eq!(ApiError::from(InvalidUserId).status(), StatusCode::BAD_REQUEST);
    }
}
