use std::path::PathBuf;

use thiserror::Error;

use super::models::UserId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("user id must not be empty")]
pub struct InvalidUserId;

/// Errors from the content-addressed avatar file store.
#[derive(Debug, Error)]
pub enum BlobStoreError {
    #[error("blob not found at {}", .0.display())]
    NotFound(PathBuf),
    #[error("blob storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from the remote profile provider.
///
/// `NotFound` means the provider does not know the identifier. It is kept apart
/// from every local not-found condition so the HTTP layer can report it as an
/// unavailable avatar source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteProfileError {
    #[error("remote profile not found: {0}")]
    NotFound(String),
    #[error("remote profile provider unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Error)]
pub enum UserRecordError {
    #[error("user record not found: {0}")]
    NotFound(UserId),
    #[error("user record already exists: {0}")]
    Conflict(UserId),
    #[error("user record storage failed: {0}")]
    Storage(String),
}

impl UserRecordError {
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }
}

/// Errors surfaced by the avatar cache.
#[derive(Debug, Error)]
pub enum AvatarError {
    #[error("avatar not found for user {0}")]
    AvatarNotFound(UserId),
    #[error("User {0} exists but avatar file is missing")]
    InconsistentState(UserId),
    #[error("avatar task failed: {0}")]
    TaskFailed(String),
    #[error(transparent)]
    Remote(#[from] RemoteProfileError),
    #[error(transparent)]
    Blob(#[from] BlobStoreError),
    #[error(transparent)]
    Record(#[from] UserRecordError),
}

/// Errors surfaced by user record management.
#[derive(Debug, Error)]
pub enum UserError {
    #[error(transparent)]
    Remote(#[from] RemoteProfileError),
    #[error(transparent)]
    Record(#[from] UserRecordError),
}
