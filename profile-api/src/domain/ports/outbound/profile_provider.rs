use async_trait::async_trait;

use crate::domain::{
    models::{RemoteProfile, UserId},
    RemoteProfileError,
};

/// Read-only access to the remote profile provider. Implementations never retry.
#[async_trait]
pub trait ProfileProvider: Send + Sync + 'static {
    async fn fetch_profile(&self, user_id: &UserId) -> Result<RemoteProfile, RemoteProfileError>;

    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, RemoteProfileError>;
}
