use async_trait::async_trait;

use crate::domain::{models::UserId, AvatarError};

#[async_trait]
pub trait AvatarService: Send + Sync + 'static {
    /// Returns the user's avatar as base64, fetching and caching it on first use.
    async fn get_avatar_base64(&self, user_id: &UserId) -> Result<String, AvatarError>;

    async fn delete_avatar(&self, user_id: &UserId) -> Result<(), AvatarError>;
}
