use async_trait::async_trait;

use crate::domain::{
    models::{NewUserRecord, RemoteProfile, UserId, UserRecord},
    UserError,
};

#[async_trait]
pub trait UserService: Send + Sync + 'static {
    async fn create_user(&self, record: NewUserRecord) -> Result<UserRecord, UserError>;

    async fn get_remote_profile(&self, user_id: &UserId) -> Result<RemoteProfile, UserError>;
}
