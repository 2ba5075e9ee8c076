use async_trait::async_trait;

use crate::domain::{
    models::{NewUserRecord, UserId, UserRecord},
    UserRecordError,
};

/// Keyed persistence for user records.
#[async_trait]
pub trait UserRecordRepository: Send + Sync + 'static {
    async fn find_by_user_id(&self, user_id: &UserId)
        -> Result<Option<UserRecord>, UserRecordError>;

    /// Fails with [`UserRecordError::Conflict`] if the id is already taken.
    async fn create(&self, record: NewUserRecord) -> Result<UserRecord, UserRecordError>;

    /// Persists profile and avatar fields. Fails with [`UserRecordError::NotFound`]
    /// if the record no longer exists.
    async fn update(&self, record: &UserRecord) -> Result<(), UserRecordError>;
}
