use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, instrument};

use crate::domain::{
    models::{NewUserRecord, RemoteProfile, UserId, UserRecord},
    ports::{
        inbound::UserService,
        outbound::{ProfileProvider, UserRecordRepository},
    },
    UserError,
};

pub struct UserServiceImpl<R, P> {
    records: Arc<R>,
    provider: Arc<P>,
}

impl<R, P> UserServiceImpl<R, P> {
    pub fn new(records: Arc<R>, provider: Arc<P>) -> Self {
        Self { records, provider }
    }
}

#[async_trait]
impl<R: UserRecordRepository, P: ProfileProvider> UserService for UserServiceImpl<R, P> {
    #[instrument(skip(self, record), fields(user_id = %record.user_id))]
    async fn create_user(&self, record: NewUserRecord) -> Result<UserRecord, UserError> {
        let user = self.records.create(record).await?;

        // Notifications are not wired up; the log line stands in for them.
        info!(
            email = user.email.as_deref().unwrap_or_default(),
            "user created, welcome email and user-created event skipped"
        );

        Ok(user)
    }

    async fn get_remote_profile(&self, user_id: &UserId) -> Result<RemoteProfile, UserError> {
        Ok(self.provider.fetch_profile(user_id).await?)
    }
}
