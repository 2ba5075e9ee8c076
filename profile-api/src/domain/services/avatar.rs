use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info, instrument, warn, Instrument};

use crate::domain::{
    models::{CachedAvatar, NewUserRecord, RemoteProfile, UserId, UserRecord},
    ports::{
        inbound::AvatarService,
        outbound::{BlobStore, ProfileProvider, UserRecordRepository},
    },
    AvatarError, BlobStoreError, UserRecordError,
};

use super::UserLocks;

/// Lazily fetches avatars from the profile provider and serves them from the
/// local file store afterwards.
///
/// Every operation runs under the lock from [`UserLocks`] of the record it
/// touches, so concurrent requests for an uncached avatar trigger a single
/// download: the first caller fills the cache and the others find it filled
/// once they get the lock. Operations run on their own task and finish even
/// when the caller goes away.
pub struct AvatarServiceImpl<R, B, P> {
    records: Arc<R>,
    blobs: Arc<B>,
    provider: Arc<P>,
    locks: Arc<UserLocks>,
}

impl<R, B, P> AvatarServiceImpl<R, B, P> {
    pub fn new(records: Arc<R>, blobs: Arc<B>, provider: Arc<P>) -> Self {
        Self {
            records,
            blobs,
            provider,
            locks: Arc::new(UserLocks::new()),
        }
    }
}

impl<R, B, P> Clone for AvatarServiceImpl<R, B, P> {
    fn clone(&self) -> Self {
        Self {
            records: Arc::clone(&self.records),
            blobs: Arc::clone(&self.blobs),
            provider: Arc::clone(&self.provider),
            locks: Arc::clone(&self.locks),
        }
    }
}

impl<R, B, P> AvatarServiceImpl<R, B, P>
where
    R: UserRecordRepository,
    B: BlobStore,
    P: ProfileProvider,
{
    async fn load_or_fill(&self, user_id: &UserId) -> Result<Vec<u8>, AvatarError> {
        let guard = self.locks.lock(user_id).await;

        if let Some(record) = self.records.find_by_user_id(user_id).await? {
            return self.serve_or_fill(record, None).await;
        }

        info!("user not known locally, fetching profile");
        let profile = self.provider.fetch_profile(user_id).await?;
        if profile.id == *user_id {
            return self.create_from_profile(&profile).await;
        }

        // The provider knows this user under another id. Only that id's record
        // is written, so continue under its lock. One lock at a time.
        drop(guard);
        info!(remote_id = %profile.id, "remote profile uses a different id");
        let _guard = self.locks.lock(&profile.id).await;

        match self.records.find_by_user_id(&profile.id).await? {
            Some(record) => self.serve_or_fill(record, Some(profile)).await,
            None => self.create_from_profile(&profile).await,
        }
    }

    /// Serves a cached avatar, or downloads one into an existing record.
    async fn serve_or_fill(
        &self,
        mut record: UserRecord,
        profile: Option<RemoteProfile>,
    ) -> Result<Vec<u8>, AvatarError> {
        if let Some(avatar) = &record.avatar {
            return self.read_cached(&record.user_id, avatar).await;
        }

        info!(user_id = %record.user_id, "user has no avatar yet, fetching it");
        let profile = match profile {
            Some(profile) => profile,
            None => self.provider.fetch_profile(&record.user_id).await?,
        };
        let (avatar, bytes) = self.download_avatar(&profile).await?;

        record.avatar = Some(avatar);
        self.records.update(&record).await?;
        Ok(bytes)
    }

    async fn read_cached(
        &self,
        user_id: &UserId,
        avatar: &CachedAvatar,
    ) -> Result<Vec<u8>, AvatarError> {
        if !self.blobs.exists(&avatar.file_path).await {
            error!(
                path = %avatar.file_path.display(),
                "user record references a missing avatar file"
            );
            return Err(AvatarError::InconsistentState(user_id.clone()));
        }

        match self.blobs.get(&avatar.file_path).await {
            Ok(bytes) => Ok(bytes),
            Err(BlobStoreError::NotFound(path)) => {
                error!(path = %path.display(), "avatar file vanished while reading");
                Err(AvatarError::InconsistentState(user_id.clone()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Downloads the profile's avatar and stores it. Nothing is persisted when
    /// the download fails.
    async fn download_avatar(
        &self,
        profile: &RemoteProfile,
    ) -> Result<(CachedAvatar, Vec<u8>), AvatarError> {
        let bytes = self.provider.fetch_bytes(&profile.avatar_url).await?;
        let blob = self.blobs.put(&bytes).await?;

        info!(
            user_id = %profile.id,
            content_hash = %blob.content_hash,
            path = %blob.path.display(),
            "stored avatar"
        );

        Ok((CachedAvatar::new(profile.avatar_url.clone(), blob), bytes))
    }

    /// Creates the record for a user we have never seen. A record created in
    /// the meantime through the user endpoint gets the avatar instead.
    async fn create_from_profile(&self, profile: &RemoteProfile) -> Result<Vec<u8>, AvatarError> {
        let (avatar, bytes) = self.download_avatar(profile).await?;
        let new_record = NewUserRecord::from_profile(profile, avatar.clone());

        match self.records.create(new_record).await {
            Ok(_) => Ok(bytes),
            Err(UserRecordError::Conflict(existing_id)) => {
                warn!(
                    user_id = %existing_id,
                    "record was created concurrently, updating it instead"
                );
                let mut record = self
                    .records
                    .find_by_user_id(&existing_id)
                    .await?
                    .ok_or(UserRecordError::NotFound(existing_id))?;
                record.avatar = Some(avatar);
                self.records.update(&record).await?;
                Ok(bytes)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn remove(&self, user_id: &UserId) -> Result<(), AvatarError> {
        let _guard = self.locks.lock(user_id).await;

        let mut record = self
            .records
            .find_by_user_id(user_id)
            .await?
            .ok_or_else(|| AvatarError::AvatarNotFound(user_id.clone()))?;

        let avatar = record
            .avatar
            .take()
            .ok_or_else(|| AvatarError::AvatarNotFound(user_id.clone()))?;

        if self.blobs.delete(&avatar.file_path).await? {
            info!(path = %avatar.file_path.display(), "deleted avatar file");
        } else {
            warn!(
                path = %avatar.file_path.display(),
                "avatar file was already gone"
            );
        }

        self.records.update(&record).await?;
        info!("avatar removed from user record");
        Ok(())
    }
}

#[async_trait]
impl<R, B, P> AvatarService for AvatarServiceImpl<R, B, P>
where
    R: UserRecordRepository,
    B: BlobStore,
    P: ProfileProvider,
{
    #[instrument(skip(self, user_id), fields(user_id = %user_id))]
    async fn get_avatar_base64(&self, user_id: &UserId) -> Result<String, AvatarError> {
        let service = self.clone();
        let user_id = user_id.clone();

        let bytes = tokio::spawn(
            async move { service.load_or_fill(&user_id).await }.in_current_span(),
        )
        .await
        .map_err(|e| AvatarError::TaskFailed(e.to_string()))??;

        Ok(self.blobs.encode_base64(&bytes))
    }

    #[instrument(skip(self, user_id), fields(user_id = %user_id))]
    async fn delete_avatar(&self, user_id: &UserId) -> Result<(), AvatarError> {
        let service = self.clone();
        let user_id = user_id.clone();

        tokio::spawn(async move { service.remove(&user_id).await }.in_current_span())
            .await
            .map_err(|e| AvatarError::TaskFailed(e.to_string()))?
    }
}
