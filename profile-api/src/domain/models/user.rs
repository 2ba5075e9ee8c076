use std::path::PathBuf;

use time::OffsetDateTime;

use super::{RemoteProfile, StoredBlob, UserId};

/// A locally cached avatar and where it came from.
///
/// The hash and the file path always travel together with the source URL,
/// which keeps a record from ever holding only half of an avatar reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedAvatar {
    pub source_url: String,
    pub content_hash: String,
    pub file_path: PathBuf,
}

impl CachedAvatar {
    pub fn new(source_url: impl Into<String>, blob: StoredBlob) -> Self {
        Self {
            source_url: source_url.into(),
            content_hash: blob.content_hash,
            file_path: blob.path,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub user_id: UserId,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub avatar: Option<CachedAvatar>,
    pub created_at: OffsetDateTime,
}

/// Fields for a record that does not exist yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUserRecord {
    pub user_id: UserId,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub avatar: Option<CachedAvatar>,
}

impl NewUserRecord {
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            email: None,
            first_name: None,
            last_name: None,
            avatar: None,
        }
    }

    /// A record seeded from the remote profile, as created on the first avatar fetch.
    pub fn from_profile(profile: &RemoteProfile, avatar: CachedAvatar) -> Self {
        Self {
            user_id: profile.id.clone(),
            email: profile.email.clone(),
            first_name: profile.first_name.clone(),
            last_name: profile.last_name.clone(),
            avatar: Some(avatar),
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_name(mut self, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        self.first_name = Some(first_name.into());
        self.last_name = Some(last_name.into());
        self
    }
}
