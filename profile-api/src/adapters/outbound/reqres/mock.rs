//! Mock profile provider for testing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::{
    models::{RemoteProfile, UserId},
    ports::outbound::ProfileProvider,
    RemoteProfileError,
};

/// In-memory profile provider with call counters.
///
/// Unknown user ids yield `RemoteProfileError::NotFound`; unknown URLs yield
/// `RemoteProfileError::Unavailable`.
#[derive(Clone, Default)]
pub struct MockProfileProvider {
    profiles: Arc<RwLock<HashMap<String, RemoteProfile>>>,
    images: Arc<RwLock<HashMap<String, Vec<u8>>>>,
    profile_calls: Arc<AtomicUsize>,
    bytes_calls: Arc<AtomicUsize>,
    delay: Option<Duration>,
}

#[allow(dead_code)]
impl MockProfileProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a profile under `id` whose avatar at `avatar_url` has `bytes`.
    pub fn with_user(self, id: &str, avatar_url: &str, bytes: &[u8]) -> Self {
        let profile = RemoteProfile {
            id: UserId::parse(id).unwrap(),
            email: Some(format!("user{id}@reqres.in")),
            first_name: Some("First".to_string()),
            last_name: Some("Last".to_string()),
            avatar_url: avatar_url.to_string(),
        };
        self.with_profile(id, profile).with_image(avatar_url, bytes)
    }

    /// Register a profile reachable under `requested_id`, which may differ from `profile.id`.
    pub fn with_profile(self, requested_id: &str, profile: RemoteProfile) -> Self {
        self.profiles
            .write()
            .unwrap()
            .insert(requested_id.to_string(), profile);
        self
    }

    pub fn with_image(self, url: &str, bytes: &[u8]) -> Self {
        self.images
            .write()
            .unwrap()
            .insert(url.to_string(), bytes.to_vec());
        self
    }

    /// Delay every call, to widen race windows in concurrency tests.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn profile_calls(&self) -> usize {
        self.profile_calls.load(Ordering::SeqCst)
    }

    pub fn bytes_calls(&self) -> usize {
        self.bytes_calls.load(Ordering::SeqCst)
    }

    async fn pause(&self) {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl ProfileProvider for MockProfileProvider {
    async fn fetch_profile(&self, user_id: &UserId) -> Result<RemoteProfile, RemoteProfileError> {
        self.profile_calls.fetch_add(1, Ordering::SeqCst);
        self.pause().await;

        self.profiles
            .read()
            .unwrap()
            .get(user_id.as_str())
            .cloned()
            .ok_or_else(|| RemoteProfileError::NotFound(user_id.to_string()))
    }

    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, RemoteProfileError> {
        self.bytes_calls.fetch_add(1, Ordering::SeqCst);
        self.pause().await;

        self.images
            .read()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or_else(|| RemoteProfileError::Unavailable(format!("GET {url} failed")))
    }
}
