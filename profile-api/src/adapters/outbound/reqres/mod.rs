mod conversions;
#[cfg(test)]
mod mock;

#[cfg(test)]
pub use mock::MockProfileProvider;

use async_trait::async_trait;

use crate::domain::{
    models::{RemoteProfile, UserId},
    ports::outbound::ProfileProvider,
    RemoteProfileError,
};

use self::conversions::{map_reqres_error, to_domain_profile};

/// Adapter that wraps the reqres client to implement the ProfileProvider port.
pub struct ReqresProfileAdapter {
    client: reqres::ReqresClient,
}

impl ReqresProfileAdapter {
    pub fn new(client: reqres::ReqresClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ProfileProvider for ReqresProfileAdapter {
    async fn fetch_profile(&self, user_id: &UserId) -> Result<RemoteProfile, RemoteProfileError> {
        let user = self
            .client
            .fetch_user(user_id.as_str())
            .await
            .map_err(map_reqres_error)?;

        to_domain_profile(user)
    }

    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, RemoteProfileError> {
        let bytes = self
            .client
            .fetch_bytes(url)
            .await
            .map_err(map_reqres_error)?;

        Ok(bytes.to_vec())
    }
}
