//! Composition root: the only place that wires concrete adapters into services.

use std::sync::Arc;

use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    adapters::outbound::{
        filesystem::FsBlobStore, postgres::PostgresUserRecordRepository,
        reqres::ReqresProfileAdapter,
    },
    app_state::AppState,
    config::{AvatarCacheSettings, DatabaseSettings, RemoteSettings, Settings},
    domain::services::{AvatarServiceImpl, UserServiceImpl},
};

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("failed to connect to the database: {0}")]
    Database(#[from] sqlx::Error),
    #[error("failed to run database migrations: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
    #[error("failed to build the profile provider client: {0}")]
    ProfileClient(#[from] reqres::ReqresError),
}

pub async fn connect_database(settings: &DatabaseSettings) -> Result<PgPool, StartupError> {
    let pool = PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .connect_with(settings.with_db())
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!(database = %settings.database_name, "database ready");

    Ok(pool)
}

pub fn profile_provider(settings: &RemoteSettings) -> Result<ReqresProfileAdapter, StartupError> {
    let mut client = reqres::ReqresClient::new(&settings.base_url, settings.timeout())?;
    if let Some(api_key) = &settings.api_key {
        client = client.with_api_key(api_key);
    }

    Ok(ReqresProfileAdapter::new(client))
}

pub fn blob_store(settings: &AvatarCacheSettings) -> FsBlobStore {
    FsBlobStore::new(&settings.directory).with_extension(&settings.file_extension)
}

/// Builds the application state from already connected infrastructure.
pub fn app_state(pool: PgPool, settings: &Settings) -> Result<AppState, StartupError> {
    let records = Arc::new(PostgresUserRecordRepository::new(pool));
    let provider = Arc::new(profile_provider(&settings.remote)?);
    let blobs = Arc::new(blob_store(&settings.avatar_cache));

    tracing::info!(
        remote = %settings.remote.base_url,
        avatar_dir = %settings.avatar_cache.directory.display(),
        "services configured"
    );

    Ok(AppState::new(
        Arc::new(AvatarServiceImpl::new(
            records.clone(),
            blobs,
            provider.clone(),
        )),
        Arc::new(UserServiceImpl::new(records, provider)),
    ))
}
