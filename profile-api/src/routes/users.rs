use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::instrument;

use crate::{
    app_state::AppState,
    domain::models::{NewUserRecord, RemoteProfile, UserId, UserRecord},
    routes::ApiError,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_user))
        .route("/:user_id", get(get_user))
        .route("/:user_id/avatar", get(get_avatar).delete(delete_avatar))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateUserBody {
    user_id: String,
    email: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UserRecordResponse {
    user_id: String,
    email: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
    avatar_url: Option<String>,
    content_hash: Option<String>,
    avatar_file_path: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    created_at: OffsetDateTime,
}

impl From<UserRecord> for UserRecordResponse {
    fn from(record: UserRecord) -> Self {
        let (avatar_url, content_hash, avatar_file_path) = match record.avatar {
            Some(avatar) => (
                Some(avatar.source_url),
                Some(avatar.content_hash),
                Some(avatar.file_path.display().to_string()),
            ),
            None => (None, None, None),
        };

        Self {
            user_id: record.user_id.into(),
            email: record.email,
            first_name: record.first_name,
            last_name: record.last_name,
            avatar_url,
            content_hash,
            avatar_file_path,
            created_at: record.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProfileResponse {
    id: String,
    email: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
    avatar: String,
}

impl From<RemoteProfile> for ProfileResponse {
    fn from(profile: RemoteProfile) -> Self {
        Self {
            id: profile.id.into(),
            email: profile.email,
            first_name: profile.first_name,
            last_name: profile.last_name,
            avatar: profile.avatar_url,
        }
    }
}

#[derive(Debug, Serialize)]
struct AvatarResponse {
    avatar: String,
}

#[derive(Debug, Serialize)]
struct MessageResponse {
    message: &'static str,
}

#[instrument(name = "POST /api/user", skip(app_state, body), fields(user_id = %body.user_id))]
async fn create_user(
    State(app_state): State<AppState>,
    Json(body): Json<CreateUserBody>,
) -> Result<(StatusCode, Json<UserRecordResponse>), ApiError> {
    let record = NewUserRecord {
        user_id: UserId::parse(&body.user_id)?,
        email: body.email,
        first_name: body.first_name,
        last_name: body.last_name,
        avatar: None,
    };

    let created = app_state.user_service.create_user(record).await?;

    Ok((StatusCode::CREATED, Json(created.into())))
}

#[instrument(name = "GET /api/user/:user_id", skip(app_state))]
async fn get_user(
    State(app_state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let user_id = UserId::parse(&user_id)?;
    let profile = app_state.user_service.get_remote_profile(&user_id).await?;

    Ok(Json(profile.into()))
}

#[instrument(name = "GET /api/user/:user_id/avatar", skip(app_state))]
async fn get_avatar(
    State(app_state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<AvatarResponse>, ApiError> {
    let user_id = UserId::parse(&user_id)?;
    let avatar = app_state.avatar_service.get_avatar_base64(&user_id).await?;

    Ok(Json(AvatarResponse { avatar }))
}

#[instrument(name = "DELETE /api/user/:user_id/avatar", skip(app_state))]
async fn delete_avatar(
    State(app_state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let user_id = UserId::parse(&user_id)?;
    app_state.avatar_service.delete_avatar(&user_id).await?;

    Ok(Json(MessageResponse {
        message: "Avatar deleted successfully",
    }))
}
