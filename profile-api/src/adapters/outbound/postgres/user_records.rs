//! PostgreSQL implementation of the UserRecordRepository port.

use std::path::PathBuf;

use async_trait::async_trait;
use sqlx::PgPool;
use time::OffsetDateTime;

use crate::domain::{
    models::{CachedAvatar, NewUserRecord, UserId, UserRecord},
    ports::outbound::UserRecordRepository,
    UserRecordError,
};

pub struct PostgresUserRecordRepository {
    pool: PgPool,
}

impl PostgresUserRecordRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct UserRecordRow {
    user_id: String,
    email: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
    avatar_url: Option<String>,
    content_hash: Option<String>,
    avatar_file_path: Option<String>,
    created_at: OffsetDateTime,
}

impl TryFrom<UserRecordRow> for UserRecord {
    type Error = UserRecordError;

    fn try_from(row: UserRecordRow) -> Result<Self, Self::Error> {
        let user_id = UserId::parse(&row.user_id)
            .map_err(|e| UserRecordError::storage(format!("stored user id is invalid: {e}")))?;

        let avatar = match (row.avatar_url, row.content_hash, row.avatar_file_path) {
            (Some(source_url), Some(content_hash), Some(file_path)) => Some(CachedAvatar {
                source_url,
                content_hash,
                file_path: PathBuf::from(file_path),
            }),
            (None, None, None) => None,
            _ => {
                return Err(UserRecordError::storage(format!(
                    "user record {user_id} has partially set avatar columns"
                )))
            }
        };

        Ok(UserRecord {
            user_id,
            email: row.email,
            first_name: row.first_name,
            last_name: row.last_name,
            avatar,
            created_at: row.created_at,
        })
    }
}

/// Splits an avatar into its `(avatar_url, content_hash, avatar_file_path)` columns.
fn avatar_columns(avatar: Option<&CachedAvatar>) -> (Option<&str>, Option<&str>, Option<String>) {
    match avatar {
        Some(avatar) => (
            Some(avatar.source_url.as_str()),
            Some(avatar.content_hash.as_str()),
            Some(avatar.file_path.to_string_lossy().into_owned()),
        ),
        None => (None, None, None),
    }
}

fn map_sqlx_error(user_id: &UserId, err: sqlx::Error) -> UserRecordError {
    match err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            UserRecordError::Conflict(user_id.clone())
        }
        other => UserRecordError::storage(other.to_string()),
    }
}

#[async_trait]
impl UserRecordRepository for PostgresUserRecordRepository {
    async fn find_by_user_id(
        &self,
        user_id: &UserId,
    ) -> Result<Option<UserRecord>, UserRecordError> {
        let row = sqlx::query_as::<_, UserRecordRow>(
            r#"
            SELECT user_id, email, first_name, last_name,
                   avatar_url, content_hash, avatar_file_path, created_at
            FROM user_records
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| map_sqlx_error(user_id, err))?;

        row.map(UserRecord::try_from).transpose()
    }

    async fn create(&self, record: NewUserRecord) -> Result<UserRecord, UserRecordError> {
        let (avatar_url, content_hash, avatar_file_path) = avatar_columns(record.avatar.as_ref());

        let row = sqlx::query_as::<_, UserRecordRow>(
            r#"
            INSERT INTO user_records
                (user_id, email, first_name, last_name, avatar_url, content_hash, avatar_file_path)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING user_id, email, first_name, last_name,
                      avatar_url, content_hash, avatar_file_path, created_at
            "#,
        )
        .bind(record.user_id.as_str())
        .bind(record.email.as_deref())
        .bind(record.first_name.as_deref())
        .bind(record.last_name.as_deref())
        .bind(avatar_url)
        .bind(content_hash)
        .bind(avatar_file_path)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| map_sqlx_error(&record.user_id, err))?;

        UserRecord::try_from(row)
    }

    async fn update(&self, record: &UserRecord) -> Result<(), UserRecordError> {
        let (avatar_url, content_hash, avatar_file_path) = avatar_columns(record.avatar.as_ref());

        let result = sqlx::query(
            r#"
            UPDATE user_records
            SET email = $2,
                first_name = $3,
                last_name = $4,
                avatar_url = $5,
                content_hash = $6,
                avatar_file_path = $7,
                updated_at = now()
            WHERE user_id = $1
            "#,
        )
        .bind(record.user_id.as_str())
        .bind(record.email.as_deref())
        .bind(record.first_name.as_deref())
        .bind(record.last_name.as_deref())
        .bind(avatar_url)
        .bind(content_hash)
        .bind(avatar_file_path)
        .execute(&self.pool)
        .await
        .map_err(|err| map_sqlx_error(&record.user_id, err))?;

        if result.rows_affected() == 0 {
            return Err(UserRecordError::NotFound(record.user_id.clone()));
        }

        Ok(())
    }
}
