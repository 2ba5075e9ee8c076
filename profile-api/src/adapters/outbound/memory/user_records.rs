use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use time::OffsetDateTime;

use crate::domain::{
    models::{NewUserRecord, UserId, UserRecord},
    ports::outbound::UserRecordRepository,
    UserRecordError,
};

/// User record repository backed by an in-memory HashMap, with the same
/// create/update semantics as the Postgres adapter.
#[derive(Clone, Default)]
pub struct InMemoryUserRecordRepository {
    records: Arc<RwLock<HashMap<UserId, UserRecord>>>,
}

#[allow(dead_code)]
impl InMemoryUserRecordRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(self, records: Vec<UserRecord>) -> Self {
        {
            let mut stored = self.records.write().unwrap();
            for record in records {
                stored.insert(record.user_id.clone(), record);
            }
        }
        self
    }

    pub fn len(&self) -> usize {
        self.records.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().unwrap().is_empty()
    }

    /// Get a record directly (for test assertions).
    pub fn get(&self, user_id: &str) -> Option<UserRecord> {
        let user_id = UserId::parse(user_id).ok()?;
        self.records.read().unwrap().get(&user_id).cloned()
    }
}

#[async_trait]
impl UserRecordRepository for InMemoryUserRecordRepository {
    async fn find_by_user_id(
        &self,
        user_id: &UserId,
    ) -> Result<Option<UserRecord>, UserRecordError> {
        Ok(self.records.read().unwrap().get(user_id).cloned())
    }

    async fn create(&self, record: NewUserRecord) -> Result<UserRecord, UserRecordError> {
        let mut records = self.records.write().unwrap();
        if records.contains_key(&record.user_id) {
            return Err(UserRecordError::Conflict(record.user_id));
        }

        let created = UserRecord {
            user_id: record.user_id,
            email: record.email,
            first_name: record.first_name,
            last_name: record.last_name,
            avatar: record.avatar,
            created_at: OffsetDateTime::now_utc(),
        };
        records.insert(created.user_id.clone(), created.clone());
        Ok(created)
    }

    async fn update(&self, record: &UserRecord) -> Result<(), UserRecordError> {
        let mut records = self.records.write().unwrap();
        match records.get_mut(&record.user_id) {
            Some(stored) => {
                *stored = record.clone();
                Ok(())
            }
            None => Err(UserRecordError::NotFound(record.user_id.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_id(id: &str) -> UserId {
        UserId::parse(id).unwrap()
    }

    #[tokio::test]
    async fn create_then_find() {
        let repo = InMemoryUserRecordRepository::new();

        let created = repo
            .create(NewUserRecord::new(user_id("1")).with_email("a@example.com"))
            .await
            .unwrap();

        let found = repo.find_by_user_id(&user_id("1")).await.unwrap();
        assert_eq!(found, Some(created));
    }

    #[tokio::test]
    async fn create_twice_conflicts() {
        let repo = InMemoryUserRecordRepository::new();
        repo.create(NewUserRecord::new(user_id("1"))).await.unwrap();

        let err = repo
            .create(NewUserRecord::new(user_id("1")))
            .await
            .unwrap_err();

        assert!(matches!(err, UserRecordError::Conflict(id) if id == user_id("1")));
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn update_missing_is_not_found() {
        let repo = InMemoryUserRecordRepository::new();
        let record = UserRecord {
            user_id: user_id("9"),
            email: None,
            first_name: None,
            last_name: None,
            avatar: None,
            created_at: OffsetDateTime::now_utc(),
        };

        let err = repo.update(&record).await.unwrap_err();

        assert!(matches!(err, UserRecordError::NotFound(_)));
    }
}
