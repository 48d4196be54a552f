//! In-memory task store

use async_trait::async_trait;
use chrono::Utc;
use cockpit_core::task::{StoreError, StoreResult, TaskPatch, TaskRecord, TaskStore};
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;
use uuid::Uuid;

/// Task storage held in process memory, lost on restart
pub struct MemoryTaskStore {
    /// Insertion order, oldest first
    tasks: RwLock<Vec<TaskRecord>>,
    available: AtomicBool,
}

impl MemoryTaskStore {
    pub fn new() -> Self {
        Self {
            tasks: RwLock::new(Vec::new()),
            available: AtomicBool::new(true),
        }
    }

    /// Take the store offline; every call fails with `Unavailable` until
    /// it is brought back
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    fn check_available(&self) -> StoreResult<()> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(StoreError::Unavailable("task store offline".to_string()))
        }
    }
}

impl Default for MemoryTaskStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TaskStore for MemoryTaskStore {
    async fn list(&self, owner_id: &str) -> StoreResult<Vec<TaskRecord>> {
        self.check_available()?;
        let tasks = self.tasks.read().await;
        Ok(tasks
            .iter()
            .rev()
            .filter(|t| t.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn create(&self, owner_id: &str, text: &str) -> StoreResult<TaskRecord> {
        self.check_available()?;
        if owner_id.trim().is_empty() {
            return Err(StoreError::Invalid("userId must not be empty".to_string()));
        }
        if text.trim().is_empty() {
            return Err(StoreError::Invalid("text must not be empty".to_string()));
        }

        let record = TaskRecord {
            id: Uuid::new_v4().to_string(),
            owner_id: owner_id.to_string(),
            text: text.to_string(),
            done: false,
            created_at: Utc::now(),
        };
        self.tasks.write().await.push(record.clone());
        Ok(record)
    }

    async fn update(&self, id: &str, patch: TaskPatch) -> StoreResult<TaskRecord> {
        self.check_available()?;
        let mut tasks = self.tasks.write().await;
        let task = tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        patch.apply(task);
        Ok(task.clone())
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        self.check_available()?;
        let mut tasks = self.tasks.write().await;
        let pos = tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        tasks.remove(pos);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_list_newest_first_scoped_by_owner() {
        let store = MemoryTaskStore::new();
        store.create("u1", "first").await.unwrap();
        store.create("u2", "other").await.unwrap();
        store.create("u1", "second").await.unwrap();

        let tasks = store.list("u1").await.unwrap();
        let texts: Vec<&str> = tasks.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["second", "first"]);
        assert!(tasks.iter().all(|t| !t.done));
        assert!(store.list("nobody").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let store = MemoryTaskStore::new();
        let task = store.create("u1", "fit softs").await.unwrap();

        let updated = store
            .update(
                &task.id,
                TaskPatch {
                    text: None,
                    done: Some(true),
                },
            )
            .await
            .unwrap();
        assert!(updated.done);
        assert_eq!(updated.text, "fit softs");

        store.delete(&task.id).await.unwrap();
        assert!(store.list("u1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_id_is_not_found() {
        let store = MemoryTaskStore::new();
        assert_eq!(
            store.update("missing", TaskPatch::default()).await,
            Err(StoreError::NotFound("missing".to_string()))
        );
        assert_eq!(
            store.delete("missing").await,
            Err(StoreError::NotFound("missing".to_string()))
        );
    }

    #[tokio::test]
    async fn test_empty_text_rejected() {
        let store = MemoryTaskStore::new();
        assert!(matches!(
            store.create("u1", "  ").await,
            Err(StoreError::Invalid(_))
        ));
    }

    #[tokio::test]
    async fn test_offline_store_is_retryable() {
        let store = MemoryTaskStore::new();
        store.set_available(false);
        let err = store.list("u1").await.unwrap_err();
        assert!(err.is_retryable());

        store.set_available(true);
        assert!(store.list("u1").await.is_ok());
    }
}
