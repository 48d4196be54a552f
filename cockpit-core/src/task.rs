//! To-do task records and the store collaborator

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    pub id: String,
    /// Scopes listing; serialized as `userId` on the wire
    #[serde(rename = "userId")]
    pub owner_id: String,
    pub text: String,
    pub done: bool,
    pub created_at: DateTime<Utc>,
}

/// Partial update; absent fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskPatch {
    pub text: Option<String>,
    pub done: Option<bool>,
}

impl TaskPatch {
    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.done.is_none()
    }

    /// Apply the present fields to `record`
    pub fn apply(&self, record: &mut TaskRecord) {
        if let Some(text) = &self.text {
            record.text = text.clone();
        }
        if let Some(done) = self.done {
            record.done = done;
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("task not found: {0}")]
    NotFound(String),

    #[error("invalid task: {0}")]
    Invalid(String),

    /// Backend could not be reached; callers may re-issue the request
    #[error("task storage unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Identifier-keyed task storage
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Tasks owned by `owner_id`, newest first
    async fn list(&self, owner_id: &str) -> StoreResult<Vec<TaskRecord>>;

    /// Create a task with `done = false`
    async fn create(&self, owner_id: &str, text: &str) -> StoreResult<TaskRecord>;

    async fn update(&self, id: &str, patch: TaskPatch) -> StoreResult<TaskRecord>;

    async fn delete(&self, id: &str) -> StoreResult<()>;
}
