//! Data access for the `todos` collection.
//!
//! Each function is a single round trip to the repository: no retries, no
//! timeouts, no batching. Errors carry the operation as context and are
//! otherwise passed through untouched.

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::models::{now_millis, Title, Todo, TodoDocument};
use crate::repository::TodoRepository;

#[derive(Clone)]
pub struct TodoService {
    repository: Arc<dyn TodoRepository>,
}
impl TodoService {
    pub fn new(repository: Arc<dyn TodoRepository>) -> Self {
        Self { repository }
    }

    /// All todos, newest first.
    pub async fn fetch_todos(&self) -> Result<Vec<Todo>> {
        let mut records = self
            .repository
            .list()
            .await
            .context("failed to list todos")?;
        // Keys are allocated in creation order, so they settle equal timestamps.
        records.sort_by(|(left_key, left), (right_key, right)| {
            right
                .created_at
                .cmp(&left.created_at)
                .then_with(|| right_key.cmp(left_key))
        });
        Ok(records
            .into_iter()
            .map(|(id, document)| Todo::from_document(id, document))
            .collect())
    }

    /// Stores a new, incomplete todo stamped with the current time.
    ///
    /// The new id is not handed back; callers re-fetch to observe the item.
    pub async fn add_todo(&self, title: &Title) -> Result<()> {
        let document = TodoDocument::new(title, now_millis());
        let id = self
            .repository
            .create(document)
            .await
            .with_context(|| format!("failed to add todo {:?}", title.as_str()))?;
        tracing::debug!(%id, "todo added");
        Ok(())
    }

    pub async fn toggle_todo(&self, id: &str, completed: bool) -> Result<()> {
        self.repository
            .update_completed(id, completed)
            .await
            .with_context(|| format!("failed to set todo {} completed={}", id, completed))
    }

    pub async fn delete_todo(&self, id: &str) -> Result<()> {
        self.repository
            .delete(id)
            .await
            .with_context(|| format!("failed to delete todo {}", id))
    }
}

impl std::fmt::Debug for TodoService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TodoService").finish()
    }
}
