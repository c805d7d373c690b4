use anyhow::{anyhow, Result};
use async_trait::async_trait;

use super::{Record, TodoRepository};
use crate::db::Collection;
use crate::models::TodoDocument;

/// Todos persisted in a sled tree.
#[derive(Debug, Clone)]
pub struct SledTodoRepository {
    collection: Collection,
}
impl SledTodoRepository {
    pub fn new(collection: Collection) -> Self {
        Self { collection }
    }
}

#[async_trait]
impl TodoRepository for SledTodoRepository {
    async fn list(&self) -> Result<Vec<Record>> {
        self.collection.iter::<TodoDocument>().collect()
    }

    async fn create(&self, document: TodoDocument) -> Result<String> {
        let key = self.collection.next_key()?;
        self.collection.insert(&key, &document)?;
        Ok(key)
    }

    async fn update_completed(&self, id: &str, completed: bool) -> Result<()> {
        let mut document = self
            .collection
            .get::<TodoDocument, _>(id)?
            .ok_or_else(|| anyhow!("no document {} in {}", id, self.collection.name()))?;
        document.completed = completed;
        self.collection.insert(id, &document)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.collection.remove(id)?;
        Ok(())
    }
}
