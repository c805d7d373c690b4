use std::collections::{BTreeMap, HashSet};

use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{Record, TodoRepository};
use crate::error::Operation;
use crate::models::TodoDocument;

/// Todos held in process memory.
///
/// Besides serving as a throwaway backend, it can be told to fail a given
/// operation and it counts every call it receives, which is what the
/// controller tests lean on.
#[derive(Debug, Default)]
pub struct MemoryTodoRepository {
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    documents: BTreeMap<String, TodoDocument>,
    next_id: u64,
    failing: HashSet<Operation>,
    calls: usize,
}
impl Inner {
    fn enter(&mut self, operation: Operation) -> Result<()> {
        self.calls += 1;
        if self.failing.contains(&operation) {
            bail!("memory store refused {}", operation);
        }
        Ok(())
    }

    fn insert(&mut self, document: TodoDocument) -> String {
        let key = format!("{:016x}", self.next_id);
        self.next_id += 1;
        self.documents.insert(key.clone(), document);
        key
    }
}

impl MemoryTodoRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a document directly, bypassing call counting and failures.
    pub async fn seed(&self, document: TodoDocument) -> String {
        self.inner.lock().await.insert(document)
    }

    pub async fn document(&self, id: &str) -> Option<TodoDocument> {
        self.inner.lock().await.documents.get(id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.documents.len()
    }

    /// Makes every subsequent call of the given kind fail.
    pub async fn fail(&self, operation: Operation) {
        self.inner.lock().await.failing.insert(operation);
    }

    pub async fn recover(&self, operation: Operation) {
        self.inner.lock().await.failing.remove(&operation);
    }

    /// Number of repository calls received so far.
    pub async fn calls(&self) -> usize {
        self.inner.lock().await.calls
    }
}

#[async_trait]
impl TodoRepository for MemoryTodoRepository {
    async fn list(&self) -> Result<Vec<Record>> {
        let mut inner = self.inner.lock().await;
        inner.enter(Operation::Fetch)?;
        Ok(inner
            .documents
            .iter()
            .map(|(key, document)| (key.clone(), document.clone()))
            .collect())
    }

    async fn create(&self, document: TodoDocument) -> Result<String> {
        let mut inner = self.inner.lock().await;
        inner.enter(Operation::Add)?;
        Ok(inner.insert(document))
    }

    async fn update_completed(&self, id: &str, completed: bool) -> Result<()> {
        let mut inner = self.inner.lock().await;
        inner.enter(Operation::Update)?;
        let document = inner
            .documents
            .get_mut(id)
            .ok_or_else(|| anyhow!("no document {}", id))?;
        document.completed = completed;
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let mut inner = self.inner.lock().await;
        inner.enter(Operation::Delete)?;
        inner.documents.remove(id);
        Ok(())
    }
}
