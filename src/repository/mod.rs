//! Narrow interface over the document store backing the `todos` collection.
//!
//! Everything above this module talks to a [`TodoRepository`] trait object, so
//! the sled backend and the in-memory backend are interchangeable.

mod embedded;
mod memory;

use anyhow::Result;
use async_trait::async_trait;

use crate::models::TodoDocument;

pub use embedded::SledTodoRepository;
pub use memory::MemoryTodoRepository;

/// Name of the collection holding todo documents.
pub const TODOS: &str = "todos";

/// A stored document together with its store-assigned key.
pub type Record = (String, TodoDocument);

#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// Every document in the collection, in no particular order.
    async fn list(&self) -> Result<Vec<Record>>;
    /// Stores a new document and returns the key assigned to it.
    async fn create(&self, document: TodoDocument) -> Result<String>;
    /// Overwrites the `completed` field of an existing document.
    async fn update_completed(&self, id: &str, completed: bool) -> Result<()>;
    /// Removes a document. Removing an absent key succeeds.
    async fn delete(&self, id: &str) -> Result<()>;
}
