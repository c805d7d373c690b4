use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// A todo as the view sees it: the store-assigned key plus the document fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: String,
    pub title: String,
    pub completed: bool,
    #[serde(rename = "createdAt")]
    pub created_at: i64,
}
impl Todo {
    pub fn from_document(id: String, document: TodoDocument) -> Self {
        let TodoDocument {
            title,
            completed,
            created_at,
        } = document;
        Self {
            id,
            title,
            completed,
            created_at,
        }
    }
}

/// The stored record, without its key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoDocument {
    pub title: String,
    pub completed: bool,
    pub created_at: i64,
}
impl TodoDocument {
    pub fn new(title: &Title, created_at: i64) -> Self {
        Self {
            title: title.as_str().to_string(),
            completed: false,
            created_at,
        }
    }
}

/// Non-empty, trimmed todo title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Title(String);
impl Title {
    pub fn parse(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Current wall-clock time in epoch milliseconds.
pub fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or_default()
}
