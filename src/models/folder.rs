//! Folder model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named, optionally nested group of saved requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
    pub id: i64,
    pub name: String,
    /// Parent folder; deleting the parent deletes this folder too.
    pub parent_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Caller-supplied fields for creating or updating a folder.
///
/// Server-owned fields (`id`, timestamps) are ignored if present in the JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderInput {
    pub name: String,
    #[serde(default)]
    pub parent_id: Option<i64>,
}

impl FolderInput {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent_id: None,
        }
    }

    pub fn with_parent(mut self, parent_id: i64) -> Self {
        self.parent_id = Some(parent_id);
        self
    }
}
