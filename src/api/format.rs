use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::database::models::{Folder, Note};
use crate::sanitize::sanitize;

/// Folder as returned to clients: `{id, name}` with `name` escaped
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FolderResponse {
    pub id: i64,
    pub name: String,
}

/// Note as returned to clients: `{id, name, modified, folderId, content}` with
/// `name` and `content` escaped
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteResponse {
    pub id: i64,
    pub name: String,
    pub modified: DateTime<Utc>,
    pub folder_id: i64,
    pub content: String,
}

impl From<&Folder> for FolderResponse {
    fn from(folder: &Folder) -> Self {
        Self {
            id: folder.id,
            name: sanitize(&folder.name),
        }
    }
}

impl From<Folder> for FolderResponse {
    fn from(folder: Folder) -> Self {
        Self::from(&folder)
    }
}

impl From<&Note> for NoteResponse {
    fn from(note: &Note) -> Self {
        Self {
            id: note.id,
            name: sanitize(&note.name),
            modified: note.modified,
            folder_id: note.folder_id,
            content: sanitize(&note.content),
        }
    }
}

impl From<Note> for NoteResponse {
    fn from(note: Note) -> Self {
        Self::from(&note)
    }
}
