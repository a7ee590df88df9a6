use async_trait::async_trait;

use crate::database::manager::DatabaseError;
use crate::database::models::{Folder, FolderPatch, NewFolder, NewNote, Note, NotePatch};

/// Data access for the `folders` table.
///
/// Lookups that find nothing return `Ok(None)`; callers decide whether that is a 404.
/// Update and delete return the number of rows affected.
#[async_trait]
pub trait FolderStore: Send + Sync {
    async fn list_folders(&self) -> Result<Vec<Folder>, DatabaseError>;
    async fn get_folder(&self, id: i64) -> Result<Option<Folder>, DatabaseError>;
    async fn insert_folder(&self, folder: NewFolder) -> Result<Folder, DatabaseError>;
    async fn update_folder(&self, id: i64, patch: FolderPatch) -> Result<u64, DatabaseError>;
    async fn delete_folder(&self, id: i64) -> Result<u64, DatabaseError>;
}

/// Data access for the `notes` table.
#[async_trait]
pub trait NoteStore: Send + Sync {
    async fn list_notes(&self) -> Result<Vec<Note>, DatabaseError>;
    async fn get_note(&self, id: i64) -> Result<Option<Note>, DatabaseError>;
    async fn insert_note(&self, note: NewNote) -> Result<Note, DatabaseError>;
    async fn update_note(&self, id: i64, patch: NotePatch) -> Result<u64, DatabaseError>;
    async fn delete_note(&self, id: i64) -> Result<u64, DatabaseError>;
}

/// The storage handle injected into every request.
#[async_trait]
pub trait Storage: FolderStore + NoteStore {
    async fn health_check(&self) -> Result<(), DatabaseError>;
}
