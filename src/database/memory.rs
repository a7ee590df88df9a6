use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::database::manager::DatabaseError;
use crate::database::models::{Folder, FolderPatch, NewFolder, NewNote, Note, NotePatch};
use crate::database::store::{FolderStore, NoteStore, Storage};

/// In-process storage with the same observable behaviour as the Postgres schema:
/// sequential ids, `modified` stamped on insert, folder references checked and
/// folder deletion cascading to its notes.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

#[derive(Default)]
struct Tables {
    folders: BTreeMap<i64, Folder>,
    notes: BTreeMap<i64, Note>,
    last_folder_id: i64,
    last_note_id: i64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn check_folder_name(name: &str) -> Result<(), DatabaseError> {
    if name.is_empty() {
        return Err(DatabaseError::QueryError(
            "new row for relation \"folders\" violates check constraint".to_string(),
        ));
    }
    Ok(())
}

#[async_trait]
impl FolderStore for MemoryStore {
    async fn list_folders(&self) -> Result<Vec<Folder>, DatabaseError> {
        Ok(self.tables.read().await.folders.values().cloned().collect())
    }

    async fn get_folder(&self, id: i64) -> Result<Option<Folder>, DatabaseError> {
        Ok(self.tables.read().await.folders.get(&id).cloned())
    }

    async fn insert_folder(&self, folder: NewFolder) -> Result<Folder, DatabaseError> {
        check_folder_name(&folder.name)?;
        let mut tables = self.tables.write().await;
        tables.last_folder_id += 1;
        let row = Folder {
            id: tables.last_folder_id,
            name: folder.name,
        };
        tables.folders.insert(row.id, row.clone());
        Ok(row)
    }

    async fn update_folder(&self, id: i64, patch: FolderPatch) -> Result<u64, DatabaseError> {
        if let Some(name) = &patch.name {
            check_folder_name(name)?;
        }
        let mut tables = self.tables.write().await;
        match tables.folders.get_mut(&id) {
            Some(folder) => {
                patch.apply(folder);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_folder(&self, id: i64) -> Result<u64, DatabaseError> {
        let mut tables = self.tables.write().await;
        if tables.folders.remove(&id).is_none() {
            return Ok(0);
        }
        tables.notes.retain(|_, note| note.folder_id != id);
        Ok(1)
    }
}

#[async_trait]
impl NoteStore for MemoryStore {
    async fn list_notes(&self) -> Result<Vec<Note>, DatabaseError> {
        Ok(self.tables.read().await.notes.values().cloned().collect())
    }

    async fn get_note(&self, id: i64) -> Result<Option<Note>, DatabaseError> {
        Ok(self.tables.read().await.notes.get(&id).cloned())
    }

    async fn insert_note(&self, note: NewNote) -> Result<Note, DatabaseError> {
        let mut tables = self.tables.write().await;
        if !tables.folders.contains_key(&note.folder_id) {
            return Err(DatabaseError::MissingReference("folder"));
        }
        tables.last_note_id += 1;
        let row = Note {
            id: tables.last_note_id,
            name: note.name,
            modified: Utc::now(),
            folder_id: note.folder_id,
            content: note.content,
        };
        tables.notes.insert(row.id, row.clone());
        Ok(row)
    }

    async fn update_note(&self, id: i64, patch: NotePatch) -> Result<u64, DatabaseError> {
        let mut tables = self.tables.write().await;
        if let Some(folder_id) = patch.folder_id {
            if !tables.folders.contains_key(&folder_id) {
                return Err(DatabaseError::MissingReference("folder"));
            }
        }
        match tables.notes.get_mut(&id) {
            Some(note) => {
                patch.apply(note);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_note(&self, id: i64) -> Result<u64, DatabaseError> {
        let mut tables = self.tables.write().await;
        Ok(tables.notes.remove(&id).map_or(0, |_| 1))
    }
}

#[async_trait]
impl Storage for MemoryStore {
    async fn health_check(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn store_with_folder() -> (MemoryStore, Folder) {
        let store = MemoryStore::new();
        let folder = store
            .insert_folder(NewFolder { name: "Important".to_string() })
            .await
            .unwrap();
        (store, folder)
    }

    fn new_note(folder_id: i64) -> NewNote {
        NewNote {
            name: "N".to_string(),
            folder_id,
            content: "C".to_string(),
        }
    }

    #[tokio::test]
    async fn assigns_sequential_ids() {
        let (store, first) = store_with_folder().await;
        let second = store
            .insert_folder(NewFolder { name: "Super".to_string() })
            .await
            .unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(store.list_folders().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn missing_rows_are_none_not_errors() {
        let store = MemoryStore::new();
        assert!(store.get_folder(42).await.unwrap().is_none());
        assert!(store.get_note(42).await.unwrap().is_none());
        assert_eq!(store.delete_note(42).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn rejects_empty_folder_name() {
        let store = MemoryStore::new();
        let result = store.insert_folder(NewFolder { name: String::new() }).await;
        assert!(matches!(result, Err(DatabaseError::QueryError(_))));
    }

    #[tokio::test]
    async fn note_requires_existing_folder() {
        let (store, folder) = store_with_folder().await;
        assert!(matches!(
            store.insert_note(new_note(folder.id + 1)).await,
            Err(DatabaseError::MissingReference("folder"))
        ));

        let note = store.insert_note(new_note(folder.id)).await.unwrap();
        let patch = NotePatch {
            folder_id: Some(99),
            ..Default::default()
        };
        assert!(matches!(
            store.update_note(note.id, patch).await,
            Err(DatabaseError::MissingReference("folder"))
        ));
    }

    #[tokio::test]
    async fn deleting_folder_cascades_to_notes() {
        let (store, folder) = store_with_folder().await;
        let note = store.insert_note(new_note(folder.id)).await.unwrap();

        assert_eq!(store.delete_folder(folder.id).await.unwrap(), 1);
        assert!(store.get_note(note.id).await.unwrap().is_none());
        assert_eq!(store.delete_folder(folder.id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn partial_update_keeps_other_fields() {
        let (store, folder) = store_with_folder().await;
        let note = store.insert_note(new_note(folder.id)).await.unwrap();

        let patch = NotePatch {
            name: Some("X".to_string()),
            ..Default::default()
        };
        assert_eq!(store.update_note(note.id, patch).await.unwrap(), 1);

        let updated = store.get_note(note.id).await.unwrap().unwrap();
        assert_eq!(updated.name, "X");
        assert_eq!(updated.content, note.content);
        assert_eq!(updated.folder_id, note.folder_id);
        assert_eq!(updated.modified, note.modified);
    }
}
