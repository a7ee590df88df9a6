use async_trait::async_trait;
use sqlx::PgPool;

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::{Folder, FolderPatch, NewFolder, NewNote, Note, NotePatch};
use crate::database::query_builder::QueryBuilder;
use crate::database::store::{FolderStore, NoteStore, Storage};

const FOLDERS: &str = "folders";
const NOTES: &str = "notes";

/// PostgreSQL-backed storage. Every operation is one parameterized statement.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FolderStore for PgStore {
    async fn list_folders(&self) -> Result<Vec<Folder>, DatabaseError> {
        let sql = QueryBuilder::new(FOLDERS)?.select_all();
        Ok(sql.fetch_all(&self.pool).await?)
    }

    async fn get_folder(&self, id: i64) -> Result<Option<Folder>, DatabaseError> {
        let sql = QueryBuilder::new(FOLDERS)?.select_by_id(id);
        Ok(sql.fetch_optional(&self.pool).await?)
    }

    async fn insert_folder(&self, folder: NewFolder) -> Result<Folder, DatabaseError> {
        let sql = QueryBuilder::new(FOLDERS)?.insert_returning(folder.columns())?;
        Ok(sql.fetch_one(&self.pool).await?)
    }

    async fn update_folder(&self, id: i64, patch: FolderPatch) -> Result<u64, DatabaseError> {
        let sql = QueryBuilder::new(FOLDERS)?.update_by_id(id, patch.columns())?;
        Ok(sql.execute(&self.pool).await?)
    }

    async fn delete_folder(&self, id: i64) -> Result<u64, DatabaseError> {
        let sql = QueryBuilder::new(FOLDERS)?.delete_by_id(id);
        Ok(sql.execute(&self.pool).await?)
    }
}

#[async_trait]
impl NoteStore for PgStore {
    async fn list_notes(&self) -> Result<Vec<Note>, DatabaseError> {
        let sql = QueryBuilder::new(NOTES)?.select_all();
        Ok(sql.fetch_all(&self.pool).await?)
    }

    async fn get_note(&self, id: i64) -> Result<Option<Note>, DatabaseError> {
        let sql = QueryBuilder::new(NOTES)?.select_by_id(id);
        Ok(sql.fetch_optional(&self.pool).await?)
    }

    async fn insert_note(&self, note: NewNote) -> Result<Note, DatabaseError> {
        let sql = QueryBuilder::new(NOTES)?.insert_returning(note.columns())?;
        sql.fetch_one(&self.pool)
            .await
            .map_err(|e| DatabaseError::from_write(e, "folder"))
    }

    async fn update_note(&self, id: i64, patch: NotePatch) -> Result<u64, DatabaseError> {
        let sql = QueryBuilder::new(NOTES)?.update_by_id(id, patch.columns())?;
        sql.execute(&self.pool)
            .await
            .map_err(|e| DatabaseError::from_write(e, "folder"))
    }

    async fn delete_note(&self, id: i64) -> Result<u64, DatabaseError> {
        let sql = QueryBuilder::new(NOTES)?.delete_by_id(id);
        Ok(sql.execute(&self.pool).await?)
    }
}

#[async_trait]
impl Storage for PgStore {
    async fn health_check(&self) -> Result<(), DatabaseError> {
        DatabaseManager::health_check(&self.pool).await
    }
}
