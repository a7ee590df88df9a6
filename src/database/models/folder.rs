use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::database::query_builder::SqlParam;

/// Row of the `folders` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Folder {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewFolder {
    pub name: String,
}

/// Partial update; `None` fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FolderPatch {
    pub name: Option<String>,
}

impl NewFolder {
    pub fn columns(self) -> Vec<(&'static str, SqlParam)> {
        vec![("name", SqlParam::from(self.name))]
    }
}

impl FolderPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
    }

    pub fn columns(self) -> Vec<(&'static str, SqlParam)> {
        let mut columns = Vec::new();
        if let Some(name) = self.name {
            columns.push(("name", SqlParam::from(name)));
        }
        columns
    }

    pub fn apply(self, folder: &mut Folder) {
        if let Some(name) = self.name {
            folder.name = name;
        }
    }
}
