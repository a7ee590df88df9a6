use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::database::query_builder::SqlParam;

/// Row of the `notes` table. `modified` is stamped by storage on insert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Note {
    pub id: i64,
    pub name: String,
    pub modified: DateTime<Utc>,
    pub folder_id: i64,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewNote {
    pub name: String,
    pub folder_id: i64,
    pub content: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotePatch {
    pub name: Option<String>,
    pub content: Option<String>,
    pub folder_id: Option<i64>,
}

impl NewNote {
    pub fn columns(self) -> Vec<(&'static str, SqlParam)> {
        vec![
            ("name", SqlParam::from(self.name)),
            ("folder_id", SqlParam::from(self.folder_id)),
            ("content", SqlParam::from(self.content)),
        ]
    }
}

impl NotePatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.content.is_none() && self.folder_id.is_none()
    }

    pub fn columns(self) -> Vec<(&'static str, SqlParam)> {
        let mut columns = Vec::new();
        if let Some(name) = self.name {
            columns.push(("name", SqlParam::from(name)));
        }
        if let Some(content) = self.content {
            columns.push(("content", SqlParam::from(content)));
        }
        if let Some(folder_id) = self.folder_id {
            columns.push(("folder_id", SqlParam::from(folder_id)));
        }
        columns
    }

    pub fn apply(self, note: &mut Note) {
        if let Some(name) = self.name {
            note.name = name;
        }
        if let Some(content) = self.content {
            note.content = content;
        }
        if let Some(folder_id) = self.folder_id {
            note.folder_id = folder_id;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patch_columns_only_include_supplied_fields() {
        let patch = NotePatch {
            name: Some("X".to_string()),
            ..Default::default()
        };
        assert!(!patch.is_empty());
        assert_eq!(patch.columns(), vec![("name", SqlParam::from("X"))]);
        assert!(NotePatch::default().is_empty());
    }

    #[test]
    fn apply_leaves_other_fields_untouched() {
        let mut note = Note {
            id: 1,
            name: "N".to_string(),
            modified: Utc::now(),
            folder_id: 1,
            content: "C".to_string(),
        };
        NotePatch {
            folder_id: Some(2),
            ..Default::default()
        }
        .apply(&mut note);
        assert_eq!(note.folder_id, 2);
        assert_eq!(note.name, "N");
        assert_eq!(note.content, "C");
    }
}
