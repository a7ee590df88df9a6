//! Runs against a real database only when `DATABASE_URL` is set.

use anyhow::Result;

use noteful_api::config::AppConfig;
use noteful_api::database::models::{FolderPatch, NewFolder, NewNote, NotePatch};
use noteful_api::database::{DatabaseError, DatabaseManager, FolderStore, NoteStore, PgStore, Storage};

async fn store() -> Result<Option<PgStore>> {
    let _ = dotenvy::dotenv();
    let mut config = AppConfig::development().database;
    match std::env::var("DATABASE_URL") {
        Ok(url) if !url.trim().is_empty() => config.url = Some(url),
        _ => {
            eprintln!("DATABASE_URL not set; skipping Postgres test");
            return Ok(None);
        }
    }
    let pool = DatabaseManager::connect(&config).await?;
    DatabaseManager::migrate(&pool).await?;
    Ok(Some(PgStore::new(pool)))
}

#[tokio::test]
async fn folder_and_note_round_trip() -> Result<()> {
    let Some(store) = store().await? else {
        return Ok(());
    };
    store.health_check().await?;

    let folder = store
        .insert_folder(NewFolder { name: "Round trip".to_string() })
        .await?;
    assert_eq!(store.get_folder(folder.id).await?.as_ref(), Some(&folder));

    let note = store
        .insert_note(NewNote {
            name: "N".to_string(),
            folder_id: folder.id,
            content: "C".to_string(),
        })
        .await?;
    assert_eq!(note.folder_id, folder.id);

    let patch = NotePatch {
        name: Some("X".to_string()),
        ..Default::default()
    };
    assert_eq!(store.update_note(note.id, patch).await?, 1);
    let updated = store.get_note(note.id).await?.expect("note");
    assert_eq!(updated.name, "X");
    assert_eq!(updated.content, "C");
    assert_eq!(updated.modified, note.modified);

    let rename = FolderPatch {
        name: Some("Renamed".to_string()),
    };
    assert_eq!(store.update_folder(folder.id, rename).await?, 1);

    assert_eq!(store.delete_folder(folder.id).await?, 1);
    assert!(store.get_folder(folder.id).await?.is_none());
    assert!(store.get_note(note.id).await?.is_none(), "delete should cascade");
    Ok(())
}

#[tokio::test]
async fn note_in_missing_folder_is_reported() -> Result<()> {
    let Some(store) = store().await? else {
        return Ok(());
    };

    let result = store
        .insert_note(NewNote {
            name: "N".to_string(),
            folder_id: i64::MAX,
            content: "C".to_string(),
        })
        .await;
    assert!(matches!(result, Err(DatabaseError::MissingReference("folder"))));
    Ok(())
}
