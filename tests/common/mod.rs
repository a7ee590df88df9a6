#![allow(dead_code)]

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde_json::{json, Value};

use noteful_api::config::AppConfig;
use noteful_api::database::models::{Folder, NewFolder, NewNote, Note};
use noteful_api::database::{FolderStore, MemoryStore, NoteStore, Storage};
use noteful_api::{app, AppState};

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    pub store: Arc<MemoryStore>,
    pub client: reqwest::Client,
}

impl TestServer {
    /// Starts the full application (same layers as `serve`) on a free port,
    /// backed by a fresh in-memory store.
    pub async fn spawn() -> Result<Self> {
        let store = Arc::new(MemoryStore::new());
        Self::spawn_with(store.clone(), store).await
    }

    pub async fn spawn_with(store: Arc<MemoryStore>, handle: Arc<dyn Storage>) -> Result<Self> {
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let mut config = AppConfig::development();
        config.api.enable_request_logging = false;
        let state = AppState::new(handle, &config.api.base_path);
        let router = app(state, &config);

        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .context("failed to bind test listener")?;
        tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });

        let server = Self {
            port,
            base_url,
            store,
            client: reqwest::Client::new(),
        };
        server.wait_ready(Duration::from_secs(5)).await?;
        Ok(server)
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            if let Ok(resp) = self.client.get(self.url("/health")).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Inserts the standard folder fixtures directly into storage.
    pub async fn seed_folders(&self) -> Result<Vec<Folder>> {
        let mut folders = Vec::new();
        for name in make_folder_names() {
            folders.push(self.store.insert_folder(NewFolder { name: name.to_string() }).await?);
        }
        Ok(folders)
    }

    /// Inserts the folder fixtures and one note per folder.
    pub async fn seed_notes(&self) -> Result<Vec<Note>> {
        let folders = self.seed_folders().await?;
        let mut notes = Vec::new();
        for (i, folder) in folders.iter().enumerate() {
            let note = NewNote {
                name: format!("Note {}", i + 1),
                folder_id: folder.id,
                content: format!("Content of note {}", i + 1),
            };
            notes.push(self.store.insert_note(note).await?);
        }
        Ok(notes)
    }
}

pub fn make_folder_names() -> [&'static str; 4] {
    ["Important", "Super", "Spangley", "Groovy"]
}

pub const MALICIOUS_TEXT: &str = r#"Inject <script>alert("xss");</script>"#;
pub const SANITIZED_TEXT: &str = r#"Inject &lt;script&gt;alert("xss");&lt;/script&gt;"#;

pub fn error_message(message: &str) -> Value {
    json!({ "error": { "message": message } })
}
