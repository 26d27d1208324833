//! Application setup and runtime.

use crate::{
  chat::{ChatBackend, DisabledChat, HttpChat},
  error::Result,
  http,
  profile::{FileProfile, ProfileSource},
  store::{FileStore, GuestbookStore, MemoryStore, RemoteStore, SqliteStore},
};
use std::sync::Arc;
use tracing::{info, warn};

pub mod config;

pub use config::{Config, StoreConfig};

/// Shared application state, built once at startup and handed to every
/// handler.
#[derive(Clone)]
pub struct AppState {
  pub store: Arc<dyn GuestbookStore>,
  pub profile: Arc<dyn ProfileSource>,
  pub chat: Arc<dyn ChatBackend>,
  pub expose_errors: bool,
}

/// Construct the configured guestbook backend.
pub async fn open_store(config: &StoreConfig) -> Result<Arc<dyn GuestbookStore>> {
  let store: Arc<dyn GuestbookStore> = match config {
    StoreConfig::Memory => {
      warn!("guestbook uses in-memory storage; entries are lost on restart");
      Arc::new(MemoryStore::new())
    }
    StoreConfig::File(path) => Arc::new(FileStore::new(path.clone())),
    StoreConfig::Sqlite(url) => Arc::new(SqliteStore::connect(url).await?),
    StoreConfig::Supabase(remote) => Arc::new(RemoteStore::new(remote)?),
  };
  Ok(store)
}

/// Build state from configuration.
pub async fn build_state(config: &Config) -> Result<AppState> {
  let store = open_store(&config.store).await?;
  let chat: Arc<dyn ChatBackend> = match &config.chat {
    Some(chat) => Arc::new(HttpChat::new(chat.clone())?),
    None => Arc::new(DisabledChat),
  };
  Ok(AppState {
    store,
    profile: Arc::new(FileProfile::new(config.profile_file.clone())),
    chat,
    expose_errors: config.expose_errors,
  })
}

/// Start the HTTP server with configuration from the environment.
pub async fn run() -> std::result::Result<(), Box<dyn std::error::Error + Send + Sync>> {
  crate::util::init_tracing();

  let config = Config::from_env()?;
  let state = build_state(&config).await?;

  info!(backend = state.store.backend(), "guestbook store ready");
  if config.chat.is_none() {
    info!("chat proxy disabled (set FOLIO_CHAT_URL to enable)");
  }

  let app = http::with_frontend(http::build_router(state), &config.public_dir);

  info!("folio listening:      http://{}/", config.addr);
  info!("guestbook endpoint:   http://{}/api/guestbook", config.addr);

  let listener = tokio::net::TcpListener::bind(config.addr).await?;
  axum::serve(listener, app).await?;
  Ok(())
}
