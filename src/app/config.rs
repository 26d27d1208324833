//! Runtime configuration read from environment variables.

use crate::{
  chat::HttpChatConfig,
  error::{Error, Result},
  store::remote::RemoteConfig,
};
use std::{net::SocketAddr, path::PathBuf, time::Duration};

/// `--help` text listing every variable [`Config::from_vars`] reads.
pub const USAGE: &str = "\
Usage: folio [--version]

Configuration comes from the environment:
  FOLIO_ADDR / PORT          listen address (default 127.0.0.1:3000)
  FOLIO_STORE                memory | file | sqlite | supabase
  FOLIO_GUESTBOOK_FILE       file store path (default data/guestbook.json)
  FOLIO_DATABASE             sqlite URL (default sqlite://data/guestbook.db)
  SUPABASE_URL, SUPABASE_KEY remote table credentials
  FOLIO_SUPABASE_TABLE       remote table name (default guestbook)
  FOLIO_REMOTE_TIMEOUT_SECS  remote and chat request timeout (default 10)
  FOLIO_PROFILE_FILE         profile JSON (default data/profile.json)
  FOLIO_PUBLIC_DIR           static frontend (default public)
  FOLIO_CHAT_URL             chat provider endpoint; chat disabled if unset
  FOLIO_CHAT_MODEL           chat model name (default llama3)
  FOLIO_CHAT_API_KEY         bearer token for the chat provider
  FOLIO_EXPOSE_ERRORS        true to return raw storage/upstream faults
  RUST_LOG                   log filter (default info)
";

/// Which guestbook backend to run, with its settings.
#[derive(Debug, Clone)]
pub enum StoreConfig {
  Memory,
  File(PathBuf),
  Sqlite(String),
  Supabase(RemoteConfig),
}

#[derive(Debug, Clone)]
pub struct Config {
  pub addr: SocketAddr,
  pub store: StoreConfig,
  pub profile_file: PathBuf,
  pub public_dir: PathBuf,
  pub chat: Option<HttpChatConfig>,
  /// Include raw storage/upstream fault text in error responses.
  pub expose_errors: bool,
}

impl Config {
  pub fn from_env() -> Result<Self> {
    Self::from_vars(|key| std::env::var(key).ok())
  }

  /// Build from any variable lookup. Empty values count as unset.
  pub fn from_vars<F>(lookup: F) -> Result<Self>
  where
    F: Fn(&str) -> Option<String>,
  {
    let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    let addr = match (var("FOLIO_ADDR"), var("PORT")) {
      (Some(addr), _) => addr,
      (None, Some(port)) => format!("0.0.0.0:{port}"),
      (None, None) => "127.0.0.1:3000".to_string(),
    };
    let addr: SocketAddr = addr
      .parse()
      .map_err(|e| Error::config(format!("invalid listen address {addr:?}: {e}")))?;

    let timeout = match var("FOLIO_REMOTE_TIMEOUT_SECS") {
      Some(s) => Duration::from_secs(
        s.parse()
          .map_err(|e| Error::config(format!("FOLIO_REMOTE_TIMEOUT_SECS={s:?}: {e}")))?,
      ),
      None => Duration::from_secs(10),
    };

    let supabase = match (var("SUPABASE_URL"), var("SUPABASE_KEY")) {
      (Some(url), Some(key)) => Some(RemoteConfig {
        url,
        key,
        table: var("FOLIO_SUPABASE_TABLE").unwrap_or_else(|| "guestbook".to_string()),
        timeout,
      }),
      _ => None,
    };

    let kind = var("FOLIO_STORE").map(|s| s.to_ascii_lowercase());
    let store = match (kind.as_deref(), supabase) {
      (Some("memory"), _) => StoreConfig::Memory,
      (Some("sqlite"), _) => StoreConfig::Sqlite(
        var("FOLIO_DATABASE").unwrap_or_else(|| "sqlite://data/guestbook.db".to_string()),
      ),
      (Some("supabase") | None, Some(remote)) => StoreConfig::Supabase(remote),
      (Some("supabase"), None) => {
        return Err(Error::config(
          "FOLIO_STORE=supabase needs SUPABASE_URL and SUPABASE_KEY",
        ));
      }
      (Some("file"), _) | (None, None) => StoreConfig::File(
        var("FOLIO_GUESTBOOK_FILE")
          .unwrap_or_else(|| "data/guestbook.json".to_string())
          .into(),
      ),
      (Some(other), _) => {
        return Err(Error::config(format!(
          "unknown FOLIO_STORE {other:?} (expected memory, file, sqlite or supabase)"
        )));
      }
    };

    let chat = var("FOLIO_CHAT_URL").map(|url| HttpChatConfig {
      url,
      model: var("FOLIO_CHAT_MODEL").unwrap_or_else(|| "llama3".to_string()),
      api_key: var("FOLIO_CHAT_API_KEY"),
      timeout,
    });

    let expose_errors = match var("FOLIO_EXPOSE_ERRORS").as_deref() {
      None => false,
      Some("1" | "true" | "yes") => true,
      Some("0" | "false" | "no") => false,
      Some(other) => {
        return Err(Error::config(format!("FOLIO_EXPOSE_ERRORS={other:?}")));
      }
    };

    Ok(Config {
      addr,
      store,
      profile_file: var("FOLIO_PROFILE_FILE")
        .unwrap_or_else(|| "data/profile.json".to_string())
        .into(),
      public_dir: var("FOLIO_PUBLIC_DIR")
        .unwrap_or_else(|| "public".to_string())
        .into(),
      chat,
      expose_errors,
    })
  }
}
