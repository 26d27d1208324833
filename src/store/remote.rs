//! Guestbook backed by a remote REST table (PostgREST / Supabase).
//!
//! Ordering, id assignment and durability come from the remote service.
//! Every transport or service fault surfaces as `Error::Storage` carrying
//! the service's own message.

use super::GuestbookStore;
use crate::{
  error::{Error, Result},
  models::guestbook::{entry::Entry, new_entry::NewEntry},
};
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct RemoteConfig {
  /// Project URL, e.g. `https://xyz.supabase.co`.
  pub url: String,
  pub key: String,
  pub table: String,
  pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct RemoteStore {
  http: Client,
  endpoint: String,
  key: String,
}

#[derive(Serialize)]
struct InsertRow<'a> {
  name: &'a str,
  message: &'a str,
}

/// Error body shapes returned by PostgREST and the Supabase gateway.
#[derive(Debug, Default, Deserialize)]
struct Fault {
  message: Option<String>,
  error: Option<String>,
  msg: Option<String>,
}

impl RemoteStore {
  pub fn new(config: &RemoteConfig) -> Result<Self> {
    let http = Client::builder()
      .timeout(config.timeout)
      .build()
      .map_err(|e| Error::storage(format!("remote client: {e}")))?;
    let endpoint = format!(
      "{}/rest/v1/{}",
      config.url.trim_end_matches('/'),
      config.table
    );
    Ok(Self {
      http,
      endpoint,
      key: config.key.clone(),
    })
  }

  fn request(&self, method: Method) -> RequestBuilder {
    self
      .http
      .request(method, &self.endpoint)
      .header("apikey", &self.key)
      .bearer_auth(&self.key)
  }

  async fn send(&self, req: RequestBuilder) -> Result<Response> {
    let resp = req
      .send()
      .await
      .map_err(|e| Error::storage(format!("remote request failed: {e}")))?;
    let status = resp.status();
    if status.is_success() {
      return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(Error::Storage(fault_message(status.as_u16(), &body)))
  }
}

/// Best message available from a failed response.
fn fault_message(status: u16, body: &str) -> String {
  let fault: Fault = serde_json::from_str(body).unwrap_or_default();
  match fault.message.or(fault.error).or(fault.msg) {
    Some(m) => m,
    None if body.trim().is_empty() => format!("remote returned HTTP {status}"),
    None => format!("remote returned HTTP {status}: {}", body.trim()),
  }
}

#[async_trait]
impl GuestbookStore for RemoteStore {
  fn backend(&self) -> &'static str {
    "supabase"
  }

  async fn list(&self) -> Result<Vec<Entry>> {
    let req = self
      .request(Method::GET)
      .query(&[("select", "*"), ("order", "created_at.desc")]);
    let rows: Vec<Entry> = self
      .send(req)
      .await?
      .json()
      .await
      .map_err(|e| Error::storage(format!("remote list decode: {e}")))?;
    debug!(count = rows.len(), "remote guestbook listed");
    Ok(rows)
  }

  async fn insert(&self, draft: NewEntry) -> Result<Entry> {
    let row = [InsertRow {
      name: draft.name(),
      message: draft.message(),
    }];
    let req = self
      .request(Method::POST)
      .header("Prefer", "return=representation")
      .json(&row);
    let rows: Vec<Entry> = self
      .send(req)
      .await?
      .json()
      .await
      .map_err(|e| Error::storage(format!("remote insert decode: {e}")))?;
    let entry = rows
      .into_iter()
      .next()
      .ok_or_else(|| Error::storage("remote insert returned no rows"))?;
    info!(id = entry.id, "remote guestbook row inserted");
    Ok(entry)
  }
}
