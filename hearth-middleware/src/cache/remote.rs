use std::time::Duration;

use hearth_types::{HearthError, RemoteCacheConfig};
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use url::Url;

use super::StoredEntry;

/// Reply envelope of the REST cache: `{"result": ...}` or `{"error": "..."}`.
#[derive(Debug, Deserialize)]
struct Reply {
    #[serde(default)]
    result: serde_json::Value,
    #[serde(default)]
    error: Option<String>,
}

fn backend_err(msg: impl std::fmt::Display) -> HearthError {
    HearthError::CacheBackend(msg.to_string())
}

/// Escape glob metacharacters so a prefix matches literally.
fn glob_escape(prefix: &str) -> String {
    let mut out = String::with_capacity(prefix.len() + 1);
    for c in prefix.chars() {
        if matches!(c, '*' | '?' | '[' | ']' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('*');
    out
}

fn expiry_secs(lifetime: Duration) -> u64 {
    let secs = lifetime.as_secs() + u64::from(lifetime.subsec_nanos() > 0);
    secs.max(1)
}

/// Remote shared backend speaking a Redis-over-REST protocol.
///
/// Commands are path segments (`/get/{key}`, `/set/{key}?EX={secs}`,
/// `/del/{key}`, `/keys/{pattern}`) authenticated with a bearer token.
#[derive(Debug, Clone)]
pub struct RestBackend {
    client: Client,
    base: Url,
    token: String,
}

impl RestBackend {
    /// Build a backend from its configuration.
    ///
    /// # Errors
    /// Returns `InvalidArg` when the URL cannot serve as a base or the HTTP
    /// client cannot be constructed.
    pub fn new(cfg: &RemoteCacheConfig) -> Result<Self, HearthError> {
        let base = Url::parse(&cfg.url)
            .map_err(|e| HearthError::InvalidArg(format!("cache url: {e}")))?;
        if base.cannot_be_a_base() {
            return Err(HearthError::InvalidArg(format!(
                "cache url '{}' cannot be a base",
                cfg.url
            )));
        }
        let client = Client::builder()
            .timeout(cfg.timeout)
            .build()
            .map_err(|e| HearthError::InvalidArg(format!("cache http client: {e}")))?;
        Ok(Self {
            client,
            base,
            token: cfg.token.clone(),
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, HearthError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| backend_err("cache url cannot be a base"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn call(&self, req: RequestBuilder) -> Result<serde_json::Value, HearthError> {
        let resp = req
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(backend_err)?;
        let status = resp.status();
        if !status.is_success() {
            return Err(backend_err(format!("status {status}")));
        }
        let reply: Reply = resp.json().await.map_err(backend_err)?;
        match reply.error {
            Some(e) => Err(backend_err(e)),
            None => Ok(reply.result),
        }
    }

    /// Fetch an entry. Payloads that do not decode are reported as absent.
    ///
    /// # Errors
    /// Returns `CacheBackend` on transport or protocol failure.
    pub async fn get(&self, key: &str) -> Result<Option<StoredEntry>, HearthError> {
        let url = self.endpoint(&["get", key])?;
        let result = self.call(self.client.get(url)).await?;
        let Some(raw) = result.as_str() else {
            if !result.is_null() {
                tracing::warn!(key, "remote cache returned a non-string payload");
            }
            return Ok(None);
        };
        match serde_json::from_str::<StoredEntry>(raw) {
            Ok(entry) => Ok(Some(entry)),
            Err(e) => {
                tracing::warn!(key, error = %e, "discarding malformed remote cache payload");
                Ok(None)
            }
        }
    }

    /// Store an entry for `lifetime` (rounded up to whole seconds).
    ///
    /// # Errors
    /// Returns `CacheBackend` on transport or protocol failure.
    pub async fn set(
        &self,
        key: &str,
        entry: &StoredEntry,
        lifetime: Duration,
    ) -> Result<(), HearthError> {
        let body = serde_json::to_string(entry).map_err(backend_err)?;
        let mut url = self.endpoint(&["set", key])?;
        url.query_pairs_mut()
            .append_pair("EX", &expiry_secs(lifetime).to_string());
        self.call(self.client.post(url).body(body)).await?;
        Ok(())
    }

    /// Delete a key; true when it existed.
    ///
    /// # Errors
    /// Returns `CacheBackend` on transport or protocol failure.
    pub async fn delete(&self, key: &str) -> Result<bool, HearthError> {
        let url = self.endpoint(&["del", key])?;
        let result = self.call(self.client.get(url)).await?;
        Ok(result.as_u64().unwrap_or(0) > 0)
    }

    /// Delete every key starting with `prefix`.
    ///
    /// # Errors
    /// Returns `CacheBackend` when the key listing fails. Individual delete
    /// failures are logged and skipped.
    pub async fn delete_prefix(&self, prefix: &str) -> Result<usize, HearthError> {
        let url = self.endpoint(&["keys", &glob_escape(prefix)])?;
        let result = self.call(self.client.get(url)).await?;
        let keys: Vec<String> = serde_json::from_value(result).map_err(backend_err)?;
        let mut removed = 0;
        for key in keys {
            match self.delete(&key).await {
                Ok(true) => removed += 1,
                Ok(false) => {}
                Err(e) => tracing::warn!(key = %key, error = %e, "remote delete failed"),
            }
        }
        Ok(removed)
    }
}
