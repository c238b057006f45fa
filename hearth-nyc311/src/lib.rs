//! hearth-nyc311
//!
//! Connector for the NYC 311 service directory. Implements
//! [`ResourceConnector`] over the directory's REST API and normalizes its
//! payloads into canonical [`ExternalService`] records.
#![warn(missing_docs)]

mod builder;
mod config;
pub mod record;

use async_trait::async_trait;
use hearth_core::{
    ConnectorKey, ExternalQuery, ExternalService, HearthError, ResourceConnector,
};
use reqwest::{Client, RequestBuilder, StatusCode};
use url::Url;

pub use config::{DEFAULT_BASE_URL, Nyc311Config};
pub use record::{Nyc311Service, normalize_nyc311};

/// Public connector type. Compose it through [`Nyc311Connector::new`] or
/// [`Nyc311Connector::rate_limited`].
pub struct Nyc311Connector {
    client: Client,
    base: Url,
    config: Nyc311Config,
}

impl Nyc311Connector {
    /// Static connector key, doubling as the source id of its records.
    pub const KEY: ConnectorKey = ConnectorKey::new("nyc311");

    /// Construct an unwrapped connector from `config`.
    ///
    /// # Errors
    /// Returns `InvalidArg` when the base URL cannot be parsed or the HTTP
    /// client cannot be built.
    pub fn from_config(config: Nyc311Config) -> Result<Self, HearthError> {
        let base = Url::parse(&config.base_url)
            .map_err(|e| HearthError::InvalidArg(format!("nyc311 base url: {e}")))?;
        if base.cannot_be_a_base() {
            return Err(HearthError::InvalidArg(format!(
                "nyc311 base url '{}' cannot be a base",
                config.base_url
            )));
        }
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| HearthError::InvalidArg(format!("nyc311 http client: {e}")))?;
        Ok(Self {
            client,
            base,
            config,
        })
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &Nyc311Config {
        &self.config
    }

    fn err(msg: impl Into<String>) -> HearthError {
        HearthError::connector(Self::KEY.as_str(), msg)
    }

    fn services_url(&self, id: Option<&str>) -> Result<Url, HearthError> {
        let mut url = self.base.clone();
        {
            let mut segs = url
                .path_segments_mut()
                .map_err(|()| Self::err("base url cannot be a base"))?;
            segs.pop_if_empty().push("services");
            if let Some(id) = id {
                segs.push(id);
            }
        }
        Ok(url)
    }

    fn with_headers(&self, req: RequestBuilder) -> RequestBuilder {
        let req = req.header(reqwest::header::CONTENT_TYPE, "application/json");
        match &self.config.api_key {
            Some(key) => req.header("ApiKey", key),
            None => req,
        }
    }

    async fn send(&self, url: Url) -> Result<Option<reqwest::Response>, HearthError> {
        let resp = self
            .with_headers(self.client.get(url))
            .send()
            .await
            .map_err(|e| Self::err(format!("request failed: {e}")))?;
        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Self::err(format!("API error ({}): {body}", status.as_u16())));
        }
        Ok(Some(resp))
    }
}

#[async_trait]
impl ResourceConnector for Nyc311Connector {
    fn name(&self) -> &'static str {
        Self::KEY.as_str()
    }

    fn label(&self) -> &'static str {
        "NYC 311 open data"
    }

    #[tracing::instrument(level = "debug", skip(self), fields(connector = "nyc311"))]
    async fn fetch_records(
        &self,
        query: &ExternalQuery,
    ) -> Result<Vec<ExternalService>, HearthError> {
        let mut url = self.services_url(None)?;
        {
            let mut qp = url.query_pairs_mut();
            if let Some(search) = &query.search {
                qp.append_pair("keyword", search);
            }
            if let Some(city) = &query.city {
                qp.append_pair("borough", city);
            }
            if let Some(zip) = &query.zip {
                qp.append_pair("zip", zip);
            }
            qp.append_pair("$limit", &self.config.effective_limit(query.limit).to_string());
            qp.append_pair("$offset", &query.offset.to_string());
        }

        // A missing collection is an empty one.
        let Some(resp) = self.send(url).await? else {
            return Ok(Vec::new());
        };
        let raw: Vec<Nyc311Service> = resp
            .json()
            .await
            .map_err(|e| Self::err(format!("invalid response body: {e}")))?;
        tracing::debug!(count = raw.len(), "nyc311 services fetched");
        Ok(raw
            .iter()
            .map(|r| normalize_nyc311(r, self.name()))
            .collect())
    }

    #[tracing::instrument(level = "debug", skip(self), fields(connector = "nyc311"))]
    async fn fetch_by_id(&self, id: &str) -> Result<Option<ExternalService>, HearthError> {
        let url = self.services_url(Some(id))?;
        let Some(resp) = self.send(url).await? else {
            return Ok(None);
        };
        let raw: Nyc311Service = resp
            .json()
            .await
            .map_err(|e| Self::err(format!("invalid response body: {e}")))?;
        Ok(Some(normalize_nyc311(&raw, self.name())))
    }
}
