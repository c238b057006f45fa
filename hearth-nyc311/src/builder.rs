use std::sync::Arc;

use hearth_core::{HearthError, ResourceConnector};
use hearth_middleware::ConnectorBuilder as GenericConnectorBuilder;

use crate::{Nyc311Config, Nyc311Connector};

/// Builder type alias specialized for NYC 311 connectors.
pub type Nyc311ConnectorBuilder = GenericConnectorBuilder;

impl Nyc311Connector {
    /// Returns an unconfigured builder around the default connector.
    ///
    /// Customize with the builder methods before calling `.build()`.
    ///
    /// # Errors
    /// Returns `InvalidArg` when the HTTP client cannot be built.
    pub fn new() -> Result<Nyc311ConnectorBuilder, HearthError> {
        let raw: Arc<dyn ResourceConnector> = Arc::new(Self::from_config(Nyc311Config::default())?);
        Ok(GenericConnectorBuilder::new(raw))
    }

    /// Returns a builder enforcing the API's published quota
    /// (10 000 requests per day, 100 per minute).
    ///
    /// # Errors
    /// Returns `InvalidArg` when the HTTP client cannot be built.
    pub fn rate_limited() -> Result<Nyc311ConnectorBuilder, HearthError> {
        Self::rate_limited_with(Nyc311Config::default())
    }

    /// Like [`rate_limited`](Self::rate_limited) with explicit settings.
    ///
    /// # Errors
    /// Returns `InvalidArg` when the base URL or HTTP client is unusable.
    pub fn rate_limited_with(config: Nyc311Config) -> Result<Nyc311ConnectorBuilder, HearthError> {
        let limits = config.rate_limit;
        let raw: Arc<dyn ResourceConnector> = Arc::new(Self::from_config(config)?);
        Ok(GenericConnectorBuilder::new(raw).with_rate_limit(limits))
    }
}
