use std::collections::HashSet;
use std::sync::Arc;

use hearth_core::{HearthConfig, HearthError, ResourceConnector, ResourceRepository, TaskHandle};
use hearth_middleware::CacheStore;

/// Orchestrator that merges the local store with external feeds behind a shared cache.
pub struct Hearth {
    pub(crate) repository: Arc<dyn ResourceRepository>,
    pub(crate) connectors: Vec<Arc<dyn ResourceConnector>>,
    pub(crate) cache: Arc<CacheStore>,
    pub(crate) cfg: HearthConfig,
}

/// Builder for constructing a [`Hearth`] orchestrator.
pub struct HearthBuilder {
    repository: Option<Arc<dyn ResourceRepository>>,
    connectors: Vec<Arc<dyn ResourceConnector>>,
    cache: Option<Arc<CacheStore>>,
    cfg: HearthConfig,
}

impl Default for HearthBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl HearthBuilder {
    /// Builder with default configuration, no store and no connectors.
    #[must_use]
    pub fn new() -> Self {
        Self {
            repository: None,
            connectors: Vec::new(),
            cache: None,
            cfg: HearthConfig::default(),
        }
    }

    /// Set the local resource store. Required.
    #[must_use]
    pub fn with_repository(mut self, repository: Arc<dyn ResourceRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    /// Register an external feed under its connector name.
    ///
    /// A later connector with the same name replaces the earlier one.
    #[must_use]
    pub fn with_connector(mut self, connector: Arc<dyn ResourceConnector>) -> Self {
        self.connectors.push(connector);
        self
    }

    /// Share an existing cache store instead of building one from the configuration.
    #[must_use]
    pub fn cache(mut self, cache: Arc<CacheStore>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Replace the configuration.
    #[must_use]
    pub fn config(mut self, cfg: HearthConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Name the connector consulted when the local store has nothing to offer.
    #[must_use]
    pub fn default_external_source(mut self, source: impl Into<String>) -> Self {
        self.cfg.default_external_source = source.into();
        self
    }

    /// Set the shared secret for admin operations.
    #[must_use]
    pub fn admin_api_key(mut self, key: impl Into<String>) -> Self {
        self.cfg.admin_api_key = Some(key.into());
        self
    }

    /// Build the orchestrator.
    ///
    /// # Errors
    /// Returns `InvalidArg` when no repository was provided, when the admin
    /// key is too short, or when the configured remote cache is unusable.
    pub fn build(self) -> Result<Hearth, HearthError> {
        let repository = self.repository.ok_or_else(|| {
            HearthError::InvalidArg(
                "no repository registered; add one via with_repository(...)".to_string(),
            )
        })?;

        if let Some(key) = &self.cfg.admin_api_key
            && key.chars().count() < hearth_core::MIN_ADMIN_KEY_LEN
        {
            return Err(HearthError::InvalidArg(format!(
                "admin api key must be at least {} characters",
                hearth_core::MIN_ADMIN_KEY_LEN
            )));
        }

        // Last registration wins; keep first-seen order otherwise.
        let mut seen: HashSet<&'static str> = HashSet::new();
        let mut connectors: Vec<Arc<dyn ResourceConnector>> = Vec::new();
        for c in self.connectors.into_iter().rev() {
            if seen.insert(c.name()) {
                connectors.push(c);
            }
        }
        connectors.reverse();

        let cache = match self.cache {
            Some(cache) => cache,
            None => Arc::new(CacheStore::new(self.cfg.cache.clone())?),
        };

        Ok(Hearth {
            repository,
            connectors,
            cache,
            cfg: self.cfg,
        })
    }
}

impl Hearth {
    /// Start building a new `Hearth` instance.
    ///
    /// ```rust,ignore
    /// let hearth = hearth::Hearth::builder()
    ///     .with_repository(Arc::new(store))
    ///     .with_connector(Nyc311Connector::rate_limited()?.build())
    ///     .config(HearthConfig::from_env()?)
    ///     .build()?;
    /// ```
    #[must_use]
    pub fn builder() -> HearthBuilder {
        HearthBuilder::new()
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &HearthConfig {
        &self.cfg
    }

    /// The shared cache store.
    #[must_use]
    pub const fn cache(&self) -> &Arc<CacheStore> {
        &self.cache
    }

    /// Registered connectors, in registration order.
    #[must_use]
    pub fn connectors(&self) -> &[Arc<dyn ResourceConnector>] {
        &self.connectors
    }

    /// The connector registered under `source`.
    #[must_use]
    pub fn connector(&self, source: &str) -> Option<&Arc<dyn ResourceConnector>> {
        self.connectors.iter().find(|c| c.name() == source)
    }

    /// Start the periodic cache sweep at the configured interval.
    ///
    /// The sweep stops when the returned handle is stopped or dropped.
    #[must_use]
    pub fn start_cache_sweeper(&self) -> TaskHandle {
        self.cache.spawn_sweeper(self.cfg.cache.sweep_interval)
    }
}
