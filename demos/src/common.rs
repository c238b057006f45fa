use std::sync::Arc;

use hearth::{Hearth, HearthConfig, HearthError};
use hearth_core::ResourceConnector;
use hearth_mock::{InMemoryRepository, MockConnector};
use hearth_nyc311::{Nyc311Config, Nyc311Connector};

/// Set to run the demos offline against the mock feed.
pub const USE_MOCK_ENV: &str = "HEARTH_DEMOS_USE_MOCK";

/// Install a human-friendly subscriber filtered by `RUST_LOG`.
///
/// Suggested: `RUST_LOG=info,hearth=debug,hearth::audit=info`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(true)
        .try_init();
}

/// Return a feed for demos: the mock in CI, otherwise rate-limited NYC 311.
///
/// # Errors
/// Returns `InvalidArg` when the NYC 311 HTTP client cannot be built.
pub fn get_connector(cfg: &HearthConfig) -> Result<Arc<dyn ResourceConnector>, HearthError> {
    if std::env::var(USE_MOCK_ENV).is_ok() {
        println!("--- (Using Mock Connector for CI) ---");
        Ok(Arc::new(MockConnector::new()))
    } else {
        Ok(Nyc311Connector::rate_limited_with(Nyc311Config::from_hearth_config(cfg))?.build())
    }
}

/// Orchestrator over the fixture store and the demo feed, configured from the environment.
///
/// # Errors
/// Propagates configuration and builder errors.
pub fn build_hearth() -> Result<Hearth, HearthError> {
    let cfg = HearthConfig::from_env()?;
    let connector = get_connector(&cfg)?;
    let source = connector.name();
    Hearth::builder()
        .config(cfg)
        .with_repository(Arc::new(InMemoryRepository::with_fixtures()))
        .with_connector(connector)
        .default_external_source(source)
        .build()
}
