//! Builder for composing connectors with middleware layers.
//!
//! # Middleware Ordering Convention
//!
//! Middleware layers form an "onion" around the raw connector:
//!
//! ```text
//! Aggregation request
//!     ↓
//! Outermost Middleware (e.g., RateLimited - rejects before any I/O)
//!     ↓
//! Raw Connector (e.g., NYC 311 - makes actual API calls)
//! ```
//!
//! ## Storage vs Application Order
//!
//! The `layers` vector stores middleware in **outermost-first** order (last
//! added = outermost), and they are **applied in reverse** during `build()`
//! to construct the proper nesting.
//!
//! This convention matches [`MiddlewareStack`](hearth_types::MiddlewareStack) where
//! `layers[0]` is the outermost layer.

use std::sync::Arc;

use hearth_core::{Middleware, ResourceConnector};
use hearth_types::{MiddlewareLayer, MiddlewareStack, RateLimitConfig};
use serde_json::json;

use crate::rate_limit::RateLimitMiddleware;

const RATE_LIMIT_LAYER: &str = "RateLimitedConnector";

fn rate_limit_from_json(cfg: &serde_json::Value) -> RateLimitConfig {
    let defaults = RateLimitConfig::default();
    RateLimitConfig {
        requests_per_day: cfg
            .get("requests_per_day")
            .and_then(serde_json::Value::as_u64)
            .unwrap_or(defaults.requests_per_day),
        requests_per_minute: cfg
            .get("requests_per_minute")
            .and_then(serde_json::Value::as_u64)
            .unwrap_or(defaults.requests_per_minute),
    }
}

/// Generic middleware builder for composing a connector with layered wrappers.
///
/// See [module-level documentation](self) for details on middleware ordering.
pub struct ConnectorBuilder {
    raw: Arc<dyn ResourceConnector>,
    /// Middleware layers in outermost-first order.
    layers: Vec<Box<dyn Middleware>>,
}

impl ConnectorBuilder {
    /// Create a new builder from a raw, unwrapped connector.
    #[must_use]
    pub fn new(raw: Arc<dyn ResourceConnector>) -> Self {
        Self {
            raw,
            layers: Vec::new(),
        }
    }

    fn existing_rate_limit(&self) -> Option<RateLimitConfig> {
        self.layers
            .iter()
            .find(|l| l.name() == RATE_LIMIT_LAYER)
            .map(|l| rate_limit_from_json(&l.config_json()))
    }

    /// Add or replace the rate limit.
    ///
    /// The limiter is inserted at the outermost position so rejected attempts
    /// never reach inner layers.
    #[must_use]
    pub fn with_rate_limit(mut self, cfg: RateLimitConfig) -> Self {
        self.layers.retain(|m| m.name() != RATE_LIMIT_LAYER);
        self.layers.insert(0, Box::new(RateLimitMiddleware::new(cfg)));
        self
    }

    /// Remove the rate limit if present.
    #[must_use]
    pub fn without_rate_limit(mut self) -> Self {
        self.layers.retain(|m| m.name() != RATE_LIMIT_LAYER);
        self
    }

    /// Shortcut: set the daily budget (preserves the minute budget if already set).
    #[must_use]
    pub fn requests_per_day(self, limit: u64) -> Self {
        let mut cfg = self.existing_rate_limit().unwrap_or_default();
        cfg.requests_per_day = limit;
        self.with_rate_limit(cfg)
    }

    /// Shortcut: set the minute budget (preserves the daily budget if already set).
    #[must_use]
    pub fn requests_per_minute(self, limit: u64) -> Self {
        let mut cfg = self.existing_rate_limit().unwrap_or_default();
        cfg.requests_per_minute = limit;
        self.with_rate_limit(cfg)
    }

    /// Export the current middleware stack configuration for inspection.
    ///
    /// The raw connector is appended as the innermost "layer" for observability.
    #[must_use]
    pub fn to_stack(&self) -> MiddlewareStack {
        let mut stack = MiddlewareStack::new();
        for layer in &self.layers {
            stack.push_inner(MiddlewareLayer::new(layer.name(), layer.config_json()));
        }
        stack.push_inner(MiddlewareLayer::new(
            "RawConnector",
            json!({ "name": self.raw.name() }),
        ));
        stack
    }

    /// Construct a builder from a raw connector and an explicit stack.
    ///
    /// Unknown middleware names are ignored. This is the inverse of
    /// [`to_stack`](Self::to_stack).
    #[must_use]
    pub fn from_stack(raw: Arc<dyn ResourceConnector>, stack: &MiddlewareStack) -> Self {
        let mut layers: Vec<Box<dyn Middleware>> = Vec::new();
        if let Some(l) = stack.find(RATE_LIMIT_LAYER) {
            layers.push(Box::new(RateLimitMiddleware::new(rate_limit_from_json(
                &l.config,
            ))));
        }
        Self { raw, layers }
    }

    /// Build the wrapped connector, applying layers innermost first.
    #[must_use]
    pub fn build(self) -> Arc<dyn ResourceConnector> {
        let mut acc: Arc<dyn ResourceConnector> = Arc::clone(&self.raw);
        for m in self.layers.into_iter().rev() {
            acc = m.apply(acc);
        }
        acc
    }

    /// Add an arbitrary middleware layer at the outermost position.
    #[must_use]
    pub fn layer(mut self, layer: Box<dyn Middleware>) -> Self {
        self.layers.insert(0, layer);
        self
    }
}
