//! Serializable description of the wrappers around a connector.

use serde::{Deserialize, Serialize};

/// One wrapper around a connector: its name and the JSON settings that rebuild it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MiddlewareLayer {
    /// Layer name as reported by the middleware (e.g. `RateLimitedConnector`).
    pub name: String,
    /// Settings the layer was built with.
    pub config: serde_json::Value,
}

impl MiddlewareLayer {
    /// Layer named `name` with `config`.
    #[must_use]
    pub fn new<N: Into<String>>(name: N, config: serde_json::Value) -> Self {
        Self {
            name: name.into(),
            config,
        }
    }
}

/// Wrappers around a connector, outermost first.
///
/// The last layer is conventionally the raw connector itself.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MiddlewareStack {
    /// Ordered list of layers, outermost first.
    pub layers: Vec<MiddlewareLayer>,
}

impl MiddlewareStack {
    /// Empty stack.
    #[must_use]
    pub const fn new() -> Self {
        Self { layers: Vec::new() }
    }

    /// Insert a layer at the outermost position.
    pub fn push_outer(&mut self, layer: MiddlewareLayer) {
        self.layers.insert(0, layer);
    }

    /// Append a layer as the innermost one.
    pub fn push_inner(&mut self, layer: MiddlewareLayer) {
        self.layers.push(layer);
    }

    /// Layer names, outermost first.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.layers.iter().map(|l| l.name.as_str()).collect()
    }

    /// The first layer called `name`.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&MiddlewareLayer> {
        self.layers.iter().find(|l| l.name == name)
    }
}
