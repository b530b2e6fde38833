//! Builder for composing connectors with middleware layers.
//!
//! Layers form an onion around the raw connector. The `layers` vector is kept
//! outermost-first, matching [`MiddlewareStack`], and applied in reverse by
//! [`ConnectorBuilder::build`]:
//!
//! ```text
//! builder.layer(inner).with_retry(..)
//!
//! Storage: [Retry, inner]
//! Result:  Retry(inner(Raw))
//! ```

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use trendstitch_core::Middleware;
use trendstitch_core::connector::TrendsConnector;
use trendstitch_types::{MiddlewareLayer, MiddlewareStack, RetryConfig};

use crate::retry::RetryMiddleware;

const RETRY_LAYER: &str = "RetryingConnector";

/// Generic middleware builder for composing a connector with layered wrappers.
pub struct ConnectorBuilder {
    raw: Arc<dyn TrendsConnector>,
    /// Middleware layers in outermost-first order.
    layers: Vec<Box<dyn Middleware>>,
}

impl ConnectorBuilder {
    /// Create a new builder from a raw, unwrapped connector.
    #[must_use]
    pub fn new(raw: Arc<dyn TrendsConnector>) -> Self {
        Self {
            raw,
            layers: Vec::new(),
        }
    }

    /// Add or replace the retry layer at the outermost position.
    #[must_use]
    pub fn with_retry(mut self, cfg: &RetryConfig) -> Self {
        self.layers.retain(|m| m.name() != RETRY_LAYER);
        self.layers
            .insert(0, Box::new(RetryMiddleware::new(*cfg)));
        self
    }

    /// Remove the retry layer if present.
    #[must_use]
    pub fn without_retry(mut self) -> Self {
        self.layers.retain(|m| m.name() != RETRY_LAYER);
        self
    }

    /// Add an arbitrary middleware layer at the outermost position.
    #[must_use]
    pub fn layer(mut self, layer: Box<dyn Middleware>) -> Self {
        self.layers.insert(0, layer);
        self
    }

    /// Names of the configured layers, outermost first.
    pub fn layer_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.layers.iter().map(|l| l.name())
    }

    /// Export the middleware stack, outermost first, with the raw connector
    /// appended as the innermost entry.
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

    /// Rebuild a builder from a raw connector and a stack produced by
    /// [`to_stack`](Self::to_stack). Unknown layers are ignored.
    #[must_use]
    pub fn from_stack(raw: Arc<dyn TrendsConnector>, stack: &MiddlewareStack) -> Self {
        let mut layers: Vec<Box<dyn Middleware>> = Vec::new();
        for l in &stack.layers {
            if l.name == RETRY_LAYER {
                let defaults = RetryConfig::default();
                let ms = |key: &str, fallback: Duration| {
                    l.config
                        .get(key)
                        .and_then(serde_json::Value::as_u64)
                        .map_or(fallback, Duration::from_millis)
                };
                let cfg = RetryConfig {
                    max_retries: l
                        .config
                        .get("max_retries")
                        .and_then(serde_json::Value::as_u64)
                        .and_then(|v| u32::try_from(v).ok())
                        .unwrap_or(defaults.max_retries),
                    base_delay: ms("base_delay_ms", defaults.base_delay),
                    step_delay: ms("step_delay_ms", defaults.step_delay),
                    jitter_percent: l
                        .config
                        .get("jitter_percent")
                        .and_then(serde_json::Value::as_u64)
                        .and_then(|v| u8::try_from(v).ok())
                        .unwrap_or(defaults.jitter_percent),
                };
                layers.push(Box::new(RetryMiddleware::new(cfg)));
            }
        }
        Self { raw, layers }
    }

    /// Build the wrapped connector, applying layers innermost first.
    #[must_use]
    pub fn build(self) -> Arc<dyn TrendsConnector> {
        let mut acc: Arc<dyn TrendsConnector> = Arc::clone(&self.raw);
        for m in self.layers.into_iter().rev() {
            acc = m.apply(acc);
        }
        acc
    }
}
