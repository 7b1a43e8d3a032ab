//! # Storefront Redirect Routes
//!
//! Maps a store id to the storefront base URL its success/cancel redirects
//! should land on. One table built at startup replaces inline store-id
//! comparisons in the handler: most stores share the default base, and
//! specific stores can be routed to an alternate frontend.

use std::collections::HashMap;

/// Store-id → storefront-base-URL table with a default.
#[derive(Debug, Clone)]
pub struct RedirectRoutes {
    default_base: String,
    overrides: HashMap<String, String>,
}

impl RedirectRoutes {
    /// Create a table where every store routes to `default_base`.
    ///
    /// Trailing slashes are trimmed so path joining stays predictable.
    pub fn new(default_base: impl Into<String>) -> Self {
        Self {
            default_base: trim_base(default_base.into()),
            overrides: HashMap::new(),
        }
    }

    /// Builder: route `store_id` to an alternate base URL
    pub fn with_override(mut self, store_id: impl Into<String>, base: impl Into<String>) -> Self {
        self.overrides.insert(store_id.into(), trim_base(base.into()));
        self
    }

    /// Resolve the base URL for a store
    pub fn base_for(&self, store_id: &str) -> &str {
        self.overrides
            .get(store_id)
            .map(String::as_str)
            .unwrap_or(&self.default_base)
    }

    /// Redirect destination after successful payment
    pub fn success_url(&self, store_id: &str) -> String {
        format!("{}/cart?success=1", self.base_for(store_id))
    }

    /// Redirect destination if the payer cancels
    pub fn cancel_url(&self, store_id: &str) -> String {
        format!("{}/cart?canceled=1", self.base_for(store_id))
    }
}

fn trim_base(base: String) -> String {
    base.trim_end_matches('/').to_string()
}
