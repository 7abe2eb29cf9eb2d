//! Endpoint access configuration.

use serde::{Deserialize, Serialize};

/// Controls which pet endpoints are open to anonymous callers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiConfig {
    /// When set, list/retrieve/available also require authentication.
    #[serde(default)]
    pub require_auth_for_reads: bool,
}
