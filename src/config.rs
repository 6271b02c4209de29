//! Keeper configuration
//!
//! Node-level settings that are not governance parameters. Loaded by the host
//! application (typically from its config file) and handed to the keeper.

use serde::{Deserialize, Serialize};

/// Default page size of list queries
pub const DEFAULT_QUERY_LIMIT: usize = 100;

/// Keeper configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeeperConfig {
    /// First block height at which asset messages and queries are accepted
    pub token_issue_height: i64,
    /// Page size used when a list query passes `limit = 0`
    pub default_query_limit: usize,
}

impl KeeperConfig {
    /// Whether the asset module is active at `height`
    pub fn is_active(&self, height: i64) -> bool {
        height >= self.token_issue_height
    }
}

impl Default for KeeperConfig {
    fn default() -> Self {
        Self {
            token_issue_height: 0,
            default_query_limit: DEFAULT_QUERY_LIMIT,
        }
    }
}
