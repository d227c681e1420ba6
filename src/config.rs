use serde::Deserialize;

// =============================================================================
// Registry constants
// =============================================================================

/// Scope every typings package is published under (`@types/<name>`)
pub const SCOPE: &str = "types";

/// Lowest TypeScript version any package may target.
/// Reported as the minimum version of every not-needed stub.
pub const LOWEST_TYPESCRIPT_VERSION: &str = "2.8";

/// Logging configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct LogConfig {
    /// Default filter directive when `RUST_LOG` is unset (e.g. "info", "typings_registry=debug")
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}
