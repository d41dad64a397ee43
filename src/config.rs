//! Configuration for the code intelligence engine.
//!
//! Layered configuration:
//! - Defaults
//! - `.cog/settings.toml`
//! - `COG_`-prefixed environment variables (double underscore separates
//!   nested levels, e.g. `COG_WATCHER__DEBOUNCE_MS=250`)

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Name of the per-workspace config/index directory.
pub const COG_DIR: &str = ".cog";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Settings {
    #[serde(default = "default_version")]
    pub version: u32,

    /// Path to the binary index file, relative to the workspace root.
    #[serde(default = "default_index_path")]
    pub index_path: PathBuf,

    #[serde(default)]
    pub indexing: IndexingConfig,

    #[serde(default)]
    pub languages: HashMap<String, LanguageConfig>,

    #[serde(default)]
    pub watcher: WatcherConfig,

    #[serde(default)]
    pub mcp: McpConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct IndexingConfig {
    /// Number of worker threads for bulk `code/index` runs.
    #[serde(default = "default_parallel_threads")]
    pub parallel_threads: usize,

    /// Extra glob patterns excluded in addition to the built-in directory
    /// denylist (§4.E filter rules).
    #[serde(default)]
    pub ignore_patterns: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LanguageConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct WatcherConfig {
    /// Coalescing window, per spec.md §4.E's 500ms backend latency.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct McpConfig {
    /// Protocol version reported in `initialize` responses.
    #[serde(default = "default_protocol_version")]
    pub protocol_version: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub default: String,
    #[serde(default)]
    pub modules: HashMap<String, String>,
}

fn default_version() -> u32 {
    1
}
fn default_index_path() -> PathBuf {
    PathBuf::from(".cog/index.scip")
}
fn default_parallel_threads() -> usize {
    num_cpus::get()
}
fn default_true() -> bool {
    true
}
fn default_debounce_ms() -> u64 {
    500
}
fn default_protocol_version() -> String {
    "2024-11-05".to_string()
}
fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: default_version(),
            index_path: default_index_path(),
            indexing: IndexingConfig::default(),
            languages: HashMap::new(),
            watcher: WatcherConfig::default(),
            mcp: McpConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for IndexingConfig {
    fn default() -> Self {
        Self {
            parallel_threads: default_parallel_threads(),
            ignore_patterns: Vec::new(),
        }
    }
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
        }
    }
}

impl Default for McpConfig {
    fn default() -> Self {
        Self {
            protocol_version: default_protocol_version(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            default: default_log_level(),
            modules: HashMap::new(),
        }
    }
}

impl Settings {
    /// Load layered configuration, discovering `.cog` from the current
    /// directory upward.
    pub fn load() -> Result<Self, figment::Error> {
        let config_path = Self::workspace_root()
            .map(|root| root.join(COG_DIR).join("settings.toml"))
            .unwrap_or_else(|| PathBuf::from(COG_DIR).join("settings.toml"));

        Self::load_from(config_path)
    }

    /// Load layered configuration from a specific settings file path.
    pub fn load_from(path: impl AsRef<std::path::Path>) -> Result<Self, figment::Error> {
        Figment::new()
            .merge(Serialized::defaults(Settings::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed("COG_").map(|key| {
                key.as_str().to_lowercase().replace("__", ".").into()
            }))
            .extract()
    }

    /// Walk up from the current directory to find the nearest ancestor
    /// containing a `.cog` directory.
    pub fn workspace_root() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;
        current
            .ancestors()
            .find(|ancestor| ancestor.join(COG_DIR).is_dir())
            .map(|p| p.to_path_buf())
    }

    /// Save this configuration to a `.cog/settings.toml` file, creating the
    /// parent directory if needed.
    pub fn save(&self, path: impl AsRef<std::path::Path>) -> std::io::Result<()> {
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }
        let toml_string =
            toml::to_string_pretty(self).expect("Settings always serializes to TOML");
        std::fs::write(path, toml_string)
    }
}
