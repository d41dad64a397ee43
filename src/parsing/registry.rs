//! Grammar Registry (spec.md §4.A): built-in extension map plus user
//! installed extensions read from `<workspace>/.cog/extensions.json`.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::parsing::language::Language;

#[derive(Debug, Clone)]
pub enum GrammarConfig {
    TreeSitter {
        language: Language,
    },
    External {
        #[allow(dead_code)]
        command_template: String,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ExternalGrammarEntry {
    id: String,
    extensions: Vec<String>,
    command: String,
    #[serde(default)]
    debugger: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ExtensionsFile {
    #[serde(default)]
    grammars: Vec<ExternalGrammarEntry>,
}

/// Maps lowercase extensions (without the dot) to a `GrammarConfig`.
/// Built-ins are registered at construction; installed extensions loaded
/// from `extensions.json` shadow built-ins with the same extension.
#[derive(Debug, Clone, Default)]
pub struct GrammarRegistry {
    external: HashMap<String, GrammarConfig>,
}

impl GrammarRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads `<workspace>/.cog/extensions.json` if present. Missing file is
    /// not an error; a malformed one is (surfaced to the caller to log).
    pub fn load_installed(&mut self, cog_dir: &Path) -> std::io::Result<()> {
        let path = cog_dir.join("extensions.json");
        if !path.exists() {
            return Ok(());
        }
        let raw = fs::read_to_string(&path)?;
        let parsed: ExtensionsFile = serde_json::from_str(&raw)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        for entry in parsed.grammars {
            for ext in &entry.extensions {
                self.external.insert(
                    ext.trim_start_matches('.').to_ascii_lowercase(),
                    GrammarConfig::External {
                        command_template: entry.command.clone(),
                    },
                );
            }
        }
        Ok(())
    }

    /// Resolves an extension (without the leading dot) to a grammar config.
    /// Installed extensions shadow built-ins sharing the same extension.
    pub fn resolve(&self, ext: &str) -> Option<GrammarConfig> {
        let key = ext.to_ascii_lowercase();
        if let Some(cfg) = self.external.get(&key) {
            return Some(cfg.clone());
        }
        Language::from_extension(&key).map(|language| GrammarConfig::TreeSitter { language })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_built_in_extensions_without_a_config_file() {
        let registry = GrammarRegistry::new();
        assert!(matches!(
            registry.resolve("rs"),
            Some(GrammarConfig::TreeSitter {
                language: Language::Rust
            })
        ));
        assert!(registry.resolve("zig").is_none());
    }

    #[test]
    fn installed_extension_shadows_a_built_in() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("extensions.json"),
            r#"{"grammars":[{"id":"zig-lsp","extensions":["zig"],"command":"zig-ts {file}"}]}"#,
        )
        .unwrap();
        let mut registry = GrammarRegistry::new();
        registry.load_installed(dir.path()).unwrap();
        assert!(matches!(
            registry.resolve("zig"),
            Some(GrammarConfig::External { .. })
        ));
    }

    #[test]
    fn missing_extensions_file_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut registry = GrammarRegistry::new();
        registry.load_installed(dir.path()).unwrap();
        assert!(registry.resolve("go").is_some());
    }
}
