//! Glob-based bulk indexing discovery for `code/index [pattern]`
//! (spec.md §6): `*` (no slash), `**` (any depth), `?` (single char, no
//! slash).

use std::path::{Path, PathBuf};

use crate::parsing::GrammarRegistry;
use crate::watcher::filter;

pub const DEFAULT_PATTERN: &str = "**/*";

/// Resolves `pattern` against `root` and returns every matching file whose
/// extension the Grammar Registry recognizes and that isn't under an
/// excluded or hidden directory.
pub fn walk(root: &Path, pattern: &str, registry: &GrammarRegistry) -> Vec<PathBuf> {
    let full_pattern = root.join(pattern);
    let Some(pattern_str) = full_pattern.to_str() else {
        return Vec::new();
    };

    let options = glob::MatchOptions {
        case_sensitive: true,
        require_literal_separator: true,
        require_literal_leading_dot: true,
    };

    match glob::glob_with(pattern_str, options) {
        Ok(paths) => paths
            .filter_map(Result::ok)
            .filter(|p| p.is_file())
            .filter(|p| {
                let relative = p.strip_prefix(root).unwrap_or(p);
                filter::should_watch(relative, registry)
            })
            .collect(),
        Err(e) => {
            tracing::warn!("invalid glob pattern '{pattern}': {e}");
            Vec::new()
        }
    }
}
