//! Watcher path filter rules (spec.md §4.E): excludes hidden paths,
//! vendored/build-output directories, and extensions the Grammar Registry
//! would not recognize.

use std::path::Path;

const EXCLUDED_COMPONENTS: &[&str] = &[
    "node_modules",
    "vendor",
    "target",
    "zig-out",
    "zig-cache",
    ".zig-cache",
    "build",
    "dist",
    "__pycache__",
];

/// `true` if `path` should be delivered to the indexer: no hidden path
/// component, no excluded directory component, and an extension the
/// Grammar Registry resolves.
pub fn should_watch(path: &Path, registry: &crate::parsing::GrammarRegistry) -> bool {
    for component in path.components() {
        let Some(name) = component.as_os_str().to_str() else {
            return false;
        };
        if name.starts_with('.') && name != "." {
            return false;
        }
        if EXCLUDED_COMPONENTS.contains(&name) {
            return false;
        }
    }
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return false;
    };
    registry.resolve(ext).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn excludes_hidden_components() {
        let registry = crate::parsing::GrammarRegistry::new();
        assert!(!should_watch(&PathBuf::from(".git/config.rs"), &registry));
        assert!(!should_watch(&PathBuf::from("src/.hidden/a.rs"), &registry));
    }

    #[test]
    fn excludes_vendored_and_build_directories() {
        let registry = crate::parsing::GrammarRegistry::new();
        assert!(!should_watch(&PathBuf::from("node_modules/a.js"), &registry));
        assert!(!should_watch(&PathBuf::from("target/debug/a.rs"), &registry));
        assert!(!should_watch(&PathBuf::from("__pycache__/a.py"), &registry));
    }

    #[test]
    fn requires_a_resolvable_extension() {
        let registry = crate::parsing::GrammarRegistry::new();
        assert!(!should_watch(&PathBuf::from("README.md"), &registry));
        assert!(should_watch(&PathBuf::from("src/main.rs"), &registry));
    }
}
