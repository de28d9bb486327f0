//! Short, collision-free aliases for full namespace paths.
//!
//! Generated code imports every namespace it touches, so each full path
//! needs an identifier-safe alias that no other path uses.

use indexmap::IndexMap;

/// Bidirectional `path <-> alias` mapping.
#[derive(Clone, Debug, Default)]
pub struct PackageNamespace {
    alias_for_path: IndexMap<String, String>,
    path_for_alias: IndexMap<String, String>,
    counter: usize,
}

impl PackageNamespace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `path` and return its alias. Idempotent.
    ///
    /// Candidates are built from the path's segments, most specific first:
    /// `a/b/c` tries `c`, then `bc`, then `abc`. When every candidate is
    /// taken a synthetic `pkgN` alias is assigned.
    pub fn add_package(&mut self, path: &str) -> &str {
        if !self.alias_for_path.contains_key(path) {
            let alias = self.fresh_alias(path);
            tracing::debug!(path, alias = %alias, "registered package");
            self.path_for_alias.insert(alias.clone(), path.to_owned());
            self.alias_for_path.insert(path.to_owned(), alias);
        }
        &self.alias_for_path[path]
    }

    fn fresh_alias(&mut self, path: &str) -> String {
        // The builtin namespace is the only one allowed an empty alias.
        if path.is_empty() {
            return String::new();
        }

        let mut candidate = String::new();
        for segment in path.rsplit('/') {
            let segment: String = segment
                .chars()
                .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
                .collect();
            if segment.is_empty() {
                continue;
            }
            candidate.insert_str(0, &segment);
            if !self.path_for_alias.contains_key(&candidate) {
                return candidate;
            }
        }

        loop {
            let synthetic = format!("pkg{}", self.counter);
            self.counter += 1;
            if !self.path_for_alias.contains_key(&synthetic) {
                return synthetic;
            }
        }
    }

    /// Alias previously assigned to `path`.
    pub fn short_name(&self, path: &str) -> Option<&str> {
        self.alias_for_path.get(path).map(String::as_str)
    }

    /// Full path registered under `alias`.
    pub fn package_for_alias(&self, alias: &str) -> Option<&str> {
        self.path_for_alias.get(alias).map(String::as_str)
    }

    /// `(path, alias)` pairs in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.alias_for_path
            .iter()
            .map(|(path, alias)| (path.as_str(), alias.as_str()))
    }

    pub fn len(&self) -> usize {
        self.alias_for_path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alias_for_path.is_empty()
    }
}
