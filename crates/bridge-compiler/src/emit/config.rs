//! Configuration for binding emission.

use bridge_core::{TypeId, TypeRegistry};

use crate::closure::ClosureConfig;

/// Types whose codecs ship with hand-written support code, as `path.Name`.
pub const DEFAULT_KNOWN_CODECS: &[&str] = &["time.Time"];

/// Declared identity of a type with a hand-written codec.
///
/// Matched against the declaring namespace path, never the short alias the
/// path happens to get in a given run.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CodecKey {
    pub namespace: String,
    pub name: String,
}

impl CodecKey {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    /// Split `path.Name` at its last dot. Without a dot the name is taken
    /// to live in the builtin namespace.
    pub fn parse(qualified: &str) -> Self {
        match qualified.rsplit_once('.') {
            Some((namespace, name)) => Self::new(namespace, name),
            None => Self::new("", qualified),
        }
    }

    pub fn matches(&self, registry: &TypeRegistry, id: TypeId) -> bool {
        registry
            .get(id)
            .declared_name()
            .is_some_and(|(namespace, name)| namespace == self.namespace && name == self.name)
    }
}

impl From<&str> for CodecKey {
    fn from(qualified: &str) -> Self {
        Self::parse(qualified)
    }
}

impl From<String> for CodecKey {
    fn from(qualified: String) -> Self {
        Self::parse(&qualified)
    }
}

pub(crate) fn is_known_codec(known: &[CodecKey], registry: &TypeRegistry, id: TypeId) -> bool {
    known.iter().any(|key| key.matches(registry, id))
}

#[derive(Clone, Debug)]
pub struct EmitConfig {
    pub(crate) client_prefix: String,
    pub(crate) client_suffix: String,
    /// Package the generated files declare
    pub(crate) package: String,
    /// Types whose codecs already exist
    pub(crate) known_codecs: Vec<CodecKey>,
    /// Emit only this operation, if set
    pub(crate) operation: Option<String>,
    pub(crate) closure: ClosureConfig,
}

impl Default for EmitConfig {
    fn default() -> Self {
        Self {
            client_prefix: String::new(),
            client_suffix: "Client".to_string(),
            package: "restclient".to_string(),
            known_codecs: DEFAULT_KNOWN_CODECS.iter().copied().map(CodecKey::parse).collect(),
            operation: None,
            closure: ClosureConfig::default(),
        }
    }
}

impl EmitConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn client_prefix(mut self, value: impl Into<String>) -> Self {
        self.client_prefix = value.into();
        self
    }

    pub fn client_suffix(mut self, value: impl Into<String>) -> Self {
        self.client_suffix = value.into();
        self
    }

    pub fn package(mut self, value: impl Into<String>) -> Self {
        self.package = value.into();
        self
    }

    /// Add a type whose codec is supplied elsewhere.
    pub fn known_codec(mut self, key: impl Into<CodecKey>) -> Self {
        self.known_codecs.push(key.into());
        self
    }

    /// Replace the whole known-codec table.
    pub fn known_codecs<K: Into<CodecKey>>(mut self, keys: impl IntoIterator<Item = K>) -> Self {
        self.known_codecs = keys.into_iter().map(Into::into).collect();
        self
    }

    /// Restrict emission to a single operation.
    pub fn operation(mut self, name: Option<String>) -> Self {
        self.operation = name;
        self
    }

    pub fn closure(mut self, value: ClosureConfig) -> Self {
        self.closure = value;
        self
    }

    pub fn client_name(&self, service_name: &str) -> String {
        format!("{}{}{}", self.client_prefix, service_name, self.client_suffix)
    }
}
