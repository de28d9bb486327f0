//! TypeRegistry: the arena of type slots and the `(namespace, name)` index.
//!
//! The registry is the only authority for type identity. Looking up the same
//! key twice always yields the same [`TypeId`]. A name referenced before its
//! declaration gets an `Unresolved` placeholder; the declaration later
//! overwrites that slot in place through [`TypeRegistry::define`], which is
//! the single place where an existing slot is ever mutated.

use std::fmt::Write;
use std::hash::{Hash, Hasher};

use indexmap::{Equivalent, IndexMap};

use crate::namespace::PackageNamespace;
use crate::types::{FunctionData, RecordData, TypeData, TypeId, TypeKind};

/// Builtin type names seeded by [`TypeRegistry::go_builtins`].
pub const DEFAULT_BUILTINS: &[&str] = &[
    "error", "string", "float", "float32", "float64", "bool", "byte", "int", "int8", "int16",
    "int32", "int64", "uint", "uint8", "uint16", "uint32", "uint64",
];

/// Errors raised while declaring types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// The key already holds a resolved type with a different structure.
    /// The first definition is kept.
    #[error("redefinition of `{name}` in namespace `{namespace}`")]
    Redefinition {
        namespace: String,
        name: String,
        existing: TypeId,
    },
}

/// Borrowed form of the `(namespace, name)` key, hashed like the owned tuple.
struct KeyRef<'a>(&'a str, &'a str);

impl Hash for KeyRef<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
        self.1.hash(state);
    }
}

impl Equivalent<(String, String)> for KeyRef<'_> {
    fn equivalent(&self, key: &(String, String)) -> bool {
        self.0 == key.0 && self.1 == key.1
    }
}

#[derive(Clone, Debug, Default)]
pub struct TypeRegistry {
    slots: Vec<TypeData>,
    keys: IndexMap<(String, String), TypeId>,
    namespaces: PackageNamespace,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with `Named` builtins in the empty namespace.
    pub fn with_builtins<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        let mut registry = Self::new();
        for name in names {
            registry.add_named("", name);
        }
        registry
    }

    /// Registry seeded with [`DEFAULT_BUILTINS`].
    pub fn go_builtins() -> Self {
        Self::with_builtins(DEFAULT_BUILTINS.iter().copied())
    }

    /// Allocate an unregistered type. Every call yields a fresh identity.
    pub fn alloc(&mut self, data: TypeData) -> TypeId {
        let id = TypeId::from_index(self.slots.len());
        self.slots.push(data);
        id
    }

    /// Register `id` under `(namespace, name)`.
    ///
    /// If the key is already taken the existing type is returned and `id` is
    /// left unregistered. Either way the namespace gets an alias.
    pub fn add_type(&mut self, namespace: &str, name: &str, id: TypeId) -> TypeId {
        self.namespaces.add_package(namespace);
        if let Some(existing) = self.get_type(namespace, name) {
            return existing;
        }
        self.keys.insert((namespace.to_owned(), name.to_owned()), id);
        id
    }

    /// Register an opaque leaf type.
    pub fn add_named(&mut self, namespace: &str, name: &str) -> TypeId {
        if let Some(existing) = self.get_type(namespace, name) {
            return existing;
        }
        let id = self.alloc(TypeData::named(namespace, name));
        self.add_type(namespace, name, id)
    }

    pub fn get_type(&self, namespace: &str, name: &str) -> Option<TypeId> {
        self.keys.get(&KeyRef(namespace, name)).copied()
    }

    /// Lookup through a namespace alias instead of the full path.
    pub fn get_type_by_alias(&self, alias: &str, name: &str) -> Option<TypeId> {
        let namespace = self.namespaces.package_for_alias(alias)?;
        self.get_type(namespace, name)
    }

    /// The registered type for `(namespace, name)`, or a new `Unresolved`
    /// placeholder registered under that key.
    pub fn placeholder(&mut self, namespace: &str, name: &str) -> TypeId {
        if let Some(existing) = self.get_type(namespace, name) {
            return existing;
        }
        let id = self.alloc(TypeData::unresolved(namespace, name));
        self.add_type(namespace, name, id)
    }

    /// Declare `(namespace, name)` with `data`.
    ///
    /// A pending placeholder is overwritten in place, keeping its identity.
    /// Re-declaring with the same structure is a no-op; a conflicting
    /// re-declaration keeps the first definition and returns an error.
    pub fn define(
        &mut self,
        namespace: &str,
        name: &str,
        data: TypeData,
    ) -> Result<TypeId, RegistryError> {
        let Some(id) = self.get_type(namespace, name) else {
            let id = self.alloc(data);
            return Ok(self.add_type(namespace, name, id));
        };

        if self.slots[id.index()].is_unresolved() {
            tracing::debug!(namespace, name, kind = %data.kind(), "resolved placeholder");
            self.slots[id.index()] = data;
            return Ok(id);
        }

        if self.same_structure(&self.slots[id.index()], &data) {
            return Ok(id);
        }

        tracing::warn!(
            namespace,
            name,
            existing = %self.kind(id),
            "conflicting redefinition ignored"
        );
        Err(RegistryError::Redefinition {
            namespace: namespace.to_owned(),
            name: name.to_owned(),
            existing: id,
        })
    }

    /// Dereference a handle.
    ///
    /// # Panics
    /// Panics if `id` was not allocated by this registry.
    #[inline]
    pub fn get(&self, id: TypeId) -> &TypeData {
        &self.slots[id.index()]
    }

    #[inline]
    pub fn try_get(&self, id: TypeId) -> Option<&TypeData> {
        self.slots.get(id.index())
    }

    #[inline]
    pub fn kind(&self, id: TypeId) -> TypeKind {
        self.get(id).kind()
    }

    /// The record payload of `id`, if it is a record.
    pub fn record(&self, id: TypeId) -> Option<&RecordData> {
        match self.get(id) {
            TypeData::Record(record) => Some(record),
            _ => None,
        }
    }

    /// The function payload of `id`, if it is a function.
    pub fn function(&self, id: TypeId) -> Option<&FunctionData> {
        match self.get(id) {
            TypeData::Function(func) => Some(func),
            _ => None,
        }
    }

    /// Registered `(namespace, name, id)` triples in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, TypeId)> {
        self.keys
            .iter()
            .map(|((namespace, name), id)| (namespace.as_str(), name.as_str(), *id))
    }

    /// Registered keys whose slot is still a placeholder.
    pub fn unresolved(&self) -> impl Iterator<Item = (&str, &str, TypeId)> {
        self.iter().filter(|(_, _, id)| self.get(*id).is_unresolved())
    }

    pub fn namespaces(&self) -> &PackageNamespace {
        &self.namespaces
    }

    /// Register a namespace without declaring any type in it.
    pub fn add_package(&mut self, path: &str) -> &str {
        self.namespaces.add_package(path)
    }

    pub fn short_name_for_package(&self, path: &str) -> Option<&str> {
        self.namespaces.short_name(path)
    }

    /// Number of allocated slots, registered or not.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// `Name` for the builtin namespace, `alias.Name` otherwise.
    pub fn qualified_name(&self, namespace: &str, name: &str) -> String {
        if namespace.is_empty() {
            return name.to_owned();
        }
        let alias = self.namespaces.short_name(namespace).unwrap_or(namespace);
        format!("{alias}.{name}")
    }

    /// Canonical signature of a type; the deduplication key.
    ///
    /// Recursion stops at every nominal type, so self-referential records
    /// terminate.
    pub fn signature(&self, id: TypeId) -> String {
        let mut out = String::new();
        self.write_signature(self.get(id), &mut out);
        out
    }

    /// Signature of a comma-separated list, as used for function parameters.
    pub fn list_signature(&self, ids: &[TypeId]) -> String {
        let mut out = String::new();
        self.write_list(ids, ",", &mut out);
        out
    }

    fn write_signature(&self, data: &TypeData, out: &mut String) {
        match data {
            TypeData::Null => {}
            TypeData::Unresolved { name, namespace }
            | TypeData::Named { name, namespace }
            | TypeData::Alias {
                name, namespace, ..
            } => out.push_str(&self.qualified_name(namespace, name)),
            TypeData::Reference(target) => {
                out.push('*');
                self.write_signature(self.get(*target), out);
            }
            TypeData::Tuple(items) => {
                out.push('(');
                self.write_list(items, ", ", out);
                out.push(')');
            }
            TypeData::Record(record) if !record.is_anonymous() => {
                out.push_str(&self.qualified_name(&record.namespace, &record.name));
            }
            TypeData::Record(record) => self.write_record_body(record, out),
            TypeData::Function(func) => {
                out.push_str("func(");
                self.write_list(&func.inputs, ",", out);
                out.push(')');
                if !func.outputs.is_empty() {
                    out.push('(');
                    self.write_list(&func.outputs, ",", out);
                    out.push(')');
                }
                if !func.errors.is_empty() {
                    out.push_str(" throws(");
                    self.write_list(&func.errors, ",", out);
                    out.push(')');
                }
            }
            TypeData::List(element) => {
                out.push_str("[]");
                self.write_signature(self.get(*element), out);
            }
            TypeData::Map { key, value } => {
                out.push_str("map[");
                self.write_signature(self.get(*key), out);
                out.push(']');
                self.write_signature(self.get(*value), out);
            }
        }
    }

    fn write_list(&self, ids: &[TypeId], separator: &str, out: &mut String) {
        for (i, id) in ids.iter().enumerate() {
            if i > 0 {
                out.push_str(separator);
            }
            self.write_signature(self.get(*id), out);
        }
    }

    fn write_record_body(&self, record: &RecordData, out: &mut String) {
        out.push_str("struct{");
        let mut first = true;
        for base in &record.bases {
            if !first {
                out.push_str("; ");
            }
            first = false;
            self.write_signature(self.get(*base), out);
        }
        for field in &record.fields {
            if !first {
                out.push_str("; ");
            }
            first = false;
            let _ = write!(out, "{} ", field.name);
            self.write_signature(self.get(field.type_id), out);
        }
        out.push('}');
    }

    /// Structural comparison ignoring identities of anonymous children.
    fn same_structure(&self, a: &TypeData, b: &TypeData) -> bool {
        if a.kind() != b.kind() {
            return false;
        }
        self.shape(a) == self.shape(b)
    }

    /// Signature of a slot's contents rather than its name.
    fn shape(&self, data: &TypeData) -> String {
        let mut out = String::new();
        match data {
            TypeData::Record(record) => self.write_record_body(record, &mut out),
            TypeData::Alias { target, .. } => self.write_signature(self.get(*target), &mut out),
            other => self.write_signature(other, &mut out),
        }
        out
    }
}
