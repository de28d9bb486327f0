//! Transitive type closure: every distinct type reachable from a set of
//! roots, each exactly once, in first-discovery order.
//!
//! Two visited sets keep the walk finite and the output minimal:
//! - by identity, so a type instance is traversed at most once (cycles)
//! - by signature, so structurally identical instances collapse into one

use std::collections::HashSet;

use bridge_core::{TypeData, TypeId, TypeRegistry};

/// Which kinds a closure collects.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ClosureConfig {
    /// Collect reference types as entries of their own. Off by default:
    /// references are walked through but only their targets are collected.
    pub(crate) collect_references: bool,
}

impl ClosureConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether reference types get their own entries.
    pub fn collect_references(mut self, value: bool) -> Self {
        self.collect_references = value;
        self
    }
}

/// Incremental closure over one registry.
///
/// Entries accumulate across calls until [`reset`](Self::reset), so repeated
/// waves only ever return types not seen before.
pub struct ClosureCollector<'r> {
    registry: &'r TypeRegistry,
    config: ClosureConfig,
    visited: HashSet<TypeId>,
    signatures: HashSet<String>,
    found: Vec<TypeId>,
    queued: Vec<TypeId>,
}

impl<'r> ClosureCollector<'r> {
    pub fn new(registry: &'r TypeRegistry, config: ClosureConfig) -> Self {
        Self {
            registry,
            config,
            visited: HashSet::new(),
            signatures: HashSet::new(),
            found: Vec::new(),
            queued: Vec::new(),
        }
    }

    /// Walk from `roots` and return the entries discovered by this call.
    pub fn collect(&mut self, roots: impl IntoIterator<Item = TypeId>) -> Vec<TypeId> {
        let registry = self.registry;
        let start = self.found.len();
        let mut stack: Vec<TypeId> = roots.into_iter().collect();
        stack.reverse();

        while let Some(id) = stack.pop() {
            if !self.visited.insert(id) {
                continue;
            }
            let data = registry.get(id);
            if self.is_collected(data) {
                if !self.signatures.insert(registry.signature(id)) {
                    // Structural duplicate: its children are duplicates too.
                    continue;
                }
                self.found.push(id);
            }
            stack.extend(data.children().into_iter().rev());
        }

        let new = self.found[start..].to_vec();
        tracing::debug!(new = new.len(), total = self.found.len(), "closure wave");
        new
    }

    /// Queue types referenced by freshly emitted code for the next wave.
    pub fn mark(&mut self, ids: impl IntoIterator<Item = TypeId>) {
        self.queued.extend(ids);
    }

    /// Collect everything marked since the previous wave.
    ///
    /// An empty result means the fixpoint is reached.
    pub fn take_wave(&mut self) -> Vec<TypeId> {
        let queued = std::mem::take(&mut self.queued);
        self.collect(queued)
    }

    /// Every entry collected since the last reset.
    pub fn all(&self) -> &[TypeId] {
        &self.found
    }

    /// Whether `id` has been reached by the walk, collected or not.
    pub fn contains(&self, id: TypeId) -> bool {
        self.visited.contains(&id)
    }

    /// Forget everything; the next wave starts from scratch.
    pub fn reset(&mut self) {
        self.visited.clear();
        self.signatures.clear();
        self.found.clear();
        self.queued.clear();
    }

    fn is_collected(&self, data: &TypeData) -> bool {
        match data {
            TypeData::Null
            | TypeData::Unresolved { .. }
            | TypeData::Named { .. }
            | TypeData::Function(_) => false,
            TypeData::Reference(_) => self.config.collect_references,
            TypeData::Alias { .. }
            | TypeData::Tuple(_)
            | TypeData::Record(_)
            | TypeData::List(_)
            | TypeData::Map { .. } => true,
        }
    }
}

/// One-shot closure with the default configuration.
pub fn closure(registry: &TypeRegistry, roots: impl IntoIterator<Item = TypeId>) -> Vec<TypeId> {
    ClosureCollector::new(registry, ClosureConfig::default()).collect(roots)
}
