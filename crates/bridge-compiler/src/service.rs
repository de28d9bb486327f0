//! Operations of a service: the function-typed members of a record.

use std::collections::HashSet;

use bridge_core::{TypeData, TypeId, TypeRegistry};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServiceError {
    #[error("service `{signature}` is not a record")]
    NotARecord { signature: String },

    #[error("no service `{name}` in namespace `{namespace}`")]
    UnknownService { namespace: String, name: String },
}

/// One callable member of a service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    pub name: String,
    pub function: TypeId,
    pub inputs: Vec<TypeId>,
    pub outputs: Vec<TypeId>,
    pub errors: Vec<TypeId>,
}

impl Operation {
    /// Inputs then outputs: the types whose codecs the operation needs.
    pub fn roots(&self) -> impl Iterator<Item = TypeId> + '_ {
        self.inputs.iter().chain(self.outputs.iter()).copied()
    }
}

/// Look up a declared service by `(namespace, name)`.
pub fn find_service(
    registry: &TypeRegistry,
    namespace: &str,
    name: &str,
) -> Result<TypeId, ServiceError> {
    registry
        .get_type(namespace, name)
        .ok_or_else(|| ServiceError::UnknownService {
            namespace: namespace.to_owned(),
            name: name.to_owned(),
        })
}

/// Operations of `service`, own members first, then embedded services
/// depth-first in declaration order. The first member with a given name
/// shadows later ones.
pub fn service_operations(
    registry: &TypeRegistry,
    service: TypeId,
) -> Result<Vec<Operation>, ServiceError> {
    if registry.record(service).is_none() {
        return Err(ServiceError::NotARecord {
            signature: registry.signature(service),
        });
    }

    let mut walk = Walk {
        registry,
        records: HashSet::new(),
        names: HashSet::new(),
        operations: Vec::new(),
    };
    walk.record(service);
    Ok(walk.operations)
}

struct Walk<'r> {
    registry: &'r TypeRegistry,
    records: HashSet<TypeId>,
    names: HashSet<String>,
    operations: Vec<Operation>,
}

impl Walk<'_> {
    fn record(&mut self, id: TypeId) {
        let registry = self.registry;
        if !self.records.insert(id) {
            return;
        }
        let Some(record) = registry.record(id) else {
            return;
        };

        for field in &record.fields {
            let member = strip_indirection(registry, field.type_id);
            let Some(func) = registry.function(member) else {
                continue;
            };
            if !self.names.insert(field.name.clone()) {
                continue;
            }
            self.operations.push(Operation {
                name: field.name.clone(),
                function: field.type_id,
                inputs: func.inputs.clone(),
                outputs: func.outputs.clone(),
                errors: func.errors.clone(),
            });
        }

        for &base in &record.bases {
            self.record(strip_indirection(registry, base));
        }
    }
}

/// Follow references and aliases down to the underlying type.
fn strip_indirection(registry: &TypeRegistry, mut id: TypeId) -> TypeId {
    let mut seen = HashSet::new();
    while seen.insert(id) {
        match registry.get(id) {
            TypeData::Reference(target) | TypeData::Alias { target, .. } => id = *target,
            _ => break,
        }
    }
    id
}
