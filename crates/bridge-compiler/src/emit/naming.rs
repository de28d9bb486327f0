//! Codec function names.
//!
//! Every generated or hand-written codec is named after its type:
//! `Write_<name>` / `Read_<name>`, where `<name>` spells the type's shape
//! with identifier-safe separators (`List_models_User`, `Map_string_int`).

use bridge_core::{TypeData, TypeId, TypeRegistry};

use super::EmitError;

pub fn io_method_name(registry: &TypeRegistry, id: TypeId) -> Result<String, EmitError> {
    let mut out = String::new();
    write_name(registry, id, &mut out)?;
    Ok(out)
}

pub fn writer_name(io_name: &str) -> String {
    format!("Write_{io_name}")
}

pub fn reader_name(io_name: &str) -> String {
    format!("Read_{io_name}")
}

fn write_name(registry: &TypeRegistry, id: TypeId, out: &mut String) -> Result<(), EmitError> {
    match registry.get(id) {
        TypeData::Named { name, namespace }
        | TypeData::Alias {
            name, namespace, ..
        } => push_qualified(registry, namespace, name, out),
        TypeData::Record(record) if !record.is_anonymous() => {
            push_qualified(registry, &record.namespace, &record.name, out)
        }
        TypeData::Record(_) => {
            return Err(EmitError::AnonymousRecord {
                signature: registry.signature(id),
            });
        }
        TypeData::Reference(target) => {
            out.push_str("Ref_");
            write_name(registry, *target, out)?;
        }
        TypeData::List(element) => {
            out.push_str("List_");
            write_name(registry, *element, out)?;
        }
        TypeData::Map { key, value } => {
            out.push_str("Map_");
            write_name(registry, *key, out)?;
            out.push('_');
            write_name(registry, *value, out)?;
        }
        TypeData::Unresolved { .. } => {
            return Err(EmitError::Unresolved {
                signature: registry.signature(id),
            });
        }
        TypeData::Null | TypeData::Tuple(_) | TypeData::Function(_) => {
            return Err(EmitError::UnsupportedKind {
                kind: registry.kind(id),
                signature: registry.signature(id),
            });
        }
    }
    Ok(())
}

fn push_qualified(registry: &TypeRegistry, namespace: &str, name: &str, out: &mut String) {
    if let Some(alias) = registry.short_name_for_package(namespace)
        && !alias.is_empty()
    {
        out.push_str(alias);
        out.push('_');
    }
    out.push_str(name);
}
