//! Declaration trees to registry types.
//!
//! Resolution runs in three passes over the whole file set: register every
//! namespace path, reserve a slot for every declared name, then convert
//! declaration bodies. Aliases and lookups therefore see the complete set of
//! packages and declarations, and the result does not depend on the order in
//! which files are given.

use std::collections::HashMap;

use bridge_core::{Field, FunctionData, RecordData, RegistryError, TypeData, TypeId, TypeRegistry};

use crate::decl::{FieldDecl, MethodDecl, Node, SourceFile, TypeDecl};
use crate::diagnostics::{DiagnosticKind, Diagnostics};

/// Resolve every declaration in `files`, then report whatever is still
/// unresolved.
pub fn resolve_files(
    files: &[SourceFile],
    registry: &mut TypeRegistry,
    diagnostics: &mut Diagnostics,
) {
    register_packages(files, registry);
    for file in files {
        for decl in &file.decls {
            registry.placeholder(&file.namespace, &decl.name);
        }
    }

    let mut referenced_from = HashMap::new();
    for file in files {
        FileScope {
            file,
            registry: &mut *registry,
            diagnostics: &mut *diagnostics,
            referenced_from: &mut referenced_from,
        }
        .resolve();
    }
    report_unresolved(registry, &referenced_from, diagnostics);
}

/// Register every namespace and import path, shortest first.
///
/// Shorter paths claim their preferred alias before longer paths that end in
/// the same segment.
pub fn register_packages(files: &[SourceFile], registry: &mut TypeRegistry) {
    let mut paths: Vec<&str> = files
        .iter()
        .flat_map(|file| std::iter::once(&file.namespace).chain(file.imports.values()))
        .map(String::as_str)
        .collect();
    paths.sort_by_key(|path| (path.split('/').count(), *path));
    paths.dedup();
    for path in paths {
        registry.add_package(path);
    }
}

/// One warning per registry key still holding a placeholder.
pub fn report_unresolved(
    registry: &TypeRegistry,
    referenced_from: &HashMap<TypeId, String>,
    diagnostics: &mut Diagnostics,
) {
    for (namespace, name, id) in registry.unresolved() {
        let mut report = diagnostics
            .report(DiagnosticKind::UnresolvedReference)
            .message(registry.qualified_name(namespace, name));
        if let Some(file) = referenced_from.get(&id) {
            report = report.at(file.as_str());
        }
        report.emit();
    }
}

/// Resolution context for a single source file.
///
/// Identifiers are looked up in the file's own namespace first, then among
/// builtins. Qualified identifiers go through the file's import table.
pub struct FileScope<'a> {
    pub file: &'a SourceFile,
    pub registry: &'a mut TypeRegistry,
    pub diagnostics: &'a mut Diagnostics,
    /// Placeholder -> first file that referenced it.
    pub referenced_from: &'a mut HashMap<TypeId, String>,
}

impl FileScope<'_> {
    pub fn resolve(mut self) {
        let file = self.file;
        tracing::debug!(
            file = file.display_name(),
            namespace = %file.namespace,
            decls = file.decls.len(),
            "resolving file"
        );
        self.registry.add_package(&file.namespace);
        for path in file.imports.values() {
            self.registry.add_package(path);
        }
        for decl in &file.decls {
            self.declare(decl);
        }
    }

    fn declare(&mut self, decl: &TypeDecl) {
        let file = self.file;
        let namespace = file.namespace.as_str();
        let data = if decl.node.is_record_like() {
            let mut record = RecordData::named(namespace, decl.name.as_str());
            self.fill_record(&decl.node, &mut record);
            TypeData::Record(record)
        } else {
            let target = self.convert(&decl.node);
            TypeData::Alias {
                name: decl.name.clone(),
                namespace: namespace.to_owned(),
                target,
            }
        };

        if let Err(RegistryError::Redefinition { namespace, name, .. }) =
            self.registry.define(namespace, &decl.name, data)
        {
            self.diagnostics
                .report(DiagnosticKind::Redefinition)
                .message(self.registry.qualified_name(&namespace, &name))
                .at(file.display_name())
                .emit();
        }
    }

    /// Convert a type expression node.
    pub fn convert(&mut self, node: &Node) -> TypeId {
        match node {
            Node::Struct { .. } | Node::Interface { .. } => {
                let mut record = RecordData::default();
                self.fill_record(node, &mut record);
                self.registry.alloc(TypeData::Record(record))
            }
            Node::Alias { target } => self.convert(target),
            Node::Array { element } => {
                let element = self.convert(element);
                self.registry.alloc(TypeData::List(element))
            }
            Node::Map { key, value } => {
                let key = self.convert(key);
                let value = self.convert(value);
                self.registry.alloc(TypeData::Map { key, value })
            }
            Node::Pointer { target } => {
                let target = self.convert(target);
                self.registry.alloc(TypeData::Reference(target))
            }
            Node::Function {
                params,
                results,
                throws,
            } => {
                let func = FunctionData::new(self.convert_all(params), self.convert_all(results))
                    .with_errors(self.convert_all(throws));
                self.registry.alloc(TypeData::Function(func))
            }
            Node::Tuple { items } => {
                let items = self.convert_all(items);
                self.registry.alloc(TypeData::Tuple(items))
            }
            Node::Ident { name } => self.lookup_ident(name),
            Node::Qualified { package, name } => self.lookup_qualified(package, name),
        }
    }

    fn convert_all(&mut self, nodes: &[Node]) -> Vec<TypeId> {
        nodes.iter().map(|node| self.convert(node)).collect()
    }

    fn fill_record(&mut self, node: &Node, record: &mut RecordData) {
        match node {
            Node::Struct { fields } => {
                for FieldDecl { names, ty } in fields {
                    let type_id = self.convert(ty);
                    if names.is_empty() {
                        record.bases.push(type_id);
                    }
                    for name in names {
                        record.fields.push(Field::new(name.as_str(), type_id));
                    }
                }
            }
            Node::Interface { methods, embeds } => {
                for embed in embeds {
                    let base = self.convert(embed);
                    record.bases.push(base);
                }
                for MethodDecl { name, ty } in methods {
                    let type_id = self.convert(ty);
                    record.fields.push(Field::new(name.as_str(), type_id));
                }
            }
            _ => {}
        }
    }

    fn lookup_ident(&mut self, name: &str) -> TypeId {
        let file = self.file;
        let namespace = file.namespace.as_str();
        if let Some(id) = self.registry.get_type(namespace, name) {
            return id;
        }
        if let Some(id) = self.registry.get_type("", name) {
            return id;
        }
        self.placeholder(namespace, name)
    }

    fn lookup_qualified(&mut self, package: &str, name: &str) -> TypeId {
        let file = self.file;
        let namespace = match file.imports.get(package) {
            Some(path) => path.as_str(),
            None => {
                self.diagnostics
                    .report(DiagnosticKind::UnknownImport)
                    .message(package)
                    .at(file.display_name())
                    .emit();
                package
            }
        };
        match self.registry.get_type(namespace, name) {
            Some(id) => id,
            None => self.placeholder(namespace, name),
        }
    }

    fn placeholder(&mut self, namespace: &str, name: &str) -> TypeId {
        let file = self.file;
        let id = self.registry.placeholder(namespace, name);
        self.referenced_from
            .entry(id)
            .or_insert_with(|| file.display_name().to_owned());
        id
    }
}
