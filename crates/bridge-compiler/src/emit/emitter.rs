//! Emission coordinator: client, operation stubs, then codecs until the
//! closure stops growing.

use std::collections::HashSet;

use bridge_core::{TypeData, TypeId, TypeRegistry};
use indexmap::IndexSet;

use super::config::{EmitConfig, is_known_codec};
use super::naming::{io_method_name, reader_name, writer_name};
use super::renderer::{ChildCodec, ClientContext, Marks, OperationContext, Renderer, TypeContext};
use super::{EmitError, TemplateFamily};
use crate::Result;
use crate::closure::ClosureCollector;
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::service::{Operation, service_operations};

/// `alias "path"` line of a generated file header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Import {
    pub alias: String,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Output stem: `client`, `ops`, `writers` or `readers`.
    pub name: String,
    pub package: String,
    pub imports: Vec<Import>,
    pub body: String,
}

impl std::fmt::Display for GeneratedFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "package {}", self.package)?;
        if !self.imports.is_empty() {
            writeln!(f)?;
            writeln!(f, "import (")?;
            for import in &self.imports {
                writeln!(f, "\t{} \"{}\"", import.alias, import.path)?;
            }
            writeln!(f, ")")?;
        }
        if !self.body.is_empty() {
            writeln!(f)?;
            f.write_str(&self.body)?;
        }
        Ok(())
    }
}

/// Output of one service emission.
#[derive(Debug, Clone)]
pub struct Bindings {
    pub client: GeneratedFile,
    pub operations: GeneratedFile,
    pub writers: GeneratedFile,
    pub readers: GeneratedFile,
    /// Types that got a generated writer and reader, in emission order.
    pub emitted: Vec<TypeId>,
    /// Closure entries covered by hand-written codecs.
    pub skipped: Vec<TypeId>,
    /// Per-type failures; the rest of the output is still complete.
    pub diagnostics: Diagnostics,
}

impl Bindings {
    pub fn files(&self) -> [&GeneratedFile; 4] {
        [&self.client, &self.operations, &self.writers, &self.readers]
    }
}

pub struct Emitter<'r> {
    registry: &'r TypeRegistry,
    config: EmitConfig,
}

impl<'r> Emitter<'r> {
    pub fn new(registry: &'r TypeRegistry, config: EmitConfig) -> Self {
        Self { registry, config }
    }

    pub fn config(&self) -> &EmitConfig {
        &self.config
    }

    /// Emit client, operation stubs, writers and readers for `service`.
    ///
    /// Failures of the client or operation templates abort the run. A type
    /// whose codec cannot be emitted is reported in the returned
    /// diagnostics and skipped.
    pub fn emit_service<R: Renderer + ?Sized>(
        &self,
        service: TypeId,
        renderer: &mut R,
    ) -> Result<Bindings> {
        let registry = self.registry;
        let mut operations = service_operations(registry, service)?;
        if let Some(only) = &self.config.operation {
            operations.retain(|op| &op.name == only);
        }
        let service_name = registry
            .record(service)
            .map(|r| r.name.as_str())
            .unwrap_or_default();
        let client_name = self.config.client_name(service_name);
        tracing::debug!(
            service = service_name,
            operations = operations.len(),
            "emitting bindings"
        );

        let mut collector = ClosureCollector::new(registry, self.config.closure);

        let client_ctx = ClientContext {
            registry,
            service,
            service_name,
            client_name: &client_name,
            package: &self.config.package,
            operations: &operations,
            marks: Marks::default(),
        };
        let mut client_body = String::new();
        renderer
            .client(&client_ctx, &mut client_body)
            .map_err(EmitError::from)?;
        collector.mark(client_ctx.marks.take());
        let client_types = collector.take_wave();

        collector.reset();
        let mut ops_body = String::new();
        for op in &operations {
            let ctx = self.operation_context(&client_name, op);
            renderer
                .operation(&ctx, &mut ops_body)
                .map_err(EmitError::from)?;
            collector.mark(op.roots());
            collector.mark(ctx.marks.take());
        }

        let mut diagnostics = Diagnostics::new();
        let mut writers_body = String::new();
        let mut readers_body = String::new();
        let mut emitted = Vec::new();
        let mut skipped = Vec::new();

        let mut wave = collector.take_wave();
        let op_types = wave.clone();
        let mut round = 0;
        while !wave.is_empty() {
            tracing::debug!(round, types = wave.len(), "codec wave");
            for id in wave {
                match self.emit_codec(id, renderer, &mut writers_body, &mut readers_body) {
                    Ok(Some(marked)) => {
                        emitted.push(id);
                        collector.mark(marked);
                    }
                    Ok(None) => skipped.push(id),
                    Err(err) => report(&mut diagnostics, &err),
                }
            }
            wave = collector.take_wave();
            round += 1;
        }
        let all_types = collector.all().to_vec();

        let file = |name: &str, types: &[TypeId], body: String| GeneratedFile {
            name: name.to_string(),
            package: self.config.package.clone(),
            imports: imports_for(registry, types),
            body,
        };
        Ok(Bindings {
            client: file("client", &client_types, client_body),
            operations: file("ops", &op_types, ops_body),
            writers: file("writers", &all_types, writers_body),
            readers: file("readers", &all_types, readers_body),
            emitted,
            skipped,
            diagnostics,
        })
    }

    /// Render the writer and reader of one closure entry.
    ///
    /// Returns `None` if the codec is supplied elsewhere, otherwise the
    /// types the rendered code asked for.
    fn emit_codec<R: Renderer + ?Sized>(
        &self,
        id: TypeId,
        renderer: &mut R,
        writers: &mut String,
        readers: &mut String,
    ) -> std::result::Result<Option<Vec<TypeId>>, EmitError> {
        let registry = self.registry;
        let signature = registry.signature(id);
        if is_known_codec(&self.config.known_codecs, registry, id) {
            tracing::debug!(%signature, "codec supplied, skipping");
            return Ok(None);
        }
        let Some(family) = TemplateFamily::for_type(registry, id)? else {
            return Ok(None);
        };
        let name = io_method_name(registry, id)?;

        let ctx = TypeContext {
            registry,
            type_id: id,
            kind: registry.kind(id),
            family,
            writer: writer_name(&name),
            reader: reader_name(&name),
            children: self.children(id),
            signature,
            name,
            marks: Marks::default(),
        };

        let mut writer = String::new();
        let mut reader = String::new();
        let rendered = renderer
            .writer(&ctx, &mut writer)
            .and_then(|()| renderer.reader(&ctx, &mut reader));
        if let Err(err) = rendered {
            return Err(EmitError::Render {
                signature: ctx.signature,
                source: err,
            });
        }
        writers.push_str(&writer);
        readers.push_str(&reader);
        Ok(Some(ctx.marks.take()))
    }

    fn operation_context<'a>(
        &'a self,
        client_name: &'a str,
        operation: &'a Operation,
    ) -> OperationContext<'a> {
        OperationContext {
            registry: self.registry,
            client_name,
            operation,
            inputs: self.codecs("arg", &operation.inputs),
            outputs: self.codecs("ret", &operation.outputs),
            errors: self.codecs("err", &operation.errors),
            marks: Marks::default(),
        }
    }

    fn codecs(&self, prefix: &str, ids: &[TypeId]) -> Vec<ChildCodec> {
        ids.iter()
            .enumerate()
            .map(|(i, id)| self.child(format!("{prefix}{i}"), *id))
            .collect()
    }

    fn child(&self, label: impl Into<String>, id: TypeId) -> ChildCodec {
        ChildCodec::new(
            self.registry,
            &self.config.known_codecs,
            label,
            id,
            !self.config.closure.collect_references,
        )
    }

    fn children(&self, id: TypeId) -> Vec<ChildCodec> {
        match self.registry.get(id) {
            TypeData::Record(record) => record
                .bases
                .iter()
                .map(|base| self.child("", *base).embedded())
                .chain(
                    record
                        .fields
                        .iter()
                        .map(|field| self.child(field.name.as_str(), field.type_id)),
                )
                .collect(),
            TypeData::List(element) => vec![self.child("element", *element)],
            TypeData::Map { key, value } => {
                vec![self.child("key", *key), self.child("value", *value)]
            }
            TypeData::Reference(target) | TypeData::Alias { target, .. } => {
                vec![self.child("target", *target)]
            }
            _ => Vec::new(),
        }
    }
}

fn report(diagnostics: &mut Diagnostics, err: &EmitError) {
    match err {
        EmitError::UnsupportedKind { kind, signature } => diagnostics
            .report(DiagnosticKind::UnsupportedKind)
            .message(kind.name())
            .at(signature.as_str())
            .emit(),
        EmitError::AnonymousRecord { signature } => diagnostics
            .report(DiagnosticKind::UnsupportedKind)
            .message("anonymous RecordType")
            .at(signature.as_str())
            .emit(),
        EmitError::Unresolved { signature } => diagnostics
            .report(DiagnosticKind::UnresolvedType)
            .message(signature.as_str())
            .emit(),
        EmitError::Render { signature, source } => diagnostics
            .report(DiagnosticKind::RenderFailed)
            .message(source.to_string())
            .at(signature.as_str())
            .emit(),
        EmitError::Template(source) => diagnostics
            .report(DiagnosticKind::RenderFailed)
            .message(source.to_string())
            .emit(),
    }
}

/// Namespaces the given types mention, for the generated file header.
///
/// Each type is walked down to its named parts; their non-empty namespaces
/// are returned once each, in first-seen order.
pub fn imports_for(registry: &TypeRegistry, types: &[TypeId]) -> Vec<Import> {
    let mut visited = HashSet::new();
    let mut paths: IndexSet<&str> = IndexSet::new();

    for &root in types {
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            if !visited.insert(id) {
                continue;
            }
            let data = registry.get(id);
            if let Some((namespace, _)) = data.declared_name() {
                if !namespace.is_empty() {
                    paths.insert(namespace);
                }
                continue;
            }
            stack.extend(data.children().into_iter().rev());
        }
    }

    paths
        .into_iter()
        .map(|path| Import {
            alias: registry
                .short_name_for_package(path)
                .unwrap_or(path)
                .to_string(),
            path: path.to_string(),
        })
        .collect()
}
