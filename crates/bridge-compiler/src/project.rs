//! Staged pipeline: collect files, resolve them, then query or emit.

use bridge_core::{DEFAULT_BUILTINS, TypeId, TypeRegistry};

use crate::closure::{ClosureCollector, ClosureConfig};
use crate::decl::SourceFile;
use crate::diagnostics::Diagnostics;
use crate::emit::{Bindings, EmitConfig, Emitter, Renderer};
use crate::resolve::resolve_files;
use crate::service::{Operation, find_service, service_operations};
use crate::{Error, Result};

#[derive(Clone, Debug)]
pub struct ProjectConfig {
    /// Opaque types available in every file without an import
    pub(crate) builtins: Vec<String>,
    /// Fail resolution on any diagnostic, warnings included
    pub(crate) strict: bool,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            builtins: DEFAULT_BUILTINS.iter().map(|s| s.to_string()).collect(),
            strict: false,
        }
    }
}

impl ProjectConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builtins<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.builtins = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn strict(mut self, value: bool) -> Self {
        self.strict = value;
        self
    }
}

#[derive(Debug, Default)]
pub struct Project {
    config: ProjectConfig,
    files: Vec<SourceFile>,
}

impl Project {
    pub fn new(config: ProjectConfig) -> Self {
        Self {
            config,
            files: Vec::new(),
        }
    }

    pub fn add_file(mut self, file: SourceFile) -> Self {
        self.files.push(file);
        self
    }

    /// Parse a JSON declaration file. `path` is used when the file does not
    /// name itself.
    pub fn add_json(self, path: impl Into<String>, json: &str) -> Result<Self> {
        let mut file = SourceFile::from_json(json)?;
        if file.path.is_empty() {
            file.path = path.into();
        }
        Ok(self.add_file(file))
    }

    pub fn files(&self) -> &[SourceFile] {
        &self.files
    }

    /// Resolve every file into one registry.
    ///
    /// Problems are collected, not fatal, unless the project is strict.
    pub fn resolve(self) -> Result<ResolvedProject> {
        let mut registry = TypeRegistry::with_builtins(self.config.builtins.iter().map(String::as_str));
        let mut diagnostics = Diagnostics::new();
        resolve_files(&self.files, &mut registry, &mut diagnostics);
        tracing::debug!(
            files = self.files.len(),
            types = registry.len(),
            errors = diagnostics.error_count(),
            warnings = diagnostics.warning_count(),
            "resolved project"
        );

        if self.config.strict && !diagnostics.is_empty() {
            return Err(Error::ResolutionFailed(diagnostics));
        }

        Ok(ResolvedProject {
            files: self.files,
            registry,
            diagnostics,
        })
    }
}

#[derive(Debug)]
pub struct ResolvedProject {
    files: Vec<SourceFile>,
    registry: TypeRegistry,
    diagnostics: Diagnostics,
}

impl ResolvedProject {
    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn files(&self) -> &[SourceFile] {
        &self.files
    }

    pub fn service(&self, namespace: &str, name: &str) -> Result<TypeId> {
        Ok(find_service(&self.registry, namespace, name)?)
    }

    pub fn operations(&self, service: TypeId) -> Result<Vec<Operation>> {
        Ok(service_operations(&self.registry, service)?)
    }

    /// Closure over the inputs and outputs of the service's operations, or
    /// of `operation` alone.
    pub fn closure(
        &self,
        service: TypeId,
        operation: Option<&str>,
        config: ClosureConfig,
    ) -> Result<Vec<TypeId>> {
        let operations = self.operations(service)?;
        let mut collector = ClosureCollector::new(&self.registry, config);
        for op in operations
            .iter()
            .filter(|op| operation.is_none_or(|name| op.name == name))
        {
            collector.collect(op.roots());
        }
        Ok(collector.all().to_vec())
    }

    pub fn emit<R: Renderer + ?Sized>(
        &self,
        service: TypeId,
        config: EmitConfig,
        renderer: &mut R,
    ) -> Result<Bindings> {
        Emitter::new(&self.registry, config).emit_service(service, renderer)
    }
}
