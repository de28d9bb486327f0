//! bridge compiler: declaration resolution, type closure and binding
//! emission.
//!
//! - `decl` - declaration trees as produced by a source parser
//! - `resolve` - declaration trees into the type registry
//! - `closure` - deduplicated, cycle-safe type closure
//! - `service` - operations of a service record
//! - `emit` - coordinator and renderer seam for generated bindings
//! - `diagnostics` - error reporting
//! - `project` - high-level staged facade

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod closure;
pub mod decl;
pub mod diagnostics;
pub mod emit;
pub mod project;
pub mod resolve;
pub mod service;

#[cfg(test)]
mod closure_tests;
#[cfg(test)]
pub mod test_utils;

pub use closure::{ClosureCollector, ClosureConfig, closure};
pub use decl::{Node, SourceFile};
pub use diagnostics::{DiagnosticKind, Diagnostics, DiagnosticsPrinter, Severity};
pub use emit::{Bindings, CodecKey, EmitConfig, EmitError, Emitter, OutlineConfig, OutlineRenderer, Renderer};
pub use project::{Project, ProjectConfig, ResolvedProject};
pub use service::{Operation, ServiceError};

/// Errors that end a run. Per-type problems are [`Diagnostics`] instead.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error(transparent)]
    Emit(#[from] EmitError),

    #[error("invalid declaration file: {0}")]
    Json(#[from] serde_json::Error),

    #[error(
        "resolution failed with {} errors and {} warnings",
        .0.error_count(),
        .0.warning_count()
    )]
    ResolutionFailed(Diagnostics),
}

pub type Result<T> = std::result::Result<T, Error>;
