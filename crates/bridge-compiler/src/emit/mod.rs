//! Binding emission.
//!
//! - `family` - which template set renders a type
//! - `naming` - codec function names
//! - `renderer` - the template seam and its contexts
//! - `emitter` - the coordinator driving closure waves
//! - `outline` - a plain-text renderer

mod config;
mod emitter;
mod family;
mod naming;
mod outline;
mod renderer;

#[cfg(test)]
mod outline_tests;

use bridge_core::TypeKind;

pub use config::{CodecKey, DEFAULT_KNOWN_CODECS, EmitConfig};
pub use emitter::{Bindings, Emitter, GeneratedFile, Import, imports_for};
pub use family::TemplateFamily;
pub use naming::{io_method_name, reader_name, writer_name};
pub use outline::{OutlineConfig, OutlineRenderer};
pub use renderer::{ChildCodec, ClientContext, OperationContext, RenderError, Renderer, TypeContext};

/// Why a single type could not be emitted.
#[derive(Debug, thiserror::Error)]
pub enum EmitError {
    #[error("{kind} `{signature}` has no codec")]
    UnsupportedKind { kind: TypeKind, signature: String },

    #[error("anonymous record `{signature}` has no codec name")]
    AnonymousRecord { signature: String },

    #[error("type `{signature}` is still unresolved")]
    Unresolved { signature: String },

    #[error("rendering codec for `{signature}` failed: {source}")]
    Render {
        signature: String,
        source: RenderError,
    },

    /// Client or operation template failure.
    #[error("template failed: {0}")]
    Template(#[from] RenderError),
}
