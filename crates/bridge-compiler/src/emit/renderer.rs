//! The seam between emission and whatever turns contexts into code.
//!
//! A [`Renderer`] receives fully resolved contexts: every type it sees has
//! been through the registry, placeholders included, so it never has to look
//! anything up by name. Renderers append to `out` and may call `mark` on a
//! context to request codecs for types the emitted code refers to.

use std::cell::RefCell;

use bridge_core::{TypeData, TypeId, TypeKind, TypeRegistry};

use super::TemplateFamily;
use super::config::{CodecKey, is_known_codec};
use super::naming::{io_method_name, reader_name, writer_name};
use crate::service::Operation;

/// Error from the template layer. Never retried.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct RenderError(Box<dyn std::error::Error + Send + Sync>);

impl RenderError {
    pub fn new(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self(err.into())
    }
}

impl From<std::fmt::Error> for RenderError {
    fn from(err: std::fmt::Error) -> Self {
        Self::new(err)
    }
}

pub trait Renderer {
    /// The client type declaration.
    fn client(&mut self, ctx: &ClientContext<'_>, out: &mut String) -> Result<(), RenderError>;

    /// One call stub per service operation.
    fn operation(&mut self, ctx: &OperationContext<'_>, out: &mut String)
    -> Result<(), RenderError>;

    fn writer(&mut self, ctx: &TypeContext<'_>, out: &mut String) -> Result<(), RenderError>;

    fn reader(&mut self, ctx: &TypeContext<'_>, out: &mut String) -> Result<(), RenderError>;
}

/// Types a renderer asked codecs for.
#[derive(Debug, Default)]
pub(crate) struct Marks(RefCell<Vec<TypeId>>);

impl Marks {
    pub(crate) fn push(&self, ids: impl IntoIterator<Item = TypeId>) {
        self.0.borrow_mut().extend(ids);
    }

    pub(crate) fn take(&self) -> Vec<TypeId> {
        std::mem::take(&mut *self.0.borrow_mut())
    }
}

/// A type the current codec delegates to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildCodec {
    /// Field name, or a role such as `element`, `key`, `arg0`.
    pub label: String,
    /// Embedded base of a record.
    pub embedded: bool,
    pub type_id: TypeId,
    pub kind: TypeKind,
    pub signature: String,
    /// Codec name stem; `None` if the child cannot be serialized.
    pub codec: Option<String>,
    /// Codec comes from the hand-written table rather than this run.
    pub supplied: bool,
}

impl ChildCodec {
    /// With `through_references`, a reference child is written with its
    /// target's codec instead of a codec of its own.
    pub(crate) fn new(
        registry: &TypeRegistry,
        known_codecs: &[CodecKey],
        label: impl Into<String>,
        type_id: TypeId,
        through_references: bool,
    ) -> Self {
        let mut codec_type = type_id;
        if through_references {
            while let TypeData::Reference(target) = registry.get(codec_type) {
                codec_type = *target;
            }
        }
        let supplied = registry.kind(codec_type) == TypeKind::Named
            || is_known_codec(known_codecs, registry, codec_type);
        Self {
            label: label.into(),
            embedded: false,
            type_id,
            kind: registry.kind(type_id),
            signature: registry.signature(type_id),
            codec: io_method_name(registry, codec_type).ok(),
            supplied,
        }
    }

    pub(crate) fn embedded(mut self) -> Self {
        self.embedded = true;
        self
    }

    pub fn writer(&self) -> Option<String> {
        self.codec.as_deref().map(writer_name)
    }

    pub fn reader(&self) -> Option<String> {
        self.codec.as_deref().map(reader_name)
    }
}

pub struct ClientContext<'a> {
    pub registry: &'a TypeRegistry,
    pub service: TypeId,
    pub service_name: &'a str,
    pub client_name: &'a str,
    pub package: &'a str,
    pub operations: &'a [Operation],
    pub(crate) marks: Marks,
}

impl ClientContext<'_> {
    pub fn mark(&self, ids: impl IntoIterator<Item = TypeId>) {
        self.marks.push(ids);
    }
}

pub struct OperationContext<'a> {
    pub registry: &'a TypeRegistry,
    pub client_name: &'a str,
    pub operation: &'a Operation,
    pub inputs: Vec<ChildCodec>,
    pub outputs: Vec<ChildCodec>,
    pub errors: Vec<ChildCodec>,
    pub(crate) marks: Marks,
}

impl OperationContext<'_> {
    pub fn mark(&self, ids: impl IntoIterator<Item = TypeId>) {
        self.marks.push(ids);
    }
}

/// Everything needed to render one writer or reader.
pub struct TypeContext<'a> {
    pub registry: &'a TypeRegistry,
    pub type_id: TypeId,
    pub kind: TypeKind,
    pub family: TemplateFamily,
    pub signature: String,
    /// Codec name stem, e.g. `models_User`.
    pub name: String,
    pub writer: String,
    pub reader: String,
    /// Bases first, then fields, for records; the structural children
    /// otherwise.
    pub children: Vec<ChildCodec>,
    pub(crate) marks: Marks,
}

impl TypeContext<'_> {
    pub fn mark(&self, ids: impl IntoIterator<Item = TypeId>) {
        self.marks.push(ids);
    }
}
