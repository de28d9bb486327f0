//! Kind to template family dispatch.

use bridge_core::{TypeId, TypeKind, TypeRegistry};

use super::EmitError;

/// The template set a closure entry is rendered with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TemplateFamily {
    List,
    Map,
    Reference,
    Record,
    Alias,
}

impl TemplateFamily {
    /// Family for kinds that get generated codecs.
    pub fn for_kind(kind: TypeKind) -> Option<Self> {
        match kind {
            TypeKind::List => Some(Self::List),
            TypeKind::Map => Some(Self::Map),
            TypeKind::Reference => Some(Self::Reference),
            TypeKind::Record => Some(Self::Record),
            TypeKind::Alias => Some(Self::Alias),
            TypeKind::Null
            | TypeKind::Unresolved
            | TypeKind::Named
            | TypeKind::Tuple
            | TypeKind::Function => None,
        }
    }

    /// Dispatch a registry type.
    ///
    /// `Ok(None)` for named leaves, whose codecs are supplied by hand.
    pub fn for_type(registry: &TypeRegistry, id: TypeId) -> Result<Option<Self>, EmitError> {
        let kind = registry.kind(id);
        match kind {
            TypeKind::Named => Ok(None),
            TypeKind::Unresolved => Err(EmitError::Unresolved {
                signature: registry.signature(id),
            }),
            _ => Self::for_kind(kind)
                .map(Some)
                .ok_or_else(|| EmitError::UnsupportedKind {
                    kind,
                    signature: registry.signature(id),
                }),
        }
    }

    /// Template file stem: `writer_<stem>`, `reader_<stem>`.
    pub fn stem(self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Map => "map",
            Self::Reference => "ref",
            Self::Record => "record",
            Self::Alias => "alias",
        }
    }
}

impl std::fmt::Display for TemplateFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.stem())
    }
}
