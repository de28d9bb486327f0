//! The type model.
//!
//! Types live in an arena owned by [`TypeRegistry`](crate::TypeRegistry) and
//! are referred to by [`TypeId`] handles. Two holders of the same `TypeId`
//! always observe the same slot, so resolving a placeholder in place is
//! visible to every holder at once.

/// Handle to a type slot in the registry arena.
///
/// Comparing two handles is identity comparison: equal handles name the same
/// type instance, even if it was still unresolved when the handle was taken.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct TypeId(u32);

impl TypeId {
    /// Raw index for debugging and stable output ordering.
    #[inline]
    pub fn as_u32(self) -> u32 {
        self.0
    }

    #[inline]
    pub(crate) fn from_index(index: usize) -> Self {
        Self(index as u32)
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// Discriminant of [`TypeData`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum TypeKind {
    Null,
    Unresolved,
    Named,
    Alias,
    Reference,
    Tuple,
    Record,
    Function,
    List,
    Map,
}

impl TypeKind {
    pub const ALL: [TypeKind; 10] = [
        Self::Null,
        Self::Unresolved,
        Self::Named,
        Self::Alias,
        Self::Reference,
        Self::Tuple,
        Self::Record,
        Self::Function,
        Self::List,
        Self::Map,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Null => "NullType",
            Self::Unresolved => "UnresolvedType",
            Self::Named => "NamedType",
            Self::Alias => "AliasType",
            Self::Reference => "ReferenceType",
            Self::Tuple => "TupleType",
            Self::Record => "RecordType",
            Self::Function => "FunctionType",
            Self::List => "ListType",
            Self::Map => "MapType",
        }
    }

    /// Whether values of this kind are held inline rather than through
    /// some indirection (pointer, container or callable).
    pub fn is_value_type(self) -> bool {
        matches!(self, Self::Named | Self::Alias | Self::Tuple | Self::Record)
    }
}

impl std::fmt::Display for TypeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A named member of a record.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Field {
    pub name: String,
    pub type_id: TypeId,
}

impl Field {
    pub fn new(name: impl Into<String>, type_id: TypeId) -> Self {
        Self {
            name: name.into(),
            type_id,
        }
    }
}

/// Struct- or interface-like aggregate.
///
/// `bases` are embedded records (the "embeds" relation); they are kept apart
/// from `fields` (the "has-field" relation).
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct RecordData {
    /// Declared name, empty for inline (anonymous) records.
    pub name: String,
    pub namespace: String,
    pub bases: Vec<TypeId>,
    pub fields: Vec<Field>,
}

impl RecordData {
    pub fn named(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            ..Self::default()
        }
    }

    pub fn with_base(mut self, base: TypeId) -> Self {
        self.bases.push(base);
        self
    }

    pub fn with_field(mut self, name: impl Into<String>, type_id: TypeId) -> Self {
        self.fields.push(Field::new(name, type_id));
        self
    }

    pub fn is_anonymous(&self) -> bool {
        self.name.is_empty()
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Callable shape: ordered inputs, outputs and error types.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct FunctionData {
    pub inputs: Vec<TypeId>,
    pub outputs: Vec<TypeId>,
    pub errors: Vec<TypeId>,
}

impl FunctionData {
    pub fn new(inputs: Vec<TypeId>, outputs: Vec<TypeId>) -> Self {
        Self {
            inputs,
            outputs,
            errors: Vec::new(),
        }
    }

    pub fn with_errors(mut self, errors: Vec<TypeId>) -> Self {
        self.errors = errors;
        self
    }
}

/// Payload of a type slot. One variant per [`TypeKind`].
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum TypeData {
    Null,
    /// Placeholder for a name referenced before its declaration was seen.
    Unresolved { name: String, namespace: String },
    /// Opaque leaf type (builtins, types owned by other code).
    Named { name: String, namespace: String },
    Alias {
        name: String,
        namespace: String,
        target: TypeId,
    },
    Reference(TypeId),
    Tuple(Vec<TypeId>),
    Record(RecordData),
    Function(FunctionData),
    List(TypeId),
    Map { key: TypeId, value: TypeId },
}

impl TypeData {
    pub fn named(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Named {
            name: name.into(),
            namespace: namespace.into(),
        }
    }

    pub fn unresolved(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Unresolved {
            name: name.into(),
            namespace: namespace.into(),
        }
    }

    pub fn kind(&self) -> TypeKind {
        match self {
            Self::Null => TypeKind::Null,
            Self::Unresolved { .. } => TypeKind::Unresolved,
            Self::Named { .. } => TypeKind::Named,
            Self::Alias { .. } => TypeKind::Alias,
            Self::Reference(_) => TypeKind::Reference,
            Self::Tuple(_) => TypeKind::Tuple,
            Self::Record(_) => TypeKind::Record,
            Self::Function(_) => TypeKind::Function,
            Self::List(_) => TypeKind::List,
            Self::Map { .. } => TypeKind::Map,
        }
    }

    pub fn is_unresolved(&self) -> bool {
        matches!(self, Self::Unresolved { .. })
    }

    /// Declared `(namespace, name)` for nominal kinds, placeholders included.
    ///
    /// Anonymous records and structural kinds have no declared name.
    pub fn declared_name(&self) -> Option<(&str, &str)> {
        match self {
            Self::Named { name, namespace }
            | Self::Unresolved { name, namespace }
            | Self::Alias {
                name, namespace, ..
            } => Some((namespace, name)),
            Self::Record(record) if !record.is_anonymous() => {
                Some((&record.namespace, &record.name))
            }
            _ => None,
        }
    }

    /// Structural children, in declaration order.
    ///
    /// Records yield bases before fields; functions yield inputs then
    /// outputs. Error types are not part of the serializable structure.
    pub fn children(&self) -> Vec<TypeId> {
        match self {
            Self::Null | Self::Unresolved { .. } | Self::Named { .. } => Vec::new(),
            Self::Alias { target, .. } => vec![*target],
            Self::Reference(target) | Self::List(target) => vec![*target],
            Self::Map { key, value } => vec![*key, *value],
            Self::Tuple(items) => items.clone(),
            Self::Record(record) => record
                .bases
                .iter()
                .copied()
                .chain(record.fields.iter().map(|f| f.type_id))
                .collect(),
            Self::Function(func) => func
                .inputs
                .iter()
                .chain(func.outputs.iter())
                .copied()
                .collect(),
        }
    }
}
