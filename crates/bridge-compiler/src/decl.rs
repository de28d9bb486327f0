//! Declaration trees, as handed over by a source parser.
//!
//! The parser itself lives outside this crate; anything that can produce
//! these types (or a JSON dump of them) can feed the resolver.
//!
//! ```json
//! {
//!   "namespace": "github.com/acme/users",
//!   "imports": { "models": "github.com/acme/models" },
//!   "decls": [
//!     { "name": "SaveUserRequest",
//!       "node": { "kind": "struct", "fields": [
//!         { "names": ["U"], "ty": { "kind": "pointer",
//!           "target": { "kind": "qualified", "package": "models", "name": "User" } } }
//!       ] } }
//!   ]
//! }
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One parsed source file.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SourceFile {
    /// Where the file came from; used only in diagnostics.
    #[serde(default)]
    pub path: String,
    /// Full namespace path all declarations in this file belong to.
    #[serde(default)]
    pub namespace: String,
    /// Local alias token -> full namespace path.
    #[serde(default)]
    pub imports: IndexMap<String, String>,
    #[serde(default)]
    pub decls: Vec<TypeDecl>,
}

impl SourceFile {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            ..Self::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    pub fn with_import(mut self, alias: impl Into<String>, path: impl Into<String>) -> Self {
        self.imports.insert(alias.into(), path.into());
        self
    }

    pub fn with_decl(mut self, name: impl Into<String>, node: Node) -> Self {
        self.decls.push(TypeDecl {
            name: name.into(),
            node,
        });
        self
    }

    /// Path if known, namespace otherwise.
    pub fn display_name(&self) -> &str {
        if self.path.is_empty() {
            &self.namespace
        } else {
            &self.path
        }
    }
}

/// `type <name> <node>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDecl {
    pub name: String,
    pub node: Node,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDecl {
    /// Several names may share one type. No names means an embedded base.
    #[serde(default)]
    pub names: Vec<String>,
    pub ty: Node,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDecl {
    pub name: String,
    pub ty: Node,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Node {
    Struct {
        #[serde(default)]
        fields: Vec<FieldDecl>,
    },
    Interface {
        #[serde(default)]
        methods: Vec<MethodDecl>,
        #[serde(default)]
        embeds: Vec<Node>,
    },
    Alias {
        target: Box<Node>,
    },
    Array {
        element: Box<Node>,
    },
    Map {
        key: Box<Node>,
        value: Box<Node>,
    },
    Pointer {
        target: Box<Node>,
    },
    Function {
        #[serde(default)]
        params: Vec<Node>,
        #[serde(default)]
        results: Vec<Node>,
        #[serde(default)]
        throws: Vec<Node>,
    },
    Tuple {
        items: Vec<Node>,
    },
    Ident {
        name: String,
    },
    Qualified {
        package: String,
        name: String,
    },
}

impl Node {
    pub fn ident(name: impl Into<String>) -> Self {
        Self::Ident { name: name.into() }
    }

    pub fn qualified(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Qualified {
            package: package.into(),
            name: name.into(),
        }
    }

    pub fn pointer(target: Node) -> Self {
        Self::Pointer {
            target: Box::new(target),
        }
    }

    pub fn array(element: Node) -> Self {
        Self::Array {
            element: Box::new(element),
        }
    }

    pub fn map(key: Node, value: Node) -> Self {
        Self::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    pub fn alias(target: Node) -> Self {
        Self::Alias {
            target: Box::new(target),
        }
    }

    pub fn function(params: Vec<Node>, results: Vec<Node>) -> Self {
        Self::Function {
            params,
            results,
            throws: Vec::new(),
        }
    }

    /// `struct { name ty; ... }` with one name per field.
    pub fn structure<N: Into<String>>(fields: impl IntoIterator<Item = (N, Node)>) -> Self {
        Self::Struct {
            fields: fields
                .into_iter()
                .map(|(name, ty)| FieldDecl {
                    names: vec![name.into()],
                    ty,
                })
                .collect(),
        }
    }

    /// Whether a declaration with this body defines a record.
    pub fn is_record_like(&self) -> bool {
        matches!(self, Self::Struct { .. } | Self::Interface { .. })
    }
}
