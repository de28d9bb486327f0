#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures for bridge.
//!
//! - [`TypeData`] / [`TypeId`]: the type model, stored in an arena
//! - [`PackageNamespace`]: full namespace path to short import alias
//! - [`TypeRegistry`]: identity, forward-reference placeholders, signatures
//!
//! Everything here is single-threaded and owned by one generation run.

pub mod colors;
mod namespace;
mod registry;
mod types;


pub use colors::Colors;
pub use namespace::PackageNamespace;
pub use registry::{DEFAULT_BUILTINS, RegistryError, TypeRegistry};
pub use types::{Field, FunctionData, RecordData, TypeData, TypeId, TypeKind};
