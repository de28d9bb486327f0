//! Test fixtures and helpers.

use bridge_core::{TypeId, TypeRegistry};

use crate::project::{Project, ProjectConfig, ResolvedProject};

/// `UserService` with one operation, declared before the types it uses.
pub const SERVICE_JSON: &str = indoc::indoc! {r#"
    {
      "path": "service.json",
      "decls": [
        { "name": "UserService", "node": { "kind": "interface", "methods": [
          { "name": "SaveUser", "ty": { "kind": "function",
            "params": [{ "kind": "ident", "name": "SaveUserRequest" }],
            "results": [{ "kind": "ident", "name": "error" }] } }
        ] } },
        { "name": "SaveUserRequest", "node": { "kind": "struct", "fields": [
          { "names": ["U"], "ty": { "kind": "pointer", "target": { "kind": "ident", "name": "User" } } }
        ] } }
      ]
    }
"#};

pub const USERS_JSON: &str = indoc::indoc! {r#"
    {
      "path": "users.json",
      "decls": [
        { "name": "User", "node": { "kind": "struct", "fields": [
          { "names": ["Name"], "ty": { "kind": "ident", "name": "string" } }
        ] } }
      ]
    }
"#};

/// Resolve JSON declaration files, in the given order.
pub fn resolve(files: &[&str]) -> ResolvedProject {
    files
        .iter()
        .enumerate()
        .fold(Project::new(ProjectConfig::default()), |project, (i, json)| {
            project.add_json(format!("file{i}.json"), json).unwrap()
        })
        .resolve()
        .unwrap()
}

pub fn signatures(registry: &TypeRegistry, ids: &[TypeId]) -> Vec<String> {
    ids.iter().map(|id| registry.signature(*id)).collect()
}
