use std::fmt::Write;
use std::path::PathBuf;

use bridge_core::{Colors, TypeKind, TypeRegistry};

use super::CommandError;
use super::loader::load_resolved;

pub struct TypesArgs {
    pub files: Vec<PathBuf>,
    pub color: bool,
}

pub fn run(args: TypesArgs) -> Result<(), CommandError> {
    let project = load_resolved(&args.files, args.color)?;
    print!("{}", list_types(project.registry(), Colors::new(args.color)));
    Ok(())
}

/// One line per registered type: qualified name, kind and signature.
///
/// Builtins are left out; they only clutter the listing.
pub fn list_types(registry: &TypeRegistry, c: Colors) -> String {
    let rows: Vec<_> = registry
        .iter()
        .filter(|(namespace, name, id)| {
            !(namespace.is_empty() && registry.kind(*id) == TypeKind::Named && is_builtin(name))
        })
        .map(|(namespace, name, id)| {
            let qualified = if namespace.is_empty() {
                name.to_string()
            } else {
                format!("{namespace}.{name}")
            };
            (qualified, registry.kind(id), registry.signature(id))
        })
        .collect();

    let width = rows.iter().map(|(q, _, _)| q.len()).max().unwrap_or(0);
    let mut out = String::new();
    for (qualified, kind, signature) in rows {
        let _ = writeln!(
            out,
            "{}{qualified:<width$}{}  {}{:<14}{}  {signature}",
            c.blue,
            c.reset,
            c.dim,
            kind.name(),
            c.reset
        );
    }
    out
}

fn is_builtin(name: &str) -> bool {
    bridge_core::DEFAULT_BUILTINS.contains(&name)
}
