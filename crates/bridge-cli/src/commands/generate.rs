use std::fs;
use std::path::{Path, PathBuf};

use bridge_compiler::{Bindings, ClosureConfig, EmitConfig, OutlineConfig, OutlineRenderer};

use super::CommandError;
use super::loader::load_resolved;

pub struct GenArgs {
    pub files: Vec<PathBuf>,
    pub service: String,
    pub namespace: String,
    pub operation: Option<String>,
    pub references: bool,
    pub package: String,
    pub client_prefix: String,
    pub client_suffix: String,
    pub known_codecs: Vec<String>,
    pub output: Option<PathBuf>,
    pub color: bool,
}

pub fn run(args: GenArgs) -> Result<(), CommandError> {
    let project = load_resolved(&args.files, args.color)?;
    let service = project.service(&args.namespace, &args.service)?;
    let mut renderer = OutlineRenderer::new(OutlineConfig::new().colored(args.color));

    let bindings = project.emit(service, emit_config(&args), &mut renderer)?;

    match &args.output {
        Some(dir) => write_files(dir, &bindings)?,
        None => {
            for file in bindings.files() {
                println!("// {}", file.name);
                print!("{file}");
            }
        }
    }

    let diagnostics = &bindings.diagnostics;
    if !diagnostics.is_empty() {
        eprint!("{}", diagnostics.render_colored(args.color));
    }
    if diagnostics.has_errors() {
        return Err(CommandError::rejected(diagnostics));
    }
    Ok(())
}

fn emit_config(args: &GenArgs) -> EmitConfig {
    let config = EmitConfig::new()
        .package(args.package.as_str())
        .client_prefix(args.client_prefix.as_str())
        .client_suffix(args.client_suffix.as_str())
        .operation(args.operation.clone())
        .closure(ClosureConfig::new().collect_references(args.references));
    args.known_codecs
        .iter()
        .fold(config, |config, key| config.known_codec(key.as_str()))
}

/// `<name>.txt` per generated file, written even if some codecs failed.
pub fn write_files(dir: &Path, bindings: &Bindings) -> Result<(), CommandError> {
    fs::create_dir_all(dir).map_err(|source| CommandError::Write {
        path: dir.to_path_buf(),
        source,
    })?;
    for file in bindings.files() {
        let path = dir.join(format!("{}.txt", file.name));
        tracing::debug!(path = %path.display(), "writing");
        fs::write(&path, file.to_string())
            .map_err(|source| CommandError::Write { path, source })?;
    }
    Ok(())
}
