use std::path::PathBuf;

use bridge_compiler::ClosureConfig;

use super::CommandError;
use super::loader::load_resolved;

pub struct ClosureArgs {
    pub files: Vec<PathBuf>,
    pub service: String,
    pub namespace: String,
    pub operation: Option<String>,
    pub references: bool,
}

pub fn run(args: ClosureArgs) -> Result<(), CommandError> {
    let project = load_resolved(&args.files, false)?;
    let service = project.service(&args.namespace, &args.service)?;
    let config = ClosureConfig::new().collect_references(args.references);

    let types = project.closure(service, args.operation.as_deref(), config)?;

    for id in types {
        println!("{}", project.registry().signature(id));
    }
    Ok(())
}
