use std::path::PathBuf;

use super::CommandError;
use super::loader::load_project;

pub struct CheckArgs {
    pub files: Vec<PathBuf>,
    pub strict: bool,
    pub color: bool,
}

pub fn run(args: CheckArgs) -> Result<(), CommandError> {
    let project = load_project(&args.files)?;
    let diagnostics = project.diagnostics();

    let valid = if args.strict {
        diagnostics.is_empty()
    } else {
        !diagnostics.has_errors()
    };

    if !diagnostics.is_empty() {
        eprint!("{}", diagnostics.render_colored(args.color));
    }
    if !valid {
        return Err(CommandError::rejected(diagnostics));
    }

    // Silent on success (like cargo check)
    Ok(())
}
