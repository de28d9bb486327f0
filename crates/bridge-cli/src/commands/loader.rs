use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use bridge_compiler::{Project, ProjectConfig, ResolvedProject};

use super::CommandError;

/// Read and resolve declaration files, in the order given.
///
/// Resolution problems are left in the project's diagnostics.
pub fn load_project(files: &[PathBuf]) -> Result<ResolvedProject, CommandError> {
    let mut project = Project::new(ProjectConfig::default());
    for path in files {
        let json = read_file(path)?;
        project = project.add_json(path.to_string_lossy(), &json)?;
    }
    Ok(project.resolve()?)
}

/// Like [`load_project`], but resolution errors end the command.
///
/// Warnings are printed and ignored.
pub fn load_resolved(files: &[PathBuf], color: bool) -> Result<ResolvedProject, CommandError> {
    let project = load_project(files)?;
    let diagnostics = project.diagnostics();
    if !diagnostics.is_empty() {
        eprint!("{}", diagnostics.render_colored(color));
    }
    if diagnostics.has_errors() {
        return Err(CommandError::rejected(diagnostics));
    }
    Ok(project)
}

fn read_file(path: &Path) -> Result<String, CommandError> {
    let read = if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf).map(|_| buf)
    } else {
        fs::read_to_string(path)
    };
    read.map_err(|source| CommandError::Read {
        path: path.to_path_buf(),
        source,
    })
}
