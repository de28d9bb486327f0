pub mod check;
pub mod closure;
pub mod generate;
pub mod loader;
pub mod types;

#[cfg(test)]
mod commands_tests;

use std::io;
use std::path::PathBuf;

/// Why a command failed. Diagnostics are printed before this is returned.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("failed to read '{}': {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to write '{}': {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error(transparent)]
    Compiler(#[from] bridge_compiler::Error),

    #[error("aborting due to {errors} errors and {warnings} warnings")]
    Rejected { errors: usize, warnings: usize },
}

impl CommandError {
    pub(crate) fn rejected(diagnostics: &bridge_compiler::Diagnostics) -> Self {
        Self::Rejected {
            errors: diagnostics.error_count(),
            warnings: diagnostics.warning_count(),
        }
    }
}
