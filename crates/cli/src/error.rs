//! CLI error types

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Definition file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Failed to write {}: {source}", path.display())]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Compiler error: {0}")]
    Compiler(#[from] shugen_compiler::CompilerError),

    #[error("Template error: {0}")]
    Template(#[from] tera::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("{0}")]
    Message(String),
}

pub type CliResult<T> = Result<T, CliError>;
