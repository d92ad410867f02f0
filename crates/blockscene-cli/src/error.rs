use std::io;
use std::path::PathBuf;

use blockscene_compiler::DefaultsError;
use thiserror::Error;

/// Everything that can make a command fail.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("cannot read '{}': {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("cannot write '{}': {source}", path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("invalid config '{}': {source}", path.display())]
    Config {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// The workspace has errors; they were already reported.
    #[error("workspace has {0} error(s)")]
    Compile(usize),

    #[error(transparent)]
    Defaults(#[from] DefaultsError),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type CliResult<T> = Result<T, CliError>;
