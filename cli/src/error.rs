use sixdeg_core::GraphError;
use thiserror::Error;

/// Errors surfaced by the `sixdeg` binary.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Malformed record in one of the data files. `line` is 1-based.
    #[error("{path}:{line}: {reason}")]
    Parse {
        path: String,
        line: usize,
        reason: String,
    },

    #[error("configuration error: {0}")]
    Config(String),

    /// Malformed interactive command.
    #[error("usage: {0}")]
    Usage(String),

    #[error("actor '{0}' not found (names are case sensitive)")]
    UnknownActor(String),

    #[error("graph error: {0}")]
    Graph(#[from] GraphError<String>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("line editor error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
}

pub type CliResult<T> = Result<T, CliError>;
