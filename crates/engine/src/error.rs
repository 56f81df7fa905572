use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Failed to read file '{path}': {source}")]
    FileRead {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read config '{path}': {source}")]
    ConfigRead {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config '{path}': {source}")]
    ConfigParse {
        path: std::path::PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Walk error: {0}")]
    Walk(#[from] ignore::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Malformed patch at line {line}: {reason}")]
    Patch { line: usize, reason: String },
}

pub type Result<T> = std::result::Result<T, EngineError>;

impl EngineError {
    /// The input this error is about, when there is one.
    #[must_use]
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::FileRead { path, .. }
            | Self::ConfigRead { path, .. }
            | Self::ConfigParse { path, .. } => Some(path.as_path()),
            Self::Walk(e) => walk_error_path(e),
            _ => None,
        }
    }
}

fn walk_error_path(err: &ignore::Error) -> Option<&std::path::Path> {
    match err {
        ignore::Error::WithPath { path, .. } => Some(path.as_path()),
        ignore::Error::WithDepth { err, .. } | ignore::Error::WithLineNumber { err, .. } => {
            walk_error_path(err)
        }
        ignore::Error::Partial(errs) => errs.iter().find_map(walk_error_path),
        _ => None,
    }
}
