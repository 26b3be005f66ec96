use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ChallengeError>;

#[derive(Debug, Error)]
pub enum ChallengeError {
    /// The instance file could not be opened or read.
    #[error("failed to read instance file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The instance text does not follow the `N x_1 y_1 ... x_N y_N` layout.
    #[error("malformed instance: {0}")]
    Format(String),
    /// A caller supplied value has the wrong shape or range.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// A candidate was scored but did not meet the requested threshold.
    #[error("invalid solution: {0}")]
    Rejected(String),
}
