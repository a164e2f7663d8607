use thiserror::Error;

/// Error type for paragraph analysis and the helpers built on it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum BidiError {
    /// The input is longer than the largest paragraph the engine accepts.
    #[error("input of {len} code points exceeds the maximum of {max}")]
    LengthExceeded { len: usize, max: usize },

    /// A paragraph direction could not be parsed.
    #[error("invalid paragraph direction `{0}`")]
    InvalidDirection(String),

    /// A position map or level array does not match its string.
    #[error("expected a map of length {expected}, found {found}")]
    MapLength { expected: usize, found: usize },
}

/// A type alias for the result of a bidi operation.
pub type Result<T> = std::result::Result<T, BidiError>;
