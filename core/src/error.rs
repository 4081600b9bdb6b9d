use thiserror::Error;

/// Failures while reading or writing the on-disk index.
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unexpected end of file while reading {what}")]
    UnexpectedEof { what: &'static str },

    #[error("negative length {len} for {what}")]
    NegativeLength { what: &'static str, len: i64 },

    #[error("{what} is not valid UTF-8")]
    InvalidUtf8 { what: &'static str },

    #[error("{what} too large for the index format: {len}")]
    TooLarge { what: &'static str, len: u64 },

    #[error("index metadata error: {0}")]
    Meta(#[from] serde_json::Error),
}

impl IndexError {
    /// Map a raw read error, turning short reads into `UnexpectedEof`.
    pub(crate) fn reading(err: std::io::Error, what: &'static str) -> Self {
        if err.kind() == std::io::ErrorKind::UnexpectedEof {
            IndexError::UnexpectedEof { what }
        } else {
            IndexError::Io(err)
        }
    }
}

/// Syntax problems found while parsing a boolean query.
///
/// These never abort evaluation: the offending sub-expression matches
/// nothing and the rest of the query is still evaluated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("unexpected {found} at position {position}")]
    UnexpectedToken { found: String, position: usize },

    #[error("expected ')' at position {position}")]
    MissingRightParen { position: usize },

    #[error("ignoring trailing {found} at position {position}")]
    TrailingInput { found: String, position: usize },

    #[error("query nested too deeply at position {position}")]
    TooDeep { position: usize },
}

pub type Result<T> = std::result::Result<T, IndexError>;
