//! Error taxonomy for model conversion
//!
//! Every variant is fatal to the conversion that raised it. Non-fatal
//! conditions (missing material library, unknown `usemtl` name) never
//! surface here; they are logged and skipped.

use std::path::PathBuf;
use thiserror::Error;

/// Which attribute pool a face corner tried to index into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pool {
    /// Position pool (`v`)
    Position,
    /// Texture coordinate pool (`vt`)
    TexCoord,
    /// Normal pool (`vn`)
    Normal,
}

impl std::fmt::Display for Pool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Position => write!(f, "position"),
            Self::TexCoord => write!(f, "texture coordinate"),
            Self::Normal => write!(f, "normal"),
        }
    }
}

/// Model conversion errors
#[derive(Error, Debug)]
pub enum ModelError {
    /// Source file could not be opened or read
    #[error("IO error reading {path:?}: {source}")]
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Malformed directive (bad number, wrong corner count, missing argument)
    #[error("Line {line}: {message}")]
    Format {
        /// 1-based source line
        line: usize,
        /// What was wrong
        message: String,
    },

    /// Face corner index outside its pool
    #[error("Line {line}: {pool} index {index} out of range (pool holds {len})")]
    Reference {
        /// 1-based source line
        line: usize,
        /// Pool being indexed
        pool: Pool,
        /// The 1-based index as written in the file
        index: usize,
        /// Pool size at the time of the reference
        len: usize,
    },

    /// Valid OBJ that this converter deliberately does not handle
    #[error("Line {line}: unsupported input: {message}")]
    Unsupported {
        /// 1-based source line
        line: usize,
        /// What was rejected
        message: String,
    },

    /// Malformed material library pulled in by `mtllib`
    #[error("Material library {path:?}: {source}")]
    Library {
        /// Library file that failed
        path: PathBuf,
        /// Error raised while parsing it
        #[source]
        source: Box<ModelError>,
    },

    /// Document serialization failed
    #[error("Encode error: {0}")]
    Encode(#[from] serde_json::Error),
}

impl ModelError {
    pub(crate) fn format(line: usize, message: impl Into<String>) -> Self {
        Self::Format { line, message: message.into() }
    }

    pub(crate) fn unsupported(line: usize, message: impl Into<String>) -> Self {
        Self::Unsupported { line, message: message.into() }
    }

    pub(crate) fn library(path: impl Into<PathBuf>, source: Self) -> Self {
        Self::Library { path: path.into(), source: Box::new(source) }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    /// Line the error was raised on, when it came from a directive
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::Format { line, .. }
            | Self::Reference { line, .. }
            | Self::Unsupported { line, .. } => Some(*line),
            Self::Library { source, .. } => source.line(),
            Self::Io { .. } | Self::Encode(_) => None,
        }
    }
}

/// Result alias used throughout the crate
pub type ModelResult<T> = Result<T, ModelError>;
