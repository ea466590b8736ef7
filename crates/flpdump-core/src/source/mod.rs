pub(crate) mod flp;

pub use flp::{FlpFileSource, FlpReaderSource};

use thiserror::Error;

use crate::FileHeader;

/// One tagged, length-prefixed chunk read from a project file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub tag: [u8; 4],
    /// Absolute offset of the first payload byte.
    pub offset: u64,
    pub data: Vec<u8>,
}

/// Sequential access to the header and chunks of a project file.
///
/// Reads are strictly in order; the format has no index to seek by.
pub trait ChunkSource {
    fn read_header(&mut self) -> Result<FileHeader, SourceError>;
    fn next_chunk(&mut self) -> Result<Option<Chunk>, SourceError>;
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("truncated {context} at offset {offset}: expected {expected} bytes, found {found}")]
    Truncated {
        context: &'static str,
        offset: u64,
        expected: u64,
        found: u64,
    },
}

impl From<flp::error::FlpSourceError> for SourceError {
    fn from(value: flp::error::FlpSourceError) -> Self {
        match value {
            flp::error::FlpSourceError::Io(err) => SourceError::Io(err),
            flp::error::FlpSourceError::Truncated {
                context,
                offset,
                expected,
                found,
            } => SourceError::Truncated {
                context,
                offset,
                expected,
                found,
            },
        }
    }
}
