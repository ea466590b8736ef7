use thiserror::Error;

#[derive(Debug, Error)]
pub enum FlpSourceError {
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
