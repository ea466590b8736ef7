use thiserror::Error;

/// Errors returned by the shared byte cursor.
///
/// Offsets are absolute positions within the decoded file.
///
/// # Examples
/// ```text
/// use flpdump_core::format::common::ReadError;
///
/// let err = ReadError::TooShort { offset: 22, needed: 4, available: 1 };
/// assert!(err.to_string().contains("offset 22"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReadError {
    #[error("truncated input at offset {offset}: need {needed} bytes, got {available}")]
    TooShort {
        offset: usize,
        needed: usize,
        available: usize,
    },
    #[error("malformed variable-length integer at offset {offset}")]
    VarintOverflow { offset: usize },
}
