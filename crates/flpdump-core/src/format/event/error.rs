use thiserror::Error;

use crate::format::common::ReadError;

/// Errors returned while framing outer stream events.
///
/// Note: this error type lives in an internal module; the example is
/// illustrative and not compiled as a public doctest.
///
/// # Examples
/// ```text
/// use flpdump_core::format::common::ReadError;
/// use flpdump_core::format::event::error::EventError;
///
/// let source = ReadError::TooShort { offset: 30, needed: 5, available: 2 };
/// let err = EventError::Truncated { opcode: 194, source };
/// assert!(err.to_string().contains("event 194"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventError {
    #[error("event {opcode}: {source}")]
    Truncated {
        opcode: u8,
        #[source]
        source: ReadError,
    },
}
