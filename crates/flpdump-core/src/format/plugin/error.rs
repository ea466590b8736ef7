use thiserror::Error;

use crate::format::common::ReadError;

/// Errors returned by the plugin descriptor sub-parser.
///
/// Note: this error type lives in an internal module; the example is
/// illustrative and not compiled as a public doctest.
///
/// # Examples
/// ```text
/// use flpdump_core::format::common::ReadError;
/// use flpdump_core::format::plugin::error::PluginError;
///
/// let err = PluginError::from(ReadError::VarintOverflow { offset: 9 });
/// assert!(err.to_string().contains("plugin descriptor"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PluginError {
    #[error("plugin descriptor: {0}")]
    Truncated(#[from] ReadError),
}
