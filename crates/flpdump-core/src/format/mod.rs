//! Project file decoding modules.
//!
//! Each framing follows a layered structure:
//! - `layout`: opcode numbers, range boundaries and fixed sizes (source of truth)
//! - `reader`: safe byte access and format conventions
//! - `parser`: domain-level decoding (no direct byte indexing)
//! - `error`: explicit, actionable errors
//!
//! Parsers are pure and contain no I/O; the `source` and `decode` layers
//! handle file access and model assembly.

pub(crate) mod common;
pub mod event;
pub mod plugin;
