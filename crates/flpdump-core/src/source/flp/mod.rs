//! FLP file source implementation.
//!
//! This module provides a `ChunkSource` backed by any byte reader or by a
//! file on disk. It reads the fixed 14-byte header and then tagged chunks,
//! leaving their interpretation to the decoder.

pub mod error;
pub mod layout;
pub mod parser;
pub mod reader;

pub use parser::{FlpFileSource, FlpReaderSource};
