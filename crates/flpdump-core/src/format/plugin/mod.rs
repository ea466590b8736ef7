//! Plugin descriptor sub-stream decoding.
//!
//! Plugin parameter events wrap a nested stream with its own framing: a type
//! word, then code/size/payload records until a zero code or the end of the
//! span. Generators stop after the type word and borrow their name from the
//! most recent generator-name text event of the outer stream. Descriptor
//! strings are raw single-byte text, unlike most outer-stream text.

pub mod error;
pub mod layout;
pub mod parser;
pub mod reader;

pub use error::PluginError;
pub use parser::parse_plugin;
