//! Outer event stream framing.
//!
//! Every event is one opcode byte followed by a payload whose framing is
//! chosen by the opcode's numeric range: a byte, a little-endian word or
//! dword, or a varint-prefixed span read as text or as opaque data. Unknown
//! opcodes are framed like known ones so the stream stays aligned.
//!
//! Opcode numbers live in `layout`; the range classification and cursor live
//! in `reader`; `parser` turns the cursor into a sequence of [`Event`]s.

pub mod error;
pub mod layout;
pub mod parser;
pub mod reader;

pub use error::EventError;
pub use parser::{Event, EventReader, Payload};
