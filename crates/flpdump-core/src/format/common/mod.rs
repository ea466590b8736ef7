pub mod error;
pub mod reader;
pub mod text;

pub use error::ReadError;
pub use reader::ByteReader;
pub use text::{TextEncoding, decode_text};
