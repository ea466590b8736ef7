//! Outer event stream opcodes and range boundaries.

pub const DATA_CHUNK_TAG: &[u8; 4] = b"FLdt";

// Opcode range starts; each range selects one payload framing.
pub const WORD_BASE: u8 = 64;
pub const DWORD_BASE: u8 = 128;
pub const TEXT_BASE: u8 = 192;
pub const DATA_BASE: u8 = 210;

// Byte events (0..=63)
pub const BYTE_CHANNEL_TYPE: u8 = 21;

// Word events (64..=127)
pub const WORD_NEW_CHANNEL: u8 = 64;
pub const WORD_CURRENT_SLOT: u8 = 98;

// Dword events (128..=191)
pub const DWORD_FINE_TEMPO: u8 = 156;

// Text events (192..=209)
pub const TEXT_PATTERN_NAME: u8 = 193;
pub const TEXT_TITLE: u8 = 194;
pub const TEXT_COMMENT: u8 = 195;
pub const TEXT_SAMPLE_FILENAME: u8 = 196;
pub const TEXT_URL: u8 = 197;
pub const TEXT_VERSION: u8 = 199;
pub const TEXT_GENERATOR_NAME: u8 = 201;
pub const TEXT_PLUGIN_NAME: u8 = 203;
pub const TEXT_INSERT_NAME: u8 = 204;
pub const TEXT_STYLE: u8 = 206;
pub const TEXT_AUTHOR: u8 = 207;

// Data events (210..=255)
pub const DATA_NEW_PLUGIN: u8 = 212;
pub const DATA_PLUGIN_PARAMS: u8 = 213;
pub const DATA_PATTERN_NOTES: u8 = 224;
pub const DATA_INSERT_ROUTES: u8 = 235;
