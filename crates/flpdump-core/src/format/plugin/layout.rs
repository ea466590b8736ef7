//! Plugin descriptor sub-stream layout.
//!
//! The descriptor opens with a little-endian type word. External plugins
//! follow it with records of `code: u32 LE`, `size: u64 LE`, `size` bytes.

/// Only the low nibble of the type word selects the plugin type.
pub const PLUGIN_TYPE_MASK: u32 = 0x0F;
/// Masked types below this value are internal generators.
pub const GENERATOR_TYPE_LIMIT: u8 = 8;

pub const PLUGIN_TYPE_VST_INTERNAL: u8 = 3;
pub const PLUGIN_TYPE_VST_EXTERNAL: u8 = 8;
pub const PLUGIN_TYPE_VST_EXTERNAL_ALT: u8 = 9;

pub const RECORD_END: u32 = 0;
pub const RECORD_PLUGIN_INFO: u32 = 50;
pub const RECORD_STATE: u32 = 53;
pub const RECORD_NAME: u32 = 54;
pub const RECORD_FILENAME: u32 = 55;
pub const RECORD_VENDOR: u32 = 56;
