pub const HEADER_TAG: &[u8; 4] = b"FLhd";
pub const HEADER_LEN: usize = 14;

pub const HEADER_TAG_RANGE: std::ops::Range<usize> = 0..4;
pub const HEADER_BODY_LEN_RANGE: std::ops::Range<usize> = 4..8;
pub const FORMAT_RANGE: std::ops::Range<usize> = 8..10;
pub const CHANNEL_COUNT_RANGE: std::ops::Range<usize> = 10..12;
pub const PPQ_RANGE: std::ops::Range<usize> = 12..14;

pub const CHUNK_TAG_LEN: usize = 4;
pub const CHUNK_LEN_FIELD: usize = 4;
