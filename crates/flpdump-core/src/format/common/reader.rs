use super::error::ReadError;

/// Largest number of bytes a length prefix may span (5 * 7 = 35 bits).
pub const VARINT_MAX_BYTES: usize = 5;

const VARINT_CONTINUATION: u8 = 0x80;
const VARINT_VALUE_MASK: u8 = 0x7F;

/// Forward-only cursor over a borrowed byte span.
///
/// `base` is the absolute offset of the span's first byte, so errors raised
/// deep inside a nested payload still point at the right place in the file.
pub struct ByteReader<'a> {
    payload: &'a [u8],
    pos: usize,
    base: usize,
}

impl<'a> ByteReader<'a> {
    pub fn with_base(payload: &'a [u8], base: usize) -> Self {
        Self {
            payload,
            pos: 0,
            base,
        }
    }

    /// Absolute offset of the next unread byte.
    pub fn position(&self) -> usize {
        self.base + self.pos
    }

    pub fn remaining(&self) -> usize {
        self.payload.len() - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    pub fn read_u8(&mut self) -> Result<u8, ReadError> {
        let bytes = self.read_array::<1>()?;
        Ok(bytes[0])
    }

    pub fn read_u16_le(&mut self) -> Result<u16, ReadError> {
        Ok(u16::from_le_bytes(self.read_array()?))
    }

    pub fn read_u32_le(&mut self) -> Result<u32, ReadError> {
        Ok(u32::from_le_bytes(self.read_array()?))
    }

    pub fn read_u64_le(&mut self) -> Result<u64, ReadError> {
        Ok(u64::from_le_bytes(self.read_array()?))
    }

    pub fn read_slice(&mut self, len: usize) -> Result<&'a [u8], ReadError> {
        let end = self
            .pos
            .checked_add(len)
            .filter(|end| *end <= self.payload.len())
            .ok_or(ReadError::TooShort {
                offset: self.position(),
                needed: len,
                available: self.remaining(),
            })?;
        let bytes = &self.payload[self.pos..end];
        self.pos = end;
        Ok(bytes)
    }

    /// Read a 7-bit-per-byte length prefix, low chunk first.
    ///
    /// The run is capped at [`VARINT_MAX_BYTES`] and the value must fit in
    /// 32 bits; anything longer is reported as malformed instead of reading
    /// past the end of the record.
    pub fn read_varint(&mut self) -> Result<u32, ReadError> {
        let start = self.position();
        let mut value = 0u64;
        for index in 0..VARINT_MAX_BYTES {
            let byte = self.read_u8()?;
            value |= u64::from(byte & VARINT_VALUE_MASK) << (7 * index);
            if byte & VARINT_CONTINUATION == 0 {
                return u32::try_from(value).map_err(|_| ReadError::VarintOverflow { offset: start });
            }
        }
        Err(ReadError::VarintOverflow { offset: start })
    }

    /// Read a varint length followed by that many bytes.
    pub fn read_prefixed(&mut self) -> Result<&'a [u8], ReadError> {
        let len = self.read_varint()?;
        self.read_slice(len as usize)
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N], ReadError> {
        let bytes = self.read_slice(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::{ByteReader, VARINT_MAX_BYTES};
    use crate::format::common::ReadError;

    #[test]
    fn reads_little_endian_integers() {
        let bytes = [
            0x01, 0x34, 0x12, 0x78, 0x56, 0x34, 0x12, 0x08, 0x07, 0x06, 0x05, 0x04, 0x03, 0x02,
            0x01,
        ];
        let mut reader = ByteReader::with_base(&bytes, 0);
        assert_eq!(reader.read_u8().unwrap(), 0x01);
        assert_eq!(reader.read_u16_le().unwrap(), 0x1234);
        assert_eq!(reader.read_u32_le().unwrap(), 0x1234_5678);
        assert_eq!(reader.read_u64_le().unwrap(), 0x0102_0304_0506_0708);
        assert!(reader.is_empty());
    }

    #[test]
    fn short_read_reports_absolute_offset() {
        let bytes = [0xAA, 0xBB, 0xCC];
        let mut reader = ByteReader::with_base(&bytes, 100);
        reader.read_u8().unwrap();
        let err = reader.read_u32_le().unwrap_err();
        assert_eq!(
            err,
            ReadError::TooShort {
                offset: 101,
                needed: 4,
                available: 2,
            }
        );
        assert_eq!(reader.position(), 101);
    }

    #[test]
    fn varint_single_byte() {
        let mut reader = ByteReader::with_base(&[0x05], 0);
        assert_eq!(reader.read_varint().unwrap(), 5);
        let mut reader = ByteReader::with_base(&[0x7F], 0);
        assert_eq!(reader.read_varint().unwrap(), 127);
    }

    #[test]
    fn varint_multi_byte_shifts_compose() {
        let mut reader = ByteReader::with_base(&[0x80, 0x01], 0);
        assert_eq!(reader.read_varint().unwrap(), 1 << 7);

        let mut reader = ByteReader::with_base(&[0xFF, 0xFF, 0x03], 0);
        assert_eq!(reader.read_varint().unwrap(), (1 << 16) - 1);

        let mut reader = ByteReader::with_base(&[0x81, 0x82, 0x83, 0x04], 0);
        let expected = 1 | (2 << 7) | (3 << 14) | (4 << 21);
        assert_eq!(reader.read_varint().unwrap(), expected);
    }

    #[test]
    fn varint_max_u32() {
        let mut reader = ByteReader::with_base(&[0xFF, 0xFF, 0xFF, 0xFF, 0x0F], 0);
        assert_eq!(reader.read_varint().unwrap(), u32::MAX);
    }

    #[test]
    fn varint_rejects_unbounded_continuation() {
        let bytes = [0xFF; VARINT_MAX_BYTES + 2];
        let mut reader = ByteReader::with_base(&bytes, 7);
        let err = reader.read_varint().unwrap_err();
        assert_eq!(err, ReadError::VarintOverflow { offset: 7 });
    }

    #[test]
    fn varint_rejects_value_above_u32() {
        let mut reader = ByteReader::with_base(&[0xFF, 0xFF, 0xFF, 0xFF, 0x1F], 0);
        assert!(matches!(
            reader.read_varint(),
            Err(ReadError::VarintOverflow { offset: 0 })
        ));
    }

    #[test]
    fn varint_truncated_run() {
        let mut reader = ByteReader::with_base(&[0x80], 0);
        assert!(matches!(
            reader.read_varint(),
            Err(ReadError::TooShort { offset: 1, .. })
        ));
    }

    fn encode_varint(mut value: u32) -> Vec<u8> {
        let mut out = Vec::new();
        loop {
            let byte = (value & 0x7F) as u8;
            value >>= 7;
            if value == 0 {
                out.push(byte);
                return out;
            }
            out.push(byte | 0x80);
        }
    }

    #[test]
    fn varint_survives_group_boundaries() {
        let cases = [
            (0, 1),
            (127, 1),
            (128, 2),
            (16_383, 2),
            (16_384, 3),
            ((1 << 21) - 1, 3),
            (1 << 21, 4),
            ((1 << 28) - 1, 4),
            (1 << 28, 5),
            (u32::MAX, 5),
        ];
        for (value, width) in cases {
            let bytes = encode_varint(value);
            assert_eq!(bytes.len(), width, "width of {value}");
            let mut reader = ByteReader::with_base(&bytes, 0);
            assert_eq!(reader.read_varint().unwrap(), value);
            assert!(reader.is_empty());
        }
    }

    #[test]
    fn prefixed_reads_declared_length() {
        let mut reader = ByteReader::with_base(&[0x03, b'a', b'b', b'c', 0xFF], 0);
        assert_eq!(reader.read_prefixed().unwrap(), b"abc");
        assert_eq!(reader.remaining(), 1);
    }
}
