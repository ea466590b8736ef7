use super::error::EventError;
use super::layout;
use crate::format::common::{ByteReader, ReadError};

/// Payload framing selected by an opcode's numeric range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventShape {
    Byte,
    Word,
    Dword,
    Text,
    Data,
}

impl EventShape {
    pub fn of(opcode: u8) -> Self {
        match opcode {
            0..layout::WORD_BASE => EventShape::Byte,
            layout::WORD_BASE..layout::DWORD_BASE => EventShape::Word,
            layout::DWORD_BASE..layout::TEXT_BASE => EventShape::Dword,
            layout::TEXT_BASE..layout::DATA_BASE => EventShape::Text,
            layout::DATA_BASE..=u8::MAX => EventShape::Data,
        }
    }
}

/// Cursor over the data chunk payload that reads opcodes and framed payloads.
pub struct EventStreamReader<'a> {
    inner: ByteReader<'a>,
}

impl<'a> EventStreamReader<'a> {
    pub fn new(payload: &'a [u8], base: usize) -> Self {
        Self {
            inner: ByteReader::with_base(payload, base),
        }
    }

    pub fn position(&self) -> usize {
        self.inner.position()
    }

    /// Next opcode, or `None` once the chunk is exhausted.
    pub fn read_opcode(&mut self) -> Option<u8> {
        if self.inner.is_empty() {
            return None;
        }
        self.inner.read_u8().ok()
    }

    pub fn read_byte(&mut self, opcode: u8) -> Result<u8, EventError> {
        self.inner.read_u8().map_err(|source| truncated(opcode, source))
    }

    pub fn read_word(&mut self, opcode: u8) -> Result<u16, EventError> {
        self.inner
            .read_u16_le()
            .map_err(|source| truncated(opcode, source))
    }

    pub fn read_dword(&mut self, opcode: u8) -> Result<u32, EventError> {
        self.inner
            .read_u32_le()
            .map_err(|source| truncated(opcode, source))
    }

    /// Varint-prefixed span; returns the span and the offset of its first byte.
    pub fn read_span(&mut self, opcode: u8) -> Result<(&'a [u8], usize), EventError> {
        let span = self
            .inner
            .read_prefixed()
            .map_err(|source| truncated(opcode, source))?;
        Ok((span, self.inner.position() - span.len()))
    }
}

fn truncated(opcode: u8, source: ReadError) -> EventError {
    EventError::Truncated { opcode, source }
}

#[cfg(test)]
mod tests {
    use super::{EventShape, EventStreamReader};
    use crate::format::event::layout;

    #[test]
    fn shape_range_boundaries() {
        assert_eq!(EventShape::of(0), EventShape::Byte);
        assert_eq!(EventShape::of(63), EventShape::Byte);
        assert_eq!(EventShape::of(64), EventShape::Word);
        assert_eq!(EventShape::of(127), EventShape::Word);
        assert_eq!(EventShape::of(128), EventShape::Dword);
        assert_eq!(EventShape::of(191), EventShape::Dword);
        assert_eq!(EventShape::of(192), EventShape::Text);
        assert_eq!(EventShape::of(209), EventShape::Text);
        assert_eq!(EventShape::of(210), EventShape::Data);
        assert_eq!(EventShape::of(255), EventShape::Data);
    }

    #[test]
    fn known_opcodes_land_in_their_ranges() {
        assert_eq!(EventShape::of(layout::BYTE_CHANNEL_TYPE), EventShape::Byte);
        assert_eq!(EventShape::of(layout::WORD_CURRENT_SLOT), EventShape::Word);
        assert_eq!(EventShape::of(layout::DWORD_FINE_TEMPO), EventShape::Dword);
        assert_eq!(EventShape::of(layout::TEXT_INSERT_NAME), EventShape::Text);
        assert_eq!(EventShape::of(layout::DATA_INSERT_ROUTES), EventShape::Data);
    }

    #[test]
    fn span_reports_payload_offset() {
        let bytes = [0x02, 0xAA, 0xBB];
        let mut reader = EventStreamReader::new(&bytes, 22);
        let (span, offset) = reader.read_span(layout::TEXT_TITLE).unwrap();
        assert_eq!(span, &[0xAA, 0xBB]);
        assert_eq!(offset, 23);
        assert!(reader.read_opcode().is_none());
    }

    #[test]
    fn truncated_span_names_opcode() {
        let bytes = [0x05, 0xAA];
        let mut reader = EventStreamReader::new(&bytes, 0);
        let err = reader.read_span(layout::TEXT_TITLE).unwrap_err();
        assert!(err.to_string().contains("event 194"));
        assert!(err.to_string().contains("need 5 bytes, got 1"));
    }
}
