use super::error::EventError;
use super::reader::{EventShape, EventStreamReader};

/// One framed event from the data chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event<'a> {
    /// Absolute offset of the opcode byte.
    pub offset: usize,
    pub opcode: u8,
    pub payload: Payload<'a>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload<'a> {
    Byte(u8),
    Word(u16),
    Dword(u32),
    /// Text span and the absolute offset of its first byte.
    Text(&'a [u8], usize),
    /// Opaque span and the absolute offset of its first byte.
    Data(&'a [u8], usize),
}

/// Splits a data chunk payload into events.
///
/// The stream has no event count or end marker: it ends where the chunk
/// ends. A payload cut short by the chunk boundary is an error.
pub struct EventReader<'a> {
    reader: EventStreamReader<'a>,
}

impl<'a> EventReader<'a> {
    /// `base` is the absolute offset of `payload` within the file.
    pub fn new(payload: &'a [u8], base: usize) -> Self {
        Self {
            reader: EventStreamReader::new(payload, base),
        }
    }

    pub fn next_event(&mut self) -> Result<Option<Event<'a>>, EventError> {
        let offset = self.reader.position();
        let Some(opcode) = self.reader.read_opcode() else {
            return Ok(None);
        };

        let payload = match EventShape::of(opcode) {
            EventShape::Byte => Payload::Byte(self.reader.read_byte(opcode)?),
            EventShape::Word => Payload::Word(self.reader.read_word(opcode)?),
            EventShape::Dword => Payload::Dword(self.reader.read_dword(opcode)?),
            EventShape::Text => {
                let (span, at) = self.reader.read_span(opcode)?;
                Payload::Text(span, at)
            }
            EventShape::Data => {
                let (span, at) = self.reader.read_span(opcode)?;
                Payload::Data(span, at)
            }
        };

        Ok(Some(Event {
            offset,
            opcode,
            payload,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::{EventReader, Payload};
    use crate::format::event::error::EventError;
    use crate::format::event::layout;

    #[test]
    fn frames_each_shape() {
        let mut bytes = vec![layout::BYTE_CHANNEL_TYPE, 2];
        bytes.push(layout::WORD_NEW_CHANNEL);
        bytes.extend_from_slice(&7u16.to_le_bytes());
        bytes.push(layout::DWORD_FINE_TEMPO);
        bytes.extend_from_slice(&140_000u32.to_le_bytes());
        bytes.extend_from_slice(&[layout::TEXT_TITLE, 2, b'A', 0]);
        bytes.extend_from_slice(&[layout::DATA_PATTERN_NOTES, 1, 0xEE]);

        let mut reader = EventReader::new(&bytes, 0);
        let mut events = Vec::new();
        while let Some(event) = reader.next_event().unwrap() {
            events.push(event);
        }

        assert_eq!(events.len(), 5);
        assert_eq!(events[0].payload, Payload::Byte(2));
        assert_eq!(events[1].payload, Payload::Word(7));
        assert_eq!(events[2].payload, Payload::Dword(140_000));
        assert_eq!(events[3].payload, Payload::Text(&[b'A', 0], 12));
        assert_eq!(events[4].payload, Payload::Data(&[0xEE], 16));
        assert_eq!(events[4].offset, 14);
    }

    #[test]
    fn unknown_opcodes_stay_aligned() {
        // 30: byte, 100: word, 170: dword, 205: text, 250: data; all unused.
        let mut bytes = vec![30, 0xFF, 100, 0xFF, 0xFF, 170, 1, 2, 3, 4];
        bytes.extend_from_slice(&[205, 1, 0x00, 250, 2, 0x01, 0x02]);
        bytes.extend_from_slice(&[layout::BYTE_CHANNEL_TYPE, 5]);

        let mut reader = EventReader::new(&bytes, 0);
        let mut last = None;
        let mut count = 0;
        while let Some(event) = reader.next_event().unwrap() {
            count += 1;
            last = Some(event);
        }
        let last = last.unwrap();
        assert_eq!(count, 6);
        assert_eq!(last.opcode, layout::BYTE_CHANNEL_TYPE);
        assert_eq!(last.payload, Payload::Byte(5));
    }

    #[test]
    fn empty_stream_has_no_events() {
        let mut reader = EventReader::new(&[], 0);
        assert!(reader.next_event().unwrap().is_none());
    }

    #[test]
    fn truncated_fixed_payload() {
        let bytes = [layout::DWORD_FINE_TEMPO, 0x01, 0x02];
        let mut reader = EventReader::new(&bytes, 22);
        let err = reader.next_event().unwrap_err();
        assert!(matches!(
            err,
            EventError::Truncated {
                opcode: layout::DWORD_FINE_TEMPO,
                ..
            }
        ));
        assert!(err.to_string().contains("offset 23"));
    }
}
