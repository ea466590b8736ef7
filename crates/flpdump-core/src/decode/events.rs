use log::trace;

use super::DecodeError;
use super::state::DecoderState;
use crate::format::common::{TextEncoding, decode_text};
use crate::format::event::layout;
use crate::format::event::{Event, Payload};
use crate::format::plugin::parse_plugin;

impl DecoderState {
    /// Apply one event to the model. Unrecognized opcodes are no-ops; their
    /// payload has already been consumed by the framing layer.
    pub(crate) fn apply(&mut self, event: Event<'_>) -> Result<(), DecodeError> {
        let Event {
            offset,
            opcode,
            payload,
        } = event;
        match payload {
            Payload::Byte(value) => self.apply_byte(opcode, value, offset),
            Payload::Word(value) => self.apply_word(opcode, value, offset)?,
            Payload::Dword(value) => self.apply_dword(opcode, value),
            Payload::Text(bytes, at) => self.apply_text(opcode, bytes, at, offset),
            Payload::Data(bytes, at) => self.apply_data(opcode, bytes, at, offset)?,
        }
        Ok(())
    }

    fn apply_byte(&mut self, opcode: u8, value: u8, offset: usize) {
        match opcode {
            layout::BYTE_CHANNEL_TYPE => {
                if let Some(channel) = self.channel_mut(opcode, offset) {
                    channel.channel_type = value;
                }
            }
            _ => trace!("skipping byte event {opcode}"),
        }
    }

    fn apply_word(&mut self, opcode: u8, value: u16, offset: usize) -> Result<(), DecodeError> {
        match opcode {
            layout::WORD_NEW_CHANNEL => self.push_channel(value),
            layout::WORD_CURRENT_SLOT => self.select_slot(value, offset)?,
            _ => trace!("skipping word event {opcode}"),
        }
        Ok(())
    }

    fn apply_dword(&mut self, opcode: u8, value: u32) {
        match opcode {
            layout::DWORD_FINE_TEMPO => self.project.tempo = value,
            _ => trace!("skipping dword event {opcode}"),
        }
    }

    fn apply_text(&mut self, opcode: u8, bytes: &[u8], at: usize, offset: usize) {
        let utf16 = || decode_text(bytes, TextEncoding::Utf16Le);
        match opcode {
            // The version string is the one single-byte text event.
            layout::TEXT_VERSION => self.project.version = decode_text(bytes, TextEncoding::Ascii),
            layout::TEXT_TITLE => self.project.title = utf16(),
            layout::TEXT_COMMENT => self.project.comments = utf16(),
            layout::TEXT_URL => self.project.url = utf16(),
            layout::TEXT_STYLE => self.project.style = utf16(),
            layout::TEXT_AUTHOR => self.project.author = utf16(),
            layout::TEXT_GENERATOR_NAME => self.last_generator = utf16(),
            layout::TEXT_PLUGIN_NAME => self.set_target_name(utf16(), opcode, offset),
            layout::TEXT_SAMPLE_FILENAME => {
                if let Some(channel) = self.channel_mut(opcode, offset) {
                    channel.sample_filename = utf16();
                }
            }
            layout::TEXT_INSERT_NAME => self.insert_mut().name = utf16(),
            layout::TEXT_PATTERN_NAME => trace!("pattern name {:?} at offset {at}", utf16()),
            _ => trace!(
                "skipping text event {opcode} ({} bytes at offset {at})",
                bytes.len()
            ),
        }
    }

    fn apply_data(
        &mut self,
        opcode: u8,
        bytes: &[u8],
        at: usize,
        offset: usize,
    ) -> Result<(), DecodeError> {
        match opcode {
            layout::DATA_PATTERN_NOTES | layout::DATA_NEW_PLUGIN => {}
            layout::DATA_PLUGIN_PARAMS => {
                let plugin = parse_plugin(bytes, at, &self.last_generator)
                    .map_err(|source| DecodeError::Plugin { offset, source })?;
                self.set_target_plugin(plugin, opcode, offset);
            }
            // Routing closes an insert's block; there is no begin marker.
            layout::DATA_INSERT_ROUTES => self.push_insert(),
            _ => trace!(
                "skipping data event {opcode} ({} bytes at offset {at})",
                bytes.len()
            ),
        }
        Ok(())
    }
}
