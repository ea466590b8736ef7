use super::error::PluginError;
use super::layout;
use crate::format::common::ByteReader;

/// Record header of the descriptor sub-stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordHeader {
    pub code: u32,
    pub size: u32,
}

pub struct PluginReader<'a> {
    inner: ByteReader<'a>,
}

impl<'a> PluginReader<'a> {
    pub fn new(payload: &'a [u8], base: usize) -> Self {
        Self {
            inner: ByteReader::with_base(payload, base),
        }
    }

    /// Leading type word, masked to its low nibble.
    pub fn read_plugin_type(&mut self) -> Result<u8, PluginError> {
        let word = self.inner.read_u32_le()?;
        Ok((word & layout::PLUGIN_TYPE_MASK) as u8)
    }

    /// Next record header, or `None` when the span ends on a record boundary.
    ///
    /// The size field is eight bytes wide but only its low 32 bits count.
    pub fn read_record_header(&mut self) -> Result<Option<RecordHeader>, PluginError> {
        if self.inner.is_empty() {
            return Ok(None);
        }
        let code = self.inner.read_u32_le()?;
        let size = self.inner.read_u64_le()? as u32;
        Ok(Some(RecordHeader { code, size }))
    }

    pub fn read_record_body(&mut self, header: RecordHeader) -> Result<&'a [u8], PluginError> {
        Ok(self.inner.read_slice(header.size as usize)?)
    }
}
