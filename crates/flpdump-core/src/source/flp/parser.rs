use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use log::{debug, warn};

use crate::FileHeader;
use crate::source::{Chunk, ChunkSource, SourceError};

use super::error::FlpSourceError;
use super::layout;
use super::reader::{header_tag, is_header_tag, parse_header, read_record, read_up_to};

/// Chunk source over any byte reader.
pub struct FlpReaderSource<R> {
    reader: R,
    offset: u64,
}

impl<R: Read> FlpReaderSource<R> {
    pub fn new(reader: R) -> Self {
        Self { reader, offset: 0 }
    }

    /// Absolute offset of the next unread byte.
    pub fn offset(&self) -> u64 {
        self.offset
    }
}

impl<R: Read> ChunkSource for FlpReaderSource<R> {
    fn read_header(&mut self) -> Result<FileHeader, SourceError> {
        read_header(&mut self.reader, &mut self.offset).map_err(SourceError::from)
    }

    fn next_chunk(&mut self) -> Result<Option<Chunk>, SourceError> {
        next_chunk(&mut self.reader, &mut self.offset).map_err(SourceError::from)
    }
}

/// Chunk source backed by a project file on disk.
pub struct FlpFileSource {
    inner: FlpReaderSource<BufReader<File>>,
}

impl FlpFileSource {
    pub fn open(path: &Path) -> Result<Self, SourceError> {
        let file = File::open(path).map_err(SourceError::from)?;
        Ok(Self {
            inner: FlpReaderSource::new(BufReader::new(file)),
        })
    }
}

impl ChunkSource for FlpFileSource {
    fn read_header(&mut self) -> Result<FileHeader, SourceError> {
        self.inner.read_header()
    }

    fn next_chunk(&mut self) -> Result<Option<Chunk>, SourceError> {
        self.inner.next_chunk()
    }
}

fn read_header<R: Read>(reader: &mut R, offset: &mut u64) -> Result<FileHeader, FlpSourceError> {
    let mut bytes = [0u8; layout::HEADER_LEN];
    read_record(reader, &mut bytes, "file header", *offset)?;
    *offset += layout::HEADER_LEN as u64;

    let tag = header_tag(&bytes);
    if !is_header_tag(tag) {
        warn!(
            "unexpected header tag {:?}, expected {:?}",
            String::from_utf8_lossy(tag),
            String::from_utf8_lossy(layout::HEADER_TAG)
        );
    }
    let header = parse_header(&bytes);
    debug!(
        "header: format={} channels={} ppq={}",
        header.format, header.channel_count, header.ppq
    );
    Ok(header)
}

fn next_chunk<R: Read>(reader: &mut R, offset: &mut u64) -> Result<Option<Chunk>, FlpSourceError> {
    let mut tag = [0u8; layout::CHUNK_TAG_LEN];
    let found = read_up_to(reader, &mut tag)?;
    if found == 0 {
        return Ok(None);
    }
    if found < tag.len() {
        return Err(FlpSourceError::Truncated {
            context: "chunk tag",
            offset: *offset,
            expected: tag.len() as u64,
            found: found as u64,
        });
    }
    *offset += layout::CHUNK_TAG_LEN as u64;

    let mut len_bytes = [0u8; layout::CHUNK_LEN_FIELD];
    read_record(reader, &mut len_bytes, "chunk length", *offset)?;
    *offset += layout::CHUNK_LEN_FIELD as u64;
    let declared = u64::from(u32::from_le_bytes(len_bytes));

    // Read through `take` so a bogus length cannot force a huge allocation.
    let mut data = Vec::new();
    let read = reader.by_ref().take(declared).read_to_end(&mut data)? as u64;
    if read < declared {
        return Err(FlpSourceError::Truncated {
            context: "chunk payload",
            offset: *offset,
            expected: declared,
            found: read,
        });
    }

    let chunk = Chunk {
        tag,
        offset: *offset,
        data,
    };
    *offset += declared;
    debug!(
        "chunk {:?}: {} bytes at offset {}",
        String::from_utf8_lossy(&chunk.tag),
        declared,
        chunk.offset
    );
    Ok(Some(chunk))
}

#[cfg(test)]
mod tests {
    use super::FlpReaderSource;
    use crate::source::flp::layout;
    use crate::source::{ChunkSource, SourceError};
    use std::io::Cursor;

    fn header() -> Vec<u8> {
        let mut bytes = layout::HEADER_TAG.to_vec();
        bytes.extend_from_slice(&6u32.to_le_bytes());
        bytes.extend_from_slice(&0u16.to_le_bytes());
        bytes.extend_from_slice(&3u16.to_le_bytes());
        bytes.extend_from_slice(&96u16.to_le_bytes());
        bytes
    }

    #[test]
    fn reads_header_then_chunks() {
        let mut bytes = header();
        bytes.extend_from_slice(b"FLdt");
        bytes.extend_from_slice(&3u32.to_le_bytes());
        bytes.extend_from_slice(&[1, 2, 3]);

        let mut source = FlpReaderSource::new(Cursor::new(bytes));
        let header = source.read_header().unwrap();
        assert_eq!(header.channel_count, 3);
        assert_eq!(header.ppq, 96);

        let chunk = source.next_chunk().unwrap().unwrap();
        assert_eq!(&chunk.tag, b"FLdt");
        assert_eq!(chunk.offset, 22);
        assert_eq!(chunk.data, vec![1, 2, 3]);
        assert_eq!(source.offset(), 25);
        assert!(source.next_chunk().unwrap().is_none());
    }

    #[test]
    fn truncated_header() {
        let mut source = FlpReaderSource::new(Cursor::new(vec![b'F', b'L']));
        let err = source.read_header().unwrap_err();
        assert!(matches!(
            err,
            SourceError::Truncated {
                context: "file header",
                expected: 14,
                found: 2,
                ..
            }
        ));
    }

    #[test]
    fn truncated_chunk_payload_reports_declared_length() {
        let mut bytes = header();
        bytes.extend_from_slice(b"FLdt");
        bytes.extend_from_slice(&100u32.to_le_bytes());
        bytes.extend_from_slice(&[0u8; 10]);

        let mut source = FlpReaderSource::new(Cursor::new(bytes));
        source.read_header().unwrap();
        let err = source.next_chunk().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("offset 22"));
        assert!(msg.contains("expected 100 bytes, found 10"));
    }

    #[test]
    fn partial_chunk_tag_is_truncation() {
        let mut bytes = header();
        bytes.extend_from_slice(b"FL");
        let mut source = FlpReaderSource::new(Cursor::new(bytes));
        source.read_header().unwrap();
        assert!(matches!(
            source.next_chunk(),
            Err(SourceError::Truncated {
                context: "chunk tag",
                ..
            })
        ));
    }
}
