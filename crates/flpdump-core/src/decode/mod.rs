use std::path::Path;

use log::debug;
use thiserror::Error;

use crate::ProjectFile;
use crate::format::event::{EventError, EventReader, layout as event_layout};
use crate::format::plugin::PluginError;
use crate::source::flp::layout as source_layout;
use crate::source::{ChunkSource, FlpFileSource, FlpReaderSource, SourceError};

mod events;
mod state;

use state::DecoderState;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Source error: {0}")]
    Source(#[from] SourceError),
    #[error("missing data chunk at offset {offset}")]
    MissingDataChunk { offset: u64 },
    #[error("bad chunk tag at offset {offset}: expected {expected:?}, found {found:?}")]
    ChunkTag {
        offset: u64,
        expected: String,
        found: String,
    },
    #[error("Event error: {0}")]
    Event(#[from] EventError),
    #[error("plugin descriptor of event at offset {offset}: {source}")]
    Plugin {
        offset: usize,
        #[source]
        source: PluginError,
    },
    #[error("mixer slot {slot} out of range at offset {offset}")]
    SlotOutOfRange { offset: usize, slot: u16 },
}

pub fn decode_project_file(path: &Path) -> Result<ProjectFile, DecodeError> {
    let source = FlpFileSource::open(path)?;
    decode_source(source)
}

pub fn decode_bytes(bytes: &[u8]) -> Result<ProjectFile, DecodeError> {
    decode_source(FlpReaderSource::new(bytes))
}

pub fn decode_source<S: ChunkSource>(mut source: S) -> Result<ProjectFile, DecodeError> {
    let header = source.read_header()?;
    let chunk = source
        .next_chunk()?
        .ok_or(DecodeError::MissingDataChunk {
            offset: source_layout::HEADER_LEN as u64,
        })?;
    if &chunk.tag != event_layout::DATA_CHUNK_TAG {
        let tag_len = (source_layout::CHUNK_TAG_LEN + source_layout::CHUNK_LEN_FIELD) as u64;
        return Err(DecodeError::ChunkTag {
            offset: chunk.offset - tag_len,
            expected: String::from_utf8_lossy(event_layout::DATA_CHUNK_TAG).into_owned(),
            found: String::from_utf8_lossy(&chunk.tag).into_owned(),
        });
    }

    let mut state = DecoderState::new();
    let mut events = EventReader::new(&chunk.data, chunk.offset as usize);
    let mut events_total = 0u64;
    while let Some(event) = events.next_event()? {
        state.apply(event)?;
        events_total += 1;
    }

    let file = state.finish(header);
    debug!(
        "decoded {events_total} events: {} channels, {} inserts",
        file.channels.len(),
        file.mixer.len()
    );
    Ok(file)
}
