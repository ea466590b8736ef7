//! flpdump core library for reading FL Studio project files (`.flp`).
//!
//! This crate implements the read-only decoding pipeline used by the CLI:
//! a chunk source yields the file header and the data chunk, the event
//! framing layer (layout/reader/parser) splits the chunk into typed events,
//! and the decoder replays those events into a [`ProjectFile`]: project
//! metadata, the ordered channel list and the mixer tree. Parsing is
//! byte-oriented and side-effect free; all I/O is isolated in `source`.
//!
//! Invariants:
//! - Channels keep stream order; channel-scoped events always target the
//!   most recently created channel.
//! - The mixer always starts with a single "Master" insert, and every insert
//!   holds exactly [`MIXER_SLOT_COUNT`] slots.
//! - Any framing error aborts the whole decode; no partial model is returned.
//!
//! Version française (résumé):
//! Cette crate décode les projets FL Studio en lecture seule : source ->
//! découpage des événements (layout/reader/parser) -> modèle du projet.
//! Les E/S restent dans `source`. Garanties : ordre des canaux conservé,
//! mixeur amorcé par l'insert "Master", toute erreur de trame est fatale.
//!
//! # Examples
//! ```no_run
//! use std::path::Path;
//!
//! use flpdump_core::decode_project_file;
//!
//! let file = decode_project_file(Path::new("song.flp"))?;
//! println!("title: {}", file.project.title);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

mod decode;
mod format;
mod source;

use format::plugin::layout as plugin_layout;

pub use decode::{DecodeError, decode_bytes, decode_project_file, decode_source};
pub use format::common::ReadError;
pub use format::event::EventError;
pub use format::plugin::PluginError;
pub use source::{Chunk, ChunkSource, FlpFileSource, FlpReaderSource, SourceError};

/// Number of effect slots on every mixer insert.
pub const MIXER_SLOT_COUNT: usize = 10;
/// Name of the insert seeded at mixer index 0.
pub const MASTER_INSERT_NAME: &str = "Master";

/// Decoded project file: header, metadata, channels and mixer.
///
/// # Examples
/// ```
/// use flpdump_core::{ProjectFile, MASTER_INSERT_NAME};
///
/// let file = ProjectFile::default();
/// assert!(file.channels.is_empty());
/// assert_eq!(file.mixer.len(), 1);
/// assert_eq!(file.mixer[0].name, MASTER_INSERT_NAME);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectFile {
    /// Fixed file header fields.
    pub header: FileHeader,
    /// Global project metadata.
    pub project: Project,
    /// Channels in stream order.
    pub channels: Vec<Channel>,
    /// Mixer inserts; index 0 is always the master insert.
    pub mixer: Vec<Insert>,
}

impl Default for ProjectFile {
    fn default() -> Self {
        Self {
            header: FileHeader::default(),
            project: Project::default(),
            channels: Vec::new(),
            mixer: vec![Insert::new(MASTER_INSERT_NAME)],
        }
    }
}

/// Fields of the 14-byte file header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileHeader {
    /// Declared length of the header body (6 in every known file).
    pub header_len: u32,
    /// Reserved format word.
    pub format: u16,
    /// Channel count announced by the header.
    pub channel_count: u16,
    /// Pulses per quarter note.
    pub ppq: u16,
}

/// Global project metadata.
///
/// # Examples
/// ```
/// use flpdump_core::Project;
///
/// let project = Project {
///     tempo: 140_000,
///     ..Project::default()
/// };
/// assert_eq!(project.tempo_bpm(), 140.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    /// Tempo in thousandths of a BPM.
    pub tempo: u32,
    /// Format version string written by the saving application.
    pub version: String,
    pub style: String,
    pub author: String,
    pub comments: String,
    pub url: String,
}

impl Project {
    pub fn tempo_bpm(&self) -> f64 {
        f64::from(self.tempo) / 1000.0
    }
}

/// One channel of the channel rack.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    /// Identifier carried by the channel creation event.
    pub id: u16,
    pub name: String,
    /// Raw channel-type byte; see [`Channel::kind`].
    pub channel_type: u8,
    pub sample_filename: String,
    /// Loaded generator or instrument; empty when none.
    pub plugin: Plugin,
}

impl Channel {
    pub fn new(id: u16) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    pub fn kind(&self) -> ChannelKind {
        ChannelKind::from_code(self.channel_type)
    }
}

/// Channel type decoded from the raw channel-type byte.
///
/// # Examples
/// ```
/// use flpdump_core::ChannelKind;
///
/// assert_eq!(ChannelKind::from_code(4), ChannelKind::Sample);
/// assert_eq!(ChannelKind::from_code(5), ChannelKind::Automation);
/// assert_eq!(ChannelKind::from_code(42), ChannelKind::Unknown(42));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelKind {
    Sample,
    Automation,
    Plugin,
    Unknown(u8),
}

impl ChannelKind {
    pub fn from_code(code: u8) -> Self {
        match code {
            0 | 4 => ChannelKind::Sample,
            2 => ChannelKind::Plugin,
            5 => ChannelKind::Automation,
            other => ChannelKind::Unknown(other),
        }
    }
}

impl fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelKind::Sample => write!(f, "Sample"),
            ChannelKind::Automation => write!(f, "Automation"),
            ChannelKind::Plugin => write!(f, "VST"),
            ChannelKind::Unknown(code) => write!(f, "Unknown ({code})"),
        }
    }
}

/// One mixer insert with its fixed effect chain.
///
/// # Examples
/// ```
/// use flpdump_core::{Insert, MIXER_SLOT_COUNT};
///
/// let insert = Insert::new("Drums");
/// assert_eq!(insert.slots.len(), MIXER_SLOT_COUNT);
/// assert_eq!(insert.slots[3].id, 3);
/// assert!(insert.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insert {
    pub name: String,
    pub slots: [Slot; MIXER_SLOT_COUNT],
}

impl Insert {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            slots: std::array::from_fn(|index| Slot::new(index as u16)),
        }
    }

    /// True when no slot holds a plugin.
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(|slot| slot.plugin.is_empty())
    }

    /// Slots that hold a plugin, in chain order.
    pub fn loaded_slots(&self) -> impl Iterator<Item = &Slot> {
        self.slots.iter().filter(|slot| !slot.plugin.is_empty())
    }
}

impl Default for Insert {
    fn default() -> Self {
        Self::new(String::new())
    }
}

/// One effect position inside an insert.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    /// Position within the insert's chain.
    pub id: u16,
    pub name: String,
    pub plugin: Plugin,
}

impl Slot {
    pub fn new(id: u16) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }
}

/// Plugin type selected by the low nibble of a descriptor's type word.
///
/// # Examples
/// ```
/// use flpdump_core::PluginKind;
///
/// assert_eq!(PluginKind::from_code(3).to_string(), "VST Internal");
/// assert_eq!(PluginKind::from_code(9).to_string(), "VST External (9)");
/// assert_eq!(PluginKind::from_code(1), PluginKind::Unknown(1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PluginKind {
    VstInternal,
    VstExternal { code: u8 },
    Unknown(u8),
}

impl PluginKind {
    pub fn from_code(code: u8) -> Self {
        match code {
            plugin_layout::PLUGIN_TYPE_VST_INTERNAL => PluginKind::VstInternal,
            plugin_layout::PLUGIN_TYPE_VST_EXTERNAL | plugin_layout::PLUGIN_TYPE_VST_EXTERNAL_ALT => {
                PluginKind::VstExternal { code }
            }
            other => PluginKind::Unknown(other),
        }
    }
}

impl fmt::Display for PluginKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PluginKind::VstInternal => write!(f, "VST Internal"),
            PluginKind::VstExternal { code } => write!(f, "VST External ({code})"),
            PluginKind::Unknown(code) => write!(f, "Unknown ({code})"),
        }
    }
}

/// A loaded plugin. The default value means "no plugin".
///
/// # Examples
/// ```
/// use flpdump_core::Plugin;
///
/// assert!(Plugin::default().is_empty());
/// let plugin = Plugin {
///     name: "Fruity Limiter".to_string(),
///     ..Plugin::default()
/// };
/// assert!(!plugin.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plugin {
    /// Type label; `None` until a descriptor has been decoded.
    pub kind: Option<PluginKind>,
    pub name: String,
    pub filename: String,
    pub vendor: String,
}

impl Plugin {
    pub fn is_empty(&self) -> bool {
        *self == Plugin::default()
    }
}
