use log::{debug, warn};

use super::DecodeError;
use crate::{
    Channel, FileHeader, Insert, MASTER_INSERT_NAME, MIXER_SLOT_COUNT, Plugin, Project,
    ProjectFile,
};

/// Slot selector value meaning "no slot; target the active channel".
pub(crate) const SLOT_SELECTOR_NONE: u16 = 0xFFFF;

/// Where channel-scoped name and plugin events land.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SlotSelector {
    Channel,
    Slot(usize),
}

/// Model under construction plus the cursors the event stream moves.
///
/// The stream carries no parent pointers: the active channel is the last one
/// created, the active insert advances on every insert-routing event, and
/// the slot selector stays set until a selector event clears it.
pub(crate) struct DecoderState {
    pub(super) project: Project,
    channels: Vec<Channel>,
    mixer: Vec<Insert>,
    current_insert: usize,
    selector: SlotSelector,
    pub(super) last_generator: String,
}

impl DecoderState {
    pub(crate) fn new() -> Self {
        Self {
            project: Project::default(),
            channels: Vec::new(),
            mixer: vec![Insert::new(MASTER_INSERT_NAME)],
            current_insert: 0,
            selector: SlotSelector::Channel,
            last_generator: String::new(),
        }
    }

    pub(crate) fn finish(self, header: FileHeader) -> ProjectFile {
        ProjectFile {
            header,
            project: self.project,
            channels: self.channels,
            mixer: self.mixer,
        }
    }

    pub(super) fn push_channel(&mut self, id: u16) {
        debug!("channel {} (id {id})", self.channels.len());
        self.channels.push(Channel::new(id));
    }

    /// The most recently created channel, if any exists yet.
    pub(super) fn channel_mut(&mut self, opcode: u8, offset: usize) -> Option<&mut Channel> {
        let channel = self.channels.last_mut();
        if channel.is_none() {
            warn!("event {opcode} at offset {offset} precedes any channel; skipped");
        }
        channel
    }

    pub(super) fn insert_mut(&mut self) -> &mut Insert {
        &mut self.mixer[self.current_insert]
    }

    /// Close the active insert's block and start the next one.
    pub(super) fn push_insert(&mut self) {
        self.mixer.push(Insert::default());
        self.current_insert += 1;
        debug!("insert {} begins", self.current_insert);
    }

    pub(super) fn select_slot(&mut self, value: u16, offset: usize) -> Result<(), DecodeError> {
        if value == SLOT_SELECTOR_NONE {
            self.selector = SlotSelector::Channel;
            return Ok(());
        }
        let index = usize::from(value);
        if index >= MIXER_SLOT_COUNT {
            return Err(DecodeError::SlotOutOfRange {
                offset,
                slot: value,
            });
        }
        self.selector = SlotSelector::Slot(index);
        self.insert_mut().slots[index].id = value;
        Ok(())
    }

    pub(super) fn set_target_name(&mut self, name: String, opcode: u8, offset: usize) {
        match self.selector {
            SlotSelector::Channel => {
                if let Some(channel) = self.channel_mut(opcode, offset) {
                    channel.name = name;
                }
            }
            SlotSelector::Slot(index) => self.insert_mut().slots[index].name = name,
        }
    }

    pub(super) fn set_target_plugin(&mut self, plugin: Plugin, opcode: u8, offset: usize) {
        match self.selector {
            SlotSelector::Channel => {
                if let Some(channel) = self.channel_mut(opcode, offset) {
                    channel.plugin = plugin;
                }
            }
            SlotSelector::Slot(index) => self.insert_mut().slots[index].plugin = plugin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DecoderState, SLOT_SELECTOR_NONE, SlotSelector};
    use crate::decode::DecodeError;
    use crate::{FileHeader, Plugin};

    #[test]
    fn starts_with_master_insert() {
        let state = DecoderState::new();
        let file = state.finish(FileHeader::default());
        assert_eq!(file.mixer.len(), 1);
        assert_eq!(file.mixer[0].name, "Master");
        assert!(file.mixer[0].is_empty());
    }

    #[test]
    fn push_insert_advances_cursor() {
        let mut state = DecoderState::new();
        state.push_insert();
        state.insert_mut().name = "Kick".to_string();
        state.push_insert();
        let file = state.finish(FileHeader::default());
        assert_eq!(file.mixer.len(), 3);
        assert_eq!(file.mixer[1].name, "Kick");
        assert!(file.mixer[2].name.is_empty());
    }

    #[test]
    fn selector_routes_until_cleared() {
        let mut state = DecoderState::new();
        state.push_channel(0);
        state.select_slot(4, 0).unwrap();
        assert_eq!(state.selector, SlotSelector::Slot(4));
        state.set_target_name("EQ".to_string(), 0, 0);

        state.select_slot(SLOT_SELECTOR_NONE, 0).unwrap();
        state.set_target_name("Lead".to_string(), 0, 0);

        let file = state.finish(FileHeader::default());
        assert_eq!(file.mixer[0].slots[4].name, "EQ");
        assert_eq!(file.channels[0].name, "Lead");
    }

    #[test]
    fn slot_out_of_range_is_rejected() {
        let mut state = DecoderState::new();
        let err = state.select_slot(10, 77).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::SlotOutOfRange {
                offset: 77,
                slot: 10
            }
        ));
    }

    #[test]
    fn channel_events_without_channel_are_skipped() {
        let mut state = DecoderState::new();
        let plugin = Plugin {
            name: "Orphan".to_string(),
            ..Plugin::default()
        };
        state.set_target_plugin(plugin, 213, 30);
        let file = state.finish(FileHeader::default());
        assert!(file.channels.is_empty());
        assert!(file.mixer[0].is_empty());
    }
}
