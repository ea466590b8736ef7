use std::fs;
use std::path::{Path, PathBuf};

const HEADER_TAG: &[u8; 4] = b"FLhd";
const HEADER_BODY_LEN: u32 = 6;
const DATA_CHUNK_TAG: &[u8; 4] = b"FLdt";
const PPQ: u16 = 96;

const BYTE_CHANNEL_TYPE: u8 = 21;
const WORD_NEW_CHANNEL: u8 = 64;
const WORD_CURRENT_SLOT: u8 = 98;
const DWORD_FINE_TEMPO: u8 = 156;
const TEXT_TITLE: u8 = 194;
const TEXT_COMMENT: u8 = 195;
const TEXT_SAMPLE_FILENAME: u8 = 196;
const TEXT_URL: u8 = 197;
const TEXT_VERSION: u8 = 199;
const TEXT_GENERATOR_NAME: u8 = 201;
const TEXT_PLUGIN_NAME: u8 = 203;
const TEXT_INSERT_NAME: u8 = 204;
const TEXT_STYLE: u8 = 206;
const TEXT_AUTHOR: u8 = 207;
const DATA_NEW_PLUGIN: u8 = 212;
const DATA_PLUGIN_PARAMS: u8 = 213;
const DATA_PATTERN_NOTES: u8 = 224;
const DATA_INSERT_ROUTES: u8 = 235;

const PLUGIN_RECORD_END: u32 = 0;
const PLUGIN_RECORD_PLUGIN_INFO: u32 = 50;
const PLUGIN_RECORD_STATE: u32 = 53;
const PLUGIN_RECORD_NAME: u32 = 54;
const PLUGIN_RECORD_FILENAME: u32 = 55;
const PLUGIN_RECORD_VENDOR: u32 = 56;

fn main() -> Result<(), String> {
    let root = PathBuf::from("tests/golden");
    write_project(root.join("minimal").join("input.flp"), 1, &minimal_events())?;
    write_project(root.join("session").join("input.flp"), 4, &session_events())?;
    write_project(
        root.join("unknown_events").join("input.flp"),
        1,
        &unknown_events(),
    )?;
    Ok(())
}

fn minimal_events() -> Vec<u8> {
    let mut events = Vec::new();
    events.extend(word_event(WORD_NEW_CHANNEL, 1));
    events.extend(byte_event(BYTE_CHANNEL_TYPE, 0));
    events.extend(text_event(TEXT_TITLE, "Test"));
    events.extend(dword_event(DWORD_FINE_TEMPO, 140_000));
    events
}

fn session_events() -> Vec<u8> {
    let mut events = Vec::new();
    events.extend(span_event(TEXT_VERSION, b"20.8.4.2576\0"));
    events.extend(text_event(TEXT_TITLE, "Night Drive\0"));
    events.extend(text_event(TEXT_AUTHOR, "flpdump\0"));
    events.extend(text_event(TEXT_STYLE, "Synthwave\0"));
    events.extend(text_event(TEXT_COMMENT, "Second draft\0"));
    events.extend(text_event(TEXT_URL, "https://example.org/night-drive\0"));
    events.extend(dword_event(DWORD_FINE_TEMPO, 128_500));

    events.extend(word_event(WORD_NEW_CHANNEL, 0));
    events.extend(byte_event(BYTE_CHANNEL_TYPE, 0));
    events.extend(text_event(TEXT_PLUGIN_NAME, "Kick\0"));
    events.extend(text_event(TEXT_SAMPLE_FILENAME, "C:\\Samples\\kick.wav\0"));

    events.extend(word_event(WORD_NEW_CHANNEL, 1));
    events.extend(byte_event(BYTE_CHANNEL_TYPE, 2));
    events.extend(text_event(TEXT_PLUGIN_NAME, "Lead\0"));
    events.extend(span_event(DATA_NEW_PLUGIN, &[0x01, 0x02, 0x03]));
    events.extend(span_event(
        DATA_PLUGIN_PARAMS,
        &external_plugin(8, "Xfer Records", "Serum_x64.dll", "Serum"),
    ));

    events.extend(word_event(WORD_NEW_CHANNEL, 2));
    events.extend(byte_event(BYTE_CHANNEL_TYPE, 2));
    events.extend(text_event(TEXT_GENERATOR_NAME, "3x Osc\0"));
    events.extend(text_event(TEXT_PLUGIN_NAME, "Bass\0"));
    events.extend(span_event(DATA_PLUGIN_PARAMS, &generator_plugin(0)));

    events.extend(word_event(WORD_NEW_CHANNEL, 3));
    events.extend(byte_event(BYTE_CHANNEL_TYPE, 5));
    events.extend(text_event(TEXT_PLUGIN_NAME, "Cutoff\0"));

    events.extend(span_event(DATA_PATTERN_NOTES, &[0u8; 24]));

    events.extend(word_event(WORD_CURRENT_SLOT, 0));
    events.extend(text_event(TEXT_PLUGIN_NAME, "Limiter\0"));
    events.extend(span_event(
        DATA_PLUGIN_PARAMS,
        &external_plugin(9, "Image-Line", "Fruity Limiter.dll", "Fruity Limiter"),
    ));
    events.extend(span_event(DATA_INSERT_ROUTES, &[0u8; 8]));

    events.extend(text_event(TEXT_INSERT_NAME, "Drums\0"));
    events.extend(word_event(WORD_CURRENT_SLOT, 3));
    events.extend(span_event(
        DATA_PLUGIN_PARAMS,
        &external_plugin(8, "FabFilter", "FabFilter Pro-Q 3.dll", "Pro-Q 3"),
    ));
    events.extend(span_event(DATA_INSERT_ROUTES, &[0u8; 8]));

    events.extend(text_event(TEXT_INSERT_NAME, "Spare\0"));
    events.extend(span_event(DATA_INSERT_ROUTES, &[0u8; 8]));
    events
}

fn unknown_events() -> Vec<u8> {
    let mut events = Vec::new();
    events.extend(byte_event(30, 0xFF));
    events.extend(word_event(WORD_NEW_CHANNEL, 7));
    events.extend(word_event(100, 0xFFFF));
    events.extend(byte_event(BYTE_CHANNEL_TYPE, 4));
    events.extend(dword_event(170, 0xDEAD_BEEF));
    events.extend(span_event(205, &[0x41, 0x00]));
    // 200 bytes forces a two-byte length prefix.
    events.extend(span_event(250, &[0xAB; 200]));
    events.extend(text_event(TEXT_SAMPLE_FILENAME, "loop.wav\0"));
    events
}

fn write_project(path: PathBuf, channel_count: u16, events: &[u8]) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|err| format!("failed to create {}: {}", parent.display(), err))?;
    }
    write_flp(&path, channel_count, events)
}

fn write_flp(path: &Path, channel_count: u16, events: &[u8]) -> Result<(), String> {
    let mut output = Vec::new();
    output.extend_from_slice(HEADER_TAG);
    output.extend_from_slice(&HEADER_BODY_LEN.to_le_bytes());
    output.extend_from_slice(&0u16.to_le_bytes());
    output.extend_from_slice(&channel_count.to_le_bytes());
    output.extend_from_slice(&PPQ.to_le_bytes());
    output.extend_from_slice(DATA_CHUNK_TAG);
    output.extend_from_slice(&(events.len() as u32).to_le_bytes());
    output.extend_from_slice(events);

    fs::write(path, output)
        .map_err(|err| format!("failed to write {}: {}", path.display(), err))?;
    Ok(())
}

fn byte_event(opcode: u8, value: u8) -> Vec<u8> {
    vec![opcode, value]
}

fn word_event(opcode: u8, value: u16) -> Vec<u8> {
    let mut event = vec![opcode];
    event.extend_from_slice(&value.to_le_bytes());
    event
}

fn dword_event(opcode: u8, value: u32) -> Vec<u8> {
    let mut event = vec![opcode];
    event.extend_from_slice(&value.to_le_bytes());
    event
}

fn text_event(opcode: u8, text: &str) -> Vec<u8> {
    let body: Vec<u8> = text.encode_utf16().flat_map(u16::to_le_bytes).collect();
    span_event(opcode, &body)
}

fn span_event(opcode: u8, body: &[u8]) -> Vec<u8> {
    let mut event = vec![opcode];
    event.extend(varint(body.len() as u32));
    event.extend_from_slice(body);
    event
}

fn varint(mut value: u32) -> Vec<u8> {
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

fn generator_plugin(plugin_type: u32) -> Vec<u8> {
    plugin_type.to_le_bytes().to_vec()
}

fn external_plugin(plugin_type: u32, vendor: &str, filename: &str, name: &str) -> Vec<u8> {
    let mut body = plugin_type.to_le_bytes().to_vec();
    body.extend(plugin_record(PLUGIN_RECORD_PLUGIN_INFO, &[0u8; 16]));
    body.extend(plugin_record(PLUGIN_RECORD_VENDOR, vendor.as_bytes()));
    body.extend(plugin_record(PLUGIN_RECORD_FILENAME, filename.as_bytes()));
    body.extend(plugin_record(PLUGIN_RECORD_NAME, name.as_bytes()));
    body.extend(plugin_record(PLUGIN_RECORD_STATE, &[0x5A; 32]));
    body.extend(plugin_record(PLUGIN_RECORD_END, &[]));
    body
}

fn plugin_record(code: u32, body: &[u8]) -> Vec<u8> {
    let mut record = code.to_le_bytes().to_vec();
    record.extend_from_slice(&(body.len() as u64).to_le_bytes());
    record.extend_from_slice(body);
    record
}
