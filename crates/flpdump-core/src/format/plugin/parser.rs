use log::trace;

use super::error::PluginError;
use super::layout;
use super::reader::PluginReader;
use crate::format::common::{TextEncoding, decode_text};
use crate::{Plugin, PluginKind};

/// Decode a plugin descriptor span.
///
/// `base` is the absolute offset of `payload`; `generator_name` is the most
/// recent generator-name text seen in the outer stream, used as the name of
/// internal generators.
pub fn parse_plugin(
    payload: &[u8],
    base: usize,
    generator_name: &str,
) -> Result<Plugin, PluginError> {
    let mut reader = PluginReader::new(payload, base);
    let plugin_type = reader.read_plugin_type()?;
    let mut plugin = Plugin {
        kind: Some(PluginKind::from_code(plugin_type)),
        ..Plugin::default()
    };

    if plugin_type < layout::GENERATOR_TYPE_LIMIT {
        plugin.name = generator_name.to_string();
        return Ok(plugin);
    }

    while let Some(header) = reader.read_record_header()? {
        if header.code == layout::RECORD_END {
            break;
        }
        let body = reader.read_record_body(header)?;
        match header.code {
            layout::RECORD_NAME => plugin.name = decode_text(body, TextEncoding::Ascii),
            layout::RECORD_FILENAME => plugin.filename = decode_text(body, TextEncoding::Ascii),
            layout::RECORD_VENDOR => plugin.vendor = decode_text(body, TextEncoding::Ascii),
            layout::RECORD_PLUGIN_INFO | layout::RECORD_STATE => {}
            code => trace!("skipping plugin record {code} ({} bytes)", body.len()),
        }
    }

    Ok(plugin)
}
