use encoding_rs::UTF_16LE;
use log::warn;

/// String encodings used by text payloads.
///
/// Most outer-stream text events carry UTF-16LE code units. The format
/// version event and every plugin descriptor string carry raw single-byte
/// text instead, so callers always name the encoding they expect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    Utf16Le,
    Ascii,
}

/// Decode a text payload, dropping trailing NUL terminators.
///
/// Invalid sequences are replaced with U+FFFD rather than rejected, and so
/// is a trailing odd byte in a UTF-16 payload. Text events never carry a BOM.
pub fn decode_text(bytes: &[u8], encoding: TextEncoding) -> String {
    let text = match encoding {
        TextEncoding::Utf16Le => {
            let (text, had_errors) = UTF_16LE.decode_without_bom_handling(bytes);
            if had_errors {
                warn!("malformed UTF-16 in {} byte text payload", bytes.len());
            }
            text
        }
        TextEncoding::Ascii => String::from_utf8_lossy(bytes),
    };
    text.trim_end_matches('\0').to_string()
}
