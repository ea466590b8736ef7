use std::io::{self, Read};

use super::error::FlpSourceError;
use super::layout;
use crate::FileHeader;

/// Fill `buf` as far as the reader allows and return the number of bytes read.
///
/// Unlike `read_exact`, a short count is reported instead of an error so the
/// caller can tell a clean end of input from a truncated record.
///
/// # Examples
/// This helper is part of an internal module, so the example is marked as
/// text example.
/// ```text
/// use std::io::Cursor;
///
/// let mut cursor = Cursor::new([1u8, 2, 3]);
/// let mut buf = [0u8; 4];
/// assert_eq!(read_up_to(&mut cursor, &mut buf).unwrap(), 3);
/// ```
pub fn read_up_to<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => return Err(err),
        }
    }
    Ok(filled)
}

/// Read exactly `buf.len()` bytes or report what was missing.
pub fn read_record<R: Read>(
    reader: &mut R,
    buf: &mut [u8],
    context: &'static str,
    offset: u64,
) -> Result<(), FlpSourceError> {
    let found = read_up_to(reader, buf)?;
    if found < buf.len() {
        return Err(FlpSourceError::Truncated {
            context,
            offset,
            expected: buf.len() as u64,
            found: found as u64,
        });
    }
    Ok(())
}

/// Decode the fixed header fields.
///
/// # Examples
/// This helper is part of an internal module, so the example is marked as
/// text example.
/// ```text
/// let mut bytes = [0u8; 14];
/// bytes[12..14].copy_from_slice(&96u16.to_le_bytes());
/// assert_eq!(parse_header(&bytes).ppq, 96);
/// ```
pub fn parse_header(bytes: &[u8; layout::HEADER_LEN]) -> FileHeader {
    FileHeader {
        header_len: u32::from_le_bytes(field(bytes, layout::HEADER_BODY_LEN_RANGE)),
        format: u16::from_le_bytes(field(bytes, layout::FORMAT_RANGE)),
        channel_count: u16::from_le_bytes(field(bytes, layout::CHANNEL_COUNT_RANGE)),
        ppq: u16::from_le_bytes(field(bytes, layout::PPQ_RANGE)),
    }
}

pub fn header_tag(bytes: &[u8; layout::HEADER_LEN]) -> &[u8] {
    &bytes[layout::HEADER_TAG_RANGE]
}

pub fn is_header_tag(tag: &[u8]) -> bool {
    tag == layout::HEADER_TAG
}

fn field<const N: usize>(bytes: &[u8; layout::HEADER_LEN], range: std::ops::Range<usize>) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(&bytes[range]);
    out
}

#[cfg(test)]
mod tests {
    use super::{is_header_tag, parse_header, read_record, read_up_to};
    use crate::source::flp::error::FlpSourceError;
    use crate::source::flp::layout;
    use std::io::Cursor;

    fn header_bytes() -> [u8; layout::HEADER_LEN] {
        let mut bytes = [0u8; layout::HEADER_LEN];
        bytes[layout::HEADER_TAG_RANGE].copy_from_slice(layout::HEADER_TAG);
        bytes[layout::HEADER_BODY_LEN_RANGE].copy_from_slice(&6u32.to_le_bytes());
        bytes[layout::CHANNEL_COUNT_RANGE].copy_from_slice(&12u16.to_le_bytes());
        bytes[layout::PPQ_RANGE].copy_from_slice(&96u16.to_le_bytes());
        bytes
    }

    #[test]
    fn parses_header_fields() {
        let bytes = header_bytes();
        let header = parse_header(&bytes);
        assert_eq!(header.header_len, 6);
        assert_eq!(header.format, 0);
        assert_eq!(header.channel_count, 12);
        assert_eq!(header.ppq, 96);
        assert!(is_header_tag(super::header_tag(&bytes)));
    }

    #[test]
    fn read_up_to_stops_at_eof() {
        let mut cursor = Cursor::new([1u8, 2, 3]);
        let mut buf = [0u8; 8];
        assert_eq!(read_up_to(&mut cursor, &mut buf).unwrap(), 3);
        assert_eq!(&buf[..3], &[1, 2, 3]);
    }

    #[test]
    fn read_record_reports_shortfall() {
        let mut cursor = Cursor::new([0u8; 5]);
        let mut buf = [0u8; layout::HEADER_LEN];
        let err = read_record(&mut cursor, &mut buf, "file header", 0).unwrap_err();
        assert!(matches!(
            err,
            FlpSourceError::Truncated {
                expected: 14,
                found: 5,
                ..
            }
        ));
    }
}
