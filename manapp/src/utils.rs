//! Fixed-buffer text helpers for the review screen.
//!
//! All output goes into caller-provided byte buffers sized for the
//! device screen. The last byte of every buffer is reserved as a NUL
//! terminator, so a buffer of length `n` shows at most `n - 1`
//! characters.

use core::fmt::{self, Write};
use manapp_common::ParserError;

const HEX_UPPER: &[u8; 16] = b"0123456789ABCDEF";

/// `fmt::Write` adapter over a byte buffer, terminator reserved.
///
/// The buffer is zeroed on construction so partial writes never leave
/// stale characters behind.
pub struct Writer<'a> {
    buf: &'a mut [u8],
    offset: usize,
}

impl<'a> Writer<'a> {
    pub fn new(buf: &'a mut [u8]) -> Self {
        buf.fill(0);
        Writer { buf, offset: 0 }
    }
}

impl Write for Writer<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let bytes = s.as_bytes();
        if self.buf.len() < 1 + self.offset + bytes.len() {
            return Err(fmt::Error);
        }
        self.buf[self.offset..self.offset + bytes.len()].copy_from_slice(bytes);
        self.offset += bytes.len();
        Ok(())
    }
}

/// Formats into `out`, failing cleanly when the text does not fit.
pub fn write_text(out: &mut [u8], args: fmt::Arguments<'_>) -> Result<(), ParserError> {
    let mut writer = Writer::new(out);
    writer
        .write_fmt(args)
        .map_err(|_| ParserError::BufferTooSmall)
}

/// Resets both output buffers to the placeholder state.
pub fn clean_output(out_key: &mut [u8], out_val: &mut [u8]) {
    out_key.fill(0);
    out_val.fill(0);
    if let Some(first) = out_key.first_mut() {
        *first = b'?';
    }
    if let Some(first) = out_val.first_mut() {
        *first = b' ';
    }
}

/// Copies one page of `value` into `out` and returns the page count.
///
/// A page holds `out.len() - 1` bytes. Empty input still counts as one
/// page. A page index at or past the count is not an error; the output
/// is simply left cleared.
pub fn page_string(out: &mut [u8], value: &[u8], page_idx: u8) -> Result<u8, ParserError> {
    out.fill(0);
    if out.len() <= 1 {
        return Err(ParserError::BufferTooSmall);
    }
    let chunk = out.len() - 1;
    let pages = page_count(value.len(), chunk)?;
    let start = page_idx as usize * chunk;
    if start < value.len() {
        let end = (start + chunk).min(value.len());
        out[..end - start].copy_from_slice(&value[start..end]);
    }
    Ok(pages)
}

/// Like [`page_string`] but pages the uppercase hex expansion of
/// `value`, two characters per input byte, without materializing it.
pub fn page_string_hex(out: &mut [u8], value: &[u8], page_idx: u8) -> Result<u8, ParserError> {
    out.fill(0);
    if out.len() <= 1 {
        return Err(ParserError::BufferTooSmall);
    }
    let chunk = out.len() - 1;
    let hex_len = value.len() * 2;
    let pages = page_count(hex_len, chunk)?;
    let start = page_idx as usize * chunk;
    for (i, slot) in out.iter_mut().take(chunk).enumerate() {
        let j = start + i;
        if j >= hex_len {
            break;
        }
        let byte = value[j / 2];
        let nibble = if j % 2 == 0 { byte >> 4 } else { byte & 0x0f };
        *slot = HEX_UPPER[nibble as usize];
    }
    Ok(pages)
}

fn page_count(len: usize, chunk: usize) -> Result<u8, ParserError> {
    let pages = if len == 0 { 1 } else { (len + chunk - 1) / chunk };
    if pages > u8::MAX as usize {
        return Err(ParserError::ValueOutOfRange);
    }
    Ok(pages as u8)
}

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Formats a millisecond Unix timestamp as `DDMonYYYY HH:MM:SS`.
pub fn print_time(out: &mut [u8], timestamp_ms: u64) -> Result<(), ParserError> {
    let secs = timestamp_ms / 1000;
    let days = (secs / 86400) as i64;
    let rem = secs % 86400;
    let (year, month, day) = civil_from_days(days);

    write_text(
        out,
        format_args!(
            "{:02}{}{} {:02}:{:02}:{:02}",
            day,
            MONTHS[(month - 1) as usize],
            year,
            rem / 3600,
            (rem % 3600) / 60,
            rem % 60
        ),
    )
}

/// Gregorian date from days since the Unix epoch (Howard Hinnant's
/// civil-from-days algorithm).
fn civil_from_days(z: i64) -> (i64, u32, u32) {
    let z = z + 719468;
    let era = if z >= 0 { z } else { z - 146096 } / 146097;
    let doe = (z - era * 146097) as u64;
    let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146096) / 365;
    let y = yoe as i64 + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let m = if mp < 10 { mp + 3 } else { mp - 9 } as u32;
    (if m <= 2 { y + 1 } else { y }, m, d)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn as_str(buf: &[u8]) -> &str {
        let end = buf.iter().position(|&b| b == 0).unwrap_or(buf.len());
        core::str::from_utf8(&buf[..end]).unwrap()
    }

    #[test]
    fn test_print_time() {
        let mut buf = [0u8; 40];
        print_time(&mut buf, 1547539401231).unwrap();
        assert_eq!(as_str(&buf), "15Jan2019 08:03:21");

        print_time(&mut buf, 0).unwrap();
        assert_eq!(as_str(&buf), "01Jan1970 00:00:00");

        print_time(&mut buf, 951827696000).unwrap();
        assert_eq!(as_str(&buf), "29Feb2000 12:34:56");
    }

    #[test]
    fn test_print_time_too_small() {
        let mut buf = [0u8; 10];
        assert_eq!(
            print_time(&mut buf, 0),
            Err(ParserError::BufferTooSmall)
        );
    }

    #[test]
    fn test_page_string_chunks() {
        let mut buf = [0u8; 6];
        let value = b"abcdefghijkl";

        assert_eq!(page_string(&mut buf, value, 0), Ok(3));
        assert_eq!(as_str(&buf), "abcde");
        assert_eq!(page_string(&mut buf, value, 1), Ok(3));
        assert_eq!(as_str(&buf), "fghij");
        assert_eq!(page_string(&mut buf, value, 2), Ok(3));
        assert_eq!(as_str(&buf), "kl");
    }

    #[test]
    fn test_page_string_empty_is_one_page() {
        let mut buf = [0u8; 6];
        assert_eq!(page_string(&mut buf, b"", 0), Ok(1));
        assert_eq!(as_str(&buf), "");
    }

    #[test]
    fn test_page_string_past_end() {
        let mut buf = [0u8; 6];
        buf.fill(b'x');
        assert_eq!(page_string(&mut buf, b"abc", 5), Ok(1));
        assert_eq!(as_str(&buf), "");
    }

    #[test]
    fn test_page_string_hex() {
        let mut buf = [0u8; 5];
        let value = [0xde, 0xad, 0xbe];

        assert_eq!(page_string_hex(&mut buf, &value, 0), Ok(2));
        assert_eq!(as_str(&buf), "DEAD");
        assert_eq!(page_string_hex(&mut buf, &value, 1), Ok(2));
        assert_eq!(as_str(&buf), "BE");
    }

    #[test]
    fn test_clean_output() {
        let mut key = [b'z'; 8];
        let mut val = [b'z'; 8];
        clean_output(&mut key, &mut val);
        assert_eq!(as_str(&key), "?");
        assert_eq!(as_str(&val), " ");
    }

    #[test]
    fn test_write_text_overflow() {
        let mut buf = [0u8; 4];
        assert!(write_text(&mut buf, format_args!("abc")).is_ok());
        assert_eq!(as_str(&buf), "abc");
        assert_eq!(
            write_text(&mut buf, format_args!("abcd")),
            Err(ParserError::BufferTooSmall)
        );
    }
}
