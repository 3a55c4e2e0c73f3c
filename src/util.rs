use chrono::{DateTime, Utc};
use serde::Serializer;

/// Seconds between 1904-01-01 and 1970-01-01, both UTC.
pub const MAC_EPOCH_OFFSET: i64 = 2_082_844_800;

/// Convert a header timestamp (seconds since 1904-01-01 UTC) to a date.
/// `None` when the value does not fit the calendar.
pub fn date_from_mac_seconds(seconds: u64) -> Option<DateTime<Utc>> {
    let millis = i64::try_from(seconds).ok()?.checked_mul(1000)?;
    DateTime::from_timestamp_millis(millis.checked_sub(MAC_EPOCH_OFFSET * 1000)?)
}

/// Big-endian `u16` at `offset`, or 0 when `bytes` is too short.
pub fn u16_at(bytes: &[u8], offset: usize) -> u16 {
    bytes
        .get(offset..offset + 2)
        .map(|b| u16::from_be_bytes([b[0], b[1]]))
        .unwrap_or(0)
}

/// ISO-639-2/T language packed as three 5-bit letters.
pub fn lang_from_u16(code: u16) -> String {
    if code == 0 {
        return "und".to_string();
    }
    let c1 = ((code >> 10) & 0x1F) as u8 + 0x60;
    let c2 = ((code >> 5) & 0x1F) as u8 + 0x60;
    let c3 = (code & 0x1F) as u8 + 0x60;
    format!("{}{}{}", c1 as char, c2 as char, c3 as char)
}

pub fn trim_nul(text: &str) -> &str {
    text.trim_end_matches('\0')
}

pub fn serialize_hex<T: AsRef<[u8]>, S: Serializer>(bytes: &T, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&hex::encode(bytes))
}

pub fn serialize_hex_opt<S: Serializer>(bytes: &Option<Vec<u8>>, s: S) -> Result<S::Ok, S::Error> {
    match bytes {
        Some(b) => s.serialize_some(&hex::encode(b)),
        None => s.serialize_none(),
    }
}
