//! Built-in payload decoders, grouped by box family.

mod ac3;
mod container;
mod descriptor;
mod file;
mod header;
mod item;
mod sample;
mod table;

pub use ac3::*;
pub use container::*;
pub use descriptor::*;
pub use file::*;
pub use header::*;
pub use item::*;
pub use sample::*;
pub use table::*;

use crate::boxes::Payload;
use crate::envelope::BoxEnvelope;
use crate::error::Result;
use crate::parser::BoxParser;

/// Version byte and 24-bit flags opening an ISO full box.
pub(crate) fn read_full_header(parser: &mut BoxParser<'_>) -> Result<(u8, u32)> {
    let cursor = parser.cursor();
    let version = cursor.read_u8()?;
    let flags = cursor.read_flags()?;
    Ok((version, flags))
}

/// Payload left as-is, for types registered without a structured decoder.
pub fn decode_opaque(_parser: &mut BoxParser<'_>, _envelope: &BoxEnvelope) -> Result<Payload> {
    Ok(Payload::Opaque)
}

pub fn decode_mdat(_parser: &mut BoxParser<'_>, _envelope: &BoxEnvelope) -> Result<Payload> {
    Ok(Payload::MediaData)
}

pub fn decode_free(_parser: &mut BoxParser<'_>, _envelope: &BoxEnvelope) -> Result<Payload> {
    Ok(Payload::Free)
}
