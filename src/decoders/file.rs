use super::read_full_header;
use crate::boxes::Payload;
use crate::envelope::BoxEnvelope;
use crate::error::Result;
use crate::parser::BoxParser;
use crate::util::trim_nul;
use serde::Serialize;

// ftyp: major + minor + compatible brands
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FtypBox {
    pub major_brand: String,
    pub minor_version: u32,
    pub compatible_brands: Vec<String>,
}

impl FtypBox {
    pub fn is_compatible_with(&self, brand: &str) -> bool {
        self.major_brand == brand || self.compatible_brands.iter().any(|b| b == brand)
    }
}

pub fn decode_ftyp(parser: &mut BoxParser<'_>, envelope: &BoxEnvelope) -> Result<Payload> {
    let cursor = parser.cursor();
    let major_brand = cursor.read_string(4)?;
    let minor_version = cursor.read_u32()?;
    let compatible_brands = cursor.read_string_list(envelope.payload_size().saturating_sub(8), 4)?;

    Ok(Payload::FileType(FtypBox {
        major_brand,
        minor_version,
        compatible_brands,
    }))
}

// hdlr: component type, handler type, manufacturer, flags, name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HdlrBox {
    pub version: u8,
    pub flags: u32,
    /// `mhlr`/`dhlr` in QuickTime files, zero bytes in ISO files.
    pub component_type: String,
    pub handler_type: String,
    pub manufacturer: String,
    pub component_flags: u32,
    pub component_flags_mask: u32,
    pub name: String,
}

impl HdlrBox {
    pub fn is_video(&self) -> bool {
        self.handler_type == "vide"
    }

    pub fn is_audio(&self) -> bool {
        self.handler_type == "soun"
    }
}

pub fn decode_hdlr(parser: &mut BoxParser<'_>, envelope: &BoxEnvelope) -> Result<Payload> {
    let (version, flags) = read_full_header(parser)?;
    let cursor = parser.cursor();
    let component_type = cursor.read_string(4)?;
    let handler_type = cursor.read_string(4)?;
    let manufacturer = cursor.read_string(4)?;
    let component_flags = cursor.read_hex(4)? as u32;
    let component_flags_mask = cursor.read_hex(4)? as u32;

    let remaining = parser.remaining(envelope);
    let raw_name = parser.cursor().read_string(remaining)?;

    Ok(Payload::Handler(HdlrBox {
        version,
        flags,
        component_type,
        handler_type,
        manufacturer,
        component_flags,
        component_flags_mask,
        name: trim_nul(&raw_name).to_string(),
    }))
}

// chap: track ids of the chapter tracks
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChapBox {
    pub track_ids: Vec<u32>,
}

pub fn decode_chap(parser: &mut BoxParser<'_>, envelope: &BoxEnvelope) -> Result<Payload> {
    let remaining = parser.remaining(envelope);
    let track_ids = parser.cursor().read_u32_list(remaining)?;
    Ok(Payload::ChapterList(ChapBox { track_ids }))
}
