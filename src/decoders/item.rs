//! iTunes-style item atoms under `ilst`.

use super::read_full_header;
use crate::boxes::{Mp4Box, Payload};
use crate::envelope::BoxEnvelope;
use crate::error::{ParseError, Result};
use crate::known_boxes::BoxType;
use crate::parser::BoxParser;
use crate::util::{serialize_hex, serialize_hex_opt};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IlstBox {
    pub children: Vec<Mp4Box>,
}

impl IlstBox {
    pub fn items(&self) -> impl Iterator<Item = &ItemBox> {
        self.children.iter().filter_map(|c| c.payload.as_item())
    }

    /// First item whose effective key matches `key`.
    pub fn item(&self, key: &str) -> Option<&ItemBox> {
        self.items().find(|i| i.key == key)
    }
}

pub fn decode_ilst(parser: &mut BoxParser<'_>, envelope: &BoxEnvelope) -> Result<Payload> {
    let children = parser.children(envelope)?;
    Ok(Payload::ItemList(IlstBox { children }))
}

/// One item atom. For `----` items the key comes from the `name` atom
/// following `mean`, otherwise it is the item's own tag.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemBox {
    pub key: String,
    pub key_type: Option<BoxType>,
    #[serde(serialize_with = "serialize_hex_opt")]
    pub data: Option<Vec<u8>>,
    pub children: Vec<Mp4Box>,
}

impl ItemBox {
    pub fn text(&self) -> Option<String> {
        self.data
            .as_ref()
            .map(|d| String::from_utf8_lossy(d).into_owned())
    }
}

pub fn decode_item(parser: &mut BoxParser<'_>, envelope: &BoxEnvelope) -> Result<Payload> {
    let mut item = ItemBox {
        key: envelope.name(),
        key_type: envelope.box_type,
        data: None,
        children: Vec::new(),
    };

    if let Some(first) = parser.next_child(envelope)? {
        let freeform = envelope.box_type == Some(BoxType::ItemFreeform)
            && first.payload.as_additional_info().is_some();
        if freeform {
            item.children.push(first);
            read_freeform_pair(parser, envelope, &mut item)?;
        } else {
            item.data = match &first.payload {
                Payload::Data(d) => Some(d.data.clone()),
                Payload::AdditionalInfo(info) => Some(info.text.as_bytes().to_vec()),
                _ => None,
            };
            item.children.push(first);
        }
    }
    item.children.extend(parser.children(envelope)?);

    Ok(Payload::Item(item))
}

/// After `mean`, a `----` item holds `name` (the key) then `data` (the value).
fn read_freeform_pair(
    parser: &mut BoxParser<'_>,
    envelope: &BoxEnvelope,
    item: &mut ItemBox,
) -> Result<()> {
    let name = parser.next_child(envelope)?;
    let value = parser.next_child(envelope)?;
    let (Some(name), Some(value)) = (name, value) else {
        return Err(ParseError::malformed(
            envelope.tag.to_string(),
            "freeform item without name and data atoms",
        ));
    };

    match (&name.payload, &value.payload) {
        (Payload::AdditionalInfo(info), Payload::Data(d)) => {
            item.key = info.key().to_string();
            item.key_type = name.box_type();
            item.data = Some(d.data.clone());
        }
        _ => {
            return Err(ParseError::malformed(
                envelope.tag.to_string(),
                "freeform item atoms out of order",
            ));
        }
    }
    item.children.push(name);
    item.children.push(value);
    Ok(())
}

/// `data` atom: type indicator in the flags, then locale, then the value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataBox {
    pub version: u8,
    pub flags: u32,
    pub locale: u32,
    #[serde(serialize_with = "serialize_hex")]
    pub data: Vec<u8>,
}

impl DataBox {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.data).into_owned()
    }
}

pub fn decode_data(parser: &mut BoxParser<'_>, envelope: &BoxEnvelope) -> Result<Payload> {
    let (version, flags) = read_full_header(parser)?;
    let locale = parser.cursor().read_u32()?;
    let remaining = parser.remaining(envelope);
    let data = parser.cursor().read_bytes(remaining)?;
    Ok(Payload::Data(DataBox {
        version,
        flags,
        locale,
        data,
    }))
}

/// `mean` or `name` atom.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdditionalInfoBox {
    pub text: String,
}

impl AdditionalInfoBox {
    /// Text without leading or trailing control characters and spaces.
    pub fn key(&self) -> &str {
        self.text.trim_matches(|c: char| c <= ' ')
    }
}

pub fn decode_additional_info(
    parser: &mut BoxParser<'_>,
    envelope: &BoxEnvelope,
) -> Result<Payload> {
    let remaining = parser.remaining(envelope);
    let text = parser.cursor().read_string(remaining)?;
    Ok(Payload::AdditionalInfo(AdditionalInfoBox { text }))
}
