//! Boxes whose payload is a run of child boxes, with typed accessors for the
//! children the rest of the crate cares about.

use super::{
    read_full_header, AudioSampleEntry, ChapBox, Co64Box, CttsBox, HdlrBox, IlstBox, IodsBox,
    MdhdBox, MvhdBox, StcoBox, StscBox, StsdBox, StssBox, StszBox, SttsBox, TextSampleEntry,
    TkhdBox, VideoSampleEntry,
};
use crate::boxes::{Mp4Box, Payload};
use crate::envelope::BoxEnvelope;
use crate::error::Result;
use crate::known_boxes::BoxType;
use crate::parser::BoxParser;
use serde::Serialize;

fn first<'a, T: 'a>(
    children: &'a [Mp4Box],
    pick: impl Fn(&'a Payload) -> Option<&'a T>,
) -> Option<&'a T> {
    children.iter().find_map(|c| pick(&c.payload))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackKind {
    Video,
    Audio,
    Text,
    Unknown,
}

impl TrackKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrackKind::Video => "video",
            TrackKind::Audio => "audio",
            TrackKind::Text => "text",
            TrackKind::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoovBox {
    pub children: Vec<Mp4Box>,
}

impl MoovBox {
    pub fn header(&self) -> Option<&MvhdBox> {
        first(&self.children, Payload::as_movie_header)
    }

    pub fn object_descriptor(&self) -> Option<&IodsBox> {
        first(&self.children, Payload::as_initial_object_descriptor)
    }

    pub fn tracks(&self) -> impl Iterator<Item = &TrakBox> {
        self.children.iter().filter_map(|c| c.payload.as_track())
    }

    pub fn user_data(&self) -> Option<&UdtaBox> {
        first(&self.children, Payload::as_user_data)
    }

    /// iTunes items under `udta/meta/ilst`.
    pub fn item_list(&self) -> Option<&IlstBox> {
        self.user_data().and_then(UdtaBox::item_list)
    }
}

pub fn decode_moov(parser: &mut BoxParser<'_>, envelope: &BoxEnvelope) -> Result<Payload> {
    let children = parser.children(envelope)?;
    Ok(Payload::Movie(MoovBox { children }))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrakBox {
    pub children: Vec<Mp4Box>,
}

impl TrakBox {
    pub fn header(&self) -> Option<&TkhdBox> {
        first(&self.children, Payload::as_track_header)
    }

    pub fn media(&self) -> Option<&MdiaBox> {
        first(&self.children, Payload::as_media)
    }

    pub fn reference(&self) -> Option<&TrefBox> {
        first(&self.children, Payload::as_track_reference)
    }

    pub fn user_data(&self) -> Option<&UdtaBox> {
        first(&self.children, Payload::as_user_data)
    }

    pub fn track_id(&self) -> u32 {
        self.header().map(|h| h.track_id).unwrap_or(0)
    }

    /// Track title from `udta/name`.
    pub fn name(&self) -> Option<&str> {
        self.user_data().and_then(UdtaBox::name)
    }

    pub fn sample_table(&self) -> Option<&StblBox> {
        self.media()
            .and_then(MdiaBox::information)
            .and_then(MinfBox::sample_table)
    }

    pub fn sample_description(&self) -> Option<&StsdBox> {
        self.sample_table().and_then(StblBox::description)
    }

    pub fn kind(&self) -> TrackKind {
        match self.sample_description() {
            Some(d) if d.video().is_some() => TrackKind::Video,
            Some(d) if d.audio().is_some() => TrackKind::Audio,
            Some(d) if d.text().is_some() => TrackKind::Text,
            _ => TrackKind::Unknown,
        }
    }
}

pub fn decode_trak(parser: &mut BoxParser<'_>, envelope: &BoxEnvelope) -> Result<Payload> {
    let children = parser.children(envelope)?;
    Ok(Payload::Track(TrakBox { children }))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrefBox {
    pub children: Vec<Mp4Box>,
}

impl TrefBox {
    pub fn chapters(&self) -> Option<&ChapBox> {
        first(&self.children, Payload::as_chapter_list)
    }
}

pub fn decode_tref(parser: &mut BoxParser<'_>, envelope: &BoxEnvelope) -> Result<Payload> {
    let children = parser.children(envelope)?;
    Ok(Payload::TrackReference(TrefBox { children }))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MdiaBox {
    pub children: Vec<Mp4Box>,
}

impl MdiaBox {
    pub fn header(&self) -> Option<&MdhdBox> {
        first(&self.children, Payload::as_media_header)
    }

    pub fn handler(&self) -> Option<&HdlrBox> {
        first(&self.children, Payload::as_handler)
    }

    pub fn information(&self) -> Option<&MinfBox> {
        first(&self.children, Payload::as_media_information)
    }
}

pub fn decode_mdia(parser: &mut BoxParser<'_>, envelope: &BoxEnvelope) -> Result<Payload> {
    let children = parser.children(envelope)?;
    Ok(Payload::Media(MdiaBox { children }))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MinfBox {
    pub children: Vec<Mp4Box>,
}

impl MinfBox {
    pub fn data_information(&self) -> Option<&DinfBox> {
        first(&self.children, Payload::as_data_information)
    }

    pub fn sample_table(&self) -> Option<&StblBox> {
        first(&self.children, Payload::as_sample_table)
    }
}

pub fn decode_minf(parser: &mut BoxParser<'_>, envelope: &BoxEnvelope) -> Result<Payload> {
    let children = parser.children(envelope)?;
    Ok(Payload::MediaInformation(MinfBox { children }))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DinfBox {
    pub children: Vec<Mp4Box>,
}

impl DinfBox {
    pub fn reference(&self) -> Option<&DrefBox> {
        first(&self.children, Payload::as_data_reference)
    }
}

pub fn decode_dinf(parser: &mut BoxParser<'_>, envelope: &BoxEnvelope) -> Result<Payload> {
    let children = parser.children(envelope)?;
    Ok(Payload::DataInformation(DinfBox { children }))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrefBox {
    pub version: u8,
    pub flags: u32,
    pub entry_count: u32,
    pub children: Vec<Mp4Box>,
}

pub fn decode_dref(parser: &mut BoxParser<'_>, envelope: &BoxEnvelope) -> Result<Payload> {
    let (version, flags) = read_full_header(parser)?;
    let entry_count = parser.cursor().read_u32()?;
    let children = parser.children(envelope)?;
    Ok(Payload::DataReference(DrefBox {
        version,
        flags,
        entry_count,
        children,
    }))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StblBox {
    pub children: Vec<Mp4Box>,
}

impl StblBox {
    pub fn description(&self) -> Option<&StsdBox> {
        first(&self.children, Payload::as_sample_description)
    }

    pub fn time_to_sample(&self) -> Option<&SttsBox> {
        first(&self.children, Payload::as_time_to_sample)
    }

    pub fn sample_to_chunk(&self) -> Option<&StscBox> {
        first(&self.children, Payload::as_sample_to_chunk)
    }

    pub fn sample_size(&self) -> Option<&StszBox> {
        first(&self.children, Payload::as_sample_size)
    }

    pub fn chunk_offsets(&self) -> Option<&StcoBox> {
        first(&self.children, Payload::as_chunk_offset)
    }

    pub fn chunk_offsets64(&self) -> Option<&Co64Box> {
        first(&self.children, Payload::as_chunk_offset64)
    }

    pub fn sync_samples(&self) -> Option<&StssBox> {
        first(&self.children, Payload::as_sync_sample)
    }

    pub fn composition_offsets(&self) -> Option<&CttsBox> {
        first(&self.children, Payload::as_composition_offset)
    }

    pub fn video_entry(&self) -> Option<&VideoSampleEntry> {
        self.description().and_then(StsdBox::video)
    }

    pub fn audio_entry(&self) -> Option<&AudioSampleEntry> {
        self.description().and_then(StsdBox::audio)
    }

    pub fn text_entry(&self) -> Option<&TextSampleEntry> {
        self.description().and_then(StsdBox::text)
    }

    /// Sum of all sample sizes, 0 without an `stsz` box.
    pub fn total_sample_bytes(&self) -> u64 {
        self.sample_size().map(|s| s.total_size).unwrap_or(0)
    }
}

pub fn decode_stbl(parser: &mut BoxParser<'_>, envelope: &BoxEnvelope) -> Result<Payload> {
    let children = parser.children(envelope)?;
    Ok(Payload::SampleTable(StblBox { children }))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UdtaBox {
    pub children: Vec<Mp4Box>,
}

impl UdtaBox {
    pub fn meta(&self) -> Option<&MetaBox> {
        first(&self.children, Payload::as_meta)
    }

    pub fn item_list(&self) -> Option<&IlstBox> {
        self.meta().and_then(MetaBox::item_list)
    }

    /// Text of a `name` child.
    pub fn name(&self) -> Option<&str> {
        self.children
            .iter()
            .filter(|c| c.box_type() == Some(BoxType::AdditionalName))
            .find_map(|c| c.payload.as_additional_info())
            .map(|i| i.text.as_str())
    }
}

pub fn decode_udta(parser: &mut BoxParser<'_>, envelope: &BoxEnvelope) -> Result<Payload> {
    let children = parser.children(envelope)?;
    Ok(Payload::UserData(UdtaBox { children }))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetaBox {
    pub version: u8,
    pub flags: u32,
    pub children: Vec<Mp4Box>,
}

impl MetaBox {
    pub fn handler(&self) -> Option<&HdlrBox> {
        first(&self.children, Payload::as_handler)
    }

    pub fn item_list(&self) -> Option<&IlstBox> {
        first(&self.children, Payload::as_item_list)
    }
}

pub fn decode_meta(parser: &mut BoxParser<'_>, envelope: &BoxEnvelope) -> Result<Payload> {
    let (version, flags) = read_full_header(parser)?;
    let children = parser.children(envelope)?;
    Ok(Payload::Meta(MetaBox {
        version,
        flags,
        children,
    }))
}
