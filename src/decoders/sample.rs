//! `stsd` and the sample entries it holds.

use super::{read_full_header, Dac3Box, EsdsBox, ObjectType, StreamType};
use crate::boxes::{Mp4Box, Payload};
use crate::envelope::BoxEnvelope;
use crate::error::Result;
use crate::parser::BoxParser;
use crate::util::trim_nul;
use serde::Serialize;

/// Compressor name length field plus its padded text.
const COMPRESSOR_NAME_FIELD: u64 = 31;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StsdBox {
    pub version: u8,
    pub flags: u32,
    pub entry_count: u32,
    pub children: Vec<Mp4Box>,
}

impl StsdBox {
    pub fn video(&self) -> Option<&VideoSampleEntry> {
        self.children.iter().find_map(|c| c.payload.as_video_entry())
    }

    pub fn audio(&self) -> Option<&AudioSampleEntry> {
        self.children.iter().find_map(|c| c.payload.as_audio_entry())
    }

    pub fn text(&self) -> Option<&TextSampleEntry> {
        self.children.iter().find_map(|c| c.payload.as_text_entry())
    }

    /// Tag of the first entry, e.g. `avc1` or `mp4a`.
    pub fn codec(&self) -> Option<String> {
        self.children.first().map(|c| c.tag().to_string())
    }
}

pub fn decode_stsd(parser: &mut BoxParser<'_>, envelope: &BoxEnvelope) -> Result<Payload> {
    let (version, flags) = read_full_header(parser)?;
    let entry_count = parser.cursor().read_u32()?;

    let mut children = Vec::new();
    for _ in 0..entry_count {
        match parser.next_child(envelope)? {
            Some(entry) => children.push(entry),
            None => break,
        }
    }

    Ok(Payload::SampleDescription(StsdBox {
        version,
        flags,
        entry_count,
        children,
    }))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VideoSampleEntry {
    pub data_reference_index: u16,
    pub encoding_version: u16,
    pub encoding_revision: u16,
    pub encoding_vendor: String,
    pub temporal_quality: u32,
    pub spatial_quality: u32,
    pub width: u16,
    pub height: u16,
    pub horizontal_dpi: f32,
    pub vertical_dpi: f32,
    pub data_size: i32,
    pub frame_count: u16,
    pub compressor_name: String,
    pub depth: u16,
    pub colour_table_id: i16,
    /// `avcC`, `pasp`, `btrt` and friends.
    pub children: Vec<Mp4Box>,
}

impl VideoSampleEntry {
    pub fn is_h264(&self) -> bool {
        self.compressor_name == "JVT/AVC Coding"
    }
}

pub fn decode_video_entry(parser: &mut BoxParser<'_>, envelope: &BoxEnvelope) -> Result<Payload> {
    let c = parser.cursor();
    c.skip(6)?;
    let data_reference_index = c.read_u16()?;
    let encoding_version = c.read_hex(2)? as u16;
    let encoding_revision = c.read_hex(2)? as u16;
    let encoding_vendor = c.read_string(4)?;
    let temporal_quality = c.read_u32()?;
    let spatial_quality = c.read_u32()?;
    let width = c.read_u16()?;
    let height = c.read_u16()?;
    let horizontal_dpi = c.read_float()?;
    let vertical_dpi = c.read_float()?;
    let data_size = c.read_i32()?;
    let frame_count = c.read_u16()?;

    let name_length = (c.read_u8()? as u64).min(COMPRESSOR_NAME_FIELD);
    let compressor_name = trim_nul(&c.read_string(name_length)?).to_string();
    c.skip(COMPRESSOR_NAME_FIELD - name_length)?;

    let depth = c.read_u16()?;
    let colour_table_id = c.read_i16()?;
    let children = parser.children(envelope)?;

    Ok(Payload::VideoEntry(VideoSampleEntry {
        data_reference_index,
        encoding_version,
        encoding_revision,
        encoding_vendor,
        temporal_quality,
        spatial_quality,
        width,
        height,
        horizontal_dpi,
        vertical_dpi,
        data_size,
        frame_count,
        compressor_name,
        depth,
        colour_table_id,
        children,
    }))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AudioSampleEntry {
    pub data_reference_index: u16,
    pub encoding_version: u16,
    pub encoding_revision: u16,
    pub encoding_vendor: String,
    pub channel_count: u16,
    pub sample_size: u16,
    pub compression_id: i16,
    pub packet_size: i16,
    /// Integer part of the 16.16 rate, in Hz.
    pub sample_rate: u32,
    /// `esds`, `m4ds` or `dac3`.
    pub children: Vec<Mp4Box>,
}

impl AudioSampleEntry {
    pub fn esds(&self) -> Option<&EsdsBox> {
        self.children
            .iter()
            .find_map(|c| c.payload.as_elementary_stream())
    }

    pub fn ac3(&self) -> Option<&Dac3Box> {
        self.children.iter().find_map(|c| c.payload.as_ac3_specific())
    }

    /// Channel count, with `.1` added for an AC-3 LFE channel.
    pub fn channels(&self) -> f64 {
        match self.ac3() {
            Some(dac3) => dac3.channels(),
            None => self.channel_count as f64,
        }
    }

    pub fn sample_rate_hz(&self) -> u32 {
        self.ac3()
            .and_then(|d| d.sample_rate().hz())
            .unwrap_or(self.sample_rate)
    }

    /// Average bit rate in bit/s, 0 when neither descriptor gives one.
    pub fn average_bit_rate(&self) -> u32 {
        if let Some(dac3) = self.ac3() {
            return dac3.bit_rate().bits_per_second().unwrap_or(0);
        }
        self.esds().map(|e| e.average_bit_rate).unwrap_or(0)
    }

    pub fn object_type(&self) -> ObjectType {
        if self.ac3().is_some() {
            return ObjectType::Ac3;
        }
        self.esds()
            .map(EsdsBox::object_type)
            .unwrap_or(ObjectType::Unknown)
    }

    pub fn stream_type(&self) -> StreamType {
        if self.ac3().is_some() {
            return StreamType::Audio;
        }
        self.esds()
            .map(EsdsBox::stream_type)
            .unwrap_or(StreamType::Unknown)
    }
}

pub fn decode_audio_entry(parser: &mut BoxParser<'_>, envelope: &BoxEnvelope) -> Result<Payload> {
    let c = parser.cursor();
    c.skip(6)?;
    let data_reference_index = c.read_u16()?;
    let encoding_version = c.read_hex(2)? as u16;
    let encoding_revision = c.read_hex(2)? as u16;
    let encoding_vendor = c.read_string(4)?;
    let channel_count = c.read_u16()?;
    let sample_size = c.read_u16()?;
    let compression_id = c.read_i16()?;
    let packet_size = c.read_i16()?;
    let sample_rate = c.read_u32()? >> 16;

    // QuickTime sound description v1/v2 extensions sit before the child boxes.
    let extension = match encoding_version {
        1 => 16,
        2 => 36,
        _ => 0,
    };
    if extension > 0 && parser.remaining(envelope) >= extension {
        parser.cursor().skip(extension)?;
    }
    let children = parser.children(envelope)?;

    Ok(Payload::AudioEntry(AudioSampleEntry {
        data_reference_index,
        encoding_version,
        encoding_revision,
        encoding_vendor,
        channel_count,
        sample_size,
        compression_id,
        packet_size,
        sample_rate,
        children,
    }))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TextSampleEntry {
    pub data_reference_index: u16,
}

pub fn decode_text_entry(parser: &mut BoxParser<'_>, _envelope: &BoxEnvelope) -> Result<Payload> {
    let c = parser.cursor();
    c.skip(6)?;
    let data_reference_index = c.read_u16()?;
    Ok(Payload::TextEntry(TextSampleEntry {
        data_reference_index,
    }))
}
