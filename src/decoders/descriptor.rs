//! MPEG-4 descriptor boxes: `esds`/`m4ds` and `iods`.

use super::read_full_header;
use crate::boxes::Payload;
use crate::envelope::BoxEnvelope;
use crate::error::Result;
use crate::parser::BoxParser;
use crate::util::serialize_hex;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ObjectType {
    SystemV1,
    SystemV2,
    Mpeg4Video,
    AvcSps,
    AvcPps,
    Mpeg4Audio,
    Mpeg2SimpleVideo,
    Mpeg2MainVideo,
    Mpeg2SnrVideo,
    Mpeg2SpatialVideo,
    Mpeg2HighVideo,
    Mpeg2Video422,
    Mpeg4AdtsMain,
    Mpeg4AdtsLowComplexity,
    Mpeg4AdtsScalableSamplingRate,
    Mpeg2Adts,
    Mpeg1Video,
    Mpeg1Adts,
    JpegVideo,
    PrivateAudio,
    PrivateVideo,
    PcmLittleEndian,
    Vorbis,
    Ac3,
    Alaw,
    Mulaw,
    G723Adpcm,
    PcmBigEndian,
    Yv12,
    H264,
    H263,
    H261,
    Unknown,
}

impl ObjectType {
    pub fn from_id(id: u8) -> Self {
        match id {
            1 => Self::SystemV1,
            2 => Self::SystemV2,
            32 => Self::Mpeg4Video,
            33 => Self::AvcSps,
            34 => Self::AvcPps,
            64 => Self::Mpeg4Audio,
            96 => Self::Mpeg2SimpleVideo,
            97 => Self::Mpeg2MainVideo,
            98 => Self::Mpeg2SnrVideo,
            99 => Self::Mpeg2SpatialVideo,
            100 => Self::Mpeg2HighVideo,
            101 => Self::Mpeg2Video422,
            102 => Self::Mpeg4AdtsMain,
            103 => Self::Mpeg4AdtsLowComplexity,
            104 => Self::Mpeg4AdtsScalableSamplingRate,
            105 => Self::Mpeg2Adts,
            106 => Self::Mpeg1Video,
            107 => Self::Mpeg1Adts,
            108 => Self::JpegVideo,
            192 => Self::PrivateAudio,
            208 => Self::PrivateVideo,
            224 => Self::PcmLittleEndian,
            225 => Self::Vorbis,
            226 => Self::Ac3,
            227 => Self::Alaw,
            228 => Self::Mulaw,
            229 => Self::G723Adpcm,
            230 => Self::PcmBigEndian,
            240 => Self::Yv12,
            241 => Self::H264,
            242 => Self::H263,
            243 => Self::H261,
            _ => Self::Unknown,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::SystemV1 => "System V1",
            Self::SystemV2 => "System V2",
            Self::Mpeg4Video => "MPEG-4 Video",
            Self::AvcSps => "MPEG-4 AVC SPS",
            Self::AvcPps => "MPEG-4 AVC PPS",
            Self::Mpeg4Audio => "MPEG-4 Audio",
            Self::Mpeg2SimpleVideo => "MPEG-2 Simple Video",
            Self::Mpeg2MainVideo => "MPEG-2 Main Video",
            Self::Mpeg2SnrVideo => "MPEG-2 SNR Video",
            Self::Mpeg2SpatialVideo => "MPEG-2 Spatial Video",
            Self::Mpeg2HighVideo => "MPEG-2 High Video",
            Self::Mpeg2Video422 => "MPEG-2 4:2:2 Video",
            Self::Mpeg4AdtsMain => "MPEG-4 ADTS Main",
            Self::Mpeg4AdtsLowComplexity => "MPEG-4 ADTS Low Complexity",
            Self::Mpeg4AdtsScalableSamplingRate => "MPEG-4 ADTS Scalable Sampling Rate",
            Self::Mpeg2Adts => "MPEG-2 ADTS",
            Self::Mpeg1Video => "MPEG-1 Video",
            Self::Mpeg1Adts => "MPEG-1 ADTS",
            Self::JpegVideo => "JPEG Video",
            Self::PrivateAudio => "Private Audio",
            Self::PrivateVideo => "Private Video",
            Self::PcmLittleEndian => "16-bit PCM LE Audio",
            Self::Vorbis => "Vorbis Audio",
            Self::Ac3 => "Dolby V3 (AC3) Audio",
            Self::Alaw => "Alaw Audio",
            Self::Mulaw => "Mulaw Audio",
            Self::G723Adpcm => "G723 ADPCM Audio",
            Self::PcmBigEndian => "16-bit PCM BE Audio",
            Self::Yv12 => "YV12 Video",
            Self::H264 => "H264 Video",
            Self::H263 => "H263 Video",
            Self::H261 => "H261 Video",
            Self::Unknown => "Unknown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StreamType {
    ObjectDescriptor,
    ClockReference,
    SceneDescription,
    Visual,
    Audio,
    Mpeg7,
    Ipmp,
    Oci,
    MpegJava,
    UserPrivate,
    Unknown,
}

impl StreamType {
    pub fn from_id(id: u8) -> Self {
        match id {
            1 => Self::ObjectDescriptor,
            2 => Self::ClockReference,
            3 => Self::SceneDescription,
            4 => Self::Visual,
            5 => Self::Audio,
            6 => Self::Mpeg7,
            7 => Self::Ipmp,
            8 => Self::Oci,
            9 => Self::MpegJava,
            32 => Self::UserPrivate,
            _ => Self::Unknown,
        }
    }
}

/// Elementary stream descriptor with its decoder config, decoder-specific
/// info and SL config sub-descriptors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EsdsBox {
    pub version: u8,
    pub flags: u32,
    pub descriptor_tag: u8,
    pub extended_tag: u32,
    pub descriptor_length: u8,
    pub es_id: u16,
    pub stream_priority: u8,

    pub config_tag: u8,
    pub config_extended_tag: u32,
    pub config_length: u8,
    pub object_type_id: u8,
    pub stream_type_id: u8,
    pub upstream: bool,
    pub buffer_size: u32,
    pub max_bit_rate: u32,
    pub average_bit_rate: u32,

    pub specific_tag: u8,
    pub specific_extended_tag: u32,
    #[serde(serialize_with = "serialize_hex")]
    pub decoder_specific_info: Vec<u8>,

    pub sl_tag: u8,
    pub sl_extended_tag: u32,
    pub sl_length: u8,
    pub sl_value: u8,
}

impl EsdsBox {
    pub fn object_type(&self) -> ObjectType {
        ObjectType::from_id(self.object_type_id)
    }

    pub fn stream_type(&self) -> StreamType {
        StreamType::from_id(self.stream_type_id)
    }
}

pub fn decode_esds(parser: &mut BoxParser<'_>, _envelope: &BoxEnvelope) -> Result<Payload> {
    let (version, flags) = read_full_header(parser)?;
    let c = parser.cursor();

    let descriptor_tag = c.read_hex(1)? as u8;
    let extended_tag = c.read_hex(3)? as u32;
    let descriptor_length = c.read_u8()?;
    let es_id = c.read_u16()?;
    let stream_priority = c.read_u8()?;

    let config_tag = c.read_hex(1)? as u8;
    let config_extended_tag = c.read_hex(3)? as u32;
    let config_length = c.read_u8()?;
    let object_type_id = c.read_u8()?;
    let stream_byte = c.read_u8()?;
    let buffer_size = c.read_hex(3)? as u32;
    let max_bit_rate = c.read_u32()?;
    let average_bit_rate = c.read_u32()?;

    let specific_tag = c.read_hex(1)? as u8;
    let specific_extended_tag = c.read_hex(3)? as u32;
    let specific_length = c.read_u8()?;
    let decoder_specific_info = c.read_bytes(specific_length as u64)?;

    let sl_tag = c.read_hex(1)? as u8;
    let sl_extended_tag = c.read_hex(3)? as u32;
    let sl_length = c.read_u8()?;
    let sl_value = c.read_hex(1)? as u8;

    Ok(Payload::ElementaryStream(EsdsBox {
        version,
        flags,
        descriptor_tag,
        extended_tag,
        descriptor_length,
        es_id,
        stream_priority,
        config_tag,
        config_extended_tag,
        config_length,
        object_type_id,
        stream_type_id: stream_byte >> 2,
        upstream: (stream_byte >> 1) & 0x1 == 1,
        buffer_size,
        max_bit_rate,
        average_bit_rate,
        specific_tag,
        specific_extended_tag,
        decoder_specific_info,
        sl_tag,
        sl_extended_tag,
        sl_length,
        sl_value,
    }))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProfileLevels {
    pub descriptor_id: u16,
    pub object_descriptor: u8,
    pub scene: u8,
    pub audio: u8,
    pub video: u8,
    pub graphics: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IodsBox {
    pub version: u8,
    pub flags: u32,
    pub descriptor_tag: u8,
    pub extended_tag: u32,
    pub descriptor_length: u8,
    /// Present only for the 7-byte profile descriptor.
    pub profiles: Option<ProfileLevels>,
}

pub fn decode_iods(parser: &mut BoxParser<'_>, _envelope: &BoxEnvelope) -> Result<Payload> {
    let (version, flags) = read_full_header(parser)?;
    let c = parser.cursor();
    let descriptor_tag = c.read_hex(1)? as u8;
    let extended_tag = c.read_hex(3)? as u32;
    let descriptor_length = c.read_u8()?;

    let profiles = if descriptor_length == 7 {
        Some(ProfileLevels {
            descriptor_id: c.read_u16()?,
            object_descriptor: c.read_u8()?,
            scene: c.read_u8()?,
            audio: c.read_u8()?,
            video: c.read_u8()?,
            graphics: c.read_u8()?,
        })
    } else {
        None
    };

    Ok(Payload::InitialObjectDescriptor(IodsBox {
        version,
        flags,
        descriptor_tag,
        extended_tag,
        descriptor_length,
        profiles,
    }))
}
