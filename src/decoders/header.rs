//! Movie, track and media headers.
//!
//! Some encoders write 64-bit times under version 0, so the field widths
//! follow the payload size first and the version byte second.

use super::read_full_header;
use crate::boxes::Payload;
use crate::cursor::ByteCursor;
use crate::envelope::BoxEnvelope;
use crate::error::Result;
use crate::parser::BoxParser;
use crate::util::{date_from_mac_seconds, lang_from_u16};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Payload sizes that select 64-bit timestamps and duration for one header
/// family.
#[derive(Debug, Clone, Copy)]
pub struct WidthRule {
    pub wide_timestamps_from: u64,
    pub wide_duration_at: &'static [u64],
}

impl WidthRule {
    pub fn wide_timestamps(&self, version: u8, payload_size: u64) -> bool {
        version == 1 || payload_size >= self.wide_timestamps_from
    }

    pub fn wide_duration(&self, version: u8, payload_size: u64) -> bool {
        version == 1 || self.wide_duration_at.contains(&payload_size)
    }
}

pub const MOVIE_HEADER_WIDTHS: WidthRule = WidthRule {
    wide_timestamps_from: 108,
    wide_duration_at: &[104, 108, 112],
};

pub const TRACK_HEADER_WIDTHS: WidthRule = WidthRule {
    wide_timestamps_from: 92,
    wide_duration_at: &[88, 92, 96],
};

pub const MEDIA_HEADER_WIDTHS: WidthRule = MOVIE_HEADER_WIDTHS;

fn read_time(cursor: &mut ByteCursor<'_>, wide: bool) -> Result<u64> {
    if wide {
        cursor.read_u64()
    } else {
        Ok(cursor.read_u32()? as u64)
    }
}

/// 3x3 transformation matrix, every cell read as 16.16 fixed point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Matrix {
    pub width_scale: f32,
    pub width_rotate: f32,
    pub width_angle: f32,
    pub height_rotate: f32,
    pub height_scale: f32,
    pub height_angle: f32,
    pub position_left: f32,
    pub position_top: f32,
    pub divider_scale: f32,
}

impl Matrix {
    pub const SIZE: u64 = 36;

    fn read(cursor: &mut ByteCursor<'_>) -> Result<Self> {
        Ok(Self {
            width_scale: cursor.read_float()?,
            width_rotate: cursor.read_float()?,
            width_angle: cursor.read_float()?,
            height_rotate: cursor.read_float()?,
            height_scale: cursor.read_float()?,
            height_angle: cursor.read_float()?,
            position_left: cursor.read_float()?,
            position_top: cursor.read_float()?,
            divider_scale: cursor.read_float()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MvhdBox {
    pub version: u8,
    pub flags: u32,
    pub creation_time: u64,
    pub modification_time: u64,
    pub timescale: u32,
    pub duration: u64,
    /// Absent when the payload ends right after the duration.
    pub presentation: Option<MoviePresentation>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoviePresentation {
    pub playback_speed: f32,
    pub user_volume: f32,
    pub matrix: Matrix,
    pub preview_start: u32,
    pub preview_length: u32,
    pub poster_time: u32,
    pub selection_start: u32,
    pub selection_length: u32,
    pub current_time: u32,
    pub next_track_id: i32,
}

impl MoviePresentation {
    const SIZE: u64 = 4 + 2 + 10 + Matrix::SIZE + 24 + 4;

    fn read(cursor: &mut ByteCursor<'_>) -> Result<Self> {
        let playback_speed = cursor.read_float()?;
        let user_volume = cursor.read_short_float()?;
        cursor.skip(10)?;
        Ok(Self {
            playback_speed,
            user_volume,
            matrix: Matrix::read(cursor)?,
            preview_start: cursor.read_u32()?,
            preview_length: cursor.read_u32()?,
            poster_time: cursor.read_u32()?,
            selection_start: cursor.read_u32()?,
            selection_length: cursor.read_u32()?,
            current_time: cursor.read_u32()?,
            next_track_id: cursor.read_i32()?,
        })
    }
}

impl MvhdBox {
    pub fn creation_date(&self) -> Option<DateTime<Utc>> {
        date_from_mac_seconds(self.creation_time)
    }

    pub fn modification_date(&self) -> Option<DateTime<Utc>> {
        date_from_mac_seconds(self.modification_time)
    }

    /// Duration in seconds, `None` for a zero timescale.
    pub fn duration_seconds(&self) -> Option<f64> {
        (self.timescale != 0).then(|| self.duration as f64 / self.timescale as f64)
    }
}

pub fn decode_mvhd(parser: &mut BoxParser<'_>, envelope: &BoxEnvelope) -> Result<Payload> {
    let payload_size = envelope.payload_size();
    let (version, flags) = read_full_header(parser)?;
    let wide_times = MOVIE_HEADER_WIDTHS.wide_timestamps(version, payload_size);
    let wide_duration = MOVIE_HEADER_WIDTHS.wide_duration(version, payload_size);

    let cursor = parser.cursor();
    let creation_time = read_time(cursor, wide_times)?;
    let modification_time = read_time(cursor, wide_times)?;
    let timescale = cursor.read_u32()?;
    let duration = read_time(cursor, wide_duration)?;

    let presentation = if parser.remaining(envelope) >= MoviePresentation::SIZE {
        Some(MoviePresentation::read(parser.cursor())?)
    } else {
        None
    };

    Ok(Payload::MovieHeader(MvhdBox {
        version,
        flags,
        creation_time,
        modification_time,
        timescale,
        duration,
        presentation,
    }))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TkhdBox {
    pub version: u8,
    pub flags: u32,
    pub creation_time: u64,
    pub modification_time: u64,
    pub track_id: u32,
    pub duration: u64,
    pub presentation: Option<TrackPresentation>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackPresentation {
    pub layer: i16,
    pub alternate_group: i16,
    pub volume: f32,
    pub matrix: Matrix,
    pub width: f32,
    pub height: f32,
}

impl TrackPresentation {
    const SIZE: u64 = 2 + 2 + 2 + 2 + Matrix::SIZE + 8;

    fn read(cursor: &mut ByteCursor<'_>) -> Result<Self> {
        let layer = cursor.read_i16()?;
        let alternate_group = cursor.read_i16()?;
        let volume = cursor.read_short_float()?;
        cursor.skip(2)?;
        Ok(Self {
            layer,
            alternate_group,
            volume,
            matrix: Matrix::read(cursor)?,
            width: cursor.read_float()?,
            height: cursor.read_float()?,
        })
    }
}

impl TkhdBox {
    pub fn creation_date(&self) -> Option<DateTime<Utc>> {
        date_from_mac_seconds(self.creation_time)
    }

    pub fn modification_date(&self) -> Option<DateTime<Utc>> {
        date_from_mac_seconds(self.modification_time)
    }

    /// Presentation size in whole pixels, `(0, 0)` when absent.
    pub fn frame_size(&self) -> (u32, u32) {
        self.presentation
            .as_ref()
            .map(|p| (p.width as u32, p.height as u32))
            .unwrap_or((0, 0))
    }

    pub fn is_enabled(&self) -> bool {
        self.flags & 0x1 != 0
    }
}

pub fn decode_tkhd(parser: &mut BoxParser<'_>, envelope: &BoxEnvelope) -> Result<Payload> {
    let payload_size = envelope.payload_size();
    let (version, flags) = read_full_header(parser)?;
    let wide_times = TRACK_HEADER_WIDTHS.wide_timestamps(version, payload_size);
    let wide_duration = TRACK_HEADER_WIDTHS.wide_duration(version, payload_size);

    let cursor = parser.cursor();
    let creation_time = read_time(cursor, wide_times)?;
    let modification_time = read_time(cursor, wide_times)?;
    let track_id = cursor.read_u32()?;
    cursor.skip(4)?;
    let duration = read_time(cursor, wide_duration)?;

    let presentation = if parser.remaining(envelope) >= 8 + TrackPresentation::SIZE {
        let cursor = parser.cursor();
        cursor.skip(8)?;
        Some(TrackPresentation::read(cursor)?)
    } else {
        None
    };

    Ok(Payload::TrackHeader(TkhdBox {
        version,
        flags,
        creation_time,
        modification_time,
        track_id,
        duration,
        presentation,
    }))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MdhdBox {
    pub version: u8,
    pub flags: u32,
    pub creation_time: u64,
    pub modification_time: u64,
    pub timescale: u32,
    pub duration: u64,
    pub language: String,
    pub quality: i16,
}

impl MdhdBox {
    pub fn creation_date(&self) -> Option<DateTime<Utc>> {
        date_from_mac_seconds(self.creation_time)
    }

    pub fn modification_date(&self) -> Option<DateTime<Utc>> {
        date_from_mac_seconds(self.modification_time)
    }
}

pub fn decode_mdhd(parser: &mut BoxParser<'_>, envelope: &BoxEnvelope) -> Result<Payload> {
    let payload_size = envelope.payload_size();
    let (version, flags) = read_full_header(parser)?;
    let wide_times = MEDIA_HEADER_WIDTHS.wide_timestamps(version, payload_size);
    let wide_duration = MEDIA_HEADER_WIDTHS.wide_duration(version, payload_size);

    let cursor = parser.cursor();
    let creation_time = read_time(cursor, wide_times)?;
    let modification_time = read_time(cursor, wide_times)?;
    let timescale = cursor.read_u32()?;
    let duration = read_time(cursor, wide_duration)?;

    let (language, quality) = if parser.remaining(envelope) >= 4 {
        let cursor = parser.cursor();
        (lang_from_u16(cursor.read_u16()?), cursor.read_i16()?)
    } else {
        ("und".to_string(), 0)
    };

    Ok(Payload::MediaHeader(MdhdBox {
        version,
        flags,
        creation_time,
        modification_time,
        timescale,
        duration,
        language,
        quality,
    }))
}
