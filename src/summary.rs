//! Flattened per-file record built from a decoded box tree.

use crate::boxes::Mp4Box;
use crate::decoders::{ObjectType, StreamType, TrackKind, TrakBox};
use crate::metadata::{ItemMetadata, PropertyListParser};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VideoSummary {
    pub width: u16,
    pub height: u16,
    /// Presentation size from the track header.
    pub frame_width: u32,
    pub frame_height: u32,
    pub horizontal_dpi: f32,
    pub vertical_dpi: f32,
    pub frame_count: u16,
    pub compressor_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AudioSummary {
    pub channels: f64,
    pub sample_size: u16,
    pub sample_rate: u32,
    pub average_bit_rate: u32,
    pub object_type: ObjectType,
    pub stream_type: StreamType,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackSummary {
    pub id: u32,
    pub name: Option<String>,
    pub kind: TrackKind,
    pub creation_date: Option<DateTime<Utc>>,
    pub modification_date: Option<DateTime<Utc>>,
    pub duration: u64,
    pub language: Option<String>,
    pub total_sample_bytes: u64,
    pub codec: Option<String>,
    pub video: Option<VideoSummary>,
    pub audio: Option<AudioSummary>,
}

impl TrackSummary {
    pub fn from_track(track: &TrakBox) -> Self {
        let header = track.header();
        let stbl = track.sample_table();
        let frame = header.map(|h| h.frame_size()).unwrap_or((0, 0));

        let video = stbl.and_then(|s| s.video_entry()).map(|v| VideoSummary {
            width: v.width,
            height: v.height,
            frame_width: frame.0,
            frame_height: frame.1,
            horizontal_dpi: v.horizontal_dpi,
            vertical_dpi: v.vertical_dpi,
            frame_count: v.frame_count,
            compressor_name: v.compressor_name.clone(),
        });
        let audio = stbl.and_then(|s| s.audio_entry()).map(|a| AudioSummary {
            channels: a.channels(),
            sample_size: a.sample_size,
            sample_rate: a.sample_rate_hz(),
            average_bit_rate: a.average_bit_rate(),
            object_type: a.object_type(),
            stream_type: a.stream_type(),
        });

        Self {
            id: track.track_id(),
            name: track.name().map(str::to_string),
            kind: track.kind(),
            creation_date: header.and_then(|h| h.creation_date()),
            modification_date: header.and_then(|h| h.modification_date()),
            duration: header.map(|h| h.duration).unwrap_or(0),
            language: track
                .media()
                .and_then(|m| m.header())
                .map(|h| h.language.clone()),
            total_sample_bytes: stbl.map(|s| s.total_sample_bytes()).unwrap_or(0),
            codec: track.sample_description().and_then(|d| d.codec()),
            video,
            audio,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mp4Summary {
    pub major_brand: Option<String>,
    pub creation_date: Option<DateTime<Utc>>,
    pub modification_date: Option<DateTime<Utc>>,
    pub timescale: u32,
    pub duration: u64,
    pub duration_seconds: Option<f64>,
    /// Ordered by track id, one entry per id.
    pub tracks: Vec<TrackSummary>,
    pub metadata: Option<ItemMetadata>,
}

impl Mp4Summary {
    pub fn from_boxes(boxes: &[Mp4Box], plist: Option<&dyn PropertyListParser>) -> Self {
        let major_brand = boxes
            .iter()
            .find_map(|b| b.payload.as_file_type())
            .map(|f| f.major_brand.clone());
        let moov = boxes.iter().find_map(|b| b.payload.as_movie());
        let header = moov.and_then(|m| m.header());

        let mut tracks = BTreeMap::new();
        for track in moov.into_iter().flat_map(|m| m.tracks()) {
            let summary = TrackSummary::from_track(track);
            if tracks.contains_key(&summary.id) {
                tracing::debug!(id = summary.id, "duplicate track id; keeping the first");
                continue;
            }
            tracks.insert(summary.id, summary);
        }

        Self {
            major_brand,
            creation_date: header.and_then(|h| h.creation_date()),
            modification_date: header.and_then(|h| h.modification_date()),
            timescale: header.map(|h| h.timescale).unwrap_or(0),
            duration: header.map(|h| h.duration).unwrap_or(0),
            duration_seconds: header.and_then(|h| h.duration_seconds()),
            tracks: tracks.into_values().collect(),
            metadata: moov
                .and_then(|m| m.item_list())
                .map(|ilst| ilst.metadata(plist)),
        }
    }
}
