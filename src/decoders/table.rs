//! Run-length sample tables from `stbl`.

use super::read_full_header;
use crate::boxes::Payload;
use crate::envelope::BoxEnvelope;
use crate::error::{ParseError, Result};
use crate::parser::BoxParser;
use serde::Serialize;

/// Reject entry counts that cannot fit in what is left of the box, before
/// reading a single record.
fn check_entries(
    parser: &BoxParser<'_>,
    envelope: &BoxEnvelope,
    count: u32,
    record_size: u64,
) -> Result<()> {
    let needed = count as u64 * record_size;
    let remaining = parser.remaining(envelope);
    if needed > remaining {
        return Err(ParseError::malformed(
            envelope.tag.to_string(),
            format!("{count} entries need {needed} bytes but only {remaining} remain"),
        ));
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SttsEntry {
    pub sample_count: u32,
    pub sample_delta: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SttsBox {
    pub version: u8,
    pub flags: u32,
    pub entry_count: u32,
    pub entries: Vec<SttsEntry>,
}

impl SttsBox {
    /// More than one run means sample durations vary.
    pub fn is_variable(&self) -> bool {
        self.entry_count > 1
    }

    pub fn total_samples(&self) -> u64 {
        self.entries
            .iter()
            .fold(0u64, |acc, e| acc.saturating_add(e.sample_count as u64))
    }

    /// Saturates instead of wrapping on hostile counts.
    pub fn total_duration(&self) -> u64 {
        self.entries.iter().fold(0u64, |acc, e| {
            acc.saturating_add((e.sample_count as u64).saturating_mul(e.sample_delta as u64))
        })
    }
}

pub fn decode_stts(parser: &mut BoxParser<'_>, envelope: &BoxEnvelope) -> Result<Payload> {
    let (version, flags) = read_full_header(parser)?;
    let entry_count = parser.cursor().read_u32()?;
    check_entries(parser, envelope, entry_count, 8)?;

    let cursor = parser.cursor();
    let mut entries = Vec::with_capacity(entry_count as usize);
    for _ in 0..entry_count {
        entries.push(SttsEntry {
            sample_count: cursor.read_u32()?,
            sample_delta: cursor.read_u32()?,
        });
    }

    Ok(Payload::TimeToSample(SttsBox {
        version,
        flags,
        entry_count,
        entries,
    }))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StscEntry {
    pub first_chunk: u32,
    pub samples_per_chunk: u32,
    pub sample_description_index: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StscBox {
    pub version: u8,
    pub flags: u32,
    pub entry_count: u32,
    pub entries: Vec<StscEntry>,
}

pub fn decode_stsc(parser: &mut BoxParser<'_>, envelope: &BoxEnvelope) -> Result<Payload> {
    let (version, flags) = read_full_header(parser)?;
    let entry_count = parser.cursor().read_u32()?;
    check_entries(parser, envelope, entry_count, 12)?;

    let cursor = parser.cursor();
    let mut entries = Vec::with_capacity(entry_count as usize);
    for _ in 0..entry_count {
        entries.push(StscEntry {
            first_chunk: cursor.read_u32()?,
            samples_per_chunk: cursor.read_u32()?,
            sample_description_index: cursor.read_u32()?,
        });
    }

    Ok(Payload::SampleToChunk(StscBox {
        version,
        flags,
        entry_count,
        entries,
    }))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StszBox {
    pub version: u8,
    pub flags: u32,
    /// Shared size of every sample, 0 when sizes are listed individually.
    pub sample_size: u32,
    pub sample_count: u32,
    /// Empty when `sample_size` is non-zero.
    pub sample_sizes: Vec<u32>,
    pub total_size: u64,
}

impl StszBox {
    pub fn size_of(&self, sample_index: usize) -> Option<u32> {
        if self.sample_size != 0 {
            (sample_index < self.sample_count as usize).then_some(self.sample_size)
        } else {
            self.sample_sizes.get(sample_index).copied()
        }
    }
}

pub fn decode_stsz(parser: &mut BoxParser<'_>, envelope: &BoxEnvelope) -> Result<Payload> {
    let (version, flags) = read_full_header(parser)?;
    let cursor = parser.cursor();
    let sample_size = cursor.read_u32()?;
    let sample_count = cursor.read_u32()?;

    let (sample_sizes, total_size) = if sample_size == 0 {
        check_entries(parser, envelope, sample_count, 4)?;
        let cursor = parser.cursor();
        let mut sizes = Vec::with_capacity(sample_count as usize);
        for _ in 0..sample_count {
            sizes.push(cursor.read_u32()?);
        }
        let total = sizes.iter().map(|&s| s as u64).sum();
        (sizes, total)
    } else {
        (Vec::new(), sample_size as u64 * sample_count as u64)
    };

    Ok(Payload::SampleSize(StszBox {
        version,
        flags,
        sample_size,
        sample_count,
        sample_sizes,
        total_size,
    }))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StcoBox {
    pub version: u8,
    pub flags: u32,
    pub entry_count: u32,
    pub chunk_offsets: Vec<u32>,
}

pub fn decode_stco(parser: &mut BoxParser<'_>, envelope: &BoxEnvelope) -> Result<Payload> {
    let (version, flags) = read_full_header(parser)?;
    let entry_count = parser.cursor().read_u32()?;
    check_entries(parser, envelope, entry_count, 4)?;

    let cursor = parser.cursor();
    let mut chunk_offsets = Vec::with_capacity(entry_count as usize);
    for _ in 0..entry_count {
        chunk_offsets.push(cursor.read_u32()?);
    }

    Ok(Payload::ChunkOffset(StcoBox {
        version,
        flags,
        entry_count,
        chunk_offsets,
    }))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Co64Box {
    pub version: u8,
    pub flags: u32,
    pub entry_count: u32,
    pub chunk_offsets: Vec<u64>,
}

pub fn decode_co64(parser: &mut BoxParser<'_>, envelope: &BoxEnvelope) -> Result<Payload> {
    let (version, flags) = read_full_header(parser)?;
    let entry_count = parser.cursor().read_u32()?;
    check_entries(parser, envelope, entry_count, 8)?;

    let cursor = parser.cursor();
    let mut chunk_offsets = Vec::with_capacity(entry_count as usize);
    for _ in 0..entry_count {
        chunk_offsets.push(cursor.read_u64()?);
    }

    Ok(Payload::ChunkOffset64(Co64Box {
        version,
        flags,
        entry_count,
        chunk_offsets,
    }))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StssBox {
    pub version: u8,
    pub flags: u32,
    pub entry_count: u32,
    /// 1-based numbers of the sync samples.
    pub sample_numbers: Vec<u32>,
}

pub fn decode_stss(parser: &mut BoxParser<'_>, envelope: &BoxEnvelope) -> Result<Payload> {
    let (version, flags) = read_full_header(parser)?;
    let entry_count = parser.cursor().read_u32()?;
    check_entries(parser, envelope, entry_count, 4)?;

    let cursor = parser.cursor();
    let mut sample_numbers = Vec::with_capacity(entry_count as usize);
    for _ in 0..entry_count {
        sample_numbers.push(cursor.read_u32()?);
    }

    Ok(Payload::SyncSample(StssBox {
        version,
        flags,
        entry_count,
        sample_numbers,
    }))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CttsEntry {
    pub sample_count: u32,
    /// Unsigned in version 0, signed in version 1.
    pub sample_offset: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CttsBox {
    pub version: u8,
    pub flags: u32,
    pub entry_count: u32,
    pub entries: Vec<CttsEntry>,
}

pub fn decode_ctts(parser: &mut BoxParser<'_>, envelope: &BoxEnvelope) -> Result<Payload> {
    let (version, flags) = read_full_header(parser)?;
    let entry_count = parser.cursor().read_u32()?;
    check_entries(parser, envelope, entry_count, 8)?;

    let cursor = parser.cursor();
    let mut entries = Vec::with_capacity(entry_count as usize);
    for _ in 0..entry_count {
        let sample_count = cursor.read_u32()?;
        let sample_offset = if version == 0 {
            cursor.read_u32()? as i64
        } else {
            cursor.read_i32()? as i64
        };
        entries.push(CttsEntry {
            sample_count,
            sample_offset,
        });
    }

    Ok(Payload::CompositionOffset(CttsBox {
        version,
        flags,
        entry_count,
        entries,
    }))
}
