use crate::boxes::Payload;
use crate::envelope::BoxEnvelope;
use crate::error::Result;
use crate::parser::BoxParser;
use serde::Serialize;

/// Full-range channels per audio coding mode.
const FULL_RANGE_CHANNELS: [u8; 8] = [1, 1, 2, 3, 3, 4, 4, 5];

/// Nominal bit rate in kbit/s per bit rate code.
const BIT_RATES_KBPS: [u32; 19] = [
    32, 40, 48, 56, 64, 80, 96, 112, 128, 160, 192, 224, 256, 320, 384, 448, 512, 576, 640,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Ac3SampleRate {
    Hz48000,
    Hz44100,
    Hz32000,
    Reserved,
}

impl Ac3SampleRate {
    pub fn from_code(code: u8) -> Self {
        match code {
            0 => Self::Hz48000,
            1 => Self::Hz44100,
            2 => Self::Hz32000,
            _ => Self::Reserved,
        }
    }

    pub fn hz(&self) -> Option<u32> {
        match self {
            Self::Hz48000 => Some(48_000),
            Self::Hz44100 => Some(44_100),
            Self::Hz32000 => Some(32_000),
            Self::Reserved => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Ac3BitRate {
    Kbps(u32),
    Unknown,
}

impl Ac3BitRate {
    pub fn from_code(code: u8) -> Self {
        BIT_RATES_KBPS
            .get(code as usize)
            .map_or(Self::Unknown, |&k| Self::Kbps(k))
    }

    pub fn bits_per_second(&self) -> Option<u32> {
        match self {
            Self::Kbps(k) => Some(k * 1000),
            Self::Unknown => None,
        }
    }
}

/// `dac3`: AC-3 stream parameters packed into one 24-bit word.
///
/// | bits  | field |
/// |-------|-------|
/// | 23-22 | sample rate code |
/// | 21-17 | bitstream id |
/// | 16-14 | bitstream mode |
/// | 13-11 | audio coding mode |
/// | 10    | LFE on |
/// | 9-5   | bit rate code |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Dac3Box {
    pub sample_rate_code: u8,
    pub bitstream_id: u8,
    pub bitstream_mode: u8,
    pub audio_coding_mode: u8,
    pub lfe: bool,
    pub bit_rate_code: u8,
}

impl Dac3Box {
    pub fn from_word(word: u32) -> Self {
        Self {
            sample_rate_code: ((word >> 22) & 0x3) as u8,
            bitstream_id: ((word >> 17) & 0x1F) as u8,
            bitstream_mode: ((word >> 14) & 0x7) as u8,
            audio_coding_mode: ((word >> 11) & 0x7) as u8,
            lfe: (word >> 10) & 0x1 == 1,
            bit_rate_code: ((word >> 5) & 0x1F) as u8,
        }
    }

    pub fn sample_rate(&self) -> Ac3SampleRate {
        Ac3SampleRate::from_code(self.sample_rate_code)
    }

    pub fn bit_rate(&self) -> Ac3BitRate {
        Ac3BitRate::from_code(self.bit_rate_code)
    }

    /// Channel count in the usual `5.1` notation.
    pub fn channels(&self) -> f64 {
        let full = FULL_RANGE_CHANNELS[(self.audio_coding_mode & 0x7) as usize] as f64;
        if self.lfe { full + 0.1 } else { full }
    }
}

pub fn decode_dac3(parser: &mut BoxParser<'_>, _envelope: &BoxEnvelope) -> Result<Payload> {
    let word = parser.cursor().read_hex(3)? as u32;
    Ok(Payload::Ac3Specific(Dac3Box::from_word(word)))
}
