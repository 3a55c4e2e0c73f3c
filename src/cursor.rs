//! Sequential big-endian reader that keeps a running byte position.
//!
//! Every successful read advances [`ByteCursor::position`] by exactly the
//! number of bytes consumed. Reads past the end of the source fail with
//! [`ParseError::UnexpectedEndOfStream`]; other I/O failures surface as
//! [`ParseError::Io`].

use crate::boxes::FourCC;
use crate::error::{ParseError, Result};
use byteorder::{BigEndian, ReadBytesExt};
use std::io::{self, Read, Seek, SeekFrom};
use std::str::FromStr;

/// Object-safe union of `Read + Seek`.
pub trait ReadSeek: Read + Seek {}

impl<T: Read + Seek + ?Sized> ReadSeek for T {}

pub struct ByteCursor<'a> {
    source: Box<dyn ReadSeek + 'a>,
    position: u64,
    length: u64,
}

impl<'a> ByteCursor<'a> {
    /// Wrap a seekable source. The cursor always starts at offset 0.
    pub fn new<R: Read + Seek + 'a>(mut source: R) -> Result<Self> {
        let length = source.seek(SeekFrom::End(0))?;
        source.seek(SeekFrom::Start(0))?;
        Ok(Self {
            source: Box::new(source),
            position: 0,
            length,
        })
    }

    /// Bytes consumed since the start of the stream.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Total length of the underlying source.
    pub fn len(&self) -> u64 {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Bytes left between the current position and the end of the source.
    pub fn available(&self) -> u64 {
        self.length.saturating_sub(self.position)
    }

    /// Rewind to offset 0 so the same source can be parsed again.
    pub fn reset(&mut self) -> Result<()> {
        self.source.seek(SeekFrom::Start(0))?;
        self.position = 0;
        Ok(())
    }

    pub fn skip(&mut self, count: u64) -> Result<()> {
        if count == 0 {
            return Ok(());
        }
        if count > self.available() {
            return Err(ParseError::UnexpectedEndOfStream {
                position: self.position,
            });
        }
        tracing::trace!(position = self.position, count, "skipping bytes");
        let target = self.position + count;
        self.source.seek(SeekFrom::Start(target))?;
        self.position = target;
        Ok(())
    }

    /// Move to an absolute offset within the source, in either direction.
    ///
    /// Only the box envelope uses this, to land exactly on a box's declared
    /// end after its decoder ran short, overran or failed midway.
    pub(crate) fn realign(&mut self, offset: u64) -> Result<()> {
        let target = offset.min(self.length);
        self.source.seek(SeekFrom::Start(target))?;
        self.position = target;
        Ok(())
    }

    fn read_with<T>(
        &mut self,
        width: u64,
        read: impl FnOnce(&mut (dyn ReadSeek + 'a)) -> io::Result<T>,
    ) -> Result<T> {
        match read(&mut *self.source) {
            Ok(v) => {
                self.position += width;
                Ok(v)
            }
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                // A short read may have consumed part of the value.
                self.source.seek(SeekFrom::Start(self.position))?;
                Err(ParseError::UnexpectedEndOfStream {
                    position: self.position,
                })
            }
            Err(e) => Err(ParseError::Io(e)),
        }
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        self.read_with(1, |r| r.read_u8())
    }

    pub fn read_i8(&mut self) -> Result<i8> {
        self.read_with(1, |r| r.read_i8())
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        self.read_with(2, |r| r.read_u16::<BigEndian>())
    }

    pub fn read_i16(&mut self) -> Result<i16> {
        self.read_with(2, |r| r.read_i16::<BigEndian>())
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        self.read_with(4, |r| r.read_u32::<BigEndian>())
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        self.read_with(4, |r| r.read_i32::<BigEndian>())
    }

    pub fn read_u64(&mut self) -> Result<u64> {
        self.read_with(8, |r| r.read_u64::<BigEndian>())
    }

    pub fn read_i64(&mut self) -> Result<i64> {
        self.read_with(8, |r| r.read_i64::<BigEndian>())
    }

    /// Read `width` bytes (1..=8) as one big-endian unsigned quantity.
    pub fn read_hex(&mut self, width: usize) -> Result<u64> {
        if !(1..=8).contains(&width) {
            return Err(ParseError::malformed(
                "hex",
                format!("width {width} outside 1..=8"),
            ));
        }
        let mut value = 0u64;
        for _ in 0..width {
            value = (value << 8) | self.read_u8()? as u64;
        }
        Ok(value)
    }

    /// The common 24-bit flags field of a full box.
    pub fn read_flags(&mut self) -> Result<u32> {
        Ok(self.read_hex(3)? as u32)
    }

    pub fn read_bytes(&mut self, count: u64) -> Result<Vec<u8>> {
        if count > self.available() {
            return Err(ParseError::UnexpectedEndOfStream {
                position: self.position,
            });
        }
        let mut buf = vec![0u8; count as usize];
        self.read_with(count, |r| r.read_exact(&mut buf))?;
        Ok(buf)
    }

    pub fn read_tag(&mut self) -> Result<FourCC> {
        let mut tag = [0u8; 4];
        self.read_with(4, |r| r.read_exact(&mut tag))?;
        Ok(FourCC(tag))
    }

    /// Fixed-length text, decoded lossily.
    pub fn read_string(&mut self, length: u64) -> Result<String> {
        let bytes = self.read_bytes(length)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// 8.8 fixed point, read as `"<whole>.<fraction>"`.
    pub fn read_short_float(&mut self) -> Result<f32> {
        let whole = self.read_i8()?;
        let fraction = self.read_u8()?;
        parse_fixed(format!("{whole}.{fraction}"))
    }

    /// 16.16 fixed point, read as `"<whole>.<fraction>"`.
    pub fn read_float(&mut self) -> Result<f32> {
        let whole = self.read_i16()?;
        let fraction = self.read_u16()?;
        parse_fixed(format!("{whole}.{fraction}"))
    }

    /// 32.32 fixed point, read as `"<whole>.<fraction>"`.
    pub fn read_double(&mut self) -> Result<f64> {
        let whole = self.read_i32()?;
        let fraction = self.read_u32()?;
        parse_fixed(format!("{whole}.{fraction}"))
    }

    /// Fixed-width strings until `total` bytes have been read. A trailing
    /// fragment shorter than `width` is left unread.
    pub fn read_string_list(&mut self, total: u64, width: u64) -> Result<Vec<String>> {
        let mut out = Vec::new();
        let mut consumed = 0u64;
        while width > 0 && consumed + width <= total {
            out.push(self.read_string(width)?);
            consumed += width;
        }
        Ok(out)
    }

    pub fn read_u32_list(&mut self, total: u64) -> Result<Vec<u32>> {
        let mut out = Vec::new();
        let mut consumed = 0u64;
        while consumed + 4 <= total {
            out.push(self.read_u32()?);
            consumed += 4;
        }
        Ok(out)
    }

    pub fn read_i32_list(&mut self, total: u64) -> Result<Vec<i32>> {
        let mut out = Vec::new();
        let mut consumed = 0u64;
        while consumed + 4 <= total {
            out.push(self.read_i32()?);
            consumed += 4;
        }
        Ok(out)
    }
}

fn parse_fixed<T: FromStr>(text: String) -> Result<T> {
    text.parse::<T>()
        .map_err(|_| ParseError::InvalidFixedPoint(text.clone()))
}
