use crate::boxes::{Mp4Box, Payload};
use crate::cursor::ByteCursor;
use crate::envelope::{self, BoxEnvelope};
use crate::error::{ParseError, Result};
use crate::registry::{Registry, default_registry};
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

/// Smallest possible box: 32-bit size plus tag.
pub const MIN_BOX_SIZE: u64 = 8;

#[derive(Debug, Clone, Copy)]
pub struct ReaderOptions {
    /// Boxes nested deeper than this keep an opaque payload.
    pub max_depth: usize,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self { max_depth: 64 }
    }
}

/// Recursive box tree decoder over a seekable source.
pub struct BoxParser<'a> {
    cursor: ByteCursor<'a>,
    registry: &'a Registry,
    options: ReaderOptions,
    depth: usize,
}

impl<'a> BoxParser<'a> {
    /// Parser over `source` using the built-in decoders.
    pub fn new<R: Read + Seek + 'a>(source: R) -> Result<Self> {
        Self::with_registry(source, default_registry())
    }

    pub fn with_registry<R: Read + Seek + 'a>(source: R, registry: &'a Registry) -> Result<Self> {
        Ok(Self {
            cursor: ByteCursor::new(source)?,
            registry,
            options: ReaderOptions::default(),
            depth: 0,
        })
    }

    pub fn with_options(mut self, options: ReaderOptions) -> Self {
        self.options = options;
        self
    }

    pub fn cursor(&mut self) -> &mut ByteCursor<'a> {
        &mut self.cursor
    }

    pub fn position(&self) -> u64 {
        self.cursor.position()
    }

    /// Bytes of `envelope` not yet consumed.
    pub fn remaining(&self, envelope: &BoxEnvelope) -> u64 {
        envelope::bytes_remaining(envelope, &self.cursor)
    }

    /// Decode every top-level box. A source that was already read from is
    /// rewound first, so repeated calls return the same tree.
    pub fn parse(&mut self) -> Result<Vec<Mp4Box>> {
        if self.cursor.position() > 0 {
            self.cursor.reset()?;
        }
        self.depth = 0;

        let mut boxes = Vec::new();
        while self.cursor.available() >= MIN_BOX_SIZE {
            match self.next_box() {
                Ok(Some(b)) => boxes.push(b),
                Ok(None) => break,
                Err(e) if !e.is_fatal() => {
                    tracing::warn!(error = %e, "stopping top-level parse");
                    break;
                }
                Err(e) => return Err(e),
            }
        }
        tracing::debug!(count = boxes.len(), "parsed top-level boxes");
        Ok(boxes)
    }

    /// Next box within the whole source. `None` once fewer than eight bytes
    /// remain or the next box is truncated.
    pub fn next_box(&mut self) -> Result<Option<Mp4Box>> {
        let bound = self.cursor.len();
        self.read_box(bound)
    }

    /// Next box within `parent`'s payload.
    pub fn next_child(&mut self, parent: &BoxEnvelope) -> Result<Option<Mp4Box>> {
        let bound = parent.end().min(self.cursor.len());
        self.read_box(bound)
    }

    /// Every remaining box within `parent`'s payload.
    pub fn children(&mut self, parent: &BoxEnvelope) -> Result<Vec<Mp4Box>> {
        let mut out = Vec::new();
        while self.remaining(parent) >= MIN_BOX_SIZE {
            match self.next_child(parent)? {
                Some(b) => out.push(b),
                None => break,
            }
        }
        Ok(out)
    }

    fn read_box(&mut self, bound: u64) -> Result<Option<Mp4Box>> {
        let start = self.cursor.position();
        let scope = bound.saturating_sub(start);
        if scope < MIN_BOX_SIZE {
            return Ok(None);
        }

        let size32 = self.cursor.read_u32()?;
        let tag = self.cursor.read_tag()?;
        let (size, header_size) = match size32 {
            1 if scope >= 16 => (self.cursor.read_u64()?, 16),
            1 => {
                tracing::warn!(%tag, start, "64-bit size does not fit in scope; stopping");
                return Ok(None);
            }
            0 => (scope, MIN_BOX_SIZE),
            n => (n as u64, MIN_BOX_SIZE),
        };

        if size < header_size {
            let err = ParseError::InvalidSize {
                tag: tag.to_string(),
                start,
                size,
            };
            tracing::warn!(error = %err, "stopping scope");
            return Ok(None);
        }
        if size > scope {
            tracing::warn!(
                %tag,
                start,
                size,
                available = scope,
                "box extends past the end of its scope; stopping"
            );
            return Ok(None);
        }

        let entry = self.registry.lookup(&tag).copied();
        let envelope = BoxEnvelope {
            tag,
            box_type: entry.map(|e| e.box_type),
            start,
            size,
            header_size,
        };
        tracing::trace!(%tag, start, size, depth = self.depth, "creating box");

        let payload = match entry {
            Some(entry) if self.depth < self.options.max_depth => {
                self.decode(&envelope, entry.decode)?
            }
            Some(_) => {
                tracing::warn!(%tag, start, depth = self.depth, "nesting too deep; keeping box opaque");
                envelope::close(&envelope, &mut self.cursor)?;
                Payload::Opaque
            }
            None => {
                tracing::debug!(%tag, start, size, "unregistered box");
                envelope::close(&envelope, &mut self.cursor)?;
                Payload::Opaque
            }
        };

        Ok(Some(Mp4Box { envelope, payload }))
    }

    fn decode(
        &mut self,
        envelope: &BoxEnvelope,
        decode: crate::registry::DecodeFn,
    ) -> Result<Payload> {
        self.depth += 1;
        let decoded = decode(self, envelope)
            .and_then(|payload| envelope::close(envelope, &mut self.cursor).map(|_| payload));
        self.depth -= 1;

        match decoded {
            Ok(payload) => Ok(payload),
            Err(e) if e.is_fatal() => Err(e),
            Err(e) => {
                tracing::warn!(
                    tag = %envelope.tag,
                    start = envelope.start,
                    error = %e,
                    "decode failed; keeping box opaque"
                );
                self.cursor.realign(envelope.end())?;
                Ok(Payload::Opaque)
            }
        }
    }
}

impl BoxParser<'static> {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        Self::new(BufReader::new(file))
    }
}

/// Decode every top-level box of the file at `path`.
pub fn parse_file(path: impl AsRef<Path>) -> Result<Vec<Mp4Box>> {
    BoxParser::open(path)?.parse()
}
