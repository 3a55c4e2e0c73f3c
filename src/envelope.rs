//! Fields shared by every decoded box and the bookkeeping that keeps the
//! cursor aligned on declared box boundaries.

use crate::boxes::FourCC;
use crate::cursor::ByteCursor;
use crate::error::{ParseError, Result};
use crate::known_boxes::BoxType;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoxEnvelope {
    /// Tag as it appeared in the stream.
    pub tag: FourCC,
    /// Registry type, `None` for unregistered tags.
    pub box_type: Option<BoxType>,
    /// Offset of the first header byte.
    pub start: u64,
    /// Declared size, header included.
    pub size: u64,
    /// 8, or 16 when a 64-bit size follows the tag.
    pub header_size: u64,
}

impl BoxEnvelope {
    pub fn end(&self) -> u64 {
        self.start + self.size
    }

    /// Declared size minus the header.
    pub fn payload_size(&self) -> u64 {
        self.size.saturating_sub(self.header_size)
    }

    pub fn name(&self) -> String {
        self.tag.name()
    }
}

/// Bytes of this box not yet consumed by the cursor.
pub fn bytes_remaining(envelope: &BoxEnvelope, cursor: &ByteCursor<'_>) -> u64 {
    envelope.end().saturating_sub(cursor.position())
}

/// Skip whatever the decoder left unread so the cursor sits exactly on the
/// declared end. A decoder that read past the end is reported as an overrun.
pub fn close(envelope: &BoxEnvelope, cursor: &mut ByteCursor<'_>) -> Result<()> {
    let position = cursor.position();
    if position > envelope.end() {
        return Err(ParseError::Overrun {
            tag: envelope.tag.to_string(),
            start: envelope.start,
            excess: position - envelope.end(),
        });
    }
    cursor.skip(envelope.end() - position)
}
