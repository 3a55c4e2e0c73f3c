pub mod boxes;
pub mod cursor;
pub mod decoders;
pub mod discover;
pub mod envelope;
pub mod error;
pub mod known_boxes;
pub mod metadata;
pub mod parser;
pub mod registry;
pub mod summary;
pub mod util;

pub use boxes::{FourCC, Mp4Box, Payload};
pub use cursor::ByteCursor;
pub use envelope::BoxEnvelope;
pub use error::{ParseError, Result};
pub use known_boxes::BoxType;
pub use metadata::{ItemMetadata, MediaType, PropertyListParser, Rating};
pub use parser::{BoxParser, ReaderOptions, parse_file};
pub use registry::{DecodeFn, Registry, default_registry};
pub use summary::{Mp4Summary, TrackSummary};
