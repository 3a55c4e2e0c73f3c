use crate::boxes::{FourCC, Payload};
use crate::decoders;
use crate::envelope::BoxEnvelope;
use crate::error::Result;
use crate::known_boxes::BoxType;
use crate::parser::BoxParser;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Decodes one box payload.
///
/// On entry the cursor sits just past the box header. The decoder may read
/// up to `envelope.end()`; whatever it leaves unread is skipped for it.
pub type DecodeFn = fn(&mut BoxParser<'_>, &BoxEnvelope) -> Result<Payload>;

#[derive(Clone, Copy)]
pub struct RegistryEntry {
    pub box_type: BoxType,
    pub decode: DecodeFn,
}

/// Registry of decoders keyed by box name (see [`FourCC::name`]).
///
/// The registry is immutable once constructed; use [`Registry::with_decoder`]
/// to build it fluently.
pub struct Registry {
    map: HashMap<String, RegistryEntry>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    /// A registry holding every built-in decoder.
    pub fn built_in() -> Self {
        BoxType::BUILT_IN.iter().fold(Self::new(), |registry, &box_type| {
            registry.with_decoder(box_type.name(), box_type, decoder_for(box_type))
        })
    }

    /// Return a new registry with the given decoder added, replacing any
    /// decoder already registered under `name`.
    pub fn with_decoder(mut self, name: &str, box_type: BoxType, decode: DecodeFn) -> Self {
        self.map
            .insert(name.to_string(), RegistryEntry { box_type, decode });
        self
    }

    pub fn lookup(&self, tag: &FourCC) -> Option<&RegistryEntry> {
        self.map.get(tag.name().as_str())
    }

    pub fn lookup_name(&self, name: &str) -> Option<&RegistryEntry> {
        self.map.get(name)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

static DEFAULT_REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::built_in);

/// Shared registry of built-in decoders, built on first use.
pub fn default_registry() -> &'static Registry {
    &DEFAULT_REGISTRY
}

fn decoder_for(box_type: BoxType) -> DecodeFn {
    use decoders::*;

    match box_type {
        BoxType::FileType => decode_ftyp,
        BoxType::MediaData => decode_mdat,
        BoxType::Free | BoxType::Skip | BoxType::Wide => decode_free,

        BoxType::Movie => decode_moov,
        BoxType::MovieHeader => decode_mvhd,
        BoxType::InitialObjectDescriptor => decode_iods,
        BoxType::Track => decode_trak,
        BoxType::TrackHeader => decode_tkhd,
        BoxType::TrackReference => decode_tref,
        BoxType::ChapterList => decode_chap,
        BoxType::UserData => decode_udta,
        BoxType::Meta => decode_meta,

        BoxType::Media => decode_mdia,
        BoxType::MediaHeader => decode_mdhd,
        BoxType::Handler => decode_hdlr,
        BoxType::MediaInformation => decode_minf,
        BoxType::DataInformation => decode_dinf,
        BoxType::DataReference => decode_dref,

        BoxType::SampleTable => decode_stbl,
        BoxType::SampleDescription => decode_stsd,
        BoxType::TimeToSample => decode_stts,
        BoxType::SampleToChunk => decode_stsc,
        BoxType::SampleSize => decode_stsz,
        BoxType::ChunkOffset => decode_stco,
        BoxType::ChunkOffset64 => decode_co64,
        BoxType::SyncSample => decode_stss,
        BoxType::CompositionOffset => decode_ctts,

        BoxType::Avc1 | BoxType::Hvc1 | BoxType::Hev1 | BoxType::Mp4v => decode_video_entry,
        BoxType::Mp4a | BoxType::Ac3 | BoxType::Ec3 => decode_audio_entry,
        BoxType::Text => decode_text_entry,
        BoxType::ElementaryStream | BoxType::Mp4Descriptor => decode_esds,
        BoxType::Ac3Specific => decode_dac3,

        BoxType::ItemList => decode_ilst,
        BoxType::Data => decode_data,
        BoxType::AdditionalMean | BoxType::AdditionalName => decode_additional_info,
        t if t.is_item() => decode_item,

        _ => decode_opaque,
    }
}
