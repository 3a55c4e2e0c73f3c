use crate::decoders::{
    AdditionalInfoBox, AudioSampleEntry, ChapBox, Co64Box, CttsBox, Dac3Box, DataBox, DinfBox,
    DrefBox, EsdsBox, FtypBox, HdlrBox, IlstBox, IodsBox, ItemBox, MdhdBox, MdiaBox, MetaBox,
    MinfBox, MoovBox, MvhdBox, StblBox, StcoBox, StscBox, StsdBox, StssBox, StszBox, SttsBox,
    TextSampleEntry, TkhdBox, TrakBox, TrefBox, UdtaBox, VideoSampleEntry,
};
use crate::envelope::BoxEnvelope;
use crate::known_boxes::BoxType;
use serde::{Serialize, Serializer};
use std::fmt;

/// Leading byte of the legacy `©xxx` item tags.
pub const COPYRIGHT_SIGN: u8 = 0xA9;

#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct FourCC(pub [u8; 4]);

impl FourCC {
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        let b = s.as_bytes();
        if b.len() == 4 {
            Some(FourCC([b[0], b[1], b[2], b[3]]))
        } else {
            None
        }
    }

    pub fn as_str_lossy(&self) -> String {
        self.0
            .iter()
            .map(|&c| if (32..=126).contains(&c) { c as char } else { '.' })
            .collect()
    }

    /// Name used for registry lookup. A leading `0xA9` is dropped so that
    /// `©nam` resolves to `nam`.
    pub fn name(&self) -> String {
        let bytes = if self.0[0] == COPYRIGHT_SIGN {
            &self.0[1..]
        } else {
            &self.0[..]
        };
        String::from_utf8_lossy(bytes).into_owned()
    }
}

impl fmt::Debug for FourCC {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str_lossy())
    }
}

impl fmt::Display for FourCC {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str_lossy())
    }
}

impl Serialize for FourCC {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.as_str_lossy())
    }
}

/// One decoded box: the envelope every box carries plus its typed payload.
///
/// Boxes own their children through the payload; there are no parent links.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mp4Box {
    #[serde(flatten)]
    pub envelope: BoxEnvelope,
    pub payload: Payload,
}

impl Mp4Box {
    pub fn tag(&self) -> FourCC {
        self.envelope.tag
    }

    pub fn box_type(&self) -> Option<BoxType> {
        self.envelope.box_type
    }

    pub fn start(&self) -> u64 {
        self.envelope.start
    }

    pub fn size(&self) -> u64 {
        self.envelope.size
    }

    pub fn end(&self) -> u64 {
        self.envelope.end()
    }

    /// Direct children, empty for leaf boxes.
    pub fn children(&self) -> &[Mp4Box] {
        self.payload.children()
    }

    /// First direct child of the given type.
    pub fn child(&self, box_type: BoxType) -> Option<&Mp4Box> {
        self.children()
            .iter()
            .find(|c| c.box_type() == Some(box_type))
    }

    pub fn children_of(&self, box_type: BoxType) -> impl Iterator<Item = &Mp4Box> {
        self.children()
            .iter()
            .filter(move |c| c.box_type() == Some(box_type))
    }

    /// Follow a path of box types from this box downwards.
    pub fn find(&self, path: &[BoxType]) -> Option<&Mp4Box> {
        path.iter().try_fold(self, |b, t| b.child(*t))
    }

    /// Depth-first visit of this box and every descendant.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Mp4Box, usize)) {
        self.walk_at(0, visit);
    }

    fn walk_at<'a>(&'a self, depth: usize, visit: &mut impl FnMut(&'a Mp4Box, usize)) {
        visit(self, depth);
        for c in self.children() {
            c.walk_at(depth + 1, visit);
        }
    }
}

/// Decoded payload, one case per supported box family.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "fields", rename_all = "snake_case")]
pub enum Payload {
    /// Unregistered tag, undecodable payload or nesting beyond the depth limit.
    Opaque,
    MediaData,
    Free,
    FileType(FtypBox),
    Movie(MoovBox),
    MovieHeader(MvhdBox),
    Track(TrakBox),
    TrackHeader(TkhdBox),
    TrackReference(TrefBox),
    ChapterList(ChapBox),
    Media(MdiaBox),
    MediaHeader(MdhdBox),
    MediaInformation(MinfBox),
    Handler(HdlrBox),
    DataInformation(DinfBox),
    DataReference(DrefBox),
    InitialObjectDescriptor(IodsBox),
    UserData(UdtaBox),
    Meta(MetaBox),
    SampleTable(StblBox),
    SampleDescription(StsdBox),
    VideoEntry(VideoSampleEntry),
    AudioEntry(AudioSampleEntry),
    TextEntry(TextSampleEntry),
    ElementaryStream(EsdsBox),
    Ac3Specific(Dac3Box),
    TimeToSample(SttsBox),
    SampleToChunk(StscBox),
    SampleSize(StszBox),
    ChunkOffset(StcoBox),
    ChunkOffset64(Co64Box),
    SyncSample(StssBox),
    CompositionOffset(CttsBox),
    ItemList(IlstBox),
    Item(ItemBox),
    Data(DataBox),
    AdditionalInfo(AdditionalInfoBox),
    /// Output of a caller-registered decoder.
    Json(serde_json::Value),
}

macro_rules! payload_accessors {
    ($($fn_name:ident => $variant:ident($ty:ty)),* $(,)?) => {
        impl Payload {
            $(
                pub fn $fn_name(&self) -> Option<&$ty> {
                    match self {
                        Payload::$variant(v) => Some(v),
                        _ => None,
                    }
                }
            )*
        }
    };
}

payload_accessors! {
    as_file_type => FileType(FtypBox),
    as_movie => Movie(MoovBox),
    as_movie_header => MovieHeader(MvhdBox),
    as_track => Track(TrakBox),
    as_track_header => TrackHeader(TkhdBox),
    as_track_reference => TrackReference(TrefBox),
    as_chapter_list => ChapterList(ChapBox),
    as_media => Media(MdiaBox),
    as_media_header => MediaHeader(MdhdBox),
    as_media_information => MediaInformation(MinfBox),
    as_handler => Handler(HdlrBox),
    as_data_information => DataInformation(DinfBox),
    as_data_reference => DataReference(DrefBox),
    as_initial_object_descriptor => InitialObjectDescriptor(IodsBox),
    as_user_data => UserData(UdtaBox),
    as_meta => Meta(MetaBox),
    as_sample_table => SampleTable(StblBox),
    as_sample_description => SampleDescription(StsdBox),
    as_video_entry => VideoEntry(VideoSampleEntry),
    as_audio_entry => AudioEntry(AudioSampleEntry),
    as_text_entry => TextEntry(TextSampleEntry),
    as_elementary_stream => ElementaryStream(EsdsBox),
    as_ac3_specific => Ac3Specific(Dac3Box),
    as_time_to_sample => TimeToSample(SttsBox),
    as_sample_to_chunk => SampleToChunk(StscBox),
    as_sample_size => SampleSize(StszBox),
    as_chunk_offset => ChunkOffset(StcoBox),
    as_chunk_offset64 => ChunkOffset64(Co64Box),
    as_sync_sample => SyncSample(StssBox),
    as_composition_offset => CompositionOffset(CttsBox),
    as_item_list => ItemList(IlstBox),
    as_item => Item(ItemBox),
    as_data => Data(DataBox),
    as_additional_info => AdditionalInfo(AdditionalInfoBox),
    as_json => Json(serde_json::Value),
}

impl Payload {
    pub fn is_opaque(&self) -> bool {
        matches!(self, Payload::Opaque)
    }

    pub fn children(&self) -> &[Mp4Box] {
        match self {
            Payload::Movie(b) => &b.children,
            Payload::Track(b) => &b.children,
            Payload::TrackReference(b) => &b.children,
            Payload::Media(b) => &b.children,
            Payload::MediaInformation(b) => &b.children,
            Payload::DataInformation(b) => &b.children,
            Payload::DataReference(b) => &b.children,
            Payload::UserData(b) => &b.children,
            Payload::Meta(b) => &b.children,
            Payload::SampleTable(b) => &b.children,
            Payload::SampleDescription(b) => &b.children,
            Payload::VideoEntry(b) => &b.children,
            Payload::AudioEntry(b) => &b.children,
            Payload::ItemList(b) => &b.children,
            Payload::Item(b) => &b.children,
            _ => &[],
        }
    }
}
