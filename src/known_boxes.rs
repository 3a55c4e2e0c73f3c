use serde::Serialize;

/// Identity of every box family the default registry knows how to decode.
///
/// Tags without an entry here stay unregistered and decode as opaque boxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BoxType {
    // File level
    FileType,
    Movie,
    MediaData,
    Free,
    Skip,
    Wide,

    // moov / trak
    MovieHeader,
    InitialObjectDescriptor,
    Track,
    TrackHeader,
    TrackReference,
    ChapterList,
    UserData,
    Meta,

    // mdia / minf
    Media,
    MediaHeader,
    Handler,
    MediaInformation,
    DataInformation,
    DataReference,

    // stbl
    SampleTable,
    SampleDescription,
    TimeToSample,
    SampleToChunk,
    SampleSize,
    ChunkOffset,
    ChunkOffset64,
    SyncSample,
    CompositionOffset,

    // Sample entries and their extensions
    Avc1,
    Hvc1,
    Hev1,
    Mp4v,
    Mp4a,
    Ac3,
    Ec3,
    Text,
    ElementaryStream,
    Mp4Descriptor,
    Ac3Specific,

    // ilst and its items
    ItemList,
    ItemName,
    ItemArtist,
    ItemAlbumArtist,
    ItemAlbum,
    ItemComment,
    ItemComposer,
    ItemTrack,
    ItemCreationDate,
    ItemGenre,
    ItemGenreText,
    ItemEncoder,
    ItemTrackNumber,
    ItemDiskNumber,
    ItemTempo,
    ItemCompilation,
    ItemCover,
    ItemDescription,
    ItemSynopsis,
    ItemMediaType,
    ItemTvShow,
    ItemTvEpisodeId,
    ItemTvSeason,
    ItemTvEpisode,
    ItemTvNetwork,
    ItemCopyright,
    ItemSortName,
    ItemSortAlbum,
    ItemSortAlbumArtist,
    ItemSortArtist,
    ItemSortShow,
    ItemFreeform,
    Data,
    AdditionalMean,
    AdditionalName,

    /// Registered by a caller with [`crate::Registry::with_decoder`].
    Custom(&'static str),
}

impl BoxType {
    /// Every built-in type, in registry order.
    pub const BUILT_IN: &'static [BoxType] = &[
        BoxType::FileType,
        BoxType::Movie,
        BoxType::MediaData,
        BoxType::Free,
        BoxType::Skip,
        BoxType::Wide,
        BoxType::MovieHeader,
        BoxType::InitialObjectDescriptor,
        BoxType::Track,
        BoxType::TrackHeader,
        BoxType::TrackReference,
        BoxType::ChapterList,
        BoxType::UserData,
        BoxType::Meta,
        BoxType::Media,
        BoxType::MediaHeader,
        BoxType::Handler,
        BoxType::MediaInformation,
        BoxType::DataInformation,
        BoxType::DataReference,
        BoxType::SampleTable,
        BoxType::SampleDescription,
        BoxType::TimeToSample,
        BoxType::SampleToChunk,
        BoxType::SampleSize,
        BoxType::ChunkOffset,
        BoxType::ChunkOffset64,
        BoxType::SyncSample,
        BoxType::CompositionOffset,
        BoxType::Avc1,
        BoxType::Hvc1,
        BoxType::Hev1,
        BoxType::Mp4v,
        BoxType::Mp4a,
        BoxType::Ac3,
        BoxType::Ec3,
        BoxType::Text,
        BoxType::ElementaryStream,
        BoxType::Mp4Descriptor,
        BoxType::Ac3Specific,
        BoxType::ItemList,
        BoxType::ItemName,
        BoxType::ItemArtist,
        BoxType::ItemAlbumArtist,
        BoxType::ItemAlbum,
        BoxType::ItemComment,
        BoxType::ItemComposer,
        BoxType::ItemTrack,
        BoxType::ItemCreationDate,
        BoxType::ItemGenre,
        BoxType::ItemGenreText,
        BoxType::ItemEncoder,
        BoxType::ItemTrackNumber,
        BoxType::ItemDiskNumber,
        BoxType::ItemTempo,
        BoxType::ItemCompilation,
        BoxType::ItemCover,
        BoxType::ItemDescription,
        BoxType::ItemSynopsis,
        BoxType::ItemMediaType,
        BoxType::ItemTvShow,
        BoxType::ItemTvEpisodeId,
        BoxType::ItemTvSeason,
        BoxType::ItemTvEpisode,
        BoxType::ItemTvNetwork,
        BoxType::ItemCopyright,
        BoxType::ItemSortName,
        BoxType::ItemSortAlbum,
        BoxType::ItemSortAlbumArtist,
        BoxType::ItemSortArtist,
        BoxType::ItemSortShow,
        BoxType::ItemFreeform,
        BoxType::Data,
        BoxType::AdditionalMean,
        BoxType::AdditionalName,
    ];

    /// Registry name. Legacy `©xxx` tags register under their last three
    /// characters.
    pub fn name(&self) -> &'static str {
        match self {
            BoxType::FileType => "ftyp",
            BoxType::Movie => "moov",
            BoxType::MediaData => "mdat",
            BoxType::Free => "free",
            BoxType::Skip => "skip",
            BoxType::Wide => "wide",
            BoxType::MovieHeader => "mvhd",
            BoxType::InitialObjectDescriptor => "iods",
            BoxType::Track => "trak",
            BoxType::TrackHeader => "tkhd",
            BoxType::TrackReference => "tref",
            BoxType::ChapterList => "chap",
            BoxType::UserData => "udta",
            BoxType::Meta => "meta",
            BoxType::Media => "mdia",
            BoxType::MediaHeader => "mdhd",
            BoxType::Handler => "hdlr",
            BoxType::MediaInformation => "minf",
            BoxType::DataInformation => "dinf",
            BoxType::DataReference => "dref",
            BoxType::SampleTable => "stbl",
            BoxType::SampleDescription => "stsd",
            BoxType::TimeToSample => "stts",
            BoxType::SampleToChunk => "stsc",
            BoxType::SampleSize => "stsz",
            BoxType::ChunkOffset => "stco",
            BoxType::ChunkOffset64 => "co64",
            BoxType::SyncSample => "stss",
            BoxType::CompositionOffset => "ctts",
            BoxType::Avc1 => "avc1",
            BoxType::Hvc1 => "hvc1",
            BoxType::Hev1 => "hev1",
            BoxType::Mp4v => "mp4v",
            BoxType::Mp4a => "mp4a",
            BoxType::Ac3 => "ac-3",
            BoxType::Ec3 => "ec-3",
            BoxType::Text => "text",
            BoxType::ElementaryStream => "esds",
            BoxType::Mp4Descriptor => "m4ds",
            BoxType::Ac3Specific => "dac3",
            BoxType::ItemList => "ilst",
            BoxType::ItemName => "nam",
            BoxType::ItemArtist => "ART",
            BoxType::ItemAlbumArtist => "aART",
            BoxType::ItemAlbum => "alb",
            BoxType::ItemComment => "cmt",
            BoxType::ItemComposer => "com",
            BoxType::ItemTrack => "trk",
            BoxType::ItemCreationDate => "day",
            BoxType::ItemGenre => "gnre",
            BoxType::ItemGenreText => "gen",
            BoxType::ItemEncoder => "too",
            BoxType::ItemTrackNumber => "trkn",
            BoxType::ItemDiskNumber => "disk",
            BoxType::ItemTempo => "tmpo",
            BoxType::ItemCompilation => "cpil",
            BoxType::ItemCover => "covr",
            BoxType::ItemDescription => "desc",
            BoxType::ItemSynopsis => "ldes",
            BoxType::ItemMediaType => "stik",
            BoxType::ItemTvShow => "tvsh",
            BoxType::ItemTvEpisodeId => "tven",
            BoxType::ItemTvSeason => "tvsn",
            BoxType::ItemTvEpisode => "tves",
            BoxType::ItemTvNetwork => "tvnn",
            BoxType::ItemCopyright => "cprt",
            BoxType::ItemSortName => "sonm",
            BoxType::ItemSortAlbum => "soal",
            BoxType::ItemSortAlbumArtist => "soaa",
            BoxType::ItemSortArtist => "soar",
            BoxType::ItemSortShow => "sosn",
            BoxType::ItemFreeform => "----",
            BoxType::Data => "data",
            BoxType::AdditionalMean => "mean",
            BoxType::AdditionalName => "name",
            BoxType::Custom(name) => *name,
        }
    }

    /// Human-readable description.
    pub fn full_name(&self) -> &'static str {
        match self {
            BoxType::FileType => "File Type",
            BoxType::Movie => "Movie",
            BoxType::MediaData => "Media Data",
            BoxType::Free => "Free Space",
            BoxType::Skip => "Skip",
            BoxType::Wide => "Wide",
            BoxType::MovieHeader => "Movie Header",
            BoxType::InitialObjectDescriptor => "Initial Object Descriptor",
            BoxType::Track => "Track",
            BoxType::TrackHeader => "Track Header",
            BoxType::TrackReference => "Track Reference",
            BoxType::ChapterList => "Chapter List",
            BoxType::UserData => "User Data",
            BoxType::Meta => "Meta",
            BoxType::Media => "Media",
            BoxType::MediaHeader => "Media Header",
            BoxType::Handler => "Handler Reference",
            BoxType::MediaInformation => "Media Information",
            BoxType::DataInformation => "Data Information",
            BoxType::DataReference => "Data Reference",
            BoxType::SampleTable => "Sample Table",
            BoxType::SampleDescription => "Sample Description",
            BoxType::TimeToSample => "Time To Sample",
            BoxType::SampleToChunk => "Sample To Chunk",
            BoxType::SampleSize => "Sample Size",
            BoxType::ChunkOffset => "Chunk Offset",
            BoxType::ChunkOffset64 => "Chunk Offset 64",
            BoxType::SyncSample => "Sync Sample",
            BoxType::CompositionOffset => "Composition Offset",
            BoxType::Avc1 => "AVC Video Sample Entry",
            BoxType::Hvc1 | BoxType::Hev1 => "HEVC Video Sample Entry",
            BoxType::Mp4v => "MPEG-4 Video Sample Entry",
            BoxType::Mp4a => "MPEG-4 Audio Sample Entry",
            BoxType::Ac3 => "AC-3 Audio Sample Entry",
            BoxType::Ec3 => "E-AC-3 Audio Sample Entry",
            BoxType::Text => "Text Sample Entry",
            BoxType::ElementaryStream => "Elementary Stream Descriptor",
            BoxType::Mp4Descriptor => "MPEG-4 Descriptor",
            BoxType::Ac3Specific => "AC-3 Specific",
            BoxType::ItemList => "Item List",
            BoxType::ItemName => "Name",
            BoxType::ItemArtist => "Artist",
            BoxType::ItemAlbumArtist => "Album Artist",
            BoxType::ItemAlbum => "Album",
            BoxType::ItemComment => "Comment",
            BoxType::ItemComposer => "Composer",
            BoxType::ItemTrack => "Track",
            BoxType::ItemCreationDate => "Creation Date",
            BoxType::ItemGenre => "Genre",
            BoxType::ItemGenreText => "Genre (text)",
            BoxType::ItemEncoder => "Encoder",
            BoxType::ItemTrackNumber => "Track Number",
            BoxType::ItemDiskNumber => "Disk Number",
            BoxType::ItemTempo => "Tempo",
            BoxType::ItemCompilation => "Compilation",
            BoxType::ItemCover => "Cover Art",
            BoxType::ItemDescription => "Description",
            BoxType::ItemSynopsis => "Synopsis",
            BoxType::ItemMediaType => "Media Type",
            BoxType::ItemTvShow => "TV Show",
            BoxType::ItemTvEpisodeId => "TV Episode Id",
            BoxType::ItemTvSeason => "TV Season",
            BoxType::ItemTvEpisode => "TV Episode",
            BoxType::ItemTvNetwork => "TV Network",
            BoxType::ItemCopyright => "Copyright",
            BoxType::ItemSortName => "Sort Name",
            BoxType::ItemSortAlbum => "Sort Album",
            BoxType::ItemSortAlbumArtist => "Sort Album Artist",
            BoxType::ItemSortArtist => "Sort Artist",
            BoxType::ItemSortShow => "Sort Show",
            BoxType::ItemFreeform => "Freeform Item",
            BoxType::Data => "Item Data",
            BoxType::AdditionalMean => "Additional Info (mean)",
            BoxType::AdditionalName => "Additional Info (name)",
            BoxType::Custom(_) => "Custom",
        }
    }

    /// Container families whose payload is a sequence of child boxes.
    pub fn is_container(&self) -> bool {
        matches!(
            self,
            BoxType::Movie
                | BoxType::Track
                | BoxType::TrackReference
                | BoxType::UserData
                | BoxType::Meta
                | BoxType::Media
                | BoxType::MediaInformation
                | BoxType::DataInformation
                | BoxType::DataReference
                | BoxType::SampleTable
                | BoxType::SampleDescription
                | BoxType::ItemList
        )
    }

    /// Entries of an `ilst` box.
    pub fn is_item(&self) -> bool {
        matches!(
            self,
            BoxType::ItemName
                | BoxType::ItemArtist
                | BoxType::ItemAlbumArtist
                | BoxType::ItemAlbum
                | BoxType::ItemComment
                | BoxType::ItemComposer
                | BoxType::ItemTrack
                | BoxType::ItemCreationDate
                | BoxType::ItemGenre
                | BoxType::ItemGenreText
                | BoxType::ItemEncoder
                | BoxType::ItemTrackNumber
                | BoxType::ItemDiskNumber
                | BoxType::ItemTempo
                | BoxType::ItemCompilation
                | BoxType::ItemCover
                | BoxType::ItemDescription
                | BoxType::ItemSynopsis
                | BoxType::ItemMediaType
                | BoxType::ItemTvShow
                | BoxType::ItemTvEpisodeId
                | BoxType::ItemTvSeason
                | BoxType::ItemTvEpisode
                | BoxType::ItemTvNetwork
                | BoxType::ItemCopyright
                | BoxType::ItemSortName
                | BoxType::ItemSortAlbum
                | BoxType::ItemSortAlbumArtist
                | BoxType::ItemSortArtist
                | BoxType::ItemSortShow
                | BoxType::ItemFreeform
        )
    }
}
