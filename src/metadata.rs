//! Descriptive metadata folded out of an `ilst` item list.

use crate::decoders::IlstBox;
use crate::known_boxes::BoxType;
use crate::util::{serialize_hex, u16_at};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;

/// Freeform key holding the content rating.
pub const RATING_KEY: &str = "iTunEXTC";
/// Freeform key holding the cast/crew property list.
pub const MOVIE_INFO_KEY: &str = "iTunMOVI";
/// Rating system prefix accepted in [`RATING_KEY`] values.
pub const RATING_SYSTEM: &str = "uk-movie";

const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Parses the XML property list stored under [`MOVIE_INFO_KEY`] into
/// role name (`cast`, `directors`, ...) to person names.
pub trait PropertyListParser {
    fn parse(&self, xml: &str) -> HashMap<String, Vec<String>>;
}

impl<F> PropertyListParser for F
where
    F: Fn(&str) -> HashMap<String, Vec<String>>,
{
    fn parse(&self, xml: &str) -> HashMap<String, Vec<String>> {
        self(xml)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum Rating {
    #[default]
    Unknown,
    Universal,
    ParentalGuidance,
    Twelve,
    TwelveAccompanied,
    Fifteen,
    Eighteen,
}

impl Rating {
    pub fn from_label(label: &str) -> Self {
        match label {
            "U" => Self::Universal,
            "PG" => Self::ParentalGuidance,
            "12" => Self::Twelve,
            "12A" => Self::TwelveAccompanied,
            "15" => Self::Fifteen,
            "18" => Self::Eighteen,
            _ => Self::Unknown,
        }
    }

    /// Parse `uk-movie|<label>|<score>|...`; anything else is `Unknown`.
    pub fn from_extended(value: &str) -> Self {
        let mut parts: Vec<&str> = value.split('|').collect();
        while parts.last().is_some_and(|p| p.is_empty()) {
            parts.pop();
        }
        if parts.len() >= 3 && parts[0] == RATING_SYSTEM {
            Self::from_label(parts[1])
        } else {
            Self::Unknown
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Unknown => "",
            Self::Universal => "U",
            Self::ParentalGuidance => "PG",
            Self::Twelve => "12",
            Self::TwelveAccompanied => "12A",
            Self::Fifteen => "15",
            Self::Eighteen => "18",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum MediaType {
    Movie,
    Music,
    Audiobook,
    MusicVideo,
    ShortFilm,
    TvShow,
    Booklet,
    Ringtone,
    #[default]
    Unknown,
}

impl MediaType {
    pub fn from_id(id: u8) -> Self {
        match id {
            0 => Self::Movie,
            1 => Self::Music,
            2 => Self::Audiobook,
            6 => Self::MusicVideo,
            9 => Self::ShortFilm,
            10 => Self::TvShow,
            11 => Self::Booklet,
            14 => Self::Ringtone,
            _ => Self::Unknown,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ItemMetadata {
    pub title: String,
    pub show: String,
    pub album: String,
    pub comment: String,
    pub composer: String,
    pub date: Option<DateTime<Utc>>,
    pub rating: Rating,
    pub genre: String,
    #[serde(serialize_with = "serialize_hex")]
    pub cover: Vec<u8>,
    pub description: String,
    pub synopsis: String,
    pub media_type: MediaType,
    pub actors: Vec<String>,
    pub directors: Vec<String>,
    pub producers: Vec<String>,
    pub screenwriters: Vec<String>,
    pub tv_show: String,
    pub tv_episode_id: String,
    pub tv_season: u16,
    pub tv_episode: u16,
    pub tv_network: String,
    pub copyright: String,
    pub track_number: u16,
    pub track_total: u16,
    pub disk_number: u16,
    pub disk_total: u16,
    pub encoding_tool: String,
    pub sort_name: String,
    pub sort_album: String,
    pub sort_album_artist: String,
    pub sort_artist: String,
    pub sort_show: String,
}

/// Release dates carry a trailing zone or fraction often enough that only
/// the leading `yyyy-MM-ddTHH:mm:ss` is required to match.
pub fn parse_release_date(text: &str) -> Option<DateTime<Utc>> {
    match NaiveDateTime::parse_and_remainder(text, DATE_FORMAT) {
        Ok((date, _)) => Some(date.and_utc()),
        Err(e) => {
            tracing::warn!(value = text, error = %e, "invalid release date");
            None
        }
    }
}

impl IlstBox {
    /// Fold the items into one metadata record. Items without data are
    /// ignored; later items overwrite earlier ones.
    pub fn metadata(&self, plist: Option<&dyn PropertyListParser>) -> ItemMetadata {
        let mut meta = ItemMetadata::default();

        for item in self.items() {
            let Some(data) = item.data.as_deref().filter(|d| !d.is_empty()) else {
                continue;
            };
            let text = || String::from_utf8_lossy(data).into_owned();

            match item.key_type {
                Some(BoxType::ItemName) => meta.title = text(),
                Some(BoxType::ItemArtist) => meta.show = text(),
                Some(BoxType::ItemAlbum) => meta.album = text(),
                Some(BoxType::ItemComment) => meta.comment = text(),
                Some(BoxType::ItemComposer) => meta.composer = text(),
                Some(BoxType::ItemCreationDate) => {
                    if let Some(date) = parse_release_date(&text()) {
                        meta.date = Some(date);
                    }
                }
                Some(BoxType::ItemGenre | BoxType::ItemGenreText) => meta.genre = text(),
                Some(BoxType::ItemCover) => meta.cover = data.to_vec(),
                Some(BoxType::ItemDescription) => meta.description = text(),
                Some(BoxType::ItemSynopsis) => meta.synopsis = text(),
                Some(BoxType::ItemMediaType) => meta.media_type = MediaType::from_id(data[0]),
                Some(BoxType::AdditionalName) => fold_freeform(&mut meta, &item.key, &text(), plist),
                Some(BoxType::ItemTvShow) => meta.tv_show = text(),
                Some(BoxType::ItemTvEpisodeId) => meta.tv_episode_id = text(),
                Some(BoxType::ItemTvSeason) => meta.tv_season = u16_at(data, 2),
                Some(BoxType::ItemTvEpisode) => meta.tv_episode = u16_at(data, 2),
                Some(BoxType::ItemTvNetwork) => meta.tv_network = text(),
                Some(BoxType::ItemCopyright) => meta.copyright = text(),
                Some(BoxType::ItemEncoder) => meta.encoding_tool = text(),
                Some(BoxType::ItemTrackNumber) => {
                    meta.track_number = u16_at(data, 2);
                    meta.track_total = u16_at(data, 4);
                }
                Some(BoxType::ItemDiskNumber) => {
                    meta.disk_number = u16_at(data, 2);
                    meta.disk_total = u16_at(data, 4);
                }
                Some(BoxType::ItemSortName) => meta.sort_name = text(),
                Some(BoxType::ItemSortAlbum) => meta.sort_album = text(),
                Some(BoxType::ItemSortAlbumArtist) => meta.sort_album_artist = text(),
                Some(BoxType::ItemSortArtist) => meta.sort_artist = text(),
                Some(BoxType::ItemSortShow) => meta.sort_show = text(),
                _ => {}
            }
        }
        meta
    }
}

fn fold_freeform(
    meta: &mut ItemMetadata,
    key: &str,
    value: &str,
    plist: Option<&dyn PropertyListParser>,
) {
    match key {
        RATING_KEY => {
            tracing::trace!(value, "rating");
            meta.rating = Rating::from_extended(value);
        }
        MOVIE_INFO_KEY => {
            let Some(parser) = plist else {
                tracing::debug!("no property list parser; skipping cast and crew");
                return;
            };
            for (role, names) in parser.parse(value) {
                match role.as_str() {
                    "cast" => meta.actors.extend(names),
                    "directors" => meta.directors.extend(names),
                    "producers" => meta.producers.extend(names),
                    "screenwriters" => meta.screenwriters.extend(names),
                    _ => {}
                }
            }
        }
        _ => {}
    }
}
