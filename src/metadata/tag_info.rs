use crate::tag_reader::{TagField, TagHandle};

/// Tag container layout, as classified from the reported version string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagVersion {
    /// Fixed-width ID3v1 trailer.
    LegacyV1,
    /// ID3v2.2, three character frame identifiers.
    ShortFrame,
    /// ID3v2.3 and ID3v2.4, four character frame identifiers.
    LongFrame,
    Unknown,
}

impl TagVersion {
    pub fn classify(version: &str) -> Self {
        if version.starts_with('1') {
            TagVersion::LegacyV1
        } else if version.starts_with("2.2") {
            TagVersion::ShortFrame
        } else if version.starts_with("2.3") || version.starts_with("2.4") {
            TagVersion::LongFrame
        } else {
            TagVersion::Unknown
        }
    }
}

/// Fields only reachable through version-specific frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtendedField {
    Track,
    AlbumArtist,
    Copyright,
    Composer,
}

/// Frame identifiers per field, indexed as (legacy, short, long, unknown).
/// An empty identifier means the field has no frame in that layout.
const FRAME_IDS: &[(ExtendedField, [&str; 4])] = &[
    (ExtendedField::Track, ["", "TRK", "TRCK", ""]),
    (ExtendedField::AlbumArtist, ["", "TP2", "TPE2", ""]),
    (ExtendedField::Copyright, ["", "TCR", "TCOP", ""]),
    (ExtendedField::Composer, ["", "TCM", "TCOM", ""]),
];

pub fn frame_id(field: ExtendedField, version: TagVersion) -> Option<&'static str> {
    let column = match version {
        TagVersion::LegacyV1 => 0,
        TagVersion::ShortFrame => 1,
        TagVersion::LongFrame => 2,
        TagVersion::Unknown => 3,
    };
    FRAME_IDS
        .iter()
        .find(|(candidate, _)| *candidate == field)
        .map(|(_, ids)| ids[column])
        .filter(|id| !id.is_empty())
}

/// Cuts a tag string at its first NUL; fixed-width frames are padded with them.
pub fn sanitize(value: &str) -> &str {
    match value.find('\0') {
        Some(end) => &value[..end],
        None => value,
    }
}

/// Sanitized, non-empty values read from a tag container.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagInfo {
    pub version: Option<TagVersion>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub title: Option<String>,
    pub track: Option<u32>,
    pub genre: Option<String>,
    pub year: Option<i32>,
    pub album_artist: Option<String>,
    pub copyright: Option<String>,
    pub composer: Option<String>,
    pub comments: Vec<String>,
}

impl TagInfo {
    pub fn read(tag: &dyn TagHandle) -> Self {
        let version = TagVersion::classify(&tag.version());
        let field = |field: TagField| tag.field(field).and_then(non_empty);
        let frame = |field: ExtendedField| {
            frame_id(field, version)
                .and_then(|id| tag.frame(id))
                .and_then(non_empty)
        };

        TagInfo {
            version: Some(version),
            artist: field(TagField::Artist),
            album: field(TagField::Album),
            title: field(TagField::Title),
            genre: field(TagField::Genre),
            year: field(TagField::Year).and_then(|year| year.trim().parse().ok()),
            track: frame(ExtendedField::Track).and_then(|track| parse_track(&track)),
            album_artist: frame(ExtendedField::AlbumArtist),
            copyright: frame(ExtendedField::Copyright),
            composer: frame(ExtendedField::Composer),
            comments: tag
                .comments()
                .iter()
                .map(|comment| sanitize(comment))
                .filter(|comment| !comment.is_empty())
                .map(str::to_owned)
                .collect(),
        }
    }
}

fn non_empty(value: String) -> Option<String> {
    let value = sanitize(&value);
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Parses `N` or the `N/M` position-in-set form.
fn parse_track(value: &str) -> Option<u32> {
    let head = value.split('/').next().unwrap_or(value).trim();
    head.parse().ok()
}
