use super::{TagError, TagField, TagHandle, TagReader};
use id3::{TagLike, Version};
use std::path::Path;

/// Reads ID3 tags, preferring a v2 container and falling back to a v1 trailer.
#[derive(Debug, Default, Clone, Copy)]
pub struct Id3TagReader;

impl Id3TagReader {
    pub fn new() -> Self {
        Self
    }
}

impl TagReader for Id3TagReader {
    fn open(&self, path: &Path) -> Result<Box<dyn TagHandle>, TagError> {
        match id3::Tag::read_from_path(path) {
            Ok(tag) => Ok(Box::new(Id3v2Handle { tag })),
            Err(v2_err) => match id3::v1::Tag::read_from_path(path) {
                Ok(tag) => Ok(Box::new(Id3v1Handle { tag })),
                Err(_) => Err(v2_err.into()),
            },
        }
    }
}

/// v2.2 identifiers and the v2.3 identifiers the `id3` crate stores them under.
const V22_FRAME_UPGRADES: &[(&str, &str)] = &[
    ("TRK", "TRCK"),
    ("TP2", "TPE2"),
    ("TCR", "TCOP"),
    ("TCM", "TCOM"),
];

fn upgraded_frame_id(frame_id: &str) -> &str {
    V22_FRAME_UPGRADES
        .iter()
        .find(|(short, _)| *short == frame_id)
        .map(|(_, long)| *long)
        .unwrap_or(frame_id)
}

struct Id3v2Handle {
    tag: id3::Tag,
}

impl TagHandle for Id3v2Handle {
    fn version(&self) -> String {
        match self.tag.version() {
            Version::Id3v22 => "2.2.0",
            Version::Id3v23 => "2.3.0",
            Version::Id3v24 => "2.4.0",
        }
        .to_string()
    }

    fn field(&self, field: TagField) -> Option<String> {
        match field {
            TagField::Artist => self.tag.artist().map(str::to_owned),
            TagField::Album => self.tag.album().map(str::to_owned),
            TagField::Title => self.tag.title().map(str::to_owned),
            TagField::Genre => self.tag.genre().map(str::to_owned),
            TagField::Year => self
                .tag
                .year()
                .or_else(|| self.tag.date_recorded().map(|recorded| recorded.year))
                .map(|year| year.to_string()),
        }
    }

    fn frame(&self, frame_id: &str) -> Option<String> {
        let stored_id = match self.tag.version() {
            Version::Id3v22 => upgraded_frame_id(frame_id),
            _ => frame_id,
        };
        self.tag
            .get(stored_id)
            .and_then(|frame| frame.content().text())
            .map(str::to_owned)
    }

    fn comments(&self) -> Vec<String> {
        self.tag
            .comments()
            .map(|comment| comment.text.clone())
            .collect()
    }
}

struct Id3v1Handle {
    tag: id3::v1::Tag,
}

impl TagHandle for Id3v1Handle {
    fn version(&self) -> String {
        // v1.1 steals the last two comment bytes for a track number
        if self.tag.track.is_some() {
            "1.1".to_string()
        } else {
            "1.0".to_string()
        }
    }

    fn field(&self, field: TagField) -> Option<String> {
        let value = match field {
            TagField::Artist => &self.tag.artist,
            TagField::Album => &self.tag.album,
            TagField::Title => &self.tag.title,
            TagField::Year => &self.tag.year,
            TagField::Genre => return self.tag.genre().map(str::to_owned),
        };
        Some(value.clone())
    }

    fn frame(&self, _frame_id: &str) -> Option<String> {
        None
    }

    fn comments(&self) -> Vec<String> {
        vec![self.tag.comment.clone()]
    }
}
