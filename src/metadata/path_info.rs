use lazy_static::lazy_static;
use regex::Regex;
use std::path::{Component, Path};

lazy_static! {
    /// `NN - Title.ext` with a three character extension.
    static ref FILE_NAME_PATTERN: Regex =
        Regex::new(r"^(\d+)\s*-\s*(.+)\.[A-Za-z0-9_]{3}$").expect("valid file name pattern");
}

/// Metadata implied by a path laid out as `Artist/Album/NN - Title.ext`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathInfo {
    pub artist: Option<String>,
    pub album: Option<String>,
    pub title: Option<String>,
    pub track: Option<u32>,
}

impl PathInfo {
    pub fn infer(relative_path: &Path) -> Self {
        let segments: Vec<String> = relative_path
            .components()
            .filter_map(|component| match component {
                Component::Normal(segment) => Some(segment.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect();

        let mut info = PathInfo::default();
        let n = segments.len();
        if n > 2 {
            info.artist = Some(segments[n - 3].clone());
            info.album = Some(segments[n - 2].clone());
        } else if n == 2 {
            info.artist = Some(segments[0].clone());
        }

        if let Some(file_name) = segments.last() {
            if let Some(captures) = FILE_NAME_PATTERN.captures(file_name) {
                // An overflowing track number still yields the title
                info.track = captures[1].parse().ok();
                info.title = Some(captures[2].to_string());
            }
        }

        info
    }
}
