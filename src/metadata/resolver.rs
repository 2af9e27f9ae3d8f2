use super::models::Song;
use super::path_info::PathInfo;
use super::tag_info::TagInfo;
use crate::tag_reader::TagHandle;
use std::path::Path;

/// Builds a [`Song`] from its path relative to the library root and, when the
/// file carries one, its tag container.
///
/// Path conventions seed artist, album, title and track. Non-empty tag values
/// replace those; genre, year, album artist, copyright, composer and comments
/// come only from the tag. `path` is left for the caller to fill in.
pub fn resolve(relative_path: &Path, tag: Option<&dyn TagHandle>) -> Song {
    let path_info = PathInfo::infer(relative_path);
    let mut song = Song {
        artist: path_info.artist.unwrap_or_default(),
        album: path_info.album.unwrap_or_default(),
        title: path_info.title.unwrap_or_default(),
        track: path_info.track.unwrap_or_default(),
        ..Default::default()
    };

    if let Some(tag) = tag {
        apply_tag_info(&mut song, TagInfo::read(tag));
    }
    song
}

fn apply_tag_info(song: &mut Song, info: TagInfo) {
    if let Some(artist) = info.artist {
        song.artist = artist;
    }
    if let Some(album) = info.album {
        song.album = album;
    }
    if let Some(title) = info.title {
        song.title = title;
    }
    if let Some(track) = info.track {
        song.track = track;
    }
    if let Some(genre) = info.genre {
        song.genre = genre;
    }
    if let Some(year) = info.year {
        song.year = year;
    }
    if let Some(album_artist) = info.album_artist {
        song.album_artist = album_artist;
    }
    if let Some(copyright) = info.copyright {
        song.copyright = copyright;
    }
    if let Some(composer) = info.composer {
        song.composer = composer;
    }
    if !info.comments.is_empty() {
        song.comments = info.comments;
    }
}
