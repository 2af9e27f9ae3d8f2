/// Resolved metadata for one audio file.
///
/// `path` always comes from the walk. `year` and `track` use 0 for unknown and
/// `comments` never holds empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Song {
    pub path: String,
    pub artist: String,
    pub album_artist: String,
    pub album: String,
    pub title: String,
    pub year: i32,
    pub track: u32,
    pub genre: String,
    pub composer: String,
    pub copyright: String,
    pub comments: Vec<String>,
}
