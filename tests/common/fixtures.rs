use id3::Version;
use song_indexer::{Id3TagReader, Song, Walker};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Stand-in for audio frames. Tag readers never look past the containers.
const AUDIO_FILLER: [u8; 256] = [0u8; 256];

pub struct TestLibrary {
    root: TempDir,
}

#[allow(dead_code)]
impl TestLibrary {
    pub fn new() -> Self {
        TestLibrary {
            root: TempDir::new().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.root.path()
    }

    /// Absolute path a scan reports for `relative`.
    pub fn scanned_path(&self, relative: &str) -> String {
        self.root
            .path()
            .canonicalize()
            .unwrap()
            .join(relative)
            .to_string_lossy()
            .into_owned()
    }

    fn write_file(&self, relative: &str, content: &[u8]) -> PathBuf {
        let path = self.root.path().join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
        path
    }

    pub fn add_untagged(&self, relative: &str) -> PathBuf {
        self.write_file(relative, &AUDIO_FILLER)
    }

    pub fn add_v2(
        &self,
        relative: &str,
        version: Version,
        build: impl FnOnce(&mut id3::Tag),
    ) -> PathBuf {
        let path = self.add_untagged(relative);
        let mut tag = id3::Tag::new();
        build(&mut tag);
        tag.write_to_path(&path, version).unwrap();
        path
    }

    pub fn add_v23(&self, relative: &str, build: impl FnOnce(&mut id3::Tag)) -> PathBuf {
        self.add_v2(relative, Version::Id3v23, build)
    }

    pub fn add_v1(&self, relative: &str, trailer: &V1Trailer) -> PathBuf {
        let mut content = AUDIO_FILLER.to_vec();
        content.extend_from_slice(&trailer.to_bytes());
        self.write_file(relative, &content)
    }

    /// Writes a hand-built ID3v2.2 container. The `id3` crate cannot write
    /// this version, so frames are laid out byte by byte as Latin-1 text.
    pub fn add_v22(&self, relative: &str, frames: &[(&str, &str)]) -> PathBuf {
        let mut body = Vec::new();
        for (id, text) in frames {
            assert_eq!(id.len(), 3);
            let size = text.len() + 1;
            body.extend_from_slice(id.as_bytes());
            body.extend_from_slice(&[(size >> 16) as u8, (size >> 8) as u8, size as u8]);
            body.push(0);
            body.extend_from_slice(text.as_bytes());
        }

        let size = body.len();
        let mut content = b"ID3".to_vec();
        content.extend_from_slice(&[2, 0, 0]);
        content.extend_from_slice(&[
            ((size >> 21) & 0x7f) as u8,
            ((size >> 14) & 0x7f) as u8,
            ((size >> 7) & 0x7f) as u8,
            (size & 0x7f) as u8,
        ]);
        content.extend(body);
        content.extend_from_slice(&AUDIO_FILLER);
        self.write_file(relative, &content)
    }

    /// Walks the library with the ID3 reader and collects every song.
    pub fn scan(&self) -> Vec<Song> {
        let mut songs = Vec::new();
        Walker::new(self.root.path(), Id3TagReader::new())
            .walk(|song| {
                songs.push(song);
                Ok(())
            })
            .unwrap();
        songs
    }
}

/// Raw 128-byte ID3v1 trailer. Text fields are NUL padded; a track number
/// turns it into a v1.1 trailer.
#[derive(Debug, Clone)]
pub struct V1Trailer {
    pub title: &'static str,
    pub artist: &'static str,
    pub album: &'static str,
    pub year: &'static str,
    pub comment: &'static str,
    pub track: Option<u8>,
    pub genre: u8,
}

impl Default for V1Trailer {
    fn default() -> Self {
        V1Trailer {
            title: "",
            artist: "",
            album: "",
            year: "",
            comment: "",
            track: None,
            genre: 255,
        }
    }
}

fn padded(value: &str, len: usize) -> Vec<u8> {
    let mut bytes = value.as_bytes().to_vec();
    bytes.resize(len, 0);
    bytes
}

impl V1Trailer {
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = b"TAG".to_vec();
        bytes.extend(padded(self.title, 30));
        bytes.extend(padded(self.artist, 30));
        bytes.extend(padded(self.album, 30));
        bytes.extend(padded(self.year, 4));
        match self.track {
            Some(track) => {
                bytes.extend(padded(self.comment, 28));
                bytes.push(0);
                bytes.push(track);
            }
            None => bytes.extend(padded(self.comment, 30)),
        }
        bytes.push(self.genre);
        assert_eq!(bytes.len(), 128);
        bytes
    }
}
