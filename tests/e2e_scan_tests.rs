//! End-to-end tests for walking a library with the ID3 tag reader.

mod common;

use common::{TestLibrary, V1Trailer};
use id3::frame::Comment;
use id3::{TagLike, Timestamp, Version};
use song_indexer::tag_reader::{Id3TagReader, TagError, TagReader};
use song_indexer::Song;

fn comment(description: &str, text: &str) -> Comment {
    Comment {
        lang: "eng".to_string(),
        description: description.to_string(),
        text: text.to_string(),
    }
}

#[test]
fn test_untagged_file_uses_path_conventions() {
    let library = TestLibrary::new();
    library.add_untagged("Foo/Bar/01 - Baz.mp3");

    let songs = library.scan();
    assert_eq!(
        songs,
        vec![Song {
            path: library.scanned_path("Foo/Bar/01 - Baz.mp3"),
            artist: "Foo".to_string(),
            album: "Bar".to_string(),
            title: "Baz".to_string(),
            track: 1,
            ..Default::default()
        }]
    );
}

#[test]
fn test_v23_tag_overrides_path_values() {
    let library = TestLibrary::new();
    library.add_v23("Foo/Bar/01 - Baz.mp3", |tag| {
        tag.set_artist("Foo dude");
        tag.set_album("Bar fight");
        tag.set_title("Baz qux");
        tag.set_text("TRCK", "05");
    });

    let songs = library.scan();
    assert_eq!(
        songs,
        vec![Song {
            path: library.scanned_path("Foo/Bar/01 - Baz.mp3"),
            artist: "Foo dude".to_string(),
            album: "Bar fight".to_string(),
            title: "Baz qux".to_string(),
            track: 5,
            ..Default::default()
        }]
    );
}

#[test]
fn test_v23_partial_tag_keeps_path_values() {
    let library = TestLibrary::new();
    library.add_v23("Foo/Bar/03 - Baz.mp3", |tag| tag.set_artist("Foo dude"));

    let song = &library.scan()[0];
    assert_eq!(song.artist, "Foo dude");
    assert_eq!(song.album, "Bar");
    assert_eq!(song.title, "Baz");
    assert_eq!(song.track, 3);
}

#[test]
fn test_v23_tag_only_fields() {
    let library = TestLibrary::new();
    library.add_v23("Foo/Bar/01 - Baz.mp3", |tag| {
        tag.set_year(2014);
        tag.set_genre("Stuff");
        tag.set_album_artist("Qux");
        tag.set_text("TCOP", "Bro");
        tag.set_text("TCOM", "Dude");
        tag.add_frame(comment("first", "Foo"));
        tag.add_frame(comment("second", "Bar"));
    });

    let song = &library.scan()[0];
    assert_eq!(song.year, 2014);
    assert_eq!(song.genre, "Stuff");
    assert_eq!(song.album_artist, "Qux");
    assert_eq!(song.copyright, "Bro");
    assert_eq!(song.composer, "Dude");
    assert_eq!(song.comments, vec!["Foo".to_string(), "Bar".to_string()]);
}

#[test]
fn test_v24_track_with_total() {
    let library = TestLibrary::new();
    library.add_v2("Foo/Bar/01 - Baz.mp3", Version::Id3v24, |tag| {
        tag.set_text("TRCK", "05/12");
    });

    assert_eq!(library.scan()[0].track, 5);
}

#[test]
fn test_v24_year_from_recording_time() {
    let library = TestLibrary::new();
    library.add_v2("Foo/Bar/01 - Baz.mp3", Version::Id3v24, |tag| {
        tag.set_date_recorded(Timestamp {
            year: 2014,
            month: Some(3),
            day: None,
            hour: None,
            minute: None,
            second: None,
        });
    });

    assert_eq!(library.scan()[0].year, 2014);
}

#[test]
fn test_v22_container_frames() {
    let library = TestLibrary::new();
    let path = library.add_v22(
        "Foo/Bar/01 - Baz.mp3",
        &[
            ("TT2", "Baz qux"),
            ("TP1", "Foo dude"),
            ("TRK", "05"),
            ("TP2", "Various"),
            ("TCM", "Dude"),
            ("TCR", "Bro"),
        ],
    );
    assert_eq!(Id3TagReader::new().open(&path).unwrap().version(), "2.2.0");

    let songs = library.scan();
    assert_eq!(
        songs,
        vec![Song {
            path: library.scanned_path("Foo/Bar/01 - Baz.mp3"),
            artist: "Foo dude".to_string(),
            album_artist: "Various".to_string(),
            album: "Bar".to_string(),
            title: "Baz qux".to_string(),
            track: 5,
            composer: "Dude".to_string(),
            copyright: "Bro".to_string(),
            ..Default::default()
        }]
    );
}

#[test]
fn test_v1_trailer() {
    let library = TestLibrary::new();
    library.add_v1(
        "Foo/Bar/01 - Baz.mp3",
        &V1Trailer {
            title: "Baz qux",
            artist: "Foo dude",
            album: "Bar fight",
            year: "1999",
            comment: "Nice",
            track: Some(7),
            genre: 17,
        },
    );

    let song = &library.scan()[0];
    assert_eq!(song.artist, "Foo dude");
    assert_eq!(song.album, "Bar fight");
    assert_eq!(song.title, "Baz qux");
    assert_eq!(song.year, 1999);
    assert_eq!(song.genre, "Rock");
    assert_eq!(song.comments, vec!["Nice".to_string()]);
    // v1 has no track frame, so the file name still decides.
    assert_eq!(song.track, 1);
}

#[test]
fn test_v1_empty_fields_keep_path_values() {
    let library = TestLibrary::new();
    library.add_v1("Foo/Bar/02 - Baz.mp3", &V1Trailer::default());

    let songs = library.scan();
    assert_eq!(
        songs,
        vec![Song {
            path: library.scanned_path("Foo/Bar/02 - Baz.mp3"),
            artist: "Foo".to_string(),
            album: "Bar".to_string(),
            title: "Baz".to_string(),
            track: 2,
            ..Default::default()
        }]
    );
}

#[test]
fn test_v2_container_wins_over_v1_trailer() {
    let library = TestLibrary::new();
    let path = library.add_v1(
        "Foo/Bar/01 - Baz.mp3",
        &V1Trailer {
            artist: "Legacy",
            ..Default::default()
        },
    );
    let mut tag = id3::Tag::new();
    tag.set_artist("Modern");
    tag.write_to_path(&path, Version::Id3v23).unwrap();

    assert_eq!(library.scan()[0].artist, "Modern");
}

#[test]
fn test_two_segment_path_has_no_album() {
    let library = TestLibrary::new();
    library.add_untagged("Foo/04 - Baz.mp3");

    let song = &library.scan()[0];
    assert_eq!(song.artist, "Foo");
    assert_eq!(song.album, "");
    assert_eq!(song.title, "Baz");
    assert_eq!(song.track, 4);
}

#[test]
fn test_every_regular_file_is_emitted_in_order() {
    let library = TestLibrary::new();
    library.add_untagged("B/Y/01 - b.mp3");
    library.add_untagged("A/X/cover.jpg");
    library.add_untagged("A/X/01 - a.mp3");
    std::fs::create_dir_all(library.path().join("C/Empty")).unwrap();

    let paths: Vec<String> = library.scan().into_iter().map(|song| song.path).collect();
    assert_eq!(
        paths,
        vec![
            library.scanned_path("A/X/01 - a.mp3"),
            library.scanned_path("A/X/cover.jpg"),
            library.scanned_path("B/Y/01 - b.mp3"),
        ]
    );
}

#[test]
fn test_reader_reports_container_versions() {
    let library = TestLibrary::new();
    let v23 = library.add_v23("a.mp3", |tag| tag.set_title("a"));
    let v24 = library.add_v2("b.mp3", Version::Id3v24, |tag| tag.set_title("b"));
    let v10 = library.add_v1(
        "c.mp3",
        &V1Trailer {
            title: "c",
            ..Default::default()
        },
    );
    let v11 = library.add_v1(
        "d.mp3",
        &V1Trailer {
            title: "d",
            track: Some(3),
            ..Default::default()
        },
    );

    let reader = Id3TagReader::new();
    assert_eq!(reader.open(&v23).unwrap().version(), "2.3.0");
    assert_eq!(reader.open(&v24).unwrap().version(), "2.4.0");
    assert_eq!(reader.open(&v10).unwrap().version(), "1.0");
    assert_eq!(reader.open(&v11).unwrap().version(), "1.1");
}

#[test]
fn test_reader_without_container_reports_no_tag() {
    let library = TestLibrary::new();
    let path = library.add_untagged("Foo/Bar/01 - Baz.mp3");

    assert!(matches!(
        Id3TagReader::new().open(&path),
        Err(TagError::NoTag)
    ));
}
