//! SQLite schema history for the song catalog.
//!
//! Songs get an integer surrogate key at insert time; comments point back at
//! it through `song_id`.

use crate::sqlite_column;
use crate::sqlite_persistence::{
    Column, ForeignKey, ForeignKeyOnChange, SqlType, Table, VersionedSchema,
};
use rusqlite::Connection;

pub const SONGS_TABLE_V_1: Table = Table {
    name: "songs",
    columns: &[
        sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("path", &SqlType::Text),
        sqlite_column!("title", &SqlType::Text),
        sqlite_column!("artist", &SqlType::Text),
        sqlite_column!("albumartist", &SqlType::Text),
        sqlite_column!("album", &SqlType::Text),
        sqlite_column!("track", &SqlType::Integer),
        sqlite_column!("year", &SqlType::Integer),
        sqlite_column!("genre", &SqlType::Text),
        sqlite_column!("composer", &SqlType::Text),
        sqlite_column!("copyright", &SqlType::Text),
    ],
    indices: &[],
};

pub const COMMENTS_TABLE_V_1: Table = Table {
    name: "comments",
    columns: &[
        sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("data", &SqlType::Text),
        sqlite_column!(
            "song_id",
            &SqlType::Integer,
            foreign_key = Some(&ForeignKey {
                foreign_table: "songs",
                foreign_column: "id",
                on_delete: ForeignKeyOnChange::NoAction,
            })
        ),
    ],
    indices: &[],
};

pub const SONGS_TABLE_V_2: Table = Table {
    indices: &[("idx_songs_path", "path")],
    ..SONGS_TABLE_V_1
};

pub const COMMENTS_TABLE_V_2: Table = Table {
    indices: &[("idx_comments_song_id", "song_id")],
    ..COMMENTS_TABLE_V_1
};

pub const CATALOG_VERSIONED_SCHEMAS: &[VersionedSchema] = &[
    VersionedSchema {
        version: 1,
        tables: &[SONGS_TABLE_V_1, COMMENTS_TABLE_V_1],
        migration: |conn: &Connection| {
            SONGS_TABLE_V_1.create(conn)?;
            COMMENTS_TABLE_V_1.create(conn)?;
            Ok(())
        },
    },
    VersionedSchema {
        version: 2,
        tables: &[SONGS_TABLE_V_2, COMMENTS_TABLE_V_2],
        migration: |conn: &Connection| {
            SONGS_TABLE_V_2.create_indices(conn)?;
            COMMENTS_TABLE_V_2.create_indices(conn)?;
            Ok(())
        },
    },
];

pub fn latest_version() -> usize {
    CATALOG_VERSIONED_SCHEMAS
        .last()
        .map(|schema| schema.version)
        .unwrap_or(0)
}
