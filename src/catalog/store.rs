use super::error::{CatalogError, Result};
use super::schema::{latest_version, CATALOG_VERSIONED_SCHEMAS};
use crate::metadata::Song;
use crate::sqlite_persistence::{read_schema_version, write_schema_version};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const INSERT_SONG_SQL: &str = "INSERT INTO songs \
    (path, title, artist, albumartist, album, track, year, genre, composer, copyright) \
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)";

const INSERT_COMMENT_SQL: &str = "INSERT INTO comments (data, song_id) VALUES (?1, ?2)";

const SELECT_SONG_SQL: &str = "SELECT \
    path, title, artist, albumartist, album, track, year, genre, composer, copyright \
    FROM songs WHERE id = ?1";

fn migrate_if_needed(conn: &mut Connection) -> Result<usize> {
    let latest = latest_version();
    let mut current_version = read_schema_version(conn)
        .map_err(|err| CatalogError::SchemaMismatch(format!("{:#}", err)))?;

    if current_version > latest {
        return Err(CatalogError::SchemaTooNew {
            found: current_version,
            supported: latest,
        });
    }

    let start_version = current_version;
    for schema in CATALOG_VERSIONED_SCHEMAS
        .iter()
        .filter(|schema| schema.version > start_version)
    {
        info!(
            "Migrating catalog db from version {} to {}",
            current_version, schema.version
        );
        let tx = conn.transaction()?;
        (schema.migration)(&tx)
            .and_then(|_| write_schema_version(&tx, schema.version))
            .map_err(|err| CatalogError::Migration {
                version: schema.version,
                message: format!("{:#}", err),
            })?;
        tx.commit()?;
        current_version = schema.version;
    }

    if let Some(latest_schema) = CATALOG_VERSIONED_SCHEMAS.last() {
        latest_schema
            .validate(conn)
            .map_err(|err| CatalogError::SchemaMismatch(format!("{:#}", err)))?;
    }
    Ok(current_version)
}

/// Batching writer over the SQLite song catalog.
///
/// Songs handed to [`Catalog::enqueue`] stay in memory until
/// [`Catalog::flush`] writes the whole queue in one transaction.
pub struct Catalog {
    path: PathBuf,
    conn: Option<Connection>,
    pending: Vec<Song>,
}

impl Catalog {
    /// Opens or creates the catalog at `path` and brings its schema up to date.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Catalog> {
        let path = path.as_ref().to_path_buf();
        let mut conn = Connection::open(&path).map_err(|source| CatalogError::Open {
            path: path.clone(),
            source,
        })?;

        let version = migrate_if_needed(&mut conn)?;
        let song_count: i64 = conn.query_row("SELECT COUNT(*) FROM songs", [], |r| r.get(0))?;
        info!(
            "Opened catalog {:?} at schema version {}: {} songs",
            path, version, song_count
        );

        Ok(Catalog {
            path,
            conn: Some(conn),
            pending: Vec::new(),
        })
    }

    pub fn is_closed(&self) -> bool {
        self.conn.is_none()
    }

    /// Songs queued since the last successful flush.
    pub fn pending(&self) -> &[Song] {
        &self.pending
    }

    pub fn enqueue(&mut self, song: Song) {
        self.pending.push(song);
    }

    /// Writes every queued song, with its comments, in a single transaction.
    ///
    /// On failure nothing from the batch is kept in the database and the queue
    /// is left untouched. Returns the number of songs written.
    pub fn flush(&mut self) -> Result<usize> {
        if self.pending.is_empty() {
            return Ok(0);
        }
        let conn = self.conn.as_mut().ok_or(CatalogError::Closed)?;

        let written = insert_batch(conn, &self.pending)?;
        self.pending.clear();
        info!("Flushed {} songs to {:?}", written, self.path);
        Ok(written)
    }

    /// Flushes the queue and releases the connection. The connection is
    /// released even when the flush fails; the unwritten songs remain
    /// available through [`Catalog::pending`]. Closing twice is a no-op.
    pub fn close(&mut self) -> Result<()> {
        if self.conn.is_none() {
            return Ok(());
        }

        let flushed = self.flush().map(|_| ());
        let released = match self.conn.take() {
            Some(conn) => conn.close().map_err(|(_, err)| CatalogError::from(err)),
            None => Ok(()),
        };
        info!("Closed catalog {:?}", self.path);
        flushed.and(released)
    }

    fn connection(&self) -> Result<&Connection> {
        self.conn.as_ref().ok_or(CatalogError::Closed)
    }

    pub fn schema_version(&self) -> Result<usize> {
        read_schema_version(self.connection()?)
            .map_err(|err| CatalogError::SchemaMismatch(format!("{:#}", err)))
    }

    pub fn song_count(&self) -> Result<usize> {
        let count: i64 = self
            .connection()?
            .query_row("SELECT COUNT(*) FROM songs", [], |r| r.get(0))?;
        Ok(count as usize)
    }

    /// Row ids of every stored song, in insertion order.
    pub fn song_ids(&self) -> Result<Vec<i64>> {
        let conn = self.connection()?;
        let mut stmt = conn.prepare("SELECT id FROM songs ORDER BY id")?;
        let ids = stmt
            .query_map([], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<i64>>>()?;
        Ok(ids)
    }

    pub fn get_song(&self, id: i64) -> Result<Option<Song>> {
        let conn = self.connection()?;
        let song = conn
            .query_row(SELECT_SONG_SQL, params![id], |row| {
                Ok(Song {
                    path: row.get(0)?,
                    title: row.get(1)?,
                    artist: row.get(2)?,
                    album_artist: row.get(3)?,
                    album: row.get(4)?,
                    track: row.get(5)?,
                    year: row.get(6)?,
                    genre: row.get(7)?,
                    composer: row.get(8)?,
                    copyright: row.get(9)?,
                    comments: Vec::new(),
                })
            })
            .optional()?;

        let Some(mut song) = song else {
            return Ok(None);
        };

        let mut stmt = conn.prepare("SELECT data FROM comments WHERE song_id = ?1 ORDER BY id")?;
        song.comments = stmt
            .query_map(params![id], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(Some(song))
    }
}

fn insert_batch(conn: &mut Connection, songs: &[Song]) -> rusqlite::Result<usize> {
    let tx = conn.transaction()?;
    {
        let mut insert_song = tx.prepare(INSERT_SONG_SQL)?;
        let mut insert_comment = tx.prepare(INSERT_COMMENT_SQL)?;

        for song in songs {
            let song_id = insert_song.insert(params![
                song.path,
                song.title,
                song.artist,
                song.album_artist,
                song.album,
                song.track,
                song.year,
                song.genre,
                song.composer,
                song.copyright,
            ])?;
            for comment in &song.comments {
                insert_comment.execute(params![comment, song_id])?;
            }
            debug!("Inserted song {} as row {}", song.path, song_id);
        }
    }
    tx.commit()?;
    Ok(songs.len())
}
