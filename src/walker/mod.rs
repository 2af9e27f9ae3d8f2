//! Library tree traversal.
//!
//! [`Walker::walk`] visits every regular file under the root depth-first, in
//! file-name order per directory, and hands each resolved [`Song`] to a
//! visitor. [`Walker::spawn`] runs the same walk on its own thread and streams
//! songs through a rendezvous channel, so the walk never runs ahead of the
//! consumer by more than one song.

use crate::metadata::{resolve, Song};
use crate::tag_reader::TagReader;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, SyncSender};
use std::thread::{self, JoinHandle};
use thiserror::Error;
use tracing::{debug, info};
use walkdir::WalkDir;

#[derive(Debug, Error)]
pub enum WalkError {
    #[error("Failed to resolve library root {path:?}: {source}")]
    Root {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to read library tree: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Song consumer stopped receiving")]
    ConsumerGone,

    #[error("Walker thread panicked")]
    ProducerPanicked,
}

pub struct Walker<R> {
    root: PathBuf,
    reader: R,
}

impl<R: TagReader> Walker<R> {
    pub fn new(root: impl Into<PathBuf>, reader: R) -> Self {
        Self {
            root: root.into(),
            reader,
        }
    }

    /// Walks the tree, passing each song to `visit`. Returns how many songs
    /// were visited. The first error, from the tree or from `visit`, ends the
    /// walk.
    pub fn walk<F>(&self, mut visit: F) -> Result<usize, WalkError>
    where
        F: FnMut(Song) -> Result<(), WalkError>,
    {
        let root = self
            .root
            .canonicalize()
            .map_err(|source| WalkError::Root {
                path: self.root.clone(),
                source,
            })?;
        info!("Walking library at {:?}", root);

        let mut visited = 0usize;
        for entry in WalkDir::new(&root)
            .follow_links(false)
            .min_depth(1)
            .sort_by_file_name()
        {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }

            let absolute_path = entry.path();
            let relative_path = match absolute_path.strip_prefix(&root) {
                Ok(relative) => relative,
                Err(_) => absolute_path,
            };

            let tag = match self.reader.open(absolute_path) {
                Ok(tag) => Some(tag),
                Err(err) => {
                    debug!("No usable tags in {:?}: {}", absolute_path, err);
                    None
                }
            };

            let mut song = resolve(relative_path, tag.as_deref());
            song.path = absolute_path.to_string_lossy().into_owned();
            visit(song)?;
            visited += 1;
        }

        info!("Walk of {:?} finished, {} songs", root, visited);
        Ok(visited)
    }
}

impl<R: TagReader + 'static> Walker<R> {
    /// Starts the walk on a background thread and returns the receiving end.
    pub fn spawn(self) -> SongStream {
        let (sender, receiver) = mpsc::sync_channel(0);
        let handle = thread::spawn(move || self.walk(|song| send(&sender, song)));
        SongStream {
            receiver,
            handle: Some(handle),
        }
    }
}

fn send(sender: &SyncSender<Song>, song: Song) -> Result<(), WalkError> {
    sender.send(song).map_err(|_| WalkError::ConsumerGone)
}

/// Songs produced by a spawned walk, in walk order.
pub struct SongStream {
    receiver: Receiver<Song>,
    handle: Option<JoinHandle<Result<usize, WalkError>>>,
}

impl Iterator for SongStream {
    type Item = Song;

    fn next(&mut self) -> Option<Song> {
        self.receiver.recv().ok()
    }
}

impl SongStream {
    /// Stops receiving and waits for the walk to end, returning its outcome.
    /// Called before the stream is drained, the walk fails with
    /// [`WalkError::ConsumerGone`].
    pub fn finish(self) -> Result<usize, WalkError> {
        let SongStream { receiver, handle } = self;
        drop(receiver);
        match handle {
            Some(handle) => handle.join().map_err(|_| WalkError::ProducerPanicked)?,
            None => Ok(0),
        }
    }
}
