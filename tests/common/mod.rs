//! Common test infrastructure
//!
//! Builds throwaway music libraries on disk with real ID3 containers.
//!
//! # Example
//!
//! ```no_run
//! mod common;
//! use common::TestLibrary;
//!
//! #[test]
//! fn test_scan() {
//!     let library = TestLibrary::new();
//!     library.add_v23("Foo/Bar/01 - Baz.mp3", |tag| tag.set_artist("Foo dude"));
//!     let songs = library.scan();
//!     assert_eq!(songs[0].artist, "Foo dude");
//! }
//! ```

mod fixtures;

// Each test binary uses its own subset.
#[allow(unused_imports)]
pub use fixtures::{TestLibrary, V1Trailer};
