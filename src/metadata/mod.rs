//! Metadata resolution: path conventions merged with embedded tags.

mod models;
mod path_info;
mod resolver;
mod tag_info;

pub use models::Song;
pub use path_info::PathInfo;
pub use resolver::resolve;
pub use tag_info::{frame_id, sanitize, ExtendedField, TagInfo, TagVersion};
