//! Diary core: pure extraction, formatting and grouping of diary posts.
mod entries;
mod extract;
mod format;
mod group;
mod model;
mod profile;
mod render;

pub use entries::{build_entries, BuiltEntries};
pub use extract::{strip_markup, DiaryExtractor, MarkerExtractor, DIARY_MARKER};
pub use format::{
    format_entry, format_timestamp, resolve_zone, ZoneChoice, INVALID_DATE, INVALID_TIME,
};
pub use group::group_entries;
pub use model::{Account, DiaryEntry, Fragment, RawPost};
pub use profile::{parse_profile_url, ProfileRef, ProfileUrlError};
pub use render::{
    render_document, render_fragments, NO_ENTRIES_PLACEHOLDER, POSTS_PLACEHOLDER,
};
