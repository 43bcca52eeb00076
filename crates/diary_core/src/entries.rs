use chrono_tz::Tz;

use crate::{format_entry, DiaryEntry, DiaryExtractor, RawPost, INVALID_DATE};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BuiltEntries {
    pub entries: Vec<DiaryEntry>,
    /// Posts that were replies, empty, or not diary entries.
    pub skipped: usize,
    /// Entries whose timestamp could not be parsed.
    pub invalid_timestamps: usize,
}

/// Runs extraction and formatting over posts in fetch order.
pub fn build_entries(
    posts: &[RawPost],
    extractor: &dyn DiaryExtractor,
    zone: Tz,
) -> BuiltEntries {
    let mut built = BuiltEntries::default();
    for post in posts {
        match extractor.extract(post) {
            Some(text) => {
                let entry = format_entry(post, &text, zone);
                if entry.date == INVALID_DATE {
                    built.invalid_timestamps += 1;
                }
                built.entries.push(entry);
            }
            None => built.skipped += 1,
        }
    }
    built
}
