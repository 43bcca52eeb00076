use crate::{DiaryEntry, Fragment};

/// Groups consecutive entries sharing a date under one header.
///
/// Entries are taken in the given order; nothing is re-sorted. A divider
/// precedes every header except the first.
pub fn group_entries(entries: &[DiaryEntry]) -> Vec<Fragment> {
    let mut fragments = Vec::with_capacity(entries.len() * 2);
    let mut last_date: Option<&str> = None;

    for entry in entries {
        if last_date != Some(entry.date.as_str()) {
            if last_date.is_some() {
                fragments.push(Fragment::Divider);
            }
            fragments.push(Fragment::DateHeader(entry.date.clone()));
            last_date = Some(entry.date.as_str());
        }
        fragments.push(Fragment::Entry {
            time: entry.time.clone(),
            text: entry.text.clone(),
        });
    }

    fragments
}
