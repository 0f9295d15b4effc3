mod pause;
mod rotation;

use crate::core::state::SegmentEntry;

pub(super) fn segment(title: &str, duration: u32) -> SegmentEntry {
    SegmentEntry {
        title: title.to_string(),
        start_time: "00:00:00".to_string(),
        duration_seconds: duration,
        remaining_seconds: duration,
    }
}

pub(super) fn titles<'a>(queue: impl IntoIterator<Item = &'a SegmentEntry>) -> Vec<&'a str> {
    queue.into_iter().map(|s| s.title.as_str()).collect()
}
