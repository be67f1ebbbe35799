//! Shared-tag relevance ranking for related journal items

use crate::models::ContentItem;

/// Default number of related items shown under an article
pub const DEFAULT_RELATED_LIMIT: usize = 3;

/// Rank the pool by tag overlap with `current` and return the top `limit`.
///
/// The pool is expected in listing order (newest first); ties and backfill
/// preserve that order. `current` is excluded by id. Overlap is the literal
/// intersection count over the tag sequences, so repeated tags on `current`
/// count once per occurrence. Slots left after ranking are backfilled from
/// the pool order regardless of score.
pub fn related_items(
    current: &ContentItem,
    pool: &[ContentItem],
    limit: usize,
) -> Vec<ContentItem> {
    let candidates: Vec<&ContentItem> = pool.iter().filter(|item| item.id != current.id).collect();

    let mut scored: Vec<(usize, &ContentItem)> = candidates
        .iter()
        .map(|item| (tag_overlap(current, item), *item))
        .collect();
    // Stable sort keeps the newest-first pool order among equal scores
    scored.sort_by(|a, b| b.0.cmp(&a.0));

    let mut selected: Vec<&ContentItem> =
        scored.into_iter().take(limit).map(|(_, item)| item).collect();

    if selected.len() < limit {
        for item in &candidates {
            if selected.len() == limit {
                break;
            }
            if selected.iter().any(|chosen| chosen.id == item.id) {
                continue;
            }
            selected.push(item);
        }
    }

    selected.into_iter().cloned().collect()
}

fn tag_overlap(current: &ContentItem, candidate: &ContentItem) -> usize {
    current
        .tags
        .iter()
        .filter(|tag| candidate.tags.contains(tag))
        .count()
}
