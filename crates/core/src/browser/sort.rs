//! In-place result sorting.

use super::SortKey;
use crate::catalog::GameRecord;

/// Stable ascending sort of `records` by `key`.
///
/// Titles compare case-folded, so "doom" and "Doom" rank equal and keep their
/// relative order.
pub fn sort_records(records: &mut [GameRecord], key: SortKey) {
    match key {
        SortKey::Title => records.sort_by_cached_key(|record| record.title.to_lowercase()),
        SortKey::ReleaseDate => records.sort_by_key(|record| record.release_date),
    }
}
