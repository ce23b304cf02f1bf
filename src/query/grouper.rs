//! Clustering of match offsets
//!
//! Occurrences whose rendered context windows would overlap are merged into
//! one [`MatchGroup`] so they render as a single snippet. Merging is
//! transitive: a run of offsets where each neighbour is within tolerance of
//! the previous one forms one group, however long the run is.

use std::mem;

/// Ordered, non-empty run of chain-close match offsets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchGroup {
    offsets: Vec<usize>,
}

impl MatchGroup {
    /// Offsets in ascending order
    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }

    pub fn first(&self) -> usize {
        self.offsets[0]
    }

    pub fn last(&self) -> usize {
        self.offsets[self.offsets.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    /// Always false; groups are never constructed empty
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    pub fn into_offsets(self) -> Vec<usize> {
        self.offsets
    }
}

/// Tolerance under which two occurrences' context windows would overlap
///
/// Two matches `lookaround` bytes of context apart on each side touch once
/// their starts are `2 * lookaround + query_len` apart.
pub fn merge_tolerance(lookaround: usize, query_len: usize) -> usize {
    lookaround.saturating_mul(2).saturating_add(query_len)
}

/// Sort offsets and split them into groups
///
/// A new group starts whenever the gap to the previously placed offset
/// exceeds `tolerance`. Duplicate offsets are kept and land in the same
/// group. Groups come out ordered by their first offset.
pub fn group_offsets(mut offsets: Vec<usize>, tolerance: usize) -> Vec<MatchGroup> {
    offsets.sort_unstable();

    let mut groups = Vec::new();
    let mut current: Vec<usize> = Vec::new();
    let mut last: Option<usize> = None;

    for offset in offsets {
        let starts_new = match last {
            Some(prev) => offset - prev > tolerance,
            None => true,
        };

        if starts_new && !current.is_empty() {
            groups.push(MatchGroup {
                offsets: mem::take(&mut current),
            });
        }

        current.push(offset);
        last = Some(offset);
    }

    if !current.is_empty() {
        groups.push(MatchGroup { offsets: current });
    }

    groups
}
