use std::collections::{
    BTreeMap,
    HashSet,
};

use super::{
    filter::MasteryFilter,
    search::matches_search,
};
use crate::core::StudyItem;

/// One study set after filtering: indices into the catalog slice the group
/// was derived from, in catalog order, plus the mastered count among them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetGroup {
    pub set: u32,
    pub indices: Vec<usize>,
    pub mastered: usize,
}

impl SetGroup {
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Fill fraction for the group header's progress bar, over the items
    /// actually shown in the group.
    pub fn mastered_fraction(&self) -> f32 {
        if self.indices.is_empty() {
            return 0.0;
        }
        self.mastered as f32 / self.indices.len() as f32
    }
}

/// Applies search and mastery filter, then groups survivors by set number.
/// Groups come back in ascending numeric set order, items keep catalog
/// order inside a group, and empty groups are not emitted.
pub fn group_by_set<T: StudyItem>(
    items: &[T],
    mastered_ids: &HashSet<String>,
    filter: MasteryFilter,
    query: &str,
) -> Vec<SetGroup> {
    let mut sets: BTreeMap<u32, SetGroup> = BTreeMap::new();

    for (index, item) in items.iter().enumerate() {
        let mastered = mastered_ids.contains(item.id());
        if !filter.allows(mastered) {
            continue;
        }
        if !matches_search(item, query) {
            continue;
        }

        let group = sets
            .entry(item.set())
            .or_insert_with(|| SetGroup { set: item.set(), indices: Vec::new(), mastered: 0 });
        group.indices.push(index);
        if mastered {
            group.mastered += 1;
        }
    }

    sets.into_values().collect()
}
