use std::collections::{
    BTreeSet,
    HashSet,
};

use crate::core::{
    Catalog,
    StudyItem,
};

/// Mastered-of-total over some slice of the catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Progress {
    pub total: usize,
    pub mastered: usize,
}

impl Progress {
    /// Whole percent, rounded half up. Zero when there is nothing to count.
    pub fn percent(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        ((self.mastered as f64 / self.total as f64) * 100.0).round() as u32
    }

    pub fn fraction(&self) -> f32 {
        if self.total == 0 {
            return 0.0;
        }
        self.mastered as f32 / self.total as f32
    }
}

/// Progress over a whole category, ignoring search and filter state.
pub fn category_progress<T: StudyItem>(items: &[T], mastered_ids: &HashSet<String>) -> Progress {
    let mastered = items.iter().filter(|item| mastered_ids.contains(item.id())).count();
    Progress { total: items.len(), mastered }
}

/// Progress of one set within a category, again over full membership.
pub fn set_progress<T: StudyItem>(
    items: &[T],
    mastered_ids: &HashSet<String>,
    set: u32,
) -> Progress {
    let mut progress = Progress::default();
    for item in items.iter().filter(|item| item.set() == set) {
        progress.total += 1;
        if mastered_ids.contains(item.id()) {
            progress.mastered += 1;
        }
    }
    progress
}

/// Distinct set numbers of a category, ascending.
pub fn set_numbers<T: StudyItem>(items: &[T]) -> Vec<u32> {
    items.iter().map(StudyItem::set).collect::<BTreeSet<u32>>().into_iter().collect()
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ProgressSummary {
    pub kanji: Progress,
    pub vocabulary: Progress,
    pub grammar: Progress,
}

impl ProgressSummary {
    pub fn overall(&self) -> Progress {
        Progress {
            total: self.kanji.total + self.vocabulary.total + self.grammar.total,
            mastered: self.kanji.mastered + self.vocabulary.mastered + self.grammar.mastered,
        }
    }
}

pub fn summarize(catalog: &Catalog, mastered_ids: &HashSet<String>) -> ProgressSummary {
    ProgressSummary {
        kanji: category_progress(&catalog.kanji, mastered_ids),
        vocabulary: category_progress(&catalog.vocabulary, mastered_ids),
        grammar: category_progress(&catalog.grammar, mastered_ids),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::Vocabulary;

    fn vocab(id: &str, set: u32) -> Vocabulary {
        Vocabulary {
            id: id.to_string(),
            written: "勉強".to_string(),
            reading: "べんきょう".to_string(),
            meaning: "Хичээл".to_string(),
            set,
        }
    }

    fn mastered(ids: &[&str]) -> HashSet<String> {
        ids.iter().map(|id| id.to_string()).collect()
    }

    #[test]
    fn test_empty_category_is_zero_percent() {
        let progress = category_progress::<Vocabulary>(&[], &HashSet::new());

        assert_eq!(progress.total, 0);
        assert_eq!(progress.percent(), 0);
        assert_eq!(progress.fraction(), 0.0);
    }

    #[test]
    fn test_percent_rounds_to_nearest() {
        let items = vec![vocab("v1", 1), vocab("v2", 1), vocab("v3", 1)];

        let one_third = category_progress(&items, &mastered(&["v1"]));
        let two_thirds = category_progress(&items, &mastered(&["v1", "v2"]));

        assert_eq!(one_third.percent(), 33);
        assert_eq!(two_thirds.percent(), 67);
    }

    #[test]
    fn test_category_progress_ignores_foreign_ids() {
        let items = vec![vocab("v1", 1), vocab("v2", 1)];

        // k9 belongs to another category and must not count here.
        let progress = category_progress(&items, &mastered(&["v1", "k9"]));

        assert_eq!(progress, Progress { total: 2, mastered: 1 });
    }

    #[test]
    fn test_set_progress_counts_full_membership() {
        let items = vec![vocab("v1", 1), vocab("v2", 1), vocab("v3", 2)];

        let set_one = set_progress(&items, &mastered(&["v1", "v3"]), 1);
        let set_two = set_progress(&items, &mastered(&["v1", "v3"]), 2);

        assert_eq!(set_one, Progress { total: 2, mastered: 1 });
        assert_eq!(set_two, Progress { total: 1, mastered: 1 });
    }

    #[test]
    fn test_set_numbers_are_distinct_and_ascending() {
        let items = vec![vocab("v1", 3), vocab("v2", 1), vocab("v3", 3), vocab("v4", 2)];

        assert_eq!(set_numbers(&items), [1, 2, 3]);
    }

    #[test]
    fn test_overall_sums_categories() {
        let summary = ProgressSummary {
            kanji: Progress { total: 32, mastered: 5 },
            vocabulary: Progress { total: 36, mastered: 4 },
            grammar: Progress { total: 18, mastered: 0 },
        };

        assert_eq!(summary.overall(), Progress { total: 86, mastered: 9 });
        assert_eq!(summary.overall().percent(), 10);
    }
}
