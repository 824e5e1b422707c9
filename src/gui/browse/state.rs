use std::collections::HashSet;

use super::{
    filter::MasteryFilter,
    group::{
        group_by_set,
        SetGroup,
    },
};
use crate::core::Catalog;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Kanji,
    Vocabulary,
    Grammar,
    Progress,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Kanji, Tab::Vocabulary, Tab::Grammar, Tab::Progress];

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Kanji => "📝 Канжи",
            Tab::Vocabulary => "📚 Үгс",
            Tab::Grammar => "📖 Дүрэм",
            Tab::Progress => "📊 Статистик",
        }
    }

    /// Search and filter controls only apply to the three content tabs.
    pub fn browses_content(&self) -> bool {
        !matches!(self, Tab::Progress)
    }
}

/// Current tab, filter and search text, plus the derived set groups. The
/// groups are cached and only recomputed after an input changed.
pub struct BrowseState {
    tab: Tab,
    filter: MasteryFilter,
    search: String,

    dirty: bool,
    kanji_groups: Vec<SetGroup>,
    vocabulary_groups: Vec<SetGroup>,
    grammar_groups: Vec<SetGroup>,
}

impl Default for BrowseState {
    fn default() -> Self {
        Self {
            tab: Tab::default(),
            filter: MasteryFilter::default(),
            search: String::new(),
            dirty: true,
            kanji_groups: Vec::new(),
            vocabulary_groups: Vec::new(),
            grammar_groups: Vec::new(),
        }
    }
}

impl BrowseState {
    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn set_tab(&mut self, tab: Tab) {
        self.tab = tab;
    }

    pub fn filter(&self) -> MasteryFilter {
        self.filter
    }

    pub fn set_filter(&mut self, filter: MasteryFilter) {
        if self.filter != filter {
            self.filter = filter;
            self.dirty = true;
        }
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, search: String) {
        if self.search != search {
            self.search = search;
            self.dirty = true;
        }
    }

    /// Call after the mastery store changed behind the cache.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Recomputes the cached groups if anything changed since the last
    /// frame. Cheap to call every frame.
    pub fn ensure_groups(&mut self, catalog: &Catalog, mastered_ids: &HashSet<String>) {
        if !self.dirty {
            return;
        }

        self.kanji_groups = group_by_set(&catalog.kanji, mastered_ids, self.filter, &self.search);
        self.vocabulary_groups =
            group_by_set(&catalog.vocabulary, mastered_ids, self.filter, &self.search);
        self.grammar_groups =
            group_by_set(&catalog.grammar, mastered_ids, self.filter, &self.search);
        self.dirty = false;
    }

    pub fn kanji_groups(&self) -> &[SetGroup] {
        &self.kanji_groups
    }

    pub fn vocabulary_groups(&self) -> &[SetGroup] {
        &self.vocabulary_groups
    }

    pub fn grammar_groups(&self) -> &[SetGroup] {
        &self.grammar_groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Catalog;

    #[test]
    fn test_groups_rebuild_only_when_inputs_change() {
        let catalog = Catalog::load_embedded().unwrap();
        let mut mastered_ids = HashSet::new();
        let mut state = BrowseState::default();

        state.ensure_groups(&catalog, &mastered_ids);
        assert!(!state.kanji_groups().is_empty());

        // Same search again leaves the cache clean.
        state.set_search(String::new());
        assert!(!state.dirty);

        state.set_search("勉強".to_string());
        assert!(state.dirty);
        state.ensure_groups(&catalog, &mastered_ids);

        assert!(state.kanji_groups().is_empty());
        assert_eq!(state.vocabulary_groups().len(), 1);

        // A mastery change arrives from outside the state.
        mastered_ids.insert("v1".to_string());
        state.mark_dirty();
        state.set_filter(MasteryFilter::Mastered);
        state.ensure_groups(&catalog, &mastered_ids);

        assert_eq!(state.vocabulary_groups().len(), 1);
        assert_eq!(state.vocabulary_groups()[0].mastered, 1);
    }

    #[test]
    fn test_filter_change_marks_dirty() {
        let mut state = BrowseState::default();
        state.dirty = false;

        state.set_filter(MasteryFilter::All);
        assert!(!state.dirty);

        state.set_filter(MasteryFilter::Learning);
        assert!(state.dirty);
    }
}
