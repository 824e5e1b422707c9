use crate::gui::browse::{
    MasteryFilter,
    Tab,
};

// A simple ui action queue system so we don't need to pass mutable references to ui functions
#[derive(Debug, Clone)]
pub enum UiAction {
    // Browse state
    SetTab(Tab),
    SetFilter(MasteryFilter),
    SetSearch(String),

    // Mastery
    ToggleMastery(String),
    OpenResetConfirm,

    // Detail and assist
    OpenKanjiDetail(String),
    ToggleGrammarExplanation(String),
    RequestMnemonic(String),
}

pub struct ActionQueue {
    actions: Vec<UiAction>,
}

impl ActionQueue {
    pub fn new() -> Self {
        Self { actions: Vec::new() }
    }

    pub fn push(&mut self, action: UiAction) {
        self.actions.push(action);
    }

    pub fn drain(&mut self) -> std::vec::Drain<'_, UiAction> {
        self.actions.drain(..)
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}
