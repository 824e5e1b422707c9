/// Results delivered back to the UI thread from background assist tasks.
/// Each carries the catalog id it was requested for, so stale results can
/// be matched against current UI state and dropped.
#[derive(Debug, Clone)]
pub enum TaskResult {
    GrammarExplanation { id: String, text: String },
    MnemonicStory { id: String, text: String },
}

impl TaskResult {
    pub fn task_type(&self) -> &'static str {
        match self {
            TaskResult::GrammarExplanation { .. } => "grammar_explanation",
            TaskResult::MnemonicStory { .. } => "mnemonic_story",
        }
    }
}
