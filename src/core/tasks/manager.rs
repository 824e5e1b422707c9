use std::{
    sync::{
        mpsc,
        Arc,
    },
    thread,
};

use tokio::runtime::Runtime;

use super::TaskResult;
use crate::assist::AssistClient;

/// Runs assist requests off the UI thread. Each frame the app drains
/// finished results with `poll_results` and applies them to its state.
pub struct TaskManager {
    runtime: Arc<Runtime>,
    receiver: mpsc::Receiver<TaskResult>,
    sender: mpsc::Sender<TaskResult>,
}

impl TaskManager {
    pub fn new() -> Self {
        let runtime = Arc::new(Runtime::new().expect("Failed to create TaskManager runtime"));

        let (sender, receiver) = mpsc::channel();

        Self { runtime, receiver, sender }
    }

    pub fn poll_results(&mut self) -> Vec<TaskResult> {
        let mut results = Vec::new();

        while let Ok(result) = self.receiver.try_recv() {
            results.push(result);
        }

        results
    }

    fn task_context(&self) -> (mpsc::Sender<TaskResult>, Arc<Runtime>) {
        (self.sender.clone(), self.runtime.clone())
    }

    pub fn fetch_grammar_explanation(
        &self,
        client: Arc<AssistClient>,
        id: String,
        pattern: String,
    ) {
        let (sender, runtime) = self.task_context();

        thread::spawn(move || {
            let text = runtime.block_on(client.grammar_explanation(&pattern));

            let _ = sender.send(TaskResult::GrammarExplanation { id, text });
        });
    }

    pub fn fetch_mnemonic_story(&self, client: Arc<AssistClient>, id: String, glyph: String) {
        let (sender, runtime) = self.task_context();

        thread::spawn(move || {
            let text = runtime.block_on(client.mnemonic_story(&glyph));

            let _ = sender.send(TaskResult::MnemonicStory { id, text });
        });
    }
}
