pub mod actions;
pub mod app;
pub mod browse;
pub mod kanji_modal;
pub mod progress;
pub mod reset_modal;
pub mod settings;
pub mod theme;
pub mod top_bar;

use eframe::egui;
use theme::Theme;

pub use app::OboeruApp;

/// Content state for one AI assist request, keyed by the item that asked.
#[derive(Debug, Clone)]
pub enum AssistContent {
    Pending,
    Ready(String),
}

impl AssistContent {
    pub fn is_pending(&self) -> bool {
        matches!(self, AssistContent::Pending)
    }
}

/// Renders assist output, promoting `## ` section markers to colored headings.
pub fn assist_text(ui: &mut egui::Ui, theme: &Theme, text: &str) {
    for line in text.lines() {
        if let Some(heading) = line.strip_prefix("## ") {
            ui.add_space(4.0);
            ui.label(theme.heading(ui.ctx(), heading).strong());
        } else if line.trim().is_empty() {
            ui.add_space(4.0);
        } else {
            ui.label(line);
        }
    }
}
