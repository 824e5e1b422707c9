use std::collections::HashSet;

use eframe::egui;

use crate::{
    core::{
        Catalog,
        Category,
        Kanji,
    },
    gui::{
        actions::{
            ActionQueue,
            UiAction,
        },
        assist_text,
        theme::Theme,
        AssistContent,
    },
};

/// Detail view for a single kanji, including the AI mnemonic request.
pub struct KanjiModal {
    kanji_id: Option<String>,
    mnemonic: Option<AssistContent>,
}

impl KanjiModal {
    pub fn new() -> Self {
        Self { kanji_id: None, mnemonic: None }
    }

    /// Opens the modal for a kanji. Any mnemonic from a previous kanji is
    /// dropped so the modal never shows a story for the wrong character.
    pub fn open_for(&mut self, id: &str) {
        self.kanji_id = Some(id.to_string());
        self.mnemonic = None;
    }

    /// Drops the mnemonic along with the id, so no request stays pending
    /// and no story stays cached past the view.
    pub fn close(&mut self) {
        self.kanji_id = None;
        self.mnemonic = None;
    }

    pub fn is_open_for(&self, id: &str) -> bool {
        self.kanji_id.as_deref() == Some(id)
    }

    pub fn mnemonic_pending(&self) -> bool {
        matches!(self.mnemonic, Some(AssistContent::Pending))
    }

    pub fn mark_mnemonic_pending(&mut self) {
        self.mnemonic = Some(AssistContent::Pending);
    }

    pub fn set_mnemonic(&mut self, text: String) {
        self.mnemonic = Some(AssistContent::Ready(text));
    }

    pub fn show(
        &mut self,
        ctx: &egui::Context,
        catalog: &Catalog,
        theme: &Theme,
        mastered_ids: &HashSet<String>,
        actions: &mut ActionQueue,
    ) {
        let Some(id) = self.kanji_id.clone() else {
            return;
        };

        let Some(kanji) = catalog.kanji_by_id(&id) else {
            self.close();
            return;
        };

        let modal = egui::Modal::new(egui::Id::new("kanji_detail_modal")).show(ctx, |ui| {
            ui.set_width(380.0);

            ui.vertical_centered(|ui| {
                ui.label(
                    egui::RichText::new(&kanji.glyph)
                        .size(64.0)
                        .color(theme.accent(ctx, Category::Kanji)),
                );
                ui.label(egui::RichText::new(&kanji.meaning).size(18.0).strong());

                ui.add_space(6.0);

                ui.label(
                    egui::RichText::new(format!("{} Strokes · Set {}", kanji.strokes, kanji.set))
                        .small()
                        .color(theme.comment(ctx)),
                );
            });

            ui.add_space(8.0);
            ui.separator();

            Self::readings(ui, theme, kanji);

            ui.separator();
            ui.add_space(4.0);

            ui.label(egui::RichText::new("AI Туслах").strong().color(theme.pink(ctx)));
            ui.add_space(4.0);

            self.mnemonic_section(ui, theme, &id, actions);

            ui.add_space(12.0);

            ui.horizontal(|ui| {
                let mastered = mastered_ids.contains(&id);
                let toggle_text = if mastered {
                    egui::RichText::new("✓ Цээжилсэн").color(theme.green(ui.ctx()))
                } else {
                    egui::RichText::new("Цээжлэх")
                };
                if ui.button(toggle_text).clicked() {
                    actions.push(UiAction::ToggleMastery(id.clone()));
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Хаах").clicked() {
                        ui.close();
                    }
                });
            });
        });

        if modal.should_close() {
            self.close();
        }
    }

    fn readings(ui: &mut egui::Ui, theme: &Theme, kanji: &Kanji) {
        ui.add_space(4.0);

        ui.label(egui::RichText::new("On-reading (音読み)").small().color(theme.comment(ui.ctx())));
        ui.label(theme.bold(ui.ctx(), &reading_line(&kanji.on_readings())));

        ui.add_space(4.0);

        ui.label(
            egui::RichText::new("Kun-reading (訓読み)").small().color(theme.comment(ui.ctx())),
        );
        ui.label(theme.bold(ui.ctx(), &reading_line(&kanji.kun_readings())));

        ui.add_space(4.0);
    }

    fn mnemonic_section(
        &self,
        ui: &mut egui::Ui,
        theme: &Theme,
        id: &str,
        actions: &mut ActionQueue,
    ) {
        match &self.mnemonic {
            None => {
                ui.weak("Ханз цээжлэх сонирхолтой түүхийг AI-аас асуугаарай.");
                ui.add_space(4.0);
                if ui.button("💡 Ханз цээжлэх арга").clicked() {
                    actions.push(UiAction::RequestMnemonic(id.to_string()));
                }
            }
            Some(AssistContent::Pending) => {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.weak("AI тайлбарлаж байна...");
                });
            }
            Some(AssistContent::Ready(text)) => {
                egui::Frame::group(ui.style()).inner_margin(8.0).show(ui, |ui| {
                    assist_text(ui, theme, text);
                });
            }
        }
    }
}

impl Default for KanjiModal {
    fn default() -> Self {
        Self::new()
    }
}

fn reading_line(joined: &str) -> String {
    match joined.is_empty() {
        true => "-".to_string(),
        false => joined.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_close_drops_pending_mnemonic() {
        let mut modal = KanjiModal::new();
        modal.open_for("k1");
        modal.mark_mnemonic_pending();

        modal.close();

        // A request left pending here would keep the app polling forever.
        assert!(!modal.is_open_for("k1"));
        assert!(!modal.mnemonic_pending());
        assert!(modal.mnemonic.is_none());
    }

    #[test]
    fn test_reopening_starts_without_story() {
        let mut modal = KanjiModal::new();
        modal.open_for("k1");
        modal.set_mnemonic("Богино түүх.".to_string());
        modal.close();

        modal.open_for("k1");

        assert!(modal.is_open_for("k1"));
        assert!(modal.mnemonic.is_none());
    }

    #[test]
    fn test_opening_another_kanji_drops_previous_story() {
        let mut modal = KanjiModal::new();
        modal.open_for("k1");
        modal.set_mnemonic("Богино түүх.".to_string());

        modal.open_for("k2");

        assert!(modal.is_open_for("k2"));
        assert!(!modal.is_open_for("k1"));
        assert!(modal.mnemonic.is_none());
    }
}
