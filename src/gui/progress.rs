use std::collections::HashSet;

use eframe::egui::{self, RichText};

use crate::{
    core::{
        Catalog,
        Category,
        StudyItem,
    },
    gui::{
        actions::{
            ActionQueue,
            UiAction,
        },
        browse::stats::{
            self,
            Progress,
        },
        theme::Theme,
    },
};

const STAT_SPACING: f32 = 8.0;
const SECTION_SPACING: f32 = 16.0;

/// Statistics tab: overall mastery, one stat block per category, a per-set
/// breakdown, and the reset button. Always derived from the full catalog,
/// ignoring the browse search and filter.
pub fn progress_view(
    ui: &mut egui::Ui,
    theme: &Theme,
    catalog: &Catalog,
    mastered_ids: &HashSet<String>,
    actions: &mut ActionQueue,
) {
    let summary = stats::summarize(catalog, mastered_ids);
    let overall = summary.overall();

    egui::ScrollArea::vertical().show(ui, |ui| {
        ui.label(theme.heading(ui.ctx(), "Нийт ахиц").size(18.0).strong());
        ui.add_space(STAT_SPACING);

        ui.add(
            egui::ProgressBar::new(overall.fraction())
                .text(format!("{}% Mastery Progress", overall.percent())),
        );
        ui.add_space(STAT_SPACING);
        ui.label(format!(
            "Та нийт {} сургалтын материалаас {} зүйлийг бүрэн цээжлээд байна.",
            overall.total, overall.mastered
        ));

        ui.add_space(SECTION_SPACING);

        ui.columns(3, |columns| {
            category_stat(&mut columns[0], theme, Category::Kanji, summary.kanji);
            category_stat(&mut columns[1], theme, Category::Vocabulary, summary.vocabulary);
            category_stat(&mut columns[2], theme, Category::Grammar, summary.grammar);
        });

        ui.add_space(SECTION_SPACING);
        ui.separator();

        set_section(ui, theme, Category::Kanji, &catalog.kanji, mastered_ids);
        set_section(ui, theme, Category::Vocabulary, &catalog.vocabulary, mastered_ids);
        set_section(ui, theme, Category::Grammar, &catalog.grammar, mastered_ids);

        ui.add_space(SECTION_SPACING);
        ui.separator();
        ui.add_space(STAT_SPACING);

        let reset =
            egui::Button::new(RichText::new("Reset All Progress").color(theme.red(ui.ctx())));
        if ui.add(reset).clicked() {
            actions.push(UiAction::OpenResetConfirm);
        }
    });
}

fn category_stat(ui: &mut egui::Ui, theme: &Theme, category: Category, progress: Progress) {
    egui::Frame::group(ui.style()).inner_margin(8.0).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.label(
            RichText::new(category.label()).color(theme.accent(ui.ctx(), category)).strong(),
        );
        ui.horizontal(|ui| {
            ui.label(RichText::new(progress.mastered.to_string()).size(24.0).strong());
            ui.weak(format!("of {}", progress.total));
        });
        ui.add(egui::ProgressBar::new(progress.fraction()).desired_height(6.0));
    });
}

fn set_section<T: StudyItem>(
    ui: &mut egui::Ui,
    theme: &Theme,
    category: Category,
    items: &[T],
    mastered_ids: &HashSet<String>,
) {
    ui.add_space(STAT_SPACING);
    ui.label(RichText::new(category.label()).color(theme.accent(ui.ctx(), category)).strong());

    for set in stats::set_numbers(items) {
        let progress = stats::set_progress(items, mastered_ids, set);
        ui.horizontal(|ui| {
            ui.label(format!("Set {}", set));
            ui.add(
                egui::ProgressBar::new(progress.fraction())
                    .desired_width(160.0)
                    .desired_height(8.0),
            );
            ui.weak(format!("{} / {}", progress.mastered, progress.total));
        });
    }
}
