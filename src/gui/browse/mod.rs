pub mod filter;
pub mod group;
pub mod search;
pub mod state;
pub mod stats;

use std::collections::{
    HashMap,
    HashSet,
};

use eframe::egui::{self, RichText};
use egui_extras::{
    Column,
    TableBuilder,
};
use egui_flex::{
    item,
    Flex,
};
pub use filter::MasteryFilter;
pub use group::{
    group_by_set,
    SetGroup,
};
pub use search::matches_search;
pub use state::{
    BrowseState,
    Tab,
};

use crate::{
    core::{
        Catalog,
        Category,
        Grammar,
        Kanji,
    },
    gui::{
        actions::{
            ActionQueue,
            UiAction,
        },
        assist_text,
        progress,
        theme::{
            blend_colors,
            Theme,
        },
        AssistContent,
        OboeruApp,
    },
};

/// Central panel: app header, tab strip, search and filter controls, and the
/// content of the selected tab. All user input is pushed onto the action
/// queue instead of mutating the app directly.
pub fn browse_panel(ctx: &egui::Context, app: &mut OboeruApp, actions: &mut ActionQueue) {
    app.browse.ensure_groups(&app.catalog, app.mastery.ids());

    egui::CentralPanel::default().show(ctx, |ui| {
        ui.heading(app.theme.heading(ctx, "JLPT N4 Master"));
        ui.weak("Бүрэн мэдлэгийн сан");
        ui.add_space(6.0);

        controls(ui, &app.browse, actions);
        ui.add_space(8.0);

        match app.browse.tab() {
            Tab::Kanji => kanji_tab(
                ui,
                &app.theme,
                &app.catalog,
                app.mastery.ids(),
                app.browse.kanji_groups(),
                actions,
            ),
            Tab::Vocabulary => vocabulary_tab(
                ui,
                &app.theme,
                &app.catalog,
                app.mastery.ids(),
                app.browse.vocabulary_groups(),
                actions,
            ),
            Tab::Grammar => grammar_tab(
                ui,
                &app.theme,
                &app.catalog,
                app.mastery.ids(),
                app.browse.grammar_groups(),
                &app.expanded_grammar,
                &app.explanations,
                actions,
            ),
            Tab::Progress => progress::progress_view(
                ui,
                &app.theme,
                &app.catalog,
                app.mastery.ids(),
                actions,
            ),
        }
    });
}

fn controls(ui: &mut egui::Ui, browse: &BrowseState, actions: &mut ActionQueue) {
    egui::Frame::group(ui.style()).inner_margin(8.0).show(ui, |ui| {
        ui.horizontal_wrapped(|ui| {
            for tab in Tab::ALL {
                if ui.selectable_label(browse.tab() == tab, tab.label()).clicked() {
                    actions.push(UiAction::SetTab(tab));
                }
            }
        });

        // The progress tab always shows the whole catalog, so search and
        // mastery filters disappear there.
        if browse.tab().browses_content() {
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                let mut search = browse.search().to_string();
                let response = ui.add(
                    egui::TextEdit::singleline(&mut search)
                        .hint_text("Хайх (Жишээ: ханз, утга, дуудлага...)")
                        .desired_width(260.0),
                );
                if response.changed() {
                    actions.push(UiAction::SetSearch(search));
                }

                ui.separator();

                for filter in MasteryFilter::ALL {
                    if ui.selectable_label(browse.filter() == filter, filter.label()).clicked() {
                        actions.push(UiAction::SetFilter(filter));
                    }
                }
            });
        }
    });
}

fn kanji_tab(
    ui: &mut egui::Ui,
    theme: &Theme,
    catalog: &Catalog,
    mastered_ids: &HashSet<String>,
    groups: &[SetGroup],
    actions: &mut ActionQueue,
) {
    if groups.is_empty() {
        empty_results(ui);
        return;
    }

    egui::ScrollArea::vertical().show(ui, |ui| {
        for group in groups {
            set_header(ui, theme, &format!("Set {}", group.set), group);

            Flex::horizontal().wrap(true).show(ui, |flex| {
                for &index in &group.indices {
                    let kanji = &catalog.kanji[index];
                    let mastered = mastered_ids.contains(&kanji.id);
                    flex.add_ui(item(), |ui| {
                        kanji_card(ui, theme, kanji, mastered, actions);
                    });
                }
            });

            ui.add_space(12.0);
        }
    });
}

fn kanji_card(
    ui: &mut egui::Ui,
    theme: &Theme,
    kanji: &Kanji,
    mastered: bool,
    actions: &mut ActionQueue,
) {
    let accent = match mastered {
        true => theme.green(ui.ctx()),
        false => theme.accent(ui.ctx(), Category::Kanji),
    };
    let fill = match mastered {
        true => blend_colors(ui.visuals().faint_bg_color, accent, 0.15),
        false => ui.visuals().faint_bg_color,
    };

    egui::Frame::new()
        .fill(fill)
        .stroke(ui.visuals().widgets.inactive.bg_stroke)
        .corner_radius(4.0)
        .inner_margin(8.0)
        .show(ui, |ui| {
            ui.set_width(92.0);
            ui.vertical_centered(|ui| {
                let glyph = egui::Label::new(RichText::new(&kanji.glyph).size(34.0).color(accent))
                    .sense(egui::Sense::click());
                let response = ui.add(glyph).on_hover_cursor(egui::CursorIcon::PointingHand);
                if response.clicked() {
                    actions.push(UiAction::OpenKanjiDetail(kanji.id.clone()));
                }

                ui.label(RichText::new(&kanji.meaning).size(11.0));
                ui.add_space(2.0);

                if ui.small_button(mastery_check(ui, theme, mastered)).clicked() {
                    actions.push(UiAction::ToggleMastery(kanji.id.clone()));
                }
            });
        });
}

fn vocabulary_tab(
    ui: &mut egui::Ui,
    theme: &Theme,
    catalog: &Catalog,
    mastered_ids: &HashSet<String>,
    groups: &[SetGroup],
    actions: &mut ActionQueue,
) {
    if groups.is_empty() {
        empty_results(ui);
        return;
    }

    let text_height =
        egui::TextStyle::Body.resolve(ui.style()).size.max(ui.spacing().interact_size.y);

    egui::ScrollArea::vertical().show(ui, |ui| {
        for group in groups {
            set_header(ui, theme, &format!("Vocab Set {}", group.set), group);

            // One table per set inside a shared panel, so each needs its own id.
            ui.push_id(group.set, |ui| {
                TableBuilder::new(ui)
                    .striped(true)
                    .vscroll(false)
                    .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
                    .column(Column::auto().at_least(110.0))
                    .column(Column::auto().at_least(130.0))
                    .column(Column::remainder())
                    .column(Column::exact(30.0))
                    .header(25.0, |mut header| {
                        header.col(|ui| {
                            ui.label(theme.heading(ui.ctx(), "Үг"));
                        });
                        header.col(|ui| {
                            ui.label(theme.heading(ui.ctx(), "Дуудлага"));
                        });
                        header.col(|ui| {
                            ui.label(theme.heading(ui.ctx(), "Утга"));
                        });
                        header.col(|_ui| {});
                    })
                    .body(|body| {
                        body.rows(text_height, group.indices.len(), |mut row| {
                            let vocab = &catalog.vocabulary[group.indices[row.index()]];
                            let mastered = mastered_ids.contains(&vocab.id);

                            row.col(|ui| {
                                ui.label(
                                    RichText::new(&vocab.written)
                                        .color(theme.accent(ui.ctx(), Category::Vocabulary))
                                        .strong(),
                                );
                            });
                            row.col(|ui| {
                                ui.label(&vocab.reading);
                            });
                            row.col(|ui| {
                                ui.label(&vocab.meaning);
                            });
                            row.col(|ui| {
                                if ui.small_button(mastery_check(ui, theme, mastered)).clicked() {
                                    actions.push(UiAction::ToggleMastery(vocab.id.clone()));
                                }
                            });
                        });
                    });
            });

            ui.add_space(12.0);
        }
    });
}

fn grammar_tab(
    ui: &mut egui::Ui,
    theme: &Theme,
    catalog: &Catalog,
    mastered_ids: &HashSet<String>,
    groups: &[SetGroup],
    expanded: &HashSet<String>,
    explanations: &HashMap<String, AssistContent>,
    actions: &mut ActionQueue,
) {
    if groups.is_empty() {
        empty_results(ui);
        return;
    }

    egui::ScrollArea::vertical().show(ui, |ui| {
        for group in groups {
            set_header(ui, theme, &format!("Grammar Set {}", group.set), group);

            for &index in &group.indices {
                let grammar = &catalog.grammar[index];
                grammar_card(
                    ui,
                    theme,
                    grammar,
                    mastered_ids.contains(&grammar.id),
                    expanded.contains(&grammar.id),
                    explanations.get(&grammar.id),
                    actions,
                );
                ui.add_space(8.0);
            }

            ui.add_space(8.0);
        }
    });
}

fn grammar_card(
    ui: &mut egui::Ui,
    theme: &Theme,
    grammar: &Grammar,
    mastered: bool,
    expanded: bool,
    explanation: Option<&AssistContent>,
    actions: &mut ActionQueue,
) {
    egui::Frame::group(ui.style()).inner_margin(8.0).show(ui, |ui| {
        ui.set_width(ui.available_width());

        ui.horizontal(|ui| {
            ui.label(
                RichText::new(&grammar.pattern)
                    .size(16.0)
                    .strong()
                    .color(theme.accent(ui.ctx(), Category::Grammar)),
            );
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.small_button(mastery_check(ui, theme, mastered)).clicked() {
                    actions.push(UiAction::ToggleMastery(grammar.id.clone()));
                }
            });
        });

        ui.label(&grammar.meaning);
        ui.add_space(4.0);

        egui::Frame::new()
            .fill(ui.visuals().faint_bg_color)
            .corner_radius(egui::CornerRadius::same(2))
            .inner_margin(6.0)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.label(RichText::new(&grammar.example).color(theme.yellow(ui.ctx())));
                ui.weak(&grammar.example_mn);
            });

        ui.add_space(6.0);

        let toggle_text = match expanded {
            true => "Тайлбар нуух",
            false => "Дэлгэрэнгүй тайлбар (AI)",
        };
        if ui.small_button(toggle_text).clicked() {
            actions.push(UiAction::ToggleGrammarExplanation(grammar.id.clone()));
        }

        if expanded {
            ui.add_space(6.0);
            match explanation {
                Some(AssistContent::Ready(text)) => {
                    assist_text(ui, theme, text);
                }
                _ => {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.weak("AI тайлбарлаж байна...");
                    });
                }
            }
        }
    });
}

/// Group header: set title on the left, mastered count on the right, and a
/// thin progress bar underneath. Counts cover the items shown under the
/// current search and filter, not the whole set.
fn set_header(ui: &mut egui::Ui, theme: &Theme, title: &str, group: &SetGroup) {
    ui.horizontal(|ui| {
        ui.label(theme.heading(ui.ctx(), title).strong());
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.small(format!("{} / {} Mastered", group.mastered, group.len()));
        });
    });

    ui.add(egui::ProgressBar::new(group.mastered_fraction()).desired_height(4.0));
    ui.add_space(6.0);
}

fn empty_results(ui: &mut egui::Ui) {
    ui.add_space(40.0);
    ui.vertical_centered(|ui| {
        ui.weak("Энэ шүүлтүүрт тохирох зүйл олдсонгүй. Хайлтаа өөрчлөөд үзнэ үү.");
    });
}

fn mastery_check(ui: &egui::Ui, theme: &Theme, mastered: bool) -> RichText {
    match mastered {
        true => RichText::new("✓").color(theme.green(ui.ctx())),
        false => RichText::new("✓").color(ui.visuals().weak_text_color()),
    }
}
