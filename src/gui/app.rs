use std::{
    collections::{
        HashMap,
        HashSet,
    },
    sync::Arc,
    time::Duration,
};

use eframe::egui;

use super::{
    actions::{
        ActionQueue,
        UiAction,
    },
    browse::{
        self,
        BrowseState,
    },
    kanji_modal::KanjiModal,
    reset_modal::ResetModal,
    settings::{
        SettingsData,
        SETTINGS_FILE,
    },
    theme::{
        set_theme,
        Theme,
    },
    top_bar::TopBar,
    AssistContent,
};
use crate::{
    assist::AssistClient,
    core::{
        tasks::{
            TaskManager,
            TaskResult,
        },
        Catalog,
        MasteryStore,
    },
    persistence::{
        load_json_or_default,
        save_json,
    },
};

/// Fallback CJK fonts probed at startup. egui's bundled fonts have no kanji
/// coverage, so without one of these the catalog renders as boxes.
const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/opentype/noto/NotoSansCJKjp-Regular.otf",
    "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/truetype/takao-gothic/TakaoPGothic.ttf",
    "/System/Library/Fonts/ヒラギノ角ゴシック W3.ttc",
    "/System/Library/Fonts/Hiragino Sans GB.ttc",
    "C:\\Windows\\Fonts\\meiryo.ttc",
    "C:\\Windows\\Fonts\\msgothic.ttc",
    "C:\\Windows\\Fonts\\YuGothM.ttc",
];

pub struct OboeruApp {
    pub catalog: Catalog,
    pub mastery: MasteryStore,
    pub settings_data: SettingsData,
    pub browse: BrowseState,
    pub theme: Theme,
    /// Grammar explanations by grammar id. Entries stay for the whole session
    /// so collapsing and re-expanding a card does not refetch.
    pub explanations: HashMap<String, AssistContent>,
    pub expanded_grammar: HashSet<String>,
    pub kanji_modal: KanjiModal,
    pub reset_modal: ResetModal,
    assist: Arc<AssistClient>,
    task_manager: TaskManager,
}

impl OboeruApp {
    pub fn new(cc: &eframe::CreationContext<'_>, catalog: Catalog) -> Self {
        let task_manager = TaskManager::new();
        let settings_data = load_json_or_default::<SettingsData>(SETTINGS_FILE);

        let app = Self {
            catalog,
            mastery: MasteryStore::load(),
            settings_data,
            browse: BrowseState::default(),
            theme: Theme::dracula(),
            explanations: HashMap::new(),
            expanded_grammar: HashSet::new(),
            kanji_modal: KanjiModal::new(),
            reset_modal: ResetModal::new(),
            assist: Arc::new(AssistClient::from_env()),
            task_manager,
        };

        app.setup_fonts(cc);
        app.setup_theme(cc);

        // Apply saved theme preference (set_theme switches to the registered variant)
        cc.egui_ctx.set_theme(if app.settings_data.dark_mode {
            egui::Theme::Dark
        } else {
            egui::Theme::Light
        });

        //Make sure it opens above other windows so you can see it.
        cc.egui_ctx
            .send_viewport_cmd(egui::ViewportCommand::WindowLevel(egui::WindowLevel::AlwaysOnTop));
        cc.egui_ctx
            .send_viewport_cmd(egui::ViewportCommand::WindowLevel(egui::WindowLevel::Normal));

        app
    }

    fn setup_fonts(&self, cc: &eframe::CreationContext<'_>) {
        let Some(bytes) = FONT_CANDIDATES.iter().find_map(|path| std::fs::read(path).ok())
        else {
            eprintln!("No Japanese font found on this system. Kanji may render as boxes.");
            return;
        };

        let mut fonts = egui::FontDefinitions::default();
        fonts
            .font_data
            .insert("japanese".to_owned(), std::sync::Arc::new(egui::FontData::from_owned(bytes)));

        // First for proportional text, last for monospace so the default
        // fonts keep their special symbols.
        fonts
            .families
            .entry(egui::FontFamily::Proportional)
            .or_default()
            .insert(0, "japanese".to_owned());

        fonts.families.entry(egui::FontFamily::Monospace).or_default().push("japanese".to_owned());

        cc.egui_ctx.set_fonts(fonts);
    }

    fn setup_theme(&self, cc: &eframe::CreationContext<'_>) {
        cc.egui_ctx.set_zoom_factor(cc.egui_ctx.zoom_factor() + 0.2);
        set_theme(&cc.egui_ctx, &self.theme);
    }
}

impl eframe::App for OboeruApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        for result in self.task_manager.poll_results() {
            self.handle_task_result(result);
        }

        self.sync_theme_preference(ctx);

        let mut actions = ActionQueue::new();

        TopBar::show(ctx, self.assist.available());
        browse::browse_panel(ctx, self, &mut actions);

        self.kanji_modal.show(ctx, &self.catalog, &self.theme, self.mastery.ids(), &mut actions);

        if let Some(confirmed) = self.reset_modal.show(ctx) {
            if confirmed {
                self.mastery.reset();
                self.browse.mark_dirty();
            }
        }

        let had_actions = !actions.is_empty();
        for action in actions.drain() {
            self.apply_action(action);
        }
        if had_actions {
            ctx.request_repaint();
        }

        // Keep polling while an assist request is in flight, even when no
        // spinner is on screen to drive repaints.
        if self.has_pending_assist() {
            ctx.request_repaint_after(Duration::from_millis(200));
        }
    }
}

impl OboeruApp {
    fn apply_action(&mut self, action: UiAction) {
        match action {
            UiAction::SetTab(tab) => self.browse.set_tab(tab),
            UiAction::SetFilter(filter) => self.browse.set_filter(filter),
            UiAction::SetSearch(search) => self.browse.set_search(search),
            UiAction::ToggleMastery(id) => {
                self.mastery.toggle(&id);
                self.browse.mark_dirty();
            }
            UiAction::OpenResetConfirm => self.reset_modal.open(),
            UiAction::OpenKanjiDetail(id) => self.kanji_modal.open_for(&id),
            UiAction::ToggleGrammarExplanation(id) => self.toggle_explanation(id),
            UiAction::RequestMnemonic(id) => self.request_mnemonic(id),
        }
    }

    fn toggle_explanation(&mut self, id: String) {
        if self.expanded_grammar.remove(&id) {
            return;
        }
        self.expanded_grammar.insert(id.clone());

        if self.explanations.contains_key(&id) {
            return;
        }

        let Some(grammar) = self.catalog.grammar_by_id(&id) else {
            return;
        };
        self.explanations.insert(id.clone(), AssistContent::Pending);
        self.task_manager.fetch_grammar_explanation(
            Arc::clone(&self.assist),
            id,
            grammar.pattern.clone(),
        );
    }

    fn request_mnemonic(&mut self, id: String) {
        let Some(kanji) = self.catalog.kanji_by_id(&id) else {
            return;
        };
        self.kanji_modal.mark_mnemonic_pending();
        self.task_manager.fetch_mnemonic_story(
            Arc::clone(&self.assist),
            id.clone(),
            kanji.glyph.clone(),
        );
    }

    /// Results are matched back against current state. A response for a
    /// kanji whose modal is already closed, or a grammar card whose entry was
    /// dropped, is discarded instead of applied.
    fn handle_task_result(&mut self, result: TaskResult) {
        let task_type = result.task_type();
        match result {
            TaskResult::GrammarExplanation { id, text } => {
                match self.explanations.get(&id) {
                    Some(AssistContent::Pending) => {
                        self.explanations.insert(id, AssistContent::Ready(text));
                    }
                    _ => println!("Discarding stale {} result for {}", task_type, id),
                }
            }
            TaskResult::MnemonicStory { id, text } => {
                if self.kanji_modal.is_open_for(&id) && self.kanji_modal.mnemonic_pending() {
                    self.kanji_modal.set_mnemonic(text);
                } else {
                    println!("Discarding stale {} result for {}", task_type, id);
                }
            }
        }
    }

    fn has_pending_assist(&self) -> bool {
        self.kanji_modal.mnemonic_pending()
            || self.explanations.values().any(AssistContent::is_pending)
    }

    fn sync_theme_preference(&mut self, ctx: &egui::Context) {
        let dark_mode = ctx.style().visuals.dark_mode;
        if dark_mode != self.settings_data.dark_mode {
            self.settings_data.dark_mode = dark_mode;
            self.save_settings();
        }
    }

    fn save_settings(&self) {
        if let Err(e) = save_json(&self.settings_data, SETTINGS_FILE) {
            eprintln!("Failed to save settings: {}", e);
        }
    }
}
