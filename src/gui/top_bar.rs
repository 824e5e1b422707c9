use eframe::egui::{self, containers};

pub struct TopBar;

impl TopBar {
    pub fn show(ctx: &egui::Context, assist_available: bool) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            containers::menu::Bar::new().ui(ui, |ui| {
                egui::widgets::global_theme_preference_switch(ui);
                ui.menu_button("Файл", |ui| {
                    if ui.button("Гарах").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    Self::show_assist_indicator(ui, assist_available);
                });
            });
        });
    }

    fn show_assist_indicator(ui: &mut egui::Ui, assist_available: bool) {
        let assist_color = if assist_available {
            egui::Color32::from_rgb(0, 200, 0)
        } else {
            egui::Color32::from_rgb(200, 80, 80)
        };

        let assist_tooltip = if assist_available {
            "Gemini API холбогдсон"
        } else {
            "GEMINI_API_KEY тохируулаагүй байна"
        };
        ui.horizontal(|ui| {
            ui.spacing_mut().item_spacing.x = 2.0;
            ui.small("AI туслах").on_hover_text(assist_tooltip);
            ui.small(egui::RichText::new("●").color(assist_color)).on_hover_text(assist_tooltip);
        });
    }
}
