use eframe::egui;

pub struct ResetModal {
    open: bool,
}

impl ResetModal {
    pub fn new() -> Self {
        Self { open: false }
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    /// Returns `Some(true)` when the user confirms wiping all mastery data.
    pub fn show(&mut self, ctx: &egui::Context) -> Option<bool> {
        if !self.open {
            return None;
        }

        let mut result: Option<bool> = None;

        let modal = egui::Modal::new(egui::Id::new("reset_modal")).show(ctx, |ui| {
            ui.set_width(360.0);

            ui.add_space(10.0);

            ui.horizontal(|ui| {
                ui.label(egui::RichText::new("⚠").size(24.0).color(egui::Color32::YELLOW));
                ui.label(
                    egui::RichText::new("Бүх цээжилсэн мэдээллийг устгах уу?").size(14.0),
                );
            });

            ui.add_space(15.0);

            ui.horizontal(|ui| {
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Тийм").clicked() {
                        result = Some(true);
                        ui.close();
                    }

                    if ui.button("Үгүй").clicked() {
                        result = Some(false);
                        ui.close();
                    }
                });
            });
        });

        if modal.should_close() {
            self.open = false;
        }

        result
    }
}

impl Default for ResetModal {
    fn default() -> Self {
        Self::new()
    }
}
