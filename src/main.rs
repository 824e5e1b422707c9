use eframe::egui;
use oboeru::{
    core::Catalog,
    gui::OboeruApp,
};

fn main() -> eframe::Result {
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 760.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "JLPT N4 Master",
        native_options,
        Box::new(|cc| {
            let catalog = Catalog::load_embedded()?;
            Ok(Box::new(OboeruApp::new(cc, catalog)))
        }),
    )
}
