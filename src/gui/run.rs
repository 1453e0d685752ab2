//! Native window entry point shared by the chart and presence programs.

use crate::config::MonitorConfig;
use crate::display::MonitorKind;

use super::app::MonitorApp;
use super::theme;

/// Open a monitor window and block until it is closed.
///
/// The receiver is not started until the operator presses Start. Closing the
/// window stops the receiver and waits for its socket to be released.
pub fn run_monitor(kind: MonitorKind, cfg: MonitorConfig) -> eframe::Result<()> {
    let title = cfg.title.clone();
    let opts = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(title.clone())
            .with_inner_size(egui::vec2(800.0, 500.0)),
        ..Default::default()
    };
    let app = MonitorApp::new(kind, cfg);

    eframe::run_native(
        &title,
        opts,
        Box::new(|cc| {
            let mut fonts = egui::FontDefinitions::default();
            egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
            cc.egui_ctx.set_fonts(fonts);
            theme::apply(&cc.egui_ctx);
            Ok(Box::new(app))
        }),
    )
}
