//! inkpad — a plain-text editor panel with a sidebar file browser.

mod app;

use app::InkpadApp;
use eframe::NativeOptions;
use inkcore::session::SessionLock;

const APP_ID: &str = "inkpad";

fn main() -> eframe::Result<()> {
    // At most one live instance: a second launch signals the first to raise
    // its window and exits.
    let Some(session) = SessionLock::acquire(APP_ID) else {
        eprintln!("inkpad is already running; raising the existing window");
        return Ok(());
    };

    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 560.0])
            .with_min_inner_size([800.0, 500.0])
            .with_title("inkpad"),
        ..Default::default()
    };

    eframe::run_native(
        "inkpad",
        options,
        Box::new(move |cc| {
            inkcore::InkTheme::default().apply(&cc.egui_ctx);
            Box::new(InkpadApp::new(cc, session))
        }),
    )
}
