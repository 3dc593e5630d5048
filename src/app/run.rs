//! Opening the native window.

use eframe::egui;

use super::InspectorApp;
use crate::display::{DisplaySession, Viewer};
use crate::error::Result;

/// Opens a native window and blocks until it is closed.
#[derive(Debug, Default, Clone, Copy)]
pub struct NativeViewer;

impl Viewer for NativeViewer {
    fn show(&mut self, session: DisplaySession) -> Result<()> {
        run_inspector(session)
    }
}

/// Launch the inspector in a native window.
///
/// The window exists only for the duration of this call.
pub fn run_inspector(mut session: DisplaySession) -> Result<()> {
    let title = session.config.title.clone();
    let [w, h] = session.config.window_size;
    let mut opts = session
        .config
        .native_options
        .take()
        .unwrap_or_default();

    if opts.viewport.inner_size.is_none() {
        opts.viewport = opts.viewport.clone().with_inner_size(egui::vec2(w, h));
    }
    if opts.viewport.title.is_none() {
        opts.viewport = opts.viewport.clone().with_title(title.clone());
    }

    tracing::debug!(
        "Opening window \"{}\" with {} items",
        title,
        session.model.len()
    );
    let app = InspectorApp::new(session);
    eframe::run_native(
        &title,
        opts,
        Box::new(|cc| {
            // Install Phosphor icon font before creating the app.
            let mut fonts = egui::FontDefinitions::default();
            egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
            cc.egui_ctx.set_fonts(fonts);
            Ok(Box::new(app))
        }),
    )?;
    tracing::debug!("Window closed");
    Ok(())
}
