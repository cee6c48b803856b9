// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Freddie Admin contributors

//! Application entry point wiring egui/eframe to launch the admin UI.

use eframe::egui;
use egui_phosphor::Variant;

use crate::api::{ApiClient, HttpTransport};
use crate::config::AdminConfig;
use crate::ui::FreddieAdminApp;

/// Bootstrap the desktop application and run the main egui event loop.
pub fn run(config: AdminConfig, client: ApiClient<HttpTransport>) -> eframe::Result<()> {
    // Register Phosphor icon font.
    let mut fonts = egui::FontDefinitions::default();
    egui_phosphor::add_to_fonts(&mut fonts, Variant::Regular);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Freddie Admin",
        options,
        Box::new(move |cc| {
            cc.egui_ctx.set_fonts(fonts);
            Ok(Box::new(FreddieAdminApp::new(&config, client)))
        }),
    )
}
