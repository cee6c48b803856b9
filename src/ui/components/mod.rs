// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Freddie Admin contributors

//! Screen components structured for MVU-style updates.
//!
//! Each component owns a model, a message enum, a command enum for side effects, an
//! `update` that may return [`Feedback`], a `view` that returns messages, and an `execute`
//! that runs its commands against the API on a worker thread.

pub mod confirm;
pub mod identities;
pub mod jobs;
pub mod managers;
pub mod responses;
pub mod template_editor;
pub mod templates;

use eframe::egui;

/// User-facing feedback surfaced to the status bar or error modal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Feedback {
    pub message: String,
    pub is_error: bool,
}

impl Feedback {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            is_error: false,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            is_error: true,
        }
    }
}

/// Small grey helper text.
pub(crate) fn hint(text: impl Into<String>) -> egui::RichText {
    egui::RichText::new(text.into())
        .small()
        .color(egui::Color32::from_gray(110))
}

/// Label plus full-width text input as one grid row. Returns whether the text changed.
pub(crate) fn text_row(ui: &mut egui::Ui, label: &str, value: &mut String, multiline: bool) -> bool {
    ui.label(label);
    let edit = if multiline {
        egui::TextEdit::multiline(value).desired_rows(3)
    } else {
        egui::TextEdit::singleline(value)
    };
    let changed = ui.add(edit.desired_width(f32::INFINITY)).changed();
    ui.end_row();
    changed
}

/// Placeholder line for loading, failed and empty lists.
pub(crate) fn list_status<T>(
    ui: &mut egui::Ui,
    remote: &crate::mvu::remote::Remote<Vec<T>>,
    empty: &str,
) {
    use crate::mvu::remote::Remote;
    match remote {
        Remote::Idle => {}
        Remote::Loading => {
            ui.horizontal(|ui| {
                ui.add(egui::Spinner::new().size(14.0));
                ui.label("Loading…");
            });
        }
        Remote::Failed(message) => {
            ui.colored_label(ui.visuals().error_fg_color, message);
        }
        Remote::Loaded(items) if items.is_empty() => {
            ui.label(egui::RichText::new(empty).italics().color(egui::Color32::from_gray(110)));
        }
        Remote::Loaded(_) => {}
    }
}
