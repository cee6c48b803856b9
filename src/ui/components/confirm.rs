// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Freddie Admin contributors

//! Two-step delete: the first click arms, only an explicit confirm fires.

use eframe::egui;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PendingDelete {
    armed: Option<String>,
}

impl PendingDelete {
    pub fn arm(&mut self, id: String) {
        self.armed = Some(id);
    }

    pub fn cancel(&mut self) {
        self.armed = None;
    }

    pub fn is_armed(&self, id: &str) -> bool {
        self.armed.as_deref() == Some(id)
    }

    /// Disarm and report whether `id` was the armed one.
    pub fn confirm(&mut self, id: &str) -> bool {
        let armed = self.is_armed(id);
        if armed {
            self.armed = None;
        }
        armed
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeleteAction {
    Arm,
    Confirm,
    Cancel,
}

/// Row-level delete controls; `enabled` is false while a request is in flight.
pub fn delete_controls(
    ui: &mut egui::Ui,
    pending: &PendingDelete,
    id: &str,
    enabled: bool,
) -> Option<DeleteAction> {
    let mut action = None;
    if pending.is_armed(id) {
        let confirm = egui::Button::new(
            egui::RichText::new(format!("{} Confirm delete", egui_phosphor::regular::WARNING))
                .color(ui.visuals().error_fg_color),
        );
        if ui.add_enabled(enabled, confirm).clicked() {
            action = Some(DeleteAction::Confirm);
        }
        if ui.button("Cancel").clicked() {
            action = Some(DeleteAction::Cancel);
        }
    } else if ui
        .add_enabled(
            enabled,
            egui::Button::new(egui_phosphor::regular::TRASH_SIMPLE),
        )
        .on_hover_text("Delete")
        .clicked()
    {
        action = Some(DeleteAction::Arm);
    }
    action
}
