// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Freddie Admin contributors

//! Managers screen: list, create/edit form and two-step delete.

use eframe::egui;

use crate::api::{ApiClient, Transport};
use crate::logic::payload::{ManagerPayload, manager_payload};
use crate::models::manager::{Manager, ManagerDraft};
use crate::mvu::remote::Remote;
use crate::ui::components::confirm::{DeleteAction, PendingDelete, delete_controls};
use crate::ui::components::{Feedback, hint, list_status, text_row};
use crate::utils::format_timestamp;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ManagersModel {
    pub list: Remote<Vec<Manager>>,
    draft: ManagerDraft,
    /// Id under edit; `None` while the form creates a new manager.
    editing: Option<String>,
    form_open: bool,
    saving: bool,
    deleting: Option<String>,
    pending_delete: PendingDelete,
}

impl ManagersModel {
    pub fn draft(&self) -> &ManagerDraft {
        &self.draft
    }

    pub fn is_form_open(&self) -> bool {
        self.form_open
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ManagersMsg {
    Refresh,
    Loaded(Result<Vec<Manager>, String>),
    /// Handled by the root, which owns the selection.
    Select(String),
    OpenCreate,
    OpenEdit(String),
    DraftChanged(ManagerDraft),
    CloseForm,
    Submit,
    Saved(Result<Manager, String>),
    Delete(String, DeleteAction),
    Deleted {
        id: String,
        result: Result<(), String>,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ManagersCommand {
    Fetch,
    Create(ManagerPayload),
    Update { id: String, payload: ManagerPayload },
    Delete { id: String },
}

pub fn update(
    model: &mut ManagersModel,
    msg: ManagersMsg,
    cmds: &mut Vec<ManagersCommand>,
) -> Option<Feedback> {
    match msg {
        ManagersMsg::Refresh => {
            model.list = Remote::Loading;
            cmds.push(ManagersCommand::Fetch);
            None
        }
        ManagersMsg::Loaded(result) => {
            model.list.resolve(result);
            None
        }
        ManagersMsg::Select(_) => None,
        ManagersMsg::OpenCreate => {
            model.draft = ManagerDraft::default();
            model.editing = None;
            model.form_open = true;
            None
        }
        ManagersMsg::OpenEdit(id) => {
            let manager = model.list.find(&id)?;
            model.draft = ManagerDraft::from(manager);
            model.editing = Some(id);
            model.form_open = true;
            None
        }
        ManagersMsg::DraftChanged(draft) => {
            model.draft = draft;
            None
        }
        ManagersMsg::CloseForm => {
            close_form(model);
            None
        }
        ManagersMsg::Submit => {
            if model.saving {
                return None;
            }
            match manager_payload(&model.draft) {
                Ok(payload) => {
                    model.saving = true;
                    cmds.push(match model.editing.clone() {
                        Some(id) => ManagersCommand::Update { id, payload },
                        None => ManagersCommand::Create(payload),
                    });
                    None
                }
                Err(err) => Some(Feedback::error(err.to_string())),
            }
        }
        ManagersMsg::Saved(result) => {
            model.saving = false;
            match result {
                Ok(manager) => {
                    let verb = if model.editing.is_some() { "updated" } else { "created" };
                    let message = format!("Manager \"{}\" {verb}.", manager.full_name);
                    model.list.upsert(manager);
                    close_form(model);
                    Some(Feedback::info(message))
                }
                Err(err) => Some(Feedback::error(err)),
            }
        }
        ManagersMsg::Delete(id, action) => {
            match action {
                DeleteAction::Arm => model.pending_delete.arm(id),
                DeleteAction::Cancel => model.pending_delete.cancel(),
                DeleteAction::Confirm => {
                    if model.pending_delete.confirm(&id) {
                        model.deleting = Some(id.clone());
                        cmds.push(ManagersCommand::Delete { id });
                    }
                }
            }
            None
        }
        ManagersMsg::Deleted { id, result } => {
            model.deleting = None;
            match result {
                Ok(()) => {
                    model.list.remove(&id);
                    if model.editing.as_deref() == Some(id.as_str()) {
                        close_form(model);
                    }
                    Some(Feedback::info("Manager deleted."))
                }
                Err(err) => Some(Feedback::error(err)),
            }
        }
    }
}

fn close_form(model: &mut ManagersModel) {
    model.form_open = false;
    model.editing = None;
    model.draft = ManagerDraft::default();
}

/// Run a managers command against the API.
pub fn execute<T: Transport>(client: &ApiClient<T>, cmd: ManagersCommand) -> ManagersMsg {
    match cmd {
        ManagersCommand::Fetch => ManagersMsg::Loaded(client.list_managers().map_err(|e| e.to_string())),
        ManagersCommand::Create(payload) => {
            ManagersMsg::Saved(client.create_manager(&payload).map_err(|e| e.to_string()))
        }
        ManagersCommand::Update { id, payload } => {
            ManagersMsg::Saved(client.update_manager(&id, &payload).map_err(|e| e.to_string()))
        }
        ManagersCommand::Delete { id } => {
            let result = client.delete_manager(&id).map_err(|e| e.to_string());
            ManagersMsg::Deleted { id, result }
        }
    }
}

pub fn view(ui: &mut egui::Ui, model: &ManagersModel, selected: Option<&str>) -> Vec<ManagersMsg> {
    let mut msgs = Vec::new();

    ui.horizontal(|ui| {
        ui.heading("Managers");
        if ui
            .button(format!("{} New manager", egui_phosphor::regular::PLUS))
            .clicked()
        {
            msgs.push(ManagersMsg::OpenCreate);
        }
        if ui
            .add_enabled(
                !model.list.is_loading(),
                egui::Button::new(egui_phosphor::regular::ARROWS_CLOCKWISE),
            )
            .on_hover_text("Reload")
            .clicked()
        {
            msgs.push(ManagersMsg::Refresh);
        }
    });
    ui.add_space(6.0);

    if model.form_open {
        render_form(ui, model, &mut msgs);
        ui.add_space(10.0);
    }

    list_status(ui, &model.list, "No managers yet.");
    if !model.list.items().is_empty() {
        egui::Grid::new("managers_grid")
            .num_columns(5)
            .striped(true)
            .spacing(egui::vec2(12.0, 6.0))
            .show(ui, |ui| {
                ui.strong("Name");
                ui.strong("Email");
                ui.strong("Company");
                ui.strong("Created");
                ui.label("");
                ui.end_row();

                for manager in model.list.items() {
                    let is_selected = selected == Some(manager.id.as_str());
                    if ui.selectable_label(is_selected, &manager.full_name).clicked() {
                        msgs.push(ManagersMsg::Select(manager.id.clone()));
                    }
                    ui.label(&manager.email);
                    ui.label(&manager.company_name)
                        .on_hover_text(&manager.company_description);
                    ui.label(format_timestamp(manager.created_at.as_deref()));
                    ui.horizontal(|ui| {
                        if ui
                            .button(egui_phosphor::regular::PENCIL_SIMPLE)
                            .on_hover_text("Edit")
                            .clicked()
                        {
                            msgs.push(ManagersMsg::OpenEdit(manager.id.clone()));
                        }
                        let busy = model.deleting.as_deref() == Some(manager.id.as_str());
                        if let Some(action) =
                            delete_controls(ui, &model.pending_delete, &manager.id, !busy)
                        {
                            msgs.push(ManagersMsg::Delete(manager.id.clone(), action));
                        }
                    });
                    ui.end_row();
                }
            });
    }

    msgs
}

fn render_form(ui: &mut egui::Ui, model: &ManagersModel, msgs: &mut Vec<ManagersMsg>) {
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.strong(if model.editing.is_some() {
            "Edit manager"
        } else {
            "New manager"
        });
        ui.add_space(4.0);

        let mut draft = model.draft.clone();
        let mut changed = false;
        egui::Grid::new("manager_form")
            .num_columns(2)
            .spacing(egui::vec2(8.0, 8.0))
            .min_col_width(140.0)
            .show(ui, |ui| {
                changed |= text_row(ui, "Full name", &mut draft.full_name, false);
                changed |= text_row(ui, "Email", &mut draft.email, false);
                changed |= text_row(ui, "Company name", &mut draft.company_name, false);
                changed |= text_row(ui, "Company description", &mut draft.company_description, true);
            });
        if changed {
            msgs.push(ManagersMsg::DraftChanged(draft));
        }

        ui.label(hint("Full name, email and company name are required."));
        ui.horizontal(|ui| {
            let label = if model.saving { "Saving…" } else { "Save" };
            if ui
                .add_enabled(
                    !model.saving,
                    egui::Button::new(format!("{} {label}", egui_phosphor::regular::FLOPPY_DISK)),
                )
                .clicked()
            {
                msgs.push(ManagersMsg::Submit);
            }
            if ui.button("Cancel").clicked() {
                msgs.push(ManagersMsg::CloseForm);
            }
        });
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded(managers: &[(&str, &str)]) -> ManagersModel {
        ManagersModel {
            list: Remote::Loaded(
                managers
                    .iter()
                    .map(|(id, name)| Manager {
                        id: id.to_string(),
                        full_name: name.to_string(),
                        email: format!("{id}@co.com"),
                        company_name: "Co".into(),
                        ..Manager::default()
                    })
                    .collect(),
            ),
            ..ManagersModel::default()
        }
    }

    #[test]
    fn invalid_draft_never_reaches_the_api() {
        let mut model = ManagersModel::default();
        let mut cmds = Vec::new();
        update(&mut model, ManagersMsg::OpenCreate, &mut cmds);
        update(
            &mut model,
            ManagersMsg::DraftChanged(ManagerDraft {
                full_name: "Jane".into(),
                email: "not-an-email".into(),
                company_name: "Co".into(),
                company_description: String::new(),
            }),
            &mut cmds,
        );

        let feedback = update(&mut model, ManagersMsg::Submit, &mut cmds).unwrap();
        assert!(feedback.is_error);
        assert_eq!(feedback.message, "Invalid email format.");
        assert!(cmds.is_empty());
    }

    #[test]
    fn edit_submits_update_and_replaces_row() {
        let mut model = loaded(&[("m-1", "Ann"), ("m-2", "Bo")]);
        let mut cmds = Vec::new();
        update(&mut model, ManagersMsg::OpenEdit("m-2".into()), &mut cmds);
        assert_eq!(model.draft().full_name, "Bo");

        let mut draft = model.draft().clone();
        draft.full_name = "Bobby".into();
        update(&mut model, ManagersMsg::DraftChanged(draft), &mut cmds);
        update(&mut model, ManagersMsg::Submit, &mut cmds);
        assert!(matches!(&cmds[..], [ManagersCommand::Update { id, .. }] if id == "m-2"));

        let saved = Manager {
            id: "m-2".into(),
            full_name: "Bobby".into(),
            ..Manager::default()
        };
        let feedback = update(&mut model, ManagersMsg::Saved(Ok(saved)), &mut cmds).unwrap();
        assert_eq!(feedback.message, "Manager \"Bobby\" updated.");
        assert_eq!(model.list.items().len(), 2);
        assert_eq!(model.list.items()[1].full_name, "Bobby");
        assert!(!model.is_form_open());
    }

    #[test]
    fn failed_save_keeps_list_and_form() {
        let mut model = loaded(&[("m-1", "Ann")]);
        let before = model.list.clone();
        let mut cmds = Vec::new();
        update(&mut model, ManagersMsg::OpenEdit("m-1".into()), &mut cmds);

        let feedback = update(
            &mut model,
            ManagersMsg::Saved(Err("Email already used".into())),
            &mut cmds,
        )
        .unwrap();
        assert!(feedback.is_error);
        assert_eq!(model.list, before);
        assert!(model.is_form_open());
    }

    #[test]
    fn delete_needs_confirmation() {
        let mut model = loaded(&[("m-1", "Ann")]);
        let mut cmds = Vec::new();

        update(&mut model, ManagersMsg::Delete("m-1".into(), DeleteAction::Confirm), &mut cmds);
        assert!(cmds.is_empty());

        update(&mut model, ManagersMsg::Delete("m-1".into(), DeleteAction::Arm), &mut cmds);
        update(&mut model, ManagersMsg::Delete("m-1".into(), DeleteAction::Confirm), &mut cmds);
        assert_eq!(cmds, vec![ManagersCommand::Delete { id: "m-1".into() }]);
        assert_eq!(model.list.items().len(), 1, "list changes only after success");

        update(
            &mut model,
            ManagersMsg::Deleted {
                id: "m-1".into(),
                result: Ok(()),
            },
            &mut cmds,
        );
        assert!(model.list.items().is_empty());
    }
}
