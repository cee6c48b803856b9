// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Freddie Admin contributors

//! Identities of the selected manager (email addresses, domains) and their verification state.

use eframe::egui;

use crate::api::{ApiClient, Transport};
use crate::logic::payload::{IdentityPayload, identity_payload};
use crate::logic::validation::ValidationError;
use crate::models::identity::{Identity, IdentityDraft, VerificationStatus};
use crate::mvu::remote::Remote;
use crate::mvu::session::ContextTag;
use crate::ui::components::confirm::{DeleteAction, PendingDelete, delete_controls};
use crate::ui::components::{Feedback, hint, list_status, text_row};
use crate::utils::format_timestamp;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct IdentitiesModel {
    pub list: Remote<Vec<Identity>>,
    context: ContextTag,
    draft: IdentityDraft,
    editing: Option<String>,
    form_open: bool,
    saving: bool,
    deleting: Option<String>,
    pending_delete: PendingDelete,
}

impl IdentitiesModel {
    pub fn context(&self) -> &ContextTag {
        &self.context
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum IdentitiesMsg {
    /// Selection changed: drop everything and refetch for the new manager.
    Reset(ContextTag),
    Refresh,
    Loaded {
        tag: ContextTag,
        result: Result<Vec<Identity>, String>,
    },
    OpenCreate,
    OpenEdit(String),
    DraftChanged(IdentityDraft),
    CloseForm,
    Submit,
    Saved {
        tag: ContextTag,
        result: Result<Identity, String>,
    },
    Delete(String, DeleteAction),
    Deleted {
        tag: ContextTag,
        id: String,
        result: Result<(), String>,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IdentitiesCommand {
    Fetch {
        tag: ContextTag,
        manager_id: String,
    },
    Create {
        tag: ContextTag,
        manager_id: String,
        payload: IdentityPayload,
    },
    Update {
        tag: ContextTag,
        manager_id: String,
        id: String,
        payload: IdentityPayload,
    },
    Delete {
        tag: ContextTag,
        manager_id: String,
        id: String,
    },
}

pub fn update(
    model: &mut IdentitiesModel,
    msg: IdentitiesMsg,
    cmds: &mut Vec<IdentitiesCommand>,
) -> Option<Feedback> {
    match msg {
        IdentitiesMsg::Reset(tag) => {
            *model = IdentitiesModel {
                context: tag,
                ..IdentitiesModel::default()
            };
            fetch(model, cmds);
            None
        }
        IdentitiesMsg::Refresh => {
            fetch(model, cmds);
            None
        }
        IdentitiesMsg::Loaded { tag, result } => {
            if tag == model.context {
                model.list.resolve(result);
            }
            None
        }
        IdentitiesMsg::OpenCreate => {
            model.draft = IdentityDraft {
                verification_status: Some(VerificationStatus::Unverified),
                ..IdentityDraft::default()
            };
            model.editing = None;
            model.form_open = true;
            None
        }
        IdentitiesMsg::OpenEdit(id) => {
            let identity = model.list.find(&id)?;
            if identity.is_verified() {
                return Some(Feedback::error("Verified identities cannot be edited."));
            }
            model.draft = IdentityDraft::from(identity);
            model.editing = Some(id);
            model.form_open = true;
            None
        }
        IdentitiesMsg::DraftChanged(draft) => {
            model.draft = draft;
            None
        }
        IdentitiesMsg::CloseForm => {
            close_form(model);
            None
        }
        IdentitiesMsg::Submit => {
            if model.saving {
                return None;
            }
            let Some(manager_id) = model.context.manager_id.clone() else {
                return Some(Feedback::error(ValidationError::NoManagerSelected.to_string()));
            };
            let payload = match identity_payload(&model.draft, model.editing.is_none()) {
                Ok(payload) => payload,
                Err(err) => return Some(Feedback::error(err.to_string())),
            };
            model.saving = true;
            let tag = model.context.clone();
            cmds.push(match model.editing.clone() {
                Some(id) => IdentitiesCommand::Update {
                    tag,
                    manager_id,
                    id,
                    payload,
                },
                None => IdentitiesCommand::Create {
                    tag,
                    manager_id,
                    payload,
                },
            });
            None
        }
        IdentitiesMsg::Saved { tag, result } => {
            let current = tag == model.context;
            if current {
                model.saving = false;
            }
            match result {
                Ok(identity) => {
                    let message = format!("Identity \"{}\" saved.", identity.identity);
                    if current {
                        model.list.upsert(identity);
                        close_form(model);
                    }
                    Some(Feedback::info(message))
                }
                Err(err) => Some(Feedback::error(err)),
            }
        }
        IdentitiesMsg::Delete(id, action) => {
            match action {
                DeleteAction::Arm => model.pending_delete.arm(id),
                DeleteAction::Cancel => model.pending_delete.cancel(),
                DeleteAction::Confirm => {
                    if model.pending_delete.confirm(&id)
                        && let Some(manager_id) = model.context.manager_id.clone()
                    {
                        model.deleting = Some(id.clone());
                        cmds.push(IdentitiesCommand::Delete {
                            tag: model.context.clone(),
                            manager_id,
                            id,
                        });
                    }
                }
            }
            None
        }
        IdentitiesMsg::Deleted { tag, id, result } => {
            let current = tag == model.context;
            match result {
                Ok(()) => {
                    if current {
                        model.deleting = None;
                        model.list.remove(&id);
                    }
                    Some(Feedback::info("Identity deleted."))
                }
                Err(err) => {
                    if current {
                        model.deleting = None;
                    }
                    Some(Feedback::error(err))
                }
            }
        }
    }
}

fn fetch(model: &mut IdentitiesModel, cmds: &mut Vec<IdentitiesCommand>) {
    match model.context.manager_id.clone() {
        Some(manager_id) => {
            model.list = Remote::Loading;
            cmds.push(IdentitiesCommand::Fetch {
                tag: model.context.clone(),
                manager_id,
            });
        }
        None => model.list = Remote::Idle,
    }
}

fn close_form(model: &mut IdentitiesModel) {
    model.form_open = false;
    model.editing = None;
    model.draft = IdentityDraft::default();
}

pub fn execute<T: Transport>(client: &ApiClient<T>, cmd: IdentitiesCommand) -> IdentitiesMsg {
    match cmd {
        IdentitiesCommand::Fetch { tag, manager_id } => IdentitiesMsg::Loaded {
            tag,
            result: client
                .list_identities(&manager_id)
                .map_err(|e| e.to_string()),
        },
        IdentitiesCommand::Create {
            tag,
            manager_id,
            payload,
        } => IdentitiesMsg::Saved {
            tag,
            result: client
                .create_identity(&manager_id, &payload)
                .map_err(|e| e.to_string()),
        },
        IdentitiesCommand::Update {
            tag,
            manager_id,
            id,
            payload,
        } => IdentitiesMsg::Saved {
            tag,
            result: client
                .update_identity(&manager_id, &id, &payload)
                .map_err(|e| e.to_string()),
        },
        IdentitiesCommand::Delete {
            tag,
            manager_id,
            id,
        } => {
            let result = client
                .delete_identity(&manager_id, &id)
                .map_err(|e| e.to_string());
            IdentitiesMsg::Deleted { tag, id, result }
        }
    }
}

pub fn view(ui: &mut egui::Ui, model: &IdentitiesModel) -> Vec<IdentitiesMsg> {
    let mut msgs = Vec::new();

    ui.horizontal(|ui| {
        ui.heading("Identities");
        let has_manager = model.context.manager_id.is_some();
        if ui
            .add_enabled(
                has_manager,
                egui::Button::new(format!("{} New identity", egui_phosphor::regular::PLUS)),
            )
            .clicked()
        {
            msgs.push(IdentitiesMsg::OpenCreate);
        }
        if ui
            .add_enabled(
                has_manager && !model.list.is_loading(),
                egui::Button::new(egui_phosphor::regular::ARROWS_CLOCKWISE),
            )
            .on_hover_text("Reload")
            .clicked()
        {
            msgs.push(IdentitiesMsg::Refresh);
        }
    });
    ui.add_space(6.0);

    if model.context.manager_id.is_none() {
        ui.label(hint("Select a manager to see their identities."));
        return msgs;
    }

    if model.form_open {
        render_form(ui, model, &mut msgs);
        ui.add_space(10.0);
    }

    list_status(ui, &model.list, "No identities for this manager.");
    if !model.list.items().is_empty() {
        egui::Grid::new("identities_grid")
            .num_columns(5)
            .striped(true)
            .spacing(egui::vec2(12.0, 6.0))
            .show(ui, |ui| {
                ui.strong("Identity");
                ui.strong("Type");
                ui.strong("Status");
                ui.strong("Created");
                ui.label("");
                ui.end_row();

                for identity in model.list.items() {
                    ui.label(&identity.identity);
                    ui.label(&identity.identity_type);
                    if identity.is_verified() {
                        ui.label(format!(
                            "{} {}",
                            egui_phosphor::regular::SEAL_CHECK,
                            identity.verification_status.label()
                        ));
                    } else {
                        ui.label(identity.verification_status.label());
                    }
                    ui.label(format_timestamp(identity.created_at.as_deref()));
                    ui.horizontal(|ui| {
                        if ui
                            .add_enabled(
                                !identity.is_verified(),
                                egui::Button::new(egui_phosphor::regular::PENCIL_SIMPLE),
                            )
                            .on_hover_text("Edit")
                            .on_disabled_hover_text("Verified identities cannot be edited")
                            .clicked()
                        {
                            msgs.push(IdentitiesMsg::OpenEdit(identity.id.clone()));
                        }
                        let busy = model.deleting.as_deref() == Some(identity.id.as_str());
                        if let Some(action) =
                            delete_controls(ui, &model.pending_delete, &identity.id, !busy)
                        {
                            msgs.push(IdentitiesMsg::Delete(identity.id.clone(), action));
                        }
                    });
                    ui.end_row();
                }
            });
    }

    msgs
}

fn render_form(ui: &mut egui::Ui, model: &IdentitiesModel, msgs: &mut Vec<IdentitiesMsg>) {
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.strong(if model.editing.is_some() {
            "Edit identity"
        } else {
            "New identity"
        });
        ui.add_space(4.0);

        let mut draft = model.draft.clone();
        let mut changed = false;
        egui::Grid::new("identity_form")
            .num_columns(2)
            .spacing(egui::vec2(8.0, 8.0))
            .min_col_width(140.0)
            .show(ui, |ui| {
                changed |= text_row(ui, "Identity", &mut draft.identity, false);
                changed |= text_row(ui, "Identity type", &mut draft.identity_type, false);

                ui.label("Verification status");
                let selected_text = draft
                    .verification_status
                    .as_ref()
                    .map(|s| s.label().to_string())
                    .unwrap_or_else(|| "Select…".to_string());
                egui::ComboBox::from_id_salt("identity_status")
                    .selected_text(selected_text)
                    .show_ui(ui, |ui| {
                        for status in VerificationStatus::ALL {
                            let is_current = draft.verification_status.as_ref() == Some(&status);
                            if ui.selectable_label(is_current, status.label()).clicked() && !is_current {
                                draft.verification_status = Some(status);
                                changed = true;
                            }
                        }
                    });
                ui.end_row();
            });
        if changed {
            msgs.push(IdentitiesMsg::DraftChanged(draft));
        }

        ui.horizontal(|ui| {
            let label = if model.saving { "Saving…" } else { "Save" };
            if ui
                .add_enabled(
                    !model.saving,
                    egui::Button::new(format!("{} {label}", egui_phosphor::regular::FLOPPY_DISK)),
                )
                .clicked()
            {
                msgs.push(IdentitiesMsg::Submit);
            }
            if ui.button("Cancel").clicked() {
                msgs.push(IdentitiesMsg::CloseForm);
            }
        });
    });
}
