// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Freddie Admin contributors

//! Job postings of the selected manager.

use eframe::egui;

use crate::api::{ApiClient, Transport};
use crate::logic::payload::{JobPayload, job_payload};
use crate::models::job::{Job, JobDraft};
use crate::mvu::remote::Remote;
use crate::mvu::session::ContextTag;
use crate::ui::components::confirm::{DeleteAction, PendingDelete, delete_controls};
use crate::ui::components::{Feedback, hint, list_status, text_row};
use crate::utils::format_timestamp;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct JobsModel {
    pub list: Remote<Vec<Job>>,
    context: ContextTag,
    draft: JobDraft,
    editing: Option<String>,
    form_open: bool,
    saving: bool,
    deleting: Option<String>,
    pending_delete: PendingDelete,
}

#[derive(Clone, Debug, PartialEq)]
pub enum JobsMsg {
    Reset(ContextTag),
    Refresh,
    Loaded {
        tag: ContextTag,
        result: Result<Vec<Job>, String>,
    },
    /// Handled by the root, which owns the selection.
    Select(String),
    OpenCreate,
    OpenEdit(String),
    DraftChanged(JobDraft),
    CloseForm,
    Submit,
    Saved {
        tag: ContextTag,
        result: Result<Job, String>,
    },
    Delete(String, DeleteAction),
    Deleted {
        tag: ContextTag,
        id: String,
        result: Result<(), String>,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum JobsCommand {
    Fetch {
        tag: ContextTag,
        manager_id: String,
    },
    Create {
        tag: ContextTag,
        payload: JobPayload,
    },
    Update {
        tag: ContextTag,
        id: String,
        payload: JobPayload,
    },
    Delete {
        tag: ContextTag,
        manager_id: String,
        id: String,
    },
}

pub fn update(model: &mut JobsModel, msg: JobsMsg, cmds: &mut Vec<JobsCommand>) -> Option<Feedback> {
    match msg {
        JobsMsg::Reset(tag) => {
            *model = JobsModel {
                context: tag,
                ..JobsModel::default()
            };
            fetch(model, cmds);
            None
        }
        JobsMsg::Refresh => {
            fetch(model, cmds);
            None
        }
        JobsMsg::Loaded { tag, result } => {
            if tag == model.context {
                model.list.resolve(result);
            }
            None
        }
        JobsMsg::Select(_) => None,
        JobsMsg::OpenCreate => {
            model.draft = JobDraft::default();
            model.editing = None;
            model.form_open = true;
            None
        }
        JobsMsg::OpenEdit(id) => {
            let job = model.list.find(&id)?;
            model.draft = JobDraft::from(job);
            model.editing = Some(id);
            model.form_open = true;
            None
        }
        JobsMsg::DraftChanged(draft) => {
            model.draft = draft;
            None
        }
        JobsMsg::CloseForm => {
            close_form(model);
            None
        }
        JobsMsg::Submit => {
            if model.saving {
                return None;
            }
            let payload = match job_payload(&model.draft, model.context.manager_id.as_deref()) {
                Ok(payload) => payload,
                Err(err) => return Some(Feedback::error(err.to_string())),
            };
            model.saving = true;
            let tag = model.context.clone();
            cmds.push(match model.editing.clone() {
                Some(id) => JobsCommand::Update { tag, id, payload },
                None => JobsCommand::Create { tag, payload },
            });
            None
        }
        JobsMsg::Saved { tag, result } => {
            let current = tag == model.context;
            if current {
                model.saving = false;
            }
            match result {
                Ok(job) => {
                    let message = format!("Job \"{}\" saved.", job.title);
                    if current {
                        model.list.upsert(job);
                        close_form(model);
                    }
                    Some(Feedback::info(message))
                }
                Err(err) => Some(Feedback::error(err)),
            }
        }
        JobsMsg::Delete(id, action) => {
            match action {
                DeleteAction::Arm => model.pending_delete.arm(id),
                DeleteAction::Cancel => model.pending_delete.cancel(),
                DeleteAction::Confirm => {
                    if model.pending_delete.confirm(&id)
                        && let Some(manager_id) = model.context.manager_id.clone()
                    {
                        model.deleting = Some(id.clone());
                        cmds.push(JobsCommand::Delete {
                            tag: model.context.clone(),
                            manager_id,
                            id,
                        });
                    }
                }
            }
            None
        }
        JobsMsg::Deleted { tag, id, result } => {
            let current = tag == model.context;
            if current {
                model.deleting = None;
            }
            match result {
                Ok(()) => {
                    if current {
                        model.list.remove(&id);
                    }
                    Some(Feedback::info("Job deleted."))
                }
                Err(err) => Some(Feedback::error(err)),
            }
        }
    }
}

fn fetch(model: &mut JobsModel, cmds: &mut Vec<JobsCommand>) {
    match model.context.manager_id.clone() {
        Some(manager_id) => {
            model.list = Remote::Loading;
            cmds.push(JobsCommand::Fetch {
                tag: model.context.clone(),
                manager_id,
            });
        }
        None => model.list = Remote::Idle,
    }
}

fn close_form(model: &mut JobsModel) {
    model.form_open = false;
    model.editing = None;
    model.draft = JobDraft::default();
}

pub fn execute<T: Transport>(client: &ApiClient<T>, cmd: JobsCommand) -> JobsMsg {
    match cmd {
        JobsCommand::Fetch { tag, manager_id } => JobsMsg::Loaded {
            tag,
            result: client.list_jobs(&manager_id).map_err(|e| e.to_string()),
        },
        JobsCommand::Create { tag, payload } => JobsMsg::Saved {
            tag,
            result: client.create_job(&payload).map_err(|e| e.to_string()),
        },
        JobsCommand::Update { tag, id, payload } => JobsMsg::Saved {
            tag,
            result: client
                .update_job(&payload.manager_id, &id, &payload)
                .map_err(|e| e.to_string()),
        },
        JobsCommand::Delete {
            tag,
            manager_id,
            id,
        } => {
            let result = client.delete_job(&manager_id, &id).map_err(|e| e.to_string());
            JobsMsg::Deleted { tag, id, result }
        }
    }
}

pub fn view(ui: &mut egui::Ui, model: &JobsModel, selected: Option<&str>) -> Vec<JobsMsg> {
    let mut msgs = Vec::new();
    let has_manager = model.context.manager_id.is_some();

    ui.horizontal(|ui| {
        ui.heading("Jobs");
        if ui
            .add_enabled(
                has_manager,
                egui::Button::new(format!("{} New job", egui_phosphor::regular::PLUS)),
            )
            .clicked()
        {
            msgs.push(JobsMsg::OpenCreate);
        }
        if ui
            .add_enabled(
                has_manager && !model.list.is_loading(),
                egui::Button::new(egui_phosphor::regular::ARROWS_CLOCKWISE),
            )
            .on_hover_text("Reload")
            .clicked()
        {
            msgs.push(JobsMsg::Refresh);
        }
    });
    ui.add_space(6.0);

    if !has_manager {
        ui.label(hint("Select a manager to see their jobs."));
        return msgs;
    }

    if model.form_open {
        render_form(ui, model, &mut msgs);
        ui.add_space(10.0);
    }

    list_status(ui, &model.list, "No jobs for this manager.");
    if !model.list.items().is_empty() {
        egui::Grid::new("jobs_grid")
            .num_columns(6)
            .striped(true)
            .spacing(egui::vec2(12.0, 6.0))
            .show(ui, |ui| {
                ui.strong("Title");
                ui.strong("Location");
                ui.strong("Work mode");
                ui.strong("Status");
                ui.strong("Applicants");
                ui.label("");
                ui.end_row();

                for job in model.list.items() {
                    let is_selected = selected == Some(job.id.as_str());
                    if ui
                        .selectable_label(is_selected, &job.title)
                        .on_hover_text(&job.description)
                        .clicked()
                    {
                        msgs.push(JobsMsg::Select(job.id.clone()));
                    }
                    ui.label(location(job));
                    ui.label(&job.work_mode);
                    ui.label(&job.status);
                    ui.label(job.applicant_count.to_string())
                        .on_hover_text(format!(
                            "Posted {}",
                            format_timestamp(job.created_at.as_deref())
                        ));
                    ui.horizontal(|ui| {
                        if ui
                            .button(egui_phosphor::regular::PENCIL_SIMPLE)
                            .on_hover_text("Edit")
                            .clicked()
                        {
                            msgs.push(JobsMsg::OpenEdit(job.id.clone()));
                        }
                        let busy = model.deleting.as_deref() == Some(job.id.as_str());
                        if let Some(action) = delete_controls(ui, &model.pending_delete, &job.id, !busy) {
                            msgs.push(JobsMsg::Delete(job.id.clone(), action));
                        }
                    });
                    ui.end_row();
                }
            });
    }

    msgs
}

fn location(job: &Job) -> String {
    [&job.city, &job.state, &job.country]
        .into_iter()
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

fn render_form(ui: &mut egui::Ui, model: &JobsModel, msgs: &mut Vec<JobsMsg>) {
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.strong(if model.editing.is_some() { "Edit job" } else { "New job" });
        ui.add_space(4.0);

        let mut draft = model.draft.clone();
        let mut changed = false;
        egui::Grid::new("job_form")
            .num_columns(2)
            .spacing(egui::vec2(8.0, 8.0))
            .min_col_width(140.0)
            .show(ui, |ui| {
                changed |= text_row(ui, "Title", &mut draft.title, false);
                changed |= text_row(ui, "Description", &mut draft.description, true);
                changed |= text_row(ui, "Requirements", &mut draft.requirements, false);
                changed |= text_row(ui, "Roles", &mut draft.roles, false);
                changed |= text_row(ui, "Country", &mut draft.country, false);
                changed |= text_row(ui, "State", &mut draft.state, false);
                changed |= text_row(ui, "City", &mut draft.city, false);
                changed |= text_row(ui, "Work mode", &mut draft.work_mode, false);
                changed |= text_row(ui, "Why join us", &mut draft.why_join_us, true);
                changed |= text_row(ui, "Status", &mut draft.status, false);
            });
        if changed {
            msgs.push(JobsMsg::DraftChanged(draft));
        }

        ui.label(hint(
            "Requirements and roles are comma-separated. Title, description, location and work mode are required.",
        ));
        ui.horizontal(|ui| {
            let label = if model.saving { "Saving…" } else { "Save" };
            if ui
                .add_enabled(
                    !model.saving,
                    egui::Button::new(format!("{} {label}", egui_phosphor::regular::FLOPPY_DISK)),
                )
                .clicked()
            {
                msgs.push(JobsMsg::Submit);
            }
            if ui.button("Cancel").clicked() {
                msgs.push(JobsMsg::CloseForm);
            }
        });
    });
}
