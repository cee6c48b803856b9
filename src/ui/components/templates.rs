// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Freddie Admin contributors

//! List + editor screen for tree-shaped documents: reusable form templates and the dynamic
//! application forms attached to jobs. Both share one component, parameterized by
//! [`DocumentKind`], because they differ only in endpoints and wording.

use eframe::egui;

use crate::api::{ApiClient, Transport};
use crate::logic::payload::template_payload;
use crate::models::form_template::FormTemplate;
use crate::mvu::remote::Remote;
use crate::mvu::session::ContextTag;
use crate::ui::components::confirm::{DeleteAction, PendingDelete, delete_controls};
use crate::ui::components::template_editor::{self, EditorMode, EditorModel, EditorMsg};
use crate::ui::components::{Feedback, hint, list_status};
use crate::utils::format_timestamp;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DocumentKind {
    #[default]
    Template,
    Form,
}

impl DocumentKind {
    pub fn noun(self) -> &'static str {
        match self {
            Self::Template => "template",
            Self::Form => "form",
        }
    }

    fn heading(self) -> &'static str {
        match self {
            Self::Template => "Form templates",
            Self::Form => "Forms",
        }
    }

    fn capitalized(self) -> &'static str {
        match self {
            Self::Template => "Template",
            Self::Form => "Form",
        }
    }

    /// Forms are listed per job; templates per manager, optionally narrowed to a job.
    fn needs_job(self) -> bool {
        self == Self::Form
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TemplatesModel {
    pub kind: DocumentKind,
    pub list: Remote<Vec<FormTemplate>>,
    context: ContextTag,
    editor: Option<EditorModel>,
    saving: bool,
    deleting: Option<String>,
    pending_delete: PendingDelete,
}

impl TemplatesModel {
    pub fn new(kind: DocumentKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    pub fn editor(&self) -> Option<&EditorModel> {
        self.editor.as_ref()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum TemplatesMsg {
    Reset(ContextTag),
    Refresh,
    Loaded {
        tag: ContextTag,
        result: Result<Vec<FormTemplate>, String>,
    },
    /// Forms only; handled by the root, which owns the selection.
    Select(String),
    OpenCreate,
    OpenEdit(String),
    Editor(EditorMsg),
    CloseEditor,
    Submit,
    Saved {
        tag: ContextTag,
        created: bool,
        result: Result<FormTemplate, String>,
    },
    Delete(String, DeleteAction),
    Deleted {
        tag: ContextTag,
        id: String,
        result: Result<(), String>,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub enum TemplatesCommand {
    Fetch {
        tag: ContextTag,
        kind: DocumentKind,
        manager_id: String,
        job_id: Option<String>,
    },
    Create {
        tag: ContextTag,
        kind: DocumentKind,
        manager_id: String,
        payload: FormTemplate,
    },
    Update {
        tag: ContextTag,
        kind: DocumentKind,
        manager_id: String,
        id: String,
        payload: FormTemplate,
    },
    Delete {
        tag: ContextTag,
        kind: DocumentKind,
        manager_id: String,
        id: String,
    },
}

pub fn update(
    model: &mut TemplatesModel,
    msg: TemplatesMsg,
    cmds: &mut Vec<TemplatesCommand>,
) -> Option<Feedback> {
    let kind = model.kind;
    match msg {
        TemplatesMsg::Reset(tag) => {
            *model = TemplatesModel {
                context: tag,
                ..TemplatesModel::new(kind)
            };
            fetch(model, cmds);
            None
        }
        TemplatesMsg::Refresh => {
            fetch(model, cmds);
            None
        }
        TemplatesMsg::Loaded { tag, result } => {
            if tag == model.context {
                model.list.resolve(result);
            }
            None
        }
        TemplatesMsg::Select(_) => None,
        TemplatesMsg::OpenCreate => {
            model.editor = Some(EditorModel::create());
            None
        }
        TemplatesMsg::OpenEdit(id) => {
            let existing = model.list.find(&id)?;
            match EditorModel::edit(existing) {
                Some(editor) => {
                    model.editor = Some(editor);
                    None
                }
                None => Some(Feedback::error(format!(
                    "This {} has no id and cannot be edited.",
                    kind.noun()
                ))),
            }
        }
        TemplatesMsg::Editor(editor_msg) => {
            if let Some(editor) = model.editor.as_mut() {
                template_editor::update(editor, editor_msg);
            }
            None
        }
        TemplatesMsg::CloseEditor => {
            model.editor = None;
            None
        }
        TemplatesMsg::Submit => {
            if model.saving {
                return None;
            }
            let editor = model.editor.as_ref()?;
            let payload = match template_payload(
                &editor.template,
                model.context.manager_id.as_deref(),
                model.context.job_id.as_deref(),
            ) {
                Ok(payload) => payload,
                Err(err) => return Some(Feedback::error(err.to_string())),
            };
            let manager_id = payload.manager_id.clone().unwrap_or_default();
            let tag = model.context.clone();
            cmds.push(match &editor.mode {
                EditorMode::Create => TemplatesCommand::Create {
                    tag,
                    kind,
                    manager_id,
                    payload,
                },
                EditorMode::Edit(id) => TemplatesCommand::Update {
                    tag,
                    kind,
                    manager_id,
                    id: id.clone(),
                    payload,
                },
            });
            model.saving = true;
            None
        }
        TemplatesMsg::Saved {
            tag,
            created,
            result,
        } => {
            let current = tag == model.context;
            if current {
                model.saving = false;
            }
            match result {
                Ok(document) => {
                    let verb = if created { "created" } else { "updated" };
                    let message =
                        format!("{} \"{}\" {verb}.", kind.capitalized(), document.title);
                    if current {
                        model.list.upsert(document);
                        model.editor = None;
                    }
                    Some(Feedback::info(message))
                }
                Err(err) => Some(Feedback::error(err)),
            }
        }
        TemplatesMsg::Delete(id, action) => {
            match action {
                DeleteAction::Arm => model.pending_delete.arm(id),
                DeleteAction::Cancel => model.pending_delete.cancel(),
                DeleteAction::Confirm => {
                    if model.pending_delete.confirm(&id)
                        && let Some(manager_id) = model.context.manager_id.clone()
                    {
                        model.deleting = Some(id.clone());
                        cmds.push(TemplatesCommand::Delete {
                            tag: model.context.clone(),
                            kind,
                            manager_id,
                            id,
                        });
                    }
                }
            }
            None
        }
        TemplatesMsg::Deleted { tag, id, result } => {
            let current = tag == model.context;
            if current {
                model.deleting = None;
            }
            match result {
                Ok(()) => {
                    if current {
                        model.list.remove(&id);
                        if model
                            .editor
                            .as_ref()
                            .is_some_and(|e| e.mode == EditorMode::Edit(id.clone()))
                        {
                            model.editor = None;
                        }
                    }
                    Some(Feedback::info(format!("{} deleted.", kind.capitalized())))
                }
                Err(err) => Some(Feedback::error(err)),
            }
        }
    }
}

fn fetch(model: &mut TemplatesModel, cmds: &mut Vec<TemplatesCommand>) {
    let job_id = model.context.job_id.clone();
    let ready = model.context.manager_id.clone().filter(|_| !model.kind.needs_job() || job_id.is_some());
    match ready {
        Some(manager_id) => {
            model.list = Remote::Loading;
            cmds.push(TemplatesCommand::Fetch {
                tag: model.context.clone(),
                kind: model.kind,
                manager_id,
                job_id,
            });
        }
        None => model.list = Remote::Idle,
    }
}

pub fn execute<T: Transport>(client: &ApiClient<T>, cmd: TemplatesCommand) -> TemplatesMsg {
    match cmd {
        TemplatesCommand::Fetch {
            tag,
            kind,
            manager_id,
            job_id,
        } => {
            let result = match (kind, job_id.as_deref()) {
                (DocumentKind::Template, job_id) => client.list_templates(&manager_id, job_id),
                (DocumentKind::Form, Some(job_id)) => client.list_forms(&manager_id, job_id),
                (DocumentKind::Form, None) => Ok(Vec::new()),
            };
            TemplatesMsg::Loaded {
                tag,
                result: result.map_err(|e| e.to_string()),
            }
        }
        TemplatesCommand::Create {
            tag,
            kind,
            manager_id,
            payload,
        } => {
            let result = match kind {
                DocumentKind::Template => client.create_template(&payload),
                DocumentKind::Form => client.create_form(&manager_id, &payload),
            };
            TemplatesMsg::Saved {
                tag,
                created: true,
                result: result.map_err(|e| e.to_string()),
            }
        }
        TemplatesCommand::Update {
            tag,
            kind,
            manager_id,
            id,
            payload,
        } => {
            let result = match kind {
                DocumentKind::Template => client.update_template(&manager_id, &id, &payload),
                DocumentKind::Form => client.update_form(&manager_id, &id, &payload),
            };
            TemplatesMsg::Saved {
                tag,
                created: false,
                result: result.map_err(|e| e.to_string()),
            }
        }
        TemplatesCommand::Delete {
            tag,
            kind,
            manager_id,
            id,
        } => {
            let result = match kind {
                DocumentKind::Template => client.delete_template(&id),
                DocumentKind::Form => client.delete_form(&manager_id, &id),
            };
            TemplatesMsg::Deleted {
                tag,
                id,
                result: result.map_err(|e| e.to_string()),
            }
        }
    }
}

pub fn view(ui: &mut egui::Ui, model: &TemplatesModel, selected: Option<&str>) -> Vec<TemplatesMsg> {
    let mut msgs = Vec::new();
    let kind = model.kind;
    let has_manager = model.context.manager_id.is_some();
    let ready = has_manager && (!kind.needs_job() || model.context.job_id.is_some());

    ui.horizontal(|ui| {
        ui.heading(kind.heading());
        if ui
            .add_enabled(
                has_manager && model.editor.is_none(),
                egui::Button::new(format!("{} New {}", egui_phosphor::regular::PLUS, kind.noun())),
            )
            .clicked()
        {
            msgs.push(TemplatesMsg::OpenCreate);
        }
        if ui
            .add_enabled(
                ready && !model.list.is_loading(),
                egui::Button::new(egui_phosphor::regular::ARROWS_CLOCKWISE),
            )
            .on_hover_text("Reload")
            .clicked()
        {
            msgs.push(TemplatesMsg::Refresh);
        }
    });
    ui.add_space(6.0);

    if !ready {
        ui.label(hint(if kind.needs_job() {
            "Select a manager and a job to see their forms."
        } else {
            "Select a manager to see their form templates."
        }));
    }

    if let Some(editor) = &model.editor {
        render_editor(ui, model, editor, &mut msgs);
        ui.add_space(10.0);
    }

    if !ready {
        return msgs;
    }

    list_status(ui, &model.list, &format!("No {}s yet.", kind.noun()));
    if !model.list.items().is_empty() {
        egui::Grid::new(("templates_grid", kind.noun()))
            .num_columns(5)
            .striped(true)
            .spacing(egui::vec2(12.0, 6.0))
            .show(ui, |ui| {
                ui.strong("Title");
                ui.strong("Type");
                ui.strong("Fields");
                ui.strong("Created");
                ui.label("");
                ui.end_row();

                for document in model.list.items() {
                    let id = document.id.as_deref().unwrap_or_default();
                    match kind {
                        DocumentKind::Form => {
                            if ui
                                .selectable_label(selected == Some(id), &document.title)
                                .on_hover_text("Show links and responses")
                                .clicked()
                                && !id.is_empty()
                            {
                                msgs.push(TemplatesMsg::Select(id.to_string()));
                            }
                        }
                        DocumentKind::Template => {
                            ui.label(&document.title);
                        }
                    }
                    ui.label(document.form_type.as_str());
                    ui.label(format!(
                        "{} in {} group(s)",
                        document.field_count(),
                        document.groups.len()
                    ));
                    ui.label(format_timestamp(document.created_at.as_deref()));
                    ui.horizontal(|ui| {
                        if ui
                            .add_enabled(
                                model.editor.is_none() && !id.is_empty(),
                                egui::Button::new(egui_phosphor::regular::PENCIL_SIMPLE),
                            )
                            .on_hover_text("Edit")
                            .clicked()
                        {
                            msgs.push(TemplatesMsg::OpenEdit(id.to_string()));
                        }
                        let busy = model.deleting.as_deref() == Some(id);
                        if let Some(action) =
                            delete_controls(ui, &model.pending_delete, id, !busy && !id.is_empty())
                        {
                            msgs.push(TemplatesMsg::Delete(id.to_string(), action));
                        }
                    });
                    ui.end_row();
                }
            });
    }

    msgs
}

fn render_editor(
    ui: &mut egui::Ui,
    model: &TemplatesModel,
    editor: &EditorModel,
    msgs: &mut Vec<TemplatesMsg>,
) {
    let kind = model.kind;
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.strong(match editor.mode {
            EditorMode::Create => format!("New {}", kind.noun()),
            EditorMode::Edit(_) => format!("Edit {}", kind.noun()),
        });
        ui.add_space(4.0);

        let editor_msgs = template_editor::view(ui, editor, kind.noun());
        msgs.extend(editor_msgs.into_iter().map(TemplatesMsg::Editor));

        ui.add_space(8.0);
        ui.horizontal(|ui| {
            let label = if model.saving { "Saving…" } else { "Save" };
            if ui
                .add_enabled(
                    !model.saving,
                    egui::Button::new(format!("{} {label}", egui_phosphor::regular::FLOPPY_DISK)),
                )
                .clicked()
            {
                msgs.push(TemplatesMsg::Submit);
            }
            if ui.button("Cancel").clicked() {
                msgs.push(TemplatesMsg::CloseEditor);
            }
        });
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::template_tree::{FieldEdit, GroupEdit};

    fn tag(generation: u64, manager: Option<&str>, job: Option<&str>) -> ContextTag {
        ContextTag {
            generation,
            manager_id: manager.map(str::to_string),
            job_id: job.map(str::to_string),
            form_id: None,
        }
    }

    fn fill_valid_tree(model: &mut TemplatesModel, cmds: &mut Vec<TemplatesCommand>) {
        update(model, TemplatesMsg::OpenCreate, cmds);
        let group = model.editor().unwrap().template.groups[0].key;
        for msg in [
            EditorMsg::Title("Application".into()),
            EditorMsg::EditGroup(group, GroupEdit::Title("Contact".into())),
            EditorMsg::AddField(Some(group)),
        ] {
            update(model, TemplatesMsg::Editor(msg), cmds);
        }
        let field = model.editor().unwrap().template.groups[0].fields[0].key;
        update(
            model,
            TemplatesMsg::Editor(EditorMsg::EditField(field, FieldEdit::Label("Email".into()))),
            cmds,
        );
    }

    #[test]
    fn forms_wait_for_a_job_but_templates_do_not() {
        let mut cmds = Vec::new();
        let mut forms = TemplatesModel::new(DocumentKind::Form);
        update(&mut forms, TemplatesMsg::Reset(tag(1, Some("m-1"), None)), &mut cmds);
        assert!(cmds.is_empty());

        let mut templates = TemplatesModel::new(DocumentKind::Template);
        update(&mut templates, TemplatesMsg::Reset(tag(1, Some("m-1"), None)), &mut cmds);
        assert!(matches!(
            &cmds[..],
            [TemplatesCommand::Fetch { kind: DocumentKind::Template, job_id: None, .. }]
        ));
    }

    #[test]
    fn reset_clears_list_and_editor() {
        let mut cmds = Vec::new();
        let mut model = TemplatesModel::new(DocumentKind::Template);
        update(&mut model, TemplatesMsg::Reset(tag(1, Some("m-1"), None)), &mut cmds);
        update(
            &mut model,
            TemplatesMsg::Loaded {
                tag: tag(1, Some("m-1"), None),
                result: Ok(vec![FormTemplate {
                    id: Some("t-1".into()),
                    ..FormTemplate::blank()
                }]),
            },
            &mut cmds,
        );
        update(&mut model, TemplatesMsg::OpenCreate, &mut cmds);

        update(&mut model, TemplatesMsg::Reset(tag(2, Some("m-1"), Some("j-1"))), &mut cmds);
        assert!(model.list.is_loading());
        assert!(model.editor().is_none());
        assert_eq!(model.kind, DocumentKind::Template);
    }

    #[test]
    fn invalid_tree_is_not_submitted() {
        let mut cmds = Vec::new();
        let mut model = TemplatesModel::new(DocumentKind::Template);
        update(&mut model, TemplatesMsg::Reset(tag(1, Some("m-1"), None)), &mut cmds);
        cmds.clear();
        update(&mut model, TemplatesMsg::OpenCreate, &mut cmds);

        let feedback = update(&mut model, TemplatesMsg::Submit, &mut cmds).unwrap();
        assert_eq!(feedback.message, "Title is required.");
        assert!(cmds.is_empty());
    }

    #[test]
    fn form_create_targets_manager_and_carries_job() {
        let mut cmds = Vec::new();
        let mut model = TemplatesModel::new(DocumentKind::Form);
        let context = tag(3, Some("m-1"), Some("j-1"));
        update(&mut model, TemplatesMsg::Reset(context.clone()), &mut cmds);
        update(
            &mut model,
            TemplatesMsg::Loaded {
                tag: context.clone(),
                result: Ok(Vec::new()),
            },
            &mut cmds,
        );
        cmds.clear();
        fill_valid_tree(&mut model, &mut cmds);

        update(&mut model, TemplatesMsg::Submit, &mut cmds);
        let Some(TemplatesCommand::Create {
            kind,
            manager_id,
            payload,
            ..
        }) = cmds.pop()
        else {
            panic!("expected create command");
        };
        assert_eq!(kind, DocumentKind::Form);
        assert_eq!(manager_id, "m-1");
        assert_eq!(payload.job_id.as_deref(), Some("j-1"));

        let saved = FormTemplate {
            id: Some("f-1".into()),
            ..payload
        };
        let feedback = update(
            &mut model,
            TemplatesMsg::Saved {
                tag: context,
                created: true,
                result: Ok(saved),
            },
            &mut cmds,
        )
        .unwrap();
        assert_eq!(feedback.message, "Form \"Application\" created.");
        assert_eq!(model.list.items().len(), 1);
        assert!(model.editor().is_none());
    }

    #[test]
    fn failed_save_keeps_editor_open() {
        let mut cmds = Vec::new();
        let mut model = TemplatesModel::new(DocumentKind::Template);
        let context = tag(1, Some("m-1"), None);
        update(&mut model, TemplatesMsg::Reset(context.clone()), &mut cmds);
        fill_valid_tree(&mut model, &mut cmds);
        update(&mut model, TemplatesMsg::Submit, &mut cmds);

        let feedback = update(
            &mut model,
            TemplatesMsg::Saved {
                tag: context,
                created: true,
                result: Err("Failed to create form template.".into()),
            },
            &mut cmds,
        )
        .unwrap();
        assert!(feedback.is_error);
        assert!(model.editor().is_some());
    }
}
