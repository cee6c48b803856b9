// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Freddie Admin contributors

//! Editor for the group/field tree shared by form templates and forms.
//!
//! The editor owns its tree exclusively. Every structural message goes through
//! [`crate::logic::template_tree`], which returns a fresh tree that replaces the old one.
//! Nodes are addressed by [`NodeKey`], so a message produced against an earlier frame still
//! hits the right node after siblings were added or removed.

use std::collections::HashMap;

use eframe::egui;

use crate::logic::template_tree::{
    FieldEdit, GroupEdit, add_field_by_key, add_group, remove_field_by_key,
    remove_group_by_key, update_field_by_key, update_group_by_key,
};
use crate::models::form_template::{
    ApplicantFieldMapping, Field, FieldType, FormTemplate, FormType, NodeKey,
};
use crate::ui::components::hint;
use crate::utils::split_list;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EditorMode {
    Create,
    /// Editing the persisted document with this id.
    Edit(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct EditorModel {
    pub mode: EditorMode,
    pub template: FormTemplate,
    /// Raw comma-separated option text per field, so partially typed input survives.
    option_buffers: HashMap<NodeKey, String>,
}

impl EditorModel {
    /// Fresh tree with a single empty group.
    pub fn create() -> Self {
        Self {
            mode: EditorMode::Create,
            template: FormTemplate::blank(),
            option_buffers: HashMap::new(),
        }
    }

    /// Copy of a persisted document; `None` when it has no id to update against.
    pub fn edit(existing: &FormTemplate) -> Option<Self> {
        let id = existing.id.clone().filter(|id| !id.is_empty())?;
        Some(Self {
            mode: EditorMode::Edit(id),
            template: existing.clone(),
            option_buffers: HashMap::new(),
        })
    }

    pub fn is_create(&self) -> bool {
        self.mode == EditorMode::Create
    }

    fn options_text(&self, field: &Field) -> String {
        self.option_buffers
            .get(&field.key)
            .cloned()
            .unwrap_or_else(|| field.options.join(", "))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum EditorMsg {
    Title(String),
    FormType(FormType),
    AddGroup,
    RemoveGroup(NodeKey),
    EditGroup(NodeKey, GroupEdit),
    /// Append a field to the given group, or to the ungrouped list.
    AddField(Option<NodeKey>),
    RemoveField(NodeKey),
    EditField(NodeKey, FieldEdit),
    OptionsText(NodeKey, String),
}

pub fn update(model: &mut EditorModel, msg: EditorMsg) {
    match msg {
        EditorMsg::Title(title) => model.template.title = title,
        EditorMsg::FormType(kind) => model.template.form_type = kind,
        EditorMsg::AddGroup => model.template = add_group(&model.template),
        EditorMsg::RemoveGroup(key) => {
            model.template = remove_group_by_key(&model.template, key);
            prune_buffers(model);
        }
        EditorMsg::EditGroup(key, edit) => {
            model.template = update_group_by_key(&model.template, key, edit);
        }
        EditorMsg::AddField(group) => model.template = add_field_by_key(&model.template, group),
        EditorMsg::RemoveField(key) => {
            model.template = remove_field_by_key(&model.template, key);
            model.option_buffers.remove(&key);
        }
        EditorMsg::EditField(key, edit) => {
            model.template = update_field_by_key(&model.template, key, edit);
        }
        EditorMsg::OptionsText(key, text) => {
            let options = split_list(&text);
            model.template = update_field_by_key(&model.template, key, FieldEdit::Options(options));
            model.option_buffers.insert(key, text);
        }
    }
}

fn prune_buffers(model: &mut EditorModel) {
    let template = &model.template;
    let live = |key: &NodeKey| {
        template
            .fields
            .iter()
            .chain(template.groups.iter().flat_map(|g| g.fields.iter()))
            .any(|f| f.key == *key)
    };
    model.option_buffers.retain(|key, _| live(key));
}

/// Render the whole tree; `noun` is "template" or "form".
pub fn view(ui: &mut egui::Ui, model: &EditorModel, noun: &str) -> Vec<EditorMsg> {
    let mut msgs = Vec::new();
    let template = &model.template;

    egui::Grid::new("template_header")
        .num_columns(2)
        .spacing(egui::vec2(8.0, 8.0))
        .min_col_width(120.0)
        .show(ui, |ui| {
            ui.label("Title");
            let mut title = template.title.clone();
            if ui
                .add(
                    egui::TextEdit::singleline(&mut title)
                        .hint_text(format!("Name this {noun}"))
                        .desired_width(f32::INFINITY),
                )
                .changed()
            {
                msgs.push(EditorMsg::Title(title));
            }
            ui.end_row();

            ui.label("Form type");
            egui::ComboBox::from_id_salt("template_form_type")
                .selected_text(template.form_type.as_str())
                .show_ui(ui, |ui| {
                    for kind in FormType::ALL {
                        let is_current = template.form_type == kind;
                        if ui.selectable_label(is_current, kind.as_str()).clicked() && !is_current {
                            msgs.push(EditorMsg::FormType(kind));
                        }
                    }
                });
            ui.end_row();
        });

    ui.add_space(8.0);
    for (position, group) in template.groups.iter().enumerate() {
        ui.push_id(group.key, |ui| {
            egui::Frame::group(ui.style()).show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.horizontal(|ui| {
                    ui.label(format!("Group {}", position + 1));
                    let mut title = group.title.clone();
                    if ui
                        .add(egui::TextEdit::singleline(&mut title).hint_text("Group title"))
                        .changed()
                    {
                        msgs.push(EditorMsg::EditGroup(group.key, GroupEdit::Title(title)));
                    }
                    ui.label("Order");
                    let mut order = group.sort_order;
                    if ui.add(egui::DragValue::new(&mut order)).changed() {
                        msgs.push(EditorMsg::EditGroup(group.key, GroupEdit::SortOrder(order)));
                    }
                    if ui
                        .button(egui_phosphor::regular::TRASH_SIMPLE)
                        .on_hover_text("Remove group")
                        .clicked()
                    {
                        msgs.push(EditorMsg::RemoveGroup(group.key));
                    }
                });
                render_fields(ui, model, &group.fields, Some(group.key), &mut msgs);
            });
        });
        ui.add_space(6.0);
    }

    if ui
        .button(format!("{} Add group", egui_phosphor::regular::PLUS))
        .clicked()
    {
        msgs.push(EditorMsg::AddGroup);
    }

    ui.add_space(8.0);
    egui::CollapsingHeader::new(format!("Ungrouped fields ({})", template.fields.len()))
        .id_salt("ungrouped_fields")
        .default_open(!template.fields.is_empty())
        .show(ui, |ui| {
            render_fields(ui, model, &template.fields, None, &mut msgs);
        });

    msgs
}

fn render_fields(
    ui: &mut egui::Ui,
    model: &EditorModel,
    fields: &[Field],
    group: Option<NodeKey>,
    msgs: &mut Vec<EditorMsg>,
) {
    if fields.is_empty() {
        ui.label(hint("No fields yet."));
    }
    for field in fields {
        ui.push_id(field.key, |ui| render_field(ui, model, field, msgs));
    }
    if ui
        .button(format!("{} Add field", egui_phosphor::regular::PLUS))
        .clicked()
    {
        msgs.push(EditorMsg::AddField(group));
    }
}

fn render_field(ui: &mut egui::Ui, model: &EditorModel, field: &Field, msgs: &mut Vec<EditorMsg>) {
    let key = field.key;
    ui.horizontal_wrapped(|ui| {
        let mut label = field.label.clone();
        if ui
            .add(
                egui::TextEdit::singleline(&mut label)
                    .hint_text("Field label")
                    .desired_width(180.0),
            )
            .changed()
        {
            msgs.push(EditorMsg::EditField(key, FieldEdit::Label(label)));
        }

        egui::ComboBox::from_id_salt("field_type")
            .selected_text(field.kind.as_str())
            .show_ui(ui, |ui| {
                for kind in FieldType::ALL {
                    let is_current = field.kind == kind;
                    if ui.selectable_label(is_current, kind.as_str()).clicked() && !is_current {
                        msgs.push(EditorMsg::EditField(key, FieldEdit::Kind(kind)));
                    }
                }
            });

        let mut required = field.required;
        if ui.checkbox(&mut required, "Required").changed() {
            msgs.push(EditorMsg::EditField(key, FieldEdit::Required(required)));
        }

        egui::ComboBox::from_id_salt("field_mapping")
            .selected_text(format!("maps to: {}", field.applicant_field_mapping.as_str()))
            .show_ui(ui, |ui| {
                for mapping in ApplicantFieldMapping::ALL {
                    let is_current = field.applicant_field_mapping == mapping;
                    if ui.selectable_label(is_current, mapping.as_str()).clicked() && !is_current {
                        msgs.push(EditorMsg::EditField(key, FieldEdit::Mapping(mapping)));
                    }
                }
            })
            .response
            .on_hover_text("Applicant profile attribute filled from this field");

        ui.label("Order");
        let mut order = field.sort_order;
        if ui.add(egui::DragValue::new(&mut order)).changed() {
            msgs.push(EditorMsg::EditField(key, FieldEdit::SortOrder(order)));
        }

        if ui
            .button(
                egui::RichText::new(egui_phosphor::regular::X).color(egui::Color32::from_gray(140)),
            )
            .on_hover_text("Remove field")
            .clicked()
        {
            msgs.push(EditorMsg::RemoveField(key));
        }
    });

    if field.kind.has_options() {
        ui.horizontal(|ui| {
            ui.add_space(12.0);
            let mut text = model.options_text(field);
            if ui
                .add(
                    egui::TextEdit::singleline(&mut text)
                        .hint_text("Options, comma-separated")
                        .desired_width(320.0),
                )
                .changed()
            {
                msgs.push(EditorMsg::OptionsText(key, text));
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_starts_with_one_group() {
        let model = EditorModel::create();
        assert!(model.is_create());
        assert_eq!(model.template.groups.len(), 1);
        assert_eq!(model.template.field_count(), 0);
    }

    #[test]
    fn edit_requires_an_id() {
        assert!(EditorModel::edit(&FormTemplate::blank()).is_none());
        let stored = FormTemplate {
            id: Some("t-1".into()),
            ..FormTemplate::blank()
        };
        let model = EditorModel::edit(&stored).unwrap();
        assert_eq!(model.mode, EditorMode::Edit("t-1".into()));
    }

    #[test]
    fn messages_address_nodes_by_key() {
        let mut model = EditorModel::create();
        let group = model.template.groups[0].key;
        update(&mut model, EditorMsg::AddField(Some(group)));
        update(&mut model, EditorMsg::AddField(Some(group)));
        let first = model.template.groups[0].fields[0].key;
        let second = model.template.groups[0].fields[1].key;

        update(&mut model, EditorMsg::RemoveField(first));
        update(
            &mut model,
            EditorMsg::EditField(second, FieldEdit::Label("Email".into())),
        );

        let fields = &model.template.groups[0].fields;
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].key, second);
        assert_eq!(fields[0].label, "Email");
        assert_eq!(fields[0].sort_order, 1);
    }

    #[test]
    fn options_text_keeps_raw_buffer() {
        let mut model = EditorModel::create();
        update(&mut model, EditorMsg::AddField(None));
        let key = model.template.fields[0].key;
        update(&mut model, EditorMsg::EditField(key, FieldEdit::Kind(FieldType::Select)));

        update(&mut model, EditorMsg::OptionsText(key, "Yes, No, ".into()));
        let field = &model.template.fields[0];
        assert_eq!(field.options, vec!["Yes", "No"]);
        assert_eq!(model.options_text(field), "Yes, No, ");

        update(&mut model, EditorMsg::RemoveField(key));
        assert!(model.option_buffers.is_empty());
    }

    #[test]
    fn removing_a_group_drops_its_buffers() {
        let mut model = EditorModel::create();
        let group = model.template.groups[0].key;
        update(&mut model, EditorMsg::AddField(Some(group)));
        let field = model.template.groups[0].fields[0].key;
        update(&mut model, EditorMsg::OptionsText(field, "a".into()));

        update(&mut model, EditorMsg::RemoveGroup(group));
        assert!(model.template.groups.is_empty());
        assert!(model.option_buffers.is_empty());
    }

    #[test]
    fn stale_key_is_ignored() {
        let mut model = EditorModel::create();
        let before = model.template.clone();
        update(&mut model, EditorMsg::RemoveGroup(NodeKey::new()));
        assert_eq!(model.template, before);
    }
}
