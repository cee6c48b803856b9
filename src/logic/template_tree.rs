// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Freddie Admin contributors

//! Pure edits over the form template tree.
//!
//! Every operation takes the current tree by reference and returns a new one; the input is
//! never modified. Stale positions or keys (e.g. a group that was removed in the meantime)
//! yield an unchanged copy instead of panicking, so a late message cannot break the edit
//! session.
//!
//! Removals renumber the remaining siblings' `sort_order` densely as `index + 1`.

use crate::models::form_template::{
    ApplicantFieldMapping, Field, FieldType, FormGroup, FormTemplate, NodeKey,
};

/// One attribute change on a group.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GroupEdit {
    Title(String),
    SortOrder(i32),
}

impl GroupEdit {
    fn apply(self, group: &mut FormGroup) {
        match self {
            Self::Title(title) => group.title = title,
            Self::SortOrder(order) => group.sort_order = order,
        }
    }
}

/// One attribute change on a field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldEdit {
    Label(String),
    Kind(FieldType),
    Options(Vec<String>),
    Required(bool),
    Mapping(ApplicantFieldMapping),
    SortOrder(i32),
}

impl FieldEdit {
    fn apply(self, field: &mut Field) {
        match self {
            Self::Label(label) => field.label = label,
            Self::Kind(kind) => field.kind = kind,
            Self::Options(options) => field.options = options,
            Self::Required(required) => field.required = required,
            Self::Mapping(mapping) => field.applicant_field_mapping = mapping,
            Self::SortOrder(order) => field.sort_order = order,
        }
    }
}

/// Where a field currently lives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldSlot {
    /// Owning group, or `None` for the template's ungrouped list.
    pub group: Option<usize>,
    pub field: usize,
}

/// Append an untitled, empty group.
pub fn add_group(template: &FormTemplate) -> FormTemplate {
    let mut next = template.clone();
    next.groups.push(FormGroup::new());
    next
}

/// Drop the group at `group_index`.
pub fn remove_group(template: &FormTemplate, group_index: usize) -> FormTemplate {
    let mut next = template.clone();
    if group_index < next.groups.len() {
        next.groups.remove(group_index);
        renumber_groups(&mut next.groups);
    }
    next
}

/// Append a blank field to the group at `group_index`.
pub fn add_field_to_group(template: &FormTemplate, group_index: usize) -> FormTemplate {
    let mut next = template.clone();
    if let Some(group) = next.groups.get_mut(group_index) {
        group.fields.push(Field::new());
    }
    next
}

/// Append a blank field to the ungrouped list.
pub fn add_field(template: &FormTemplate) -> FormTemplate {
    let mut next = template.clone();
    next.fields.push(Field::new());
    next
}

/// Drop one field from the group at `group_index`.
pub fn remove_field_from_group(
    template: &FormTemplate,
    group_index: usize,
    field_index: usize,
) -> FormTemplate {
    let mut next = template.clone();
    if let Some(group) = next.groups.get_mut(group_index)
        && field_index < group.fields.len()
    {
        group.fields.remove(field_index);
        renumber_fields(&mut group.fields);
    }
    next
}

/// Drop one field from the ungrouped list.
pub fn remove_field(template: &FormTemplate, field_index: usize) -> FormTemplate {
    let mut next = template.clone();
    if field_index < next.fields.len() {
        next.fields.remove(field_index);
        renumber_fields(&mut next.fields);
    }
    next
}

/// Change one attribute of the group at `group_index`.
pub fn update_group(template: &FormTemplate, group_index: usize, edit: GroupEdit) -> FormTemplate {
    let mut next = template.clone();
    if let Some(group) = next.groups.get_mut(group_index) {
        edit.apply(group);
    }
    next
}

/// Change one attribute of a field, inside a group (`Some`) or in the ungrouped list (`None`).
pub fn update_field(
    template: &FormTemplate,
    group_index: Option<usize>,
    field_index: usize,
    edit: FieldEdit,
) -> FormTemplate {
    let mut next = template.clone();
    let fields = match group_index {
        Some(g) => next.groups.get_mut(g).map(|group| &mut group.fields),
        None => Some(&mut next.fields),
    };
    if let Some(field) = fields.and_then(|fields| fields.get_mut(field_index)) {
        edit.apply(field);
    }
    next
}

/// Current position of the group with `key`.
pub fn group_index(template: &FormTemplate, key: NodeKey) -> Option<usize> {
    template.groups.iter().position(|g| g.key == key)
}

/// Current position of the field with `key`, searching groups first.
pub fn field_slot(template: &FormTemplate, key: NodeKey) -> Option<FieldSlot> {
    template
        .groups
        .iter()
        .enumerate()
        .find_map(|(g, group)| {
            group
                .fields
                .iter()
                .position(|f| f.key == key)
                .map(|field| FieldSlot {
                    group: Some(g),
                    field,
                })
        })
        .or_else(|| {
            template
                .fields
                .iter()
                .position(|f| f.key == key)
                .map(|field| FieldSlot { group: None, field })
        })
}

pub fn remove_group_by_key(template: &FormTemplate, key: NodeKey) -> FormTemplate {
    match group_index(template, key) {
        Some(index) => remove_group(template, index),
        None => template.clone(),
    }
}

pub fn update_group_by_key(template: &FormTemplate, key: NodeKey, edit: GroupEdit) -> FormTemplate {
    match group_index(template, key) {
        Some(index) => update_group(template, index, edit),
        None => template.clone(),
    }
}

/// Append a blank field to the group with `key`, or to the ungrouped list for `None`.
pub fn add_field_by_key(template: &FormTemplate, group: Option<NodeKey>) -> FormTemplate {
    match group {
        None => add_field(template),
        Some(key) => match group_index(template, key) {
            Some(index) => add_field_to_group(template, index),
            None => template.clone(),
        },
    }
}

pub fn remove_field_by_key(template: &FormTemplate, key: NodeKey) -> FormTemplate {
    match field_slot(template, key) {
        Some(FieldSlot {
            group: Some(g),
            field,
        }) => remove_field_from_group(template, g, field),
        Some(FieldSlot { group: None, field }) => remove_field(template, field),
        None => template.clone(),
    }
}

pub fn update_field_by_key(template: &FormTemplate, key: NodeKey, edit: FieldEdit) -> FormTemplate {
    match field_slot(template, key) {
        Some(slot) => update_field(template, slot.group, slot.field, edit),
        None => template.clone(),
    }
}

fn renumber_groups(groups: &mut [FormGroup]) {
    for (i, group) in groups.iter_mut().enumerate() {
        group.sort_order = i as i32 + 1;
    }
}

fn renumber_fields(fields: &mut [Field]) {
    for (i, field) in fields.iter_mut().enumerate() {
        field.sort_order = i as i32 + 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labelled(label: &str) -> Field {
        Field {
            label: label.into(),
            ..Field::new()
        }
    }

    fn sample() -> FormTemplate {
        FormTemplate {
            title: "Backend engineer".into(),
            groups: vec![
                FormGroup {
                    title: "Contact".into(),
                    sort_order: 1,
                    fields: vec![labelled("Email"), labelled("Phone")],
                    ..FormGroup::new()
                },
                FormGroup {
                    title: "Experience".into(),
                    sort_order: 2,
                    fields: vec![labelled("Years")],
                    ..FormGroup::new()
                },
            ],
            fields: vec![labelled("Notes")],
            ..FormTemplate::default()
        }
    }

    #[test]
    fn add_then_remove_last_group_restores_groups() {
        let original = sample();
        let grown = add_group(&original);
        assert_eq!(grown.groups.len(), 3);
        let last = grown.groups.len() - 1;
        assert_eq!(grown.groups[last].title, "");
        assert_eq!(grown.groups[last].sort_order, 0);
        assert!(grown.groups[last].fields.is_empty());

        let restored = remove_group(&grown, last);
        assert_eq!(restored.groups, original.groups);
    }

    #[test]
    fn remove_group_renumbers_densely() {
        let mut t = sample();
        t.groups[1].sort_order = 7;
        t = add_group(&t);
        let next = remove_group(&t, 0);
        let orders: Vec<i32> = next.groups.iter().map(|g| g.sort_order).collect();
        assert_eq!(orders, vec![1, 2]);
        assert_eq!(next.groups[0].title, "Experience");
    }

    #[test]
    fn new_fields_use_defaults() {
        let t = add_field_to_group(&sample(), 1);
        let field = t.groups[1].fields.last().unwrap();
        assert_eq!(field.kind, FieldType::Text);
        assert!(!field.required);
        assert!(field.label.is_empty());
        assert!(field.options.is_empty());
        assert_eq!(field.applicant_field_mapping, ApplicantFieldMapping::Unmapped);
        assert_eq!(field.sort_order, 0);

        let t = add_field(&t);
        assert_eq!(t.fields.len(), 2);
    }

    #[test]
    fn update_field_touches_only_target() {
        let original = sample();
        let next = update_field(&original, Some(0), 1, FieldEdit::Required(true));

        assert!(next.groups[0].fields[1].required);
        assert_eq!(next.groups[0].fields[0], original.groups[0].fields[0]);
        assert_eq!(next.groups[1], original.groups[1]);
        assert_eq!(next.fields, original.fields);
        assert_eq!(next.title, original.title);
        assert!(!original.groups[0].fields[1].required, "input must not change");

        let mut expected = original.groups[0].fields[1].clone();
        expected.required = true;
        assert_eq!(next.groups[0].fields[1], expected);
    }

    #[test]
    fn update_field_without_group_targets_ungrouped_list() {
        let original = sample();
        let next = update_field(&original, None, 0, FieldEdit::Label("Cover letter".into()));
        assert_eq!(next.fields[0].label, "Cover letter");
        assert_eq!(next.groups, original.groups);
    }

    #[test]
    fn update_group_sets_one_attribute() {
        let original = sample();
        let next = update_group(&original, 1, GroupEdit::Title("Background".into()));
        assert_eq!(next.groups[1].title, "Background");
        assert_eq!(next.groups[1].fields, original.groups[1].fields);
        assert_eq!(next.groups[0], original.groups[0]);
    }

    #[test]
    fn out_of_range_indices_are_noops() {
        let original = sample();
        let next = remove_field_from_group(&original, 0, 99);
        assert_eq!(next.groups[0].fields.len(), 2);
        assert_eq!(next, original);

        assert_eq!(remove_group(&original, 5), original);
        assert_eq!(remove_field(&original, 3), original);
        assert_eq!(add_field_to_group(&original, 9), original);
        assert_eq!(
            update_field(&original, Some(4), 0, FieldEdit::Required(true)),
            original
        );
        assert_eq!(
            update_group(&original, 2, GroupEdit::SortOrder(3)),
            original
        );
    }

    #[test]
    fn remove_field_renumbers_siblings() {
        let next = remove_field_from_group(&sample(), 0, 0);
        assert_eq!(next.groups[0].fields.len(), 1);
        assert_eq!(next.groups[0].fields[0].label, "Phone");
        assert_eq!(next.groups[0].fields[0].sort_order, 1);
    }

    #[test]
    fn key_addressing_follows_nodes_across_reorders() {
        let t = sample();
        let phone = t.groups[0].fields[1].key;
        let experience = t.groups[1].key;

        let t = remove_field_from_group(&t, 0, 0);
        let t = update_field_by_key(&t, phone, FieldEdit::Kind(FieldType::Phone));
        assert_eq!(t.groups[0].fields[0].kind, FieldType::Phone);

        let t = remove_group(&t, 0);
        let t = update_group_by_key(&t, experience, GroupEdit::Title("Past roles".into()));
        assert_eq!(t.groups[0].title, "Past roles");

        let t = add_field_by_key(&t, Some(experience));
        assert_eq!(t.groups[0].fields.len(), 2);

        let notes = t.fields[0].key;
        let t = remove_field_by_key(&t, notes);
        assert!(t.fields.is_empty());
    }

    #[test]
    fn stale_keys_are_noops() {
        let t = sample();
        let gone = t.groups[0].key;
        let t = remove_group_by_key(&t, gone);
        assert_eq!(remove_group_by_key(&t, gone), t);
        assert_eq!(add_field_by_key(&t, Some(gone)), t);
        assert_eq!(
            update_group_by_key(&t, gone, GroupEdit::Title("x".into())),
            t
        );
        assert_eq!(remove_field_by_key(&t, NodeKey::new()), t);
        assert_eq!(
            update_field_by_key(&t, NodeKey::new(), FieldEdit::Required(true)),
            t
        );
    }
}
