// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Freddie Admin contributors

//! Form template tree: a template owns ordered groups, each owning ordered fields, plus a
//! flat list of ungrouped fields. The same shape backs the dynamic application forms
//! served under `/forms`.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::models::Identified;
use crate::utils::{split_list, value_to_string};

/// Client-only stable identifier for a group or field.
///
/// Never serialized; a fresh key is minted whenever a node is created or deserialized so the
/// editor can address nodes independently of their current position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeKey(Uuid);

impl NodeKey {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for NodeKey {
    fn default() -> Self {
        Self::new()
    }
}

/// Input kinds a field can render as.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldType {
    #[default]
    Text,
    Textarea,
    Url,
    Phone,
    City,
    Date,
    Country,
    State,
    Zipcode,
    Select,
    Checkbox,
    Number,
    Rating,
    Radio,
    Email,
    Document,
    Unknown(String),
}

impl FieldType {
    /// Every known kind, in the order offered by the editor.
    pub const ALL: [FieldType; 16] = [
        FieldType::Text,
        FieldType::Textarea,
        FieldType::Url,
        FieldType::Phone,
        FieldType::City,
        FieldType::Date,
        FieldType::Country,
        FieldType::State,
        FieldType::Zipcode,
        FieldType::Select,
        FieldType::Checkbox,
        FieldType::Number,
        FieldType::Rating,
        FieldType::Radio,
        FieldType::Email,
        FieldType::Document,
    ];

    fn from_token(raw: &str) -> Self {
        match raw {
            "text" => Self::Text,
            "textarea" => Self::Textarea,
            "url" => Self::Url,
            "phone" => Self::Phone,
            "city" => Self::City,
            "date" => Self::Date,
            "country" => Self::Country,
            "state" => Self::State,
            "zipcode" => Self::Zipcode,
            "select" => Self::Select,
            "checkbox" => Self::Checkbox,
            "number" => Self::Number,
            "rating" => Self::Rating,
            "radio" => Self::Radio,
            "email" => Self::Email,
            "document" => Self::Document,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Wire token.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text => "text",
            Self::Textarea => "textarea",
            Self::Url => "url",
            Self::Phone => "phone",
            Self::City => "city",
            Self::Date => "date",
            Self::Country => "country",
            Self::State => "state",
            Self::Zipcode => "zipcode",
            Self::Select => "select",
            Self::Checkbox => "checkbox",
            Self::Number => "number",
            Self::Rating => "rating",
            Self::Radio => "radio",
            Self::Email => "email",
            Self::Document => "document",
            Self::Unknown(raw) => raw.as_str(),
        }
    }

    /// Only choice fields carry an options list.
    pub fn has_options(&self) -> bool {
        matches!(self, Self::Select | Self::Radio)
    }
}

impl From<String> for FieldType {
    fn from(raw: String) -> Self {
        Self::from_token(raw.trim())
    }
}

impl From<FieldType> for String {
    fn from(kind: FieldType) -> Self {
        kind.as_str().to_string()
    }
}

/// Canonical applicant attribute a field feeds.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ApplicantFieldMapping {
    #[default]
    Unmapped,
    Email,
    FirstName,
    MiddleName,
    LastName,
    Phone,
    FullName,
    Unknown(String),
}

impl ApplicantFieldMapping {
    pub const ALL: [ApplicantFieldMapping; 7] = [
        ApplicantFieldMapping::Unmapped,
        ApplicantFieldMapping::Email,
        ApplicantFieldMapping::FirstName,
        ApplicantFieldMapping::MiddleName,
        ApplicantFieldMapping::LastName,
        ApplicantFieldMapping::Phone,
        ApplicantFieldMapping::FullName,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Self::Unmapped => "none",
            Self::Email => "email",
            Self::FirstName => "firstname",
            Self::MiddleName => "middlename",
            Self::LastName => "lastname",
            Self::Phone => "phone",
            Self::FullName => "fullname",
            Self::Unknown(raw) => raw.as_str(),
        }
    }
}

impl From<String> for ApplicantFieldMapping {
    fn from(raw: String) -> Self {
        match raw.trim() {
            "" | "none" => Self::Unmapped,
            "email" => Self::Email,
            "firstname" => Self::FirstName,
            "middlename" => Self::MiddleName,
            "lastname" => Self::LastName,
            "phone" => Self::Phone,
            "fullname" => Self::FullName,
            other => Self::Unknown(other.to_string()),
        }
    }
}

impl From<ApplicantFieldMapping> for String {
    fn from(mapping: ApplicantFieldMapping) -> Self {
        mapping.as_str().to_string()
    }
}

/// Purpose of a template.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FormType {
    #[default]
    Application,
    Assessment,
    Others,
    Custom(String),
}

impl FormType {
    pub const ALL: [FormType; 3] = [FormType::Application, FormType::Assessment, FormType::Others];

    pub fn as_str(&self) -> &str {
        match self {
            Self::Application => "application",
            Self::Assessment => "assessment",
            Self::Others => "others",
            Self::Custom(raw) => raw.as_str(),
        }
    }
}

impl From<String> for FormType {
    fn from(raw: String) -> Self {
        match raw.trim() {
            "application" => Self::Application,
            "assessment" => Self::Assessment,
            "others" => Self::Others,
            other => Self::Custom(other.to_string()),
        }
    }
}

impl From<FormType> for String {
    fn from(kind: FormType) -> Self {
        kind.as_str().to_string()
    }
}

/// Single input definition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    #[serde(skip)]
    pub key: NodeKey,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub label: String,
    #[serde(rename = "type", default)]
    pub kind: FieldType,
    #[serde(default, deserialize_with = "deserialize_options")]
    pub options: Vec<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub applicant_field_mapping: ApplicantFieldMapping,
    #[serde(default)]
    pub sort_order: i32,
}

impl Field {
    /// Blank text field, not required, unmapped.
    pub fn new() -> Self {
        Self {
            key: NodeKey::new(),
            id: None,
            label: String::new(),
            kind: FieldType::Text,
            options: Vec::new(),
            required: false,
            applicant_field_mapping: ApplicantFieldMapping::Unmapped,
            sort_order: 0,
        }
    }
}

impl Default for Field {
    fn default() -> Self {
        Self::new()
    }
}

/// Titled, ordered cluster of fields.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormGroup {
    #[serde(skip)]
    pub key: NodeKey,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default)]
    pub fields: Vec<Field>,
}

impl FormGroup {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Reusable application/assessment form definition.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormTemplate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub form_type: FormType,
    #[serde(default)]
    pub groups: Vec<FormGroup>,
    #[serde(default)]
    pub fields: Vec<Field>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manager_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Dynamic application forms share the template tree.
pub type Form = FormTemplate;

impl FormTemplate {
    /// Starting tree for a create session: untitled, one empty group.
    pub fn blank() -> Self {
        Self {
            groups: vec![FormGroup::new()],
            ..Self::default()
        }
    }

    /// Number of fields across groups and the ungrouped list.
    pub fn field_count(&self) -> usize {
        self.fields.len() + self.groups.iter().map(|g| g.fields.len()).sum::<usize>()
    }
}

impl Identified for FormTemplate {
    fn id(&self) -> &str {
        self.id.as_deref().unwrap_or_default()
    }
}

/// Accept options as a comma-separated string, a JSON array, or null.
fn deserialize_options<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(Value::String(text)) => split_list(&text),
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(value_to_string)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
        _ => Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nested_template_with_string_and_list_options() {
        let json = r#"{
            "id": "t-1",
            "title": "Engineering application",
            "formType": "application",
            "groups": [{
                "title": "Contact",
                "sortOrder": 1,
                "fields": [
                    {"label": "Email", "type": "email", "required": true, "applicantFieldMapping": "email", "sortOrder": 1},
                    {"label": "Seniority", "type": "select", "options": "Junior, Senior ,", "sortOrder": 2}
                ]
            }],
            "fields": [{"label": "Track", "type": "radio", "options": ["A", "B"], "applicantFieldMapping": ""}]
        }"#;

        let template: FormTemplate = serde_json::from_str(json).unwrap();
        assert_eq!(template.id(), "t-1");
        assert_eq!(template.form_type, FormType::Application);
        assert_eq!(template.field_count(), 3);

        let group = &template.groups[0];
        assert_eq!(group.fields[0].kind, FieldType::Email);
        assert_eq!(group.fields[0].applicant_field_mapping, ApplicantFieldMapping::Email);
        assert_eq!(group.fields[1].options, vec!["Junior", "Senior"]);
        assert_eq!(template.fields[0].options, vec!["A", "B"]);
        assert_eq!(
            template.fields[0].applicant_field_mapping,
            ApplicantFieldMapping::Unmapped
        );
    }

    #[test]
    fn unknown_tokens_survive_serialization() {
        let json = r#"{"title": "x", "formType": "survey", "fields": [{"label": "Sig", "type": "signature"}]}"#;
        let template: FormTemplate = serde_json::from_str(json).unwrap();
        assert_eq!(template.form_type, FormType::Custom("survey".into()));
        assert_eq!(template.fields[0].kind, FieldType::Unknown("signature".into()));

        let out = serde_json::to_value(&template).unwrap();
        assert_eq!(out["formType"], "survey");
        assert_eq!(out["fields"][0]["type"], "signature");
        assert_eq!(out["fields"][0]["applicantFieldMapping"], "none");
        assert!(out["fields"][0].get("key").is_none());
        assert!(out.get("id").is_none());
    }

    #[test]
    fn deserialized_nodes_get_distinct_keys() {
        let json = r#"{"groups": [{"title": "a"}, {"title": "b"}]}"#;
        let template: FormTemplate = serde_json::from_str(json).unwrap();
        assert_ne!(template.groups[0].key, template.groups[1].key);
    }

    #[test]
    fn blank_template_has_one_empty_group() {
        let template = FormTemplate::blank();
        assert_eq!(template.groups.len(), 1);
        assert!(template.groups[0].fields.is_empty());
        assert!(template.fields.is_empty());
        assert_eq!(template.form_type, FormType::Application);
    }

    #[test]
    fn only_choice_kinds_have_options() {
        assert!(FieldType::Select.has_options());
        assert!(FieldType::Radio.has_options());
        assert!(!FieldType::Checkbox.has_options());
        assert!(!FieldType::Unknown("select-multi".into()).has_options());
    }
}
