// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Freddie Admin contributors

//! Read-only views of submitted applications and public form links.

use serde::Deserialize;
use serde_json::Value;

use crate::models::Identified;
use crate::utils::value_to_string;

/// Shareable link through which applicants reach a form.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicFormLink {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Identified for PublicFormLink {
    fn id(&self) -> &str {
        &self.id
    }
}

/// One answered field inside a submission.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEntry {
    #[serde(default)]
    pub field_id: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub value: Value,
    #[serde(default)]
    pub file_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl ResponseEntry {
    /// Human-readable answer; uploaded documents show their URL.
    pub fn display_value(&self) -> String {
        if let Some(url) = self.file_url.as_deref().filter(|u| !u.trim().is_empty()) {
            return url.to_string();
        }
        match &self.value {
            Value::Array(items) => items
                .iter()
                .filter_map(value_to_string)
                .collect::<Vec<_>>()
                .join(", "),
            other => value_to_string(other).unwrap_or_default(),
        }
    }
}

/// All answers one applicant submitted for a form.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormResponse {
    #[serde(default)]
    pub applicant_id: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub responses: Vec<ResponseEntry>,
}

impl Identified for FormResponse {
    fn id(&self) -> &str {
        &self.applicant_id
    }
}

/// One page of submissions.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ResponsePage {
    #[serde(default)]
    pub data: Vec<FormResponse>,
    #[serde(default)]
    pub total: u64,
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default)]
    pub limit: u32,
}

fn first_page() -> u32 {
    1
}

impl ResponsePage {
    /// Whether another page exists after this one.
    pub fn has_next(&self) -> bool {
        self.limit > 0 && u64::from(self.page) * u64::from(self.limit) < self.total
    }
}
