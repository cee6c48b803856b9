// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Freddie Admin contributors

//! Hiring manager accounts.

use serde::{Deserialize, Serialize};

use crate::models::Identified;

/// Manager as returned by the API.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manager {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub company_name: String,
    #[serde(default)]
    pub company_description: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Identified for Manager {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Editable buffer behind the create/edit manager forms.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ManagerDraft {
    pub full_name: String,
    pub email: String,
    pub company_name: String,
    pub company_description: String,
}

impl From<&Manager> for ManagerDraft {
    fn from(manager: &Manager) -> Self {
        Self {
            full_name: manager.full_name.clone(),
            email: manager.email.clone(),
            company_name: manager.company_name.clone(),
            company_description: manager.company_description.clone(),
        }
    }
}
