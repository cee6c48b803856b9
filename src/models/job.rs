// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Freddie Admin contributors

//! Job postings owned by a manager.

use serde::{Deserialize, Serialize};

use crate::models::Identified;

/// Default status for new postings.
pub const DEFAULT_JOB_STATUS: &str = "active";

/// Job as returned by the API.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub work_mode: String,
    #[serde(default)]
    pub why_join_us: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub applicant_count: u32,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Identified for Job {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Editable buffer behind the job forms. Requirements and roles are edited as
/// comma-separated text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JobDraft {
    pub title: String,
    pub description: String,
    pub requirements: String,
    pub roles: String,
    pub country: String,
    pub state: String,
    pub city: String,
    pub work_mode: String,
    pub why_join_us: String,
    pub status: String,
}

impl Default for JobDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            requirements: String::new(),
            roles: String::new(),
            country: String::new(),
            state: String::new(),
            city: String::new(),
            work_mode: String::new(),
            why_join_us: String::new(),
            status: DEFAULT_JOB_STATUS.to_string(),
        }
    }
}

impl From<&Job> for JobDraft {
    fn from(job: &Job) -> Self {
        Self {
            title: job.title.clone(),
            description: job.description.clone(),
            requirements: job.requirements.join(", "),
            roles: job.roles.join(", "),
            country: job.country.clone(),
            state: job.state.clone(),
            city: job.city.clone(),
            work_mode: job.work_mode.clone(),
            why_join_us: job.why_join_us.clone(),
            status: if job.status.trim().is_empty() {
                DEFAULT_JOB_STATUS.to_string()
            } else {
                job.status.clone()
            },
        }
    }
}
