// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Freddie Admin contributors

//! Request bodies: validated, sanitized snapshots of editor state in the shape the API expects.

use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use crate::logic::validation::{
    ValidationError, validate_identity, validate_job, validate_manager, validate_template,
};
use crate::models::form_template::{Field, FormGroup, FormTemplate};
use crate::models::identity::IdentityDraft;
use crate::models::job::{DEFAULT_JOB_STATUS, JobDraft};
use crate::models::manager::ManagerDraft;
use crate::utils::{sanitize_text, split_list};

/// Body for `POST /managers` and `PATCH /managers/{id}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagerPayload {
    pub full_name: String,
    pub email: String,
    pub company_name: String,
    pub company_description: String,
}

/// Body for the job create/update endpoints.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPayload {
    pub title: String,
    pub description: String,
    pub requirements: Vec<String>,
    pub roles: Vec<String>,
    pub country: String,
    pub state: String,
    pub city: String,
    pub work_mode: String,
    pub why_join_us: String,
    pub status: String,
    pub manager_id: String,
}

/// Body for the identity create/update endpoints.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityPayload {
    pub identity_type: String,
    pub identity: String,
    pub verification_status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

pub fn manager_payload(draft: &ManagerDraft) -> Result<ManagerPayload, ValidationError> {
    validate_manager(draft)?;
    Ok(ManagerPayload {
        full_name: sanitize_text(&draft.full_name),
        email: sanitize_text(&draft.email),
        company_name: sanitize_text(&draft.company_name),
        company_description: sanitize_text(&draft.company_description),
    })
}

pub fn job_payload(draft: &JobDraft, manager_id: Option<&str>) -> Result<JobPayload, ValidationError> {
    let manager_id = manager_id
        .filter(|id| !id.trim().is_empty())
        .ok_or(ValidationError::NoManagerSelected)?;
    validate_job(draft)?;
    let status = sanitize_text(&draft.status);
    Ok(JobPayload {
        title: sanitize_text(&draft.title),
        description: sanitize_text(&draft.description),
        requirements: split_list(&sanitize_text(&draft.requirements)),
        roles: split_list(&sanitize_text(&draft.roles)),
        country: sanitize_text(&draft.country),
        state: sanitize_text(&draft.state),
        city: sanitize_text(&draft.city),
        work_mode: sanitize_text(&draft.work_mode),
        why_join_us: sanitize_text(&draft.why_join_us),
        status: if status.is_empty() {
            DEFAULT_JOB_STATUS.to_string()
        } else {
            status
        },
        manager_id: manager_id.to_string(),
    })
}

/// New identities are stamped with the current UTC time; updates leave `createdAt` alone.
pub fn identity_payload(
    draft: &IdentityDraft,
    creating: bool,
) -> Result<IdentityPayload, ValidationError> {
    validate_identity(draft)?;
    Ok(IdentityPayload {
        identity_type: sanitize_text(&draft.identity_type),
        identity: sanitize_text(&draft.identity),
        verification_status: draft
            .verification_status
            .as_ref()
            .map(|s| s.as_str().to_string())
            .unwrap_or_default(),
        created_at: creating.then(|| Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
    })
}

/// Validate the tree and produce the body sent for templates and forms.
///
/// Text is sanitized, groups and fields keep the order shown in the editor, and options are
/// dropped for non-choice fields.
pub fn template_payload(
    template: &FormTemplate,
    manager_id: Option<&str>,
    job_id: Option<&str>,
) -> Result<FormTemplate, ValidationError> {
    let manager_id = manager_id
        .filter(|id| !id.trim().is_empty())
        .ok_or(ValidationError::NoManagerSelected)?;
    validate_template(template)?;

    let groups: Vec<FormGroup> = template
        .groups
        .iter()
        .map(|group| FormGroup {
            title: sanitize_text(&group.title),
            fields: shape_fields(&group.fields),
            ..group.clone()
        })
        .collect();

    Ok(FormTemplate {
        id: template.id.clone(),
        title: sanitize_text(&template.title),
        form_type: sanitize_text(template.form_type.as_str()).into(),
        groups,
        fields: shape_fields(&template.fields),
        manager_id: Some(manager_id.to_string()),
        job_id: job_id
            .filter(|id| !id.trim().is_empty())
            .map(str::to_string)
            .or_else(|| template.job_id.clone()),
        created_at: None,
    })
}

fn shape_fields(fields: &[Field]) -> Vec<Field> {
    fields
        .iter()
        .map(|field| Field {
            label: sanitize_text(&field.label),
            options: if field.kind.has_options() {
                field
                    .options
                    .iter()
                    .map(|o| sanitize_text(o))
                    .filter(|o| !o.is_empty())
                    .collect()
            } else {
                Vec::new()
            },
            ..field.clone()
        })
        .collect()
}
