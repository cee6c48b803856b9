// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Freddie Admin contributors

//! Typed endpoints of the Freddie REST API.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::api::transport::{ApiRequest, ApiResponse, Method, Transport};
use crate::api::ApiError;
use crate::logic::payload::{IdentityPayload, JobPayload, ManagerPayload};
use crate::models::form_template::{Form, FormTemplate};
use crate::models::identity::Identity;
use crate::models::job::Job;
use crate::models::manager::Manager;
use crate::models::response::{PublicFormLink, ResponsePage};

/// Keys under which list endpoints may wrap their arrays.
const LIST_WRAPPERS: [&str; 3] = ["data", "items", "identities"];

pub struct ApiClient<T: Transport> {
    transport: T,
}

impl<T: Transport> ApiClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    #[cfg(test)]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    // Managers

    pub fn list_managers(&self) -> Result<Vec<Manager>, ApiError> {
        let request = ApiRequest::new(Method::Get, ["managers"]);
        self.fetch_list(request, "Failed to load managers.")
    }

    pub fn create_manager(&self, payload: &ManagerPayload) -> Result<Manager, ApiError> {
        let request = ApiRequest::new(Method::Post, ["managers"]).body(to_body(payload)?);
        self.fetch_one(request, "Failed to create manager.")
    }

    pub fn update_manager(&self, id: &str, payload: &ManagerPayload) -> Result<Manager, ApiError> {
        let request = ApiRequest::new(Method::Patch, ["managers", id]).body(to_body(payload)?);
        self.fetch_one(request, "Failed to update manager.")
    }

    pub fn delete_manager(&self, id: &str) -> Result<(), ApiError> {
        let request = ApiRequest::new(Method::Delete, ["managers", id]);
        self.send_empty(request, "Failed to delete manager.")
    }

    // Identities

    pub fn list_identities(&self, manager_id: &str) -> Result<Vec<Identity>, ApiError> {
        let request = ApiRequest::new(Method::Get, ["managers", manager_id, "identities"]);
        self.fetch_list(request, "Failed to load identities.")
    }

    pub fn create_identity(
        &self,
        manager_id: &str,
        payload: &IdentityPayload,
    ) -> Result<Identity, ApiError> {
        let request = ApiRequest::new(Method::Post, ["managers", manager_id, "identities"])
            .body(to_body(payload)?);
        self.fetch_one(request, "Failed to create identity.")
    }

    pub fn update_identity(
        &self,
        manager_id: &str,
        id: &str,
        payload: &IdentityPayload,
    ) -> Result<Identity, ApiError> {
        let request = ApiRequest::new(Method::Patch, ["managers", manager_id, "identities", id])
            .body(to_body(payload)?);
        self.fetch_one(request, "Failed to update identity.")
    }

    pub fn delete_identity(&self, manager_id: &str, id: &str) -> Result<(), ApiError> {
        let request = ApiRequest::new(Method::Delete, ["managers", manager_id, "identities", id]);
        self.send_empty(request, "Failed to delete identity.")
    }

    // Jobs

    pub fn list_jobs(&self, manager_id: &str) -> Result<Vec<Job>, ApiError> {
        let request = ApiRequest::new(Method::Get, ["jobs"]).query("managerId", manager_id);
        self.fetch_list(request, "Failed to load jobs.")
    }

    pub fn create_job(&self, payload: &JobPayload) -> Result<Job, ApiError> {
        let request = ApiRequest::new(Method::Post, ["jobs"]).body(to_body(payload)?);
        self.fetch_one(request, "Failed to create job.")
    }

    pub fn update_job(&self, manager_id: &str, id: &str, payload: &JobPayload) -> Result<Job, ApiError> {
        let request = ApiRequest::new(Method::Patch, ["jobs", id])
            .query("managerId", manager_id)
            .body(to_body(payload)?);
        self.fetch_one(request, "Failed to update job.")
    }

    pub fn delete_job(&self, manager_id: &str, id: &str) -> Result<(), ApiError> {
        let request = ApiRequest::new(Method::Delete, ["jobs", id]).query("managerId", manager_id);
        self.send_empty(request, "Failed to delete job.")
    }

    // Form templates

    pub fn list_templates(
        &self,
        manager_id: &str,
        job_id: Option<&str>,
    ) -> Result<Vec<FormTemplate>, ApiError> {
        let mut request =
            ApiRequest::new(Method::Get, ["form-templates"]).query("managerId", manager_id);
        if let Some(job_id) = job_id {
            request = request.query("jobId", job_id);
        }
        self.fetch_list(request, "Failed to load form templates.")
    }

    pub fn create_template(&self, payload: &FormTemplate) -> Result<FormTemplate, ApiError> {
        let request = ApiRequest::new(Method::Post, ["form-templates"]).body(to_body(payload)?);
        self.fetch_one(request, "Failed to create form template.")
    }

    pub fn update_template(
        &self,
        manager_id: &str,
        id: &str,
        payload: &FormTemplate,
    ) -> Result<FormTemplate, ApiError> {
        let request = ApiRequest::new(Method::Patch, ["form-templates", id])
            .query("managerId", manager_id)
            .body(to_body(payload)?);
        self.fetch_one(request, "Failed to update form template.")
    }

    pub fn delete_template(&self, id: &str) -> Result<(), ApiError> {
        let request = ApiRequest::new(Method::Delete, ["form-templates", id]);
        self.send_empty(request, "Failed to delete form template.")
    }

    // Forms

    pub fn list_forms(&self, manager_id: &str, job_id: &str) -> Result<Vec<Form>, ApiError> {
        let request = ApiRequest::new(Method::Get, ["forms"])
            .query("jobId", job_id)
            .query("managerId", manager_id);
        self.fetch_list(request, "Failed to load forms.")
    }

    pub fn create_form(&self, manager_id: &str, payload: &Form) -> Result<Form, ApiError> {
        let request = ApiRequest::new(Method::Post, ["managers", manager_id, "forms"])
            .body(to_body(payload)?);
        self.fetch_one(request, "Failed to create form.")
    }

    pub fn update_form(&self, manager_id: &str, id: &str, payload: &Form) -> Result<Form, ApiError> {
        let request = ApiRequest::new(Method::Patch, ["managers", manager_id, "forms", id])
            .body(to_body(payload)?);
        self.fetch_one(request, "Failed to update form.")
    }

    pub fn delete_form(&self, manager_id: &str, id: &str) -> Result<(), ApiError> {
        let request = ApiRequest::new(Method::Delete, ["managers", manager_id, "forms", id]);
        self.send_empty(request, "Failed to delete form.")
    }

    // Links and responses

    pub fn list_public_links(
        &self,
        manager_id: &str,
        form_id: &str,
    ) -> Result<Vec<PublicFormLink>, ApiError> {
        let request = ApiRequest::new(Method::Get, ["form-links", "public"])
            .query("formId", form_id)
            .query("managerId", manager_id);
        self.fetch_list(request, "Failed to load public links.")
    }

    pub fn list_responses(
        &self,
        form_id: &str,
        manager_id: Option<&str>,
        page: u32,
        limit: u32,
    ) -> Result<ResponsePage, ApiError> {
        let mut request = ApiRequest::new(Method::Get, ["forms-responses", form_id])
            .query("page", page.to_string())
            .query("limit", limit.to_string());
        if let Some(manager_id) = manager_id {
            request = request.query("managerId", manager_id);
        }
        let response = self.send(request, "Failed to fetch form responses.")?;
        Ok(serde_json::from_str(&response.body)?)
    }

    pub fn delete_response(&self, form_id: &str, applicant_id: &str) -> Result<(), ApiError> {
        let request =
            ApiRequest::new(Method::Delete, ["forms-responses", form_id, applicant_id]);
        self.send_empty(request, "Failed to delete response.")
    }

    fn send(&self, request: ApiRequest, fallback: &str) -> Result<ApiResponse, ApiError> {
        let response = self.transport.execute(&request)?;
        if response.is_success() {
            debug!(
                method = request.method.as_str(),
                path = %request.path(),
                status = response.status,
                "request succeeded"
            );
            Ok(response)
        } else {
            warn!(
                method = request.method.as_str(),
                path = %request.path(),
                status = response.status,
                "request rejected"
            );
            Err(ApiError::from_status(response.status, &response.body, fallback))
        }
    }

    fn send_empty(&self, request: ApiRequest, fallback: &str) -> Result<(), ApiError> {
        self.send(request, fallback).map(|_| ())
    }

    fn fetch_list<D: DeserializeOwned>(
        &self,
        request: ApiRequest,
        fallback: &str,
    ) -> Result<Vec<D>, ApiError> {
        let response = self.send(request, fallback)?;
        decode_list(&response.body)
    }

    fn fetch_one<D: DeserializeOwned>(
        &self,
        request: ApiRequest,
        fallback: &str,
    ) -> Result<D, ApiError> {
        let response = self.send(request, fallback)?;
        decode_one(&response.body)
    }
}

fn to_body<S: Serialize>(payload: &S) -> Result<Value, ApiError> {
    Ok(serde_json::to_value(payload)?)
}

/// Accept a bare array or one wrapped under a known key.
fn decode_list<D: DeserializeOwned>(body: &str) -> Result<Vec<D>, ApiError> {
    let mut value: Value = serde_json::from_str(body)?;
    if let Value::Object(map) = &mut value
        && let Some(key) = LIST_WRAPPERS
            .iter()
            .find(|key| map.get(**key).is_some_and(Value::is_array))
        && let Some(inner) = map.remove(*key)
    {
        value = inner;
    }
    Ok(serde_json::from_value(value)?)
}

/// Accept the object itself or one wrapped under `data`.
fn decode_one<D: DeserializeOwned>(body: &str) -> Result<D, ApiError> {
    let mut value: Value = serde_json::from_str(body)?;
    if let Value::Object(map) = &mut value
        && map.get("data").is_some_and(Value::is_object)
        && let Some(inner) = map.remove("data")
    {
        value = inner;
    }
    Ok(serde_json::from_value(value)?)
}
