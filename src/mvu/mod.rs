// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Freddie Admin contributors

//! Root Model-View-Update kernel wiring component state, messages, and commands.

pub mod remote;
pub mod session;

use tracing::debug;

use crate::api::{ApiClient, Transport};
use crate::mvu::session::Session;
use crate::ui::components::identities::{self, IdentitiesCommand, IdentitiesModel, IdentitiesMsg};
use crate::ui::components::jobs::{self, JobsCommand, JobsModel, JobsMsg};
use crate::ui::components::managers::{self, ManagersCommand, ManagersModel, ManagersMsg};
use crate::ui::components::responses::{
    self, ResponsesCommand, ResponsesModel, ResponsesMsg,
};
use crate::ui::components::templates::{
    self, DocumentKind, TemplatesCommand, TemplatesModel, TemplatesMsg,
};
use crate::ui::components::Feedback;

/// Screens reachable from the top bar.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Managers,
    Identities,
    Jobs,
    Templates,
    Forms,
    Responses,
}

impl Tab {
    pub const ALL: [Tab; 6] = [
        Tab::Managers,
        Tab::Identities,
        Tab::Jobs,
        Tab::Templates,
        Tab::Forms,
        Tab::Responses,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Tab::Managers => "Managers",
            Tab::Identities => "Identities",
            Tab::Jobs => "Jobs",
            Tab::Templates => "Templates",
            Tab::Forms => "Forms",
            Tab::Responses => "Responses",
        }
    }
}

/// Top-level application state.
pub struct AppModel {
    /// Selected manager, job and form.
    pub session: Session,
    pub tab: Tab,
    pub managers: ManagersModel,
    pub identities: IdentitiesModel,
    pub jobs: JobsModel,
    pub templates: TemplatesModel,
    pub forms: TemplatesModel,
    pub responses: ResponsesModel,
    /// Latest status message to display.
    pub status: Option<String>,
    /// Latest error message to display in modal.
    pub error: Option<String>,
    /// Count of queued background commands.
    pub pending_commands: usize,
}

impl Default for AppModel {
    fn default() -> Self {
        Self::with_page_size(responses::DEFAULT_PAGE_SIZE)
    }
}

impl AppModel {
    pub fn with_page_size(page_size: u32) -> Self {
        Self {
            session: Session::default(),
            tab: Tab::default(),
            managers: ManagersModel::default(),
            identities: IdentitiesModel::default(),
            jobs: JobsModel::default(),
            templates: TemplatesModel::new(DocumentKind::Template),
            forms: TemplatesModel::new(DocumentKind::Form),
            responses: ResponsesModel::new(page_size),
            status: None,
            error: None,
            pending_commands: 0,
        }
    }
}

/// Application messages routed through the update function.
pub enum Msg {
    /// First frame: load the managers list.
    Started,
    SetTab(Tab),
    SelectManager(Option<String>),
    SelectJob(Option<String>),
    SelectForm(Option<String>),
    DismissError,
    Managers(ManagersMsg),
    Identities(IdentitiesMsg),
    Jobs(JobsMsg),
    Templates(TemplatesMsg),
    Forms(TemplatesMsg),
    Responses(ResponsesMsg),
}

/// Commands represent side-effects executed on the worker pool.
pub enum Command {
    Managers(ManagersCommand),
    Identities(IdentitiesCommand),
    Jobs(JobsCommand),
    Templates(TemplatesCommand),
    Forms(TemplatesCommand),
    Responses(ResponsesCommand),
}

impl Command {
    pub fn label(&self) -> &'static str {
        match self {
            Command::Managers(_) => "managers",
            Command::Identities(_) => "identities",
            Command::Jobs(_) => "jobs",
            Command::Templates(_) => "templates",
            Command::Forms(_) => "forms",
            Command::Responses(_) => "responses",
        }
    }
}

/// Update the application model and enqueue commands.
pub fn update(model: &mut AppModel, msg: Msg, cmds: &mut Vec<Command>) {
    match msg {
        Msg::Started => route_managers(model, ManagersMsg::Refresh, cmds),
        Msg::SetTab(tab) => model.tab = tab,
        Msg::SelectManager(id) => select_manager(model, id, cmds),
        Msg::SelectJob(id) => select_job(model, id, cmds),
        Msg::SelectForm(id) => select_form(model, id, cmds),
        Msg::DismissError => model.error = None,
        Msg::Managers(ManagersMsg::Select(id)) => select_manager(model, Some(id), cmds),
        Msg::Managers(m) => {
            let deleted = match &m {
                ManagersMsg::Deleted { id, result: Ok(()) } => Some(id.clone()),
                _ => None,
            };
            route_managers(model, m, cmds);
            if deleted.is_some() && deleted.as_deref() == model.session.manager_id() {
                select_manager(model, None, cmds);
            }
        }
        Msg::Identities(m) => route_identities(model, m, cmds),
        Msg::Jobs(JobsMsg::Select(id)) => select_job(model, Some(id), cmds),
        Msg::Jobs(m) => {
            let deleted = match &m {
                JobsMsg::Deleted { id, result: Ok(()), .. } => Some(id.clone()),
                _ => None,
            };
            route_jobs(model, m, cmds);
            if deleted.is_some() && deleted.as_deref() == model.session.job_id() {
                select_job(model, None, cmds);
            }
        }
        Msg::Templates(m) => route_templates(model, m, cmds),
        Msg::Forms(TemplatesMsg::Select(id)) => select_form(model, Some(id), cmds),
        Msg::Forms(m) => {
            let deleted = match &m {
                TemplatesMsg::Deleted { id, result: Ok(()), .. } => Some(id.clone()),
                _ => None,
            };
            route_forms(model, m, cmds);
            if deleted.is_some() && deleted.as_deref() == model.session.form_id() {
                select_form(model, None, cmds);
            }
        }
        Msg::Responses(m) => route_responses(model, m, cmds),
    }
}

/// Execute a command (on a worker thread) and return the resulting message.
pub fn run_command<T: Transport>(client: &ApiClient<T>, cmd: Command) -> Msg {
    debug!(command = cmd.label(), "running command");
    match cmd {
        Command::Managers(c) => Msg::Managers(managers::execute(client, c)),
        Command::Identities(c) => Msg::Identities(identities::execute(client, c)),
        Command::Jobs(c) => Msg::Jobs(jobs::execute(client, c)),
        Command::Templates(c) => Msg::Templates(templates::execute(client, c)),
        Command::Forms(c) => Msg::Forms(templates::execute(client, c)),
        Command::Responses(c) => Msg::Responses(responses::execute(client, c)),
    }
}

/// New manager: every manager-scoped list starts over.
fn select_manager(model: &mut AppModel, id: Option<String>, cmds: &mut Vec<Command>) {
    let tag = model.session.select_manager(id);
    route_identities(model, IdentitiesMsg::Reset(tag.clone()), cmds);
    route_jobs(model, JobsMsg::Reset(tag.clone()), cmds);
    route_templates(model, TemplatesMsg::Reset(tag.clone()), cmds);
    route_forms(model, TemplatesMsg::Reset(tag.clone()), cmds);
    route_responses(model, ResponsesMsg::Reset(tag), cmds);
}

/// New job: templates and forms are refetched for (job, manager).
fn select_job(model: &mut AppModel, id: Option<String>, cmds: &mut Vec<Command>) {
    let tag = model.session.select_job(id);
    route_templates(model, TemplatesMsg::Reset(tag.clone()), cmds);
    route_forms(model, TemplatesMsg::Reset(tag.clone()), cmds);
    route_responses(model, ResponsesMsg::Reset(tag), cmds);
}

fn select_form(model: &mut AppModel, id: Option<String>, cmds: &mut Vec<Command>) {
    let tag = model.session.select_form(id);
    route_responses(model, ResponsesMsg::Reset(tag), cmds);
}

fn route_managers(model: &mut AppModel, msg: ManagersMsg, cmds: &mut Vec<Command>) {
    let mut sub = Vec::new();
    if let Some(feedback) = managers::update(&mut model.managers, msg, &mut sub) {
        surface_event(model, feedback);
    }
    cmds.extend(sub.into_iter().map(Command::Managers));
}

fn route_identities(model: &mut AppModel, msg: IdentitiesMsg, cmds: &mut Vec<Command>) {
    let mut sub = Vec::new();
    if let Some(feedback) = identities::update(&mut model.identities, msg, &mut sub) {
        surface_event(model, feedback);
    }
    cmds.extend(sub.into_iter().map(Command::Identities));
}

fn route_jobs(model: &mut AppModel, msg: JobsMsg, cmds: &mut Vec<Command>) {
    let mut sub = Vec::new();
    if let Some(feedback) = jobs::update(&mut model.jobs, msg, &mut sub) {
        surface_event(model, feedback);
    }
    cmds.extend(sub.into_iter().map(Command::Jobs));
}

fn route_templates(model: &mut AppModel, msg: TemplatesMsg, cmds: &mut Vec<Command>) {
    let mut sub = Vec::new();
    if let Some(feedback) = templates::update(&mut model.templates, msg, &mut sub) {
        surface_event(model, feedback);
    }
    cmds.extend(sub.into_iter().map(Command::Templates));
}

fn route_forms(model: &mut AppModel, msg: TemplatesMsg, cmds: &mut Vec<Command>) {
    let mut sub = Vec::new();
    if let Some(feedback) = templates::update(&mut model.forms, msg, &mut sub) {
        surface_event(model, feedback);
    }
    cmds.extend(sub.into_iter().map(Command::Forms));
}

fn route_responses(model: &mut AppModel, msg: ResponsesMsg, cmds: &mut Vec<Command>) {
    let mut sub = Vec::new();
    if let Some(feedback) = responses::update(&mut model.responses, msg, &mut sub) {
        surface_event(model, feedback);
    }
    cmds.extend(sub.into_iter().map(Command::Responses));
}

/// Update status/error fields consistently for user feedback.
fn surface_event(model: &mut AppModel, feedback: Feedback) {
    if feedback.is_error {
        model.error = Some(feedback.message.clone());
    }
    model.status = Some(feedback.message);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::ScriptedTransport;
    use crate::models::form_template::FormTemplate;
    use crate::models::manager::ManagerDraft;
    use crate::mvu::remote::Remote;

    /// Run every queued command against `client` and feed the results back, like the UI does.
    fn drain<T: Transport>(model: &mut AppModel, client: &ApiClient<T>, mut cmds: Vec<Command>) {
        while let Some(cmd) = cmds.pop() {
            let msg = run_command(client, cmd);
            let mut next = Vec::new();
            update(model, msg, &mut next);
            cmds.extend(next);
        }
    }

    #[test]
    fn started_loads_managers() {
        let mut model = AppModel::default();
        let client = ApiClient::new(ScriptedTransport::with_replies(&[(
            200,
            r#"[{"id": "m-1", "fullName": "Ann"}]"#,
        )]));

        let mut cmds = Vec::new();
        update(&mut model, Msg::Started, &mut cmds);
        assert!(model.managers.list.is_loading());
        drain(&mut model, &client, cmds);

        assert_eq!(model.managers.list.items()[0].full_name, "Ann");
    }

    #[test]
    fn manager_creation_round_trip() {
        let mut model = AppModel::default();
        model.managers.list = Remote::Loaded(Vec::new());
        let client = ApiClient::new(ScriptedTransport::with_replies(&[(
            201,
            r#"{"id": "m-7", "fullName": "Jane Doe", "email": "jane@co.com", "companyName": "Co", "companyDescription": "", "createdAt": "2025-03-01T10:00:00Z"}"#,
        )]));

        let mut cmds = Vec::new();
        update(&mut model, Msg::Managers(ManagersMsg::OpenCreate), &mut cmds);
        update(
            &mut model,
            Msg::Managers(ManagersMsg::DraftChanged(ManagerDraft {
                full_name: "  Jane Doe ".into(),
                email: "jane@co.com".into(),
                company_name: "Co<script>alert(1)</script>".into(),
                company_description: String::new(),
            })),
            &mut cmds,
        );
        update(&mut model, Msg::Managers(ManagersMsg::Submit), &mut cmds);
        assert_eq!(cmds.len(), 1);
        drain(&mut model, &client, cmds);

        let requests = client.transport().requests();
        let sent = &requests[0];
        assert_eq!(sent.path(), "/managers");
        let body = sent.body.as_ref().unwrap();
        assert_eq!(body["fullName"], "Jane Doe");
        assert_eq!(body["companyName"], "Co");

        let stored = model.managers.list.find("m-7").unwrap();
        assert_eq!(stored.created_at.as_deref(), Some("2025-03-01T10:00:00Z"));
        assert!(model.error.is_none());
        assert_eq!(model.status.as_deref(), Some("Manager \"Jane Doe\" created."));
    }

    #[test]
    fn failed_creation_opens_error_modal() {
        let mut model = AppModel::default();
        model.managers.list = Remote::Loaded(Vec::new());
        let client = ApiClient::new(ScriptedTransport::with_replies(&[(
            409,
            r#"{"message": "Manager already exists"}"#,
        )]));

        let mut cmds = Vec::new();
        update(&mut model, Msg::Managers(ManagersMsg::OpenCreate), &mut cmds);
        update(
            &mut model,
            Msg::Managers(ManagersMsg::DraftChanged(ManagerDraft {
                full_name: "Jane".into(),
                email: "jane@co.com".into(),
                company_name: "Co".into(),
                company_description: String::new(),
            })),
            &mut cmds,
        );
        update(&mut model, Msg::Managers(ManagersMsg::Submit), &mut cmds);
        drain(&mut model, &client, cmds);

        assert_eq!(model.error.as_deref(), Some("Manager already exists"));
        assert!(model.managers.list.items().is_empty());
    }

    #[test]
    fn selecting_a_job_clears_templates_before_refetch() {
        let mut model = AppModel::default();
        let mut cmds = Vec::new();

        update(&mut model, Msg::SelectManager(Some("m-1".into())), &mut cmds);
        let manager_tag = model.session.tag();
        update(
            &mut model,
            Msg::Templates(TemplatesMsg::Loaded {
                tag: manager_tag.clone(),
                result: Ok(vec![FormTemplate {
                    id: Some("t-1".into()),
                    title: "Old".into(),
                    ..FormTemplate::default()
                }]),
            }),
            &mut cmds,
        );
        assert_eq!(model.templates.list.items().len(), 1);

        cmds.clear();
        update(&mut model, Msg::Jobs(JobsMsg::Select("j-1".into())), &mut cmds);
        assert!(model.templates.list.is_loading());
        assert!(model.templates.list.items().is_empty());
        assert!(model.forms.list.is_loading());
        assert!(cmds.iter().any(|c| matches!(
            c,
            Command::Templates(TemplatesCommand::Fetch { job_id: Some(job), manager_id, .. })
                if job == "j-1" && manager_id == "m-1"
        )));
        assert!(cmds.iter().any(|c| matches!(c, Command::Forms(TemplatesCommand::Fetch { .. }))));

        // The manager-level fetch resolving late must not repopulate the list.
        update(
            &mut model,
            Msg::Templates(TemplatesMsg::Loaded {
                tag: manager_tag,
                result: Ok(vec![FormTemplate::default()]),
            }),
            &mut cmds,
        );
        assert!(model.templates.list.is_loading());
    }

    #[test]
    fn selecting_a_manager_fetches_its_lists() {
        let mut model = AppModel::default();
        let mut cmds = Vec::new();
        update(&mut model, Msg::SelectManager(Some("m-1".into())), &mut cmds);

        let labels: Vec<&str> = cmds.iter().map(Command::label).collect();
        assert_eq!(labels, ["identities", "jobs", "templates"]);
        assert!(model.forms.list == Remote::Idle);
    }

    #[test]
    fn deleting_the_selected_manager_clears_selection() {
        let mut model = AppModel::default();
        let mut cmds = Vec::new();
        update(&mut model, Msg::SelectManager(Some("m-1".into())), &mut cmds);
        update(&mut model, Msg::SelectJob(Some("j-1".into())), &mut cmds);

        update(
            &mut model,
            Msg::Managers(ManagersMsg::Deleted {
                id: "m-1".into(),
                result: Ok(()),
            }),
            &mut cmds,
        );
        assert!(model.session.manager_id().is_none());
        assert!(model.session.job_id().is_none());
        assert_eq!(model.identities.list, Remote::Idle);
    }

    #[test]
    fn error_is_dismissable() {
        let mut model = AppModel::default();
        let mut cmds = Vec::new();
        update(&mut model, Msg::Managers(ManagersMsg::Submit), &mut cmds);
        assert!(model.error.is_some());
        update(&mut model, Msg::DismissError, &mut cmds);
        assert!(model.error.is_none());
        assert!(model.status.is_some());
    }
}
