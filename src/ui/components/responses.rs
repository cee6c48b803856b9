// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Freddie Admin contributors

//! Public links and paginated applicant responses for the selected form.

use eframe::egui;

use crate::api::{ApiClient, Transport};
use crate::models::response::{FormResponse, PublicFormLink, ResponsePage};
use crate::mvu::remote::Remote;
use crate::mvu::session::ContextTag;
use crate::ui::components::confirm::{DeleteAction, PendingDelete, delete_controls};
use crate::ui::components::{Feedback, hint, list_status};
use crate::utils::format_timestamp;

pub const DEFAULT_PAGE_SIZE: u32 = 20;

#[derive(Clone, Debug, PartialEq)]
pub struct ResponsesModel {
    pub links: Remote<Vec<PublicFormLink>>,
    pub page: Remote<ResponsePage>,
    context: ContextTag,
    page_number: u32,
    page_size: u32,
    /// Total from the last page that arrived, kept while the next page loads.
    known_total: u64,
    deleting: Option<String>,
    pending_delete: PendingDelete,
}

impl Default for ResponsesModel {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl ResponsesModel {
    pub fn new(page_size: u32) -> Self {
        Self {
            links: Remote::Idle,
            page: Remote::Idle,
            context: ContextTag::default(),
            page_number: 1,
            page_size: page_size.max(1),
            known_total: 0,
            deleting: None,
            pending_delete: PendingDelete::default(),
        }
    }

    pub fn page_number(&self) -> u32 {
        self.page_number
    }

    /// Number of pages for the last known total; at least one.
    pub fn page_count(&self) -> u32 {
        let pages = self
            .known_total
            .div_ceil(u64::from(self.page_size))
            .max(1);
        u32::try_from(pages).unwrap_or(u32::MAX)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ResponsesMsg {
    Reset(ContextTag),
    Refresh,
    LinksLoaded {
        tag: ContextTag,
        result: Result<Vec<PublicFormLink>, String>,
    },
    PageLoaded {
        tag: ContextTag,
        page: u32,
        result: Result<ResponsePage, String>,
    },
    GoToPage(u32),
    TokenCopied,
    OpenFile(String),
    FileOpened(Result<(), String>),
    Delete(String, DeleteAction),
    Deleted {
        tag: ContextTag,
        applicant_id: String,
        result: Result<(), String>,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResponsesCommand {
    FetchLinks {
        tag: ContextTag,
        manager_id: String,
        form_id: String,
    },
    FetchPage {
        tag: ContextTag,
        form_id: String,
        manager_id: Option<String>,
        page: u32,
        limit: u32,
    },
    Delete {
        tag: ContextTag,
        form_id: String,
        applicant_id: String,
    },
    OpenUrl(String),
}

pub fn update(
    model: &mut ResponsesModel,
    msg: ResponsesMsg,
    cmds: &mut Vec<ResponsesCommand>,
) -> Option<Feedback> {
    match msg {
        ResponsesMsg::Reset(tag) => {
            *model = ResponsesModel {
                context: tag,
                ..ResponsesModel::new(model.page_size)
            };
            fetch_links(model, cmds);
            fetch_page(model, cmds);
            None
        }
        ResponsesMsg::Refresh => {
            fetch_links(model, cmds);
            fetch_page(model, cmds);
            None
        }
        ResponsesMsg::LinksLoaded { tag, result } => {
            if tag == model.context {
                model.links.resolve(result);
            }
            None
        }
        ResponsesMsg::PageLoaded { tag, page, result } => {
            if tag == model.context && page == model.page_number {
                if let Ok(loaded) = &result {
                    model.known_total = loaded.total;
                }
                model.page.resolve(result);
            }
            None
        }
        ResponsesMsg::GoToPage(page) => {
            let page = page.clamp(1, model.page_count());
            if page != model.page_number {
                model.page_number = page;
                fetch_page(model, cmds);
            }
            None
        }
        ResponsesMsg::TokenCopied => Some(Feedback::info("Link token copied to clipboard.")),
        ResponsesMsg::OpenFile(url) => {
            cmds.push(ResponsesCommand::OpenUrl(url));
            None
        }
        ResponsesMsg::FileOpened(result) => result
            .err()
            .map(|err| Feedback::error(format!("Could not open file: {err}"))),
        ResponsesMsg::Delete(applicant_id, action) => {
            match action {
                DeleteAction::Arm => model.pending_delete.arm(applicant_id),
                DeleteAction::Cancel => model.pending_delete.cancel(),
                DeleteAction::Confirm => {
                    if model.pending_delete.confirm(&applicant_id)
                        && let Some(form_id) = model.context.form_id.clone()
                    {
                        model.deleting = Some(applicant_id.clone());
                        cmds.push(ResponsesCommand::Delete {
                            tag: model.context.clone(),
                            form_id,
                            applicant_id,
                        });
                    }
                }
            }
            None
        }
        ResponsesMsg::Deleted {
            tag,
            applicant_id,
            result,
        } => {
            let current = tag == model.context;
            if current {
                model.deleting = None;
            }
            match result {
                Ok(()) => {
                    if current && let Remote::Loaded(page) = &mut model.page {
                        let before = page.data.len();
                        page.data.retain(|r| r.applicant_id != applicant_id);
                        let removed = (before - page.data.len()) as u64;
                        page.total = page.total.saturating_sub(removed);
                        model.known_total = page.total;
                    }
                    Some(Feedback::info("Response deleted."))
                }
                Err(err) => Some(Feedback::error(err)),
            }
        }
    }
}

fn fetch_links(model: &mut ResponsesModel, cmds: &mut Vec<ResponsesCommand>) {
    match (&model.context.manager_id, &model.context.form_id) {
        (Some(manager_id), Some(form_id)) => {
            model.links = Remote::Loading;
            cmds.push(ResponsesCommand::FetchLinks {
                tag: model.context.clone(),
                manager_id: manager_id.clone(),
                form_id: form_id.clone(),
            });
        }
        _ => model.links = Remote::Idle,
    }
}

fn fetch_page(model: &mut ResponsesModel, cmds: &mut Vec<ResponsesCommand>) {
    match &model.context.form_id {
        Some(form_id) => {
            model.page = Remote::Loading;
            cmds.push(ResponsesCommand::FetchPage {
                tag: model.context.clone(),
                form_id: form_id.clone(),
                manager_id: model.context.manager_id.clone(),
                page: model.page_number,
                limit: model.page_size,
            });
        }
        None => model.page = Remote::Idle,
    }
}

pub fn execute<T: Transport>(client: &ApiClient<T>, cmd: ResponsesCommand) -> ResponsesMsg {
    match cmd {
        ResponsesCommand::FetchLinks {
            tag,
            manager_id,
            form_id,
        } => ResponsesMsg::LinksLoaded {
            tag,
            result: client
                .list_public_links(&manager_id, &form_id)
                .map_err(|e| e.to_string()),
        },
        ResponsesCommand::FetchPage {
            tag,
            form_id,
            manager_id,
            page,
            limit,
        } => ResponsesMsg::PageLoaded {
            tag,
            page,
            result: client
                .list_responses(&form_id, manager_id.as_deref(), page, limit)
                .map_err(|e| e.to_string()),
        },
        ResponsesCommand::Delete {
            tag,
            form_id,
            applicant_id,
        } => {
            let result = client
                .delete_response(&form_id, &applicant_id)
                .map_err(|e| e.to_string());
            ResponsesMsg::Deleted {
                tag,
                applicant_id,
                result,
            }
        }
        ResponsesCommand::OpenUrl(url) => {
            ResponsesMsg::FileOpened(open::that(&url).map_err(|e| e.to_string()))
        }
    }
}

pub fn view(ui: &mut egui::Ui, model: &ResponsesModel) -> Vec<ResponsesMsg> {
    let mut msgs = Vec::new();

    ui.horizontal(|ui| {
        ui.heading("Responses");
        if ui
            .add_enabled(
                model.context.form_id.is_some() && !model.page.is_loading(),
                egui::Button::new(egui_phosphor::regular::ARROWS_CLOCKWISE),
            )
            .on_hover_text("Reload")
            .clicked()
        {
            msgs.push(ResponsesMsg::Refresh);
        }
    });
    ui.add_space(6.0);

    if model.context.form_id.is_none() {
        ui.label(hint("Select a form on the Forms tab to see its links and responses."));
        return msgs;
    }

    egui::CollapsingHeader::new("Public links")
        .default_open(true)
        .show(ui, |ui| render_links(ui, model, &mut msgs));
    ui.add_space(8.0);

    match &model.page {
        Remote::Idle => {}
        Remote::Loading => {
            ui.horizontal(|ui| {
                ui.add(egui::Spinner::new().size(14.0));
                ui.label("Loading…");
            });
        }
        Remote::Failed(message) => {
            ui.colored_label(ui.visuals().error_fg_color, message);
        }
        Remote::Loaded(page) => {
            render_pager(ui, model, page, &mut msgs);
            ui.add_space(6.0);
            if page.data.is_empty() {
                ui.label(hint("No responses on this page."));
            }
            for response in &page.data {
                render_response(ui, model, response, &mut msgs);
            }
        }
    }

    msgs
}

fn render_links(ui: &mut egui::Ui, model: &ResponsesModel, msgs: &mut Vec<ResponsesMsg>) {
    list_status(ui, &model.links, "No public links for this form.");
    if model.links.items().is_empty() {
        return;
    }
    egui::Grid::new("public_links_grid")
        .num_columns(4)
        .striped(true)
        .spacing(egui::vec2(12.0, 6.0))
        .show(ui, |ui| {
            ui.strong("Token");
            ui.strong("Active");
            ui.strong("Created");
            ui.label("");
            ui.end_row();

            for link in model.links.items() {
                ui.monospace(&link.token);
                ui.label(if link.is_active { "yes" } else { "no" });
                ui.label(format_timestamp(link.created_at.as_deref()));
                if ui
                    .button(egui_phosphor::regular::COPY)
                    .on_hover_text("Copy token")
                    .clicked()
                {
                    ui.ctx().copy_text(link.token.clone());
                    msgs.push(ResponsesMsg::TokenCopied);
                }
                ui.end_row();
            }
        });
}

fn render_pager(
    ui: &mut egui::Ui,
    model: &ResponsesModel,
    page: &ResponsePage,
    msgs: &mut Vec<ResponsesMsg>,
) {
    let current = model.page_number;
    let count = model.page_count();
    ui.horizontal(|ui| {
        if ui
            .add_enabled(current > 1, egui::Button::new(egui_phosphor::regular::CARET_LEFT))
            .on_hover_text("Previous page")
            .clicked()
        {
            msgs.push(ResponsesMsg::GoToPage(current - 1));
        }
        ui.label(format!("Page {current} of {count}"));
        if ui
            .add_enabled(page.has_next(), egui::Button::new(egui_phosphor::regular::CARET_RIGHT))
            .on_hover_text("Next page")
            .clicked()
        {
            msgs.push(ResponsesMsg::GoToPage(current + 1));
        }
        ui.label(hint(format!("{} response(s) in total", page.total)));
    });
}

fn render_response(
    ui: &mut egui::Ui,
    model: &ResponsesModel,
    response: &FormResponse,
    msgs: &mut Vec<ResponsesMsg>,
) {
    let applicant = &response.applicant_id;
    ui.push_id(applicant, |ui| {
        ui.horizontal(|ui| {
            egui::CollapsingHeader::new(format!(
                "Applicant {applicant} · {}",
                format_timestamp(response.created_at.as_deref())
            ))
            .show(ui, |ui| {
                egui::Grid::new("response_entries")
                    .num_columns(2)
                    .spacing(egui::vec2(12.0, 4.0))
                    .show(ui, |ui| {
                        for entry in &response.responses {
                            ui.label(&entry.label);
                            match entry.file_url.as_deref().filter(|u| !u.trim().is_empty()) {
                                Some(url) => {
                                    if ui
                                        .link(format!("{} Open file", egui_phosphor::regular::FILE))
                                        .on_hover_text(url)
                                        .clicked()
                                    {
                                        msgs.push(ResponsesMsg::OpenFile(url.to_string()));
                                    }
                                }
                                None => {
                                    ui.label(entry.display_value());
                                }
                            }
                            ui.end_row();
                        }
                    });
            });
            let busy = model.deleting.as_deref() == Some(applicant.as_str());
            if let Some(action) = delete_controls(ui, &model.pending_delete, applicant, !busy) {
                msgs.push(ResponsesMsg::Delete(applicant.clone(), action));
            }
        });
    });
}
