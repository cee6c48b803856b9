// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Freddie Admin contributors

//! Top-level egui application shell for the admin dashboard.
//! Handles layout, the context pickers, and wiring to the API worker pool.

pub mod components;

use std::sync::Arc;
use std::time::Duration;

use eframe::egui;
use tracing::{debug, warn};

use crate::api::{ApiClient, HttpTransport};
use crate::config::AdminConfig;
use crate::mvu::{self, AppModel, Command, Msg, Tab};
use crate::ui::components::{identities, jobs, managers, responses, templates};

/// Stateful egui application for administering managers, jobs, templates, forms and responses.
pub struct FreddieAdminApp {
    model: AppModel,
    inbox: Vec<Msg>,
    cmd_tx: crossbeam_channel::Sender<Command>,
    msg_rx: crossbeam_channel::Receiver<Msg>,
}

impl FreddieAdminApp {
    /// Spawn `config.worker_threads` API workers sharing one client.
    pub fn new(config: &AdminConfig, client: ApiClient<HttpTransport>) -> Self {
        let (cmd_tx, cmd_rx) = crossbeam_channel::unbounded::<Command>();
        let (msg_tx, msg_rx) = crossbeam_channel::unbounded::<Msg>();

        let client = Arc::new(client);
        for worker in 0..config.worker_threads.max(1) {
            let cmd_rx = cmd_rx.clone();
            let msg_tx = msg_tx.clone();
            let client = Arc::clone(&client);
            std::thread::spawn(move || {
                debug!(worker, "api worker started");
                for cmd in cmd_rx.iter() {
                    let msg = mvu::run_command(client.as_ref(), cmd);
                    if msg_tx.send(msg).is_err() {
                        warn!(worker, "ui channel closed, dropping result");
                        break;
                    }
                }
            });
        }

        Self {
            model: AppModel::with_page_size(config.responses_page_size),
            inbox: vec![Msg::Started],
            cmd_tx,
            msg_rx,
        }
    }
}

impl eframe::App for FreddieAdminApp {
    /// Drain worker results and run the update loop; called before every [`Self::ui`].
    fn logic(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ensure_spacing(ctx);

        while let Ok(msg) = self.msg_rx.try_recv() {
            self.model.pending_commands = self.model.pending_commands.saturating_sub(1);
            self.inbox.push(msg);
        }

        for msg in std::mem::take(&mut self.inbox) {
            let mut commands = Vec::new();
            mvu::update(&mut self.model, msg, &mut commands);
            for cmd in commands {
                let label = cmd.label();
                if self.cmd_tx.send(cmd).is_ok() {
                    self.model.pending_commands += 1;
                } else {
                    warn!(command = label, "worker pool unavailable");
                }
            }
        }

        // Results arrive without user input.
        if self.model.pending_commands > 0 {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }

    /// Render the top bar, status bar and the active tab.
    fn ui(&mut self, ui: &mut egui::Ui, _frame: &mut eframe::Frame) {
        let ctx = ui.ctx().clone();

        egui::Panel::top("top_bar").show_inside(ui, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.heading("Freddie Admin");
                ui.separator();
                self.render_tabs(ui);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.add_space(2.0);
                    egui::widgets::global_theme_preference_switch(ui);
                });
            });
            ui.add_space(4.0);
            self.render_context_bar(ui);
            ui.add_space(4.0);
        });

        self.render_error_modal(&ctx);

        egui::Panel::bottom("status_panel")
            .resizable(false)
            .show_inside(ui, |ui| {
                self.render_status(ui);
            });

        egui::CentralPanel::default().show_inside(ui, |ui| {
            ui.add_space(8.0);
            egui::ScrollArea::vertical().show(ui, |ui| {
                self.render_active_tab(ui);
            });
        });

        // Messages emitted by this frame's widgets are handled in the next `logic` pass.
        if !self.inbox.is_empty() {
            ctx.request_repaint();
        }
    }
}

impl FreddieAdminApp {
    fn ensure_spacing(&self, ctx: &egui::Context) {
        ctx.global_style_mut(|style| {
            style.spacing.item_spacing = egui::vec2(6.0, 6.0);
        });
    }

    fn render_tabs(&mut self, ui: &mut egui::Ui) {
        for tab in Tab::ALL {
            let button = egui::Button::new(tab.label()).selected(self.model.tab == tab);
            if ui.add(button).clicked() {
                self.inbox.push(Msg::SetTab(tab));
            }
        }
    }

    /// Manager, job and form pickers; later pickers unlock once their parent is chosen.
    fn render_context_bar(&mut self, ui: &mut egui::Ui) {
        let session = &self.model.session;
        let managers: Vec<(String, String)> = self
            .model
            .managers
            .list
            .items()
            .iter()
            .map(|m| (m.id.clone(), m.full_name.clone()))
            .collect();
        let jobs: Vec<(String, String)> = self
            .model
            .jobs
            .list
            .items()
            .iter()
            .map(|j| (j.id.clone(), j.title.clone()))
            .collect();
        let forms: Vec<(String, String)> = self
            .model
            .forms
            .list
            .items()
            .iter()
            .filter_map(|f| f.id.clone().map(|id| (id, f.title.clone())))
            .collect();

        let mut picked = Vec::new();
        ui.horizontal(|ui| {
            if let Some(choice) =
                context_picker(ui, "manager", "Manager", session.manager_id(), &managers, true)
            {
                picked.push(Msg::SelectManager(choice));
            }
            ui.separator();
            if let Some(choice) = context_picker(
                ui,
                "job",
                "Job",
                session.job_id(),
                &jobs,
                session.manager_id().is_some(),
            ) {
                picked.push(Msg::SelectJob(choice));
            }
            ui.separator();
            if let Some(choice) = context_picker(
                ui,
                "form",
                "Form",
                session.form_id(),
                &forms,
                session.job_id().is_some(),
            ) {
                picked.push(Msg::SelectForm(choice));
            }
        });
        self.inbox.extend(picked);
    }

    fn render_active_tab(&mut self, ui: &mut egui::Ui) {
        let session = &self.model.session;
        match self.model.tab {
            Tab::Managers => {
                let msgs = managers::view(ui, &self.model.managers, session.manager_id());
                self.inbox.extend(msgs.into_iter().map(Msg::Managers));
            }
            Tab::Identities => {
                let msgs = identities::view(ui, &self.model.identities);
                self.inbox.extend(msgs.into_iter().map(Msg::Identities));
            }
            Tab::Jobs => {
                let msgs = jobs::view(ui, &self.model.jobs, session.job_id());
                self.inbox.extend(msgs.into_iter().map(Msg::Jobs));
            }
            Tab::Templates => {
                let msgs = templates::view(ui, &self.model.templates, None);
                self.inbox.extend(msgs.into_iter().map(Msg::Templates));
            }
            Tab::Forms => {
                let msgs = templates::view(ui, &self.model.forms, session.form_id());
                self.inbox.extend(msgs.into_iter().map(Msg::Forms));
            }
            Tab::Responses => {
                let msgs = responses::view(ui, &self.model.responses);
                self.inbox.extend(msgs.into_iter().map(Msg::Responses));
            }
        }
    }

    /// Render a simple modal window for error messages.
    fn render_error_modal(&mut self, ctx: &egui::Context) {
        if let Some(message) = self.model.error.clone() {
            egui::Window::new("Error")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
                .show(ctx, |ui| {
                    ui.label(message);
                    ui.add_space(8.0);
                    if ui.button("OK").clicked() {
                        self.inbox.push(Msg::DismissError);
                    }
                });
        }
    }

    /// Render latest status message, with a spinner while requests are in flight.
    fn render_status(&self, ui: &mut egui::Ui) {
        let pending = self.model.pending_commands;
        if self.model.status.is_none() && pending == 0 {
            return;
        }
        ui.horizontal(|ui| {
            if let Some(text) = &self.model.status {
                ui.label(egui::RichText::new(text).color(egui::Color32::from_gray(68)));
            }
            if pending > 0 {
                ui.add(egui::Spinner::new().size(14.0))
                    .on_hover_text(format!("{pending} request(s) in flight"));
            }
        });
    }
}

/// Combo box over `(id, label)` pairs; returns the new choice when it changed.
fn context_picker(
    ui: &mut egui::Ui,
    id_salt: &str,
    label: &str,
    selected: Option<&str>,
    options: &[(String, String)],
    enabled: bool,
) -> Option<Option<String>> {
    let current = selected.map(str::to_owned);
    let mut choice = current.clone();
    let selected_text = selected
        .and_then(|id| options.iter().find(|(option, _)| option == id))
        .map(|(_, name)| name.as_str())
        .unwrap_or("None");

    ui.label(label);
    ui.add_enabled_ui(enabled, |ui| {
        egui::ComboBox::from_id_salt(id_salt)
            .selected_text(selected_text)
            .width(180.0)
            .show_ui(ui, |ui| {
                ui.selectable_value(&mut choice, None, "None");
                for (id, name) in options {
                    ui.selectable_value(&mut choice, Some(id.clone()), name);
                }
            });
    });

    (choice != current).then_some(choice)
}
