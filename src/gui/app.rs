//! Monitor window: start/stop controls, scrolling log, chart or presence indicator.

use std::time::Instant;

use egui::{Color32, RichText};
use egui_phosphor::regular::{PLAY, STOP};
use egui_plot::{Line, Plot, PlotPoints};

use crate::config::MonitorConfig;
use crate::display::{LogKind, MonitorKind, MonitorState, PollTimer};
use crate::presence::Presence;
use crate::session::Session;

use super::theme;

/// Height reserved for the log when a chart or indicator sits below it.
const LOG_HEIGHT: f32 = 180.0;
const INDICATOR_DIAMETER: f32 = 120.0;

pub struct MonitorApp {
    kind: MonitorKind,
    session: Session,
    state: MonitorState,
    timer: PollTimer,
}

impl MonitorApp {
    pub fn new(kind: MonitorKind, cfg: MonitorConfig) -> Self {
        let state = MonitorState::new(kind, &cfg);
        let timer = PollTimer::new(cfg.poll_interval());
        Self {
            kind,
            session: Session::new(cfg),
            state,
            timer,
        }
    }

    pub fn state(&self) -> &MonitorState {
        &self.state
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Start the receiver; bind failures go to the visible log.
    pub fn start(&mut self) {
        if self.session.is_running() {
            return;
        }
        match self.session.start() {
            Ok(addr) => self
                .state
                .note(LogKind::Status, format!("Server started on {addr}")),
            Err(e) => {
                log::error!("{}", e);
                self.state.note(LogKind::Error, e.to_string());
            }
        }
    }

    pub fn stop(&mut self) {
        if !self.session.is_running() {
            return;
        }
        self.session.stop();
        self.state.note(LogKind::Status, "Server stopped.");
    }

    /// Drain the queue if the refresh period has elapsed. Returns the number of datagrams applied.
    pub fn refresh(&mut self, now: Instant) -> usize {
        if !self.timer.due(now) {
            return 0;
        }
        let events = self.session.drain();
        self.state.ingest(events)
    }

    fn ui_controls(&mut self, ui: &mut egui::Ui) {
        let running = self.session.is_running();
        ui.horizontal(|ui| {
            if ui
                .add_enabled(!running, egui::Button::new(format!("{PLAY} Start server")))
                .clicked()
            {
                self.start();
            }
            if ui
                .add_enabled(running, egui::Button::new(format!("{STOP} Stop server")))
                .clicked()
            {
                self.stop();
            }
            let addr = self.session.config().bind_addr();
            if running {
                ui.label(RichText::new(format!("Listening on {addr}")).color(theme::ACCENT));
            } else {
                ui.label(RichText::new(format!("Stopped ({addr})")).color(theme::STATUS_TEXT));
            }
        });
    }

    fn ui_log(&self, ui: &mut egui::Ui, max_height: f32) {
        egui::Frame::new()
            .fill(theme::LOG_BACKGROUND)
            .inner_margin(8.0)
            .show(ui, |ui| {
                egui::ScrollArea::vertical()
                    .id_salt("message_log")
                    .stick_to_bottom(true)
                    .auto_shrink([false, false])
                    .max_height(max_height)
                    .show(ui, |ui| {
                        for line in self.state.log_lines() {
                            let color = match line.kind {
                                LogKind::Data => theme::LOG_TEXT,
                                LogKind::Status => theme::STATUS_TEXT,
                                LogKind::Error => theme::ERROR_TEXT,
                            };
                            ui.label(
                                RichText::new(format!("[{}] {}", line.stamp, line.text))
                                    .monospace()
                                    .color(color),
                            );
                        }
                    });
            });
    }

    fn ui_chart(&self, ui: &mut egui::Ui) {
        let Some(window) = self.state.chart() else {
            return;
        };
        let heading = match window.latest() {
            Some(v) => format!("Sensor values, last {} packets (latest {v})", window.capacity()),
            None => format!("Sensor values, last {} packets", window.capacity()),
        };
        ui.label(RichText::new(heading).color(Color32::WHITE));
        Plot::new("sensor_values")
            .x_axis_label("Packets")
            .y_axis_label("Value")
            .allow_scroll(false)
            .show(ui, |plot_ui| {
                let line = Line::new("value", PlotPoints::from(window.points()))
                    .color(theme::ACCENT)
                    .width(2.0);
                plot_ui.line(line);
            });
    }

    fn ui_presence(&self, ui: &mut egui::Ui) {
        let Some(detector) = self.state.presence_detector() else {
            return;
        };
        let label = self
            .state
            .presence_label(self.session.config())
            .unwrap_or_default();
        let color = match detector.state() {
            Presence::Present => theme::PRESENT,
            Presence::Absent => theme::ABSENT,
        };
        ui.vertical_centered(|ui| {
            ui.add_space(12.0);
            let (rect, _) = ui.allocate_exact_size(
                egui::vec2(INDICATOR_DIAMETER, INDICATOR_DIAMETER),
                egui::Sense::hover(),
            );
            ui.painter()
                .circle_filled(rect.center(), INDICATOR_DIAMETER / 2.0, color);
            ui.add_space(8.0);
            ui.label(RichText::new(label).size(24.0).strong().color(color));
            if let Some(v) = detector.last_value() {
                ui.label(
                    RichText::new(format!("Last value: {v} (threshold {})", detector.threshold()))
                        .color(theme::STATUS_TEXT),
                );
            }
        });
    }
}

impl eframe::App for MonitorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.refresh(Instant::now());

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading(
                    RichText::new(self.session.config().title.as_str())
                        .strong()
                        .color(theme::ACCENT),
                );
            });
            ui.add_space(6.0);
            self.ui_controls(ui);
            ui.separator();
            self.ui_log(ui, LOG_HEIGHT);
            ui.separator();
            match self.kind {
                MonitorKind::Chart => self.ui_chart(ui),
                MonitorKind::Presence => self.ui_presence(ui),
            }
        });

        ctx.request_repaint_after(self.timer.remaining(Instant::now()));
    }
}
