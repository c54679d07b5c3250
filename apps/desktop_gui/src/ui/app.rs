//! App shell: connect/reset controls, the read-only info fields and the cube
//! canvas. All user-facing strings are Hungarian.

use std::sync::Arc;

use crossbeam_channel::{Receiver, Sender};
use cube_core::DisplayUpdate;
use serde::{Deserialize, Serialize};
use viewer::OrientationAnimator;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::controller::orchestration::dispatch_backend_command;
use crate::ui::cube_canvas;
use crate::ui::player::GuiPlayer;

pub const SETTINGS_STORAGE_KEY: &str = "kocka_hangszer_settings";

const PLACEHOLDER: &str = "- n/a -";
const LABEL_CONNECT: &str = "Csatlakozás";
const LABEL_DISCONNECT: &str = "Lecsatlakozás";
const LABEL_RESET: &str = "Alaphelyzet";
const CONNECT_FAILED_ALERT: &str = "Sikertelen csatlakozás! Próbáld újra.";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersistedSettings {
    pub manual_mac: String,
}

pub struct KockaApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    player: Arc<GuiPlayer>,
    animator: OrientationAnimator,

    connected: bool,
    status: String,
    manual_mac: String,
    device_name: Option<String>,
    device_mac: Option<String>,
    hardware_name: Option<String>,
    battery: Option<String>,
    skew: Option<String>,
}

impl KockaApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        player: Arc<GuiPlayer>,
        settings: Option<PersistedSettings>,
    ) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            player,
            animator: OrientationAnimator::new(),
            connected: false,
            status: String::new(),
            manual_mac: settings.map(|s| s.manual_mac).unwrap_or_default(),
            device_name: None,
            device_mac: None,
            hardware_name: None,
            battery: None,
            skew: None,
        }
    }

    fn apply_display_update(&mut self, update: DisplayUpdate) {
        match update {
            DisplayUpdate::Connected {
                device_name,
                device_mac,
            } => {
                self.connected = true;
                self.device_name = Some(device_name);
                self.device_mac = Some(device_mac);
            }
            DisplayUpdate::ConnectFailed { message } => {
                self.connected = false;
                self.status = message;
                rfd::MessageDialog::new()
                    .set_level(rfd::MessageLevel::Error)
                    .set_title("Kocka hangszer")
                    .set_description(CONNECT_FAILED_ALERT)
                    .show();
            }
            DisplayUpdate::SessionClosed => {
                self.connected = false;
            }
            DisplayUpdate::Disconnected => {
                self.connected = false;
                self.device_name = None;
                self.device_mac = None;
                self.hardware_name = None;
                self.battery = None;
                self.skew = None;
            }
            DisplayUpdate::HardwareName(name) => {
                self.hardware_name = name;
            }
            DisplayUpdate::Battery(level) => {
                self.battery = Some(format_battery(level));
            }
            DisplayUpdate::Skew(skew) => {
                self.skew = Some(format_skew(skew));
            }
        }
    }

    fn drain_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Display(update) => self.apply_display_update(update),
                UiEvent::Info(message) => self.status = message,
            }
        }
    }

    fn info_field(ui: &mut egui::Ui, label: &str, value: &Option<String>) {
        ui.label(label);
        let mut text = display_or_placeholder(value).to_string();
        ui.add(egui::TextEdit::singleline(&mut text).interactive(false));
        ui.end_row();
    }
}

impl eframe::App for KockaApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_ui_events();
        self.animator.tick(self.player.as_ref());

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let connect_label = if self.connected {
                    LABEL_DISCONNECT
                } else {
                    LABEL_CONNECT
                };
                if ui.button(connect_label).clicked() {
                    let manual_mac = if self.manual_mac.trim().is_empty() {
                        None
                    } else {
                        Some(self.manual_mac.trim().to_string())
                    };
                    dispatch_backend_command(
                        &self.cmd_tx,
                        BackendCommand::ToggleConnection { manual_mac },
                        &mut self.status,
                    );
                }
                if ui.button(LABEL_RESET).clicked() {
                    dispatch_backend_command(
                        &self.cmd_tx,
                        BackendCommand::ResetState,
                        &mut self.status,
                    );
                }
                ui.separator();
                ui.label("MAC cím kézi megadása:");
                ui.add(
                    egui::TextEdit::singleline(&mut self.manual_mac)
                        .hint_text("pl. AB:12:34:5F:70:BE")
                        .desired_width(160.0),
                );
            });
        });

        egui::SidePanel::right("info")
            .resizable(false)
            .default_width(260.0)
            .show(ctx, |ui| {
                ui.heading("Kocka adatok");
                egui::Grid::new("info_grid").num_columns(2).show(ui, |ui| {
                    Self::info_field(ui, "Eszköz neve", &self.device_name);
                    Self::info_field(ui, "MAC cím", &self.device_mac);
                    Self::info_field(ui, "Hardver neve", &self.hardware_name);
                    Self::info_field(ui, "Akkumulátor", &self.battery);
                    Self::info_field(ui, "Időeltérés", &self.skew);
                });
                if !self.status.is_empty() {
                    ui.separator();
                    ui.label(&self.status);
                }
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            let rect = ui.available_rect_before_wrap();
            cube_canvas::draw(ui.painter(), rect, self.player.orientation());

            let moves = self.player.displayed_moves();
            if !moves.is_empty() {
                let recent = moves.iter().rev().take(24).rev().cloned();
                let line = recent.collect::<Vec<_>>().join(" ");
                ui.with_layout(egui::Layout::bottom_up(egui::Align::Center), |ui| {
                    ui.label(egui::RichText::new(line).monospace());
                });
            }
        });
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        let settings = PersistedSettings {
            manual_mac: self.manual_mac.clone(),
        };
        if let Ok(text) = serde_json::to_string(&settings) {
            storage.set_string(SETTINGS_STORAGE_KEY, text);
        }
    }
}

fn display_or_placeholder(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or(PLACEHOLDER)
}

fn format_battery(level: u8) -> String {
    format!("{level}%")
}

fn format_skew(skew: f64) -> String {
    format!("{skew}%")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_values_fall_back_to_the_placeholder() {
        assert_eq!(display_or_placeholder(&None), "- n/a -");
        assert_eq!(
            display_or_placeholder(&Some("GAN356i".to_string())),
            "GAN356i"
        );
    }

    #[test]
    fn battery_and_skew_render_as_percentages() {
        assert_eq!(format_battery(64), "64%");
        assert_eq!(format_skew(0.125), "0.125%");
        assert_eq!(format_skew(-1.5), "-1.5%");
    }
}
