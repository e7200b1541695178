use std::time::{Duration, Instant};

use crate::theme::badge;
use eframe::egui;
use egui_phosphor::regular as ph;
use sysinfo::{Pid, ProcessesToUpdate, System};

/// Bottom strip: current selection, diagram counts, process memory, theme.
pub struct StatusBar {
    system: System,
    pid: Pid,
    memory_mb: u64,
    refreshed_at: Instant,
}

/// sysinfo walks /proc on every refresh, so poll at most this often.
const REFRESH_INTERVAL: Duration = Duration::from_secs(1);

impl StatusBar {
    pub fn new() -> Self {
        let pid = Pid::from_u32(std::process::id());
        let mut system = System::new();
        system.refresh_processes(ProcessesToUpdate::Some(&[pid]), true);

        Self {
            system,
            pid,
            memory_mb: 0,
            refreshed_at: Instant::now(),
        }
    }

    fn refresh_memory(&mut self) {
        if self.refreshed_at.elapsed() < REFRESH_INTERVAL {
            return;
        }
        self.system
            .refresh_processes(ProcessesToUpdate::Some(&[self.pid]), true);
        if let Some(process) = self.system.process(self.pid) {
            self.memory_mb = process.memory() / (1024 * 1024);
        }
        self.refreshed_at = Instant::now();
    }

    pub fn ui(
        &mut self,
        ui: &mut egui::Ui,
        node_count: usize,
        edge_count: usize,
        zoom: f32,
        selection: Option<&str>,
        theme_name: &str,
    ) {
        self.refresh_memory();

        ui.horizontal(|ui| {
            match selection {
                Some(name) => {
                    ui.label(
                        egui::RichText::new(format!("{} {}", ph::CURSOR_CLICK, name))
                            .color(ui.visuals().strong_text_color()),
                    );
                }
                None => {
                    badge(ui, "Ready", egui::Color32::LIGHT_GREEN);
                }
            }

            ui.separator();
            ui.label(
                egui::RichText::new("Drop elements, drag nodes, click to select")
                    .color(ui.visuals().weak_text_color()),
            );

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                badge(
                    ui,
                    &format!("{} MB", self.memory_mb),
                    ui.visuals().window_fill,
                );
                ui.separator();
                badge(
                    ui,
                    &format!("{} nodes", node_count),
                    ui.visuals().selection.bg_fill,
                );
                badge(
                    ui,
                    &format!("{} edges", edge_count),
                    ui.visuals().selection.bg_fill,
                );
                ui.separator();
                ui.label(
                    egui::RichText::new(format!("{:.0}%", zoom * 100.0))
                        .color(ui.visuals().weak_text_color()),
                );
                ui.separator();
                ui.label(
                    egui::RichText::new(format!("{} {}", ph::PAINT_BRUSH, theme_name))
                        .color(ui.visuals().weak_text_color()),
                );
            });
        });
    }
}

impl Default for StatusBar {
    fn default() -> Self {
        Self::new()
    }
}
