use crate::settings::{AppSettings, NotificationPosition, ThemeMode};
use eframe::egui;

/// Modal preferences window. Edits go to a scratch copy and only land in the
/// live settings when Apply is pressed.
pub struct PreferencesDialog {
    pub open: bool,
    temp_settings: AppSettings,
}

impl PreferencesDialog {
    pub fn new(current_settings: &AppSettings) -> Self {
        Self {
            open: false,
            temp_settings: current_settings.clone(),
        }
    }

    /// Returns true when Apply was pressed, so the shell can re-apply the
    /// theme and persist.
    pub fn show(&mut self, ctx: &egui::Context, settings: &mut AppSettings) -> bool {
        let mut open = self.open;
        if !open {
            return false;
        }

        let mut applied = false;
        let mut should_close = false;
        egui::Window::new("Preferences")
            .open(&mut open)
            .resizable(false)
            .collapsible(false)
            .show(ctx, |ui| {
                ui.heading("General");
                ui.group(|ui| {
                    ui.horizontal(|ui| {
                        ui.label("Theme:");
                        ui.radio_value(&mut self.temp_settings.theme, ThemeMode::Latte, "Latte");
                        ui.radio_value(&mut self.temp_settings.theme, ThemeMode::Frappe, "Frappé");
                        ui.radio_value(
                            &mut self.temp_settings.theme,
                            ThemeMode::Macchiato,
                            "Macchiato",
                        );
                        ui.radio_value(&mut self.temp_settings.theme, ThemeMode::Mocha, "Mocha");
                    });

                    ui.add(
                        egui::Slider::new(&mut self.temp_settings.ui_scale, 0.5..=2.0)
                            .text("UI Scale"),
                    );
                    ui.checkbox(&mut self.temp_settings.show_tooltips, "Show Tooltips");
                });

                ui.add_space(10.0);
                ui.heading("Canvas");
                ui.group(|ui| {
                    ui.checkbox(&mut self.temp_settings.canvas.show_grid, "Show Grid");
                    ui.add(
                        egui::Slider::new(&mut self.temp_settings.canvas.grid_size, 12.0..=64.0)
                            .text("Grid Size"),
                    );
                    ui.checkbox(
                        &mut self.temp_settings.canvas.show_edge_arrows,
                        "Show Edge Arrows",
                    );
                });

                ui.add_space(10.0);
                ui.heading("Notifications");
                ui.group(|ui| {
                    ui.checkbox(
                        &mut self.temp_settings.notifications.enabled,
                        "Enable Toast Notifications",
                    );

                    if self.temp_settings.notifications.enabled {
                        ui.horizontal(|ui| {
                            ui.label("Position:");
                            egui::ComboBox::from_id_salt("notif_pos")
                                .selected_text(format!(
                                    "{:?}",
                                    self.temp_settings.notifications.position
                                ))
                                .show_ui(ui, |ui| {
                                    ui.selectable_value(
                                        &mut self.temp_settings.notifications.position,
                                        NotificationPosition::TopRight,
                                        "Top Right",
                                    );
                                    ui.selectable_value(
                                        &mut self.temp_settings.notifications.position,
                                        NotificationPosition::TopLeft,
                                        "Top Left",
                                    );
                                    ui.selectable_value(
                                        &mut self.temp_settings.notifications.position,
                                        NotificationPosition::BottomRight,
                                        "Bottom Right",
                                    );
                                    ui.selectable_value(
                                        &mut self.temp_settings.notifications.position,
                                        NotificationPosition::BottomLeft,
                                        "Bottom Left",
                                    );
                                });
                        });
                        ui.checkbox(
                            &mut self.temp_settings.notifications.show_drop_feedback,
                            "Drop Feedback",
                        );
                    }
                });

                ui.add_space(20.0);
                ui.horizontal(|ui| {
                    if ui.button("Apply").clicked() {
                        *settings = self.temp_settings.clone();
                        settings.save();
                        applied = true;
                    }
                    if ui.button("Close").clicked() {
                        should_close = true;
                    }
                });
            });

        if should_close {
            open = false;
        }
        self.open = open;
        applied
    }

    pub fn sync_with_current(&mut self, settings: &AppSettings) {
        self.temp_settings = settings.clone();
    }
}
