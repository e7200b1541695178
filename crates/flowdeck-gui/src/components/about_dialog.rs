use eframe::egui;
use egui_phosphor::regular as ph;

pub struct AboutDialog {
    pub is_open: bool,
}

impl AboutDialog {
    pub fn new() -> Self {
        Self { is_open: false }
    }

    pub fn ui(&mut self, ctx: &egui::Context, accent: egui::Color32) {
        let mut open = self.is_open;
        if !open {
            return;
        }

        egui::Window::new("About Flowdeck")
            .open(&mut open)
            .resizable(false)
            .collapsible(false)
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.add_space(8.0);
                    ui.label(egui::RichText::new(ph::FLOW_ARROW).size(40.0).color(accent));
                    ui.heading("Flowdeck");
                    ui.label(format!("Version {}", env!("CARGO_PKG_VERSION")));
                    ui.add_space(8.0);
                    ui.label("A node-and-edge diagram workbench.");
                    ui.label(
                        egui::RichText::new("Built with egui and eframe.")
                            .small()
                            .color(ui.visuals().weak_text_color()),
                    );
                    ui.add_space(8.0);
                });
            });

        self.is_open = open;
    }
}

impl Default for AboutDialog {
    fn default() -> Self {
        Self::new()
    }
}
