//! Workbench navigation bar.
//!
//! App title, current diagram name and the burger menu. The menu body is
//! composed through the extension points: the container slot wraps the
//! content, built-in entries render first, then the entry slot appends
//! whatever plugins contributed.

pub mod extension_points;

use eframe::egui;
use egui_phosphor::regular as ph;
use flowdeck_events::{Event, EventBus};
use flowdeck_extensions::ExtensionRegistry;

use crate::theme::spacing;
use extension_points::{NavbarMenuProps, NAVBAR_MENU_CONTAINER, NAVBAR_MENU_ENTRY};

pub fn ui(
    ui: &mut egui::Ui,
    registry: &ExtensionRegistry,
    event_bus: &EventBus,
    diagram_name: &str,
) {
    ui.horizontal(|ui| {
        ui.label(
            egui::RichText::new(ph::FLOW_ARROW)
                .size(spacing::ICON_SIZE)
                .color(ui.visuals().selection.bg_fill),
        );
        ui.label(egui::RichText::new("Flowdeck").strong());
        ui.separator();
        ui.label(diagram_name);

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.menu_button(ph::LIST, |ui| {
                menu_contents(ui, registry, event_bus, diagram_name);
            });
        });
    });
}

fn menu_contents(
    ui: &mut egui::Ui,
    registry: &ExtensionRegistry,
    event_bus: &EventBus,
    diagram_name: &str,
) {
    let container = registry.resolve_container(&NAVBAR_MENU_CONTAINER);
    let entry = registry.resolve(&NAVBAR_MENU_ENTRY);

    let mut container_props = NavbarMenuProps {
        diagram_name: diagram_name.to_string(),
    };
    let mut entry_props = NavbarMenuProps {
        diagram_name: diagram_name.to_string(),
    };

    container.show(ui, &mut container_props, |ui| {
        if ui.button("About Flowdeck").clicked() {
            event_bus.publish(Event::AboutRequested);
            ui.close();
        }
        if ui.button("Preferences").clicked() {
            event_bus.publish(Event::PreferencesRequested);
            ui.close();
        }
        ui.separator();
        if ui.button("Quit").clicked() {
            event_bus.publish(Event::QuitRequested);
            ui.close();
        }
        entry.show(ui, &mut entry_props);
    });
}
