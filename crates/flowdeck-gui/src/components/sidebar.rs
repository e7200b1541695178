//! Element sidebar listing the draggable templates.
//!
//! Each entry is a drag source carrying an [`ElementTemplate`] payload; the
//! canvas reads the payload back when the pointer is released over it.

use eframe::egui;
use egui_phosphor::regular as ph;
use flowdeck_events::ElementTemplate;

use crate::components::diagram::drop;
use crate::theme::{radius, spacing};

pub fn ui(ui: &mut egui::Ui) {
    ui.add_space(spacing::ITEM_SPACING);
    ui.label(
        egui::RichText::new("Elements")
            .strong()
            .size(spacing::ICON_SIZE),
    );
    ui.add_space(spacing::ITEM_SPACING);

    for template in ElementTemplate::all() {
        entry(ui, template);
        ui.add_space(spacing::ITEM_SPACING / 2.0);
    }

    ui.add_space(spacing::SECTION_SPACING);
    ui.label(
        egui::RichText::new("Drag an element onto the canvas to add it. Items only fit inside lists.")
            .small()
            .color(ui.visuals().weak_text_color()),
    );
}

fn entry(ui: &mut egui::Ui, template: ElementTemplate) {
    let id = egui::Id::new(("element_template", template));
    let inner = drop::drag_source(ui, id, template, |ui| {
        egui::Frame::new()
            .fill(ui.visuals().faint_bg_color)
            .stroke(ui.visuals().widgets.noninteractive.bg_stroke)
            .corner_radius(radius::MEDIUM)
            .inner_margin(egui::Margin::symmetric(
                spacing::BUTTON_PADDING as i8,
                (spacing::BUTTON_PADDING / 2.0) as i8,
            ))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new(icon(template)).size(spacing::ICON_SIZE));
                    ui.label(template.display_name());
                });
            });
    });
    inner.response.on_hover_cursor(egui::CursorIcon::Grab);
}

fn icon(template: ElementTemplate) -> &'static str {
    match template {
        ElementTemplate::Rectangle => ph::RECTANGLE,
        ElementTemplate::Image => ph::IMAGE,
        ElementTemplate::List => ph::LIST_DASHES,
        ElementTemplate::Item => ph::TEXT_T,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_template_has_an_icon() {
        for template in ElementTemplate::all() {
            assert!(!icon(template).is_empty());
        }
    }
}
