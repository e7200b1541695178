//! Contextual action palette floating above the selected node.

use eframe::egui;
use egui_phosphor::regular as ph;
use flowdeck_core::NodeData;

use crate::theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteAction {
    EditLabel,
    ToggleFade,
    Delete,
}

/// Label editing needs a label to edit.
pub fn edit_enabled(data: &NodeData) -> bool {
    data.label.is_some()
}

fn hint(response: egui::Response, tooltips: bool, text: &str) -> egui::Response {
    if tooltips {
        response.on_hover_text(text)
    } else {
        response
    }
}

/// Show the palette above `node_rect` and report the clicked action.
pub fn show(
    ctx: &egui::Context,
    id: egui::Id,
    node_rect: egui::Rect,
    data: &NodeData,
    accent: egui::Color32,
    tooltips: bool,
) -> Option<PaletteAction> {
    let mut action = None;
    egui::Area::new(id)
        .fixed_pos(node_rect.center_top() + egui::vec2(0.0, -8.0))
        .pivot(egui::Align2::CENTER_BOTTOM)
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style())
                .stroke(egui::Stroke::new(1.0, accent))
                .show(ui, |ui| {
                    ui.horizontal(|ui| {
                        let edit = hint(
                            ui.add_enabled(
                                edit_enabled(data),
                                theme::icon_button(ph::PENCIL_SIMPLE),
                            ),
                            tooltips,
                            "Edit label",
                        );
                        if edit.clicked() {
                            action = Some(PaletteAction::EditLabel);
                        }

                        let fade_icon = if data.faded { ph::EYE } else { ph::EYE_SLASH };
                        let fade_hint = if data.faded { "Unfade" } else { "Fade" };
                        if hint(ui.add(theme::icon_button(fade_icon)), tooltips, fade_hint)
                            .clicked()
                        {
                            action = Some(PaletteAction::ToggleFade);
                        }

                        if hint(ui.add(theme::icon_button(ph::TRASH)), tooltips, "Delete")
                            .clicked()
                        {
                            action = Some(PaletteAction::Delete);
                        }
                    });
                });
        });
    action
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowdeck_core::Label;

    #[test]
    fn editing_is_only_offered_when_a_label_exists() {
        let mut data = NodeData::default();
        assert!(!edit_enabled(&data));

        data.label = Some(Label::new("l1", "Order"));
        assert!(edit_enabled(&data));
    }
}
