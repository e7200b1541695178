use eframe::egui;
use flowdeck_core::{LabelId, NodeId};
use flowdeck_events::{Event, EventBus};

use crate::theme;

/// Small modal for renaming a node label. Opened from the node palette's
/// pencil tool; confirms by publishing [`Event::LabelEdited`].
pub struct LabelEditDialog {
    pub is_open: bool,
    node: Option<NodeId>,
    label: Option<LabelId>,
    text: String,
    wants_focus: bool,
}

impl LabelEditDialog {
    pub fn new() -> Self {
        Self {
            is_open: false,
            node: None,
            label: None,
            text: String::new(),
            wants_focus: false,
        }
    }

    pub fn open_for(&mut self, node: NodeId, label: LabelId, current_text: &str) {
        self.node = Some(node);
        self.label = Some(label);
        self.text = current_text.to_string();
        self.wants_focus = true;
        self.is_open = true;
    }

    pub fn ui(&mut self, ctx: &egui::Context, event_bus: &EventBus) {
        if !self.is_open {
            return;
        }

        let mut should_close = false;
        egui::Window::new("Edit Label")
            .resizable(false)
            .collapsible(false)
            .show(ctx, |ui| {
                let response = ui.text_edit_singleline(&mut self.text);
                if self.wants_focus {
                    response.request_focus();
                    self.wants_focus = false;
                }
                let trimmed = self.text.trim();
                let can_save = !trimmed.is_empty();
                let submitted = can_save
                    && response.lost_focus()
                    && ui.input(|i| i.key_pressed(egui::Key::Enter));

                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    let save = theme::primary_button(ui, "Save");
                    if ui.add_enabled(can_save, save).clicked() || submitted {
                        if let (Some(node), Some(label)) = (self.node.clone(), self.label.clone()) {
                            event_bus.publish(Event::LabelEdited {
                                node,
                                label,
                                text: self.text.trim().to_string(),
                            });
                        }
                        should_close = true;
                    }
                    if ui.button("Cancel").clicked()
                        || ui.input(|i| i.key_pressed(egui::Key::Escape))
                    {
                        should_close = true;
                    }
                });
            });

        if should_close {
            self.is_open = false;
        }
    }
}

impl Default for LabelEditDialog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opening_primes_the_field_with_the_current_text() {
        let mut dialog = LabelEditDialog::new();
        dialog.open_for(NodeId::from("n1"), LabelId::from("l1"), "Start");
        assert!(dialog.is_open);
        assert_eq!(dialog.text, "Start");
        assert!(dialog.wants_focus);
    }
}
