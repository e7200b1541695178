//! Drag-and-drop plumbing between the element sidebar and the canvas.
//!
//! Sidebar entries put an [`ElementTemplate`] into egui's drag-and-drop
//! payload; node surfaces and the canvas background read it back out. The
//! acceptance rule lives here so drag-over highlighting and the actual drop
//! agree on what is allowed.

use eframe::egui;
use flowdeck_core::NodeVariant;
use flowdeck_events::ElementTemplate;

/// Whether a template may land on the given surface. `None` is the canvas
/// background.
pub fn accepts(template: ElementTemplate, target: Option<&NodeVariant>) -> bool {
    match target {
        None => matches!(
            template,
            ElementTemplate::Rectangle | ElementTemplate::Image | ElementTemplate::List
        ),
        Some(NodeVariant::List { .. }) => template == ElementTemplate::Item,
        Some(_) => false,
    }
}

/// Wrap a sidebar entry so dragging it carries the template as payload.
pub fn drag_source<R>(
    ui: &mut egui::Ui,
    id: egui::Id,
    template: ElementTemplate,
    add_contents: impl FnOnce(&mut egui::Ui) -> R,
) -> egui::InnerResponse<R> {
    ui.dnd_drag_source(id, template, add_contents)
}

/// The template hovering over this widget, if a sidebar drag is in flight.
pub fn hovered_template(response: &egui::Response) -> Option<ElementTemplate> {
    response
        .dnd_hover_payload::<ElementTemplate>()
        .map(|payload| *payload)
}

/// The template released over this widget this frame.
pub fn released_template(response: &egui::Response) -> Option<ElementTemplate> {
    response
        .dnd_release_payload::<ElementTemplate>()
        .map(|payload| *payload)
}

/// True while any template drag is in flight.
pub fn drag_in_flight(ctx: &egui::Context) -> bool {
    egui::DragAndDrop::has_payload_of_type::<ElementTemplate>(ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowdeck_core::Label;

    #[test]
    fn background_takes_node_templates_but_not_items() {
        assert!(accepts(ElementTemplate::Rectangle, None));
        assert!(accepts(ElementTemplate::Image, None));
        assert!(accepts(ElementTemplate::List, None));
        assert!(!accepts(ElementTemplate::Item, None));
    }

    #[test]
    fn list_nodes_take_items_only() {
        let list = NodeVariant::List {
            items: vec![Label::new("i1", "first")],
        };
        assert!(accepts(ElementTemplate::Item, Some(&list)));
        assert!(!accepts(ElementTemplate::Rectangle, Some(&list)));
    }

    #[test]
    fn plain_nodes_take_nothing() {
        let rect = NodeVariant::Rectangle;
        assert!(!accepts(ElementTemplate::Item, Some(&rect)));
        assert!(!accepts(ElementTemplate::Rectangle, Some(&rect)));
    }
}
