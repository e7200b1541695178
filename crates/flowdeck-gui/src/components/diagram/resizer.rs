//! Resize affordance in a node's bottom-right corner, shown while selected.

use eframe::egui;
use flowdeck_core::{NodeId, Vec2};

pub const HANDLE_SIZE: f32 = 8.0;
pub const MIN_NODE_SIZE: Vec2 = Vec2::new(48.0, 28.0);

/// New node size implied by the pointer during a resize drag, in graph
/// units, clamped to the minimum size.
pub fn size_from_pointer(rect_min: egui::Pos2, pointer: egui::Pos2, zoom: f32) -> Vec2 {
    Vec2::new(
        ((pointer.x - rect_min.x) / zoom).max(MIN_NODE_SIZE.x),
        ((pointer.y - rect_min.y) / zoom).max(MIN_NODE_SIZE.y),
    )
}

/// Show the handle and report the implied size while it is being dragged.
pub fn show(
    ui: &mut egui::Ui,
    node_id: &NodeId,
    node_rect: egui::Rect,
    accent: egui::Color32,
    zoom: f32,
) -> Option<Vec2> {
    let side = HANDLE_SIZE * zoom.max(0.5);
    let handle_rect =
        egui::Rect::from_center_size(node_rect.right_bottom(), egui::vec2(side, side));
    let id = ui.id().with(("node_resizer", node_id));
    let response = ui
        .interact(handle_rect, id, egui::Sense::drag())
        .on_hover_cursor(egui::CursorIcon::ResizeNwSe);

    let painter = ui.painter();
    painter.rect_filled(handle_rect, 2.0, accent);
    painter.rect_stroke(
        handle_rect,
        2.0,
        egui::Stroke::new(1.0, ui.visuals().extreme_bg_color),
        egui::StrokeKind::Middle,
    );

    if response.dragged() {
        response
            .interact_pointer_pos()
            .map(|pointer| size_from_pointer(node_rect.min, pointer, zoom))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_past_the_corner_grows_the_node() {
        let size = size_from_pointer(egui::pos2(100.0, 100.0), egui::pos2(220.0, 180.0), 1.0);
        assert_eq!(size, Vec2::new(120.0, 80.0));
    }

    #[test]
    fn zoom_converts_screen_deltas_to_graph_units() {
        let size = size_from_pointer(egui::pos2(0.0, 0.0), egui::pos2(200.0, 100.0), 2.0);
        assert_eq!(size, Vec2::new(100.0, 50.0));
    }

    #[test]
    fn size_never_shrinks_below_the_minimum() {
        let size = size_from_pointer(egui::pos2(100.0, 100.0), egui::pos2(90.0, 90.0), 1.0);
        assert_eq!(size, MIN_NODE_SIZE);
    }
}
