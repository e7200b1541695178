//! Connection anchors drawn on a node's left and right edges.

use eframe::egui;

use super::style_resolver::DiagramPalette;
use crate::theme::to_egui_color;

pub const ANCHOR_RADIUS: f32 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorKind {
    Source,
    Target,
}

/// Screen position of an anchor on an already-transformed node rect.
pub fn anchor_screen_position(kind: AnchorKind, rect: egui::Rect) -> egui::Pos2 {
    match kind {
        AnchorKind::Source => rect.left_center(),
        AnchorKind::Target => rect.right_center(),
    }
}

/// Paint both anchors. Enabled anchors get the accent fill; disabled anchors
/// stay muted so edges visibly cannot attach there.
pub fn draw_anchors(
    painter: &egui::Painter,
    rect: egui::Rect,
    enabled: bool,
    accent: egui::Color32,
    palette: &DiagramPalette,
    opacity: f32,
    zoom: f32,
) {
    for kind in [AnchorKind::Source, AnchorKind::Target] {
        draw_anchor(
            painter,
            anchor_screen_position(kind, rect),
            enabled,
            accent,
            palette,
            opacity,
            zoom,
        );
    }
}

fn draw_anchor(
    painter: &egui::Painter,
    center: egui::Pos2,
    enabled: bool,
    accent: egui::Color32,
    palette: &DiagramPalette,
    opacity: f32,
    zoom: f32,
) {
    let radius = ANCHOR_RADIUS * zoom;
    let fill = if enabled {
        accent
    } else {
        to_egui_color(palette.node_border.with_alpha(90))
    };
    painter.circle_filled(center, radius, fill.gamma_multiply(opacity));
    painter.circle_stroke(
        center,
        radius,
        egui::Stroke::new(
            1.0,
            to_egui_color(palette.background).gamma_multiply(opacity),
        ),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchors_project_to_the_edge_midpoints() {
        let rect = egui::Rect::from_min_max(egui::pos2(10.0, 20.0), egui::pos2(110.0, 60.0));
        assert_eq!(
            anchor_screen_position(AnchorKind::Source, rect),
            egui::pos2(10.0, 40.0)
        );
        assert_eq!(
            anchor_screen_position(AnchorKind::Target, rect),
            egui::pos2(110.0, 40.0)
        );
    }
}
