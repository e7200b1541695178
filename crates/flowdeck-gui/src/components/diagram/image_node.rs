//! Image node renderer: a framed image loaded from a URI.

use eframe::egui;
use flowdeck_core::NodeProps;

use super::label;
use super::rectangular_node::{content_rect, draw_chrome, LABEL_FONT_SIZE};
use super::style_resolver::{ComputedNodeStyle, StyleResolver};
use crate::theme::to_egui_color;

const LABEL_STRIP: f32 = 18.0;

#[allow(clippy::too_many_arguments)]
pub fn draw(
    ui: &egui::Ui,
    painter: &egui::Painter,
    rect: egui::Rect,
    props: &NodeProps<'_>,
    uri: &str,
    computed: &ComputedNodeStyle,
    resolver: &StyleResolver,
    drop_hint: bool,
    zoom: f32,
) {
    draw_chrome(painter, rect, props, computed, resolver, drop_hint, zoom);

    let content = content_rect(rect, computed, zoom);
    let mut image_rect = content;
    if props.data.label.is_some() {
        image_rect.max.y = (content.max.y - LABEL_STRIP * zoom).max(content.min.y);
    }

    if image_rect.height() > 1.0 && image_rect.width() > 1.0 {
        egui::Image::new(uri)
            .corner_radius(computed.border_radius * zoom * 0.5)
            .tint(egui::Color32::WHITE.gamma_multiply(computed.opacity))
            .paint_at(ui, image_rect);
    }

    if let Some(node_label) = &props.data.label {
        label::draw_label(
            ui,
            painter,
            egui::pos2(content.center().x, content.max.y),
            egui::Align2::CENTER_BOTTOM,
            node_label,
            to_egui_color(computed.text_color),
            LABEL_FONT_SIZE,
            computed.opacity,
            zoom,
        );
    }
}
