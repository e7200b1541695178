//! The rectangular node renderer.
//!
//! Draws the node frame from its computed style, then the centered label.
//! The frame chrome (fill, border, selection outline, drop highlight and
//! connection anchors) is shared with the other node variants.

use eframe::egui;
use flowdeck_core::{LineStyle, NodeProps};

use super::handles;
use super::label;
use super::style_resolver::{ComputedNodeStyle, StyleResolver};
use crate::theme::to_egui_color;

pub const LABEL_FONT_SIZE: f32 = 13.0;

#[allow(clippy::too_many_arguments)]
pub fn draw(
    ui: &egui::Ui,
    painter: &egui::Painter,
    rect: egui::Rect,
    props: &NodeProps<'_>,
    computed: &ComputedNodeStyle,
    resolver: &StyleResolver,
    drop_hint: bool,
    zoom: f32,
) {
    draw_chrome(painter, rect, props, computed, resolver, drop_hint, zoom);

    if let Some(node_label) = &props.data.label {
        label::draw_label(
            ui,
            painter,
            rect.center(),
            egui::Align2::CENTER_CENTER,
            node_label,
            to_egui_color(computed.text_color),
            LABEL_FONT_SIZE,
            computed.opacity,
            zoom,
        );
    }
}

/// Frame, selection outline, drop highlight and connection anchors shared by
/// every node variant.
pub(super) fn draw_chrome(
    painter: &egui::Painter,
    rect: egui::Rect,
    props: &NodeProps<'_>,
    computed: &ComputedNodeStyle,
    resolver: &StyleResolver,
    drop_hint: bool,
    zoom: f32,
) {
    let palette = resolver.palette();
    let opacity = computed.opacity;
    let radius = computed.border_radius * zoom;
    let accent = to_egui_color(resolver.accent());

    let shadow_offset = egui::vec2(0.0, 2.0 * zoom);
    painter.rect_filled(
        rect.translate(shadow_offset),
        radius,
        to_egui_color(palette.shadow).gamma_multiply(opacity),
    );
    painter.rect_filled(
        rect,
        radius,
        to_egui_color(computed.background).gamma_multiply(opacity),
    );

    let border = egui::Stroke::new(
        (computed.border_size * zoom).max(0.5),
        to_egui_color(computed.border_color).gamma_multiply(opacity),
    );
    match computed.border_style {
        LineStyle::Solid => painter.rect_stroke(rect, radius, border, egui::StrokeKind::Middle),
        LineStyle::Dashed => draw_dashed_rect(painter, rect, border, 6.0 * zoom, 4.0 * zoom),
        LineStyle::Dotted => draw_dashed_rect(painter, rect, border, 1.5 * zoom, 3.0 * zoom),
    }

    if let Some(outline) = computed.outline {
        painter.rect_stroke(
            rect.expand(2.0),
            radius,
            egui::Stroke::new(1.0, to_egui_color(outline)),
            egui::StrokeKind::Outside,
        );
    }
    if drop_hint {
        painter.rect_stroke(
            rect.expand(4.0),
            radius,
            egui::Stroke::new(2.0, accent),
            egui::StrokeKind::Outside,
        );
    }

    handles::draw_anchors(
        painter,
        rect,
        props.is_connectable,
        accent,
        &palette,
        opacity,
        zoom,
    );
}

// Dashed and dotted borders follow the rect perimeter without the corner
// radius; dashing a rounded path is not worth the path plumbing.
fn draw_dashed_rect(
    painter: &egui::Painter,
    rect: egui::Rect,
    stroke: egui::Stroke,
    dash: f32,
    gap: f32,
) {
    let corners = [
        rect.left_top(),
        rect.right_top(),
        rect.right_bottom(),
        rect.left_bottom(),
        rect.left_top(),
    ];
    painter.extend(egui::Shape::dashed_line(&corners, stroke, dash, gap));
}

/// Inner rect the variant content may draw into.
pub(super) fn content_rect(rect: egui::Rect, computed: &ComputedNodeStyle, zoom: f32) -> egui::Rect {
    rect.shrink(computed.padding * zoom)
}
