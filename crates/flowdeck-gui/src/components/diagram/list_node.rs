//! List node renderer: header label plus item rows, compartment style.

use eframe::egui;
use flowdeck_core::{Label, NodeProps};

use super::label;
use super::rectangular_node::{content_rect, draw_chrome, LABEL_FONT_SIZE};
use super::style_resolver::{ComputedNodeStyle, StyleResolver};
use crate::theme::to_egui_color;

const HEADER_HEIGHT: f32 = 22.0;
const ROW_HEIGHT: f32 = 20.0;
const ROW_GAP: f32 = 2.0;
const ITEM_FONT_SIZE: f32 = 11.5;
const ITEM_INSET: f32 = 6.0;

pub(super) struct ListLayout {
    pub header: Option<egui::Rect>,
    pub rows: Vec<egui::Rect>,
    /// Items that no longer fit in the node.
    pub overflow: usize,
}

/// Stack the header and item rows inside the content rect; rows that no
/// longer fit are counted instead of drawn.
pub(super) fn layout(
    content: egui::Rect,
    has_header: bool,
    items: usize,
    zoom: f32,
) -> ListLayout {
    let mut cursor = content.min.y;

    let header = if has_header {
        let bottom = (cursor + HEADER_HEIGHT * zoom).min(content.max.y);
        let rect = egui::Rect::from_min_max(content.min, egui::pos2(content.max.x, bottom));
        cursor = bottom;
        Some(rect)
    } else {
        None
    };

    let mut rows = Vec::new();
    for _ in 0..items {
        let top = cursor + ROW_GAP * zoom;
        let bottom = top + ROW_HEIGHT * zoom;
        if bottom > content.max.y {
            break;
        }
        rows.push(egui::Rect::from_min_max(
            egui::pos2(content.min.x, top),
            egui::pos2(content.max.x, bottom),
        ));
        cursor = bottom;
    }

    ListLayout {
        header,
        rows,
        overflow: items - rows.len(),
    }
}

#[allow(clippy::too_many_arguments)]
pub fn draw(
    ui: &egui::Ui,
    painter: &egui::Painter,
    rect: egui::Rect,
    props: &NodeProps<'_>,
    items: &[Label],
    computed: &ComputedNodeStyle,
    resolver: &StyleResolver,
    drop_hint: bool,
    zoom: f32,
) {
    draw_chrome(painter, rect, props, computed, resolver, drop_hint, zoom);

    let palette = resolver.palette();
    let opacity = computed.opacity;
    let content = content_rect(rect, computed, zoom);
    let list = layout(content, props.data.label.is_some(), items.len(), zoom);

    if let (Some(header_rect), Some(node_label)) = (list.header, &props.data.label) {
        label::draw_label(
            ui,
            painter,
            header_rect.left_center(),
            egui::Align2::LEFT_CENTER,
            node_label,
            to_egui_color(computed.text_color),
            LABEL_FONT_SIZE,
            opacity,
            zoom,
        );
        painter.line_segment(
            [header_rect.left_bottom(), header_rect.right_bottom()],
            egui::Stroke::new(
                1.0,
                to_egui_color(computed.border_color).gamma_multiply(opacity * 0.6),
            ),
        );
    }

    for (item, row) in items.iter().zip(&list.rows) {
        painter.rect_filled(
            *row,
            2.0 * zoom,
            to_egui_color(palette.list_item_fill).gamma_multiply(opacity),
        );
        label::draw_label(
            ui,
            painter,
            egui::pos2(row.min.x + ITEM_INSET * zoom, row.center().y),
            egui::Align2::LEFT_CENTER,
            item,
            to_egui_color(computed.text_color),
            ITEM_FONT_SIZE,
            opacity,
            zoom,
        );
    }

    if list.overflow > 0 {
        painter.text(
            egui::pos2(content.max.x, content.max.y),
            egui::Align2::RIGHT_BOTTOM,
            format!("+{}", list.overflow),
            egui::FontId::proportional(ITEM_FONT_SIZE * 0.9 * zoom),
            to_egui_color(computed.text_color).gamma_multiply(opacity * 0.7),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content() -> egui::Rect {
        egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(160.0, 100.0))
    }

    #[test]
    fn header_claims_the_top_strip() {
        let list = layout(content(), true, 0, 1.0);
        let header = list.header.unwrap();
        assert_eq!(header.min.y, 0.0);
        assert_eq!(header.height(), HEADER_HEIGHT);
        assert!(list.rows.is_empty());
    }

    #[test]
    fn rows_stack_below_the_header_without_overlap() {
        let list = layout(content(), true, 3, 1.0);
        assert_eq!(list.rows.len(), 3);
        assert!(list.rows[0].min.y >= HEADER_HEIGHT);
        for pair in list.rows.windows(2) {
            assert!(pair[0].max.y <= pair[1].min.y);
        }
    }

    #[test]
    fn rows_that_do_not_fit_are_counted_as_overflow() {
        let list = layout(content(), true, 20, 1.0);
        assert!(list.rows.len() < 20);
        assert_eq!(list.overflow, 20 - list.rows.len());
        for row in &list.rows {
            assert!(row.max.y <= content().max.y);
        }
    }

    #[test]
    fn headerless_lists_start_rows_at_the_top() {
        let list = layout(content(), false, 2, 1.0);
        assert!(list.header.is_none());
        assert!(list.rows[0].min.y < HEADER_HEIGHT);
    }
}
