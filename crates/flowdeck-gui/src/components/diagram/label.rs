//! Text label widget shared by the node renderers.

use eframe::egui;
use flowdeck_core::{Label, LabelStyle};

use crate::theme::to_egui_color;

pub fn effective_font_size(style: &LabelStyle, base: f32, zoom: f32) -> f32 {
    style.font_size.unwrap_or(base) * zoom
}

pub fn effective_color(style: &LabelStyle, fallback: egui::Color32, opacity: f32) -> egui::Color32 {
    style
        .color
        .map(to_egui_color)
        .unwrap_or(fallback)
        .gamma_multiply(opacity)
}

fn text_format(style: &LabelStyle, font_size: f32, color: egui::Color32) -> egui::TextFormat {
    let line = |on: bool| {
        if on {
            egui::Stroke::new(1.0, color)
        } else {
            egui::Stroke::NONE
        }
    };
    egui::TextFormat {
        font_id: egui::FontId::proportional(font_size),
        color,
        italics: style.italic.unwrap_or(false),
        underline: line(style.underline.unwrap_or(false)),
        strikethrough: line(style.strike_through.unwrap_or(false)),
        ..Default::default()
    }
}

/// Lay out and paint a label anchored at `pos`. Returns the painted rect.
pub fn draw_label(
    ui: &egui::Ui,
    painter: &egui::Painter,
    pos: egui::Pos2,
    anchor: egui::Align2,
    label: &Label,
    fallback_color: egui::Color32,
    base_font_size: f32,
    opacity: f32,
    zoom: f32,
) -> egui::Rect {
    let color = effective_color(&label.style, fallback_color, opacity);
    let font_size = effective_font_size(&label.style, base_font_size, zoom);

    let mut job = egui::text::LayoutJob::default();
    job.append(&label.text, 0.0, text_format(&label.style, font_size, color));
    let galley = ui.fonts(|f| f.layout_job(job));

    let rect = anchor.anchor_size(pos, galley.size());
    painter.galley(rect.min, galley.clone(), color);
    if label.style.bold.unwrap_or(false) {
        // The default font stack carries no bold face; a half-pixel second
        // pass thickens the glyphs instead.
        painter.galley(rect.min + egui::vec2(0.5, 0.0), galley, color);
    }
    rect
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowdeck_core::Color;

    #[test]
    fn style_color_wins_over_the_fallback() {
        let style = LabelStyle {
            color: Some(Color::rgb(200, 10, 10)),
            ..Default::default()
        };
        let color = effective_color(&style, egui::Color32::WHITE, 1.0);
        assert_eq!(color, egui::Color32::from_rgb(200, 10, 10));

        let unstyled = LabelStyle::default();
        assert_eq!(
            effective_color(&unstyled, egui::Color32::WHITE, 1.0),
            egui::Color32::WHITE
        );
    }

    #[test]
    fn zero_opacity_blanks_the_label() {
        let color = effective_color(&LabelStyle::default(), egui::Color32::WHITE, 0.0);
        assert_eq!(color.a(), 0);
    }

    #[test]
    fn font_size_override_and_zoom_both_apply() {
        let style = LabelStyle {
            font_size: Some(20.0),
            ..Default::default()
        };
        assert_eq!(effective_font_size(&style, 13.0, 2.0), 40.0);
        assert_eq!(effective_font_size(&LabelStyle::default(), 13.0, 2.0), 26.0);
    }

    #[test]
    fn decoration_flags_map_to_strokes() {
        let style = LabelStyle {
            italic: Some(true),
            underline: Some(true),
            ..Default::default()
        };
        let format = text_format(&style, 13.0, egui::Color32::BLACK);
        assert!(format.italics);
        assert_ne!(format.underline, egui::Stroke::NONE);
        assert_eq!(format.strikethrough, egui::Stroke::NONE);
    }
}
