use flowdeck_core::{Color, LineStyle, NodeProps, NodeStyle, DEFAULT_PADDING, FADED_OPACITY};

use crate::settings::ThemeMode;

/// Colors the canvas and node renderers draw with, before any caller style
/// overlay. Core color types, so style computation stays UI-free and
/// testable.
#[derive(Clone, Copy)]
pub struct DiagramPalette {
    pub background: Color,
    pub node_fill: Color,
    pub node_border: Color,
    pub text_light: Color,
    pub text_dark: Color,
    pub list_item_fill: Color,
    pub edge: Color,
    pub grid: Color,
    pub shadow: Color,
}

impl DiagramPalette {
    pub fn bright() -> Self {
        Self {
            background: Color::rgb(0xFF, 0xFF, 0xFF),
            node_fill: Color::rgb(0xE5, 0xE7, 0xEC),
            node_border: Color::rgb(0x3C, 0x3C, 0x3C),
            text_light: Color::rgb(0xFF, 0xFF, 0xFF),
            text_dark: Color::rgb(0x00, 0x00, 0x00),
            list_item_fill: Color::rgb(0xF4, 0xF5, 0xF7),
            edge: Color::rgb(0x87, 0x87, 0x87),
            grid: Color::rgba(0x00, 0x00, 0x00, 18),
            shadow: Color::rgba(0x00, 0x00, 0x00, 24),
        }
    }

    pub fn dark() -> Self {
        Self {
            background: Color::rgb(0x27, 0x27, 0x28),
            node_fill: Color::rgb(0x4A, 0x4D, 0x55),
            node_border: Color::rgb(0xC3, 0xC3, 0xC3),
            text_light: Color::rgb(0xF7, 0xF7, 0xF7),
            text_dark: Color::rgb(0x00, 0x00, 0x00),
            list_item_fill: Color::rgb(0x3A, 0x3D, 0x44),
            edge: Color::rgb(0xA0, 0xA0, 0xA0),
            grid: Color::rgba(0xFF, 0xFF, 0xFF, 14),
            shadow: Color::rgba(0x00, 0x00, 0x00, 60),
        }
    }

    pub fn from_theme_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Latte => Self::bright(),
            ThemeMode::Frappe | ThemeMode::Macchiato | ThemeMode::Mocha => Self::dark(),
        }
    }
}

/// The fully resolved visual of one node: base layout merged with the caller
/// style overlay, fade folded in, selection outline attached.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComputedNodeStyle {
    pub background: Color,
    pub border_color: Color,
    pub border_size: f32,
    pub border_style: LineStyle,
    pub border_radius: f32,
    pub padding: f32,
    pub text_color: Color,
    pub opacity: f32,
    /// One-pixel accent outline, present only while selected.
    pub outline: Option<Color>,
}

/// Which affordances a node renderer shows for a given set of props.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeDecorations {
    pub outline: bool,
    pub resizer: bool,
    pub palette: bool,
    pub source_anchor_enabled: bool,
    pub target_anchor_enabled: bool,
    pub label: bool,
}

impl NodeDecorations {
    pub fn for_props(props: &NodeProps<'_>) -> Self {
        Self {
            outline: props.selected,
            resizer: props.selected,
            palette: props.selected,
            source_anchor_enabled: props.is_connectable,
            target_anchor_enabled: props.is_connectable,
            label: props.data.label.is_some(),
        }
    }
}

#[derive(Clone, Copy)]
pub struct StyleResolver {
    palette: DiagramPalette,
    accent: Color,
}

impl StyleResolver {
    pub fn new(mode: ThemeMode, accent: Color) -> Self {
        Self {
            palette: DiagramPalette::from_theme_mode(mode),
            accent,
        }
    }

    pub fn set_theme_mode(&mut self, mode: ThemeMode, accent: Color) {
        self.palette = DiagramPalette::from_theme_mode(mode);
        self.accent = accent;
    }

    pub fn palette(&self) -> DiagramPalette {
        self.palette
    }

    pub fn accent(&self) -> Color {
        self.accent
    }

    /// Resolve the effective style of a node.
    ///
    /// The base layout (default fill/border, standard padding, fade-derived
    /// opacity) is overlaid with the caller style; the overlay wins on every
    /// property it sets, including an explicit opacity on a faded node.
    pub fn computed_node_style(
        &self,
        style: &NodeStyle,
        selected: bool,
        faded: bool,
    ) -> ComputedNodeStyle {
        let base = NodeStyle {
            background: Some(self.palette.node_fill),
            border_color: Some(self.palette.node_border),
            border_size: Some(1.0),
            border_style: Some(LineStyle::Solid),
            border_radius: Some(3.0),
            padding: Some(DEFAULT_PADDING),
            text_color: None,
            opacity: Some(if faded { FADED_OPACITY } else { 1.0 }),
        };
        let merged = base.merge(style);

        let background = merged.background.unwrap_or(self.palette.node_fill);
        ComputedNodeStyle {
            background,
            border_color: merged.border_color.unwrap_or(self.palette.node_border),
            border_size: merged.border_size.unwrap_or(1.0),
            border_style: merged.border_style.unwrap_or(LineStyle::Solid),
            border_radius: merged.border_radius.unwrap_or(3.0),
            padding: merged.padding.unwrap_or(DEFAULT_PADDING),
            text_color: merged
                .text_color
                .unwrap_or_else(|| self.resolve_text_color(background)),
            opacity: merged.opacity.unwrap_or(1.0).clamp(0.0, 1.0),
            outline: selected.then_some(self.accent),
        }
    }

    /// Pick a readable text color for the given background.
    pub fn resolve_text_color(&self, background: Color) -> Color {
        if background.is_light() {
            self.palette.text_dark
        } else {
            self.palette.text_light
        }
    }

    pub fn resolve_edge_color(&self) -> Color {
        self.palette.edge
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowdeck_core::{Label, NodeData, NodeId};

    fn resolver() -> StyleResolver {
        StyleResolver::new(ThemeMode::Mocha, Color::rgb(0x8A, 0xAD, 0xF4))
    }

    #[test]
    fn unselected_connectable_node_with_label() {
        // data = {label: "Hello", style: {background red}}, faded = false,
        // selected = false, connectable = true: red fill, full opacity, both
        // anchors enabled, no outline, no resizer, no palette.
        let id = NodeId::from("n1");
        let data = NodeData {
            label: Some(Label::new("l1", "Hello")),
            style: NodeStyle::default().with_background(Color::rgb(255, 0, 0)),
            faded: false,
        };
        let props = NodeProps {
            id: &id,
            data: &data,
            is_connectable: true,
            selected: false,
        };

        let computed = resolver().computed_node_style(&data.style, props.selected, data.faded);
        assert_eq!(computed.background, Color::rgb(255, 0, 0));
        assert_eq!(computed.opacity, 1.0);
        assert_eq!(computed.outline, None);

        let decorations = NodeDecorations::for_props(&props);
        assert!(decorations.source_anchor_enabled);
        assert!(decorations.target_anchor_enabled);
        assert!(decorations.label);
        assert!(!decorations.outline);
        assert!(!decorations.resizer);
        assert!(!decorations.palette);
    }

    #[test]
    fn faded_reduces_opacity() {
        let computed = resolver().computed_node_style(&NodeStyle::default(), false, true);
        assert_eq!(computed.opacity, FADED_OPACITY);

        let computed = resolver().computed_node_style(&NodeStyle::default(), false, false);
        assert_eq!(computed.opacity, 1.0);
    }

    #[test]
    fn caller_opacity_overrides_the_faded_value() {
        let style = NodeStyle::default().with_opacity(0.9);
        let computed = resolver().computed_node_style(&style, false, true);
        assert_eq!(computed.opacity, 0.9);
    }

    #[test]
    fn selection_adds_the_accent_outline() {
        let r = resolver();
        let computed = r.computed_node_style(&NodeStyle::default(), true, false);
        assert_eq!(computed.outline, Some(r.accent()));
    }

    #[test]
    fn base_layout_fills_everything_the_caller_leaves_unset() {
        let computed = resolver().computed_node_style(&NodeStyle::default(), false, false);
        assert_eq!(computed.padding, DEFAULT_PADDING);
        assert_eq!(computed.border_size, 1.0);
        assert_eq!(computed.border_style, LineStyle::Solid);
    }

    #[test]
    fn text_color_tracks_background_contrast() {
        let r = resolver();
        let on_light = r.computed_node_style(
            &NodeStyle::default().with_background(Color::rgb(240, 240, 240)),
            false,
            false,
        );
        assert_eq!(on_light.text_color, r.palette().text_dark);

        let on_dark = r.computed_node_style(
            &NodeStyle::default().with_background(Color::rgb(20, 20, 20)),
            false,
            false,
        );
        assert_eq!(on_dark.text_color, r.palette().text_light);
    }

    #[test]
    fn explicit_text_color_is_not_second_guessed() {
        let style = NodeStyle::default()
            .with_background(Color::rgb(240, 240, 240))
            .with_text_color(Color::rgb(200, 0, 0));
        let computed = resolver().computed_node_style(&style, false, false);
        assert_eq!(computed.text_color, Color::rgb(200, 0, 0));
    }
}
