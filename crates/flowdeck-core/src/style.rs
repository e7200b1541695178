use crate::Color;
use serde::{Deserialize, Serialize};

/// Inner padding applied by the base node layout.
pub const DEFAULT_PADDING: f32 = 8.0;

/// Opacity applied to faded (de-emphasized) nodes.
pub const FADED_OPACITY: f32 = 0.4;

/// Border stroke patterns supported by node styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineStyle {
    Solid,
    Dashed,
    Dotted,
}

/// A caller-supplied node style overlay.
///
/// Every field is optional: the model layer only sends the properties it wants
/// to override, and the renderer fills the rest from its base style. Field
/// names follow the wire format (camelCase) when serialized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NodeStyle {
    pub background: Option<Color>,
    pub border_color: Option<Color>,
    pub border_size: Option<f32>,
    pub border_style: Option<LineStyle>,
    pub border_radius: Option<f32>,
    pub padding: Option<f32>,
    pub text_color: Option<Color>,
    pub opacity: Option<f32>,
}

impl NodeStyle {
    /// Overlay `other` on top of this style. Properties set in `other` win;
    /// unset properties keep the value from `self`.
    pub fn merge(&self, other: &NodeStyle) -> NodeStyle {
        NodeStyle {
            background: other.background.or(self.background),
            border_color: other.border_color.or(self.border_color),
            border_size: other.border_size.or(self.border_size),
            border_style: other.border_style.or(self.border_style),
            border_radius: other.border_radius.or(self.border_radius),
            padding: other.padding.or(self.padding),
            text_color: other.text_color.or(self.text_color),
            opacity: other.opacity.or(self.opacity),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == NodeStyle::default()
    }

    pub fn with_background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    pub fn with_border(mut self, color: Color, size: f32) -> Self {
        self.border_color = Some(color);
        self.border_size = Some(size);
        self
    }

    pub fn with_text_color(mut self, color: Color) -> Self {
        self.text_color = Some(color);
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = Some(opacity);
        self
    }
}

/// Optional styling carried by a label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LabelStyle {
    pub color: Option<Color>,
    pub font_size: Option<f32>,
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub underline: Option<bool>,
    pub strike_through: Option<bool>,
}
