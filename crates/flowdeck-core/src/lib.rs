use serde::{Deserialize, Serialize};
use std::fmt;

pub mod color;
pub mod diagram;
pub mod geometry;
pub mod props;
pub mod style;

pub use color::{Color, ColorParseError};
pub use diagram::{Diagram, Edge, Label, Node, NodeData, NodeVariant};
pub use geometry::{Rect, Vec2};
pub use props::NodeProps;
pub use style::{DEFAULT_PADDING, FADED_OPACITY, LabelStyle, LineStyle, NodeStyle};

/// Identifier of a diagram node. The upstream model issues UUID strings, so
/// ids are strings end to end; serde keeps the wire shape a bare string.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Identifier of a diagram edge.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EdgeId(pub String);

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for EdgeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Identifier of a label, distinct from the node that owns it. The contextual
/// palette is scoped to a node id plus an optional label id.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelId(pub String);

impl fmt::Display for LabelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for LabelId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}
