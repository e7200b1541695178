use crate::{EdgeId, LabelId, LabelStyle, NodeId, NodeStyle, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// A text label attached to a node or a list item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    pub id: LabelId,
    pub text: String,
    #[serde(default)]
    pub style: LabelStyle,
}

impl Label {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: LabelId(id.into()),
            text: text.into(),
            style: LabelStyle::default(),
        }
    }

    pub fn with_style(mut self, style: LabelStyle) -> Self {
        self.style = style;
        self
    }
}

/// Per-kind payload of a node. The serialized tag matches the upstream node
/// type names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum NodeVariant {
    #[serde(rename = "rectangularNode")]
    Rectangle,
    #[serde(rename = "imageNode")]
    Image { uri: String },
    #[serde(rename = "listNode")]
    List { items: Vec<Label> },
}

/// The renderer-facing payload of a node: optional label, caller style
/// overlay, and the faded flag. Produced by model synchronization, consumed
/// read-only by renderers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeData {
    pub label: Option<Label>,
    pub style: NodeStyle,
    pub faded: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    #[serde(flatten)]
    pub variant: NodeVariant,
    pub position: Vec2,
    pub size: Vec2,
    pub data: NodeData,
}

impl Node {
    pub fn new(id: impl Into<NodeId>, variant: NodeVariant, position: Vec2, size: Vec2) -> Self {
        Self {
            id: id.into(),
            variant,
            position,
            size,
            data: NodeData::default(),
        }
    }

    pub fn with_label(mut self, label: Label) -> Self {
        self.data.label = Some(label);
        self
    }

    pub fn with_style(mut self, style: NodeStyle) -> Self {
        self.data.style = style;
        self
    }

    pub fn with_faded(mut self, faded: bool) -> Self {
        self.data.faded = faded;
        self
    }

    /// Bounding rectangle in diagram space.
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.position, self.size)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub id: EdgeId,
    pub source: NodeId,
    pub target: NodeId,
}

impl Edge {
    pub fn new(id: impl Into<EdgeId>, source: impl Into<NodeId>, target: impl Into<NodeId>) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
        }
    }
}

/// A complete diagram as delivered by the model layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Diagram {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl Diagram {
    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| &n.id == id)
    }

    pub fn node_mut(&mut self, id: &NodeId) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|n| &n.id == id)
    }

    /// Remove a node and every edge attached to it. Returns the removed node,
    /// or None when the id is unknown.
    pub fn remove_node(&mut self, id: &NodeId) -> Option<Node> {
        let index = self.nodes.iter().position(|n| &n.id == id)?;
        let node = self.nodes.remove(index);
        self.edges.retain(|e| &e.source != id && &e.target != id);
        Some(node)
    }
}
