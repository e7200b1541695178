use crate::{NodeData, NodeId};
use serde::Serialize;

/// The invocation contract between the canvas and a node renderer.
///
/// This is the wire format the upstream diagram engine speaks: the field
/// names and shapes (camelCase when serialized) must stay exactly as they
/// are. Renderers receive a fresh borrow every frame and never mutate it.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeProps<'a> {
    pub id: &'a NodeId,
    pub data: &'a NodeData,
    pub is_connectable: bool,
    pub selected: bool,
}
