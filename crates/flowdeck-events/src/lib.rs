use crossbeam_channel::{unbounded, Receiver, Sender};
use flowdeck_core::{LabelId, NodeId, Vec2};
use serde::{Deserialize, Serialize};

/// A draggable element prototype offered by the sidebar. Drops carry the
/// template so the handler knows what to materialize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementTemplate {
    Rectangle,
    Image,
    List,
    Item,
}

impl ElementTemplate {
    /// Human-readable name shown in the sidebar and in notifications.
    pub fn display_name(&self) -> &'static str {
        match self {
            ElementTemplate::Rectangle => "Rectangle",
            ElementTemplate::Image => "Image",
            ElementTemplate::List => "List",
            ElementTemplate::Item => "Item",
        }
    }

    pub fn all() -> [ElementTemplate; 4] {
        [
            ElementTemplate::Rectangle,
            ElementTemplate::Image,
            ElementTemplate::List,
            ElementTemplate::Item,
        ]
    }
}

/// Application events, published by UI gestures and drained once per frame by
/// the app shell. Components never mutate the diagram directly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Event {
    // ==== Selection Events ====
    /// The canvas selection changed; None clears it.
    SelectionChanged { node: Option<NodeId> },

    // ==== Node Gesture Events ====
    /// A node was dragged to a new position (diagram space).
    NodeMoved { id: NodeId, position: Vec2 },
    /// The resize affordance was dragged; carries the new size.
    NodeResized { id: NodeId, size: Vec2 },

    // ==== Palette Events ====
    /// The palette's edit tool was pressed for a node's label.
    EditLabelRequested { node: NodeId, label: LabelId },
    /// A label edit was confirmed with new text.
    LabelEdited { node: NodeId, label: LabelId, text: String },
    /// The palette's fade tool toggled the de-emphasis state.
    FadeToggled { id: NodeId },
    /// The palette's delete tool removed the node.
    NodeDeleted { id: NodeId },

    // ==== Drag & Drop Events ====
    /// A sidebar element was dropped on a node (Some) or on the canvas
    /// background (None). Position is in diagram space.
    ElementDropped {
        template: ElementTemplate,
        target: Option<NodeId>,
        position: Vec2,
    },

    // ==== Workbench Events ====
    /// A navbar menu entry asked for the preferences dialog.
    PreferencesRequested,
    /// A navbar menu entry asked for the about window.
    AboutRequested,
    /// A navbar menu entry asked to close the application.
    QuitRequested,
}

#[derive(Clone)]
pub struct EventBus {
    tx: Sender<Event>,
    rx: Receiver<Event>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub fn new() -> Self {
        let (tx, rx) = unbounded();
        Self { tx, rx }
    }

    pub fn sender(&self) -> Sender<Event> {
        self.tx.clone()
    }

    pub fn receiver(&self) -> Receiver<Event> {
        self.rx.clone()
    }

    pub fn publish(&self, event: Event) {
        tracing::trace!(?event, "publish");
        let _ = self.tx.send(event);
    }

    /// Dispatch all pending events to a listener.
    /// This is useful for processing events in the UI loop.
    pub fn dispatch_to<L: EventListener>(&self, listener: &mut L) {
        while let Ok(event) = self.rx.try_recv() {
            listener.handle_event(&event);
        }
    }
}

/// Trait for components that respond to events.
/// Implement this to receive events from the EventBus.
pub trait EventListener {
    fn handle_event(&mut self, event: &Event);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn publish_and_receive_keep_order() {
        let bus = EventBus::new();
        bus.publish(Event::SelectionChanged {
            node: Some(NodeId::from("n1")),
        });
        bus.publish(Event::NodeMoved {
            id: NodeId::from("n1"),
            position: Vec2::new(10.0, 20.0),
        });

        let rx = bus.receiver();
        match rx.recv().unwrap() {
            Event::SelectionChanged { node } => assert_eq!(node, Some(NodeId::from("n1"))),
            other => panic!("expected SelectionChanged, got {other:?}"),
        }
        match rx.recv().unwrap() {
            Event::NodeMoved { id, position } => {
                assert_eq!(id, NodeId::from("n1"));
                assert_eq!(position, Vec2::new(10.0, 20.0));
            }
            other => panic!("expected NodeMoved, got {other:?}"),
        }
    }

    #[test]
    fn clones_share_the_same_channel() {
        let bus = EventBus::new();
        let cloned = bus.clone();
        cloned.publish(Event::QuitRequested);
        assert_eq!(bus.receiver().recv().unwrap(), Event::QuitRequested);
    }

    #[test]
    fn dispatch_to_drains_pending_events() {
        struct Counter {
            drops: usize,
            other: usize,
        }
        impl EventListener for Counter {
            fn handle_event(&mut self, event: &Event) {
                match event {
                    Event::ElementDropped { .. } => self.drops += 1,
                    _ => self.other += 1,
                }
            }
        }

        let bus = EventBus::new();
        bus.publish(Event::ElementDropped {
            template: ElementTemplate::Rectangle,
            target: None,
            position: Vec2::ZERO,
        });
        bus.publish(Event::ElementDropped {
            template: ElementTemplate::Item,
            target: Some(NodeId::from("list-1")),
            position: Vec2::new(5.0, 5.0),
        });
        bus.publish(Event::AboutRequested);

        let mut counter = Counter { drops: 0, other: 0 };
        bus.dispatch_to(&mut counter);
        assert_eq!(counter.drops, 2);
        assert_eq!(counter.other, 1);

        // A second dispatch finds nothing left.
        bus.dispatch_to(&mut counter);
        assert_eq!(counter.drops + counter.other, 3);
    }

    #[test]
    fn events_serialize_for_logging() {
        let event = Event::LabelEdited {
            node: NodeId::from("n1"),
            label: LabelId::from("l1"),
            text: "Renamed".to_string(),
        };
        let json = serde_json::to_string(&event).unwrap();
        let back: Event = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
