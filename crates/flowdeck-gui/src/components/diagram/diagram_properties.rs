use std::collections::HashMap;

use flowdeck_core::{
    Color, Label, Node, NodeData, NodeId, NodeProps, NodeStyle, NodeVariant, Vec2, FADED_OPACITY,
};
use flowdeck_events::ElementTemplate;
use proptest::prelude::*;

use super::drop::accepts;
use super::edge::{source_anchor, EdgeRouter};
use super::effective_rect;
use super::style_resolver::{NodeDecorations, StyleResolver};
use crate::settings::ThemeMode;

fn resolver() -> StyleResolver {
    StyleResolver::new(ThemeMode::Mocha, Color::rgb(0x8A, 0xAD, 0xF4))
}

fn template_strategy() -> impl Strategy<Value = ElementTemplate> {
    prop_oneof![
        Just(ElementTemplate::Rectangle),
        Just(ElementTemplate::Image),
        Just(ElementTemplate::List),
        Just(ElementTemplate::Item),
    ]
}

proptest! {
    /// Fade folds into the base opacity; an explicit style opacity wins over
    /// the faded value.
    #[test]
    fn opacity_follows_fade_unless_styled(
        faded in any::<bool>(),
        styled in proptest::option::of(0.0f32..=1.0),
    ) {
        let style = NodeStyle {
            opacity: styled,
            ..NodeStyle::default()
        };
        let computed = resolver().computed_node_style(&style, false, faded);
        let expected = styled.unwrap_or(if faded { FADED_OPACITY } else { 1.0 });
        prop_assert!((computed.opacity - expected).abs() < f32::EPSILON);
    }

    /// The accent outline exists exactly while selected, independent of fade.
    #[test]
    fn outline_mirrors_selection(selected in any::<bool>(), faded in any::<bool>()) {
        let computed = resolver().computed_node_style(&NodeStyle::default(), selected, faded);
        prop_assert_eq!(computed.outline.is_some(), selected);
    }

    /// Selection affordances and anchors track their driving flags and
    /// nothing else.
    #[test]
    fn decorations_mirror_props(
        selected in any::<bool>(),
        connectable in any::<bool>(),
        with_label in any::<bool>(),
    ) {
        let id = NodeId::from("n");
        let mut data = NodeData::default();
        if with_label {
            data.label = Some(Label::new("l", "text"));
        }
        let props = NodeProps {
            id: &id,
            data: &data,
            is_connectable: connectable,
            selected,
        };

        let decorations = NodeDecorations::for_props(&props);
        prop_assert_eq!(decorations.outline, selected);
        prop_assert_eq!(decorations.resizer, selected);
        prop_assert_eq!(decorations.palette, selected);
        prop_assert_eq!(decorations.source_anchor_enabled, connectable);
        prop_assert_eq!(decorations.target_anchor_enabled, connectable);
        prop_assert_eq!(decorations.label, with_label);
    }

    /// Edges route from the drag-override position when one exists, and from
    /// the model position otherwise.
    #[test]
    fn edge_routing_follows_drag_overrides(
        model_pos in ((-500.0f32..500.0), (-500.0f32..500.0)),
        override_pos in proptest::option::of(((-500.0f32..500.0), (-500.0f32..500.0))),
        size in ((40.0f32..200.0), (30.0f32..120.0)),
    ) {
        let node = Node::new(
            "a",
            NodeVariant::Rectangle,
            Vec2::new(model_pos.0, model_pos.1),
            Vec2::new(size.0, size.1),
        );
        let mut overrides = HashMap::new();
        if let Some((x, y)) = override_pos {
            overrides.insert(node.id.clone(), Vec2::new(x, y));
        }

        let rect = effective_rect(&node, &overrides);
        let expected = override_pos
            .map(|(x, y)| Vec2::new(x, y))
            .unwrap_or(node.position);
        prop_assert_eq!(rect.min, expected);

        let other = Node::new(
            "b",
            NodeVariant::Rectangle,
            Vec2::new(0.0, 0.0),
            Vec2::new(80.0, 40.0),
        );
        let curve = EdgeRouter::default().route(&rect, &effective_rect(&other, &overrides));
        prop_assert_eq!(curve.p0, source_anchor(&rect));
    }

    /// Item templates land only on list nodes; node templates only on the
    /// background.
    #[test]
    fn drop_acceptance_is_exclusive(template in template_strategy()) {
        let list = NodeVariant::List { items: Vec::new() };
        let rectangle = NodeVariant::Rectangle;
        match template {
            ElementTemplate::Item => {
                prop_assert!(accepts(template, Some(&list)));
                prop_assert!(!accepts(template, None));
                prop_assert!(!accepts(template, Some(&rectangle)));
            }
            _ => {
                prop_assert!(accepts(template, None));
                prop_assert!(!accepts(template, Some(&list)));
                prop_assert!(!accepts(template, Some(&rectangle)));
            }
        }
    }
}
