//! The diagram canvas and its node renderers.
//!
//! The canvas owns the view transform (pan + zoom), dispatches visible nodes
//! to the per-variant renderers with a fully populated prop set, routes the
//! edges between anchors, and reports every gesture (selection, drag, resize,
//! palette, drop) through [`CanvasOutput`] so the app shell can publish them
//! on the event bus. Nothing here mutates the model.

pub mod drop;
pub mod edge;
pub mod handles;
pub mod label;
pub mod palette;
pub mod resizer;
pub mod rectangular_node;
pub mod image_node;
pub mod list_node;
pub mod style_resolver;

#[cfg(test)]
mod diagram_properties;

use std::collections::HashMap;

use eframe::egui;
use egui_phosphor::regular as ph;
use flowdeck_core::{Diagram, NodeId, NodeProps, NodeVariant};
use flowdeck_events::ElementTemplate;

use crate::settings::CanvasSettings;
use crate::theme::{empty_state, to_egui_color};
use edge::EdgeRouter;
use palette::PaletteAction;
use style_resolver::StyleResolver;

const MIN_ZOOM: f32 = 0.25;
const MAX_ZOOM: f32 = 4.0;
const EDGE_WIDTH: f32 = 1.5;
const EDGE_HOVER_WIDTH: f32 = 2.5;
const ARROW_SIZE: f32 = 9.0;

/// A completed sidebar drop, ready to be published as `ElementDropped`.
#[derive(Debug, Clone, PartialEq)]
pub struct DropGesture {
    pub template: ElementTemplate,
    pub target: Option<NodeId>,
    pub position: flowdeck_core::Vec2,
}

/// Everything one frame of canvas interaction produced.
#[derive(Default)]
pub struct CanvasOutput {
    /// `Some(Some(id))` selects a node, `Some(None)` clears the selection.
    pub clicked: Option<Option<NodeId>>,
    pub hovered: Option<NodeId>,
    /// A node drag finished at this position.
    pub moved: Option<(NodeId, flowdeck_core::Vec2)>,
    /// The resizer is being dragged; carries the implied size.
    pub resized: Option<(NodeId, flowdeck_core::Vec2)>,
    pub palette_action: Option<(NodeId, PaletteAction)>,
    pub dropped: Option<DropGesture>,
}

#[derive(Clone, Copy)]
struct DragState {
    start_pan: egui::Vec2,
    start_pos: egui::Pos2,
}

#[derive(Clone)]
struct NodeDrag {
    id: NodeId,
    /// Pointer offset from the node origin at grab time, in diagram units.
    grab_offset: egui::Vec2,
}

pub struct DiagramCanvas {
    zoom: f32,
    pan: egui::Vec2,
    drag_state: Option<DragState>,
    node_drag: Option<NodeDrag>,
    router: EdgeRouter,
}

impl Default for DiagramCanvas {
    fn default() -> Self {
        Self::new()
    }
}

impl DiagramCanvas {
    pub fn new() -> Self {
        Self {
            zoom: 1.0,
            pan: egui::Vec2::ZERO,
            drag_state: None,
            node_drag: None,
            router: EdgeRouter::default(),
        }
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    #[allow(clippy::too_many_arguments)]
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        rect: egui::Rect,
        diagram: &Diagram,
        selection: Option<&NodeId>,
        drag_positions: &mut HashMap<NodeId, flowdeck_core::Vec2>,
        settings: &CanvasSettings,
        tooltips: bool,
        resolver: &StyleResolver,
    ) -> CanvasOutput {
        let mut output = CanvasOutput::default();
        let response = ui.allocate_rect(rect, egui::Sense::click_and_drag());
        let painter = ui.painter_at(rect);
        let palette = resolver.palette();
        let viewport_center = rect.center();

        painter.rect_filled(rect, 0.0, to_egui_color(palette.background));

        // Zoom around the pointer so the spot under the cursor stays put.
        let zoom_delta = ui.input(|i| i.zoom_delta());
        if response.hovered() && (zoom_delta - 1.0).abs() > f32::EPSILON {
            let prev_zoom = self.zoom;
            let new_zoom = (self.zoom * zoom_delta).clamp(MIN_ZOOM, MAX_ZOOM);
            if (new_zoom - prev_zoom).abs() > f32::EPSILON {
                self.zoom = new_zoom;
                if let Some(pointer) = response.hover_pos() {
                    let graph_pos = self.screen_to_graph(pointer, viewport_center, prev_zoom);
                    let new_screen = self.graph_to_screen(graph_pos, viewport_center);
                    self.pan += pointer - new_screen;
                }
            }
        }

        if settings.show_grid {
            self.draw_grid(&painter, rect, viewport_center, settings.grid_size, &palette);
        }

        if diagram.nodes.is_empty() {
            let band = egui::Rect::from_center_size(rect.center(), egui::vec2(320.0, 140.0));
            ui.scope_builder(egui::UiBuilder::new().max_rect(band), |ui| {
                // Plain labels only, so the hint never eats clicks or drops.
                ui.style_mut().interaction.selectable_labels = false;
                empty_state(
                    ui,
                    ph::FLOW_ARROW,
                    "Empty Diagram",
                    "Drag an element from the sidebar to get started",
                );
            });
        }

        // Screen-space layout of every node in view, in model order. Later
        // entries draw on top, so hover scans the list backwards.
        let mut visible: Vec<(usize, egui::Rect)> = Vec::new();
        for (idx, node) in diagram.nodes.iter().enumerate() {
            let position = drag_positions
                .get(&node.id)
                .copied()
                .unwrap_or(node.position);
            let min = self.graph_to_screen(to_pos2(position), viewport_center);
            let size = egui::vec2(node.size.x, node.size.y) * self.zoom;
            let screen_rect = egui::Rect::from_min_size(min, size);
            if rect.intersects(screen_rect) {
                visible.push((idx, screen_rect));
            }
        }

        let pointer_pos = response.hover_pos();
        let mut hovered: Option<(usize, egui::Rect)> = None;
        if let Some(pointer) = pointer_pos {
            for (idx, screen_rect) in visible.iter().rev() {
                if screen_rect.contains(pointer) {
                    hovered = Some((*idx, *screen_rect));
                    break;
                }
            }
        }
        output.hovered = hovered.map(|(idx, _)| diagram.nodes[idx].id.clone());

        if response.clicked() {
            output.clicked = Some(output.hovered.clone());
        }

        self.handle_drags(&response, ui, viewport_center, diagram, &hovered, drag_positions, &mut output);

        let template_in_flight = drop::hovered_template(&response);

        self.draw_edges(
            &painter,
            diagram,
            drag_positions,
            viewport_center,
            pointer_pos,
            settings,
            resolver,
        );

        let connectable = !drop::drag_in_flight(ui.ctx());
        for (idx, screen_rect) in &visible {
            let node = &diagram.nodes[*idx];
            let selected = selection == Some(&node.id);
            let props = NodeProps {
                id: &node.id,
                data: &node.data,
                is_connectable: connectable,
                selected,
            };
            let computed =
                resolver.computed_node_style(&node.data.style, selected, node.data.faded);
            let drop_hint = template_in_flight
                .map(|template| {
                    output.hovered.as_ref() == Some(&node.id)
                        && drop::accepts(template, Some(&node.variant))
                })
                .unwrap_or(false);

            match &node.variant {
                NodeVariant::Rectangle => rectangular_node::draw(
                    ui,
                    &painter,
                    *screen_rect,
                    &props,
                    &computed,
                    resolver,
                    drop_hint,
                    self.zoom,
                ),
                NodeVariant::Image { uri } => image_node::draw(
                    ui,
                    &painter,
                    *screen_rect,
                    &props,
                    uri,
                    &computed,
                    resolver,
                    drop_hint,
                    self.zoom,
                ),
                NodeVariant::List { items } => list_node::draw(
                    ui,
                    &painter,
                    *screen_rect,
                    &props,
                    items,
                    &computed,
                    resolver,
                    drop_hint,
                    self.zoom,
                ),
            }
        }

        // Background accept hint while a node template hovers empty canvas.
        if let Some(template) = template_in_flight
            && output.hovered.is_none()
            && drop::accepts(template, None)
        {
            painter.rect_stroke(
                rect.shrink(2.0),
                0.0,
                egui::Stroke::new(2.0, to_egui_color(resolver.accent())),
                egui::StrokeKind::Inside,
            );
        }

        // Selection affordances float on top of everything already painted.
        if let Some(selected_id) = selection
            && let Some((idx, screen_rect)) = visible
                .iter()
                .find(|(idx, _)| &diagram.nodes[*idx].id == selected_id)
        {
            let node = &diagram.nodes[*idx];
            let accent = to_egui_color(resolver.accent());
            if let Some(size) = resizer::show(ui, &node.id, *screen_rect, accent, self.zoom) {
                output.resized = Some((node.id.clone(), size));
            }
            if let Some(action) = palette::show(
                ui.ctx(),
                egui::Id::new(("node_palette", &node.id)),
                *screen_rect,
                &node.data,
                accent,
                tooltips,
            ) {
                output.palette_action = Some((node.id.clone(), action));
            }
        }

        if let Some(template) = drop::released_template(&response) {
            let position = pointer_pos
                .or_else(|| response.interact_pointer_pos())
                .unwrap_or_else(|| rect.center());
            output.dropped = Some(DropGesture {
                template,
                target: output.hovered.clone(),
                position: from_pos2(self.screen_to_graph(position, viewport_center, self.zoom)),
            });
        }

        output
    }

    #[allow(clippy::too_many_arguments)]
    fn handle_drags(
        &mut self,
        response: &egui::Response,
        ui: &egui::Ui,
        viewport_center: egui::Pos2,
        diagram: &Diagram,
        hovered: &Option<(usize, egui::Rect)>,
        drag_positions: &mut HashMap<NodeId, flowdeck_core::Vec2>,
        output: &mut CanvasOutput,
    ) {
        if response.drag_started() {
            if let Some((idx, _)) = hovered {
                let node = &diagram.nodes[*idx];
                if let Some(pointer) = response.interact_pointer_pos() {
                    let graph = self.screen_to_graph(pointer, viewport_center, self.zoom);
                    let position = drag_positions
                        .get(&node.id)
                        .copied()
                        .unwrap_or(node.position);
                    self.node_drag = Some(NodeDrag {
                        id: node.id.clone(),
                        grab_offset: graph - to_pos2(position),
                    });
                }
            } else if let Some(pointer) = response.interact_pointer_pos() {
                self.drag_state = Some(DragState {
                    start_pan: self.pan,
                    start_pos: pointer,
                });
            }
        }

        if let Some(drag) = self.node_drag.clone() {
            if let Some(pointer) = response.interact_pointer_pos() {
                let graph = self.screen_to_graph(pointer, viewport_center, self.zoom);
                drag_positions.insert(drag.id.clone(), from_pos2(graph - drag.grab_offset));
            }
            if ui.input(|i| !i.pointer.primary_down()) {
                if let Some(position) = drag_positions.get(&drag.id) {
                    output.moved = Some((drag.id.clone(), *position));
                }
                self.node_drag = None;
            }
        } else if response.dragged() {
            if let (Some(state), Some(pointer)) =
                (self.drag_state, response.interact_pointer_pos())
            {
                self.pan = state.start_pan + (pointer - state.start_pos);
            }
        }
        if self.drag_state.is_some() && ui.input(|i| !i.pointer.primary_down()) {
            self.drag_state = None;
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_edges(
        &self,
        painter: &egui::Painter,
        diagram: &Diagram,
        drag_positions: &HashMap<NodeId, flowdeck_core::Vec2>,
        viewport_center: egui::Pos2,
        pointer_pos: Option<egui::Pos2>,
        settings: &CanvasSettings,
        resolver: &StyleResolver,
    ) {
        let edge_color = to_egui_color(resolver.resolve_edge_color());
        let accent = to_egui_color(resolver.accent());

        for diagram_edge in &diagram.edges {
            let (Some(source), Some(target)) = (
                diagram.node(&diagram_edge.source),
                diagram.node(&diagram_edge.target),
            ) else {
                continue;
            };

            let source_rect = effective_rect(source, drag_positions);
            let target_rect = effective_rect(target, drag_positions);
            let curve = self.router.route(&source_rect, &target_rect);

            let points: Vec<egui::Pos2> = curve
                .sample(edge::CURVE_SEGMENTS)
                .into_iter()
                .map(|p| self.graph_to_screen(to_pos2(p), viewport_center))
                .collect();

            let hovered = pointer_pos
                .map(|pointer| {
                    points
                        .iter()
                        .map(|p| p.distance(pointer))
                        .fold(f32::INFINITY, f32::min)
                        <= edge::HIT_TOLERANCE
                })
                .unwrap_or(false);

            let (width, color) = if hovered {
                (EDGE_HOVER_WIDTH, accent)
            } else {
                (EDGE_WIDTH, edge_color)
            };
            painter.add(egui::Shape::line(points, egui::Stroke::new(width, color)));

            if settings.show_edge_arrows {
                let head: Vec<egui::Pos2> = edge::arrow_head(&curve, ARROW_SIZE)
                    .into_iter()
                    .map(|p| self.graph_to_screen(to_pos2(p), viewport_center))
                    .collect();
                painter.add(egui::Shape::convex_polygon(
                    head,
                    color,
                    egui::Stroke::NONE,
                ));
            }
        }
    }

    fn draw_grid(
        &self,
        painter: &egui::Painter,
        rect: egui::Rect,
        viewport_center: egui::Pos2,
        grid_size: f32,
        palette: &style_resolver::DiagramPalette,
    ) {
        let step = grid_size.max(4.0);
        let color = to_egui_color(palette.grid);
        let stroke = egui::Stroke::new(1.0, color);

        let top_left = self.screen_to_graph(rect.min, viewport_center, self.zoom);
        let bottom_right = self.screen_to_graph(rect.max, viewport_center, self.zoom);

        let mut x = (top_left.x / step).floor() * step;
        while x <= bottom_right.x {
            let sx = self.graph_to_screen(egui::pos2(x, 0.0), viewport_center).x;
            painter.line_segment(
                [egui::pos2(sx, rect.min.y), egui::pos2(sx, rect.max.y)],
                stroke,
            );
            x += step;
        }

        let mut y = (top_left.y / step).floor() * step;
        while y <= bottom_right.y {
            let sy = self.graph_to_screen(egui::pos2(0.0, y), viewport_center).y;
            painter.line_segment(
                [egui::pos2(rect.min.x, sy), egui::pos2(rect.max.x, sy)],
                stroke,
            );
            y += step;
        }
    }

    fn graph_to_screen(&self, graph_pos: egui::Pos2, viewport_center: egui::Pos2) -> egui::Pos2 {
        viewport_center + self.pan + (graph_pos.to_vec2() * self.zoom)
    }

    fn screen_to_graph(
        &self,
        screen_pos: egui::Pos2,
        viewport_center: egui::Pos2,
        zoom: f32,
    ) -> egui::Pos2 {
        let offset = screen_pos - viewport_center - self.pan;
        egui::Pos2::new(offset.x / zoom, offset.y / zoom)
    }
}

fn effective_rect(
    node: &flowdeck_core::Node,
    drag_positions: &HashMap<NodeId, flowdeck_core::Vec2>,
) -> flowdeck_core::Rect {
    let position = drag_positions
        .get(&node.id)
        .copied()
        .unwrap_or(node.position);
    flowdeck_core::Rect::from_pos_size(position, node.size)
}

fn to_pos2(v: flowdeck_core::Vec2) -> egui::Pos2 {
    egui::pos2(v.x, v.y)
}

fn from_pos2(p: egui::Pos2) -> flowdeck_core::Vec2 {
    flowdeck_core::Vec2::new(p.x, p.y)
}
