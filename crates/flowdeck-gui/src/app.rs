use std::collections::HashMap;
use std::sync::Arc;

use eframe::egui;
use flowdeck_core::{Color, Diagram, Edge, Label, LineStyle, Node, NodeId, NodeStyle, NodeVariant, Vec2};
use flowdeck_events::{ElementTemplate, Event, EventBus, EventListener};
use flowdeck_extensions::ExtensionRegistry;

use crate::components::about_dialog::AboutDialog;
use crate::components::diagram::palette::PaletteAction;
use crate::components::diagram::style_resolver::StyleResolver;
use crate::components::diagram::{CanvasOutput, DiagramCanvas, DropGesture};
use crate::components::label_edit_dialog::LabelEditDialog;
use crate::components::navbar;
use crate::components::navbar::extension_points::{NAVBAR_MENU_ENTRY, NavbarMenuProps};
use crate::components::notifications::NotificationManager;
use crate::components::preferences::PreferencesDialog;
use crate::components::sidebar;
use crate::components::status_bar::StatusBar;
use crate::settings::AppSettings;
use crate::theme::{Theme, to_core_color};

/// URI of the bundled logo, registered with the image loader at startup and
/// used by freshly dropped image nodes.
const LOGO_URI: &str = "bytes://flowdeck-logo.png";

pub struct FlowdeckApp {
    diagram: Diagram,
    diagram_name: String,
    selection: Option<NodeId>,
    /// Per-node position override while a drag is in flight. The model keeps
    /// the pre-drag position until `NodeMoved` lands.
    drag_positions: HashMap<NodeId, Vec2>,

    event_bus: EventBus,
    extension_registry: Arc<ExtensionRegistry>,

    settings: AppSettings,
    theme: Theme,
    style_resolver: StyleResolver,

    canvas: DiagramCanvas,
    status_bar: StatusBar,
    preferences_dialog: PreferencesDialog,
    about_dialog: AboutDialog,
    label_edit_dialog: LabelEditDialog,
    notification_manager: NotificationManager,

    reapply_theme: bool,
    quit_requested: bool,
}

impl FlowdeckApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let settings = AppSettings::load();
        let theme = Theme::new(settings.theme);
        tracing::info!(mode = ?settings.theme, scale = settings.ui_scale, "applying initial theme");
        theme.apply(&cc.egui_ctx);
        cc.egui_ctx.set_pixels_per_point(settings.ui_scale);
        cc.egui_ctx
            .include_bytes(LOGO_URI, &include_bytes!("../assets/logo.png")[..]);

        let event_bus = EventBus::new();
        let mut registry = ExtensionRegistry::new();
        // A built-in contribution to the menu entry slot; downstream crates
        // register theirs the same way.
        if let Err(error) = registry.register(
            &NAVBAR_MENU_ENTRY,
            |ui: &mut egui::Ui, props: &mut NavbarMenuProps| {
                ui.separator();
                ui.label(
                    egui::RichText::new(format!("Editing \u{201c}{}\u{201d}", props.diagram_name))
                        .small()
                        .weak(),
                );
            },
        ) {
            tracing::warn!(%error, "navbar menu entry registration failed");
        }

        let style_resolver = StyleResolver::new(settings.theme, to_core_color(theme.accent()));
        let notification_manager = NotificationManager::new(settings.notifications.position);

        Self {
            diagram: sample_diagram(),
            diagram_name: "Getting Started".to_string(),
            selection: None,
            drag_positions: HashMap::new(),
            event_bus,
            extension_registry: Arc::new(registry),
            preferences_dialog: PreferencesDialog::new(&settings),
            settings,
            theme,
            style_resolver,
            canvas: DiagramCanvas::new(),
            status_bar: StatusBar::new(),
            about_dialog: AboutDialog::new(),
            label_edit_dialog: LabelEditDialog::new(),
            notification_manager,
            reapply_theme: false,
            quit_requested: false,
        }
    }

    fn publish_canvas_output(&self, output: CanvasOutput) {
        if let Some(clicked) = output.clicked
            && clicked != self.selection
        {
            self.event_bus.publish(Event::SelectionChanged { node: clicked });
        }
        if let Some((id, position)) = output.moved {
            self.event_bus.publish(Event::NodeMoved { id, position });
        }
        if let Some((id, size)) = output.resized {
            self.event_bus.publish(Event::NodeResized { id, size });
        }
        if let Some((id, action)) = output.palette_action {
            match action {
                PaletteAction::EditLabel => {
                    if let Some(label) = self
                        .diagram
                        .node(&id)
                        .and_then(|node| node.data.label.as_ref())
                    {
                        self.event_bus.publish(Event::EditLabelRequested {
                            node: id,
                            label: label.id.clone(),
                        });
                    }
                }
                PaletteAction::ToggleFade => {
                    self.event_bus.publish(Event::FadeToggled { id });
                }
                PaletteAction::Delete => {
                    self.event_bus.publish(Event::NodeDeleted { id });
                }
            }
        }
        if let Some(DropGesture {
            template,
            target,
            position,
        }) = output.dropped
        {
            self.event_bus.publish(Event::ElementDropped {
                template,
                target,
                position,
            });
        }
    }

    fn materialize_drop(&mut self, template: ElementTemplate, target: Option<NodeId>, position: Vec2) {
        match (template, target) {
            (ElementTemplate::Item, Some(target_id)) => self.append_item(&target_id),
            (ElementTemplate::Item, None) => self.reject_drop("Items only fit inside lists"),
            (template, Some(_)) => self.reject_drop(&format!(
                "A {} cannot be dropped onto a node",
                template.display_name().to_lowercase()
            )),
            (template, None) => self.create_node(template, position),
        }
    }

    fn append_item(&mut self, target_id: &NodeId) {
        let appended = self
            .diagram
            .node_mut(target_id)
            .map(|node| match &mut node.variant {
                NodeVariant::List { items } => {
                    let text = format!("Item {}", items.len() + 1);
                    items.push(Label::new(uuid::Uuid::new_v4().to_string(), text));
                    true
                }
                _ => false,
            })
            .unwrap_or(false);

        if appended {
            tracing::debug!(target = %target_id, "item appended");
            self.drop_succeeded("Item added");
        } else {
            self.reject_drop("Items only fit inside lists");
        }
    }

    fn create_node(&mut self, template: ElementTemplate, position: Vec2) {
        let (variant, size) = match template {
            ElementTemplate::Rectangle => (NodeVariant::Rectangle, Vec2::new(160.0, 80.0)),
            ElementTemplate::Image => (
                NodeVariant::Image {
                    uri: LOGO_URI.to_string(),
                },
                Vec2::new(140.0, 110.0),
            ),
            ElementTemplate::List => (
                NodeVariant::List { items: Vec::new() },
                Vec2::new(180.0, 150.0),
            ),
            // Item on the background is rejected before this is reached.
            ElementTemplate::Item => return,
        };

        let id = NodeId::new(uuid::Uuid::new_v4().to_string());
        let origin = Vec2::new(position.x - size.x / 2.0, position.y - size.y / 2.0);
        let node = Node::new(id.clone(), variant, origin, size).with_label(Label::new(
            uuid::Uuid::new_v4().to_string(),
            template.display_name(),
        ));

        tracing::info!(%id, template = template.display_name(), "node created");
        self.diagram.nodes.push(node);
        self.selection = Some(id);
        self.drop_succeeded(format!("{} added", template.display_name()));
    }

    fn drop_succeeded(&mut self, message: impl Into<String>) {
        if self.settings.notifications.enabled && self.settings.notifications.show_drop_feedback {
            self.notification_manager.success(message);
        }
    }

    fn reject_drop(&mut self, message: &str) {
        tracing::debug!(message, "drop rejected");
        if self.settings.notifications.enabled {
            self.notification_manager.warning(message);
        }
    }

    fn selection_label(&self) -> Option<String> {
        let id = self.selection.as_ref()?;
        let text = self
            .diagram
            .node(id)
            .and_then(|node| node.data.label.as_ref())
            .map(|label| label.text.clone())
            .unwrap_or_else(|| id.to_string());
        Some(text)
    }
}

impl eframe::App for FlowdeckApp {
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.settings.save();
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.reapply_theme || self.theme.mode != self.settings.theme {
            self.theme = Theme::new(self.settings.theme);
            self.theme.apply(ctx);
            ctx.set_pixels_per_point(self.settings.ui_scale);
            self.style_resolver
                .set_theme_mode(self.settings.theme, to_core_color(self.theme.accent()));
            self.reapply_theme = false;
        }

        // Keyboard shortcuts stay quiet while a text field has focus.
        let typing = ctx.memory(|m| m.focused().is_some());
        if !typing && ctx.input(|i| i.key_pressed(egui::Key::Delete)) {
            if let Some(id) = self.selection.clone() {
                self.event_bus.publish(Event::NodeDeleted { id });
            }
        }
        if !typing && ctx.input(|i| i.key_pressed(egui::Key::Escape)) && self.selection.is_some() {
            self.event_bus.publish(Event::SelectionChanged { node: None });
        }

        // Gestures from the previous frame land here, before layout.
        let rx = self.event_bus.receiver();
        while let Ok(event) = rx.try_recv() {
            self.handle_event(&event);
        }
        if self.quit_requested {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }

        egui::TopBottomPanel::top("navbar").show(ctx, |ui| {
            navbar::ui(ui, &self.extension_registry, &self.event_bus, &self.diagram_name);
        });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            let selection_label = self.selection_label();
            self.status_bar.ui(
                ui,
                self.diagram.nodes.len(),
                self.diagram.edges.len(),
                self.canvas.zoom(),
                selection_label.as_deref(),
                self.theme.mode.display_name(),
            );
        });

        egui::SidePanel::left("element_sidebar")
            .resizable(false)
            .default_width(170.0)
            .show(ctx, |ui| {
                sidebar::ui(ui);
            });

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                let rect = ui.available_rect_before_wrap();
                let output = self.canvas.show(
                    ui,
                    rect,
                    &self.diagram,
                    self.selection.as_ref(),
                    &mut self.drag_positions,
                    &self.settings.canvas,
                    self.settings.show_tooltips,
                    &self.style_resolver,
                );
                self.publish_canvas_output(output);
            });

        if self.preferences_dialog.show(ctx, &mut self.settings) {
            self.reapply_theme = true;
        }
        self.about_dialog.ui(ctx, self.theme.accent());
        self.label_edit_dialog.ui(ctx, &self.event_bus);

        if self.settings.notifications.enabled {
            self.notification_manager
                .set_position(self.settings.notifications.position);
            self.notification_manager.render(ctx);
        }
    }
}

impl EventListener for FlowdeckApp {
    fn handle_event(&mut self, event: &Event) {
        tracing::debug!(?event, "handling event");
        match event {
            Event::SelectionChanged { node } => {
                self.selection = node.clone();
            }
            Event::NodeMoved { id, position } => {
                if let Some(node) = self.diagram.node_mut(id) {
                    node.position = *position;
                }
                // Drop the override so the model position shows again.
                self.drag_positions.remove(id);
            }
            Event::NodeResized { id, size } => {
                if let Some(node) = self.diagram.node_mut(id) {
                    node.size = *size;
                }
            }
            Event::EditLabelRequested { node, label } => {
                let current = self
                    .diagram
                    .node(node)
                    .and_then(|n| n.data.label.as_ref())
                    .map(|l| l.text.clone())
                    .unwrap_or_default();
                self.label_edit_dialog
                    .open_for(node.clone(), label.clone(), &current);
            }
            Event::LabelEdited { node, label, text } => {
                if let Some(n) = self.diagram.node_mut(node) {
                    if let Some(node_label) = n.data.label.as_mut().filter(|l| &l.id == label) {
                        node_label.text = text.clone();
                    } else if let NodeVariant::List { items } = &mut n.variant
                        && let Some(item) = items.iter_mut().find(|item| &item.id == label)
                    {
                        item.text = text.clone();
                    }
                }
            }
            Event::FadeToggled { id } => {
                if let Some(node) = self.diagram.node_mut(id) {
                    node.data.faded = !node.data.faded;
                }
            }
            Event::NodeDeleted { id } => {
                if self.diagram.remove_node(id).is_some() {
                    self.drag_positions.remove(id);
                    if self.selection.as_ref() == Some(id) {
                        self.selection = None;
                    }
                }
            }
            Event::ElementDropped {
                template,
                target,
                position,
            } => {
                self.materialize_drop(*template, target.clone(), *position);
            }
            Event::PreferencesRequested => {
                self.preferences_dialog.sync_with_current(&self.settings);
                self.preferences_dialog.open = true;
            }
            Event::AboutRequested => {
                self.about_dialog.is_open = true;
            }
            Event::QuitRequested => {
                self.quit_requested = true;
            }
        }
    }
}

/// The diagram the workbench opens with: one of each node kind plus a styled
/// rectangle, wired with a few edges.
fn sample_diagram() -> Diagram {
    let plan = Node::new(
        "plan",
        NodeVariant::Rectangle,
        Vec2::new(120.0, -150.0),
        Vec2::new(160.0, 80.0),
    )
    .with_label(Label::new("plan-label", "Plan release"));

    let review = Node::new(
        "review",
        NodeVariant::Rectangle,
        Vec2::new(140.0, 30.0),
        Vec2::new(160.0, 80.0),
    )
    .with_label(Label::new("review-label", "Review draft"))
    .with_style(NodeStyle {
        border_color: Some(Color::rgb(230, 150, 60)),
        border_style: Some(LineStyle::Dashed),
        ..NodeStyle::default()
    });

    let tasks = Node::new(
        "tasks",
        NodeVariant::List {
            items: vec![
                Label::new("task-1", "Collect findings"),
                Label::new("task-2", "Write summary"),
                Label::new("task-3", "Publish deck"),
            ],
        },
        Vec2::new(-130.0, -80.0),
        Vec2::new(190.0, 150.0),
    )
    .with_label(Label::new("tasks-label", "Checklist"));

    let logo = Node::new(
        "logo",
        NodeVariant::Image {
            uri: LOGO_URI.to_string(),
        },
        Vec2::new(-390.0, -60.0),
        Vec2::new(130.0, 110.0),
    )
    .with_label(Label::new("logo-label", "Flowdeck"));

    Diagram {
        nodes: vec![logo, tasks, plan, review],
        edges: vec![
            Edge::new("edge-plan-tasks", "plan", "tasks"),
            Edge::new("edge-review-tasks", "review", "tasks"),
            Edge::new("edge-tasks-logo", "tasks", "logo"),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_app() -> FlowdeckApp {
        let settings = AppSettings::default();
        let theme = Theme::new(settings.theme);
        let style_resolver = StyleResolver::new(settings.theme, to_core_color(theme.accent()));
        FlowdeckApp {
            diagram: sample_diagram(),
            diagram_name: "Test".to_string(),
            selection: None,
            drag_positions: HashMap::new(),
            event_bus: EventBus::new(),
            extension_registry: Arc::new(ExtensionRegistry::new()),
            preferences_dialog: PreferencesDialog::new(&settings),
            settings,
            theme,
            style_resolver,
            canvas: DiagramCanvas::new(),
            status_bar: StatusBar::new(),
            about_dialog: AboutDialog::new(),
            label_edit_dialog: LabelEditDialog::new(),
            notification_manager: NotificationManager::default(),
            reapply_theme: false,
            quit_requested: false,
        }
    }

    #[test]
    fn node_moved_applies_the_position_and_clears_the_override() {
        let mut app = test_app();
        let id = NodeId::from("plan");
        app.drag_positions.insert(id.clone(), Vec2::new(5.0, 5.0));

        app.handle_event(&Event::NodeMoved {
            id: id.clone(),
            position: Vec2::new(300.0, -20.0),
        });

        assert_eq!(app.diagram.node(&id).unwrap().position, Vec2::new(300.0, -20.0));
        assert!(app.drag_positions.is_empty());
    }

    #[test]
    fn deleting_the_selected_node_clears_the_selection() {
        let mut app = test_app();
        let id = NodeId::from("tasks");
        app.selection = Some(id.clone());

        app.handle_event(&Event::NodeDeleted { id: id.clone() });

        assert!(app.diagram.node(&id).is_none());
        assert!(app.selection.is_none());
        assert!(
            app.diagram
                .edges
                .iter()
                .all(|edge| edge.source != id && edge.target != id)
        );
    }

    #[test]
    fn background_drop_creates_a_centered_node_and_selects_it() {
        let mut app = test_app();
        let before = app.diagram.nodes.len();

        app.handle_event(&Event::ElementDropped {
            template: ElementTemplate::Rectangle,
            target: None,
            position: Vec2::new(100.0, 100.0),
        });

        assert_eq!(app.diagram.nodes.len(), before + 1);
        let node = app.diagram.nodes.last().unwrap();
        assert_eq!(node.variant, NodeVariant::Rectangle);
        assert_eq!(node.position, Vec2::new(100.0 - 80.0, 100.0 - 40.0));
        assert_eq!(app.selection.as_ref(), Some(&node.id));
        assert_eq!(
            node.data.label.as_ref().map(|l| l.text.as_str()),
            Some("Rectangle")
        );
    }

    #[test]
    fn item_drop_appends_to_the_list() {
        let mut app = test_app();
        let id = NodeId::from("tasks");

        app.handle_event(&Event::ElementDropped {
            template: ElementTemplate::Item,
            target: Some(id.clone()),
            position: Vec2::ZERO,
        });

        match &app.diagram.node(&id).unwrap().variant {
            NodeVariant::List { items } => {
                assert_eq!(items.len(), 4);
                assert_eq!(items[3].text, "Item 4");
            }
            other => panic!("expected a list, got {other:?}"),
        }
    }

    #[test]
    fn item_drop_on_a_rectangle_changes_nothing() {
        let mut app = test_app();
        let before = app.diagram.clone();

        app.handle_event(&Event::ElementDropped {
            template: ElementTemplate::Item,
            target: Some(NodeId::from("plan")),
            position: Vec2::ZERO,
        });
        app.handle_event(&Event::ElementDropped {
            template: ElementTemplate::Rectangle,
            target: Some(NodeId::from("plan")),
            position: Vec2::ZERO,
        });

        assert_eq!(app.diagram, before);
    }

    #[test]
    fn label_edit_reaches_node_labels_and_list_items() {
        let mut app = test_app();

        app.handle_event(&Event::LabelEdited {
            node: NodeId::from("plan"),
            label: flowdeck_core::LabelId::from("plan-label"),
            text: "Ship it".to_string(),
        });
        let plan = app.diagram.node(&NodeId::from("plan")).unwrap();
        assert_eq!(plan.data.label.as_ref().unwrap().text, "Ship it");

        app.handle_event(&Event::LabelEdited {
            node: NodeId::from("tasks"),
            label: flowdeck_core::LabelId::from("task-2"),
            text: "Rewrite summary".to_string(),
        });
        match &app.diagram.node(&NodeId::from("tasks")).unwrap().variant {
            NodeVariant::List { items } => assert_eq!(items[1].text, "Rewrite summary"),
            other => panic!("expected a list, got {other:?}"),
        }
    }

    #[test]
    fn fade_toggles_back_and_forth() {
        let mut app = test_app();
        let id = NodeId::from("plan");

        app.handle_event(&Event::FadeToggled { id: id.clone() });
        assert!(app.diagram.node(&id).unwrap().data.faded);
        app.handle_event(&Event::FadeToggled { id: id.clone() });
        assert!(!app.diagram.node(&id).unwrap().data.faded);
    }

    #[test]
    fn quit_request_sets_the_flag_for_the_frame_loop() {
        let mut app = test_app();
        app.handle_event(&Event::QuitRequested);
        assert!(app.quit_requested);
    }

    #[test]
    fn sample_diagram_edges_reference_existing_nodes() {
        let diagram = sample_diagram();
        for edge in &diagram.edges {
            assert!(diagram.node(&edge.source).is_some(), "missing {}", edge.source);
            assert!(diagram.node(&edge.target).is_some(), "missing {}", edge.target);
        }
    }
}
