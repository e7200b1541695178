//! Named, overridable UI slots.
//!
//! An extension point declares a slot in the host UI: a globally unique string
//! identifier plus a fallback component that renders when nothing was plugged
//! in. Plugins register overrides against the identifier in an
//! [`ExtensionRegistry`]; the host resolves the point at render time and shows
//! whichever component wins.
//!
//! Two slot flavors exist, matching how egui composes UI:
//! - [`ComponentExtensionPoint`]: a leaf component drawing into a `Ui`.
//! - [`ContainerExtensionPoint`]: a wrapper that additionally receives the
//!   child content as an `add_contents` closure, like egui's own containers.
//!
//! Points are declared as `static` items (fallbacks are plain fn pointers, so
//! declarations are const-constructible); the registry is built once at
//! startup and shared read-only afterwards.

use std::any::Any;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use thiserror::Error;

/// Signature of a leaf slot component.
pub type ComponentFn<P> = fn(&mut egui::Ui, &mut P);

/// Child content handed to a container component.
pub type AddContents<'c> = dyn FnMut(&mut egui::Ui) + 'c;

/// Signature of a container slot component.
pub type ContainerFn<P> = fn(&mut egui::Ui, &mut P, &mut AddContents<'_>);

type BoxedComponent<P> = Box<dyn Fn(&mut egui::Ui, &mut P) + Send + Sync>;
type BoxedContainer<P> = Box<dyn Fn(&mut egui::Ui, &mut P, &mut AddContents<'_>) + Send + Sync>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtensionError {
    #[error("extension point {identifier:?} already has a registered component")]
    AlreadyRegistered { identifier: &'static str },
}

/// A leaf slot: identifier plus the component used when nothing is registered.
pub struct ComponentExtensionPoint<P> {
    pub identifier: &'static str,
    pub fallback: ComponentFn<P>,
}

/// A container slot: the component wraps child content supplied by the host.
pub struct ContainerExtensionPoint<P> {
    pub identifier: &'static str,
    pub fallback: ContainerFn<P>,
}

/// Fallback for container slots that keeps the children as they are.
pub fn passthrough_container<P>(
    ui: &mut egui::Ui,
    _props: &mut P,
    add_contents: &mut AddContents<'_>,
) {
    add_contents(ui);
}

/// Fallback for leaf slots that contribute nothing by default.
pub fn empty_component<P>(_ui: &mut egui::Ui, _props: &mut P) {}

enum ComponentSource<'a, P> {
    Registered(&'a BoxedComponent<P>),
    Fallback(ComponentFn<P>),
}

/// A leaf component picked by the registry, ready to render.
pub struct ResolvedComponent<'a, P> {
    source: ComponentSource<'a, P>,
}

impl<P> ResolvedComponent<'_, P> {
    pub fn show(&self, ui: &mut egui::Ui, props: &mut P) {
        match &self.source {
            ComponentSource::Registered(component) => component(ui, props),
            ComponentSource::Fallback(component) => component(ui, props),
        }
    }

    /// True when the declared fallback is being used.
    pub fn is_fallback(&self) -> bool {
        matches!(self.source, ComponentSource::Fallback(_))
    }
}

enum ContainerSource<'a, P> {
    Registered(&'a BoxedContainer<P>),
    Fallback(ContainerFn<P>),
}

/// A container component picked by the registry, ready to render.
pub struct ResolvedContainer<'a, P> {
    source: ContainerSource<'a, P>,
}

impl<P> ResolvedContainer<'_, P> {
    pub fn show(&self, ui: &mut egui::Ui, props: &mut P, mut add_contents: impl FnMut(&mut egui::Ui)) {
        match &self.source {
            ContainerSource::Registered(component) => component(ui, props, &mut add_contents),
            ContainerSource::Fallback(component) => component(ui, props, &mut add_contents),
        }
    }

    /// True when the declared fallback is being used.
    pub fn is_fallback(&self) -> bool {
        matches!(self.source, ContainerSource::Fallback(_))
    }
}

/// Maps extension point identifiers to registered override components.
///
/// One namespace covers both slot flavors; identifiers must be unique across
/// the whole application, and registering twice under the same identifier is
/// an error rather than a silent replacement.
#[derive(Default)]
pub struct ExtensionRegistry {
    components: HashMap<&'static str, Box<dyn Any + Send + Sync>>,
}

impl ExtensionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an override for a leaf slot.
    pub fn register<P: 'static>(
        &mut self,
        point: &ComponentExtensionPoint<P>,
        component: impl Fn(&mut egui::Ui, &mut P) + Send + Sync + 'static,
    ) -> Result<(), ExtensionError> {
        let boxed: BoxedComponent<P> = Box::new(component);
        self.insert(point.identifier, Box::new(boxed))
    }

    /// Register an override for a container slot.
    pub fn register_container<P: 'static>(
        &mut self,
        point: &ContainerExtensionPoint<P>,
        component: impl Fn(&mut egui::Ui, &mut P, &mut AddContents<'_>) + Send + Sync + 'static,
    ) -> Result<(), ExtensionError> {
        let boxed: BoxedContainer<P> = Box::new(component);
        self.insert(point.identifier, Box::new(boxed))
    }

    /// Resolve a leaf slot to its registered override, or the declared
    /// fallback when nothing is registered.
    pub fn resolve<'a, P: 'static>(
        &'a self,
        point: &ComponentExtensionPoint<P>,
    ) -> ResolvedComponent<'a, P> {
        let source = match self.lookup::<BoxedComponent<P>>(point.identifier) {
            Some(component) => ComponentSource::Registered(component),
            None => ComponentSource::Fallback(point.fallback),
        };
        ResolvedComponent { source }
    }

    /// Resolve a container slot to its registered override, or the declared
    /// fallback when nothing is registered.
    pub fn resolve_container<'a, P: 'static>(
        &'a self,
        point: &ContainerExtensionPoint<P>,
    ) -> ResolvedContainer<'a, P> {
        let source = match self.lookup::<BoxedContainer<P>>(point.identifier) {
            Some(component) => ContainerSource::Registered(component),
            None => ContainerSource::Fallback(point.fallback),
        };
        ResolvedContainer { source }
    }

    /// Whether any component is registered under `identifier`.
    pub fn contains(&self, identifier: &str) -> bool {
        self.components.contains_key(identifier)
    }

    fn insert(
        &mut self,
        identifier: &'static str,
        value: Box<dyn Any + Send + Sync>,
    ) -> Result<(), ExtensionError> {
        match self.components.entry(identifier) {
            Entry::Occupied(_) => Err(ExtensionError::AlreadyRegistered { identifier }),
            Entry::Vacant(slot) => {
                slot.insert(value);
                Ok(())
            }
        }
    }

    fn lookup<T: 'static>(&self, identifier: &'static str) -> Option<&T> {
        let stored = self.components.get(identifier)?;
        let downcast = stored.downcast_ref::<T>();
        if downcast.is_none() {
            // A registration under this identifier exists but its props type
            // does not match the point being resolved. Identifier reuse
            // across different slots is a wiring bug; surface it and render
            // the fallback instead of nothing.
            tracing::warn!(
                identifier,
                "registered extension has a different props type, using fallback"
            );
        }
        downcast
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct MenuProps {
        title: String,
    }

    struct BadgeProps {
        count: usize,
    }

    static TEST_CONTAINER: ContainerExtensionPoint<MenuProps> = ContainerExtensionPoint {
        identifier: "test#container",
        fallback: passthrough_container,
    };

    static TEST_ENTRY: ComponentExtensionPoint<MenuProps> = ComponentExtensionPoint {
        identifier: "test#entry",
        fallback: empty_component,
    };

    /// Run a closure inside a real egui Ui for one frame.
    fn run_ui(mut body: impl FnMut(&mut egui::Ui)) {
        let ctx = egui::Context::default();
        let _ = ctx.run(Default::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| body(ui));
        });
    }

    #[test]
    fn unregistered_identifier_resolves_to_the_fallback() {
        let registry = ExtensionRegistry::new();
        assert!(registry.resolve(&TEST_ENTRY).is_fallback());
        assert!(registry.resolve_container(&TEST_CONTAINER).is_fallback());
    }

    #[test]
    fn registered_override_replaces_the_fallback() {
        let mut registry = ExtensionRegistry::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = calls.clone();
        registry
            .register(&TEST_ENTRY, move |_ui, props: &mut MenuProps| {
                assert_eq!(props.title, "File");
                seen.fetch_add(1, Ordering::SeqCst);
            })
            .unwrap();

        let resolved = registry.resolve(&TEST_ENTRY);
        assert!(!resolved.is_fallback());

        let mut props = MenuProps {
            title: "File".to_string(),
        };
        run_ui(|ui| resolved.show(ui, &mut props));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn container_fallback_renders_children_unchanged() {
        let registry = ExtensionRegistry::new();
        let resolved = registry.resolve_container(&TEST_CONTAINER);

        let mut props = MenuProps {
            title: "Menu".to_string(),
        };
        let mut children_rendered = 0;
        run_ui(|ui| {
            resolved.show(ui, &mut props, |_ui| {
                children_rendered += 1;
            });
        });
        assert_eq!(children_rendered, 1);
    }

    #[test]
    fn entry_fallback_renders_nothing() {
        let registry = ExtensionRegistry::new();
        let resolved = registry.resolve(&TEST_ENTRY);

        let mut props = MenuProps {
            title: "Menu".to_string(),
        };
        let mut element_count_delta = 0;
        run_ui(|ui| {
            let before = ui.min_rect();
            resolved.show(ui, &mut props);
            if ui.min_rect() != before {
                element_count_delta += 1;
            }
        });
        assert_eq!(element_count_delta, 0, "fallback must not draw anything");
    }

    #[test]
    fn duplicate_registration_is_an_error_and_keeps_the_first() {
        let mut registry = ExtensionRegistry::new();
        registry
            .register(&TEST_ENTRY, |_ui, props: &mut MenuProps| {
                props.title = "first".to_string();
            })
            .unwrap();

        let result = registry.register(&TEST_ENTRY, |_ui, props: &mut MenuProps| {
            props.title = "second".to_string();
        });
        assert_eq!(
            result,
            Err(ExtensionError::AlreadyRegistered {
                identifier: "test#entry"
            })
        );

        let mut props = MenuProps {
            title: String::new(),
        };
        let resolved = registry.resolve(&TEST_ENTRY);
        run_ui(|ui| resolved.show(ui, &mut props));
        assert_eq!(props.title, "first");
    }

    #[test]
    fn mismatched_props_type_falls_back() {
        // Same identifier string, used from a point with a different props
        // shape. The registry refuses to call the stored component.
        static BADGE_POINT: ComponentExtensionPoint<BadgeProps> = ComponentExtensionPoint {
            identifier: "test#entry",
            fallback: empty_component,
        };

        let mut registry = ExtensionRegistry::new();
        registry
            .register(&TEST_ENTRY, |_ui, _props: &mut MenuProps| {})
            .unwrap();

        let resolved = registry.resolve(&BADGE_POINT);
        assert!(resolved.is_fallback());

        let mut props = BadgeProps { count: 0 };
        run_ui(|ui| resolved.show(ui, &mut props));
        assert_eq!(props.count, 0);
    }

    #[test]
    fn container_override_can_wrap_and_reorder_children() {
        let mut registry = ExtensionRegistry::new();
        registry
            .register_container(
                &TEST_CONTAINER,
                |ui: &mut egui::Ui, props: &mut MenuProps, add_contents: &mut AddContents<'_>| {
                    props.title.push_str("/wrapped");
                    // Render the children twice: overrides control the
                    // children entirely.
                    add_contents(ui);
                    add_contents(ui);
                },
            )
            .unwrap();

        let mut props = MenuProps {
            title: "Menu".to_string(),
        };
        let mut children_rendered = 0;
        let resolved = registry.resolve_container(&TEST_CONTAINER);
        run_ui(|ui| {
            resolved.show(ui, &mut props, |_ui| {
                children_rendered += 1;
            });
        });
        assert_eq!(children_rendered, 2);
        assert_eq!(props.title, "Menu/wrapped");
    }
}
