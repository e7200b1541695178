//! Extension points of the workbench navbar menu.
//!
//! These identifiers are the integration contract with plugin code: a
//! container slot wrapping the whole menu body, and an entry slot appending
//! items after the built-in ones. Both are process-wide statics; overrides
//! are registered against the identifier in the [`ExtensionRegistry`] the app
//! shell builds at startup.
//!
//! [`ExtensionRegistry`]: flowdeck_extensions::ExtensionRegistry

use flowdeck_extensions::{
    empty_component, passthrough_container, ComponentExtensionPoint, ContainerExtensionPoint,
};

/// Props handed to both navbar menu slots.
pub struct NavbarMenuProps {
    pub diagram_name: String,
}

/// Wraps the burger menu's content. The fallback renders the children
/// unchanged.
pub static NAVBAR_MENU_CONTAINER: ContainerExtensionPoint<NavbarMenuProps> =
    ContainerExtensionPoint {
        identifier: "workbenchNavbarMenu#container",
        fallback: passthrough_container,
    };

/// Extra menu items appended after the built-in entries. The fallback
/// renders nothing.
pub static NAVBAR_MENU_ENTRY: ComponentExtensionPoint<NavbarMenuProps> =
    ComponentExtensionPoint {
        identifier: "workbenchNavbarMenu#entry",
        fallback: empty_component,
    };
