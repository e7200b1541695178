pub mod about_dialog;
pub mod diagram;
pub mod label_edit_dialog;
pub mod navbar;
pub mod notifications;
pub mod preferences;
pub mod sidebar;
pub mod status_bar;
