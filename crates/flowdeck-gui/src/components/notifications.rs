use crate::settings::NotificationPosition;
use eframe::egui;
use egui_notify::{Anchor, Toast, Toasts};
use std::time::{Duration, Instant};

/// Identical messages fired within this window collapse into one toast.
const DEDUP_WINDOW: Duration = Duration::from_secs(2);
const MAX_RECENT: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// Toast manager wrapping egui-notify. Rejected drops and other transient
/// feedback land here instead of in a modal.
pub struct NotificationManager {
    toasts: Toasts,
    position: NotificationPosition,
    recent: Vec<(String, Instant)>,
}

fn anchor_for(position: NotificationPosition) -> Anchor {
    match position {
        NotificationPosition::TopLeft => Anchor::TopLeft,
        NotificationPosition::TopRight => Anchor::TopRight,
        NotificationPosition::BottomLeft => Anchor::BottomLeft,
        NotificationPosition::BottomRight => Anchor::BottomRight,
    }
}

impl NotificationManager {
    pub fn new(position: NotificationPosition) -> Self {
        Self {
            toasts: build_toasts(position),
            position,
            recent: Vec::new(),
        }
    }

    /// Re-anchor when the preference changes. Rebuilding drops any toast
    /// still on screen; the dedup history is untouched.
    pub fn set_position(&mut self, position: NotificationPosition) {
        if self.position != position {
            self.position = position;
            self.toasts = build_toasts(position);
        }
    }

    pub fn notify(&mut self, level: NotificationLevel, message: impl Into<String>) {
        let message = message.into();
        if self.is_duplicate(&message) {
            return;
        }

        self.recent.push((message.clone(), Instant::now()));
        if self.recent.len() > MAX_RECENT {
            self.recent.remove(0);
        }

        let (mut toast, secs) = match level {
            NotificationLevel::Info => (Toast::info(&message), 3),
            NotificationLevel::Success => (Toast::success(&message), 4),
            NotificationLevel::Warning => (Toast::warning(&message), 5),
            NotificationLevel::Error => (Toast::error(&message), 8),
        };
        toast.duration(Some(Duration::from_secs(secs)));
        self.toasts.add(toast);
    }

    fn is_duplicate(&mut self, message: &str) -> bool {
        let now = Instant::now();
        self.recent
            .retain(|(_, at)| now.duration_since(*at) < Duration::from_secs(60));
        self.recent
            .iter()
            .any(|(msg, at)| msg == message && now.duration_since(*at) < DEDUP_WINDOW)
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.notify(NotificationLevel::Info, message);
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.notify(NotificationLevel::Success, message);
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.notify(NotificationLevel::Warning, message);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.notify(NotificationLevel::Error, message);
    }

    /// Render queued toasts. Call once per frame.
    pub fn render(&mut self, ctx: &egui::Context) {
        self.toasts.show(ctx);
    }
}

fn build_toasts(position: NotificationPosition) -> Toasts {
    Toasts::new()
        .with_anchor(anchor_for(position))
        .with_margin(egui::vec2(8.0, 8.0))
}

impl Default for NotificationManager {
    fn default() -> Self {
        Self::new(NotificationPosition::TopRight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_level_queues_a_toast() {
        let mut mgr = NotificationManager::default();
        mgr.info("info");
        mgr.success("success");
        mgr.warning("warning");
        mgr.error("error");
        assert_eq!(mgr.recent.len(), 4);
    }

    #[test]
    fn repeated_messages_collapse() {
        let mut mgr = NotificationManager::default();
        mgr.warning("Items only fit inside lists");
        assert!(mgr.is_duplicate("Items only fit inside lists"));
        mgr.warning("Items only fit inside lists");
        assert_eq!(mgr.recent.len(), 1);
    }

    #[test]
    fn reanchoring_keeps_the_dedup_history() {
        let mut mgr = NotificationManager::default();
        mgr.info("moved");
        mgr.set_position(NotificationPosition::BottomLeft);
        assert!(mgr.is_duplicate("moved"));
    }
}
