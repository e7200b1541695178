use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub theme: ThemeMode,
    pub ui_scale: f32,
    #[serde(default = "default_true")]
    pub show_tooltips: bool,

    #[serde(default)]
    pub notifications: NotificationSettings,
    #[serde(default)]
    pub canvas: CanvasSettings,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            theme: ThemeMode::Mocha,
            ui_scale: 1.0,
            show_tooltips: true,
            notifications: NotificationSettings::default(),
            canvas: CanvasSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ThemeMode {
    #[serde(alias = "Light")]
    Latte,
    Frappe,
    Macchiato,
    #[default]
    #[serde(alias = "Dark")]
    Mocha,
}

impl ThemeMode {
    pub fn display_name(&self) -> &'static str {
        match self {
            ThemeMode::Latte => "Latte",
            ThemeMode::Frappe => "Frappé",
            ThemeMode::Macchiato => "Macchiato",
            ThemeMode::Mocha => "Mocha",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationSettings {
    pub enabled: bool,
    pub position: NotificationPosition,
    pub show_drop_feedback: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            position: NotificationPosition::TopRight,
            show_drop_feedback: true,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum NotificationPosition {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanvasSettings {
    pub show_grid: bool,
    pub grid_size: f32,
    #[serde(default = "default_true")]
    pub show_edge_arrows: bool,
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            show_grid: true,
            grid_size: 24.0,
            show_edge_arrows: true,
        }
    }
}

fn default_true() -> bool {
    true
}

impl AppSettings {
    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("flowdeck").join("settings.json"))
    }

    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };
        tracing::info!("Loading settings from {:?}", path);
        Self::load_from(&path)
    }

    fn load_from(path: &Path) -> Self {
        if path.exists() {
            match std::fs::read_to_string(path) {
                Ok(content) => match serde_json::from_str(&content) {
                    Ok(settings) => return settings,
                    Err(e) => tracing::error!("Failed to parse settings: {}", e),
                },
                Err(e) => tracing::error!("Failed to read settings file: {}", e),
            }
        } else {
            tracing::info!("Settings file not found, using defaults");
        }
        Self::default()
    }

    pub fn save(&self) {
        if let Some(path) = Self::config_path() {
            self.save_to(&path);
        }
    }

    fn save_to(&self, path: &Path) {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                let _ = std::fs::create_dir_all(parent);
            }
        }
        match serde_json::to_string_pretty(self) {
            Ok(content) => {
                if let Err(e) = std::fs::write(path, content) {
                    tracing::error!("Failed to write settings file: {}", e);
                }
            }
            Err(e) => tracing::error!("Failed to serialize settings: {}", e),
        }
    }
}
