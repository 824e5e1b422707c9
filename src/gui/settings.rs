pub const SETTINGS_FILE: &str = "settings.json";

/// User preferences persisted between sessions.
#[derive(Clone, serde::Serialize, serde::Deserialize)]
pub struct SettingsData {
    pub dark_mode: bool,
}

impl Default for SettingsData {
    fn default() -> Self {
        Self { dark_mode: true }
    }
}
