use std::{
    fs,
    path::PathBuf,
};

use serde::{
    de::DeserializeOwned,
    Serialize,
};

use crate::core::OboeruError;

const APP_NAME: &str = "oboeru";

/// User state directory, e.g. `~/.local/share/oboeru` on Linux. Falls back
/// to the working directory when no platform dir is available.
pub fn app_data_dir() -> PathBuf {
    if let Some(data_dir) = dirs::data_local_dir() {
        let app_dir = data_dir.join(APP_NAME);
        let _ = fs::create_dir_all(&app_dir);
        app_dir
    } else {
        PathBuf::from(".")
    }
}

pub fn data_file_path(filename: &str) -> PathBuf {
    app_data_dir().join(filename)
}

pub fn save_json<T: Serialize>(data: &T, filename: &str) -> Result<(), OboeruError> {
    let file_path = data_file_path(filename);
    let json = serde_json::to_string_pretty(data)?;
    fs::write(&file_path, json)?;
    Ok(())
}

fn load_json<T: DeserializeOwned + Default>(filename: &str) -> Result<T, OboeruError> {
    let file_path = data_file_path(filename);

    if !file_path.exists() {
        return Ok(T::default());
    }

    let json = fs::read_to_string(&file_path)?;
    let data: T = serde_json::from_str(&json)?;
    Ok(data)
}

pub fn load_json_or_default<T: DeserializeOwned + Default>(filename: &str) -> T {
    match load_json::<T>(filename) {
        Ok(data) => data,
        Err(e) => {
            eprintln!("Failed to load {}: {}. Using defaults.", filename, e);
            T::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gui::settings::SettingsData;

    fn unique_name(tag: &str) -> String {
        format!("test_{}_{}.json", tag, std::process::id())
    }

    #[test]
    fn test_settings_round_trip() {
        let filename = unique_name("settings");
        let settings = SettingsData { dark_mode: false };

        save_json(&settings, &filename).unwrap();
        let loaded: SettingsData = load_json_or_default(&filename);
        let _ = fs::remove_file(data_file_path(&filename));

        assert!(!loaded.dark_mode);
    }

    #[test]
    fn test_missing_file_falls_back_to_default() {
        let loaded: SettingsData = load_json_or_default(&unique_name("missing"));

        assert!(loaded.dark_mode);
    }

    #[test]
    fn test_corrupt_file_falls_back_to_default() {
        let filename = unique_name("corrupt");
        fs::write(data_file_path(&filename), "{ not json").unwrap();

        let loaded: SettingsData = load_json_or_default(&filename);
        let _ = fs::remove_file(data_file_path(&filename));

        assert!(loaded.dark_mode);
    }
}
