use std::{
    collections::HashSet,
    fs,
    path::PathBuf,
};

use super::errors::OboeruError;
use crate::persistence;

pub const MASTERY_FILE: &str = "mastered_ids.json";

/// Which catalog items the user has marked as mastered. The set is held in
/// memory and written back on every change, so a crash loses at most the
/// change in flight.
#[derive(Debug)]
pub struct MasteryStore {
    ids: HashSet<String>,
    file_path: PathBuf,
}

impl MasteryStore {
    pub fn load() -> Self {
        Self::load_from(persistence::data_file_path(MASTERY_FILE))
    }

    /// A missing or unreadable file is an empty store, never an error.
    pub fn load_from(file_path: PathBuf) -> Self {
        let ids = if file_path.exists() {
            match fs::read_to_string(&file_path) {
                Ok(content) => match serde_json::from_str::<Vec<String>>(&content) {
                    Ok(list) => list.into_iter().collect(),
                    Err(e) => {
                        eprintln!(
                            "Failed to parse {}: {}. Starting with no mastered items.",
                            file_path.display(),
                            e
                        );
                        HashSet::new()
                    }
                },
                Err(e) => {
                    eprintln!(
                        "Failed to read {}: {}. Starting with no mastered items.",
                        file_path.display(),
                        e
                    );
                    HashSet::new()
                }
            }
        } else {
            HashSet::new()
        };

        Self { ids, file_path }
    }

    pub fn is_mastered(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn ids(&self) -> &HashSet<String> {
        &self.ids
    }

    pub fn mastered_count(&self) -> usize {
        self.ids.len()
    }

    /// Flips the mastered state of `id`, writes the store back and returns
    /// the new state.
    pub fn toggle(&mut self, id: &str) -> bool {
        let now_mastered = if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.to_string());
            true
        };

        self.save();
        now_mastered
    }

    pub fn reset(&mut self) {
        self.ids.clear();
        if self.file_path.exists() {
            if let Err(e) = fs::remove_file(&self.file_path) {
                eprintln!("Failed to delete {}: {}", self.file_path.display(), e);
            }
        }
    }

    fn save(&self) {
        if let Err(e) = self.write_to_disk() {
            eprintln!("Failed to save {}: {}", self.file_path.display(), e);
        }
    }

    // Ids are written sorted, so the file contents depend only on the set
    // and not on insertion order.
    fn write_to_disk(&self) -> Result<(), OboeruError> {
        if let Some(parent) = self.file_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut sorted: Vec<&str> = self.ids.iter().map(String::as_str).collect();
        sorted.sort_unstable();

        let json = serde_json::to_string_pretty(&sorted)?;
        fs::write(&self.file_path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        let path = std::env::temp_dir()
            .join(format!("oboeru_mastery_{}_{}", name, std::process::id()))
            .join(MASTERY_FILE);
        let _ = fs::remove_file(&path);
        path
    }

    #[test]
    fn test_toggle_persists_and_reloads() {
        let path = temp_path("reload");
        let mut store = MasteryStore::load_from(path.clone());

        assert!(store.toggle("k1"));
        assert!(store.toggle("v3"));
        // Second toggle of the same id flips it back off.
        assert!(!store.toggle("k1"));

        let reloaded = MasteryStore::load_from(path);
        assert!(reloaded.is_mastered("v3"));
        assert!(!reloaded.is_mastered("k1"));
        assert_eq!(reloaded.mastered_count(), 1);
    }

    #[test]
    fn test_double_toggle_restores_file_contents() {
        let path = temp_path("double");
        let mut store = MasteryStore::load_from(path.clone());

        store.toggle("v1");
        let before = fs::read_to_string(&path).unwrap();

        store.toggle("k9");
        store.toggle("k9");
        let after = fs::read_to_string(&path).unwrap();

        assert_eq!(before, after);
        assert!(store.is_mastered("v1"));
        assert!(!store.is_mastered("k9"));
    }

    #[test]
    fn test_file_contents_are_sorted_ids() {
        let path = temp_path("sorted");
        let mut store = MasteryStore::load_from(path.clone());

        store.toggle("v2");
        store.toggle("g1");
        store.toggle("k5");

        let content = fs::read_to_string(&path).unwrap();
        let list: Vec<String> = serde_json::from_str(&content).unwrap();
        assert_eq!(list, ["g1", "k5", "v2"]);
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let store = MasteryStore::load_from(temp_path("missing"));
        assert_eq!(store.mastered_count(), 0);
    }

    #[test]
    fn test_corrupt_file_loads_empty() {
        let path = temp_path("corrupt");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "not valid json [").unwrap();

        let store = MasteryStore::load_from(path);
        assert_eq!(store.mastered_count(), 0);
    }

    #[test]
    fn test_reset_clears_memory_and_deletes_file() {
        let path = temp_path("reset");
        let mut store = MasteryStore::load_from(path.clone());

        store.toggle("k1");
        assert!(path.exists());

        store.reset();
        assert_eq!(store.mastered_count(), 0);
        assert!(!path.exists());
    }
}
