use super::DocumentError;
use indexmap::IndexSet;
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// How many recently used files a [DocumentManager] remembers.
pub const MAX_RECENT_FILES: usize = 10;

/// Keeps track of recently opened or saved documents, most recent first.
///
/// The list is persisted as a small JSON file the host picks the location of.
///
/// # Example
/// ```
/// # use logisim_core::DocumentManager;
/// let mut manager = DocumentManager::new();
/// manager.add_recent_file("a.json");
/// manager.add_recent_file("b.json");
/// manager.add_recent_file("a.json");
///
/// let recent: Vec<_> = manager.recent_files().map(|p| p.to_str().unwrap()).collect();
/// assert_eq!(recent, vec!["a.json", "b.json"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentManager {
    recent_files: IndexSet<PathBuf>,
}
impl DocumentManager {
    pub fn new() -> Self {
        Default::default()
    }

    /// Moves `path` to the front of the recent files, dropping the oldest entry past
    /// [MAX_RECENT_FILES].
    pub fn add_recent_file<P: Into<PathBuf>>(&mut self, path: P) {
        let path = path.into();
        self.recent_files.shift_remove(&path);
        self.recent_files.insert(path);
        self.recent_files.move_index(self.recent_files.len() - 1, 0);
        self.recent_files.truncate(MAX_RECENT_FILES);
    }

    /// Returns true if `path` was in the list.
    pub fn remove_recent_file<P: AsRef<Path>>(&mut self, path: P) -> bool {
        self.recent_files.shift_remove(path.as_ref())
    }

    pub fn recent_files(&self) -> impl Iterator<Item = &Path> {
        self.recent_files.iter().map(PathBuf::as_path)
    }

    pub fn clear(&mut self) {
        self.recent_files.clear()
    }

    /// Loads the recent files saved with [DocumentManager::save_config], a missing file is an
    /// empty list.
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Self, DocumentError> {
        let path = path.as_ref();
        if !path.exists() {
            debug!("no config at {}", path.display());
            return Ok(Self::new());
        }
        let mut manager: Self = serde_json::from_str(&std::fs::read_to_string(path)?)?;
        manager.recent_files.truncate(MAX_RECENT_FILES);
        Ok(manager)
    }

    pub fn save_config<P: AsRef<Path>>(&self, path: P) -> Result<(), DocumentError> {
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(manager: &DocumentManager) -> Vec<String> {
        manager
            .recent_files()
            .map(|p| p.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_most_recent_first_and_capped() {
        let mut manager = DocumentManager::new();
        for i in 0..12 {
            manager.add_recent_file(format!("{}.json", i));
        }
        let recent = paths(&manager);
        assert_eq!(recent.len(), MAX_RECENT_FILES);
        assert_eq!(recent[0], "11.json");
        assert_eq!(recent[9], "2.json");

        manager.add_recent_file("5.json");
        let recent = paths(&manager);
        assert_eq!(recent.len(), MAX_RECENT_FILES);
        assert_eq!(recent[0], "5.json");
        assert_eq!(recent[1], "11.json");
        assert_eq!(recent.iter().filter(|p| *p == "5.json").count(), 1);
    }

    #[test]
    fn test_remove_and_clear() {
        let mut manager = DocumentManager::new();
        manager.add_recent_file("a.json");
        manager.add_recent_file("b.json");
        assert!(manager.remove_recent_file("a.json"));
        assert!(!manager.remove_recent_file("a.json"));
        assert_eq!(paths(&manager), vec!["b.json"]);

        manager.clear();
        assert_eq!(manager.recent_files().count(), 0);
    }

    #[test]
    fn test_config_round_trip() {
        let path = std::env::temp_dir().join(format!(
            "logisim_core_{}_recent.json",
            std::process::id()
        ));
        let mut manager = DocumentManager::new();
        manager.add_recent_file("first.json");
        manager.add_recent_file("second.json");
        manager.save_config(&path).unwrap();

        let loaded = DocumentManager::load_config(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(paths(&loaded), vec!["second.json", "first.json"]);

        let missing = DocumentManager::load_config(&path).unwrap();
        assert_eq!(missing, DocumentManager::new());
    }
}
