use std::fs;
use std::path::PathBuf;

use tracing::{info, warn};

use crate::analysis::JournalEntry;
use crate::error::ReframeError;

/// File-backed journal: a single JSON array, most recent entry first.
pub struct JournalStore {
    path: PathBuf,
}

impl JournalStore {
    /// Journal at the default platform data location.
    pub fn open_default() -> Result<Self, ReframeError> {
        let data_dir = dirs::data_dir().ok_or_else(|| {
            ReframeError::Persistence("Could not determine data directory".to_string())
        })?;
        Ok(Self::at_path(data_dir.join("mindshift").join("journal.json")))
    }

    pub fn at_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Current entries, most recent first. A missing or unreadable file
    /// starts a fresh list rather than failing the save.
    pub fn entries(&self) -> Vec<JournalEntry> {
        match fs::read_to_string(&self.path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                warn!(error = %e, path = %self.path.display(), "journal file unparseable, starting fresh");
                Vec::new()
            }),
            Err(_) => Vec::new(),
        }
    }

    /// Prepend an entry and write the whole list back.
    pub fn prepend(&self, entry: JournalEntry) -> Result<(), ReframeError> {
        let mut entries = self.entries();
        entries.insert(0, entry);

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                ReframeError::Persistence(format!(
                    "Could not save entry to journal. Local storage might be full or disabled. ({})",
                    e
                ))
            })?;
        }

        let content = serde_json::to_string_pretty(&entries)
            .map_err(|e| ReframeError::Persistence(format!("Could not serialize journal: {}", e)))?;
        fs::write(&self.path, content).map_err(|e| {
            ReframeError::Persistence(format!(
                "Could not save entry to journal. Local storage might be full or disabled. ({})",
                e
            ))
        })?;

        info!(path = %self.path.display(), count = entries.len(), "journal entry saved");
        Ok(())
    }
}
