// ABOUTME: Recent project history shown on the input step
// Persisted as JSON in the config directory, newest first, capped

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use uuid::Uuid;

/// Maximum number of recent projects kept on disk
pub const MAX_RECENT_PROJECTS: usize = 10;

/// A previously entered text, reloadable from the input step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentProject {
    pub id: Uuid,
    /// First line of the text, truncated for display
    pub title: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl RecentProject {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let title: String = text.lines().next().unwrap_or("").chars().take(40).collect();
        Self {
            id: Uuid::new_v4(),
            title,
            text,
            created_at: Utc::now(),
        }
    }
}

/// Ordered history of recent projects, newest first
#[derive(Debug, Clone, Default)]
pub struct ProjectHistory {
    projects: Vec<RecentProject>,
}

impl ProjectHistory {
    pub fn load_from(path: &PathBuf) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read project history from {}", path.display()))?;
        let projects: Vec<RecentProject> = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse project history from {}", path.display()))?;
        Ok(Self { projects })
    }

    pub fn save_to(&self, path: &PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let content = serde_json::to_string_pretty(&self.projects)?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write project history to {}", path.display()))?;
        Ok(())
    }

    /// Record a text at the front of the history, dropping the oldest entries
    /// beyond the cap. Re-entering identical text refreshes its position.
    pub fn record(&mut self, text: &str) {
        self.projects.retain(|p| p.text != text);
        self.projects.insert(0, RecentProject::new(text));
        self.projects.truncate(MAX_RECENT_PROJECTS);
    }

    pub fn get(&self, id: Uuid) -> Option<&RecentProject> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn all(&self) -> &[RecentProject] {
        &self.projects
    }

    pub fn clear(&mut self) {
        self.projects.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_record_is_newest_first_and_capped() {
        let mut history = ProjectHistory::default();
        for i in 0..15 {
            history.record(&format!("text number {i}"));
        }

        assert_eq!(history.all().len(), MAX_RECENT_PROJECTS);
        assert_eq!(history.all()[0].text, "text number 14");
    }

    #[test]
    fn test_record_deduplicates_identical_text() {
        let mut history = ProjectHistory::default();
        history.record("alpha");
        history.record("beta");
        history.record("alpha");

        assert_eq!(history.all().len(), 2);
        assert_eq!(history.all()[0].text, "alpha");
    }

    #[test]
    fn test_title_is_first_line_truncated() {
        let project = RecentProject::new("a very short title\nwith a second line");
        assert_eq!(project.title, "a very short title");
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.json");

        let mut history = ProjectHistory::default();
        history.record("persisted text");
        history.save_to(&path).unwrap();

        let loaded = ProjectHistory::load_from(&path).unwrap();
        assert_eq!(loaded.all().len(), 1);
        assert_eq!(loaded.all()[0].text, "persisted text");
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let history = ProjectHistory::load_from(&dir.path().join("missing.json")).unwrap();
        assert!(history.is_empty());
    }
}
