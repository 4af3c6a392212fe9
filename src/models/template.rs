// ABOUTME: Card templates controlling the visual style sent to the generation backend
// Built-in presets plus user templates persisted in the config directory

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Visual style for a card, expressed as a prompt fragment for the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardTemplate {
    /// Stable identifier, e.g. "preset_classic_blue"
    pub id: String,
    /// Display name
    pub name: String,
    /// Style instructions appended to every card prompt
    pub style_prompt: String,
    /// Whether this is a built-in preset (presets are not editable)
    #[serde(default)]
    pub builtin: bool,
}

impl CardTemplate {
    pub fn new(id: impl Into<String>, name: impl Into<String>, style_prompt: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            style_prompt: style_prompt.into(),
            builtin: false,
        }
    }
}

/// Built-in presets available without any user configuration
pub fn builtin_templates() -> Vec<CardTemplate> {
    vec![
        CardTemplate {
            id: "preset_classic_blue".to_string(),
            name: "Classic Blue".to_string(),
            style_prompt: "clean card layout, deep blue background, large white serif \
                           headline, generous margins, subtle paper texture"
                .to_string(),
            builtin: true,
        },
        CardTemplate {
            id: "preset_warm_minimal".to_string(),
            name: "Warm Minimal".to_string(),
            style_prompt: "minimalist card, warm cream background, dark charcoal sans-serif \
                           text, single accent line in terracotta"
                .to_string(),
            builtin: true,
        },
        CardTemplate {
            id: "preset_night_neon".to_string(),
            name: "Night Neon".to_string(),
            style_prompt: "dark card with neon gradient border, bold white text, soft glow, \
                           modern social media aesthetic"
                .to_string(),
            builtin: true,
        },
    ]
}

/// All templates: built-in presets plus user-defined ones loaded from disk
#[derive(Debug, Clone)]
pub struct TemplateLibrary {
    templates: Vec<CardTemplate>,
}

impl TemplateLibrary {
    /// Library containing only the built-in presets
    pub fn builtin_only() -> Self {
        Self {
            templates: builtin_templates(),
        }
    }

    /// Load presets plus any user templates from the given file
    pub fn load_from(path: &PathBuf) -> Result<Self> {
        let mut templates = builtin_templates();

        if path.exists() {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read templates from {}", path.display()))?;
            let user: Vec<CardTemplate> = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse templates from {}", path.display()))?;
            templates.extend(user.into_iter().map(|mut t| {
                t.builtin = false;
                t
            }));
        }

        Ok(Self { templates })
    }

    /// Persist the user-defined templates (presets are never written)
    pub fn save_to(&self, path: &PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let user: Vec<&CardTemplate> = self.templates.iter().filter(|t| !t.builtin).collect();
        let content = serde_json::to_string_pretty(&user)?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write templates to {}", path.display()))?;
        Ok(())
    }

    pub fn all(&self) -> &[CardTemplate] {
        &self.templates
    }

    pub fn get(&self, id: &str) -> Option<&CardTemplate> {
        self.templates.iter().find(|t| t.id == id)
    }

    /// Add a user template, replacing any existing one with the same id
    pub fn upsert(&mut self, template: CardTemplate) {
        if let Some(existing) = self
            .templates
            .iter_mut()
            .find(|t| t.id == template.id && !t.builtin)
        {
            *existing = template;
        } else if self.get(&template.id).is_none() {
            self.templates.push(template);
        }
    }

    /// Remove a user template. Presets cannot be removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.templates.len();
        self.templates.retain(|t| t.builtin || t.id != id);
        self.templates.len() != before
    }

    /// Fallback selection when no saved choice exists: the first preset
    pub fn default_template(&self) -> &CardTemplate {
        self.get("preset_classic_blue")
            .unwrap_or(&self.templates[0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_builtin_presets_present() {
        let library = TemplateLibrary::builtin_only();
        assert!(library.get("preset_classic_blue").is_some());
        assert!(library.all().iter().all(|t| t.builtin));
    }

    #[test]
    fn test_save_load_round_trip_keeps_user_templates() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("templates.json");

        let mut library = TemplateLibrary::builtin_only();
        library.upsert(CardTemplate::new("my_style", "My Style", "pink background"));
        library.save_to(&path).unwrap();

        let loaded = TemplateLibrary::load_from(&path).unwrap();
        let user = loaded.get("my_style").unwrap();
        assert_eq!(user.name, "My Style");
        assert!(!user.builtin);
        // Presets come back too
        assert!(loaded.get("preset_classic_blue").is_some());
    }

    #[test]
    fn test_presets_cannot_be_removed() {
        let mut library = TemplateLibrary::builtin_only();
        assert!(!library.remove("preset_classic_blue"));
        assert!(library.get("preset_classic_blue").is_some());
    }

    #[test]
    fn test_upsert_replaces_user_template() {
        let mut library = TemplateLibrary::builtin_only();
        library.upsert(CardTemplate::new("my_style", "First", "a"));
        library.upsert(CardTemplate::new("my_style", "Second", "b"));

        let count = library.all().iter().filter(|t| t.id == "my_style").count();
        assert_eq!(count, 1);
        assert_eq!(library.get("my_style").unwrap().name, "Second");
    }
}
