// ABOUTME: Application state for the card creation wizard
// Owns the step wizard core, the draft text, segments, cards, and async action queue

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use tracing::{error, info, warn};

use crate::api::GenClient;
use crate::config::AppConfig;
use crate::models::{CardStatus, GeneratedCard, ProjectHistory, Segment, TemplateLibrary};
use crate::split::{self, SplitOptions};
use crate::wizard::{Step, StepWizard};

/// Most notifications kept on screen
const MAX_NOTIFICATIONS: usize = 5;

/// Async work queued by synchronous key handlers and drained in `App::tick`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AsyncAction {
    /// Split the draft through the backend chat endpoint
    SplitWithAi,
    /// Generate one image per segment with the selected template
    GenerateCards,
    /// Resolve payloads and write images to the output directory
    SaveCards,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    pub at: DateTime<Utc>,
}

/// Full mutable state behind the TUI. The view layer reads it and dispatches
/// events; only event processing and `App::tick` mutate it.
#[derive(Debug)]
pub struct AppState {
    /// Step navigation authority; all transitions go through it
    pub wizard: StepWizard,
    pub config: AppConfig,
    pub templates: TemplateLibrary,
    pub history: ProjectHistory,

    /// Draft text being edited on the input step
    pub draft_text: String,
    /// Cursor position in characters within the draft
    pub cursor_position: usize,

    /// Segments produced on the split step
    pub segments: Vec<Segment>,
    pub selected_segment_index: usize,

    /// Cards being generated/reviewed on the later steps
    pub cards: Vec<GeneratedCard>,
    pub selected_card_index: usize,

    pub selected_template_index: usize,

    /// In-flight markers for the async actions, rendered as spinners
    pub splitting_in_progress: bool,
    pub generating_in_progress: bool,
    pub saving_in_progress: bool,

    /// Paths written by the most recent save
    pub saved_paths: Vec<PathBuf>,

    pub notifications: Vec<Notification>,
    pub help_visible: bool,
    pub settings_visible: bool,
    pub should_quit: bool,

    pub pending_async_action: Option<AsyncAction>,

    /// Disk persistence is only armed once persisted state has been loaded,
    /// so freshly constructed instances (and tests) never touch the home
    /// directory
    persistence_enabled: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            wizard: StepWizard::new(),
            config: AppConfig::default(),
            templates: TemplateLibrary::builtin_only(),
            history: ProjectHistory::default(),
            draft_text: String::new(),
            cursor_position: 0,
            segments: Vec::new(),
            selected_segment_index: 0,
            cards: Vec::new(),
            selected_card_index: 0,
            selected_template_index: 0,
            splitting_in_progress: false,
            generating_in_progress: false,
            saving_in_progress: false,
            saved_paths: Vec::new(),
            notifications: Vec::new(),
            help_visible: false,
            settings_visible: false,
            should_quit: false,
            pending_async_action: None,
            persistence_enabled: false,
        }
    }

    /// Load config, templates, and history from disk, keeping defaults for
    /// anything missing or unreadable
    pub fn load_persisted(&mut self) {
        match AppConfig::load() {
            Ok(config) => self.config = config,
            Err(e) => warn!("Failed to load config, using defaults: {e:#}"),
        }

        if let Ok(path) = AppConfig::templates_path() {
            match TemplateLibrary::load_from(&path) {
                Ok(templates) => self.templates = templates,
                Err(e) => warn!("Failed to load templates, using presets: {e:#}"),
            }
        }

        if let Ok(path) = AppConfig::history_path() {
            match ProjectHistory::load_from(&path) {
                Ok(history) => self.history = history,
                Err(e) => warn!("Failed to load project history: {e:#}"),
            }
        }

        self.restore_template_selection();
        self.persistence_enabled = true;
    }

    /// Point the selection at the saved template, or the default preset
    fn restore_template_selection(&mut self) {
        let id = self
            .config
            .selected_template_id
            .clone()
            .unwrap_or_else(|| self.templates.default_template().id.clone());
        self.selected_template_index = self
            .templates
            .all()
            .iter()
            .position(|t| t.id == id)
            .unwrap_or(0);
    }

    // --- Per-step validation -------------------------------------------------

    /// Whether the active step's local state passes its own validation
    pub fn current_step_valid(&self) -> bool {
        match self.wizard.current_step() {
            Step::Input => split::splitter::is_valid_text_length(&self.draft_text),
            Step::Split => {
                !self.segments.is_empty() && self.segments.iter().all(|s| !s.text.trim().is_empty())
            }
            Step::Generate => {
                !self.cards.is_empty() && self.cards.iter().all(|c| c.status == CardStatus::Done)
            }
            // Final step: nothing to advance to
            Step::Download => false,
        }
    }

    /// Re-run the active step's validation and push the result through the
    /// wizard's single unlock channel. Called after every local edit and
    /// after every step transition, mirroring per-step validation hooks.
    pub fn refresh_advance_gate(&mut self) {
        let valid = self.current_step_valid();
        self.wizard.set_advance_ready(valid);
    }

    // --- Wizard transitions --------------------------------------------------

    /// Try to move forward. On entering the split step with no segments yet,
    /// the rule-based splitter runs immediately so the user always lands on
    /// a populated screen.
    pub fn next_step(&mut self) -> bool {
        if !self.wizard.advance() {
            return false;
        }

        if self.wizard.current_step() == Step::Split && self.segments.is_empty() {
            self.split_locally();
            self.history.record(&self.draft_text);
            self.persist_history();
        }

        self.refresh_advance_gate();
        true
    }

    pub fn prev_step(&mut self) -> bool {
        let moved = self.wizard.retreat();
        if moved {
            self.refresh_advance_gate();
        }
        moved
    }

    pub fn jump_to_step(&mut self, step: Step) -> bool {
        let moved = self.wizard.jump_to(step);
        if moved {
            self.refresh_advance_gate();
        }
        moved
    }

    /// Start over: wizard back to step one, working data cleared, settings kept
    pub fn reset_wizard(&mut self) {
        self.wizard.reset();
        self.draft_text.clear();
        self.cursor_position = 0;
        self.segments.clear();
        self.selected_segment_index = 0;
        self.cards.clear();
        self.selected_card_index = 0;
        self.saved_paths.clear();
        self.splitting_in_progress = false;
        self.generating_in_progress = false;
        self.saving_in_progress = false;
    }

    // --- Input step ----------------------------------------------------------

    pub fn input_char(&mut self, c: char) {
        let byte_idx = self.byte_index(self.cursor_position);
        self.draft_text.insert(byte_idx, c);
        self.cursor_position += 1;
        self.refresh_advance_gate();
    }

    pub fn input_backspace(&mut self) {
        if self.cursor_position == 0 {
            return;
        }
        self.cursor_position -= 1;
        let byte_idx = self.byte_index(self.cursor_position);
        self.draft_text.remove(byte_idx);
        self.refresh_advance_gate();
    }

    pub fn input_paste(&mut self, text: &str) {
        let byte_idx = self.byte_index(self.cursor_position);
        self.draft_text.insert_str(byte_idx, text);
        self.cursor_position += text.chars().count();
        self.refresh_advance_gate();
    }

    pub fn cursor_left(&mut self) {
        self.cursor_position = self.cursor_position.saturating_sub(1);
    }

    pub fn cursor_right(&mut self) {
        let len = self.draft_text.chars().count();
        if self.cursor_position < len {
            self.cursor_position += 1;
        }
    }

    /// Replace the draft with a recent project's text
    pub fn load_recent_project(&mut self, index: usize) {
        if let Some(project) = self.history.all().get(index) {
            self.draft_text = project.text.clone();
            self.cursor_position = self.draft_text.chars().count();
            self.segments.clear();
            self.cards.clear();
            self.refresh_advance_gate();
            self.add_success_notification("Loaded recent project");
        }
    }

    fn byte_index(&self, char_idx: usize) -> usize {
        self.draft_text
            .char_indices()
            .nth(char_idx)
            .map_or(self.draft_text.len(), |(i, _)| i)
    }

    // --- Split step ----------------------------------------------------------

    /// Run the rule-based splitter over the current draft
    pub fn split_locally(&mut self) {
        self.segments = split::split_text(&self.draft_text, SplitOptions::default());
        self.selected_segment_index = 0;
        // Segments changed, existing cards no longer match
        self.cards.clear();
        self.refresh_advance_gate();
    }

    pub fn delete_selected_segment(&mut self) {
        if self.selected_segment_index >= self.segments.len() {
            return;
        }
        self.segments.remove(self.selected_segment_index);
        reindex(&mut self.segments);
        if self.selected_segment_index >= self.segments.len() && !self.segments.is_empty() {
            self.selected_segment_index = self.segments.len() - 1;
        }
        self.cards.clear();
        self.refresh_advance_gate();
    }

    /// Merge the selected segment with the one after it
    pub fn merge_selected_segment(&mut self) {
        let idx = self.selected_segment_index;
        if idx + 1 >= self.segments.len() {
            return;
        }
        let next = self.segments.remove(idx + 1);
        if let Some(segment) = self.segments.get_mut(idx) {
            segment.text.push_str("\n\n");
            segment.text.push_str(&next.text);
        }
        reindex(&mut self.segments);
        self.cards.clear();
        self.refresh_advance_gate();
    }

    pub fn next_segment(&mut self) {
        if !self.segments.is_empty() {
            self.selected_segment_index =
                (self.selected_segment_index + 1).min(self.segments.len() - 1);
        }
    }

    pub fn prev_segment(&mut self) {
        self.selected_segment_index = self.selected_segment_index.saturating_sub(1);
    }

    // --- Generate step -------------------------------------------------------

    pub fn next_template(&mut self) {
        let count = self.templates.all().len();
        if count > 0 {
            self.selected_template_index = (self.selected_template_index + 1) % count;
            self.store_template_selection();
        }
    }

    pub fn prev_template(&mut self) {
        let count = self.templates.all().len();
        if count > 0 {
            self.selected_template_index = (self.selected_template_index + count - 1) % count;
            self.store_template_selection();
        }
    }

    fn store_template_selection(&mut self) {
        if let Some(template) = self.templates.all().get(self.selected_template_index) {
            self.config.selected_template_id = Some(template.id.clone());
        }
    }

    pub fn next_card(&mut self) {
        if !self.cards.is_empty() {
            self.selected_card_index = (self.selected_card_index + 1).min(self.cards.len() - 1);
        }
    }

    pub fn prev_card(&mut self) {
        self.selected_card_index = self.selected_card_index.saturating_sub(1);
    }

    // --- Notifications -------------------------------------------------------

    pub fn add_success_notification(&mut self, message: impl Into<String>) {
        self.push_notification(NotificationKind::Success, message.into());
    }

    pub fn add_error_notification(&mut self, message: impl Into<String>) {
        self.push_notification(NotificationKind::Error, message.into());
    }

    fn push_notification(&mut self, kind: NotificationKind, message: String) {
        self.notifications.insert(
            0,
            Notification {
                kind,
                message,
                at: Utc::now(),
            },
        );
        self.notifications.truncate(MAX_NOTIFICATIONS);
    }

    // --- Persistence helpers -------------------------------------------------

    pub fn persist_config(&mut self) {
        if !self.persistence_enabled {
            return;
        }
        if let Err(e) = self.config.save() {
            error!("Failed to save config: {e:#}");
            self.add_error_notification("Failed to save settings");
        }
    }

    fn persist_history(&mut self) {
        if !self.persistence_enabled {
            return;
        }
        let result = AppConfig::history_path().and_then(|path| self.history.save_to(&path));
        if let Err(e) = result {
            warn!("Failed to save project history: {e:#}");
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

fn reindex(segments: &mut [Segment]) {
    for (i, segment) in segments.iter_mut().enumerate() {
        segment.index = i;
    }
}

/// The application: state plus the backend client, driven by the TUI loop
pub struct App {
    pub state: AppState,
    client: Option<GenClient>,
}

impl App {
    pub fn new() -> Self {
        Self {
            state: AppState::new(),
            client: None,
        }
    }

    /// One-time startup work before the event loop
    pub fn init(&mut self) {
        self.state.load_persisted();
        info!("cardforge initialized, {} templates", self.state.templates.all().len());
    }

    fn client(&mut self) -> Result<&GenClient> {
        if self.client.is_none() {
            let auth = self.state.config.gen_auth();
            let client = GenClient::new(auth)?
                .with_models(
                    self.state.config.api.chat_model.clone(),
                    self.state.config.api.image_model.clone(),
                );
            self.client = Some(client);
        }
        self.client
            .as_ref()
            .context("generation client unavailable")
    }

    /// Drain the pending async action, if any. Runs on the tick interval of
    /// the TUI loop; the wizard itself never performs I/O.
    pub async fn tick(&mut self) -> Result<()> {
        let Some(action) = self.state.pending_async_action.take() else {
            return Ok(());
        };

        match action {
            AsyncAction::SplitWithAi => self.run_ai_split().await,
            AsyncAction::GenerateCards => self.run_generation().await,
            AsyncAction::SaveCards => self.run_save().await,
        }

        Ok(())
    }

    async fn run_ai_split(&mut self) {
        self.state.splitting_in_progress = true;
        let draft = self.state.draft_text.clone();

        let result = match self.client() {
            Ok(client) => split::ai::ai_split(client, &draft, SplitOptions::default()).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(segments) => {
                info!("AI split produced {} segments", segments.len());
                self.state.segments = segments;
                self.state.selected_segment_index = 0;
                self.state.cards.clear();
                self.state.add_success_notification("AI split complete");
            }
            Err(e) => {
                error!("AI split failed: {e:#}");
                self.state.add_error_notification(format!("AI split failed: {e}"));
            }
        }

        self.state.splitting_in_progress = false;
        self.state.refresh_advance_gate();
    }

    async fn run_generation(&mut self) {
        if self.state.segments.is_empty() {
            self.state.add_error_notification("Nothing to generate: no segments");
            return;
        }

        self.state.generating_in_progress = true;
        self.state.cards = self.state.segments.iter().map(GeneratedCard::from_segment).collect();
        self.state.selected_card_index = 0;

        let template = self
            .state
            .templates
            .all()
            .get(self.state.selected_template_index)
            .cloned()
            .unwrap_or_else(|| self.state.templates.default_template().clone());
        let size = self.state.config.image_size.clone();
        let watermark = self.state.config.watermark_enabled;

        let client = match self.client() {
            Ok(client) => client.clone(),
            Err(e) => {
                error!("Cannot generate: {e:#}");
                self.state.add_error_notification(format!("{e}"));
                self.state.generating_in_progress = false;
                return;
            }
        };

        let mut failures = 0usize;
        for idx in 0..self.state.cards.len() {
            self.state.cards[idx].mark_generating();

            let prompt = format!(
                "Design a social-media text card. Style: {}. The card text reads:\n{}",
                template.style_prompt, self.state.cards[idx].text
            );

            match client.generate_image(&prompt, &size, watermark).await {
                Ok(image) => self.state.cards[idx].mark_done(image),
                Err(e) => {
                    warn!("Card {idx} generation failed: {e}");
                    self.state.cards[idx].mark_failed(e.to_string());
                    failures += 1;
                }
            }
        }

        if failures == 0 {
            self.state
                .add_success_notification(format!("Generated {} cards", self.state.cards.len()));
        } else {
            self.state
                .add_error_notification(format!("{failures} card(s) failed to generate"));
        }

        self.state.generating_in_progress = false;
        self.state.refresh_advance_gate();
    }

    async fn run_save(&mut self) {
        self.state.saving_in_progress = true;
        self.state.saved_paths.clear();

        let dir = self.state.config.resolved_output_dir();
        let result = self.save_cards_to(&dir).await;

        match result {
            Ok(count) => {
                self.state
                    .add_success_notification(format!("Saved {count} images to {}", dir.display()));
            }
            Err(e) => {
                error!("Save failed: {e:#}");
                self.state.add_error_notification(format!("Save failed: {e}"));
            }
        }

        self.state.saving_in_progress = false;
    }

    async fn save_cards_to(&mut self, dir: &PathBuf) -> Result<usize> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;

        let done: Vec<(String, crate::models::ImageData)> = self
            .state
            .cards
            .iter()
            .filter(|c| c.status == CardStatus::Done)
            .filter_map(|c| c.image.clone().map(|img| (c.file_name(), img)))
            .collect();

        anyhow::ensure!(!done.is_empty(), "no completed cards to save");

        let client = self.client()?.clone();
        let mut saved = Vec::new();
        for (name, image) in done {
            let bytes = client.image_bytes(&image).await?;
            let path = dir.join(&name);
            std::fs::write(&path, bytes)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            saved.push(path);
        }

        let count = saved.len();
        self.state.saved_paths = saved;
        Ok(count)
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const VALID_TEXT: &str = "A draft that is comfortably long enough to pass validation.";

    fn state_with_text() -> AppState {
        let mut state = AppState::new();
        state.input_paste(VALID_TEXT);
        state
    }

    #[test]
    fn test_initial_state_is_locked_at_input() {
        let state = AppState::new();
        assert_eq!(state.wizard.current_step(), Step::Input);
        assert!(!state.wizard.can_advance());
        assert!(!state.wizard.can_go_back());
    }

    #[test]
    fn test_typing_valid_text_opens_gate() {
        let state = state_with_text();
        assert!(state.wizard.can_advance());
    }

    #[test]
    fn test_deleting_below_minimum_closes_gate() {
        let mut state = AppState::new();
        state.input_paste("0123456789a");
        assert!(state.wizard.can_advance());

        state.input_backspace();
        state.input_backspace();
        assert!(!state.wizard.can_advance());
    }

    #[test]
    fn test_next_step_splits_and_revalidates() {
        let mut state = state_with_text();
        assert!(state.next_step());

        assert_eq!(state.wizard.current_step(), Step::Split);
        assert!(!state.segments.is_empty());
        // The split step's own validation sees segments and reopens the gate
        assert!(state.wizard.can_advance());
    }

    #[test]
    fn test_next_step_refused_without_validation() {
        let mut state = AppState::new();
        state.input_paste("short");
        assert!(!state.next_step());
        assert_eq!(state.wizard.current_step(), Step::Input);
    }

    #[test]
    fn test_generate_step_locked_until_cards_done() {
        let mut state = state_with_text();
        state.next_step();
        state.next_step();
        assert_eq!(state.wizard.current_step(), Step::Generate);
        assert!(!state.wizard.can_advance());

        state.cards = state.segments.iter().map(GeneratedCard::from_segment).collect();
        state.refresh_advance_gate();
        assert!(!state.wizard.can_advance());

        for card in &mut state.cards {
            card.mark_done(crate::models::ImageData::Url("https://x/y.png".into()));
        }
        state.refresh_advance_gate();
        assert!(state.wizard.can_advance());
    }

    #[test]
    fn test_segment_editing_clears_cards() {
        let mut state = state_with_text();
        state.next_step();
        state.cards = state.segments.iter().map(GeneratedCard::from_segment).collect();

        state.delete_selected_segment();
        assert!(state.cards.is_empty());
    }

    #[test]
    fn test_merge_segments() {
        let mut state = AppState::new();
        state.segments = vec![Segment::new(0, "first"), Segment::new(1, "second")];
        state.selected_segment_index = 0;

        state.merge_selected_segment();
        assert_eq!(state.segments.len(), 1);
        assert!(state.segments[0].text.contains("first"));
        assert!(state.segments[0].text.contains("second"));
        assert_eq!(state.segments[0].index, 0);
    }

    #[test]
    fn test_reset_clears_working_data_but_keeps_settings() {
        let mut state = state_with_text();
        state.config.watermark_enabled = false;
        state.next_step();

        state.reset_wizard();
        assert_eq!(state.wizard.current_step(), Step::Input);
        assert!(state.draft_text.is_empty());
        assert!(state.segments.is_empty());
        assert!(!state.config.watermark_enabled);
    }

    #[test]
    fn test_template_cycling_wraps() {
        let mut state = AppState::new();
        let count = state.templates.all().len();
        for _ in 0..count {
            state.next_template();
        }
        assert_eq!(state.selected_template_index, 0);

        state.prev_template();
        assert_eq!(state.selected_template_index, count - 1);
    }

    #[test]
    fn test_notifications_capped() {
        let mut state = AppState::new();
        for i in 0..10 {
            state.add_success_notification(format!("note {i}"));
        }
        assert_eq!(state.notifications.len(), MAX_NOTIFICATIONS);
        assert_eq!(state.notifications[0].message, "note 9");
    }
}
