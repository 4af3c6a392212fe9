// ABOUTME: Event handling system for keyboard input and app actions
// Maps crossterm key events to AppEvents per step, then applies them to state

use crate::app::state::{AppState, AsyncAction};
use crate::wizard::Step;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

/// Image sizes offered in settings, cycled in order
const IMAGE_SIZES: &[&str] = &["1024x1365", "1024x1024", "1365x1024"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Quit,
    ToggleHelp,
    ToggleSettings,
    // Wizard navigation
    NextStep,
    PrevStep,
    JumpToStep(Step),
    ResetWizard,
    // Input step
    InputChar(char),
    InputBackspace,
    InputCursorLeft,
    InputCursorRight,
    PasteText(String),
    LoadRecentProject,
    // Split step
    NextSegment,
    PrevSegment,
    DeleteSegment,
    MergeSegment,
    SplitLocal,
    SplitWithAi,
    // Generate step
    NextTemplate,
    PrevTemplate,
    StartGeneration,
    NextCard,
    PrevCard,
    // Download step
    SaveCards,
    // Settings popup
    ToggleWatermark,
    CycleImageSize,
    CloseSettings,
}

pub struct EventHandler;

impl EventHandler {
    /// Translate a key event into an app event for the current state.
    /// Returns None for keys with no meaning right now.
    pub fn handle_key_event(key: KeyEvent, state: &AppState) -> Option<AppEvent> {
        // Global chords work everywhere, including while typing
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') | KeyCode::Char('q') => return Some(AppEvent::Quit),
                KeyCode::Char('r') => return Some(AppEvent::ResetWizard),
                KeyCode::Char('o') => return Some(AppEvent::ToggleSettings),
                _ => {}
            }
        }

        if state.settings_visible {
            return Self::handle_settings_key(key);
        }

        if state.help_visible {
            // Any key dismisses the help overlay
            return Some(AppEvent::ToggleHelp);
        }

        match state.wizard.current_step() {
            Step::Input => Self::handle_input_step_key(key),
            Step::Split => Self::handle_split_step_key(key),
            Step::Generate => Self::handle_generate_step_key(key),
            Step::Download => Self::handle_download_step_key(key),
        }
    }

    fn handle_settings_key(key: KeyEvent) -> Option<AppEvent> {
        match key.code {
            KeyCode::Esc | KeyCode::Char('o') | KeyCode::Enter => Some(AppEvent::CloseSettings),
            KeyCode::Char('w') => Some(AppEvent::ToggleWatermark),
            KeyCode::Char('s') => Some(AppEvent::CycleImageSize),
            _ => None,
        }
    }

    /// The input step owns every printable character; navigation is chorded
    fn handle_input_step_key(key: KeyEvent) -> Option<AppEvent> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('l') => Some(AppEvent::LoadRecentProject),
                KeyCode::Char('h') => Some(AppEvent::ToggleHelp),
                _ => None,
            };
        }

        match key.code {
            KeyCode::Tab => Some(AppEvent::NextStep),
            KeyCode::Enter => Some(AppEvent::InputChar('\n')),
            KeyCode::Backspace => Some(AppEvent::InputBackspace),
            KeyCode::Left => Some(AppEvent::InputCursorLeft),
            KeyCode::Right => Some(AppEvent::InputCursorRight),
            KeyCode::F(1) => Some(AppEvent::ToggleHelp),
            KeyCode::Char(c) => Some(AppEvent::InputChar(c)),
            _ => None,
        }
    }

    fn handle_split_step_key(key: KeyEvent) -> Option<AppEvent> {
        Self::common_nav_key(key).or(match key.code {
            KeyCode::Down | KeyCode::Char('j') => Some(AppEvent::NextSegment),
            KeyCode::Up | KeyCode::Char('k') => Some(AppEvent::PrevSegment),
            KeyCode::Char('d') => Some(AppEvent::DeleteSegment),
            KeyCode::Char('m') => Some(AppEvent::MergeSegment),
            KeyCode::Char('s') => Some(AppEvent::SplitLocal),
            KeyCode::Char('a') => Some(AppEvent::SplitWithAi),
            _ => None,
        })
    }

    fn handle_generate_step_key(key: KeyEvent) -> Option<AppEvent> {
        Self::common_nav_key(key).or(match key.code {
            KeyCode::Down | KeyCode::Char('j') => Some(AppEvent::NextTemplate),
            KeyCode::Up | KeyCode::Char('k') => Some(AppEvent::PrevTemplate),
            KeyCode::Char('g') => Some(AppEvent::StartGeneration),
            KeyCode::Char('n') => Some(AppEvent::NextCard),
            KeyCode::Char('p') => Some(AppEvent::PrevCard),
            _ => None,
        })
    }

    fn handle_download_step_key(key: KeyEvent) -> Option<AppEvent> {
        Self::common_nav_key(key).or(match key.code {
            KeyCode::Down | KeyCode::Char('j') => Some(AppEvent::NextCard),
            KeyCode::Up | KeyCode::Char('k') => Some(AppEvent::PrevCard),
            KeyCode::Char('s') => Some(AppEvent::SaveCards),
            _ => None,
        })
    }

    /// Navigation shared by the non-typing steps
    fn common_nav_key(key: KeyEvent) -> Option<AppEvent> {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Some(AppEvent::Quit),
            KeyCode::Char('?') | KeyCode::F(1) => Some(AppEvent::ToggleHelp),
            KeyCode::Char('o') => Some(AppEvent::ToggleSettings),
            KeyCode::Enter | KeyCode::Char('l') | KeyCode::Right | KeyCode::Tab => {
                Some(AppEvent::NextStep)
            }
            KeyCode::Char('h') | KeyCode::Left | KeyCode::Backspace => Some(AppEvent::PrevStep),
            KeyCode::Char('1') => Some(AppEvent::JumpToStep(Step::Input)),
            KeyCode::Char('2') => Some(AppEvent::JumpToStep(Step::Split)),
            KeyCode::Char('3') => Some(AppEvent::JumpToStep(Step::Generate)),
            KeyCode::Char('4') => Some(AppEvent::JumpToStep(Step::Download)),
            _ => None,
        }
    }

    /// Apply an event to the state. Wizard guard refusals are deliberate
    /// no-ops; the view renders disabled controls instead of errors.
    pub fn process_event(event: AppEvent, state: &mut AppState) {
        match event {
            AppEvent::Quit => state.should_quit = true,
            AppEvent::ToggleHelp => state.help_visible = !state.help_visible,
            AppEvent::ToggleSettings => state.settings_visible = !state.settings_visible,

            AppEvent::NextStep => {
                if !state.next_step() {
                    debug!("advance refused at step {:?}", state.wizard.current_step());
                }
            }
            AppEvent::PrevStep => {
                state.prev_step();
            }
            AppEvent::JumpToStep(step) => {
                if !state.jump_to_step(step) {
                    debug!("jump to {:?} refused: not on visited path", step);
                }
            }
            AppEvent::ResetWizard => state.reset_wizard(),

            AppEvent::InputChar(c) => state.input_char(c),
            AppEvent::InputBackspace => state.input_backspace(),
            AppEvent::InputCursorLeft => state.cursor_left(),
            AppEvent::InputCursorRight => state.cursor_right(),
            AppEvent::PasteText(text) => state.input_paste(&text),
            AppEvent::LoadRecentProject => state.load_recent_project(0),

            AppEvent::NextSegment => state.next_segment(),
            AppEvent::PrevSegment => state.prev_segment(),
            AppEvent::DeleteSegment => state.delete_selected_segment(),
            AppEvent::MergeSegment => state.merge_selected_segment(),
            AppEvent::SplitLocal => state.split_locally(),
            AppEvent::SplitWithAi => {
                state.pending_async_action = Some(AsyncAction::SplitWithAi);
            }

            AppEvent::NextTemplate => state.next_template(),
            AppEvent::PrevTemplate => state.prev_template(),
            AppEvent::StartGeneration => {
                state.pending_async_action = Some(AsyncAction::GenerateCards);
            }
            AppEvent::NextCard => state.next_card(),
            AppEvent::PrevCard => state.prev_card(),

            AppEvent::SaveCards => {
                state.pending_async_action = Some(AsyncAction::SaveCards);
            }

            AppEvent::ToggleWatermark => {
                state.config.watermark_enabled = !state.config.watermark_enabled;
            }
            AppEvent::CycleImageSize => {
                let current = IMAGE_SIZES
                    .iter()
                    .position(|s| *s == state.config.image_size)
                    .unwrap_or(0);
                state.config.image_size = IMAGE_SIZES[(current + 1) % IMAGE_SIZES.len()].to_string();
            }
            AppEvent::CloseSettings => {
                state.settings_visible = false;
                state.persist_config();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn state_at_split() -> AppState {
        let mut state = AppState::new();
        state.input_paste("enough text to pass the length validation easily");
        assert!(state.next_step());
        state
    }

    #[test]
    fn test_input_step_captures_printable_chars() {
        let state = AppState::new();
        assert_eq!(
            EventHandler::handle_key_event(key(KeyCode::Char('q')), &state),
            Some(AppEvent::InputChar('q'))
        );
        assert_eq!(
            EventHandler::handle_key_event(ctrl('q'), &state),
            Some(AppEvent::Quit)
        );
    }

    #[test]
    fn test_tab_advances_from_input_step() {
        let state = AppState::new();
        assert_eq!(
            EventHandler::handle_key_event(key(KeyCode::Tab), &state),
            Some(AppEvent::NextStep)
        );
    }

    #[test]
    fn test_split_step_keys() {
        let state = state_at_split();
        assert_eq!(
            EventHandler::handle_key_event(key(KeyCode::Char('a')), &state),
            Some(AppEvent::SplitWithAi)
        );
        assert_eq!(
            EventHandler::handle_key_event(key(KeyCode::Char('q')), &state),
            Some(AppEvent::Quit)
        );
        assert_eq!(
            EventHandler::handle_key_event(key(KeyCode::Char('2')), &state),
            Some(AppEvent::JumpToStep(Step::Split))
        );
    }

    #[test]
    fn test_settings_popup_intercepts_keys() {
        let mut state = state_at_split();
        state.settings_visible = true;
        assert_eq!(
            EventHandler::handle_key_event(key(KeyCode::Char('w')), &state),
            Some(AppEvent::ToggleWatermark)
        );
        assert_eq!(
            EventHandler::handle_key_event(key(KeyCode::Esc), &state),
            Some(AppEvent::CloseSettings)
        );
    }

    #[test]
    fn test_refused_advance_leaves_state_unchanged() {
        let mut state = AppState::new();
        state.input_paste("short");
        let history_before = state.wizard.history().to_vec();

        EventHandler::process_event(AppEvent::NextStep, &mut state);

        assert_eq!(state.wizard.history(), history_before.as_slice());
        assert_eq!(state.wizard.current_step(), Step::Input);
    }

    #[test]
    fn test_jump_to_unvisited_step_is_refused() {
        let mut state = state_at_split();
        EventHandler::process_event(AppEvent::JumpToStep(Step::Download), &mut state);
        assert_eq!(state.wizard.current_step(), Step::Split);
    }

    #[test]
    fn test_jump_back_to_input_truncates_history() {
        let mut state = state_at_split();
        EventHandler::process_event(AppEvent::JumpToStep(Step::Input), &mut state);
        assert_eq!(state.wizard.current_step(), Step::Input);
        assert_eq!(state.wizard.history(), &[Step::Input]);
    }

    #[test]
    fn test_async_actions_are_queued_not_run() {
        let mut state = state_at_split();
        EventHandler::process_event(AppEvent::SplitWithAi, &mut state);
        assert_eq!(state.pending_async_action, Some(AsyncAction::SplitWithAi));
    }

    #[test]
    fn test_cycle_image_size_wraps() {
        let mut state = AppState::new();
        let first = state.config.image_size.clone();
        for _ in 0..IMAGE_SIZES.len() {
            EventHandler::process_event(AppEvent::CycleImageSize, &mut state);
        }
        assert_eq!(state.config.image_size, first);
    }

    #[test]
    fn test_help_overlay_dismissed_by_any_key() {
        let mut state = state_at_split();
        state.help_visible = true;
        assert_eq!(
            EventHandler::handle_key_event(key(KeyCode::Char('x')), &state),
            Some(AppEvent::ToggleHelp)
        );
    }
}
