// ABOUTME: Integration tests driving the wizard through the public API
// Exercises step transitions, validation gates, and the event handler together

use cardforge::app::{AppEvent, AppState, EventHandler};
use cardforge::models::{CardStatus, ImageData};
use cardforge::wizard::Step;

const SAMPLE_TEXT: &str = "First paragraph with enough characters to pass the length check.\n\n\
Second paragraph, also long enough to stand on its own as a card.";

fn state_with_text() -> AppState {
    let mut state = AppState::new();
    state.input_paste(SAMPLE_TEXT);
    state
}

fn mark_all_cards_done(state: &mut AppState) {
    for card in &mut state.cards {
        card.mark_done(ImageData::Url(format!("https://img/{}.png", card.index)));
    }
    state.refresh_advance_gate();
}

#[test]
fn empty_draft_blocks_the_first_step() {
    let mut state = AppState::new();
    assert!(!state.next_step());
    assert_eq!(state.wizard.current_step(), Step::Input);
}

#[test]
fn entering_split_step_populates_segments() {
    let mut state = state_with_text();
    assert!(state.next_step());
    assert_eq!(state.wizard.current_step(), Step::Split);
    assert!(!state.segments.is_empty());
    // Non-empty segments unlock the next step immediately
    assert!(state.wizard.can_advance());
}

#[test]
fn generate_step_stays_locked_until_all_cards_done() {
    let mut state = state_with_text();
    assert!(state.next_step());
    assert!(state.next_step());
    assert_eq!(state.wizard.current_step(), Step::Generate);
    assert!(!state.next_step());

    state.cards = state
        .segments
        .iter()
        .map(cardforge::models::GeneratedCard::from_segment)
        .collect();
    state.refresh_advance_gate();
    assert!(!state.wizard.can_advance());

    mark_all_cards_done(&mut state);
    assert!(state.next_step());
    assert_eq!(state.wizard.current_step(), Step::Download);
}

#[test]
fn one_failed_card_keeps_the_gate_closed() {
    let mut state = state_with_text();
    state.next_step();
    state.next_step();
    state.cards = state
        .segments
        .iter()
        .map(cardforge::models::GeneratedCard::from_segment)
        .collect();
    mark_all_cards_done(&mut state);
    state.cards[0].mark_failed("backend error");
    state.refresh_advance_gate();

    assert!(!state.next_step());
    assert_eq!(state.wizard.current_step(), Step::Generate);
    assert_eq!(state.cards[0].status, CardStatus::Failed);
}

#[test]
fn going_back_and_forward_revalidates_each_step() {
    let mut state = state_with_text();
    state.next_step();
    assert!(state.prev_step());
    assert_eq!(state.wizard.current_step(), Step::Input);
    // Draft text still valid, so the gate reopens
    assert!(state.wizard.can_advance());

    assert!(state.next_step());
    assert_eq!(state.wizard.current_step(), Step::Split);
}

#[test]
fn jump_back_to_input_discards_forward_path() {
    let mut state = state_with_text();
    state.next_step();
    state.next_step();
    assert_eq!(state.wizard.history().len(), 3);

    assert!(state.jump_to_step(Step::Input));
    assert_eq!(state.wizard.history(), &[Step::Input]);
    assert!(!state.wizard.can_go_back());

    // The forward path is gone, only re-advancing rebuilds it
    assert!(!state.jump_to_step(Step::Generate));
}

#[test]
fn reset_clears_work_but_keeps_settings() {
    let mut state = state_with_text();
    state.config.watermark_enabled = false;
    state.next_step();
    state.next_step();

    state.reset_wizard();
    assert_eq!(state.wizard.current_step(), Step::Input);
    assert!(state.draft_text.is_empty());
    assert!(state.segments.is_empty());
    assert!(state.cards.is_empty());
    assert!(!state.config.watermark_enabled);
}

#[test]
fn events_drive_the_wizard_end_to_end() {
    let mut state = AppState::new();
    EventHandler::process_event(AppEvent::PasteText(SAMPLE_TEXT.to_string()), &mut state);
    EventHandler::process_event(AppEvent::NextStep, &mut state);
    assert_eq!(state.wizard.current_step(), Step::Split);

    EventHandler::process_event(AppEvent::PrevStep, &mut state);
    assert_eq!(state.wizard.current_step(), Step::Input);

    EventHandler::process_event(AppEvent::Quit, &mut state);
    assert!(state.should_quit);
}

#[test]
fn jump_events_only_reach_visited_steps() {
    let mut state = state_with_text();
    state.next_step();

    EventHandler::process_event(AppEvent::JumpToStep(Step::Download), &mut state);
    assert_eq!(state.wizard.current_step(), Step::Split);

    EventHandler::process_event(AppEvent::JumpToStep(Step::Input), &mut state);
    assert_eq!(state.wizard.current_step(), Step::Input);
}
