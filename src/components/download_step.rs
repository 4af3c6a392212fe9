// ABOUTME: Download step screen: card review and save-to-disk summary

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::app::AppState;
use crate::components::palette::{
    CORNFLOWER_BLUE, ERROR_RED, GOLD, MUTED_GRAY, PANEL_BG, SELECTION_GREEN, SOFT_WHITE,
};
use crate::models::{CardStatus, ImageData};

pub struct DownloadStepComponent;

impl DownloadStepComponent {
    pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(6), Constraint::Length(4)])
            .split(area);

        Self::render_card_list(frame, layout[0], state);
        Self::render_save_summary(frame, layout[1], state);
    }

    fn render_card_list(frame: &mut Frame, area: Rect, state: &AppState) {
        let done = state
            .cards
            .iter()
            .filter(|c| c.status == CardStatus::Done)
            .count();

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(CORNFLOWER_BLUE))
            .style(Style::default().bg(PANEL_BG))
            .title(format!(" Ready to save: {done}/{} — s saves all ", state.cards.len()))
            .title_style(Style::default().fg(GOLD).add_modifier(Modifier::BOLD));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let items: Vec<ListItem> = state
            .cards
            .iter()
            .map(|card| {
                let selected = card.index == state.selected_card_index;
                let marker = if selected { "▸ " } else { "  " };
                let source = match (&card.status, &card.image) {
                    (CardStatus::Done, Some(ImageData::Url(_))) => "url",
                    (CardStatus::Done, Some(ImageData::Base64(_))) => "inline",
                    _ => "—",
                };
                let style = if selected {
                    Style::default().fg(SELECTION_GREEN).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(SOFT_WHITE)
                };
                ListItem::new(Line::from(vec![
                    Span::styled(marker, style),
                    Span::styled(card.file_name(), style),
                    Span::styled(format!("  [{source}]"), Style::default().fg(MUTED_GRAY)),
                ]))
            })
            .collect();

        frame.render_widget(List::new(items), inner);
    }

    fn render_save_summary(frame: &mut Frame, area: Rect, state: &AppState) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(MUTED_GRAY))
            .title(" Output ")
            .title_style(Style::default().fg(MUTED_GRAY));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let line = if state.saving_in_progress {
            Line::from(Span::styled("Saving...", Style::default().fg(GOLD)))
        } else if state.saved_paths.is_empty() {
            Line::from(Span::styled(
                format!("Will save to {}", state.config.resolved_output_dir().display()),
                Style::default().fg(MUTED_GRAY),
            ))
        } else {
            Line::from(Span::styled(
                format!("Saved {} files", state.saved_paths.len()),
                Style::default().fg(SELECTION_GREEN),
            ))
        };

        let failed = state
            .cards
            .iter()
            .filter(|c| c.status == CardStatus::Failed)
            .count();
        let mut lines = vec![line];
        if failed > 0 {
            lines.push(Line::from(Span::styled(
                format!("{failed} card(s) failed and will be skipped"),
                Style::default().fg(ERROR_RED),
            )));
        }

        let summary = Paragraph::new(lines).wrap(Wrap { trim: true });
        frame.render_widget(summary, inner);
    }
}
