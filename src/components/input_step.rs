// ABOUTME: Input step screen: draft text editor plus recent project list

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
use crate::split::{MAX_TEXT_LEN, MIN_TEXT_LEN};

pub struct InputStepComponent;

impl InputStepComponent {
    pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(8),    // Editor
                Constraint::Length(1), // Character counter
                Constraint::Length(6), // Recent projects
            ])
            .split(area);

        Self::render_editor(frame, layout[0], state);
        Self::render_counter(frame, layout[1], state);
        Self::render_history(frame, layout[2], state);
    }

    fn render_editor(frame: &mut Frame, area: Rect, state: &AppState) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(CORNFLOWER_BLUE))
            .style(Style::default().bg(PANEL_BG))
            .title(" Your text ")
            .title_style(Style::default().fg(GOLD).add_modifier(Modifier::BOLD));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        if state.draft_text.is_empty() {
            let hint = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    "Type or paste the text you want to turn into cards",
                    Style::default().fg(MUTED_GRAY),
                )),
                Line::from(Span::styled(
                    "Tab continues once the text is long enough",
                    Style::default().fg(MUTED_GRAY),
                )),
            ]);
            frame.render_widget(hint, inner);
            return;
        }

        let editor = Paragraph::new(state.draft_text.as_str())
            .style(Style::default().fg(SOFT_WHITE))
            .wrap(Wrap { trim: false });
        frame.render_widget(editor, inner);
    }

    fn render_counter(frame: &mut Frame, area: Rect, state: &AppState) {
        let count = state.draft_text.trim().chars().count();
        let in_range = (MIN_TEXT_LEN..=MAX_TEXT_LEN).contains(&count);
        let style = if in_range {
            Style::default().fg(SELECTION_GREEN)
        } else {
            Style::default().fg(ERROR_RED)
        };

        let counter = Paragraph::new(Line::from(vec![
            Span::styled(format!("  {count}"), style),
            Span::styled(
                format!(" / {MAX_TEXT_LEN} characters (min {MIN_TEXT_LEN})"),
                Style::default().fg(MUTED_GRAY),
            ),
        ]));
        frame.render_widget(counter, area);
    }

    fn render_history(frame: &mut Frame, area: Rect, state: &AppState) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(MUTED_GRAY))
            .title(" Recent (Ctrl+L loads the latest) ")
            .title_style(Style::default().fg(MUTED_GRAY));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        if state.history.is_empty() {
            let empty = Paragraph::new(Span::styled(
                "No recent projects yet",
                Style::default().fg(MUTED_GRAY),
            ));
            frame.render_widget(empty, inner);
            return;
        }

        let items: Vec<ListItem> = state
            .history
            .all()
            .iter()
            .take(inner.height as usize)
            .map(|p| {
                ListItem::new(Line::from(vec![
                    Span::styled(
                        p.created_at.format("%m-%d %H:%M ").to_string(),
                        Style::default().fg(MUTED_GRAY),
                    ),
                    Span::styled(p.title.clone(), Style::default().fg(SOFT_WHITE)),
                ]))
            })
            .collect();

        frame.render_widget(List::new(items), inner);
    }
}
