// ABOUTME: Generate step screen: template picker and per-card generation status

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::app::AppState;
use crate::components::palette::{
    CORNFLOWER_BLUE, ERROR_RED, GOLD, MUTED_GRAY, PANEL_BG, SELECTION_GREEN, SOFT_WHITE,
    WARNING_YELLOW,
};
use crate::models::CardStatus;

pub struct GenerateStepComponent;

impl GenerateStepComponent {
    pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
        let layout = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(area);

        Self::render_templates(frame, layout[0], state);
        Self::render_cards(frame, layout[1], state);
    }

    fn render_templates(frame: &mut Frame, area: Rect, state: &AppState) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(CORNFLOWER_BLUE))
            .style(Style::default().bg(PANEL_BG))
            .title(" Template (j/k) ")
            .title_style(Style::default().fg(GOLD).add_modifier(Modifier::BOLD));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let items: Vec<ListItem> = state
            .templates
            .all()
            .iter()
            .enumerate()
            .map(|(idx, template)| {
                let selected = idx == state.selected_template_index;
                let marker = if selected { "▸ " } else { "  " };
                let style = if selected {
                    Style::default().fg(SELECTION_GREEN).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(SOFT_WHITE)
                };
                let tag = if template.builtin { "" } else { " (custom)" };
                ListItem::new(Line::from(vec![
                    Span::styled(marker, style),
                    Span::styled(format!("{}{tag}", template.name), style),
                ]))
            })
            .collect();

        frame.render_widget(List::new(items), inner);
    }

    fn render_cards(frame: &mut Frame, area: Rect, state: &AppState) {
        let title = if state.generating_in_progress {
            " Generating... ".to_string()
        } else {
            format!(" Cards ({}) — g to generate ", state.cards.len())
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(CORNFLOWER_BLUE))
            .style(Style::default().bg(PANEL_BG))
            .title(title)
            .title_style(Style::default().fg(GOLD).add_modifier(Modifier::BOLD));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        if state.cards.is_empty() {
            let hint = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    format!("{} segments ready.", state.segments.len()),
                    Style::default().fg(SOFT_WHITE),
                )),
                Line::from(Span::styled(
                    "Press g to generate one image per segment.",
                    Style::default().fg(MUTED_GRAY),
                )),
            ]);
            frame.render_widget(hint, inner);
            return;
        }

        let items: Vec<ListItem> = state
            .cards
            .iter()
            .map(|card| {
                let (icon, style) = match card.status {
                    CardStatus::Pending => ("○", Style::default().fg(MUTED_GRAY)),
                    CardStatus::Generating => ("◌", Style::default().fg(WARNING_YELLOW)),
                    CardStatus::Done => ("●", Style::default().fg(SELECTION_GREEN)),
                    CardStatus::Failed => ("✗", Style::default().fg(ERROR_RED)),
                };
                let first_line: String =
                    card.text.lines().next().unwrap_or("").chars().take(36).collect();
                let mut spans = vec![
                    Span::styled(format!(" {icon} "), style),
                    Span::styled(format!("{:02} ", card.index + 1), Style::default().fg(MUTED_GRAY)),
                    Span::styled(first_line, Style::default().fg(SOFT_WHITE)),
                ];
                if let Some(error) = &card.error {
                    spans.push(Span::styled(
                        format!("  {error}"),
                        Style::default().fg(ERROR_RED),
                    ));
                }
                ListItem::new(Line::from(spans))
            })
            .collect();

        frame.render_widget(List::new(items), inner);
    }
}
