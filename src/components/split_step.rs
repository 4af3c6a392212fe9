// ABOUTME: Split step screen: segment list with edit actions and AI split

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::app::AppState;
use crate::components::palette::{
    CORNFLOWER_BLUE, GOLD, MUTED_GRAY, PANEL_BG, SELECTION_GREEN, SOFT_WHITE,
};

pub struct SplitStepComponent;

impl SplitStepComponent {
    pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(CORNFLOWER_BLUE))
            .style(Style::default().bg(PANEL_BG))
            .title(format!(" Segments ({}) ", state.segments.len()))
            .title_style(Style::default().fg(GOLD).add_modifier(Modifier::BOLD));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        if state.splitting_in_progress {
            let loading = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled("Splitting with AI...", Style::default().fg(GOLD))),
            ])
            .alignment(Alignment::Center);
            frame.render_widget(loading, inner);
            return;
        }

        let layout = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(inner);

        Self::render_segment_list(frame, layout[0], state);
        Self::render_preview(frame, layout[1], state);
    }

    fn render_segment_list(frame: &mut Frame, area: Rect, state: &AppState) {
        let items: Vec<ListItem> = state
            .segments
            .iter()
            .map(|segment| {
                let selected = segment.index == state.selected_segment_index;
                let marker = if selected { "▸ " } else { "  " };
                let first_line: String = segment.text.lines().next().unwrap_or("").chars().take(30).collect();
                let style = if selected {
                    Style::default().fg(SELECTION_GREEN).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(SOFT_WHITE)
                };
                ListItem::new(Line::from(vec![
                    Span::styled(marker, style),
                    Span::styled(format!("{:02} ", segment.index + 1), Style::default().fg(MUTED_GRAY)),
                    Span::styled(first_line, style),
                ]))
            })
            .collect();

        if items.is_empty() {
            let empty = Paragraph::new(Span::styled(
                "No segments. Press s to split, a for AI split.",
                Style::default().fg(MUTED_GRAY),
            ));
            frame.render_widget(empty, area);
            return;
        }

        frame.render_widget(List::new(items), area);
    }

    fn render_preview(frame: &mut Frame, area: Rect, state: &AppState) {
        let block = Block::default()
            .borders(Borders::LEFT)
            .border_style(Style::default().fg(MUTED_GRAY))
            .title(" Preview ")
            .title_style(Style::default().fg(MUTED_GRAY));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let Some(segment) = state.segments.get(state.selected_segment_index) else {
            return;
        };

        let preview = Paragraph::new(segment.text.as_str())
            .style(Style::default().fg(SOFT_WHITE))
            .wrap(Wrap { trim: false });
        frame.render_widget(preview, inner);
    }
}
