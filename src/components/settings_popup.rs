// ABOUTME: Settings popup for image size, watermark, and output directory display

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::AppState;
use crate::components::palette::{CORNFLOWER_BLUE, GOLD, MUTED_GRAY, PANEL_BG, SOFT_WHITE};

pub struct SettingsPopup;

impl SettingsPopup {
    pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
        let popup = centered_rect(50, 40, area);
        frame.render_widget(Clear, popup);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(CORNFLOWER_BLUE))
            .style(Style::default().bg(PANEL_BG))
            .title(" Settings ")
            .title_style(Style::default().fg(GOLD).add_modifier(Modifier::BOLD));

        let inner = block.inner(popup);
        frame.render_widget(block, popup);

        let watermark = if state.config.watermark_enabled { "on" } else { "off" };
        let lines = vec![
            Line::from(""),
            Line::from(vec![
                Span::styled("  s  ", Style::default().fg(GOLD)),
                Span::styled("Image size: ", Style::default().fg(MUTED_GRAY)),
                Span::styled(state.config.image_size.clone(), Style::default().fg(SOFT_WHITE)),
            ]),
            Line::from(vec![
                Span::styled("  w  ", Style::default().fg(GOLD)),
                Span::styled("Watermark: ", Style::default().fg(MUTED_GRAY)),
                Span::styled(watermark, Style::default().fg(SOFT_WHITE)),
            ]),
            Line::from(vec![
                Span::styled("     ", Style::default()),
                Span::styled("Output: ", Style::default().fg(MUTED_GRAY)),
                Span::styled(
                    state.config.resolved_output_dir().display().to_string(),
                    Style::default().fg(SOFT_WHITE),
                ),
            ]),
            Line::from(""),
            Line::from(Span::styled(
                "Esc saves and closes",
                Style::default().fg(MUTED_GRAY),
            )),
        ];

        let body = Paragraph::new(lines).alignment(Alignment::Left);
        frame.render_widget(body, inner);
    }
}

/// Center a percentage-sized rect within the given area
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
