// ABOUTME: Help overlay listing the keybindings for each step

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

use crate::components::palette::{CORNFLOWER_BLUE, GOLD, MUTED_GRAY, PANEL_BG, SOFT_WHITE};

pub struct HelpComponent;

const BINDINGS: &[(&str, &str)] = &[
    ("Tab / Enter", "next step (when unlocked)"),
    ("h / ← / Backspace", "previous step"),
    ("1-4", "jump to a visited step"),
    ("Ctrl+R", "start over"),
    ("Ctrl+L", "input: load the latest recent text"),
    ("s / a", "split: rule-based / AI-assisted"),
    ("d / m", "split: delete / merge segment"),
    ("j / k", "move selection"),
    ("g", "generate cards"),
    ("s", "download step: save all images"),
    ("o / Ctrl+O", "settings (Ctrl+O while typing)"),
    ("q / Ctrl+Q", "quit (Ctrl+Q while typing)"),
];

impl HelpComponent {
    pub fn render(frame: &mut Frame, area: Rect) {
        let width = area.width.saturating_sub(20).clamp(30, 56);
        let height = (BINDINGS.len() as u16 + 4).min(area.height);
        let popup = Rect {
            x: area.x + (area.width.saturating_sub(width)) / 2,
            y: area.y + (area.height.saturating_sub(height)) / 2,
            width,
            height,
        };

        frame.render_widget(Clear, popup);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(CORNFLOWER_BLUE))
            .style(Style::default().bg(PANEL_BG))
            .title(" Keys ")
            .title_style(Style::default().fg(GOLD).add_modifier(Modifier::BOLD));

        let inner = block.inner(popup);
        frame.render_widget(block, popup);

        let mut lines = vec![Line::from("")];
        for (keys, action) in BINDINGS {
            lines.push(Line::from(vec![
                Span::styled(format!("  {keys:<18}"), Style::default().fg(GOLD)),
                Span::styled(*action, Style::default().fg(SOFT_WHITE)),
            ]));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "press any key to close",
            Style::default().fg(MUTED_GRAY),
        )));

        let body = Paragraph::new(lines).alignment(Alignment::Left);
        frame.render_widget(body, inner);
    }
}
