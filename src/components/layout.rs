// ABOUTME: Top-level layout: header with step indicator, active step body, footer
// Routes rendering to the component for the wizard's current step

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::app::state::{AppState, NotificationKind};
use crate::components::download_step::DownloadStepComponent;
use crate::components::generate_step::GenerateStepComponent;
use crate::components::help::HelpComponent;
use crate::components::input_step::InputStepComponent;
use crate::components::palette::{
    CORNFLOWER_BLUE, DARK_BG, ERROR_RED, GOLD, MUTED_GRAY, PANEL_BG, SELECTION_GREEN, SOFT_WHITE,
};
use crate::components::settings_popup::SettingsPopup;
use crate::components::split_step::SplitStepComponent;
use crate::components::step_indicator::StepIndicator;
use crate::wizard::Step;

pub struct LayoutComponent;

impl LayoutComponent {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, state: &AppState) {
        let area = frame.size();

        let background = Block::default().style(Style::default().bg(DARK_BG));
        frame.render_widget(background, area);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4), // Header with step indicator
                Constraint::Min(10),   // Step content
                Constraint::Length(2), // Footer
            ])
            .split(area);

        self.render_header(frame, layout[0], state);
        self.render_body(frame, layout[1], state);
        self.render_footer(frame, layout[2], state);

        if state.help_visible {
            HelpComponent::render(frame, area);
        }
        if state.settings_visible {
            SettingsPopup::render(frame, area, state);
        }
    }

    fn render_header(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let block = Block::default()
            .borders(Borders::BOTTOM)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(CORNFLOWER_BLUE))
            .style(Style::default().bg(PANEL_BG));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let header_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Length(1)])
            .split(inner);

        let step = state.wizard.current_step();
        let title = Paragraph::new(Line::from(vec![
            Span::styled("✦ ", Style::default().fg(GOLD)),
            Span::styled(
                "cardforge",
                Style::default().fg(GOLD).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  —  {}", step.description()),
                Style::default().fg(MUTED_GRAY),
            ),
        ]))
        .alignment(Alignment::Center);
        frame.render_widget(title, header_layout[0]);

        StepIndicator::render(frame, header_layout[1], &state.wizard);
    }

    fn render_body(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        match state.wizard.current_step() {
            Step::Input => InputStepComponent::render(frame, area, state),
            Step::Split => SplitStepComponent::render(frame, area, state),
            Step::Generate => GenerateStepComponent::render(frame, area, state),
            Step::Download => DownloadStepComponent::render(frame, area, state),
        }
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Length(1)])
            .split(area);

        // Most recent notification, if any
        if let Some(notification) = state.notifications.first() {
            let style = match notification.kind {
                NotificationKind::Success => Style::default().fg(SELECTION_GREEN),
                NotificationKind::Error => Style::default().fg(ERROR_RED),
            };
            let line = Paragraph::new(Span::styled(format!(" {}", notification.message), style));
            frame.render_widget(line, layout[0]);
        }

        let mut hints: Vec<Span> = Vec::new();
        if state.wizard.can_go_back() {
            hints.push(Span::styled(" ← back ", Style::default().fg(SOFT_WHITE)));
        }
        if state.wizard.can_advance() {
            hints.push(Span::styled(" Tab next ", Style::default().fg(SELECTION_GREEN)));
        } else if state.wizard.current_step() != Step::Download {
            hints.push(Span::styled(
                " complete this step to continue ",
                Style::default().fg(MUTED_GRAY),
            ));
        }
        hints.push(Span::styled(" ?/F1 help ", Style::default().fg(MUTED_GRAY)));

        let bar = Paragraph::new(Line::from(hints)).alignment(Alignment::Center);
        frame.render_widget(bar, layout[1]);
    }
}

impl Default for LayoutComponent {
    fn default() -> Self {
        Self::new()
    }
}
