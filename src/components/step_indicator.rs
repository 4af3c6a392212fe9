// ABOUTME: Step progress indicator rendered in the header
// Shows visited, current, and locked steps along the wizard path

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::components::palette::{GOLD, MUTED_GRAY, SELECTION_GREEN, SOFT_WHITE, SUBDUED_BORDER};
use crate::wizard::{Step, StepWizard};

pub struct StepIndicator;

impl StepIndicator {
    /// Render one dot per step: filled for visited, highlighted for current,
    /// hollow for not yet reachable
    pub fn render(frame: &mut Frame, area: Rect, wizard: &StepWizard) {
        let current = wizard.current_step();
        let visited = wizard.history();

        let mut spans = vec![Span::raw("  ")];
        let steps = Step::all();

        for (idx, step) in steps.iter().enumerate() {
            let (icon, style) = if *step == current {
                ("◉", Style::default().fg(GOLD).add_modifier(Modifier::BOLD))
            } else if visited.contains(step) {
                ("●", Style::default().fg(SELECTION_GREEN))
            } else {
                ("○", Style::default().fg(MUTED_GRAY))
            };

            spans.push(Span::styled(icon, style));
            spans.push(Span::raw(" "));
            spans.push(Span::styled(
                step.title(),
                if *step == current {
                    Style::default().fg(SOFT_WHITE)
                } else {
                    Style::default().fg(MUTED_GRAY)
                },
            ));

            if idx < steps.len() - 1 {
                spans.push(Span::styled(" → ", Style::default().fg(SUBDUED_BORDER)));
            }
        }

        let progress = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
        frame.render_widget(progress, area);
    }
}
