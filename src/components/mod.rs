// ABOUTME: UI components for the wizard TUI: layout, step screens, and overlays

pub mod download_step;
pub mod generate_step;
pub mod help;
pub mod input_step;
pub mod layout;
pub mod settings_popup;
pub mod split_step;
pub mod step_indicator;

pub use layout::LayoutComponent;

/// Color palette from the TUI style guide, shared by all components
pub(crate) mod palette {
    use ratatui::style::Color;

    pub const CORNFLOWER_BLUE: Color = Color::Rgb(100, 149, 237);
    pub const GOLD: Color = Color::Rgb(255, 215, 0);
    pub const SELECTION_GREEN: Color = Color::Rgb(100, 200, 100);
    pub const DARK_BG: Color = Color::Rgb(25, 25, 35);
    pub const PANEL_BG: Color = Color::Rgb(30, 30, 40);
    pub const SOFT_WHITE: Color = Color::Rgb(220, 220, 230);
    pub const MUTED_GRAY: Color = Color::Rgb(120, 120, 140);
    pub const SUBDUED_BORDER: Color = Color::Rgb(60, 60, 80);
    pub const ERROR_RED: Color = Color::Rgb(220, 80, 80);
    pub const WARNING_YELLOW: Color = Color::Rgb(220, 180, 80);
}
