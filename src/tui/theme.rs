use ratatui::style::{Color, Modifier, Style};

pub const NIGHT: Color = Color::Rgb(12, 18, 28);
pub const PANEL: Color = Color::Rgb(20, 30, 44);
pub const BORDER: Color = Color::Rgb(46, 64, 86);
pub const TEXT: Color = Color::Rgb(226, 222, 208);
pub const TEXT_DIM: Color = Color::Rgb(120, 134, 150);
pub const GOLD: Color = Color::Rgb(214, 176, 82);
pub const TEAL: Color = Color::Rgb(72, 168, 160);
pub const ROSE: Color = Color::Rgb(196, 96, 84);

pub fn base() -> Style {
    Style::default().fg(TEXT).bg(NIGHT)
}

pub fn panel() -> Style {
    Style::default().fg(TEXT).bg(PANEL)
}

pub fn border() -> Style {
    Style::default().fg(BORDER)
}

pub fn dim() -> Style {
    Style::default().fg(TEXT_DIM)
}

pub fn gold() -> Style {
    Style::default().fg(GOLD)
}

pub fn teal() -> Style {
    Style::default().fg(TEAL)
}

pub fn rose() -> Style {
    Style::default().fg(ROSE)
}

pub fn bold() -> Style {
    Style::default().fg(TEXT).add_modifier(Modifier::BOLD)
}

/// Today's row in the Ramadan calendar.
pub fn today_row() -> Style {
    Style::default()
        .fg(NIGHT)
        .bg(GOLD)
        .add_modifier(Modifier::BOLD)
}
