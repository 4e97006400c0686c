use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::models::{Lang, Timings};
use crate::tui::theme;
use crate::utils::format::to_12h;

/// Side-by-side Sehar and Iftar times for today.
pub fn render(frame: &mut Frame, area: Rect, timings: Option<&Timings>, lang: Lang) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let (sehar, iftar) = match timings {
        Some(t) => (to_12h(t.sehar()), to_12h(t.iftar())),
        None => ("--:--".to_string(), "--:--".to_string()),
    };

    for (col, label, time) in [(cols[0], lang.sehar(), sehar), (cols[1], lang.iftar(), iftar)] {
        let block = Block::default()
            .title(Span::styled(format!(" {} ", label), theme::gold()))
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border())
            .style(theme::panel());
        let text = Line::from(Span::styled(time, theme::bold()));
        frame.render_widget(
            Paragraph::new(vec![text]).block(block).alignment(Alignment::Center),
            col,
        );
    }
}
