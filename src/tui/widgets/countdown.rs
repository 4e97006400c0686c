use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};
use tui_big_text::{BigText, PixelSize};

use crate::models::Lang;
use crate::tui::app::CountdownStatus;
use crate::tui::theme;
use crate::utils::format::progress_bar;

pub fn render(
    frame: &mut Frame,
    area: Rect,
    status: &CountdownStatus,
    load_error: Option<&str>,
    lang: Lang,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border())
        .style(theme::panel());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let frame_data = match status {
        CountdownStatus::Live(f) => f,
        CountdownStatus::Loading | CountdownStatus::Unavailable(_) => {
            let mut lines = vec![
                Line::from(""),
                Line::from(Span::styled(lang.loading(), theme::dim())),
            ];
            if let Some(err) = load_error {
                lines.push(Line::from(Span::styled(err.to_string(), theme::rose())));
            }
            frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
            return;
        }
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // label
            Constraint::Length(1),
            Constraint::Length(4), // big digits
            Constraint::Length(1),
            Constraint::Length(1), // progress
        ])
        .split(inner);

    frame.render_widget(
        Paragraph::new(Span::styled(
            frame_data.phase_label.as_str(),
            theme::gold().add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center),
        rows[0],
    );

    // Quadrant glyphs are 4 cells wide per character.
    let digits_width = (frame_data.countdown.chars().count() as u16 * 4).min(rows[2].width);
    let digits_area = Rect {
        x: rows[2].x + (rows[2].width - digits_width) / 2,
        width: digits_width,
        ..rows[2]
    };
    let big = BigText::builder()
        .pixel_size(PixelSize::Quadrant)
        .style(theme::bold())
        .lines(vec![Line::from(frame_data.countdown.clone())])
        .build();
    frame.render_widget(big, digits_area);

    let bar_width = (rows[4].width as usize).saturating_sub(10).min(48);
    let percent = lang.digits(&format!("{:.0}%", frame_data.progress_percent));
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(progress_bar(frame_data.progress_percent, bar_width), theme::teal()),
            Span::styled(format!(" {}", percent), theme::dim()),
        ]))
        .alignment(Alignment::Center),
        rows[4],
    );
}
