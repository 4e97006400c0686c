use chrono::{Datelike, NaiveDateTime};
use ratatui::{
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::models::{HijriDate, Lang};
use crate::tui::theme;

pub fn render(
    frame: &mut Frame,
    area: Rect,
    city_label: &str,
    hijri: Option<&HijriDate>,
    now: NaiveDateTime,
    lang: Lang,
) {
    let title_line = Line::from(vec![
        Span::styled("☾  ", theme::gold()),
        Span::styled(city_label, theme::gold().add_modifier(Modifier::BOLD)),
    ]);

    let mut hijri_spans = Vec::new();
    if let Some(h) = hijri {
        hijri_spans.push(Span::styled(lang.digits(&h.formatted()), theme::teal()));
        if h.is_ramadan() {
            hijri_spans.push(Span::styled("  ·  ", theme::dim()));
            hijri_spans.push(Span::styled(lang.ramadan_day(h.day), theme::gold()));
        }
    }

    let weekday = lang.weekday(now.weekday().num_days_from_sunday());
    let clock = lang.digits(&now.format("%d %b %Y  %I:%M:%S %p").to_string());
    let clock_line = Line::from(vec![
        Span::styled(weekday, theme::dim()),
        Span::styled("  ", theme::dim()),
        Span::styled(clock, theme::dim()),
    ]);

    let text = vec![title_line, Line::from(hijri_spans), clock_line];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::gold().add_modifier(Modifier::BOLD))
        .style(theme::base());

    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}
