use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::models::{Lang, PrayerType, Timings};
use crate::tui::theme;
use crate::utils::format::{pad_display, to_12h};

const CELL: usize = 14;

/// The six daily timings in two rows of three. Collapsed to a one-line hint when hidden.
pub fn render(frame: &mut Frame, area: Rect, timings: Option<&Timings>, open: bool, lang: Lang) {
    let marker = if open { "▾" } else { "▸" };
    let block = Block::default()
        .title(Span::styled(
            format!(" {} {} [p] ", marker, lang.tray_label()),
            theme::gold(),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border())
        .style(theme::panel());

    if !open {
        frame.render_widget(block, area);
        return;
    }

    let prayers = PrayerType::all();
    let lines: Vec<Line> = prayers
        .chunks(3)
        .map(|row| {
            let mut spans = Vec::new();
            for prayer in row {
                let time = timings
                    .map(|t| to_12h(t.get(*prayer)))
                    .unwrap_or_else(|| "--:--".to_string());
                spans.push(Span::styled(
                    pad_display(prayer.display_name(lang), 8),
                    theme::dim(),
                ));
                spans.push(Span::styled(pad_display(&time, CELL - 4), theme::bold()));
            }
            Line::from(spans)
        })
        .collect();

    frame.render_widget(
        Paragraph::new(lines).block(block).alignment(Alignment::Center),
        area,
    );
}
