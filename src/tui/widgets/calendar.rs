use chrono::{Datelike, NaiveDate};
use ratatui::{
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::models::{DayRecord, Lang};
use crate::prayer_times::RamadanCalendar;
use crate::tui::theme;
use crate::utils::format::{pad_display, to_12h};

fn row(position: usize, day: &DayRecord, lang: Lang) -> Line<'static> {
    let date = day.date.gregorian.to_naive();
    let weekday = date
        .map(|d| lang.weekday(d.weekday().num_days_from_sunday()))
        .unwrap_or("");
    let short = date
        .map(|d| d.format("%-d %b").to_string())
        .unwrap_or_else(|| day.date.gregorian.date.clone());

    Line::from(vec![
        Span::styled(
            format!(" {:>4} ", lang.digits(&(position + 1).to_string())),
            theme::gold().add_modifier(Modifier::BOLD),
        ),
        Span::raw(pad_display(weekday, 7)),
        Span::raw(pad_display(&lang.digits(&short), 9)),
        Span::styled(format!("{} ", lang.sehar()), theme::dim()),
        Span::raw(pad_display(&to_12h(day.timings.sehar()), 10)),
        Span::styled(format!("{} ", lang.iftar()), theme::dim()),
        Span::raw(to_12h(day.timings.iftar())),
    ])
}

/// Full Ramadan timetable; today's row is highlighted and scrolled into view.
pub fn render(
    frame: &mut Frame,
    area: Rect,
    ramadan: Option<&Result<RamadanCalendar, String>>,
    today: NaiveDate,
    city_label: &str,
    lang: Lang,
) {
    let block = Block::default()
        .title(Span::styled(
            format!(" {} · {} ", lang.calendar_title(), city_label),
            theme::gold(),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::gold())
        .style(theme::panel());

    let calendar = match ramadan {
        None => {
            let p = Paragraph::new(lang.loading()).style(theme::dim());
            frame.render_widget(p.block(block).alignment(Alignment::Center), area);
            return;
        }
        Some(Err(message)) => {
            let p = Paragraph::new(message.as_str()).style(theme::rose());
            frame.render_widget(p.block(block).alignment(Alignment::Center), area);
            return;
        }
        Some(Ok(c)) if c.is_empty() => {
            let p = Paragraph::new(lang.no_ramadan_data()).style(theme::dim());
            frame.render_widget(p.block(block).alignment(Alignment::Center), area);
            return;
        }
        Some(Ok(c)) => c,
    };

    let items: Vec<ListItem> = calendar
        .days
        .iter()
        .enumerate()
        .map(|(i, day)| ListItem::new(row(i, day, lang)))
        .collect();

    let mut state = ListState::default().with_selected(calendar.position_of(today));
    let list = List::new(items)
        .block(block)
        .highlight_style(theme::today_row());
    frame.render_stateful_widget(list, area, &mut state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures;

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn english_row_shows_both_times() {
        let day = fixtures::day(2026, 3, 1, "05:12 (+06)", "18:03 (+06)");
        let line = text(&row(0, &day, Lang::En));
        assert!(line.contains("Sun"));
        assert!(line.contains("1 Mar"));
        assert!(line.contains("5:12 AM"));
        assert!(line.contains("6:03 PM"));
    }

    #[test]
    fn bangla_row_uses_bengali_numerals() {
        let day = fixtures::day(2026, 3, 12, "05:02 (+06)", "18:08 (+06)");
        let line = text(&row(11, &day, Lang::Bn));
        assert!(line.contains("১২"));
        assert!(line.contains("বৃহঃ"));
        assert!(line.contains("সেহরি"));
    }
}
