use anyhow::Result;
use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEventKind};
use log::{debug, warn};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};
use rusqlite::Connection;
use std::sync::mpsc::Sender;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::countdown::{Clock, CountdownError, CountdownFrame, CountdownSlot, SystemClock};
use crate::models::{City, DayRecord, Lang};
use crate::prayer_times::{AladhanClient, CalendarStore, MonthCalendar, RamadanCalendar};
use crate::tui::events::{Event, EventHandler, EventSink};
use crate::tui::theme;
use crate::tui::widgets::{calendar, countdown, header, prayers, statusbar, times};

#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Dashboard,
    Calendar,
    Help,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CountdownStatus {
    Loading,
    Live(CountdownFrame),
    Unavailable(CountdownError),
}

/// Everything the dashboard needs for one city in one language.
/// Owns the single running countdown ticker.
pub struct App {
    pub view: View,
    pub config: AppConfig,
    pub should_quit: bool,
    pub show_tray: bool,
    pub status: CountdownStatus,
    pub load_error: Option<String>,
    pub calendar: Option<MonthCalendar>,
    pub ramadan: Option<Result<RamadanCalendar, String>>,
    loaded_on: Option<NaiveDate>,
    generation: u64,
    ticker: CountdownSlot,
    clock: Arc<dyn Clock>,
    events_tx: Sender<Event>,
}

impl App {
    pub fn new(config: AppConfig, clock: Arc<dyn Clock>, events_tx: Sender<Event>) -> Self {
        App {
            view: View::Dashboard,
            config,
            should_quit: false,
            show_tray: false,
            status: CountdownStatus::Loading,
            load_error: None,
            calendar: None,
            ramadan: None,
            loaded_on: None,
            generation: 0,
            ticker: CountdownSlot::default(),
            clock,
            events_tx,
        }
    }

    pub fn lang(&self) -> Lang {
        self.config.display.lang
    }

    pub fn city(&self) -> City {
        self.config.location.city()
    }

    fn today(&self) -> NaiveDate {
        self.clock.now().date()
    }

    pub fn today_record(&self) -> Option<&DayRecord> {
        let today = self.today();
        self.calendar.as_ref().and_then(|c| c.day(today))
    }

    fn store<'c>(&self, conn: &'c Connection) -> Result<CalendarStore<'c, AladhanClient>> {
        let client = AladhanClient::new(&self.config.api, &self.config.location.country)?;
        Ok(CalendarStore::new(conn, client, self.city()))
    }

    /// Load today's month for the current city and (re)start the countdown.
    /// A failed load leaves the dashboard in its loading state until the
    /// date changes or the user refreshes.
    pub fn load(&mut self, conn: &Connection) {
        let today = self.today();
        self.loaded_on = Some(today);
        match self.store(conn).and_then(|store| store.month_for(today)) {
            Ok(calendar) => {
                self.load_error = None;
                self.install_calendar(calendar);
            }
            Err(e) => {
                warn!("Could not load calendar: {:#}", e);
                self.load_error = Some(format!("{:#}", e));
                self.calendar = None;
                self.ticker.stop();
                self.status = CountdownStatus::Loading;
            }
        }
    }

    pub fn install_calendar(&mut self, calendar: MonthCalendar) {
        self.calendar = Some(calendar);
        self.restart_ticker();
    }

    fn restart_ticker(&mut self) {
        self.generation += 1;
        let Some(calendar) = &self.calendar else {
            self.ticker.stop();
            return;
        };
        let sink = EventSink::new(self.events_tx.clone(), self.generation);
        self.ticker.start(
            calendar.shared(),
            Arc::clone(&self.clock),
            sink,
            self.config.ticker_options(),
        );
    }

    pub fn stop(&mut self) {
        self.ticker.stop();
    }

    /// UI heartbeat: reload once the local date moves on.
    pub fn tick(&mut self, conn: &Connection) {
        if self.loaded_on != Some(self.today()) {
            debug!("Date changed, reloading calendar");
            self.ramadan = None;
            self.load(conn);
        }
    }

    pub fn handle_countdown(
        &mut self,
        generation: u64,
        result: Result<CountdownFrame, CountdownError>,
    ) {
        if generation != self.generation {
            return;
        }
        self.status = match result {
            Ok(frame) => CountdownStatus::Live(frame),
            Err(e) => CountdownStatus::Unavailable(e),
        };
    }

    pub fn handle_key(&mut self, key: crossterm::event::KeyEvent, conn: &Connection) {
        // Some terminals also report release and repeat events
        if key.kind != KeyEventKind::Press {
            return;
        }

        if self.view == View::Help {
            self.view = View::Dashboard;
            return;
        }

        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => {
                if self.view == View::Calendar {
                    self.view = View::Dashboard;
                } else {
                    self.should_quit = true;
                }
            }
            KeyCode::Char('?') => {
                self.view = View::Help;
            }
            KeyCode::Char('l') => self.toggle_lang(),
            KeyCode::Char('c') => self.next_city(conn),
            KeyCode::Char('p') => {
                self.show_tray = !self.show_tray;
            }
            KeyCode::Char('k') => {
                if self.view == View::Calendar {
                    self.view = View::Dashboard;
                } else {
                    self.open_calendar(conn);
                }
            }
            KeyCode::Char('r') => self.refresh(conn),
            _ => {}
        }
    }

    pub fn toggle_lang(&mut self) {
        self.config.display.lang = self.lang().toggled();
        self.persist();
        self.restart_ticker();
    }

    fn next_city(&mut self, conn: &Connection) {
        self.config.location.city = self.city().next().name.to_string();
        self.persist();
        self.status = CountdownStatus::Loading;
        self.ramadan = None;
        self.load(conn);
    }

    fn refresh(&mut self, conn: &Connection) {
        if let Err(e) = self.store(conn).and_then(|store| store.clear()) {
            warn!("Could not clear cache: {:#}", e);
        }
        self.status = CountdownStatus::Loading;
        self.ramadan = None;
        self.load(conn);
    }

    fn open_calendar(&mut self, conn: &Connection) {
        self.view = View::Calendar;
        if self.ramadan.is_some() {
            return;
        }
        let Some(year) = self.today_record().map(|d| d.hijri().year) else {
            self.ramadan = Some(Err(self.lang().load_failed().to_string()));
            return;
        };
        self.ramadan = Some(
            self.store(conn)
                .and_then(|store| store.ramadan(year))
                .map_err(|e| {
                    warn!("Could not load Ramadan calendar: {:#}", e);
                    self.lang().load_failed().to_string()
                }),
        );
    }

    fn persist(&self) {
        if let Err(e) = self.config.save() {
            warn!("Could not save config: {:#}", e);
        }
    }

    pub fn draw(&self, frame: &mut Frame) {
        match self.view {
            View::Dashboard => self.draw_dashboard(frame),
            View::Calendar => self.draw_calendar(frame),
            View::Help => {
                self.draw_dashboard(frame);
                self.draw_help_overlay(frame);
            }
        }
    }

    fn draw_dashboard(&self, frame: &mut Frame) {
        let area = frame.area();
        let lang = self.lang();
        let today = self.today_record();

        frame.render_widget(Block::default().style(theme::base()), area);

        let tray_height = if self.show_tray { 5 } else { 3 };
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(6),           // header
                Constraint::Length(10),          // countdown
                Constraint::Length(4),           // sehar / iftar
                Constraint::Length(tray_height), // prayer tray
                Constraint::Min(0),
                Constraint::Length(1), // status bar
            ])
            .split(area);

        header::render(
            frame,
            chunks[0],
            &self.city().label(lang),
            today.map(DayRecord::hijri),
            self.clock.now(),
            lang,
        );
        countdown::render(frame, chunks[1], &self.status, self.load_error.as_deref(), lang);
        times::render(frame, chunks[2], today.map(|d| &d.timings), lang);
        prayers::render(frame, chunks[3], today.map(|d| &d.timings), self.show_tray, lang);
        statusbar::render(frame, chunks[5]);
    }

    fn draw_calendar(&self, frame: &mut Frame) {
        let area = frame.area();
        frame.render_widget(Block::default().style(theme::base()), area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(area);

        calendar::render(
            frame,
            chunks[0],
            self.ramadan.as_ref(),
            self.today(),
            &self.city().label(self.lang()),
            self.lang(),
        );
        statusbar::render(frame, chunks[1]);
    }

    fn draw_help_overlay(&self, frame: &mut Frame) {
        let area = frame.area();

        // Center a help box
        let y = area.height / 4;
        let popup_area = Rect {
            x: area.width / 4,
            y,
            width: area.width / 2,
            height: (area.height / 2).max(12).min(area.height - y),
        };

        frame.render_widget(Clear, popup_area);

        let bindings = [
            ("  [l]          ", "Toggle Bangla / English"),
            ("  [c]          ", "Next city"),
            ("  [p]          ", "Show / hide prayer times"),
            ("  [k]          ", "Ramadan calendar"),
            ("  [r]          ", "Re-fetch calendar"),
            ("  [?]          ", "Toggle help"),
            ("  [Esc] / [q]  ", "Back / quit"),
        ];

        let mut help_text = vec![
            Line::from(Span::styled(
                "  Keybindings",
                theme::gold().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];
        for (key, what) in bindings {
            help_text.push(Line::from(vec![
                Span::styled(key, theme::gold()),
                Span::styled(what, theme::dim()),
            ]));
        }

        let block = Block::default()
            .title(Span::styled(" Help ", theme::gold()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::gold())
            .style(theme::panel());

        let paragraph = Paragraph::new(help_text).block(block);
        frame.render_widget(paragraph, popup_area);
    }
}

/// Run the TUI event loop.
pub fn run(conn: Connection, config: AppConfig) -> Result<()> {
    let events = EventHandler::new(500);
    let mut app = App::new(config, Arc::new(SystemClock), events.sender());
    app.load(&conn);

    let mut terminal = ratatui::init();

    let result = (|| -> Result<()> {
        loop {
            terminal.draw(|frame| app.draw(frame))?;

            match events.next()? {
                Event::Key(key) => {
                    app.handle_key(key, &conn);
                    if app.should_quit {
                        break;
                    }
                }
                Event::Tick => {
                    app.tick(&conn);
                }
                Event::Countdown { generation, result } => {
                    app.handle_countdown(generation, result);
                }
            }
        }
        Ok(())
    })();

    app.stop();
    ratatui::restore();
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::countdown::{FixedClock, Phase};
    use crate::models::fixtures;
    use chrono::NaiveDateTime;
    use std::sync::mpsc::{self, Receiver};
    use std::time::Duration;

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 5)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn app() -> (App, Receiver<Event>) {
        let (tx, rx) = mpsc::channel();
        let mut config = AppConfig::default();
        config.countdown.tick_ms = 60_000;
        let app = App::new(config, Arc::new(FixedClock::new(noon())), tx);
        (app, rx)
    }

    fn next_countdown(rx: &Receiver<Event>) -> (u64, Result<CountdownFrame, CountdownError>) {
        match rx.recv_timeout(Duration::from_secs(5)).unwrap() {
            Event::Countdown { generation, result } => (generation, result),
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn installing_a_calendar_starts_the_countdown() {
        let (mut app, rx) = app();
        app.install_calendar(MonthCalendar::from_days(fixtures::month(2026, 3, 31)).unwrap());

        let (generation, result) = next_countdown(&rx);
        app.handle_countdown(generation, result);
        match &app.status {
            CountdownStatus::Live(frame) => {
                assert_eq!(frame.phase, Phase::AwaitingIftar);
                assert_eq!(frame.phase_label, "ইফতারের বাকি");
                assert_eq!(frame.countdown, "06:03:00");
            }
            other => panic!("unexpected status {:?}", other),
        }
        assert_eq!(app.today_record().map(|d| d.date.gregorian.day), Some(5));
        app.stop();
    }

    #[test]
    fn frames_from_a_replaced_ticker_are_ignored() {
        let (mut app, rx) = app();
        app.install_calendar(MonthCalendar::from_days(fixtures::month(2026, 3, 31)).unwrap());
        let (stale, _) = next_countdown(&rx);

        app.install_calendar(MonthCalendar::from_days(fixtures::month(2026, 3, 31)).unwrap());
        app.handle_countdown(stale, Err(CountdownError::MissingDayData { day_index: 4 }));
        assert_eq!(app.status, CountdownStatus::Loading);

        let (current, result) = next_countdown(&rx);
        assert_ne!(current, stale);
        app.handle_countdown(current, result);
        assert!(matches!(app.status, CountdownStatus::Live(_)));
        app.stop();
    }

    #[test]
    fn missing_day_shows_unavailable() {
        let (mut app, rx) = app();
        app.install_calendar(MonthCalendar::from_days(fixtures::month(2026, 3, 3)).unwrap());
        let (generation, result) = next_countdown(&rx);
        app.handle_countdown(generation, result);
        assert_eq!(
            app.status,
            CountdownStatus::Unavailable(CountdownError::MissingDayData { day_index: 4 })
        );
        assert!(app.today_record().is_none());
        app.stop();
    }
}
