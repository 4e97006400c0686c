use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event as CEvent, KeyEvent};

use crate::countdown::{CountdownError, CountdownFrame, CountdownSink};

#[derive(Debug)]
pub enum Event {
    Key(KeyEvent),
    Tick,
    /// `generation` identifies the ticker that produced the result.
    Countdown {
        generation: u64,
        result: Result<CountdownFrame, CountdownError>,
    },
}

pub struct EventHandler {
    tx: mpsc::Sender<Event>,
    rx: mpsc::Receiver<Event>,
}

impl EventHandler {
    pub fn new(tick_rate_ms: u64) -> Self {
        let (tx, rx) = mpsc::channel();
        let input_tx = tx.clone();
        let tick_rate = Duration::from_millis(tick_rate_ms);

        thread::spawn(move || {
            let mut last_tick = std::time::Instant::now();
            loop {
                let timeout = tick_rate
                    .checked_sub(last_tick.elapsed())
                    .unwrap_or(Duration::ZERO);

                if event::poll(timeout).unwrap_or(false) {
                    match event::read() {
                        Ok(CEvent::Key(key)) => {
                            if input_tx.send(Event::Key(key)).is_err() {
                                break;
                            }
                        }
                        Ok(_) => {}
                        Err(_) => break,
                    }
                }

                if last_tick.elapsed() >= tick_rate {
                    if input_tx.send(Event::Tick).is_err() {
                        break;
                    }
                    last_tick = std::time::Instant::now();
                }
            }
        });

        Self { tx, rx }
    }

    /// Producers other than the input thread post through this.
    pub fn sender(&self) -> mpsc::Sender<Event> {
        self.tx.clone()
    }

    pub fn next(&self) -> Result<Event, mpsc::RecvError> {
        self.rx.recv()
    }
}

/// Feeds countdown frames into the event stream, tagged with the ticker's generation.
pub struct EventSink {
    tx: mpsc::Sender<Event>,
    generation: u64,
}

impl EventSink {
    pub fn new(tx: mpsc::Sender<Event>, generation: u64) -> Self {
        Self { tx, generation }
    }

    fn send(&self, result: Result<CountdownFrame, CountdownError>) {
        let _ = self.tx.send(Event::Countdown {
            generation: self.generation,
            result,
        });
    }
}

impl CountdownSink for EventSink {
    fn render(&mut self, frame: CountdownFrame) {
        self.send(Ok(frame));
    }

    fn unavailable(&mut self, error: &CountdownError) {
        self.send(Err(error.clone()));
    }
}
