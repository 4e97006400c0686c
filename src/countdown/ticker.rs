use chrono::NaiveDateTime;
use log::{debug, info, warn};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use super::clock::Clock;
use super::phase::{classify, Fallbacks, Phase};
use super::CountdownError;
use crate::models::{DayRecord, Lang};
use crate::utils::format::format_countdown;

pub const DEFAULT_TICK: Duration = Duration::from_secs(1);

/// What the renderer receives once per tick.
#[derive(Debug, Clone, PartialEq)]
pub struct CountdownFrame {
    pub phase: Phase,
    pub phase_label: String,
    /// "HH:MM:SS"
    pub countdown: String,
    pub progress_percent: f64,
    pub remaining_seconds: i64,
}

/// Receives ticker output. Called synchronously from the tick.
pub trait CountdownSink: Send + 'static {
    fn render(&mut self, frame: CountdownFrame);
    fn unavailable(&mut self, error: &CountdownError);
}

impl CountdownSink for Sender<Result<CountdownFrame, CountdownError>> {
    fn render(&mut self, frame: CountdownFrame) {
        let _ = self.send(Ok(frame));
    }

    fn unavailable(&mut self, error: &CountdownError) {
        let _ = self.send(Err(error.clone()));
    }
}

#[derive(Debug, Clone)]
pub struct TickerOptions {
    pub period: Duration,
    pub fallbacks: Fallbacks,
    pub lang: Lang,
}

impl Default for TickerOptions {
    fn default() -> Self {
        Self {
            period: DEFAULT_TICK,
            fallbacks: Fallbacks::default(),
            lang: Lang::default(),
        }
    }
}

/// One full evaluation: classify, normalize, format.
pub fn evaluate(
    now: NaiveDateTime,
    days: &[DayRecord],
    options: &TickerOptions,
) -> Result<CountdownFrame, CountdownError> {
    let state = classify(now, days, &options.fallbacks)?;
    let remaining = state.remaining_seconds();
    Ok(CountdownFrame {
        phase: state.phase,
        phase_label: options.lang.phase_label(state.phase).to_string(),
        countdown: format_countdown(remaining),
        progress_percent: state.progress_percent,
        remaining_seconds: remaining,
    })
}

/// Tracks the last outcome so logs only fire on transitions.
#[derive(Default)]
struct TickLog {
    last: Option<Result<Phase, CountdownError>>,
}

impl TickLog {
    fn record(&mut self, outcome: Result<Phase, CountdownError>) {
        if self.last.as_ref() == Some(&outcome) {
            return;
        }
        match &outcome {
            Ok(phase) => info!("countdown phase: {:?}", phase),
            Err(e) => warn!("countdown unavailable: {}", e),
        }
        self.last = Some(outcome);
    }
}

fn tick<S: CountdownSink>(
    days: &[DayRecord],
    clock: &dyn Clock,
    options: &TickerOptions,
    sink: &mut S,
    log: &mut TickLog,
) {
    match evaluate(clock.now(), days, options) {
        Ok(frame) => {
            log.record(Ok(frame.phase));
            sink.render(frame);
        }
        Err(e) => {
            log.record(Err(e.clone()));
            sink.unavailable(&e);
        }
    }
}

pub struct CountdownTicker;

impl CountdownTicker {
    /// Evaluates once on the calling thread, then every `options.period` on
    /// a worker thread until the returned handle is stopped or dropped.
    pub fn start<S: CountdownSink>(
        days: Arc<[DayRecord]>,
        clock: Arc<dyn Clock>,
        mut sink: S,
        options: TickerOptions,
    ) -> TickerHandle {
        let mut log = TickLog::default();
        tick(&days, clock.as_ref(), &options, &mut sink, &mut log);

        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let worker = thread::spawn(move || {
            let mut deadline = Instant::now() + options.period;
            loop {
                let wait = deadline.saturating_duration_since(Instant::now());
                match stop_rx.recv_timeout(wait) {
                    Err(RecvTimeoutError::Timeout) => {}
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }

                tick(&days, clock.as_ref(), &options, &mut sink, &mut log);

                // Schedule from fixed deadlines; after a stall, resync rather than burst.
                deadline += options.period;
                let now = Instant::now();
                if deadline < now {
                    deadline = now + options.period;
                }
            }
            debug!("countdown ticker stopped");
        });

        TickerHandle {
            stop_tx: Some(stop_tx),
            worker: Some(worker),
        }
    }
}

/// Owner of a running ticker. Stopping is idempotent and also happens on drop.
pub struct TickerHandle {
    stop_tx: Option<Sender<()>>,
    worker: Option<JoinHandle<()>>,
}

impl TickerHandle {
    /// Returns once the worker has exited; no tick fires after this.
    pub fn stop(&mut self) {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(());
        }
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                warn!("countdown ticker panicked");
            }
        }
    }

    #[cfg(test)]
    pub fn is_running(&self) -> bool {
        self.worker.is_some()
    }
}

impl Drop for TickerHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Holds at most one running ticker. Starting a new one cancels the old one first.
#[derive(Default)]
pub struct CountdownSlot {
    active: Option<TickerHandle>,
}

impl CountdownSlot {
    pub fn start<S: CountdownSink>(
        &mut self,
        days: Arc<[DayRecord]>,
        clock: Arc<dyn Clock>,
        sink: S,
        options: TickerOptions,
    ) {
        self.stop();
        self.active = Some(CountdownTicker::start(days, clock, sink, options));
    }

    pub fn stop(&mut self) {
        if let Some(mut handle) = self.active.take() {
            handle.stop();
        }
    }

    #[cfg(test)]
    pub fn is_running(&self) -> bool {
        self.active.as_ref().is_some_and(TickerHandle::is_running)
    }
}
