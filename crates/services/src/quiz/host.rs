use std::fmt;
use std::ops::ControlFlow;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use quiz_core::model::{DifficultyFilter, QuizSettings};
use quiz_core::quiz::{QuizSession, QuizSummary, Step, TickOutcome};
use tokio::sync::mpsc;

use super::progress::QuizProgress;
use super::timer::{TICK_PERIOD, TimerHandle};
use crate::Clock;
use crate::error::QuizServiceError;

/// Notifications pushed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    /// The countdown moved by one second.
    Tick { remaining_secs: u32 },
    /// The attempt ended, by finishing the last question or by timing out.
    Completed(QuizSummary),
}

struct HostState {
    session: QuizSession,
    /// Bumped on every start and reset; a ticker only drives the attempt it
    /// was spawned for.
    attempt: u64,
    started_at: Option<DateTime<Utc>>,
    summary: Option<QuizSummary>,
}

impl HostState {
    fn reset(&mut self) {
        self.attempt += 1;
        self.started_at = None;
        self.summary = None;
    }

    /// Record the summary for a session that just reached `Completed`.
    ///
    /// The completion time never precedes the start time, even when the wall
    /// clock stepped backwards during the attempt.
    fn finish(
        &mut self,
        clock: &Clock,
        pass_threshold: u8,
    ) -> Result<QuizSummary, QuizServiceError> {
        let now = clock.now();
        let started_at = self.started_at.unwrap_or(now);
        let completed_at = now.max(started_at);
        log::debug!("attempt wall time: {}s", clock.secs_since(started_at));
        let summary =
            QuizSummary::from_session(&self.session, started_at, completed_at, pass_threshold)?;
        self.summary = Some(summary.clone());
        Ok(summary)
    }

    /// One countdown step for the ticker spawned for `attempt`.
    fn on_tick(
        &mut self,
        attempt: u64,
        clock: &Clock,
        pass_threshold: u8,
        events: &mpsc::UnboundedSender<HostEvent>,
    ) -> ControlFlow<()> {
        if attempt != self.attempt {
            log::debug!("stale countdown for attempt {attempt} stopped");
            return ControlFlow::Break(());
        }
        match self.session.tick() {
            TickOutcome::Running { remaining_secs } => {
                let _ = events.send(HostEvent::Tick { remaining_secs });
                ControlFlow::Continue(())
            }
            TickOutcome::Expired => {
                let _ = events.send(HostEvent::Tick { remaining_secs: 0 });
                match self.finish(clock, pass_threshold) {
                    Ok(summary) => {
                        log::info!("quiz timed out: score={}%", summary.score().percentage());
                        let _ = events.send(HostEvent::Completed(summary));
                    }
                    Err(err) => log::warn!("failed to summarize timed out quiz: {err}"),
                }
                ControlFlow::Break(())
            }
            TickOutcome::Idle => ControlFlow::Break(()),
        }
    }
}

/// Owns a quiz session together with the countdown that drives it.
///
/// The ticker is cancelled whenever the attempt leaves `InProgress`: on
/// finishing, on timeout, on restart or filter change, on `close`, and on drop.
/// Must be used from within a tokio runtime.
pub struct QuizHost {
    state: Arc<Mutex<HostState>>,
    timer: Option<TimerHandle>,
    events: mpsc::UnboundedSender<HostEvent>,
    clock: Clock,
    settings: QuizSettings,
}

impl QuizHost {
    /// Wrap a session. Events are delivered on the returned receiver.
    #[must_use]
    pub fn new(
        session: QuizSession,
        settings: QuizSettings,
        clock: Clock,
    ) -> (Self, mpsc::UnboundedReceiver<HostEvent>) {
        let (events, rx) = mpsc::unbounded_channel();
        let host = Self {
            state: Arc::new(Mutex::new(HostState {
                session,
                attempt: 0,
                started_at: None,
                summary: None,
            })),
            timer: None,
            events,
            clock,
            settings,
        };
        (host, rx)
    }

    #[must_use]
    pub fn settings(&self) -> &QuizSettings {
        &self.settings
    }

    /// Read the session under the lock.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Poisoned` if the session lock is poisoned.
    pub fn with_session<R>(
        &self,
        read: impl FnOnce(&QuizSession) -> R,
    ) -> Result<R, QuizServiceError> {
        let guard = self.lock()?;
        Ok(read(&guard.session))
    }

    /// # Errors
    ///
    /// Returns `QuizServiceError::Poisoned` if the session lock is poisoned.
    pub fn progress(&self) -> Result<QuizProgress, QuizServiceError> {
        self.with_session(|session| QuizProgress::from(session))
    }

    /// Summary of the last completed attempt, if any.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Poisoned` if the session lock is poisoned.
    pub fn summary(&self) -> Result<Option<QuizSummary>, QuizServiceError> {
        Ok(self.lock()?.summary.clone())
    }

    #[must_use]
    pub fn is_timer_running(&self) -> bool {
        self.timer.as_ref().is_some_and(|timer| !timer.is_finished())
    }

    /// Start the attempt and its countdown.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Quiz` when the session rejects the start
    /// (no questions, already running, or already completed); the running
    /// countdown, if any, is left alone then.
    pub fn start(&mut self) -> Result<(), QuizServiceError> {
        let attempt = {
            let mut guard = self.lock()?;
            guard.session.start()?;
            guard.reset();
            guard.started_at = Some(self.clock.now());
            log::info!(
                "quiz started: language={} filter={} questions={}",
                guard.session.language(),
                guard.session.filter(),
                guard.session.len()
            );
            guard.attempt
        };
        self.cancel_timer();
        self.timer = Some(self.spawn_ticker(attempt));
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `QuizServiceError::Quiz` when the selection is rejected.
    pub fn select_answer(&self, option: usize) -> Result<(), QuizServiceError> {
        let mut guard = self.lock()?;
        guard.session.select_answer(option)?;
        log::debug!(
            "answer selected: position={} option={option}",
            guard.session.position()
        );
        Ok(())
    }

    /// Move to the next question; completing the quiz stops the countdown.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Poisoned` if the session lock is poisoned.
    pub fn advance(&mut self) -> Result<Step, QuizServiceError> {
        let step = self.lock()?.session.advance();
        if step != Step::Completed {
            return Ok(step);
        }

        self.cancel_timer();
        let summary = self
            .lock()?
            .finish(&self.clock, self.settings.pass_threshold())?;
        log::info!(
            "quiz finished: score={}% passed={}",
            summary.score().percentage(),
            summary.passed()
        );
        self.emit(HostEvent::Completed(summary));
        Ok(Step::Completed)
    }

    /// # Errors
    ///
    /// Returns `QuizServiceError::Poisoned` if the session lock is poisoned.
    pub fn retreat(&self) -> Result<Step, QuizServiceError> {
        Ok(self.lock()?.session.retreat())
    }

    /// Switch difficulty; the attempt is discarded and the countdown stopped.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Poisoned` if the session lock is poisoned.
    pub fn set_filter(&mut self, filter: DifficultyFilter) -> Result<(), QuizServiceError> {
        self.cancel_timer();
        let mut guard = self.lock()?;
        guard.session.set_filter(filter);
        guard.reset();
        log::info!(
            "difficulty filter set to {filter}: {} questions",
            guard.session.len()
        );
        Ok(())
    }

    /// Discard the attempt and return to `NotStarted`.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Poisoned` if the session lock is poisoned.
    pub fn restart(&mut self) -> Result<(), QuizServiceError> {
        self.cancel_timer();
        let mut guard = self.lock()?;
        guard.session.restart();
        guard.reset();
        log::debug!("quiz restarted");
        Ok(())
    }

    /// Stop the countdown. The session stays readable.
    pub fn close(&mut self) {
        self.cancel_timer();
    }

    fn cancel_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.cancel();
        }
    }

    fn spawn_ticker(&self, attempt: u64) -> TimerHandle {
        let state = Arc::clone(&self.state);
        let events = self.events.clone();
        let clock = self.clock;
        let pass_threshold = self.settings.pass_threshold();

        TimerHandle::spawn(TICK_PERIOD, move || {
            let Ok(mut guard) = state.lock() else {
                log::warn!("quiz state poisoned; stopping countdown");
                return ControlFlow::Break(());
            };
            guard.on_tick(attempt, &clock, pass_threshold, &events)
        })
    }

    fn emit(&self, event: HostEvent) {
        if self.events.send(event).is_err() {
            log::debug!("quiz event dropped: receiver closed");
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, HostState>, QuizServiceError> {
        self.state.lock().map_err(|_| QuizServiceError::Poisoned)
    }
}

impl Drop for QuizHost {
    fn drop(&mut self) {
        self.cancel_timer();
    }
}

impl fmt::Debug for QuizHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizHost")
            .field("timer_running", &self.is_timer_running())
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
