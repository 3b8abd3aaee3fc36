//! The reaction timer: one player, repeatable rounds.
//!
//! ```text
//! intro -> ready -> countdown -> waiting -> result
//!                       |                     |
//!                       +----> too-early      |
//!                                  |          |
//!          ready <-------- reset --+----------+
//! ```
//!
//! All transitions happen on the caller's thread, either from a command
//! ([`ReactionTimer::start`], [`ReactionTimer::click`], [`ReactionTimer::reset`])
//! or from [`ReactionTimer::on_tick`] noticing that a scheduled timer is due.

use tracing::{debug, info};

use crate::clock::{Clock, Randomness, SystemClock, ThreadRandomness};
use crate::feedback::Tier;
use crate::history::{BestComparison, History};
use crate::schedule::{Fired, Scheduler, TimerId};
use crate::session::SessionSnapshot;

pub const INTRO_START: u32 = 3;
pub const INTRO_TICK_MS: u64 = 1000;
pub const MIN_DELAY_MS: u64 = 1000;
pub const DELAY_SPAN_MS: u64 = 4000;
pub const DISPLAY_TICK_MS: u64 = 1000;
/// A click this soon after `start` is the start click itself, not an early one
pub const EARLY_CLICK_GRACE_MS: u64 = 300;
/// Subtracted from every raw measurement to cover display pipeline lag
pub const LAG_CORRECTION_MS: u64 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum Status {
    Intro,
    Ready,
    Countdown,
    Waiting,
    Result,
    TooEarly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    Started { delay_ms: u64 },
    Ignored(Status),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Click landed on the stimulus. `recorded` is false for a zero result,
    /// which is shown but kept out of the history.
    Measured { reaction_ms: u64, recorded: bool },
    TooEarly,
    Ignored(Status),
}

#[derive(Debug)]
struct Countdown {
    delay_ms: u64,
    entered_at: u64,
    display_secs: u32,
    deadline: TimerId,
    tick: TimerId,
}

impl Countdown {
    fn is_armed(&self, now: u64) -> bool {
        now.saturating_sub(self.entered_at) >= EARLY_CLICK_GRACE_MS
    }
}

#[derive(Debug)]
enum Phase {
    Intro { tick: TimerId },
    Ready,
    Countdown(Countdown),
    Waiting { shown_at: u64 },
    Result { reaction_ms: u64, shown_at: u64 },
    TooEarly,
}

impl Phase {
    fn status(&self) -> Status {
        match self {
            Phase::Intro { .. } => Status::Intro,
            Phase::Ready => Status::Ready,
            Phase::Countdown(_) => Status::Countdown,
            Phase::Waiting { .. } => Status::Waiting,
            Phase::Result { .. } => Status::Result,
            Phase::TooEarly => Status::TooEarly,
        }
    }
}

enum CountdownExit {
    Stimulus,
    TooEarly,
}

enum TimerAction {
    IntroTick,
    DisplayTick,
    Deadline,
    Stale,
}

/// Raw clock delta minus the lag correction, never below zero
pub fn adjust(raw_ms: u64) -> u64 {
    raw_ms.saturating_sub(LAG_CORRECTION_MS)
}

/// Map a uniform `[0, 1)` draw onto `[1000, 5000)` milliseconds
pub fn draw_delay_ms(unit: f64) -> u64 {
    let offset = (unit.max(0.0) * DELAY_SPAN_MS as f64).floor() as u64;
    MIN_DELAY_MS + offset.min(DELAY_SPAN_MS - 1)
}

#[derive(Debug)]
pub struct ReactionTimer<C: Clock = SystemClock, R: Randomness = ThreadRandomness> {
    clock: C,
    rng: R,
    scheduler: Scheduler,
    phase: Phase,
    intro_countdown: u32,
    pending_delay_ms: Option<u64>,
    history: History,
}

impl ReactionTimer {
    pub fn system(skip_intro: bool) -> Self {
        Self::new(SystemClock::new(), ThreadRandomness, skip_intro)
    }
}

impl<C: Clock, R: Randomness> ReactionTimer<C, R> {
    pub fn new(clock: C, rng: R, skip_intro: bool) -> Self {
        let mut scheduler = Scheduler::new();
        let (phase, intro_countdown) = if skip_intro {
            (Phase::Ready, 0)
        } else {
            let tick = scheduler.schedule_every(clock.now_ms(), INTRO_TICK_MS);
            (Phase::Intro { tick }, INTRO_START)
        };
        debug!(status = %phase.status(), "session created");

        Self {
            clock,
            rng,
            scheduler,
            phase,
            intro_countdown,
            pending_delay_ms: None,
            history: History::new(),
        }
    }

    fn set_phase(&mut self, phase: Phase) {
        debug!(from = %self.phase.status(), to = %phase.status(), "transition");
        self.phase = phase;
    }

    /// Begin a round. Only valid from `ready`.
    pub fn start(&mut self) -> StartOutcome {
        if !matches!(self.phase, Phase::Ready) {
            return StartOutcome::Ignored(self.status());
        }

        let now = self.clock.now_ms();
        let delay_ms = draw_delay_ms(self.rng.next_unit());
        let display_secs = delay_ms.div_ceil(1000) as u32;

        let tick = self.scheduler.schedule_every(now, DISPLAY_TICK_MS);
        let deadline = self.scheduler.schedule_once(now, delay_ms);

        self.pending_delay_ms = Some(delay_ms);
        self.set_phase(Phase::Countdown(Countdown {
            delay_ms,
            entered_at: now,
            display_secs,
            deadline,
            tick,
        }));
        debug!(delay_ms, display_secs, "round started");

        StartOutcome::Started { delay_ms }
    }

    /// A pointer click. Measures in `waiting`, fails the round when it lands
    /// in an armed countdown, and is a no-op anywhere else.
    pub fn click(&mut self) -> ClickOutcome {
        let now = self.clock.now_ms();

        match &self.phase {
            Phase::Waiting { shown_at } => {
                let shown_at = *shown_at;
                let raw_ms = now.saturating_sub(shown_at);
                let reaction_ms = adjust(raw_ms);
                let recorded = reaction_ms != 0;
                if recorded {
                    self.history.push(reaction_ms);
                }
                self.set_phase(Phase::Result {
                    reaction_ms,
                    shown_at,
                });
                info!(raw_ms, reaction_ms, recorded, best = ?self.history.best(), "round measured");
                ClickOutcome::Measured {
                    reaction_ms,
                    recorded,
                }
            }
            Phase::Countdown(countdown) if countdown.is_armed(now) => {
                info!(
                    after_ms = now.saturating_sub(countdown.entered_at),
                    delay_ms = countdown.delay_ms,
                    "clicked too early"
                );
                self.leave_countdown(CountdownExit::TooEarly);
                ClickOutcome::TooEarly
            }
            phase => ClickOutcome::Ignored(phase.status()),
        }
    }

    /// Back to `ready` after a result or an early click. History is kept.
    pub fn reset(&mut self) -> bool {
        if !matches!(self.phase, Phase::Result { .. } | Phase::TooEarly) {
            return false;
        }

        self.cancel_pending();
        self.pending_delay_ms = None;
        self.set_phase(Phase::Ready);
        true
    }

    /// Fire every timer due by now. Returns true if anything observable changed.
    pub fn on_tick(&mut self) -> bool {
        let now = self.clock.now_ms();
        let mut changed = false;

        while let Some(fired) = self.scheduler.pop_due(now) {
            changed |= self.on_timer(fired);
        }

        changed
    }

    fn on_timer(&mut self, fired: Fired) -> bool {
        let action = match &self.phase {
            Phase::Intro { tick } if *tick == fired.id => TimerAction::IntroTick,
            Phase::Countdown(c) if c.tick == fired.id => TimerAction::DisplayTick,
            Phase::Countdown(c) if c.deadline == fired.id => TimerAction::Deadline,
            _ => TimerAction::Stale,
        };

        match action {
            TimerAction::IntroTick => {
                if self.intro_countdown > 0 {
                    self.intro_countdown -= 1;
                } else {
                    self.cancel_pending();
                    self.set_phase(Phase::Ready);
                }
                true
            }
            TimerAction::DisplayTick => match &mut self.phase {
                Phase::Countdown(c) if c.display_secs > 1 => {
                    c.display_secs -= 1;
                    true
                }
                _ => false,
            },
            TimerAction::Deadline => {
                self.leave_countdown(CountdownExit::Stimulus);
                true
            }
            TimerAction::Stale => {
                debug!(due_at = fired.due_at, status = %self.status(), "ignoring stale timer");
                self.scheduler.cancel(fired.id);
                false
            }
        }
    }

    /// Both ways out of `countdown` go through here so the deadline and the
    /// display tick are always cancelled together with the transition.
    fn leave_countdown(&mut self, exit: CountdownExit) {
        let (deadline, tick) = match &self.phase {
            Phase::Countdown(c) => (c.deadline, c.tick),
            _ => return,
        };
        self.scheduler.cancel(deadline);
        self.scheduler.cancel(tick);

        let next = match exit {
            // the stimulus becomes clickable in this same step, so this is
            // the origin of the measurement
            CountdownExit::Stimulus => Phase::Waiting {
                shown_at: self.clock.now_ms(),
            },
            CountdownExit::TooEarly => Phase::TooEarly,
        };
        self.set_phase(next);
    }

    fn cancel_pending(&mut self) -> usize {
        let n = self.scheduler.cancel_all();
        if n > 0 {
            debug!(cancelled = n, "cancelled pending timers");
        }
        n
    }

    /// End the session, cancelling anything still scheduled
    pub fn teardown(mut self) -> History {
        self.cancel_pending();
        std::mem::take(&mut self.history)
    }

    pub fn status(&self) -> Status {
        self.phase.status()
    }

    pub fn intro_countdown(&self) -> u32 {
        self.intro_countdown
    }

    pub fn pending_delay_ms(&self) -> Option<u64> {
        self.pending_delay_ms
    }

    pub fn countdown_display_seconds(&self) -> Option<u32> {
        match &self.phase {
            Phase::Countdown(c) => Some(c.display_secs),
            _ => None,
        }
    }

    pub fn stimulus_shown_at(&self) -> Option<u64> {
        match self.phase {
            Phase::Waiting { shown_at } | Phase::Result { shown_at, .. } => Some(shown_at),
            _ => None,
        }
    }

    pub fn last_reaction_ms(&self) -> Option<u64> {
        match self.phase {
            Phase::Result { reaction_ms, .. } => Some(reaction_ms),
            _ => None,
        }
    }

    pub fn is_early_click_armed(&self) -> bool {
        match &self.phase {
            Phase::Countdown(c) => c.is_armed(self.clock.now_ms()),
            _ => false,
        }
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn best(&self) -> Option<u64> {
        self.history.best()
    }

    pub fn feedback(&self) -> Option<Tier> {
        self.last_reaction_ms().map(Tier::classify)
    }

    pub fn comparison(&self) -> Option<BestComparison> {
        self.last_reaction_ms()
            .and_then(|ms| self.history.compare(ms))
    }

    pub fn pending_timers(&self) -> usize {
        self.scheduler.pending_count()
    }

    /// Milliseconds until the next scheduled timer is due, 0 if one is overdue
    pub fn until_next_timer(&self) -> Option<u64> {
        let now = self.clock.now_ms();
        self.scheduler
            .next_due()
            .map(|due| due.saturating_sub(now))
    }

    pub fn snapshot(&self) -> SessionSnapshot<'_> {
        SessionSnapshot {
            status: self.status(),
            intro_countdown: self.intro_countdown,
            countdown_display_seconds: self.countdown_display_seconds(),
            last_reaction_ms: self.last_reaction_ms(),
            history: &self.history,
            best: self.best(),
        }
    }
}

impl<C: Clock, R: Randomness> Drop for ReactionTimer<C, R> {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}
