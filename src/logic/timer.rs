//! Round countdown driven by an external one-second tick.
//!
//! The timer never sleeps on its own. Whoever owns the clock calls [`CountdownTimer::tick`]
//! with the [`TickToken`] handed out by the latest `start` or `resume`; tokens from an
//! earlier schedule are stale and do nothing, so a late tick can never leak into a new round.

use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    Stopped,
    Running,
    Paused,
}

/// Identifies one schedule of the recurring tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickToken(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Not running, or the token belongs to a cancelled schedule.
    Stale,
    Remaining(u32),
    /// Reached zero; the timer is stopped.
    Expired,
}

#[derive(Debug)]
pub struct CountdownTimer {
    state: TimerState,
    remaining: u32,
    reset_seconds: u32,
    schedule: u64,
}

impl CountdownTimer {
    pub fn new(reset_seconds: u32) -> Self {
        Self {
            state: TimerState::Stopped,
            remaining: reset_seconds,
            reset_seconds,
            schedule: 0,
        }
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Token of the live schedule, if the timer is running.
    pub fn token(&self) -> Option<TickToken> {
        (self.state == TimerState::Running).then_some(TickToken(self.schedule))
    }

    /// Count down from `duration_seconds`, which also becomes the value `clear` resets to.
    pub fn start(&mut self, duration_seconds: u32) -> TickToken {
        self.reset_seconds = duration_seconds;
        self.remaining = duration_seconds;
        self.state = TimerState::Running;
        self.reschedule()
    }

    /// Running stops ticking, paused picks up where it left off.
    pub fn pause(&mut self) -> Option<TickToken> {
        match self.state {
            TimerState::Running => {
                self.state = TimerState::Paused;
                self.schedule += 1;
                None
            }
            TimerState::Paused => self.resume(),
            TimerState::Stopped => None,
        }
    }

    pub fn resume(&mut self) -> Option<TickToken> {
        if self.state != TimerState::Paused {
            return None;
        }
        self.state = TimerState::Running;
        Some(self.reschedule())
    }

    pub fn clear(&mut self) {
        self.schedule += 1;
        self.state = TimerState::Stopped;
        self.remaining = self.reset_seconds;
    }

    pub fn tick(&mut self, token: TickToken) -> Tick {
        if self.token() != Some(token) {
            return Tick::Stale;
        }

        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            debug!("Countdown expired");
            self.schedule += 1;
            self.state = TimerState::Stopped;
            return Tick::Expired;
        }
        Tick::Remaining(self.remaining)
    }

    fn reschedule(&mut self) -> TickToken {
        self.schedule += 1;
        TickToken(self.schedule)
    }
}
