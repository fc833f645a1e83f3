//! Timed-pattern evaluation over a bounded window of click timestamps.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};

use super::achievements::TimedPatternSpec;
use super::state::{CLICK_WINDOW_CAPACITY, DAILY_LOGIN_SECONDS};
use crate::time::seconds_between;

/// Most recent click instants, oldest first. Eviction is FIFO by count, not by
/// age, so a slow player still has `count` consecutive entries to inspect.
#[derive(Clone, Debug, Default)]
pub struct ClickWindow {
    times: VecDeque<DateTime<Utc>>,
}

impl ClickWindow {
    pub fn new() -> Self {
        Self {
            times: VecDeque::with_capacity(CLICK_WINDOW_CAPACITY + 1),
        }
    }

    pub fn push(&mut self, at: DateTime<Utc>) {
        self.times.push_back(at);
        while self.times.len() > CLICK_WINDOW_CAPACITY {
            self.times.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn last(&self) -> Option<DateTime<Utc>> {
        self.times.back().copied()
    }

    /// The last `n` entries, oldest first. `None` if fewer are recorded.
    fn suffix(&self, n: usize) -> Option<impl Iterator<Item = &DateTime<Utc>>> {
        if n == 0 || self.times.len() < n {
            return None;
        }
        Some(self.times.iter().skip(self.times.len() - n))
    }
}

/// Per-session timing data. Owned by the engine; the evaluator only ever
/// sees a `TimingContext` borrowed from it.
#[derive(Clone, Debug)]
pub struct Session {
    pub window: ClickWindow,
    pub session_start: DateTime<Utc>,
    /// Login before this session, if the player has played before.
    pub last_login: Option<DateTime<Utc>>,
}

impl Session {
    pub fn new(session_start: DateTime<Utc>, last_login: Option<DateTime<Utc>>) -> Self {
        Self {
            window: ClickWindow::new(),
            session_start,
            last_login,
        }
    }

    pub fn context(&self, now: DateTime<Utc>) -> TimingContext<'_> {
        TimingContext {
            window: &self.window,
            session_start: self.session_start,
            last_login: self.last_login,
            now,
        }
    }
}

/// Read-only view of everything a timed pattern may look at.
#[derive(Clone, Copy, Debug)]
pub struct TimingContext<'a> {
    pub window: &'a ClickWindow,
    pub session_start: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
    pub now: DateTime<Utc>,
}

impl TimingContext<'_> {
    pub fn is_satisfied(&self, spec: &TimedPatternSpec) -> bool {
        match *spec {
            TimedPatternSpec::RapidClicks {
                count,
                within_seconds,
            } => self.rapid_clicks(count, within_seconds),
            TimedPatternSpec::PreciseTiming {
                target_seconds,
                tolerance,
            } => self.precise_timing(target_seconds, tolerance),
            TimedPatternSpec::ConsistentClicks {
                count,
                interval_seconds,
                tolerance,
            } => self.consistent_clicks(count, interval_seconds, tolerance),
            TimedPatternSpec::LongSession { minutes } => {
                seconds_between(self.session_start, self.now) >= minutes * 60.0
            }
            TimedPatternSpec::DailyLogin => match self.last_login {
                Some(prev) => seconds_between(prev, self.now) >= DAILY_LOGIN_SECONDS,
                None => false,
            },
        }
    }

    fn rapid_clicks(&self, count: usize, within_seconds: f64) -> bool {
        let (Some(mut recent), Some(last)) = (self.window.suffix(count), self.window.last()) else {
            return false;
        };
        match recent.next() {
            Some(first) => seconds_between(*first, last) <= within_seconds,
            None => false,
        }
    }

    /// Only the immediately preceding gap counts.
    fn precise_timing(&self, target_seconds: f64, tolerance: f64) -> bool {
        let Some(recent) = self.window.suffix(2) else {
            return false;
        };
        let pair: Vec<&DateTime<Utc>> = recent.collect();
        let gap = seconds_between(*pair[0], *pair[1]);
        (gap - target_seconds).abs() <= tolerance
    }

    fn consistent_clicks(&self, count: usize, interval_seconds: f64, tolerance: f64) -> bool {
        let Some(recent) = self.window.suffix(count) else {
            return false;
        };
        let recent: Vec<&DateTime<Utc>> = recent.collect();
        recent
            .windows(2)
            .all(|w| (seconds_between(*w[0], *w[1]) - interval_seconds).abs() <= tolerance)
    }
}
