//! Simulation time model.
//!
//! # Design
//!
//! Time is a monotonically increasing `Tick` counter.  Whether the counter
//! may advance is decided by a [`TickPacer`], which the control loop polls:
//!
//!   advance when  now > origin + advanced_ticks * tick_duration
//!
//! Production runs use [`WallClockPacer`].  Tests and batch runs use
//! [`ImmediatePacer`] or [`ScriptedPacer`] so no real time has to pass.

use std::collections::VecDeque;
use std::fmt;
use std::time::{Duration, Instant};

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// The tick after `self`.
    #[inline]
    pub fn next(self) -> Tick {
        Tick(self.0 + 1)
    }

    /// Ticks elapsed from `earlier` to `self`; zero if `earlier` is later.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── TickPacer ─────────────────────────────────────────────────────────────────

/// Decides when the control loop may advance to the next tick.
///
/// `advanced` is the number of ticks the loop has already advanced, so the
/// boundary being asked about is `origin + advanced * T`.
pub trait TickPacer {
    /// `true` if the boundary after `advanced` ticks has been passed.
    fn should_advance(&mut self, advanced: Tick) -> bool;

    /// Called when `should_advance` returned `false`.  This is the loop's only
    /// suspension point.
    fn idle(&mut self, _advanced: Tick) {}
}

impl<P: TickPacer + ?Sized> TickPacer for &mut P {
    fn should_advance(&mut self, advanced: Tick) -> bool {
        (**self).should_advance(advanced)
    }

    fn idle(&mut self, advanced: Tick) {
        (**self).idle(advanced)
    }
}

// ── WallClockPacer ────────────────────────────────────────────────────────────

/// Fixed-length wall-clock slices starting at `origin`.
#[derive(Clone, Debug)]
pub struct WallClockPacer {
    origin: Instant,
    tick:   Duration,
}

impl WallClockPacer {
    /// Slices of `tick` starting now.
    pub fn start(tick: Duration) -> Self {
        Self { origin: Instant::now(), tick }
    }

    /// Slices of `tick` starting at `origin`.
    pub fn with_origin(origin: Instant, tick: Duration) -> Self {
        Self { origin, tick }
    }

    /// Wall-clock instant of the boundary after `advanced` ticks, or `None`
    /// if it lies beyond what `Instant` can represent.
    pub fn boundary(&self, advanced: Tick) -> Option<Instant> {
        let n = u32::try_from(advanced.0).ok()?;
        self.origin.checked_add(self.tick.checked_mul(n)?)
    }
}

impl TickPacer for WallClockPacer {
    fn should_advance(&mut self, advanced: Tick) -> bool {
        match self.boundary(advanced) {
            Some(at) => Instant::now() > at,
            None     => false,
        }
    }

    fn idle(&mut self, advanced: Tick) {
        // Sleep until the boundary instead of spinning on `Instant::now()`.
        if let Some(at) = self.boundary(advanced) {
            let now = Instant::now();
            if at > now {
                std::thread::sleep(at - now);
            }
        }
    }
}

// ── ImmediatePacer ────────────────────────────────────────────────────────────

/// Advances on every poll.  Runs the loop as fast as the CPU allows.
#[derive(Copy, Clone, Debug, Default)]
pub struct ImmediatePacer;

impl TickPacer for ImmediatePacer {
    #[inline]
    fn should_advance(&mut self, _advanced: Tick) -> bool {
        true
    }
}

// ── ScriptedPacer ─────────────────────────────────────────────────────────────

/// Replays a fixed sequence of poll answers, then advances on every poll.
///
/// Lets tests observe the loop's behaviour between tick boundaries.
#[derive(Clone, Debug, Default)]
pub struct ScriptedPacer {
    script: VecDeque<bool>,
    polls:  usize,
    idles:  usize,
}

impl ScriptedPacer {
    pub fn new(script: impl IntoIterator<Item = bool>) -> Self {
        Self {
            script: script.into_iter().collect(),
            polls:  0,
            idles:  0,
        }
    }

    /// Number of `should_advance` calls seen so far.
    pub fn polls(&self) -> usize {
        self.polls
    }

    /// Number of `idle` calls seen so far.
    pub fn idles(&self) -> usize {
        self.idles
    }
}

impl TickPacer for ScriptedPacer {
    fn should_advance(&mut self, _advanced: Tick) -> bool {
        self.polls += 1;
        self.script.pop_front().unwrap_or(true)
    }

    fn idle(&mut self, _advanced: Tick) {
        self.idles += 1;
    }
}
