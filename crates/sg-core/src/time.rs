//! Simulation time model.
//!
//! # Design
//!
//! Time is represented as a monotonically increasing `Tick` counter.  The
//! mapping to simulated seconds is held in `TickClock`:
//!
//!   seconds = tick / ticks_per_second
//!
//! The default is 60 ticks per second.  Durations that the configuration
//! expresses in seconds (portal lifetime) are converted to whole ticks by
//! truncation, so a 5.0 s lifetime at 60 tps is exactly 300 ticks.

use std::fmt;

use serde::{Deserialize, Serialize};

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default, Serialize, Deserialize)]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }

    /// Ticks elapsed from `earlier` to `self`, saturating at zero.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0.saturating_sub(earlier.0)
    }

    /// Signed distance `self - other`; negative when `self` is earlier.
    #[inline]
    pub fn signed_diff(self, other: Tick) -> i64 {
        self.0 as i64 - other.0 as i64
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── TickClock ─────────────────────────────────────────────────────────────────

/// Converts between tick counts and simulated seconds.
///
/// `TickClock` is cheap to copy and holds no heap data.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickClock {
    /// Simulation steps per simulated second.  Default: 60.
    pub ticks_per_second: u32,
    /// The current tick, advanced by `TickClock::advance()` each iteration.
    pub current_tick: Tick,
}

impl Default for TickClock {
    fn default() -> Self {
        Self::new(60)
    }
}

impl TickClock {
    pub fn new(ticks_per_second: u32) -> Self {
        Self { ticks_per_second, current_tick: Tick::ZERO }
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
    }

    /// Whole ticks spanned by `secs` seconds (truncating).
    #[inline]
    pub fn ticks_for_secs(&self, secs: f32) -> u64 {
        (secs.max(0.0) * self.ticks_per_second as f32) as u64
    }

    /// Seconds represented by a (possibly negative) tick count.
    #[inline]
    pub fn secs_for_ticks(&self, ticks: i64) -> f32 {
        ticks as f32 / self.ticks_per_second as f32
    }

    /// Elapsed simulated seconds since tick 0.
    #[inline]
    pub fn elapsed_secs(&self) -> f32 {
        self.secs_for_ticks(self.current_tick.0 as i64)
    }
}

impl fmt::Display for TickClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.1}s)", self.current_tick, self.elapsed_secs())
    }
}
