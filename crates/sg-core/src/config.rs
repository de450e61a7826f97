//! Run configuration.
//!
//! Portal behaviour is driven entirely by [`PortalConfig`], which the core
//! only ever reads.  The host owns the values and may change them between
//! ticks (e.g. from a settings screen); nothing is cached across ticks.
//!
//! Both tables can live in one TOML document:
//!
//! ```toml
//! [sim]
//! ticks_per_second = 60
//! total_ticks      = 1200
//! seed             = 42
//!
//! [portal]
//! min_path_cost_threshold  = 300
//! portal_duration_secs     = 5.0
//! stun_ticks_after_teleport = 60
//! ```
//!
//! Missing keys fall back to their defaults.

use std::ops::RangeInclusive;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{CoreError, CoreResult, TickClock};

/// Threshold values the settings surface accepts.
pub const THRESHOLD_RANGE: RangeInclusive<u32> = 100..=1000;

/// Portal lifetimes (seconds) the settings surface accepts.
pub const DURATION_RANGE: RangeInclusive<f32> = 1.0..=30.0;

/// Exit and landing search radii, in rings.  A search visits O(r²) cells.
pub const SEARCH_RADIUS_RANGE: RangeInclusive<u32> = 1..=32;

// ── PortalConfig ──────────────────────────────────────────────────────────────

/// Tunables for the interceptor, spawner, and portal entities.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortalConfig {
    /// Path cost above which a portal pair replaces the walk.
    pub min_path_cost_threshold: u32,

    /// Emit entry/exit/placement cues.  Purely cosmetic.
    pub enable_visualization: bool,

    /// Verbose decision logging.  Read by the binary to pick a log filter.
    pub debug_mode: bool,

    /// How long an unused pair stays open, in seconds.
    pub portal_duration_secs: f32,

    /// Stun applied to the agent after landing.  0 disables the stun.
    pub stun_ticks_after_teleport: u32,

    /// Only agents carrying or wearing `device_def` may open portals.
    pub require_device: bool,

    /// Item def that enables portal creation.
    pub device_def: String,

    /// Rings searched around a requested exit cell.
    pub exit_search_radius: u32,

    /// Rings searched around the exit portal for a landing cell.
    pub landing_search_radius: u32,

    /// Cost per cell of straight-line distance when the oracle reports
    /// the destination unreachable.
    pub unreachable_cost_per_cell: f32,

    /// Cost per cell of straight-line distance when the oracle faults.
    pub fault_cost_per_cell: f32,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            min_path_cost_threshold:   300,
            enable_visualization:      true,
            debug_mode:                false,
            portal_duration_secs:      5.0,
            stun_ticks_after_teleport: 60,
            require_device:            true,
            device_def:                "PortalGun_Device".to_owned(),
            exit_search_radius:        5,
            landing_search_radius:     4,
            unreachable_cost_per_cell: 20.0,
            fault_cost_per_cell:       15.0,
        }
    }
}

impl PortalConfig {
    /// Portal lifetime in whole ticks for `clock`.
    #[inline]
    pub fn duration_ticks(&self, clock: &TickClock) -> u64 {
        clock.ticks_for_secs(self.portal_duration_secs)
    }

    /// Reject values the settings surface would never produce.
    pub fn validate(&self) -> CoreResult<()> {
        if !THRESHOLD_RANGE.contains(&self.min_path_cost_threshold) {
            return Err(CoreError::Config(format!(
                "min_path_cost_threshold {} outside {:?}",
                self.min_path_cost_threshold, THRESHOLD_RANGE
            )));
        }
        if !self.portal_duration_secs.is_finite() || !DURATION_RANGE.contains(&self.portal_duration_secs) {
            return Err(CoreError::Config(format!(
                "portal_duration_secs {} outside {:?}",
                self.portal_duration_secs, DURATION_RANGE
            )));
        }
        for (name, r) in [
            ("exit_search_radius", self.exit_search_radius),
            ("landing_search_radius", self.landing_search_radius),
        ] {
            if !SEARCH_RADIUS_RANGE.contains(&r) {
                return Err(CoreError::Config(format!("{name} {r} outside {SEARCH_RADIUS_RANGE:?}")));
            }
        }
        for (name, v) in [
            ("unreachable_cost_per_cell", self.unreachable_cost_per_cell),
            ("fault_cost_per_cell", self.fault_cost_per_cell),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(CoreError::Config(format!("{name} must be a non-negative number, got {v}")));
            }
        }
        if self.require_device && self.device_def.trim().is_empty() {
            return Err(CoreError::Config("device_def is empty but require_device is set".into()));
        }
        Ok(())
    }

    pub fn from_toml_str(s: &str) -> CoreResult<Self> {
        let cfg: Self = toml::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn to_toml_string(&self) -> CoreResult<String> {
        Ok(toml::to_string(self)?)
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Tick-loop configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Simulation steps per simulated second.
    pub ticks_per_second: u32,

    /// Total ticks `Sim::run` simulates.
    pub total_ticks: u64,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self { ticks_per_second: 60, total_ticks: 600, seed: 0 }
    }
}

impl SimConfig {
    /// Construct a `TickClock` pre-configured for this run.
    pub fn make_clock(&self) -> TickClock {
        TickClock::new(self.ticks_per_second)
    }

    pub fn validate(&self) -> CoreResult<()> {
        if self.ticks_per_second == 0 {
            return Err(CoreError::Config("ticks_per_second must be > 0".into()));
        }
        Ok(())
    }
}

// ── SkipgateConfig ────────────────────────────────────────────────────────────

/// One document holding both tables.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkipgateConfig {
    pub sim:    SimConfig,
    pub portal: PortalConfig,
}

impl SkipgateConfig {
    pub fn from_toml_str(s: &str) -> CoreResult<Self> {
        let cfg: Self = toml::from_str(s)?;
        cfg.sim.validate()?;
        cfg.portal.validate()?;
        Ok(cfg)
    }

    /// Load and validate a TOML file.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}
