//! Simulated-time model.
//!
//! # Design
//!
//! Time is event-driven: the clock only moves when the engine dispatches an
//! event, and it jumps straight to that event's timestamp.  There is no
//! fixed step, so `SimTime` is a continuous quantity measured in **minutes**
//! since the start of the service day.
//!
//! `f64` is not `Ord`, but the event queue is keyed by time, so the value is
//! wrapped in [`OrderedFloat`].  Every constructor rejects (or, in debug
//! builds, asserts against) non-finite values, which keeps the total order
//! meaningful.

use std::fmt;

use ordered_float::OrderedFloat;

use crate::{CoreError, CoreResult};

// ── SimTime ───────────────────────────────────────────────────────────────────

/// An absolute simulated timestamp, in minutes from the start of the run.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct SimTime(pub(crate) OrderedFloat<f64>);

impl SimTime {
    pub const ZERO: SimTime = SimTime(OrderedFloat(0.0));

    /// Wrap a minute count.
    ///
    /// # Panics
    /// Panics in debug mode if `minutes` is NaN or infinite.
    #[inline]
    pub fn from_minutes(minutes: f64) -> SimTime {
        debug_assert!(minutes.is_finite(), "SimTime must be finite, got {minutes}");
        SimTime(OrderedFloat(minutes))
    }

    /// Checked constructor for values coming from files or user input.
    pub fn try_from_minutes(minutes: f64) -> CoreResult<SimTime> {
        if minutes.is_finite() {
            Ok(SimTime(OrderedFloat(minutes)))
        } else {
            Err(CoreError::NonFiniteTime(minutes))
        }
    }

    #[inline]
    pub fn from_hours(hours: f64) -> SimTime {
        SimTime::from_minutes(hours * 60.0)
    }

    /// Minutes since the start of the run.
    #[inline]
    pub fn minutes(self) -> f64 {
        self.0.into_inner()
    }

    /// Return the time `minutes` after `self`.
    #[inline]
    pub fn offset(self, minutes: f64) -> SimTime {
        SimTime::from_minutes(self.minutes() + minutes)
    }

    /// Minutes elapsed from `earlier` to `self` (negative if `earlier` is later).
    #[inline]
    pub fn since(self, earlier: SimTime) -> f64 {
        self.minutes() - earlier.minutes()
    }

    /// Zero-based service hour containing this time, for hourly bucketing.
    /// Negative times fall into hour 0.
    #[inline]
    pub fn hour(self) -> u64 {
        (self.minutes().max(0.0) / 60.0).floor() as u64
    }
}

impl std::ops::Add<f64> for SimTime {
    type Output = SimTime;
    #[inline]
    fn add(self, rhs: f64) -> SimTime {
        self.offset(rhs)
    }
}

impl std::ops::Sub for SimTime {
    type Output = f64;
    #[inline]
    fn sub(self, rhs: SimTime) -> f64 {
        self.since(rhs)
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = self.minutes();
        let h = (m / 60.0).floor();
        write!(f, "t={m:.2} ({:02}:{:05.2})", h as i64, m - h * 60.0)
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level run configuration.
///
/// Typically built in code by the application or loaded from JSON (feature
/// `serde`) and passed to `SimBuilder`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Events scheduled after this time are not dispatched.
    pub horizon: SimTime,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Emit an observer snapshot every N simulated minutes.  `0.0` disables
    /// snapshots; `60.0` gives the hourly waiting counts analysts plot.
    pub snapshot_interval_mins: f64,

    /// Keep every dispatched event in the engine's in-memory log.
    pub record_events: bool,
}

impl SimConfig {
    /// A config with snapshots disabled and the event log enabled.
    pub fn new(horizon: SimTime, seed: u64) -> Self {
        Self {
            horizon,
            seed,
            snapshot_interval_mins: 0.0,
            record_events: true,
        }
    }

    /// Reject configurations the engine cannot run.
    pub fn validate(&self) -> CoreResult<()> {
        let horizon = self.horizon.minutes();
        if !(horizon.is_finite() && horizon >= 0.0) {
            return Err(CoreError::Config(format!(
                "horizon must be a finite, non-negative number of minutes, got {horizon}"
            )));
        }
        if !self.snapshot_interval_mins.is_finite() || self.snapshot_interval_mins < 0.0 {
            return Err(CoreError::Config(format!(
                "snapshot_interval_mins must be a non-negative number, got {}",
                self.snapshot_interval_mins
            )));
        }
        Ok(())
    }

    /// `true` if periodic snapshots are enabled.
    #[inline]
    pub fn snapshots_enabled(&self) -> bool {
        self.snapshot_interval_mins > 0.0
    }
}
