//! Leg travel times and per-rider boarding delays.
//!
//! Short hops are driven at a constant speed; anything at or beyond the
//! threshold takes a uniformly random time, since on longer legs traffic
//! dominates the exact distance.  Boarding one rider takes a triangular
//! random delay.  All times are minutes.

use rand::distributions::Uniform;
use rand_distr::Triangular;

use bus_core::SimRng;

use crate::{FleetError, FleetResult};

/// Tunable constants for [`TravelModel`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TravelParams {
    /// Legs shorter than this (miles) use the constant-speed model.
    pub short_hop_threshold: f64,
    /// Constant speed for short hops, miles per hour.
    pub short_hop_speed:     f64,
    pub long_haul_min_mins:  f64,
    pub long_haul_max_mins:  f64,
    pub boarding_min_mins:   f64,
    pub boarding_mode_mins:  f64,
    pub boarding_max_mins:   f64,
}

impl Default for TravelParams {
    fn default() -> Self {
        Self {
            short_hop_threshold: 2.0,
            short_hop_speed:     20.0,
            long_haul_min_mins:  5.0,
            long_haul_max_mins:  7.0,
            boarding_min_mins:   0.0,
            boarding_mode_mins:  1.0 / 60.0,
            boarding_max_mins:   5.0 / 60.0,
        }
    }
}

/// Validated travel model with its distributions pre-built.
#[derive(Clone, Debug)]
pub struct TravelModel {
    params:    TravelParams,
    long_haul: Uniform<f64>,
    boarding:  Triangular<f64>,
}

impl TravelModel {
    /// # Errors
    /// [`FleetError::InvalidTravelModel`] for a non-positive speed, a
    /// negative threshold, an inverted or negative range, or a boarding mode
    /// outside `[min, max]`.
    pub fn new(params: TravelParams) -> FleetResult<Self> {
        let p = &params;
        if !(p.short_hop_threshold.is_finite() && p.short_hop_threshold >= 0.0) {
            return Err(invalid(format!("short-hop threshold {}", p.short_hop_threshold)));
        }
        if !(p.short_hop_speed.is_finite() && p.short_hop_speed > 0.0) {
            return Err(invalid(format!("short-hop speed {}", p.short_hop_speed)));
        }
        if !(p.long_haul_min_mins.is_finite()
            && p.long_haul_max_mins.is_finite()
            && 0.0 <= p.long_haul_min_mins
            && p.long_haul_min_mins <= p.long_haul_max_mins)
        {
            return Err(invalid(format!(
                "long-haul range {}..={}",
                p.long_haul_min_mins, p.long_haul_max_mins
            )));
        }
        if p.boarding_min_mins < 0.0 {
            return Err(invalid(format!("boarding minimum {}", p.boarding_min_mins)));
        }
        let boarding = Triangular::new(p.boarding_min_mins, p.boarding_max_mins, p.boarding_mode_mins)
            .map_err(|e| invalid(format!("boarding delay: {e:?}")))?;
        let long_haul = Uniform::new_inclusive(p.long_haul_min_mins, p.long_haul_max_mins);

        Ok(Self { params, long_haul, boarding })
    }

    pub fn params(&self) -> &TravelParams {
        &self.params
    }

    /// Minutes to drive a leg of `distance` miles.
    pub fn travel_time(&self, distance: f64, rng: &mut SimRng) -> f64 {
        if distance < self.params.short_hop_threshold {
            distance / self.params.short_hop_speed * 60.0
        } else {
            rng.sample(&self.long_haul)
        }
    }

    /// Minutes one rider takes to get on.
    #[inline]
    pub fn boarding_delay(&self, rng: &mut SimRng) -> f64 {
        rng.sample(&self.boarding)
    }
}

fn invalid(msg: String) -> FleetError {
    FleetError::InvalidTravelModel(msg)
}
