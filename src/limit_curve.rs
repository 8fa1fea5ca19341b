//! Speed dependent steering torque limits
//!
//! A tuning curve is a two stage lookup. Every entry maps the planner's model
//! speed proxy onto max/up/down values; the resulting per-entry values are then
//! interpolated along the ego speed axis.

use heapless::Vec;

use crate::config::SteerLimits;
use crate::error::ConfigError;
use crate::interp::{interp, is_non_decreasing};

/// Upper bound on entries in a tuning curve.
pub const MAX_CURVE_ENTRIES: usize = 21;

/// One row of a tuning curve, indexed by model speed.
#[derive(Copy, Clone, Debug)]
pub struct CurveEntry<'a> {
    pub model_speed_bp: &'a [f32],
    pub steer_max_v: &'a [f32],
    pub steer_delta_up_v: &'a [f32],
    pub steer_delta_down_v: &'a [f32],
}

/// Validated, immutable tuning curve.
#[derive(Copy, Clone, Debug)]
pub struct TuningCurve<'a> {
    ego_speed_bp_kph: &'a [f32],
    entries: &'a [CurveEntry<'a>],
}

impl<'a> TuningCurve<'a> {
    pub fn new(
        ego_speed_bp_kph: &'a [f32],
        entries: &'a [CurveEntry<'a>],
    ) -> Result<Self, ConfigError> {
        if ego_speed_bp_kph.is_empty() || entries.is_empty() {
            return Err(ConfigError::EmptyAxis);
        }
        if entries.len() > MAX_CURVE_ENTRIES {
            return Err(ConfigError::TooManyEntries);
        }
        if entries.len() != ego_speed_bp_kph.len() {
            return Err(ConfigError::LengthMismatch);
        }
        if !is_non_decreasing(ego_speed_bp_kph) {
            return Err(ConfigError::NonMonotonicAxis);
        }

        for entry in entries {
            let n = entry.model_speed_bp.len();
            if n == 0 {
                return Err(ConfigError::EmptyAxis);
            }
            if !is_non_decreasing(entry.model_speed_bp) {
                return Err(ConfigError::NonMonotonicAxis);
            }
            if entry.steer_max_v.len() != n
                || entry.steer_delta_up_v.len() != n
                || entry.steer_delta_down_v.len() != n
            {
                return Err(ConfigError::LengthMismatch);
            }
        }

        Ok(TuningCurve {
            ego_speed_bp_kph,
            entries,
        })
    }

    pub fn ego_speed_bp_kph(&self) -> &'a [f32] {
        self.ego_speed_bp_kph
    }

    pub fn entries(&self) -> &'a [CurveEntry<'a>] {
        self.entries
    }
}

/// Result of a limit curve lookup.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CurveLimits {
    pub steer_max: f32,
    pub steer_delta_up: f32,
    pub steer_delta_down: f32,
}

/// Evaluates a tuning curve, capped by the vehicle's static limits.
#[derive(Copy, Clone, Debug)]
pub struct LimitCurveEvaluator<'a> {
    curve: TuningCurve<'a>,
    limits: SteerLimits,
}

impl<'a> LimitCurveEvaluator<'a> {
    pub fn new(curve: TuningCurve<'a>, limits: SteerLimits) -> Self {
        LimitCurveEvaluator { curve, limits }
    }

    pub fn evaluate(&self, v_ego_kph: f32, model_speed: f32) -> CurveLimits {
        let mut max_v: Vec<f32, MAX_CURVE_ENTRIES> = Vec::new();
        let mut up_v: Vec<f32, MAX_CURVE_ENTRIES> = Vec::new();
        let mut down_v: Vec<f32, MAX_CURVE_ENTRIES> = Vec::new();

        // entry count is bounded by TuningCurve::new
        for entry in self.curve.entries.iter().take(MAX_CURVE_ENTRIES) {
            let bp = entry.model_speed_bp;
            let _ = max_v.push(interp(model_speed, bp, entry.steer_max_v));
            let _ = up_v.push(interp(model_speed, bp, entry.steer_delta_up_v));
            let _ = down_v.push(interp(model_speed, bp, entry.steer_delta_down_v));
        }

        let speed_bp = self.curve.ego_speed_bp_kph;
        CurveLimits {
            steer_max: interp(v_ego_kph, speed_bp, &max_v).min(self.limits.steer_max),
            steer_delta_up: interp(v_ego_kph, speed_bp, &up_v).min(self.limits.steer_delta_up),
            steer_delta_down: interp(v_ego_kph, speed_bp, &down_v)
                .min(self.limits.steer_delta_down),
        }
    }

    /// Static limits tightened by the curve at this operating point.
    pub fn tightened_limits(&self, v_ego_kph: f32, model_speed: f32) -> SteerLimits {
        let c = self.evaluate(v_ego_kph, model_speed);
        self.limits
            .tightened(c.steer_max, c.steer_delta_up, c.steer_delta_down)
    }

    pub fn static_limits(&self) -> &SteerLimits {
        &self.limits
    }
}
