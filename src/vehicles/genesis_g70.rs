//! Genesis G70 vehicle configuration data

use crate::config::{Features, SteerLimits};
use crate::limit_curve::CurveEntry;

pub const NAME: &str = "GENESIS G70 2018";

pub const STEER_LIMITS: SteerLimits = SteerLimits {
    steer_max: 384.0,
    steer_delta_up: 3.0,
    steer_delta_down: 7.0,
    steer_driver_allowance: 50.0,
    steer_driver_multiplier: 2.0,
    steer_driver_factor: 1.0,
};

pub const MAX_STEERING_ANGLE_DEG: f32 = 85.0;

pub static TUNING_SPEED_BP_KPH: [f32; 1] = [0.0];

pub static TUNING_ENTRIES: [CurveEntry<'static>; 1] = [CurveEntry {
    model_speed_bp: &[80.0, 255.0],
    steer_max_v: &[384.0, 300.0],
    steer_delta_up_v: &[3.0, 3.0],
    steer_delta_down_v: &[7.0, 6.0],
}];

// no LFA/HDA cluster on this trim
pub const FEATURES: Features = Features { lfa_mfa: false };

pub const LONGITUDINAL_CONTROL: bool = false;
