//! Hyundai Sonata (DN8) vehicle configuration data
//!
//! **WARNING**
//!
//! The values listed here bound the torque the power steering unit will be
//! asked for. Raising them past what the MDPS accepts faults the unit.

use crate::config::{Features, SteerLimits};
use crate::limit_curve::CurveEntry;

pub const NAME: &str = "HYUNDAI SONATA 2020";

pub const STEER_LIMITS: SteerLimits = SteerLimits {
    steer_max: 384.0,
    steer_delta_up: 3.0,
    steer_delta_down: 7.0,
    steer_driver_allowance: 50.0,
    steer_driver_multiplier: 2.0,
    steer_driver_factor: 1.0,
};

pub const MAX_STEERING_ANGLE_DEG: f32 = 90.0;

pub static TUNING_SPEED_BP_KPH: [f32; 3] = [30.0, 60.0, 90.0];

pub static TUNING_ENTRIES: [CurveEntry<'static>; 3] = [
    CurveEntry {
        model_speed_bp: &[80.0, 255.0],
        steer_max_v: &[384.0, 300.0],
        steer_delta_up_v: &[3.0, 3.0],
        steer_delta_down_v: &[7.0, 5.0],
    },
    CurveEntry {
        model_speed_bp: &[80.0, 255.0],
        steer_max_v: &[384.0, 255.0],
        steer_delta_up_v: &[3.0, 2.0],
        steer_delta_down_v: &[7.0, 5.0],
    },
    CurveEntry {
        model_speed_bp: &[80.0, 150.0, 255.0],
        steer_max_v: &[320.0, 255.0, 200.0],
        steer_delta_up_v: &[3.0, 2.0, 2.0],
        steer_delta_down_v: &[7.0, 5.0, 4.0],
    },
];

pub const FEATURES: Features = Features { lfa_mfa: true };

pub const LONGITUDINAL_CONTROL: bool = true;
