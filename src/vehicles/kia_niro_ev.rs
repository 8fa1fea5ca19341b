//! Kia Niro EV vehicle configuration data
//!
//! **WARNING**
//!
//! The values listed here bound the torque the power steering unit will be
//! asked for. Raising them past what the MDPS accepts faults the unit, and
//! the fault latches until the ignition is cycled.

use crate::config::{Features, SteerLimits};
use crate::limit_curve::CurveEntry;

pub const NAME: &str = "KIA NIRO EV";

pub const STEER_LIMITS: SteerLimits = SteerLimits {
    steer_max: 255.0,
    steer_delta_up: 3.0,
    steer_delta_down: 7.0,
    steer_driver_allowance: 50.0,
    steer_driver_multiplier: 2.0,
    steer_driver_factor: 1.0,
};

/// Past this wheel angle the MDPS faults on some model years. \[degrees\]
pub const MAX_STEERING_ANGLE_DEG: f32 = 90.0;

/// Ego speed axis of the tuning curve. \[km/h\]
pub static TUNING_SPEED_BP_KPH: [f32; 2] = [30.0, 60.0];

/// Tuning curve rows, indexed by model speed.
pub static TUNING_ENTRIES: [CurveEntry<'static>; 2] = [
    CurveEntry {
        model_speed_bp: &[80.0, 255.0],
        steer_max_v: &[255.0, 230.0],
        steer_delta_up_v: &[3.0, 3.0],
        steer_delta_down_v: &[7.0, 5.0],
    },
    CurveEntry {
        model_speed_bp: &[80.0, 255.0],
        steer_max_v: &[255.0, 200.0],
        steer_delta_up_v: &[3.0, 2.0],
        steer_delta_down_v: &[7.0, 5.0],
    },
];

pub const FEATURES: Features = Features { lfa_mfa: true };

pub const LONGITUDINAL_CONTROL: bool = true;
