//! Controller-wide constants and the per-vehicle configuration record.

use crate::limit_curve::TuningCurve;

/// Control period. \[seconds\]
pub const DT_CTRL: f32 = 0.01;

/// Control period. \[milliseconds\]
pub const DT_CTRL_MS: u32 = 10;

/// Meters per second to kilometers per hour.
pub const MS_TO_KPH: f32 = 3.6;

// ****************************************************************************
// TORQUE AUTHORITY
// ****************************************************************************

/// Time after construction during which authority is pinned to full and the
/// tuning curve is not applied. \[milliseconds\]
pub const ENABLE_WARMUP_MS: u32 = 50;

/// Ticks of override hold after a steering-limit or driver-torque override.
pub const OVERRIDE_HOLD_TICKS: u32 = 50;

/// Absolute driver torque that counts as the driver taking the wheel.
pub const DRIVER_TORQUE_OVERRIDE_THRESHOLD: f32 = 280.0;

/// Driver torque is ignored below this ego speed. \[km/h\]
pub const DRIVER_OVERRIDE_MIN_SPEED_KPH: f32 = 5.0;

/// Window after a steering-limit override during which the intermediate
/// decay pair applies. \[milliseconds\]
pub const STEER_LIMIT_COOLDOWN_MS: u32 = 5000;

// ****************************************************************************
// HUD
// ****************************************************************************

/// Ticks a lane indicator stays lit after the lane was last visible.
pub const LANE_INDICATOR_HOLD_TICKS: u8 = 100;

/// Authority ratio above which the HUD shows the system as actively steering.
pub const HUD_ACTIVE_AUTHORITY_RATIO: f32 = 0.7;

/// Auxiliary display message period. \[ticks\]
pub const LFA_MFC_PERIOD_TICKS: u64 = 5;

// ****************************************************************************
// STANDSTILL RESUME
// ****************************************************************************

/// Resume frames sent per burst.
pub const RESUME_BURST_FRAMES: u8 = 6;

/// After a burst completes, resume frames wait until more than this many
/// ticks have passed, leaving this many silent ticks.
pub const RESUME_BURST_GAP_TICKS: u64 = 5;

// ****************************************************************************
// LONGITUDINAL
// ****************************************************************************

/// Below this ego speed the arbitrator always biases toward acceleration. \[km/h\]
pub const LONG_LOW_SPEED_KPH: f32 = 30.0;

/// Lead distances outside `(0, LEAD_DISTANCE_MAX)` mean no lead. \[m\]
pub const LEAD_DISTANCE_MAX: f32 = 150.0;

/// Deceleration bias only applies to leads closer than this. \[m\]
pub const LEAD_DECEL_DISTANCE: f32 = 140.0;

/// Leads with a larger lateral offset are treated as absent. \[m\]
pub const LEAD_LATERAL_OFFSET_MAX: f32 = 2.0;

/// Set speed and ego speed within this band arm deceleration. \[km/h\]
pub const SET_SPEED_TRACKING_BAND_KPH: f32 = 5.0;

/// Deceleration bias needs the lead closing faster than this. \[km/h\]
pub const LEAD_CLOSING_SPEED_KPH: f32 = -1.0;

pub const ACCEL_BIAS_BP: [f32; 4] = [-5.0, 0.0, 5.0, 10.0];
pub const ACCEL_BIAS_V: [f32; 4] = [1.0, 10.0, 15.0, 20.0];

pub const DECEL_BIAS_BP: [f32; 3] = [-20.0, -10.0, -1.0];
pub const DECEL_BIAS_V: [f32; 3] = [15.0, 10.0, 1.0];

/// Cruise mode selector value for the speed-control mode.
pub const SPEED_CONTROL_MODE: u8 = 4;

/// Lowest set speed the button mapper will request. \[km/h\]
pub const MIN_SET_SPEED_KPH: f32 = 30.0;

/// Minimum ticks between emulated set-speed button presses.
pub const BUTTON_PRESS_INTERVAL_TICKS: u64 = 10;

/// Static steering torque limits of a vehicle's power steering unit.
///
/// A tightened copy is derived every tick; it never exceeds these values.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SteerLimits {
    pub steer_max: f32,
    pub steer_delta_up: f32,
    pub steer_delta_down: f32,
    pub steer_driver_allowance: f32,
    pub steer_driver_multiplier: f32,
    pub steer_driver_factor: f32,
}

impl SteerLimits {
    /// Copy with max/up/down lowered to the given values where smaller.
    pub fn tightened(&self, max: f32, up: f32, down: f32) -> SteerLimits {
        SteerLimits {
            steer_max: self.steer_max.min(max),
            steer_delta_up: self.steer_delta_up.min(up),
            steer_delta_down: self.steer_delta_down.min(down),
            ..*self
        }
    }
}

/// Optional vehicle equipment.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Features {
    /// Has the LFA/HDA multi-function cluster display.
    pub lfa_mfa: bool,
}

/// Everything the controller needs to know about one vehicle, fixed at
/// construction.
#[derive(Copy, Clone, Debug)]
pub struct VehicleConfig<'a> {
    pub name: &'static str,
    pub limits: SteerLimits,
    /// Steering wheel angle at which authority starts yielding. \[degrees\]
    pub max_steering_angle_deg: f32,
    pub tuning: TuningCurve<'a>,
    pub features: Features,
    /// Longitudinal control through emulated cruise buttons is available.
    pub longitudinal_control: bool,
}
