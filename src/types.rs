//! Per-tick inputs handed to the controller by the host.

use num::Float;

use crate::config::{LEAD_DISTANCE_MAX, MS_TO_KPH};

/// Cluster cruise switch positions, as carried by CLU11.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CruiseButton {
    None,
    ResAccel,
    SetDecel,
    GapDist,
    Cancel,
}

impl CruiseButton {
    pub fn raw(self) -> u8 {
        match self {
            CruiseButton::None => 0,
            CruiseButton::ResAccel => 1,
            CruiseButton::SetDecel => 2,
            CruiseButton::GapDist => 3,
            CruiseButton::Cancel => 4,
        }
    }
}

impl Default for CruiseButton {
    fn default() -> Self {
        CruiseButton::None
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LaneChangeState {
    Off,
    PreLaneChange,
    LaneChangeStarting,
    LaneChangeFinishing,
}

impl LaneChangeState {
    pub fn is_active(self) -> bool {
        self != LaneChangeState::Off
    }
}

impl Default for LaneChangeState {
    fn default() -> Self {
        LaneChangeState::Off
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum VisualAlert {
    None,
    SteerRequired,
    LaneDeparture,
}

impl Default for VisualAlert {
    fn default() -> Self {
        VisualAlert::None
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct CruiseState {
    pub enabled: bool,
    pub standstill: bool,
    /// Driver set speed. \[m/s\]
    pub speed: f32,
    /// Cruise switch currently held by the driver.
    pub button: CruiseButton,
    /// SCC is actively controlling speed.
    pub acc_active: bool,
    /// Cruise mode selector.
    pub mode_sel: u8,
}

/// Vehicle sensor snapshot.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct CarState {
    /// \[m/s\]
    pub v_ego: f32,
    /// \[degrees\]
    pub steering_angle_deg: f32,
    /// Driver applied steering torque, in MDPS units.
    pub steering_torque: f32,
    pub left_blinker: bool,
    pub right_blinker: bool,
    pub cruise: CruiseState,
    /// Lead distance reported by the SCC radar.
    pub lead_distance: f32,
    /// Last rolling counter seen on the stock steering command frame.
    pub lkas11_msg_count: u8,
}

impl CarState {
    pub fn v_ego_kph(&self) -> f32 {
        self.v_ego * MS_TO_KPH
    }

    pub fn cruise_set_speed_kph(&self) -> f32 {
        self.cruise.speed * MS_TO_KPH
    }

    pub fn blinker_on(&self) -> bool {
        self.left_blinker || self.right_blinker
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Actuators {
    /// Normalized steering request in \[-1, 1\].
    pub steer: f32,
    /// Requested wheel angle, for angle based encoders. \[degrees\]
    pub steering_angle_deg: Option<f32>,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct HudControl {
    pub visual_alert: VisualAlert,
    pub left_lane_visible: bool,
    pub right_lane_visible: bool,
}

/// What the upstream controls layer asks of this tick.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct CarControl {
    pub enabled: bool,
    pub actuators: Actuators,
    /// Cancel cruise through an emulated button press.
    pub cancel: bool,
    pub hud: HudControl,
}

/// One tracked radar object ahead of the vehicle.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct LeadObject {
    /// Longitudinal distance. \[m\]
    pub d_rel: f32,
    /// Lateral offset. \[m\]
    pub y_rel: f32,
    /// Relative speed, positive when opening. \[m/s\]
    pub v_rel: f32,
    pub status: bool,
}

impl LeadObject {
    pub fn is_valid(&self) -> bool {
        self.status && self.d_rel > 0.0 && self.d_rel < LEAD_DISTANCE_MAX
    }

    /// Relative speed rounded to whole km/h, zero without a valid lead.
    pub fn relative_speed_kph(&self) -> f32 {
        if self.is_valid() {
            (self.v_rel * MS_TO_KPH).round()
        } else {
            0.0
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct RadarState {
    pub lead_one: LeadObject,
    pub lead_two: LeadObject,
}

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct LongitudinalPlan {
    /// Planner cruise target. \[m/s\]
    pub v_cruise: f32,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct LateralPlan {
    pub lane_change_state: LaneChangeState,
}

/// Planner and perception outputs consumed this tick.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct PlanInputs {
    pub longitudinal: LongitudinalPlan,
    pub lateral: LateralPlan,
    pub radar: RadarState,
    /// Model derived speed proxy used to index the tuning curve.
    pub model_speed: f32,
}
