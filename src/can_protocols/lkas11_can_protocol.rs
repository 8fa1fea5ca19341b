use crate::ranges::MsgCounter;

pub const LKAS11_CAN_ID: u16 = 0x340;

pub const LKAS11_CAN_DLC: u8 = 8;

/// HUD lane and system state shown by the cluster (CF_Lkas_SysState).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HudSysState {
    /// No lane lines shown.
    NoLanes,
    /// Both lanes shown, system steering.
    Active,
    /// Both lanes shown, system not steering.
    Inactive,
    LeftLane,
    RightLane,
}

impl HudSysState {
    pub fn raw(self) -> u8 {
        match self {
            HudSysState::NoLanes => 1,
            HudSysState::Active => 3,
            HudSysState::Inactive => 4,
            HudSysState::LeftLane => 5,
            HudSysState::RightLane => 6,
        }
    }
}

/// Steering torque command, sent every tick.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Lkas11Command {
    pub msg_count: MsgCounter,
    pub apply_steer: i32,
    pub steer_req: bool,
    pub sys_warning: bool,
    pub sys_state: HudSysState,
}
