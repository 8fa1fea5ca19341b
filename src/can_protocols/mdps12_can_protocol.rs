pub const MDPS12_CAN_ID: u16 = 0x381;

pub const MDPS12_CAN_DLC: u8 = 8;

/// Power steering heartbeat, echoed while torque is being requested.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Mdps12Heartbeat {
    pub msg_count: u8,
}

impl Mdps12Heartbeat {
    pub fn for_frame(frame: u64) -> Self {
        Mdps12Heartbeat {
            msg_count: (frame % 0x100) as u8,
        }
    }
}
