pub const LFAHDA_MFC_CAN_ID: u16 = 0x485;

pub const LFAHDA_MFC_CAN_DLC: u8 = 4;

/// LFA/HDA cluster icon state.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LfahdaMfc {
    pub enabled: bool,
}
