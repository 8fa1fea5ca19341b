use crate::types::CruiseButton;

pub const CLU11_CAN_ID: u16 = 0x4F1;

pub const CLU11_CAN_DLC: u8 = 4;

/// Emulated cluster cruise switch press.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Clu11Button {
    pub alive_count: u8,
    pub button: CruiseButton,
}

impl Clu11Button {
    /// Alive counter is four bits wide on the bus.
    pub fn new<C: Into<u64>>(count: C, button: CruiseButton) -> Self {
        Clu11Button {
            alive_count: (count.into() % 0x10) as u8,
            button,
        }
    }
}
