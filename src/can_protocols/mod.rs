//! Outbound frame descriptors
//!
//! The controller decides which frames go out each tick and with which
//! fields. Turning a descriptor into bytes is left to a [`FramePublisher`].

mod clu11_can_protocol;
mod lfahda_mfc_can_protocol;
mod lkas11_can_protocol;
mod mdps12_can_protocol;

pub use self::clu11_can_protocol::*;
pub use self::lfahda_mfc_can_protocol::*;
pub use self::lkas11_can_protocol::*;
pub use self::mdps12_can_protocol::*;

use heapless::Vec;

/// Most frames a single tick can emit: steering command, heartbeat, one
/// button frame and the auxiliary display.
pub const MAX_FRAMES_PER_TICK: usize = 4;

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum OutboundFrame {
    Lkas11(Lkas11Command),
    Mdps12(Mdps12Heartbeat),
    Clu11(Clu11Button),
    LfahdaMfc(LfahdaMfc),
}

impl OutboundFrame {
    pub fn can_id(&self) -> u16 {
        match self {
            OutboundFrame::Lkas11(_) => LKAS11_CAN_ID,
            OutboundFrame::Mdps12(_) => MDPS12_CAN_ID,
            OutboundFrame::Clu11(_) => CLU11_CAN_ID,
            OutboundFrame::LfahdaMfc(_) => LFAHDA_MFC_CAN_ID,
        }
    }

    pub fn dlc(&self) -> u8 {
        match self {
            OutboundFrame::Lkas11(_) => LKAS11_CAN_DLC,
            OutboundFrame::Mdps12(_) => MDPS12_CAN_DLC,
            OutboundFrame::Clu11(_) => CLU11_CAN_DLC,
            OutboundFrame::LfahdaMfc(_) => LFAHDA_MFC_CAN_DLC,
        }
    }
}

/// Ordered frames for one tick.
pub type FrameList = Vec<OutboundFrame, MAX_FRAMES_PER_TICK>;

/// Encodes and transmits outbound frames.
pub trait FramePublisher {
    type Error;

    fn publish_frame(&mut self, frame: &OutboundFrame) -> Result<(), Self::Error>;
}

/// Publish frames in order, stopping at the first failure.
pub fn publish_frames<P: FramePublisher>(
    frames: &[OutboundFrame],
    publisher: &mut P,
) -> Result<(), P::Error> {
    for frame in frames {
        publisher.publish_frame(frame)?;
    }
    Ok(())
}
