//! Lane keeping and cruise button control for Hyundai/Kia/Genesis vehicles
//!
//! The crate is `no_std`. It turns upstream lateral and longitudinal requests
//! into outbound frame descriptors once per 10 ms control tick; encoding and
//! transmission are left to a [`FramePublisher`].

#![cfg_attr(not(test), no_std)]

extern crate heapless;
extern crate log;
extern crate num;
extern crate typenum;

pub mod can_protocols;
pub mod config;
pub mod controller;
pub mod error;
pub mod frame_sequencer;
pub mod interp;
pub mod limit_curve;
pub mod longitudinal;
pub mod ms_timer;
pub mod ranges;
pub mod torque_authority;
pub mod torque_limits;
pub mod types;
pub mod vehicle;
pub mod vehicles;

pub use crate::can_protocols::{publish_frames, FrameList, FramePublisher, OutboundFrame};
pub use crate::config::{Features, SteerLimits, VehicleConfig};
pub use crate::controller::LkasController;
pub use crate::error::ConfigError;
pub use crate::longitudinal::{ButtonMapper, SetSpeedStepper};
pub use crate::types::*;
pub use crate::vehicle::Vehicle;
