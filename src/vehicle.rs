//! Vehicle abstraction
//!
//! Each supported vehicle has a calibration module under `vehicles/`; this
//! turns one into a validated [`VehicleConfig`].

use crate::config::VehicleConfig;
use crate::error::ConfigError;
use crate::limit_curve::TuningCurve;
use crate::vehicles::{genesis_g70, hyundai_sonata, kia_niro_ev};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Vehicle {
    KiaNiroEv,
    HyundaiSonata,
    GenesisG70,
}

macro_rules! vehicle_config {
    ($module:ident) => {
        Ok(VehicleConfig {
            name: $module::NAME,
            limits: $module::STEER_LIMITS,
            max_steering_angle_deg: $module::MAX_STEERING_ANGLE_DEG,
            tuning: TuningCurve::new(&$module::TUNING_SPEED_BP_KPH, &$module::TUNING_ENTRIES)?,
            features: $module::FEATURES,
            longitudinal_control: $module::LONGITUDINAL_CONTROL,
        })
    };
}

impl Vehicle {
    pub const ALL: [Vehicle; 3] = [
        Vehicle::KiaNiroEv,
        Vehicle::HyundaiSonata,
        Vehicle::GenesisG70,
    ];

    pub fn config(self) -> Result<VehicleConfig<'static>, ConfigError> {
        match self {
            Vehicle::KiaNiroEv => vehicle_config!(kia_niro_ev),
            Vehicle::HyundaiSonata => vehicle_config!(hyundai_sonata),
            Vehicle::GenesisG70 => vehicle_config!(genesis_g70),
        }
    }
}
