//! Cruise speed arbitration through emulated cluster buttons
//!
//! The arbitrator biases the planner's cruise target up or down depending on
//! what the lead vehicle is doing, caps it at the driver's own set speed and
//! hands the result to a [`ButtonMapper`] that decides which button to press.

use log::{debug, trace};
use num::Float;

use crate::config::*;
use crate::interp::interp;
use crate::types::{CarState, CruiseButton, LeadObject};

/// Lead tracking mode. Never both set.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct LongitudinalFlags {
    pub decelerate: bool,
    pub accelerate: bool,
}

impl LongitudinalFlags {
    /// Update the flags from this tick's lead and ego data. The first rule
    /// that applies decides.
    pub fn update(&mut self, v_ego_kph: f32, set_speed_kph: f32, lead: &LeadObject) {
        if v_ego_kph < LONG_LOW_SPEED_KPH {
            self.decelerate = false;
            self.accelerate = true;
        } else if !lead.is_valid() {
            self.decelerate = false;
        } else if lead.y_rel > LEAD_LATERAL_OFFSET_MAX {
            self.decelerate = false;
        } else if (set_speed_kph - v_ego_kph).abs() <= SET_SPEED_TRACKING_BAND_KPH {
            self.decelerate = true;
            self.accelerate = false;
        }
    }
}

/// Turns a target speed into cluster button presses.
pub trait ButtonMapper {
    /// Forget any press history, e.g. when the controller starts.
    fn reset(&mut self, cs: &CarState);

    /// Whether the mapper will accept a command this tick.
    fn ready(&mut self, cs: &CarState, frame: u64) -> bool;

    /// Button to press to move the set speed toward `target_kph`.
    fn map(&mut self, cs: &CarState, target_kph: f32, frame: u64) -> Option<CruiseButton>;
}

/// Steps the cruise set speed one press at a time toward the target.
#[derive(Copy, Clone, Debug, Default)]
pub struct SetSpeedStepper {
    last_press_frame: Option<u64>,
}

impl SetSpeedStepper {
    pub const fn new() -> Self {
        SetSpeedStepper {
            last_press_frame: None,
        }
    }
}

impl ButtonMapper for SetSpeedStepper {
    fn reset(&mut self, _cs: &CarState) {
        self.last_press_frame = None;
    }

    fn ready(&mut self, _cs: &CarState, frame: u64) -> bool {
        match self.last_press_frame {
            Some(last) => frame.saturating_sub(last) >= BUTTON_PRESS_INTERVAL_TICKS,
            None => true,
        }
    }

    fn map(&mut self, cs: &CarState, target_kph: f32, frame: u64) -> Option<CruiseButton> {
        let set_point = target_kph.max(MIN_SET_SPEED_KPH).round();
        let current = cs.cruise_set_speed_kph().round();

        let button = if set_point > current {
            CruiseButton::ResAccel
        } else if set_point < current {
            CruiseButton::SetDecel
        } else {
            return None;
        };

        self.last_press_frame = Some(frame);
        Some(button)
    }
}

pub struct LongitudinalArbitrator<M: ButtonMapper> {
    flags: LongitudinalFlags,
    mapper: M,
    ctrl_speed_kph: Option<f32>,
}

impl<M: ButtonMapper> LongitudinalArbitrator<M> {
    pub fn new(mapper: M) -> Self {
        LongitudinalArbitrator {
            flags: LongitudinalFlags::default(),
            mapper,
            ctrl_speed_kph: None,
        }
    }

    pub fn flags(&self) -> LongitudinalFlags {
        self.flags
    }

    /// Last speed handed to the button mapper.
    pub fn ctrl_speed_kph(&self) -> Option<f32> {
        self.ctrl_speed_kph
    }

    pub fn mapper(&self) -> &M {
        &self.mapper
    }

    pub fn reset(&mut self, cs: &CarState) {
        self.mapper.reset(cs);
    }

    /// Biased target speed for this tick, before capping at the set speed.
    pub fn biased_target_kph(&self, lead_one: &LeadObject, plan_target_kph: f32) -> f32 {
        let v_rel_kph = lead_one.relative_speed_kph();
        let d_rel = if lead_one.d_rel <= 0.0 || lead_one.d_rel >= LEAD_DISTANCE_MAX {
            LEAD_DISTANCE_MAX
        } else {
            lead_one.d_rel
        };

        let mut target = plan_target_kph;
        if self.flags.accelerate {
            target += interp(v_rel_kph, &ACCEL_BIAS_BP, &ACCEL_BIAS_V);
        } else if d_rel < LEAD_DECEL_DISTANCE
            && self.flags.decelerate
            && v_rel_kph < LEAD_CLOSING_SPEED_KPH
        {
            target -= interp(v_rel_kph, &DECEL_BIAS_BP, &DECEL_BIAS_V);
        }
        target
    }

    /// Run one tick, returning the button to emulate if any.
    pub fn step(
        &mut self,
        cs: &CarState,
        lead_one: &LeadObject,
        lead_two: &LeadObject,
        plan_target_kph: f32,
        frame: u64,
    ) -> Option<CruiseButton> {
        let v_ego_kph = cs.v_ego_kph();
        let set_speed_kph = cs.cruise_set_speed_kph();

        let before = self.flags;
        self.flags.update(v_ego_kph, set_speed_kph, lead_one);
        if self.flags != before {
            debug!(
                "long flags acc={} dec={} (lead d={:.1} v={:.1})",
                self.flags.accelerate, self.flags.decelerate, lead_one.d_rel, lead_one.v_rel
            );
        }

        let target = self.biased_target_kph(lead_one, plan_target_kph);
        trace!(
            "long target={:.1} set={:.1} lead2 d={:.1}",
            target,
            set_speed_kph,
            lead_two.d_rel
        );

        if !self.mapper.ready(cs, frame) {
            return None;
        }

        if cs.cruise.acc_active && cs.cruise.mode_sel == SPEED_CONTROL_MODE {
            let ctrl_speed = set_speed_kph.min(target);
            self.ctrl_speed_kph = Some(ctrl_speed);
            self.mapper.map(cs, ctrl_speed, frame)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CruiseState;

    fn lead(d_rel: f32, v_rel_kph: f32) -> LeadObject {
        LeadObject {
            d_rel,
            y_rel: 0.0,
            v_rel: v_rel_kph / MS_TO_KPH,
            status: true,
        }
    }

    fn car(v_kph: f32, set_kph: f32) -> CarState {
        CarState {
            v_ego: v_kph / MS_TO_KPH,
            cruise: CruiseState {
                enabled: true,
                acc_active: true,
                mode_sel: SPEED_CONTROL_MODE,
                speed: set_kph / MS_TO_KPH,
                ..CruiseState::default()
            },
            ..CarState::default()
        }
    }

    #[test]
    fn low_speed_biases_upward() {
        let mut arb = LongitudinalArbitrator::new(SetSpeedStepper::new());
        let cs = car(20.0, 60.0);
        let l = lead(80.0, 0.0);

        arb.step(&cs, &l, &LeadObject::default(), 40.0, 0);
        assert_eq!(
            arb.flags(),
            LongitudinalFlags {
                accelerate: true,
                decelerate: false
            }
        );
        assert!((arb.biased_target_kph(&l, 40.0) - 50.0).abs() < 1e-3);
    }

    #[test]
    fn closing_lead_biases_downward() {
        let mut arb = LongitudinalArbitrator::new(SetSpeedStepper::new());
        let cs = car(80.0, 82.0);
        let l = lead(60.0, -10.0);

        arb.step(&cs, &l, &LeadObject::default(), 80.0, 0);
        assert!(arb.flags().decelerate);
        assert!(!arb.flags().accelerate);
        assert!((arb.biased_target_kph(&l, 80.0) - 70.0).abs() < 1e-3);
    }

    #[test]
    fn lead_out_of_lane_clears_decelerate() {
        let mut flags = LongitudinalFlags {
            decelerate: true,
            accelerate: false,
        };
        let mut l = lead(60.0, -10.0);
        l.y_rel = 3.0;
        flags.update(80.0, 80.0, &l);
        assert!(!flags.decelerate);

        flags.decelerate = true;
        flags.update(80.0, 80.0, &lead(0.0, 0.0));
        assert!(!flags.decelerate);
    }

    #[test]
    fn untracked_lead_never_arms_decelerate() {
        let mut flags = LongitudinalFlags::default();
        let mut l = lead(60.0, -10.0);
        l.status = false;

        flags.update(80.0, 80.0, &l);
        assert!(!flags.decelerate);

        l.status = true;
        flags.update(80.0, 80.0, &l);
        assert!(flags.decelerate);
    }

    #[test]
    fn acceleration_persists_until_tracking_set_speed() {
        let mut flags = LongitudinalFlags::default();
        flags.update(20.0, 80.0, &lead(60.0, 0.0));
        assert!(flags.accelerate);

        // faster, but far from the set speed: nothing changes
        flags.update(50.0, 80.0, &lead(60.0, 0.0));
        assert!(flags.accelerate);

        flags.update(78.0, 80.0, &lead(60.0, 0.0));
        assert!(flags.decelerate);
        assert!(!flags.accelerate);
    }

    #[test]
    fn command_capped_at_set_speed() {
        let mut arb = LongitudinalArbitrator::new(SetSpeedStepper::new());
        let cs = car(20.0, 60.0);

        let button = arb.step(&cs, &lead(80.0, 10.0), &LeadObject::default(), 70.0, 0);
        let ctrl = arb.ctrl_speed_kph().unwrap();
        assert!((ctrl - 60.0).abs() < 1e-3);
        assert_eq!(button, None);
    }

    #[test]
    fn stepper_presses_toward_target_and_waits() {
        let mut arb = LongitudinalArbitrator::new(SetSpeedStepper::new());
        let cs = car(80.0, 82.0);
        let l = lead(60.0, -10.0);

        assert_eq!(
            arb.step(&cs, &l, &LeadObject::default(), 80.0, 100),
            Some(CruiseButton::SetDecel)
        );
        assert_eq!(arb.step(&cs, &l, &LeadObject::default(), 80.0, 105), None);
        assert_eq!(
            arb.step(&cs, &l, &LeadObject::default(), 80.0, 110),
            Some(CruiseButton::SetDecel)
        );
    }

    #[test]
    fn no_command_outside_speed_mode() {
        let mut arb = LongitudinalArbitrator::new(SetSpeedStepper::new());
        let mut cs = car(80.0, 82.0);
        cs.cruise.mode_sel = 1;
        assert_eq!(
            arb.step(&cs, &lead(60.0, -10.0), &LeadObject::default(), 80.0, 0),
            None
        );
        assert_eq!(arb.ctrl_speed_kph(), None);
    }
}
