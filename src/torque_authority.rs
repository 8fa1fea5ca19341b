//! Steering torque authority arbitration
//!
//! The authority ratio is the share of the (curve tightened) maximum torque
//! the system may command. It drains toward zero while an override is held and
//! refills toward one otherwise, at rates picked from a small decision table.

use log::{debug, trace};
use num::Float;

use crate::config::*;
use crate::limit_curve::LimitCurveEvaluator;
use crate::ms_timer::CooldownWindow;
use crate::torque_limits::{apply_std_steer_torque_limits, clip};
use crate::types::{Actuators, CarState, CruiseButton, LaneChangeState};

/// Seconds to drain authority from one to zero, and to refill it.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DecayPair {
    pub to_zero_s: f32,
    pub to_one_s: f32,
}

impl DecayPair {
    pub fn drain_step(&self) -> f32 {
        DT_CTRL / self.to_zero_s
    }

    pub fn refill_step(&self) -> f32 {
        DT_CTRL / self.to_one_s
    }
}

/// Row of the decay decision table.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AuthorityContext {
    /// Wheel angle at or past the vehicle's limit this tick.
    SteeringAngleLimit,
    /// Inside the cooldown after a steering angle limit event.
    LimitCooldown,
    Nominal,
    /// Blinker on outside of a lane change.
    TurnSignal,
}

impl AuthorityContext {
    /// Later rows override earlier ones: the base context comes from the
    /// angle limit and cooldown, a blinker replaces it unless a lane change
    /// is in progress.
    pub fn select(
        angle_limited: bool,
        cooldown_open: bool,
        lane_change_active: bool,
        blinker_on: bool,
    ) -> AuthorityContext {
        let base = if angle_limited {
            AuthorityContext::SteeringAngleLimit
        } else if cooldown_open {
            AuthorityContext::LimitCooldown
        } else {
            AuthorityContext::Nominal
        };

        if !lane_change_active && blinker_on {
            AuthorityContext::TurnSignal
        } else {
            base
        }
    }

    pub fn decay(self) -> DecayPair {
        match self {
            AuthorityContext::SteeringAngleLimit => DecayPair {
                to_zero_s: 10.0,
                to_one_s: 10.0,
            },
            AuthorityContext::LimitCooldown => DecayPair {
                to_zero_s: 5.0,
                to_one_s: 3.0,
            },
            AuthorityContext::Nominal | AuthorityContext::TurnSignal => DecayPair {
                to_zero_s: 0.5,
                to_one_s: 10.0,
            },
        }
    }
}

#[derive(Copy, Clone, Debug)]
pub struct AuthorityState {
    pub ratio: f32,
    pub override_countdown: u32,
    /// Milliseconds since the controller started ticking.
    pub enable_time_ms: u32,
    pub cooldown: CooldownWindow,
}

impl AuthorityState {
    pub const fn new() -> Self {
        AuthorityState {
            ratio: 1.0,
            override_countdown: 0,
            enable_time_ms: 0,
            cooldown: CooldownWindow::new(),
        }
    }
}

impl Default for AuthorityState {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of one arbitration step.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SteerOutput {
    pub apply_steer: i32,
    pub steer_req: bool,
    /// Torque the request would have reached without rate limiting.
    pub desired_steer: f32,
    /// Authority-scaled torque ceiling in effect this tick.
    pub apply_steer_limit: f32,
    pub context: Option<AuthorityContext>,
}

pub struct TorqueAuthority<'a> {
    evaluator: LimitCurveEvaluator<'a>,
    max_steering_angle_deg: f32,
    state: AuthorityState,
    apply_steer_last: i32,
}

impl<'a> TorqueAuthority<'a> {
    pub fn new(evaluator: LimitCurveEvaluator<'a>, max_steering_angle_deg: f32) -> Self {
        TorqueAuthority {
            evaluator,
            max_steering_angle_deg,
            state: AuthorityState::new(),
            apply_steer_last: 0,
        }
    }

    pub fn state(&self) -> &AuthorityState {
        &self.state
    }

    pub fn ratio(&self) -> f32 {
        self.state.ratio
    }

    /// Run one tick.
    ///
    /// `now_ms` must come from the same clock that drives the tick cadence.
    pub fn step(
        &mut self,
        cs: &CarState,
        actuators: &Actuators,
        lane_change: LaneChangeState,
        model_speed: f32,
        enabled: bool,
        now_ms: u32,
    ) -> SteerOutput {
        self.state.enable_time_ms = now_ms;

        let (limits, context) = if now_ms < ENABLE_WARMUP_MS {
            self.state.override_countdown = 0;
            self.state.ratio = 1.0;
            (*self.evaluator.static_limits(), None)
        } else {
            let limits = self.evaluator.tightened_limits(cs.v_ego_kph(), model_speed);
            let context = self.update_authority(cs, lane_change, now_ms);
            (limits, Some(context))
        };

        let desired_steer = actuators.steer * limits.steer_max;
        let mut apply_steer = apply_std_steer_torque_limits(
            desired_steer,
            self.apply_steer_last as f32,
            cs.steering_torque,
            &limits,
        ) as f32;

        let mut apply_steer_limit = limits.steer_max;
        if self.state.ratio < 1.0 {
            apply_steer_limit = (self.state.ratio * limits.steer_max) as i32 as f32;
            apply_steer = clip(apply_steer, -apply_steer_limit, apply_steer_limit);
        }

        if !enabled {
            apply_steer = 0.0;
        }

        let apply_steer = apply_steer as i32;
        self.apply_steer_last = apply_steer;

        trace!(
            "torq:{:5} driver={:5.0} ratio={:.3} limit={:.0}",
            apply_steer,
            cs.steering_torque,
            self.state.ratio,
            apply_steer_limit
        );

        SteerOutput {
            apply_steer,
            steer_req: apply_steer != 0,
            desired_steer,
            apply_steer_limit,
            context,
        }
    }

    fn update_authority(
        &mut self,
        cs: &CarState,
        lane_change: LaneChangeState,
        now_ms: u32,
    ) -> AuthorityContext {
        let state = &mut self.state;

        let angle_limited = cs.steering_angle_deg.abs() >= self.max_steering_angle_deg;
        let mut fresh_override = false;
        if angle_limited {
            if state.override_countdown == 0 {
                debug!(
                    "steering angle {:.1} at limit, yielding authority",
                    cs.steering_angle_deg
                );
            }
            state.cooldown.start(now_ms, STEER_LIMIT_COOLDOWN_MS);
            state.override_countdown = OVERRIDE_HOLD_TICKS;
            fresh_override = true;
        }

        let context = AuthorityContext::select(
            angle_limited,
            state.cooldown.is_open(now_ms),
            lane_change.is_active(),
            cs.blinker_on(),
        );

        if lane_change.is_active() {
            if state.override_countdown > 0 {
                debug!("lane change in progress, override released");
            }
            state.override_countdown = 0;
            fresh_override = false;
        }

        let driver_override = cs.v_ego_kph() > DRIVER_OVERRIDE_MIN_SPEED_KPH
            && cs.steering_torque.abs() > DRIVER_TORQUE_OVERRIDE_THRESHOLD;

        if cs.cruise.button == CruiseButton::Cancel || !cs.cruise.enabled {
            state.override_countdown = 0;
        } else if driver_override {
            if state.override_countdown == 0 {
                debug!("driver torque {:.0} override", cs.steering_torque);
            }
            state.override_countdown = OVERRIDE_HOLD_TICKS;
        } else if state.override_countdown > 0 && !fresh_override {
            state.override_countdown -= 1;
        }

        let decay = context.decay();
        if state.override_countdown > 0 {
            state.ratio -= decay.drain_step();
        } else {
            state.ratio += decay.refill_step();
        }

        // NaN fails both comparisons below, treat it as no authority
        if state.ratio.is_nan() || state.ratio < 0.0 {
            state.ratio = 0.0;
        } else if state.ratio > 1.0 {
            state.ratio = 1.0;
        }

        context
    }
}
