//! Per-tick car controller
//!
//! Ties together torque authority, longitudinal arbitration and the outbound
//! frame sequencer. One call to [`LkasController::update`] per control tick.

use log::info;

use crate::can_protocols::{publish_frames, FrameList, FramePublisher};
use crate::config::{VehicleConfig, MS_TO_KPH};
use crate::frame_sequencer::{FrameSequencer, SequencerState, TickFacts};
use crate::limit_curve::LimitCurveEvaluator;
use crate::longitudinal::{ButtonMapper, LongitudinalArbitrator, LongitudinalFlags, SetSpeedStepper};
use crate::ms_timer::TickClock;
use crate::torque_authority::{AuthorityState, SteerOutput, TorqueAuthority};
use crate::types::{CarControl, CarState, PlanInputs};

pub struct LkasController<'a, M: ButtonMapper = SetSpeedStepper> {
    config: VehicleConfig<'a>,
    clock: TickClock,
    authority: TorqueAuthority<'a>,
    longitudinal: LongitudinalArbitrator<M>,
    sequencer: FrameSequencer,
    started: bool,
    last_output: Option<SteerOutput>,
}

impl<'a> LkasController<'a, SetSpeedStepper> {
    pub fn with_defaults(config: VehicleConfig<'a>) -> Self {
        Self::new(config, SetSpeedStepper::new())
    }
}

impl<'a, M: ButtonMapper> LkasController<'a, M> {
    pub fn new(config: VehicleConfig<'a>, mapper: M) -> Self {
        let evaluator = LimitCurveEvaluator::new(config.tuning, config.limits);
        LkasController {
            config,
            clock: TickClock::new(),
            authority: TorqueAuthority::new(evaluator, config.max_steering_angle_deg),
            longitudinal: LongitudinalArbitrator::new(mapper),
            sequencer: FrameSequencer::new(),
            started: false,
            last_output: None,
        }
    }

    pub fn config(&self) -> &VehicleConfig<'a> {
        &self.config
    }

    pub fn authority_state(&self) -> &AuthorityState {
        self.authority.state()
    }

    pub fn longitudinal_flags(&self) -> LongitudinalFlags {
        self.longitudinal.flags()
    }

    pub fn longitudinal(&self) -> &LongitudinalArbitrator<M> {
        &self.longitudinal
    }

    pub fn sequencer_state(&self) -> &SequencerState {
        self.sequencer.state()
    }

    /// Steering result of the most recent tick.
    pub fn last_output(&self) -> Option<&SteerOutput> {
        self.last_output.as_ref()
    }

    /// Run one control tick and return the frames to send, in order.
    pub fn update(
        &mut self,
        c: &CarControl,
        cs: &CarState,
        plan: &PlanInputs,
        frame: u64,
    ) -> FrameList {
        let now_ms = self.clock.sample(frame);

        if !self.started {
            info!("{} controller started at frame {}", self.config.name, frame);
            self.longitudinal.reset(cs);
            self.started = true;
        }

        let out = self.authority.step(
            cs,
            &c.actuators,
            plan.lateral.lane_change_state,
            plan.model_speed,
            c.enabled,
            now_ms,
        );
        self.last_output = Some(out);

        let facts = TickFacts {
            frame,
            car_state: cs,
            hud: &c.hud,
            enabled: c.enabled,
            cancel: c.cancel,
            apply_steer: out.apply_steer,
            steer_req: out.steer_req,
            authority_ratio: self.authority.ratio(),
            longitudinal_control: self.config.longitudinal_control,
            lfa_mfa: self.config.features.lfa_mfa,
        };

        let longitudinal = &mut self.longitudinal;
        let target_kph = plan.longitudinal.v_cruise * MS_TO_KPH;
        self.sequencer.emit(&facts, || {
            longitudinal.step(
                cs,
                &plan.radar.lead_one,
                &plan.radar.lead_two,
                target_kph,
                frame,
            )
        })
    }

    /// Run one tick and hand every frame to `publisher`.
    pub fn update_and_publish<P: FramePublisher>(
        &mut self,
        c: &CarControl,
        cs: &CarState,
        plan: &PlanInputs,
        frame: u64,
        publisher: &mut P,
    ) -> Result<(), P::Error> {
        let frames = self.update(c, cs, plan, frame);
        publish_frames(&frames, publisher)
    }
}
