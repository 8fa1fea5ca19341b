//! Per-tick outbound frame sequencing
//!
//! Frame order within a tick is fixed: steering command, heartbeat, one
//! button frame, auxiliary display.

use log::{debug, info, warn};

use crate::can_protocols::*;
use crate::config::*;
use crate::ranges::{LaneTimer, MsgCounter};
use crate::types::{CarState, CruiseButton, HudControl, VisualAlert};

#[derive(Copy, Clone, Debug)]
pub struct SequencerState {
    pub lkas11_cnt: MsgCounter,
    /// Set once the counter has been seeded from the bus.
    pub seeded: bool,
    pub resume_cnt: u8,
    pub last_resume_frame: Option<u64>,
    pub last_lead_distance: Option<f32>,
    pub hud_timer_left: LaneTimer,
    pub hud_timer_right: LaneTimer,
}

impl SequencerState {
    pub fn new() -> Self {
        SequencerState {
            lkas11_cnt: MsgCounter::lower(),
            seeded: false,
            resume_cnt: 0,
            last_resume_frame: None,
            last_lead_distance: None,
            hud_timer_left: LaneTimer::lower(),
            hud_timer_right: LaneTimer::lower(),
        }
    }
}

impl Default for SequencerState {
    fn default() -> Self {
        Self::new()
    }
}

/// Facts from the rest of the tick the sequencer needs.
#[derive(Copy, Clone, Debug)]
pub struct TickFacts<'c> {
    pub frame: u64,
    pub car_state: &'c CarState,
    pub hud: &'c HudControl,
    pub enabled: bool,
    pub cancel: bool,
    pub apply_steer: i32,
    pub steer_req: bool,
    pub authority_ratio: f32,
    pub longitudinal_control: bool,
    pub lfa_mfa: bool,
}

pub struct FrameSequencer {
    state: SequencerState,
}

impl FrameSequencer {
    pub fn new() -> Self {
        FrameSequencer {
            state: SequencerState::new(),
        }
    }

    pub fn state(&self) -> &SequencerState {
        &self.state
    }

    /// Assemble this tick's frames. `longitudinal` runs only when the tail
    /// of the sequence reaches longitudinal control.
    pub fn emit<F>(&mut self, facts: &TickFacts, longitudinal: F) -> FrameList
    where
        F: FnOnce() -> Option<CruiseButton>,
    {
        let mut frames = FrameList::new();
        let cs = facts.car_state;

        let (sys_warning, sys_state) = self.process_hud_alert(facts);

        if !self.state.seeded {
            self.state.lkas11_cnt = MsgCounter::clamp(cs.lkas11_msg_count & 0x0F).wrapping_next();
            self.state.seeded = true;
            info!(
                "LKAS11 counter seeded at {} from bus",
                self.state.lkas11_cnt.val()
            );
        }

        push(
            &mut frames,
            OutboundFrame::Lkas11(Lkas11Command {
                msg_count: self.state.lkas11_cnt,
                apply_steer: facts.apply_steer,
                steer_req: facts.steer_req,
                sys_warning,
                sys_state,
            }),
        );

        if facts.steer_req {
            push(
                &mut frames,
                OutboundFrame::Mdps12(Mdps12Heartbeat::for_frame(facts.frame)),
            );
        }

        if facts.cancel {
            push(
                &mut frames,
                OutboundFrame::Clu11(Clu11Button::new(facts.frame, CruiseButton::Cancel)),
            );
        } else if cs.cruise.standstill {
            self.standstill_resume(facts, &mut frames);
        } else if self.state.last_lead_distance.is_some() {
            // moving again
            self.state.last_lead_distance = None;
        } else if facts.longitudinal_control {
            match longitudinal() {
                Some(button) => {
                    push(
                        &mut frames,
                        OutboundFrame::Clu11(Clu11Button::new(self.state.resume_cnt, button)),
                    );
                    self.state.resume_cnt = self.state.resume_cnt.wrapping_add(1);
                }
                None => self.state.resume_cnt = 0,
            }
        }

        if facts.frame % LFA_MFC_PERIOD_TICKS == 0 && facts.lfa_mfa {
            push(
                &mut frames,
                OutboundFrame::LfahdaMfc(LfahdaMfc {
                    enabled: facts.enabled,
                }),
            );
        }

        self.state.lkas11_cnt = self.state.lkas11_cnt.wrapping_next();
        frames
    }

    fn process_hud_alert(&mut self, facts: &TickFacts) -> (bool, HudSysState) {
        let hud = facts.hud;
        let sys_warning = hud.visual_alert == VisualAlert::SteerRequired;

        self.state.hud_timer_left = lane_timer_tick(self.state.hud_timer_left, hud.left_lane_visible);
        self.state.hud_timer_right =
            lane_timer_tick(self.state.hud_timer_right, hud.right_lane_visible);

        let left = !self.state.hud_timer_left.is_lower();
        let right = !self.state.hud_timer_right.is_lower();

        let sys_state = if (left && right) || sys_warning {
            if facts.authority_ratio > HUD_ACTIVE_AUTHORITY_RATIO && (facts.enabled || sys_warning) {
                HudSysState::Active
            } else {
                HudSysState::Inactive
            }
        } else if left {
            HudSysState::LeftLane
        } else if right {
            HudSysState::RightLane
        } else {
            HudSysState::NoLanes
        };

        (sys_warning, sys_state)
    }

    fn standstill_resume(&mut self, facts: &TickFacts, frames: &mut FrameList) {
        let lead_distance = facts.car_state.lead_distance;

        let last = match self.state.last_lead_distance {
            None => {
                // first standstill tick
                self.state.last_lead_distance = Some(lead_distance);
                self.state.resume_cnt = 0;
                return;
            }
            Some(last) => last,
        };

        let gap_elapsed = match self.state.last_resume_frame {
            Some(burst_end) => facts.frame.saturating_sub(burst_end) > RESUME_BURST_GAP_TICKS,
            None => true,
        };

        // a non-finite SCC distance never counts as the lead moving off
        let lead_moved = lead_distance.is_finite() && lead_distance != last;

        if lead_moved && gap_elapsed {
            push(
                frames,
                OutboundFrame::Clu11(Clu11Button::new(
                    self.state.resume_cnt,
                    CruiseButton::ResAccel,
                )),
            );
            self.state.resume_cnt += 1;

            if self.state.resume_cnt >= RESUME_BURST_FRAMES {
                debug!("resume burst complete at frame {}", facts.frame);
                self.state.last_resume_frame = Some(facts.frame);
                self.state.resume_cnt = 0;
            }
        }
    }
}

impl Default for FrameSequencer {
    fn default() -> Self {
        Self::new()
    }
}

fn lane_timer_tick(timer: LaneTimer, visible: bool) -> LaneTimer {
    if visible {
        LaneTimer::clamp(LANE_INDICATOR_HOLD_TICKS)
    } else {
        timer.saturating_prev()
    }
}

fn push(frames: &mut FrameList, frame: OutboundFrame) {
    if frames.push(frame).is_err() {
        warn!("frame list full, dropped 0x{:03X}", frame.can_id());
    }
}
