use oxlkas::can_protocols::{
    Clu11Button, HudSysState, Lkas11Command, OutboundFrame, CLU11_CAN_ID, LFAHDA_MFC_CAN_ID,
    LKAS11_CAN_ID, MDPS12_CAN_ID,
};
use oxlkas::config::{MS_TO_KPH, SPEED_CONTROL_MODE};
use oxlkas::{
    Actuators, CarControl, CarState, CruiseButton, CruiseState, FrameList, FramePublisher,
    LeadObject, LkasController, PlanInputs, Vehicle,
};

fn controller(vehicle: Vehicle) -> LkasController<'static> {
    LkasController::with_defaults(vehicle.config().unwrap())
}

fn moving_car(v_kph: f32) -> CarState {
    CarState {
        v_ego: v_kph / MS_TO_KPH,
        cruise: CruiseState {
            enabled: true,
            ..CruiseState::default()
        },
        lkas11_msg_count: 3,
        ..CarState::default()
    }
}

fn steering(steer: f32) -> CarControl {
    CarControl {
        enabled: true,
        actuators: Actuators {
            steer,
            steering_angle_deg: None,
        },
        ..CarControl::default()
    }
}

fn plan() -> PlanInputs {
    let mut plan = PlanInputs::default();
    plan.model_speed = 80.0;
    plan
}

fn lkas11(frames: &FrameList) -> Lkas11Command {
    match frames[0] {
        OutboundFrame::Lkas11(cmd) => cmd,
        other => panic!("expected LKAS11 first, got {:?}", other),
    }
}

fn clu11(frames: &FrameList) -> Option<Clu11Button> {
    frames.iter().find_map(|f| match f {
        OutboundFrame::Clu11(b) => Some(*b),
        _ => None,
    })
}

fn ids(frames: &FrameList) -> Vec<u16> {
    frames.iter().map(|f| f.can_id()).collect()
}

#[test]
fn torque_ramps_at_delta_up_with_ordered_frames() {
    let mut ctl = controller(Vehicle::KiaNiroEv);
    let cs = moving_car(72.0);
    let c = steering(1.0);
    let plan = plan();

    for frame in 0..20u64 {
        let frames = ctl.update(&c, &cs, &plan, frame);
        let cmd = lkas11(&frames);

        assert_eq!(cmd.apply_steer, 3 * (frame as i32 + 1));
        assert!(cmd.steer_req);
        assert_eq!(cmd.msg_count.val(), ((4 + frame) % 16) as u8);

        if frame % 5 == 0 {
            assert_eq!(ids(&frames), [LKAS11_CAN_ID, MDPS12_CAN_ID, LFAHDA_MFC_CAN_ID]);
        } else {
            assert_eq!(ids(&frames), [LKAS11_CAN_ID, MDPS12_CAN_ID]);
        }
    }
    assert_eq!(ctl.authority_state().ratio, 1.0);
}

#[test]
fn disabled_controller_sends_zero_torque_without_heartbeat() {
    let mut ctl = controller(Vehicle::HyundaiSonata);
    let cs = moving_car(72.0);
    let mut c = steering(1.0);
    c.enabled = false;

    for frame in 1..10u64 {
        let frames = ctl.update(&c, &cs, &plan(), frame);
        let cmd = lkas11(&frames);
        assert_eq!(cmd.apply_steer, 0);
        assert!(!cmd.steer_req);
        assert!(!ids(&frames).contains(&MDPS12_CAN_ID));
    }
}

#[test]
fn driver_torque_drains_then_slowly_refills_authority() {
    let mut ctl = controller(Vehicle::KiaNiroEv);
    let mut cs = moving_car(72.0);
    let c = steering(0.5);
    let plan = plan();

    for frame in 0..10u64 {
        ctl.update(&c, &cs, &plan, frame);
    }
    assert_eq!(ctl.authority_state().ratio, 1.0);

    cs.steering_torque = 300.0;
    ctl.update(&c, &cs, &plan, 10);
    assert!((ctl.authority_state().ratio - 0.98).abs() < 1e-4);
    assert_eq!(ctl.authority_state().override_countdown, 50);
    assert_eq!(ctl.last_output().unwrap().apply_steer_limit, 249.0);

    for frame in 11..70u64 {
        ctl.update(&c, &cs, &plan, frame);
    }
    assert_eq!(ctl.authority_state().ratio, 0.0);
    let frames = ctl.update(&c, &cs, &plan, 70);
    assert_eq!(lkas11(&frames).apply_steer, 0);
    assert_eq!(ids(&frames), [LKAS11_CAN_ID, LFAHDA_MFC_CAN_ID]);

    // released: the hold keeps draining before the slow refill starts
    cs.steering_torque = 0.0;
    for frame in 71..110u64 {
        ctl.update(&c, &cs, &plan, frame);
    }
    assert_eq!(ctl.authority_state().ratio, 0.0);

    for frame in 110..140u64 {
        ctl.update(&c, &cs, &plan, frame);
    }
    let ratio = ctl.authority_state().ratio;
    assert!(ratio > 0.0 && ratio < 0.05, "ratio {}", ratio);
}

#[test]
fn steering_angle_limit_starts_cooldown() {
    let mut ctl = controller(Vehicle::KiaNiroEv);
    let mut cs = moving_car(72.0);
    let c = steering(0.2);
    let plan = plan();

    for frame in 0..10u64 {
        ctl.update(&c, &cs, &plan, frame);
    }

    cs.steering_angle_deg = -95.0;
    ctl.update(&c, &cs, &plan, 10);
    let state = *ctl.authority_state();
    assert_eq!(state.override_countdown, 50);
    assert!(state.cooldown.is_open(state.enable_time_ms));
    // slow drain at the angle limit
    assert!((state.ratio - 0.999).abs() < 1e-4);
}

#[test]
fn cancel_request_emits_cancel_button() {
    let mut ctl = controller(Vehicle::KiaNiroEv);
    let cs = moving_car(72.0);
    let mut c = steering(0.0);
    c.cancel = true;

    let frames = ctl.update(&c, &cs, &plan(), 37);
    let button = clu11(&frames).unwrap();
    assert_eq!(button.button, CruiseButton::Cancel);
    assert_eq!(button.alive_count, 5);
}

#[test]
fn standstill_resume_bursts_six_then_pauses_five_ticks() {
    let mut ctl = controller(Vehicle::KiaNiroEv);
    let mut cs = moving_car(0.0);
    cs.cruise.standstill = true;
    let mut c = steering(0.0);
    c.enabled = false;

    let mut pressed = Vec::new();
    for frame in 0..16u64 {
        cs.lead_distance = 5.0 + frame as f32;
        let frames = ctl.update(&c, &cs, &plan(), frame);
        pressed.push(clu11(&frames).map(|b| (b.button, b.alive_count)));
    }

    assert_eq!(pressed[0], None);
    for (i, p) in pressed[1..7].iter().enumerate() {
        assert_eq!(*p, Some((CruiseButton::ResAccel, i as u8)));
    }
    assert!(pressed[7..12].iter().all(|p| p.is_none()));
    assert_eq!(pressed[12], Some((CruiseButton::ResAccel, 0)));
}

#[test]
fn stationary_lead_does_not_resume() {
    let mut ctl = controller(Vehicle::KiaNiroEv);
    let mut cs = moving_car(0.0);
    cs.cruise.standstill = true;
    cs.lead_distance = 4.0;

    for frame in 0..20u64 {
        let frames = ctl.update(&CarControl::default(), &cs, &plan(), frame);
        assert_eq!(clu11(&frames), None);
    }
}

fn cruising(v_kph: f32, set_kph: f32) -> CarState {
    let mut cs = moving_car(v_kph);
    cs.cruise.acc_active = true;
    cs.cruise.mode_sel = SPEED_CONTROL_MODE;
    cs.cruise.speed = set_kph / MS_TO_KPH;
    cs
}

fn closing_lead_plan(target_kph: f32) -> PlanInputs {
    let mut plan = plan();
    plan.longitudinal.v_cruise = target_kph / MS_TO_KPH;
    plan.radar.lead_one = LeadObject {
        d_rel: 60.0,
        y_rel: 0.0,
        v_rel: -10.0 / MS_TO_KPH,
        status: true,
    };
    plan
}

#[test]
fn closing_lead_steps_set_speed_down() {
    let mut ctl = controller(Vehicle::KiaNiroEv);
    let cs = cruising(80.0, 82.0);
    let plan = closing_lead_plan(80.0);
    let c = CarControl::default();

    let mut presses = Vec::new();
    for frame in 0..21u64 {
        let frames = ctl.update(&c, &cs, &plan, frame);
        if let Some(b) = clu11(&frames) {
            presses.push((frame, b.button));
        }
    }

    assert_eq!(
        presses,
        [
            (0, CruiseButton::SetDecel),
            (10, CruiseButton::SetDecel),
            (20, CruiseButton::SetDecel)
        ]
    );
    assert!(ctl.longitudinal_flags().decelerate);
    assert!((ctl.longitudinal().ctrl_speed_kph().unwrap() - 70.0).abs() < 1e-3);
}

#[test]
fn vehicle_without_longitudinal_or_aux_display() {
    let mut ctl = controller(Vehicle::GenesisG70);
    let cs = cruising(80.0, 82.0);
    let plan = closing_lead_plan(80.0);

    for frame in 0..20u64 {
        let frames = ctl.update(&CarControl::default(), &cs, &plan, frame);
        assert_eq!(ids(&frames), [LKAS11_CAN_ID]);
    }
}

#[test]
fn both_lanes_shown_active_while_engaged() {
    let mut ctl = controller(Vehicle::KiaNiroEv);
    let cs = moving_car(72.0);
    let mut c = steering(0.1);
    c.hud.left_lane_visible = true;
    c.hud.right_lane_visible = true;

    let frames = ctl.update(&c, &cs, &plan(), 0);
    assert_eq!(lkas11(&frames).sys_state, HudSysState::Active);

    c.enabled = false;
    let frames = ctl.update(&c, &cs, &plan(), 1);
    assert_eq!(lkas11(&frames).sys_state, HudSysState::Inactive);
}

struct Bus {
    sent: Vec<(u16, u8)>,
}

impl FramePublisher for Bus {
    type Error = ();

    fn publish_frame(&mut self, frame: &OutboundFrame) -> Result<(), ()> {
        self.sent.push((frame.can_id(), frame.dlc()));
        Ok(())
    }
}

#[test]
fn publishes_every_frame_of_a_tick() {
    let mut ctl = controller(Vehicle::KiaNiroEv);
    let cs = moving_car(72.0);
    let mut c = steering(1.0);
    c.cancel = true;
    let mut bus = Bus { sent: Vec::new() };

    ctl.update_and_publish(&c, &cs, &plan(), 0, &mut bus).unwrap();
    assert_eq!(
        bus.sent,
        [
            (LKAS11_CAN_ID, 8),
            (MDPS12_CAN_ID, 8),
            (CLU11_CAN_ID, 4),
            (LFAHDA_MFC_CAN_ID, 4)
        ]
    );
}
