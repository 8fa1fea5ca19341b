use num::Float;

use crate::config::SteerLimits;

/// Rate and driver-torque limiting of a requested steering torque.
///
/// The request is first held inside a window that shifts with the driver's
/// own torque, so the system never fights a driver beyond the allowance.
/// Growth in magnitude is then limited to `steer_delta_up` per tick and
/// decay to `steer_delta_down` per tick relative to the last command.
pub fn apply_std_steer_torque_limits(
    apply_torque: f32,
    apply_torque_last: f32,
    driver_torque: f32,
    limits: &SteerLimits,
) -> i32 {
    let driver_offset = driver_torque * limits.steer_driver_factor;
    let driver_max_torque = limits.steer_max
        + (limits.steer_driver_allowance + driver_offset) * limits.steer_driver_multiplier;
    let driver_min_torque = -limits.steer_max
        + (-limits.steer_driver_allowance + driver_offset) * limits.steer_driver_multiplier;

    let max_steer_allowed = limits.steer_max.min(driver_max_torque).max(0.0);
    let min_steer_allowed = (-limits.steer_max).max(driver_min_torque).min(0.0);
    let mut torque = clip(apply_torque, min_steer_allowed, max_steer_allowed);

    let up = limits.steer_delta_up;
    let down = limits.steer_delta_down;
    torque = if apply_torque_last > 0.0 {
        clip(
            torque,
            (apply_torque_last - down).max(-up),
            apply_torque_last + up,
        )
    } else {
        clip(
            torque,
            apply_torque_last - up,
            (apply_torque_last + down).min(up),
        )
    };

    torque.round() as i32
}

/// Clamp that tolerates an inverted range by favoring the upper bound.
pub fn clip(value: f32, lo: f32, hi: f32) -> f32 {
    value.max(lo).min(hi)
}
