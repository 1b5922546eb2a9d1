use nalgebra::Vector2;

use super::state::{
    Command, LanderState, GRAVITY, MAX_POWER, MAX_POWER_STEP, MAX_ROTATE, MAX_ROTATE_STEP,
};

// ---------------------------------------------------------------------------
// Kinematic model (2DOF point mass, one control tick per step)
// ---------------------------------------------------------------------------

/// Limit a requested command against the vehicle envelope and the previous
/// tick's attitude/thrust.
pub fn limit_command(state: &LanderState, requested: Command) -> Command {
    let rotate = requested
        .rotate
        .clamp(-MAX_ROTATE, MAX_ROTATE)
        .clamp(state.rotate - MAX_ROTATE_STEP, state.rotate + MAX_ROTATE_STEP);
    let power = requested
        .power
        .clamp(0, MAX_POWER)
        .clamp(state.power - MAX_POWER_STEP, state.power + MAX_POWER_STEP);
    Command { rotate, power }
}

/// Advance the vehicle by one tick under `command`.
///
/// The command is envelope- and rate-limited first, so callers may pass raw
/// requests. Integration is semi-implicit Euler with the averaged-velocity
/// position update; the exact form matters for score comparability across
/// candidate plans and must not be altered.
pub fn step(state: &LanderState, command: Command) -> LanderState {
    let cmd = limit_command(state, command);

    let rad = f64::from(cmd.rotate).to_radians();
    let thrust = f64::from(cmd.power);
    let acc = Vector2::new(-thrust * rad.sin(), thrust * rad.cos() - GRAVITY);

    LanderState {
        pos: state.pos + state.vel + 0.5 * acc,
        vel: state.vel + acc,
        fuel: state.fuel - cmd.power,
        rotate: cmd.rotate,
        power: cmd.power,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn hover_state(power: i32) -> LanderState {
        LanderState {
            pos: Vector2::new(2500.0, 150.0),
            vel: Vector2::zeros(),
            fuel: 500,
            rotate: 0,
            power,
        }
    }

    #[test]
    fn full_thrust_upright_climbs() {
        // 4 * cos(0) - 3.711 > 0: one tick at full power gains upward speed.
        let state = hover_state(3); // one level below full, so 4 is reachable
        let next = step(&state, Command { rotate: 0, power: 4 });
        assert!(
            next.vel.y > 0.0,
            "Full upright thrust should beat gravity, got vy = {}",
            next.vel.y
        );
    }

    #[test]
    fn free_fall_accelerates_downward() {
        let state = hover_state(0);
        let next = step(&state, Command { rotate: 0, power: 0 });
        assert!((next.vel.y + GRAVITY).abs() < 1e-12);
        assert!(next.pos.y < state.pos.y);
    }

    #[test]
    fn rate_limits_hold_for_aggressive_commands() {
        let state = hover_state(0);
        let next = step(&state, Command { rotate: 90, power: 4 });
        assert_eq!(next.rotate, MAX_ROTATE_STEP, "Rotation jump must be rate-limited");
        assert_eq!(next.power, MAX_POWER_STEP, "Thrust jump must be rate-limited");
    }

    #[test]
    fn envelope_holds_under_any_command() {
        let mut state = hover_state(0);
        let requests = [(300, 9), (-300, -5), (45, 2), (-90, 4), (90, 0)];
        for (rotate, power) in requests {
            let next = step(&state, Command { rotate, power });
            assert!((-MAX_ROTATE..=MAX_ROTATE).contains(&next.rotate));
            assert!((0..=MAX_POWER).contains(&next.power));
            assert!((next.rotate - state.rotate).abs() <= MAX_ROTATE_STEP);
            assert!((next.power - state.power).abs() <= MAX_POWER_STEP);
            state = next;
        }
    }

    #[test]
    fn fuel_burns_at_applied_power() {
        let state = hover_state(2);
        let next = step(&state, Command { rotate: 0, power: 3 });
        assert_eq!(next.fuel, 497, "Fuel burns by the applied (limited) power");
    }

    #[test]
    fn tilted_thrust_pushes_sideways() {
        let mut state = hover_state(4);
        state.rotate = 30;
        let next = step(&state, Command { rotate: 30, power: 4 });
        assert!(next.vel.x < 0.0, "Positive rotation tilts thrust leftward");
    }
}
