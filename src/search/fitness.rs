use crate::dynamics::model;
use crate::dynamics::state::{Command, LanderState};
use crate::terrain::Surface;

use super::chromosome::Chromosome;

// ---------------------------------------------------------------------------
// Fitness: roll a candidate plan forward, score its terminal state
// ---------------------------------------------------------------------------

/// Touchdown tolerances.
pub const MAX_LANDING_HSPEED: f64 = 20.0;
pub const MAX_LANDING_VSPEED: f64 = 40.0;

/// Landed/crashed tier anchors. Fuel burned over a full horizon is bounded
/// by horizon * max power (400), so a successful landing always outscores
/// every crash and every still-airborne candidate.
const LANDED_SCORE: f64 = 10_000.0;
const CRASHED_SCORE: f64 = -10_000.0;

/// Roll `chromosome` forward from `initial` and score the outcome.
///
/// Pure function of its inputs: identical (chromosome, state, surface)
/// always produce the identical score. The rollout stops once the vehicle
/// reaches ground level (y <= 0) or the plan is exhausted.
pub fn evaluate(chromosome: &Chromosome, initial: &LanderState, surface: &Surface) -> f64 {
    let mut state = initial.clone();
    for gene in &chromosome.genes {
        state = model::step(
            &state,
            Command {
                rotate: state.rotate + gene.rotate,
                power: state.power + gene.power,
            },
        );
        if state.pos.y <= 0.0 {
            break;
        }
    }
    score(&state, initial.fuel, surface)
}

/// Three-tier scoring of a terminal rollout state:
/// touched down safely > still airborne > touched down unsafely.
fn score(state: &LanderState, initial_fuel: i32, surface: &Surface) -> f64 {
    let zone = surface.landing_zone();

    if let Some(probe) = surface.probe(state.pos.x) {
        if state.pos.y <= probe.height {
            let safe = probe.flat
                && zone.contains_x(state.pos.x)
                && state.rotate == 0
                && state.vel.x.abs() <= MAX_LANDING_HSPEED
                && state.vel.y.abs() <= MAX_LANDING_VSPEED;
            return if safe {
                LANDED_SCORE - f64::from(initial_fuel - state.fuel)
            } else {
                CRASHED_SCORE
            };
        }
    }

    // Still airborne: soft gradient pulling the search over the pad.
    -(state.pos.x - zone.center_x()).abs()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::chromosome::{Gene, CHROMOSOME_LEN};
    use nalgebra::{Point2, Vector2};

    fn ridge_surface() -> Surface {
        Surface::new(vec![
            Point2::new(0.0, 100.0),
            Point2::new(1000.0, 100.0),
            Point2::new(1500.0, 150.0),
            Point2::new(3000.0, 150.0),
        ])
        .unwrap()
    }

    fn still_lander(x: f64, y: f64) -> LanderState {
        LanderState {
            pos: Vector2::new(x, y),
            vel: Vector2::zeros(),
            fuel: 500,
            rotate: 0,
            power: 0,
        }
    }

    fn plan(genes: &[Gene]) -> Chromosome {
        let mut chromosome = Chromosome {
            genes: [Gene::default(); CHROMOSOME_LEN],
            fitness: 0.0,
        };
        chromosome.genes[..genes.len()].copy_from_slice(genes);
        chromosome
    }

    #[test]
    fn free_fall_onto_the_pad_scores_full_marks() {
        // Zero-delta plan from rest above the pad: pure free fall, upright,
        // |vy| at contact stays under the 40 limit, zero fuel burned.
        let score = evaluate(&plan(&[]), &still_lander(2500.0, 150.0), &ridge_surface());
        assert_eq!(score, 10_000.0);
    }

    #[test]
    fn fuel_burned_comes_off_a_safe_landing() {
        // One tick of +1 power, then hold: power 1 for the whole descent.
        // Contact after 11 ticks, one fuel unit per tick.
        let chromosome = plan(&[Gene { rotate: 0, power: 1 }]);
        let score = evaluate(&chromosome, &still_lander(2500.0, 150.0), &ridge_surface());
        assert_eq!(score, 10_000.0 - 11.0);
    }

    #[test]
    fn thriftier_safe_landing_scores_strictly_higher() {
        let surface = ridge_surface();
        let state = still_lander(2500.0, 150.0);
        let coasting = evaluate(&plan(&[]), &state, &surface);
        let burning = evaluate(&plan(&[Gene { rotate: 0, power: 1 }]), &state, &surface);
        assert!(coasting > burning);
        assert!(burning > 0.0, "Both are safe landings, both in the top tier");
    }

    #[test]
    fn touchdown_off_the_pad_is_a_crash() {
        // x = 500 sits on level terrain, but outside the landing zone.
        let score = evaluate(&plan(&[]), &still_lander(500.0, 150.0), &ridge_surface());
        assert_eq!(score, -10_000.0);
    }

    #[test]
    fn tilted_touchdown_on_the_pad_is_a_crash() {
        let mut state = still_lander(2500.0, 150.0);
        state.rotate = 15;
        let score = evaluate(&plan(&[]), &state, &ridge_surface());
        assert_eq!(score, -10_000.0, "Any non-zero contact attitude fails");
    }

    #[test]
    fn airborne_rollout_scores_distance_to_zone_center() {
        // Thrust ramps to 4 and holds: the vehicle never reaches the ground
        // within the horizon. x never moves, so the score is the exact
        // offset from the zone center at 2250.
        let genes = [Gene { rotate: 0, power: 1 }; 4];
        let score = evaluate(&plan(&genes), &still_lander(2000.0, 2600.0), &ridge_surface());
        assert_eq!(score, -250.0);
    }

    #[test]
    fn evaluate_is_deterministic() {
        let surface = ridge_surface();
        let state = still_lander(2500.0, 150.0);
        let chromosome = plan(&[Gene { rotate: 5, power: 1 }, Gene { rotate: -5, power: 0 }]);
        let first = evaluate(&chromosome, &state, &surface);
        let second = evaluate(&chromosome, &state, &surface);
        assert_eq!(first, second);
    }
}
