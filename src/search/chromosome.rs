use rand::Rng;

use crate::dynamics::state::{MAX_POWER_STEP, MAX_ROTATE_STEP};

// ---------------------------------------------------------------------------
// Candidate encoding: fixed-horizon sequence of command deltas
// ---------------------------------------------------------------------------

/// Planning horizon, in control ticks.
pub const CHROMOSOME_LEN: usize = 100;

/// Per-component re-roll probability during mutation.
pub const MUTATION_RATE: f64 = 0.02;

/// One tick's commanded change of rotation/power. Replaced wholesale on
/// mutation, never edited in place.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Gene {
    pub rotate: i32, // deg, [-15, 15]
    pub power: i32,  // levels, {-1, 0, 1}
}

impl Gene {
    pub fn random(rng: &mut impl Rng) -> Self {
        Self {
            rotate: rng.gen_range(-MAX_ROTATE_STEP..=MAX_ROTATE_STEP),
            power: rng.gen_range(-MAX_POWER_STEP..=MAX_POWER_STEP),
        }
    }
}

/// A full open-loop plan over the horizon, plus its cached score.
///
/// `fitness` is only meaningful once the owning population has scored the
/// chromosome; genes never change without a rescore before the next ranking.
#[derive(Debug, Clone)]
pub struct Chromosome {
    pub genes: [Gene; CHROMOSOME_LEN],
    pub fitness: f64,
}

impl Chromosome {
    pub fn random(rng: &mut impl Rng) -> Self {
        let mut genes = [Gene::default(); CHROMOSOME_LEN];
        for gene in genes.iter_mut() {
            *gene = Gene::random(rng);
        }
        Self { genes, fitness: 0.0 }
    }

    /// Independently re-roll each gene component with `MUTATION_RATE`
    /// probability; rotation and power are separate trials.
    pub fn mutate(&mut self, rng: &mut impl Rng) {
        for gene in self.genes.iter_mut() {
            if rng.gen::<f64>() < MUTATION_RATE {
                gene.rotate = rng.gen_range(-MAX_ROTATE_STEP..=MAX_ROTATE_STEP);
            }
            if rng.gen::<f64>() < MUTATION_RATE {
                gene.power = rng.gen_range(-MAX_POWER_STEP..=MAX_POWER_STEP);
            }
        }
    }

    /// Consume the executed leading gene: shift the plan left one tick and
    /// fill the freed tail slot with a fresh random gene.
    pub fn shift(&mut self, rng: &mut impl Rng) {
        self.genes.copy_within(1.., 0);
        self.genes[CHROMOSOME_LEN - 1] = Gene::random(rng);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
