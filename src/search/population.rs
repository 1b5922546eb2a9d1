use rand::Rng;

use crate::dynamics::state::{LanderState, MAX_POWER_STEP, MAX_ROTATE_STEP};
use crate::terrain::Surface;

use super::chromosome::{Chromosome, Gene, CHROMOSOME_LEN};
use super::fitness;

// ---------------------------------------------------------------------------
// Population search: elitism + tournament selection + blend crossover
// ---------------------------------------------------------------------------

pub const POPULATION_SIZE: usize = 50;
pub const ELITE_COUNT: usize = 10;
pub const TOURNAMENT_SIZE: usize = 5;

/// Fixed-size set of candidate plans under evolutionary search. Always fully
/// populated; member order carries no meaning outside ranking.
#[derive(Debug, Clone)]
pub struct Population {
    members: Vec<Chromosome>,
}

impl Population {
    /// Fresh random population. Unscored until [`Population::rescore`] runs.
    pub fn random(rng: &mut impl Rng) -> Self {
        let members = (0..POPULATION_SIZE)
            .map(|_| Chromosome::random(rng))
            .collect();
        Self { members }
    }

    /// Re-randomize every member in place (per-cycle reset).
    pub fn reseed(&mut self, rng: &mut impl Rng) {
        for member in &mut self.members {
            *member = Chromosome::random(rng);
        }
    }

    /// Shift every member one tick forward (warm start across cycles).
    pub fn shift(&mut self, rng: &mut impl Rng) {
        for member in &mut self.members {
            member.shift(rng);
        }
    }

    /// Recompute every member's fitness from the current real state.
    pub fn rescore(&mut self, state: &LanderState, surface: &Surface) {
        for member in &mut self.members {
            member.fitness = fitness::evaluate(member, state, surface);
        }
    }

    /// Best member by fitness; the earliest member wins ties.
    pub fn best(&self) -> &Chromosome {
        let mut best = &self.members[0];
        for member in &self.members[1..] {
            if member.fitness > best.fitness {
                best = member;
            }
        }
        best
    }

    /// One generation step: rank by cached fitness, carry the elites
    /// unchanged, refill the rest via tournament selection, blend crossover
    /// and mutation, then rescore everything for the next ranking.
    pub fn evolve(&mut self, state: &LanderState, surface: &Surface, rng: &mut impl Rng) {
        self.members.sort_by(|a, b| b.fitness.total_cmp(&a.fitness));

        let mut next = Vec::with_capacity(POPULATION_SIZE);
        next.extend_from_slice(&self.members[..ELITE_COUNT]);

        while next.len() < POPULATION_SIZE {
            let parent_a = self.tournament(rng);
            let parent_b = self.tournament(rng);
            let mut child = crossover(parent_a, parent_b, rng);
            child.mutate(rng);
            next.push(child);
        }

        self.members = next;
        self.rescore(state, surface);
    }

    /// Best of `TOURNAMENT_SIZE` members sampled uniformly with replacement.
    fn tournament(&self, rng: &mut impl Rng) -> &Chromosome {
        let mut best = &self.members[rng.gen_range(0..POPULATION_SIZE)];
        for _ in 1..TOURNAMENT_SIZE {
            let challenger = &self.members[rng.gen_range(0..POPULATION_SIZE)];
            if challenger.fitness > best.fitness {
                best = challenger;
            }
        }
        best
    }
}

/// Whole-plan blend: a single weight drawn per child and reused across every
/// gene, biasing the child toward one parent as a whole rather than mixing
/// gene-by-gene. Components blend independently and clamp back to gene range.
fn crossover(a: &Chromosome, b: &Chromosome, rng: &mut impl Rng) -> Chromosome {
    let alpha: f64 = rng.gen();
    let mut genes = [Gene::default(); CHROMOSOME_LEN];
    for (i, gene) in genes.iter_mut().enumerate() {
        let rotate =
            alpha * f64::from(a.genes[i].rotate) + (1.0 - alpha) * f64::from(b.genes[i].rotate);
        let power =
            alpha * f64::from(a.genes[i].power) + (1.0 - alpha) * f64::from(b.genes[i].power);
        *gene = Gene {
            rotate: (rotate.round() as i32).clamp(-MAX_ROTATE_STEP, MAX_ROTATE_STEP),
            power: (power.round() as i32).clamp(-MAX_POWER_STEP, MAX_POWER_STEP),
        };
    }
    Chromosome { genes, fitness: 0.0 }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
