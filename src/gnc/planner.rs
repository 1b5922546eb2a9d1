use std::time::{Duration, Instant};

use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::dynamics::model;
use crate::dynamics::state::{Command, LanderState};
use crate::search::population::Population;
use crate::terrain::Surface;

// ---------------------------------------------------------------------------
// Time-boxed receding-horizon planner
// ---------------------------------------------------------------------------

/// Wall-clock compute budget for one control cycle.
pub const PLAN_BUDGET: Duration = Duration::from_millis(99);

/// Expiry source for the generational loop. Checked between generations
/// only, never mid-generation, so a cycle can overrun the budget by at most
/// one generation's cost.
pub trait Deadline {
    fn expired(&mut self) -> bool;
}

/// Real deadline at a fixed instant.
pub struct WallDeadline {
    end: Instant,
}

impl WallDeadline {
    pub fn after(budget: Duration) -> Self {
        Self {
            end: Instant::now() + budget,
        }
    }
}

impl Deadline for WallDeadline {
    fn expired(&mut self) -> bool {
        Instant::now() >= self.end
    }
}

/// Deadline that expires after a fixed number of checks. Lets tests run
/// "budget exhausted after N generations" without real delays.
pub struct GenerationCap {
    remaining: usize,
}

impl GenerationCap {
    pub fn new(generations: usize) -> Self {
        Self {
            remaining: generations,
        }
    }
}

impl Deadline for GenerationCap {
    fn expired(&mut self) -> bool {
        if self.remaining == 0 {
            return true;
        }
        self.remaining -= 1;
        false
    }
}

// ---------------------------------------------------------------------------
// Planner
// ---------------------------------------------------------------------------

/// How each control cycle seeds its population.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedMode {
    /// Discard the previous cycle's search and restart from random plans.
    Reset,
    /// Carry the previous population forward, shifted past the executed
    /// tick, with a fresh random gene at the tail of every plan.
    WarmStart,
}

/// Receding-horizon planner: evolves a population of candidate plans under
/// a per-cycle deadline and emits only the first command of the winner.
pub struct Planner {
    population: Population,
    rng: SmallRng,
    seed_mode: SeedMode,
}

impl Planner {
    /// Production planner, entropy-seeded once at startup.
    pub fn new() -> Self {
        Self::with_rng(SmallRng::from_entropy())
    }

    /// Fixed-seed planner for reproducible runs.
    pub fn from_seed(seed: u64) -> Self {
        Self::with_rng(SmallRng::seed_from_u64(seed))
    }

    fn with_rng(mut rng: SmallRng) -> Self {
        let population = Population::random(&mut rng);
        Self {
            population,
            rng,
            seed_mode: SeedMode::Reset,
        }
    }

    pub fn seed_mode(mut self, mode: SeedMode) -> Self {
        self.seed_mode = mode;
        self
    }

    /// Plan one cycle under the default wall-clock budget.
    pub fn control(&mut self, state: &LanderState, surface: &Surface) -> Command {
        self.plan(state, surface, &mut WallDeadline::after(PLAN_BUDGET))
    }

    /// Plan one cycle: seed the population per the seed mode, score it, then
    /// evolve until `deadline` expires. Returns the winning plan's first
    /// command, limited against the real state so it is directly flyable.
    pub fn plan(
        &mut self,
        state: &LanderState,
        surface: &Surface,
        deadline: &mut dyn Deadline,
    ) -> Command {
        match self.seed_mode {
            SeedMode::Reset => self.population.reseed(&mut self.rng),
            SeedMode::WarmStart => self.population.shift(&mut self.rng),
        }
        self.population.rescore(state, surface);

        while !deadline.expired() {
            self.population.evolve(state, surface, &mut self.rng);
        }

        let lead = self.population.best().genes[0];
        model::limit_command(
            state,
            Command {
                rotate: state.rotate + lead.rotate,
                power: state.power + lead.power,
            },
        )
    }
}

impl Default for Planner {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
