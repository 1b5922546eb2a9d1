pub mod planner;

pub use planner::{Deadline, GenerationCap, Planner, SeedMode, WallDeadline, PLAN_BUDGET};
