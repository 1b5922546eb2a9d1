pub mod dynamics;
pub mod gnc;
pub mod io;
pub mod search;
pub mod terrain;

// Convenience re-exports for the binary and downstream callers
pub mod types {
    pub use crate::dynamics::state::{Command, LanderState, GRAVITY};
    pub use crate::search::chromosome::{Chromosome, Gene};
    pub use crate::terrain::{LandingZone, Surface};
}
