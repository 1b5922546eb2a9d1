use std::io::{self, Write};
use std::process;

use lander_sim::dynamics::model;
use lander_sim::gnc::Planner;
use lander_sim::io::telemetry::{self, TelemetryError};
use lander_sim::types::LanderState;

fn main() {
    if let Err(err) = run() {
        eprintln!("telemetry error: {err}");
        process::exit(1);
    }
}

fn run() -> Result<(), TelemetryError> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let stdout = io::stdout();
    let mut output = stdout.lock();

    // -----------------------------------------------------------------------
    // Startup: terrain, landing zone, initial vehicle state
    // -----------------------------------------------------------------------
    let surface = telemetry::read_surface(&mut input)?;
    let mut state = telemetry::read_state(&mut input)?;

    let zone = surface.landing_zone();
    eprintln!(
        "  zone x=[{:.0}, {:.0}]  y={:.0}  fuel={}",
        zone.start_x, zone.end_x, zone.y, state.fuel
    );

    let mut planner = Planner::new();

    // -----------------------------------------------------------------------
    // Control loop: plan under the cycle budget, emit, advance, repeat
    // -----------------------------------------------------------------------
    for cycle in 0u32.. {
        let command = planner.control(&state, &surface);
        writeln!(output, "{} {}", command.rotate, command.power)?;
        output.flush()?;

        state = model::step(&state, command);
        dump_state(cycle, &state);

        // A fresh reading is consumed each cycle; the controller flies on
        // its own propagated state. EOF ends the run cleanly.
        match telemetry::read_state(&mut input) {
            Ok(_) => {}
            Err(TelemetryError::Eof) => break,
            Err(err) => return Err(err),
        }
    }

    Ok(())
}

/// Human-readable dump of the advanced state. Side channel only; the
/// command stream on stdout carries nothing else.
fn dump_state(cycle: u32, state: &LanderState) {
    eprintln!("  cycle {cycle}");
    eprintln!(
        "  pos=({:.2}, {:.2})  vel=({:.2}, {:.2})",
        state.pos.x, state.pos.y, state.vel.x, state.vel.y
    );
    eprintln!(
        "  fuel={}  rotate={}  power={}",
        state.fuel, state.rotate, state.power
    );
    eprintln!("  {}", "-".repeat(40));
}
