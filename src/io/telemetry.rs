use std::io::BufRead;

use nalgebra::{Point2, Vector2};
use thiserror::Error;

use crate::dynamics::state::LanderState;
use crate::terrain::Surface;

// ---------------------------------------------------------------------------
// Telemetry stream parsing (startup surface + per-cycle state readings)
// ---------------------------------------------------------------------------

/// Fatal defects in the telemetry stream. The controller cannot proceed
/// without a well-formed surface and state, so these abort the process.
#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("read failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("telemetry stream ended")]
    Eof,
    #[error("expected {expected} fields, got {got}: {line:?}")]
    FieldCount {
        expected: usize,
        got: usize,
        line: String,
    },
    #[error("non-numeric field {field:?}")]
    Numeric { field: String },
    #[error("surface has no flat landing segment")]
    NoLandingZone,
}

/// Next non-empty line, split into exactly `expected` numeric fields.
fn read_fields<R: BufRead>(input: &mut R, expected: usize) -> Result<Vec<f64>, TelemetryError> {
    let mut line = String::new();
    loop {
        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Err(TelemetryError::Eof);
        }
        if !line.trim().is_empty() {
            break;
        }
    }

    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() != expected {
        return Err(TelemetryError::FieldCount {
            expected,
            got: fields.len(),
            line: line.trim().to_string(),
        });
    }
    fields
        .into_iter()
        .map(|field| {
            field.parse::<f64>().map_err(|_| TelemetryError::Numeric {
                field: field.to_string(),
            })
        })
        .collect()
}

/// Startup block: vertex count, then that many `x y` pairs in increasing-x
/// order. The landing zone is derived during surface construction; a
/// terrain with no level segment is rejected.
pub fn read_surface<R: BufRead>(input: &mut R) -> Result<Surface, TelemetryError> {
    let count = read_fields(input, 1)?[0] as usize;
    let mut points = Vec::with_capacity(count);
    for _ in 0..count {
        let fields = read_fields(input, 2)?;
        points.push(Point2::new(fields[0], fields[1]));
    }
    Surface::new(points).ok_or(TelemetryError::NoLandingZone)
}

/// One state reading: `x y hSpeed vSpeed fuel rotate power`.
pub fn read_state<R: BufRead>(input: &mut R) -> Result<LanderState, TelemetryError> {
    let fields = read_fields(input, 7)?;
    Ok(LanderState {
        pos: Vector2::new(fields[0], fields[1]),
        vel: Vector2::new(fields[2], fields[3]),
        fuel: fields[4] as i32,
        rotate: fields[5] as i32,
        power: fields[6] as i32,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
