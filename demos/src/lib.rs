//! Shared setup for the headless demos.
//!
//! Builds the sample session (a 20x20 grid with a wall down column 10),
//! drives it to the end with obstacle ticks in between, and renders the
//! final frame as text:
//!
//! | Symbol | Meaning |
//! |---|---|
//! | `S` / `G` | start / goal |
//! | `#` / `D` | wall / dynamic obstacle |
//! | `*` | found path |
//! | `+` | frontier |
//! | `o` | explored |

use std::error::Error;
use std::fmt;

use rand::SeedableRng;
use rand::rngs::StdRng;
use stepseek_core::{Coord, DrawMode, Grid};
use stepseek_paths::{SearchEngine, StepEvent, Variant};
use stepseek_run::{Control, ReplanningSupervisor, RunStats, SessionConfig};

pub const SAMPLE_SEED: u64 = 42;

/// Default session settings with the given variant.
pub fn sample_config(variant: Variant) -> SessionConfig {
    SessionConfig {
        variant,
        ..SessionConfig::default()
    }
}

/// The sample session: default config plus a wall on rows 5..15 of
/// column 10.
pub fn sample_session(
    variant: Variant,
    seed: u64,
) -> Result<ReplanningSupervisor<StdRng>, Box<dyn Error>> {
    let mut sup = ReplanningSupervisor::new(&sample_config(variant), StdRng::seed_from_u64(seed))?;
    for row in 5..15 {
        sup.update(Control::Draw {
            cell: Coord::new(row, 10),
            mode: DrawMode::Wall,
        })?;
    }
    Ok(sup)
}

/// Result of driving one variant to the end.
#[derive(Debug, Clone)]
pub struct Outcome {
    pub variant: Variant,
    pub event: StepEvent,
    pub stats: RunStats,
    pub frame: String,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.event {
            StepEvent::Failure(reason) => writeln!(f, "{}: {reason}", self.variant)?,
            _ => writeln!(f, "{}: path found", self.variant)?,
        }
        writeln!(f, "{}", self.stats)?;
        write!(f, "{}", self.frame)
    }
}

/// Run `variant` on the sample session until it stops.
pub fn run_variant(variant: Variant, seed: u64) -> Result<Outcome, Box<dyn Error>> {
    let mut sup = sample_session(variant, seed)?;
    let event = sup.run_until_done()?;
    Ok(Outcome {
        variant,
        event,
        stats: sup.stats(),
        frame: render_frame(sup.grid(), sup.engine()),
    })
}

/// Text frame of `grid` with the search state painted over empty cells.
pub fn render_frame(grid: &Grid, engine: Option<&SearchEngine>) -> String {
    let path = engine.and_then(SearchEngine::path).unwrap_or(&[]);
    let frontier = engine.map(SearchEngine::frontier).unwrap_or_default();
    let explored = engine.map_or(&[][..], SearchEngine::explored);

    let mut out = String::with_capacity(grid.bounds().len() * 2);
    for (c, kind) in grid.iter() {
        if c.col > 0 {
            out.push(' ');
        } else if c.row > 0 {
            out.push('\n');
        }
        let ch = if kind.is_endpoint() || kind.is_blocked() {
            kind.symbol()
        } else if path.contains(&c) {
            '*'
        } else if frontier.contains(&c) {
            '+'
        } else if explored.contains(&c) {
            'o'
        } else {
            kind.symbol()
        };
        out.push(ch);
    }
    out
}
