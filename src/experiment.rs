//! Parameter sweep over agent reach, agent speed and grid resolution.
//!
//! Every combination plays a fixed number of independent matches against the
//! same baseline opponent. Matches share nothing, so they run on a rayon pool;
//! each one derives its seed from the base seed and its global index, which
//! keeps the table identical whatever the thread count.

use crate::config;
use crate::error::{SimError, check_non_negative, check_positive};
use crate::matchplay::{Match, MatchConfig};
use crate::types::Side;
use log::{info, warn};
use rayon::prelude::*;
use std::io::Write;

#[derive(Debug, Clone, PartialEq)]
pub struct SweepConfig {
    pub grid_sizes: Vec<usize>,
    pub agent_radii: Vec<f64>,
    pub agent_speeds: Vec<f64>,
    pub matches: usize, // Matches per combination
    pub best_of_sets: u32,
    pub bot_radius: f64,
    pub bot_speed: f64,
    pub error_prob: f64,
    pub max_shots: u32,
    pub court_width: f64,
    pub court_height: f64,
    pub seed: u64,
    pub jobs: Option<usize>,
}

impl Default for SweepConfig {
    fn default() -> Self {
        SweepConfig {
            grid_sizes: vec![config::DEFAULT_GRID_SIZE],
            agent_radii: parameter_range(
                config::AGENT_RADIUS_MIN,
                config::AGENT_RADIUS_MAX,
                config::AGENT_RADIUS_STEP,
            ),
            agent_speeds: parameter_range(
                config::AGENT_SPEED_MIN,
                config::AGENT_SPEED_MAX,
                config::AGENT_SPEED_STEP,
            ),
            matches: config::MATCHES_PER_COMBINATION,
            best_of_sets: config::BEST_OF_SETS,
            bot_radius: config::BOT_RADIUS,
            bot_speed: config::BOT_SPEED,
            error_prob: config::PLACEMENT_ERROR_PROB,
            max_shots: config::MAX_SHOTS_PER_POINT,
            court_width: config::COURT_WIDTH,
            court_height: config::COURT_HEIGHT,
            seed: 0,
            jobs: None,
        }
    }
}

impl SweepConfig {
    pub fn validate(&self) -> Result<(), SimError> {
        if self.grid_sizes.is_empty() {
            return Err(SimError::invalid("grid_sizes", "empty"));
        }
        if self.agent_radii.is_empty() {
            return Err(SimError::invalid("agent_radii", "empty"));
        }
        if self.agent_speeds.is_empty() {
            return Err(SimError::invalid("agent_speeds", "empty"));
        }
        if self.matches == 0 {
            return Err(SimError::invalid("matches", self.matches));
        }
        if self.best_of_sets == 0 {
            return Err(SimError::invalid("best_of_sets", self.best_of_sets));
        }
        if self.jobs == Some(0) {
            return Err(SimError::invalid("jobs", 0));
        }
        // Per-match checks catch the rest before anything is simulated
        for combination in self.combinations() {
            self.match_config(combination, 0).validate()?;
        }
        Ok(())
    }

    /// All (grid size, radius, speed) triples in output order
    pub fn combinations(&self) -> Vec<(usize, f64, f64)> {
        let total = self.grid_sizes.len() * self.agent_radii.len() * self.agent_speeds.len();
        let mut combos = Vec::with_capacity(total);
        for &n in &self.grid_sizes {
            for &radius in &self.agent_radii {
                for &speed in &self.agent_speeds {
                    combos.push((n, radius, speed));
                }
            }
        }
        combos
    }

    fn match_config(&self, (n, radius, speed): (usize, f64, f64), index: usize) -> MatchConfig {
        MatchConfig::new(radius, speed, self.bot_radius, self.bot_speed, n)
            .with_court(self.court_width, self.court_height)
            .with_error_prob(self.error_prob)
            .with_max_shots(self.max_shots)
            .with_seed(self.seed.wrapping_add(index as u64))
            .with_id(index)
    }
}

/// One line of the results table
#[derive(Debug, Clone, PartialEq)]
pub struct SweepRow {
    pub agent_radius: f64,
    pub agent_speed: f64,
    pub grid_size: usize,
    pub agent_wins: usize,
    pub bot_wins: usize,
    pub aborted: usize, // Matches stopped by the rally shot cap
}

impl SweepRow {
    /// Share of completed matches won by the agent
    pub fn agent_win_probability(&self) -> f64 {
        let completed = self.agent_wins + self.bot_wins;
        if completed == 0 {
            0.0
        } else {
            self.agent_wins as f64 / completed as f64
        }
    }

    pub fn to_line(&self) -> String {
        let d = config::RESULTS_DELIMITER;
        format!(
            "{}{d}{}{d}{}{d}{}{d}{}{d}{:.2}",
            self.agent_radius,
            self.agent_speed,
            self.grid_size,
            self.agent_wins,
            self.bot_wins,
            self.agent_win_probability()
        )
    }
}

pub fn header() -> String {
    [
        "r_agent",
        "l_agent",
        "n",
        "agentWins",
        "botWins",
        "agentWinProbability",
    ]
    .join(config::RESULTS_DELIMITER)
}

/// Inclusive range `min, min + step, ...` up to `max`.
///
/// Values are built on an integer grid at the decimal precision of `min` and
/// `step`, so `0.1` steps yield `0.3` rather than `0.30000000000000004`.
pub fn parameter_range(min: f64, max: f64, step: f64) -> Vec<f64> {
    if check_non_negative("range_min", min).is_err()
        || check_positive("range_step", step).is_err()
        || !max.is_finite()
        || max < min
    {
        return Vec::new();
    }
    let count = ((max - min) / step + 1e-9).floor() as usize + 1;
    match decimal_places(min).zip(decimal_places(step)) {
        Some((a, b)) => {
            let scale = 10f64.powi(a.max(b) as i32);
            let base = (min * scale).round();
            let unit = (step * scale).round();
            (0..count).map(|k| (base + k as f64 * unit) / scale).collect()
        }
        None => (0..count).map(|k| min + k as f64 * step).collect(),
    }
}

// Fewest decimals (up to 9) that represent `value`, if any
fn decimal_places(value: f64) -> Option<u32> {
    (0..=9u32).find(|&places| {
        let scale = 10f64.powi(places as i32);
        ((value * scale).round() / scale - value).abs() <= 1e-9 * value.abs().max(1.0)
    })
}

/// Runs every combination and returns one row per combination
pub fn run_sweep(sweep: &SweepConfig) -> Result<Vec<SweepRow>, SimError> {
    sweep.validate()?;

    let combinations = sweep.combinations();
    info!(
        "Sweeping {} combinations x {} matches (best of {} sets, base seed {})",
        combinations.len(),
        sweep.matches,
        sweep.best_of_sets,
        sweep.seed
    );

    let pool = match sweep.jobs {
        Some(jobs) => Some(
            rayon::ThreadPoolBuilder::new()
                .num_threads(jobs)
                .build()
                .map_err(|e| SimError::invalid("jobs", e))?,
        ),
        None => None,
    };

    let mut rows = Vec::with_capacity(combinations.len());
    for (combo_idx, &combination) in combinations.iter().enumerate() {
        let first_index = combo_idx * sweep.matches;
        let play = || run_combination(sweep, combination, first_index);
        let outcomes = match &pool {
            Some(pool) => pool.install(play),
            None => play(),
        };

        let row = tally(combination, outcomes)?;
        info!(
            "r_agent={} l_agent={} n={} Agent wins: {}/{}",
            row.agent_radius, row.agent_speed, row.grid_size, row.agent_wins, sweep.matches
        );
        if row.aborted > 0 {
            warn!(
                "r_agent={} l_agent={} n={}: {} match(es) aborted by the rally cap and left out of the tally",
                row.agent_radius, row.agent_speed, row.grid_size, row.aborted
            );
        }
        rows.push(row);
    }
    Ok(rows)
}

// Plays all matches of one combination, in index order
fn run_combination(
    sweep: &SweepConfig,
    combination: (usize, f64, f64),
    first_index: usize,
) -> Vec<Result<Side, SimError>> {
    (first_index..first_index + sweep.matches)
        .into_par_iter()
        .map(|index| -> Result<Side, SimError> {
            let mut game = Match::new(sweep.match_config(combination, index))?;
            let summary = game.play_match(sweep.best_of_sets)?;
            crate::debug_sweep!(
                "[M{:04}] {} wins {}-{} in {} points",
                index,
                summary.winner,
                summary.sets.agent,
                summary.sets.bot,
                summary.points_played
            );
            Ok(summary.winner)
        })
        .collect()
}

// Aborted rallies are counted separately; any other failure stops the sweep
fn tally(
    (n, radius, speed): (usize, f64, f64),
    outcomes: Vec<Result<Side, SimError>>,
) -> Result<SweepRow, SimError> {
    let mut row = SweepRow {
        agent_radius: radius,
        agent_speed: speed,
        grid_size: n,
        agent_wins: 0,
        bot_wins: 0,
        aborted: 0,
    };
    for outcome in outcomes {
        match outcome {
            Ok(Side::Agent) => row.agent_wins += 1,
            Ok(Side::Bot) => row.bot_wins += 1,
            Err(SimError::RallyAborted { .. }) => row.aborted += 1,
            Err(e) => return Err(e),
        }
    }
    Ok(row)
}

/// Writes the header and one line per row
pub fn write_table<W: Write>(mut out: W, rows: &[SweepRow]) -> Result<(), SimError> {
    writeln!(out, "{}", header())?;
    for row in rows {
        writeln!(out, "{}", row.to_line())?;
    }
    out.flush()?;
    Ok(())
}
