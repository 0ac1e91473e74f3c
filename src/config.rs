//! Configuration constants for the rally simulator.

// Court
pub const COURT_WIDTH: f64 = 20.0; // Court width in court units (x axis)
pub const COURT_HEIGHT: f64 = 10.0; // Court height in court units (y axis)
pub const DEFAULT_GRID_SIZE: usize = 10; // Target cells per axis

// Strategy
pub const PLACEMENT_ERROR_PROB: f64 = 0.05; // Chance a rally shot drifts to a neighbouring cell
pub const REACH_DISTANCE_EPSILON: f64 = 0.1; // Keeps the reach ratio finite at zero distance

// Rally
pub const MAX_SHOTS_PER_POINT: u32 = 10_000; // Agent shots before a point is aborted

// Scoring
pub const POINTS_TO_WIN_GAME: u32 = 4;
pub const GAMES_TO_WIN_SET: u32 = 6;
pub const WIN_MARGIN: u32 = 2; // Lead required at both game and set level
pub const BEST_OF_SETS: u32 = 2; // Set wins needed to take the match

// Baseline opponent
pub const BOT_RADIUS: f64 = 2.0;
pub const BOT_SPEED: f64 = 3.0;

// Default agent sweep
pub const AGENT_RADIUS_MIN: f64 = 1.0;
pub const AGENT_RADIUS_MAX: f64 = 3.0;
pub const AGENT_RADIUS_STEP: f64 = 1.0;
pub const AGENT_SPEED_MIN: f64 = 2.0;
pub const AGENT_SPEED_MAX: f64 = 4.0;
pub const AGENT_SPEED_STEP: f64 = 1.0;
pub const MATCHES_PER_COMBINATION: usize = 100;

// Output
pub const RESULTS_FILE: &str = "results.csv";
pub const RESULTS_DELIMITER: &str = ";";
