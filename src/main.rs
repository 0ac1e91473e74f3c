use clap::Parser;
use log::{error, info, warn};
use rallysim::config;
use rallysim::experiment::{self, SweepConfig, parameter_range};
use rallysim::logging;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::process;

// --- Command Line Arguments ---
#[derive(Parser, Debug)]
#[command(author, version, about = "Monte-Carlo rally simulator: agent win rate by reach, speed and grid size", long_about = None)]
struct Args {
    /// Results table to write
    #[arg(short, long, default_value = config::RESULTS_FILE)]
    output: PathBuf,

    /// Grid resolutions to sweep (comma separated)
    #[arg(long, value_delimiter = ',', default_values_t = [config::DEFAULT_GRID_SIZE])]
    grid_sizes: Vec<usize>,

    /// Smallest agent reach radius
    #[arg(long, default_value_t = config::AGENT_RADIUS_MIN)]
    radius_min: f64,

    /// Largest agent reach radius (inclusive)
    #[arg(long, default_value_t = config::AGENT_RADIUS_MAX)]
    radius_max: f64,

    /// Agent reach radius increment
    #[arg(long, default_value_t = config::AGENT_RADIUS_STEP)]
    radius_step: f64,

    /// Smallest agent speed
    #[arg(long, default_value_t = config::AGENT_SPEED_MIN)]
    speed_min: f64,

    /// Largest agent speed (inclusive)
    #[arg(long, default_value_t = config::AGENT_SPEED_MAX)]
    speed_max: f64,

    /// Agent speed increment
    #[arg(long, default_value_t = config::AGENT_SPEED_STEP)]
    speed_step: f64,

    /// Independent matches per parameter combination
    #[arg(long, default_value_t = config::MATCHES_PER_COMBINATION)]
    matches: usize,

    /// Set wins needed to take a match
    #[arg(long, default_value_t = config::BEST_OF_SETS)]
    best_of: u32,

    /// Baseline opponent reach radius
    #[arg(long, default_value_t = config::BOT_RADIUS)]
    bot_radius: f64,

    /// Baseline opponent speed
    #[arg(long, default_value_t = config::BOT_SPEED)]
    bot_speed: f64,

    /// Chance a rally shot drifts to a neighbouring cell
    #[arg(long, default_value_t = config::PLACEMENT_ERROR_PROB)]
    error_prob: f64,

    /// Agent shots allowed in one point before the match is aborted
    #[arg(long, default_value_t = config::MAX_SHOTS_PER_POINT)]
    max_shots: u32,

    /// Base seed; a random one is drawn (and logged) when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Worker threads (defaults to one per core)
    #[arg(short, long)]
    jobs: Option<usize>,

    /// Debug filter to specify log topics (e.g., "rally,strategy,score,sweep,court")
    #[arg(long)]
    debug_filter: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Args {
    fn sweep_config(&self) -> SweepConfig {
        SweepConfig {
            grid_sizes: self.grid_sizes.clone(),
            agent_radii: parameter_range(self.radius_min, self.radius_max, self.radius_step),
            agent_speeds: parameter_range(self.speed_min, self.speed_max, self.speed_step),
            matches: self.matches,
            best_of_sets: self.best_of,
            bot_radius: self.bot_radius,
            bot_speed: self.bot_speed,
            error_prob: self.error_prob,
            max_shots: self.max_shots,
            seed: self.seed.unwrap_or_else(rand::random),
            jobs: self.jobs,
            ..Default::default()
        }
    }
}

fn main() {
    let args = Args::parse();

    let level = logging::parse_level(&args.log_level);
    if let Err(e) = logging::init_logger(level, args.debug_filter.clone()) {
        eprintln!("Warning: Failed to initialize logger: {}", e);
    }

    let sweep = args.sweep_config();
    info!("Rally simulator starting (seed {})", sweep.seed);

    let rows = match experiment::run_sweep(&sweep) {
        Ok(rows) => rows,
        Err(e) => {
            error!("Sweep failed: {}", e);
            process::exit(1);
        }
    };

    let written = File::create(&args.output)
        .map_err(rallysim::SimError::from)
        .and_then(|file| experiment::write_table(BufWriter::new(file), &rows));
    if let Err(e) = written {
        error!("Could not write {}: {}", args.output.display(), e);
        process::exit(1);
    }

    let aborted: usize = rows.iter().map(|row| row.aborted).sum();
    if aborted > 0 {
        warn!("{} match(es) aborted by the rally cap and left out of the table", aborted);
    }
    info!("Simulation complete. Results in {}", args.output.display());
}
