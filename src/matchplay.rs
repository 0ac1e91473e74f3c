use crate::config;
use crate::court::Court;
use crate::error::{SimError, check_non_negative, check_positive};
use crate::player::{Facing, Player};
use crate::rally::{PointOutcome, Rally};
use crate::scoring::{Scoreboard, Tally};
use crate::strategy::Strategy;
use crate::types::{Position, Side};
use log::trace;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Everything needed to set up one match
#[derive(Debug, Clone, PartialEq)]
pub struct MatchConfig {
    pub agent_reach: f64,
    pub agent_speed: f64,
    pub bot_reach: f64,
    pub bot_speed: f64,
    pub grid_size: usize,
    pub court_width: f64,
    pub court_height: f64,
    pub error_prob: f64,
    pub max_shots: u32,
    pub seed: u64,
    pub id: usize, // Only used to tag log lines
}

impl Default for MatchConfig {
    fn default() -> Self {
        MatchConfig {
            agent_reach: config::AGENT_RADIUS_MIN,
            agent_speed: config::AGENT_SPEED_MIN,
            bot_reach: config::BOT_RADIUS,
            bot_speed: config::BOT_SPEED,
            grid_size: config::DEFAULT_GRID_SIZE,
            court_width: config::COURT_WIDTH,
            court_height: config::COURT_HEIGHT,
            error_prob: config::PLACEMENT_ERROR_PROB,
            max_shots: config::MAX_SHOTS_PER_POINT,
            seed: 0,
            id: 0,
        }
    }
}

impl MatchConfig {
    pub fn new(
        agent_reach: f64,
        agent_speed: f64,
        bot_reach: f64,
        bot_speed: f64,
        grid_size: usize,
    ) -> Self {
        MatchConfig {
            agent_reach,
            agent_speed,
            bot_reach,
            bot_speed,
            grid_size,
            ..Default::default()
        }
    }

    pub fn with_court(mut self, width: f64, height: f64) -> Self {
        self.court_width = width;
        self.court_height = height;
        self
    }

    pub fn with_error_prob(mut self, error_prob: f64) -> Self {
        self.error_prob = error_prob;
        self
    }

    pub fn with_max_shots(mut self, max_shots: u32) -> Self {
        self.max_shots = max_shots;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_id(mut self, id: usize) -> Self {
        self.id = id;
        self
    }

    /// Fails fast on values that would make the simulation degenerate
    pub fn validate(&self) -> Result<(), SimError> {
        check_non_negative("agent_reach", self.agent_reach)?;
        check_non_negative("agent_speed", self.agent_speed)?;
        check_non_negative("bot_reach", self.bot_reach)?;
        check_non_negative("bot_speed", self.bot_speed)?;
        check_positive("court_width", self.court_width)?;
        check_positive("court_height", self.court_height)?;
        if self.grid_size == 0 {
            return Err(SimError::invalid("grid_size", self.grid_size));
        }
        if !(0.0..=1.0).contains(&self.error_prob) {
            return Err(SimError::invalid("error_prob", self.error_prob));
        }
        if self.max_shots == 0 {
            return Err(SimError::invalid("max_shots", self.max_shots));
        }
        Ok(())
    }
}

/// Final state of a completed match
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchSummary {
    pub winner: Side,
    pub sets: Tally,
    pub set_scores: Vec<Tally>,
    pub points_played: usize,
}

/// A single agent-versus-bot match with its own court, players and RNG
#[derive(Debug)]
pub struct Match {
    pub agent: Player,
    pub bot: Player,
    pub court: Court,
    pub strategy: Strategy,
    pub scoreboard: Scoreboard,
    rng: StdRng,
    max_shots: u32,
    id: usize,
    point_log: Vec<PointOutcome>,
}

impl Match {
    pub fn new(config: MatchConfig) -> Result<Self, SimError> {
        config.validate()?;

        let court = Court::new(config.court_width, config.court_height, config.grid_size)?;
        let mid_x = config.court_width / 2.0;
        let agent = Player::new(
            config.agent_reach,
            config.agent_speed,
            Position::new(mid_x, 0.0),
            Facing::North,
        )?;
        let bot = Player::new(
            config.bot_reach,
            config.bot_speed,
            Position::new(mid_x, config.court_height),
            Facing::South,
        )?;

        Ok(Match {
            agent,
            bot,
            court,
            strategy: Strategy::new(config.grid_size, config.error_prob),
            scoreboard: Scoreboard::default(),
            rng: StdRng::seed_from_u64(config.seed),
            max_shots: config.max_shots,
            id: config.id,
            point_log: Vec::new(),
        })
    }

    /// Plays sets until one side has won `best_of_sets` of them
    pub fn play_match(&mut self, best_of_sets: u32) -> Result<MatchSummary, SimError> {
        if best_of_sets == 0 {
            return Err(SimError::invalid("best_of_sets", best_of_sets));
        }

        self.scoreboard.start_match();
        self.point_log.clear();
        let winner = loop {
            if let Some(winner) = self.scoreboard.match_winner(best_of_sets) {
                break winner;
            }
            self.play_set()?;
        };

        crate::debug_score!(
            self.id,
            "Match to {} after {} points, sets {}-{}",
            winner,
            self.point_log.len(),
            self.scoreboard.sets.agent,
            self.scoreboard.sets.bot
        );
        Ok(self.summary(winner))
    }

    /// Plays games until the set's margin rule is met
    pub fn play_set(&mut self) -> Result<Side, SimError> {
        self.scoreboard.start_set();
        loop {
            self.play_game()?;
            if let Some(winner) = self.scoreboard.close_game() {
                let games = self.scoreboard.games;
                crate::debug_score!(self.id, "Set to {} {}-{}", winner, games.agent, games.bot);
                return Ok(winner);
            }
        }
    }

    /// Plays points until the game's margin rule is met.
    /// Only the opening point of the game is served.
    pub fn play_game(&mut self) -> Result<Side, SimError> {
        self.scoreboard.start_game();
        loop {
            let is_serve = self.scoreboard.is_game_opening();
            let outcome = self.play_point(is_serve)?;
            if let Some(winner) = self.scoreboard.record_point(outcome.winner) {
                trace!(
                    target: "score",
                    "[M{:04}] Game to {}, games {}-{}",
                    self.id,
                    winner,
                    self.scoreboard.games.agent,
                    self.scoreboard.games.bot
                );
                return Ok(winner);
            }
        }
    }

    /// Resolves one point without touching the scoreboard
    pub fn play_point(&mut self, is_serve: bool) -> Result<PointOutcome, SimError> {
        let point = self.point_log.len() as u32 + 1;
        let outcome = Rally {
            court: &self.court,
            strategy: &mut self.strategy,
            agent: &mut self.agent,
            bot: &mut self.bot,
            rng: &mut self.rng,
            max_shots: self.max_shots,
            match_id: self.id,
            point,
        }
        .resolve(is_serve)?;
        self.point_log.push(outcome);
        Ok(outcome)
    }

    pub fn sets(&self) -> Tally {
        self.scoreboard.sets
    }

    /// Winner by sets; a match that has not been played has none
    pub fn winner(&self) -> Option<Side> {
        let sets = self.scoreboard.sets;
        match sets.agent.cmp(&sets.bot) {
            std::cmp::Ordering::Greater => Some(Side::Agent),
            std::cmp::Ordering::Less => Some(Side::Bot),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// Every point played so far, in order
    pub fn point_log(&self) -> &[PointOutcome] {
        &self.point_log
    }

    fn summary(&self, winner: Side) -> MatchSummary {
        MatchSummary {
            winner,
            sets: self.scoreboard.sets,
            set_scores: self.scoreboard.set_scores.clone(),
            points_played: self.point_log.len(),
        }
    }
}
