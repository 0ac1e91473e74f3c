// Scoring: margin-based counters for games and sets, plus the match tally

use crate::config;
use crate::types::Side;

/// A side wins a unit once it has at least `minimum` and leads by `margin`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarginRule {
    pub minimum: u32,
    pub margin: u32,
}

impl MarginRule {
    pub const GAME: MarginRule = MarginRule {
        minimum: config::POINTS_TO_WIN_GAME,
        margin: config::WIN_MARGIN,
    };
    pub const SET: MarginRule = MarginRule {
        minimum: config::GAMES_TO_WIN_SET,
        margin: config::WIN_MARGIN,
    };

    fn is_won_by(&self, own: u32, other: u32) -> bool {
        own >= self.minimum && own >= other + self.margin
    }
}

/// Per-side counter for one scoring unit (points in a game, games in a set, ...)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Tally {
    pub agent: u32,
    pub bot: u32,
}

impl Tally {
    pub fn new(agent: u32, bot: u32) -> Self {
        Tally { agent, bot }
    }

    pub fn award(&mut self, side: Side) {
        match side {
            Side::Agent => self.agent += 1,
            Side::Bot => self.bot += 1,
        }
    }

    pub fn get(&self, side: Side) -> u32 {
        match side {
            Side::Agent => self.agent,
            Side::Bot => self.bot,
        }
    }

    pub fn total(&self) -> u32 {
        self.agent + self.bot
    }

    pub fn reset(&mut self) {
        *self = Tally::default();
    }

    /// The side that has taken the unit under `rule`, if any
    pub fn winner(&self, rule: MarginRule) -> Option<Side> {
        if rule.is_won_by(self.agent, self.bot) {
            Some(Side::Agent)
        } else if rule.is_won_by(self.bot, self.agent) {
            Some(Side::Bot)
        } else {
            None
        }
    }

    /// The first side to reach `target` outright (no margin), used for the match
    pub fn first_to(&self, target: u32) -> Option<Side> {
        if self.agent >= target {
            Some(Side::Agent)
        } else if self.bot >= target {
            Some(Side::Bot)
        } else {
            None
        }
    }
}

/// Full scoreboard for a match in progress
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Scoreboard {
    pub points: Tally,          // Points in the current game
    pub games: Tally,           // Games in the current (or last) set
    pub sets: Tally,            // Sets in the match
    pub set_scores: Vec<Tally>, // Final game count of every completed set
}

impl Scoreboard {
    pub fn start_match(&mut self) {
        *self = Scoreboard::default();
    }

    pub fn start_set(&mut self) {
        self.games.reset();
    }

    pub fn start_game(&mut self) {
        self.points.reset();
    }

    /// First point of a game, the only one played as a serve
    pub fn is_game_opening(&self) -> bool {
        self.points.total() == 0
    }

    /// Records a point; returns the game winner once the game is decided
    pub fn record_point(&mut self, side: Side) -> Option<Side> {
        self.points.award(side);
        let winner = self.points.winner(MarginRule::GAME);
        if let Some(game_winner) = winner {
            self.games.award(game_winner);
        }
        winner
    }

    /// Checks the set after a game; returns the set winner once decided
    pub fn close_game(&mut self) -> Option<Side> {
        let winner = self.games.winner(MarginRule::SET);
        if let Some(set_winner) = winner {
            self.sets.award(set_winner);
            self.set_scores.push(self.games);
        }
        winner
    }

    pub fn match_winner(&self, best_of_sets: u32) -> Option<Side> {
        self.sets.first_to(best_of_sets)
    }
}
