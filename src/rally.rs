use crate::court::{Cell, Court};
use crate::error::SimError;
use crate::player::Player;
use crate::strategy::{ShotTarget, Strategy};
use crate::types::{Position, Side};
use rand::Rng;

/// How a point came to an end
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointEnding {
    ShotOut,    // Agent's shot misplaced off the grid
    LandedOut,  // Agent's shot landed outside the court
    Unreturned, // Bot could not get to the agent's shot
    ReturnOut,  // Bot's return landed outside the court
    Missed,     // Agent could not get to the bot's return
}

impl PointEnding {
    pub fn winner(self) -> Side {
        match self {
            PointEnding::ShotOut | PointEnding::LandedOut | PointEnding::Missed => Side::Bot,
            PointEnding::Unreturned | PointEnding::ReturnOut => Side::Agent,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointOutcome {
    pub winner: Side,
    pub ending: PointEnding,
    pub shots: u32, // Agent shots played, including the final one
    pub served: bool,
}

/// One point between the agent (attacking, strategy-driven) and the bot
pub struct Rally<'a, R: Rng + ?Sized> {
    pub court: &'a Court,
    pub strategy: &'a mut Strategy,
    pub agent: &'a mut Player,
    pub bot: &'a mut Player,
    pub rng: &'a mut R,
    pub max_shots: u32,
    pub match_id: usize,
    pub point: u32,
}

impl<R: Rng + ?Sized> Rally<'_, R> {
    /// Plays shots until the point is decided or the shot cap is hit
    pub fn resolve(self, is_serve: bool) -> Result<PointOutcome, SimError> {
        let Rally {
            court,
            strategy,
            agent,
            bot,
            rng,
            max_shots,
            match_id,
            point,
        } = self;

        let mut serving = is_serve;
        for shot in 1..=max_shots {
            let ending = Self::exchange(court, strategy, agent, bot, rng, serving);
            serving = false;

            if let Some(ending) = ending {
                let outcome = PointOutcome {
                    winner: ending.winner(),
                    ending,
                    shots: shot,
                    served: is_serve,
                };
                crate::debug_rally!(
                    match_id,
                    point,
                    "{} wins after {} shot(s): {:?}",
                    outcome.winner,
                    shot,
                    ending
                );
                return Ok(outcome);
            }
        }

        log::error!(
            target: "rally",
            "[M{:04}][P{:03}] Rally exceeded {} shots (agent reach {:.2}, bot reach {:.2}); aborting",
            match_id,
            point,
            max_shots,
            agent.reach,
            bot.reach
        );
        Err(SimError::RallyAborted { shots: max_shots })
    }

    // One agent shot and, if it is returned, the bot's reply.
    // Returns the ending if the point is over.
    fn exchange(
        court: &Court,
        strategy: &mut Strategy,
        agent: &mut Player,
        bot: &mut Player,
        rng: &mut R,
        is_serve: bool,
    ) -> Option<PointEnding> {
        let cell = match strategy.choose_target(agent, bot, court, is_serve, rng) {
            ShotTarget::Landed(cell) => cell,
            ShotTarget::Out => return Some(PointEnding::ShotOut),
        };

        let ball = landing_point(&cell, rng);
        if court.is_out_of_bounds(ball) {
            return Some(PointEnding::LandedOut);
        }

        bot.move_toward(ball);
        if !bot.can_return(ball) {
            return Some(PointEnding::Unreturned);
        }

        let reply = court.return_zone().sample(rng);
        if court.is_out_of_bounds(reply) {
            return Some(PointEnding::ReturnOut);
        }

        agent.move_toward(reply);
        if !agent.can_reach(reply) {
            return Some(PointEnding::Missed);
        }
        None
    }
}

/// Where a shot aimed at `cell` actually lands. The offset on both axes is
/// bounded by the cell's size, which comes from the x spacing.
pub fn landing_point<R: Rng + ?Sized>(cell: &Cell, rng: &mut R) -> Position {
    let half = cell.size / 2.0;
    Position {
        x: cell.center.x + rng.gen_range(-half..=half),
        y: cell.center.y + rng.gen_range(-half..=half),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::Facing;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    struct Fixture {
        court: Court,
        strategy: Strategy,
        agent: Player,
        bot: Player,
        rng: StdRng,
    }

    impl Fixture {
        fn new(
            agent_reach: f64,
            agent_speed: f64,
            bot_reach: f64,
            bot_speed: f64,
            error_prob: f64,
        ) -> Self {
            let agent_start = Position::new(10.0, 0.0);
            let bot_start = Position::new(10.0, 10.0);
            Fixture {
                court: Court::new(20.0, 10.0, 10).unwrap(),
                strategy: Strategy::new(10, error_prob),
                agent: Player::new(agent_reach, agent_speed, agent_start, Facing::North).unwrap(),
                bot: Player::new(bot_reach, bot_speed, bot_start, Facing::South).unwrap(),
                rng: StdRng::seed_from_u64(42),
            }
        }

        fn play(&mut self, is_serve: bool, max_shots: u32) -> Result<PointOutcome, SimError> {
            Rally {
                court: &self.court,
                strategy: &mut self.strategy,
                agent: &mut self.agent,
                bot: &mut self.bot,
                rng: &mut self.rng,
                max_shots,
                match_id: 0,
                point: 1,
            }
            .resolve(is_serve)
        }
    }

    #[test]
    fn test_ending_winners() {
        assert_eq!(PointEnding::ShotOut.winner(), Side::Bot);
        assert_eq!(PointEnding::LandedOut.winner(), Side::Bot);
        assert_eq!(PointEnding::Missed.winner(), Side::Bot);
        assert_eq!(PointEnding::Unreturned.winner(), Side::Agent);
        assert_eq!(PointEnding::ReturnOut.winner(), Side::Agent);
    }

    #[test]
    fn test_immobile_bot_never_returns() {
        // Bot with no reach and no speed only returns balls landing exactly on it
        let mut fixture = Fixture::new(100.0, 3.0, 0.0, 0.0, 0.0);
        for _ in 0..50 {
            let outcome = fixture.play(false, 100).unwrap();
            match outcome.ending {
                PointEnding::Unreturned => assert_eq!(outcome.winner, Side::Agent),
                PointEnding::LandedOut => assert_eq!(outcome.winner, Side::Bot),
                other => panic!("unexpected ending {:?}", other),
            }
            assert_eq!(outcome.shots, 1);
        }
    }

    #[test]
    fn test_helpless_agent_loses() {
        // Bot reaches everything, agent never reaches a return more than 0 away
        let mut fixture = Fixture::new(0.0, 0.0, 100.0, 100.0, 0.0);
        for _ in 0..50 {
            let outcome = fixture.play(false, 100).unwrap();
            assert_eq!(outcome.winner, Side::Bot);
        }
    }

    #[test]
    fn test_serve_arms_trap_during_point() {
        let mut fixture = Fixture::new(100.0, 100.0, 100.0, 100.0, 0.0);
        let _ = fixture.play(true, 1);
        // Either the serve ended the point or the shot cap stopped it after one shot;
        // the trap was armed by the serve and is still pending
        assert!(matches!(
            fixture.strategy.trap(),
            crate::strategy::TrapState::Armed(_)
        ));
    }

    #[test]
    fn test_shot_cap_aborts() {
        // Both players cover the whole court and never err; only landing noise can end it
        let mut fixture = Fixture::new(100.0, 100.0, 100.0, 100.0, 0.0);
        let mut aborted = 0;
        for _ in 0..20 {
            match fixture.play(false, 1) {
                Err(SimError::RallyAborted { shots }) => {
                    assert_eq!(shots, 1);
                    aborted += 1;
                }
                Ok(outcome) => assert_eq!(outcome.shots, 1),
                Err(other) => panic!("unexpected error {other}"),
            }
        }
        assert!(aborted > 0);
    }

    #[test]
    fn test_players_move_during_rally() {
        // Full coverage and a one-shot cap: a returned ball always ends in RallyAborted
        let mut fixture = Fixture::new(100.0, 100.0, 100.0, 100.0, 0.0);
        let mut returned = false;
        for _ in 0..50 {
            let agent_before = fixture.agent.position;
            let bot_before = fixture.bot.position;
            if let Err(SimError::RallyAborted { .. }) = fixture.play(false, 1) {
                assert_ne!(fixture.bot.position, bot_before);
                assert_ne!(fixture.agent.position, agent_before);
                returned = true;
                break;
            }
        }
        assert!(returned);
    }

    #[test]
    fn test_landing_offset_uses_cell_size_on_both_axes() {
        let court = Court::new(20.0, 10.0, 10).unwrap();
        let cell = court.cell_at(4, 5);
        let half = cell.size / 2.0;
        let cell_height = 10.0 / 10.0;
        let mut rng = StdRng::seed_from_u64(3);

        let mut beyond_height = false;
        for _ in 0..1000 {
            let ball = landing_point(&cell, &mut rng);
            let dx = (ball.x - cell.center.x).abs();
            let dy = (ball.y - cell.center.y).abs();
            assert!(dx <= half, "dx {dx} exceeds {half}");
            assert!(dy <= half, "dy {dy} exceeds {half}");
            beyond_height |= dy > cell_height / 2.0;
        }
        // y noise reaches past the cell's own height
        assert!(beyond_height);
    }
}
