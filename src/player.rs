use crate::error::{SimError, check_non_negative};
use crate::types::Position;
use crate::utils::lerp_position;

// Direction a player faces across the net, along the y axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    North, // Baseline at low y, facing +y
    South, // Baseline at high y, facing -y
}

impl Facing {
    fn sign(self) -> f64 {
        match self {
            Facing::North => 1.0,
            Facing::South => -1.0,
        }
    }
}

// A player on the court
#[derive(Debug, Clone)]
pub struct Player {
    pub position: Position,
    pub reach: f64,      // Radius within which a ball can be hit
    pub speed: f64,      // Maximum distance covered per shot
    pub baseline_y: f64, // y of the player's own baseline
    pub facing: Facing,
}

impl Player {
    pub fn new(reach: f64, speed: f64, start: Position, facing: Facing) -> Result<Self, SimError> {
        Ok(Player {
            position: start,
            reach: check_non_negative("reach", reach)?,
            speed: check_non_negative("speed", speed)?,
            baseline_y: start.y,
            facing,
        })
    }

    /// True if `target` lies within reach of the current position
    pub fn can_reach(&self, target: Position) -> bool {
        self.position.distance_to(target) <= self.reach
    }

    /// Defending variant of `can_reach`: a ball behind the player's own baseline is unreturnable
    pub fn can_return(&self, target: Position) -> bool {
        self.depth_of(target) >= 0.0 && self.can_reach(target)
    }

    /// Signed distance of `target` in front of this player's baseline
    pub fn depth_of(&self, target: Position) -> f64 {
        (target.y - self.baseline_y) * self.facing.sign()
    }

    /// Moves toward `target`, covering at most `speed` and never overshooting
    pub fn move_toward(&mut self, target: Position) {
        let dist = self.position.distance_to(target);
        if dist <= self.speed {
            self.position = target;
        } else {
            self.position = lerp_position(self.position, target, self.speed / dist);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    fn player_at(x: f64, y: f64, reach: f64, speed: f64) -> Player {
        Player::new(reach, speed, Position::new(x, y), Facing::North).unwrap()
    }

    #[test]
    fn test_can_reach() {
        let player = player_at(0.0, 0.0, 2.0, 1.0);
        assert!(player.can_reach(Position::new(2.0, 0.0)));
        assert!(player.can_reach(Position::new(1.0, 1.0)));
        assert!(!player.can_reach(Position::new(2.0, 0.5)));
    }

    #[test]
    fn test_zero_reach_only_hits_own_spot() {
        let player = player_at(3.0, 4.0, 0.0, 1.0);
        assert!(player.can_reach(Position::new(3.0, 4.0)));
        assert!(!player.can_reach(Position::new(3.0, 4.001)));
    }

    #[test]
    fn test_can_return_rejects_balls_behind_baseline() {
        let south = Player::new(5.0, 3.0, Position::new(10.0, 10.0), Facing::South).unwrap();
        assert!(south.can_return(Position::new(10.0, 8.0)));
        assert!(!south.can_return(Position::new(10.0, 10.5)));

        let north = player_at(10.0, 0.0, 5.0, 3.0);
        assert!(north.can_return(Position::new(11.0, 1.0)));
        assert!(!north.can_return(Position::new(11.0, -0.5)));
        // Still bounded by reach
        assert!(!north.can_return(Position::new(10.0, 6.0)));
    }

    #[test]
    fn test_move_toward_bounded() {
        let mut player = player_at(0.0, 0.0, 1.0, 3.0);
        let target = Position::new(10.0, 0.0);
        player.move_toward(target);
        assert_approx_eq!(player.position.x, 3.0);
        assert_approx_eq!(player.position.y, 0.0);
        assert_approx_eq!(player.position.distance_to(target), 7.0);
    }

    #[test]
    fn test_move_toward_distance_shrinks_by_speed() {
        let start = Position::new(1.0, 2.0);
        let targets = [
            Position::new(7.0, 10.0),
            Position::new(-4.0, 2.0),
            Position::new(1.5, 1.5),
            Position::new(1.0, 2.0),
        ];
        for target in targets {
            let mut player = player_at(start.x, start.y, 1.0, 2.5);
            let before = start.distance_to(target);
            player.move_toward(target);
            let after = player.position.distance_to(target);
            assert_approx_eq!(after, (before - 2.5).max(0.0), 1e-9);
        }
    }

    #[test]
    fn test_move_exact_speed_snaps_to_target() {
        let mut player = player_at(0.0, 0.0, 1.0, 5.0);
        let target = Position::new(3.0, 4.0);
        player.move_toward(target);
        assert_eq!(player.position, target);
    }

    #[test]
    fn test_zero_speed_stays_put() {
        let mut player = player_at(2.0, 2.0, 1.0, 0.0);
        player.move_toward(Position::new(8.0, 8.0));
        assert_eq!(player.position, Position::new(2.0, 2.0));
    }

    #[test]
    fn test_rejects_negative_attributes() {
        assert!(Player::new(-1.0, 1.0, Position::default(), Facing::North).is_err());
        assert!(Player::new(1.0, f64::NAN, Position::default(), Facing::North).is_err());
        assert!(Player::new(0.0, 0.0, Position::default(), Facing::North).is_ok());
    }
}
