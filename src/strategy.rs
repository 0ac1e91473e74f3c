//! Target selection for the agent's shots.
//!
//! The strategy scores every cell by how far it sits from the defender,
//! discounted by how comfortably the attacker could play to it. Serves aim
//! close to the defender instead and arm a trap: the next shot goes to the
//! cell farthest from where the serve was aimed.

use crate::config;
use crate::court::{Cell, Court};
use crate::player::Player;
use crate::types::Position;
use crate::utils::first_max_by_key;
use rand::Rng;

// Grid offsets for a misplaced shot: up, left, down, right
const NEIGHBOR_OFFSETS: [(i64, i64); 4] = [(-1, 0), (0, -1), (1, 0), (0, 1)];

/// Where a chosen shot is headed
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShotTarget {
    Landed(Cell),
    Out, // Misplaced off the grid; the point ends before the ball lands
}

/// Serve-triggered follow-up state
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum TrapState {
    #[default]
    Idle,
    Armed(Position), // Center of the cell the serve was aimed at
}

#[derive(Debug, Clone)]
pub struct Strategy {
    pub grid_size: usize,
    pub error_prob: f64,
    trap: TrapState,
}

impl Strategy {
    pub fn new(grid_size: usize, error_prob: f64) -> Self {
        Strategy {
            grid_size,
            error_prob,
            trap: TrapState::Idle,
        }
    }

    pub fn trap(&self) -> TrapState {
        self.trap
    }

    /// Picks the cell the attacker aims at for the next shot
    pub fn choose_target<R: Rng + ?Sized>(
        &mut self,
        attacker: &Player,
        defender: &Player,
        court: &Court,
        is_serve: bool,
        rng: &mut R,
    ) -> ShotTarget {
        if let TrapState::Armed(serve_target) = self.trap {
            self.trap = TrapState::Idle;
            let cell = court.farthest_from(serve_target);
            crate::debug_strategy!(
                "Trap sprung: serve aimed at {}, playing cell ({}, {})",
                serve_target,
                cell.row,
                cell.col
            );
            return ShotTarget::Landed(cell);
        }

        let best = Self::best_cell(attacker, defender, court);

        if is_serve {
            let serve_cell = court.nearest_to(defender.position);
            self.trap = TrapState::Armed(serve_cell.center);
            crate::debug_strategy!(
                "Serve at cell ({}, {}) next to defender {} instead of ({}, {}); trap armed",
                serve_cell.row,
                serve_cell.col,
                defender.position,
                best.row,
                best.col
            );
            return ShotTarget::Landed(serve_cell);
        }

        self.apply_placement_error(best, court, rng)
    }

    /// Heuristic score for aiming at `cell`
    pub fn score(cell: &Cell, attacker: &Player, defender: &Player) -> f64 {
        let defender_dist = cell.center.distance_to(defender.position);
        let attacker_dist = cell.center.distance_to(attacker.position);
        let comfort = (attacker.reach / (attacker_dist + config::REACH_DISTANCE_EPSILON)).min(1.0);
        defender_dist * comfort
    }

    fn best_cell(attacker: &Player, defender: &Player, court: &Court) -> Cell {
        let cells = court.cells();
        let idx =
            first_max_by_key(cells, |cell| Self::score(cell, attacker, defender)).unwrap_or(0);
        cells[idx]
    }

    fn apply_placement_error<R: Rng + ?Sized>(
        &self,
        intended: Cell,
        court: &Court,
        rng: &mut R,
    ) -> ShotTarget {
        if rng.gen_range(0.0..1.0) >= self.error_prob {
            return ShotTarget::Landed(intended);
        }

        let (d_row, d_col) = NEIGHBOR_OFFSETS[rng.gen_range(0..NEIGHBOR_OFFSETS.len())];
        match court.get(intended.row as i64 + d_row, intended.col as i64 + d_col) {
            Some(cell) => {
                crate::debug_strategy!(
                    "Placement error: ({}, {}) drifted to ({}, {})",
                    intended.row,
                    intended.col,
                    cell.row,
                    cell.col
                );
                ShotTarget::Landed(cell)
            }
            None => {
                crate::debug_strategy!(
                    "Placement error: ({}, {}) drifted off the grid",
                    intended.row,
                    intended.col
                );
                ShotTarget::Out
            }
        }
    }
}
