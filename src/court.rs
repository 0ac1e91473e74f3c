use crate::error::{SimError, check_positive};
use crate::types::Position;
use crate::utils::{first_max_by_key, first_min_by_key};
use rand::Rng;

// A grid square the strategy can aim at
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub row: usize,       // Grid index along the x axis
    pub col: usize,       // Grid index along the y axis
    pub center: Position, // Center in court units
    pub size: f64,        // Side length, taken from the x-axis spacing
}

// Axis-aligned rectangle used for unaimed returns
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Zone {
    pub min: Position,
    pub max: Position,
}

impl Zone {
    /// Uniformly samples a point inside the zone (bounds inclusive)
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Position {
        Position {
            x: rng.gen_range(self.min.x..=self.max.x),
            y: rng.gen_range(self.min.y..=self.max.y),
        }
    }
}

// The playing surface partitioned into an n x n grid of target cells
#[derive(Debug, Clone)]
pub struct Court {
    pub width: f64,
    pub height: f64,
    pub grid_size: usize,
    cells: Vec<Cell>, // Row-major: index = row * grid_size + col
}

impl Court {
    pub fn new(width: f64, height: f64, grid_size: usize) -> Result<Self, SimError> {
        check_positive("court_width", width)?;
        check_positive("court_height", height)?;
        if grid_size == 0 {
            return Err(SimError::invalid("grid_size", grid_size));
        }

        let mut court = Court {
            width,
            height,
            grid_size,
            cells: Vec::with_capacity(grid_size * grid_size),
        };
        court.generate();
        log::debug!(
            target: "court",
            "Court {}x{} generated with {} cells (cell size {:.3})",
            width,
            height,
            court.cells.len(),
            width / grid_size as f64
        );
        Ok(court)
    }

    // Fills the grid; the x spacing doubles as the reported cell size
    fn generate(&mut self) {
        let n = self.grid_size;
        let cell_width = self.width / n as f64;
        let cell_height = self.height / n as f64;

        self.cells.clear();
        for row in 0..n {
            for col in 0..n {
                self.cells.push(Cell {
                    row,
                    col,
                    center: Position {
                        x: (row as f64 + 0.5) * cell_width,
                        y: (col as f64 + 0.5) * cell_height,
                    },
                    size: cell_width,
                });
            }
        }
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Returns the cell at a grid address. Callers must stay within the grid.
    pub fn cell_at(&self, row: usize, col: usize) -> Cell {
        self.cells[row * self.grid_size + col]
    }

    /// Checked lookup with signed offsets, used for neighbour perturbation
    pub fn get(&self, row: i64, col: i64) -> Option<Cell> {
        let n = self.grid_size as i64;
        if (0..n).contains(&row) && (0..n).contains(&col) {
            Some(self.cell_at(row as usize, col as usize))
        } else {
            None
        }
    }

    pub fn is_out_of_bounds(&self, pos: Position) -> bool {
        pos.x < 0.0 || pos.x > self.width || pos.y < 0.0 || pos.y > self.height
    }

    /// The cell whose center is closest to `pos` (first in row-major order on ties)
    pub fn nearest_to(&self, pos: Position) -> Cell {
        let idx = first_min_by_key(&self.cells, |cell| cell.center.distance_to(pos)).unwrap_or(0);
        self.cells[idx]
    }

    /// The cell whose center is farthest from `pos` (first in row-major order on ties)
    pub fn farthest_from(&self, pos: Position) -> Cell {
        let idx = first_max_by_key(&self.cells, |cell| cell.center.distance_to(pos)).unwrap_or(0);
        self.cells[idx]
    }

    /// Region the baseline opponent's returns land in: the low-x half of the court
    pub fn return_zone(&self) -> Zone {
        Zone {
            min: Position::new(0.0, 0.0),
            max: Position::new(self.width / 2.0, self.height),
        }
    }
}
