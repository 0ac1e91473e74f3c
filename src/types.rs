use std::fmt;

/// A point in court space (court units, origin at the agent's left baseline corner)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Position { x, y }
    }

    /// Euclidean distance to another position
    pub fn distance_to(&self, other: Position) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}

/// The two sides of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Agent, // The player under study, driven by the targeting strategy
    Bot,   // The baseline opponent with unaimed returns
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Agent => Side::Bot,
            Side::Bot => Side::Agent,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Agent => write!(f, "agent"),
            Side::Bot => write!(f, "bot"),
        }
    }
}
