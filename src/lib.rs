pub mod config;
pub mod court;
pub mod error;
pub mod experiment;
pub mod logging;
pub mod matchplay;
pub mod player;
pub mod rally;
pub mod scoring;
pub mod strategy;
pub mod types;
mod utils;

pub use error::SimError;
pub use matchplay::{Match, MatchConfig, MatchSummary};
pub use types::{Position, Side};
