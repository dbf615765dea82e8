use log::warn;
use screeps::{OutOfBoundsError, RoomXY};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlanningError {
    #[error("protected tile {xy} is within range of a room exit")]
    InvalidSource { xy: RoomXY },
    #[error("min-cut did not separate the sources from exits within {phases} phases")]
    IterationLimitExceeded { phases: u16 },
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl PlanningError {
    pub fn warn(&self, description: &str) {
        warn!("{}: {}.", description, self);
    }
}

impl From<OutOfBoundsError> for PlanningError {
    fn from(value: OutOfBoundsError) -> Self {
        PlanningError::InvalidInput(format!("{}", value))
    }
}
