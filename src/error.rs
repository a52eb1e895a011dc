use std::fmt;

/// Fatal input conditions. This is an offline batch tool: malformed input
/// aborts the run instead of degrading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PoolError {
    /// A participant's sheet is shorter than the remaining-game window.
    MalformedPickData { participant: String, have: usize, need: usize },
    /// The alive-team count is neither decided (one or zero teams) nor a
    /// power of two.
    InconsistentBracketSize { remaining: usize },
    /// The team board does not cover the full 64-slot field.
    WrongBoardSize { slots: usize },
}

impl fmt::Display for PoolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PoolError::MalformedPickData { participant, have, need } => {
                write!(f, "malformed pick data for {participant}: {have} picks, {need} needed")
            }
            PoolError::InconsistentBracketSize { remaining } => {
                write!(f, "{remaining} teams remain; a single-elimination bracket needs a power of two")
            }
            PoolError::WrongBoardSize { slots } => {
                write!(f, "team board covers {slots} slots, expected 64")
            }
        }
    }
}

impl std::error::Error for PoolError {}
