use crate::error::PoolError;
use log::{debug, info};
use pool_api::{FIELD_SIZE, TeamBoard, TeamId};

/// Force the board back to the end of a specific round instead of the
/// detected one.
const ROUND_LEVEL_ENV: &str = "MMPOOL_ROUND_LEVEL";

/// A champion has won every round there is.
const MAX_WINS: u8 = 6;

/// Bracket state at a round boundary: who is still alive, in bracket
/// order, and how much tournament is left to play.
#[derive(Debug, Clone, PartialEq)]
pub struct BracketState {
    pub board: TeamBoard,
    pub remaining: Vec<TeamId>,
}

impl BracketState {
    /// Derive the state from a raw team board. A partially-played round is
    /// rewound to the last completed round boundary so the alive set keeps
    /// the single-elimination power-of-two shape.
    pub fn resolve(mut board: TeamBoard) -> Result<Self, PoolError> {
        if board.len() != FIELD_SIZE {
            return Err(PoolError::WrongBoardSize { slots: board.len() });
        }

        let round = match round_level_override() {
            Some(level) => {
                debug!("round level forced to {level} via {ROUND_LEVEL_ENV}");
                level
            }
            None => completed_rounds(&board),
        };
        rewind_to_round(&mut board, round);

        let remaining: Vec<TeamId> = board
            .iter()
            .filter(|(_, record)| !record.out)
            .map(|(id, _)| *id)
            .collect();
        if remaining.len() > 1 && !remaining.len().is_power_of_two() {
            return Err(PoolError::InconsistentBracketSize { remaining: remaining.len() });
        }

        info!("{} teams alive at the end of round {round}", remaining.len());
        Ok(Self { board, remaining })
    }

    /// Games still to be played to reduce the alive set to one champion.
    pub fn games_left(&self) -> usize {
        self.remaining.len().saturating_sub(1)
    }
}

fn round_level_override() -> Option<u8> {
    std::env::var(ROUND_LEVEL_ENV).ok()?.trim().parse().ok()
}

/// The last round every surviving team has finished — the minimum win
/// count among teams not yet eliminated.
fn completed_rounds(board: &TeamBoard) -> u8 {
    board
        .values()
        .filter(|record| !record.out)
        .map(|record| record.wins)
        .min()
        .unwrap_or(MAX_WINS)
}

/// Rewind the board to the end of the given round: teams that reached it
/// are revived and their win counts are capped at it.
fn rewind_to_round(board: &mut TeamBoard, round: u8) {
    for record in board.values_mut() {
        if record.wins >= round {
            record.wins = round;
            record.out = false;
        }
    }
}
