use crate::picks;
use pool_api::{PickSheets, TeamBoard, TeamId};
use std::collections::BTreeMap;

/// Cumulative value of a team's first n tournament wins: successive rounds
/// are worth 10, 20, 40, 80, 160 and 320 points.
pub const CUMULATIVE_WIN_POINTS: [u32; 7] = [0, 10, 30, 70, 150, 310, 630];

/// Per-game value of every game in a full 15-game future, round-major:
/// eight games at 40, four at 80, two at 160 and the final at 320. With
/// fewer games left, only the matching tail applies.
pub const FUTURE_GAME_POINTS: [u32; 15] =
    [40, 40, 40, 40, 40, 40, 40, 40, 80, 80, 80, 80, 160, 160, 320];

/// The per-game values for the remaining games — the tail of the full
/// table.
pub fn future_points(games_left: usize) -> &'static [u32] {
    let start = FUTURE_GAME_POINTS.len().saturating_sub(games_left);
    &FUTURE_GAME_POINTS[start..]
}

/// Points a trimmed pick sheet would add if this outcome came true: the
/// value of every position where the pick names the outcome's winner.
pub fn future_score(window: &[TeamId], outcome: &[TeamId], values: &[u32]) -> u32 {
    window
        .iter()
        .zip(outcome)
        .zip(values)
        .filter(|((pick, winner), _)| pick == winner)
        .map(|(_, &value)| value)
        .sum()
}

/// Points each participant has already locked in from decided games. A
/// team's actual wins only pay out as deep as the sheet predicted it to
/// go; under-prediction forfeits the later rounds.
pub fn baseline_scores(sheets: &PickSheets, board: &TeamBoard) -> BTreeMap<String, u32> {
    sheets
        .iter()
        .map(|(name, sheet)| {
            let predicted = picks::predicted_wins(sheet);
            let score = board
                .iter()
                .map(|(id, record)| {
                    let paid = record.wins.min(predicted.get(id).copied().unwrap_or(0));
                    CUMULATIVE_WIN_POINTS[paid as usize]
                })
                .sum();
            (name.clone(), score)
        })
        .collect()
}
