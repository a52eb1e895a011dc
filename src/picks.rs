use crate::error::PoolError;
use pool_api::TeamId;
use std::collections::BTreeMap;

/// The slice of a full pick sheet that covers still-undecided games: the
/// last `games_left` entries, positionally aligned with enumerated
/// outcomes. A sheet too short for the window is corrupted input and
/// aborts the run.
pub fn pick_window<'a>(
    participant: &str,
    sheet: &'a [TeamId],
    games_left: usize,
) -> Result<&'a [TeamId], PoolError> {
    if sheet.len() < games_left {
        return Err(PoolError::MalformedPickData {
            participant: participant.to_owned(),
            have: sheet.len(),
            need: games_left,
        });
    }
    Ok(&sheet[sheet.len() - games_left..])
}

/// How deep a sheet predicts each team to go — the number of wins implied
/// by how often the team appears across the full sheet.
pub fn predicted_wins(sheet: &[TeamId]) -> BTreeMap<TeamId, u8> {
    let mut wins = BTreeMap::new();
    for &team in sheet {
        *wins.entry(team).or_insert(0u8) += 1;
    }
    wins
}
