use pool_api::TeamId;

/// Every possible resolution of the remaining bracket, one entry per
/// decision combination in lexicographic order (first game's decision is
/// the most significant bit). Each outcome lists the winner of every
/// remaining game in round-major order, so position i of an outcome lines
/// up with position i of a trimmed pick sheet.
///
/// A decided bracket degenerates along the Cartesian-product identity:
/// one team left yields the single empty outcome, an empty field yields
/// no outcomes at all.
pub fn enumerate_outcomes(remaining: &[TeamId]) -> Vec<Vec<TeamId>> {
    if remaining.is_empty() {
        return Vec::new();
    }
    let games = remaining.len() - 1;
    let mut outcomes = Vec::new();
    for combo in 0..(1u64 << games) {
        let decisions: Vec<bool> = (0..games)
            .map(|game| (combo >> (games - 1 - game)) & 1 == 1)
            .collect();
        outcomes.push(play_out(remaining, &decisions));
    }
    outcomes
}

/// Play the bracket to completion for one decision sequence. Decision i
/// settles the i-th remaining game in round-major order: false keeps the
/// first team of the pair, true the second. Each round builds a fresh
/// carried-winners sequence; nothing is mutated in place across rounds.
fn play_out(remaining: &[TeamId], decisions: &[bool]) -> Vec<TeamId> {
    let mut outcome = Vec::with_capacity(decisions.len());
    let mut alive = remaining.to_vec();
    let mut next_decision = 0;
    while alive.len() > 1 {
        let mut carried = Vec::with_capacity(alive.len() / 2);
        for pair in alive.chunks_exact(2) {
            let winner = if decisions[next_decision] { pair[1] } else { pair[0] };
            next_decision += 1;
            outcome.push(winner);
            carried.push(winner);
        }
        alive = carried;
    }
    outcome
}
