use crate::scoring;
use log::debug;
use pool_api::TeamId;
use std::collections::BTreeMap;

/// Per-participant aggregate across every enumerated outcome.
///
/// `wins` and `share` are deliberately independent counters: a won outcome
/// always counts 1 toward `wins`, but only 1/k toward `share` when k
/// participants tie for the top total. Neither is derived from the other.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PayoffRecord {
    pub wins: u32,
    pub share: f64,
    /// Indices into the enumerated outcome list, for the round-breakdown
    /// tables built later.
    pub won_outcomes: Vec<usize>,
}

/// Score every participant against every outcome and accumulate winner
/// statistics.
///
/// The running maximum for an outcome starts at zero and only a strictly
/// greater total takes the lead: an outcome whose best total is zero
/// credits nobody, and ties at zero never count as a win.
pub fn tally_outcomes(
    windows: &BTreeMap<String, Vec<TeamId>>,
    baselines: &BTreeMap<String, u32>,
    outcomes: &[Vec<TeamId>],
    values: &[u32],
) -> BTreeMap<String, PayoffRecord> {
    let mut records: BTreeMap<String, PayoffRecord> = windows
        .keys()
        .map(|name| (name.clone(), PayoffRecord::default()))
        .collect();

    for (index, outcome) in outcomes.iter().enumerate() {
        let mut best = 0u32;
        let mut leaders: Vec<&str> = Vec::new();
        for (name, window) in windows {
            let baseline = baselines.get(name).copied().unwrap_or(0);
            let total = baseline + scoring::future_score(window, outcome, values);
            if total > best {
                best = total;
                leaders.clear();
                leaders.push(name);
            } else if total == best && best > 0 {
                leaders.push(name);
            }
        }

        if leaders.is_empty() {
            continue;
        }
        let split = 1.0 / leaders.len() as f64;
        for name in leaders {
            if let Some(record) = records.get_mut(name) {
                record.wins += 1;
                record.share += split;
                record.won_outcomes.push(index);
            }
        }
    }

    debug!(
        "tallied {} outcomes for {} participants",
        outcomes.len(),
        windows.len()
    );
    records
}
