use crate::engine::PayoffRecord;
use pool_api::TeamId;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::BTreeMap;

/// One retained leaderboard row. Field names and nesting are the report
/// renderer's contract; it reads them verbatim.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct LeaderboardEntry {
    pub wins: u32,
    pub pct: f64,
    pub next_round: Vec<BTreeMap<TeamId, u32>>,
}

/// The ranked export: participants in payoff order with zero-share entries
/// dropped. Serialized as a JSON object keyed by participant name — rank
/// order in the object is part of the contract, so serialization walks the
/// ordered entries instead of handing the renderer an alphabetized map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Leaderboard {
    pub entries: Vec<(String, LeaderboardEntry)>,
}

impl Serialize for Leaderboard {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, entry) in &self.entries {
            map.serialize_entry(name, entry)?;
        }
        map.end()
    }
}

/// Rank the payoff records, cut everything from the first zero-share entry
/// onward, and attach the next-round frequency tables built from each
/// retained participant's won outcomes.
pub fn consolidate(
    records: &BTreeMap<String, PayoffRecord>,
    outcomes: &[Vec<TeamId>],
) -> Leaderboard {
    let mut ranked: Vec<(&String, &PayoffRecord)> = records.iter().collect();
    ranked.sort_by(|(a_name, a), (b_name, b)| {
        b.share
            .partial_cmp(&a.share)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a_name.cmp(b_name))
    });

    let entries = ranked
        .into_iter()
        .take_while(|(_, record)| record.share > 0.0)
        .map(|(name, record)| {
            let entry = LeaderboardEntry {
                wins: record.wins,
                pct: record.share,
                next_round: next_round_tables(record, outcomes),
            };
            (name.clone(), entry)
        })
        .collect();
    Leaderboard { entries }
}

/// How often each team wins each immediate-next-round slot across the
/// outcomes this participant wins. Only the first (len + 1) / 2 positions
/// of a round-major outcome belong to the next round; deeper games are
/// left to the following run.
fn next_round_tables(
    record: &PayoffRecord,
    outcomes: &[Vec<TeamId>],
) -> Vec<BTreeMap<TeamId, u32>> {
    let slots = outcomes.first().map(|o| (o.len() + 1) / 2).unwrap_or(0);
    let mut tables = vec![BTreeMap::new(); slots];
    for &index in &record.won_outcomes {
        for (slot, &team) in outcomes[index].iter().take(slots).enumerate() {
            *tables[slot].entry(team).or_insert(0) += 1;
        }
    }
    tables
}

#[cfg(test)]
mod tests {
    use super::*;

    fn teams(slots: &[u8]) -> Vec<TeamId> {
        slots.iter().map(|&n| TeamId::new(n).unwrap()).collect()
    }

    fn record(wins: u32, share: f64, won_outcomes: Vec<usize>) -> PayoffRecord {
        PayoffRecord { wins, share, won_outcomes }
    }

    fn four_team_outcomes() -> Vec<Vec<TeamId>> {
        crate::outcomes::enumerate_outcomes(&teams(&[1, 2, 3, 4]))
    }

    #[test]
    fn ranking_is_share_descending_with_name_tiebreak() {
        let mut records = BTreeMap::new();
        records.insert("carol".into(), record(2, 1.5, vec![0, 1]));
        records.insert("alice".into(), record(3, 3.0, vec![2, 3, 4]));
        records.insert("bob".into(), record(2, 1.5, vec![5, 6]));
        let board = consolidate(&records, &four_team_outcomes());

        let names: Vec<&str> = board.entries.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["alice", "bob", "carol"]);
    }

    #[test]
    fn zero_share_entries_are_cut() {
        let mut records = BTreeMap::new();
        records.insert("alice".into(), record(1, 1.0, vec![0]));
        records.insert("bob".into(), record(0, 0.0, Vec::new()));
        records.insert("carol".into(), record(0, 0.0, Vec::new()));
        let board = consolidate(&records, &four_team_outcomes());

        assert_eq!(board.entries.len(), 1);
        assert_eq!(board.entries[0].0, "alice");
    }

    #[test]
    fn next_round_tables_cover_only_the_immediate_round() {
        // Outcomes 0..4 are the four where team 01 wins its semifinal:
        // the two next-round slots see 01 four times and 03/04 twice each.
        let mut records = BTreeMap::new();
        records.insert("alice".into(), record(4, 4.0, vec![0, 1, 2, 3]));
        let board = consolidate(&records, &four_team_outcomes());

        let entry = &board.entries[0].1;
        assert_eq!(entry.next_round.len(), 2);
        assert_eq!(entry.next_round[0][&TeamId::new(1).unwrap()], 4);
        assert_eq!(entry.next_round[1][&TeamId::new(3).unwrap()], 2);
        assert_eq!(entry.next_round[1][&TeamId::new(4).unwrap()], 2);
    }

    #[test]
    fn export_keeps_rank_order_and_contract_field_names() {
        let mut records = BTreeMap::new();
        records.insert("zed".into(), record(3, 2.5, vec![0, 1, 4]));
        records.insert("amy".into(), record(1, 1.0, vec![6]));
        let board = consolidate(&records, &four_team_outcomes());

        let json = serde_json::to_string(&board).unwrap();
        // zed outranks amy despite sorting after her alphabetically.
        let zed = json.find("\"zed\"").unwrap();
        let amy = json.find("\"amy\"").unwrap();
        assert!(zed < amy);
        assert!(json.contains("\"wins\":3"));
        assert!(json.contains("\"pct\":2.5"));
        assert!(json.contains("\"next_round\""));
        assert!(json.contains("\"01\""));
    }

    #[test]
    fn decided_bracket_yields_empty_tables() {
        let mut records = BTreeMap::new();
        records.insert("alice".into(), record(1, 1.0, vec![0]));
        let board = consolidate(&records, &[Vec::new()]);
        assert!(board.entries[0].1.next_round.is_empty());
    }
}
