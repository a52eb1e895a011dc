pub mod client;
pub mod ncaa;
pub mod snapshot;

use crate::client::{ApiResult, FeedClient};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Domain types — clean model, independent of the bracket feed wire format
// ---------------------------------------------------------------------------

/// Number of slots in a standard single-elimination field.
pub const FIELD_SIZE: usize = 64;

/// Fixed bracket-position index, 1 through 64, stable for the tournament's
/// duration. Formats and serializes as the zero-padded two-digit string
/// ("01".."64") used on the wire, in pick files, and in the export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TeamId(u8);

impl TeamId {
    pub fn new(slot: u8) -> Option<Self> {
        (1..=FIELD_SIZE as u8).contains(&slot).then_some(Self(slot))
    }

    pub fn slot(self) -> u8 {
        self.0
    }
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidTeamId(pub String);

impl fmt::Display for InvalidTeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid team index '{}': expected 01..64", self.0)
    }
}

impl std::error::Error for InvalidTeamId {}

impl FromStr for TeamId {
    type Err = InvalidTeamId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u8>()
            .ok()
            .and_then(TeamId::new)
            .ok_or_else(|| InvalidTeamId(s.to_owned()))
    }
}

impl Serialize for TeamId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TeamId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(D::Error::custom)
    }
}

/// One team's live status as read from the scoreboard.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamRecord {
    pub name: String,   // "Duke Blue Devils"
    pub abbrev: String, // "Duke"
    pub out: bool,
    pub wins: u8,
}

/// The full 64-slot field in bracket order.
pub type TeamBoard = BTreeMap<TeamId, TeamRecord>;

/// Every participant's full round-major prediction list (63 slots for a
/// 64-team field), keyed by participant name.
pub type PickSheets = BTreeMap<String, Vec<TeamId>>;

// ---------------------------------------------------------------------------
// Capability seam
// ---------------------------------------------------------------------------

/// What the scoring pipeline needs from the outside world. The engine
/// consumes this trait and never touches transport details.
pub trait PoolDataSource {
    fn fetch_team_board(&self) -> ApiResult<TeamBoard>;
    fn fetch_pick_sheets(&self) -> ApiResult<PickSheets>;
}

/// Production source: team board from the live feed (or the snapshot file
/// named by `MMPOOL_BRACKET_JSON`), pick sheets from the persisted pool file.
pub struct PoolSource {
    client: FeedClient,
    picks_path: PathBuf,
}

impl PoolSource {
    pub fn new(client: FeedClient, picks_path: impl Into<PathBuf>) -> Self {
        Self { client, picks_path: picks_path.into() }
    }
}

impl PoolDataSource for PoolSource {
    fn fetch_team_board(&self) -> ApiResult<TeamBoard> {
        self.client.fetch_board()
    }

    fn fetch_pick_sheets(&self) -> ApiResult<PickSheets> {
        snapshot::load_picks(&self.picks_path)
    }
}
