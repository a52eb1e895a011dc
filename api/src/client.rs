use crate::ncaa::{FeedChampionship, FeedGame, FeedResponse};
use crate::{FIELD_SIZE, TeamBoard, TeamId, TeamRecord};
use chrono::{DateTime, Datelike, Utc};
use reqwest::blocking::Client;
use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

pub type ApiResult<T> = Result<T, ApiError>;

const NCAA_FEED: &str = "https://ncaa-api.henrygd.me";
/// Local wire-format snapshot override — skips the network entirely.
pub const BRACKET_SNAPSHOT_ENV: &str = "MMPOOL_BRACKET_JSON";

/// First Four games live in the 1xx bracket positions; the round of 64
/// starts at 2xx. Play-in results never count toward wins or eliminations.
const FIRST_ROUND: u32 = 2;

/// Bracket feed client backed by the public NCAA endpoints.
#[derive(Debug, Clone)]
pub struct FeedClient {
    client: Client,
    timeout: Duration,
    base_url: String,
    year: u16,
}

impl Default for FeedClient {
    fn default() -> Self {
        Self {
            client: Client::builder()
                .user_agent("mmpool/0.1 (pick pool calculator)")
                .build()
                .unwrap_or_default(),
            timeout: Duration::from_secs(10),
            base_url: NCAA_FEED.to_owned(),
            year: season_tournament_year(Utc::now()),
        }
    }
}

#[derive(Debug)]
pub enum ApiError {
    Network(reqwest::Error, String),
    Api(reqwest::Error, String),
    Parsing(reqwest::Error, String),
    NotFound(String),
    Other(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(e, url) => write!(f, "Network error for {url}: {e}"),
            ApiError::Api(e, url) => write!(f, "API error for {url}: {e}"),
            ApiError::Parsing(e, url) => write!(f, "Parse error for {url}: {e}"),
            ApiError::NotFound(msg) => write!(f, "Not found: {msg}"),
            ApiError::Other(msg) => write!(f, "Error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl FeedClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Client pinned to a specific tournament year instead of the current
    /// season.
    pub fn for_year(year: u16) -> Self {
        Self { year, ..Self::default() }
    }

    /// Fetch the tournament field and reduce it to the 64-slot team board.
    ///
    /// When `MMPOOL_BRACKET_JSON` names a local wire-format snapshot, that
    /// file is loaded instead of the network — same JSON, same mapping path.
    pub fn fetch_board(&self) -> ApiResult<TeamBoard> {
        if let Ok(path) = std::env::var(BRACKET_SNAPSHOT_ENV)
            && !path.trim().is_empty()
        {
            return crate::snapshot::load_board(&path);
        }

        let url = format!("{}/brackets/basketball-men/d1/{}", self.base_url, self.year);
        let raw: FeedResponse = self.get(&url)?;
        let champ = raw
            .championships
            .into_iter()
            .next()
            .ok_or_else(|| ApiError::NotFound(format!("no championship data for {}", self.year)))?;
        map_championship_board(&champ)
    }

    fn get<T: serde::de::DeserializeOwned>(&self, url: &str) -> ApiResult<T> {
        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .map_err(|e| ApiError::Network(e, url.to_owned()))?
            .error_for_status()
            .map_err(|e| ApiError::Api(e, url.to_owned()))?;
        response
            .json::<T>()
            .map_err(|e| ApiError::Parsing(e, url.to_owned()))
    }
}

fn season_tournament_year(now: DateTime<Utc>) -> u16 {
    // The championship year tracks the season: Nov/Dec queries target the
    // next calendar year.
    let year = if now.month() >= 11 { now.year() + 1 } else { now.year() };
    year as u16
}

// ---------------------------------------------------------------------------
// Mapping: feed wire types → 64-slot team board
// ---------------------------------------------------------------------------

/// Reduce a feed championship to the fixed 64-slot board.
///
/// Slot assignment follows the round-of-64 games in bracket-position order:
/// the first opener fills slots 01/02, the next 03/04, and so on. A side
/// that is still TBD keeps its slot as an empty record so positions stay
/// stable. Wins and eliminations come from finished games of the main
/// bracket only.
pub(crate) fn map_championship_board(champ: &FeedChampionship) -> ApiResult<TeamBoard> {
    let mut openers: Vec<&FeedGame> = champ
        .games
        .iter()
        .filter(|g| round_of(g) == FIRST_ROUND)
        .collect();
    openers.sort_by_key(|g| g.bracket_position_id);

    let mut board = TeamBoard::new();
    let mut slot_of: HashMap<&str, TeamId> = HashMap::new();
    let mut next_slot: u8 = 1;

    for game in openers {
        for side in 0..2 {
            let id = TeamId::new(next_slot).ok_or_else(|| {
                ApiError::Other(format!(
                    "feed lists more than {FIELD_SIZE} first-round teams"
                ))
            })?;
            next_slot += 1;

            let Some(team) = game.teams.get(side) else {
                board.insert(id, TeamRecord::default());
                continue;
            };
            let name = team.name.clone().unwrap_or_default();
            let abbrev = team.short_name.clone().unwrap_or_else(|| name.clone());
            if let Some(feed_id) = team.team_id.as_deref() {
                slot_of.insert(feed_id, id);
            }
            board.insert(id, TeamRecord { name, abbrev, out: false, wins: 0 });
        }
    }

    for game in &champ.games {
        if round_of(game) < FIRST_ROUND || game.game_state != "F" {
            continue;
        }
        for team in &game.teams {
            let Some(feed_id) = team.team_id.as_deref() else { continue };
            let Some(&slot) = slot_of.get(feed_id) else { continue };
            if let Some(record) = board.get_mut(&slot) {
                match team.winner {
                    Some(true) => record.wins += 1,
                    Some(false) => record.out = true,
                    None => {}
                }
            }
        }
    }

    Ok(board)
}

fn round_of(game: &FeedGame) -> u32 {
    game.bracket_position_id / 100
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ncaa::FeedTeam;
    use chrono::TimeZone;

    fn feed_team(id: &str, winner: Option<bool>) -> FeedTeam {
        FeedTeam {
            team_id: Some(id.to_owned()),
            name: Some(format!("Team {id}")),
            short_name: Some(id.to_uppercase()),
            winner,
        }
    }

    fn feed_game(position: u32, state: &str, teams: Vec<FeedTeam>) -> FeedGame {
        FeedGame {
            bracket_position_id: position,
            game_state: state.to_owned(),
            teams,
        }
    }

    /// Four-team field: openers at 2xx, a finished semifinal at 3xx, and a
    /// First Four game that must not affect anything.
    fn small_championship() -> FeedChampionship {
        FeedChampionship {
            title: "Test Championship".into(),
            year: 2026,
            games: vec![
                feed_game(101, "F", vec![feed_team("playin", Some(true)), feed_team("a", Some(false))]),
                feed_game(202, "F", vec![feed_team("c", Some(true)), feed_team("d", Some(false))]),
                feed_game(201, "F", vec![feed_team("a", Some(true)), feed_team("b", Some(false))]),
                feed_game(301, "L", vec![feed_team("a", None), feed_team("c", None)]),
            ],
        }
    }

    #[test]
    fn slots_follow_opener_position_order() {
        let board = map_championship_board(&small_championship()).unwrap();
        assert_eq!(board[&TeamId::new(1).unwrap()].name, "Team a");
        assert_eq!(board[&TeamId::new(2).unwrap()].name, "Team b");
        assert_eq!(board[&TeamId::new(3).unwrap()].name, "Team c");
        assert_eq!(board[&TeamId::new(4).unwrap()].name, "Team d");
    }

    #[test]
    fn finished_games_set_wins_and_eliminations() {
        let board = map_championship_board(&small_championship()).unwrap();
        let a = &board[&TeamId::new(1).unwrap()];
        let b = &board[&TeamId::new(2).unwrap()];
        assert_eq!(a.wins, 1);
        assert!(!a.out);
        assert_eq!(b.wins, 0);
        assert!(b.out);
    }

    #[test]
    fn play_in_and_live_games_do_not_count() {
        let board = map_championship_board(&small_championship()).unwrap();
        // "a" lost its play-in game and its semifinal is still live: the
        // only counted result is the finished opener.
        let a = &board[&TeamId::new(1).unwrap()];
        assert_eq!(a.wins, 1);
        assert!(!a.out);
    }

    #[test]
    fn tbd_sides_keep_their_slots() {
        let champ = FeedChampionship {
            title: String::new(),
            year: 2026,
            games: vec![
                feed_game(201, "P", vec![feed_team("a", None)]),
                feed_game(202, "P", vec![]),
            ],
        };
        let board = map_championship_board(&champ).unwrap();
        assert_eq!(board.len(), 4);
        assert_eq!(board[&TeamId::new(1).unwrap()].name, "Team a");
        assert_eq!(board[&TeamId::new(2).unwrap()], TeamRecord::default());
    }

    #[test]
    fn season_year_uses_current_year_before_november() {
        let dt = Utc.with_ymd_and_hms(2026, 2, 24, 12, 0, 0).unwrap();
        assert_eq!(season_tournament_year(dt), 2026);
    }

    #[test]
    fn season_year_rolls_forward_in_november_and_december() {
        let nov = Utc.with_ymd_and_hms(2026, 11, 1, 0, 0, 0).unwrap();
        let dec = Utc.with_ymd_and_hms(2026, 12, 31, 23, 59, 59).unwrap();
        assert_eq!(season_tournament_year(nov), 2027);
        assert_eq!(season_tournament_year(dec), 2027);
    }

    #[test]
    fn fetch_board_maps_a_served_feed() {
        let mut server = mockito::Server::new();
        let body = r#"{
            "championships": [{
                "title": "Championship",
                "year": 2026,
                "games": [
                    {"bracketPositionId": 201, "gameState": "F", "teams": [
                        {"teamId": "a", "name": "Team a", "shortName": "A", "winner": true},
                        {"teamId": "b", "name": "Team b", "shortName": "B", "winner": false}
                    ]}
                ]
            }]
        }"#;
        let mock = server
            .mock("GET", "/brackets/basketball-men/d1/2026")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create();

        let client = FeedClient {
            base_url: server.url(),
            year: 2026,
            ..FeedClient::default()
        };
        let board = client.fetch_board().unwrap();

        mock.assert();
        assert_eq!(board.len(), 2);
        assert_eq!(board[&TeamId::new(1).unwrap()].wins, 1);
        assert!(board[&TeamId::new(2).unwrap()].out);
    }
}
