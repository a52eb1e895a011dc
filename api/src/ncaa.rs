/// Wire types for the public NCAA bracket feed.
/// Endpoint: https://ncaa-api.henrygd.me/brackets/basketball-men/d1/{year}
use serde::Deserialize;

#[derive(Deserialize, Default, Debug)]
pub struct FeedResponse {
    pub championships: Vec<FeedChampionship>,
}

#[derive(Deserialize, Default, Debug)]
#[serde(rename_all = "camelCase")]
pub struct FeedChampionship {
    pub title: String,
    pub year: u16,
    pub games: Vec<FeedGame>,
}

#[derive(Deserialize, Default, Debug)]
#[serde(rename_all = "camelCase")]
pub struct FeedGame {
    /// Round-major bracket anchor: 1xx First Four, 2xx round of 64, up to
    /// 7xx for the championship game.
    pub bracket_position_id: u32,
    /// "P" scheduled, "L" live, "F" final.
    pub game_state: String,
    /// Empty pre-Selection Sunday; populated once the field is announced.
    #[serde(default)]
    pub teams: Vec<FeedTeam>,
}

#[derive(Deserialize, Default, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct FeedTeam {
    pub team_id: Option<String>,
    pub name: Option<String>,
    pub short_name: Option<String>,
    pub winner: Option<bool>,
}
