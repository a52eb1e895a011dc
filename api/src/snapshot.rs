//! File-backed sources: an offline bracket snapshot in the feed's wire
//! format, and the persisted pool pick sheets.

use crate::client::{ApiError, ApiResult, map_championship_board};
use crate::ncaa::FeedResponse;
use crate::{PickSheets, TeamBoard, TeamId};
use std::collections::BTreeMap;
use std::path::Path;

/// Load a bracket snapshot — the same JSON the feed serves — from disk.
pub fn load_board(path: impl AsRef<Path>) -> ApiResult<TeamBoard> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .map_err(|e| ApiError::NotFound(format!("could not read {}: {e}", path.display())))?;
    let raw: FeedResponse = serde_json::from_str(&content)
        .map_err(|e| ApiError::NotFound(format!("invalid bracket json at {}: {e}", path.display())))?;
    let champ = raw
        .championships
        .into_iter()
        .next()
        .ok_or_else(|| ApiError::NotFound(format!("no championship data in {}", path.display())))?;
    map_championship_board(&champ)
}

/// Load pick sheets. `.json` files hold `{"name": ["01", "05", ...]}`;
/// anything else is the line format `name:01|05|...`.
pub fn load_picks(path: impl AsRef<Path>) -> ApiResult<PickSheets> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .map_err(|e| ApiError::NotFound(format!("could not read {}: {e}", path.display())))?;
    if path.extension().is_some_and(|ext| ext == "json") {
        parse_pick_json(&content)
    } else {
        parse_pick_lines(&content)
    }
}

fn parse_pick_json(content: &str) -> ApiResult<PickSheets> {
    let raw: BTreeMap<String, Vec<String>> = serde_json::from_str(content)
        .map_err(|e| ApiError::Other(format!("invalid picks json: {e}")))?;
    let mut sheets = PickSheets::new();
    for (name, picks) in raw {
        let (name, sheet) = parse_sheet(&name, picks.iter().map(String::as_str))?;
        sheets.insert(name, sheet);
    }
    Ok(sheets)
}

fn parse_pick_lines(content: &str) -> ApiResult<PickSheets> {
    let mut sheets = PickSheets::new();
    for line in content.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let Some((name, picks)) = line.split_once(':') else {
            return Err(ApiError::Other(format!("malformed pick line: {line}")));
        };
        let (name, sheet) = parse_sheet(name, picks.split('|'))?;
        sheets.insert(name, sheet);
    }
    Ok(sheets)
}

fn parse_sheet<'a>(
    name: &str,
    picks: impl Iterator<Item = &'a str>,
) -> ApiResult<(String, Vec<TeamId>)> {
    let sheet = picks
        .map(|token| {
            token.trim().parse::<TeamId>().map_err(|e| {
                ApiError::Other(format!("bad pick for {name}: {e}"))
            })
        })
        .collect::<ApiResult<Vec<TeamId>>>()?;
    Ok((name.trim().to_owned(), sheet))
}
