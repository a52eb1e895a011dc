mod bracket;
mod engine;
mod error;
mod leaderboard;
mod outcomes;
mod picks;
mod scoring;

use crate::bracket::BracketState;
use crate::leaderboard::Leaderboard;
use anyhow::Context;
use log::{LevelFilter, info};
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use pool_api::client::FeedClient;
use pool_api::{PoolDataSource, PoolSource};
use std::collections::BTreeMap;
use std::path::PathBuf;

const DEFAULT_PICKS_PATH: &str = "tourney/picks.json";
const DEFAULT_OUT_PATH: &str = "tourney/leaders.json";
const LOG_ENV: &str = "MMPOOL_LOG";

struct Args {
    picks: PathBuf,
    out: PathBuf,
    year: Option<u16>,
}

fn main() -> anyhow::Result<()> {
    let Some(args) = parse_args() else {
        return Ok(());
    };

    better_panic::install();
    init_logger()?;

    let client = match args.year {
        Some(year) => FeedClient::for_year(year),
        None => FeedClient::new(),
    };
    let source = PoolSource::new(client, &args.picks);
    let board = run(&source)?;

    if let Some(dir) = args.out.parent()
        && !dir.as_os_str().is_empty()
    {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("creating {}", dir.display()))?;
    }
    let json = serde_json::to_string(&board)?;
    std::fs::write(&args.out, json)
        .with_context(|| format!("writing {}", args.out.display()))?;
    info!("wrote {} leaderboard entries to {}", board.entries.len(), args.out.display());

    Ok(())
}

/// The whole batch pipeline, from raw inputs to the ranked export.
fn run(source: &impl PoolDataSource) -> anyhow::Result<Leaderboard> {
    let raw_board = source.fetch_team_board().context("loading team board")?;
    let sheets = source.fetch_pick_sheets().context("loading pick sheets")?;

    let state = BracketState::resolve(raw_board)?;
    let games_left = state.games_left();
    info!("{} participants, {games_left} games left", sheets.len());

    let baselines = scoring::baseline_scores(&sheets, &state.board);
    let mut windows = BTreeMap::new();
    for (name, sheet) in &sheets {
        let window = picks::pick_window(name, sheet, games_left)?;
        windows.insert(name.clone(), window.to_vec());
    }

    let outcomes = outcomes::enumerate_outcomes(&state.remaining);
    let values = scoring::future_points(games_left);
    let records = engine::tally_outcomes(&windows, &baselines, &outcomes, values);
    Ok(leaderboard::consolidate(&records, &outcomes))
}

fn parse_args() -> Option<Args> {
    let mut picks = PathBuf::from(DEFAULT_PICKS_PATH);
    let mut out = PathBuf::from(DEFAULT_OUT_PATH);
    let mut year = None;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                println!("{}", usage_text());
                return None;
            }
            "-V" | "--version" => {
                println!("mmpool {}", env!("CARGO_PKG_VERSION"));
                return None;
            }
            "--picks" => picks = PathBuf::from(expect_value(&arg, args.next())),
            "--out" => out = PathBuf::from(expect_value(&arg, args.next())),
            "--year" => match expect_value(&arg, args.next()).parse() {
                Ok(y) => year = Some(y),
                Err(_) => {
                    eprintln!("--year takes a four-digit year\n\n{}", usage_text());
                    std::process::exit(2);
                }
            },
            _ => {
                eprintln!("Unknown argument: {arg}\n\n{}", usage_text());
                std::process::exit(2);
            }
        }
    }

    Some(Args { picks, out, year })
}

fn expect_value(flag: &str, value: Option<String>) -> String {
    value.unwrap_or_else(|| {
        eprintln!("{flag} needs a value\n\n{}", usage_text());
        std::process::exit(2);
    })
}

fn usage_text() -> &'static str {
    "mmpool - NCAA pick pool payoff calculator

Enumerates every possible resolution of the remaining bracket, scores
every pool entry against each one, and writes the ranked leaderboard.

Usage:
  mmpool [--picks PATH] [--out PATH] [--year YYYY]
  mmpool --help

Options:
  --picks PATH   Pick sheets file (default tourney/picks.json)
  --out PATH     Leaderboard output file (default tourney/leaders.json)
  --year YYYY    Tournament year (default: current season)

Environment:
  MMPOOL_BRACKET_JSON   Path to a local bracket feed snapshot (skips the network)
  MMPOOL_ROUND_LEVEL    Force the bracket back to the end of this round
  MMPOOL_LOG            Log level filter (default info)"
}

fn init_logger() -> anyhow::Result<()> {
    let level = std::env::var(LOG_ENV)
        .ok()
        .and_then(|v| v.parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::Info);

    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new("{l} - {m}\n")))
        .build();
    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(level))?;
    log4rs::init_config(config)?;
    Ok(())
}
