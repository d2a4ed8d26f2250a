#![deny(warnings)]

//! Headless CLI: starts a session, plays a scripted list of actions and prints the outcome.

use anyhow::{bail, Context, Result};
use biz_core::GameConfig;
use biz_econ::Outlook;
use biz_report::ChartSet;
use biz_runtime::{Notice, PlayerAction, Session, Severity, StatusView};
use biz_sprites::{AssetSource, ConfiguredAssets, DirectoryAssets, Placement, SpriteAssets};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Default)]
struct Args {
    config: Option<PathBuf>,
    name: Option<String>,
    assets: Option<PathBuf>,
    script: Vec<PlayerAction>,
    days: u32,
    ticks: u32,
    json: bool,
}

const USAGE: &str = "usage: cli [--config FILE] [--name NAME] [--assets DIR] \
[--script simulate,hire,upgrade,rename:NAME,last,charts] [--days N] [--ticks N] [--json]";

/// Everything printed by `--json`.
#[derive(Serialize)]
struct Report {
    notices: Vec<Notice>,
    status: StatusView,
    outlook: Outlook,
    floor: Vec<Placement>,
    charts: Option<ChartSet>,
    charts_error: Option<String>,
}

fn number(value: Option<String>, flag: &str) -> Result<u32> {
    let value = value.with_context(|| format!("{flag} needs a value"))?;
    value
        .parse()
        .with_context(|| format!("{flag} expects a number, got `{value}`"))
}

fn parse_args(mut it: impl Iterator<Item = String>) -> Result<Args> {
    let mut args = Args::default();
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--config" => args.config = it.next().map(PathBuf::from),
            "--name" => args.name = it.next(),
            "--assets" => args.assets = it.next().map(PathBuf::from),
            "--script" => {
                let list = it.next().unwrap_or_default();
                for word in list.split(',').filter(|w| !w.trim().is_empty()) {
                    args.script.push(word.parse()?);
                }
            }
            "--days" => args.days = number(it.next(), "--days")?,
            "--ticks" => args.ticks = number(it.next(), "--ticks")?,
            "--json" => args.json = true,
            "--help" | "-h" => {
                println!("{USAGE}");
                std::process::exit(0);
            }
            other => bail!("unexpected argument `{other}`\n{USAGE}"),
        }
    }
    Ok(args)
}

fn main() -> Result<()> {
    // Logging setup
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_max_level(Level::INFO)
        .init();

    let args = parse_args(std::env::args().skip(1))?;
    info!(
        git_sha = env!("GIT_SHA"),
        build_date = env!("BUILD_DATE"),
        ?args,
        "starting CLI"
    );

    let cfg = match &args.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => GameConfig::default(),
    };

    let source: Box<dyn AssetSource> = match &args.assets {
        Some(dir) => Box::new(DirectoryAssets::new(dir, &cfg.floor)),
        None => Box::new(ConfiguredAssets::new(&cfg.floor)),
    };
    let assets = SpriteAssets::load(source.as_ref());

    let name = args
        .name
        .clone()
        .unwrap_or_else(|| cfg.default_business_name.clone());
    let mut session = Session::start(&cfg, &name, assets).context("starting session")?;

    let days = (0..args.days).map(|_| PlayerAction::SimulateDay);
    let mut notices = Vec::new();
    for action in args.script.iter().cloned().chain(days) {
        notices.push(session.apply(action));
        session.advance(session.ticker().interval());
    }
    for _ in 0..args.ticks {
        session.tick();
    }

    if args.json {
        let (charts, charts_error) = match session.charts() {
            Ok(charts) => (Some(charts), None),
            Err(e) => (None, Some(e.to_string())),
        };
        let report = Report {
            notices,
            status: session.status(),
            outlook: session.outlook(),
            floor: session.animator().draw_list(),
            charts,
            charts_error,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for notice in &notices {
        let tag = match notice.severity {
            Severity::Info => "info",
            Severity::Error => "error",
        };
        println!("[{tag}] {}\n{}\n", notice.title, notice.body);
    }
    println!("{}\n", session.status());
    let floor = session.animator();
    println!(
        "Floor {}x{} | workers: {} | crates: {} | ticks: {}",
        floor.surface().width,
        floor.surface().height,
        floor.moving().len(),
        floor.statics().len(),
        session.ticker().fired() + u64::from(args.ticks)
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(words: &[&str]) -> Result<Args> {
        parse_args(words.iter().map(|w| w.to_string()))
    }

    #[test]
    fn parses_counts_and_script() {
        let args = parse(&["--days", "3", "--ticks", "40", "--script", "hire,upgrade", "--json"])
            .unwrap();
        assert_eq!(args.days, 3);
        assert_eq!(args.ticks, 40);
        assert_eq!(
            args.script,
            vec![PlayerAction::HireEmployee, PlayerAction::UpgradeBusiness]
        );
        assert!(args.json);
    }

    #[test]
    fn rejects_non_numeric_counts() {
        let err = parse(&["--days", "abc"]).unwrap_err();
        assert_eq!(err.to_string(), "--days expects a number, got `abc`");
        let err = parse(&["--ticks", "-1"]).unwrap_err();
        assert_eq!(err.to_string(), "--ticks expects a number, got `-1`");
        let err = parse(&["--ticks"]).unwrap_err();
        assert_eq!(err.to_string(), "--ticks needs a value");
    }

    #[test]
    fn json_report_carries_notices_and_status() {
        let cfg = GameConfig::default();
        let assets = SpriteAssets::load(&ConfiguredAssets::new(&cfg.floor));
        let mut session = Session::start(&cfg, "Acme", assets).unwrap();
        let notices = vec![session.apply(PlayerAction::SimulateDay)];
        let report = Report {
            notices,
            status: session.status(),
            outlook: session.outlook(),
            floor: session.animator().draw_list(),
            charts: session.charts().ok(),
            charts_error: None,
        };
        let v = serde_json::to_value(&report).unwrap();
        assert_eq!(v["notices"][0]["title"], "Day Summary");
        assert_eq!(v["notices"][0]["severity"], "Info");
        assert_eq!(v["status"]["budget"], "Budget: 1060");
        assert_eq!(v["outlook"]["profit"], 60);
        assert_eq!(v["floor"][0]["kind"], "Worker");
        assert_eq!(v["charts"]["profit"][0], 60);
    }
}
