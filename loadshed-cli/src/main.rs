use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use loadshed_core::{DisplayEvent, NextOutageStatus, canonical_area_id, local_now, parse_timestamp};
use std::path::PathBuf;
use tracing::{info, warn};

mod calendar;
mod config;
mod fetch;
mod session;
mod state;

use fetch::PayloadSource;
use session::Session;
use state::PayloadCache;

#[derive(Parser, Debug)]
#[command(
    name = "loadshed",
    version,
    long_version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("LOADSHED_BUILD_SHA"), ")"),
    about = "Loadshedding schedules per area: calendar events and the next outage"
)]
struct Cli {
    /// Read the schedule from a local CSV instead of the configured URL
    #[arg(long, global = true)]
    csv: Option<PathBuf>,

    /// Never touch the network; use the cached schedule
    #[arg(long, global = true)]
    offline: bool,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Download the latest schedule and refresh the cache
    Fetch,

    /// List areas present in the schedule
    Areas {
        /// Only show areas matching this text (case-insensitive, '-' = ' ')
        #[arg(long)]
        search: Option<String>,
    },

    /// Print an area's outage events in chronological order
    Events {
        /// Area id, e.g. city-of-cape-town-area-15 (a trailing .ics is accepted)
        #[arg(long)]
        area: String,

        /// Split outages that cross midnight into one event per day
        #[arg(long)]
        segment: bool,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Show the ongoing or next outage for an area
    Next {
        #[arg(long)]
        area: String,

        /// Evaluate at this time instead of now (e.g. 2024-01-01T10:30)
        #[arg(long)]
        now: Option<String>,
    },

    /// Export an area's events as an iCalendar file
    Ics {
        #[arg(long)]
        area: String,

        /// Output path (default: stdout)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Configuration commands
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write ~/.loadshed/config.toml with defaults
    Init,
    /// Print the effective configuration
    Show,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cfg = config::load_config()?;

    let source = match cli.csv {
        Some(path) => PayloadSource::File(path),
        None => PayloadSource::Remote {
            source: cfg.source.clone(),
            offline: cli.offline,
        },
    };

    match cli.command {
        Command::Fetch => {
            reject_cache_flags(&source)?;
            let cache = PayloadCache::open_default()?;
            let body = fetch::download(&cfg.source.url, &cache).await?;
            let s = Session::new(&body, &cfg.display)?;
            report_warnings(&s);
            println!(
                "Cached {} records across {} areas at {}",
                s.schedule.records.len(),
                s.areas(None).len(),
                cache.path().display()
            );
        }

        Command::Areas { search } => {
            let s = open_session(&source, &cfg).await?;
            for area in s.areas(search.as_deref()) {
                println!("{} ({})", s.display_name(&area), area);
            }
        }

        Command::Events { area, segment, json } => {
            let s = open_session(&source, &cfg).await?;
            let events = s.events(&area, segment);

            if json {
                println!("{}", serde_json::to_string_pretty(&events)?);
            } else if events.is_empty() {
                print_no_schedule(&s, &area);
            } else {
                print_events(&events);
            }
        }

        Command::Next { area, now } => {
            let s = open_session(&source, &cfg).await?;
            let now = match now {
                Some(raw) => parse_timestamp(&raw).with_context(|| format!("--now {raw}"))?,
                None => local_now(&cfg.display.timezone)?,
            };

            let status = s.status(&area, now);
            if status == NextOutageStatus::NoUpcomingOutage && s.events(&area, false).is_empty() {
                print_no_schedule(&s, &area);
            } else {
                println!("{}: {}", s.display_name(&canonical_area_id(&area)), status.banner());
            }
        }

        Command::Ics { area, out } => {
            let s = open_session(&source, &cfg).await?;
            let area = canonical_area_id(&area);
            let ics = calendar::events_to_ics(&s.events(&area, false), &area);
            match out {
                Some(path) => {
                    std::fs::write(&path, ics)
                        .with_context(|| format!("write {}", path.display()))?;
                    info!("wrote {}", path.display());
                }
                None => print!("{ics}"),
            }
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => {
                println!("# {}", config::config_path()?.display());
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
        },
    }

    Ok(())
}

/// `fetch` refreshes the cache from the network, so a local file or
/// `--offline` would be silently ignored.
fn reject_cache_flags(source: &PayloadSource) -> Result<()> {
    match source {
        PayloadSource::File(path) => {
            bail!("`fetch` downloads the configured url; --csv {} not allowed", path.display())
        }
        PayloadSource::Remote { offline: true, .. } => {
            bail!("`fetch` needs the network; --offline not allowed")
        }
        PayloadSource::Remote { .. } => Ok(()),
    }
}

async fn open_session(source: &PayloadSource, cfg: &config::Config) -> Result<Session> {
    let cache = PayloadCache::open_default()?;
    let body = fetch::load_payload(source, &cache).await?;
    let s = Session::new(&body, &cfg.display)?;
    report_warnings(&s);
    Ok(s)
}

fn report_warnings(s: &Session) {
    let warnings = &s.schedule.warnings;
    if warnings.is_empty() {
        return;
    }
    warn!(
        "{} problem line(s) in schedule, {} dropped",
        warnings.len(),
        s.schedule.dropped_lines()
    );
}

fn print_no_schedule(s: &Session, area: &str) {
    let area = canonical_area_id(area);
    println!("(There's no loadshedding scheduled for {})", s.display_name(&area));
}

fn print_events(events: &[DisplayEvent]) {
    for e in events {
        let end_fmt = if e.end.date() == e.start.date() {
            "%H:%M"
        } else {
            "%a %d %b %H:%M"
        };
        println!(
            "{} - {}  {}",
            e.start.format("%a %d %b %H:%M"),
            e.end.format(end_fmt),
            e.title
        );
    }
}
