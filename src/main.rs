//! # Poolmatch CLI
//!
//! Thin driver over the library: load a snapshot file, run one
//! recommendation, print the result list as JSON on stdout. Logs go to
//! stderr so the output stays pipeable.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use poolmatch::model::RawTimestamp;
use poolmatch::{recommend, RecommendOptions, SnapshotStore};

#[derive(Parser)]
#[command(name = "poolmatch")]
#[command(about = "Ride-group recommender over a campus social graph")]
#[command(long_about = "Ranks candidate ride groups for one seeker:
  poolmatch --snapshot data.json 20CS1001
  poolmatch --snapshot data.json 20CS1001 -d \"2025-11-10T09:30:00Z\"
  poolmatch --snapshot data.json 20CS1001 -d \"2025-11-10 09:30\" --window-mins 90")]
struct Cli {
    /// Seeker roll number
    seeker: String,

    /// Path to the snapshot JSON file (users, groups, group_members, connections)
    #[arg(short, long)]
    snapshot: PathBuf,

    /// Desired departure (RFC 3339 or "YYYY-MM-DD HH:MM"); unparseable
    /// values are treated as absent
    #[arg(short, long)]
    departure: Option<String>,

    /// Maximum number of groups returned
    #[arg(long, default_value_t = 10)]
    top_n: usize,

    /// Social-degree radius for mutual lookups
    #[arg(long, default_value_t = 5)]
    max_degree: u32,

    /// Inclusive admission window around the desired departure, in minutes
    #[arg(long, default_value_t = 60)]
    window_mins: i64,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        error!("{e:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let store = SnapshotStore::open(&cli.snapshot)
        .with_context(|| format!("loading snapshot {}", cli.snapshot.display()))?;

    let desired = cli.departure.map(RawTimestamp::Text);
    let opts = RecommendOptions {
        top_n: cli.top_n,
        max_degree: cli.max_degree,
        time_window_mins: cli.window_mins,
    };

    let results = recommend(store.snapshot(), &cli.seeker, desired.as_ref(), &opts);
    println!("{}", serde_json::to_string_pretty(&results)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["poolmatch", "--snapshot", "data.json", "20CS1001"]);
        assert_eq!(cli.seeker, "20CS1001");
        assert_eq!(cli.top_n, 10);
        assert_eq!(cli.max_degree, 5);
        assert_eq!(cli.window_mins, 60);
        assert!(cli.departure.is_none());
    }

    #[test]
    fn test_cli_overrides() {
        let cli = Cli::parse_from([
            "poolmatch",
            "--snapshot",
            "data.json",
            "--top-n",
            "3",
            "--max-degree",
            "2",
            "--window-mins",
            "90",
            "-d",
            "2025-11-10 09:30",
            "20CS1001",
        ]);
        assert_eq!(cli.top_n, 3);
        assert_eq!(cli.max_degree, 2);
        assert_eq!(cli.window_mins, 90);
        assert_eq!(cli.departure.as_deref(), Some("2025-11-10 09:30"));
    }
}
