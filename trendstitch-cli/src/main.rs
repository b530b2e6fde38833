//! `trendstitch` command-line interface.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use trendstitch::{
    DailySeries, Method, Property, Timeframe, TrendQuery, TrendStitcher, TrendsConnector,
};
use trendstitch_cli::{compare, files};
use trendstitch_core::daily_from_timeline;
use trendstitch_google::{GoogleTrendsConfig, GoogleTrendsConnector};

#[derive(Parser)]
#[command(name = "trendstitch", version)]
#[command(about = "Daily Google Trends series rebuilt from overlapping windows", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Stitch a daily series and write it to CSV
    Pull(PullArgs),
    /// Compare a direct daily pull with a stitched series
    Compare {
        /// File written by `pull --reference-start`
        daily: PathBuf,
        /// File written by `pull`
        overlapping: PathBuf,
        /// File written by `pull --weekly`, compared against the daily file as well
        #[arg(long)]
        weekly: Option<PathBuf>,
    },
}

#[derive(Args)]
struct PullArgs {
    /// Search term
    keyword: String,

    /// First day of the series (YYYY-MM-DD)
    #[arg(long)]
    start: NaiveDate,

    /// Last day of the series (YYYY-MM-DD)
    #[arg(long)]
    end: NaiveDate,

    /// Region code such as US; empty for worldwide
    #[arg(long, default_value = "")]
    geo: String,

    /// Category id; 0 for all categories
    #[arg(long, default_value_t = 0)]
    category: u32,

    /// Search property (web, images, news, youtube, shopping)
    #[arg(long, default_value = "web")]
    property: Property,

    /// Window length in days
    #[arg(long, default_value_t = 269)]
    delta: u32,

    /// Days shared by consecutive windows
    #[arg(long, default_value_t = 100)]
    overlap: u32,

    /// Overlap coefficient (max, min, mean, sum)
    #[arg(long, default_value = "max")]
    method: Method,

    /// Seconds to pause after every window fetch
    #[arg(long, default_value_t = 0)]
    sleep: u64,

    /// Host language sent to the service
    #[arg(long, default_value = "en-US")]
    hl: String,

    /// Timezone offset in minutes sent to the service
    #[arg(long, default_value_t = 360)]
    tz: i32,

    /// Also write `{keyword}_daily.csv`, a single daily pull from this date to --end
    #[arg(long)]
    reference_start: Option<NaiveDate>,

    /// Also write `{keyword}_weekly.csv`, a single pull over --start..--end,
    /// which the service answers at weekly resolution
    #[arg(long)]
    weekly: bool,

    /// Directory the CSV files are written to
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Log progress at info level
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let verbose = matches!(&cli.command, Command::Pull(args) if args.verbose);
    let default_filter = if verbose { "info" } else { "warn" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_target(false)
        .try_init();

    match cli.command {
        Command::Pull(args) => pull(args).await,
        Command::Compare {
            daily,
            overlapping,
            weekly,
        } => {
            let daily = files::read_series(&daily)?;
            let stitched = files::read_series(&overlapping)?;
            let stats = compare::compare(&daily.points, &stitched.points)
                .with_context(|| format!("comparing '{}'", stitched.keyword))?;
            println!("{stats}");
            if let Some(weekly) = weekly {
                let weekly = files::read_series(&weekly)?;
                let stats = compare::compare(&daily.points, &weekly.points)
                    .with_context(|| format!("comparing weekly '{}'", weekly.keyword))?;
                println!("\nWeekly baseline\n{stats}");
            }
            Ok(())
        }
    }
}

async fn pull(args: PullArgs) -> anyhow::Result<()> {
    let config = GoogleTrendsConfig {
        hl: args.hl.clone(),
        tz_offset_minutes: args.tz,
        ..GoogleTrendsConfig::default()
    };
    let connector = GoogleTrendsConnector::rate_limited(config)
        .context("building Google Trends connector")?
        .build();

    let stitcher = TrendStitcher::builder()
        .with_connector(connector.clone())
        .delta_days(args.delta)
        .overlap_days(args.overlap)
        .method(args.method)
        .sleep(Duration::from_secs(args.sleep))
        .verbose(args.verbose)
        .build()?;

    let query = TrendQuery::new(args.keyword.as_str())
        .geo(args.geo.as_str())
        .category(args.category)
        .property(args.property);

    let trend = stitcher
        .daily_trend(&query, args.start, args.end)
        .await
        .with_context(|| format!("stitching '{}'", args.keyword))?;
    let path = files::overlapping_path(&args.out_dir, &args.keyword);
    files::write_stitched(&path, &trend)?;
    tracing::info!(path = %path.display(), days = trend.points.len(), "wrote stitched series");

    if let Some(reference_start) = args.reference_start {
        let series = direct_pull(connector.as_ref(), &query, reference_start, args.end)
            .await
            .context("direct daily pull")?;
        let path = files::daily_path(&args.out_dir, &args.keyword);
        files::write_daily(&path, &args.keyword, &series)?;
        tracing::info!(path = %path.display(), days = series.len(), "wrote reference series");
    }
    if args.weekly {
        let series = direct_pull(connector.as_ref(), &query, args.start, args.end)
            .await
            .context("direct weekly pull")?;
        let path = files::weekly_path(&args.out_dir, &args.keyword);
        files::write_daily(&path, &args.keyword, &series)?;
        tracing::info!(path = %path.display(), rows = series.len(), "wrote weekly series");
    }
    Ok(())
}

/// One unstitched request over `[start, end]`, keyed by the UTC day of each row.
async fn direct_pull(
    connector: &dyn TrendsConnector,
    query: &TrendQuery,
    start: NaiveDate,
    end: NaiveDate,
) -> anyhow::Result<DailySeries> {
    let provider = connector
        .as_interest_provider()
        .context("connector cannot fetch interest over time")?;
    let raw = provider
        .interest_over_time(&query.request(Timeframe::dates(start, end)))
        .await?;
    Ok(daily_from_timeline(&raw)?)
}
