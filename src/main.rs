mod aggregate;
mod bookmarks;
mod classify;
mod fetcher;
mod output;

use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use aggregate::Aggregator;
use bookmarks::Bookmark;
use classify::heuristic::{HeuristicClassifier, KeywordTables};
use classify::remote::RemoteClassifier;
use classify::Pipeline;
use fetcher::Fetcher;

const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Parser)]
#[command(name = "bookmark_sorter", about = "Sort exported bookmarks into categorized folders")]
struct Cli {
    /// Bookmarks HTML export file
    html: PathBuf,

    /// Output folder
    #[arg(long, default_value = "sorted_bookmarks")]
    out: PathBuf,

    /// Max bookmarks to process (for bounded test runs)
    #[arg(short = 'n', long)]
    limit: Option<usize>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let mut links = bookmarks::parse_bookmarks(&cli.html)?;
    if let Some(limit) = cli.limit {
        links.truncate(limit);
    }
    if links.is_empty() {
        println!("No bookmarks found in {}.", cli.html.display());
        return Ok(());
    }
    println!("Sorting {} bookmarks...", links.len());

    let remote = RemoteClassifier::from_env();
    if remote.is_none() {
        info!("OPENAI_API_KEY not set, classifying with keyword heuristics only");
    }
    let pipeline = Pipeline::new(remote, HeuristicClassifier::new(KeywordTables::default()));
    let fetcher = Fetcher::new(FETCH_TIMEOUT);

    let agg = sort_bookmarks(&fetcher, &pipeline, &links, true).await;
    println!(
        "Done: {} sorted, {} unreachable.",
        agg.sorted_count(),
        agg.unreachable_count()
    );

    let (tree, unreachable) = agg.export();
    output::write_output(&cli.out, &tree, &unreachable)?;
    println!("Wrote results to {}", cli.out.display());

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_duration(elapsed));
    }

    Ok(())
}

/// Sequential driver: fetch each bookmark, classify on success, record the
/// URL as unreachable on failure. Every URL ends up in exactly one bucket.
async fn sort_bookmarks(
    fetcher: &Fetcher,
    pipeline: &Pipeline,
    links: &[Bookmark],
    progress: bool,
) -> Aggregator {
    let pb = if progress {
        let pb = ProgressBar::new(links.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40} {pos}/{len} ({per_sec}, eta {eta})")
                .expect("static progress template")
                .progress_chars("=> "),
        );
        pb
    } else {
        ProgressBar::hidden()
    };

    let mut agg = Aggregator::new();
    for bookmark in links {
        debug!("fetching {} ({})", bookmark.url, bookmark.title);
        match fetcher.fetch(&bookmark.url).await {
            Some(text) => {
                let classification = pipeline.classify(&bookmark.url, &text).await;
                agg.record(&bookmark.url, &classification);
            }
            None => agg.record_unreachable(&bookmark.url),
        }
        pb.inc(1);
    }

    pb.finish_and_clear();
    agg
}

fn format_duration(d: Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}

// ── Tests ──
