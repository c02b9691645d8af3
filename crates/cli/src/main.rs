use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use data_loader::DataIndex;
use server::{
    AppState, MovieRecommendation, RecommendationOrchestrator, ServeConfig, MAX_K,
};
use sources::{search_titles, SimilaritySource};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tmdb_client::{config::DEFAULT_API_BASE, CachingProvider, TmdbClient, TmdbConfig};
use tracing::info;

/// movie-recs - find movies similar to one you like
#[derive(Parser)]
#[command(name = "movie-recs")]
#[command(about = "Similar-movie recommender over a precomputed similarity matrix", long_about = None)]
struct Cli {
    /// Directory holding movies.{dat,json} and similarity.{bin,csv}
    #[arg(short, long, default_value = "data")]
    data_dir: PathBuf,

    /// TMDB v3 API key (posters fall back to a placeholder without one)
    #[arg(long, env = "TMDB_API_KEY", default_value = "", hide_env_values = true)]
    tmdb_api_key: String,

    /// TMDB API base URL
    #[arg(long, env = "TMDB_API_BASE", default_value = DEFAULT_API_BASE)]
    tmdb_api_base: String,

    /// Per-request TMDB timeout in seconds
    #[arg(long, default_value = "12")]
    tmdb_timeout_secs: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the browser front-end and JSON API
    Serve {
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        #[arg(long, default_value = "7860")]
        port: u16,

        /// Default number of recommendations per request
        #[arg(long, default_value = "5")]
        k: usize,
    },

    /// Print movies similar to a title
    Recommend {
        /// Exact catalog title
        #[arg(long)]
        title: String,

        /// Number of recommendations to return
        #[arg(long, default_value = "5")]
        k: usize,

        /// Print the HTML card fragment instead of a list
        #[arg(long)]
        html: bool,
    },

    /// Search catalog titles
    Search {
        /// Title to search for (case-insensitive)
        #[arg(long)]
        title: String,

        #[arg(long, default_value = "20")]
        limit: usize,
    },

    /// Time neighbour selection for random titles (no network)
    Benchmark {
        /// Number of lookups to make
        #[arg(long, default_value = "1000")]
        requests: usize,

        #[arg(long, default_value = "5")]
        k: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    println!("Loading recommender data from {}...", cli.data_dir.display());
    let start = Instant::now();
    let data_dir = cli.data_dir.clone();
    let data_index = Arc::new(
        tokio::task::spawn_blocking(move || DataIndex::load_from_files(&data_dir))
            .await
            .context("Data loading task panicked")?
            .context("Failed to load catalog and similarity matrix")?,
    );
    println!(
        "{} Loaded {} movies in {:?}",
        "✓".green(),
        data_index.len(),
        start.elapsed()
    );

    let tmdb_config = TmdbConfig::new(cli.tmdb_api_key.clone())
        .with_api_base(cli.tmdb_api_base.clone())
        .with_timeout(Duration::from_secs(cli.tmdb_timeout_secs));

    match cli.command {
        Commands::Serve { host, port, k } => {
            let config = ServeConfig {
                host,
                port,
                default_k: k,
            };
            handle_serve(data_index, tmdb_config, config).await?
        }
        Commands::Recommend { title, k, html } => {
            handle_recommend(data_index, tmdb_config, &title, k, html).await?
        }
        Commands::Search { title, limit } => handle_search(&data_index, &title, limit),
        Commands::Benchmark { requests, k } => handle_benchmark(data_index, requests, k)?,
    }

    Ok(())
}

fn build_orchestrator(
    data_index: Arc<DataIndex>,
    tmdb_config: TmdbConfig,
) -> Result<RecommendationOrchestrator> {
    let client = TmdbClient::new(tmdb_config).context("Failed to build TMDB client")?;
    let provider = Arc::new(CachingProvider::new(client));
    Ok(RecommendationOrchestrator::new(data_index, provider))
}

/// Handle the 'serve' command
async fn handle_serve(
    data_index: Arc<DataIndex>,
    tmdb_config: TmdbConfig,
    config: ServeConfig,
) -> Result<()> {
    if !(1..=MAX_K).contains(&config.default_k) {
        bail!("--k must be between 1 and {}", MAX_K);
    }
    let orchestrator = build_orchestrator(data_index, tmdb_config)?;
    info!("Open http://{} in a browser", config.bind_addr());
    server::serve(AppState::new(orchestrator, config)).await
}

/// Handle the 'recommend' command
async fn handle_recommend(
    data_index: Arc<DataIndex>,
    tmdb_config: TmdbConfig,
    title: &str,
    k: usize,
    html: bool,
) -> Result<()> {
    let orchestrator = build_orchestrator(data_index.clone(), tmdb_config)?;

    if html {
        println!("{}", orchestrator.recommend_html(title, k).await?);
        return Ok(());
    }

    match orchestrator.recommend(title, k).await {
        Ok(recommendations) => print_recommendations(title, &recommendations),
        Err(server::RecommendError::MovieNotFound(_)) => {
            println!("{}", format!("Movie not found: {}", title).red());
            let suggestions = search_titles(&data_index, title, 5);
            if !suggestions.is_empty() {
                println!("Did you mean:");
                for hit in suggestions {
                    println!("  - {}", hit.title);
                }
            }
        }
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

/// Handle the 'search' command
fn handle_search(data_index: &DataIndex, title: &str, limit: usize) {
    let matches = search_titles(data_index, title, limit);

    println!("{}", format!("Search results for '{}':", title).bold().blue());
    if matches.is_empty() {
        println!("  (no matches)");
    }
    for hit in matches {
        println!("{}: {} [{:?}]", hit.movie_id, hit.title, hit.kind);
    }
}

/// Handle the 'benchmark' command
fn handle_benchmark(data_index: Arc<DataIndex>, requests: usize, k: usize) -> Result<()> {
    if data_index.is_empty() || requests == 0 {
        bail!("Nothing to benchmark: need a non-empty catalog and at least one request");
    }

    let source = SimilaritySource::new(data_index.clone());
    let rows: Vec<usize> = (0..requests)
        .map(|_| rand::random::<u32>() as usize % data_index.len())
        .collect();

    // Sequential lookups for latency percentiles
    let mut timings = Vec::with_capacity(requests);
    for &row in &rows {
        let start = Instant::now();
        let candidates = source.get_candidates(row, k);
        timings.push(start.elapsed());
        std::hint::black_box(candidates);
    }

    // Parallel batch for throughput
    let start = Instant::now();
    let batch = source.batch_candidates(&rows, k);
    let batch_time = start.elapsed();
    std::hint::black_box(batch);

    let total_time: Duration = timings.iter().sum();
    let avg_latency = total_time / (timings.len() as u32);
    timings.sort();
    let percentile = |p: f64| timings[((timings.len() as f64 * p) as usize).min(timings.len() - 1)];

    println!("{}", "Benchmark results:".bold().blue());
    println!("Lookups: {} (k = {})", requests, k);
    println!("Total time: {:?}", total_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", percentile(0.50));
    println!("P95 latency: {:?}", percentile(0.95));
    println!("P99 latency: {:?}", percentile(0.99));
    println!(
        "Parallel batch: {:?} ({:.0} lookups/second)",
        batch_time,
        requests as f64 / batch_time.as_secs_f64()
    );

    Ok(())
}

/// Helper function to format and print recommendations
fn print_recommendations(title: &str, recommendations: &[MovieRecommendation]) {
    println!("{}", format!("Movies similar to {}:", title).bold().blue());
    if recommendations.is_empty() {
        println!("  (none)");
    }
    for rec in recommendations {
        let m = &rec.details;
        println!(
            "{}. {} ({}) ⭐ {:.1} - similarity {:.3}",
            rec.rank.to_string().green(),
            rec.catalog_title,
            m.year,
            m.rating,
            rec.score
        );
        println!("   Genres: {}", m.genres);
        println!("   Poster: {}", m.poster);
        if let Some(trailer) = &m.trailer {
            println!("   Trailer: {}", trailer);
        }
    }
}
