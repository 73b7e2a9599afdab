use anyhow::Context;
use clap::Parser;
use psyreco_api::{AppState, RestApi};
use psyreco_core::{BookCollection, CollectionConfig, Distance};
use psyreco_mood::{AnalyzerConfig, MistralAnalyzer, MoodExtraction, DEFAULT_MODEL, MISTRAL_BASE_URL};
use psyreco_similarity::{
    HashEmbedder, RankWeights, RecommendConfig, Recommender, DEFAULT_ALPHA, DEFAULT_BETA,
    DEFAULT_EMBEDDING_DIM, DEFAULT_POOL_SIZE, DEFAULT_RESULT_COUNT,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

/// Book recommendations that understand your mood
#[derive(Parser, Debug)]
#[command(name = "psyreco")]
#[command(about = "Mood-aware book recommendations", long_about = None)]
struct Args {
    /// JSON catalog of books to index at start-up
    #[arg(short, long)]
    catalog: PathBuf,

    /// Describe how you feel; prints recommendations and exits instead of serving
    #[arg(short, long)]
    text: Option<String>,

    /// HTTP API port
    #[arg(long, default_value_t = 8080)]
    http_port: u16,

    /// Number of recommendations
    #[arg(short, long, default_value_t = DEFAULT_RESULT_COUNT)]
    n: usize,

    /// Candidates fetched before reranking (raised to n if smaller)
    #[arg(long, default_value_t = DEFAULT_POOL_SIZE)]
    pool_size: usize,

    /// Weight of embedding similarity
    #[arg(long, default_value_t = DEFAULT_ALPHA)]
    alpha: f32,

    /// Weight of mood-tag similarity
    #[arg(long, default_value_t = DEFAULT_BETA)]
    beta: f32,

    /// Dimension of the hashed text embedding
    #[arg(long, default_value_t = DEFAULT_EMBEDDING_DIM)]
    embedding_dim: usize,

    /// Distance metric for retrieval (cosine, euclidean, dot)
    #[arg(long, default_value = "cosine")]
    distance: String,

    /// API key for mood analysis; without it the raw text is used as the only tag
    #[arg(long, env = "MISTRAL_API_KEY", hide_env_values = true)]
    mistral_api_key: Option<String>,

    /// Chat-completion base URL
    #[arg(long, env = "MISTRAL_BASE_URL", default_value = MISTRAL_BASE_URL)]
    mistral_base_url: String,

    /// Chat model used for mood analysis
    #[arg(long, env = "MISTRAL_MODEL", default_value = DEFAULT_MODEL)]
    mistral_model: String,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting PsyReco v{}", env!("CARGO_PKG_VERSION"));

    let distance: Distance = args.distance.parse()?;

    let embedder = Arc::new(HashEmbedder::with_dim(args.embedding_dim));
    let collection_config = CollectionConfig {
        name: "books".to_string(),
        vector_dim: args.embedding_dim,
        distance,
    };
    let collection = Arc::new(
        BookCollection::from_catalog(&args.catalog, collection_config, embedder.as_ref())
            .with_context(|| format!("failed to load catalog {}", args.catalog.display()))?,
    );
    if collection.is_empty() {
        warn!("Catalog {} contains no books", args.catalog.display());
    }
    info!(
        "Collection '{}': {} books, {}-dim vectors, {:?} distance",
        collection.name(),
        collection.count(),
        collection.vector_dim(),
        collection.distance()
    );

    let config = RecommendConfig {
        pool_size: args.pool_size,
        default_n: args.n,
        weights: RankWeights::new(args.alpha, args.beta)?,
        ..Default::default()
    };
    let recommender = Arc::new(Recommender::new(embedder, collection.clone(), config)?);

    if args.mistral_api_key.is_none() {
        warn!("MISTRAL_API_KEY not set; mood analysis will use the raw text as the only tag");
    }
    let analyzer = MistralAnalyzer::new(AnalyzerConfig {
        api_key: args.mistral_api_key,
        base_url: args.mistral_base_url,
        model: args.mistral_model,
        ..Default::default()
    })?;

    if let Some(text) = args.text {
        return run_once(&analyzer, &recommender, &text).await;
    }

    let state = AppState::new(recommender, Arc::new(analyzer), collection);
    let http_port = args.http_port;
    let http_handle = std::thread::spawn(move || {
        let sys = actix_web::rt::System::new();
        sys.block_on(async {
            if let Err(e) = RestApi::start(state, http_port).await {
                tracing::error!("HTTP server error: {}", e);
            }
        })
    });

    info!("HTTP API: http://localhost:{}/", http_port);

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
        _ = tokio::task::spawn_blocking(move || {
            http_handle.join().ok();
        }) => {
            info!("HTTP server stopped");
        }
    }

    info!("Shutting down...");
    Ok(())
}

/// Analyze `text`, recommend, and print the ranked list
async fn run_once(
    analyzer: &MistralAnalyzer,
    recommender: &Recommender,
    text: &str,
) -> anyhow::Result<()> {
    let extraction = analyzer.analyze(text).await;
    if let MoodExtraction::Fallback { reason, .. } = &extraction {
        warn!("Using raw input as tags: {}", reason);
    }
    let profile = extraction.into_profile();
    println!("Tags: {}", serde_json::to_string_pretty(&profile)?);

    let recs = recommender.recommend_default(&profile.interest_tags)?;
    if recs.is_empty() {
        println!("\nNo recommendations found.");
        return Ok(());
    }

    println!("\nTop Recommendations:");
    for (idx, scored) in recs.scored().iter().enumerate() {
        let book = &scored.item;
        println!(
            "{}. {} by {} (Weighted Score ~{:.2})",
            idx + 1,
            book.title,
            book.author,
            scored.weighted_score
        );
        if !book.summary.is_empty() {
            println!("   Summary: {}\n", book.summary);
        }
    }
    Ok(())
}
