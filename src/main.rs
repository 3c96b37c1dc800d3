//! CLI interface for the knowledge retrieval engine

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use knowledge_rag::{
    knowledge_tools, logging, CorpusSource, DistanceMetric, HashingEmbedder, MetricsCollector,
    RagConfig, RagError, RetrievalEngine, NO_KNOWLEDGE_SENTINEL,
};

#[derive(Parser)]
#[command(name = "knowledge-rag")]
#[command(about = "Paragraph-level retrieval over a knowledge file", long_about = None)]
struct Cli {
    /// JSON config file. Flags below override its values.
    #[arg(long, env = "KNOWLEDGE_RAG_CONFIG")]
    config: Option<PathBuf>,

    /// Knowledge file; paragraphs are separated by blank lines
    #[arg(long, env = "KNOWLEDGE_RAG_FILE")]
    knowledge: Option<PathBuf>,

    /// Embedding dimension of the built-in hashing embedder
    #[arg(long)]
    dimension: Option<usize>,

    /// Distance metric used to rank units
    #[arg(long, value_enum)]
    metric: Option<MetricArg>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(ValueEnum, Clone, Copy)]
enum MetricArg {
    SquaredEuclidean,
    Cosine,
    DotProduct,
}

impl From<MetricArg> for DistanceMetric {
    fn from(arg: MetricArg) -> Self {
        match arg {
            MetricArg::SquaredEuclidean => DistanceMetric::SquaredEuclidean,
            MetricArg::Cosine => DistanceMetric::Cosine,
            MetricArg::DotProduct => DistanceMetric::DotProduct,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Answer one query
    Search {
        query: String,
        /// Number of units to return
        #[arg(short, long)]
        k: Option<usize>,
        /// Print ranked hits with distances as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the units the chunker produced
    Chunks,
    /// Answer queries read line by line from stdin
    Repl {
        #[arg(short, long)]
        k: Option<usize>,
    },
    /// List the registered tool capabilities
    Tools,
    /// Invoke a tool capability with JSON arguments
    Tool {
        name: String,
        /// Arguments as a JSON object, e.g. '{"query": "refunds", "k": 2}'
        args: String,
    },
}

fn load_config(cli: &Cli) -> Result<RagConfig> {
    let mut config = match &cli.config {
        Some(path) => RagConfig::from_json_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => RagConfig::default(),
    };

    if let Some(knowledge) = &cli.knowledge {
        config.knowledge_file = knowledge.clone();
    }
    if let Some(dimension) = cli.dimension {
        config.dimension = dimension;
    }
    if let Some(metric) = cli.metric {
        config.metric = metric.into();
    }
    config.validate()?;
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    logging::init(&config.log_level);

    let embedder = HashingEmbedder::new(config.dimension)?;
    let source = CorpusSource::path(&config.knowledge_file);
    let engine: RetrievalEngine = RetrievalEngine::build_from_source_with_metric(config.metric, &source, &embedder);

    match cli.command {
        Commands::Search { query, k, json } => {
            let k = k.unwrap_or(config.top_k);
            if json {
                let hits = match engine.search_hits(&query, k, &embedder) {
                    Err(RagError::NotBuilt) => Vec::new(),
                    other => other?,
                };
                println!("{}", serde_json::to_string_pretty(&hits)?);
            } else {
                println!("{}", engine.search(&query, k, &embedder));
            }
        }
        Commands::Chunks => {
            if engine.units().is_empty() {
                println!("No units: {}", engine.report());
            } else {
                println!("Units ({} total):", engine.len());
                for unit in engine.units() {
                    println!("[{}] {}", unit.id, unit.content);
                }
            }
        }
        Commands::Repl { k } => {
            let k = k.unwrap_or(config.top_k);
            let mut metrics = MetricsCollector::new();
            let stdout = io::stdout();
            let mut out = stdout.lock();

            for line in io::stdin().lock().lines() {
                let line = line?;
                let query = line.trim();
                if query.is_empty() {
                    continue;
                }

                let start = Instant::now();
                let answer = engine.search(query, k, &embedder);
                metrics.record_query(start.elapsed(), answer != NO_KNOWLEDGE_SENTINEL);

                writeln!(out, "{}\n", answer)?;
            }
            eprintln!("{}", metrics.summary());
        }
        Commands::Tools => {
            let tools = knowledge_tools(&engine, &embedder);
            println!("{}", serde_json::to_string_pretty(&tools.describe())?);
        }
        Commands::Tool { name, args } => {
            let args: serde_json::Value =
                serde_json::from_str(&args).context("tool arguments must be JSON")?;
            let tools = knowledge_tools(&engine, &embedder);
            println!("{}", tools.call(&name, args)?);
        }
    }
    Ok(())
}
