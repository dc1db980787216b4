use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use recall_core::config::{expand_path, resolve_with_base, Config, Settings};
use recall_core::Corpus;
use recall_eval::{default_queries, evaluate, load_eval_set, FETCH_K, METRIC_K};
use recall_hybrid::{Method, RetrievalService};
use recall_text::QueryRewriter;

#[derive(Parser)]
#[command(name = "recall", about = "Offline hybrid retrieval over a chunked text corpus")]
struct Cli {
    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Retrieve the top-k chunks for a query
    Query {
        text: String,
        #[arg(short, long, default_value = "hybrid")]
        method: Method,
        /// Results to return (overrides retrieval.default_k)
        #[arg(short)]
        k: Option<usize>,
        /// Corpus JSON file (overrides data.corpus_path)
        #[arg(long)]
        corpus: Option<PathBuf>,
        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },
    /// Compare simple, vector and hybrid retrieval on labeled queries
    Eval {
        #[arg(long)]
        corpus: Option<PathBuf>,
        /// Labeled query set (overrides data.eval_path; built-in set when neither is given)
        #[arg(long)]
        queries: Option<PathBuf>,
        #[arg(long)]
        json: bool,
    },
    /// Show how a query is normalized and expanded
    Expand { text: String },
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_env("RECALL_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr);
    if json { builder.json().init(); } else { builder.init(); }
}

/// The `--corpus` flag wins over `data.corpus_path`; relative paths resolve
/// against the working directory.
fn corpus_path(settings: &Settings, flag: Option<PathBuf>) -> anyhow::Result<PathBuf> {
    let cwd = std::env::current_dir()?;
    Ok(match flag {
        Some(p) => cwd.join(p),
        None => resolve_with_base(&cwd, &settings.data.corpus_path),
    })
}

async fn service_for(settings: &Settings, path: &Path) -> anyhow::Result<RetrievalService> {
    let corpus = Corpus::load_or_empty(path)?;
    let service = RetrievalService::from_settings(&settings.embedding).await;
    service.rebuild(corpus).await?;
    Ok(service)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.json_logs);

    let config = Config::load().map_err(|e| { eprintln!("Error loading config: {e}"); e })?;
    let settings = config.settings()?;

    match cli.command {
        Commands::Query { text, method, k, corpus, json } => {
            let path = corpus_path(&settings, corpus)?;
            let k = k.unwrap_or(settings.retrieval.default_k);
            let service = service_for(&settings, &path).await?;
            let results = service.search(method, text.as_str(), k).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&results)?);
                return Ok(());
            }
            println!("🔍 recall query ({method}, k={k})\n==================");
            println!("Query: {text}");
            println!("Corpus: {} ({} chunks)", path.display(), service.index().len());
            println!("Embedder: {}", service.index().embedder().name());
            println!("\n🔍 Found {} results", results.len());
            for (i, r) in results.iter().enumerate() {
                match r.score {
                    Some(score) => println!("\n  {}. score={score:.4}", i + 1),
                    None => println!("\n  {}.", i + 1),
                }
                println!("     📝 {}", r.text);
            }
        }
        Commands::Eval { corpus, queries, json } => {
            let path = corpus_path(&settings, corpus)?;
            let queries = match queries.or_else(|| settings.data.eval_path.as_deref().map(expand_path)) {
                Some(p) => load_eval_set(&p)?,
                None => default_queries(),
            };
            let service = service_for(&settings, &path).await?;
            let retrievers: Vec<_> = Method::ALL.iter().map(|&m| service.retriever(m)).collect();
            let report = tokio::task::spawn_blocking(move || {
                let refs: Vec<_> = retrievers.iter().map(|r| &**r).collect();
                evaluate(&refs, &queries, FETCH_K, METRIC_K)
            })
            .await??;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
                return Ok(());
            }
            println!("📊 recall eval ({} queries, {} chunks, embedder {})", report.methods.first().map_or(0, |m| m.queries.len()), service.index().len(), service.index().embedder().name());
            print!("\n{report}");
        }
        Commands::Expand { text } => {
            let rewriter = QueryRewriter::new();
            println!("normalized: {}", rewriter.normalize(&text));
            println!("expanded:   {}", rewriter.expand(&text));
        }
    }
    Ok(())
}
