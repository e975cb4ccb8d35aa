use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod codepoint;
mod config;
mod semantic;

use config::Config;
use semantic::{EmbeddingModel, SemanticSearch};

/// Fixed query for the `demo` command
pub const DEMO_QUERY: &str = "pets playing outdoors";

/// Fixed candidate documents for the `demo` command
pub const DEMO_DOCUMENTS: [&str; 4] = [
    "cats playing in a garden",
    "a dog running in a park",
    "programming is fun",
    "analyzing data with machine learning",
];

fn init_logging() {
    // stdout carries command output, logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn load_search() -> anyhow::Result<SemanticSearch<EmbeddingModel>> {
    let config = Config::load()?;
    Ok(SemanticSearch::new(
        config.semantic_search.clone(),
        config.models_dir(),
    ))
}

fn main() -> anyhow::Result<()> {
    init_logging();

    let args = cli::Args::parse();

    match args.command.unwrap_or(cli::Command::Demo {}) {
        cli::Command::Codepoints { text } => {
            let text = match text {
                Some(text) => text,
                None => {
                    println!("Input: {}", codepoint::SAMPLE_TEXT);
                    codepoint::SAMPLE_TEXT.to_string()
                }
            };
            println!("{}", serde_json::to_string(&codepoint::vectorize(&text))?);
        }

        cli::Command::Decode { codes } => {
            println!("{}", codepoint::devectorize(&codes)?);
        }

        cli::Command::Model {} => {
            let search = load_search()?;
            search.initialize()?;
            println!("model: {}", search.model_name());
            println!("dimensions: {}", search.dimensions()?);
        }

        cli::Command::Embed { text } => {
            let embedding = load_search()?.vectorize(&text)?;
            println!("{}", serde_json::to_string(&embedding)?);
        }

        cli::Command::Similarity { text1, text2 } => {
            let score = load_search()?.similarity(&text1, &text2)?;
            println!("{score:.4}");
        }

        cli::Command::Search { query, documents } => {
            let result = load_search()?.find_most_similar(&query, &documents)?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }

        cli::Command::Demo {} => {
            let documents: Vec<String> = DEMO_DOCUMENTS.iter().map(|d| d.to_string()).collect();
            let result = load_search()?.find_most_similar(DEMO_QUERY, &documents)?;

            println!("Query: {DEMO_QUERY}");
            println!("Most similar: {} (score: {:.4})", result.document, result.score);
        }
    }

    Ok(())
}
