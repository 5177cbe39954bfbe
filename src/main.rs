use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use std::sync::Arc;

use tqa_core::ChunkRetriever;
use tqa_embed::EmbeddingClient;
use tqa_rag::{
    chunk_corpus, load_course_documents, load_forum_threads, save_chunks, ChunkerConfig,
    IndexBuilder, SemanticRetriever, StorePaths,
};

#[derive(Parser)]
#[command(name = "tqa")]
#[command(about = "Retrieval pipeline for the course/forum QA assistant", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Split cleaned course and forum JSON into overlapping chunks
    Chunk {
        /// Maximum words per chunk
        #[arg(long, default_value_t = 300)]
        max_words: usize,
        /// Words shared between consecutive chunks
        #[arg(long, default_value_t = 50)]
        overlap: usize,
    },
    /// Embed the chunk store and build the flat search index
    Build,
    /// Retrieve the top-k chunks for a question
    Query {
        /// The question to search for
        question: String,
        /// Number of chunks to retrieve
        #[arg(short, default_value_t = 3)]
        k: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let paths = StorePaths::from_env();

    match cli.command {
        Commands::Chunk { max_words, overlap } => {
            let config = ChunkerConfig { max_words, overlap };
            let documents = load_course_documents(&paths.course_input)?;
            let threads = load_forum_threads(&paths.forum_input)?;

            let chunks = chunk_corpus(&documents, &threads, &config)?;
            save_chunks(&paths.chunks, &chunks)?;

            println!(
                "{} Created {} chunks and saved to {}",
                "✅".green(),
                chunks.len(),
                paths.chunks.display()
            );
        }
        Commands::Build => {
            let embedder = Arc::new(EmbeddingClient::from_env()?);
            let builder = IndexBuilder::new(embedder);

            println!("{} Generating embeddings...", "🧮".blue());
            let built = builder.build_and_persist(&paths).await?;

            println!(
                "{} Index with {} vectors saved to {}",
                "✅".green(),
                built.index.len(),
                paths.index.display()
            );
            println!(
                "{} Metadata saved to {}",
                "✅".green(),
                paths.metadata.display()
            );
        }
        Commands::Query { question, k } => {
            let embedder = Arc::new(EmbeddingClient::from_env()?);
            let retriever = SemanticRetriever::load(&paths, embedder)?;

            let results = retriever.retrieve(&question, k).await?;
            if results.is_empty() {
                println!("{} No chunks retrieved", "⚠️".yellow());
            }

            for (i, chunk) in results.iter().enumerate() {
                println!(
                    "\n{} {} [source: {}]",
                    format!("Result {}", i + 1).bold(),
                    format!("(distance {:.4})", chunk.distance).dimmed(),
                    chunk.source.cyan()
                );
                println!("{}", chunk.text);
            }
        }
    }

    Ok(())
}
