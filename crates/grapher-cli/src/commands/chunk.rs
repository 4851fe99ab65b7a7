//! Chunk command implementation.

use super::read_input;
use crate::cli::ChunkArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use grapher_facts::{ChunkStrategy, ChunkerConfig, GrapherConfig, TextChunker};
use tracing::info;

/// Execute the chunk command.
pub fn execute_chunk(args: ChunkArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let chunker_config = chunker_config(&args, config)?;
    let text = read_input(args.file.as_deref(), args.stdin)?;

    let chunks = TextChunker::from_config(&chunker_config).chunk(&text);
    info!(
        chunks = chunks.len(),
        max_chunk_size = chunker_config.max_chunk_size,
        "chunked text"
    );
    println!("{}", formatter.format_chunks(&chunks)?);

    Ok(())
}

/// Apply command-line overrides to the configured chunker settings.
fn chunker_config(args: &ChunkArgs, config: &Config) -> Result<ChunkerConfig> {
    let mut settings = config.facts.clone();
    if let Some(size) = args.size {
        settings.chunker.max_chunk_size = size;
    }
    if args.by_paragraph {
        settings.chunker.strategy = ChunkStrategy::ByParagraph;
    }
    settings.validate()?;

    let GrapherConfig { chunker, .. } = settings;
    Ok(chunker)
}
