//! Text chunking for long source documents
//!
//! Sizes are measured in characters, not bytes, so multi-byte text is never
//! split inside a code point.

use crate::config::{ChunkStrategy, ChunkerConfig};
use regex::Regex;
use std::sync::OnceLock;

/// A line break followed by a line holding at most spaces or tabs.
/// Accepts both `\n` and `\r\n` line endings.
static BLANK_LINE: OnceLock<Regex> = OnceLock::new();

#[allow(clippy::expect_used)]
fn blank_line() -> &'static Regex {
    BLANK_LINE.get_or_init(|| {
        Regex::new(r"\r?\n[ \t]*\r?\n").expect("blank line pattern is a valid literal regex")
    })
}

/// Chunks text according to the specified strategy
#[derive(Debug, Clone)]
pub struct TextChunker {
    strategy: ChunkStrategy,
    max_chunk_size: usize,
}

impl TextChunker {
    /// Create a new text chunker
    pub fn new(strategy: ChunkStrategy, max_chunk_size: usize) -> Self {
        Self {
            strategy,
            max_chunk_size,
        }
    }

    /// Create a chunker from configuration
    pub fn from_config(config: &ChunkerConfig) -> Self {
        Self::new(config.strategy, config.max_chunk_size)
    }

    /// Chunk the given text
    ///
    /// Whitespace-only text produces no chunks.
    pub fn chunk(&self, text: &str) -> Vec<String> {
        match self.strategy {
            ChunkStrategy::ByWord => self.chunk_by_word(text),
            ChunkStrategy::ByParagraph => self.chunk_by_paragraph(text),
        }
    }

    /// Greedily pack words, joined by single spaces, up to the limit.
    /// A word longer than the limit becomes a chunk of its own.
    fn chunk_by_word(&self, text: &str) -> Vec<String> {
        self.combine_until_limit(text.split_whitespace(), " ")
    }

    /// Pack paragraphs (separated by blank or whitespace-only lines) up to the limit, falling back
    /// to word packing for paragraphs that exceed it on their own
    fn chunk_by_paragraph(&self, text: &str) -> Vec<String> {
        let mut chunks = Vec::new();
        let mut fitting = Vec::new();

        for paragraph in blank_line().split(text).map(str::trim).filter(|p| !p.is_empty()) {
            if paragraph.chars().count() > self.max_chunk_size {
                chunks.extend(self.combine_until_limit(fitting.drain(..), "\n\n"));
                chunks.extend(self.chunk_by_word(paragraph));
            } else {
                fitting.push(paragraph);
            }
        }
        chunks.extend(self.combine_until_limit(fitting, "\n\n"));

        chunks
    }

    /// Combine elements with `separator` until they reach the size limit
    fn combine_until_limit<'a, I>(&self, elements: I, separator: &str) -> Vec<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let separator_len = separator.chars().count();
        let mut chunks = Vec::new();
        let mut current_chunk = String::new();
        let mut current_len = 0;

        for element in elements {
            let element_len = element.chars().count();

            if current_chunk.is_empty() {
                current_chunk.push_str(element);
                current_len = element_len;
            } else if current_len + separator_len + element_len <= self.max_chunk_size {
                current_chunk.push_str(separator);
                current_chunk.push_str(element);
                current_len += separator_len + element_len;
            } else {
                chunks.push(std::mem::take(&mut current_chunk));
                current_chunk.push_str(element);
                current_len = element_len;
            }
        }

        if !current_chunk.is_empty() {
            chunks.push(current_chunk);
        }

        chunks
    }
}

/// Split `text` into word-packed chunks of at most `chunk_size` characters
pub fn chunk_text(text: &str, chunk_size: usize) -> Vec<String> {
    TextChunker::new(ChunkStrategy::ByWord, chunk_size).chunk(text)
}
