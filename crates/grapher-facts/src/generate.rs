//! Fact generation: text chunks in, fact text out
//!
//! Each chunk is sent to a language model together with an ontology prompt.
//! Replies are cleaned of code fences and concatenated into one fact file.
//! A chunk that fails leaves an `Error: ...` line in the output and the run
//! moves on to the next chunk.

use crate::chunking::TextChunker;
use crate::config::GeneratorConfig;
use crate::parser::{extract, strip_code_fences};
use crate::prompt::{arity_two_prompt, correctness_check_prompt};
use crate::types::Extraction;
use serde::Serialize;
use std::fmt;
use tracing::{debug, info, warn};

/// A text completion backend
pub trait LlmProvider {
    /// Error type for generation failures
    type Error: fmt::Display;

    /// Complete `text` under the instructions in `prompt`
    fn generate(&self, prompt: &str, text: &str) -> Result<String, Self::Error>;
}

/// A chunk whose facts could not be generated
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChunkFailure {
    /// 1-based position of the chunk
    pub chunk: usize,

    /// What went wrong
    pub message: String,
}

/// Output of a generation run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Generation {
    /// Fact text, one reply per chunk, with `Error: ...` lines for failures
    pub facts: String,

    /// Number of chunks processed
    pub chunks: usize,

    /// Chunks that produced no facts
    pub failures: Vec<ChunkFailure>,
}

impl Generation {
    /// Extract the generated facts
    pub fn extraction(&self) -> Extraction {
        extract(&self.facts)
    }

    /// Chunks that produced facts
    pub fn succeeded(&self) -> usize {
        self.chunks - self.failures.len()
    }
}

/// Generates fact text from document chunks
#[derive(Debug, Clone)]
pub struct FactGenerator<L> {
    provider: L,
    config: GeneratorConfig,
}

impl<L: LlmProvider> FactGenerator<L> {
    /// Create a new generator
    pub fn new(provider: L, config: GeneratorConfig) -> Self {
        Self { provider, config }
    }

    /// Completion backend
    pub fn provider(&self) -> &L {
        &self.provider
    }

    /// Chunk `text` and generate facts for every chunk
    pub fn generate_from_text(&self, text: &str, chunker: &TextChunker) -> Generation {
        if text.trim().is_empty() {
            warn!("input text is empty, nothing to generate");
        }
        self.generate_facts(&chunker.chunk(text))
    }

    /// Generate facts for each chunk in order
    pub fn generate_facts(&self, chunks: &[String]) -> Generation {
        let prompt = arity_two_prompt(&self.config.ontology);
        let mut generation = Generation {
            chunks: chunks.len(),
            ..Generation::default()
        };

        for (index, chunk) in chunks.iter().enumerate() {
            let position = index + 1;
            info!(chunk = position, total = chunks.len(), "processing chunk");

            match self.facts_for_chunk(&prompt, chunk) {
                Ok(facts) => {
                    debug!(chunk = position, bytes = facts.len(), "chunk produced facts");
                    generation.facts.push_str(&facts);
                    if !facts.ends_with('\n') {
                        generation.facts.push('\n');
                    }
                }
                Err(message) => {
                    warn!(chunk = position, error = %message, "fact generation failed");
                    generation.facts.push_str(&format!("Error: {}\n", message));
                    generation.failures.push(ChunkFailure {
                        chunk: position,
                        message,
                    });
                }
            }
        }

        info!(
            chunks = generation.chunks,
            failures = generation.failures.len(),
            "fact generation finished"
        );
        generation
    }

    fn facts_for_chunk(&self, prompt: &str, chunk: &str) -> Result<String, String> {
        let reply = self.provider.generate(prompt, chunk).map_err(|e| e.to_string())?;
        if reply.trim().is_empty() {
            return Err("empty response from model".to_string());
        }
        let facts = strip_code_fences(&reply);

        match &self.config.review_domain {
            Some(domain) => Ok(self.review(domain, chunk, facts)),
            None => Ok(facts),
        }
    }

    /// Ask the model to correct `facts` against `chunk`; keeps the first
    /// draft when the review fails or comes back empty
    fn review(&self, domain: &str, chunk: &str, facts: String) -> String {
        let prompt = correctness_check_prompt(domain, &self.config.ontology);
        let input = format!("Text:\n{}\n\nProlog:\n{}", chunk, facts);

        match self.provider.generate(&prompt, &input) {
            Ok(reviewed) if !reviewed.trim().is_empty() => strip_code_fences(&reviewed),
            Ok(_) => {
                warn!("review returned nothing, keeping generated facts");
                facts
            }
            Err(e) => {
                warn!(error = %e, "review failed, keeping generated facts");
                facts
            }
        }
    }
}
