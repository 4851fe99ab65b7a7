//! Grapher Facts
//!
//! Extracts structured facts from text written in a Prolog-like fact notation
//! and turns them into a folder-of-notes knowledge graph.
//!
//! # Overview
//!
//! A fact database is flat text made of statements such as
//! `person('Ada Lovelace').` or `wrote(ada, 'Notes on the Engine').`.
//! The extractor scans arbitrary text for these statements and routes each
//! one by its arity:
//!
//! - arity 1 facts land in an index of predicate name to a *set* of arguments;
//! - arity 2 facts land in an ordered *list* of `(predicate, subject, object)`
//!   triples, duplicates included.
//!
//! Anything else (prose, arity 0 or 3+ facts, nested terms) is skipped
//! silently.
//!
//! # Architecture
//!
//! ```text
//! Document text → TextChunker → FactGenerator (LlmProvider) → fact text
//! fact text → FactExtractor → Extraction → VaultWriter → notes on disk
//! ```
//!
//! # Example Usage
//!
//! ```
//! use grapher_facts::extract;
//!
//! let extraction = extract("
//!     person('ada').
//!     person(charles).
//!     knows(ada, 'charles').
//! ");
//!
//! assert_eq!(extraction.arity1["person"].len(), 2);
//! assert_eq!(extraction.arity2[0].predicate, "knows");
//! ```

#![warn(missing_docs)]

mod chunking;
mod config;
mod error;
mod generate;
mod parser;
pub mod prompt;
mod types;
mod vault;


pub use chunking::{chunk_text, TextChunker};
pub use config::{
    ChunkStrategy, ChunkerConfig, ExtractorConfig, GeneratorConfig, GrapherConfig, VaultConfig,
};
pub use error::{ConfigError, VaultError};
pub use generate::{ChunkFailure, FactGenerator, Generation, LlmProvider};
pub use parser::{extract, facts, strip_code_fences, FactExtractor};
pub use types::{Arguments, Arity1Index, Extraction, Fact, Relation};
pub use vault::{VaultReport, VaultWriter};
