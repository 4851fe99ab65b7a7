//! Generate command implementation.

use super::read_input;
use crate::cli::GenerateArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use grapher_facts::{
    FactGenerator, Generation, GrapherConfig, LlmProvider, TextChunker, VaultReport, VaultWriter,
};
use grapher_llm::{LlmConfig, Provider};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Result of a generate run
#[derive(Debug)]
pub struct GenerateOutcome {
    /// Generated fact text and per-chunk failures
    pub generation: Generation,

    /// Vault summary when `--vault` was given
    pub vault: Option<VaultReport>,
}

/// Execute the generate command.
pub fn execute_generate(args: GenerateArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let provider = Provider::from_config(&llm_config(&args, config))?;
    let text = read_input(args.file.as_deref(), args.stdin)?;

    let outcome = generate_with(provider, &text, &args, config)?;

    println!(
        "{}",
        formatter.format_generation(&outcome.generation, args.out.as_deref())?
    );
    if let (Some(report), Some(dir)) = (&outcome.vault, &args.vault) {
        println!("{}", formatter.format_vault_report(report, dir)?);
    }

    Ok(())
}

/// Generate facts for `text` with `provider`, then write the requested
/// outputs.
pub fn generate_with<L: LlmProvider>(
    provider: L,
    text: &str,
    args: &GenerateArgs,
    config: &Config,
) -> Result<GenerateOutcome> {
    let settings = generator_settings(args, config)?;

    let chunker = TextChunker::from_config(&settings.chunker);
    let generator = FactGenerator::new(provider, settings.generator);
    let generation = generator.generate_from_text(text, &chunker);

    if let Some(out) = &args.out {
        append_facts(out, &generation.facts)?;
        info!(out = %out.display(), "appended facts");
    }

    let vault = match &args.vault {
        Some(dir) => Some(VaultWriter::new(settings.vault).write(&generation.extraction(), dir)?),
        None => None,
    };

    Ok(GenerateOutcome { generation, vault })
}

/// Provider settings with command-line overrides applied.
///
/// Switching engines drops the configured model and endpoint, which belong
/// to the previous engine.
fn llm_config(args: &GenerateArgs, config: &Config) -> LlmConfig {
    let mut llm = config.llm.clone();
    if let Some(engine) = args.engine.map(grapher_llm::Engine::from) {
        if engine != llm.engine {
            llm = LlmConfig {
                engine,
                model: None,
                endpoint: None,
                api_key_env: None,
                ..llm
            };
        }
    }
    if let Some(model) = &args.model {
        llm.model = Some(model.clone());
    }
    llm
}

fn generator_settings(args: &GenerateArgs, config: &Config) -> Result<GrapherConfig> {
    let mut settings = config.facts.clone();
    if let Some(size) = args.size {
        settings.chunker.max_chunk_size = size;
    }
    if let Some(path) = &args.ontology {
        settings.generator.ontology = fs::read_to_string(path).map_err(|e| {
            CliError::InvalidInput(format!("Cannot read ontology '{}': {}", path.display(), e))
        })?;
    }
    if let Some(domain) = &args.review {
        settings.generator.review_domain = Some(domain.clone());
    }
    settings.validate()?;
    Ok(settings)
}

/// Append to the fact file, creating it and its parent directory as needed
fn append_facts(path: &Path, facts: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(facts.as_bytes())?;
    Ok(())
}
