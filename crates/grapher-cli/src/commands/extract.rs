//! Extract command implementation.

use super::read_input;
use crate::cli::ExtractArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use grapher_facts::{Extraction, FactExtractor};
use tracing::info;

/// Execute the extract command.
pub fn execute_extract(args: ExtractArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let text = read_input(args.file.as_deref(), args.stdin)?;
    let extraction = extract_with(&text, args.strip_fences, config);

    info!(
        predicates = extraction.arity1.len(),
        relations = extraction.arity2.len(),
        "extraction finished"
    );
    println!("{}", formatter.format_extraction(&extraction)?);

    Ok(())
}

/// Extract facts, letting `--strip-fences` switch fence removal on.
pub(crate) fn extract_with(text: &str, strip_fences: bool, config: &Config) -> Extraction {
    let mut extractor_config = config.facts.extractor.clone();
    extractor_config.strip_code_fences |= strip_fences;
    FactExtractor::new(extractor_config).extract(text)
}
