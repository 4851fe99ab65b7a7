//! Vault command implementation.

use super::extract::extract_with;
use super::read_input;
use crate::cli::VaultArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use grapher_facts::{VaultReport, VaultWriter};
use tracing::info;

/// Execute the vault command.
pub fn execute_vault(args: VaultArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let report = build_vault(&args, config)?;
    println!("{}", formatter.format_vault_report(&report, &args.out)?);
    Ok(())
}

/// Extract facts from the input file and write them below `args.out`.
pub fn build_vault(args: &VaultArgs, config: &Config) -> Result<VaultReport> {
    let mut settings = config.facts.clone();
    if let Some(name) = &args.uncategorized {
        settings.vault.uncategorized_dir = name.clone();
    }
    settings.validate()?;

    let text = read_input(Some(args.file.as_path()), false)?;
    let extraction = extract_with(&text, args.strip_fences, config);
    info!(
        file = %args.file.display(),
        facts = extraction.fact_count(),
        "extracted facts for vault"
    );

    let report = VaultWriter::new(settings.vault).write(&extraction, &args.out)?;
    Ok(report)
}
