//! CLI command definitions and argument parsing.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// Grapher CLI - Turn Prolog-style fact files into a linked notes graph.
#[derive(Debug, Parser)]
#[command(name = "grapher")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "GRAPHER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (one item per line)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract facts from a fact file and print them
    Extract(ExtractArgs),

    /// Split a text file into chunks
    Chunk(ChunkArgs),

    /// Generate facts from a text file with a language model
    Generate(GenerateArgs),

    /// Write extracted facts as a folder of linked Markdown notes
    Vault(VaultArgs),

    /// Manage the configuration file
    Config(ConfigArgs),
}

/// Arguments for the extract command.
#[derive(Debug, Parser)]
pub struct ExtractArgs {
    /// Fact file to read
    pub file: Option<PathBuf>,

    /// Read facts from stdin
    #[arg(long, conflicts_with = "file")]
    pub stdin: bool,

    /// Remove Markdown code fences before extracting
    #[arg(long)]
    pub strip_fences: bool,
}

/// Arguments for the chunk command.
#[derive(Debug, Parser)]
pub struct ChunkArgs {
    /// Text file to read
    pub file: Option<PathBuf>,

    /// Read text from stdin
    #[arg(long, conflicts_with = "file")]
    pub stdin: bool,

    /// Maximum chunk size in characters
    #[arg(short, long)]
    pub size: Option<usize>,

    /// Pack paragraphs instead of words
    #[arg(long)]
    pub by_paragraph: bool,
}

/// Arguments for the generate command.
#[derive(Debug, Parser)]
pub struct GenerateArgs {
    /// Text file to read
    pub file: Option<PathBuf>,

    /// Read text from stdin
    #[arg(long, conflicts_with = "file")]
    pub stdin: bool,

    /// Append the generated facts to this file instead of printing them
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Also write the facts as linked notes into this directory
    #[arg(long)]
    pub vault: Option<PathBuf>,

    /// Language model backend
    #[arg(long, value_enum)]
    pub engine: Option<CliEngine>,

    /// Model name
    #[arg(short, long)]
    pub model: Option<String>,

    /// File holding the classes and relations the model may use
    #[arg(long)]
    pub ontology: Option<PathBuf>,

    /// Subject area for a second, correcting pass over the facts
    #[arg(long)]
    pub review: Option<String>,

    /// Maximum chunk size in characters
    #[arg(short, long)]
    pub size: Option<usize>,
}

/// Language model backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliEngine {
    /// Anthropic Messages API
    Anthropic,
    /// OpenAI Chat Completions API
    Openai,
    /// Local Ollama server
    Ollama,
}

impl From<CliEngine> for grapher_llm::Engine {
    fn from(engine: CliEngine) -> Self {
        match engine {
            CliEngine::Anthropic => grapher_llm::Engine::Anthropic,
            CliEngine::Openai => grapher_llm::Engine::OpenAi,
            CliEngine::Ollama => grapher_llm::Engine::Ollama,
        }
    }
}

/// Arguments for the vault command.
#[derive(Debug, Parser)]
pub struct VaultArgs {
    /// Fact file to read
    pub file: PathBuf,

    /// Output directory for the notes
    #[arg(short, long)]
    pub out: PathBuf,

    /// Folder name for relations whose subject has no category
    #[arg(long)]
    pub uncategorized: Option<String>,

    /// Remove Markdown code fences before extracting
    #[arg(long)]
    pub strip_fences: bool,
}

/// Arguments for configuration management.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration management actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Print the configuration file path
    Path,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}
