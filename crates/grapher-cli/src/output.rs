//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use grapher_facts::{Extraction, Generation, VaultReport};
use std::path::Path;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format an extraction.
    pub fn format_extraction(&self, extraction: &Extraction) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(extraction)?),
            OutputFormat::Table => Ok(self.format_extraction_table(extraction)),
            OutputFormat::Quiet => Ok(format_extraction_quiet(extraction)),
        }
    }

    /// Format an extraction as two tables, one per arity.
    fn format_extraction_table(&self, extraction: &Extraction) -> String {
        if extraction.is_empty() {
            return self.colorize("No facts found.", "yellow");
        }

        let mut sections = Vec::new();

        if !extraction.arity1.is_empty() {
            let mut builder = Builder::default();
            builder.push_record(["Predicate", "Arguments"]);
            for (predicate, arguments) in &extraction.arity1 {
                let joined = arguments.iter().map(String::as_str).collect::<Vec<_>>().join(", ");
                builder.push_record([predicate.as_str(), joined.as_str()]);
            }
            sections.push(render(builder));
        }

        if !extraction.arity2.is_empty() {
            let mut builder = Builder::default();
            builder.push_record(["Relation", "Subject", "Object"]);
            for relation in &extraction.arity2 {
                builder.push_record([
                    relation.predicate.as_str(),
                    relation.subject.as_str(),
                    relation.object.as_str(),
                ]);
            }
            sections.push(render(builder));
        }

        sections.push(self.info(&format!(
            "{} predicate(s), {} fact(s)",
            extraction.arity1.len() + distinct_relations(extraction),
            extraction.fact_count()
        )));

        sections.join("\n")
    }

    /// Format text chunks.
    pub fn format_chunks(&self, chunks: &[String]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(chunks)?),
            OutputFormat::Quiet => Ok(chunks.join("\n")),
            OutputFormat::Table => {
                if chunks.is_empty() {
                    return Ok(self.colorize("No text to chunk.", "yellow"));
                }
                let total = chunks.len();
                let blocks: Vec<String> = chunks
                    .iter()
                    .enumerate()
                    .map(|(i, chunk)| {
                        let header = format!(
                            "--- chunk {}/{} ({} chars) ---",
                            i + 1,
                            total,
                            chunk.chars().count()
                        );
                        format!("{}\n{}", self.colorize(&header, "cyan"), chunk)
                    })
                    .collect();
                Ok(blocks.join("\n"))
            }
        }
    }

    /// Format the outcome of a generate run.
    ///
    /// Without `out` the fact text itself is part of the output.
    pub fn format_generation(&self, generation: &Generation, out: Option<&Path>) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(generation)?),
            OutputFormat::Quiet => Ok(match out {
                Some(path) => path.display().to_string(),
                None => generation.facts.trim_end().to_string(),
            }),
            OutputFormat::Table => {
                if generation.chunks == 0 {
                    return Ok(self.warning("No text to generate facts from."));
                }

                let mut lines = Vec::new();
                if out.is_none() && !generation.facts.trim().is_empty() {
                    lines.push(generation.facts.trim_end().to_string());
                }
                let summary = format!(
                    "Generated facts for {}/{} chunk(s)",
                    generation.succeeded(),
                    generation.chunks
                );
                lines.push(match out {
                    Some(path) => self.success(&format!("{}, appended to {}", summary, path.display())),
                    None => self.success(&summary),
                });
                for failure in &generation.failures {
                    lines.push(self.error(&format!("chunk {}: {}", failure.chunk, failure.message)));
                }
                Ok(lines.join("\n"))
            }
        }
    }

    /// Format the outcome of a vault write.
    pub fn format_vault_report(&self, report: &VaultReport, out_dir: &Path) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&serde_json::json!({
                "out_dir": out_dir.display().to_string(),
                "folders": report.folders,
                "notes": report.notes,
                "links": report.links,
                "uncategorized": report.uncategorized,
            }))?),
            OutputFormat::Quiet => Ok(out_dir.display().to_string()),
            OutputFormat::Table => {
                let mut lines = vec![self.success(&format!(
                    "Wrote {} folder(s), {} note(s), {} link(s) to {}",
                    report.folders,
                    report.notes,
                    report.links,
                    out_dir.display()
                ))];
                if report.uncategorized > 0 {
                    lines.push(self.warning(&format!(
                        "{} link(s) had no category and were saved as uncategorized",
                        report.uncategorized
                    )));
                }
                Ok(lines.join("\n"))
            }
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}

/// One fact per line, in a form the extractor reads back unchanged.
fn format_extraction_quiet(extraction: &Extraction) -> String {
    let unary = extraction.arity1.iter().flat_map(|(predicate, arguments)| {
        arguments.iter().map(move |argument| {
            grapher_facts::Fact {
                name: predicate.clone(),
                arguments: grapher_facts::Arguments::Unary(argument.clone()),
            }
            .to_string()
        })
    });
    let binary = extraction.arity2.iter().map(ToString::to_string);

    unary.chain(binary).collect::<Vec<_>>().join("\n")
}

/// Relation names not already counted as arity 1 predicates
fn distinct_relations(extraction: &Extraction) -> usize {
    let mut seen = std::collections::HashSet::new();
    extraction
        .arity2
        .iter()
        .filter(|r| !extraction.arity1.contains_key(&r.predicate))
        .filter(|r| seen.insert(r.predicate.as_str()))
        .count()
}

fn render(builder: Builder) -> String {
    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));
    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use grapher_facts::extract;

    fn sample() -> Extraction {
        extract("person(ada). person('Charles Babbage'). knows(ada, 'Charles Babbage'). knows(ada, tom).")
    }

    #[test]
    fn test_json_format() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.format_extraction(&sample()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["arity1"]["person"][1], "Charles Babbage");
        assert_eq!(value["arity2"][1]["object"], "tom");
    }

    #[test]
    fn test_table_format() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_extraction(&sample()).unwrap();

        assert!(output.contains("Predicate"));
        assert!(output.contains("Relation"));
        assert!(output.contains("Charles Babbage"));
        assert!(output.contains("2 predicate(s), 4 fact(s)"));
    }

    #[test]
    fn test_quiet_format_reads_back() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let extraction = sample();
        let output = formatter.format_extraction(&extraction).unwrap();

        assert_eq!(
            output,
            "person(ada).\nperson('Charles Babbage').\nknows(ada, 'Charles Babbage').\nknows(ada, tom)."
        );
        assert_eq!(extract(&output), extraction);
    }

    #[test]
    fn test_empty_extraction() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_extraction(&Extraction::default()).unwrap();
        assert_eq!(output, "No facts found.");
    }

    #[test]
    fn test_chunk_formats() {
        let chunks = vec!["one two".to_string(), "three".to_string()];

        let table = Formatter::new(OutputFormat::Table, false).format_chunks(&chunks).unwrap();
        assert!(table.contains("--- chunk 1/2 (7 chars) ---\none two"));

        let quiet = Formatter::new(OutputFormat::Quiet, false).format_chunks(&chunks).unwrap();
        assert_eq!(quiet, "one two\nthree");

        let json = Formatter::new(OutputFormat::Json, false).format_chunks(&chunks).unwrap();
        let parsed: Vec<String> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, chunks);
    }

    #[test]
    fn test_vault_report_format() {
        let report = VaultReport {
            folders: 1,
            notes: 2,
            links: 3,
            uncategorized: 1,
        };
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_vault_report(&report, Path::new("out")).unwrap();

        assert!(output.contains("✓ Wrote 1 folder(s), 2 note(s), 3 link(s) to out"));
        assert!(output.contains("⚠ 1 link(s)"));
    }

    fn generation() -> Generation {
        Generation {
            facts: "p(a, b).\nError: timeout\n".to_string(),
            chunks: 2,
            failures: vec![grapher_facts::ChunkFailure {
                chunk: 2,
                message: "timeout".to_string(),
            }],
        }
    }

    #[test]
    fn test_generation_table_lists_failures() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_generation(&generation(), None).unwrap();

        assert!(output.starts_with("p(a, b).\nError: timeout"));
        assert!(output.contains("✓ Generated facts for 1/2 chunk(s)"));
        assert!(output.ends_with("✗ chunk 2: timeout"));
    }

    #[test]
    fn test_generation_to_file() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter
            .format_generation(&generation(), Some(Path::new("facts.pl")))
            .unwrap();

        assert!(!output.contains("p(a, b)."));
        assert!(output.contains("appended to facts.pl"));

        let quiet = Formatter::new(OutputFormat::Quiet, false)
            .format_generation(&generation(), None)
            .unwrap();
        assert_eq!(quiet, "p(a, b).\nError: timeout");
    }

    #[test]
    fn test_generation_json() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.format_generation(&generation(), None).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["chunks"], 2);
        assert_eq!(value["failures"][0]["message"], "timeout");
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.success("test"), "✓ test");
        assert_eq!(formatter.error("bad"), "✗ bad");
    }
}
