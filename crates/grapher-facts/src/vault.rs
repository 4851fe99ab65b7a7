//! Materialize an extraction as a folder-of-notes knowledge graph
//!
//! Layout produced under the output directory:
//!
//! ```text
//! out/
//! ├── person/
//! │   ├── person.md      "%% Waypoint \n%% \n" (appended)
//! │   ├── ada.md         "# ada\n\n" then one "knows::[[babbage]]" line per relation
//! │   └── babbage.md
//! └── uncategorized/
//!     └── engine.md      relations whose subject has no arity 1 category
//! ```

use crate::config::VaultConfig;
use crate::error::VaultError;
use crate::types::Extraction;
use serde::Serialize;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const WAYPOINT: &str = "%% Waypoint \n%% \n";

/// Summary of a vault write
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct VaultReport {
    /// Category folders created (one per arity 1 predicate)
    pub folders: usize,

    /// Entity notes written (one per distinct arity 1 argument)
    pub notes: usize,

    /// Relation links appended
    pub links: usize,

    /// Links that went to the uncategorized folder
    pub uncategorized: usize,
}

/// Writes extractions to disk as Markdown notes
#[derive(Debug, Clone, Default)]
pub struct VaultWriter {
    config: VaultConfig,
}

impl VaultWriter {
    /// Create a new vault writer
    pub fn new(config: VaultConfig) -> Self {
        Self { config }
    }

    /// Write `extraction` below `out_dir`.
    ///
    /// Entity notes are overwritten; waypoint headers and relation links are
    /// appended, so writing into an existing vault adds to it.
    pub fn write(&self, extraction: &Extraction, out_dir: &Path) -> Result<VaultReport, VaultError> {
        let mut report = VaultReport::default();
        create_dir(out_dir)?;

        for (predicate, arguments) in &extraction.arity1 {
            let folder = out_dir.join(path_component(predicate));
            create_dir(&folder)?;
            report.folders += 1;

            append(&note_path(&folder, predicate), WAYPOINT)?;

            for argument in arguments {
                let path = note_path(&folder, argument);
                fs::write(&path, format!("# {}\n\n", argument))
                    .map_err(|e| VaultError::io(&path, e))?;
                report.notes += 1;
            }
            debug!(predicate = %predicate, notes = arguments.len(), "wrote category");
        }

        for relation in &extraction.arity2 {
            let link = format!("{}::[[{}]]\n", relation.predicate, relation.object);

            let folder = match extraction.category_of(&relation.subject) {
                Some(category) => out_dir.join(path_component(category)),
                None => {
                    let folder = out_dir.join(path_component(&self.config.uncategorized_dir));
                    warn!(
                        relation = %relation,
                        folder = %folder.display(),
                        "no arity 1 fact names the subject, saving as uncategorized"
                    );
                    create_dir(&folder)?;
                    report.uncategorized += 1;
                    folder
                }
            };

            append(&note_path(&folder, &relation.subject), &link)?;
            report.links += 1;
        }

        info!(
            out_dir = %out_dir.display(),
            folders = report.folders,
            notes = report.notes,
            links = report.links,
            uncategorized = report.uncategorized,
            "vault written"
        );

        Ok(report)
    }
}

fn note_path(folder: &Path, name: &str) -> PathBuf {
    folder.join(format!("{}.md", path_component(name)))
}

/// Make a fact value usable as a single path component
fn path_component(value: &str) -> String {
    match value {
        "" | "." | ".." => "_".to_string(),
        _ => value
            .chars()
            .map(|c| match c {
                '/' | '\\' | '\0' => '_',
                c => c,
            })
            .collect(),
    }
}

fn create_dir(path: &Path) -> Result<(), VaultError> {
    fs::create_dir_all(path).map_err(|e| VaultError::io(path, e))
}

fn append(path: &Path, contents: &str) -> Result<(), VaultError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .and_then(|mut file| file.write_all(contents.as_bytes()))
        .map_err(|e| VaultError::io(path, e))
}
