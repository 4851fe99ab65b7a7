//! Command implementations.

pub mod chunk;
pub mod configure;
pub mod extract;
pub mod generate;
pub mod vault;

pub use self::chunk::execute_chunk;
pub use self::configure::execute_config;
pub use self::extract::execute_extract;
pub use self::generate::execute_generate;
pub use self::vault::execute_vault;

use crate::error::{CliError, Result};
use std::fs;
use std::io::{self, Read};
use std::path::Path;

/// Read command input from a file or stdin.
pub(crate) fn read_input(file: Option<&Path>, stdin: bool) -> Result<String> {
    if stdin {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else if let Some(path) = file {
        fs::read_to_string(path).map_err(|e| {
            CliError::InvalidInput(format!("Cannot read '{}': {}", path.display(), e))
        })
    } else {
        Err(CliError::InvalidInput(
            "Must specify either a file or --stdin".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_input_requires_source() {
        let result = read_input(None, false);
        assert!(matches!(result, Err(CliError::InvalidInput(_))));
    }

    #[test]
    fn test_read_input_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("facts.pl");
        fs::write(&path, "person(ada).").unwrap();

        assert_eq!(read_input(Some(path.as_path()), false).unwrap(), "person(ada).");
    }

    #[test]
    fn test_read_input_missing_file() {
        let dir = TempDir::new().unwrap();
        let result = read_input(Some(dir.path().join("missing.pl").as_path()), false);
        assert!(matches!(result, Err(CliError::InvalidInput(msg)) if msg.contains("missing.pl")));
    }
}
