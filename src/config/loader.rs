use std::fs;
use std::io::{BufReader, Read};
use std::path::Path;

use super::query::QueryConfig;
use crate::errors::{QueryError, Result};

/// Read a query file into memory.
pub(crate) fn read_query_file(path: &Path) -> std::result::Result<String, std::io::Error> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Parse a query from TOML and validate its parameters.
pub fn parse_query(contents: &str) -> Result<QueryConfig> {
    let config = toml::from_str::<QueryConfig>(contents)
        .map_err(|e| QueryError::config(format!("failed to parse query: {}", e)))?;
    config.validate()?;
    Ok(config)
}

/// Load and validate a query file.
pub fn load_query(path: &Path) -> Result<QueryConfig> {
    let contents = read_query_file(path).map_err(|e| {
        log::warn!("Failed to read query file {}: {}", path.display(), e);
        QueryError::io(path, &e)
    })?;

    let config = parse_query(&contents)?;
    log::debug!(
        "Loaded query '{}' from {} ({} stages)",
        config.display_name(),
        path.display(),
        config.stages.len()
    );
    Ok(config)
}
