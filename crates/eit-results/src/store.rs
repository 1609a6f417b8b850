//! Solved-graph persistence.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::ResultsResult;
use crate::types::SolvedGraph;

/// Pretty-printed JSON text of `graph`.
pub fn to_json_string(graph: &SolvedGraph) -> ResultsResult<String> {
    Ok(serde_json::to_string_pretty(graph)?)
}

pub fn from_json_str(text: &str) -> ResultsResult<SolvedGraph> {
    Ok(serde_json::from_str(text)?)
}

/// Write `graph` to `path`, creating parent directories as needed.
pub fn save_json(path: &Path, graph: &SolvedGraph) -> ResultsResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, to_json_string(graph)?)?;
    debug!(path = %path.display(), nodes = graph.len(), "saved solved graph");
    Ok(())
}

pub fn load_json(path: &Path) -> ResultsResult<SolvedGraph> {
    let content = fs::read_to_string(path)?;
    from_json_str(&content)
}
