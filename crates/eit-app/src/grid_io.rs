//! Intensity grid files.
//!
//! Two formats are accepted: a JSON array of rows (`[[1, 2], [3, 4]]`) and
//! a plain text table with one row per line, values separated by commas
//! and/or whitespace. Blank lines and lines starting with `#` are skipped.

use std::fs;
use std::path::Path;

use eit_graph::IntensityGrid;
use tracing::debug;

use crate::error::{AppError, AppResult};

pub fn parse_grid_json(text: &str) -> AppResult<IntensityGrid> {
    let rows: Vec<Vec<f64>> = serde_json::from_str(text).map_err(|err| AppError::GridParse {
        what: format!("not a JSON array of numeric rows: {err}"),
    })?;
    Ok(IntensityGrid::from_rows(rows)?)
}

pub fn parse_grid_text(text: &str) -> AppResult<IntensityGrid> {
    let mut rows = Vec::new();
    for (lineno, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let row = line
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|tok| !tok.is_empty())
            .map(|tok| {
                tok.parse::<f64>().map_err(|_| AppError::GridParse {
                    what: format!("line {}: '{tok}' is not a number", lineno + 1),
                })
            })
            .collect::<AppResult<Vec<f64>>>()?;
        rows.push(row);
    }
    Ok(IntensityGrid::from_rows(rows)?)
}

/// Read a grid file. `.json` files, or any file whose content starts with
/// `[`, are parsed as JSON; everything else as a text table.
pub fn load_grid(path: &Path) -> AppResult<IntensityGrid> {
    let text = fs::read_to_string(path).map_err(|source| AppError::GridRead {
        path: path.to_path_buf(),
        source,
    })?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
        || text.trim_start().starts_with('[');
    let grid = if is_json {
        parse_grid_json(&text)?
    } else {
        parse_grid_text(&text)?
    };
    debug!(
        path = %path.display(),
        rows = grid.rows(),
        cols = grid.cols(),
        "loaded intensity grid"
    );
    Ok(grid)
}
