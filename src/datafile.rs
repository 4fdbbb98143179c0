//! Plain-text numeric data files: one number per line.

use crate::error::{AviaryError, Result};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

const BYTE_ORDER_MARK: char = '\u{FEFF}';

/// Parses one value per line. Blank lines are skipped; surrounding whitespace
/// and a leading byte-order mark are ignored.
pub fn parse_values(text: &str, source_name: &str) -> Result<Vec<f64>> {
    let mut values = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim().trim_start_matches(BYTE_ORDER_MARK).trim();
        if line.is_empty() {
            continue;
        }
        let value = line
            .parse::<f64>()
            .map_err(|err| AviaryError::malformed(source_name, idx + 1, format!("'{line}': {err}")))?;
        values.push(value);
    }
    Ok(values)
}

pub fn load_values(path: &Path) -> Result<Vec<f64>> {
    let text = fs::read_to_string(path)?;
    parse_values(&text, &path.display().to_string())
}

pub fn write_values(path: &Path, values: &[f64]) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    for value in values {
        writeln!(writer, "{value:?}")?;
    }
    writer.flush()?;
    Ok(())
}

/// `data.txt` -> `data.txt.sorted`
pub fn sorted_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".sorted");
    PathBuf::from(name)
}
