//! JSON reading and writing for blocks files and outlines.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::model::{DocumentInput, DocumentOutline};

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert an outline to JSON.
pub fn to_json(outline: &DocumentOutline, format: JsonFormat) -> Result<String> {
    let json = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(outline)?,
        JsonFormat::Compact => serde_json::to_string(outline)?,
    };
    Ok(json)
}

/// Write an outline to a JSON file.
pub fn write_outline<P: AsRef<Path>>(
    path: P,
    outline: &DocumentOutline,
    format: JsonFormat,
) -> Result<()> {
    fs::write(path, to_json(outline, format)?)?;
    Ok(())
}

/// Read a blocks file.
///
/// The file stem fills in a missing document id, and a missing title, so
/// that an empty document is still named after its file.
pub fn read_document<P: AsRef<Path>>(path: P) -> Result<DocumentInput> {
    let path = path.as_ref();
    let json = fs::read_to_string(path)?;
    let mut doc = DocumentInput::from_json(&json)?;

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    if doc.id.is_empty() {
        doc.id = stem.clone();
    }
    if doc.title.is_none() && !stem.is_empty() {
        doc.title = Some(stem);
    }
    Ok(doc)
}

/// List the blocks files to process: `input` itself if it is a file,
/// otherwise every `.json` file directly inside it, sorted by name.
pub fn collect_inputs<P: AsRef<Path>>(input: P) -> Result<Vec<PathBuf>> {
    let input = input.as_ref();
    if input.is_file() {
        return Ok(vec![input.to_path_buf()]);
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(input)? {
        let path = entry?.path();
        let is_json = path
            .extension()
            .map_or(false, |ext| ext.eq_ignore_ascii_case("json"));
        if path.is_file() && is_json {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
