//! In-place conversion of UTF-16 text files to UTF-8.
//!
//! Only files that start with a UTF-16 byte-order mark are touched, which
//! keeps the check cheap and avoids rewriting arbitrary binaries.

use std::path::{Path, PathBuf};
use tracing::debug;

/// Directory never descended into.
const VCS_DIR: &str = ".git";

/// Byte order announced by a file's BOM.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    Little,
    Big,
}

/// What a conversion pass did to a tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionReport {
    /// Files rewritten (or that would be, in dry-run)
    pub converted: Vec<PathBuf>,
    /// Files with a BOM whose content is not valid UTF-16; left untouched
    pub undecodable: Vec<PathBuf>,
}

pub fn detect_bom(bytes: &[u8]) -> Option<ByteOrder> {
    match bytes {
        [0xFF, 0xFE, ..] => Some(ByteOrder::Little),
        [0xFE, 0xFF, ..] => Some(ByteOrder::Big),
        _ => None,
    }
}

/// Decode a BOM-prefixed UTF-16 buffer. `None` if there is no BOM, the
/// length is odd, or a surrogate is unpaired.
pub fn decode(bytes: &[u8]) -> Option<String> {
    let order = detect_bom(bytes)?;
    let body = &bytes[2..];
    if body.len() % 2 != 0 {
        return None;
    }

    let units = body.chunks_exact(2).map(|pair| match order {
        ByteOrder::Little => u16::from_le_bytes([pair[0], pair[1]]),
        ByteOrder::Big => u16::from_be_bytes([pair[0], pair[1]]),
    });
    char::decode_utf16(units).collect::<Result<String, _>>().ok()
}

fn has_selected_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map_or(false, |ext| extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
}

/// Convert every UTF-16 file under `root` whose extension is selected.
///
/// Blocking; run it on a blocking thread from async code.
pub fn convert_tree(
    root: &Path,
    extensions: &[String],
    dry_run: bool,
) -> std::io::Result<ConversionReport> {
    let mut report = ConversionReport::default();

    let walker = walkdir::WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || e.file_name() != VCS_DIR);

    for entry in walker {
        let entry = entry.map_err(std::io::Error::from)?;
        if !entry.file_type().is_file() || !has_selected_extension(entry.path(), extensions) {
            continue;
        }

        let bytes = std::fs::read(entry.path())?;
        if detect_bom(&bytes).is_none() {
            continue;
        }

        match decode(&bytes) {
            Some(text) => {
                if !dry_run {
                    std::fs::write(entry.path(), text.as_bytes())?;
                }
                debug!(path = %entry.path().display(), dry_run, "converted to UTF-8");
                report.converted.push(entry.path().to_path_buf());
            }
            None => {
                debug!(path = %entry.path().display(), "undecodable UTF-16, left untouched");
                report.undecodable.push(entry.path().to_path_buf());
            }
        }
    }

    Ok(report)
}
