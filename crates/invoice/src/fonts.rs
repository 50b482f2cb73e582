//! Font handles and the Korean font resolver

use crate::{InvoiceError, Result};
use log::{debug, info, warn};
use pdf_core::{FontData, FontFamily, FontSource};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock};

const REGULAR_FILE: &str = "NanumGothic.ttf";
const BOLD_FILE: &str = "NanumGothicBold.ttf";

/// System locations checked after the user font directory, in order
const SYSTEM_CANDIDATES: &[&str] = &[
    // macOS
    "/System/Library/Fonts/Supplemental/AppleSDGothicNeo.ttc",
    "/System/Library/Fonts/AppleSDGothicNeo.ttc",
    "/Library/Fonts/NanumGothic.ttf",
    "/Library/Fonts/NanumGothicBold.ttf",
    // Linux
    "/usr/share/fonts/truetype/nanum/NanumGothic.ttf",
    "/usr/share/fonts/nanum/NanumGothic.ttf",
];

type FontCache = Mutex<HashMap<(PathBuf, u32), Arc<FontData>>>;

fn font_cache() -> &'static FontCache {
    static CACHE: OnceLock<FontCache> = OnceLock::new();
    CACHE.get_or_init(|| Mutex::new(HashMap::new()))
}

/// Load a font file once per process; later calls share the parsed font
fn load_cached(path: &Path, index: u32) -> Result<Arc<FontData>> {
    let key = (path.to_path_buf(), index);
    {
        let cache = font_cache().lock().unwrap_or_else(|e| e.into_inner());
        if let Some(font) = cache.get(&key) {
            return Ok(Arc::clone(font));
        }
    }

    let data = std::fs::read(path)?;
    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("Font");
    let font = Arc::new(FontData::from_collection(name, &data, index)?);
    debug!("loaded font {} (face {index})", path.display());

    let mut cache = font_cache().lock().unwrap_or_else(|e| e.into_inner());
    Ok(Arc::clone(cache.entry(key).or_insert(font)))
}

/// A resolved typeface for the document body
#[derive(Debug, Clone)]
pub enum FontHandle {
    /// A TrueType regular/bold pair (bold may be the same face as regular)
    Loaded {
        regular: Arc<FontData>,
        bold: Arc<FontData>,
    },
    /// The built-in Helvetica family; glyphs outside WinAnsi render as `?`
    Fallback,
}

impl FontHandle {
    /// Load a font pair from files; without a bold file the regular face is reused
    pub fn from_paths(regular: &Path, bold: Option<&Path>) -> Result<Self> {
        let regular = load_cached(regular, 0)?;
        let bold = match bold {
            Some(path) => load_cached(path, 0)?,
            None => Arc::clone(&regular),
        };
        Ok(FontHandle::Loaded { regular, bold })
    }

    /// Load a font pair from in-memory TrueType data (not cached)
    pub fn from_bytes(regular: &[u8], bold: Option<&[u8]>) -> Result<Self> {
        let regular = Arc::new(
            FontData::from_ttf("Regular", regular)
                .map_err(|e| InvoiceError::FontError(e.to_string()))?,
        );
        let bold = match bold {
            Some(data) => Arc::new(
                FontData::from_ttf("Bold", data)
                    .map_err(|e| InvoiceError::FontError(e.to_string()))?,
            ),
            None => Arc::clone(&regular),
        };
        Ok(FontHandle::Loaded { regular, bold })
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, FontHandle::Fallback)
    }

    /// The family used for layout and embedding
    pub fn family(&self) -> FontFamily {
        match self {
            FontHandle::Loaded { regular, bold } => FontFamily {
                regular: FontSource::Embedded(Arc::clone(regular)),
                // Same face for both weights: embed it once
                bold: (!Arc::ptr_eq(regular, bold))
                    .then(|| FontSource::Embedded(Arc::clone(bold))),
            },
            FontHandle::Fallback => FontFamily::helvetica(),
        }
    }
}

fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}

/// Candidate regular-face paths in search order
fn candidate_paths(extra_dirs: &[PathBuf]) -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    if let Some(home) = home_dir() {
        candidates.push(home.join(".fonts").join(REGULAR_FILE));
    }
    candidates.extend(extra_dirs.iter().map(|dir| dir.join(REGULAR_FILE)));
    candidates.extend(SYSTEM_CANDIDATES.iter().map(PathBuf::from));
    candidates
}

/// Path of the bold sibling of a NanumGothic regular file
fn bold_sibling(path: &Path) -> Option<PathBuf> {
    let text = path.to_str()?;
    if !text.contains(REGULAR_FILE) {
        return None;
    }
    Some(PathBuf::from(text.replace(REGULAR_FILE, BOLD_FILE)))
}

/// Find a Hangul-capable font on this machine
///
/// Searches `~/.fonts`, then `extra_dirs`, then well-known macOS and Linux
/// locations. The first file that loads wins; its `NanumGothicBold.ttf`
/// sibling is used for bold when present. Returns [`FontHandle::Fallback`]
/// when nothing loads.
pub fn resolve_korean_font(extra_dirs: &[PathBuf]) -> FontHandle {
    for path in candidate_paths(extra_dirs) {
        if !path.exists() {
            continue;
        }

        let regular = match load_cached(&path, 0) {
            Ok(font) => font,
            Err(e) => {
                debug!("skipping {}: {e}", path.display());
                continue;
            }
        };

        let bold = bold_sibling(&path)
            .filter(|bold_path| bold_path.exists())
            .and_then(|bold_path| match load_cached(&bold_path, 0) {
                Ok(font) => Some(font),
                Err(e) => {
                    debug!("bold face {} unusable: {e}", bold_path.display());
                    None
                }
            })
            .unwrap_or_else(|| Arc::clone(&regular));

        info!("using Korean font {}", path.display());
        return FontHandle::Loaded { regular, bold };
    }

    warn!("no Korean font found, falling back to Helvetica (Hangul will not render)");
    FontHandle::Fallback
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_bold_sibling() {
        assert_eq!(
            bold_sibling(Path::new("/usr/share/fonts/nanum/NanumGothic.ttf")),
            Some(PathBuf::from("/usr/share/fonts/nanum/NanumGothicBold.ttf"))
        );
        assert_eq!(
            bold_sibling(Path::new("/System/Library/Fonts/AppleSDGothicNeo.ttc")),
            None
        );
    }

    #[test]
    fn test_candidate_order() {
        let extra = vec![PathBuf::from("/opt/fonts")];
        let candidates = candidate_paths(&extra);
        let extra_pos = candidates
            .iter()
            .position(|p| p == Path::new("/opt/fonts/NanumGothic.ttf"))
            .unwrap();
        let system_pos = candidates
            .iter()
            .position(|p| p == Path::new("/System/Library/Fonts/Supplemental/AppleSDGothicNeo.ttc"))
            .unwrap();
        assert!(extra_pos < system_pos);
        assert_eq!(
            candidates.last().unwrap(),
            Path::new("/usr/share/fonts/nanum/NanumGothic.ttf")
        );
    }

    #[test]
    fn test_fallback_family_is_helvetica() {
        let family = FontHandle::Fallback.family();
        assert!(family.regular.is_builtin());
        assert!(family.bold.is_some());
    }

    #[test]
    fn test_from_paths_missing_file() {
        let result = FontHandle::from_paths(Path::new("/nonexistent/NanumGothic.ttf"), None);
        assert!(matches!(result, Err(InvoiceError::Io(_))));
    }

    #[test]
    fn test_from_bytes_rejects_garbage() {
        let result = FontHandle::from_bytes(&[0u8; 64], None);
        assert!(matches!(result, Err(InvoiceError::FontError(_))));
    }
}
