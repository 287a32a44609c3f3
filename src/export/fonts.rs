//! Registration of the "sans-serif" font for the `ab_glyph` text path.
//!
//! `ab_glyph` does not discover OS fonts, so raster text only works once a TTF
//! has been registered. Candidates, first hit wins: the caller's font, the
//! `BLUESTEEL_FONT` environment variable, then common system locations.
//!
//! Each path is read at most once per process. The registry keeps font bytes
//! for the rest of the process, so only files that look like fonts are kept.

use log::{debug, warn};
use plotters::style::FontStyle;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{LazyLock, Mutex, PoisonError};

pub const FONT_ENV: &str = "BLUESTEEL_FONT";

const SYSTEM_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

#[derive(Default)]
struct Registry {
    /// `None` for paths that could not be read or were rejected.
    loaded: HashMap<PathBuf, Option<&'static [u8]>>,
    /// Path currently registered as "sans-serif".
    active: Option<PathBuf>,
    warned_missing: bool,
}

impl Registry {
    fn bytes(&mut self, path: &Path) -> Option<&'static [u8]> {
        *self.loaded.entry(path.to_path_buf()).or_insert_with(|| {
            let bytes = std::fs::read(path).ok()?;
            if !looks_like_font(&bytes) {
                warn!("{} is not a usable font", path.display());
                return None;
            }
            let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
            Some(bytes)
        })
    }
}

static REGISTRY: LazyLock<Mutex<Registry>> = LazyLock::new(Mutex::default);

/// TrueType, OpenType and collection signatures.
fn looks_like_font(bytes: &[u8]) -> bool {
    matches!(
        bytes.get(..4),
        Some([0, 1, 0, 0] | b"OTTO" | b"true" | b"ttcf")
    )
}

fn candidates(preferred: Option<&Path>) -> impl Iterator<Item = PathBuf> {
    preferred
        .map(Path::to_path_buf)
        .into_iter()
        .chain(std::env::var_os(FONT_ENV).map(PathBuf::from))
        .chain(SYSTEM_FONTS.iter().map(PathBuf::from))
}

/// Make the first usable candidate the "sans-serif" font; returns whether
/// raster text is available. A different `preferred` font on a later call
/// replaces the earlier registration.
pub fn ensure_registered(preferred: Option<&Path>) -> bool {
    let mut reg = REGISTRY.lock().unwrap_or_else(PoisonError::into_inner);
    for path in candidates(preferred) {
        if reg.active.as_deref() == Some(path.as_path()) {
            return true;
        }
        let Some(bytes) = reg.bytes(&path) else {
            continue;
        };
        match plotters::style::register_font("sans-serif", FontStyle::Normal, bytes) {
            Ok(()) => {
                debug!("registered font {}", path.display());
                reg.active = Some(path);
                return true;
            }
            Err(_) => {
                warn!("{} is not a usable font", path.display());
                reg.loaded.insert(path, None);
            }
        }
    }
    if !reg.warned_missing {
        warn!("no TTF font found; raster output will have no text (use --font or {FONT_ENV})");
        reg.warned_missing = true;
    }
    false
}
