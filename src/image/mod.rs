//! Page image loading and terminal graphics setup.
//!
//! Supports multiple terminal graphics protocols through `ratatui-image`:
//! - Kitty graphics protocol
//! - Sixel
//! - iTerm2
//! - Unicode half-blocks (fallback)

use std::path::Path;
#[cfg(unix)]
use std::time::Duration;

use anyhow::{Context, Result};
use image::DynamicImage;
use ratatui_image::picker::Picker;
#[cfg(unix)]
use ratatui_image::picker::cap_parser::QueryStdioOptions;
use tracing::debug;

#[cfg(unix)]
const PICKER_QUERY_TIMEOUT_MS: u64 = 250;

/// Shown until a document has been selected.
const FRONT_PAGE_PNG: &[u8] = include_bytes!("../../assets/front-page.png");

/// Create a picker for terminal image rendering.
///
/// Must run before the terminal enters raw/alternate mode: it queries stdio.
pub fn create_picker(force_half_cell: bool) -> Option<Picker> {
    if force_half_cell {
        debug!("forced half-cell image protocol");
        return Some(Picker::halfblocks());
    }

    // On Windows the stdio capability query can leave an orphaned reader on
    // the console input buffer, so stick to half-blocks there.
    #[cfg(not(unix))]
    {
        return Some(Picker::halfblocks());
    }

    #[cfg(unix)]
    {
        let picker = Picker::from_query_stdio_with_options(query_options()).ok()?;
        debug!(
            term = %std::env::var("TERM").unwrap_or_else(|_| "<unset>".to_string()),
            protocol = ?picker.protocol_type(),
            "created image picker"
        );
        Some(picker)
    }
}

/// The placeholder front page.
///
/// # Errors
///
/// Returns an error if the bundled image cannot be decoded.
pub fn placeholder_image() -> Result<DynamicImage> {
    image::load_from_memory(FRONT_PAGE_PNG).context("bundled front page is not a valid image")
}

/// Load a rendered page image from disk.
///
/// # Errors
///
/// Returns an error if the file is missing or not a decodable image.
pub fn load_page(path: &Path) -> Result<DynamicImage> {
    image::open(path).with_context(|| format!("cannot load page image {}", path.display()))
}

#[cfg(unix)]
fn query_options() -> QueryStdioOptions {
    let mut options = QueryStdioOptions::default();
    options.timeout = Duration::from_millis(PICKER_QUERY_TIMEOUT_MS);
    options
}
