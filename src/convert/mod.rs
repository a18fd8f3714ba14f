//! The conversion pipeline.
//!
//! A markdown file goes through three stages:
//! - [`markup`]: markdown to styled HTML (fixed stylesheet)
//! - [`typeset`]: styled HTML to a paginated PDF
//! - [`raster`]: PDF to one PNG per page
//!
//! [`Pipeline::convert_to_pages`] runs all three and writes into the scratch
//! directory. [`Pipeline::export_to_artifact`] stops after the PDF and writes
//! it wherever it is told to. Both regenerate their outputs unconditionally,
//! which is how a refresh picks up edits to the source.

pub mod markup;
pub mod raster;
pub mod typeset;

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::ConvertError;

pub use raster::{PdfiumRasterizer, Rasterizer};
pub use typeset::{Typesetter, Wkhtmltopdf};

/// Extension of the exported portable document.
pub const ARTIFACT_EXTENSION: &str = "pdf";

/// Extension of rendered page images.
pub const PAGE_EXTENSION: &str = "png";

/// The page images of one converted document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPages {
    artifact: PathBuf,
    base: PathBuf,
    page_count: usize,
}

impl RenderedPages {
    /// The PDF the pages were rasterized from.
    pub fn artifact(&self) -> &Path {
        &self.artifact
    }

    /// Scratch prefix shared by all page images.
    pub fn base(&self) -> &Path {
        &self.base
    }

    pub const fn page_count(&self) -> usize {
        self.page_count
    }

    /// Path of the image for page `index` (zero-based), if it exists.
    pub fn page_path(&self, index: usize) -> Option<PathBuf> {
        (index < self.page_count).then(|| page_image_path(&self.base, index))
    }
}

/// Runs markdown files through markup, layout and rasterization.
pub struct Pipeline {
    scratch_dir: PathBuf,
    stylesheet: &'static str,
    typesetter: Box<dyn Typesetter>,
    rasterizer: Box<dyn Rasterizer>,
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("scratch_dir", &self.scratch_dir)
            .finish_non_exhaustive()
    }
}

impl Pipeline {
    /// Create a pipeline writing intermediate files into `scratch_dir`.
    pub fn new(
        scratch_dir: impl Into<PathBuf>,
        typesetter: Box<dyn Typesetter>,
        rasterizer: Box<dyn Rasterizer>,
    ) -> Self {
        Self {
            scratch_dir: scratch_dir.into(),
            stylesheet: markup::STYLESHEET,
            typesetter,
            rasterizer,
        }
    }

    pub fn scratch_dir(&self) -> &Path {
        &self.scratch_dir
    }

    /// Convert `source` to a PDF and one image per page in the scratch directory.
    ///
    /// The PDF lands at `<scratch>/<stem>.pdf`, page `i` at `<scratch>/<stem><i>.png`.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::SourceRead`] if the source cannot be read,
    /// [`ConvertError::Layout`] if the PDF cannot be produced and
    /// [`ConvertError::Rasterize`] if the pages cannot be rendered or saved.
    pub fn convert_to_pages(&self, source: &Path) -> Result<RenderedPages, ConvertError> {
        let html = self.styled_markup(source)?;
        let stem = document_stem(source);
        let base = self.scratch_dir.join(&stem);
        let artifact = self
            .scratch_dir
            .join(format!("{stem}.{ARTIFACT_EXTENSION}"));
        // Lay out beside the current artifact so a failed conversion leaves it intact.
        let staged = self
            .scratch_dir
            .join(format!("{stem}.partial.{ARTIFACT_EXTENSION}"));
        let rasterize_error = |detail: String| ConvertError::Rasterize {
            path: artifact.clone(),
            detail,
        };
        let images = self
            .layout(source, &html, &staged)
            .and_then(|()| {
                self.rasterizer
                    .rasterize(&staged)
                    .map_err(|err| rasterize_error(format!("{err:#}")))
            })
            .inspect_err(|_| discard_staged(&staged))?;
        std::fs::rename(&staged, &artifact).map_err(|err| {
            discard_staged(&staged);
            rasterize_error(format!("{}: {err}", artifact.display()))
        })?;
        for (index, image) in images.iter().enumerate() {
            let path = page_image_path(&base, index);
            image
                .save(&path)
                .map_err(|err| rasterize_error(format!("{}: {err}", path.display())))?;
        }

        info!(
            source = %source.display(),
            pages = images.len(),
            "converted to pages"
        );
        Ok(RenderedPages {
            artifact,
            base,
            page_count: images.len(),
        })
    }

    /// Convert `source` to a PDF written directly to `destination`.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::SourceRead`] or [`ConvertError::Layout`].
    pub fn export_to_artifact(&self, source: &Path, destination: &Path) -> Result<(), ConvertError> {
        let html = self.styled_markup(source)?;
        self.layout(source, &html, destination)?;
        info!(
            source = %source.display(),
            destination = %destination.display(),
            "exported"
        );
        Ok(())
    }

    fn styled_markup(&self, source: &Path) -> Result<String, ConvertError> {
        let text = std::fs::read_to_string(source).map_err(|err| ConvertError::SourceRead {
            path: source.to_path_buf(),
            source: err,
        })?;
        debug!(source = %source.display(), bytes = text.len(), "read source");
        Ok(markup::styled_document(&text, self.stylesheet))
    }

    fn layout(&self, source: &Path, html: &str, output: &Path) -> Result<(), ConvertError> {
        self.typesetter
            .typeset(html, output)
            .map_err(|err| ConvertError::Layout {
                path: source.to_path_buf(),
                detail: format!("{err:#}"),
            })
    }
}

/// The name shared by a document's scratch files and exports.
///
/// A leading `.` (hidden file) is dropped, then everything from the first
/// remaining `.` on. Falls back to `untitled` when nothing is left.
pub fn document_stem(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = name.strip_prefix('.').unwrap_or(&name);
    let stem = name.split('.').next().unwrap_or_default();
    if stem.is_empty() {
        "untitled".to_string()
    } else {
        stem.to_string()
    }
}

/// First free export path in `dir` for a document named `stem`.
///
/// Tries `<stem>.pdf`, then `<stem>0.pdf`, `<stem>1.pdf`, ... so an export
/// never overwrites an existing file.
pub fn unique_export_path(dir: &Path, stem: &str) -> PathBuf {
    let first = dir.join(format!("{stem}.{ARTIFACT_EXTENSION}"));
    if !first.exists() {
        return first;
    }
    (0_u64..)
        .map(|n| dir.join(format!("{stem}{n}.{ARTIFACT_EXTENSION}")))
        .find(|candidate| !candidate.exists())
        .unwrap_or(first)
}

fn discard_staged(path: &Path) {
    if let Err(err) = std::fs::remove_file(path)
        && err.kind() != std::io::ErrorKind::NotFound
    {
        warn!(path = %path.display(), %err, "cannot remove staged artifact");
    }
}

fn page_image_path(base: &Path, index: usize) -> PathBuf {
    let mut name = base.as_os_str().to_os_string();
    name.push(format!("{index}.{PAGE_EXTENSION}"));
    PathBuf::from(name)
}
