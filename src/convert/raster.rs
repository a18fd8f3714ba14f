//! PDF rasterization: render every page to a `DynamicImage` via pdfium.

use std::path::{Path, PathBuf};

use anyhow::{Result, anyhow};
use image::DynamicImage;
use pdfium_render::prelude::*;
use tracing::debug;

/// Default width in pixels of a rendered page image.
pub const DEFAULT_PAGE_WIDTH: u32 = 1200;

/// Turns a PDF into one image per page.
pub trait Rasterizer {
    /// Render all pages of `pdf`, in page order.
    ///
    /// # Errors
    ///
    /// Returns an error if the PDF cannot be opened or a page fails to render.
    fn rasterize(&self, pdf: &Path) -> Result<Vec<DynamicImage>>;
}

/// Rasterizer backed by the pdfium library.
#[derive(Debug, Clone)]
pub struct PdfiumRasterizer {
    library_dir: Option<PathBuf>,
    page_width: u32,
}

impl Default for PdfiumRasterizer {
    fn default() -> Self {
        Self {
            library_dir: None,
            page_width: DEFAULT_PAGE_WIDTH,
        }
    }
}

impl PdfiumRasterizer {
    /// Load pdfium from `dir` instead of the system library search path.
    pub fn with_library_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.library_dir = dir;
        self
    }

    /// Set the width of rendered pages in pixels.
    pub fn with_page_width(mut self, width: u32) -> Self {
        self.page_width = width.max(1);
        self
    }

    pub const fn page_width(&self) -> u32 {
        self.page_width
    }

    fn bind(&self) -> Result<Pdfium> {
        let bindings = match &self.library_dir {
            Some(dir) => Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(dir)),
            None => Pdfium::bind_to_system_library(),
        }
        .map_err(|err| anyhow!("pdfium library unavailable: {err:?}"))?;
        Ok(Pdfium::new(bindings))
    }
}

impl Rasterizer for PdfiumRasterizer {
    fn rasterize(&self, pdf: &Path) -> Result<Vec<DynamicImage>> {
        let pdfium = self.bind()?;
        let document = pdfium
            .load_pdf_from_file(pdf, None)
            .map_err(|err| anyhow!("cannot open PDF: {err:?}"))?;

        let width = i32::try_from(self.page_width).unwrap_or(i32::MAX);
        let render_config = PdfRenderConfig::new().set_target_width(width);

        let pages = document.pages();
        let mut images = Vec::new();
        for (index, page) in pages.iter().enumerate() {
            let bitmap = page
                .render_with_config(&render_config)
                .map_err(|err| anyhow!("page {} failed to render: {err:?}", index + 1))?;
            let image = bitmap.as_image();
            debug!(
                page = index,
                width = image.width(),
                height = image.height(),
                "rendered page"
            );
            images.push(image);
        }
        Ok(images)
    }
}
