use std::path::Path;

use anyhow::Result;
use folio::convert::{Pipeline, Rasterizer, Typesetter};
use folio::error::{ConvertError, ViewerError};
use folio::viewer::{Region, Viewer, ViewerState};
use image::{DynamicImage, RgbImage};

/// Stores the HTML as the document and counts `<hr` as page breaks.
struct HtmlTypesetter;

impl Typesetter for HtmlTypesetter {
    fn typeset(&self, html: &str, output: &Path) -> Result<()> {
        std::fs::write(output, html)?;
        Ok(())
    }
}

struct BreakRasterizer;

impl Rasterizer for BreakRasterizer {
    fn rasterize(&self, pdf: &Path) -> Result<Vec<DynamicImage>> {
        let html = std::fs::read_to_string(pdf)?;
        let pages = html.matches("<hr").count() + 1;
        Ok((0..pages)
            .map(|_| DynamicImage::ImageRgb8(RgbImage::new(4, 4)))
            .collect())
    }
}

struct BrokenRasterizer;

impl Rasterizer for BrokenRasterizer {
    fn rasterize(&self, _pdf: &Path) -> Result<Vec<DynamicImage>> {
        anyhow::bail!("not a PDF")
    }
}

fn pipeline(scratch: &Path) -> Pipeline {
    Pipeline::new(scratch, Box::new(HtmlTypesetter), Box::new(BreakRasterizer))
}

#[test]
fn test_convert_writes_one_image_per_page() {
    let scratch = tempfile::tempdir().unwrap();
    let docs = tempfile::tempdir().unwrap();
    let source = docs.path().join("report.v2.md");
    std::fs::write(&source, "# Intro\n\n---\n\n# Body\n\n---\n\n# End\n").unwrap();

    let pages = pipeline(scratch.path()).convert_to_pages(&source).unwrap();
    assert_eq!(pages.page_count(), 3);
    assert_eq!(pages.artifact(), scratch.path().join("report.pdf"));
    for index in 0..3 {
        let page = pages.page_path(index).unwrap();
        assert_eq!(page, scratch.path().join(format!("report{index}.png")));
        assert!(page.exists());
    }
    assert_eq!(pages.page_path(3), None);
}

#[test]
fn test_rasterize_failure_is_reported_with_artifact_path() {
    let scratch = tempfile::tempdir().unwrap();
    let source = scratch.path().join("doc.md");
    std::fs::write(&source, "# Doc").unwrap();

    let pipeline = Pipeline::new(
        scratch.path(),
        Box::new(HtmlTypesetter),
        Box::new(BrokenRasterizer),
    );
    let err = pipeline.convert_to_pages(&source).unwrap_err();
    assert!(matches!(err, ConvertError::Rasterize { .. }));
    assert!(err.to_string().contains("not a PDF"));
}

#[test]
fn test_viewer_session_select_page_refresh_export() {
    let scratch = tempfile::tempdir().unwrap();
    let docs = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    let source = docs.path().join("talk.md");
    std::fs::write(&source, "one\n\n---\n\ntwo\n").unwrap();

    let mut viewer = Viewer::new(pipeline(scratch.path()), out.path());
    assert_eq!(viewer.state(), ViewerState::NoSelection);
    assert!(matches!(viewer.export(), Err(ViewerError::NoSelection)));

    assert_eq!(viewer.toggle_picker(), Region::Picker);
    assert_eq!(viewer.state(), ViewerState::PickingFile);

    viewer.select(&source).unwrap();
    assert_eq!(
        viewer.state(),
        ViewerState::Viewing {
            page_count: 2,
            current_index: 0
        }
    );
    assert!(viewer.next_page());
    assert!(!viewer.next_page());

    std::fs::write(&source, "only one page now\n").unwrap();
    viewer.refresh().unwrap();
    assert_eq!(
        viewer.state(),
        ViewerState::Viewing {
            page_count: 1,
            current_index: 0
        }
    );

    let exported = viewer.export().unwrap();
    assert_eq!(exported, out.path().join("talk.pdf"));
    let again = viewer.export().unwrap();
    assert_eq!(again, out.path().join("talk0.pdf"));
    assert!(exported.exists() && again.exists());
}

#[test]
fn test_missing_source_is_source_read_error() {
    let scratch = tempfile::tempdir().unwrap();
    let mut viewer = Viewer::new(pipeline(scratch.path()), scratch.path());
    let err = viewer.select(scratch.path().join("absent.md")).unwrap_err();
    assert!(matches!(
        err,
        ViewerError::Convert(ConvertError::SourceRead { .. })
    ));
    assert_eq!(viewer.state(), ViewerState::NoSelection);
}
