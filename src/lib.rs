//! Convert the paragraph text of a DOCX document into a plain, paginated PDF.
//!
//! Only body paragraph text survives the conversion: formatting, images,
//! tables and headers/footers are dropped, and every non-blank paragraph is
//! set in one body style with a fixed gap after it.
//!
//! ```no_run
//! let docx = std::fs::read("letter.docx")?;
//! let pdf = docx_text_pdf::convert(&docx)?;
//! std::fs::write("letter.pdf", pdf)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod docx;
mod error;
mod fonts;
mod model;
mod pdf;

pub use docx::{read_document, read_paragraphs};
pub use error::{Error, MalformedInput};
pub use model::{
    CoreProperties, DocxText, FlowItem, FontSource, Margins, PageSize, RenderConfig, StandardFont,
    TextStyle,
};
pub use pdf::Renderer;

use std::path::Path;
use std::time::Instant;

/// Render paragraphs with the default configuration (A4, Helvetica 10/12).
pub fn render<S: AsRef<str>>(paragraphs: &[S]) -> Result<Vec<u8>, Error> {
    Renderer::default().render(paragraphs)
}

/// DOCX bytes in, PDF bytes out, using [`RenderConfig::default`].
pub fn convert(docx: &[u8]) -> Result<Vec<u8>, Error> {
    convert_with(docx, &RenderConfig::default())
}

pub fn convert_with(docx: &[u8], config: &RenderConfig) -> Result<Vec<u8>, Error> {
    let doc = docx::read_document(docx)?;
    Renderer::new(config.clone()).render_document(&doc)
}

pub fn convert_docx_to_pdf(input: &Path, output: &Path) -> Result<(), Error> {
    convert_docx_to_pdf_with(input, output, &RenderConfig::default())
}

pub fn convert_docx_to_pdf_with(
    input: &Path,
    output: &Path,
    config: &RenderConfig,
) -> Result<(), Error> {
    let t0 = Instant::now();

    let docx = std::fs::read(input)?;
    let doc = docx::read_document(&docx)?;
    let t_parse = t0.elapsed();

    let bytes = Renderer::new(config.clone()).render_document(&doc)?;
    let t_render = t0.elapsed();

    std::fs::write(output, &bytes)?;
    let t_total = t0.elapsed();

    log::info!(
        "Timing: parse={:.1}ms, render={:.1}ms, write={:.1}ms, total={:.1}ms (output {} bytes)",
        t_parse.as_secs_f64() * 1000.0,
        (t_render - t_parse).as_secs_f64() * 1000.0,
        (t_total - t_render).as_secs_f64() * 1000.0,
        t_total.as_secs_f64() * 1000.0,
        bytes.len(),
    );

    Ok(())
}
