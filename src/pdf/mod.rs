mod layout;

use pdf_writer::{Content, Filter, Name, Pdf, Rect, Ref, Str, TextStr};

use crate::error::Error;
use crate::fonts::register_font;
use crate::model::{CoreProperties, DocxText, RenderConfig};

use layout::{Frame, PageLayout, build_flow, paginate};

const BODY_FONT: Name<'static> = Name(b"F1");
const PRODUCER: &str = concat!("docx-text-pdf ", env!("CARGO_PKG_VERSION"));

/// Lays paragraph text out on fixed-size pages in a single body style.
#[derive(Clone, Debug, Default)]
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    pub fn new(config: RenderConfig) -> Self {
        Renderer { config }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Render paragraphs; blank ones are skipped.
    pub fn render<S: AsRef<str>>(&self, paragraphs: &[S]) -> Result<Vec<u8>, Error> {
        self.render_with_properties(paragraphs, &CoreProperties::default())
    }

    /// Like [`Renderer::render`], also filling the PDF info dictionary from
    /// the package core properties.
    pub fn render_document(&self, doc: &DocxText) -> Result<Vec<u8>, Error> {
        self.render_with_properties(&doc.paragraphs, &doc.properties)
    }

    fn render_with_properties<S: AsRef<str>>(
        &self,
        paragraphs: &[S],
        properties: &CoreProperties,
    ) -> Result<Vec<u8>, Error> {
        let config = &self.config;
        let frame = Frame::from_config(config)?;

        let mut pdf = Pdf::new();
        let mut next_id = 1i32;
        let mut alloc = || {
            let r = Ref::new(next_id);
            next_id += 1;
            r
        };

        let catalog_id = alloc();
        let pages_id = alloc();
        let info_id = alloc();
        let font_id = alloc();

        let metrics = register_font(&mut pdf, font_id, &mut alloc, &config.body_style.font)?;

        let flow = build_flow(paragraphs, config.paragraph_spacing);
        let pages = paginate(&flow, &frame, &config.body_style, &metrics);
        log::debug!(
            "{} of {} paragraphs rendered on {} page(s)",
            flow.len() / 2,
            paragraphs.len(),
            pages.len()
        );

        let n = pages.len();
        let page_ids: Vec<Ref> = (0..n).map(|_| alloc()).collect();
        let content_ids: Vec<Ref> = (0..n).map(|_| alloc()).collect();

        for (page, content_id) in pages.iter().zip(&content_ids) {
            let raw = page_content(page, config.body_style.size).finish();
            if config.compress {
                let compressed = miniz_oxide::deflate::compress_to_vec_zlib(raw.as_slice(), 6);
                pdf.stream(*content_id, &compressed).filter(Filter::FlateDecode);
            } else {
                pdf.stream(*content_id, raw.as_slice());
            }
        }

        let count = i32::try_from(n).map_err(|_| Error::Render(format!("too many pages: {n}")))?;
        pdf.catalog(catalog_id).pages(pages_id);
        pdf.pages(pages_id).kids(page_ids.iter().copied()).count(count);

        let page_size = config.page_size;
        for (page_id, content_id) in page_ids.iter().zip(&content_ids) {
            pdf.page(*page_id)
                .media_box(Rect::new(0.0, 0.0, page_size.width, page_size.height))
                .parent(pages_id)
                .contents(*content_id)
                .resources()
                .fonts()
                .pair(BODY_FONT, font_id);
        }

        {
            let mut info = pdf.document_info(info_id);
            info.producer(TextStr(PRODUCER));
            if let Some(title) = &properties.title {
                info.title(TextStr(title));
            }
            if let Some(author) = &properties.author {
                info.author(TextStr(author));
            }
            if let Some(subject) = &properties.subject {
                info.subject(TextStr(subject));
            }
        }

        Ok(pdf.finish())
    }
}

fn page_content(page: &PageLayout, font_size: f32) -> Content {
    let mut content = Content::new();
    for line in &page.lines {
        content
            .begin_text()
            .set_font(BODY_FONT, font_size)
            .next_line(line.x, line.baseline)
            .show(Str(&line.text))
            .end_text();
    }
    content
}
