use pdf_writer::{Name, Pdf, Rect, Ref};
use ttf_parser::Face;

use crate::error::Error;
use crate::model::{FontSource, StandardFont};

const FIRST_CHAR: u8 = 32;
const LAST_CHAR: u8 = 255;

/// Substitute for characters WinAnsi cannot encode.
const REPLACEMENT: u8 = b'?';

pub(crate) struct FontMetrics {
    /// Advance widths at 1000 units/em for WinAnsi bytes 32..=255.
    pub(crate) widths_1000: Vec<f32>,
    pub(crate) ascender_ratio: f32,
}

impl FontMetrics {
    pub(crate) fn for_standard(font: StandardFont) -> Self {
        match font {
            StandardFont::Helvetica => FontMetrics {
                widths_1000: helvetica_widths(),
                ascender_ratio: 0.718,
            },
            StandardFont::Courier => FontMetrics {
                widths_1000: vec![600.0; usize::from(LAST_CHAR - FIRST_CHAR) + 1],
                ascender_ratio: 0.629,
            },
        }
    }

    /// Width in points of WinAnsi-encoded text.
    pub(crate) fn width(&self, encoded: &[u8], font_size: f32) -> f32 {
        let units: f32 = encoded
            .iter()
            .map(|&b| {
                b.checked_sub(FIRST_CHAR)
                    .and_then(|i| self.widths_1000.get(usize::from(i)))
                    .copied()
                    .unwrap_or(0.0)
            })
            .sum();
        units * font_size / 1000.0
    }
}

/// Windows-1252 (WinAnsi) byte to Unicode char mapping.
/// Bytes 0x80-0x9F are remapped; all others map directly to their Unicode codepoint.
fn winansi_to_char(byte: u8) -> char {
    match byte {
        0x80 => '\u{20AC}',
        0x82 => '\u{201A}',
        0x83 => '\u{0192}',
        0x84 => '\u{201E}',
        0x85 => '\u{2026}',
        0x86 => '\u{2020}',
        0x87 => '\u{2021}',
        0x88 => '\u{02C6}',
        0x89 => '\u{2030}',
        0x8A => '\u{0160}',
        0x8B => '\u{2039}',
        0x8C => '\u{0152}',
        0x8E => '\u{017D}',
        0x91 => '\u{2018}',
        0x92 => '\u{2019}',
        0x93 => '\u{201C}',
        0x94 => '\u{201D}',
        0x95 => '\u{2022}', // bullet
        0x96 => '\u{2013}',
        0x97 => '\u{2014}',
        0x98 => '\u{02DC}',
        0x99 => '\u{2122}',
        0x9A => '\u{0161}',
        0x9B => '\u{203A}',
        0x9C => '\u{0153}',
        0x9E => '\u{017E}',
        0x9F => '\u{0178}',
        _ => byte as char,
    }
}

fn char_to_winansi(c: char) -> Option<u8> {
    match c as u32 {
        0x0020..=0x007E => Some(c as u8),
        0x00A0..=0x00FF => Some(c as u8), // Latin-1 supplement maps directly
        0x20AC => Some(0x80),
        0x201A => Some(0x82),
        0x0192 => Some(0x83),
        0x201E => Some(0x84),
        0x2026 => Some(0x85),
        0x2020 => Some(0x86),
        0x2021 => Some(0x87),
        0x02C6 => Some(0x88),
        0x2030 => Some(0x89),
        0x0160 => Some(0x8A),
        0x2039 => Some(0x8B),
        0x0152 => Some(0x8C),
        0x017D => Some(0x8E),
        0x2018 => Some(0x91),
        0x2019 => Some(0x92),
        0x201C => Some(0x93),
        0x201D => Some(0x94),
        0x2022 => Some(0x95), // bullet
        0x2013 => Some(0x96),
        0x2014 => Some(0x97),
        0x02DC => Some(0x98),
        0x2122 => Some(0x99),
        0x0161 => Some(0x9A),
        0x203A => Some(0x9B),
        0x0153 => Some(0x9C),
        0x017E => Some(0x9E),
        0x0178 => Some(0x9F),
        _ => None,
    }
}

/// Convert a UTF-8 string to WinAnsi (Windows-1252) bytes for PDF Str encoding.
/// Unencodable characters become `?`.
pub(crate) fn to_winansi_bytes(s: &str) -> Vec<u8> {
    let mut lossy = 0usize;
    let bytes = s
        .chars()
        .map(|c| {
            char_to_winansi(c).unwrap_or_else(|| {
                lossy += 1;
                REPLACEMENT
            })
        })
        .collect();
    if lossy > 0 {
        log::warn!("{lossy} character(s) outside WinAnsi replaced with '?'");
    }
    bytes
}

/// Helvetica widths at 1000 units/em (Adobe AFM) for WinAnsi chars 32..=255.
/// Undefined WinAnsi slots (0x81, 0x8D, 0x8F, 0x90, 0x9D) are never emitted.
fn helvetica_widths() -> Vec<f32> {
    const WIDTHS: [u16; 224] = [
        278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // 0x20
        556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // 0x30
        1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // 0x40
        667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 0x50
        333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // 0x60
        556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, 0, // 0x70
        556, 0, 222, 556, 333, 1000, 556, 556, 333, 1000, 667, 333, 1000, 0, 611, 0, // 0x80
        0, 222, 222, 333, 333, 350, 556, 1000, 333, 1000, 500, 333, 944, 0, 500, 667, // 0x90
        278, 333, 556, 556, 556, 556, 260, 556, 333, 737, 370, 556, 584, 333, 737, 333, // 0xA0
        400, 584, 333, 333, 333, 556, 537, 278, 333, 333, 365, 556, 834, 834, 834, 611, // 0xB0
        667, 667, 667, 667, 667, 667, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278, // 0xC0
        722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611, // 0xD0
        556, 556, 556, 556, 556, 556, 889, 500, 556, 556, 556, 556, 278, 278, 278, 278, // 0xE0
        556, 556, 556, 556, 556, 556, 556, 584, 611, 556, 556, 556, 556, 500, 556, 500, // 0xF0
    ];
    WIDTHS.iter().copied().map(f32::from).collect()
}

fn parse_face(data: &[u8]) -> Result<Face<'_>, Error> {
    Face::parse(data, 0).map_err(|e| Error::Render(format!("unusable TrueType font: {e}")))
}

fn truetype_metrics(face: &Face) -> FontMetrics {
    let units = face.units_per_em() as f32;
    let widths_1000 = (FIRST_CHAR..=LAST_CHAR)
        .map(|byte| {
            face.glyph_index(winansi_to_char(byte))
                .and_then(|gid| face.glyph_hor_advance(gid))
                .map(|adv| adv as f32 / units * 1000.0)
                .unwrap_or(0.0)
        })
        .collect();
    FontMetrics {
        widths_1000,
        ascender_ratio: face.ascender() as f32 / units,
    }
}

fn postscript_name(face: &Face) -> String {
    face.names()
        .into_iter()
        .filter(|name| name.name_id == ttf_parser::name_id::POST_SCRIPT_NAME)
        .find_map(|name| name.to_string())
        .map(|s| s.replace(' ', ""))
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| String::from("EmbeddedFont"))
}

/// Embed a TrueType/OpenType font (raw bytes) into the PDF.
fn embed_truetype(
    pdf: &mut Pdf,
    font_ref: Ref,
    alloc: &mut impl FnMut() -> Ref,
    font_data: &[u8],
) -> Result<FontMetrics, Error> {
    let face = parse_face(font_data)?;
    let descriptor_ref = alloc();
    let data_ref = alloc();

    let units = face.units_per_em() as f32;
    let ascent = face.ascender() as f32 / units * 1000.0;
    let descent = face.descender() as f32 / units * 1000.0;
    let cap_height = face
        .capital_height()
        .map(|h| h as f32 / units * 1000.0)
        .unwrap_or(700.0);

    let bb = face.global_bounding_box();
    let bbox = Rect::new(
        bb.x_min as f32 / units * 1000.0,
        bb.y_min as f32 / units * 1000.0,
        bb.x_max as f32 / units * 1000.0,
        bb.y_max as f32 / units * 1000.0,
    );

    let metrics = truetype_metrics(&face);

    let data_len = i32::try_from(font_data.len())
        .map_err(|_| Error::Render("font file too large to embed".into()))?;
    pdf.stream(data_ref, font_data)
        .pair(Name(b"Length1"), data_len);

    let ps_name = postscript_name(&face);

    pdf.font_descriptor(descriptor_ref)
        .name(Name(ps_name.as_bytes()))
        .flags(pdf_writer::types::FontFlags::NON_SYMBOLIC)
        .bbox(bbox)
        .italic_angle(0.0)
        .ascent(ascent)
        .descent(descent)
        .cap_height(cap_height)
        .stem_v(80.0)
        .font_file2(data_ref);

    {
        let mut d = pdf.indirect(font_ref).dict();
        d.pair(Name(b"Type"), Name(b"Font"));
        d.pair(Name(b"Subtype"), Name(b"TrueType"));
        d.pair(Name(b"BaseFont"), Name(ps_name.as_bytes()));
        d.pair(Name(b"Encoding"), Name(b"WinAnsiEncoding"));
        d.pair(Name(b"FirstChar"), i32::from(FIRST_CHAR));
        d.pair(Name(b"LastChar"), i32::from(LAST_CHAR));
        d.pair(Name(b"FontDescriptor"), descriptor_ref);
        d.insert(Name(b"Widths"))
            .array()
            .items(metrics.widths_1000.iter().copied());
    }

    Ok(metrics)
}

/// Write the font object for `source` at `font_ref`.
pub(crate) fn register_font(
    pdf: &mut Pdf,
    font_ref: Ref,
    alloc: &mut impl FnMut() -> Ref,
    source: &FontSource,
) -> Result<FontMetrics, Error> {
    match source {
        FontSource::Standard(font) => {
            pdf.type1_font(font_ref)
                .base_font(Name(font.base_name().as_bytes()))
                .encoding_predefined(Name(b"WinAnsiEncoding"));
            Ok(FontMetrics::for_standard(*font))
        }
        FontSource::TrueType(data) => embed_truetype(pdf, font_ref, alloc, data),
    }
}
