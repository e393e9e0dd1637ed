/// Page dimensions in points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageSize {
    pub width: f32,
    pub height: f32,
}

impl PageSize {
    /// ISO 216 A4, 210 × 297 mm.
    pub const A4: PageSize = PageSize {
        width: 595.2756,
        height: 841.8898,
    };
    /// US Letter, 8.5 × 11 in.
    pub const LETTER: PageSize = PageSize {
        width: 612.0,
        height: 792.0,
    };
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Margins {
    pub top: f32,
    pub bottom: f32,
    pub left: f32,
    pub right: f32,
}

impl Margins {
    pub const fn all(pts: f32) -> Self {
        Margins {
            top: pts,
            bottom: pts,
            left: pts,
            right: pts,
        }
    }
}

/// PDF base-14 families with built-in metrics.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StandardFont {
    Helvetica,
    Courier,
}

impl StandardFont {
    pub(crate) fn base_name(self) -> &'static str {
        match self {
            StandardFont::Helvetica => "Helvetica",
            StandardFont::Courier => "Courier",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum FontSource {
    Standard(StandardFont),
    /// Raw TrueType/OpenType bytes, embedded into the output.
    TrueType(Vec<u8>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct TextStyle {
    pub font: FontSource,
    pub size: f32,
    pub leading: f32,
}

impl TextStyle {
    /// Plain body text: Helvetica 10 pt on 12 pt leading.
    pub fn normal() -> Self {
        TextStyle {
            font: FontSource::Standard(StandardFont::Helvetica),
            size: 10.0,
            leading: 12.0,
        }
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        TextStyle::normal()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RenderConfig {
    pub page_size: PageSize,
    pub margins: Margins,
    /// Vertical gap inserted after every rendered paragraph, in points.
    pub paragraph_spacing: f32,
    pub body_style: TextStyle,
    /// Deflate page content streams.
    pub compress: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            page_size: PageSize::A4,
            margins: Margins::all(72.0),
            paragraph_spacing: 10.0,
            body_style: TextStyle::normal(),
            compress: true,
        }
    }
}

/// Package metadata from `docProps/core.xml`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CoreProperties {
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DocxText {
    pub paragraphs: Vec<String>,
    pub properties: CoreProperties,
}

/// One element of the sequence fed to the layout engine.
#[derive(Clone, Debug, PartialEq)]
pub enum FlowItem {
    Text(String),
    Spacer(f32),
}
