use crate::error::Error;
use crate::fonts::{FontMetrics, to_winansi_bytes};
use crate::model::{FlowItem, RenderConfig, TextStyle};

/// Usable text area of a page, in PDF user space (origin bottom-left).
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Frame {
    pub(crate) left: f32,
    pub(crate) width: f32,
    pub(crate) top: f32,
    pub(crate) bottom: f32,
}

fn check(ok: bool, what: &str) -> Result<(), Error> {
    if ok {
        Ok(())
    } else {
        Err(Error::Render(what.to_string()))
    }
}

fn positive(v: f32) -> bool {
    v.is_finite() && v > 0.0
}

impl Frame {
    pub(crate) fn from_config(config: &RenderConfig) -> Result<Frame, Error> {
        let page = config.page_size;
        let m = config.margins;
        let style = &config.body_style;

        check(positive(page.width) && positive(page.height), "page size must be positive")?;
        check(
            [m.top, m.bottom, m.left, m.right]
                .iter()
                .all(|v| v.is_finite() && *v >= 0.0),
            "margins must be non-negative",
        )?;
        check(positive(style.size), "font size must be positive")?;
        check(positive(style.leading), "leading must be positive")?;
        check(
            config.paragraph_spacing.is_finite() && config.paragraph_spacing >= 0.0,
            "paragraph spacing must be non-negative",
        )?;

        let frame = Frame {
            left: m.left,
            width: page.width - m.left - m.right,
            top: page.height - m.top,
            bottom: m.bottom,
        };
        check(
            frame.width > 0.0 && frame.top > frame.bottom,
            "margins leave no room for text",
        )?;
        check(
            style.leading <= frame.top - frame.bottom,
            "leading is taller than the text frame",
        )?;
        Ok(frame)
    }
}

/// Trim, drop empty paragraphs, and follow each survivor with a spacer.
pub(crate) fn build_flow<S: AsRef<str>>(paragraphs: &[S], spacing: f32) -> Vec<FlowItem> {
    paragraphs
        .iter()
        .map(|p| p.as_ref().trim())
        .filter(|text| !text.is_empty())
        .flat_map(|text| [FlowItem::Text(text.to_string()), FlowItem::Spacer(spacing)])
        .collect()
}

/// Greedy word wrap of WinAnsi-encoded text. Whitespace runs collapse to one
/// space; a word wider than `max_width` is broken between characters.
pub(crate) fn wrap_words(
    text: &str,
    metrics: &FontMetrics,
    font_size: f32,
    max_width: f32,
) -> Vec<Vec<u8>> {
    let normalized = text.split_whitespace().collect::<Vec<_>>().join(" ");
    let encoded = to_winansi_bytes(&normalized);
    let space_w = metrics.width(b" ", font_size);

    let mut lines = Vec::new();
    let mut line: Vec<u8> = Vec::new();
    let mut line_w = 0.0f32;

    for word in encoded.split(|&b| b == b' ').filter(|w| !w.is_empty()) {
        let word_w = metrics.width(word, font_size);

        if !line.is_empty() && line_w + space_w + word_w <= max_width {
            line.push(b' ');
            line.extend_from_slice(word);
            line_w += space_w + word_w;
            continue;
        }
        if !line.is_empty() {
            lines.push(std::mem::take(&mut line));
            line_w = 0.0;
        }
        if word_w <= max_width {
            line.extend_from_slice(word);
            line_w = word_w;
            continue;
        }

        for &b in word {
            let char_w = metrics.width(&[b], font_size);
            if !line.is_empty() && line_w + char_w > max_width {
                lines.push(std::mem::take(&mut line));
                line_w = 0.0;
            }
            line.push(b);
            line_w += char_w;
        }
    }

    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

#[derive(Debug, PartialEq)]
pub(crate) struct PlacedLine {
    pub(crate) x: f32,
    pub(crate) baseline: f32,
    pub(crate) text: Vec<u8>,
}

#[derive(Debug, Default, PartialEq)]
pub(crate) struct PageLayout {
    pub(crate) lines: Vec<PlacedLine>,
}

/// Flow items onto pages. Always yields at least one (possibly blank) page.
pub(crate) fn paginate(
    flow: &[FlowItem],
    frame: &Frame,
    style: &TextStyle,
    metrics: &FontMetrics,
) -> Vec<PageLayout> {
    let mut pages: Vec<PageLayout> = Vec::new();
    let mut current = PageLayout::default();
    let mut slot_top = frame.top;

    for item in flow {
        match item {
            FlowItem::Text(text) => {
                for line in wrap_words(text, metrics, style.size, frame.width) {
                    if slot_top - style.leading < frame.bottom {
                        pages.push(std::mem::take(&mut current));
                        slot_top = frame.top;
                    }
                    current.lines.push(PlacedLine {
                        x: frame.left,
                        baseline: slot_top - style.size * metrics.ascender_ratio,
                        text: line,
                    });
                    slot_top -= style.leading;
                }
            }
            FlowItem::Spacer(height) => {
                if slot_top - height < frame.bottom {
                    // spacer does not carry over to the next page
                    if !current.lines.is_empty() {
                        pages.push(std::mem::take(&mut current));
                    }
                    slot_top = frame.top;
                } else {
                    slot_top -= height;
                }
            }
        }
    }

    if !current.lines.is_empty() || pages.is_empty() {
        pages.push(current);
    }
    log::trace!("Laid out {} flow items on {} page(s)", flow.len(), pages.len());
    pages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FontSource, Margins, PageSize, StandardFont};

    fn courier_style(size: f32, leading: f32) -> TextStyle {
        TextStyle {
            font: FontSource::Standard(StandardFont::Courier),
            size,
            leading,
        }
    }

    fn courier() -> FontMetrics {
        FontMetrics::for_standard(StandardFont::Courier)
    }

    fn texts(pages: &[PageLayout]) -> Vec<Vec<String>> {
        pages
            .iter()
            .map(|p| {
                p.lines
                    .iter()
                    .map(|l| String::from_utf8(l.text.clone()).unwrap())
                    .collect()
            })
            .collect()
    }

    #[test]
    fn flow_skips_blank_paragraphs_and_spaces_the_rest() {
        let flow = build_flow(&["Title", "   ", "", "\t\n", " Body text here. "], 10.0);
        assert_eq!(
            flow,
            vec![
                FlowItem::Text("Title".into()),
                FlowItem::Spacer(10.0),
                FlowItem::Text("Body text here.".into()),
                FlowItem::Spacer(10.0),
            ]
        );
        assert!(build_flow::<&str>(&[], 10.0).is_empty());
    }

    #[test]
    fn wrap_fills_lines_greedily() {
        // Courier 10pt: 6pt per char, so 60pt holds 10 chars
        let lines = wrap_words("aaa bbb ccc ddd", &courier(), 10.0, 60.0);
        assert_eq!(lines, vec![b"aaa bbb".to_vec(), b"ccc ddd".to_vec()]);
    }

    #[test]
    fn wrap_collapses_internal_whitespace() {
        let lines = wrap_words("one\t two\n\nthree", &courier(), 10.0, 1000.0);
        assert_eq!(lines, vec![b"one two three".to_vec()]);
        assert!(wrap_words(" \t ", &courier(), 10.0, 1000.0).is_empty());
    }

    #[test]
    fn wrap_breaks_overlong_words() {
        let lines = wrap_words("ab abcdefghijkl", &courier(), 10.0, 30.0);
        assert_eq!(
            lines,
            vec![b"ab".to_vec(), b"abcde".to_vec(), b"fghij".to_vec(), b"kl".to_vec()]
        );
    }

    #[test]
    fn wide_latin1_glyphs_stay_inside_the_frame() {
        let frame = Frame::from_config(&RenderConfig::default()).unwrap();
        let metrics = FontMetrics::for_standard(StandardFont::Helvetica);
        let text = "\u{C6}".repeat(80);
        let lines = wrap_words(&text, &metrics, 10.0, frame.width);
        // AE is 1000 units wide: 10pt each, 45 per 451pt line
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].len(), 45);
        for line in &lines {
            assert!(metrics.width(line, 10.0) <= frame.width);
        }

        let words = "\u{153}uvre \u{A9} \u{C7}a".repeat(20);
        for line in wrap_words(&words, &metrics, 10.0, frame.width) {
            assert!(metrics.width(&line, 10.0) <= frame.width);
        }
    }

    #[test]
    fn frame_rejects_unusable_configs() {
        let mut config = RenderConfig::default();
        assert!(Frame::from_config(&config).is_ok());

        config.margins = Margins::all(400.0);
        assert!(Frame::from_config(&config).unwrap_err().is_render());

        let mut config = RenderConfig::default();
        config.body_style.size = 0.0;
        assert!(Frame::from_config(&config).is_err());

        let mut config = RenderConfig::default();
        config.paragraph_spacing = -1.0;
        assert!(Frame::from_config(&config).is_err());

        let mut config = RenderConfig::default();
        config.page_size = PageSize {
            width: 200.0,
            height: 200.0,
        };
        config.margins = Margins::all(50.0);
        config.body_style.leading = 150.0;
        assert!(Frame::from_config(&config).is_err());
    }

    #[test]
    fn empty_flow_is_one_blank_page() {
        let frame = Frame::from_config(&RenderConfig::default()).unwrap();
        let pages = paginate(&[], &frame, &TextStyle::normal(), &courier());
        assert_eq!(pages, vec![PageLayout::default()]);
    }

    #[test]
    fn lines_stack_by_leading_and_spacers_add_gap() {
        let frame = Frame {
            left: 10.0,
            width: 1000.0,
            top: 100.0,
            bottom: 0.0,
        };
        let style = courier_style(10.0, 12.0);
        let flow = build_flow(&["one", "two"], 5.0);
        let pages = paginate(&flow, &frame, &style, &courier());
        assert_eq!(pages.len(), 1);
        let baselines: Vec<f32> = pages[0].lines.iter().map(|l| l.baseline).collect();
        let ascent = 10.0 * courier().ascender_ratio;
        assert_eq!(baselines, vec![100.0 - ascent, 100.0 - 12.0 - 5.0 - ascent]);
        assert!(pages[0].lines.iter().all(|l| l.x == 10.0));
    }

    #[test]
    fn paragraphs_continue_on_the_next_page() {
        // room for three 10pt lines per page
        let frame = Frame {
            left: 0.0,
            width: 30.0,
            top: 35.0,
            bottom: 0.0,
        };
        let style = courier_style(8.0, 10.0);
        let metrics = courier();
        // 8pt Courier: 4.8pt per char, 30pt holds 6 chars
        let flow = build_flow(&["aa bb cc dd ee", "ff"], 2.0);
        let pages = paginate(&flow, &frame, &style, &metrics);
        assert_eq!(
            texts(&pages),
            vec![
                vec!["aa bb".to_string(), "cc dd".to_string(), "ee".to_string()],
                vec!["ff".to_string()],
            ]
        );
    }

    #[test]
    fn spacer_overflow_ends_page_without_blank_trailer() {
        let frame = Frame {
            left: 0.0,
            width: 100.0,
            top: 25.0,
            bottom: 0.0,
        };
        let style = courier_style(8.0, 10.0);
        let flow = build_flow(&["one", "two"], 20.0);
        let pages = paginate(&flow, &frame, &style, &courier());
        // each spacer overflows and ends its page
        assert_eq!(
            texts(&pages),
            vec![vec!["one".to_string()], vec!["two".to_string()]]
        );
        // second page starts at the top, not offset by the dropped spacer
        assert_eq!(pages[1].lines[0].baseline, pages[0].lines[0].baseline);
    }
}
