use std::io::{Cursor, Read};

use zip::ZipArchive;
use zip::result::ZipError;

use crate::error::{Error, MalformedInput};
use crate::model::{CoreProperties, DocxText};

const WML_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const DC_NS: &str = "http://purl.org/dc/elements/1.1/";

const DOCUMENT_PART: &str = "word/document.xml";
const CORE_PART: &str = "docProps/core.xml";

type Package<'a> = ZipArchive<Cursor<&'a [u8]>>;

fn is_wml(node: roxmltree::Node, name: &str) -> bool {
    node.tag_name().name() == name && node.tag_name().namespace() == Some(WML_NS)
}

fn wml<'a>(node: roxmltree::Node<'a, 'a>, name: &str) -> Option<roxmltree::Node<'a, 'a>> {
    node.children().find(|n| is_wml(*n, name))
}

fn read_part(zip: &mut Package, name: &'static str) -> Result<String, Error> {
    let mut file = zip.by_name(name).map_err(|e| match e {
        ZipError::FileNotFound => MalformedInput::MissingPart(name),
        other => MalformedInput::Zip(other),
    })?;
    let mut xml_content = String::new();
    file.read_to_string(&mut xml_content)
        .map_err(MalformedInput::Read)?;
    Ok(xml_content)
}

fn push_run_text(run: roxmltree::Node, out: &mut String) {
    for node in run.children() {
        if node.tag_name().namespace() != Some(WML_NS) {
            continue;
        }
        match node.tag_name().name() {
            "t" => out.push_str(node.text().unwrap_or_default()),
            "tab" | "ptab" => out.push('\t'),
            "cr" => out.push('\n'),
            // page and column breaks carry no text
            "br" => match node.attribute((WML_NS, "type")) {
                None | Some("textWrapping") => out.push('\n'),
                _ => {}
            },
            "noBreakHyphen" => out.push('-'),
            _ => {}
        }
    }
}

fn paragraph_text(para: roxmltree::Node) -> String {
    let mut text = String::new();
    for child in para.children() {
        if is_wml(child, "r") {
            push_run_text(child, &mut text);
        } else if is_wml(child, "hyperlink") {
            for run in child.children().filter(|n| is_wml(*n, "r")) {
                push_run_text(run, &mut text);
            }
        }
    }
    text
}

fn parse_paragraphs(xml_content: &str) -> Result<Vec<String>, Error> {
    let xml = roxmltree::Document::parse(xml_content)?;
    let root = xml.root_element();
    let body = wml(root, "body").ok_or(MalformedInput::MissingBody)?;

    Ok(body
        .children()
        .filter(|n| is_wml(*n, "p"))
        .map(paragraph_text)
        .collect())
}

fn parse_core_properties(zip: &mut Package) -> CoreProperties {
    let xml_content = match read_part(zip, CORE_PART) {
        Ok(content) => content,
        Err(e) => {
            log::debug!("No usable core properties: {e}");
            return CoreProperties::default();
        }
    };
    let xml = match roxmltree::Document::parse(&xml_content) {
        Ok(xml) => xml,
        Err(e) => {
            log::debug!("Ignoring unparsable {CORE_PART}: {e}");
            return CoreProperties::default();
        }
    };

    let dc = |name: &str| {
        xml.root_element()
            .children()
            .find(|n| n.tag_name().name() == name && n.tag_name().namespace() == Some(DC_NS))
            .and_then(|n| n.text())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    CoreProperties {
        title: dc("title"),
        author: dc("creator"),
        subject: dc("subject"),
    }
}

fn open(bytes: &[u8]) -> Result<Package<'_>, Error> {
    Ok(ZipArchive::new(Cursor::new(bytes))?)
}

/// One string per body paragraph, in document order, unfiltered.
pub fn read_paragraphs(bytes: &[u8]) -> Result<Vec<String>, Error> {
    let mut zip = open(bytes)?;
    let xml_content = read_part(&mut zip, DOCUMENT_PART)?;
    let paragraphs = parse_paragraphs(&xml_content)?;
    log::debug!("Read {} paragraphs from {DOCUMENT_PART}", paragraphs.len());
    Ok(paragraphs)
}

/// Paragraphs plus package core properties.
pub fn read_document(bytes: &[u8]) -> Result<DocxText, Error> {
    let mut zip = open(bytes)?;
    let xml_content = read_part(&mut zip, DOCUMENT_PART)?;
    let paragraphs = parse_paragraphs(&xml_content)?;
    let properties = parse_core_properties(&mut zip);
    Ok(DocxText {
        paragraphs,
        properties,
    })
}
