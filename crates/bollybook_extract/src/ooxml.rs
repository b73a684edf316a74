//! Text extraction from Office Open XML packages (DOCX and PPTX).

use bollybook_error::ExtractError;
use quick_xml::Reader;
use quick_xml::events::Event;
use std::io::{Cursor, Read};
use zip::ZipArchive;

/// Element names that matter when flattening one OOXML part to text.
struct Tags {
    /// Optional container whose paragraphs form one block (a slide shape)
    group: Option<&'static [u8]>,
    paragraph: &'static [u8],
    run: &'static [u8],
    text: &'static [u8],
    tab: &'static [u8],
    line_break: &'static [u8],
}

const WORD: Tags = Tags {
    group: None,
    paragraph: b"w:p",
    run: b"w:r",
    text: b"w:t",
    tab: b"w:tab",
    line_break: b"w:br",
};

const SLIDE: Tags = Tags {
    group: Some(b"p:sp"),
    paragraph: b"a:p",
    run: b"a:r",
    text: b"a:t",
    tab: b"a:tab",
    line_break: b"a:br",
};

/// Non-empty paragraphs of `word/document.xml`, one per line.
pub(crate) fn docx_text(bytes: &[u8]) -> Result<String, ExtractError> {
    let mut archive =
        ZipArchive::new(Cursor::new(bytes)).map_err(|e| ExtractError::failure("DOCX", e))?;
    let xml = read_part(&mut archive, "word/document.xml", "DOCX")?;
    let blocks = collect_blocks(&xml, &WORD).map_err(|e| ExtractError::failure("DOCX", e))?;
    Ok(join_non_empty(blocks))
}

/// Non-empty shape texts of every slide in slide order, one per line.
pub(crate) fn pptx_text(bytes: &[u8]) -> Result<String, ExtractError> {
    let mut archive =
        ZipArchive::new(Cursor::new(bytes)).map_err(|e| ExtractError::failure("PPTX", e))?;

    let mut slides: Vec<(u32, String)> = archive
        .file_names()
        .filter_map(|name| {
            let number = name
                .strip_prefix("ppt/slides/slide")?
                .strip_suffix(".xml")?
                .parse()
                .ok()?;
            Some((number, name.to_string()))
        })
        .collect();
    slides.sort_by_key(|(number, _)| *number);

    let mut blocks = Vec::new();
    for (_, name) in slides {
        let xml = read_part(&mut archive, &name, "PPTX")?;
        blocks.extend(collect_blocks(&xml, &SLIDE).map_err(|e| ExtractError::failure("PPTX", e))?);
    }
    Ok(join_non_empty(blocks))
}

fn read_part(
    archive: &mut ZipArchive<Cursor<&[u8]>>,
    name: &str,
    format: &str,
) -> Result<String, ExtractError> {
    let mut part = archive
        .by_name(name)
        .map_err(|e| ExtractError::failure(format, format!("{}: {}", name, e)))?;
    let mut xml = String::new();
    part.read_to_string(&mut xml)
        .map_err(|e| ExtractError::failure(format, e))?;
    Ok(xml)
}

fn join_non_empty(blocks: Vec<String>) -> String {
    blocks
        .into_iter()
        .filter(|b| !b.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Walk one XML part and return its text blocks in document order.
///
/// Without a group tag every paragraph is a block; with one, the paragraphs
/// inside each group are joined with newlines into a single block.
fn collect_blocks(xml: &str, tags: &Tags) -> Result<Vec<String>, quick_xml::Error> {
    let mut reader = Reader::from_str(xml);
    let mut buf = Vec::new();

    let mut blocks = Vec::new();
    let mut group: Vec<String> = Vec::new();
    let mut paragraph = String::new();
    let mut in_run = false;
    let mut in_text = false;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) => {
                let name = e.name();
                let name = name.as_ref();
                if name == tags.text {
                    in_text = true;
                } else if name == tags.run {
                    in_run = true;
                } else if name == tags.tab && in_run {
                    paragraph.push('\t');
                } else if name == tags.line_break {
                    paragraph.push('\n');
                }
            }
            Event::Empty(ref e) => {
                let name = e.name();
                let name = name.as_ref();
                if name == tags.paragraph {
                    finish_paragraph(&mut paragraph, &mut group, &mut blocks, tags);
                } else if name == tags.tab && in_run {
                    paragraph.push('\t');
                } else if name == tags.line_break {
                    paragraph.push('\n');
                }
            }
            Event::Text(e) if in_text => {
                paragraph.push_str(&e.unescape()?);
            }
            Event::End(ref e) => {
                let name = e.name();
                let name = name.as_ref();
                if name == tags.text {
                    in_text = false;
                } else if name == tags.run {
                    in_run = false;
                } else if name == tags.paragraph {
                    finish_paragraph(&mut paragraph, &mut group, &mut blocks, tags);
                } else if Some(name) == tags.group {
                    blocks.push(group.join("\n"));
                    group.clear();
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(blocks)
}

fn finish_paragraph(
    paragraph: &mut String,
    group: &mut Vec<String>,
    blocks: &mut Vec<String>,
    tags: &Tags,
) {
    let text = std::mem::take(paragraph);
    if tags.group.is_some() {
        group.push(text);
    } else {
        blocks.push(text);
    }
}
