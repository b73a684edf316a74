//! DOCX rendering.
//!
//! Builds a minimal WordprocessingML package by hand: content types, the
//! package relationships, a style sheet with `Title` and `Heading1`, and the
//! document body.

use bollybook_core::{BOOK_TITLE, BookArtifact};
use bollybook_error::{RenderError, RenderErrorKind};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use std::io::{Cursor, Write};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

const WORD_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/><Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/></Types>"#;

const PACKAGE_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

const DOCUMENT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/></Relationships>"#;

const STYLES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/><w:rPr><w:sz w:val="22"/></w:rPr></w:style><w:style w:type="paragraph" w:styleId="Title"><w:name w:val="Title"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:pPr><w:spacing w:after="300"/></w:pPr><w:rPr><w:color w:val="17365D"/><w:sz w:val="52"/></w:rPr></w:style><w:style w:type="paragraph" w:styleId="Heading1"><w:name w:val="heading 1"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:pPr><w:keepNext/><w:spacing w:before="480"/><w:outlineLvl w:val="0"/></w:pPr><w:rPr><w:b/><w:color w:val="365F91"/><w:sz w:val="28"/></w:rPr></w:style></w:styles>"#;

/// Paragraph-level formatting.
#[derive(Debug, Clone, Copy, Default)]
struct ParagraphStyle {
    style_id: Option<&'static str>,
    centered: bool,
    /// Bold 12pt runs for page markers
    emphasized: bool,
}

const TITLE: ParagraphStyle = ParagraphStyle {
    style_id: Some("Title"),
    centered: true,
    emphasized: false,
};

const HEADING: ParagraphStyle = ParagraphStyle {
    style_id: Some("Heading1"),
    centered: false,
    emphasized: false,
};

const CENTERED: ParagraphStyle = ParagraphStyle {
    style_id: None,
    centered: true,
    emphasized: false,
};

const PAGE_MARKER: ParagraphStyle = ParagraphStyle {
    style_id: None,
    centered: false,
    emphasized: true,
};

fn docx_error(e: impl std::fmt::Display) -> RenderError {
    RenderError::new(RenderErrorKind::Docx(e.to_string()))
}

/// Streams `word/document.xml`.
struct BodyWriter {
    writer: Writer<Vec<u8>>,
}

impl BodyWriter {
    fn new() -> Result<Self, RenderError> {
        let mut writer = Writer::new(Vec::new());
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))
            .map_err(docx_error)?;
        let mut document = BytesStart::new("w:document");
        document.push_attribute(("xmlns:w", WORD_NS));
        writer
            .write_event(Event::Start(document))
            .map_err(docx_error)?;
        writer
            .write_event(Event::Start(BytesStart::new("w:body")))
            .map_err(docx_error)?;
        Ok(Self { writer })
    }

    fn start(&mut self, name: &str) -> Result<(), RenderError> {
        self.writer
            .write_event(Event::Start(BytesStart::new(name)))
            .map_err(docx_error)
    }

    fn end(&mut self, name: &str) -> Result<(), RenderError> {
        self.writer
            .write_event(Event::End(BytesEnd::new(name)))
            .map_err(docx_error)
    }

    fn empty(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<(), RenderError> {
        let mut element = BytesStart::new(name);
        for attr in attrs {
            element.push_attribute(*attr);
        }
        self.writer
            .write_event(Event::Empty(element))
            .map_err(docx_error)
    }

    /// One paragraph; single newlines in `text` become line breaks.
    fn paragraph(&mut self, text: &str, style: ParagraphStyle) -> Result<(), RenderError> {
        self.start("w:p")?;
        if style.style_id.is_some() || style.centered {
            self.start("w:pPr")?;
            if let Some(id) = style.style_id {
                self.empty("w:pStyle", &[("w:val", id)])?;
            }
            if style.centered {
                self.empty("w:jc", &[("w:val", "center")])?;
            }
            self.end("w:pPr")?;
        }

        self.start("w:r")?;
        if style.emphasized {
            self.start("w:rPr")?;
            self.empty("w:b", &[])?;
            self.empty("w:sz", &[("w:val", "24")])?;
            self.end("w:rPr")?;
        }
        for (idx, line) in text.split('\n').enumerate() {
            if idx > 0 {
                self.empty("w:br", &[])?;
            }
            let mut t = BytesStart::new("w:t");
            t.push_attribute(("xml:space", "preserve"));
            self.writer.write_event(Event::Start(t)).map_err(docx_error)?;
            self.writer
                .write_event(Event::Text(BytesText::new(line)))
                .map_err(docx_error)?;
            self.end("w:t")?;
        }
        self.end("w:r")?;
        self.end("w:p")
    }

    fn page_break(&mut self) -> Result<(), RenderError> {
        self.start("w:p")?;
        self.start("w:r")?;
        self.empty("w:br", &[("w:type", "page")])?;
        self.end("w:r")?;
        self.end("w:p")
    }

    fn finish(mut self) -> Result<Vec<u8>, RenderError> {
        self.end("w:body")?;
        self.end("w:document")?;
        Ok(self.writer.into_inner())
    }
}

/// Whether a chapter paragraph is a page marker line.
fn is_page_marker(paragraph: &str) -> bool {
    paragraph.starts_with("Page ") || paragraph.starts_with('━')
}

fn document_xml(book: &BookArtifact) -> Result<Vec<u8>, RenderError> {
    let mut body = BodyWriter::new()?;

    body.paragraph(&format!("📚 {}", BOOK_TITLE), TITLE)?;
    body.paragraph(&book.title_page, CENTERED)?;
    body.page_break()?;

    body.paragraph("📖 Table of Contents", HEADING)?;
    body.paragraph(&book.table_of_contents, ParagraphStyle::default())?;
    body.page_break()?;

    for chapter in &book.chapters {
        body.paragraph(
            &format!("Chapter {}: {}", chapter.number, chapter.title),
            HEADING,
        )?;
        for block in chapter.content.split("\n\n") {
            let block = block.trim();
            if block.is_empty() {
                continue;
            }
            let style = if is_page_marker(block) {
                PAGE_MARKER
            } else {
                ParagraphStyle::default()
            };
            body.paragraph(block, style)?;
        }
        body.page_break()?;
    }

    body.finish()
}

/// Render a book as a DOCX package.
///
/// Chapter text is split into paragraphs on blank lines. Paragraphs that
/// start with `Page ` or `━` are set in bold 12pt.
#[tracing::instrument(skip(book), fields(book_id = %book.book_id))]
pub fn render_docx(book: &BookArtifact) -> Result<Vec<u8>, RenderError> {
    let document = document_xml(book)?;

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();
    let parts: [(&str, &[u8]); 5] = [
        ("[Content_Types].xml", CONTENT_TYPES.as_bytes()),
        ("_rels/.rels", PACKAGE_RELS.as_bytes()),
        ("word/_rels/document.xml.rels", DOCUMENT_RELS.as_bytes()),
        ("word/styles.xml", STYLES.as_bytes()),
        ("word/document.xml", &document),
    ];
    for (name, bytes) in parts {
        zip.start_file(name, options).map_err(docx_error)?;
        zip.write_all(bytes).map_err(docx_error)?;
    }
    let bytes = zip.finish().map_err(docx_error)?.into_inner();

    tracing::debug!(bytes = bytes.len(), "Rendered DOCX");
    Ok(bytes)
}
