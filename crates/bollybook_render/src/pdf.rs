//! PDF rendering through printpdf's HTML layout.

use bollybook_core::{BOOK_TITLE, BookArtifact};
use bollybook_error::{RenderError, RenderErrorKind};
use printpdf::{GeneratePdfOptions, PdfDocument, PdfSaveOptions};
use std::collections::BTreeMap;

const STYLE: &str = "@page { size: A4; margin: 72pt 72pt 18pt 72pt; }
body { font-family: sans-serif; font-size: 11pt; line-height: 14pt; }
h1.title { font-size: 24pt; color: #FF6B6B; text-align: center; margin-bottom: 30pt; }
h2 { font-size: 16pt; color: #4ECDC4; margin-bottom: 12pt; }
p { margin: 0; }
p.spacer { height: 14pt; }
.page-break { page-break-after: always; }";

/// Escape `&`, `<` and `>` for HTML text content.
///
/// # Examples
///
/// ```
/// use bollybook_render::escape_html;
///
/// assert_eq!(escape_html("A & <B>"), "A &amp; &lt;B&gt;");
/// ```
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escaped text as one paragraph per line; blank lines become empty spacers.
///
/// The layout engine has no `<br>`, so line structure is carried by blocks.
fn body_paragraphs(text: &str) -> String {
    escape_html(text)
        .lines()
        .map(|line| {
            if line.trim().is_empty() {
                "<p class=\"spacer\"></p>".to_string()
            } else {
                format!("<p>{}</p>", line)
            }
        })
        .collect()
}

/// HTML laid out for the PDF renderer.
///
/// Text is escaped before it is split into paragraphs, so markup characters
/// in generated text never reach the layout engine as tags.
pub fn book_html(book: &BookArtifact) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html><html><head><style>");
    html.push_str(STYLE);
    html.push_str("</style></head><body>");

    html.push_str(&format!(
        "<h1 class=\"title\">📚 {}</h1>",
        escape_html(BOOK_TITLE)
    ));
    html.push_str(&body_paragraphs(&book.title_page));
    html.push_str("<div class=\"page-break\"></div>");

    html.push_str("<h2>📖 Table of Contents</h2>");
    html.push_str(&body_paragraphs(&book.table_of_contents));
    html.push_str("<div class=\"page-break\"></div>");

    for chapter in &book.chapters {
        html.push_str(&format!(
            "<h2>Chapter {}: {}</h2>",
            chapter.number,
            escape_html(&chapter.title)
        ));
        html.push_str(&body_paragraphs(&chapter.content));
        html.push_str("<div class=\"page-break\"></div>");
    }

    html.push_str("</body></html>");
    html
}

/// Render a book as PDF bytes.
#[tracing::instrument(skip(book), fields(book_id = %book.book_id))]
pub fn render_pdf(book: &BookArtifact) -> Result<Vec<u8>, RenderError> {
    let html = book_html(book);
    let mut warnings = Vec::new();

    let doc = PdfDocument::from_html(
        &html,
        &BTreeMap::new(),
        &BTreeMap::new(),
        &GeneratePdfOptions::default(),
        &mut warnings,
    )
    .map_err(|e| RenderError::new(RenderErrorKind::Pdf(e.to_string())))?;

    let bytes = doc.save(&PdfSaveOptions::default(), &mut warnings);
    if !warnings.is_empty() {
        tracing::debug!(count = warnings.len(), "PDF layout produced warnings");
    }
    if bytes.is_empty() {
        return Err(RenderError::new(RenderErrorKind::Pdf(
            "renderer produced no output".to_string(),
        )));
    }

    Ok(bytes)
}
