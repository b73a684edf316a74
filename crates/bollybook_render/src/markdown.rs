//! Markdown rendering.

use bollybook_core::{BOOK_TITLE, BookArtifact};

/// Render a book as Markdown.
///
/// Title heading, title page, table of contents and one `## Chapter N: Title`
/// section per chapter, each block closed by a horizontal rule. Generated
/// text is copied verbatim.
pub fn render_markdown(book: &BookArtifact) -> String {
    let mut parts: Vec<String> = vec![
        format!("# 📚 {}\n", BOOK_TITLE),
        book.title_page.clone(),
        "\n---\n".to_string(),
        "## 📖 Table of Contents\n".to_string(),
        book.table_of_contents.clone(),
        "\n---\n".to_string(),
    ];

    for chapter in &book.chapters {
        parts.push(format!(
            "\n## Chapter {}: {}\n",
            chapter.number, chapter.title
        ));
        parts.push(chapter.content.clone());
        parts.push("\n---\n".to_string());
    }

    parts.join("\n")
}
