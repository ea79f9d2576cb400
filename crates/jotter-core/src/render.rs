//! Content-type-aware rendering dispatch.
//!
//! Dispatch is a closed match over [`DocumentKind`], derived from the file
//! extension, so adding a new document type forces every call site to be
//! revisited at compile time. Rendering is a pure transformation: the same
//! name and bytes always produce the same output.

use pulldown_cmark::{Options, Parser, html};

use crate::error::RenderError;

/// The renderable kinds of document, derived from the extension.
///
/// Extension matching is case-sensitive: `README.MD` is `Unsupported`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// `.txt` — served verbatim as `text/plain`.
    PlainText,
    /// `.md` — rendered to HTML and embedded in the page layout.
    Markdown,
    /// Anything else — produces no renderable body.
    Unsupported,
}

impl DocumentKind {
    /// Classify a document by its name.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        if name.ends_with(".txt") {
            Self::PlainText
        } else if name.ends_with(".md") {
            Self::Markdown
        } else {
            Self::Unsupported
        }
    }
}

/// The output representation of a viewed document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderedView {
    /// Raw bytes, unmodified, to be served as `text/plain`.
    PlainText(Vec<u8>),
    /// An HTML fragment to embed in the standard page layout.
    Html(String),
}

/// Render stored bytes for viewing, dispatching on the file extension.
///
/// # Errors
///
/// Returns [`RenderError::UnsupportedExtension`] when the extension is
/// neither `.txt` nor `.md`.
pub fn render_for_view(name: &str, bytes: &[u8]) -> Result<RenderedView, RenderError> {
    match DocumentKind::from_name(name) {
        DocumentKind::PlainText => Ok(RenderedView::PlainText(bytes.to_vec())),
        DocumentKind::Markdown => {
            let source = String::from_utf8_lossy(bytes);
            Ok(RenderedView::Html(render_markdown(&source)))
        }
        DocumentKind::Unsupported => Err(RenderError::UnsupportedExtension {
            name: name.to_owned(),
        }),
    }
}

/// Render CommonMark source to an HTML fragment.
fn render_markdown(source: &str) -> String {
    let options = Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES;
    let parser = Parser::new_ext(source, options);
    let mut out = String::with_capacity(source.len() * 2);
    html::push_html(&mut out, parser);
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn kind_dispatch_is_case_sensitive() {
        assert_eq!(DocumentKind::from_name("a.txt"), DocumentKind::PlainText);
        assert_eq!(DocumentKind::from_name("a.md"), DocumentKind::Markdown);
        assert_eq!(DocumentKind::from_name("a.MD"), DocumentKind::Unsupported);
        assert_eq!(DocumentKind::from_name("a.png"), DocumentKind::Unsupported);
        assert_eq!(DocumentKind::from_name("noext"), DocumentKind::Unsupported);
    }

    #[test]
    fn plain_text_passes_through_unmodified() {
        let view = render_for_view("history.txt", b"Ruby 0.95 <released>").unwrap();
        assert_eq!(
            view,
            RenderedView::PlainText(b"Ruby 0.95 <released>".to_vec())
        );
    }

    #[test]
    fn markdown_headings_become_html() {
        let view = render_for_view("about.md", b"# Title").unwrap();
        let RenderedView::Html(body) = view else {
            panic!("expected HTML view");
        };
        assert!(body.contains("<h1>Title</h1>"));
    }

    #[test]
    fn markdown_emphasis_links_and_code() {
        let source = b"*hi* [here](https://example.com)\n\n```\ncode\n```";
        let RenderedView::Html(body) = render_for_view("n.md", source).unwrap() else {
            panic!("expected HTML view");
        };
        assert!(body.contains("<em>hi</em>"));
        assert!(body.contains("<a href=\"https://example.com\">here</a>"));
        assert!(body.contains("<code>"));
    }

    #[test]
    fn unsupported_extension_is_an_error() {
        let err = render_for_view("image.png", b"").unwrap_err();
        assert!(matches!(err, RenderError::UnsupportedExtension { name } if name == "image.png"));
    }

    #[test]
    fn rendering_is_deterministic() {
        let a = render_for_view("doc.md", b"# Same").unwrap();
        let b = render_for_view("doc.md", b"# Same").unwrap();
        assert_eq!(a, b);
    }
}
