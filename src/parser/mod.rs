pub mod html;
pub mod markdown;

use std::path::Path;

/// How a source's content is interpreted before extraction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    Html,
    Markdown,
}

impl MediaType {
    /// Detect media type from a file path or URL extension
    pub fn from_path(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or(path);
        let ext = Path::new(path)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "md" | "mdx" | "markdown" | "mkd" | "mkdn" => MediaType::Markdown,
            _ => MediaType::Html,
        }
    }

    /// Detect media type from a declared MIME type such as a Content-Type header
    pub fn from_mime(mime: &str) -> Option<Self> {
        let essence = mime.split(';').next().unwrap_or("").trim().to_lowercase();
        match essence.as_str() {
            "text/markdown" | "text/x-markdown" => Some(MediaType::Markdown),
            "text/html" | "application/xhtml+xml" => Some(MediaType::Html),
            _ => None,
        }
    }

    /// Markdown if either the path or the declared type says so
    pub fn resolve(path: &str, declared: Option<&str>) -> Self {
        match declared.and_then(Self::from_mime) {
            Some(MediaType::Markdown) => MediaType::Markdown,
            _ => Self::from_path(path),
        }
    }
}

/// Bring any supported source to HTML
pub fn normalize(path: &str, content: &str, declared: Option<&str>) -> String {
    match MediaType::resolve(path, declared) {
        MediaType::Markdown => markdown::to_html(content),
        MediaType::Html => content.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_type_detection() {
        assert_eq!(MediaType::from_path("README.md"), MediaType::Markdown);
        assert_eq!(MediaType::from_path("docs/Guide.MARKDOWN"), MediaType::Markdown);
        assert_eq!(MediaType::from_path("index.html"), MediaType::Html);
        assert_eq!(MediaType::from_path("https://example.com/notes.md?raw=1"), MediaType::Markdown);
        assert_eq!(MediaType::from_path("https://example.com/"), MediaType::Html);
    }

    #[test]
    fn test_mime_detection() {
        assert_eq!(MediaType::from_mime("text/markdown; charset=UTF-8"), Some(MediaType::Markdown));
        assert_eq!(MediaType::from_mime("text/html"), Some(MediaType::Html));
        assert_eq!(MediaType::from_mime("application/json"), None);
        assert_eq!(MediaType::resolve("page", Some("text/x-markdown")), MediaType::Markdown);
        assert_eq!(MediaType::resolve("page.md", Some("text/html")), MediaType::Markdown);
        assert_eq!(MediaType::resolve("page.html", None), MediaType::Html);
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("a.md", "This is *very* good.", None).trim(), "<p>This is <em>very</em> good.</p>");
        assert_eq!(normalize("a.html", "<p>x</p>", None), "<p>x</p>");
    }
}
