use pulldown_cmark::{html, Options, Parser};

/// Render Markdown to HTML. Fenced and inline code come out as `<pre>` and
/// `<code>` elements, which the extractor never reads text from.
pub fn to_html(content: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_TASKLISTS);

    let parser = Parser::new_ext(content, options);
    let mut output = String::with_capacity(content.len() * 3 / 2);
    html::push_html(&mut output, parser);
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markdown_rendering() {
        let content = r#"
# Title

This is a test paragraph with some words.

```rust
fn main() {
    println!("This should be ignored");
}
```

More text with `inline_code` here.
"#;

        let html = to_html(content);
        assert!(html.contains("<h1>Title</h1>"));
        assert!(html.contains("<p>This is a test paragraph with some words.</p>"));
        assert!(html.contains("<pre><code class=\"language-rust\">"));
        assert!(html.contains("<code>inline_code</code>"));
    }

    #[test]
    fn test_emphasis_and_lists() {
        let html = to_html("This is *very* good.\n\n- one\n- two\n");
        assert!(html.contains("<p>This is <em>very</em> good.</p>"));
        assert!(html.contains("<li>one</li>"));
    }

    #[test]
    fn test_deterministic() {
        let source = "| a | b |\n|---|---|\n| 1 | 2 |\n";
        assert_eq!(to_html(source), to_html(source));
        assert!(to_html(source).contains("<table>"));
    }
}
