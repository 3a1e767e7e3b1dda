//! Markdown to HTML rendering.
//!
//! Covers the subset documentation pages here use: ATX headings, paragraphs,
//! fenced code, unordered lists and inline code, emphasis and links. Every
//! paragraph is wrapped in `<p>…</p>`, which the paywall clipper relies on.

/// Rendered page body plus the title taken from its first `#` heading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub html: String,
    pub title: Option<String>,
}

/// Renderer seam between the site builder and the markup language.
pub trait PageRenderer {
    fn render(&self, markdown: &str) -> Rendered;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownRenderer;

impl MarkdownRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl PageRenderer for MarkdownRenderer {
    fn render(&self, markdown: &str) -> Rendered {
        let lines: Vec<&str> = markdown.lines().collect();
        let mut out = String::with_capacity(markdown.len() * 2);
        let mut title = None;
        let mut paragraph: Vec<&str> = Vec::new();
        let mut i = 0;

        while i < lines.len() {
            let line = lines[i];
            let trimmed = line.trim_start();

            if trimmed.starts_with("```") {
                flush_paragraph(&mut out, &mut paragraph);
                let lang = trimmed.trim_start_matches('`').trim();
                if lang.is_empty() {
                    out.push_str("<pre><code>");
                } else {
                    out.push_str(&format!(
                        "<pre><code class=\"language-{}\">",
                        escape_html(lang)
                    ));
                }
                i += 1;
                while i < lines.len() && !lines[i].trim_start().starts_with("```") {
                    out.push_str(&escape_html(lines[i]));
                    out.push('\n');
                    i += 1;
                }
                out.push_str("</code></pre>\n");
                // closing fence
                i += 1;
                continue;
            }

            if line.trim().is_empty() {
                flush_paragraph(&mut out, &mut paragraph);
                i += 1;
                continue;
            }

            if let Some((level, text)) = parse_heading(line) {
                flush_paragraph(&mut out, &mut paragraph);
                if level == 1 && title.is_none() {
                    title = Some(strip_inline(text)).filter(|t| !t.trim().is_empty());
                }
                out.push_str(&format!(
                    "<h{level} id=\"{}\">{}</h{level}>\n",
                    slugify(text),
                    inline_to_html(text)
                ));
                i += 1;
                continue;
            }

            if parse_list_item(line).is_some() {
                flush_paragraph(&mut out, &mut paragraph);
                out.push_str("<ul>\n");
                while let Some(item) = lines.get(i).and_then(|l| parse_list_item(l)) {
                    out.push_str(&format!("<li>{}</li>\n", inline_to_html(item)));
                    i += 1;
                }
                out.push_str("</ul>\n");
                continue;
            }

            paragraph.push(line.trim());
            i += 1;
        }
        flush_paragraph(&mut out, &mut paragraph);

        Rendered { html: out, title }
    }
}

fn flush_paragraph(out: &mut String, paragraph: &mut Vec<&str>) {
    if paragraph.is_empty() {
        return;
    }
    out.push_str("<p>");
    out.push_str(&inline_to_html(&paragraph.join(" ")));
    out.push_str("</p>\n");
    paragraph.clear();
}

fn parse_heading(line: &str) -> Option<(usize, &str)> {
    let level = line.chars().take_while(|&c| c == '#').count();
    if level == 0 || level > 6 {
        return None;
    }
    let rest = &line[level..];
    if !rest.is_empty() && !rest.starts_with(' ') {
        return None;
    }
    Some((level, rest.trim().trim_end_matches('#').trim_end()))
}

fn parse_list_item(line: &str) -> Option<&str> {
    let trimmed = line.trim_start();
    ["- ", "* ", "+ "]
        .iter()
        .find_map(|marker| trimmed.strip_prefix(marker))
        .map(str::trim)
}

/// Lowercase, alphanumerics kept, runs of anything else collapsed to `-`.
fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for c in strip_inline(text).chars() {
        if c.is_alphanumeric() {
            slug.extend(c.to_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug.trim_end_matches('-').to_string()
}

pub(crate) fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[derive(Debug)]
enum Inline<'a> {
    Text(&'a str),
    Strong(Vec<Inline<'a>>),
    Em(Vec<Inline<'a>>),
    Code(&'a str),
    Link { text: &'a str, href: &'a str },
}

fn tokenize(input: &str) -> Vec<Inline<'_>> {
    let mut tokens = Vec::new();
    let bytes = input.as_bytes();
    let mut pos = 0;

    while pos < bytes.len() {
        if bytes[pos] == b'`' {
            let start = pos + 1;
            if let Some(end) = input[start..].find('`') {
                tokens.push(Inline::Code(&input[start..start + end]));
                pos = start + end + 1;
                continue;
            }
        }

        if input[pos..].starts_with("**") {
            let start = pos + 2;
            if let Some(end) = input[start..].find("**") {
                tokens.push(Inline::Strong(tokenize(&input[start..start + end])));
                pos = start + end + 2;
                continue;
            }
        }

        if bytes[pos] == b'*' {
            let start = pos + 1;
            if let Some(end) = input[start..].find('*') {
                if end > 0 {
                    tokens.push(Inline::Em(tokenize(&input[start..start + end])));
                    pos = start + end + 1;
                    continue;
                }
            }
        }

        if bytes[pos] == b'[' {
            if let Some((text, href, consumed)) = parse_link(&input[pos..]) {
                tokens.push(Inline::Link { text, href });
                pos += consumed;
                continue;
            }
        }

        // Plain text up to the next marker; markers are ASCII so slicing is safe.
        let start = pos;
        pos += 1;
        while pos < bytes.len() && !matches!(bytes[pos], b'`' | b'*' | b'[') {
            pos += 1;
        }
        while !input.is_char_boundary(pos) {
            pos += 1;
        }
        tokens.push(Inline::Text(&input[start..pos]));
    }

    tokens
}

// `[text](href)` at the start of `input`; returns the byte length consumed.
fn parse_link(input: &str) -> Option<(&str, &str, usize)> {
    let close = input.find("](")?;
    let text = &input[1..close];
    let rest = &input[close + 2..];
    let end = rest.find(')')?;
    Some((text, &rest[..end], close + 2 + end + 1))
}

fn render_tokens(tokens: &[Inline<'_>], out: &mut String) {
    for token in tokens {
        match token {
            Inline::Text(text) => out.push_str(&escape_html(text)),
            Inline::Code(code) => {
                out.push_str("<code>");
                out.push_str(&escape_html(code));
                out.push_str("</code>");
            }
            Inline::Strong(inner) => {
                out.push_str("<strong>");
                render_tokens(inner, out);
                out.push_str("</strong>");
            }
            Inline::Em(inner) => {
                out.push_str("<em>");
                render_tokens(inner, out);
                out.push_str("</em>");
            }
            Inline::Link { text, href } => {
                out.push_str(&format!("<a href=\"{}\">", escape_html(href)));
                render_tokens(&tokenize(text), out);
                out.push_str("</a>");
            }
        }
    }
}

fn inline_to_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    render_tokens(&tokenize(input), &mut out);
    out
}

fn strip_tokens(tokens: &[Inline<'_>], out: &mut String) {
    for token in tokens {
        match token {
            Inline::Text(text) | Inline::Code(text) => out.push_str(text),
            Inline::Strong(inner) | Inline::Em(inner) => strip_tokens(inner, out),
            Inline::Link { text, .. } => strip_tokens(&tokenize(text), out),
        }
    }
}

/// Inline markup removed, for titles and anchors.
fn strip_inline(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    strip_tokens(&tokenize(input), &mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(md: &str) -> Rendered {
        MarkdownRenderer::new().render(md)
    }

    #[test]
    fn headings_paragraphs_and_title() {
        let out = render("# Getting *Started*\n\nFirst line\ncontinues.\n\nSecond.\n");
        assert_eq!(out.title.as_deref(), Some("Getting Started"));
        assert_eq!(
            out.html,
            "<h1 id=\"getting-started\">Getting <em>Started</em></h1>\n\
             <p>First line continues.</p>\n\
             <p>Second.</p>\n"
        );
    }

    #[test]
    fn title_comes_from_first_h1_only() {
        let out = render("## Intro\n\n# Real\n\n# Later\n");
        assert_eq!(out.title.as_deref(), Some("Real"));
        assert!(render("no heading").title.is_none());
    }

    #[test]
    fn empty_heading_gives_no_title() {
        let out = render("#\n\nBody.\n\n# Named\n");
        assert_eq!(out.title.as_deref(), Some("Named"));
        assert!(render("# #\n").title.is_none());
    }

    #[test]
    fn fenced_code_is_escaped_and_not_paragraphed() {
        let out = render("```rust\nlet x = a < b;\n```\n");
        assert_eq!(
            out.html,
            "<pre><code class=\"language-rust\">let x = a &lt; b;\n</code></pre>\n"
        );
        assert!(!out.html.contains("<p>"));
    }

    #[test]
    fn unordered_lists() {
        let out = render("- one\n- **two**\n\nafter");
        assert_eq!(
            out.html,
            "<ul>\n<li>one</li>\n<li><strong>two</strong></li>\n</ul>\n<p>after</p>\n"
        );
    }

    #[test]
    fn inline_code_and_links() {
        let out = render("Run `make <all>` or see [the docs](https://example.com/a?b=1&c=2).");
        assert_eq!(
            out.html,
            "<p>Run <code>make &lt;all&gt;</code> or see \
             <a href=\"https://example.com/a?b=1&amp;c=2\">the docs</a>.</p>\n"
        );
    }

    #[test]
    fn unmatched_markers_are_text() {
        let out = render("5 * 3 and [not a link");
        assert_eq!(out.html, "<p>5 * 3 and [not a link</p>\n");
    }

    #[test]
    fn non_ascii_text_survives() {
        let out = render("Überblick für café_au_lait");
        assert_eq!(out.html, "<p>Überblick für café_au_lait</p>\n");
    }
}
