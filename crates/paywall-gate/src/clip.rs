//! Truncation of rendered markup and the paywall notice.

/// Marker that ends a paragraph in rendered markup.
pub const PARAGRAPH_CLOSE: &str = "</p>";

/// Notice appended to every gated page. Must stay byte-identical across builds.
pub const PAYWALL_NOTICE: &str = r#"
<div class="admonition info">
    <p class="admonition-title">Dokknet Login Required</p>
    <p>
        Please log in at
        <a href="https://dokknet.com/login" target="_blank">
            https://dokknet.com/login
        </a>
        to view the rest of this page.
    </p>
    <p>No registration necessary, you just get a login link to your email and you can continue right away.</p>
</div>
"#;

/// Result of clipping one gated page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Clipped {
    pub html: String,
    /// False when no paragraph boundary existed and the full content was kept
    pub truncated: bool,
}

/// Cut `html` right after the first paragraph and append the notice.
///
/// Without any paragraph boundary the content is kept whole; emitting a
/// partial tag is never acceptable, showing the full teaser is.
pub fn clip_html(html: &str) -> Clipped {
    let (kept, truncated) = match html.find(PARAGRAPH_CLOSE) {
        Some(start) => (&html[..start + PARAGRAPH_CLOSE.len()], true),
        None => (html, false),
    };
    let mut out = String::with_capacity(kept.len() + PAYWALL_NOTICE.len());
    out.push_str(kept);
    out.push_str(PAYWALL_NOTICE);
    Clipped {
        html: out,
        truncated,
    }
}
