//! Page shell: document frame, navigation sidebar and the paywall debug toggle.

use paywall_gate::{NavItem, Navigation, Page};

use crate::render::escape_html;

/// Element id the toggle script binds to.
pub const TOGGLE_ELEMENT_ID: &str = "dokknet-example-paywall-toggle";

/// Site-relative path of the toggle script.
pub const TOGGLE_SCRIPT_PATH: &str = "javascripts/toggle-paywall.js";

/// Flips the `DEBUG_SEND_PAYWALL` cookie and reloads, so the edge can be asked
/// for the gated variant without an account.
pub const TOGGLE_SCRIPT: &str = r#"(function () {
  'use strict'

  var COOKIE = 'DEBUG_SEND_PAYWALL'
  var toggle = document.getElementById('dokknet-example-paywall-toggle')
  if (!toggle) {
    return
  }

  function readCookie(name) {
    var match = document.cookie.match(new RegExp('(^| )' + name + '=([^;]+)'))
    return match ? match[2] : undefined
  }

  toggle.addEventListener('click', function (event) {
    event.preventDefault()
    var next = readCookie(COOKIE) === 'true' ? 'false' : 'true'
    document.cookie = COOKIE + '=' + next + ';Path=/;'
    location.reload()
  })
})()
"#;

const STYLE: &str = r#"<style>
body{margin:0;font-family:-apple-system,BlinkMacSystemFont,"Segoe UI",Roboto,sans-serif;color:#222}
.md-header{background:#3f51b5;color:#fff;padding:.8rem 1.2rem;display:flex;justify-content:space-between}
.md-header a{color:#fff;text-decoration:none}
.md-layout{display:flex}
.md-sidebar{min-width:14rem;padding:1rem;border-right:1px solid #eee}
.md-sidebar ul{list-style:none;padding-left:.8rem;margin:.2rem 0}
.md-nav-link.active{font-weight:bold}
.md-content{padding:1rem 2rem;max-width:48rem}
.admonition{border-left:4px solid #448aff;padding:.4rem 1rem;background:#f5f8ff}
</style>"#;

/// Wraps rendered page bodies into complete HTML documents.
///
/// All site links are relative to the page's public URL, so a gated copy
/// served from its public location resolves them exactly like the original.
#[derive(Debug, Clone)]
pub struct ThemeShell {
    site_name: String,
    show_toggle_button: bool,
}

impl ThemeShell {
    pub fn new(site_name: impl Into<String>, show_toggle_button: bool) -> Self {
        Self {
            site_name: site_name.into(),
            show_toggle_button,
        }
    }

    pub fn show_toggle_button(&self) -> bool {
        self.show_toggle_button
    }

    /// Complete document for one page.
    pub fn wrap(&self, page: &Page, content: &str, nav: &Navigation) -> String {
        let base = relative_root(page.url());
        let title = match page.title.as_deref() {
            Some(title) if title != self.site_name => format!("{title} - {}", self.site_name),
            _ => self.site_name.clone(),
        };

        let mut html = String::with_capacity(content.len() + 4096);
        html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
        html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
        html.push_str(&format!("<title>{}</title>\n", escape_html(&title)));
        html.push_str(STYLE);
        html.push_str("\n</head>\n<body>\n");

        html.push_str("<header class=\"md-header\">");
        html.push_str(&format!(
            "<a class=\"md-header-title\" href=\"{}\">{}</a>",
            link_href(&base, ""),
            escape_html(&self.site_name)
        ));
        if self.show_toggle_button {
            html.push_str(&format!(
                "<a id=\"{TOGGLE_ELEMENT_ID}\" href=\"#\" title=\"Toggle paywall\">Toggle paywall</a>"
            ));
        }
        html.push_str("</header>\n");

        html.push_str("<div class=\"md-layout\">\n<nav class=\"md-sidebar\">\n");
        render_items(&nav.items, &base, page.url(), &mut html);
        html.push_str("</nav>\n<main class=\"md-content\">\n");
        html.push_str(content);
        html.push_str("\n</main>\n</div>\n");

        if self.show_toggle_button {
            html.push_str(&format!(
                "<script src=\"{}\"></script>\n",
                link_href(&base, TOGGLE_SCRIPT_PATH)
            ));
        }
        html.push_str("</body>\n</html>\n");
        html
    }
}

fn render_items(items: &[NavItem], base: &str, current_url: &str, html: &mut String) {
    if items.is_empty() {
        return;
    }
    html.push_str("<ul>\n");
    for item in items {
        html.push_str("<li>");
        match item {
            NavItem::Page(page) => {
                let class = if page.url == current_url {
                    "md-nav-link active"
                } else {
                    "md-nav-link"
                };
                html.push_str(&format!(
                    "<a class=\"{class}\" href=\"{}\">{}</a>",
                    link_href(base, &page.url),
                    escape_html(page.derived_title())
                ));
            }
            NavItem::Section(section) => {
                html.push_str(&format!(
                    "<span class=\"md-nav-section\">{}</span>\n",
                    escape_html(&section.title)
                ));
                render_items(&section.children, base, current_url, html);
            }
            NavItem::Link(link) => {
                html.push_str(&format!(
                    "<a class=\"md-nav-link external\" href=\"{}\">{}</a>",
                    escape_html(&link.url),
                    escape_html(&link.title)
                ));
            }
        }
        html.push_str("</li>\n");
    }
    html.push_str("</ul>\n");
}

/// `../` once per directory level of `url`.
fn relative_root(url: &str) -> String {
    "../".repeat(url.trim_start_matches('/').matches('/').count())
}

fn link_href(base: &str, url: &str) -> String {
    let href = format!("{base}{url}");
    if href.is_empty() {
        "./".to_string()
    } else {
        escape_html(&href)
    }
}
