//! Standalone HTML document for a rendered page.
//!
//! Used by the CLI's `--html` output. Styling is deliberately minimal; the
//! point is a self-contained file whose content matches the page model.

use super::badge::PLACEHOLDER;
use super::escape::escape_html;
use super::page::Page;

const STYLE: &str = r#"
:root { --bg: #ffffff; --fg: #111827; --muted: #6b7280; }
[data-theme="dark"] { --bg: #0f172a; --fg: #e5e7eb; --muted: #94a3b8; }
body { background: var(--bg); color: var(--fg); font-family: system-ui, sans-serif; max-width: 52rem; margin: 2rem auto; padding: 0 1rem; }
.score { font-size: 2.5rem; font-weight: 700; display: inline-block; padding: .25rem 1rem; border-radius: .75rem; }
.excellent { background: #16a34a; color: #fff; } .good { background: #65a30d; color: #fff; }
.average { background: #ca8a04; color: #fff; } .weak { background: #ea580c; color: #fff; }
.poor { background: #dc2626; color: #fff; }
.explanation, .placeholder, .stats { color: var(--muted); }
.keyword { display: inline-block; border: 1px solid var(--muted); border-radius: 1rem; padding: 0 .6rem; margin: .15rem; }
"#;

/// Assemble `page` into a complete HTML document.
pub fn document(page: &Page) -> String {
    let mut html = String::with_capacity(8_192);
    html.push_str("<!DOCTYPE html>\n");
    html.push_str(&format!(
        "<html lang=\"en\" data-theme=\"{}\">\n<head>\n<meta charset=\"utf-8\">\n",
        page.theme.as_str()
    ));
    html.push_str("<title>Profile review</title>\n<style>");
    html.push_str(STYLE);
    html.push_str("</style>\n</head>\n<body>\n");

    if let Some(error) = page.error() {
        html.push_str(&format!(
            "<div class=\"error\" role=\"alert\">{}</div>\n",
            escape_html(error)
        ));
    }

    if page.result_visible {
        let tier = page.score.tier.map(|t| t.class_name()).unwrap_or("");
        let pulse = if page.score.pulse.active { " pulse" } else { "" };
        html.push_str(&format!(
            "<div class=\"score {tier}{pulse}\">{}</div>\n",
            escape_html(&page.score.text)
        ));

        if page.stats.visible {
            html.push_str(&format!(
                "<p class=\"stats\">Connections: {} · Followers: {}</p>\n",
                escape_html(&page.stats.connections),
                escape_html(&page.stats.followers)
            ));
        }

        if let Some(cert) = &page.certificate {
            html.push_str(&format!(
                "<p class=\"standing\">{}</p>\n<a class=\"certificate\" href=\"{}\" target=\"_blank\" rel=\"noopener\">Download certificate</a>\n",
                escape_html(&cert.standing.to_string()),
                escape_html(&cert.url)
            ));
        }
        if let Some(share) = &page.share_url {
            html.push_str(&format!(
                "<a class=\"share\" href=\"{}\" target=\"_blank\" rel=\"noopener\">Share</a>\n",
                escape_html(share)
            ));
        }

        for (id, section) in page.sections() {
            html.push_str(&format!(
                "<section id=\"{id}\">\n<h3>{}</h3>\n{}\n</section>\n",
                id.title(),
                section.html
            ));
        }
    } else if page.error().is_none() {
        html.push_str(&format!("<div class=\"score\">{PLACEHOLDER}</div>\n"));
    }

    html.push_str("</body>\n</html>\n");
    html
}
