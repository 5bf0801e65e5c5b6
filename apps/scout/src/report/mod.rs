//! Report rendering — turns a ranked report into plain text and a standalone
//! HTML document. Content is HTML-escaped; bare URLs become anchors.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::RankedReport;

static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(https?://[^\s<]+)").expect("invalid url regex"));

const HTML_HEAD: &str = "<!DOCTYPE html><html><head><meta charset=\"UTF-8\"><title>Job Evaluations</title>\
<style>body{font-family:sans-serif;padding:20px;} .eval{margin-bottom:40px;padding:20px;border:1px solid #ccc;border-radius:10px;} h2{margin-top:0;} a{color:#0645AD;}</style>\
</head><body><h1>Job Fit Evaluations</h1>";

/// Concatenates the evaluations in rank order as plain text.
pub fn render_text(report: &RankedReport) -> String {
    let mut out = String::new();
    for record in &report.records {
        out.push_str(&record.text);
        out.push('\n');
    }
    out
}

/// Renders the full HTML document, one card per evaluation in rank order.
pub fn render_html(report: &RankedReport) -> String {
    let mut out = String::from(HTML_HEAD);
    for (rank, record) in report.records.iter().enumerate() {
        out.push_str("<div class='eval'>");
        out.push_str(&format!("<h2>Job Evaluation #{}</h2>", rank + 1));
        out.push_str(&text_to_html(&record.text));
        out.push_str("</div>");
    }
    out.push_str("</body></html>");
    out
}

/// Escapes HTML special characters, converts URLs to clickable anchors, and
/// turns newlines into `<br>`.
fn text_to_html(text: &str) -> String {
    let escaped = text
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;");
    let linked = URL_RE.replace_all(&escaped, r#"<a href="$1" target="_blank">$1</a>"#);
    linked.replace('\n', "<br>")
}
