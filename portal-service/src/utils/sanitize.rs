//! Text cleanup for values inlined into the PDF certificate.

use once_cell::sync::Lazy;
use regex::Regex;

static LINK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:https?://|www\.)[^\s|]+").expect("Invalid link pattern")
});

/// Bare domain that upstream notes embed without a scheme.
static BLOCKED_DOMAIN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)b\.com").expect("Invalid blocked domain pattern"));

static PIPE_SPACING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+\|\s+").expect("Invalid pipe pattern"));

static LEADING_PIPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*\|\s*").expect("Invalid leading pipe pattern"));

static TRAILING_PIPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*\|\s*$").expect("Invalid trailing pipe pattern"));

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escapes `text` for HTML and strips link-like runs.
///
/// A link runs from `http://`, `https://` or `www.` up to the next
/// whitespace or `|`. Any `b.com` left after that is removed too. Spacing around the remaining pipes is normalised and a
/// dangling pipe at either end is dropped. The result is safe to emit
/// without further escaping.
pub fn sanitize_text(text: &str) -> String {
    let escaped = escape_html(text);
    let unlinked = LINK.replace_all(&escaped, "");
    let unlinked = BLOCKED_DOMAIN.replace_all(&unlinked, "");
    let spaced = PIPE_SPACING.replace_all(&unlinked, " | ");
    let lead = LEADING_PIPE.replace(&spaced, "");
    let trail = TRAILING_PIPE.replace(&lead, "");
    trail.trim().to_string()
}
