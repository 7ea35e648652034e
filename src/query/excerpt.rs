//! Display excerpts: an escaped window of document text around the first
//! match, with matched words wrapped in `<mark>`.

/// Total words in an excerpt window.
const EXCERPT_WORDS: usize = 30;
/// Words of leading context kept before the first matched word.
const LEAD_WORDS: usize = 8;

/// Build an HTML excerpt for `text` given normalized query terms.
///
/// The window starts shortly before the first word matching any term (or at
/// the top of the document when nothing matches). All output text is
/// HTML-escaped; only the `<mark>` wrappers are markup.
pub(crate) fn build_excerpt(text: &str, terms: &[String]) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() {
        return String::new();
    }

    let first_match = words.iter().position(|w| matches_term(w, terms));
    let start = first_match.unwrap_or(0).saturating_sub(LEAD_WORDS);
    let end = (start + EXCERPT_WORDS).min(words.len());

    let mut out = String::new();
    if start > 0 {
        out.push_str("… ");
    }
    for (i, word) in words[start..end].iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        if matches_term(word, terms) {
            out.push_str("<mark>");
            out.push_str(&escape_html(word));
            out.push_str("</mark>");
        } else {
            out.push_str(&escape_html(word));
        }
    }
    if end < words.len() {
        out.push_str(" …");
    }

    out
}

/// Prefix match against the normalized form of a raw word, mirroring the
/// index's forward tokenization.
fn matches_term(word: &str, terms: &[String]) -> bool {
    if terms.is_empty() {
        return false;
    }
    let normalized: String = word
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect();
    terms.iter().any(|t| normalized.starts_with(t.as_str()))
}

fn escape_html(text: &str) -> String {
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
