use regex::{Captures, Regex};
use std::sync::OnceLock;

/// Escapes the five characters that are unsafe inside HTML text or quoted
/// attribute values.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn line_break_regex() -> &'static Regex {
    static RE_BR: OnceLock<Regex> = OnceLock::new();
    RE_BR.get_or_init(|| Regex::new(r"(\n|\r|\n\r)+").expect("valid line break regex"))
}

fn link_regex() -> &'static Regex {
    static RE_HREF: OnceLock<Regex> = OnceLock::new();
    RE_HREF.get_or_init(|| {
        Regex::new(r"(https?://)([a-z0-9/\?#!\$&'\(\)\*\.\+=]+)").expect("valid link regex")
    })
}

fn anchor(scheme: &str, rest: &str) -> String {
    format!(r#"<a href="{scheme}{rest}" target="_blank" rel="nofollow">{rest}</a>"#)
}

/// Converts plain text into display markup: runs of line breaks become a
/// single `<br>` and `http(s)://` links become anchors opening in a new tab.
///
/// The input is not escaped here. Use [`note_markup`] for user text.
pub fn simple_format(text: &str) -> String {
    let html = line_break_regex().replace_all(text, "<br>");
    link_regex()
        .replace_all(&html, |caps: &Captures| {
            let scheme = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
            let rest = caps.get(2).map(|m| m.as_str()).unwrap_or_default();
            anchor(scheme, rest)
        })
        .into_owned()
}

/// Markup shown in a note's display area for the given raw content.
///
/// Links are found in the raw text, so `&` and `'` inside a URL stay part of
/// it; every piece is escaped on its own before it lands in the output.
pub fn note_markup(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    let mut cursor = 0usize;
    for caps in link_regex().captures_iter(content) {
        let (Some(whole), Some(scheme), Some(rest)) = (caps.get(0), caps.get(1), caps.get(2)) else {
            continue;
        };
        push_text(&mut out, &content[cursor..whole.start()]);
        out.push_str(&anchor(
            &escape_html(scheme.as_str()),
            &escape_html(rest.as_str()),
        ));
        cursor = whole.end();
    }
    push_text(&mut out, &content[cursor..]);
    out
}

fn push_text(out: &mut String, text: &str) {
    out.push_str(&line_break_regex().replace_all(&escape_html(text), "<br>"));
}
