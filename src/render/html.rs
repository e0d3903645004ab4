//! HTML to plain text.
//!
//! Text is pulled out with a small state-machine scanner instead of a DOM: the
//! scanner walks the input once, tracking whether it is in text, inside a tag,
//! inside a quoted attribute value, inside a comment, or inside a `<script>` /
//! `<style>` block whose contents are dropped.
//!
//! Unterminated tags, comments and script/style blocks swallow the rest of the
//! input. A `>` inside a quoted attribute value does not end the tag.

/// Elements whose boundaries separate words in the extracted text.
const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "br", "dd", "div", "dl", "dt", "footer",
    "form", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "li", "main", "nav", "ol",
    "option", "p", "pre", "section", "table", "td", "th", "title", "tr", "ul",
];

/// Longest entity we try to decode, including `&` and `;`.
const MAX_ENTITY_LEN: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RawText {
    Script,
    Style,
}

impl RawText {
    fn closing_tag(self) -> &'static [u8] {
        match self {
            RawText::Script => b"</script",
            RawText::Style => b"</style",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Text,
    Tag,
    Quoted(u8),
    Comment,
    RawText(RawText),
}

/// A tag as seen between `<` and `>`.
struct Tag {
    name: String,
    closing: bool,
    self_closing: bool,
}

impl Tag {
    fn parse(inner: &str) -> Self {
        let closing = inner.starts_with('/');
        let name = inner
            .trim_start_matches('/')
            .chars()
            .take_while(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        Self {
            name,
            closing,
            self_closing: inner.trim_end().ends_with('/'),
        }
    }

    fn opens_raw_text(&self) -> Option<RawText> {
        if self.closing || self.self_closing {
            return None;
        }
        match self.name.as_str() {
            "script" => Some(RawText::Script),
            "style" => Some(RawText::Style),
            _ => None,
        }
    }

    fn is_block(&self) -> bool {
        BLOCK_ELEMENTS.contains(&self.name.as_str())
    }
}

/// Returns the contents of the first `<body ...>` element.
///
/// The match is case-insensitive and ends at the first `</body` after the
/// opening tag. Returns `None` when either tag is missing.
pub fn extract_body(html: &str) -> Option<&str> {
    // ASCII lowercasing keeps byte offsets identical to `html`
    let lower = html.to_ascii_lowercase();
    let bytes = lower.as_bytes();

    let mut search_from = 0;
    let open = loop {
        let idx = search_from + lower[search_from..].find("<body")?;
        match bytes.get(idx + 5) {
            Some(b'>' | b'/') => break idx,
            Some(b) if b.is_ascii_whitespace() => break idx,
            // e.g. <bodyguard>
            _ => search_from = idx + 5,
        }
    };

    let start = open + lower[open..].find('>')? + 1;
    let end = start + lower[start..].find("</body")?;
    Some(&html[start..end])
}

/// Removes tags, comments and script/style blocks, keeping text content.
///
/// Block-level tags are replaced by a single space so adjacent paragraphs do
/// not run together; inline tags are removed without a trace.
pub fn strip_tags(html: &str) -> String {
    let bytes = html.as_bytes();
    let mut out = String::with_capacity(html.len());
    let mut state = State::Text;
    let mut text_start = 0;
    let mut tag_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match state {
            State::Text => {
                if bytes[i] == b'<' && starts_markup(bytes, i + 1) {
                    out.push_str(&html[text_start..i]);
                    if bytes[i..].starts_with(b"<!--") {
                        state = State::Comment;
                        i += 4;
                        continue;
                    }
                    state = State::Tag;
                    tag_start = i + 1;
                }
            }
            State::Tag => match bytes[i] {
                q @ (b'"' | b'\'') => state = State::Quoted(q),
                b'>' => {
                    let tag = Tag::parse(&html[tag_start..i]);
                    i += 1;
                    match tag.opens_raw_text() {
                        Some(kind) => state = State::RawText(kind),
                        None => {
                            if tag.is_block() {
                                out.push(' ');
                            }
                            state = State::Text;
                            text_start = i;
                        }
                    }
                    continue;
                }
                _ => {}
            },
            State::Quoted(q) => {
                if bytes[i] == q {
                    state = State::Tag;
                }
            }
            State::Comment => {
                if bytes[i..].starts_with(b"-->") {
                    i += 3;
                    state = State::Text;
                    text_start = i;
                    continue;
                }
            }
            State::RawText(kind) => {
                if bytes[i] == b'<' && closes_raw_text(bytes, i, kind) {
                    // The closing tag itself is consumed by the Tag state
                    state = State::Tag;
                    tag_start = i + 1;
                }
            }
        }
        i += 1;
    }

    if state == State::Text {
        out.push_str(&html[text_start..]);
    }
    out
}

/// Decodes the character references that commonly appear in page text.
///
/// Named references outside the small supported set, and malformed numeric
/// references, are left as written.
pub fn decode_entities(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];

        let decoded = rest
            .char_indices()
            .take(MAX_ENTITY_LEN)
            .find(|&(_, c)| c == ';')
            .and_then(|(semi, _)| decode_entity(&rest[1..semi]).map(|c| (c, semi)));

        match decoded {
            Some((c, semi)) => {
                out.push(c);
                rest = &rest[semi + 1..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Collapses runs of whitespace to single spaces and trims both ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Tag stripping, entity decoding and whitespace collapsing in one pass.
///
/// Used for page bodies and for search result titles.
pub fn html_to_text(html: &str) -> String {
    collapse_whitespace(&decode_entities(&strip_tags(html)))
}

/// Visible text of a page body; empty when the page has no `<body>` element.
pub fn render_html(html: &str) -> String {
    extract_body(html).map(html_to_text).unwrap_or_default()
}

/// Whether the byte after a `<` starts a tag, end tag, comment or declaration.
fn starts_markup(bytes: &[u8], idx: usize) -> bool {
    matches!(bytes.get(idx), Some(b) if b.is_ascii_alphabetic() || matches!(b, b'/' | b'!' | b'?'))
}

fn closes_raw_text(bytes: &[u8], idx: usize, kind: RawText) -> bool {
    let closing = kind.closing_tag();
    let matches_name = bytes
        .get(idx..idx + closing.len())
        .is_some_and(|s| s.eq_ignore_ascii_case(closing));
    matches_name
        && !bytes
            .get(idx + closing.len())
            .is_some_and(|b| b.is_ascii_alphanumeric())
}

fn decode_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some(' '),
        _ => {
            let number = name.strip_prefix('#')?;
            let code = match number.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => number.parse().ok()?,
            };
            char::from_u32(code)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_drops_script_content() {
        assert_eq!(
            render_html("<body><script>x</script><p>Hi</p></body>"),
            "Hi"
        );
    }

    #[test]
    fn test_render_without_body_is_empty() {
        assert_eq!(render_html("<html><p>no body here</p></html>"), "");
        assert_eq!(render_html("<body>never closed"), "");
    }

    #[test]
    fn test_extract_body_case_insensitive_with_attributes() {
        let html = "<HTML><BODY class=\"main\" id='x'>Content</Body></HTML>";
        assert_eq!(extract_body(html), Some("Content"));
    }

    #[test]
    fn test_extract_body_skips_lookalike_tags() {
        let html = "<bodyguard>no</bodyguard><body>yes</body>";
        assert_eq!(extract_body(html), Some("yes"));
    }

    #[test]
    fn test_extract_body_stops_at_first_close() {
        let html = "<body>one</body><body>two</body>";
        assert_eq!(extract_body(html), Some("one"));
    }

    #[test]
    fn test_strip_style_and_comments() {
        let html = "<style>p { color: red; }</style>Text<!-- hidden <b>x</b> -->More";
        assert_eq!(strip_tags(html), "TextMore");
    }

    #[test]
    fn test_script_with_markup_inside() {
        let html = "<script>if (a < b) { document.write('<p>no</p>'); }</script>after";
        assert_eq!(strip_tags(html), "after");
    }

    #[test]
    fn test_script_close_is_case_insensitive() {
        let html = "<SCRIPT type=\"text/javascript\">var x;</SCRIPT >shown";
        assert_eq!(strip_tags(html), "shown");
    }

    #[test]
    fn test_script_close_needs_exact_name() {
        let html = "<script>a</scripts>b</script>c";
        assert_eq!(strip_tags(html), "c");
    }

    #[test]
    fn test_quoted_gt_does_not_end_tag() {
        let html = "<a title=\"1 > 0\" href='x>y'>link</a>";
        assert_eq!(strip_tags(html), "link");
    }

    #[test]
    fn test_unterminated_tag_swallows_rest() {
        assert_eq!(strip_tags("before<div class=\"x"), "before");
        assert_eq!(strip_tags("before<script>never closed"), "before");
        assert_eq!(strip_tags("before<!-- never closed"), "before");
    }

    #[test]
    fn test_lone_less_than_is_text() {
        assert_eq!(strip_tags("a < b and 3<4"), "a < b and 3<4");
    }

    #[test]
    fn test_block_tags_separate_words() {
        assert_eq!(
            html_to_text("<p>First</p><p>Second</p><div>Third<br>Fourth</div>"),
            "First Second Third Fourth"
        );
        assert_eq!(html_to_text("<b>Rust</b>acean"), "Rustacean");
    }

    #[test]
    fn test_self_closing_script_does_not_hide_text() {
        assert_eq!(strip_tags("<script src=\"a.js\"/>visible"), "visible");
    }

    #[test]
    fn test_decode_entities() {
        assert_eq!(
            decode_entities("Tom &amp; Jerry &lt;3 &quot;hi&quot; it&#39;s &#x27;ok&#X27;"),
            "Tom & Jerry <3 \"hi\" it's 'ok'"
        );
    }

    #[test]
    fn test_decode_entities_leaves_unknown_and_malformed() {
        assert_eq!(decode_entities("&copy; &#xZZ; & alone;"), "&copy; &#xZZ; & alone;");
        assert_eq!(decode_entities("trailing &"), "trailing &");
    }

    #[test]
    fn test_escaped_markup_stays_text() {
        assert_eq!(
            html_to_text("<body>&lt;script&gt;alert(1)&lt;/script&gt;</body>"),
            "<script>alert(1)</script>"
        );
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  a \n\t b   c  "), "a b c");
        assert_eq!(collapse_whitespace(" \r\n "), "");
    }

    #[test]
    fn test_multibyte_text_survives() {
        assert_eq!(
            render_html("<body><h1>Héllo</h1> <p>мир &nbsp; 世界</p></body>"),
            "Héllo мир 世界"
        );
    }
}
