//! Reformatter seam and the built-in indenting implementation.

use crate::error::ConvertError;
use crate::tags::{is_self_closing, tag_end};

/// Content kind handed to a [`Reformatter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Markup (HTML or component templates).
    Markup,
    /// Stylesheets.
    Css,
    /// Script source.
    Script,
}

impl Format {
    /// Lower-case name of the format.
    pub const fn as_str(self) -> &'static str {
        match self {
            Format::Markup => "markup",
            Format::Css => "css",
            Format::Script => "script",
        }
    }
}

/// Pretty-printer invoked as the last pipeline step.
///
/// Implementations may only change whitespace and indentation.
pub trait Reformatter {
    /// Reformat `text` of the given kind.
    fn reformat(&self, text: &str, format: Format) -> Result<String, ConvertError>;
}

impl<F> Reformatter for F
where
    F: Fn(&str, Format) -> Result<String, ConvertError>,
{
    fn reformat(&self, text: &str, format: Format) -> Result<String, ConvertError> {
        (self)(text, format)
    }
}

/// Elements whose content is copied verbatim.
const RAW_TEXT_TAGS: &[&str] = &["script", "style", "pre", "textarea"];

/// Puts each tag on its own line and indents by element depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndentReformatter {
    /// Spaces per nesting level.
    pub indent_width: usize,
}

impl Default for IndentReformatter {
    fn default() -> Self {
        Self { indent_width: 4 }
    }
}

impl IndentReformatter {
    /// Creates a reformatter with the given indent width.
    pub fn new(indent_width: usize) -> Self {
        Self { indent_width }
    }

    fn indent_markup(&self, text: &str) -> String {
        let tokens = tokenize(text);
        let mut lines: Vec<String> = Vec::new();
        let mut depth = 0usize;
        let mut idx = 0;

        while idx < tokens.len() {
            match &tokens[idx] {
                Token::Text(content) => {
                    if let Some(text) = jsx_text(content) {
                        lines.push(self.line(depth, &text));
                    }
                }
                Token::Raw(content) => {
                    if !content.trim().is_empty() {
                        lines.push(content.to_string());
                    }
                }
                Token::Close { raw, .. } => {
                    depth = depth.saturating_sub(1);
                    lines.push(self.line(depth, raw));
                }
                Token::Standalone(raw) => lines.push(self.line(depth, raw)),
                Token::Open { raw, name } => {
                    if let Some((joined, consumed)) = inline_element(&tokens[idx..], name) {
                        lines.push(self.line(depth, &joined));
                        idx += consumed;
                        continue;
                    }
                    lines.push(self.line(depth, raw));
                    depth += 1;
                }
            }
            idx += 1;
        }

        lines.join("\n")
    }

    fn line(&self, depth: usize, content: &str) -> String {
        format!("{}{}", " ".repeat(depth * self.indent_width), content)
    }
}

impl Reformatter for IndentReformatter {
    fn reformat(&self, text: &str, format: Format) -> Result<String, ConvertError> {
        match format {
            Format::Markup => Ok(self.indent_markup(text)),
            other => Err(ConvertError::ReformatUnavailable(format!(
                "indent reformatter cannot format {}",
                other.as_str()
            ))),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Token<'a> {
    Open { raw: &'a str, name: String },
    Close { raw: &'a str, name: String },
    /// Void elements, `<x/>` tags, comments, and declarations.
    Standalone(&'a str),
    Text(&'a str),
    /// Content of a raw-text element.
    Raw(&'a str),
}

/// Joins `<x>text</x>` and `<x></x>` into one line.
fn inline_element(tokens: &[Token<'_>], name: &str) -> Option<(String, usize)> {
    let Token::Open { raw: open, .. } = tokens.first()? else {
        return None;
    };
    match (tokens.get(1), tokens.get(2)) {
        (Some(Token::Close { raw: close, name: closing }), _) if closing == name => {
            Some((format!("{open}{close}"), 2))
        }
        (Some(Token::Text(text)), Some(Token::Close { raw: close, name: closing }))
            if closing == name && !text.contains('\n') =>
        {
            let text = jsx_text(text).unwrap_or_default();
            Some((format!("{open}{text}{close}"), 3))
        }
        _ => None,
    }
}

/// Trims a text run for its own line while keeping spaces that JSX would
/// otherwise collapse. Edge whitespace without a newline becomes `{" "}`;
/// whitespace-only runs spanning lines are dropped.
fn jsx_text(content: &str) -> Option<String> {
    const SPACE: &str = "{\" \"}";
    let significant = |ws: &str| !ws.is_empty() && !ws.contains('\n');

    let trimmed = content.trim();
    if trimmed.is_empty() {
        return significant(content).then(|| SPACE.to_string());
    }
    let leading = &content[..content.len() - content.trim_start().len()];
    let trailing = &content[content.trim_end().len()..];
    let mut out = String::with_capacity(trimmed.len() + 2 * SPACE.len());
    if significant(leading) {
        out.push_str(SPACE);
    }
    out.push_str(trimmed);
    if significant(trailing) {
        out.push_str(SPACE);
    }
    Some(out)
}

fn tokenize(text: &str) -> Vec<Token<'_>> {
    let bytes = text.as_bytes();
    let mut tokens = Vec::new();
    let mut text_start = 0;
    let mut pos = 0;

    while pos < bytes.len() {
        if bytes[pos] != b'<' || !starts_tag(bytes, pos) {
            pos += 1;
            continue;
        }
        if text_start < pos {
            tokens.push(Token::Text(&text[text_start..pos]));
        }

        let end = if bytes[pos..].starts_with(b"<!--") {
            text[pos..]
                .find("-->")
                .map_or(bytes.len(), |offset| pos + offset + 3)
        } else {
            tag_end(bytes, pos)
        };
        let raw = &text[pos..end];
        pos = end;
        text_start = end;

        let token = classify(raw);
        let raw_text_name = match &token {
            Token::Open { name, .. } if RAW_TEXT_TAGS.contains(&name.as_str()) => {
                Some(name.clone())
            }
            _ => None,
        };
        tokens.push(token);

        if let Some(name) = raw_text_name {
            let close = format!("</{name}");
            let content_end = find_ignore_ascii_case(&text[pos..], &close)
                .map_or(bytes.len(), |offset| pos + offset);
            if pos < content_end {
                tokens.push(Token::Raw(&text[pos..content_end]));
            }
            pos = content_end;
            text_start = content_end;
        }
    }

    if text_start < bytes.len() {
        tokens.push(Token::Text(&text[text_start..]));
    }
    tokens
}

fn starts_tag(bytes: &[u8], pos: usize) -> bool {
    matches!(bytes.get(pos + 1), Some(b) if b.is_ascii_alphabetic() || *b == b'/' || *b == b'!')
}

fn classify(raw: &str) -> Token<'_> {
    if raw.starts_with("<!") {
        return Token::Standalone(raw);
    }
    let closing = raw.starts_with("</");
    let name_start = if closing { 2 } else { 1 };
    let name: String = raw[name_start..]
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | ':' | '.' | '_'))
        .collect::<String>()
        .to_ascii_lowercase();

    if closing {
        Token::Close { raw, name }
    } else if raw.ends_with("/>") || is_self_closing(&name) {
        Token::Standalone(raw)
    } else {
        Token::Open { raw, name }
    }
}

fn find_ignore_ascii_case(haystack: &str, needle: &str) -> Option<usize> {
    let needle = needle.as_bytes();
    haystack
        .as_bytes()
        .windows(needle.len())
        .position(|window| window.eq_ignore_ascii_case(needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn indent(text: &str) -> String {
        IndentReformatter::default()
            .reformat(text, Format::Markup)
            .expect("markup is supported")
    }

    #[test]
    fn indents_nested_elements() {
        let out = indent("<div><ul><li>One</li><li>Two</li></ul></div>");
        assert_eq!(
            out,
            "<div>\n    <ul>\n        <li>One</li>\n        <li>Two</li>\n    </ul>\n</div>"
        );
    }

    #[test]
    fn void_and_self_closed_tags_keep_depth() {
        let out = indent("<div><img src=\"a\"/><br/><p></p></div>");
        assert_eq!(out, "<div>\n    <img src=\"a\"/>\n    <br/>\n    <p></p>\n</div>");
    }

    #[test]
    fn respects_expressions_containing_angle_brackets() {
        let out = indent("<div><button onClick={() => go()}>Go</button></div>");
        assert_eq!(
            out,
            "<div>\n    <button onClick={() => go()}>Go</button>\n</div>"
        );
    }

    #[test]
    fn keeps_raw_text_content() {
        let out = indent("<div><script>if (a < b) { x(); }</script></div>");
        assert!(out.contains("if (a < b) { x(); }"), "{out}");
        assert!(out.ends_with("    </script>\n</div>"), "{out}");
    }

    #[test]
    fn keeps_spaces_next_to_inline_elements() {
        let out = indent("<p>Hello <b>world</b> and <i>more</i></p>");
        assert_eq!(
            out,
            "<p>\n    Hello{\" \"}\n    <b>world</b>\n    {\" \"}and{\" \"}\n    <i>more</i>\n</p>"
        );
        assert_eq!(indent("<b>a</b> <i>b</i>"), "<b>a</b>\n{\" \"}\n<i>b</i>");
        assert_eq!(indent("<div>\n  <p>x</p>\n</div>"), "<div>\n    <p>x</p>\n</div>");
    }

    #[test]
    fn custom_indent_width() {
        let out = IndentReformatter::new(2)
            .reformat("<div><span>x</span></div>", Format::Markup)
            .unwrap();
        assert_eq!(out, "<div>\n  <span>x</span>\n</div>");
    }

    #[test]
    fn rejects_non_markup_formats() {
        let err = IndentReformatter::default()
            .reformat("a{}", Format::Css)
            .unwrap_err();
        assert!(matches!(err, ConvertError::ReformatUnavailable(_)));
    }

    #[test]
    fn closures_act_as_reformatters() {
        let upper = |text: &str, _format: Format| Ok::<_, ConvertError>(text.to_uppercase());
        assert_eq!(upper.reformat("<p>", Format::Markup).unwrap(), "<P>");
    }
}
