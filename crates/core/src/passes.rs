//! Text-to-text rewrite passes.
//!
//! Every pass is total: input that does not contain its pattern comes back
//! borrowed and unchanged. None of them parse markup; they match text.

use crate::style::css_to_object;
use crate::tags::{SELF_CLOSING_TAGS, tag_end};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::borrow::Cow;

/// Attribute name rewrites, matched case-insensitively as whole attribute names.
pub const ATTRIBUTE_RENAMES: &[(&str, &str)] = &[
    ("for", "htmlFor"),
    ("autocomplete", "autoComplete"),
    ("tabindex", "tabIndex"),
    ("readonly", "readOnly"),
    ("maxlength", "maxLength"),
    ("minlength", "minLength"),
    ("colspan", "colSpan"),
    ("rowspan", "rowSpan"),
    ("crossorigin", "crossOrigin"),
    ("enctype", "encType"),
    ("accept-charset", "acceptCharset"),
    ("http-equiv", "httpEquiv"),
    ("stroke-width", "strokeWidth"),
    ("stroke-linejoin", "strokeLinejoin"),
    ("stroke-linecap", "strokeLinecap"),
    ("stroke-miterlimit", "strokeMiterlimit"),
    ("stroke-dasharray", "strokeDasharray"),
    ("stroke-dashoffset", "strokeDashoffset"),
    ("stroke-opacity", "strokeOpacity"),
    ("fill-rule", "fillRule"),
    ("fill-opacity", "fillOpacity"),
    ("clip-rule", "clipRule"),
    ("stop-color", "stopColor"),
    ("stop-opacity", "stopOpacity"),
    ("font-size", "fontSize"),
    ("font-family", "fontFamily"),
    ("text-anchor", "textAnchor"),
];

/// Namespace declarations the component syntax rejects.
const UNSUPPORTED_ATTRIBUTES: &[&str] = &[r#"xmlns:xlink="http://www.w3.org/1999/xlink""#];

static SELF_CLOSING: Lazy<Regex> = Lazy::new(|| {
    let names = SELF_CLOSING_TAGS.join("|");
    Regex::new(&format!(r"(?i)<({names})((?:[\s/][^>]*)?)>"))
        .expect("self-closing pattern is valid")
});

static EVENT_ATTRIBUTE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\b(on\w+)=(?:"([^"]+)"|'([^']+)')"#).expect("event attribute pattern is valid")
});

static COMMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<!--.*?-->").expect("comment pattern is valid"));

static DOCTYPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)<!DOCTYPE html>|<!DOCTYPE>").expect("doctype pattern is valid")
});

static STYLE_ATTRIBUTE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)\bstyle\s*=\s*("[^"]*"|'[^']*')"#).expect("style pattern is valid")
});

static RENAME_RULES: Lazy<Vec<(Regex, String)>> = Lazy::new(|| {
    ATTRIBUTE_RENAMES
        .iter()
        .map(|(from, to)| {
            let pattern = format!(r"(?i)(\s){}(\s*=)", regex::escape(from));
            let regex = Regex::new(&pattern).expect("attribute rename pattern is valid");
            (regex, format!("${{1}}{to}${{2}}"))
        })
        .collect()
});

/// Wraps the fragment in a single `<div>` root.
pub fn wrap_in_root(input: &str) -> Cow<'_, str> {
    Cow::Owned(format!("<div>{input}</div>"))
}

/// Rewrites void elements to the `<name attrs/>` form.
///
/// The name must be followed by whitespace, `/`, or `>`, so `<colgroup>` is
/// never touched by the `col` rule. An existing closing slash, with any
/// whitespace around it, collapses into the single `/>`.
pub fn close_self_closing_tags(input: &str) -> Cow<'_, str> {
    SELF_CLOSING.replace_all(input, |caps: &Captures| {
        let attrs = caps[2].trim_end();
        let attrs = attrs.strip_suffix('/').unwrap_or(attrs).trim_end();
        format!("<{}{}/>", &caps[1], attrs)
    })
}

/// Rewrites `onclick="fn()"` to `onClick={fn()}`.
///
/// Quotes of the other kind inside the value are kept verbatim:
/// `onclick="alert('hi')"` becomes `onClick={alert('hi')}`.
pub fn camel_case_event_attributes(input: &str) -> Cow<'_, str> {
    EVENT_ATTRIBUTE.replace_all(input, |caps: &Captures| {
        let handler = caps.get(2).or_else(|| caps.get(3)).map_or("", |m| m.as_str());
        let event = &caps[1][2..];
        let mut chars = event.chars();
        let capitalized: String = match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        };
        format!("on{}={{{}}}", capitalized, handler)
    })
}

/// Replaces every literal `class=` with `className=`.
///
/// The substitution is blind: `class=` inside text content or comments is
/// rewritten too.
pub fn rename_class_attribute(input: &str) -> Cow<'_, str> {
    replace_literal(input, "class=", "className=")
}

/// Removes `<!-- ... -->` comments, including multi-line ones.
///
/// An unterminated `<!--` is left in place.
pub fn strip_comments(input: &str) -> Cow<'_, str> {
    COMMENT.replace_all(input, "")
}

/// Removes stray `</img>` closing tags.
pub fn drop_image_closing_tags(input: &str) -> Cow<'_, str> {
    replace_literal(input, "</img>", "")
}

/// Replaces each `style="..."` attribute with a `style={{...}}` object literal.
pub fn convert_inline_styles(input: &str) -> Cow<'_, str> {
    STYLE_ATTRIBUTE.replace_all(input, |caps: &Captures| {
        format!("style={{{}}}", css_to_object(&caps[1]))
    })
}

/// Removes `<!DOCTYPE html>` and bare `<!DOCTYPE>` markers.
pub fn strip_doctype(input: &str) -> Cow<'_, str> {
    DOCTYPE.replace_all(input, "")
}

/// Removes namespace declarations such as `xmlns:xlink="..."`.
pub fn strip_namespace_attributes(input: &str) -> Cow<'_, str> {
    let mut out = Cow::Borrowed(input);
    for attr in UNSUPPORTED_ATTRIBUTES {
        if out.contains(attr) {
            out = Cow::Owned(out.replace(attr, ""));
        }
    }
    out
}

/// Applies [`ATTRIBUTE_RENAMES`] inside start tags.
///
/// Text between tags is never touched. Inside a tag, quoted values and
/// `{...}` expressions are copied verbatim; a rule fires only on a name
/// preceded by whitespace and followed by `=` in the remaining attribute text.
pub fn rename_attributes(input: &str) -> Cow<'_, str> {
    let bytes = input.as_bytes();
    let mut out = String::new();
    let mut copied = 0;
    let mut pos = 0;

    while pos < bytes.len() {
        if bytes[pos] != b'<' || !bytes.get(pos + 1).is_some_and(u8::is_ascii_alphabetic) {
            pos += 1;
            continue;
        }
        let end = tag_end(bytes, pos);
        if let Cow::Owned(renamed) = rename_in_tag(&input[pos..end]) {
            out.push_str(&input[copied..pos]);
            out.push_str(&renamed);
            copied = end;
        }
        pos = end;
    }

    if copied == 0 {
        return Cow::Borrowed(input);
    }
    out.push_str(&input[copied..]);
    Cow::Owned(out)
}

/// Renames attribute names in one tag, skipping quoted and braced values.
fn rename_in_tag(tag: &str) -> Cow<'_, str> {
    let bytes = tag.as_bytes();
    let mut out = String::with_capacity(tag.len());
    let mut quote: Option<u8> = None;
    let mut braces = 0usize;
    let mut plain_start = 0;
    let mut value_start = 0;

    for (idx, &b) in bytes.iter().enumerate() {
        let was_plain = quote.is_none() && braces == 0;
        match quote {
            Some(q) if b == q => quote = None,
            Some(_) => {}
            None => match b {
                b'"' | b'\'' => quote = Some(b),
                b'{' => braces += 1,
                b'}' => braces = braces.saturating_sub(1),
                _ => {}
            },
        }
        let is_plain = quote.is_none() && braces == 0;
        if was_plain && !is_plain {
            out.push_str(&rename_plain(&tag[plain_start..idx]));
            value_start = idx;
        } else if !was_plain && is_plain {
            out.push_str(&tag[value_start..=idx]);
            plain_start = idx + 1;
        }
    }

    if quote.is_none() && braces == 0 {
        out.push_str(&rename_plain(&tag[plain_start..]));
    } else {
        out.push_str(&tag[value_start..]);
    }

    if out == tag {
        Cow::Borrowed(tag)
    } else {
        Cow::Owned(out)
    }
}

fn rename_plain(text: &str) -> Cow<'_, str> {
    let mut out = Cow::Borrowed(text);
    for (pattern, replacement) in RENAME_RULES.iter() {
        let next = match pattern.replace_all(&out, replacement.as_str()) {
            Cow::Owned(text) => Some(text),
            Cow::Borrowed(_) => None,
        };
        if let Some(next) = next {
            out = Cow::Owned(next);
        }
    }
    out
}

fn replace_literal<'a>(input: &'a str, from: &str, to: &str) -> Cow<'a, str> {
    if input.contains(from) {
        Cow::Owned(input.replace(from, to))
    } else {
        Cow::Borrowed(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_fragment_in_div() {
        assert_eq!(wrap_in_root(""), "<div></div>");
        assert_eq!(wrap_in_root("<p>x</p>"), "<div><p>x</p></div>");
    }

    #[test]
    fn closes_bare_void_elements() {
        assert_eq!(close_self_closing_tags("<input><img><br>"), "<input/><img/><br/>");
        assert_eq!(
            close_self_closing_tags(r#"<img src="a.png" alt="A">"#),
            r#"<img src="a.png" alt="A"/>"#
        );
    }

    #[test]
    fn self_closing_rule_is_prefix_safe() {
        let input = r#"<table><colgroup span="2"><col></colgroup></table>"#;
        assert_eq!(
            close_self_closing_tags(input),
            r#"<table><colgroup span="2"><col/></colgroup></table>"#
        );
        assert_eq!(
            close_self_closing_tags(r#"<inputmode x="1"><baseline>"#),
            r#"<inputmode x="1"><baseline>"#
        );
    }

    #[test]
    fn self_closing_never_doubles_the_slash() {
        assert_eq!(close_self_closing_tags("<br/>"), "<br/>");
        assert_eq!(close_self_closing_tags("<br />"), "<br/>");
        let once = close_self_closing_tags(r#"<meta charset="utf-8">"#).into_owned();
        let twice = close_self_closing_tags(&once).into_owned();
        assert_eq!(once, twice);
        assert!(!twice.contains("//"));
    }

    #[test]
    fn self_closing_collapses_spaced_slashes() {
        assert_eq!(
            close_self_closing_tags(r#"<img src="x" / >"#),
            r#"<img src="x"/>"#
        );
        assert_eq!(close_self_closing_tags("<br/ >"), "<br/>");
        assert_eq!(close_self_closing_tags("<hr >"), "<hr/>");
    }

    #[test]
    fn leaves_unrelated_tags_alone() {
        let input = "<div></div>";
        assert!(matches!(close_self_closing_tags(input), Cow::Borrowed(_)));
    }

    #[test]
    fn converts_event_attributes() {
        assert_eq!(
            camel_case_event_attributes(r#"<button onclick="handler">"#),
            "<button onClick={handler}>"
        );
        assert_eq!(
            camel_case_event_attributes("<input onchange='update(1)'>"),
            "<input onChange={update(1)}>"
        );
        assert_eq!(
            camel_case_event_attributes(r#"<div onmouseover="a && b">"#),
            "<div onMouseover={a && b}>"
        );
    }

    #[test]
    fn event_values_keep_quotes_of_the_other_kind() {
        assert_eq!(
            camel_case_event_attributes(r#"<a onclick="alert('hi')">x</a>"#),
            "<a onClick={alert('hi')}>x</a>"
        );
        assert_eq!(
            camel_case_event_attributes(r#"<a onclick='say("hi")'>x</a>"#),
            r#"<a onClick={say("hi")}>x</a>"#
        );
    }

    #[test]
    fn renames_every_class_attribute() {
        assert_eq!(
            rename_class_attribute(r#"<div class="a"><span class="b"></span></div>"#),
            r#"<div className="a"><span className="b"></span></div>"#
        );
        let once = rename_class_attribute(r#"<p class="x">"#).into_owned();
        assert_eq!(rename_class_attribute(&once), once);
    }

    #[test]
    fn class_rename_is_blind_to_context() {
        assert_eq!(rename_class_attribute("<p>class=x</p>"), "<p>className=x</p>");
    }

    #[test]
    fn strips_comments() {
        assert_eq!(
            strip_comments("<p><!-- note -->Hello, world!</p>"),
            "<p>Hello, world!</p>"
        );
        assert_eq!(strip_comments("a<!--\nmulti\nline\n-->b<!--x-->c"), "abc");
        let once = strip_comments("<!-- a --><p></p>").into_owned();
        assert_eq!(strip_comments(&once), once);
    }

    #[test]
    fn unterminated_comment_is_left_untouched() {
        assert_eq!(strip_comments("<p>a</p><!-- open"), "<p>a</p><!-- open");
    }

    #[test]
    fn drops_image_closing_tags() {
        assert_eq!(drop_image_closing_tags("<img/></img>"), "<img/>");
    }

    #[test]
    fn converts_inline_styles() {
        assert_eq!(
            convert_inline_styles(r#"<div style="color: red; font-size: 12px;">"#),
            r#"<div style={{color: "red", fontSize: "12px"}}>"#
        );
        assert_eq!(
            convert_inline_styles(r#"<div   style = " color : red ; ">"#),
            r#"<div   style={{color: "red"}}>"#
        );
        assert_eq!(
            convert_inline_styles("<p style='margin: 0'>"),
            r#"<p style={{margin: "0"}}>"#
        );
    }

    #[test]
    fn empty_styles_become_empty_objects() {
        assert_eq!(convert_inline_styles(r#"<p style="">"#), "<p style={{}}>");
        assert_eq!(convert_inline_styles(r#"<p style=" ; ">"#), "<p style={{}}>");
    }

    #[test]
    fn strips_doctype_markers() {
        assert_eq!(strip_doctype("<!DOCTYPE html><div></div>"), "<div></div>");
        assert_eq!(strip_doctype("<!doctype HTML><!DOCTYPE>x"), "x");
    }

    #[test]
    fn strips_xlink_namespace() {
        assert_eq!(
            strip_namespace_attributes(
                r#"<svg xmlns:xlink="http://www.w3.org/1999/xlink"></svg>"#
            ),
            "<svg ></svg>"
        );
    }

    #[test]
    fn renames_known_attributes() {
        assert_eq!(
            rename_attributes(r#"<label for="username">Username</label>"#),
            r#"<label htmlFor="username">Username</label>"#
        );
        assert_eq!(
            rename_attributes(r#"<label FOR="email">Email</label>"#),
            r#"<label htmlFor="email">Email</label>"#
        );
        assert_eq!(
            rename_attributes(r#"<input autocomplete="off" tabindex="1">"#),
            r#"<input autoComplete="off" tabIndex="1">"#
        );
        assert_eq!(
            rename_attributes(
                r#"<svg stroke-width="2" stroke-linejoin="round" stroke-linecap="square"></svg>"#
            ),
            r#"<svg strokeWidth="2" strokeLinejoin="round" strokeLinecap="square"></svg>"#
        );
    }

    #[test]
    fn rename_leaves_prose_and_other_attributes() {
        let prose = "<p>This is for testing purposes only</p>";
        assert_eq!(rename_attributes(prose), prose);
        let other = r#"<div foo="bar" data-for="x"></div>"#;
        assert_eq!(rename_attributes(other), other);
        let literal = r#"<p style={{content: "tabindex = 1"}}></p>"#;
        assert_eq!(rename_attributes(literal), literal);
    }

    #[test]
    fn rename_skips_values_and_text_with_spaced_names() {
        let input = r#"<p style={{content: "a for = b"}} title='x for = y'>Pay for = 5</p>"#;
        assert_eq!(rename_attributes(input), input);
        assert_eq!(
            rename_attributes(r#"<label title="a > b" for = "q">for = x</label>"#),
            r#"<label title="a > b" htmlFor = "q">for = x</label>"#
        );
    }

    #[test]
    fn rename_applies_after_expression_values() {
        assert_eq!(
            rename_attributes(r#"<input onChange={() => set({a: 1})} tabindex="0"/>"#),
            r#"<input onChange={() => set({a: 1})} tabIndex="0"/>"#
        );
    }

    #[test]
    fn rename_is_idempotent() {
        let once = rename_attributes(r#"<label for="a" tabindex="2">"#).into_owned();
        assert_eq!(rename_attributes(&once), once);
    }

    #[test]
    fn rename_outputs_never_feed_other_rules() {
        for (_, to) in ATTRIBUTE_RENAMES {
            let input = format!("<x {to}=\"x\">");
            assert_eq!(rename_attributes(&input), input, "{to} was rewritten");
        }
    }
}
