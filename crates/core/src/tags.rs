//! Fixed tag-name tables shared by the validator and the rewrite passes.

/// Elements that never take a separate closing tag.
pub const SELF_CLOSING_TAGS: &[&str] = &[
    "input", "img", "br", "hr", "meta", "link", "col", "area", "base",
];

/// Elements that must be closed explicitly once opened.
pub const CLOSING_REQUIRED_TAGS: &[&str] = &[
    "div", "span", "p", "h1", "h2", "h3", "h4", "h5", "h6", "ul", "ol", "li", "table", "tr", "td",
    "th", "form", "button", "textarea", "select", "option", "a",
];

/// Returns true if `name` is a self-closing element.
///
/// Comparison is ASCII case-insensitive and exact: `col` does not match
/// `colgroup`.
pub fn is_self_closing(name: &str) -> bool {
    SELF_CLOSING_TAGS
        .iter()
        .any(|tag| tag.eq_ignore_ascii_case(name))
}

/// Returns true if an element named `name` must have a matching closing tag.
///
/// This only consults the tables; whether a given fragment actually closes the
/// element is decided by [`crate::validate::validate_markup`].
pub fn is_closing_required(name: &str) -> bool {
    !is_self_closing(name)
        && CLOSING_REQUIRED_TAGS
            .iter()
            .any(|tag| tag.eq_ignore_ascii_case(name))
}

/// Index just past the `>` closing the tag at `start`, skipping quoted values
/// and `{...}` expressions.
pub(crate) fn tag_end(bytes: &[u8], start: usize) -> usize {
    let mut quote: Option<u8> = None;
    let mut braces = 0usize;
    for (idx, &b) in bytes.iter().enumerate().skip(start + 1) {
        match quote {
            Some(q) if b == q => quote = None,
            Some(_) => {}
            None => match b {
                b'"' | b'\'' => quote = Some(b),
                b'{' => braces += 1,
                b'}' => braces = braces.saturating_sub(1),
                b'>' if braces == 0 => return idx + 1,
                _ => {}
            },
        }
    }
    bytes.len()
}
