//! Inline style parsing and object-literal serialization.

/// Ordered `(property, value)` pairs parsed from a `style` attribute value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleDeclarations {
    entries: Vec<(String, String)>,
}

impl StyleDeclarations {
    /// Parses a declaration list such as `color: red; font-size: 12px`.
    ///
    /// Whitespace around `:` and `;` is ignored. Each declaration splits on its
    /// first `:`, so values like `url(http://x)` survive. Declarations with an
    /// empty property or empty value are dropped.
    pub fn parse(source: &str) -> Self {
        let entries = source
            .split(';')
            .filter_map(|declaration| {
                let (property, value) = declaration.split_once(':')?;
                let (property, value) = (property.trim(), value.trim());
                if property.is_empty() || value.is_empty() {
                    return None;
                }
                Some((property.to_string(), value.to_string()))
            })
            .collect();
        Self { entries }
    }

    /// Number of kept declarations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when no declaration survived parsing.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(property, value)` pairs in source order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(property, value)| (property.as_str(), value.as_str()))
    }

    /// Serializes to an object literal: `{fontSize: "12px", color: "red"}`.
    ///
    /// Custom properties (`--name`) keep their spelling and are emitted as
    /// quoted keys. An empty list serializes to `{}`.
    pub fn to_object_literal(&self) -> String {
        let mut out = String::from("{");
        for (idx, (property, value)) in self.iter().enumerate() {
            if idx > 0 {
                out.push_str(", ");
            }
            if property.starts_with("--") {
                out.push_str(&format!("\"{}\"", escape_string(property)));
            } else {
                out.push_str(&kebab_to_camel(property));
            }
            out.push_str(&format!(": \"{}\"", escape_string(value)));
        }
        out.push('}');
        out
    }
}

/// Converts a raw style attribute value into an object literal.
///
/// Surrounding quotes are removed before parsing, so both `"color: red"` and
/// `color: red` yield `{color: "red"}`.
pub fn css_to_object(style: &str) -> String {
    let trimmed = style.trim();
    let unquoted = strip_matching_quotes(trimmed).unwrap_or(trimmed);
    StyleDeclarations::parse(unquoted).to_object_literal()
}

/// Turns `font-size` into `fontSize`: every `-` followed by a lowercase ASCII
/// letter is dropped and the letter upper-cased. Other characters are kept.
pub fn kebab_to_camel(property: &str) -> String {
    let mut out = String::with_capacity(property.len());
    let mut chars = property.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '-'
            && let Some(next) = chars.peek().copied()
            && next.is_ascii_lowercase()
        {
            out.push(next.to_ascii_uppercase());
            chars.next();
            continue;
        }
        out.push(ch);
    }
    out
}

/// Camel-cases arbitrary words separated by `-`, `_`, or whitespace.
///
/// The first word is lower-cased; each following word gets an upper-case
/// initial and a lower-cased remainder: `Background-COLOR` -> `backgroundColor`.
pub fn to_camel_case(text: &str) -> String {
    text.split(|c: char| c == '-' || c == '_' || c.is_whitespace())
        .enumerate()
        .map(|(idx, word)| {
            if idx == 0 {
                return word.to_lowercase();
            }
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect()
}

fn strip_matching_quotes(text: &str) -> Option<&str> {
    ['"', '\''].into_iter().find_map(|quote| {
        text.strip_prefix(quote)?.strip_suffix(quote)
    })
}

fn escape_string(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if ch == '"' || ch == '\\' {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}
