//! Input checks and the tag-balance validator.

use crate::error::{ConvertError, SourceLocation};
use crate::tags::is_self_closing;
use once_cell::sync::Lazy;
use regex::Regex;

static TAG_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<(/?)([a-zA-Z][a-zA-Z0-9]*)\b[^>]*>").expect("tag token pattern is valid")
});

/// Rejects empty or whitespace-only input.
pub fn validate_input(input: &str) -> Result<(), ConvertError> {
    if input.trim().is_empty() {
        return Err(ConvertError::invalid_input("input is empty"));
    }
    Ok(())
}

/// Checks that every opened element in `input` is closed in LIFO order.
///
/// Self-closing elements and tokens ending in `/>` never touch the stack.
/// The first closing-token problem aborts the scan. Elements left open are
/// reported outermost first, in the order they were opened. Empty or blank
/// input is valid.
pub fn validate_markup(input: &str) -> Result<(), ConvertError> {
    let mut stack: Vec<String> = Vec::new();

    for caps in TAG_TOKEN.captures_iter(input) {
        let (Some(token), Some(name)) = (caps.get(0), caps.get(2)) else {
            continue;
        };
        let name = name.as_str().to_ascii_lowercase();
        if token.as_str().ends_with("/>") || is_self_closing(&name) {
            continue;
        }

        let closing = caps.get(1).is_some_and(|slash| !slash.is_empty());
        if !closing {
            stack.push(name);
            continue;
        }

        match stack.pop() {
            None => {
                let location = SourceLocation::from_offset(input, token.start());
                log::debug!("closing tag </{name}> at {location} with nothing open");
                return Err(ConvertError::UnexpectedClosingTag { name, location });
            }
            Some(expected) if expected != name => {
                let location = SourceLocation::from_offset(input, token.start());
                log::debug!("expected </{expected}> at {location}, found </{name}>");
                return Err(ConvertError::MismatchedTag {
                    expected,
                    found: name,
                    location,
                });
            }
            Some(_) => {}
        }
    }

    if stack.is_empty() {
        Ok(())
    } else {
        log::debug!("{} element(s) left open", stack.len());
        Err(ConvertError::UnclosedTags { names: stack })
    }
}
