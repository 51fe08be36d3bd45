use thiserror::Error;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed, counted in characters)
    pub column: usize,
}

impl SourceLocation {
    /// Create a new source location
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Resolve a byte offset into `text` to a line/column pair.
    ///
    /// Offsets past the end of `text` resolve to the position just after the
    /// last character.
    pub fn from_offset(text: &str, offset: usize) -> Self {
        let mut end = offset.min(text.len());
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        let before = &text[..end];
        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map_or(0, |idx| idx + 1);
        let column = before[line_start..].chars().count() + 1;
        Self { line, column }
    }
}

impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Errors that can occur while converting a markup fragment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConvertError {
    /// Input is empty or blank where a value is required.
    #[error("Input must be a valid string: {0}")]
    InvalidInput(String),
    /// A closing tag appeared while no element was open.
    #[error("Unexpected closing tag: </{name}> at {location}")]
    UnexpectedClosingTag {
        /// Lower-cased tag name
        name: String,
        /// Position of the closing token
        location: SourceLocation,
    },
    /// A closing tag did not match the innermost open element.
    #[error("Mismatched tags: expected </{expected}> but found </{found}> at {location}")]
    MismatchedTag {
        /// Name of the innermost open element
        expected: String,
        /// Name carried by the closing token
        found: String,
        /// Position of the closing token
        location: SourceLocation,
    },
    /// Elements still open at end of input, outermost first.
    #[error("Unclosed tags: {}", format_tag_list(.names))]
    UnclosedTags {
        /// Open element names in the order they were opened
        names: Vec<String>,
    },
    /// No reformatter is installed, or it cannot handle the requested format.
    #[error("Reformatter unavailable: {0}")]
    ReformatUnavailable(String),
    /// The reformatter ran and reported a failure.
    #[error("Reformat failed: {0}")]
    ReformatFailed(String),
}

impl ConvertError {
    /// Create an invalid input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Returns true for the structural kinds raised by the tag validator.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            ConvertError::UnexpectedClosingTag { .. }
                | ConvertError::MismatchedTag { .. }
                | ConvertError::UnclosedTags { .. }
        )
    }

    /// Location of the offending token, when the error points at one.
    pub fn location(&self) -> Option<&SourceLocation> {
        match self {
            ConvertError::UnexpectedClosingTag { location, .. }
            | ConvertError::MismatchedTag { location, .. } => Some(location),
            _ => None,
        }
    }
}

fn format_tag_list(names: &[String]) -> String {
    names
        .iter()
        .map(|name| format!("<{}>", name))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_offsets_to_line_and_column() {
        let text = "<div>\n  <span>";
        assert_eq!(SourceLocation::from_offset(text, 0), SourceLocation::new(1, 1));
        assert_eq!(SourceLocation::from_offset(text, 8), SourceLocation::new(2, 3));
        assert_eq!(
            SourceLocation::from_offset(text, 999),
            SourceLocation::new(2, 9)
        );
    }

    #[test]
    fn columns_count_characters_not_bytes() {
        let text = "héllo<p>";
        assert_eq!(SourceLocation::from_offset(text, 6), SourceLocation::new(1, 6));
    }

    #[test]
    fn unclosed_tags_message_lists_every_name() {
        let err = ConvertError::UnclosedTags {
            names: vec!["div".into(), "span".into()],
        };
        assert_eq!(err.to_string(), "Unclosed tags: <div>, <span>");
        assert!(err.is_structural());
        assert!(err.location().is_none());
    }

    #[test]
    fn mismatch_message_names_both_tags() {
        let err = ConvertError::MismatchedTag {
            expected: "div".into(),
            found: "span".into(),
            location: SourceLocation::new(1, 6),
        };
        assert_eq!(
            err.to_string(),
            "Mismatched tags: expected </div> but found </span> at 1:6"
        );
        assert_eq!(err.location(), Some(&SourceLocation::new(1, 6)));
    }
}
