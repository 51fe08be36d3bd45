//! NAPI-exposed data structures.

use jsxify_core::ConvertOptions as CoreConvertOptions;
use napi_derive::napi;

/// Options accepted by `convert`.
#[napi(object)]
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Pretty-print the result. Defaults to false.
    pub indent_code: Option<bool>,
    /// Check tag balance before converting. Defaults to false.
    pub validate: Option<bool>,
    /// Spaces per nesting level when `indentCode` is set. Defaults to 4.
    pub indent_width: Option<u32>,
}

impl ConvertOptions {
    /// Resolves unset fields against the JS-side defaults.
    pub fn to_core(&self) -> CoreConvertOptions {
        let mut options = CoreConvertOptions::raw();
        options.reformat = self.indent_code.unwrap_or(false);
        options.validate = self.validate.unwrap_or(false);
        if let Some(width) = self.indent_width {
            options.indent_width = width as usize;
        }
        options
    }
}

/// Outcome of `validateMarkup`, reported without throwing.
#[napi(object)]
#[derive(Debug, Clone)]
pub struct ValidationReport {
    /// Whether the markup is balanced.
    pub valid: bool,
    /// Error message when invalid.
    pub error: Option<String>,
    /// 1-indexed line of the offending token, when known.
    pub line: Option<u32>,
    /// 1-indexed column of the offending token, when known.
    pub column: Option<u32>,
    /// Elements left open at end of input, outermost first.
    pub unclosed: Vec<String>,
}
