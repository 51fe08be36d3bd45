#![deny(missing_docs)]
//! Node.js bindings that surface jsxify's Rust implementation.

use jsxify_core::{ConvertError, Converter, passes, style};
use napi::bindgen_prelude::*;
use napi_derive::napi;
use serde_json::Value as JsonValue;

/// NAPI-exposed data structures.
pub mod types;
pub use types::*;

const VALID_MESSAGE: &str = "HTML is valid.";

/// Converts an HTML fragment into JSX markup.
///
/// Non-string input is rejected with an `InvalidArg` error. Formatting only
/// happens when `indentCode` is set.
///
/// ```javascript
/// const jsx = convert('<div class="box" style="color: red;"></div>', { indentCode: true });
/// ```
#[napi]
pub fn convert(html: JsonValue, options: Option<ConvertOptions>) -> napi::Result<String> {
    let html = expect_string(html).map_err(convert_error)?;
    let options = options.unwrap_or_default().to_core();
    Converter::new(options).convert(&html).map_err(convert_error)
}

/// Throws unless every opened tag is closed in order.
#[napi(js_name = "validateHtml")]
pub fn validate_html(html: JsonValue) -> napi::Result<String> {
    let html = expect_string(html).map_err(convert_error)?;
    jsxify_core::validate_markup(&html).map_err(convert_error)?;
    Ok(VALID_MESSAGE.to_string())
}

/// Checks tag balance and reports the outcome as data.
#[napi(js_name = "validateMarkup")]
pub fn validate_markup(html: String) -> ValidationReport {
    match jsxify_core::validate_markup(&html) {
        Ok(()) => ValidationReport {
            valid: true,
            error: None,
            line: None,
            column: None,
            unclosed: Vec::new(),
        },
        Err(err) => {
            let location = err.location().copied();
            let unclosed = match &err {
                ConvertError::UnclosedTags { names } => names.clone(),
                _ => Vec::new(),
            };
            ValidationReport {
                valid: false,
                error: Some(err.to_string()),
                line: location.map(|loc| loc.line as u32),
                column: location.map(|loc| loc.column as u32),
                unclosed,
            }
        }
    }
}

/// Throws for empty, blank, or non-string input.
#[napi(js_name = "validateInput")]
pub fn validate_input(html: JsonValue) -> napi::Result<()> {
    let html = expect_string(html).map_err(convert_error)?;
    jsxify_core::validate_input(&html).map_err(convert_error)
}

/// Whether `tag` must be closed explicitly once opened.
#[napi(js_name = "isTagClosed")]
pub fn is_tag_closed(tag: String) -> bool {
    jsxify_core::is_closing_required(&tag)
}

/// Wraps the fragment in a `<div>` root.
#[napi(js_name = "wrapIntoDiv")]
pub fn wrap_into_div(html: String) -> String {
    passes::wrap_in_root(&html).into_owned()
}

/// Rewrites void elements to `<name/>`.
#[napi(js_name = "closeSelfClosingTags")]
pub fn close_self_closing_tags(html: String) -> String {
    passes::close_self_closing_tags(&html).into_owned()
}

/// Rewrites `onclick="x"` to `onClick={x}`.
#[napi(js_name = "convertEventAttributesToCamelCase")]
pub fn convert_event_attributes(html: String) -> String {
    passes::camel_case_event_attributes(&html).into_owned()
}

/// Replaces `class=` with `className=`.
#[napi(js_name = "convertClassToClassName")]
pub fn convert_class_to_class_name(html: String) -> String {
    passes::rename_class_attribute(&html).into_owned()
}

/// Removes HTML comments.
#[napi(js_name = "removeComments")]
pub fn remove_comments(html: String) -> String {
    passes::strip_comments(&html).into_owned()
}

/// Removes stray `</img>` tags.
#[napi(js_name = "imageFix")]
pub fn image_fix(html: String) -> String {
    passes::drop_image_closing_tags(&html).into_owned()
}

/// Converts `style="..."` attributes into object literals.
#[napi(js_name = "convertStyleToObject")]
pub fn convert_style_to_object(html: String) -> String {
    passes::convert_inline_styles(&html).into_owned()
}

/// Removes doctype markers.
#[napi(js_name = "removeInvalidTags")]
pub fn remove_invalid_tags(html: String) -> String {
    passes::strip_doctype(&html).into_owned()
}

/// Removes namespace attributes JSX does not accept.
#[napi(js_name = "removeUnsuportedAttrs")]
pub fn remove_unsupported_attrs(html: String) -> String {
    passes::strip_namespace_attributes(&html).into_owned()
}

/// Applies the attribute rename table (`for` -> `htmlFor`, ...).
#[napi(js_name = "replaceAttributes")]
pub fn replace_attributes(html: String) -> String {
    passes::rename_attributes(&html).into_owned()
}

/// Camel-cases words separated by `-`, `_`, or whitespace.
#[napi(js_name = "toCamelCase")]
pub fn to_camel_case(text: String) -> String {
    style::to_camel_case(&text)
}

/// Converts a style declaration string into an object literal.
#[napi(js_name = "cssToObject")]
pub fn css_to_object(css: String) -> String {
    style::css_to_object(&css)
}

fn expect_string(value: JsonValue) -> std::result::Result<String, ConvertError> {
    match value {
        JsonValue::String(text) => Ok(text),
        JsonValue::Null => Err(ConvertError::invalid_input("expected a string, got null")),
        other => Err(ConvertError::invalid_input(format!(
            "expected a string, got {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

fn convert_error(err: ConvertError) -> Error {
    match err {
        ConvertError::InvalidInput(_) => Error::new(Status::InvalidArg, err.to_string()),
        other => Error::from_reason(other.to_string()),
    }
}
