#![deny(missing_docs)]
//! jsxify core: rewrites markup fragments into component-template markup.
//!
//! The work is done by an ordered list of text passes (see
//! [`Pipeline::canonical`]), an optional tag-balance check run beforehand, and
//! a [`Reformatter`] run afterwards.

/// Core error types.
pub mod error;
/// Text-to-text rewrite passes.
pub mod passes;
/// Pass composition and the top-level converter.
pub mod pipeline;
/// Reformatter trait and the built-in indenter.
pub mod reformat;
/// Inline style parsing and serialization.
pub mod style;
/// Fixed tag-name tables.
pub mod tags;
/// Input checks and the tag-balance validator.
pub mod validate;

pub use error::{ConvertError, SourceLocation};
pub use passes::{
    ATTRIBUTE_RENAMES, camel_case_event_attributes, close_self_closing_tags,
    convert_inline_styles, drop_image_closing_tags, rename_attributes, rename_class_attribute,
    strip_comments, strip_doctype, strip_namespace_attributes, wrap_in_root,
};
pub use pipeline::{
    ConvertOptions, Converter, Pipeline, RewritePass, convert, convert_with_options,
};
pub use reformat::{Format, IndentReformatter, Reformatter};
pub use style::{StyleDeclarations, css_to_object, kebab_to_camel, to_camel_case};
pub use tags::{CLOSING_REQUIRED_TAGS, SELF_CLOSING_TAGS, is_closing_required, is_self_closing};
pub use validate::{validate_input, validate_markup};
