//! Ordered rewrite pipeline and the top-level converter.

use crate::error::ConvertError;
use crate::passes;
use crate::reformat::{Format, IndentReformatter, Reformatter};
use crate::validate::validate_markup;
use std::borrow::Cow;

/// A single text-to-text rewrite step.
pub trait RewritePass {
    /// Rewrite the fragment, returning it borrowed when nothing changed.
    fn rewrite<'a>(&self, input: &'a str) -> Cow<'a, str>;
}

impl<F> RewritePass for F
where
    F: for<'a> Fn(&'a str) -> Cow<'a, str>,
{
    fn rewrite<'a>(&self, input: &'a str) -> Cow<'a, str> {
        (self)(input)
    }
}

struct NamedPass {
    name: &'static str,
    pass: Box<dyn RewritePass + Send + Sync>,
}

/// Ordered list of rewrite passes.
#[derive(Default)]
pub struct Pipeline {
    passes: Vec<NamedPass>,
}

impl Pipeline {
    /// Create an empty pipeline.
    pub fn new() -> Self {
        Self { passes: Vec::new() }
    }

    /// The conversion passes in their required order.
    ///
    /// Style conversion runs after self-closing normalization so the inserted
    /// slash never lands inside a style value, and the attribute rename table
    /// runs last, over already-converted style literals.
    pub fn canonical() -> Self {
        let mut pipeline = Self::new();
        pipeline.add_pass("strip-doctype", passes::strip_doctype);
        pipeline.add_pass("wrap-in-root", passes::wrap_in_root);
        pipeline.add_pass("close-self-closing-tags", passes::close_self_closing_tags);
        pipeline.add_pass("event-attributes", passes::camel_case_event_attributes);
        pipeline.add_pass("class-name", passes::rename_class_attribute);
        pipeline.add_pass("strip-comments", passes::strip_comments);
        pipeline.add_pass("image-closing-tags", passes::drop_image_closing_tags);
        pipeline.add_pass("inline-styles", passes::convert_inline_styles);
        pipeline.add_pass("namespace-attributes", passes::strip_namespace_attributes);
        pipeline.add_pass("rename-attributes", passes::rename_attributes);
        pipeline
    }

    /// Append a pass under a name used in log output.
    pub fn add_pass<T>(&mut self, name: &'static str, pass: T)
    where
        T: RewritePass + Send + Sync + 'static,
    {
        self.passes.push(NamedPass {
            name,
            pass: Box::new(pass),
        });
    }

    /// Names of the configured passes, in execution order.
    pub fn pass_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.passes.iter().map(|step| step.name)
    }

    /// Number of configured passes.
    pub fn len(&self) -> usize {
        self.passes.len()
    }

    /// Returns true when no pass is configured.
    pub fn is_empty(&self) -> bool {
        self.passes.is_empty()
    }

    /// Run every pass in order, feeding each one the previous output.
    pub fn run(&self, input: &str) -> String {
        let mut current = Cow::Borrowed(input);
        for step in &self.passes {
            let before = current.len();
            let next = step.pass.rewrite(current.as_ref());
            if matches!(next, Cow::Borrowed(_)) {
                log::trace!("pass {} left fragment unchanged", step.name);
            } else {
                log::debug!("pass {}: {} -> {} bytes", step.name, before, next.len());
            }
            current = Cow::Owned(next.into_owned());
        }
        current.into_owned()
    }
}

/// Options controlling a conversion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Run the tag-balance validator before any rewrite.
    pub validate: bool,
    /// Hand the rewritten fragment to the reformatter.
    pub reformat: bool,
    /// Indent width for the built-in reformatter.
    pub indent_width: usize,
}

impl ConvertOptions {
    /// Rewrite only: no validation, no reformatting.
    pub const fn raw() -> Self {
        Self {
            validate: false,
            reformat: false,
            indent_width: 4,
        }
    }

    /// Validate, rewrite, and reformat.
    pub const fn strict() -> Self {
        Self {
            validate: true,
            reformat: true,
            indent_width: 4,
        }
    }
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            validate: false,
            reformat: true,
            indent_width: 4,
        }
    }
}

/// Converts markup fragments into component-template markup.
pub struct Converter {
    pipeline: Pipeline,
    options: ConvertOptions,
    reformatter: Option<Box<dyn Reformatter + Send + Sync>>,
}

impl Converter {
    /// Canonical pipeline with the built-in [`IndentReformatter`].
    pub fn new(options: ConvertOptions) -> Self {
        Self {
            pipeline: Pipeline::canonical(),
            options,
            reformatter: Some(Box::new(IndentReformatter::new(options.indent_width))),
        }
    }

    /// Canonical pipeline with no reformatter installed.
    pub fn without_reformatter(options: ConvertOptions) -> Self {
        Self {
            pipeline: Pipeline::canonical(),
            options,
            reformatter: None,
        }
    }

    /// Replace the reformatter.
    pub fn with_reformatter<R>(mut self, reformatter: R) -> Self
    where
        R: Reformatter + Send + Sync + 'static,
    {
        self.reformatter = Some(Box::new(reformatter));
        self
    }

    /// Active options.
    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// The rewrite pipeline.
    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// Mutable access for appending custom passes.
    pub fn pipeline_mut(&mut self) -> &mut Pipeline {
        &mut self.pipeline
    }

    /// Convert a fragment.
    ///
    /// Validation failures abort before any pass runs. A missing reformatter
    /// is reported as [`ConvertError::ReformatUnavailable`] rather than
    /// returning unformatted text.
    pub fn convert(&self, input: &str) -> Result<String, ConvertError> {
        if self.options.validate {
            validate_markup(input)?;
        }

        let rewritten = self.pipeline.run(input);
        if !self.options.reformat {
            return Ok(rewritten);
        }

        let Some(reformatter) = &self.reformatter else {
            log::warn!("reformatting requested but no reformatter is installed");
            return Err(ConvertError::ReformatUnavailable(
                "no reformatter installed".to_string(),
            ));
        };
        reformatter.reformat(&rewritten, Format::Markup)
    }
}

impl Default for Converter {
    fn default() -> Self {
        Self::new(ConvertOptions::default())
    }
}

/// Convert a fragment with default options.
pub fn convert(input: &str) -> Result<String, ConvertError> {
    Converter::default().convert(input)
}

/// Convert a fragment with the given options and the built-in reformatter.
pub fn convert_with_options(input: &str, options: ConvertOptions) -> Result<String, ConvertError> {
    Converter::new(options).convert(input)
}
