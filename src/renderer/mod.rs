//! Responsible for rendering templates: token substitution and block expansion

mod block;

#[cfg(test)]
mod tests;

use log::trace;

use crate::context::Values;
use crate::errors::Result;
use crate::value::Value;

pub use self::block::{expand_block, find_block, render_rows, Block};

/// Separator put between the rendered rows of a block
pub const DEFAULT_ROW_SEPARATOR: &str = "\n";

/// Given a template source and some values, renders text
#[derive(Debug)]
pub struct Renderer<'a> {
    /// Template to render
    source: &'a str,
    /// Values applied to the template, in order
    values: &'a Values,
    /// Text joining the rows of a block
    row_separator: &'a str,
}

impl<'a> Renderer<'a> {
    /// Create a new `Renderer` joining rows with a newline
    #[inline]
    pub fn new(source: &'a str, values: &'a Values) -> Renderer<'a> {
        Renderer { source, values, row_separator: DEFAULT_ROW_SEPARATOR }
    }

    /// Use another separator between the rendered rows of a block
    #[inline]
    pub fn with_row_separator(mut self, row_separator: &'a str) -> Renderer<'a> {
        self.row_separator = row_separator;
        self
    }

    /// Applies every value to the template, one after the other.
    ///
    /// Each step works on the output of the previous one: text inserted by a
    /// value is seen by all the values coming after it.
    pub fn render(&self) -> Result<String> {
        let mut output = self.source.to_string();

        for (name, value) in self.values.iter() {
            output = match *value {
                Value::Scalar(ref text) => replace_token(&output, name, text),
                Value::Rows(ref rows) => expand_block(&output, name, rows, self.row_separator)?,
            };
        }

        Ok(output)
    }
}

/// Replaces every `{@name}` in `template` with `value`.
///
/// This is a plain substring replacement: `value` is inserted as is and
/// is not searched again for `{@name}`.
pub fn replace_token(template: &str, name: &str, value: &str) -> String {
    let token = format!("{{@{}}}", name);
    trace!("Replacing {} ({} bytes of text)", token, value.len());
    template.replace(&token, value)
}
