use log::debug;

use crate::errors::{Error, Result};
use crate::renderer::replace_token;
use crate::value::Row;

/// Where a `{@each:name}...{@endeach:name}` block sits in a template
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Block<'t> {
    /// Byte offset of `{@each:name}`
    pub start: usize,
    /// Byte offset right after `{@endeach:name}`
    pub end: usize,
    /// The text between the two tags
    pub body: &'t str,
}

/// Finds the first `{@each:name}` and the first `{@endeach:name}` of `template`.
///
/// Both tags have to be there and in that order, otherwise the block can't
/// be expanded and the render has to stop.
pub fn find_block<'t>(template: &'t str, name: &str) -> Result<Block<'t>> {
    let open = format!("{{@each:{}}}", name);
    let close = format!("{{@endeach:{}}}", name);

    let (start, close_at) = match (template.find(&open), template.find(&close)) {
        (Some(s), Some(c)) => (s, c),
        (s, c) => {
            debug!(
                "No block `{}` to expand: {} {}, {} {}",
                name,
                open,
                if s.is_some() { "found" } else { "missing" },
                close,
                if c.is_some() { "found" } else { "missing" },
            );
            return Err(Error::missing_block(name));
        }
    };

    let body_start = start + open.len();
    if close_at < body_start {
        debug!("Block `{}` closes at {} before opening at {}", name, close_at, start);
        return Err(Error::malformed_block(name));
    }

    Ok(Block { start, end: close_at + close.len(), body: &template[body_start..close_at] })
}

/// Renders `body` once per row, on a fresh copy each time, and joins the results with `separator`.
///
/// Tokens a row has no value for are left in that row's output.
pub fn render_rows(body: &str, rows: &[Row], separator: &str) -> String {
    let rendered: Vec<String> = rows
        .iter()
        .map(|row| row.iter().fold(body.to_string(), |acc, (k, v)| replace_token(&acc, k, v)))
        .collect();
    rendered.join(separator)
}

/// Replaces the first `name` block of `template`, tags included, by its rows.
pub fn expand_block(template: &str, name: &str, rows: &[Row], separator: &str) -> Result<String> {
    let block = find_block(template, name)?;
    debug!("Expanding block `{}` with {} row(s)", name, rows.len());

    let rendered = render_rows(block.body, rows, separator);

    let mut output =
        String::with_capacity(template.len() - (block.end - block.start) + rendered.len());
    output.push_str(&template[..block.start]);
    output.push_str(&rendered);
    output.push_str(&template[block.end..]);
    Ok(output)
}
