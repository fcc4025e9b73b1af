#![doc(html_root_url = "https://docs.rs/ltpl")]
//! # Ltpl: lazy templates
//!
//! A very small template engine: it replaces `{@name}` tokens with values and
//! repeats `{@each:name}...{@endeach:name}` blocks once per row of a list.
//! There are no expressions, conditionals, includes or escaping.
//!
//! ## Example
//!
//! ```rust
//! use ltpl::{map_to_rows, render_str, row, Values};
//!
//! let template = "<h1>{@title}</h1>
//! <ul>
//! {@each:items}<li>{@name}: {@price}</li>{@endeach:items}
//! </ul>";
//!
//! let mut values = Values::new();
//! values.insert("title", "Groceries");
//! values.insert("items", vec![
//!     row! { "name" => "milk", "price" => 2 },
//!     row! { "name" => "bread", "price" => 3 },
//! ]);
//!
//! let rendered = render_str(template, &values).unwrap();
//! assert_eq!(rendered, "<h1>Groceries</h1>
//! <ul>
//! <li>milk: 2</li>
//! <li>bread: 3</li>
//! </ul>");
//! ```
//!
//! Values are applied one after the other in the order they were inserted,
//! each on the output of the previous one. A list of rows needs its block in
//! the template: rendering stops with an error otherwise.
//!
//! Templates are usually loaded from a directory with an [`Engine`]:
//!
//! ```rust,no_run
//! use ltpl::{Engine, Values};
//!
//! let engine = Engine::new("templates/**/*.html").unwrap();
//! let mut values = Values::new();
//! values.insert("answer", "42");
//! println!("{}", engine.render("answer.html", &values).unwrap());
//! ```

#![deny(missing_docs)]

mod context;
mod engine;
mod errors;
mod parser;
mod renderer;
mod template;
mod utils;
mod value;

use std::path::Path;

use log::debug;

// Library exports.

pub use crate::context::Values;
pub use crate::engine::Engine;
pub use crate::errors::{Error, ErrorKind, Result};
pub use crate::renderer::{
    expand_block, find_block, render_rows, replace_token, Block, Renderer, DEFAULT_ROW_SEPARATOR,
};
pub use crate::template::Template;
pub use crate::utils::{map_to_rows, try_map_to_rows};
pub use crate::value::{Row, RowList, Value};

// Exposes the scanned markers if one needs them but changing them isn't
// considered a breaking change so it isn't public
#[doc(hidden)]
pub use crate::parser::ast;

/// Renders the template file at `path` with `values`.
///
/// If the file can't be read, the returned string is the error message
/// `Error loading template file: <path>` instead of rendered content: check for it
/// or use [`Engine::render_file`] to get a proper `Result`.
/// Invalid UTF-8 in the file is replaced by `U+FFFD` rather than refused.
///
/// # Panics
///
/// Panics if a list of rows has no `{@each:name}`/`{@endeach:name}` block in the
/// template or if the block ends before it starts. The template and the values
/// disagree and there is nothing sensible to render.
///
/// ```rust,no_run
/// let mut values = ltpl::Values::new();
/// values.insert("answer", "42");
/// println!("{}", ltpl::render("answer.ltpl.html", &values));
/// ```
pub fn render<P: AsRef<Path>>(path: P, values: &Values) -> String {
    let path = path.as_ref();
    // Bytes that aren't valid UTF-8 are replaced, the template is still rendered
    let source = match std::fs::read(path) {
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(e) => {
            debug!("Could not read {}: {}", path.display(), e);
            return format!("Error loading template file: {}", path.display());
        }
    };

    match Renderer::new(&source, values).render() {
        Ok(rendered) => rendered,
        Err(e) => panic!("Major failure in template engine: {}", e),
    }
}

/// Renders a template given as a string.
///
/// Unlike [`render`], a missing or malformed block is returned as an error
/// for which [`Error::is_fatal`] is true.
pub fn render_str(template: &str, values: &Values) -> Result<String> {
    Renderer::new(template, values).render()
}
