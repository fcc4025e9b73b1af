mod blocks;
mod errors;

use crate::context::Values;
use crate::errors::Result;
use crate::renderer::Renderer;

pub fn render_template(content: &str, values: &Values) -> Result<String> {
    Renderer::new(content, values).render()
}
