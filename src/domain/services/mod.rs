pub mod block_renderer;
pub mod template_renderer;

pub use block_renderer::render_template_html;
pub use template_renderer::{render, render_email};
