mod null_renderer;
mod primitives;
mod scene;
mod svg_renderer;

pub use null_renderer::NullRenderer;
pub use primitives::{Color, TextAnchor};
pub use scene::{Node, NodeId, NodeKind, NodeShape, Surface};
pub use svg_renderer::SvgRenderer;

use crate::error::ChartResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive the fully built surface after each render pass or pointer
/// update, so drawing code stays isolated from scales and interaction logic.
pub trait Renderer {
    fn render(&mut self, surface: &Surface) -> ChartResult<()>;
}
