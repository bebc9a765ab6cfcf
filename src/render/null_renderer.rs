use crate::error::ChartResult;
use crate::render::{Renderer, Surface};

/// No-op renderer used by tests and headless hosts.
///
/// It still validates the surface so tests catch non-finite geometry before a
/// real backend would.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub render_count: usize,
    pub last_node_count: usize,
    pub last_size: (f64, f64),
}

impl Renderer for NullRenderer {
    fn render(&mut self, surface: &Surface) -> ChartResult<()> {
        surface.validate()?;
        self.render_count += 1;
        self.last_node_count = surface.node_count();
        self.last_size = (surface.width, surface.height);
        Ok(())
    }
}
