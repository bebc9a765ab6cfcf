use tracing::trace;

use crate::core::nearest_point;
use crate::core::primitives::{format_tooltip_date, format_tooltip_value};
use crate::error::ChartResult;
use crate::interaction::HoverTarget;
use crate::render::{NodeKind, Renderer};

use super::ChartHost;

impl<R: Renderer> ChartHost<R> {
    /// Handles a pointer move over the interaction overlay.
    ///
    /// `x`/`y` are overlay-local, i.e. relative to the content box. Positions
    /// outside the overlay behave like a pointer leave. With nothing drawn or an
    /// empty series no lookup happens and `None` is returned.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> ChartResult<Option<HoverTarget>> {
        let Some(layer) = self.layer else {
            return Ok(None);
        };
        if self.points.is_empty() {
            trace!("empty series, skipping nearest-point lookup");
            return Ok(None);
        }

        let dims = layer.dimensions;
        let inside = x.is_finite()
            && y.is_finite()
            && (0.0..=dims.content_width).contains(&x)
            && (0.0..=dims.content_height).contains(&y);
        if !inside {
            self.pointer_leave()?;
            return Ok(None);
        }

        let time = layer.scales.x.invert(x);
        let Some((index, point)) = nearest_point(&self.points, time) else {
            return Ok(None);
        };
        let (px, py) = layer.scales.project(point);

        if let Some(marker) = self.surface.find_mut(layer.marker) {
            marker.opacity = 1.0;
            if let NodeKind::Circle { cx, cy, .. } = &mut marker.kind {
                *cx = px;
                *cy = py;
            }
        }
        self.surface.raise(layer.marker);

        self.present()?;

        let config = self.config();
        self.tooltip.show(
            dims.margin + px,
            dims.margin + py - config.tooltip_offset_px,
            format_tooltip_value(point.y),
            format_tooltip_date(point.x),
        );
        trace!(index, time = point.x, value = point.y, "hover target");
        Ok(Some(HoverTarget {
            index,
            time: point.x,
            value: point.y,
            x: px,
            y: py,
        }))
    }

    /// Hides the highlight marker and the tooltip.
    pub fn pointer_leave(&mut self) -> ChartResult<()> {
        self.tooltip.hide();
        let Some(layer) = self.layer else {
            return Ok(());
        };
        if let Some(marker) = self.surface.find_mut(layer.marker) {
            marker.opacity = 0.0;
        }
        self.present()
    }
}
