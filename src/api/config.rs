use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};
use crate::render::Color;

/// Paint settings applied by every render pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderStyle {
    pub line_color: Color,
    pub line_width: f64,
    pub marker_radius: f64,
    pub marker_fill: Color,
    pub marker_stroke: Color,
    pub marker_stroke_width: f64,
    pub axis_color: Color,
    pub axis_line_width: f64,
    pub tick_size_px: f64,
    pub tick_label_font_size_px: f64,
    pub axis_label_font_size_px: f64,
    pub axis_label_color: Color,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            // #30475e
            line_color: Color::rgb(48.0 / 255.0, 71.0 / 255.0, 94.0 / 255.0),
            line_width: 2.0,
            marker_radius: 5.0,
            // #fc8781
            marker_fill: Color::rgb(252.0 / 255.0, 135.0 / 255.0, 129.0 / 255.0),
            marker_stroke: Color::BLACK,
            marker_stroke_width: 2.0,
            axis_color: Color::BLACK,
            axis_line_width: 1.0,
            tick_size_px: 6.0,
            tick_label_font_size_px: 10.0,
            axis_label_font_size_px: 12.8,
            axis_label_color: Color::BLACK,
        }
    }
}

impl RenderStyle {
    pub fn validate(self) -> ChartResult<()> {
        for color in [
            self.line_color,
            self.marker_fill,
            self.marker_stroke,
            self.axis_color,
            self.axis_label_color,
        ] {
            color.validate()?;
        }
        for (name, value) in [
            ("line_width", self.line_width),
            ("marker_radius", self.marker_radius),
            ("marker_stroke_width", self.marker_stroke_width),
            ("axis_line_width", self.axis_line_width),
            ("tick_size_px", self.tick_size_px),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "render style `{name}` must be finite and >= 0"
                )));
            }
        }
        for (name, value) in [
            ("tick_label_font_size_px", self.tick_label_font_size_px),
            ("axis_label_font_size_px", self.axis_label_font_size_px),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "render style `{name}` must be finite and > 0"
                )));
            }
        }
        Ok(())
    }
}

/// Host bootstrap configuration.
///
/// Serializable so embedding applications can keep chart setup next to the
/// rest of their settings; every field falls back to its default when absent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartHostConfig {
    /// Uniform margin around the content box, in pixels.
    pub margin: f64,
    /// Quiet period before a burst of resize events is measured.
    pub debounce_ms: u64,
    /// Width before the first measurement. Zero means "don't draw yet".
    pub initial_width: f64,
    /// Height before the first measurement, reserved even without data.
    pub initial_height: f64,
    /// How far above the hovered point the tooltip is placed.
    pub tooltip_offset_px: f64,
    pub style: RenderStyle,
}

impl Default for ChartHostConfig {
    fn default() -> Self {
        Self {
            margin: 50.0,
            debounce_ms: 150,
            initial_width: 0.0,
            initial_height: 500.0,
            tooltip_offset_px: 50.0,
            style: RenderStyle::default(),
        }
    }
}

impl ChartHostConfig {
    #[must_use]
    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }

    #[must_use]
    pub fn with_debounce_ms(mut self, debounce_ms: u64) -> Self {
        self.debounce_ms = debounce_ms;
        self
    }

    #[must_use]
    pub fn with_initial_size(mut self, width: f64, height: f64) -> Self {
        self.initial_width = width;
        self.initial_height = height;
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: RenderStyle) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub fn debounce(self) -> std::time::Duration {
        std::time::Duration::from_millis(self.debounce_ms)
    }

    pub fn validate(self) -> ChartResult<Self> {
        for (name, value) in [
            ("margin", self.margin),
            ("initial_width", self.initial_width),
            ("initial_height", self.initial_height),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "`{name}` must be finite and >= 0"
                )));
            }
        }
        if !self.tooltip_offset_px.is_finite() {
            return Err(ChartError::InvalidData(
                "`tooltip_offset_px` must be finite".to_owned(),
            ));
        }
        self.style.validate()?;
        Ok(self)
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse host config: {e}")))?;
        config.validate()
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize host config: {e}")))
    }
}
