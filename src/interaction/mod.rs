use serde::{Deserialize, Serialize};

/// Series point under the pointer, resolved by the nearest-point locator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HoverTarget {
    pub index: usize,
    /// Unix seconds of the matched point.
    pub time: f64,
    pub value: f64,
    /// Pixel position inside the content box.
    pub x: f64,
    pub y: f64,
}

/// HTML-like overlay element shown next to the hovered point.
///
/// Lives beside the drawing surface, not inside it: the pipeline never clears
/// it, only pointer handlers move, fill and toggle it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TooltipState {
    pub visible: bool,
    /// Absolute offsets relative to the chart container.
    pub left: f64,
    pub top: f64,
    /// Text of the "value" sub-region.
    pub value_text: String,
    /// Text of the "formatted date" sub-region.
    pub date_text: String,
}

impl Default for TooltipState {
    fn default() -> Self {
        Self {
            visible: false,
            left: 0.0,
            top: 0.0,
            value_text: String::new(),
            date_text: String::new(),
        }
    }
}

impl TooltipState {
    pub fn show(&mut self, left: f64, top: f64, value_text: String, date_text: String) {
        self.visible = true;
        self.left = left;
        self.top = top;
        self.value_text = value_text;
        self.date_text = date_text;
    }

    /// Hides the tooltip; its last content stays until the next `show`.
    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// CSS `display` value for the tooltip element.
    #[must_use]
    pub fn display(&self) -> &'static str {
        if self.visible { "block" } else { "none" }
    }
}
