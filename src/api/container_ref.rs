use std::cell::Cell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::core::ContainerSize;

/// Box metrics an enclosing layout reports for the chart container.
///
/// Offset sizes include borders and scrollbars, client sizes don't; layouts
/// disagree on which is larger during fractional passes, so measurement takes
/// the larger of the two per axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContainerLayout {
    pub offset_width: f64,
    pub client_width: f64,
    pub offset_height: f64,
    pub client_height: f64,
}

impl ContainerLayout {
    /// Layout where offset and client sizes agree.
    #[must_use]
    pub fn uniform(width: f64, height: f64) -> Self {
        Self {
            offset_width: width,
            client_width: width,
            offset_height: height,
            client_height: height,
        }
    }

    #[must_use]
    pub fn normalized(self) -> ContainerSize {
        let pick = |a: f64, b: f64| {
            let value = a.max(b);
            if value.is_finite() { value.max(0.0) } else { 0.0 }
        };
        ContainerSize::new(
            pick(self.offset_width, self.client_width),
            pick(self.offset_height, self.client_height),
        )
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct ContainerSlot {
    attached: bool,
    layout: Option<ContainerLayout>,
}

/// Shared handle to the chart's container element.
///
/// The host attaches it synchronously on mount, before the first render pass,
/// and detaches it on unmount. Consumers clone it to report layout or to
/// measure the chart from an enclosing layout.
#[derive(Debug, Clone, Default)]
pub struct ContainerRef {
    slot: Rc<Cell<ContainerSlot>>,
}

impl ContainerRef {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.slot.get().attached
    }

    /// Records the container's current box metrics.
    pub fn set_layout(&self, layout: ContainerLayout) {
        let mut slot = self.slot.get();
        slot.layout = Some(layout);
        self.slot.set(slot);
    }

    #[must_use]
    pub fn layout(&self) -> Option<ContainerLayout> {
        self.slot.get().layout
    }

    /// Rendered size, or `None` while the container isn't mounted or laid out.
    #[must_use]
    pub fn measure(&self) -> Option<ContainerSize> {
        let slot = self.slot.get();
        if !slot.attached {
            return None;
        }
        slot.layout.map(ContainerLayout::normalized)
    }

    /// `true` when both handles point at the same container.
    #[must_use]
    pub fn same_container(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.slot, &other.slot)
    }

    pub(crate) fn attach(&self) {
        let mut slot = self.slot.get();
        slot.attached = true;
        self.slot.set(slot);
    }

    pub(crate) fn detach(&self) {
        let mut slot = self.slot.get();
        slot.attached = false;
        self.slot.set(slot);
    }
}
