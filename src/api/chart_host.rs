use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::{ContainerSize, DataPoint, Dimensions, PlotPoint, ScalePair};
use crate::error::{ChartError, ChartResult};
use crate::interaction::TooltipState;
use crate::render::{Renderer, Surface};

use super::render_pipeline::{InteractionLayer, PipelineState, RenderInput, RenderPipeline};
use super::{ChartHostConfig, ContainerRef, ResizeObserver, SeriesVariant};

/// Caller-supplied inputs of one chart.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartProps {
    pub data: Vec<DataPoint>,
    /// Overrides the variant's preset label.
    pub y_axis_label: Option<String>,
    pub variant: SeriesVariant,
    /// Fixed width; measured from the container when `None`.
    pub width: Option<f64>,
    /// Fixed height; measured from the container when `None`.
    pub height: Option<f64>,
}

impl ChartProps {
    #[must_use]
    pub fn new(data: Vec<DataPoint>) -> Self {
        Self {
            data,
            ..Self::default()
        }
    }

    /// Props for a data-type tag such as `"impressions"`.
    pub fn for_data_type(data: Vec<DataPoint>, data_type: &str) -> ChartResult<Self> {
        Ok(Self::new(data).with_variant(data_type.parse()?))
    }

    #[must_use]
    pub fn with_variant(mut self, variant: SeriesVariant) -> Self {
        self.variant = variant;
        self
    }

    #[must_use]
    pub fn with_y_axis_label(mut self, label: impl Into<String>) -> Self {
        self.y_axis_label = Some(label.into());
        self
    }

    #[must_use]
    pub fn with_size(mut self, width: Option<f64>, height: Option<f64>) -> Self {
        self.width = width;
        self.height = height;
        self
    }
}

/// Composition root: owns the container handle, the resize observer, the
/// surface and the renderer, and redraws whenever props or size change.
///
/// Hosts are driven from one UI thread. Time enters only through the
/// `Instant`s passed to [`ChartHost::notify_resize`] and [`ChartHost::poll`].
pub struct ChartHost<R: Renderer> {
    renderer: R,
    config: ChartHostConfig,
    container: ContainerRef,
    observer: ResizeObserver,
    pipeline: RenderPipeline,
    props: ChartProps,
    pub(super) surface: Surface,
    pub(super) tooltip: TooltipState,
    pub(super) points: Vec<PlotPoint>,
    pub(super) layer: Option<InteractionLayer>,
    mounted: bool,
}

impl<R: Renderer> ChartHost<R> {
    pub fn new(renderer: R, config: ChartHostConfig) -> ChartResult<Self> {
        let config = config.validate()?;
        let initial = ContainerSize::new(config.initial_width, config.initial_height);
        Ok(Self {
            renderer,
            config,
            container: ContainerRef::new(),
            observer: ResizeObserver::new(config.debounce(), initial),
            pipeline: RenderPipeline::new(),
            props: ChartProps::default(),
            surface: Surface::new(),
            tooltip: TooltipState::default(),
            points: Vec::new(),
            layer: None,
            mounted: false,
        })
    }

    #[must_use]
    pub fn with_props(mut self, props: ChartProps) -> Self {
        self.props = props;
        self
    }

    /// Attaches the container, takes an initial measurement and draws.
    ///
    /// The container handle is attached before anything reads it, so consumers
    /// holding [`ChartHost::container_ref`] can measure it from the first pass on.
    pub fn mount(&mut self) -> ChartResult<()> {
        if self.mounted {
            return Ok(());
        }
        self.container.attach();
        self.observer.connect();
        self.mounted = true;
        debug!("chart host mounted");

        if self.observer.reported().width == 0.0 {
            let container = self.container.clone();
            self.observer.measure_now(|| container.measure());
        }
        self.redraw()
    }

    /// Stops listening for resizes, drops any pending measurement and clears
    /// the surface.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.observer.disconnect();
        self.observer.reset(ContainerSize::new(
            self.config.initial_width,
            self.config.initial_height,
        ));
        self.container.detach();
        self.mounted = false;
        self.layer = None;
        self.surface.clear();
        self.tooltip.hide();
        debug!("chart host unmounted");
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Records a resize event from the container. Ignored while unmounted.
    pub fn notify_resize(&mut self, now: Instant) -> bool {
        self.observer.notify(now)
    }

    /// When the pending resize burst is due, so an event loop can sleep until then.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.observer.deadline()
    }

    /// Fires a due resize and redraws if the reported size grew.
    ///
    /// Returns `true` when a redraw happened.
    pub fn poll(&mut self, now: Instant) -> ChartResult<bool> {
        if !self.mounted {
            return Ok(false);
        }
        let container = self.container.clone();
        let Some(size) = self.observer.poll(now, || container.measure()) else {
            return Ok(false);
        };
        debug!(
            width = size.width,
            height = size.height,
            "container resized"
        );
        self.redraw()?;
        Ok(true)
    }

    /// Replaces all props and redraws when mounted.
    pub fn set_props(&mut self, props: ChartProps) -> ChartResult<()> {
        self.props = props;
        self.redraw_if_mounted()
    }

    pub fn set_data(&mut self, data: Vec<DataPoint>) -> ChartResult<()> {
        trace!(count = data.len(), "set chart data");
        self.props.data = data;
        self.redraw_if_mounted()
    }

    pub fn set_y_axis_label(&mut self, label: Option<String>) -> ChartResult<()> {
        self.props.y_axis_label = label;
        self.redraw_if_mounted()
    }

    pub fn set_size(&mut self, width: Option<f64>, height: Option<f64>) -> ChartResult<()> {
        self.props.width = width;
        self.props.height = height;
        self.redraw_if_mounted()
    }

    /// Runs a full render pass with the current props and size.
    ///
    /// A zero width clears the surface instead of drawing. An unparseable date
    /// fails the pass and leaves the previous surface in place.
    pub fn redraw(&mut self) -> ChartResult<()> {
        if !self.mounted {
            return Err(ChartError::NotMounted);
        }

        let size = self.size();
        let points = self.props.variant.resolve(&self.props.data)?;

        if size.width <= 0.0 {
            debug!(height = size.height, "zero width, skipping render pass");
            self.surface.clear();
            self.surface.set_size(0.0, size.height);
            self.layer = None;
            self.points = points;
            self.tooltip.hide();
            return self.renderer.render(&self.surface);
        }

        let label = self
            .props
            .variant
            .accessors()
            .label(self.props.y_axis_label.as_deref());
        let input = RenderInput {
            points: &points,
            y_axis_label: &label,
            dimensions: Dimensions::from_container(size, self.config.margin),
            style: self.config.style,
        };
        let layer = self.pipeline.run(&mut self.surface, input)?;

        self.layer = Some(layer);
        self.points = points;
        self.tooltip.hide();
        self.renderer.render(&self.surface)
    }

    fn redraw_if_mounted(&mut self) -> ChartResult<()> {
        if self.mounted {
            self.redraw()
        } else {
            Ok(())
        }
    }

    /// Size the next pass draws at: explicit props win over the observer.
    #[must_use]
    pub fn size(&self) -> ContainerSize {
        let reported = self.observer.reported();
        ContainerSize::new(
            self.props.width.unwrap_or(reported.width),
            self.props.height.unwrap_or(reported.height),
        )
    }

    /// Handle for enclosing layouts to report and measure the chart container.
    #[must_use]
    pub fn container_ref(&self) -> ContainerRef {
        self.container.clone()
    }

    #[must_use]
    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    #[must_use]
    pub fn tooltip(&self) -> &TooltipState {
        &self.tooltip
    }

    #[must_use]
    pub fn props(&self) -> &ChartProps {
        &self.props
    }

    #[must_use]
    pub fn config(&self) -> ChartHostConfig {
        self.config
    }

    /// Dimensions of the last completed pass.
    #[must_use]
    pub fn dimensions(&self) -> Option<Dimensions> {
        self.layer.map(|layer| layer.dimensions)
    }

    #[must_use]
    pub fn scales(&self) -> Option<ScalePair> {
        self.layer.map(|layer| layer.scales)
    }

    #[must_use]
    pub fn interaction_layer(&self) -> Option<InteractionLayer> {
        self.layer
    }

    #[must_use]
    pub fn pipeline_state(&self) -> PipelineState {
        self.pipeline.state()
    }

    #[must_use]
    pub fn completed_passes(&self) -> u64 {
        self.pipeline.completed_passes()
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub(super) fn present(&mut self) -> ChartResult<()> {
        self.renderer.render(&self.surface)
    }
}
