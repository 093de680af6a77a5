//! Ruler widget
//!
//! A horizontal scale of ticks the user drags or flicks to pick an integer.
//! The host feeds pointer events and frame times, and asks for paint when
//! [`Ruler::take_redraw_requested`] says something changed.
//!
//! ```rust
//! use ruler_core::PointerEvent;
//! use ruler_widgets::{Ruler, RulerConfig};
//!
//! let mut ruler = Ruler::new(RulerConfig::default()).unwrap();
//! ruler.resize(1080.0, 600.0);
//! ruler.attach();
//!
//! // Drag three ticks to the left and let go slowly
//! ruler.on_pointer_event(&PointerEvent::down(600.0, 100.0, 0));
//! ruler.on_pointer_event(&PointerEvent::moved(438.0, 100.0, 300));
//! ruler.on_pointer_event(&PointerEvent::up(438.0, 100.0, 600));
//! assert_eq!(ruler.current_value(), 3);
//! ```

use ruler_core::{PointerEvent, Result};
use ruler_paint::{Color, PaintContext, Size};

use crate::config::{GestureConfig, PhysicsConfig, RulerConfig};
use crate::gesture::{GestureController, GestureState};
use crate::layout::{self, Geometry, MeasureSpec};
use crate::mapper::ValueMapper;
use crate::renderer::{self, RenderInput};
use crate::text::{EstimatedTextMeasurer, TextMeasurer};

type ValueListener = Box<dyn FnMut(i32) + Send>;
type ActivateListener = Box<dyn FnMut() + Send>;

/// Interactive ruler picker
pub struct Ruler {
    config: RulerConfig,
    gesture_config: GestureConfig,
    mapper: ValueMapper,
    gesture: GestureController,
    geometry: Geometry,
    text: Box<dyn TextMeasurer>,
    current_value: i32,
    on_value_changed: Option<ValueListener>,
    on_activate: Option<ActivateListener>,
    redraw_requested: bool,
}

impl std::fmt::Debug for Ruler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ruler")
            .field("config", &self.config)
            .field("value", &self.current_value)
            .field("offset", &self.gesture.offset())
            .field("state", &self.gesture.state())
            .field("geometry", &self.geometry)
            .finish_non_exhaustive()
    }
}

impl Ruler {
    /// Create a ruler with default gesture and physics tuning
    pub fn new(config: RulerConfig) -> Result<Self> {
        Self::builder().config(config).build()
    }

    pub fn builder() -> RulerBuilder {
        RulerBuilder::default()
    }

    fn from_parts(
        config: RulerConfig,
        gesture_config: GestureConfig,
        physics: PhysicsConfig,
        text: Box<dyn TextMeasurer>,
    ) -> Result<Self> {
        config.validate()?;
        gesture_config.validate()?;
        physics.validate()?;

        let mapper = ValueMapper::new(&config);
        let gesture = GestureController::new(mapper, gesture_config.clone(), &physics);

        tracing::debug!(
            "ruler: range {}..={}, pitch {}",
            config.min_value,
            config.max_value,
            config.pitch()
        );

        Ok(Self {
            current_value: config.min_value,
            geometry: Geometry::new(&config, 0.0, 0.0),
            config,
            gesture_config,
            mapper,
            gesture,
            text,
            on_value_changed: None,
            on_activate: None,
            redraw_requested: true,
        })
    }

    pub fn config(&self) -> &RulerConfig {
        &self.config
    }

    /// Set the value-changed callback, replacing any previous one
    pub fn set_value_changed_listener<F: FnMut(i32) + Send + 'static>(&mut self, listener: F) {
        self.on_value_changed = Some(Box::new(listener));
    }

    /// Set the tap callback, replacing any previous one
    pub fn set_activate_listener<F: FnMut() + Send + 'static>(&mut self, listener: F) {
        self.on_activate = Some(Box::new(listener));
    }

    /// The widget became visible; reports the current value once
    pub fn attach(&mut self) {
        let value = self.current_value;
        tracing::debug!("ruler: attached at value {}", value);
        if let Some(listener) = self.on_value_changed.as_mut() {
            listener(value);
        }
        self.redraw_requested = true;
    }

    /// Stop motion and drop both listeners
    pub fn teardown(&mut self) {
        self.gesture.abort();
        self.on_value_changed = None;
        self.on_activate = None;
        tracing::debug!("ruler: torn down at value {}", self.current_value);
    }

    pub fn current_value(&self) -> i32 {
        self.current_value
    }

    pub fn current_offset(&self) -> f32 {
        self.gesture.offset()
    }

    pub fn gesture_state(&self) -> GestureState {
        self.gesture.state()
    }

    /// Whether [`Ruler::tick`] still has motion to play
    pub fn is_animating(&self) -> bool {
        self.gesture.is_animating()
    }

    /// Check if a redraw was requested and clear the flag
    pub fn take_redraw_requested(&mut self) -> bool {
        std::mem::take(&mut self.redraw_requested)
    }

    /// Animate to `value`, clamped to the range
    ///
    /// Values passed on the way are reported to the listener. Does nothing
    /// if `value` is already selected or a drag is in progress.
    pub fn set_current_value(&mut self, value: i32) {
        let value = self.mapper.clamp_value(value);
        if value == self.current_value {
            return;
        }
        let target = self.mapper.value_to_offset(value, self.gesture.offset());
        tracing::debug!(
            "ruler: set value {} -> {} (offset {} -> {})",
            self.current_value,
            value,
            self.gesture.offset(),
            target
        );
        if self.gesture.animate_to(target, self.gesture_config.set_value_velocity) {
            self.redraw_requested = true;
        }
    }

    /// Color of the indicator disc as currently painted
    pub fn indicator_color(&self) -> Color {
        renderer::indicator_color(&self.config, &self.mapper, self.gesture.offset())
    }

    /// Adopt a new widget size
    pub fn resize(&mut self, width: f32, height: f32) {
        self.geometry = Geometry::new(&self.config, width, height);
        self.redraw_requested = true;
        tracing::trace!("ruler: resized to {}x{}", width, height);
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Size the ruler wants under the given constraints
    pub fn measure(&self, width_spec: MeasureSpec, height_spec: MeasureSpec) -> Size {
        layout::measure(&self.config, self.text.as_ref(), width_spec, height_spec)
    }

    /// Feed a pointer event in widget coordinates
    pub fn on_pointer_event(&mut self, event: &PointerEvent) {
        let before = self.gesture.state();
        if self.gesture.handle_pointer(event) {
            self.offset_changed();
        }
        if self.gesture.state() != before {
            self.redraw_requested = true;
        }
        if self.gesture.take_tapped() {
            if let Some(listener) = self.on_activate.as_mut() {
                listener();
            }
        }
    }

    /// Advance motion to frame time `now_ms`, returning true while animating
    pub fn tick(&mut self, now_ms: u64) -> bool {
        if self.gesture.tick(now_ms) {
            self.offset_changed();
        }
        self.gesture.is_animating()
    }

    fn offset_changed(&mut self) {
        self.redraw_requested = true;
        let value = self.mapper.offset_to_value(self.gesture.offset());
        if value == self.current_value {
            return;
        }
        tracing::trace!("ruler: value {} -> {}", self.current_value, value);
        self.current_value = value;
        if let Some(listener) = self.on_value_changed.as_mut() {
            listener(value);
        }
    }

    /// Record the current frame
    pub fn paint(&self, ctx: &mut PaintContext) {
        renderer::paint(
            ctx,
            &RenderInput {
                config: &self.config,
                mapper: &self.mapper,
                geometry: &self.geometry,
                text: self.text.as_ref(),
                offset: self.gesture.offset(),
            },
        );
    }
}

/// Builder for [`Ruler`]
#[derive(Default)]
pub struct RulerBuilder {
    config: RulerConfig,
    gesture: GestureConfig,
    physics: PhysicsConfig,
    text: Option<Box<dyn TextMeasurer>>,
}

impl RulerBuilder {
    pub fn config(mut self, config: RulerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn gesture(mut self, gesture: GestureConfig) -> Self {
        self.gesture = gesture;
        self
    }

    pub fn physics(mut self, physics: PhysicsConfig) -> Self {
        self.physics = physics;
        self
    }

    /// Measure labels with real font metrics
    pub fn text_measurer(mut self, text: impl TextMeasurer + 'static) -> Self {
        self.text = Some(Box::new(text));
        self
    }

    pub fn build(self) -> Result<Ruler> {
        let text = self
            .text
            .unwrap_or_else(|| Box::new(EstimatedTextMeasurer::default()));
        Ruler::from_parts(self.config, self.gesture, self.physics, text)
    }
}
