//! Ruler renderer
//!
//! Records the indicator, tick bars, and labels for one frame. Output depends
//! only on the arguments, so two calls with the same inputs record the same
//! commands.

use ruler_paint::{interpolate, Color, PaintContext, Rect};

use crate::config::RulerConfig;
use crate::layout::Geometry;
use crate::mapper::ValueMapper;
use crate::text::TextMeasurer;

/// Everything one frame is drawn from
pub struct RenderInput<'a> {
    pub config: &'a RulerConfig,
    pub mapper: &'a ValueMapper,
    pub geometry: &'a Geometry,
    pub text: &'a dyn TextMeasurer,
    pub offset: f32,
}

/// Indicator color at `offset`
pub fn indicator_color(config: &RulerConfig, mapper: &ValueMapper, offset: f32) -> Color {
    interpolate(
        config.start_color,
        config.end_color,
        mapper.color_ratio_for_indicator(offset),
    )
}

/// Gradient color of the tick for `value`
pub fn tick_color(config: &RulerConfig, mapper: &ValueMapper, value: i32) -> Color {
    interpolate(
        config.start_color,
        config.end_color,
        mapper.color_ratio_for_tick(value),
    )
}

/// Record one frame into `ctx`
pub fn paint(ctx: &mut PaintContext, input: &RenderInput<'_>) {
    let RenderInput {
        config,
        mapper,
        geometry,
        text,
        offset,
    } = *input;
    let offset = mapper.clamp_offset(offset);

    ctx.push_clip(0.0, 0.0, geometry.width, geometry.height);

    let center = geometry.indicator_center;
    ctx.fill_circle(
        center.x,
        center.y,
        config.indicator_radius,
        indicator_color(config, mapper, offset),
    );

    for value in mapper.min_value()..=mapper.max_value() {
        let right = geometry.base_x + offset + mapper.tick_position(value);
        let height = mapper.tick_height(value);
        let color = tick_color(config, mapper, value);

        let bar = Rect::from_ltrb(
            right - config.tick_width,
            geometry.line_y,
            right,
            geometry.line_y + height,
        );
        ctx.fill_rounded_rect(bar, config.tick_radius, color);

        if mapper.tick_class(value).has_label() {
            let label = value.to_string();
            let label_width = text.measure(&label, config.text_size).width;
            let x = right - label_width / 2.0 - config.tick_width / 2.0;
            ctx.draw_text(label, x, geometry.text_y, config.text_size, color);
        }
    }

    ctx.pop_clip();
}
