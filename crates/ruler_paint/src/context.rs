//! Paint context - the drawing API widgets record into

use serde::Serialize;

use crate::color::Color;
use crate::primitives::*;

/// A paint command for the renderer
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum PaintCommand {
    FillRoundedRect {
        rect: RoundedRect,
        color: Color,
    },
    FillCircle {
        circle: Circle,
        color: Color,
    },
    /// Text anchored at its left baseline
    DrawText {
        text: String,
        position: Point,
        size: f32,
        color: Color,
    },
    PushClip {
        rect: Rect,
    },
    PopClip,
}

/// The paint context used for widget drawing
#[derive(Debug, Default)]
pub struct PaintContext {
    commands: Vec<PaintCommand>,
    clip_stack: Vec<Rect>,
}

impl PaintContext {
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
            clip_stack: Vec::new(),
        }
    }

    /// Get all recorded commands
    pub fn commands(&self) -> &[PaintCommand] {
        &self.commands
    }

    /// Take ownership of recorded commands
    pub fn take_commands(&mut self) -> Vec<PaintCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Current clip rectangle, if any
    pub fn current_clip(&self) -> Option<Rect> {
        self.clip_stack.last().copied()
    }

    // === Shape drawing ===

    pub fn fill_rounded_rect(&mut self, rect: Rect, radius: f32, color: Color) {
        self.commands.push(PaintCommand::FillRoundedRect {
            rect: RoundedRect {
                rect,
                corner_radius: CornerRadius::uniform(radius),
            },
            color,
        });
    }

    pub fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Color) {
        self.commands.push(PaintCommand::FillCircle {
            circle: Circle::new(Point::new(cx, cy), radius),
            color,
        });
    }

    // === Text ===

    pub fn draw_text(&mut self, text: impl Into<String>, x: f32, y: f32, size: f32, color: Color) {
        self.commands.push(PaintCommand::DrawText {
            text: text.into(),
            position: Point::new(x, y),
            size,
            color,
        });
    }

    // === Clipping ===

    pub fn push_clip(&mut self, x: f32, y: f32, width: f32, height: f32) {
        let rect = Rect::new(x, y, width, height);
        self.clip_stack.push(rect);
        self.commands.push(PaintCommand::PushClip { rect });
    }

    pub fn pop_clip(&mut self) {
        if self.clip_stack.pop().is_none() {
            tracing::warn!("pop_clip called without a matching push_clip");
            return;
        }
        self.commands.push(PaintCommand::PopClip);
    }
}
