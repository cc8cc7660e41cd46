//! Draw boundary between widgets and the host renderer.
//!
//! Widgets only ever talk to a [`Batch`]. The host either implements it on
//! top of its sprite batcher, or uses [`CommandBatch`] to record the frame
//! and upload the generated quads itself.

use crate::layout::Rect;
use crate::style::{Color, Drawable, DrawableId};

/// Host-implemented drawing surface.
///
/// Coordinates are stage coordinates, y-up.
pub trait Batch {
    /// Sets the tint applied to following draws.
    fn set_color(&mut self, color: Color);

    /// Returns the current tint.
    fn color(&self) -> Color;

    /// Draws a drawable stretched over the given rectangle.
    fn draw(&mut self, drawable: &Drawable, x: f32, y: f32, width: f32, height: f32);
}

/// One recorded draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderCommand {
    /// What to draw.
    pub drawable: DrawableId,
    /// Where, in stage coordinates.
    pub bounds: Rect,
    /// Tint at the time of the draw.
    pub color: Color,
}

/// A [`Batch`] that records commands for later submission.
#[derive(Debug, Clone)]
pub struct CommandBatch {
    /// Current tint.
    color: Color,
    /// All commands from the frame.
    commands: Vec<RenderCommand>,
}

impl CommandBatch {
    /// Creates an empty batch.
    #[must_use]
    pub fn new() -> Self {
        Self {
            color: Color::WHITE,
            commands: Vec::with_capacity(256),
        }
    }

    /// Begins a new frame.
    pub fn begin_frame(&mut self) {
        self.commands.clear();
        self.color = Color::WHITE;
    }

    /// Returns the recorded commands in draw order.
    #[must_use]
    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    /// Returns the total command count.
    #[must_use]
    pub fn command_count(&self) -> usize {
        self.commands.len()
    }

    /// Returns the commands drawing a given drawable.
    pub fn commands_for(&self, drawable: DrawableId) -> impl Iterator<Item = &RenderCommand> {
        self.commands.iter().filter(move |c| c.drawable == drawable)
    }

    /// Appends one quad (4 vertices, 6 indices) per command.
    ///
    /// Quads are emitted in draw order; hosts that sort by texture can use
    /// [`RenderCommand::drawable`] to split the index range.
    pub fn build_quads(&self, vertices: &mut Vec<UIVertex>, indices: &mut Vec<u32>) {
        vertices.reserve(self.commands.len() * 4);
        indices.reserve(self.commands.len() * 6);

        for command in &self.commands {
            #[allow(clippy::cast_possible_truncation)]
            let base = vertices.len() as u32;
            let Rect { x, y, width, height } = command.bounds;
            let color = command.color.to_array();

            vertices.push(UIVertex::new(x, y, 0.0, 1.0, color));
            vertices.push(UIVertex::new(x + width, y, 1.0, 1.0, color));
            vertices.push(UIVertex::new(x + width, y + height, 1.0, 0.0, color));
            vertices.push(UIVertex::new(x, y + height, 0.0, 0.0, color));

            indices.extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
        }
    }
}

impl Default for CommandBatch {
    fn default() -> Self {
        Self::new()
    }
}

impl Batch for CommandBatch {
    fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    fn color(&self) -> Color {
        self.color
    }

    fn draw(&mut self, drawable: &Drawable, x: f32, y: f32, width: f32, height: f32) {
        self.commands.push(RenderCommand {
            drawable: drawable.id,
            bounds: Rect::new(x, y, width, height),
            color: self.color,
        });
    }
}

/// Vertex for UI rendering.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct UIVertex {
    /// Position (x, y).
    pub position: [f32; 2],
    /// UV coordinates.
    pub uv: [f32; 2],
    /// Color (RGBA).
    pub color: [f32; 4],
}

impl UIVertex {
    /// Creates a new vertex.
    #[must_use]
    pub const fn new(x: f32, y: f32, u: f32, v: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            uv: [u, v],
            color,
        }
    }
}
