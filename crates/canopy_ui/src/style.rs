//! Colors, drawables and widget styles.
//!
//! Styles are plain data: each widget picks the drawable matching its
//! current state at draw time.

use crate::render::Batch;

/// RGBA color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red component (0-1).
    pub r: f32,
    /// Green component (0-1).
    pub g: f32,
    /// Blue component (0-1).
    pub b: f32,
    /// Alpha component (0-1).
    pub a: f32,
}

impl Color {
    /// Transparent black.
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);
    /// Solid black.
    pub const BLACK: Self = Self::rgba(0.0, 0.0, 0.0, 1.0);
    /// Solid white.
    pub const WHITE: Self = Self::rgba(1.0, 1.0, 1.0, 1.0);
    /// Solid red.
    pub const RED: Self = Self::rgba(1.0, 0.0, 0.0, 1.0);
    /// Solid green.
    pub const GREEN: Self = Self::rgba(0.0, 1.0, 0.0, 1.0);
    /// Solid blue.
    pub const BLUE: Self = Self::rgba(0.0, 0.0, 1.0, 1.0);
    /// Mid gray.
    pub const GRAY: Self = Self::rgba(0.5, 0.5, 0.5, 1.0);

    /// Creates a color from RGBA values (0-1).
    #[must_use]
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a color from RGB values (0-1) with full alpha.
    #[must_use]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::rgba(r, g, b, 1.0)
    }

    /// Creates a color from hex value (0xRRGGBBAA).
    #[must_use]
    pub const fn hex(hex: u32) -> Self {
        let r = ((hex >> 24) & 0xFF) as f32 / 255.0;
        let g = ((hex >> 16) & 0xFF) as f32 / 255.0;
        let b = ((hex >> 8) & 0xFF) as f32 / 255.0;
        let a = (hex & 0xFF) as f32 / 255.0;
        Self::rgba(r, g, b, a)
    }

    /// Returns a new color with different alpha.
    #[must_use]
    pub const fn with_alpha(self, a: f32) -> Self {
        Self::rgba(self.r, self.g, self.b, a)
    }

    /// Linearly interpolates between two colors.
    #[must_use]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self::rgba(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
            self.a + (other.a - self.a) * t,
        )
    }

    /// Component-wise product, used to tint a drawable.
    #[must_use]
    pub fn multiply(self, other: Self) -> Self {
        Self::rgba(
            self.r * other.r,
            self.g * other.g,
            self.b * other.b,
            self.a * other.a,
        )
    }

    /// Converts to array format.
    #[must_use]
    pub const fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Host-side handle of an image, nine-patch or tiled region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DrawableId(pub u32);

/// Something the host knows how to draw, with the metrics widgets need for
/// layout.
///
/// The toolkit never loads textures: the host hands out [`DrawableId`]s and
/// receives them back through [`Batch::draw`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Drawable {
    /// Host handle.
    pub id: DrawableId,
    /// Smallest width the drawable can be drawn at.
    pub min_width: f32,
    /// Smallest height the drawable can be drawn at.
    pub min_height: f32,
    /// Content inset from the left edge.
    pub left_width: f32,
    /// Content inset from the right edge.
    pub right_width: f32,
    /// Content inset from the top edge.
    pub top_height: f32,
    /// Content inset from the bottom edge.
    pub bottom_height: f32,
}

impl Drawable {
    /// Creates a drawable with no content insets.
    #[must_use]
    pub const fn new(id: DrawableId, min_width: f32, min_height: f32) -> Self {
        Self {
            id,
            min_width,
            min_height,
            left_width: 0.0,
            right_width: 0.0,
            top_height: 0.0,
            bottom_height: 0.0,
        }
    }

    /// Sets the content insets (left, right, top, bottom).
    #[must_use]
    pub const fn with_padding(mut self, left: f32, right: f32, top: f32, bottom: f32) -> Self {
        self.left_width = left;
        self.right_width = right;
        self.top_height = top;
        self.bottom_height = bottom;
        self
    }

    /// Draws the drawable through a batch.
    pub fn draw(&self, batch: &mut dyn Batch, x: f32, y: f32, width: f32, height: f32) {
        batch.draw(self, x, y, width, height);
    }
}

/// Drawables for each button state.
///
/// Every background is optional; a button with no `up` drawable simply draws
/// nothing behind its content.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ButtonStyle {
    /// Resting background.
    pub up: Option<Drawable>,
    /// Background while pressed.
    pub down: Option<Drawable>,
    /// Background while hovered.
    pub over: Option<Drawable>,
    /// Background while checked.
    pub checked: Option<Drawable>,
    /// Background while checked and hovered.
    pub checked_over: Option<Drawable>,
    /// Background while disabled.
    pub disabled: Option<Drawable>,
    /// Content offset while pressed.
    pub pressed_offset_x: f32,
    /// Content offset while pressed.
    pub pressed_offset_y: f32,
    /// Content offset while not pressed.
    pub unpressed_offset_x: f32,
    /// Content offset while not pressed.
    pub unpressed_offset_y: f32,
}

impl ButtonStyle {
    /// Creates a style from the three most common backgrounds.
    #[must_use]
    pub fn new(up: Option<Drawable>, down: Option<Drawable>, checked: Option<Drawable>) -> Self {
        Self {
            up,
            down,
            checked,
            ..Self::default()
        }
    }

    /// The background whose insets pad the button content.
    #[must_use]
    pub fn padding_source(&self) -> Option<&Drawable> {
        self.up
            .as_ref()
            .or(self.down.as_ref())
            .or(self.checked.as_ref())
    }
}

/// Drawables for a tree.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeStyle {
    /// Expander shown on collapsed nodes.
    pub plus: Drawable,
    /// Expander shown on expanded nodes.
    pub minus: Drawable,
    /// Row highlight under the pointer.
    pub over: Option<Drawable>,
    /// Row highlight for selected nodes.
    pub selection: Option<Drawable>,
    /// Drawn behind the whole tree.
    pub background: Option<Drawable>,
}

impl TreeStyle {
    /// Creates a style with expanders and an optional selection highlight.
    #[must_use]
    pub const fn new(plus: Drawable, minus: Drawable, selection: Option<Drawable>) -> Self {
        Self {
            plus,
            minus,
            over: None,
            selection,
            background: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_lerp() {
        let black = Color::BLACK;
        let white = Color::WHITE;
        let mid = black.lerp(white, 0.5);

        assert!((mid.r - 0.5).abs() < 0.01);
        assert!((mid.g - 0.5).abs() < 0.01);
        assert!((mid.b - 0.5).abs() < 0.01);
    }

    #[test]
    fn test_color_hex() {
        let color = Color::hex(0xFF00_00FF);
        assert!((color.r - 1.0).abs() < 0.01);
        assert!((color.g - 0.0).abs() < 0.01);
        assert!((color.b - 0.0).abs() < 0.01);
    }

    #[test]
    fn test_color_multiply() {
        let tinted = Color::rgba(1.0, 0.5, 0.5, 1.0).multiply(Color::WHITE.with_alpha(0.5));
        assert_eq!(tinted, Color::rgba(1.0, 0.5, 0.5, 0.5));
    }

    #[test]
    fn test_button_padding_source_order() {
        let down = Drawable::new(DrawableId(2), 10.0, 10.0).with_padding(1.0, 1.0, 1.0, 1.0);
        let checked = Drawable::new(DrawableId(3), 10.0, 10.0);

        let style = ButtonStyle::new(None, Some(down), Some(checked));
        assert_eq!(style.padding_source(), Some(&down));

        let empty = ButtonStyle::default();
        assert!(empty.padding_source().is_none());
    }
}
