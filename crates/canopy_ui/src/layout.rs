//! Layout primitives.
//!
//! All coordinates are y-up: `y` is the bottom edge of a rectangle and grows
//! towards the top of the viewport.

/// A rectangle in y-up coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    /// X position (left edge).
    pub x: f32,
    /// Y position (bottom edge).
    pub y: f32,
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
}

impl Rect {
    /// Creates a new rectangle.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Returns the right edge.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Returns the top edge.
    #[must_use]
    pub fn top(&self) -> f32 {
        self.y + self.height
    }

    /// Returns true if the point is inside the rectangle.
    ///
    /// The left and bottom edges are inclusive, the right and top exclusive.
    #[must_use]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.top()
    }

    /// Returns true if two rectangles overlap. Touching edges do not.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.top()
            && self.top() > other.y
    }

    /// Shrinks the rectangle by per-side insets.
    #[must_use]
    pub fn inset(&self, left: f32, right: f32, top: f32, bottom: f32) -> Self {
        Self::new(
            self.x + left,
            self.y + bottom,
            self.width - left - right,
            self.height - top - bottom,
        )
    }
}

/// Placement of children along an axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    /// Left, or top on the cross axis.
    #[default]
    Start,
    /// Centered.
    Center,
    /// Right, or bottom on the cross axis.
    End,
}

/// Lays children out left to right inside a rectangle.
///
/// Buttons use it to center their content between the background paddings.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Layout {
    /// Horizontal placement of the whole row.
    pub main_alignment: Alignment,
    /// Vertical placement of each child.
    pub cross_alignment: Alignment,
    /// Gap between children.
    pub gap: f32,
}

impl Layout {
    /// Creates a start-aligned row with no gaps.
    #[must_use]
    pub fn horizontal() -> Self {
        Self::default()
    }

    /// Sets the gap between children.
    #[must_use]
    pub const fn with_gap(mut self, gap: f32) -> Self {
        self.gap = gap;
        self
    }

    /// Sets the horizontal placement of the row.
    #[must_use]
    pub const fn align_main(mut self, alignment: Alignment) -> Self {
        self.main_alignment = alignment;
        self
    }

    /// Sets the vertical placement of each child.
    #[must_use]
    pub const fn align_cross(mut self, alignment: Alignment) -> Self {
        self.cross_alignment = alignment;
        self
    }

    /// Size of the row: summed widths plus gaps, tallest height.
    #[must_use]
    pub fn measure(&self, sizes: &[(f32, f32)]) -> (f32, f32) {
        #[allow(clippy::cast_precision_loss)]
        let gaps = self.gap * sizes.len().saturating_sub(1) as f32;
        let width = sizes.iter().map(|(w, _)| w).sum::<f32>() + gaps;
        let height = sizes.iter().map(|(_, h)| *h).fold(0.0, f32::max);
        (width, height)
    }

    /// Returns the rectangle of each child inside `bounds`.
    #[must_use]
    pub fn arrange(&self, bounds: Rect, sizes: &[(f32, f32)]) -> Vec<Rect> {
        let (row_width, _) = self.measure(sizes);
        let mut x = match self.main_alignment {
            Alignment::Start => bounds.x,
            Alignment::Center => bounds.x + (bounds.width - row_width) * 0.5,
            Alignment::End => bounds.right() - row_width,
        };

        sizes
            .iter()
            .map(|&(width, height)| {
                let y = match self.cross_alignment {
                    Alignment::Start => bounds.top() - height,
                    Alignment::Center => bounds.y + (bounds.height - height) * 0.5,
                    Alignment::End => bounds.y,
                };
                let rect = Rect::new(x, y, width, height);
                x += width + self.gap;
                rect
            })
            .collect()
    }
}
