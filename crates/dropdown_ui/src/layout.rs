//! Layout primitives: sizes, bounds, lengths, padding and alignment.

/// A 2D size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    /// Zero size constant.
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// An axis-aligned rectangle in logical pixels, origin at the top-left.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Bounds at the origin with the given size.
    pub fn from_size(size: Size) -> Self {
        Self::new(0.0, 0.0, size.width, size.height)
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Half-open containment: the right and bottom edges belong to the
    /// neighbouring rectangle, so stacked rows never both claim a point.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Move the bounds by the given offset.
    pub fn translate(&self, dx: f32, dy: f32) -> Bounds {
        Bounds::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Overlapping area of two bounds, zero-sized when they do not overlap.
    pub fn intersect(&self, other: &Bounds) -> Bounds {
        let x1 = self.x.max(other.x);
        let y1 = self.y.max(other.y);
        let x2 = self.right().min(other.right());
        let y2 = self.bottom().min(other.bottom());

        Bounds::new(x1, y1, (x2 - x1).max(0.0), (y2 - y1).max(0.0))
    }

    /// Smallest bounds containing both.
    pub fn union(&self, other: &Bounds) -> Bounds {
        let x1 = self.x.min(other.x);
        let y1 = self.y.min(other.y);
        let x2 = self.right().max(other.right());
        let y2 = self.bottom().max(other.bottom());

        Bounds::new(x1, y1, x2 - x1, y2 - y1)
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Defines how a widget's dimension should be sized.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Length {
    /// Fill all available space
    Fill,

    /// Shrink to fit content
    #[default]
    Shrink,

    /// Fixed size in pixels
    Fixed(f32),
}

impl Length {
    /// Resolve the length to a concrete size.
    pub fn resolve(&self, available: f32, intrinsic: f32) -> f32 {
        match self {
            Length::Fill => available,
            Length::Shrink => intrinsic,
            Length::Fixed(px) => *px,
        }
    }
}

impl From<f32> for Length {
    fn from(px: f32) -> Self {
        Length::Fixed(px)
    }
}

/// Padding around a widget's content.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Padding {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Padding {
    pub const ZERO: Self = Self {
        top: 0.0,
        right: 0.0,
        bottom: 0.0,
        left: 0.0,
    };

    pub fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }
}

impl From<f32> for Padding {
    fn from(all: f32) -> Self {
        Self::new(all, all, all, all)
    }
}

/// Cross-axis alignment of a child within its container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Start,
    Center,
    End,
}

impl Alignment {
    /// Offset of a child of size `content` inside a slot of size `available`.
    pub fn align(&self, available: f32, content: f32) -> f32 {
        let slack = (available - content).max(0.0);
        match self {
            Alignment::Start => 0.0,
            Alignment::Center => slack / 2.0,
            Alignment::End => slack,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_is_half_open() {
        let row = Bounds::new(0.0, 0.0, 130.0, 55.0);
        assert!(row.contains(0.0, 0.0));
        assert!(row.contains(129.9, 54.9));
        assert!(!row.contains(130.0, 10.0));
        assert!(!row.contains(10.0, 55.0));

        let next = row.translate(0.0, 55.0);
        assert!(next.contains(10.0, 55.0));
    }

    #[test]
    fn test_intersect_and_union() {
        let a = Bounds::new(0.0, 0.0, 100.0, 100.0);
        let b = Bounds::new(50.0, 80.0, 100.0, 100.0);

        assert_eq!(a.intersect(&b), Bounds::new(50.0, 80.0, 50.0, 20.0));
        assert_eq!(a.union(&b), Bounds::new(0.0, 0.0, 150.0, 180.0));

        let far = Bounds::new(500.0, 500.0, 10.0, 10.0);
        assert!(a.intersect(&far).is_empty());
    }

    #[test]
    fn test_length_resolve() {
        assert_eq!(Length::Fill.resolve(300.0, 20.0), 300.0);
        assert_eq!(Length::Shrink.resolve(300.0, 20.0), 20.0);
        assert_eq!(Length::from(130.0).resolve(300.0, 20.0), 130.0);
    }

    #[test]
    fn test_alignment() {
        assert_eq!(Alignment::Start.align(200.0, 130.0), 0.0);
        assert_eq!(Alignment::Center.align(200.0, 130.0), 35.0);
        assert_eq!(Alignment::End.align(200.0, 130.0), 70.0);
        // Oversized content never gets a negative offset
        assert_eq!(Alignment::Center.align(100.0, 130.0), 0.0);
    }
}
