//! Geometric primitives.

/// A rectangle in cell coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle at the origin with the given size.
    #[inline]
    pub const fn from_size(width: u16, height: u16) -> Self {
        Self::new(0, 0, width, height)
    }

    #[inline]
    pub const fn left(&self) -> u16 {
        self.x
    }

    #[inline]
    pub const fn top(&self) -> u16 {
        self.y
    }

    /// Exclusive right edge.
    #[inline]
    pub const fn right(&self) -> u16 {
        self.x.saturating_add(self.width)
    }

    /// Exclusive bottom edge.
    #[inline]
    pub const fn bottom(&self) -> u16 {
        self.y.saturating_add(self.height)
    }

    #[inline]
    pub const fn area(&self) -> u32 {
        (self.width as u32) * (self.height as u32)
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    #[inline]
    pub const fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Overlapping region of two rectangles (empty if disjoint).
    #[must_use]
    pub fn intersection(&self, other: &Rect) -> Rect {
        let x1 = self.x.max(other.x);
        let y1 = self.y.max(other.y);
        let x2 = self.right().min(other.right());
        let y2 = self.bottom().min(other.bottom());
        if x1 >= x2 || y1 >= y2 {
            return Rect::new(x1, y1, 0, 0);
        }
        Rect::new(x1, y1, x2 - x1, y2 - y1)
    }

    /// Shrink by the given amounts on each side.
    #[must_use]
    pub fn inner(&self, margin: Sides) -> Rect {
        let x = self.x.saturating_add(margin.left);
        let y = self.y.saturating_add(margin.top);
        let width = self
            .width
            .saturating_sub(margin.left)
            .saturating_sub(margin.right);
        let height = self
            .height
            .saturating_sub(margin.top)
            .saturating_sub(margin.bottom);
        Rect::new(x, y, width, height)
    }

    /// A rect of `width` x `height` centered horizontally in `self`, starting at `y`.
    #[must_use]
    pub fn centered_row(&self, y: u16, width: u16, height: u16) -> Rect {
        let width = width.min(self.width);
        let x = self.x + (self.width - width) / 2;
        Rect::new(x, y, width, height).intersection(self)
    }
}

/// Per-side cell counts, used for border thickness and margins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Sides {
    pub top: u16,
    pub right: u16,
    pub bottom: u16,
    pub left: u16,
}

impl Sides {
    pub const fn all(value: u16) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    #[inline]
    pub const fn horizontal_sum(&self) -> u16 {
        self.left.saturating_add(self.right)
    }

    #[inline]
    pub const fn vertical_sum(&self) -> u16 {
        self.top.saturating_add(self.bottom)
    }
}

/// A width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Size {
    pub width: u16,
    pub height: u16,
}

impl Size {
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_and_area() {
        let r = Rect::new(2, 3, 10, 4);
        assert_eq!(r.right(), 12);
        assert_eq!(r.bottom(), 7);
        assert_eq!(r.area(), 40);
        assert!(r.contains(2, 3));
        assert!(!r.contains(12, 3));
        assert!(Rect::new(0, 0, 0, 5).is_empty());
    }

    #[test]
    fn intersection_disjoint_is_empty() {
        let a = Rect::new(0, 0, 5, 5);
        let b = Rect::new(10, 10, 2, 2);
        assert!(a.intersection(&b).is_empty());
        assert_eq!(
            a.intersection(&Rect::new(3, 3, 5, 5)),
            Rect::new(3, 3, 2, 2)
        );
    }

    #[test]
    fn inner_saturates() {
        let r = Rect::new(0, 0, 10, 3);
        assert_eq!(r.inner(Sides::all(1)), Rect::new(1, 1, 8, 1));
        assert_eq!(r.inner(Sides::all(5)), Rect::new(5, 5, 0, 0));
    }

    #[test]
    fn centered_row_clamps_to_parent() {
        let parent = Rect::new(0, 0, 40, 10);
        assert_eq!(parent.centered_row(2, 10, 3), Rect::new(15, 2, 10, 3));
        assert_eq!(parent.centered_row(0, 60, 1), Rect::new(0, 0, 40, 1));
    }
}
