use super::{Point, Rect};

/// An `Expanse` is a rectangle that has a width and height but no location.
/// Useful when we want to deal with `Rect`s abstractly, or to mandate that
/// the location of a `Rect` is (0, 0).
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default)]
pub struct Expanse {
    /// Width in cells.
    pub w: i32,
    /// Height in cells.
    pub h: i32,
}

impl Expanse {
    /// Construct a new expanse.
    pub fn new(w: i32, h: i32) -> Self {
        Self { w, h }
    }

    /// The cell count of this expanse. Non-positive dimensions count as zero.
    pub fn area(&self) -> usize {
        self.w.max(0) as usize * self.h.max(0) as usize
    }

    /// Return a `Rect` with the same dimensions, located at (0, 0).
    pub fn rect(&self) -> Rect {
        Rect {
            tl: Point::default(),
            w: self.w,
            h: self.h,
        }
    }

    /// True if this expanse can completely enclose the target in both
    /// dimensions.
    pub fn contains(&self, other: &Self) -> bool {
        self.w >= other.w && self.h >= other.h
    }
}

impl From<Rect> for Expanse {
    fn from(r: Rect) -> Self {
        Self { w: r.w, h: r.h }
    }
}

impl From<(i32, i32)> for Expanse {
    fn from(v: (i32, i32)) -> Self {
        Self { w: v.0, h: v.1 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn area() {
        assert_eq!(Expanse::new(4, 3).area(), 12);
        assert_eq!(Expanse::new(-4, 3).area(), 0);
        assert_eq!(Expanse::new(4, 0).area(), 0);
    }

    #[test]
    fn contains() {
        assert!(Expanse::new(10, 10).contains(&Expanse::new(10, 4)));
        assert!(!Expanse::new(10, 10).contains(&Expanse::new(11, 4)));
    }
}
