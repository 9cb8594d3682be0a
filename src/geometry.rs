//! Rectangles and the two capabilities every entity shares: exposing its
//! bounding box, and advancing along its straight line of travel.

/// Axis-aligned rectangle in world pixels.  `y` grows downward.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Strict AABB test.  Rectangles that only share an edge do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.x + other.width
            && self.x + self.width > other.x
            && self.y < other.y + other.height
            && self.y + self.height > other.y
    }

    /// True once the rectangle has scrolled a full body-length past `limit`.
    pub fn is_below(&self, limit: f32) -> bool {
        self.y > limit + self.height
    }

    /// True once the rectangle is entirely above the top of the field.
    pub fn is_above_top(&self) -> bool {
        self.y + self.height < 0.0
    }
}

/// Anything with a read-only bounding box.
pub trait Bounded {
    fn bounds(&self) -> Rect;
}

/// Straight-line movers.  Each kind decides its own direction.
pub trait Movable: Bounded {
    fn advance(&mut self, dt: f32);
}

impl Bounded for Rect {
    fn bounds(&self) -> Rect {
        *self
    }
}

pub fn overlaps(a: &impl Bounded, b: &impl Bounded) -> bool {
    a.bounds().overlaps(&b.bounds())
}
