/// A point in diagram coordinates (y grows downwards).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Axis-aligned rectangle in diagram coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn top_center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y)
    }

    pub fn bottom_center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.bottom())
    }

    pub fn right_center(&self) -> Point {
        Point::new(self.right(), self.y + self.height / 2.0)
    }

    pub fn top_left(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Inclusive on all edges.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }

    /// True when `p` falls inside the ellipse inscribed in these bounds.
    pub fn ellipse_contains(&self, p: Point) -> bool {
        let rx = self.width / 2.0;
        let ry = self.height / 2.0;
        if rx <= 0.0 || ry <= 0.0 {
            return false;
        }
        let c = self.center();
        let nx = (p.x - c.x) / rx;
        let ny = (p.y - c.y) / ry;
        nx * nx + ny * ny <= 1.0
    }

    pub fn union(&self, other: &Bounds) -> Bounds {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Bounds::new(x, y, right - x, bottom - y)
    }

    /// Grows the rectangle by `margin` on every side.
    pub fn expand(&self, margin: f32) -> Bounds {
        Bounds::new(
            self.x - margin,
            self.y - margin,
            self.width + 2.0 * margin,
            self.height + 2.0 * margin,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_union_and_expand() {
        let a = Bounds::new(200.0, 600.0, 150.0, 80.0);
        let b = Bounds::new(1000.0, 600.0, 150.0, 80.0);
        let group = a.union(&b).expand(20.0);
        assert_eq!(group, Bounds::new(180.0, 580.0, 990.0, 120.0));
    }

    #[test]
    fn test_ellipse_contains() {
        let node = Bounds::new(250.0, 375.0, 50.0, 50.0);
        assert!(node.ellipse_contains(Point::new(275.0, 400.0)));
        assert!(node.ellipse_contains(Point::new(299.0, 400.0)));
        // corner of the bounding box is outside the circle
        assert!(!node.ellipse_contains(Point::new(251.0, 376.0)));
        assert!(node.contains(Point::new(251.0, 376.0)));
    }
}
