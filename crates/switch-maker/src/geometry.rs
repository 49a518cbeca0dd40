//! Plane geometry for footprint construction.
//!
//! Coordinates are millimetres in KiCad's footprint frame: x to the right,
//! y pointing down. Angles are degrees, positive counter-clockwise on screen.

pub type Point = [f64; 2];

/// Euclidean distance between two points.
pub fn distance(a: Point, b: Point) -> f64 {
    (a[0] - b[0]).hypot(a[1] - b[1])
}

pub fn midpoint(a: Point, b: Point) -> Point {
    [(a[0] + b[0]) / 2.0, (a[1] + b[1]) / 2.0]
}

/// Angle of the line from `b` to `a`, as `atan2(dx, dy)` in degrees.
///
/// The arguments are swapped relative to the usual `atan2(dy, dx)`: the
/// result is measured from the y axis, which is the long axis of a pad whose
/// size is given as `(width, length)`. Rotating such a pad by this angle lays
/// its long axis along the line joining the two points.
pub fn angle_deg(a: Point, b: Point) -> f64 {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    dx.atan2(dy).to_degrees()
}

/// Rotate a local point by `angle_deg` and translate it to `origin`.
pub fn rotate_and_translate(local: Point, origin: Point, angle_deg: f64) -> Point {
    if angle_deg == 0.0 {
        return [local[0] + origin[0], local[1] + origin[1]];
    }
    let angle_rad = (-angle_deg).to_radians();
    let cos_a = angle_rad.cos();
    let sin_a = angle_rad.sin();
    let rx = local[0] * cos_a - local[1] * sin_a;
    let ry = local[0] * sin_a + local[1] * cos_a;
    [rx + origin[0], ry + origin[1]]
}

/// A drilled slot that covers two pin positions with one plated oval pad.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OvalPad {
    /// Pad anchor, the first of the two pin positions.
    pub at: Point,
    /// Rotation in degrees.
    pub angle: f64,
    /// Copper size as `(width, length)` before rotation.
    pub size: [f64; 2],
    /// Slot size as `(width, length)` before rotation.
    pub drill: [f64; 2],
    /// Shape offset from the anchor, in the pad's local frame.
    pub offset: Point,
}

impl OvalPad {
    /// Build the slot joining `first` and `second`.
    ///
    /// The pad is anchored at `first` and its shape is pushed back by half
    /// the pin distance along the local y axis, which puts the centre of the
    /// oval on the midpoint of the two pins.
    pub fn between(first: Point, second: Point, pad_diameter: f64, drill_diameter: f64) -> Self {
        let dist = distance(first, second);
        Self {
            at: first,
            angle: angle_deg(first, second),
            size: [pad_diameter, dist + pad_diameter],
            drill: [drill_diameter, dist + drill_diameter],
            offset: [0.0, -dist / 2.0],
        }
    }

    /// Centre of the copper oval in footprint coordinates.
    pub fn shape_center(&self) -> Point {
        rotate_and_translate(self.offset, self.at, self.angle)
    }

    /// Length of the long axis of the copper.
    pub fn length(&self) -> f64 {
        self.size[1]
    }

    /// The two points at the ends of the slot's straight section.
    pub fn endpoints(&self) -> (Point, Point) {
        let half = self.offset[1].abs();
        let center = self.shape_center();
        let a = rotate_and_translate([0.0, half], center, self.angle);
        let b = rotate_and_translate([0.0, -half], center, self.angle);
        (a, b)
    }
}
