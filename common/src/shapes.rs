use rand::Rng;

/// Circle on the x/z ground plane.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Circle {
    pub x: f32,
    pub z: f32,
    pub radius: f32,
}

impl Circle {
    pub fn new(x: f32, z: f32, radius: f32) -> Self {
        Self { x, z, radius }
    }
}

/// Axis-aligned rectangle on the x/z ground plane, stored by its center.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Rectangle {
    pub x: f32,
    pub z: f32,
    pub width: f32,
    pub height: f32,
}

impl Rectangle {
    pub fn new(x: f32, z: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            z,
            width,
            height,
        }
    }

    /// Builds a rectangle from its minimum corner.
    pub fn from_origin(x_origin: f32, z_origin: f32, width: f32, height: f32) -> Self {
        Self {
            x: x_origin + width / 2.0,
            z: z_origin + height / 2.0,
            width,
            height,
        }
    }

    pub fn half_width(&self) -> f32 {
        self.width / 2.0
    }

    pub fn half_height(&self) -> f32 {
        self.height / 2.0
    }

    pub fn min_x(&self) -> f32 {
        self.x - self.width / 2.0
    }

    pub fn max_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    pub fn min_z(&self) -> f32 {
        self.z - self.height / 2.0
    }

    pub fn max_z(&self) -> f32 {
        self.z + self.height / 2.0
    }

    pub fn origin(&self) -> (f32, f32) {
        (self.min_x(), self.min_z())
    }

    pub fn contains_point(&self, x: f32, z: f32) -> bool {
        x >= self.min_x() && x <= self.max_x() && z >= self.min_z() && z <= self.max_z()
    }

    /// Like `contains_point`, but points on the border are outside.
    pub fn strictly_contains_point(&self, x: f32, z: f32) -> bool {
        x > self.min_x() && x < self.max_x() && z > self.min_z() && z < self.max_z()
    }

    pub fn distance_sq_to_point(&self, x: f32, z: f32) -> f32 {
        let dx = (x - self.x).abs() - self.width / 2.0;
        let dz = (z - self.z).abs() - self.height / 2.0;
        f32::max(dx, 0.0).powi(2) + f32::max(dz, 0.0).powi(2)
    }

    pub fn intersects_circle(&self, circle: &Circle) -> bool {
        let dx = (circle.x - self.x).abs();
        let dz = (circle.z - self.z).abs();
        let half_width = self.width / 2.0;
        let half_height = self.height / 2.0;
        if dx > half_width + circle.radius || dz > half_height + circle.radius {
            return false;
        }
        if dx <= half_width || dz <= half_height {
            return true;
        }
        let corner_distance_sq = (dx - half_width).powi(2) + (dz - half_height).powi(2);
        corner_distance_sq <= circle.radius.powi(2)
    }

    /// Uniformly random point whose offset from the center is at most `ratio`
    /// of the half-extent on each axis. An axis whose offset would round onto
    /// or past the border falls back to the center, so for `ratio < 1` the
    /// point stays strictly inside whenever the center does.
    pub fn random_point_within<R: Rng + ?Sized>(&self, ratio: f32, rng: &mut R) -> (f32, f32) {
        let mut x = self.x + Self::_safe_randf32(rng, self.half_width() * ratio);
        let mut z = self.z + Self::_safe_randf32(rng, self.half_height() * ratio);
        if !(x > self.min_x() && x < self.max_x()) {
            x = self.x;
        }
        if !(z > self.min_z() && z < self.max_z()) {
            z = self.z;
        }
        (x, z)
    }

    fn _safe_randf32<R: Rng + ?Sized>(rng: &mut R, max: f32) -> f32 {
        if max <= 0.0 {
            return 0.0;
        }
        rng.gen_range(-max..=max)
    }
}
