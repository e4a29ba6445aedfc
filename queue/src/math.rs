//! Vector math for the play-area checks.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// Rotates a point about the vertical axis through `center` by `yaw_deg`
/// degrees. Y is untouched.
pub fn rotate_around_center(v: Vec3, center: Vec3, yaw_deg: f32) -> Vec3 {
    let (sin, cos) = yaw_deg.to_radians().sin_cos();
    let dx = v.x - center.x;
    let dz = v.z - center.z;
    Vec3 {
        x: center.x + dx * cos + dz * sin,
        y: v.y,
        z: center.z - dx * sin + dz * cos,
    }
}

/// XZ containment between two opposite corners, strict on the boundary.
pub fn is_inside_area(v: Vec3, corner_a: Vec3, corner_b: Vec3) -> bool {
    let (min_x, max_x) = (corner_a.x.min(corner_b.x), corner_a.x.max(corner_b.x));
    let (min_z, max_z) = (corner_a.z.min(corner_b.z), corner_a.z.max(corner_b.z));
    v.x > min_x && v.x < max_x && v.z > min_z && v.z < max_z
}
