//! Default value functions for serde deserialization.

pub fn fov_y_degrees() -> f32 {
    60.0
}

pub fn aspect() -> f32 {
    16.0 / 9.0
}

pub fn near() -> f32 {
    0.1
}

pub fn far() -> f32 {
    100.0
}

pub fn ortho_half_extent() -> f32 {
    1.0
}

pub fn eye() -> [f32; 3] {
    [0.0, 0.0, 5.0]
}

pub fn center() -> [f32; 3] {
    [0.0, 0.0, 0.0]
}

pub fn up() -> [f32; 3] {
    [0.0, 1.0, 0.0]
}
