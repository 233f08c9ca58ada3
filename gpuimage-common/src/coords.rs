use crate::Rotation;

/// The default full-viewport quad, as a triangle strip of `x, y` pairs.
#[rustfmt::skip]
pub static CUBE: [f32; 8] = [
    -1.0, -1.0,
     1.0, -1.0,
    -1.0,  1.0,
     1.0,  1.0,
];

/// Texture coordinates sampling the source unrotated.
#[rustfmt::skip]
pub static TEXTURE_NO_ROTATION: [f32; 8] = [
    0.0, 0.0,
    1.0, 0.0,
    0.0, 1.0,
    1.0, 1.0,
];

/// Texture coordinates sampling the source rotated by 90 degrees.
#[rustfmt::skip]
pub static TEXTURE_ROTATED_90: [f32; 8] = [
    1.0, 0.0,
    1.0, 1.0,
    0.0, 0.0,
    0.0, 1.0,
];

/// Texture coordinates sampling the source rotated by 180 degrees.
#[rustfmt::skip]
pub static TEXTURE_ROTATED_180: [f32; 8] = [
    1.0, 1.0,
    0.0, 1.0,
    1.0, 0.0,
    0.0, 0.0,
];

/// Texture coordinates sampling the source rotated by 270 degrees.
#[rustfmt::skip]
pub static TEXTURE_ROTATED_270: [f32; 8] = [
    0.0, 1.0,
    0.0, 0.0,
    1.0, 1.0,
    1.0, 0.0,
];

#[inline(always)]
fn flip(coord: f32) -> f32 {
    if coord == 0.0 {
        1.0
    } else {
        0.0
    }
}

/// Get the texture coordinates for the given rotation, optionally mirrored.
///
/// Mirroring is applied after rotation: `flip_horizontal` mirrors every `x`,
/// `flip_vertical` mirrors every `y`.
pub fn texture_coords(rotation: Rotation, flip_horizontal: bool, flip_vertical: bool) -> [f32; 8] {
    let mut coords = match rotation {
        Rotation::Normal => TEXTURE_NO_ROTATION,
        Rotation::Rotation90 => TEXTURE_ROTATED_90,
        Rotation::Rotation180 => TEXTURE_ROTATED_180,
        Rotation::Rotation270 => TEXTURE_ROTATED_270,
    };

    for vertex in coords.chunks_exact_mut(2) {
        if flip_horizontal {
            vertex[0] = flip(vertex[0]);
        }
        if flip_vertical {
            vertex[1] = flip(vertex[1]);
        }
    }

    coords
}
