//! Common types shared between the gpuimage runtime and its backends.
#![forbid(missing_docs)]

/// OpenGL common conversions.
#[cfg(feature = "opengl")]
pub mod gl;

/// Fixed vertex and texture coordinate tables.
pub mod coords;

use num_traits::AsPrimitive;

/// Supported image formats for intermediate framebuffers.
#[repr(u32)]
#[derive(Default, Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ImageFormat {
    /// Use the default format.
    #[default]
    Unknown = 0,
    /// 8-bit RGBA, normalized.
    R8G8B8A8Unorm,
    /// 8-bit RGBA, sRGB encoded.
    R8G8B8A8Srgb,
    /// 16-bit float RGBA.
    R16G16B16A16Sfloat,
    /// 32-bit float RGBA.
    R32G32B32A32Sfloat,
}

impl ImageFormat {
    /// Resolve `Unknown` to the format framebuffers are created with by default.
    pub fn or_default_format(self) -> ImageFormat {
        if self == ImageFormat::Unknown {
            ImageFormat::R8G8B8A8Unorm
        } else {
            self
        }
    }
}

/// The filtering mode for a texture sampler.
#[repr(i32)]
#[derive(Copy, Clone, Default, Debug, Eq, PartialEq, Hash)]
pub enum FilterMode {
    /// Linear filtering.
    #[default]
    Linear = 0,
    /// Nearest-neighbour (point) filtering.
    Nearest,
}

/// The wrapping (address) mode for a texture sampler.
#[repr(i32)]
#[derive(Copy, Clone, Default, Debug, Eq, PartialEq, Hash)]
pub enum WrapMode {
    /// Clamp texture to border.
    ClampToBorder = 0,
    /// Clamp texture to edge.
    #[default]
    ClampToEdge,
    /// Repeat addressing mode.
    Repeat,
    /// Mirrored repeat addressing mode.
    MirroredRepeat,
}

/// The clockwise rotation applied when sampling a source frame.
#[derive(Copy, Clone, Default, Debug, Eq, PartialEq, Hash)]
pub enum Rotation {
    /// No rotation.
    #[default]
    Normal,
    /// Rotated by 90 degrees.
    Rotation90,
    /// Rotated by 180 degrees.
    Rotation180,
    /// Rotated by 270 degrees.
    Rotation270,
}

impl Rotation {
    /// Get the rotation for an angle in degrees.
    ///
    /// Negative angles and angles over a full turn are normalized.
    /// Returns `None` if the angle is not a multiple of 90.
    pub fn from_degrees(degrees: i32) -> Option<Rotation> {
        match degrees.rem_euclid(360) {
            0 => Some(Rotation::Normal),
            90 => Some(Rotation::Rotation90),
            180 => Some(Rotation::Rotation180),
            270 => Some(Rotation::Rotation270),
            _ => None,
        }
    }

    /// The rotation as an angle in degrees.
    pub fn as_degrees(self) -> u32 {
        match self {
            Rotation::Normal => 0,
            Rotation::Rotation90 => 90,
            Rotation::Rotation180 => 180,
            Rotation::Rotation270 => 270,
        }
    }
}

/// A size with a width and height.
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Size<T> {
    /// The width.
    pub width: T,
    /// The height.
    pub height: T,
}

impl<T> Size<T> {
    /// Create a new `Size<T>` with the given width and height.
    pub fn new(width: T, height: T) -> Self {
        Size { width, height }
    }
}

impl Size<u32> {
    /// Whether either dimension is zero.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// The size with each zero dimension raised to 1.
    pub fn at_least_one(self) -> Size<u32> {
        Size {
            width: self.width.max(1),
            height: self.height.max(1),
        }
    }
}

impl<T> From<Size<T>> for [f32; 4]
where
    T: Copy + AsPrimitive<f32>,
{
    /// Output as `[width, height, 1/width, 1/height]`.
    fn from(value: Size<T>) -> Self {
        [
            value.width.as_(),
            value.height.as_(),
            1.0 / value.width.as_(),
            1.0 / value.height.as_(),
        ]
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    pub fn rotation_from_degrees() {
        assert_eq!(Rotation::from_degrees(0), Some(Rotation::Normal));
        assert_eq!(Rotation::from_degrees(450), Some(Rotation::Rotation90));
        assert_eq!(Rotation::from_degrees(-90), Some(Rotation::Rotation270));
        assert_eq!(Rotation::from_degrees(45), None);
        assert_eq!(Rotation::Rotation180.as_degrees(), 180);
    }

    #[test]
    pub fn size_uniform() {
        let size: [f32; 4] = Size::new(640u32, 480u32).into();
        assert_eq!(size, [640.0, 480.0, 1.0 / 640.0, 1.0 / 480.0]);
    }

    #[test]
    pub fn size_clamps_to_one() {
        let size = Size::new(0u32, 720u32);
        assert!(size.is_empty());
        assert_eq!(size.at_least_one(), Size::new(1, 720));
    }

    #[test]
    pub fn unknown_format_resolves() {
        assert_eq!(
            ImageFormat::Unknown.or_default_format(),
            ImageFormat::R8G8B8A8Unorm
        );
        assert_eq!(
            ImageFormat::R16G16B16A16Sfloat.or_default_format(),
            ImageFormat::R16G16B16A16Sfloat
        );
    }
}
