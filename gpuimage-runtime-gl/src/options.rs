//! OpenGL filter group configuration options.

use gpuimage_common::{FilterMode, ImageFormat, WrapMode};

/// Options for the intermediate framebuffers of an OpenGL filter group.
#[derive(Default, Debug, Copy, Clone)]
pub struct FilterGroupOptionsGL {
    /// The format of the framebuffer textures. `Unknown` selects RGBA8.
    pub format: ImageFormat,
    /// The filter used when the next pass samples a framebuffer texture.
    pub filter: FilterMode,
    /// The wrap mode used when the next pass samples a framebuffer texture.
    pub wrap_mode: WrapMode,
}
