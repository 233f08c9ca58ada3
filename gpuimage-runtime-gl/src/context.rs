use crate::error::{FilterChainError, Result};
use crate::features::GLFeatures;
use crate::framebuffer::GLFramebuffer;
use crate::options::FilterGroupOptionsGL;
use glow::HasContext;
use gpuimage_common::Size;
use gpuimage_runtime::RenderContext;
use std::num::NonZeroU32;
use std::sync::Arc;

/// A render target: a framebuffer object, or the default framebuffer.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct GLTarget(Option<glow::Framebuffer>);

impl GLTarget {
    /// The default framebuffer, usually the window surface.
    pub const DEFAULT: GLTarget = GLTarget(None);

    /// Target the given framebuffer object.
    pub fn new(framebuffer: glow::Framebuffer) -> Self {
        GLTarget(Some(framebuffer))
    }

    /// The framebuffer object, or `None` for the default framebuffer.
    pub fn framebuffer(&self) -> Option<glow::Framebuffer> {
        self.0
    }
}

/// The OpenGL context a filter group renders with.
///
/// All calls must happen on the thread the context is current on.
pub struct GLContext {
    gl: Arc<glow::Context>,
    options: FilterGroupOptionsGL,
    features: GLFeatures,
}

impl GLContext {
    /// Wrap a loaded `glow` context, reading its version and extensions.
    pub fn new(gl: Arc<glow::Context>, options: Option<&FilterGroupOptionsGL>) -> Self {
        let features = GLFeatures::detect(&gl);
        Self {
            gl,
            options: options.copied().unwrap_or_default(),
            features,
        }
    }

    /// Get the GL context.
    pub fn get_context(&self) -> &Arc<glow::Context> {
        &self.gl
    }

    /// What the context supports.
    pub fn features(&self) -> &GLFeatures {
        &self.features
    }

    /// The framebuffer options in use.
    pub fn options(&self) -> &FilterGroupOptionsGL {
        &self.options
    }

    /// Map a raw texture name to a texture handle.
    ///
    /// Names that are zero or negative are not textures and map to `None`.
    pub fn texture_from_raw(name: i32) -> Option<glow::Texture> {
        u32::try_from(name)
            .ok()
            .and_then(NonZeroU32::new)
            .map(glow::NativeTexture)
    }

    /// Map a raw framebuffer name to a render target.
    ///
    /// `0` is the default framebuffer. Negative names map to `None`, meaning
    /// render into whatever is currently bound.
    pub fn target_from_raw(name: i32) -> Option<GLTarget> {
        let name = u32::try_from(name).ok()?;
        Some(GLTarget(NonZeroU32::new(name).map(glow::NativeFramebuffer)))
    }
}

impl RenderContext for GLContext {
    type Texture = glow::Texture;
    type Target = GLTarget;
    type Framebuffer = GLFramebuffer;
    type Error = FilterChainError;

    fn create_framebuffer(&self, size: Size<u32>) -> Result<GLFramebuffer> {
        GLFramebuffer::new(&self.gl, size, &self.options, &self.features)
    }

    fn bind_framebuffer(&self, target: Option<GLTarget>) {
        unsafe {
            self.gl.bind_framebuffer(
                glow::FRAMEBUFFER,
                target.and_then(|target| target.framebuffer()),
            );
        }
    }

    fn clear(&self) {
        unsafe {
            self.gl.color_mask(true, true, true, true);
            self.gl.clear_color(0.0, 0.0, 0.0, 0.0);
            self.gl.clear(glow::COLOR_BUFFER_BIT);
        }
    }
}
