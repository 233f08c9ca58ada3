use crate::context::GLTarget;
use crate::error::{FilterChainError, Result};
use crate::features::GLFeatures;
use crate::options::FilterGroupOptionsGL;
use glow::HasContext;
use gpuimage_common::{ImageFormat, Size};
use gpuimage_runtime::OwnedFramebuffer;
use std::sync::Arc;

/// An OpenGL framebuffer object with a texture attached as its color target.
///
/// The framebuffer and texture are deleted when this is dropped.
#[derive(Debug)]
pub struct GLFramebuffer {
    pub(crate) image: glow::Texture,
    pub(crate) handle: glow::Framebuffer,
    pub(crate) size: Size<u32>,
    pub(crate) format: u32,
    ctx: Arc<glow::Context>,
}

impl GLFramebuffer {
    pub(crate) fn new(
        ctx: &Arc<glow::Context>,
        size: Size<u32>,
        options: &FilterGroupOptionsGL,
        features: &GLFeatures,
    ) -> Result<GLFramebuffer> {
        let size = size.at_least_one();
        let format = options.format.or_default_format();
        let fallback = features.texture_format(ImageFormat::R8G8B8A8Unorm);

        let (handle, image) = unsafe {
            let handle = ctx.create_framebuffer().map_err(FilterChainError::GlError)?;
            match ctx.create_texture() {
                Ok(image) => (handle, image),
                Err(error) => {
                    ctx.delete_framebuffer(handle);
                    return Err(FilterChainError::GlError(error));
                }
            }
        };

        let mut framebuffer = GLFramebuffer {
            image,
            handle,
            size,
            format: features.texture_format(format),
            ctx: Arc::clone(ctx),
        };

        let mut status = framebuffer.attach_storage(options, features);
        if status == glow::FRAMEBUFFER_UNSUPPORTED && framebuffer.format != fallback {
            log::warn!("unsupported fbo format {format:?}, falling back to RGBA8");
            let image = unsafe { ctx.create_texture().map_err(FilterChainError::GlError)? };
            unsafe { ctx.delete_texture(framebuffer.image) };
            framebuffer.image = image;
            framebuffer.format = fallback;
            status = framebuffer.attach_storage(options, features);
        }

        if status != glow::FRAMEBUFFER_COMPLETE {
            return Err(FilterChainError::FramebufferInit(status));
        }

        log::trace!(
            "created {}x{} framebuffer {:?}",
            size.width,
            size.height,
            framebuffer.handle
        );
        Ok(framebuffer)
    }

    /// Allocate storage for the texture, attach it and return the completeness status.
    fn attach_storage(&self, options: &FilterGroupOptionsGL, features: &GLFeatures) -> u32 {
        let filter = u32::from(options.filter) as i32;
        let wrap = u32::from(features.wrap_mode(options.wrap_mode)) as i32;
        let (width, height) = (self.size.width as i32, self.size.height as i32);

        unsafe {
            let ctx = &self.ctx;
            ctx.bind_texture(glow::TEXTURE_2D, Some(self.image));
            if features.texture_storage {
                ctx.tex_storage_2d(glow::TEXTURE_2D, 1, self.format, width, height);
            } else {
                let (format, ty) = features.pixel_transfer(self.format);
                ctx.tex_image_2d(
                    glow::TEXTURE_2D,
                    0,
                    self.format as i32,
                    width,
                    height,
                    0,
                    format,
                    ty,
                    glow::PixelUnpackData::Slice(None),
                );
            }
            ctx.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MIN_FILTER, filter);
            ctx.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MAG_FILTER, filter);
            ctx.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_S, wrap);
            ctx.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_T, wrap);

            ctx.bind_framebuffer(glow::FRAMEBUFFER, Some(self.handle));
            ctx.framebuffer_texture_2d(
                glow::FRAMEBUFFER,
                glow::COLOR_ATTACHMENT0,
                glow::TEXTURE_2D,
                Some(self.image),
                0,
            );
            let status = ctx.check_framebuffer_status(glow::FRAMEBUFFER);

            ctx.bind_framebuffer(glow::FRAMEBUFFER, None);
            ctx.bind_texture(glow::TEXTURE_2D, None);
            status
        }
    }

    /// The GL internal format of the backing texture.
    pub fn format(&self) -> u32 {
        self.format
    }
}

impl OwnedFramebuffer for GLFramebuffer {
    type Handle = GLTarget;
    type Texture = glow::Texture;

    fn handle(&self) -> GLTarget {
        GLTarget::new(self.handle)
    }

    fn texture(&self) -> glow::Texture {
        self.image
    }

    fn size(&self) -> Size<u32> {
        self.size
    }
}

impl Drop for GLFramebuffer {
    fn drop(&mut self) {
        unsafe {
            self.ctx.delete_framebuffer(self.handle);
            self.ctx.delete_texture(self.image);
        }
    }
}
