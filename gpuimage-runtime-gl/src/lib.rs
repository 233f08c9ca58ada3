//! OpenGL runtime for gpuimage filter groups.
//!
//! Filters run on any context `glow` can load, from OpenGL 2.1 and OpenGL ES 2
//! up. The version and extensions are read once when a [`GLContext`] is
//! created and decide how textures are allocated and how shaders are compiled.
//! A [`GLContext`] wraps the loaded context together with the options used to
//! create intermediate framebuffers, and is passed to every call on a
//! [`FilterGroupGL`].
//!
//! ```no_run
//! # use std::sync::Arc;
//! # fn run(gl: Arc<glow::Context>, camera_texture: i32) -> gpuimage_runtime_gl::error::Result<()> {
//! use gpuimage_common::{coords, Size};
//! use gpuimage_runtime_gl::{FilterGroupGL, GLContext, GLImageFilter};
//!
//! let ctx = GLContext::new(gl, None);
//! let mut group = FilterGroupGL::new();
//! group.add_pass(GLImageFilter::passthrough());
//! group.add_pass(GLImageFilter::passthrough());
//!
//! group.init(&ctx)?;
//! group.on_output_size_changed(&ctx, Size::new(1280, 720))?;
//! group.draw(
//!     &ctx,
//!     GLContext::texture_from_raw(camera_texture),
//!     GLContext::target_from_raw(0),
//!     &coords::CUBE,
//!     &coords::TEXTURE_NO_ROTATION,
//! );
//! group.destroy(&ctx);
//! # Ok(())
//! # }
//! ```
#![deny(unsafe_op_in_unsafe_fn)]

mod context;
mod draw_quad;
mod features;
mod filter;
mod framebuffer;
mod util;

pub mod error;
pub mod options;

pub use context::{GLContext, GLTarget};
pub use features::{GLFeatures, GlslVersion};
pub use filter::{
    GLImageFilter, INPUT_TEXTURE_UNIFORM, NO_FILTER_FRAGMENT_SHADER, NO_FILTER_VERTEX_SHADER,
    OUTPUT_SIZE_UNIFORM, POSITION_ATTRIBUTE, TEXCOORD_ATTRIBUTE,
};
pub use framebuffer::GLFramebuffer;

pub use gpuimage_runtime::{FilterNode, ImageFilter, RenderContext};

/// A filter group driven by an OpenGL context.
pub type FilterGroupGL = gpuimage_runtime::FilterGroup<GLContext>;
