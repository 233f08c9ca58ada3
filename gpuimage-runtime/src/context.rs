use gpuimage_common::Size;
use std::error::Error;
use std::fmt::Debug;

/// An owned off-screen render target: a framebuffer object with a texture attached.
///
/// Implementations release their GPU resources when dropped.
pub trait OwnedFramebuffer {
    /// The handle type used to bind this framebuffer as a render target.
    type Handle: Copy;
    /// The texture type rendered into by this framebuffer.
    type Texture: Copy;

    /// The handle to bind when rendering into this framebuffer.
    fn handle(&self) -> Self::Handle;

    /// The texture this framebuffer renders into, to be sampled by the next pass.
    fn texture(&self) -> Self::Texture;

    /// The size of the backing texture.
    fn size(&self) -> Size<u32>;
}

/// The graphics API operations a filter group needs to drive a chain of passes.
///
/// All methods must be called on the thread that owns the graphics context.
pub trait RenderContext {
    /// The type of an input texture handle.
    type Texture: Copy + Eq + Debug;
    /// The type of a framebuffer handle that can be bound as a render target.
    type Target: Copy + Eq + Debug;
    /// The owned framebuffer type allocated for intermediate passes.
    type Framebuffer: OwnedFramebuffer<Handle = Self::Target, Texture = Self::Texture>;
    /// The error type for resource allocation failures.
    type Error: Error;

    /// Allocate a framebuffer and its backing texture with the given size.
    fn create_framebuffer(&self, size: Size<u32>) -> Result<Self::Framebuffer, Self::Error>;

    /// Bind the given framebuffer as the render target, or the default
    /// target if `None`.
    fn bind_framebuffer(&self, target: Option<Self::Target>);

    /// Clear the currently bound render target to transparent black.
    fn clear(&self);
}
