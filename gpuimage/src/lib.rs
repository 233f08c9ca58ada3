#![forbid(missing_docs)]
//! Composable multi-pass GPU image filters.
//!
//! A [`FilterGroup`](crate::runtime::FilterGroup) is an ordered list of filters that
//! behaves as a single filter. Groups may be nested; before drawing, the tree is
//! flattened into one chain of passes. Every pass but the last renders into one of
//! two alternating off-screen framebuffers, and the last pass renders into the
//! caller's target.
//!
//! ## Runtimes
//!
//! | **API**        | **Status** | **`gpuimage` feature** |
//! |----------------|------------|------------------------|
//! | OpenGL 2.1+    | ✔         | `gl`                   |
//! | OpenGL ES 2/3  | ✔         | `gl`                   |
//!
//! Other graphics APIs can drive a group by implementing
//! [`RenderContext`](crate::runtime::RenderContext).

/// Texture coordinate tables for the fixed quad every pass draws.
pub mod coords {
    pub use gpuimage_common::coords::*;
}

#[cfg(feature = "runtime")]
/// Filter groups and the interfaces a graphics backend implements.
pub mod runtime {
    pub use gpuimage_runtime::context::{OwnedFramebuffer, RenderContext};
    pub use gpuimage_runtime::filter::{BoxedFilter, FilterNode, ImageFilter};
    pub use gpuimage_runtime::filter_group::FilterGroup;
    pub use gpuimage_runtime::framebuffer::FramebufferPair;
    pub use gpuimage_runtime::tasks::PendingTasks;

    #[cfg(feature = "gl")]
    /// Filter runtime for OpenGL 2.1+ and OpenGL ES 2/3.
    ///
    /// The OpenGL runtime requires a [`glow::Context`](https://docs.rs/glow/latest/glow/struct.Context.html)
    /// that is current on the calling thread.
    pub mod gl {
        pub use gpuimage_runtime_gl::*;
    }
}

pub use gpuimage_common::{FilterMode, ImageFormat, Rotation, Size, WrapMode};
