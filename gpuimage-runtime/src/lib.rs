//! Helpers and shared logic for gpuimage runtime implementations.
//!
//! The central type is [`FilterGroup`](crate::filter_group::FilterGroup), which
//! flattens an ordered tree of filters into a linear chain of passes and runs
//! them against an input texture, ping-ponging between two intermediate
//! framebuffers. Backends plug in through [`RenderContext`](crate::context::RenderContext).

/// The graphics API seam driven by filter groups.
pub mod context;

/// Leaf filter interface and filter tree nodes.
pub mod filter;

/// Filter groups.
pub mod filter_group;

/// The alternating framebuffer pair.
pub mod framebuffer;

/// Deferred render-thread work.
pub mod tasks;

#[cfg(test)]
pub(crate) mod mock;

pub use context::{OwnedFramebuffer, RenderContext};
pub use filter::{FilterNode, ImageFilter};
pub use filter_group::FilterGroup;
pub use framebuffer::FramebufferPair;
pub use tasks::PendingTasks;
