use crate::context::{OwnedFramebuffer, RenderContext};
use gpuimage_common::Size;

/// Two intermediate render targets used alternately between adjacent passes.
///
/// The pair is either empty or holds exactly two framebuffers of the same size.
pub struct FramebufferPair<F> {
    framebuffers: Option<[F; 2]>,
}

impl<F: OwnedFramebuffer> FramebufferPair<F> {
    /// Create an empty pair.
    pub fn new() -> Self {
        Self { framebuffers: None }
    }

    /// Release the current framebuffers and allocate two new ones at `size`.
    ///
    /// If either allocation fails, the pair is left empty and the error is returned.
    pub fn allocate<C>(&mut self, ctx: &C, size: Size<u32>) -> Result<(), C::Error>
    where
        C: RenderContext<Framebuffer = F>,
    {
        self.release();
        let framebuffers: [F; 2] = array_init::try_array_init(|_| ctx.create_framebuffer(size))?;
        self.framebuffers = Some(framebuffers);
        Ok(())
    }

    /// Release both framebuffers, if allocated.
    pub fn release(&mut self) {
        if let Some(framebuffers) = self.framebuffers.take() {
            log::debug!("releasing framebuffer pair at {:?}", framebuffers[0].size());
        }
    }

    /// The framebuffer that pass `index` renders into.
    pub fn get(&self, index: usize) -> Option<&F> {
        self.framebuffers
            .as_ref()
            .map(|framebuffers| &framebuffers[index % 2])
    }

    /// Whether the pair is allocated.
    pub fn is_allocated(&self) -> bool {
        self.framebuffers.is_some()
    }

    /// The number of allocated framebuffers, either 0 or 2.
    pub fn len(&self) -> usize {
        self.framebuffers.as_ref().map_or(0, |framebuffers| framebuffers.len())
    }

    /// Whether no framebuffers are allocated.
    pub fn is_empty(&self) -> bool {
        self.framebuffers.is_none()
    }

    /// Iterate over the allocated framebuffers.
    pub fn iter(&self) -> impl Iterator<Item = &F> {
        self.framebuffers.iter().flatten()
    }
}

impl<F: OwnedFramebuffer> Default for FramebufferPair<F> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::mock::{Call, MockContext};

    #[test]
    pub fn allocates_two_and_alternates() {
        let ctx = MockContext::new();
        let mut pair = FramebufferPair::new();
        assert_eq!(pair.len(), 0);

        pair.allocate(&ctx, Size::new(640, 480)).unwrap();
        assert_eq!(pair.len(), 2);
        assert!(pair.iter().all(|fb| fb.size() == Size::new(640, 480)));

        let first = pair.get(0).unwrap().handle();
        let second = pair.get(1).unwrap().handle();
        assert_ne!(first, second);
        assert_eq!(pair.get(2).unwrap().handle(), first);
        assert_eq!(pair.get(5).unwrap().handle(), second);
    }

    #[test]
    pub fn reallocation_releases_previous() {
        let ctx = MockContext::new();
        let mut pair = FramebufferPair::new();
        pair.allocate(&ctx, Size::new(4, 4)).unwrap();
        pair.allocate(&ctx, Size::new(4, 4)).unwrap();

        assert_eq!(
            ctx.take_calls(),
            vec![
                Call::CreateFramebuffer(1, Size::new(4, 4)),
                Call::CreateFramebuffer(2, Size::new(4, 4)),
                Call::ReleaseFramebuffer(1),
                Call::ReleaseFramebuffer(2),
                Call::CreateFramebuffer(3, Size::new(4, 4)),
                Call::CreateFramebuffer(4, Size::new(4, 4)),
            ]
        );
        assert_eq!(ctx.live_framebuffers(), 2);
    }

    #[test]
    pub fn failed_allocation_leaves_pair_empty() {
        let ctx = MockContext::new();
        let mut pair = FramebufferPair::new();
        pair.allocate(&ctx, Size::new(8, 8)).unwrap();

        ctx.fail_allocation_after(1);
        assert!(pair.allocate(&ctx, Size::new(16, 16)).is_err());
        assert!(pair.is_empty());
        assert!(pair.get(0).is_none());
        assert_eq!(ctx.live_framebuffers(), 0);
    }
}
