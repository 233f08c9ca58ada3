use crate::context::{OwnedFramebuffer, RenderContext};
use crate::filter::{BoxedFilter, FilterNode, ImageFilter};
use crate::framebuffer::FramebufferPair;
use crate::tasks::PendingTasks;
use gpuimage_common::coords::{texture_coords, CUBE, TEXTURE_NO_ROTATION};
use gpuimage_common::{Rotation, Size};

/// The location of a leaf filter in a tree of filter nodes, one index per level.
#[derive(Debug, Clone, PartialEq, Eq)]
struct PassPath(Box<[usize]>);

impl PassPath {
    fn root(index: usize) -> Self {
        PassPath(Box::new([index]))
    }

    fn nested_in(&self, index: usize) -> Self {
        PassPath(std::iter::once(index).chain(self.0.iter().copied()).collect())
    }
}

fn resolve<'a, C: RenderContext>(
    nodes: &'a [FilterNode<C>],
    path: &[usize],
) -> Option<&'a FilterNode<C>> {
    let (index, rest) = path.split_first()?;
    let node = nodes.get(*index)?;
    if rest.is_empty() {
        return Some(node);
    }
    match node {
        FilterNode::Group(group) => resolve(&group.filters, rest),
        FilterNode::Pass(_) => None,
    }
}

fn resolve_mut<'a, C: RenderContext>(
    nodes: &'a mut [FilterNode<C>],
    path: &[usize],
) -> Option<&'a mut FilterNode<C>> {
    let (index, rest) = path.split_first()?;
    let node = nodes.get_mut(*index)?;
    if rest.is_empty() {
        return Some(node);
    }
    match node {
        FilterNode::Group(group) => resolve_mut(&mut group.filters, rest),
        FilterNode::Pass(_) => None,
    }
}

/// Resolve a merged path to its leaf filter.
fn resolve_pass_mut<'a, C: RenderContext>(
    nodes: &'a mut [FilterNode<C>],
    path: &[usize],
) -> Option<&'a mut BoxedFilter<C>> {
    match resolve_mut(nodes, path)? {
        FilterNode::Pass(filter) => Some(filter),
        FilterNode::Group(_) => None,
    }
}

type DrawTask<C> = Box<dyn FnOnce(&C)>;

/// An ordered group of filters applied to a texture as a chain of passes.
///
/// Nested groups are flattened depth-first into a single linear chain. Every
/// pass but the last renders into one of two intermediate framebuffers, used
/// alternately, and the next pass samples the texture of the framebuffer just
/// rendered. The last pass renders into the caller's target.
pub struct FilterGroup<C: RenderContext> {
    pub(crate) filters: Vec<FilterNode<C>>,
    merged: Vec<PassPath>,
    framebuffers: FramebufferPair<C::Framebuffer>,
    cube: [f32; 8],
    texture: [f32; 8],
    texture_flipped: [f32; 8],
    output_size: Option<Size<u32>>,
    initialized: bool,
    pending: PendingTasks<DrawTask<C>>,
}

impl<C: RenderContext> FilterGroup<C> {
    /// Create an empty filter group.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
            merged: Vec::new(),
            framebuffers: FramebufferPair::new(),
            cube: CUBE,
            texture: TEXTURE_NO_ROTATION,
            texture_flipped: texture_coords(Rotation::Normal, false, true),
            output_size: None,
            initialized: false,
            pending: PendingTasks::new(),
        }
    }

    /// Append a filter node to the end of the group.
    ///
    /// A nested group gives up its intermediate framebuffers and hands its
    /// queued tasks to this group, which draws its passes from then on.
    pub fn add_filter(&mut self, filter: impl Into<FilterNode<C>>) {
        let mut node = filter.into();
        if let FilterNode::Group(group) = &mut node {
            group.framebuffers.release();
            self.pending.append(&mut group.pending);
        }
        self.filters.push(node);
        self.update_merged_filters();
    }

    /// Append a leaf filter to the end of the group.
    pub fn add_pass(&mut self, filter: impl ImageFilter<C> + 'static) {
        self.add_filter(FilterNode::pass(filter))
    }

    /// Append a nested group to the end of the group.
    ///
    /// The passes of the nested group are spliced into this group's chain in place.
    pub fn add_group(&mut self, group: FilterGroup<C>) {
        self.add_filter(FilterNode::Group(group))
    }

    /// Recompute the flattened chain of passes from the filter tree.
    pub fn update_merged_filters(&mut self) {
        self.merged.clear();
        for (index, node) in self.filters.iter_mut().enumerate() {
            match node {
                FilterNode::Pass(_) => self.merged.push(PassPath::root(index)),
                FilterNode::Group(group) => {
                    group.update_merged_filters();
                    self.merged
                        .extend(group.merged.iter().map(|path| path.nested_in(index)));
                }
            }
        }
        log::trace!("filter group flattened to {} passes", self.merged.len());
    }

    /// The filter nodes in the order they were added.
    pub fn filters(&self) -> &[FilterNode<C>] {
        &self.filters
    }

    /// The leaf filters of the flattened chain, in draw order.
    pub fn merged_filters(&self) -> impl Iterator<Item = &dyn ImageFilter<C>> + '_ {
        self.merged
            .iter()
            .filter_map(|path| resolve(&self.filters, &path.0).and_then(FilterNode::as_pass))
    }

    /// The number of passes in the flattened chain.
    pub fn merged_len(&self) -> usize {
        self.merged.len()
    }

    /// Whether `init` has been called since creation or the last `destroy`.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// The size last passed to [`on_output_size_changed`](Self::on_output_size_changed).
    pub fn output_size(&self) -> Option<Size<u32>> {
        self.output_size
    }

    /// The intermediate framebuffers of this group.
    pub fn framebuffers(&self) -> &FramebufferPair<C::Framebuffer> {
        &self.framebuffers
    }

    /// The number of allocated intermediate framebuffers, either 0 or 2.
    pub fn framebuffer_count(&self) -> usize {
        self.framebuffers.len()
    }

    /// Queue a task to run on the render thread at the start of the next draw.
    pub fn run_on_draw(&mut self, task: impl FnOnce(&C) + 'static) {
        self.pending.push(Box::new(task))
    }

    /// Initialize every filter in the chain that is not yet initialized.
    pub fn init(&mut self, ctx: &C) -> Result<(), C::Error> {
        for path in &self.merged {
            let Some(filter) = resolve_pass_mut(&mut self.filters, &path.0) else {
                continue;
            };
            if !filter.is_initialized() {
                filter.init(ctx)?;
            }
        }
        self.initialized = true;
        Ok(())
    }

    /// Resize the chain to render at `size`.
    ///
    /// Releases the intermediate framebuffers, propagates the size to every
    /// pass, then allocates two new framebuffers at `size` if the chain has any
    /// passes.
    pub fn on_output_size_changed(&mut self, ctx: &C, size: Size<u32>) -> Result<(), C::Error> {
        if size.is_empty() {
            log::warn!("filter group resized to an empty output {size:?}");
        }

        self.output_size = Some(size);
        self.framebuffers.release();
        self.update_merged_filters();

        for path in &self.merged {
            if let Some(filter) = resolve_pass_mut(&mut self.filters, &path.0) {
                filter.on_output_size_changed(ctx, size)?;
            }
        }

        if !self.merged.is_empty() {
            self.framebuffers.allocate(ctx, size)?;
            log::debug!(
                "allocated framebuffer pair at {}x{} for {} passes",
                size.width,
                size.height,
                self.merged.len()
            );
        }
        Ok(())
    }

    /// Run the chain of passes over `input`.
    ///
    /// The last pass renders into `output`, which is cleared first. If `output`
    /// is `None` the last pass renders into whatever target is currently bound,
    /// without clearing it. `geometry` and `texture` are the coordinates used
    /// by the first pass.
    ///
    /// Nothing is drawn if the group is not initialized, `input` is `None`, or
    /// the chain needs intermediate framebuffers that have not been allocated.
    pub fn draw(
        &mut self,
        ctx: &C,
        input: Option<C::Texture>,
        output: Option<C::Target>,
        geometry: &[f32],
        texture: &[f32],
    ) {
        for task in self.pending.drain() {
            task(ctx);
        }

        if !self.initialized {
            log::trace!("skipping draw on uninitialized filter group");
            return;
        }

        let Some(input) = input else {
            log::trace!("skipping draw without an input texture");
            return;
        };

        let count = self.merged.len();
        if count > 1 && !self.framebuffers.is_allocated() {
            log::warn!("skipping draw of {count} passes before the output size is known");
            return;
        }

        let mut previous = input;
        for (index, path) in self.merged.iter().enumerate() {
            let Some(filter) = resolve_pass_mut(&mut self.filters, &path.0) else {
                continue;
            };
            let is_last = index == count - 1;

            let intermediate = if is_last {
                None
            } else {
                self.framebuffers.get(index)
            };

            if let Some(framebuffer) = intermediate {
                ctx.bind_framebuffer(Some(framebuffer.handle()));
                ctx.clear();
            } else if let Some(target) = output {
                ctx.bind_framebuffer(Some(target));
                ctx.clear();
            }

            if index == 0 {
                filter.draw(ctx, previous, geometry, texture);
            } else if is_last {
                // each intermediate pass inverts the image vertically
                let coords = if count % 2 == 0 {
                    &self.texture_flipped
                } else {
                    &self.texture
                };
                filter.draw(ctx, previous, &self.cube, coords);
            } else {
                filter.draw(ctx, previous, &self.cube, &self.texture);
            }

            ctx.bind_framebuffer(None);
            if let Some(framebuffer) = intermediate {
                previous = framebuffer.texture();
            }
        }
    }

    /// Release the intermediate framebuffers, then destroy every initialized
    /// filter in the chain.
    pub fn destroy(&mut self, ctx: &C) {
        self.framebuffers.release();
        for path in &self.merged {
            let Some(filter) = resolve_pass_mut(&mut self.filters, &path.0) else {
                continue;
            };
            if filter.is_initialized() {
                filter.destroy(ctx);
            }
        }
        self.pending.clear();
        self.initialized = false;
    }
}

impl<C: RenderContext> Default for FilterGroup<C> {
    fn default() -> Self {
        Self::new()
    }
}
