use crate::context::RenderContext;
use crate::filter_group::FilterGroup;
use gpuimage_common::Size;

/// A single GPU pass over an input texture.
///
/// A filter renders into whichever framebuffer is bound when [`draw`](ImageFilter::draw)
/// is called. Its lifecycle is `init`, then any number of `on_output_size_changed`
/// and `draw` calls, then `destroy`.
pub trait ImageFilter<C: RenderContext> {
    /// Allocate the GPU resources of this filter.
    fn init(&mut self, ctx: &C) -> Result<(), C::Error>;

    /// Whether `init` has completed and `destroy` has not been called since.
    fn is_initialized(&self) -> bool;

    /// Release the GPU resources of this filter.
    fn destroy(&mut self, ctx: &C);

    /// Notify the filter of the size of the target it will render into.
    fn on_output_size_changed(&mut self, ctx: &C, size: Size<u32>) -> Result<(), C::Error>;

    /// Draw `input` into the currently bound target.
    ///
    /// `geometry` holds the vertex positions and `texture` the sampling
    /// coordinates, both as a 4-vertex triangle strip of `x, y` pairs.
    fn draw(&mut self, ctx: &C, input: C::Texture, geometry: &[f32], texture: &[f32]);

    /// A name for this filter in diagnostics.
    fn label(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// A boxed leaf filter.
pub type BoxedFilter<C> = Box<dyn ImageFilter<C>>;

/// An entry in a filter group: either a single pass or a nested group.
pub enum FilterNode<C: RenderContext> {
    /// A leaf filter.
    Pass(BoxedFilter<C>),
    /// A nested group whose passes are spliced into the parent chain.
    Group(FilterGroup<C>),
}

impl<C: RenderContext> FilterNode<C> {
    /// Wrap a leaf filter.
    pub fn pass(filter: impl ImageFilter<C> + 'static) -> Self {
        FilterNode::Pass(Box::new(filter))
    }

    /// Whether this node is a nested group.
    pub fn is_group(&self) -> bool {
        matches!(self, FilterNode::Group(_))
    }

    /// The nested group, if this node is one.
    pub fn as_group(&self) -> Option<&FilterGroup<C>> {
        match self {
            FilterNode::Group(group) => Some(group),
            FilterNode::Pass(_) => None,
        }
    }

    /// The leaf filter, if this node is one.
    pub fn as_pass(&self) -> Option<&dyn ImageFilter<C>> {
        match self {
            FilterNode::Pass(filter) => Some(filter.as_ref()),
            FilterNode::Group(_) => None,
        }
    }

    /// Draw this node as a single pass into the currently bound target.
    ///
    /// # Panics
    /// Panics if this node is a group. Groups manage their own intermediate
    /// targets and must be drawn with [`FilterGroup::draw`].
    pub fn draw(&mut self, ctx: &C, input: C::Texture, geometry: &[f32], texture: &[f32]) {
        match self {
            FilterNode::Pass(filter) => filter.draw(ctx, input, geometry, texture),
            FilterNode::Group(_) => {
                panic!("a filter group cannot be drawn as a single pass, use FilterGroup::draw")
            }
        }
    }

    /// A name for this node in diagnostics.
    pub fn label(&self) -> &str {
        match self {
            FilterNode::Pass(filter) => filter.label(),
            FilterNode::Group(_) => "FilterGroup",
        }
    }
}

impl<C: RenderContext> From<BoxedFilter<C>> for FilterNode<C> {
    fn from(filter: BoxedFilter<C>) -> Self {
        FilterNode::Pass(filter)
    }
}

impl<C: RenderContext> From<FilterGroup<C>> for FilterNode<C> {
    fn from(group: FilterGroup<C>) -> Self {
        FilterNode::Group(group)
    }
}
