//! A recording render context for testing pass orchestration without a GPU.

use crate::context::{OwnedFramebuffer, RenderContext};
use crate::filter::ImageFilter;
use gpuimage_common::Size;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

pub const TEXTURE_OFFSET: u32 = 100;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CreateFramebuffer(u32, Size<u32>),
    ReleaseFramebuffer(u32),
    Bind(Option<u32>),
    Clear,
    Init(&'static str),
    Destroy(&'static str),
    Resize(&'static str, Size<u32>),
    Draw {
        filter: &'static str,
        input: u32,
        geometry: Vec<f32>,
        texture: Vec<f32>,
    },
}

#[derive(Debug, thiserror::Error)]
#[error("out of video memory")]
pub struct OutOfMemory;

type CallLog = Rc<RefCell<Vec<Call>>>;

pub struct MockContext {
    calls: CallLog,
    next_id: Cell<u32>,
    live: Rc<Cell<usize>>,
    allocations_left: Cell<Option<usize>>,
}

impl MockContext {
    pub fn new() -> Self {
        let _ = env_logger::builder().is_test(true).try_init();
        Self {
            calls: Rc::new(RefCell::new(Vec::new())),
            next_id: Cell::new(1),
            live: Rc::new(Cell::new(0)),
            allocations_left: Cell::new(None),
        }
    }

    pub fn filter(&self, name: &'static str) -> MockFilter {
        MockFilter {
            name,
            calls: Rc::clone(&self.calls),
            initialized: false,
            fail_init: false,
        }
    }

    pub fn take_calls(&self) -> Vec<Call> {
        std::mem::take(&mut *self.calls.borrow_mut())
    }

    pub fn live_framebuffers(&self) -> usize {
        self.live.get()
    }

    /// Let `count` more framebuffer allocations succeed, then fail every one after.
    pub fn fail_allocation_after(&self, count: usize) {
        self.allocations_left.set(Some(count))
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call)
    }
}

pub struct MockFramebuffer {
    id: u32,
    size: Size<u32>,
    calls: CallLog,
    live: Rc<Cell<usize>>,
}

impl OwnedFramebuffer for MockFramebuffer {
    type Handle = u32;
    type Texture = u32;

    fn handle(&self) -> u32 {
        self.id
    }

    fn texture(&self) -> u32 {
        self.id + TEXTURE_OFFSET
    }

    fn size(&self) -> Size<u32> {
        self.size
    }
}

impl Drop for MockFramebuffer {
    fn drop(&mut self) {
        self.live.set(self.live.get() - 1);
        self.calls.borrow_mut().push(Call::ReleaseFramebuffer(self.id));
    }
}

impl RenderContext for MockContext {
    type Texture = u32;
    type Target = u32;
    type Framebuffer = MockFramebuffer;
    type Error = OutOfMemory;

    fn create_framebuffer(&self, size: Size<u32>) -> Result<MockFramebuffer, OutOfMemory> {
        match self.allocations_left.get() {
            Some(0) => return Err(OutOfMemory),
            Some(left) => self.allocations_left.set(Some(left - 1)),
            None => {}
        }

        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.live.set(self.live.get() + 1);
        self.record(Call::CreateFramebuffer(id, size));

        Ok(MockFramebuffer {
            id,
            size,
            calls: Rc::clone(&self.calls),
            live: Rc::clone(&self.live),
        })
    }

    fn bind_framebuffer(&self, target: Option<u32>) {
        self.record(Call::Bind(target))
    }

    fn clear(&self) {
        self.record(Call::Clear)
    }
}

pub struct MockFilter {
    name: &'static str,
    calls: CallLog,
    initialized: bool,
    fail_init: bool,
}

impl MockFilter {
    pub fn failing_init(mut self) -> Self {
        self.fail_init = true;
        self
    }
}

impl ImageFilter<MockContext> for MockFilter {
    fn init(&mut self, _ctx: &MockContext) -> Result<(), OutOfMemory> {
        if self.fail_init {
            return Err(OutOfMemory);
        }
        self.initialized = true;
        self.calls.borrow_mut().push(Call::Init(self.name));
        Ok(())
    }

    fn is_initialized(&self) -> bool {
        self.initialized
    }

    fn destroy(&mut self, _ctx: &MockContext) {
        self.initialized = false;
        self.calls.borrow_mut().push(Call::Destroy(self.name));
    }

    fn on_output_size_changed(
        &mut self,
        _ctx: &MockContext,
        size: Size<u32>,
    ) -> Result<(), OutOfMemory> {
        self.calls.borrow_mut().push(Call::Resize(self.name, size));
        Ok(())
    }

    fn draw(&mut self, _ctx: &MockContext, input: u32, geometry: &[f32], texture: &[f32]) {
        self.calls.borrow_mut().push(Call::Draw {
            filter: self.name,
            input,
            geometry: geometry.to_vec(),
            texture: texture.to_vec(),
        });
    }

    fn label(&self) -> &str {
        self.name
    }
}
