use crate::context::GLContext;
use crate::draw_quad::{DrawQuad, POSITION_LOCATION, TEXCOORD_LOCATION};
use crate::error::Result;
use crate::util;
use glow::HasContext;
use gpuimage_common::Size;
use gpuimage_runtime::{ImageFilter, PendingTasks};
use std::borrow::Cow;

/// Vertex attribute receiving the geometry coordinates.
pub const POSITION_ATTRIBUTE: &str = "position";
/// Vertex attribute receiving the texture coordinates.
pub const TEXCOORD_ATTRIBUTE: &str = "inputTextureCoordinate";
/// Sampler uniform bound to the input texture.
pub const INPUT_TEXTURE_UNIFORM: &str = "inputImageTexture";
/// Optional `vec4` uniform receiving `[w, h, 1/w, 1/h]` of the output.
pub const OUTPUT_SIZE_UNIFORM: &str = "outputSize";

/// Vertex shader that passes coordinates through unchanged.
pub const NO_FILTER_VERTEX_SHADER: &str = "\
attribute vec4 position;
attribute vec4 inputTextureCoordinate;

varying vec2 textureCoordinate;

void main()
{
    gl_Position = position;
    textureCoordinate = inputTextureCoordinate.xy;
}
";

/// Fragment shader that samples the input texture unchanged.
pub const NO_FILTER_FRAGMENT_SHADER: &str = "\
varying highp vec2 textureCoordinate;

uniform sampler2D inputImageTexture;

void main()
{
    gl_FragColor = texture2D(inputImageTexture, textureCoordinate);
}
";

type ProgramTask = Box<dyn FnOnce(&glow::Context, glow::Program)>;

struct LinkedProgram {
    program: glow::Program,
    input_texture: Option<glow::UniformLocation>,
    output_size: Option<glow::UniformLocation>,
    quad: DrawQuad,
}

/// A single pass that runs a vertex and fragment shader over its input texture.
///
/// Shaders receive the geometry in `position`, the sampling coordinates in
/// `inputTextureCoordinate` and the input texture in `inputImageTexture`.
///
/// Sources are written in GLSL ES 1.00 style without a `#version` line. On
/// `init` they get the directive and definitions the context needs, see
/// [`GLFeatures::shader_source`](crate::GLFeatures::shader_source). Sources
/// with their own `#version` are compiled as given.
pub struct GLImageFilter {
    vertex: Cow<'static, str>,
    fragment: Cow<'static, str>,
    label: Cow<'static, str>,
    program: Option<LinkedProgram>,
    output_size: Size<u32>,
    pending: PendingTasks<ProgramTask>,
}

impl GLImageFilter {
    /// Create a filter from shader sources. Nothing is compiled until `init`.
    pub fn new(
        vertex: impl Into<Cow<'static, str>>,
        fragment: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            vertex: vertex.into(),
            fragment: fragment.into(),
            label: Cow::Borrowed("GLImageFilter"),
            program: None,
            output_size: Size::default(),
            pending: PendingTasks::new(),
        }
    }

    /// A filter that copies its input unchanged.
    pub fn passthrough() -> Self {
        Self::new(NO_FILTER_VERTEX_SHADER, NO_FILTER_FRAGMENT_SHADER)
    }

    /// Set the name reported in diagnostics.
    pub fn with_label(mut self, label: impl Into<Cow<'static, str>>) -> Self {
        self.label = label.into();
        self
    }

    /// The linked program, if initialized.
    pub fn program(&self) -> Option<glow::Program> {
        self.program.as_ref().map(|linked| linked.program)
    }

    /// The size most recently passed to `on_output_size_changed`.
    pub fn output_size(&self) -> Size<u32> {
        self.output_size
    }

    /// Queue work to run with the program in use at the start of the next draw.
    pub fn run_on_draw(&mut self, task: impl FnOnce(&glow::Context, glow::Program) + 'static) {
        self.pending.push(Box::new(task));
    }

    pub fn set_float(&mut self, name: &str, value: f32) {
        let name = name.to_owned();
        self.run_on_draw(move |gl, program| unsafe {
            let location = gl.get_uniform_location(program, &name);
            gl.uniform_1_f32(location.as_ref(), value);
        });
    }

    pub fn set_vec2(&mut self, name: &str, value: [f32; 2]) {
        let name = name.to_owned();
        self.run_on_draw(move |gl, program| unsafe {
            let location = gl.get_uniform_location(program, &name);
            gl.uniform_2_f32(location.as_ref(), value[0], value[1]);
        });
    }

    pub fn set_vec4(&mut self, name: &str, value: [f32; 4]) {
        let name = name.to_owned();
        self.run_on_draw(move |gl, program| unsafe {
            let location = gl.get_uniform_location(program, &name);
            gl.uniform_4_f32_slice(location.as_ref(), &value);
        });
    }

    pub fn set_int(&mut self, name: &str, value: i32) {
        let name = name.to_owned();
        self.run_on_draw(move |gl, program| unsafe {
            let location = gl.get_uniform_location(program, &name);
            gl.uniform_1_i32(location.as_ref(), value);
        });
    }

    /// Set a column-major 4x4 matrix uniform.
    pub fn set_mat4(&mut self, name: &str, value: [f32; 16]) {
        let name = name.to_owned();
        self.run_on_draw(move |gl, program| unsafe {
            let location = gl.get_uniform_location(program, &name);
            gl.uniform_matrix_4_f32_slice(location.as_ref(), false, &value);
        });
    }
}

impl ImageFilter<GLContext> for GLImageFilter {
    fn init(&mut self, ctx: &GLContext) -> Result<()> {
        if self.program.is_some() {
            return Ok(());
        }

        let gl: &glow::Context = ctx.get_context();
        let features = ctx.features();
        let vertex = features.shader_source(glow::VERTEX_SHADER, &self.vertex);
        let fragment = features.shader_source(glow::FRAGMENT_SHADER, &self.fragment);
        let program = util::gl_link_program(
            gl,
            &vertex,
            &fragment,
            &[
                (POSITION_LOCATION, POSITION_ATTRIBUTE),
                (TEXCOORD_LOCATION, TEXCOORD_ATTRIBUTE),
            ],
        )?;

        let quad = match DrawQuad::new(gl, features.vertex_arrays) {
            Ok(quad) => quad,
            Err(error) => {
                unsafe { gl.delete_program(program) };
                return Err(error);
            }
        };

        let (input_texture, output_size) = unsafe {
            (
                gl.get_uniform_location(program, INPUT_TEXTURE_UNIFORM),
                gl.get_uniform_location(program, OUTPUT_SIZE_UNIFORM),
            )
        };

        if input_texture.is_none() {
            log::debug!("{} does not sample {INPUT_TEXTURE_UNIFORM}", self.label);
        }

        self.program = Some(LinkedProgram {
            program,
            input_texture,
            output_size,
            quad,
        });
        Ok(())
    }

    fn is_initialized(&self) -> bool {
        self.program.is_some()
    }

    fn destroy(&mut self, ctx: &GLContext) {
        if let Some(linked) = self.program.take() {
            let gl: &glow::Context = ctx.get_context();
            unsafe { gl.delete_program(linked.program) };
            linked.quad.delete(gl);
        }
        self.pending.clear();
    }

    fn on_output_size_changed(
        &mut self,
        _ctx: &GLContext,
        size: Size<u32>,
    ) -> Result<()> {
        self.output_size = size;
        Ok(())
    }

    fn draw(&mut self, ctx: &GLContext, input: glow::Texture, geometry: &[f32], texture: &[f32]) {
        // queued uniforms need a program to land in
        let Some(linked) = &self.program else {
            log::trace!("{} drawn before init", self.label);
            return;
        };

        let gl: &glow::Context = ctx.get_context();
        unsafe {
            gl.use_program(Some(linked.program));
        }

        for task in self.pending.drain() {
            task(gl, linked.program);
        }

        unsafe {
            if !self.output_size.is_empty() {
                gl.viewport(
                    0,
                    0,
                    self.output_size.width as i32,
                    self.output_size.height as i32,
                );
                if let Some(location) = &linked.output_size {
                    gl.uniform_4_f32_slice(Some(location), &<[f32; 4]>::from(self.output_size));
                }
            }

            linked.quad.bind_vertices(gl, geometry, texture);

            gl.active_texture(glow::TEXTURE0);
            gl.bind_texture(glow::TEXTURE_2D, Some(input));
            if let Some(location) = &linked.input_texture {
                gl.uniform_1_i32(Some(location), 0);
            }

            let vertices = (geometry.len().min(texture.len()) / 2) as i32;
            gl.draw_arrays(glow::TRIANGLE_STRIP, 0, vertices);

            linked.quad.unbind_vertices(gl);
            gl.bind_texture(glow::TEXTURE_2D, None);
            gl.use_program(None);
        }
    }

    fn label(&self) -> &str {
        &self.label
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    pub fn passthrough_shaders_declare_bound_names() {
        assert!(NO_FILTER_VERTEX_SHADER.contains(&format!("attribute vec4 {POSITION_ATTRIBUTE};")));
        assert!(NO_FILTER_VERTEX_SHADER.contains(&format!("attribute vec4 {TEXCOORD_ATTRIBUTE};")));
        assert!(NO_FILTER_FRAGMENT_SHADER
            .contains(&format!("uniform sampler2D {INPUT_TEXTURE_UNIFORM};")));
    }

    #[test]
    pub fn uniform_setters_are_deferred() {
        let mut filter = GLImageFilter::passthrough().with_label("copy");
        filter.set_float("intensity", 0.5);
        filter.set_vec2("center", [0.5, 0.5]);
        filter.set_mat4("transform", [0.0; 16]);

        assert_eq!(filter.pending.len(), 3);
        assert!(!filter.is_initialized());
        assert_eq!(filter.program(), None);
        assert_eq!(ImageFilter::<GLContext>::label(&filter), "copy");
    }
}
