use crate::error::{FilterChainError, Result};
use glow::HasContext;

pub fn gl_compile_shader(gl: &glow::Context, stage: u32, source: &str) -> Result<glow::Shader> {
    unsafe {
        let shader = gl.create_shader(stage).map_err(FilterChainError::GlError)?;
        gl.shader_source(shader, source);
        gl.compile_shader(shader);

        if !gl.get_shader_compile_status(shader) {
            let log = gl.get_shader_info_log(shader);
            gl.delete_shader(shader);
            return Err(FilterChainError::GlCompileError(log));
        }
        Ok(shader)
    }
}

/// Compile and link a program, binding each `(location, name)` attribute before linking.
pub fn gl_link_program(
    gl: &glow::Context,
    vertex: &str,
    fragment: &str,
    attributes: &[(u32, &str)],
) -> Result<glow::Program> {
    let vertex = gl_compile_shader(gl, glow::VERTEX_SHADER, vertex)?;
    let fragment = match gl_compile_shader(gl, glow::FRAGMENT_SHADER, fragment) {
        Ok(fragment) => fragment,
        Err(error) => {
            unsafe { gl.delete_shader(vertex) };
            return Err(error);
        }
    };

    unsafe {
        let program = match gl.create_program() {
            Ok(program) => program,
            Err(error) => {
                gl.delete_shader(vertex);
                gl.delete_shader(fragment);
                return Err(FilterChainError::GlError(error));
            }
        };

        gl.attach_shader(program, vertex);
        gl.attach_shader(program, fragment);
        for &(location, name) in attributes {
            gl.bind_attrib_location(program, location, name);
        }
        gl.link_program(program);

        gl.detach_shader(program, vertex);
        gl.detach_shader(program, fragment);
        gl.delete_shader(vertex);
        gl.delete_shader(fragment);

        if !gl.get_program_link_status(program) {
            let log = gl.get_program_info_log(program);
            gl.delete_program(program);
            return Err(FilterChainError::GlLinkError(log));
        }
        Ok(program)
    }
}
